//! Capability traits for language detection and translation.
//!
//! Both collaborators live outside this crate (an HTTP service in
//! production).  They are allowed to fail; wrapping them in
//! [`FallbackDetector`](crate::language::FallbackDetector) /
//! [`FallbackTranslator`](crate::language::FallbackTranslator) turns every
//! failure into a sensible default.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::language::names::language_name;

// ---------------------------------------------------------------------------
// ServiceError
// ---------------------------------------------------------------------------

/// Errors that can occur while talking to a language service.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// HTTP transport or connection error, or a non-success status.
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The request did not complete within the configured timeout.
    #[error("language service request timed out")]
    Timeout,

    /// The response body could not be parsed as expected JSON.
    #[error("failed to parse language service response: {0}")]
    Parse(String),

    /// The service answered but with nothing usable.
    #[error("language service returned an empty response")]
    EmptyResponse,

    /// The service does not handle the requested language or operation.
    #[error("unsupported by language service: {0}")]
    Unsupported(String),
}

impl From<reqwest::Error> for ServiceError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ServiceError::Timeout
        } else {
            ServiceError::Request(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// DetectedLanguage
// ---------------------------------------------------------------------------

/// ISO-639-1 code plus a human-readable display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetectedLanguage {
    pub code: String,
    pub name: String,
}

impl DetectedLanguage {
    /// Build from a code, resolving the display name from the known table.
    pub fn from_code(code: &str) -> Self {
        Self {
            code: code.to_string(),
            name: language_name(code).to_string(),
        }
    }

    pub fn english() -> Self {
        Self::from_code("en")
    }
}

// ---------------------------------------------------------------------------
// Traits
// ---------------------------------------------------------------------------

/// Detects the language a text is written in.
#[async_trait]
pub trait LanguageDetector: Send + Sync {
    async fn detect(&self, text: &str) -> Result<DetectedLanguage, ServiceError>;
}

/// Translates text between two ISO-639-1 languages.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, ServiceError>;
}

// A shared service can back several wrappers at once.

#[async_trait]
impl<D: LanguageDetector + ?Sized> LanguageDetector for Arc<D> {
    async fn detect(&self, text: &str) -> Result<DetectedLanguage, ServiceError> {
        (**self).detect(text).await
    }
}

#[async_trait]
impl<T: Translator + ?Sized> Translator for Arc<T> {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, ServiceError> {
        (**self).translate(text, source, target).await
    }
}
