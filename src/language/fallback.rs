//! Fallback wrappers: language services that never fail.
//!
//! [`FallbackDetector`] reports the reference language whenever detection is
//! pointless (text too short) or the inner detector errors.
//! [`FallbackTranslator`] returns the original text whenever translation is
//! unnecessary or the inner translator errors.  Intake keeps working even
//! when the language service is down.

use async_trait::async_trait;

use crate::language::service::{DetectedLanguage, LanguageDetector, ServiceError, Translator};

/// Texts shorter than this (in characters, after trimming) are not sent to
/// the detector.
const MIN_DETECT_CHARS: usize = 3;

// ---------------------------------------------------------------------------
// FallbackDetector
// ---------------------------------------------------------------------------

/// Wraps any [`LanguageDetector`]; never returns an error.
pub struct FallbackDetector<D: LanguageDetector> {
    inner: D,
    default: DetectedLanguage,
}

impl<D: LanguageDetector> FallbackDetector<D> {
    /// Wrap `inner`, falling back to English.
    pub fn new(inner: D) -> Self {
        Self::with_default(inner, DetectedLanguage::english())
    }

    /// Wrap `inner`, falling back to `default`.
    pub fn with_default(inner: D, default: DetectedLanguage) -> Self {
        Self { inner, default }
    }

    pub fn inner(&self) -> &D {
        &self.inner
    }
}

#[async_trait]
impl<D: LanguageDetector> LanguageDetector for FallbackDetector<D> {
    async fn detect(&self, text: &str) -> Result<DetectedLanguage, ServiceError> {
        if text.trim().chars().count() < MIN_DETECT_CHARS {
            return Ok(self.default.clone());
        }
        match self.inner.detect(text).await {
            Ok(lang) => Ok(lang),
            Err(err) => {
                log::warn!(
                    "language detection failed ({err}); assuming {} (len={})",
                    self.default.code,
                    text.len()
                );
                Ok(self.default.clone())
            }
        }
    }
}

// ---------------------------------------------------------------------------
// FallbackTranslator
// ---------------------------------------------------------------------------

/// Wraps any [`Translator`]; on failure returns the text unchanged.
pub struct FallbackTranslator<T: Translator> {
    inner: T,
}

impl<T: Translator> FallbackTranslator<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }
}

#[async_trait]
impl<T: Translator> Translator for FallbackTranslator<T> {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, ServiceError> {
        if text.is_empty() || source == target {
            return Ok(text.to_string());
        }
        match self.inner.translate(text, source, target).await {
            Ok(translated) => Ok(translated),
            Err(err) => {
                log::warn!(
                    "translation {source}->{target} failed ({err}); keeping original text (len={})",
                    text.len()
                );
                Ok(text.to_string())
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
