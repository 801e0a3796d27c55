//! HTTP language service speaking the LibreTranslate wire format.
//!
//! * `POST {base_url}/detect`    `{q, api_key?}` → `[{language, confidence}]`
//! * `POST {base_url}/translate` `{q, source, target, format, api_key?}` →
//!   `{translatedText}`
//!
//! All connection details come from [`LanguageConfig`]; nothing is
//! hardcoded.

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::LanguageConfig;
use crate::language::service::{DetectedLanguage, LanguageDetector, ServiceError, Translator};

#[derive(Debug, Deserialize)]
struct DetectCandidate {
    language: String,
    #[serde(default)]
    confidence: f64,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

/// Language detection and translation backed by a LibreTranslate-compatible
/// HTTP service.
pub struct ApiLanguageService {
    client: reqwest::Client,
    config: LanguageConfig,
}

impl ApiLanguageService {
    /// Build a service client from config.
    ///
    /// The HTTP client carries the per-request timeout from
    /// `config.timeout_secs`; a default client is used if the builder fails.
    pub fn from_config(config: &LanguageConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            config: config.clone(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.config.base_url.trim_end_matches('/'))
    }

    /// Attach `api_key` to a request body only when it is a non-empty string.
    fn with_api_key(&self, mut body: serde_json::Value) -> serde_json::Value {
        let key = self.config.api_key.as_deref().unwrap_or("");
        if !key.is_empty() {
            body["api_key"] = serde_json::Value::String(key.to_string());
        }
        body
    }

    async fn post<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<T, ServiceError> {
        let response = self
            .client
            .post(self.endpoint(path))
            .json(&self.with_api_key(body))
            .send()
            .await?
            .error_for_status()?;

        response
            .json::<T>()
            .await
            .map_err(|e| ServiceError::Parse(e.to_string()))
    }
}

#[async_trait]
impl LanguageDetector for ApiLanguageService {
    /// Ask the service for candidate languages and keep the most confident.
    async fn detect(&self, text: &str) -> Result<DetectedLanguage, ServiceError> {
        let candidates: Vec<DetectCandidate> =
            self.post("detect", serde_json::json!({ "q": text })).await?;

        let best = candidates
            .into_iter()
            .filter(|c| !c.language.trim().is_empty())
            .max_by(|a, b| a.confidence.total_cmp(&b.confidence))
            .ok_or(ServiceError::EmptyResponse)?;

        log::debug!(
            "detect: {} (confidence {:.1})",
            best.language,
            best.confidence
        );
        Ok(DetectedLanguage::from_code(best.language.trim()))
    }
}

#[async_trait]
impl Translator for ApiLanguageService {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, ServiceError> {
        let body = serde_json::json!({
            "q":      text,
            "source": source,
            "target": target,
            "format": "text"
        });
        let response: TranslateResponse = self.post("translate", body).await?;

        let translated = response.translated_text.trim().to_string();
        if translated.is_empty() {
            return Err(ServiceError::EmptyResponse);
        }
        Ok(translated)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
