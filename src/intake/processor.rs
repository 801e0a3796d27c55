//! [`IntakeProcessor`]: detect → translate → classify for one complaint.

use std::sync::Arc;

use anyhow::Result;
use serde::Serialize;

use crate::classify::{Classification, Classifier, Suggestion};
use crate::config::AppConfig;
use crate::language::{
    ApiLanguageService, DetectedLanguage, FallbackDetector, FallbackTranslator, LanguageDetector,
    PassThrough, Translator,
};

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

/// Everything intake learned about one complaint description.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntakeReport {
    pub language_code: String,
    pub language_name: String,
    /// Set only when the description was not in the reference language.
    pub translated_text: Option<String>,
    pub classification: Classification,
}

/// Category, confidence and ranked alternatives for a piece of text,
/// without any language processing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifyPreview {
    pub category: String,
    pub confidence: f64,
    pub suggestions: Vec<Suggestion>,
}

// ---------------------------------------------------------------------------
// IntakeProcessor
// ---------------------------------------------------------------------------

/// Runs the intake pipeline.  Cheap to clone; all collaborators are shared.
#[derive(Clone)]
pub struct IntakeProcessor {
    classifier: Arc<Classifier>,
    detector: Arc<dyn LanguageDetector>,
    translator: Arc<dyn Translator>,
    reference_language: String,
}

impl IntakeProcessor {
    /// Create a processor from explicit collaborators.
    ///
    /// `reference_language` is the ISO-639-1 code the classifier's keywords
    /// are written in.
    pub fn new(
        classifier: Arc<Classifier>,
        detector: Arc<dyn LanguageDetector>,
        translator: Arc<dyn Translator>,
        reference_language: impl Into<String>,
    ) -> Self {
        Self {
            classifier,
            detector,
            translator,
            reference_language: reference_language.into(),
        }
    }

    /// Build the production pipeline from config: the configured category
    /// table plus fallback-wrapped HTTP language services (or pass-through
    /// services when `language.enabled` is false).
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let classifier = Arc::new(Classifier::new(config.classifier.load_table()?));
        let lang = &config.language;
        let reference = lang.reference_language.as_str();

        let detector: Arc<dyn LanguageDetector>;
        let translator: Arc<dyn Translator>;
        if lang.enabled {
            log::info!("language service: {}", lang.base_url);
            // One client pool serves both detection and translation.
            let service = Arc::new(ApiLanguageService::from_config(lang));
            detector = Arc::new(FallbackDetector::with_default(
                Arc::clone(&service),
                DetectedLanguage::from_code(reference),
            ));
            translator = Arc::new(FallbackTranslator::new(service));
        } else {
            log::info!("language service disabled, treating all text as {reference}");
            let passthrough = PassThrough::new(reference);
            detector = Arc::new(passthrough.clone());
            translator = Arc::new(passthrough);
        }

        Ok(Self::new(classifier, detector, translator, reference))
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn reference_language(&self) -> &str {
        &self.reference_language
    }

    /// Process one complaint description.  Never fails: collaborator errors
    /// fall back to the untranslated text.
    pub async fn process(&self, description: &str) -> IntakeReport {
        let detected = match self.detector.detect(description).await {
            Ok(lang) => lang,
            Err(e) => {
                log::warn!("intake: language detection failed ({e}), assuming reference language");
                DetectedLanguage::from_code(&self.reference_language)
            }
        };

        let translated_text = if detected.code != self.reference_language {
            let translated = match self
                .translator
                .translate(description, &detected.code, &self.reference_language)
                .await
            {
                Ok(text) => text,
                Err(e) => {
                    log::warn!("intake: translation failed ({e}), classifying original text");
                    description.to_string()
                }
            };
            log::debug!(
                "intake: translated {} -> {} ({} -> {} bytes)",
                detected.code,
                self.reference_language,
                description.len(),
                translated.len()
            );
            Some(translated)
        } else {
            None
        };

        let text = translated_text.as_deref().unwrap_or(description);
        let classification = self.classifier.classify(Some(text));

        log::info!(
            "intake: language={} category={} confidence={}",
            detected.code,
            classification.category,
            classification.confidence
        );

        IntakeReport {
            language_code: detected.code,
            language_name: detected.name,
            translated_text,
            classification,
        }
    }

    /// Classify `text` as-is and list the top suggestions alongside.
    pub fn preview(&self, text: Option<&str>) -> ClassifyPreview {
        let Classification {
            category,
            confidence,
            ..
        } = self.classifier.classify(text);
        ClassifyPreview {
            category,
            confidence,
            suggestions: self.classifier.suggestions(text),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
