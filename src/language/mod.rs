//! Language services used during complaint intake.
//!
//! This module provides:
//! * [`LanguageDetector`] / [`Translator`]: async capability traits.
//! * [`ApiLanguageService`]: LibreTranslate-compatible HTTP backend.
//! * [`FallbackDetector`] / [`FallbackTranslator`]: wrappers that never fail.
//! * [`PassThrough`]: offline stand-in when the service is disabled.
//! * [`language_name`] / [`known_codes`]: display names for ISO-639-1 codes.
//! * [`ServiceError`]: error variants for service calls.

pub mod api;
pub mod fallback;
pub mod names;
pub mod passthrough;
pub mod service;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use api::ApiLanguageService;
pub use fallback::{FallbackDetector, FallbackTranslator};
pub use names::{known_codes, language_name};
pub use passthrough::PassThrough;
pub use service::{DetectedLanguage, LanguageDetector, ServiceError, Translator};
