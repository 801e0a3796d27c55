//! Complaint intake orchestration.
//!
//! # Flow
//!
//! ```text
//! description
//!   └─▶ LanguageDetector::detect
//!         ├─ reference language → classify(description)
//!         └─ other language     → Translator::translate → classify(translation)
//! ```
//!
//! Detector and translator failures degrade to "already in the reference
//! language" and "keep the original text" respectively; they never surface
//! from [`IntakeProcessor::process`].

pub mod processor;

pub use processor::{ClassifyPreview, IntakeProcessor, IntakeReport};
