//! Complaint classification.
//!
//! This module provides:
//! * [`CategoryTable`]: ordered categories with weighted keywords
//!   (built-in municipal table or loaded from TOML).
//! * [`Classifier`]: scores text against a table and picks a category.
//! * [`Classification`] / [`ScoreVector`] / [`Suggestion`]: results.
//! * [`TableError`]: table validation / loading failures.

mod matcher;
pub mod classifier;
pub mod table;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use classifier::{
    Classification, Classifier, ScoreVector, Suggestion, MAX_SUGGESTIONS, OTHER_CATEGORY,
};
pub use table::{Category, CategorySpec, CategoryTable, Keyword, KeywordWeights, TableError};
