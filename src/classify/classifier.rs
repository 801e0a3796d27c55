//! Keyword-weighted complaint classifier.
//!
//! [`Classifier`] scores a text against every category of a shared
//! [`CategoryTable`] and returns the best match, a confidence percentage and
//! the full [`ScoreVector`].  It is a pure function of the table and the
//! input: no state is kept between calls, so one instance can be shared
//! freely across threads behind an `Arc`.
//!
//! # Example
//! ```rust
//! use civic_intake::classify::Classifier;
//!
//! let classifier = Classifier::builtin();
//! let result = classifier.classify(Some("Huge pothole on the main road"));
//! assert_eq!(result.category, "Roads");
//! assert_eq!(result.confidence, 100.0);
//! ```

use std::sync::Arc;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::classify::table::CategoryTable;

/// Category reported when nothing in the text matched.
pub const OTHER_CATEGORY: &str = "Other";

/// Upper bound on the number of entries returned by
/// [`Classifier::suggestions`].
pub const MAX_SUGGESTIONS: usize = 3;

// ---------------------------------------------------------------------------
// ScoreVector
// ---------------------------------------------------------------------------

/// Per-category scores of one classification pass, in table order.
///
/// Serialises as a JSON object whose keys keep that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreVector {
    entries: Vec<(String, u64)>,
}

impl ScoreVector {
    /// Score of `category`, or `None` when it is not part of the vector.
    pub fn get(&self, category: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, score)| *score)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(name, score)| (name.as_str(), *score))
    }

    /// Sum of every category's score.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, score)| score).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First category holding the maximum score, if any score is non-zero.
    fn best(&self) -> Option<(&str, u64)> {
        let mut best: Option<(&str, u64)> = None;
        for (name, score) in self.iter() {
            if score == 0 {
                continue;
            }
            // Strictly greater: earlier categories keep ties.
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((name, score));
            }
        }
        best
    }
}

impl Serialize for ScoreVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, score) in &self.entries {
            map.serialize_entry(name, score)?;
        }
        map.end()
    }
}

// ---------------------------------------------------------------------------
// Classification / Suggestion
// ---------------------------------------------------------------------------

/// Outcome of [`Classifier::classify`].
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Classification {
    /// Winning category name, or [`OTHER_CATEGORY`].
    pub category: String,
    /// Winner's share of the total score as a percentage, one decimal.
    pub confidence: f64,
    pub scores: ScoreVector,
}

impl Classification {
    fn unclassified(scores: ScoreVector) -> Self {
        Self {
            category: OTHER_CATEGORY.to_string(),
            confidence: 0.0,
            scores,
        }
    }

    /// `true` when no keyword matched (or there was no text at all).
    pub fn is_other(&self) -> bool {
        self.category == OTHER_CATEGORY
    }
}

/// One ranked alternative from [`Classifier::suggestions`].
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Suggestion {
    pub category: String,
    pub score: u64,
}

// ---------------------------------------------------------------------------
// Classifier
// ---------------------------------------------------------------------------

/// Scores complaint text against a shared category table.
#[derive(Debug, Clone)]
pub struct Classifier {
    table: Arc<CategoryTable>,
}

impl Classifier {
    pub fn new(table: Arc<CategoryTable>) -> Self {
        Self { table }
    }

    /// Classifier over the built-in municipal categories.
    pub fn builtin() -> Self {
        Self::new(CategoryTable::builtin())
    }

    pub fn table(&self) -> &CategoryTable {
        &self.table
    }

    /// Category names in registration (tie-break) order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.table.names()
    }

    /// Score `text` against every category.  Every category appears in the
    /// result, including those with no hits.
    pub fn score(&self, text: &str) -> ScoreVector {
        let lowered = text.to_lowercase();
        let entries = self
            .table
            .iter()
            .map(|category| (category.name().to_string(), category.score(&lowered)))
            .collect();
        ScoreVector { entries }
    }

    /// Classify `text`.
    ///
    /// * Absent or empty text yields `Other` with an *empty* score vector.
    /// * Text with no keyword hits yields `Other` with a zero-filled vector.
    /// * Otherwise the highest-scoring category wins; ties go to the category
    ///   registered first.
    pub fn classify(&self, text: Option<&str>) -> Classification {
        let Some(text) = text.filter(|t| !t.is_empty()) else {
            return Classification::unclassified(ScoreVector::default());
        };

        let scores = self.score(text);
        let total = scores.total();

        let Some((best, max)) = scores.best() else {
            log::debug!("classify: no keyword hits in {} chars", text.len());
            return Classification::unclassified(scores);
        };

        let category = best.to_string();
        let confidence = confidence(max, total);
        log::debug!("classify: {category} (score {max} of {total}, {confidence}%)");

        Classification {
            category,
            confidence,
            scores,
        }
    }

    /// Up to [`MAX_SUGGESTIONS`] categories with a non-zero score, highest
    /// first.  Equal scores keep table order.
    pub fn suggestions(&self, text: Option<&str>) -> Vec<Suggestion> {
        let Some(text) = text.filter(|t| !t.is_empty()) else {
            return Vec::new();
        };

        let mut ranked: Vec<Suggestion> = self
            .score(text)
            .iter()
            .filter(|(_, score)| *score > 0)
            .map(|(category, score)| Suggestion {
                category: category.to_string(),
                score,
            })
            .collect();
        // `sort_by` is stable, which preserves table order among equals.
        ranked.sort_by(|a, b| b.score.cmp(&a.score));
        ranked.truncate(MAX_SUGGESTIONS);
        ranked
    }
}

/// `max / total` as a percentage rounded half-up to one decimal place.
///
/// Done in integer tenths-of-a-percent so the halfway case never depends on
/// floating point rounding: `floor(max * 1000 / total + 1/2)`.
fn confidence(max: u64, total: u64) -> f64 {
    debug_assert!(total > 0 && max <= total);
    let tenths = (max * 2000 + total) / (2 * total);
    tenths as f64 / 10.0
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::table::CategorySpec;

    fn classifier() -> Classifier {
        Classifier::builtin()
    }

    fn custom(specs: Vec<CategorySpec>) -> Classifier {
        Classifier::new(Arc::new(CategoryTable::new(specs).expect("valid table")))
    }

    #[test]
    fn empty_or_absent_text_has_empty_scores() {
        let c = classifier();
        for input in [None, Some("")] {
            let result = c.classify(input);
            assert_eq!(result.category, "Other");
            assert_eq!(result.confidence, 0.0);
            assert!(result.scores.is_empty());
        }
    }

    #[test]
    fn no_hits_has_zero_filled_scores() {
        let c = classifier();
        let result = c.classify(Some("asdkj qweroiu"));
        assert_eq!(result.category, "Other");
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.scores.len(), 6);
        assert!(result.scores.iter().all(|(_, score)| score == 0));
    }

    #[test]
    fn whitespace_only_is_scored_not_short_circuited() {
        let result = classifier().classify(Some("   "));
        assert!(result.is_other());
        assert_eq!(result.scores.len(), 6);
    }

    #[test]
    fn pothole_on_main_street() {
        let result = classifier()
            .classify(Some("There is a dangerous pothole on Main Street, urgent repair needed"));
        assert_eq!(result.category, "Roads");
        // pothole (5) + street (2)
        assert_eq!(result.scores.get("Roads"), Some(7));
        assert_eq!(result.scores.total(), 7);
        assert_eq!(result.confidence, 100.0);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let result = classifier().classify(Some("POTHOLE"));
        assert_eq!(result.category, "Roads");
        assert_eq!(result.scores.get("Roads"), Some(5));
    }

    #[test]
    fn word_keywords_need_boundaries() {
        let c = classifier();
        assert!(c.classify(Some("roadway")).is_other());
        let hit = c.classify(Some("the road is damaged"));
        assert_eq!(hit.scores.get("Roads"), Some(3));
    }

    #[test]
    fn phrase_adds_on_top_of_words() {
        let c = classifier();
        // "no water" (5) + "water" (3)
        assert_eq!(c.classify(Some("no water")).scores.get("Water"), Some(8));
        // Separated words do not form the phrase.
        let scores = c.classify(Some("no electricity, water is fine")).scores;
        assert_eq!(scores.get("Water"), Some(3));
        assert_eq!(scores.get("Electricity"), Some(4));
    }

    #[test]
    fn repeated_keywords_accumulate() {
        let c = classifier();
        assert_eq!(
            c.classify(Some("water water water")).scores.get("Water"),
            Some(9)
        );
        // Two phrase hits (2 x 5) + three word hits (3 x 3).
        assert_eq!(
            c.classify(Some("no water, no water, water")).scores.get("Water"),
            Some(19)
        );
    }

    #[test]
    fn confidence_is_share_of_total() {
        let c = classifier();
        // Water: water (3) + leak (4) = 7, Roads: pothole (5) = 5
        let result = c.classify(Some("water leak near the pothole"));
        assert_eq!(result.category, "Water");
        assert_eq!(result.confidence, 58.3);

        // Electricity 4, Water 3 -> 4/7 = 57.14
        let result = c.classify(Some("no electricity, water is fine"));
        assert_eq!(result.category, "Electricity");
        assert_eq!(result.confidence, 57.1);
    }

    #[test]
    fn tie_goes_to_first_registered() {
        let c = classifier();
        // overflow is worth 3 in Water, Garbage and Drainage.
        let result = c.classify(Some("overflow"));
        assert_eq!(result.category, "Water");
        assert_eq!(result.confidence, 33.3);

        // streetlight is worth 5 in Electricity and Street Lighting.
        let result = c.classify(Some("streetlight broken"));
        assert_eq!(result.category, "Electricity");
        assert_eq!(result.confidence, 50.0);

        let result = c.classify(Some("road water"));
        assert_eq!(result.category, "Roads");
        assert_eq!(result.confidence, 50.0);
    }

    #[test]
    fn tie_break_follows_custom_order() {
        let c = custom(vec![
            CategorySpec::new("Noise", &[("loud", 2)]),
            CategorySpec::new("Parks", &[("park", 2)]),
        ]);
        assert_eq!(c.classify(Some("park loud")).category, "Noise");

        let c = custom(vec![
            CategorySpec::new("Parks", &[("park", 2)]),
            CategorySpec::new("Noise", &[("loud", 2)]),
        ]);
        assert_eq!(c.classify(Some("park loud")).category, "Parks");
    }

    #[test]
    fn empty_table_is_always_other() {
        let c = custom(Vec::new());
        let result = c.classify(Some("pothole"));
        assert!(result.is_other());
        assert!(result.scores.is_empty());
        assert!(c.suggestions(Some("pothole")).is_empty());
    }

    #[test]
    fn confidence_rounds_half_up() {
        // 1/8 = 12.5% exactly, 1/16 = 6.25% -> 6.3, 1/3 = 33.33 -> 33.3
        assert_eq!(confidence(1, 8), 12.5);
        assert_eq!(confidence(1, 16), 6.3);
        assert_eq!(confidence(1, 3), 33.3);
        assert_eq!(confidence(2, 3), 66.7);
        assert_eq!(confidence(5, 5), 100.0);
        // 1/2000 = 0.05% -> 0.1
        assert_eq!(confidence(1, 2000), 0.1);
    }

    #[test]
    fn suggestions_are_ranked_and_capped() {
        let c = classifier();
        // Roads 5, Water 3, Electricity 4, Garbage 5, Drainage 5
        let top = c.suggestions(Some("pothole water electricity garbage drain"));
        assert_eq!(
            top,
            vec![
                Suggestion { category: "Roads".into(), score: 5 },
                Suggestion { category: "Garbage".into(), score: 5 },
                Suggestion { category: "Drainage".into(), score: 5 },
            ]
        );
    }

    #[test]
    fn suggestions_drop_zero_scores() {
        let c = classifier();
        // Roads: street (2), Electricity: light (2) + "street light" (5),
        // Street Lighting: "street light" (5)
        let top = c.suggestions(Some("street light"));
        let names: Vec<&str> = top.iter().map(|s| s.category.as_str()).collect();
        assert_eq!(names, ["Electricity", "Street Lighting", "Roads"]);
        assert_eq!(top[0].score, 7);

        let single = c.suggestions(Some("pothole"));
        assert_eq!(single.len(), 1);
        assert!(c.suggestions(Some("asdkj qweroiu")).is_empty());
        assert!(c.suggestions(None).is_empty());
    }

    #[test]
    fn suggestions_keep_table_order_on_ties() {
        let top = classifier().suggestions(Some("overflow"));
        let names: Vec<&str> = top.iter().map(|s| s.category.as_str()).collect();
        assert_eq!(names, ["Water", "Garbage", "Drainage"]);
    }

    #[test]
    fn classify_is_deterministic() {
        let c = classifier();
        let text = "Overflowing garbage bin and a blocked drain near the road";
        let first = c.classify(Some(text));
        for _ in 0..10 {
            assert_eq!(c.classify(Some(text)), first);
            assert_eq!(c.suggestions(Some(text)), c.suggestions(Some(text)));
        }
    }

    #[test]
    fn scores_serialise_in_table_order() {
        let result = classifier().classify(Some("pothole"));
        let json = serde_json::to_string(&result.scores).expect("json");
        assert_eq!(
            json,
            r#"{"Roads":5,"Water":0,"Electricity":0,"Garbage":0,"Drainage":0,"Street Lighting":0}"#
        );
    }

    #[test]
    fn original_text_is_not_altered() {
        let text = String::from("Broken ROAD");
        let _ = classifier().classify(Some(&text));
        assert_eq!(text, "Broken ROAD");
    }
}
