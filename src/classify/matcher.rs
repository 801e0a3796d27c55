//! Compiled keyword matchers.
//!
//! A keyword containing a space is a *phrase* and is counted as a plain
//! substring.  Anything else is a single *word* and only matches between
//! word boundaries, so `"road"` never fires inside `"roadway"`.
//!
//! Matchers expect both the keyword and the haystack to be lowercased
//! already; no case folding happens here.

use regex::Regex;

#[derive(Debug, Clone)]
pub(crate) enum KeywordMatcher {
    /// Multi-word phrase, matched as a literal substring.
    Phrase(String),
    /// Single word, matched as `\b<word>\b`.
    Word(Regex),
}

impl KeywordMatcher {
    /// Build the matcher for an already lowercased keyword.
    pub(crate) fn compile(keyword: &str) -> Result<Self, regex::Error> {
        if keyword.contains(' ') {
            return Ok(Self::Phrase(keyword.to_string()));
        }
        let pattern = format!(r"\b{}\b", regex::escape(keyword));
        Regex::new(&pattern).map(Self::Word)
    }

    /// Number of non-overlapping occurrences in `haystack`, scanning left to
    /// right.
    pub(crate) fn count(&self, haystack: &str) -> u64 {
        let hits = match self {
            Self::Phrase(phrase) => haystack.matches(phrase.as_str()).count(),
            Self::Word(re) => re.find_iter(haystack).count(),
        };
        hits as u64
    }

    pub(crate) fn is_phrase(&self) -> bool {
        matches!(self, Self::Phrase(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(w: &str) -> KeywordMatcher {
        KeywordMatcher::compile(w).expect("valid keyword")
    }

    #[test]
    fn word_respects_boundaries() {
        let m = word("road");
        assert_eq!(m.count("the road is damaged"), 1);
        assert_eq!(m.count("a new roadway"), 0);
        assert_eq!(m.count("railroad crossing"), 0);
        assert_eq!(m.count("road, road. (road)"), 3);
    }

    #[test]
    fn word_counts_every_occurrence() {
        assert_eq!(word("water").count("water water water"), 3);
    }

    #[test]
    fn word_is_escaped() {
        // A regex metacharacter in a keyword must be taken literally.
        let m = word("a.b");
        assert_eq!(m.count("a.b"), 1);
        assert_eq!(m.count("axb"), 0);
    }

    #[test]
    fn phrase_is_plain_substring() {
        let m = word("no water");
        assert!(m.is_phrase());
        assert_eq!(m.count("there is no water today"), 1);
        assert_eq!(m.count("no  water"), 0);
        assert_eq!(m.count("no water since monday, still no water"), 2);
    }

    #[test]
    fn phrase_counts_non_overlapping() {
        // "ha ha ha" holds "ha ha" once when scanning left to right.
        assert_eq!(word("ha ha").count("ha ha ha"), 1);
        assert_eq!(word("ha ha").count("ha ha ha ha"), 2);
    }

    #[test]
    fn phrase_ignores_word_boundaries() {
        assert_eq!(word("no light").count("no lighting at all"), 1);
    }
}
