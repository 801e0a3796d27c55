//! Category keyword tables.
//!
//! A [`CategoryTable`] is an ordered list of complaint categories, each with
//! its own [`KeywordWeights`].  Registration order is significant: when two
//! categories tie, the one registered first wins.
//!
//! The built-in municipal table is shared process-wide through
//! [`CategoryTable::builtin`].  Custom tables can be loaded from TOML:
//!
//! ```toml
//! [[category]]
//! name = "Roads"
//! keywords = { road = 3, pothole = 5, "broken road" = 5 }
//!
//! [[category]]
//! name = "Water"
//! keywords = { water = 3, "no water" = 5 }
//! ```

use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::Deserialize;
use thiserror::Error;

use crate::classify::matcher::KeywordMatcher;

// ---------------------------------------------------------------------------
// TableError
// ---------------------------------------------------------------------------

/// Reasons a category table can be rejected.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("category name must not be empty")]
    EmptyCategoryName,

    #[error("duplicate category: {0}")]
    DuplicateCategory(String),

    #[error("empty keyword in category {0}")]
    EmptyKeyword(String),

    #[error("duplicate keyword {keyword:?} in category {category}")]
    DuplicateKeyword { category: String, keyword: String },

    #[error("keyword {keyword:?} in category {category} has zero weight")]
    ZeroWeight { category: String, keyword: String },

    #[error("keyword {keyword:?} cannot be compiled: {source}")]
    Pattern {
        keyword: String,
        #[source]
        source: regex::Error,
    },

    #[error("failed to read category table: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse category table: {0}")]
    Parse(#[from] toml::de::Error),
}

// ---------------------------------------------------------------------------
// Built-in table
// ---------------------------------------------------------------------------

struct CategoryDef {
    name: &'static str,
    keywords: &'static [(&'static str, u32)],
}

static BUILTIN_CATEGORIES: &[CategoryDef] = &[
    CategoryDef {
        name: "Roads",
        keywords: &[
            ("road", 3),
            ("pothole", 5),
            ("crack", 2),
            ("pavement", 3),
            ("highway", 3),
            ("street", 2),
            ("asphalt", 3),
            ("bridge", 2),
            ("footpath", 2),
            ("sidewalk", 2),
            ("damaged road", 5),
            ("broken road", 5),
            ("bumpy", 2),
            ("uneven", 2),
            ("traffic", 1),
            ("accident", 2),
            ("construction", 2),
            ("paving", 3),
            ("tar", 2),
            ("gravel", 2),
            ("lane", 1),
            ("intersection", 2),
        ],
    },
    CategoryDef {
        name: "Water",
        keywords: &[
            ("water", 3),
            ("pipe", 3),
            ("leakage", 5),
            ("leak", 4),
            ("supply", 2),
            ("tap", 3),
            ("drinking", 2),
            ("contaminated", 4),
            ("dirty water", 5),
            ("no water", 5),
            ("water supply", 5),
            ("pipeline", 4),
            ("plumbing", 3),
            ("flood", 3),
            ("overflow", 3),
            ("tank", 2),
            ("bore", 2),
            ("well", 2),
            ("sewage", 3),
            ("waterlogging", 4),
        ],
    },
    CategoryDef {
        name: "Electricity",
        keywords: &[
            ("electricity", 4),
            ("power", 3),
            ("outage", 5),
            ("blackout", 5),
            ("transformer", 4),
            ("wire", 3),
            ("cable", 3),
            ("voltage", 4),
            ("current", 2),
            ("electric", 3),
            ("light", 2),
            ("streetlight", 5),
            ("street light", 5),
            ("power cut", 5),
            ("no power", 5),
            ("spark", 3),
            ("short circuit", 5),
            ("meter", 2),
            ("pole", 3),
            ("generator", 2),
            ("load shedding", 4),
        ],
    },
    CategoryDef {
        name: "Garbage",
        keywords: &[
            ("garbage", 5),
            ("waste", 4),
            ("trash", 5),
            ("rubbish", 4),
            ("dump", 4),
            ("dustbin", 3),
            ("bin", 2),
            ("litter", 3),
            ("dirty", 2),
            ("filth", 3),
            ("stink", 3),
            ("smell", 2),
            ("sanitation", 3),
            ("cleanup", 3),
            ("sweeping", 2),
            ("collection", 2),
            ("garbage collection", 5),
            ("waste management", 5),
            ("debris", 3),
            ("pile", 2),
            ("overflow", 3),
        ],
    },
    CategoryDef {
        name: "Drainage",
        keywords: &[
            ("drain", 5),
            ("drainage", 5),
            ("sewer", 5),
            ("blocked", 3),
            ("clog", 4),
            ("blockage", 5),
            ("gutter", 4),
            ("manhole", 4),
            ("overflow", 3),
            ("stagnant", 3),
            ("water logging", 4),
            ("flooding", 3),
            ("canal", 2),
            ("storm drain", 5),
            ("nala", 3),
            ("open drain", 5),
            ("mosquito", 2),
            ("breeding", 2),
            ("stench", 3),
        ],
    },
    CategoryDef {
        name: "Street Lighting",
        keywords: &[
            ("streetlight", 5),
            ("street light", 5),
            ("lamp", 3),
            ("bulb", 3),
            ("dark", 2),
            ("no light", 5),
            ("broken light", 5),
            ("dim", 2),
            ("flickering", 3),
            ("pole light", 4),
            ("night", 1),
            ("illumination", 3),
            ("led", 2),
            ("lighting", 3),
        ],
    },
];

static BUILTIN_TABLE: Lazy<Arc<CategoryTable>> = Lazy::new(|| {
    let specs = BUILTIN_CATEGORIES
        .iter()
        .map(|def| CategorySpec::new(def.name, def.keywords))
        .collect();
    Arc::new(CategoryTable::new(specs).expect("built-in category table is valid"))
});

// ---------------------------------------------------------------------------
// CategorySpec
// ---------------------------------------------------------------------------

/// Uncompiled description of one category, as handed to
/// [`CategoryTable::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySpec {
    pub name: String,
    pub keywords: Vec<(String, u32)>,
}

impl CategorySpec {
    pub fn new(name: impl Into<String>, keywords: &[(&str, u32)]) -> Self {
        Self {
            name: name.into(),
            keywords: keywords
                .iter()
                .map(|(kw, weight)| (kw.to_string(), *weight))
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Keyword / KeywordWeights / Category
// ---------------------------------------------------------------------------

/// One weighted keyword or phrase with its compiled matcher.
#[derive(Debug, Clone)]
pub struct Keyword {
    text: String,
    weight: u32,
    matcher: KeywordMatcher,
}

impl Keyword {
    /// The keyword as registered, lowercased.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn weight(&self) -> u32 {
        self.weight
    }

    /// `true` for multi-word phrases (substring matching).
    pub fn is_phrase(&self) -> bool {
        self.matcher.is_phrase()
    }

    /// Weighted contribution of this keyword to a lowercased text.
    pub(crate) fn score(&self, lowered: &str) -> u64 {
        self.matcher.count(lowered) * u64::from(self.weight)
    }
}

/// The keyword → weight mapping of a single category.
#[derive(Debug, Clone, Default)]
pub struct KeywordWeights {
    entries: Vec<Keyword>,
}

impl KeywordWeights {
    pub fn iter(&self) -> impl Iterator<Item = &Keyword> {
        self.entries.iter()
    }

    /// Weight registered for `keyword` (case-insensitive), if any.
    pub fn weight_of(&self, keyword: &str) -> Option<u32> {
        let keyword = keyword.to_lowercase();
        self.entries
            .iter()
            .find(|k| k.text == keyword)
            .map(|k| k.weight)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A named category and its keywords.
#[derive(Debug, Clone)]
pub struct Category {
    name: String,
    keywords: KeywordWeights,
}

impl Category {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn keywords(&self) -> &KeywordWeights {
        &self.keywords
    }

    /// Total weighted score of this category against a lowercased text.
    pub(crate) fn score(&self, lowered: &str) -> u64 {
        self.keywords.iter().map(|kw| kw.score(lowered)).sum()
    }
}

// ---------------------------------------------------------------------------
// CategoryTable
// ---------------------------------------------------------------------------

/// Immutable, ordered set of categories.
#[derive(Debug, Clone, Default)]
pub struct CategoryTable {
    categories: Vec<Category>,
}

#[derive(Debug, Deserialize)]
struct TableFile {
    #[serde(default)]
    category: Vec<CategoryEntry>,
}

#[derive(Debug, Deserialize)]
struct CategoryEntry {
    name: String,
    #[serde(default)]
    keywords: BTreeMap<String, u32>,
}

impl CategoryTable {
    /// Validate and compile a table.
    ///
    /// Keywords are lowercased here so that matching against lowercased
    /// input is case-insensitive.
    pub fn new(specs: Vec<CategorySpec>) -> Result<Self, TableError> {
        let mut seen_names = HashSet::new();
        let mut categories = Vec::with_capacity(specs.len());

        for spec in specs {
            if spec.name.trim().is_empty() {
                return Err(TableError::EmptyCategoryName);
            }
            if !seen_names.insert(spec.name.clone()) {
                return Err(TableError::DuplicateCategory(spec.name));
            }

            let mut seen_keywords = HashSet::new();
            let mut entries = Vec::with_capacity(spec.keywords.len());

            for (raw, weight) in spec.keywords {
                let text = raw.to_lowercase();
                if text.trim().is_empty() {
                    return Err(TableError::EmptyKeyword(spec.name));
                }
                if weight == 0 {
                    return Err(TableError::ZeroWeight {
                        category: spec.name,
                        keyword: raw,
                    });
                }
                if !seen_keywords.insert(text.clone()) {
                    return Err(TableError::DuplicateKeyword {
                        category: spec.name,
                        keyword: raw,
                    });
                }
                let matcher = KeywordMatcher::compile(&text).map_err(|source| {
                    TableError::Pattern {
                        keyword: raw.clone(),
                        source,
                    }
                })?;
                entries.push(Keyword {
                    text,
                    weight,
                    matcher,
                });
            }

            categories.push(Category {
                name: spec.name,
                keywords: KeywordWeights { entries },
            });
        }

        Ok(Self { categories })
    }

    /// The built-in municipal table, compiled once per process.
    pub fn builtin() -> Arc<Self> {
        Arc::clone(&BUILTIN_TABLE)
    }

    /// Parse a table from TOML (`[[category]]` entries, see module docs).
    pub fn from_toml_str(content: &str) -> Result<Self, TableError> {
        let file: TableFile = toml::from_str(content)?;
        let specs = file
            .category
            .into_iter()
            .map(|entry| CategorySpec {
                name: entry.name,
                keywords: entry.keywords.into_iter().collect(),
            })
            .collect();
        Self::new(specs)
    }

    /// Load a table from a TOML file.
    pub fn load_from(path: &Path) -> Result<Self, TableError> {
        let content = std::fs::read_to_string(path)?;
        let table = Self::from_toml_str(&content)?;
        log::info!(
            "loaded {} categories from {}",
            table.len(),
            path.display()
        );
        Ok(table)
    }

    /// Categories in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    /// Category names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.name.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
