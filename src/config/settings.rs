//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files.  Missing keys fall back
//! to their defaults, so a partial `settings.toml` is valid.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::AppPaths;
use crate::classify::CategoryTable;

// ---------------------------------------------------------------------------
// ClassifierConfig
// ---------------------------------------------------------------------------

/// Settings for the keyword classifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Custom category table (TOML).  `None` uses `categories.toml` in the
    /// config directory if present, else the built-in municipal categories.
    pub table_path: Option<PathBuf>,
}

impl ClassifierConfig {
    /// Resolve the category table this config points at.
    pub fn load_table(&self) -> Result<Arc<CategoryTable>> {
        self.load_table_or(&AppPaths::new().categories_file)
    }

    /// Like [`load_table`](Self::load_table), with `conventional` standing in
    /// for the config-directory `categories.toml`.
    pub fn load_table_or(&self, conventional: &Path) -> Result<Arc<CategoryTable>> {
        let path = match &self.table_path {
            Some(path) => path.as_path(),
            None if conventional.is_file() => conventional,
            None => return Ok(CategoryTable::builtin()),
        };
        let table = CategoryTable::load_from(path)
            .with_context(|| format!("loading category table from {}", path.display()))?;
        log::info!("category table: {} ({} categories)", path.display(), table.len());
        Ok(Arc::new(table))
    }
}

// ---------------------------------------------------------------------------
// LanguageConfig
// ---------------------------------------------------------------------------

/// Settings for the language detection / translation service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageConfig {
    /// When `false`, every text is treated as already being in the
    /// reference language and no service is contacted.
    pub enabled: bool,
    /// Base URL of a LibreTranslate-compatible service.
    pub base_url: String,
    /// API key: `None` for self-hosted instances without keys.
    pub api_key: Option<String>,
    /// Language complaints are classified in (ISO-639-1).
    pub reference_language: String,
    /// Maximum seconds to wait for a response before timing out.
    pub timeout_secs: u64,
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: "http://localhost:5000".into(),
            api_key: None,
            reference_language: "en".into(),
            timeout_secs: 10,
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// ```rust,no_run
/// use civic_intake::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub classifier: ClassifierConfig,
    pub language: LanguageConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path, returning defaults when it is missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_required(path)
    }

    /// Load from a path the user named; a missing file is an error.
    pub fn load_required(path: &Path) -> Result<Self> {
        anyhow::ensure!(path.is_file(), "config file {} not found", path.display());
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
