//! Cross-platform application paths using the `dirs` crate.
//!
//! Config dir:
//!   Windows: %APPDATA%\civic-intake\
//!   macOS:   ~/Library/Application Support/civic-intake/
//!   Linux:   ~/.config/civic-intake/

use std::path::PathBuf;

/// Holds all resolved application directory/file paths.
#[derive(Debug, Clone)]
pub struct AppPaths {
    /// Directory for `settings.toml` and custom category tables.
    pub config_dir: PathBuf,
    /// Full path to `settings.toml`.
    pub settings_file: PathBuf,
    /// Conventional location of a custom `categories.toml`.
    pub categories_file: PathBuf,
}

impl AppPaths {
    const APP_NAME: &'static str = "civic-intake";

    /// Resolves all paths using the `dirs` crate.
    ///
    /// Falls back to the current directory if the platform cannot provide a
    /// standard path.
    pub fn new() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(Self::APP_NAME);

        let settings_file = config_dir.join("settings.toml");
        let categories_file = config_dir.join("categories.toml");

        Self {
            config_dir,
            settings_file,
            categories_file,
        }
    }
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::new()
    }
}
