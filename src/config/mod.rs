//! Configuration management for the notification engine.
//!
//! Two layers:
//! 1. `NotifierConfig`: where to look for the message catalog, loaded from
//!    defaults and `LICNOTIFY__*` environment variables
//! 2. Catalog-backed settings: `[Main]` labels and `[AccessData]` presets read
//!    from the located catalog document
//!

mod access_data;
mod locale;
mod settings;
pub use access_data::*;
pub use locale::*;
pub use settings::*;


//---
use std::path::PathBuf;

use config::Config;
use config::Environment;
use serde::Deserialize;

use crate::Result;

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct NotifierConfig {
    /// Explicit locale tag (e.g. "de-DE"); the process locale is used when unset
    #[serde(default)]
    pub locale: Option<String>,

    /// Directory searched before the executable and working directories
    #[serde(default)]
    pub catalog_dir: Option<PathBuf>,

    /// Catalog file name without locale and extension
    #[serde(default = "default_file_stem")]
    pub file_stem: String,

    #[serde(default = "default_extension")]
    pub extension: String,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            locale: None,
            catalog_dir: None,
            file_stem: default_file_stem(),
            extension: default_extension(),
        }
    }
}

impl NotifierConfig {
    /// Defaults overlaid with `LICNOTIFY__*` environment variables
    pub fn load() -> Result<Self> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("LICNOTIFY")
                    .separator("__")
                    .ignore_empty(true),
            )
            .build()?;
        Ok(config.try_deserialize()?)
    }

    /// Locale chain, most specific first, always ending with the unlocalized entry
    pub fn locale_chain(&self) -> LocaleChain {
        match &self.locale {
            Some(tag) => LocaleChain::for_tag(tag),
            None => LocaleChain::current(),
        }
    }

    pub fn search_directories(&self) -> Vec<PathBuf> {
        let mut directories: Vec<PathBuf> = Vec::new();
        let candidates = self
            .catalog_dir
            .clone()
            .into_iter()
            .chain(executable_dir())
            .chain(std::env::current_dir().ok());
        for dir in candidates {
            if !directories.contains(&dir) {
                directories.push(dir);
            }
        }
        directories
    }

    pub fn catalog_source(&self) -> CatalogSource {
        CatalogSource::new(&self.file_stem, &self.extension)
            .with_locales(self.locale_chain())
            .with_directories(self.search_directories())
    }
}

fn executable_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()?
        .parent()
        .map(|dir| dir.to_path_buf())
}

fn default_file_stem() -> String {
    "UserMessage".to_string()
}
fn default_extension() -> String {
    "ini".to_string()
}
