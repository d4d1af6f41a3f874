use std::path::PathBuf;

use tracing::trace;

/// Ordered locale names used to pick a localized catalog file.
///
/// `de-DE` yields `["de-DE", "de", ""]`; the trailing empty entry stands for
/// the unlocalized file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleChain(Vec<String>);

impl LocaleChain {
    pub fn for_tag(tag: &str) -> Self {
        let mut chain = Vec::new();
        let mut current = normalize_tag(tag);
        while !current.is_empty() {
            chain.push(current.clone());
            current = match current.rfind('-') {
                Some(pos) => current[..pos].to_string(),
                None => String::new(),
            };
        }
        chain.push(String::new());
        Self(chain)
    }

    /// Chain for the process locale taken from `LC_ALL`, `LC_MESSAGES`, `LANG`
    pub fn current() -> Self {
        let tag = ["LC_ALL", "LC_MESSAGES", "LANG"]
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|value| !value.trim().is_empty())
            .unwrap_or_default();
        Self::for_tag(&tag)
    }

    pub fn unlocalized() -> Self {
        Self(vec![String::new()])
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// `de_DE.UTF-8@euro` → `de-DE`; `C` and `POSIX` carry no locale
fn normalize_tag(tag: &str) -> String {
    let tag = tag.trim();
    let tag = tag.split(['.', '@']).next().unwrap_or_default();
    if tag.eq_ignore_ascii_case("C") || tag.eq_ignore_ascii_case("POSIX") {
        return String::new();
    }
    tag.replace('_', "-")
}

/// Candidate catalog files across base directories and locales.
#[derive(Debug, Clone)]
pub struct CatalogSource {
    file_stem: String,
    extension: String,
    locales: LocaleChain,
    directories: Vec<PathBuf>,
}

impl CatalogSource {
    pub fn new(
        file_stem: &str,
        extension: &str,
    ) -> Self {
        Self {
            file_stem: file_stem.to_string(),
            extension: extension.to_string(),
            locales: LocaleChain::unlocalized(),
            directories: Vec::new(),
        }
    }

    pub fn with_locales(
        mut self,
        locales: LocaleChain,
    ) -> Self {
        self.locales = locales;
        self
    }

    pub fn with_directories(
        mut self,
        directories: Vec<PathBuf>,
    ) -> Self {
        self.directories = directories;
        self
    }

    pub fn directories(&self) -> &[PathBuf] {
        &self.directories
    }

    /// `UserMessagede-DE.ini`, `UserMessagede.ini`, `UserMessage.ini`
    pub fn file_names(&self) -> Vec<String> {
        self.locales
            .iter()
            .map(|locale| format!("{}{}.{}", self.file_stem, locale, self.extension))
            .collect()
    }

    /// Every candidate path, directory-major, in search order
    pub fn candidates(&self) -> Vec<PathBuf> {
        let names = self.file_names();
        self.directories
            .iter()
            .flat_map(|dir| names.iter().map(move |name| dir.join(name)))
            .collect()
    }

    /// First existing candidate
    pub fn locate(&self) -> Option<PathBuf> {
        self.candidates().into_iter().find(|path| {
            let found = path.is_file();
            trace!(?path, found, "Probing message catalog");
            found
        })
    }
}
