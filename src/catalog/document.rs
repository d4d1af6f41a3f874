use std::collections::HashMap;
use std::path::Path;

use ini::Ini;
use ini::ParseOption;
use tracing::debug;

use crate::CatalogError;
use crate::Result;

/// Read access to a parsed `section → key → value` document.
///
/// Section and key matching is case-insensitive; the first matching section
/// wins.
pub trait ConfigLookup: Send + Sync {
    fn lookup(
        &self,
        section: &str,
        key: &str,
    ) -> Option<&str>;

    /// Section names as written in the document
    fn section_names(&self) -> Vec<&str>;
}

#[derive(Debug, Clone)]
struct Section {
    name: String,
    // lowercased key -> value, first occurrence kept
    entries: HashMap<String, String>,
}

/// INI message catalog.
///
/// Quotes and backslashes are kept verbatim and everything from the first
/// `;` of a value on is a comment. `\n`/`\t` markers stay two characters
/// until the text is rendered.
#[derive(Debug, Clone, Default)]
pub struct IniDocument {
    sections: Vec<Section>,
}

impl IniDocument {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn parse(text: &str) -> Result<Self> {
        let ini = Ini::load_from_str_opt(text, parse_option()).map_err(CatalogError::Syntax)?;
        Ok(Self::from_ini(&ini))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let ini =
            Ini::load_from_str_opt(&text, parse_option()).map_err(|source| CatalogError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        let document = Self::from_ini(&ini);
        debug!(
            "Loaded {} catalog sections from {}",
            document.sections.len(),
            path.display()
        );
        Ok(document)
    }

    fn from_ini(ini: &Ini) -> Self {
        let mut sections = Vec::new();
        // Keys before the first section header belong to no section
        for (name, properties) in ini.iter() {
            let Some(name) = name else {
                continue;
            };
            let mut entries = HashMap::new();
            for (key, value) in properties.iter() {
                entries
                    .entry(key.trim().to_lowercase())
                    .or_insert_with(|| strip_comment(value).to_string());
            }
            sections.push(Section {
                name: name.to_string(),
                entries,
            });
        }
        Self { sections }
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    fn section(
        &self,
        name: &str,
    ) -> Option<&Section> {
        self.sections
            .iter()
            .find(|section| section.name.eq_ignore_ascii_case(name))
    }
}

impl ConfigLookup for IniDocument {
    fn lookup(
        &self,
        section: &str,
        key: &str,
    ) -> Option<&str> {
        self.section(section)?
            .entries
            .get(&key.to_lowercase())
            .map(String::as_str)
    }

    fn section_names(&self) -> Vec<&str> {
        self.sections.iter().map(|s| s.name.as_str()).collect()
    }
}

fn parse_option() -> ParseOption {
    ParseOption {
        enabled_quote: false,
        enabled_escape: false,
        ..ParseOption::default()
    }
}

fn strip_comment(value: &str) -> &str {
    match value.split_once(';') {
        Some((text, _)) => text.trim(),
        None => value.trim(),
    }
}
