use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;
use tracing::info;
use tracing::warn;

use super::category_for;
use super::ConfigLookup;
use super::IniDocument;
use super::ProtectionSystem;
use crate::constants::*;
use crate::CatalogError;
use crate::CatalogSource;
use crate::Result;

/// Caption, header and body of one notice. Bodies may still contain escape
/// markers and placeholder tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTemplate {
    pub caption: String,
    pub header: String,
    pub body: String,
}

impl MessageTemplate {
    pub fn new(
        caption: impl Into<String>,
        header: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            caption: caption.into(),
            header: header.into(),
            body: body.into(),
        }
    }

    /// Built-in notice shown when the catalog has no entry
    pub fn fallback(body: impl Into<String>) -> Self {
        Self::new(WINDOW_TITLE, "", body)
    }
}

/// How a template is addressed inside the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKey<'a> {
    /// Numeric error code, routed through the per-system index
    Code(i32),
    /// Category name, looked up as `<prefix>_<category>`
    Category(&'a str),
}

/// Per-system message templates indexed by error code.
///
/// Built once from the catalog document and read-only afterwards.
pub struct TemplateCatalog {
    document: Arc<dyn ConfigLookup>,
    // (system, code) -> section name holding the template
    index: HashMap<(ProtectionSystem, i32), String>,
}

impl fmt::Debug for TemplateCatalog {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("TemplateCatalog")
            .field("indexed_sections", &self.index.len())
            .finish()
    }
}

impl TemplateCatalog {
    pub fn new(document: impl ConfigLookup + 'static) -> Self {
        Self::from_shared(Arc::new(document))
    }

    pub fn from_shared(document: Arc<dyn ConfigLookup>) -> Self {
        let mut index = HashMap::new();
        for name in document.section_names() {
            if let Some((system, code)) = index_key(name) {
                index.entry((system, code)).or_insert_with(|| name.to_string());
            }
        }
        debug!("Indexed {} catalog sections", index.len());
        Self { document, index }
    }

    pub fn empty() -> Self {
        Self::new(IniDocument::empty())
    }

    /// Locates and parses the catalog document.
    ///
    /// Every failure degrades to an empty catalog so that built-in texts are
    /// used instead.
    pub fn load(source: &CatalogSource) -> Self {
        match Self::try_load(source) {
            Ok(catalog) => catalog,
            Err(e) => {
                warn!("Using built-in texts: {}", e);
                Self::empty()
            }
        }
    }

    pub fn try_load(source: &CatalogSource) -> Result<Self> {
        let path = source.locate().ok_or_else(|| CatalogError::NotFound {
            candidates: source.candidates().len(),
        })?;
        let document = IniDocument::load(&path)?;
        info!("Using message catalog {}", path.display());
        Ok(Self::new(document))
    }

    /// Resolves the template of `key` for the protection system `system_id`.
    ///
    /// Code lookups need a section indexed for the system and default a missing
    /// caption to the window title. Category lookups need Caption, Headline
    /// and MainText all present.
    pub fn resolve(
        &self,
        system_id: &str,
        key: TemplateKey<'_>,
    ) -> Option<MessageTemplate> {
        match key {
            TemplateKey::Code(code) => {
                let system = ProtectionSystem::from_id(system_id)?;
                let section = self.index.get(&(system, code))?;
                Some(MessageTemplate::new(
                    self.lookup(section, KEY_CAPTION).unwrap_or(WINDOW_TITLE),
                    self.lookup(section, KEY_HEADLINE).unwrap_or_default(),
                    self.lookup(section, KEY_MAIN_TEXT).unwrap_or_default(),
                ))
            }
            TemplateKey::Category(category) => {
                self.section_template(&category_for(system_id, category))
            }
        }
    }

    /// Complete template stored in `section`
    pub fn section_template(
        &self,
        section: &str,
    ) -> Option<MessageTemplate> {
        Some(MessageTemplate::new(
            self.lookup(section, KEY_CAPTION)?,
            self.lookup(section, KEY_HEADLINE)?,
            self.lookup(section, KEY_MAIN_TEXT)?,
        ))
    }

    pub fn lookup(
        &self,
        section: &str,
        key: &str,
    ) -> Option<&str> {
        self.document.lookup(section, key)
    }

    pub fn document(&self) -> &dyn ConfigLookup {
        self.document.as_ref()
    }

    /// Section indexed for `(system, code)`
    pub fn indexed_section(
        &self,
        system: ProtectionSystem,
        code: i32,
    ) -> Option<&str> {
        self.index.get(&(system, code)).map(String::as_str)
    }
}

/// `CM100004` → (CodeMeter, 100004); `WK_StartMessage` → (WibuKey, 100003)
fn index_key(section: &str) -> Option<(ProtectionSystem, i32)> {
    let prefix = section.get(..2)?;
    let rest = section.get(2..)?;
    if rest.is_empty() {
        return None;
    }
    let system = ProtectionSystem::from_prefix(prefix)?;
    if let Ok(code) = rest.parse::<i32>() {
        return Some((system, code));
    }
    let name = rest.strip_prefix('_').unwrap_or(rest);
    system.code_by_name(name).map(|code| (system, code))
}
