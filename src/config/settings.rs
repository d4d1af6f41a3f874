use crate::catalog::ConfigLookup;
use crate::constants::*;

/// `[Main]` section of the message catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageSettings {
    /// Progress bar label of unit counter warnings
    pub unit_counter_label: String,
    /// Progress bar label of expiration time warnings
    pub expiration_time_label: String,
}

impl Default for MessageSettings {
    fn default() -> Self {
        Self {
            unit_counter_label: DEFAULT_UNIT_COUNTER_LABEL.to_string(),
            expiration_time_label: DEFAULT_EXPIRATION_TIME_LABEL.to_string(),
        }
    }
}

impl MessageSettings {
    pub fn from_document(document: &dyn ConfigLookup) -> Self {
        let mut settings = Self::default();
        if let Some(value) = document.lookup(SECTION_MAIN, "UnitCounterText") {
            settings.unit_counter_label = value.to_string();
        }
        if let Some(value) = document.lookup(SECTION_MAIN, "ExpirationTimeText") {
            settings.expiration_time_label = value.to_string();
        }
        settings
    }
}
