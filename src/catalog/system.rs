use crate::constants::*;

/// Protection systems with their own catalog sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProtectionSystem {
    CodeMeter,
    WibuKey,
}

impl ProtectionSystem {
    /// Maps an SDK system identifier; unknown systems are unprefixed
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "CodeMeter" | "CodeMeterAct" => Some(ProtectionSystem::CodeMeter),
            "WibuKey" => Some(ProtectionSystem::WibuKey),
            _ => None,
        }
    }

    pub fn prefix(self) -> &'static str {
        match self {
            ProtectionSystem::CodeMeter => "CM",
            ProtectionSystem::WibuKey => "WK",
        }
    }

    pub(crate) fn from_prefix(prefix: &str) -> Option<Self> {
        [ProtectionSystem::CodeMeter, ProtectionSystem::WibuKey]
            .into_iter()
            .find(|system| system.prefix().eq_ignore_ascii_case(prefix))
    }

    /// Symbolic section suffixes that stand for a numeric code
    pub(crate) fn named_codes(self) -> &'static [(&'static str, i32)] {
        match self {
            ProtectionSystem::CodeMeter => &[
                (CATEGORY_START, START_MESSAGE),
                (CATEGORY_EXPIRATION_WARNING, EXPIRATION_TIME_WARNING),
                (CATEGORY_UNIT_COUNTER_WARNING, UNIT_COUNTER_WARNING),
                (CATEGORY_CERTIFIED_WARNING, CERTIFIED_TIME_WARNING),
                (CATEGORY_USAGE_PERIOD_WARNING, USAGE_PERIOD_WARNING),
                (CATEGORY_CERTIFIED_ELAPSED, CERTIFIED_TIME_ELAPSED),
                (CATEGORY_WRONG_API_VERSION, WRONG_API_VERSION),
                (CATEGORY_DLL_NOT_FOUND, DLL_NOT_FOUND),
                (CATEGORY_CANCELED_USAGE_PERIOD, CANCELED_USAGE_PERIOD),
            ],
            ProtectionSystem::WibuKey => &[
                (CATEGORY_START, START_MESSAGE),
                (CATEGORY_EXPIRATION_WARNING, EXPIRATION_TIME_WARNING),
                (CATEGORY_UNIT_COUNTER_WARNING, UNIT_COUNTER_WARNING),
                (CATEGORY_DLL_NOT_FOUND, DLL_NOT_FOUND),
            ],
        }
    }

    pub(crate) fn code_by_name(
        self,
        name: &str,
    ) -> Option<i32> {
        self.named_codes()
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, code)| *code)
    }

    /// `<prefix>_<category>`
    pub fn category(
        self,
        category: &str,
    ) -> String {
        format!("{}_{}", self.prefix(), category)
    }
}

/// Category section name for an SDK system identifier.
pub fn category_for(
    system_id: &str,
    category: &str,
) -> String {
    match ProtectionSystem::from_id(system_id) {
        Some(system) => system.category(category),
        None => category.to_string(),
    }
}
