use crate::constants::*;
use crate::ButtonSet;
use crate::EquivalenceRule;
use crate::Icon;
use crate::ParameterBag;

/// Presentation routine of a code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    VersionTooOld,
    ExpirationTimeWarning,
    UnitCounterWarning,
    GeneralError,
    CertifiedTimeElapsed,
    CertifiedTimeWarning,
    UsagePeriodWarning,
    SystemTimeDifference,
    RuntimeCheckError,
    NoLicense,
}

/// Where the template of a notice comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateSource {
    /// `<prefix>_<category>` section of the event's system
    Category(&'static str),
    /// Section indexed under a fixed code
    Code(i32),
    /// Section indexed under the event's `errorCode`
    ErrorCode,
    /// `NoLicenseMessage`, prefixed by the systems of all listed licenses
    Licenses,
}

/// Static description of one event code.
#[derive(Debug, Clone, Copy)]
pub struct NoticeDescriptor {
    /// `None` marks the catch-all "no license" entry
    pub code: Option<i32>,
    pub kind: NoticeKind,
    pub required_keys: &'static [&'static str],
    pub equivalence: EquivalenceRule,
    pub template: TemplateSource,
    pub fallback_text: &'static str,
    /// Fixed buttons, or `None` to take them from the `buttons` parameter
    pub buttons: Option<ButtonSet>,
    /// Fixed icon, or `None` to take it from the `icon` parameter
    pub icon: Option<Icon>,
}

impl NoticeDescriptor {
    /// Descriptor of `code`; unknown codes get the "no license" descriptor
    pub fn for_code(code: i32) -> &'static NoticeDescriptor {
        DESCRIPTORS
            .iter()
            .find(|descriptor| descriptor.code == Some(code))
            .unwrap_or(&NO_LICENSE_DESCRIPTOR)
    }

    /// Required keys `parameters` does not carry
    pub fn missing_keys(
        &self,
        parameters: &ParameterBag,
    ) -> Vec<&'static str> {
        self.required_keys
            .iter()
            .copied()
            .filter(|key| !parameters.contains_key(key))
            .collect()
    }
}

pub static NO_LICENSE_DESCRIPTOR: NoticeDescriptor = NoticeDescriptor {
    code: None,
    kind: NoticeKind::NoLicense,
    required_keys: &[KEY_BUTTONS, KEY_LICENSES],
    equivalence: EquivalenceRule::SameLicenses,
    template: TemplateSource::Licenses,
    fallback_text: NO_LICENSE_TEXT,
    buttons: None,
    icon: Some(Icon::Error),
};

pub static DESCRIPTORS: [NoticeDescriptor; 9] = [
    NoticeDescriptor {
        code: Some(VERSION_TOO_OLD),
        kind: NoticeKind::VersionTooOld,
        required_keys: &[KEY_SYSTEM, KEY_INSTALLED_VERSION, KEY_REQUIRED_VERSION],
        equivalence: EquivalenceRule::Singleton,
        template: TemplateSource::Code(VERSION_TOO_OLD),
        fallback_text: VERSION_TOO_OLD_TEXT,
        buttons: Some(ButtonSet::Ok),
        icon: Some(Icon::Error),
    },
    NoticeDescriptor {
        code: Some(EXPIRATION_TIME_WARNING),
        kind: NoticeKind::ExpirationTimeWarning,
        required_keys: &[KEY_SYSTEM, KEY_EXPIRATION_TIME, KEY_WARNING_LEVEL],
        equivalence: EquivalenceRule::Singleton,
        template: TemplateSource::Category(CATEGORY_EXPIRATION_WARNING),
        fallback_text: EXPIRATION_TIME_WARNING_TEXT,
        buttons: Some(ButtonSet::Ok),
        icon: Some(Icon::Warning),
    },
    NoticeDescriptor {
        code: Some(UNIT_COUNTER_WARNING),
        kind: NoticeKind::UnitCounterWarning,
        required_keys: &[KEY_SYSTEM, KEY_UNIT_COUNTER, KEY_WARNING_LEVEL],
        equivalence: EquivalenceRule::Singleton,
        template: TemplateSource::Category(CATEGORY_UNIT_COUNTER_WARNING),
        fallback_text: UNIT_COUNTER_WARNING_TEXT,
        buttons: Some(ButtonSet::Ok),
        icon: Some(Icon::Warning),
    },
    NoticeDescriptor {
        code: Some(GENERAL_ERROR),
        kind: NoticeKind::GeneralError,
        required_keys: &[KEY_SYSTEM, KEY_BUTTONS, KEY_ICON, KEY_LICENSE, KEY_ERROR_CODE, KEY_ERROR_TEXT],
        equivalence: EquivalenceRule::GeneralError {
            singleton_sub_code: WRONG_API_VERSION,
        },
        template: TemplateSource::ErrorCode,
        fallback_text: ERROR_MESSAGE_TEXT,
        buttons: None,
        icon: None,
    },
    NoticeDescriptor {
        code: Some(CERTIFIED_TIME_ELAPSED),
        kind: NoticeKind::CertifiedTimeElapsed,
        required_keys: &[KEY_SYSTEM, KEY_BUTTONS, KEY_ICON, KEY_LICENSE],
        equivalence: EquivalenceRule::Singleton,
        template: TemplateSource::Category(CATEGORY_CERTIFIED_ELAPSED),
        fallback_text: CERTIFIED_TIME_ELAPSED_TEXT,
        buttons: Some(ButtonSet::Ok),
        icon: Some(Icon::Error),
    },
    NoticeDescriptor {
        code: Some(CERTIFIED_TIME_WARNING),
        kind: NoticeKind::CertifiedTimeWarning,
        required_keys: &[KEY_SYSTEM, KEY_CERTIFIED_TIME, KEY_SYSTEM_TIME, KEY_WARNING_LEVEL],
        equivalence: EquivalenceRule::Singleton,
        template: TemplateSource::Category(CATEGORY_CERTIFIED_WARNING),
        fallback_text: CERTIFIED_TIME_WARNING_TEXT,
        buttons: Some(ButtonSet::Ok),
        icon: Some(Icon::Warning),
    },
    NoticeDescriptor {
        code: Some(USAGE_PERIOD_WARNING),
        kind: NoticeKind::UsagePeriodWarning,
        required_keys: &[KEY_SYSTEM, KEY_HOURS],
        equivalence: EquivalenceRule::Singleton,
        template: TemplateSource::Category(CATEGORY_USAGE_PERIOD_WARNING),
        fallback_text: USAGE_PERIOD_WARNING_TEXT,
        buttons: Some(ButtonSet::OkCancel),
        icon: Some(Icon::Information),
    },
    NoticeDescriptor {
        code: Some(SYSTEM_TIME_DIFFERENCE),
        kind: NoticeKind::SystemTimeDifference,
        required_keys: &[KEY_SYSTEM, KEY_BUTTONS, KEY_ICON, KEY_LICENSE],
        equivalence: EquivalenceRule::SameLicense {
            with_error_code: false,
        },
        template: TemplateSource::Category(CATEGORY_SYSTEM_TIME_DIFFERENCE),
        fallback_text: ERROR_MESSAGE_TEXT,
        buttons: None,
        icon: None,
    },
    NoticeDescriptor {
        code: Some(RUNTIME_CHECK_ERROR),
        kind: NoticeKind::RuntimeCheckError,
        required_keys: &[KEY_SYSTEM, KEY_BUTTONS, KEY_ICON, KEY_LICENSE, KEY_ERROR_CODE, KEY_ERROR_TEXT],
        equivalence: EquivalenceRule::SameLicense {
            with_error_code: true,
        },
        template: TemplateSource::ErrorCode,
        fallback_text: ERROR_MESSAGE_TEXT,
        buttons: None,
        icon: None,
    },
];
