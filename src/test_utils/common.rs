use std::time::Duration;
use std::time::Instant;

use crate::catalog::IniDocument;
use crate::catalog::TemplateCatalog;
use crate::constants::*;
use crate::ButtonSet;
use crate::Icon;
use crate::NotificationCoordinator;
use crate::ParameterBag;

pub(crate) fn license(
    system: &str,
    firm_code: i64,
    product_code: i64,
    feature_code: i64,
) -> ParameterBag {
    ParameterBag::new()
        .with(KEY_SYSTEM, system)
        .with(KEY_FIRM_CODE, firm_code)
        .with(KEY_PRODUCT_CODE, product_code)
        .with(KEY_FEATURE_CODE, feature_code)
}

/// General error raised for `license`, shaped like the SDK's 100004 events
pub(crate) fn general_error(
    license: ParameterBag,
    error_code: i32,
) -> ParameterBag {
    let system = license.text(KEY_SYSTEM).unwrap_or_default().to_string();
    ParameterBag::new()
        .with(KEY_SYSTEM, system)
        .with(KEY_BUTTONS, ButtonSet::Ok)
        .with(KEY_ICON, Icon::Error)
        .with(KEY_LICENSE, license)
        .with(KEY_ERROR_CODE, error_code)
        .with(KEY_ERROR_TEXT, format!("Error {error_code}"))
}

pub(crate) fn expiration_warning(
    system: &str,
    warning_level: i64,
) -> ParameterBag {
    ParameterBag::new()
        .with(KEY_SYSTEM, system)
        .with(KEY_EXPIRATION_TIME, chrono::Utc::now() + chrono::Duration::days(5))
        .with(KEY_WARNING_LEVEL, warning_level)
}

pub(crate) fn no_license(licenses: Vec<ParameterBag>) -> ParameterBag {
    ParameterBag::new()
        .with(KEY_BUTTONS, ButtonSet::Ok)
        .with(KEY_LICENSES, licenses)
}

/// License entry of a "no license" event with the reason the SDK reported
pub(crate) fn failed_license(
    system: &str,
    firm_code: i64,
    product_code: i64,
    error_code: i32,
    error_text: &str,
) -> ParameterBag {
    license(system, firm_code, product_code, 0)
        .with(KEY_ERROR_CODE, error_code)
        .with(KEY_ERROR_TEXT, error_text)
}

pub(crate) fn catalog_from(text: &str) -> TemplateCatalog {
    TemplateCatalog::new(IniDocument::parse(text).expect("valid catalog"))
}

/// Spins until `expected` callers are registered with `coordinator`
pub(crate) fn wait_for_callers(
    coordinator: &NotificationCoordinator,
    expected: usize,
) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while coordinator.active_callers() < expected {
        assert!(Instant::now() < deadline, "timed out waiting for {expected} callers");
        std::thread::sleep(Duration::from_millis(1));
    }
}
