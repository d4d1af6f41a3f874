// -
// Event codes raised by the protection SDK

pub const NO_LICENSE: i32 = 0;
pub const VERSION_TOO_OLD: i32 = 100000;
pub const EXPIRATION_TIME_WARNING: i32 = 100001;
pub const UNIT_COUNTER_WARNING: i32 = 100002;
pub const START_MESSAGE: i32 = 100003;
pub const GENERAL_ERROR: i32 = 100004;
pub const CERTIFIED_TIME_ELAPSED: i32 = 100006;
pub const CERTIFIED_TIME_WARNING: i32 = 100007;
pub const USAGE_PERIOD_WARNING: i32 = 100008;
pub const SYSTEM_TIME_DIFFERENCE: i32 = 100009;
pub const RUNTIME_CHECK_ERROR: i32 = 100011;

/// Sub-codes carried in `errorCode` of a general error or of a license entry
pub const WRONG_API_VERSION: i32 = 100010;
pub const DLL_NOT_FOUND: i32 = 100012;
pub const CANCELED_USAGE_PERIOD: i32 = 100013;
pub const CPSRT_NOT_FOUND: i32 = 100014;

// -
// Parameter bag keys

pub const KEY_SYSTEM: &str = "system";
pub const KEY_INSTALLED_VERSION: &str = "installedVersion";
pub const KEY_REQUIRED_VERSION: &str = "requiredVersion";
pub const KEY_EXPIRATION_TIME: &str = "expirationTime";
pub const KEY_WARNING_LEVEL: &str = "warningLevel";
pub const KEY_UNIT_COUNTER: &str = "unitCounter";
pub const KEY_BUTTONS: &str = "buttons";
pub const KEY_ICON: &str = "icon";
pub const KEY_LICENSE: &str = "license";
pub const KEY_LICENSES: &str = "licenses";
pub const KEY_ERROR_CODE: &str = "errorCode";
pub const KEY_ERROR_TEXT: &str = "errorText";
pub const KEY_CERTIFIED_TIME: &str = "certifiedTime";
pub const KEY_SYSTEM_TIME: &str = "systemTime";
pub const KEY_HOURS: &str = "hours";

/// License descriptor keys
pub const KEY_FIRM_CODE: &str = "firmCode";
pub const KEY_PRODUCT_CODE: &str = "productCode";
pub const KEY_FEATURE_CODE: &str = "featureCode";

// -
// Placeholder tokens

pub const TOKEN_REMAIN_DAYS: &str = "#remaindays#";
pub const TOKEN_HOURS: &str = "#hours#";
pub const TOKEN_UNITS: &str = "#units#";
pub const TOKEN_FIRM_PRODUCT_CODE: &str = "#FirmProductCode#";
pub const TOKEN_REQUIRED_VERSION: &str = "#requiredversion#";
pub const TOKEN_CURRENT_VERSION: &str = "#currversion#";
pub const TOKEN_ACTUAL_API_VERSION: &str = "#ActualVersion#";
pub const TOKEN_REQUIRED_API_VERSION: &str = "#RequiredVersion#";
pub const TOKEN_DLL_NAME: &str = "#DllName#";

// -
// Catalog sections and keys

pub const KEY_CAPTION: &str = "Caption";
pub const KEY_HEADLINE: &str = "Headline";
pub const KEY_MAIN_TEXT: &str = "MainText";
pub const KEY_CATALOG_ERROR_TEXT: &str = "ErrorText";

pub const CATEGORY_START: &str = "StartMessage";
pub const CATEGORY_EXPIRATION_WARNING: &str = "ExpirationTimeWarningMessage";
pub const CATEGORY_UNIT_COUNTER_WARNING: &str = "UnitCounterWarningMessage";
pub const CATEGORY_CERTIFIED_WARNING: &str = "CertifiedWarningMessage";
pub const CATEGORY_CERTIFIED_ELAPSED: &str = "CertifiedElapsedMessage";
pub const CATEGORY_USAGE_PERIOD_WARNING: &str = "UsagePeriodWarningMessage";
pub const CATEGORY_SYSTEM_TIME_DIFFERENCE: &str = "SystemTimeDifference";
pub const CATEGORY_NO_LICENSE: &str = "NoLicenseMessage";
pub const CATEGORY_WRONG_API_VERSION: &str = "WibuCmNetWrongVersion";
pub const CATEGORY_DLL_NOT_FOUND: &str = "DllNotFound";
pub const CATEGORY_CANCELED_USAGE_PERIOD: &str = "CanceledUsagePeriod";
pub const SECTION_CPSRT_NOT_FOUND: &str = "CpsrtNotFound";

pub const SECTION_MAIN: &str = "Main";
pub const SECTION_ACCESS_DATA: &str = "AccessData";

// -
// Built-in texts used when the catalog has no entry

pub const WINDOW_TITLE: &str = "WIBU-SYSTEMS Protected Application";
pub const ERROR_MESSAGE_TEXT: &str = "Error Message";
pub const NO_LICENSE_TEXT: &str = "No License Found";
pub const EXPIRATION_TIME_WARNING_TEXT: &str = "License will expire in a few days.";
pub const USAGE_PERIOD_WARNING_TEXT: &str = "A deactivated Usage Period will now be activated.";
pub const UNIT_COUNTER_WARNING_TEXT: &str = "Credits of use almost used up.";
pub const CERTIFIED_TIME_WARNING_TEXT: &str = "The Certified Time will elapse in the near future.";
pub const CERTIFIED_TIME_ELAPSED_TEXT: &str = "The Certified Time is elapsed.";
pub const VERSION_TOO_OLD_TEXT: &str = "This software requires a driver with a higher version.";
pub const ASSEMBLY_NOT_FOUND_TITLE: &str = "Assembly Not Found";

pub const DEFAULT_UNIT_COUNTER_LABEL: &str = "Units:";
pub const DEFAULT_EXPIRATION_TIME_LABEL: &str = "Days:";
pub const DEFAULT_ACCESS_SERVER: &str = "127.0.0.1";
