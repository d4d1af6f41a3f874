use crate::constants::KEY_FEATURE_CODE;
use crate::constants::KEY_FIRM_CODE;
use crate::constants::KEY_PRODUCT_CODE;
use crate::constants::KEY_SYSTEM;
use crate::ParameterBag;
use crate::ParameterError;

/// Human readable license reference used in message bodies and in the
/// `#FirmProductCode#` placeholder.
///
/// Format: `"\n<system> <firm>:<product>"`, followed by
/// `" FeatureCode <f> (0x<hex>)"` when the feature code is non-zero.
pub fn license_label(license: &ParameterBag) -> Result<String, ParameterError> {
    let system = license.text(KEY_SYSTEM)?;
    let firm_code = license.int(KEY_FIRM_CODE)?;
    let product_code = license.int(KEY_PRODUCT_CODE)?;
    let feature_code = license.int(KEY_FEATURE_CODE)?;

    let mut label = format!("\n{system} {firm_code}:{product_code}");
    if feature_code != 0 {
        label.push_str(&format!(" FeatureCode {feature_code} (0x{feature_code:x})"));
    }
    Ok(label)
}
