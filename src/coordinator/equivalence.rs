//! Decides whether two raised events are the same logical occurrence.
//!
//! A key a rule needs but either event lacks makes the events distinct.

use tracing::trace;

use crate::constants::*;
use crate::NoticeDescriptor;
use crate::ParamValue;
use crate::ParameterBag;

/// Deduplication rule attached to an event code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquivalenceRule {
    /// Shown once no matter the parameters
    Singleton,
    /// Same `errorCode`; singleton for `singleton_sub_code`, otherwise the
    /// system and license must match too
    GeneralError { singleton_sub_code: i32 },
    /// Same system and license, optionally the same `errorCode`
    SameLicense { with_error_code: bool },
    /// Element-wise equal `licenses`
    SameLicenses,
}

impl EquivalenceRule {
    /// Rule for `code`; unknown codes are "no license" events
    pub fn for_code(code: i32) -> Self {
        NoticeDescriptor::for_code(code).equivalence
    }

    pub fn matches(
        &self,
        left: &ParameterBag,
        right: &ParameterBag,
    ) -> bool {
        match *self {
            EquivalenceRule::Singleton => true,
            EquivalenceRule::GeneralError { singleton_sub_code } => {
                if !same_parameter(left, right, KEY_ERROR_CODE) {
                    return false;
                }
                let sub_code = i64::from(singleton_sub_code);
                let singleton =
                    matches!(left.get(KEY_ERROR_CODE), Some(ParamValue::Int(c)) if *c == sub_code);
                singleton
                    || (same_parameter(left, right, KEY_SYSTEM)
                        && same_parameter(left, right, KEY_LICENSE))
            }
            EquivalenceRule::SameLicense { with_error_code } => {
                same_parameter(left, right, KEY_SYSTEM)
                    && same_parameter(left, right, KEY_LICENSE)
                    && (!with_error_code || same_parameter(left, right, KEY_ERROR_CODE))
            }
            EquivalenceRule::SameLicenses => same_parameter(left, right, KEY_LICENSES),
        }
    }
}

/// Whether `left` and `right`, both raised with `code`, are the same event.
pub fn equivalent(
    code: i32,
    left: &ParameterBag,
    right: &ParameterBag,
) -> bool {
    let same = EquivalenceRule::for_code(code).matches(left, right);
    trace!(code, same, "Compared pending event parameters");
    same
}

/// Compares `key`, which must be present in both bags.
pub fn same_parameter(
    left: &ParameterBag,
    right: &ParameterBag,
    key: &str,
) -> bool {
    match (left.get(key), right.get(key)) {
        (Some(l), Some(r)) => same_value(l, r),
        _ => false,
    }
}

/// Recursive value comparison.
///
/// Nested bags compare every key of the left operand against the right one;
/// keys only the right operand has are ignored, so the comparison is
/// asymmetric.
pub fn same_value(
    left: &ParamValue,
    right: &ParamValue,
) -> bool {
    match (left, right) {
        (ParamValue::Bag(l), ParamValue::Bag(r)) => same_left_keys(l, r),
        (ParamValue::List(l), ParamValue::List(r)) => {
            l.len() == r.len() && l.iter().zip(r).all(|(l, r)| same_left_keys(l, r))
        }
        (l, r) => l.is_primitive() && l == r,
    }
}

fn same_left_keys(
    left: &ParameterBag,
    right: &ParameterBag,
) -> bool {
    left.iter()
        .all(|(key, l)| right.get(key).is_some_and(|r| same_value(l, r)))
}
