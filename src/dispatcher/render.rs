#[cfg(test)]
use mockall::automock;
use serde::Deserialize;
use serde::Serialize;

use crate::ParameterError;

/// Outcome of a presented notice, numbered like the SDK's dialog results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ButtonChoice {
    None = 0,
    Ok = 1,
    Cancel = 2,
    Abort = 3,
    Retry = 4,
    Ignore = 5,
    Yes = 6,
    No = 7,
}

impl From<ButtonChoice> for i32 {
    fn from(choice: ButtonChoice) -> Self {
        choice as i32
    }
}

/// Buttons offered by a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ButtonSet {
    Ok = 0,
    OkCancel = 1,
    AbortRetryIgnore = 2,
    YesNoCancel = 3,
    YesNo = 4,
    RetryCancel = 5,
}

impl ButtonSet {
    pub fn choices(self) -> &'static [ButtonChoice] {
        match self {
            ButtonSet::Ok => &[ButtonChoice::Ok],
            ButtonSet::OkCancel => &[ButtonChoice::Ok, ButtonChoice::Cancel],
            ButtonSet::AbortRetryIgnore => &[ButtonChoice::Abort, ButtonChoice::Retry, ButtonChoice::Ignore],
            ButtonSet::YesNoCancel => &[ButtonChoice::Yes, ButtonChoice::No, ButtonChoice::Cancel],
            ButtonSet::YesNo => &[ButtonChoice::Yes, ButtonChoice::No],
            ButtonSet::RetryCancel => &[ButtonChoice::Retry, ButtonChoice::Cancel],
        }
    }
}

impl TryFrom<i64> for ButtonSet {
    type Error = i64;

    fn try_from(value: i64) -> Result<Self, i64> {
        match value {
            0 => Ok(ButtonSet::Ok),
            1 => Ok(ButtonSet::OkCancel),
            2 => Ok(ButtonSet::AbortRetryIgnore),
            3 => Ok(ButtonSet::YesNoCancel),
            4 => Ok(ButtonSet::YesNo),
            5 => Ok(ButtonSet::RetryCancel),
            other => Err(other),
        }
    }
}

impl From<ButtonSet> for crate::ParamValue {
    fn from(buttons: ButtonSet) -> Self {
        crate::ParamValue::Int(buttons as i64)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Icon {
    #[default]
    Error = 0x10,
    Warning = 0x30,
    Information = 0x40,
}

impl TryFrom<i64> for Icon {
    type Error = i64;

    fn try_from(value: i64) -> Result<Self, i64> {
        match value {
            0x10 => Ok(Icon::Error),
            0x30 => Ok(Icon::Warning),
            0x40 => Ok(Icon::Information),
            other => Err(other),
        }
    }
}

impl From<Icon> for crate::ParamValue {
    fn from(icon: Icon) -> Self {
        crate::ParamValue::Int(icon as i64)
    }
}

/// Reads an SDK enumeration stored as integer under `key`.
pub(crate) fn enum_param<T: TryFrom<i64, Error = i64>>(
    bag: &crate::ParameterBag,
    key: &str,
) -> Result<T, ParameterError> {
    T::try_from(bag.int(key)?).map_err(|value| ParameterError::OutOfRange {
        key: key.to_string(),
        value,
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressBar {
    pub label: String,
    pub max: i64,
    pub value: i64,
}

/// Everything the presentation layer needs to show one notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    pub caption: String,
    pub header: String,
    pub body: String,
    pub buttons: ButtonSet,
    pub icon: Icon,
    pub progress: Option<ProgressBar>,
}

/// Presentation capability.
///
/// Called from arbitrary threads; marshalling onto a UI thread is the
/// implementor's business. Must always return, using [`ButtonChoice::None`]
/// when nothing was chosen, or every caller waiting on the same event blocks
/// forever.
#[cfg_attr(test, automock)]
pub trait Renderer: Send + Sync {
    fn render(
        &self,
        request: &RenderRequest,
    ) -> ButtonChoice;
}
