use std::path::Path;
use std::sync::Mutex;

use license_notify::constants::*;
use license_notify::ButtonChoice;
use license_notify::ButtonSet;
use license_notify::Icon;
use license_notify::ParameterBag;
use license_notify::RenderRequest;
use license_notify::Renderer;

/// Renderer answering every notice with a fixed choice
pub struct ScriptedRenderer {
    pub choice: ButtonChoice,
    pub shown: Mutex<Vec<RenderRequest>>,
}

impl ScriptedRenderer {
    pub fn new(choice: ButtonChoice) -> Self {
        Self {
            choice,
            shown: Mutex::new(Vec::new()),
        }
    }

    pub fn shown(&self) -> Vec<RenderRequest> {
        self.shown.lock().unwrap().clone()
    }
}

impl Renderer for ScriptedRenderer {
    fn render(
        &self,
        request: &RenderRequest,
    ) -> ButtonChoice {
        self.shown.lock().unwrap().push(request.clone());
        self.choice
    }
}

pub fn write_catalog(
    dir: &Path,
    file_name: &str,
    caption: &str,
) {
    let text = format!(
        "[Main]\nUnitCounterText=Units left:\n\n\
         [CM_UnitCounterWarningMessage]\nCaption={caption}\nHeadline=Credits\nMainText=#units# credits remain\n\n\
         [CM100004]\nCaption={caption}\nHeadline=Error\nMainText=Failed:#FirmProductCode#\n"
    );
    std::fs::write(dir.join(file_name), text).unwrap();
}

pub fn unit_counter_warning(units: i64) -> ParameterBag {
    ParameterBag::new()
        .with(KEY_SYSTEM, "CodeMeter")
        .with(KEY_UNIT_COUNTER, units)
        .with(KEY_WARNING_LEVEL, 50)
}

pub fn general_error(
    product_code: i64,
    error_code: i32,
) -> ParameterBag {
    ParameterBag::new()
        .with(KEY_SYSTEM, "CodeMeter")
        .with(KEY_BUTTONS, ButtonSet::Ok)
        .with(KEY_ICON, Icon::Error)
        .with(
            KEY_LICENSE,
            ParameterBag::new()
                .with(KEY_SYSTEM, "CodeMeter")
                .with(KEY_FIRM_CODE, 10)
                .with(KEY_PRODUCT_CODE, product_code)
                .with(KEY_FEATURE_CODE, 0),
        )
        .with(KEY_ERROR_CODE, error_code)
        .with(KEY_ERROR_TEXT, "Box not found")
}
