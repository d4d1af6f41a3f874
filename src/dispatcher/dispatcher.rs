use std::sync::Arc;

use chrono::Utc;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;
use tracing::info;
use tracing::warn;

use super::enum_param;
use super::ButtonChoice;
use super::ButtonSet;
use super::Icon;
use super::NoticeDescriptor;
use super::NoticeKind;
use super::ProgressBar;
use super::RenderRequest;
use super::Renderer;
use super::TemplateSource;
use crate::catalog::category_for;
use crate::catalog::MessageTemplate;
use crate::catalog::ProtectionSystem;
use crate::catalog::TemplateCatalog;
use crate::catalog::TemplateKey;
use crate::constants::*;
use crate::license_label;
use crate::normalize_escapes;
use crate::substitute;
use crate::AccessDataStore;
use crate::MessageSettings;
use crate::NotificationCoordinator;
use crate::NotifierConfig;
use crate::ParameterBag;
use crate::ParameterError;
use crate::Placeholders;

lazy_static! {
    static ref VERSION_NUMBER: Regex = Regex::new(r"[0-9]+\.[0-9]+").expect("valid version pattern");
}

/// Entry point of the SDK's notification callback.
///
/// Every raised event passes through the shared [`NotificationCoordinator`]:
/// one caller per logical event renders, every other caller blocks until the
/// choice is known and returns the same value.
pub struct NotificationDispatcher {
    coordinator: Arc<NotificationCoordinator>,
    catalog: Arc<TemplateCatalog>,
    settings: MessageSettings,
    access_data: AccessDataStore,
    renderer: Arc<dyn Renderer>,
}

impl NotificationDispatcher {
    pub fn new(
        catalog: TemplateCatalog,
        renderer: Arc<dyn Renderer>,
    ) -> Self {
        let settings = MessageSettings::from_document(catalog.document());
        let access_data = AccessDataStore::from_document(catalog.document());
        Self {
            coordinator: Arc::new(NotificationCoordinator::new()),
            catalog: Arc::new(catalog),
            settings,
            access_data,
            renderer,
        }
    }

    /// Loads the catalog located by `config`; a missing catalog leaves the
    /// built-in texts in place.
    pub fn from_config(
        config: &NotifierConfig,
        renderer: Arc<dyn Renderer>,
    ) -> Self {
        let source = config.catalog_source();
        debug!("Catalog candidates: {:?}", source.candidates());
        Self::new(TemplateCatalog::load(&source), renderer)
    }

    /// Shares `coordinator` with other dispatchers of the process
    pub fn with_coordinator(
        mut self,
        coordinator: Arc<NotificationCoordinator>,
    ) -> Self {
        self.coordinator = coordinator;
        self
    }

    pub fn coordinator(&self) -> &Arc<NotificationCoordinator> {
        &self.coordinator
    }

    pub fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }

    pub fn settings(&self) -> &MessageSettings {
        &self.settings
    }

    pub fn access_data(&self) -> &AccessDataStore {
        &self.access_data
    }

    /// Presents the event raised with `code` and returns the user's choice.
    ///
    /// Concurrent equivalent events are shown once; all their callers get the
    /// same choice.
    pub fn notify(
        &self,
        code: i32,
        parameters: ParameterBag,
    ) -> ButtonChoice {
        debug!("Message: {} {}", code, parameters);

        let handle = self.coordinator.enter(code, parameters);
        if !self.coordinator.try_become_renderer(&handle) {
            let choice = self.coordinator.await_result(&handle);
            debug!(code, ?choice, "Received result of a concurrent notice");
            return self.coordinator.leave(handle, None);
        }

        let request = self.compose(code, handle.parameters());
        let choice = self.renderer.render(&request);
        if choice != ButtonChoice::None && !request.buttons.choices().contains(&choice) {
            warn!(code, ?choice, buttons = ?request.buttons, "Renderer returned a choice outside the offered buttons");
        }
        self.coordinator.leave(handle, Some(choice))
    }

    /// Integer surface of [`notify`](Self::notify) for the SDK callback
    pub fn notify_raw(
        &self,
        code: i32,
        parameters: ParameterBag,
    ) -> i32 {
        self.notify(code, parameters).into()
    }

    /// Shows the `StartMessage` of `system_id`, if the catalog has one.
    /// Never coalesced.
    pub fn show_startup_message(
        &self,
        system_id: &str,
    ) -> Option<ButtonChoice> {
        let section = category_for(system_id, CATEGORY_START);
        let Some(template) = self.catalog.section_template(&section) else {
            debug!("No start message in section {}", section);
            return None;
        };
        info!("Showing start message {}", section);
        let request = request_from(template, &Placeholders::new(), ButtonSet::Ok, Icon::Information);
        Some(self.renderer.render(&request))
    }

    /// Builds the notice of `code`, degrading to the built-in text when the
    /// parameters do not have the expected shape.
    pub fn compose(
        &self,
        code: i32,
        parameters: &ParameterBag,
    ) -> RenderRequest {
        let descriptor = NoticeDescriptor::for_code(code);
        let missing = descriptor.missing_keys(parameters);
        if !missing.is_empty() {
            warn!(code, ?missing, "Event lacks required parameters");
        }

        match self.compose_notice(descriptor, parameters) {
            Ok(request) => request,
            Err(e) => {
                warn!(code, "Falling back to built-in text: {}", e);
                self.degraded(descriptor, parameters)
            }
        }
    }

    fn compose_notice(
        &self,
        descriptor: &NoticeDescriptor,
        parameters: &ParameterBag,
    ) -> Result<RenderRequest, ParameterError> {
        let buttons = match descriptor.buttons {
            Some(buttons) => buttons,
            None => enum_param(parameters, KEY_BUTTONS)?,
        };
        let icon = match descriptor.icon {
            Some(icon) => icon,
            None => enum_param(parameters, KEY_ICON)?,
        };

        let mut request = match descriptor.kind {
            NoticeKind::VersionTooOld => {
                let placeholders = Placeholders::new()
                    .with(TOKEN_REQUIRED_VERSION, parameters.version(KEY_REQUIRED_VERSION)?)
                    .with(TOKEN_CURRENT_VERSION, parameters.version(KEY_INSTALLED_VERSION)?);
                let template = self.template_or_fallback(descriptor, parameters, descriptor.fallback_text)?;
                request_from(template, &placeholders, buttons, icon)
            }
            NoticeKind::ExpirationTimeWarning => {
                let remaining_days = (parameters.time(KEY_EXPIRATION_TIME)? - Utc::now()).num_days();
                let warning_level = parameters.int(KEY_WARNING_LEVEL)?;
                let placeholders = Placeholders::new().with(TOKEN_REMAIN_DAYS, remaining_days);
                let template = self.template_or_fallback(descriptor, parameters, descriptor.fallback_text)?;
                let mut request = request_from(template, &placeholders, buttons, icon);
                request.progress = Some(ProgressBar {
                    label: self.settings.expiration_time_label.clone(),
                    max: warning_level,
                    value: remaining_days,
                });
                request
            }
            NoticeKind::UnitCounterWarning => {
                let units = parameters.int(KEY_UNIT_COUNTER)?;
                let warning_level = parameters.int(KEY_WARNING_LEVEL)?;
                let placeholders = Placeholders::new().with(TOKEN_UNITS, units);
                let template = self.template_or_fallback(descriptor, parameters, descriptor.fallback_text)?;
                let mut request = request_from(template, &placeholders, buttons, icon);
                request.progress = Some(ProgressBar {
                    label: self.settings.unit_counter_label.clone(),
                    max: warning_level,
                    value: units,
                });
                request
            }
            NoticeKind::GeneralError if parameters.code(KEY_ERROR_CODE)? == WRONG_API_VERSION => {
                let assembly = parameters.text(KEY_ERROR_TEXT)?;
                let template = MessageTemplate::new(
                    ASSEMBLY_NOT_FOUND_TITLE,
                    ASSEMBLY_NOT_FOUND_TITLE,
                    format!("The assembly \"{assembly}\" could not be found."),
                );
                request_from(template, &Placeholders::new(), ButtonSet::Ok, icon)
            }
            NoticeKind::GeneralError | NoticeKind::RuntimeCheckError => {
                let label = license_label(parameters.bag(KEY_LICENSE)?)?;
                let error_text = parameters.text(KEY_ERROR_TEXT)?;
                let fallback = format!("{}\n\n{}\n\n{}", descriptor.fallback_text, label, error_text);
                let placeholders = Placeholders::new().with(TOKEN_FIRM_PRODUCT_CODE, &label);
                let template = self.template_or_fallback(descriptor, parameters, &fallback)?;
                request_from(template, &placeholders, buttons, icon)
            }
            NoticeKind::CertifiedTimeElapsed => {
                let template = self.template_or_fallback(descriptor, parameters, descriptor.fallback_text)?;
                request_from(template, &Placeholders::new(), buttons, icon)
            }
            NoticeKind::CertifiedTimeWarning => {
                // Negative while the system clock is still behind the certified time
                let elapsed = parameters.time(KEY_SYSTEM_TIME)? - parameters.time(KEY_CERTIFIED_TIME)?;
                let hours = elapsed.num_seconds() as f64 / 3600.0;
                let placeholders = Placeholders::new().with(TOKEN_HOURS, hours);
                let template = self.template_or_fallback(descriptor, parameters, descriptor.fallback_text)?;
                request_from(template, &placeholders, buttons, icon)
            }
            NoticeKind::UsagePeriodWarning => {
                let placeholders = Placeholders::new().with(TOKEN_HOURS, parameters.int(KEY_HOURS)?);
                let template = self.template_or_fallback(descriptor, parameters, descriptor.fallback_text)?;
                request_from(template, &placeholders, buttons, icon)
            }
            NoticeKind::SystemTimeDifference => {
                let label = license_label(parameters.bag(KEY_LICENSE)?)?;
                let fallback = format!("{}{}", descriptor.fallback_text, label);
                let placeholders = Placeholders::new().with(TOKEN_FIRM_PRODUCT_CODE, &label);
                let template = self.template_or_fallback(descriptor, parameters, &fallback)?;
                request_from(template, &placeholders, buttons, icon)
            }
            NoticeKind::NoLicense => {
                let licenses = parameters.list(KEY_LICENSES)?;
                let text = self.licenses_text(licenses)?;
                let placeholders = Placeholders::new().with(TOKEN_FIRM_PRODUCT_CODE, &text);
                let template = match self.catalog.section_template(&no_license_section(licenses)) {
                    Some(template) => template,
                    None => MessageTemplate::fallback(format!("{}\n\n{}", descriptor.fallback_text, text)),
                };
                request_from(template, &placeholders, buttons, icon)
            }
        };

        if request.caption.is_empty() {
            request.caption = WINDOW_TITLE.to_string();
        }
        Ok(request)
    }

    /// Catalog template of `descriptor`, or `fallback` under the window title
    fn template_or_fallback(
        &self,
        descriptor: &NoticeDescriptor,
        parameters: &ParameterBag,
        fallback: &str,
    ) -> Result<MessageTemplate, ParameterError> {
        let system = parameters.text(KEY_SYSTEM)?;
        let key = match descriptor.template {
            TemplateSource::Category(category) => TemplateKey::Category(category),
            TemplateSource::Code(code) => TemplateKey::Code(code),
            TemplateSource::ErrorCode => TemplateKey::Code(parameters.code(KEY_ERROR_CODE)?),
            TemplateSource::Licenses => TemplateKey::Category(CATEGORY_NO_LICENSE),
        };
        Ok(self
            .catalog
            .resolve(system, key)
            .unwrap_or_else(|| MessageTemplate::fallback(fallback)))
    }

    /// One line per license: label plus the reason it could not be used
    fn licenses_text(
        &self,
        licenses: &[ParameterBag],
    ) -> Result<String, ParameterError> {
        let mut text = String::new();
        for license in licenses {
            let label = license_label(license)?;
            let reason = self.license_reason(license)?;
            text.push_str(&format!("{label} ({reason})\n"));
        }
        Ok(text)
    }

    /// Catalog wording for the SDK sub-codes the catalog knows, the SDK's
    /// own text otherwise
    fn license_reason(
        &self,
        license: &ParameterBag,
    ) -> Result<String, ParameterError> {
        let sdk_text = license.text(KEY_ERROR_TEXT)?;
        let system = ProtectionSystem::from_id(license.text(KEY_SYSTEM)?);

        let reason = match license.code(KEY_ERROR_CODE)? {
            WRONG_API_VERSION => {
                let section = ProtectionSystem::CodeMeter.category(CATEGORY_WRONG_API_VERSION);
                let versions: Vec<&str> = VERSION_NUMBER.find_iter(sdk_text).map(|m| m.as_str()).collect();
                match (self.catalog.lookup(&section, KEY_CATALOG_ERROR_TEXT), versions.as_slice()) {
                    (Some(text), [actual, required, ..]) => substitute(
                        text,
                        &Placeholders::new()
                            .with(TOKEN_ACTUAL_API_VERSION, actual)
                            .with(TOKEN_REQUIRED_API_VERSION, required),
                    ),
                    _ => sdk_text.to_string(),
                }
            }
            DLL_NOT_FOUND => {
                let section_system = system.unwrap_or(ProtectionSystem::CodeMeter);
                let section = section_system.category(CATEGORY_DLL_NOT_FOUND);
                match self.catalog.lookup(&section, KEY_CATALOG_ERROR_TEXT) {
                    Some(text) if section_system == ProtectionSystem::WibuKey => {
                        substitute(text, &Placeholders::new().with(TOKEN_DLL_NAME, wibukey_dll_name()))
                    }
                    Some(text) => normalize_escapes(text),
                    None => sdk_text.to_string(),
                }
            }
            CANCELED_USAGE_PERIOD => {
                let section = ProtectionSystem::CodeMeter.category(CATEGORY_CANCELED_USAGE_PERIOD);
                self.catalog
                    .lookup(&section, KEY_CATALOG_ERROR_TEXT)
                    .map(normalize_escapes)
                    .unwrap_or_else(|| sdk_text.to_string())
            }
            CPSRT_NOT_FOUND => self
                .catalog
                .lookup(SECTION_CPSRT_NOT_FOUND, KEY_CATALOG_ERROR_TEXT)
                .map(normalize_escapes)
                .unwrap_or_else(|| sdk_text.to_string()),
            _ => sdk_text.to_string(),
        };
        Ok(reason)
    }

    /// Built-in notice for events whose parameters could not be read
    fn degraded(
        &self,
        descriptor: &NoticeDescriptor,
        parameters: &ParameterBag,
    ) -> RenderRequest {
        let buttons = descriptor
            .buttons
            .or_else(|| enum_param(parameters, KEY_BUTTONS).ok())
            .unwrap_or(ButtonSet::Ok);
        let icon = descriptor
            .icon
            .or_else(|| enum_param(parameters, KEY_ICON).ok())
            .unwrap_or_default();
        request_from(
            MessageTemplate::fallback(descriptor.fallback_text),
            &Placeholders::new(),
            buttons,
            icon,
        )
    }
}

/// `NoLicenseMessage`, prefixed `WK_` when a WibuKey license is listed and
/// then `CM_` when a CodeMeter license is listed
fn no_license_section(licenses: &[ParameterBag]) -> String {
    let systems: Vec<ProtectionSystem> = licenses
        .iter()
        .filter_map(|license| license.text(KEY_SYSTEM).ok())
        .filter_map(ProtectionSystem::from_id)
        .collect();

    let mut section = CATEGORY_NO_LICENSE.to_string();
    for system in [ProtectionSystem::WibuKey, ProtectionSystem::CodeMeter] {
        if systems.contains(&system) {
            section = system.category(&section);
        }
    }
    section
}

fn wibukey_dll_name() -> &'static str {
    if cfg!(target_pointer_width = "32") {
        "WkWin32.dll"
    } else {
        "WkWin64.dll"
    }
}

fn request_from(
    template: MessageTemplate,
    placeholders: &Placeholders,
    buttons: ButtonSet,
    icon: Icon,
) -> RenderRequest {
    RenderRequest {
        caption: template.caption,
        header: normalize_escapes(&template.header),
        body: substitute(&template.body, placeholders),
        buttons,
        icon,
        progress: None,
    }
}
