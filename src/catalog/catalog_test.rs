use std::fs;

use tempfile::tempdir;

use super::*;
use crate::constants::*;
use crate::CatalogError;
use crate::CatalogSource;
use crate::Error;

const CATALOG: &str = r#"
[CM100004]
Caption=License Error
Headline=Access failed
MainText=Could not access #FirmProductCode#.\nPlease contact the vendor.

[cm_StartMessage]
Caption=Welcome
Headline=Protected
MainText=Started

[WK200]
MainText=Only a body

[CM_ExpirationTimeWarningMessage]
Caption=Expiring
Headline=Soon
MainText=#remaindays# days left

[CM_UnitCounterWarningMessage]
Caption=Units
MainText=Incomplete category

[UnitCounterWarningMessage]
Caption=Units
Headline=Low
MainText=#units# left

[Main]
UnitCounterText=Einheiten:
"#;

fn catalog() -> TemplateCatalog {
    TemplateCatalog::new(IniDocument::parse(CATALOG).unwrap())
}

#[test]
fn document_lookup_ignores_case() {
    let document = IniDocument::parse(CATALOG).unwrap();

    assert_eq!(document.lookup("main", "unitcountertext"), Some("Einheiten:"));
    assert_eq!(document.lookup("MAIN", "UnitCounterText"), Some("Einheiten:"));
    assert_eq!(document.lookup("Main", "Missing"), None);
    assert_eq!(document.lookup("Missing", "Caption"), None);
}

#[test]
fn values_keep_quotes_and_backslashes_up_to_the_comment() {
    let document = IniDocument::parse(
        "[CM100004]\nMainText=Install \"CodeMeter\" from C:\\Program Files\\CodeMeter\\Runtime ; see docs\nCaption=\"Quoted\" caption\nHeadline=Line one\\nLine two\n",
    )
    .unwrap();

    assert_eq!(
        document.lookup("CM100004", "MainText"),
        Some(r#"Install "CodeMeter" from C:\Program Files\CodeMeter\Runtime"#)
    );
    assert_eq!(document.lookup("CM100004", "Caption"), Some(r#""Quoted" caption"#));
    assert_eq!(document.lookup("CM100004", "Headline"), Some(r"Line one\nLine two"));
}

#[test]
fn first_occurrence_of_a_key_wins() {
    let document = IniDocument::parse("[Main]\nUnitCounterText=First\nunitcountertext=Second\n").unwrap();

    assert_eq!(document.lookup("Main", "UnitCounterText"), Some("First"));
}

#[test]
fn section_names_keep_document_case_and_order() {
    let document = IniDocument::parse("[cm_StartMessage]\nCaption=Welcome\n\n[CM100004]\nCaption=Error\n").unwrap();

    assert_eq!(document.section_names(), vec!["cm_StartMessage", "CM100004"]);
}

#[test]
fn empty_document_has_no_sections() {
    let document = IniDocument::empty();

    assert!(document.is_empty());
    assert!(document.section_names().is_empty());
    assert_eq!(document.lookup("Main", "UnitCounterText"), None);
}

#[test]
fn index_covers_numeric_and_named_sections() {
    let catalog = catalog();

    assert!(catalog
        .indexed_section(ProtectionSystem::CodeMeter, GENERAL_ERROR)
        .is_some_and(|s| s.eq_ignore_ascii_case("CM100004")));
    assert!(catalog
        .indexed_section(ProtectionSystem::CodeMeter, START_MESSAGE)
        .is_some_and(|s| s.eq_ignore_ascii_case("cm_StartMessage")));
    assert!(catalog.indexed_section(ProtectionSystem::WibuKey, 200).is_some());
    assert!(catalog.indexed_section(ProtectionSystem::WibuKey, GENERAL_ERROR).is_none());
    assert!(catalog.indexed_section(ProtectionSystem::CodeMeter, 0).is_none());
}

#[test]
fn code_lookup_resolves_per_system() {
    let catalog = catalog();

    let template = catalog.resolve("CodeMeter", TemplateKey::Code(GENERAL_ERROR)).unwrap();
    assert_eq!(template.caption, "License Error");
    assert_eq!(template.header, "Access failed");
    assert!(template.body.starts_with("Could not access #FirmProductCode#."));

    assert_eq!(
        catalog.resolve("CodeMeterAct", TemplateKey::Code(GENERAL_ERROR)),
        Some(template)
    );
    assert_eq!(catalog.resolve("WibuKey", TemplateKey::Code(GENERAL_ERROR)), None);
    assert_eq!(catalog.resolve("Dongle", TemplateKey::Code(GENERAL_ERROR)), None);
}

#[test]
fn code_lookup_defaults_missing_fields() {
    let template = catalog().resolve("WibuKey", TemplateKey::Code(200)).unwrap();

    assert_eq!(template.caption, WINDOW_TITLE);
    assert_eq!(template.header, "");
    assert_eq!(template.body, "Only a body");
}

#[test]
fn category_lookup_requires_all_fields() {
    let catalog = catalog();

    let template = catalog
        .resolve("CodeMeter", TemplateKey::Category(CATEGORY_EXPIRATION_WARNING))
        .unwrap();
    assert_eq!(template, MessageTemplate::new("Expiring", "Soon", "#remaindays# days left"));

    assert_eq!(
        catalog.resolve("CodeMeter", TemplateKey::Category(CATEGORY_UNIT_COUNTER_WARNING)),
        None
    );
}

#[test]
fn unknown_system_uses_unprefixed_category() {
    let template = catalog()
        .resolve("Dongle", TemplateKey::Category(CATEGORY_UNIT_COUNTER_WARNING))
        .unwrap();

    assert_eq!(template.body, "#units# left");
}

#[test]
fn category_names_follow_system_prefix() {
    assert_eq!(category_for("CodeMeter", CATEGORY_START), "CM_StartMessage");
    assert_eq!(category_for("CodeMeterAct", CATEGORY_START), "CM_StartMessage");
    assert_eq!(category_for("WibuKey", CATEGORY_START), "WK_StartMessage");
    assert_eq!(category_for("Other", CATEGORY_START), "StartMessage");
}

#[test]
fn wibukey_knows_fewer_named_sections() {
    assert_eq!(
        ProtectionSystem::CodeMeter.code_by_name("certifiedwarningmessage"),
        Some(CERTIFIED_TIME_WARNING)
    );
    assert_eq!(ProtectionSystem::WibuKey.code_by_name("CertifiedWarningMessage"), None);
    assert_eq!(ProtectionSystem::WibuKey.code_by_name("DllNotFound"), Some(DLL_NOT_FOUND));
}

#[test]
fn malformed_section_names_are_not_indexed() {
    let catalog = TemplateCatalog::new(
        IniDocument::parse("[CM]\nMainText=a\n[CMabc]\nMainText=b\n[XY100004]\nMainText=c\n").unwrap(),
    );

    assert!(catalog.indexed_section(ProtectionSystem::CodeMeter, GENERAL_ERROR).is_none());
    assert_eq!(catalog.resolve("CodeMeter", TemplateKey::Code(GENERAL_ERROR)), None);
}

#[test]
fn load_falls_back_to_empty_catalog() {
    let dir = tempdir().unwrap();
    let source = CatalogSource::new("UserMessage", "ini").with_directories(vec![dir.path().to_path_buf()]);

    let catalog = TemplateCatalog::load(&source);

    assert!(catalog.document().section_names().is_empty());
}

#[test]
fn try_load_reports_missing_catalog() {
    let dir = tempdir().unwrap();
    let source = CatalogSource::new("UserMessage", "ini").with_directories(vec![dir.path().to_path_buf()]);
    let expected = source.candidates().len();

    let err = TemplateCatalog::try_load(&source).unwrap_err();

    assert!(matches!(
        err,
        Error::Catalog(CatalogError::NotFound { candidates }) if candidates == expected
    ));
}

#[test]
fn try_load_reports_malformed_catalog() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("UserMessage.ini"), "[CM100004\nCaption=Broken\n").unwrap();
    let source = CatalogSource::new("UserMessage", "ini").with_directories(vec![dir.path().to_path_buf()]);

    let err = TemplateCatalog::try_load(&source).unwrap_err();

    assert!(matches!(err, Error::Catalog(CatalogError::Parse { .. })));
    assert!(TemplateCatalog::load(&source).document().section_names().is_empty());
}

#[test]
fn load_reads_located_catalog() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("UserMessage.ini"), CATALOG).unwrap();
    let source = CatalogSource::new("UserMessage", "ini").with_directories(vec![dir.path().to_path_buf()]);

    let catalog = TemplateCatalog::load(&source);

    assert_eq!(
        catalog.resolve("CodeMeter", TemplateKey::Code(START_MESSAGE)).map(|t| t.caption),
        Some("Welcome".to_string())
    );
}

#[test]
fn fallback_template_uses_window_title() {
    let template = MessageTemplate::fallback(NO_LICENSE_TEXT);

    assert_eq!(template.caption, WINDOW_TITLE);
    assert_eq!(template.header, "");
    assert_eq!(template.body, NO_LICENSE_TEXT);
}
