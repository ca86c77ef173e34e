//! Integration tests for dashboard configuration loading and merging

use dashview::prelude::*;
use std::io::Write;
use std::time::Duration;

const SCREENS_YAML: &str = r#"
screens:
  - name: tickets
    search_fields: [reference, subject]
    filter_fields:
      - field: status
        options: [OPEN, CLOSED]
    sort: "reference:asc"
    page_size: 25
    refresh_interval_secs: 0
  - name: messages
    search_fields: [body]
    filter_fields:
      - field: status
        sentinel: TOUS
    date_field: sent_at
    utc_offset_minutes: 60
"#;

#[test]
fn test_load_from_yaml_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SCREENS_YAML.as_bytes()).unwrap();

    let config = DashboardConfig::from_yaml_file(file.path()).unwrap();
    assert!(config.validate().is_ok());

    let tickets = config.screen("tickets").unwrap();
    assert_eq!(tickets.page_size, 25);
    assert_eq!(tickets.sort_state(), SortState::asc("reference"));
    assert_eq!(tickets.refresh_interval(), None);
    assert_eq!(tickets.filter_field("status").unwrap().sentinel, "ALL");

    let messages = config.screen("messages").unwrap();
    assert_eq!(messages.sort_state(), SortState::newest_first("sent_at"));
    assert_eq!(messages.refresh_interval(), Some(Duration::from_secs(30)));
    assert_eq!(messages.utc_offset().local_minus_utc(), 3600);
    assert_eq!(messages.field_config().sentinel("status"), Some("TOUS"));
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = DashboardConfig::from_yaml_file(dir.path().join("screens.yaml")).unwrap_err();
    assert_eq!(err.error_code(), "CONFIG_FILE_NOT_FOUND");
}

#[test]
fn test_malformed_file_names_the_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"screens:\n  - name: [unterminated\n").unwrap();

    let err = DashboardConfig::from_yaml_file(file.path()).unwrap_err();
    assert_eq!(err.error_code(), "CONFIG_PARSE_ERROR");
    assert!(err.to_string().contains(&file.path().display().to_string()));
}

#[test]
fn test_validation_errors() {
    let zero_page = DashboardConfig::from_yaml_str("screens:\n  - name: contacts\n    page_size: 0\n")
        .unwrap();
    let err = zero_page.validate().unwrap_err();
    assert_eq!(err.error_code(), "CONFIG_INVALID_VALUE");
    assert!(err.to_string().contains("contacts.page_size"));

    let duplicate = DashboardConfig {
        screens: vec![ScreenConfig::new("groups"), ScreenConfig::new("groups")],
    };
    assert_eq!(duplicate.validate().unwrap_err().error_code(), "CONFIG_DUPLICATE_SCREEN");

    let far_offset = ScreenConfig::new("invoices").with_utc_offset_minutes(15 * 60);
    assert!(far_offset.validate().is_err());
}

#[test]
fn test_zero_page_size_rejected_by_controller() {
    let config = DashboardConfig::from_yaml_str("screens:\n  - name: contacts\n    page_size: 0\n")
        .unwrap();
    let err = ViewController::<Contact>::for_screen(&config, "contacts").unwrap_err();
    assert_eq!(err.error_code(), "INVALID_PAGE_SIZE");
}

#[test]
fn test_merge_overrides_by_name() {
    let overrides = DashboardConfig::from_yaml_str(
        "screens:\n  - name: tickets\n    page_size: 50\n  - name: reports\n",
    )
    .unwrap();

    let merged = DashboardConfig::merge(vec![DashboardConfig::default_config(), overrides]);
    let names: Vec<_> = merged.screens.iter().map(|s| s.name.as_str()).collect();

    assert_eq!(
        names,
        vec!["contacts", "groups", "messages", "tickets", "credit_orders", "invoices", "reports"]
    );
    assert_eq!(merged.screen("tickets").unwrap().page_size, 50);
    assert!(merged.screen("tickets").unwrap().search_fields.is_empty());
}

#[test]
fn test_merge_empty() {
    let merged = DashboardConfig::merge(vec![]);
    assert!(merged.screens.is_empty());
    assert!(merged.validate().is_ok());
}
