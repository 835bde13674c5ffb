use helm_publish_core::{HiddenDirs, PublishSettings};
use proptest::prelude::*;
use std::path::Path;
use tempfile::TempDir;

#[test]
fn load_returns_defaults_when_no_config_file() {
    let tmp = TempDir::new().unwrap();
    let settings = PublishSettings::load(tmp.path()).unwrap();

    assert_eq!(settings.publish.output_dir, Path::new("output"));
    assert_eq!(settings.publish.marker_file, "CNAME");
    assert!(!settings.publish.include_hidden);
    assert_eq!(settings.publish.hidden_dirs(), HiddenDirs::Exclude);
    assert!(settings.publish.index_url().is_none());
    assert_eq!(
        settings.publish.render_commit_message("abc123"),
        "deployed via ⎈ Helm Publish Action for abc123"
    );
}

#[test]
fn load_parses_full_config() {
    let tmp = TempDir::new().unwrap();
    let toml = r#"
[publish]
output_dir = "site"
marker_file = "DOMAIN"
include_hidden = true
commit_message = "charts for {sha}"
index_url = "https://charts.example.com"
"#;
    std::fs::write(tmp.path().join("helm-publish.toml"), toml).unwrap();

    let settings = PublishSettings::load(tmp.path()).unwrap();

    assert_eq!(settings.publish.output_dir, Path::new("site"));
    assert_eq!(settings.publish.marker_file, "DOMAIN");
    assert_eq!(settings.publish.hidden_dirs(), HiddenDirs::Include);
    assert_eq!(
        settings.publish.index_url(),
        Some("https://charts.example.com")
    );
    assert_eq!(
        settings.publish.render_commit_message("deadbeef"),
        "charts for deadbeef"
    );
}

#[test]
fn load_fills_missing_fields_with_defaults() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(
        tmp.path().join("helm-publish.toml"),
        "[publish]\ninclude_hidden = true\n",
    )
    .unwrap();

    let settings = PublishSettings::load(tmp.path()).unwrap();

    assert!(settings.publish.include_hidden);
    assert_eq!(settings.publish.output_dir, Path::new("output"));
    assert_eq!(settings.publish.marker_file, "CNAME");
}

#[test]
fn blank_index_url_is_unset() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(
        tmp.path().join("helm-publish.toml"),
        "[publish]\nindex_url = \"  \"\n",
    )
    .unwrap();

    let settings = PublishSettings::load(tmp.path()).unwrap();
    assert!(settings.publish.index_url().is_none());
}

#[test]
fn load_rejects_invalid_toml() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("helm-publish.toml"), "[publish\n").unwrap();

    let err = PublishSettings::load(tmp.path()).unwrap_err();
    assert!(err.to_string().contains("failed to parse config"));
}

proptest! {
    #[test]
    fn commit_message_without_placeholder_is_verbatim(msg in "[a-zA-Z0-9 .:-]{0,40}", sha in "[0-9a-f]{40}") {
        let mut settings = PublishSettings::default();
        settings.publish.commit_message = msg.clone();
        prop_assert_eq!(settings.publish.render_commit_message(&sha), msg);
    }

    #[test]
    fn commit_message_embeds_sha(prefix in "[a-z ]{0,20}", sha in "[0-9a-f]{40}") {
        let mut settings = PublishSettings::default();
        settings.publish.commit_message = format!("{prefix}{{sha}}");
        prop_assert_eq!(settings.publish.render_commit_message(&sha), format!("{prefix}{sha}"));
    }
}
