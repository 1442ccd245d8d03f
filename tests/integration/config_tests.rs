//! Configuration loading tests

use carpool_console::config::{Config, Validate};
use std::io::Write;
use tempfile::NamedTempFile;

#[tokio::test]
async fn loads_yaml_and_applies_defaults() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
api:
  base_url: "https://carpool.example.com"
session:
  token: "file-token"
"#
    )
    .unwrap();

    let config = Config::from_file(file.path()).await.unwrap();
    assert_eq!(config.api().base_url, "https://carpool.example.com");
    assert_eq!(config.api().request_timeout, 30);
    assert_eq!(config.polling().alert_interval_secs, 30);
    assert_eq!(config.session().token.as_deref(), Some("file-token"));
}

#[tokio::test]
async fn rejects_invalid_base_url() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
api:
  base_url: "not a url"
"#
    )
    .unwrap();

    assert!(Config::from_file(file.path()).await.is_err());
}

#[test]
fn validate_catches_zero_polling_interval() {
    let mut config = Config::default();
    config.console.polling.alert_interval_secs = 0;
    assert!(config.console.validate().is_err());
}
