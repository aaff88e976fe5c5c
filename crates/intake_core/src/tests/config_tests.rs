use super::*;

use std::{collections::HashMap, time::Duration};

const SIGNED_URL: &str =
    "https://flows.example.com/workflows/abc/triggers/manual/run?api-version=1&sig=s3cr3t-signature";

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn endpoint_is_required() {
    let err = resolve_settings(FileSettings::default(), env_from(&[])).expect_err("missing");
    assert!(matches!(err, ConfigError::MissingEndpoint));
}

#[test]
fn file_values_apply_with_defaults_for_the_rest() {
    let file = FileSettings {
        endpoint_url: Some(SIGNED_URL.to_string()),
        request_timeout_seconds: None,
        verify_pdf_signature: Some(false),
    };
    let settings = resolve_settings(file, env_from(&[])).expect("settings");
    assert_eq!(settings.endpoint.expose(), SIGNED_URL);
    assert_eq!(settings.request_timeout, Duration::from_secs(120));
    assert!(!settings.verify_pdf_signature);
}

#[test]
fn env_overrides_file_and_app_prefix_wins() {
    let file = FileSettings {
        endpoint_url: Some("https://file.example.com/hook".to_string()),
        request_timeout_seconds: Some(30),
        verify_pdf_signature: None,
    };
    let settings = resolve_settings(
        file,
        env_from(&[
            ("EP_RENEWAL_ENDPOINT_URL", "https://env.example.com/hook"),
            ("APP__ENDPOINT_URL", "https://app.example.com/hook"),
            ("APP__REQUEST_TIMEOUT_SECONDS", "15"),
        ]),
    )
    .expect("settings");
    assert_eq!(settings.endpoint.host(), "app.example.com");
    assert_eq!(settings.request_timeout, Duration::from_secs(15));
    assert!(settings.verify_pdf_signature);
}

#[test]
fn rejects_non_http_endpoint_and_bad_numbers() {
    let err = resolve_settings(
        FileSettings::default(),
        env_from(&[("APP__ENDPOINT_URL", "ftp://files.example.com/drop")]),
    )
    .expect_err("scheme");
    assert!(matches!(err, ConfigError::UnsupportedScheme { ref scheme } if scheme == "ftp"));

    let err = resolve_settings(
        FileSettings::default(),
        env_from(&[
            ("APP__ENDPOINT_URL", SIGNED_URL),
            ("APP__REQUEST_TIMEOUT_SECONDS", "soon"),
        ]),
    )
    .expect_err("timeout");
    assert!(matches!(err, ConfigError::InvalidValue { key, .. } if key == "APP__REQUEST_TIMEOUT_SECONDS"));
}

#[test]
fn endpoint_secret_never_prints_signature() {
    let secret = EndpointSecret::parse(SIGNED_URL).expect("parse");
    let debug = format!("{secret:?}");
    let display = secret.to_string();
    assert!(!debug.contains("s3cr3t"));
    assert!(!display.contains("s3cr3t"));
    assert!(display.contains("flows.example.com"));
}

#[test]
fn reads_settings_from_toml_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("intake.toml");
    std::fs::write(
        &path,
        format!("endpoint_url = \"{SIGNED_URL}\"\nrequest_timeout_seconds = 45\n"),
    )
    .expect("write");

    let file = read_file_settings(&path).expect("read");
    assert_eq!(file.request_timeout_seconds, Some(45));

    std::fs::write(&path, "endpoint = \"typo\"\n").expect("write");
    let err = read_file_settings(&path).expect_err("unknown key");
    assert!(matches!(err, ConfigError::Parse { .. }));
}
