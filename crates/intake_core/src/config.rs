use std::{
    fmt, fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;
use url::Url;
use zeroize::Zeroize;

use crate::error::ConfigError;

pub const DEFAULT_CONFIG_FILE: &str = "intake.toml";
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Workflow trigger URL. Signed trigger URLs act as bearer credentials, so the
/// value never appears in `Debug`/`Display` output and is wiped on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct EndpointSecret {
    raw: String,
    host: String,
}

impl EndpointSecret {
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ConfigError::MissingEndpoint);
        }

        let url = Url::parse(raw).map_err(|source| ConfigError::InvalidEndpoint { source })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme {
                scheme: url.scheme().to_string(),
            });
        }

        Ok(Self {
            raw: raw.to_string(),
            host: url.host_str().unwrap_or_default().to_string(),
        })
    }

    pub fn expose(&self) -> &str {
        &self.raw
    }

    pub fn host(&self) -> &str {
        &self.host
    }
}

impl fmt::Debug for EndpointSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EndpointSecret")
            .field("host", &self.host)
            .field("url", &"<redacted>")
            .finish()
    }
}

impl fmt::Display for EndpointSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (redacted)", self.host)
    }
}

impl Drop for EndpointSecret {
    fn drop(&mut self) {
        self.raw.zeroize();
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub endpoint: EndpointSecret,
    pub request_timeout: Duration,
    pub verify_pdf_signature: bool,
}

impl Settings {
    pub fn new(endpoint: EndpointSecret) -> Self {
        Self {
            endpoint,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            verify_pdf_signature: true,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileSettings {
    pub endpoint_url: Option<String>,
    pub request_timeout_seconds: Option<u64>,
    pub verify_pdf_signature: Option<bool>,
}

/// Loads settings from `path` (or `intake.toml` in the working directory when
/// present), then applies environment overrides.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, ConfigError> {
    let file = match path {
        Some(path) => Some(read_file_settings(path)?),
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            if default_path.exists() {
                Some(read_file_settings(default_path)?)
            } else {
                None
            }
        }
    };

    resolve_settings(file.unwrap_or_default(), |key| std::env::var(key).ok())
}

pub fn read_file_settings(path: &Path) -> Result<FileSettings, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: PathBuf::from(path),
        source,
    })?;
    toml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: PathBuf::from(path),
        source,
    })
}

pub fn resolve_settings(
    file: FileSettings,
    env: impl Fn(&str) -> Option<String>,
) -> Result<Settings, ConfigError> {
    let mut endpoint_url = file.endpoint_url;
    let mut request_timeout_seconds = file.request_timeout_seconds;
    let mut verify_pdf_signature = file.verify_pdf_signature;

    if let Some(v) = env("EP_RENEWAL_ENDPOINT_URL") {
        endpoint_url = Some(v);
    }
    if let Some(v) = env("APP__ENDPOINT_URL") {
        endpoint_url = Some(v);
    }

    if let Some(v) = env("APP__REQUEST_TIMEOUT_SECONDS") {
        let parsed = v
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|secs| *secs > 0)
            .ok_or(ConfigError::InvalidValue {
                key: "APP__REQUEST_TIMEOUT_SECONDS",
                value: v.clone(),
            })?;
        request_timeout_seconds = Some(parsed);
    }

    if let Some(v) = env("APP__VERIFY_PDF_SIGNATURE") {
        verify_pdf_signature = Some(parse_flag(&v).ok_or(ConfigError::InvalidValue {
            key: "APP__VERIFY_PDF_SIGNATURE",
            value: v.clone(),
        })?);
    }

    let endpoint = EndpointSecret::parse(
        endpoint_url
            .as_deref()
            .ok_or(ConfigError::MissingEndpoint)?,
    )?;

    let mut settings = Settings::new(endpoint);
    if let Some(secs) = request_timeout_seconds {
        if secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "request_timeout_seconds",
                value: secs.to_string(),
            });
        }
        settings.request_timeout = Duration::from_secs(secs);
    }
    if let Some(flag) = verify_pdf_signature {
        settings.verify_pdf_signature = flag;
    }
    Ok(settings)
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
