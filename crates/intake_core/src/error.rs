use std::path::PathBuf;

use shared::error::ValidationErrors;
use thiserror::Error;

/// Failure after validation passed. Every variant ends the attempt and keeps
/// the entered data for a manual retry.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("failed to read attachment `{name}`: {source}")]
    Encode {
        name: String,
        #[source]
        source: std::io::Error,
    },
    #[error("request to workflow endpoint failed: {source}")]
    Transport {
        #[source]
        source: reqwest::Error,
    },
    #[error("workflow endpoint responded with status {status}")]
    Status { status: u16 },
    #[error("submission could not be handed to the sender: {reason}")]
    Dispatch { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitRejected {
    #[error("a submission is already in flight")]
    InFlight,
    #[error(transparent)]
    Invalid(ValidationErrors),
}

#[derive(Debug, Error)]
pub enum FieldUpdateError {
    #[error("`{field}` is an attachment slot; attach a file instead")]
    AttachmentField { field: &'static str },
    #[error(transparent)]
    UnknownValue(#[from] shared::error::UnknownValue),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no workflow endpoint configured; set `endpoint_url` or EP_RENEWAL_ENDPOINT_URL")]
    MissingEndpoint,
    #[error("workflow endpoint is not a valid URL: {source}")]
    InvalidEndpoint {
        #[source]
        source: url::ParseError,
    },
    #[error("workflow endpoint must use http or https, got `{scheme}`")]
    UnsupportedScheme { scheme: String },
    #[error("failed to read config file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid value `{value}` for `{key}`")]
    InvalidValue { key: &'static str, value: String },
}
