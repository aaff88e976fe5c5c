//! UI/backend events and error modeling for desktop GUI controller.

use intake_core::{ConfigError, SubmitError};
use uuid::Uuid;

pub enum UiEvent {
    BackendReady,
    SubmissionFinished {
        id: Uuid,
        outcome: Result<(), SubmitError>,
    },
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Configuration,
    Transport,
    Remote,
    Attachment,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Configuration,
    Submit,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("endpoint_url")
            || message_lower.contains("config file")
            || message_lower.contains("not a valid url")
            || message_lower.contains("must use http")
            || message_lower.contains("invalid value")
        {
            UiErrorCategory::Configuration
        } else if message_lower.contains("responded with status") {
            UiErrorCategory::Remote
        } else if message_lower.contains("attachment") {
            UiErrorCategory::Attachment
        } else if message_lower.contains("timeout")
            || message_lower.contains("timed out")
            || message_lower.contains("connection")
            || message_lower.contains("request")
            || message_lower.contains("disconnected")
            || message_lower.contains("queue")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn from_config_error(err: &ConfigError) -> Self {
        Self {
            category: UiErrorCategory::Configuration,
            context: UiErrorContext::Configuration,
            message: err.to_string(),
        }
    }

    pub fn from_submit_error(err: &SubmitError) -> Self {
        let category = match err {
            SubmitError::Encode { .. } => UiErrorCategory::Attachment,
            SubmitError::Transport { .. } | SubmitError::Dispatch { .. } => {
                UiErrorCategory::Transport
            }
            SubmitError::Status { .. } => UiErrorCategory::Remote,
        };
        Self {
            category,
            context: UiErrorContext::Submit,
            message: err.to_string(),
        }
    }

    /// Startup and configuration failures leave nothing to submit to.
    pub fn blocks_submission(&self) -> bool {
        matches!(
            self.context,
            UiErrorContext::BackendStartup | UiErrorContext::Configuration
        )
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
