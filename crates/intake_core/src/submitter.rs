use async_trait::async_trait;
use reqwest::Client;
use shared::protocol::SubmissionPayload;
use tracing::{info, warn};

use crate::{
    config::{EndpointSecret, Settings},
    error::SubmitError,
};

/// Delivers one assembled payload. Implementations must not retry.
#[async_trait]
pub trait Submitter: Send + Sync {
    async fn submit(&self, payload: &SubmissionPayload) -> Result<(), SubmitError>;
}

pub struct HttpSubmitter {
    http: Client,
    endpoint: EndpointSecret,
}

impl HttpSubmitter {
    pub fn new(settings: &Settings) -> Result<Self, SubmitError> {
        let http = Client::builder()
            .timeout(settings.request_timeout)
            .build()
            .map_err(|source| SubmitError::Transport { source })?;
        Ok(Self {
            http,
            endpoint: settings.endpoint.clone(),
        })
    }

    pub fn endpoint_host(&self) -> &str {
        self.endpoint.host()
    }
}

#[async_trait]
impl Submitter for HttpSubmitter {
    async fn submit(&self, payload: &SubmissionPayload) -> Result<(), SubmitError> {
        let response = self
            .http
            .post(self.endpoint.expose())
            .json(payload)
            .send()
            .await
            .map_err(|source| {
                warn!(host = %self.endpoint.host(), error = %source, "workflow request failed");
                SubmitError::Transport { source }
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(host = %self.endpoint.host(), %status, "workflow endpoint rejected submission");
            return Err(SubmitError::Status {
                status: status.as_u16(),
            });
        }

        info!(host = %self.endpoint.host(), %status, "workflow endpoint accepted submission");
        Ok(())
    }
}
