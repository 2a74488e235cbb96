use reqwest::{Client, StatusCode, Url};
use std::time::Duration;
use tracing::{debug, warn};

use super::{AuditError, AuditRecord, AuditSink, AuditStatus};
use crate::config::AuditConfig;

/// Posts audit records as JSON to a remote record store.
///
/// Only `200 OK` counts as recorded; any other response or transport error
/// comes back as an advisory status.
#[derive(Debug, Clone)]
pub struct HttpAuditSink {
    client: Client,
    endpoint: Url,
}

impl HttpAuditSink {
    pub fn new(endpoint: Url, timeout: Option<Duration>) -> Result<Self, AuditError> {
        let mut builder =
            Client::builder().user_agent(concat!("dropout-risk/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint,
        })
    }

    /// Build a sink from configuration, or `None` when no endpoint is set.
    pub fn from_config(config: &AuditConfig) -> Result<Option<Self>, AuditError> {
        config
            .endpoint
            .clone()
            .map(|endpoint| Self::new(endpoint, config.timeout))
            .transpose()
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl AuditSink for HttpAuditSink {
    async fn record(&self, record: AuditRecord) -> AuditStatus {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&record)
            .send()
            .await;

        match response {
            Ok(response) if response.status() == StatusCode::OK => {
                debug!(endpoint = %self.endpoint, "audit record stored");
                AuditStatus::Recorded
            }
            Ok(response) => {
                let http_status = response.status().as_u16();
                warn!(endpoint = %self.endpoint, http_status, "audit store rejected record");
                AuditStatus::Rejected { http_status }
            }
            Err(err) => {
                warn!(endpoint = %self.endpoint, error = %err, "audit store unreachable");
                AuditStatus::TransportFailed {
                    reason: err.to_string(),
                }
            }
        }
    }
}
