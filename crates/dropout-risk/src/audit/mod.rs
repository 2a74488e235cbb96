//! Boundary for shipping assessment records to an external audit store.
//!
//! Audit delivery is advisory: sinks report an [`AuditStatus`] instead of
//! failing, so an unreachable store never hides a computed assessment.

mod http;

pub use http::HttpAuditSink;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::future::Future;

use crate::assessment::{Assessment, Gender, Intake, StudyLevel};

/// Flat record persisted for every logged assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub timestamp: DateTime<Utc>,
    pub gender: Gender,
    pub study_level: StudyLevel,
    pub financial: u8,
    pub psychological: u8,
    pub social: u8,
    pub institutional: u8,
    pub normalized_score: f64,
    pub risk_label: String,
}

impl AuditRecord {
    pub fn new(intake: &Intake, assessment: &Assessment, timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            gender: intake.gender,
            study_level: intake.study_level,
            financial: intake.scores.financial,
            psychological: intake.scores.psychological,
            social: intake.scores.social,
            institutional: intake.scores.institutional,
            normalized_score: assessment.rounded_score(),
            risk_label: assessment.risk_level.label().to_string(),
        }
    }
}

/// Outcome of an audit delivery attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AuditStatus {
    Recorded,
    Rejected { http_status: u16 },
    TransportFailed { reason: String },
    NotConfigured,
    Skipped,
}

impl AuditStatus {
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            AuditStatus::Rejected { .. } | AuditStatus::TransportFailed { .. }
        )
    }

    pub fn summary(&self) -> String {
        match self {
            AuditStatus::Recorded => "assessment logged".to_string(),
            AuditStatus::Rejected { http_status } => {
                format!("audit store rejected the record (HTTP {http_status})")
            }
            AuditStatus::TransportFailed { reason } => {
                format!("audit store unreachable: {reason}")
            }
            AuditStatus::NotConfigured => {
                "audit logging requested but no audit endpoint is configured".to_string()
            }
            AuditStatus::Skipped => "audit logging not requested".to_string(),
        }
    }
}

/// Destination for audit records (HTTP store, in-memory fake, ...).
pub trait AuditSink: Send + Sync {
    fn record(&self, record: AuditRecord) -> impl Future<Output = AuditStatus> + Send;
}

/// Sink used when no audit endpoint is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledAuditSink;

impl AuditSink for DisabledAuditSink {
    async fn record(&self, _record: AuditRecord) -> AuditStatus {
        AuditStatus::NotConfigured
    }
}

/// Failure while preparing an audit sink.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("failed to build audit http client: {0}")]
    Client(#[from] reqwest::Error),
}
