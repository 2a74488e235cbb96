//! Request-level orchestration: run the assessment, then hand the record to
//! the audit sink without letting delivery problems fail the request.

pub mod router;

pub use router::assessment_router;

use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

use crate::assessment::{Assessment, AssessmentError, AssessmentService, Intake};
use crate::audit::{AuditRecord, AuditSink, AuditStatus};

/// Service composing the pure assessment pipeline with an audit sink.
pub struct AssessmentWorkflow<S> {
    service: AssessmentService,
    audit: Arc<S>,
}

impl<S> AssessmentWorkflow<S>
where
    S: AuditSink + 'static,
{
    pub fn new(audit: Arc<S>) -> Self {
        Self {
            service: AssessmentService::new(),
            audit,
        }
    }

    pub fn service(&self) -> &AssessmentService {
        &self.service
    }

    /// Assess an intake and, when `record` is set, log it to the audit store.
    ///
    /// Assessment errors propagate; audit problems only show up in the
    /// receipt's status.
    pub async fn submit(
        &self,
        intake: Intake,
        record: bool,
    ) -> Result<AssessmentReceipt, AssessmentError> {
        let assessment = self.service.assess(&intake)?;

        let audit = if record {
            let entry = AuditRecord::new(&intake, &assessment, Utc::now());
            let status = self.audit.record(entry).await;
            if status.is_failure() {
                warn!(status = %status.summary(), "assessment returned without audit record");
            }
            status
        } else {
            AuditStatus::Skipped
        };

        info!(
            risk = assessment.risk_level.label(),
            score = assessment.rounded_score(),
            audit = ?audit,
            "assessment completed"
        );

        Ok(AssessmentReceipt {
            intake,
            assessment,
            audit,
        })
    }
}

/// Everything produced for one submitted intake.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentReceipt {
    pub intake: Intake,
    pub assessment: Assessment,
    pub audit: AuditStatus,
}
