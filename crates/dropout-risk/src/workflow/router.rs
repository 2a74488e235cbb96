use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{AssessmentReceipt, AssessmentWorkflow};
use crate::assessment::{
    recommend_by_name, Assessment, AssessmentError, AssessmentView, Intake, IntakeForm,
    IntakeViolation, ModelView,
};
use crate::audit::{AuditSink, AuditStatus};

/// Intake form plus the caller's audit preference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentRequest {
    #[serde(flatten)]
    pub intake: IntakeForm,
    #[serde(default = "record_by_default")]
    pub record: bool,
}

fn record_by_default() -> bool {
    true
}

#[derive(Debug, Serialize)]
pub struct AssessmentResponse {
    pub intake: Intake,
    pub assessment: Assessment,
    pub view: AssessmentView,
    pub audit: AuditStatus,
    pub audit_message: String,
}

impl From<AssessmentReceipt> for AssessmentResponse {
    fn from(receipt: AssessmentReceipt) -> Self {
        let view = AssessmentView::from_assessment(&receipt.assessment);
        let audit_message = receipt.audit.summary();
        Self {
            intake: receipt.intake,
            assessment: receipt.assessment,
            view,
            audit: receipt.audit,
            audit_message,
        }
    }
}

/// Router builder exposing the assessment endpoints.
pub fn assessment_router<S>(workflow: Arc<AssessmentWorkflow<S>>) -> Router
where
    S: AuditSink + 'static,
{
    Router::new()
        .route("/api/v1/assessments", post(assess_handler::<S>))
        .route(
            "/api/v1/recommendations/:factor",
            get(recommendations_handler),
        )
        .route("/api/v1/model", get(model_handler))
        .with_state(workflow)
}

pub(crate) async fn assess_handler<S>(
    State(workflow): State<Arc<AssessmentWorkflow<S>>>,
    payload: Result<Json<AssessmentRequest>, JsonRejection>,
) -> Response
where
    S: AuditSink + 'static,
{
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(rejection),
    };

    let intake = match Intake::try_from(request.intake) {
        Ok(intake) => intake,
        Err(error) => return error_response(&error),
    };

    match workflow.submit(intake, request.record).await {
        Ok(receipt) => (StatusCode::OK, Json(AssessmentResponse::from(receipt))).into_response(),
        Err(error) => error_response(&error),
    }
}

pub(crate) async fn recommendations_handler(Path(factor): Path<String>) -> Response {
    match recommend_by_name(&factor) {
        Ok(actions) => {
            let payload = json!({
                "factor": factor.trim(),
                "recommendations": actions,
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(error) => error_response(&error),
    }
}

pub(crate) async fn model_handler() -> Json<ModelView> {
    Json(ModelView::current())
}

fn rejection_response(rejection: JsonRejection) -> Response {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => {
            let payload = json!({ "error": rejection.body_text() });
            (StatusCode::UNSUPPORTED_MEDIA_TYPE, Json(payload)).into_response()
        }
        other => error_response(&AssessmentError::InvalidIntake(IntakeViolation::Unreadable(
            other.body_text(),
        ))),
    }
}

fn error_response(error: &AssessmentError) -> Response {
    let status = match error {
        AssessmentError::InvalidIntake(_) => StatusCode::UNPROCESSABLE_ENTITY,
        AssessmentError::UnknownFactor(_) => StatusCode::NOT_FOUND,
        AssessmentError::InvalidScore(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({ "error": error.to_string() });
    (status, Json(payload)).into_response()
}
