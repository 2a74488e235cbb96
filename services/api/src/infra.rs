use dropout_risk::assessment::{Gender, StudyLevel};
use dropout_risk::audit::{
    AuditError, AuditRecord, AuditSink, AuditStatus, DisabledAuditSink, HttpAuditSink,
};
use dropout_risk::config::AuditConfig;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Audit sink chosen from configuration at startup.
pub(crate) enum ConfiguredAuditSink {
    Http(HttpAuditSink),
    Disabled(DisabledAuditSink),
}

impl ConfiguredAuditSink {
    pub(crate) fn from_config(config: &AuditConfig) -> Result<Self, AuditError> {
        Ok(match HttpAuditSink::from_config(config)? {
            Some(sink) => Self::Http(sink),
            None => Self::disabled(),
        })
    }

    pub(crate) fn disabled() -> Self {
        Self::Disabled(DisabledAuditSink)
    }

    pub(crate) fn describe(&self) -> String {
        match self {
            ConfiguredAuditSink::Http(sink) => format!("http {}", sink.endpoint()),
            ConfiguredAuditSink::Disabled(_) => "disabled".to_string(),
        }
    }
}

impl AuditSink for ConfiguredAuditSink {
    async fn record(&self, record: AuditRecord) -> AuditStatus {
        match self {
            ConfiguredAuditSink::Http(sink) => sink.record(record).await,
            ConfiguredAuditSink::Disabled(sink) => sink.record(record).await,
        }
    }
}

pub(crate) fn parse_gender(raw: &str) -> Result<Gender, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "female" | "f" => Ok(Gender::Female),
        "male" | "m" => Ok(Gender::Male),
        _ => Err(format!("'{raw}' is not a supported gender (Female or Male)")),
    }
}

pub(crate) fn parse_study_level(raw: &str) -> Result<StudyLevel, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "undergraduate" | "ug" => Ok(StudyLevel::Undergraduate),
        "graduate" | "grad" | "pg" => Ok(StudyLevel::Graduate),
        _ => Err(format!(
            "'{raw}' is not a supported study level (Undergraduate or Graduate)"
        )),
    }
}
