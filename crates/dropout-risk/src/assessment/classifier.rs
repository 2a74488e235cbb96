use serde::{Deserialize, Serialize};

use super::domain::AssessmentError;

/// Normalized score at which a student moves from Low to Medium risk.
pub const MEDIUM_RISK_THRESHOLD: f64 = 0.40;
/// Normalized score at which a student moves from Medium to High risk.
pub const HIGH_RISK_THRESHOLD: f64 = 0.70;

/// Dropout risk band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 3] = [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High];

    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low Risk",
            RiskLevel::Medium => "Medium Risk",
            RiskLevel::High => "High Risk",
        }
    }

    /// Indicator color used for the label and the gauge bar.
    pub fn color(&self) -> &'static str {
        match self {
            RiskLevel::Low => "green",
            RiskLevel::Medium => "orange",
            RiskLevel::High => "red",
        }
    }
}

/// Map a normalized score onto its risk band.
///
/// Bands are half-open with an inclusive lower bound, so a score exactly on
/// a threshold belongs to the higher band.
pub fn classify(normalized_score: f64) -> Result<RiskLevel, AssessmentError> {
    if !(0.0..=1.0).contains(&normalized_score) {
        return Err(AssessmentError::InvalidScore(normalized_score));
    }

    let level = if normalized_score < MEDIUM_RISK_THRESHOLD {
        RiskLevel::Low
    } else if normalized_score < HIGH_RISK_THRESHOLD {
        RiskLevel::Medium
    } else {
        RiskLevel::High
    };

    Ok(level)
}
