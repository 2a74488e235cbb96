//! Deterministic dropout-risk pipeline: weighted scoring, banding, factor
//! ranking and recommendation lookup.

pub mod classifier;
pub mod domain;
pub mod ranking;
pub mod recommendations;
pub mod scoring;
pub mod views;

#[cfg(test)]
mod tests;

pub use classifier::{classify, RiskLevel, HIGH_RISK_THRESHOLD, MEDIUM_RISK_THRESHOLD};
pub use domain::{
    AssessmentError, Factor, FactorScores, Gender, Intake, IntakeForm, IntakeViolation,
    StudyLevel, DEFAULT_RATING, MAX_RATING, MIN_RATING,
};
pub use ranking::{rank, RankedFactor};
pub use recommendations::{recommend, recommend_by_name};
pub use views::{AssessmentView, GaugeBand, GaugeView, ModelView, ADVISORY_NOTE};

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Stateless service running the pipeline for one intake at a time.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssessmentService;

impl AssessmentService {
    pub fn new() -> Self {
        Self
    }

    /// Score, classify, rank and recommend, in that order.
    pub fn assess(&self, intake: &Intake) -> Result<Assessment, AssessmentError> {
        let score = scoring::compute(intake)?;
        let normalized_score = score.normalized();
        let risk_level = classify(normalized_score)?;

        let ranked = rank(&intake.scores);
        let dominant = ranked[0].factor;
        let recommendations = recommend(dominant)
            .iter()
            .map(|action| action.to_string())
            .collect();

        debug!(
            raw_score = score.raw(),
            normalized_score,
            risk = risk_level.label(),
            %dominant,
            "assessment computed"
        );

        Ok(Assessment {
            raw_score: score.raw(),
            normalized_score,
            risk_level,
            ranked_factors: ranked.to_vec(),
            recommendations,
        })
    }
}

/// Complete result for one intake.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub raw_score: f64,
    pub normalized_score: f64,
    pub risk_level: RiskLevel,
    pub ranked_factors: Vec<RankedFactor>,
    pub recommendations: Vec<String>,
}

impl Assessment {
    pub fn dominant_factor(&self) -> Option<Factor> {
        self.ranked_factors.first().map(|entry| entry.factor)
    }

    /// Normalized score rounded to two decimals, as displayed and audited.
    pub fn rounded_score(&self) -> f64 {
        (self.normalized_score * 100.0).round() / 100.0
    }

    /// Normalized score on the 0..=100 gauge scale.
    pub fn gauge_value(&self) -> f64 {
        self.normalized_score * 100.0
    }
}
