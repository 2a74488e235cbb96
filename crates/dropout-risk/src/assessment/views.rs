use serde::Serialize;

use super::classifier::{RiskLevel, HIGH_RISK_THRESHOLD, MEDIUM_RISK_THRESHOLD};
use super::domain::Factor;
use super::scoring::weight;
use super::Assessment;

/// Disclaimer shown alongside every result.
pub const ADVISORY_NOTE: &str = "This system provides early-warning risk assessment based on \
dominant factors identified through machine learning analysis. It does not claim deterministic \
prediction.";

pub const GAUGE_TITLE: &str = "Dropout Risk (%)";

/// Colored segment of the risk gauge, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GaugeBand {
    pub from: u8,
    pub to: u8,
    pub level: RiskLevel,
    pub fill: &'static str,
}

pub const GAUGE_BANDS: [GaugeBand; 3] = [
    GaugeBand {
        from: 0,
        to: 40,
        level: RiskLevel::Low,
        fill: "lightgreen",
    },
    GaugeBand {
        from: 40,
        to: 70,
        level: RiskLevel::Medium,
        fill: "gold",
    },
    GaugeBand {
        from: 70,
        to: 100,
        level: RiskLevel::High,
        fill: "salmon",
    },
];

/// Gauge widget description; renderers draw the bands and a bar at `value`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GaugeView {
    pub title: &'static str,
    pub value: f64,
    pub min: u8,
    pub max: u8,
    pub bar_color: &'static str,
    pub level: RiskLevel,
    pub bands: Vec<GaugeBand>,
}

impl GaugeView {
    pub fn from_assessment(assessment: &Assessment) -> Self {
        Self {
            title: GAUGE_TITLE,
            value: assessment.gauge_value(),
            min: 0,
            max: 100,
            bar_color: assessment.risk_level.color(),
            level: assessment.risk_level,
            bands: GAUGE_BANDS.to_vec(),
        }
    }

    /// Band the bar lands in.
    pub fn active_band(&self) -> Option<&GaugeBand> {
        self.bands.iter().find(|band| band.level == self.level)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorLine {
    pub factor: Factor,
    pub label: String,
    pub score: u8,
}

/// Presentation-ready rendering of an assessment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentView {
    pub risk_label: &'static str,
    pub risk_color: &'static str,
    pub score_display: String,
    pub gauge: GaugeView,
    pub dominant_factors: Vec<FactorLine>,
    pub recommendations: Vec<String>,
    pub note: &'static str,
}

impl AssessmentView {
    pub fn from_assessment(assessment: &Assessment) -> Self {
        let dominant_factors = assessment
            .ranked_factors
            .iter()
            .map(|entry| FactorLine {
                factor: entry.factor,
                label: format!("{} Factor", entry.factor),
                score: entry.score,
            })
            .collect();

        Self {
            risk_label: assessment.risk_level.label(),
            risk_color: assessment.risk_level.color(),
            score_display: format!("{:.2}", assessment.normalized_score),
            gauge: GaugeView::from_assessment(assessment),
            dominant_factors,
            recommendations: assessment.recommendations.clone(),
            note: ADVISORY_NOTE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorWeight {
    pub factor: Factor,
    pub weight: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Thresholds {
    pub medium: f64,
    pub high: f64,
}

/// The fixed scoring model, for clients that want to explain a result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelView {
    pub weights: Vec<FactorWeight>,
    pub thresholds: Thresholds,
    pub gauge_bands: Vec<GaugeBand>,
}

impl ModelView {
    pub fn current() -> Self {
        Self {
            weights: Factor::PRIORITY
                .into_iter()
                .map(|factor| FactorWeight {
                    factor,
                    weight: weight(factor),
                })
                .collect(),
            thresholds: Thresholds {
                medium: MEDIUM_RISK_THRESHOLD,
                high: HIGH_RISK_THRESHOLD,
            },
            gauge_bands: GAUGE_BANDS.to_vec(),
        }
    }
}
