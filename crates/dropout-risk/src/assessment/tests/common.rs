use crate::assessment::domain::{FactorScores, Gender, Intake, IntakeForm, StudyLevel};
use serde_json::Number;

pub(super) fn intake(
    financial: u8,
    psychological: u8,
    social: u8,
    institutional: u8,
) -> Intake {
    Intake {
        gender: Gender::Female,
        study_level: StudyLevel::Undergraduate,
        scores: FactorScores::new(financial, psychological, social, institutional),
    }
}

pub(super) fn form(
    financial: Option<i64>,
    psychological: Option<i64>,
    social: Option<i64>,
    institutional: Option<i64>,
) -> IntakeForm {
    IntakeForm {
        gender: Gender::Male,
        study_level: StudyLevel::Graduate,
        financial: financial.map(Number::from),
        psychological: psychological.map(Number::from),
        social: social.map(Number::from),
        institutional: institutional.map(Number::from),
    }
}

/// Every combination of in-range ratings.
pub(super) fn all_valid_intakes() -> Vec<Intake> {
    let mut intakes = Vec::new();
    for financial in 1..=5 {
        for psychological in 1..=5 {
            for social in 1..=5 {
                for institutional in 1..=5 {
                    intakes.push(intake(financial, psychological, social, institutional));
                }
            }
        }
    }
    intakes
}
