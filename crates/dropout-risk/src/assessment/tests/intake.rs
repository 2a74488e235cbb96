use super::common::*;
use crate::assessment::domain::{
    AssessmentError, Factor, FactorScores, Gender, Intake, IntakeViolation, StudyLevel,
};
use serde_json::Number;

#[test]
fn form_with_valid_ratings_converts() {
    let intake = Intake::try_from(form(Some(5), Some(1), Some(2), Some(3))).expect("valid form");

    assert_eq!(intake.gender, Gender::Male);
    assert_eq!(intake.study_level, StudyLevel::Graduate);
    assert_eq!(intake.scores, FactorScores::new(5, 1, 2, 3));
}

#[test]
fn missing_rating_is_an_invalid_intake() {
    let err = Intake::try_from(form(Some(3), None, Some(3), Some(3))).expect_err("missing");
    assert_eq!(
        err,
        AssessmentError::InvalidIntake(IntakeViolation::Missing(Factor::Psychological))
    );
}

#[test]
fn out_of_range_ratings_are_invalid_intakes() {
    for value in [0, 6, -1, 300] {
        let err = Intake::try_from(form(Some(value), Some(3), Some(3), Some(3)))
            .expect_err("out of range");
        assert_eq!(
            err,
            AssessmentError::InvalidIntake(IntakeViolation::OutOfRange {
                factor: Factor::Financial,
                value: Number::from(value),
            })
        );
    }
}

#[test]
fn constructor_validates_scores() {
    let err = Intake::new(
        Gender::Female,
        StudyLevel::Undergraduate,
        FactorScores::new(3, 3, 0, 3),
    )
    .expect_err("social out of range");
    assert!(err.to_string().contains("Social rating 0"));
}

#[test]
fn form_deserializes_from_json_with_lowercase_aliases() {
    let form: crate::assessment::IntakeForm = serde_json::from_value(serde_json::json!({
        "gender": "female",
        "study_level": "Undergraduate",
        "financial": 4,
        "psychological": 2,
        "social": 3,
        "institutional": 1
    }))
    .expect("form parses");

    let intake = Intake::try_from(form).expect("valid");
    assert_eq!(intake.gender, Gender::Female);
    assert_eq!(intake.scores.get(Factor::Financial), 4);
}

fn json_form(financial: serde_json::Value) -> crate::assessment::IntakeForm {
    serde_json::from_value(serde_json::json!({
        "gender": "Male",
        "study_level": "Graduate",
        "financial": financial,
        "psychological": 3,
        "social": 3,
        "institutional": 3
    }))
    .expect("any JSON number parses")
}

#[test]
fn numbers_beyond_i64_are_out_of_range() {
    for raw in ["99999999999999999999", "18446744073709551615"] {
        let value: serde_json::Value = serde_json::from_str(raw).expect("json number");
        let err = Intake::try_from(json_form(value)).expect_err("out of range");

        assert!(matches!(
            err,
            AssessmentError::InvalidIntake(IntakeViolation::OutOfRange {
                factor: Factor::Financial,
                ..
            })
        ));
    }
}

#[test]
fn fractional_ratings_are_not_whole() {
    let err = Intake::try_from(json_form(serde_json::json!(2.5))).expect_err("fractional");

    assert_eq!(err.to_string(), "invalid intake: Financial rating 2.5 is not a whole number");
}

#[test]
fn whole_float_ratings_are_accepted() {
    let intake = Intake::try_from(json_form(serde_json::json!(4.0))).expect("whole float");
    assert_eq!(intake.scores.get(Factor::Financial), 4);

    let err = Intake::try_from(json_form(serde_json::json!(6.0))).expect_err("out of range");
    assert!(err.to_string().contains("Financial rating 6.0 is outside 1..=5"));
}

#[test]
fn factor_names_parse_case_insensitively() {
    assert_eq!("psychological".parse::<Factor>(), Ok(Factor::Psychological));
    assert_eq!(
        "Career".parse::<Factor>(),
        Err(AssessmentError::UnknownFactor("Career".to_string()))
    );
}

#[test]
fn default_scores_match_form_defaults() {
    let scores = FactorScores::default();
    assert!(scores.iter().all(|(_, value)| value == 3));
    assert_eq!(intake(3, 3, 3, 3).scores, scores);
}
