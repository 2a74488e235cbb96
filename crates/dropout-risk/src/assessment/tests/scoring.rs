use super::common::*;
use serde_json::Number;
use crate::assessment::domain::{AssessmentError, Factor, IntakeViolation};
use crate::assessment::scoring::{compute, weight, weight_percentage};

#[test]
fn weights_sum_to_one() {
    let total: u32 = Factor::PRIORITY.into_iter().map(weight_percentage).sum();
    assert_eq!(total, 100);

    let top = compute(&intake(5, 5, 5, 5)).expect("valid intake");
    assert_eq!(top.raw(), 5.0);
    assert_eq!(top.normalized(), 1.0);
}

#[test]
fn weights_follow_declared_ordering() {
    assert_eq!(weight(Factor::Financial), 0.40);
    assert_eq!(weight(Factor::Psychological), 0.30);
    assert_eq!(weight(Factor::Social), 0.20);
    assert_eq!(weight(Factor::Institutional), 0.10);

    let weights: Vec<u32> = Factor::PRIORITY.into_iter().map(weight_percentage).collect();
    assert!(weights.windows(2).all(|pair| pair[0] > pair[1]));
}

#[test]
fn computes_weighted_sum_for_reference_scenarios() {
    let cases = [
        ((1, 1, 1, 1), 1.0, 0.2),
        ((5, 1, 1, 1), 2.6, 0.52),
        ((3, 3, 3, 3), 3.0, 0.6),
        ((2, 5, 2, 2), 2.9, 0.58),
        ((2, 2, 2, 2), 2.0, 0.4),
    ];

    for ((f, p, s, i), raw, normalized) in cases {
        let score = compute(&intake(f, p, s, i)).expect("valid intake");
        assert_eq!(score.raw(), raw, "raw score for ({f},{p},{s},{i})");
        assert_eq!(
            score.normalized(),
            normalized,
            "normalized score for ({f},{p},{s},{i})"
        );
    }
}

#[test]
fn scores_stay_within_bounds_for_every_valid_intake() {
    for intake in all_valid_intakes() {
        let score = compute(&intake).expect("valid intake");
        assert!((1.0..=5.0).contains(&score.raw()), "{intake:?}");
        assert!((0.0..=1.0).contains(&score.normalized()), "{intake:?}");
    }
}

#[test]
fn rejects_out_of_range_ratings() {
    for financial in [0, 6] {
        let err = compute(&intake(financial, 3, 3, 3)).expect_err("out of range");
        assert_eq!(
            err,
            AssessmentError::InvalidIntake(IntakeViolation::OutOfRange {
                factor: Factor::Financial,
                value: Number::from(financial),
            })
        );
    }

    let err = compute(&intake(3, 3, 3, 9)).expect_err("out of range");
    assert!(matches!(
        err,
        AssessmentError::InvalidIntake(IntakeViolation::OutOfRange {
            factor: Factor::Institutional,
            ..
        })
    ));
}
