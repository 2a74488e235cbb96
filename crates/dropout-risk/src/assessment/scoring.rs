use super::domain::{AssessmentError, Factor, Intake, MAX_RATING};

/// Factor weight as a whole percentage. The four weights sum to 100.
///
/// Derived offline from the dropout factor analysis; the ordering
/// Financial > Psychological > Social > Institutional is a domain fact.
pub fn weight_percentage(factor: Factor) -> u32 {
    match factor {
        Factor::Financial => 40,
        Factor::Psychological => 30,
        Factor::Social => 20,
        Factor::Institutional => 10,
    }
}

pub fn weight(factor: Factor) -> f64 {
    f64::from(weight_percentage(factor)) / 100.0
}

/// Weighted sum of the four ratings, kept in hundredths of a rating point.
///
/// Integer accumulation means the only rounding happens when a value is
/// read out, so `2.6`, `0.52` and friends match their decimal literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WeightedScore {
    hundredths: u32,
}

impl WeightedScore {
    /// Raw score on the 1.0..=5.0 rating scale.
    pub fn raw(&self) -> f64 {
        f64::from(self.hundredths) / 100.0
    }

    /// Raw score divided by the top rating, on 0.0..=1.0.
    pub fn normalized(&self) -> f64 {
        f64::from(self.hundredths) / (100.0 * f64::from(MAX_RATING))
    }
}

/// Combine the four ratings with the fixed weights.
pub fn compute(intake: &Intake) -> Result<WeightedScore, AssessmentError> {
    intake.scores.validate()?;

    // Exact hundredths: ratings like 2,2,2,2 score exactly 0.40 and band as
    // Medium. A float sum of 0.4 + 0.3 + 0.2 + 0.1 weights lands on
    // 0.39999999999999997 and would band them Low.
    let hundredths = intake
        .scores
        .iter()
        .map(|(factor, rating)| weight_percentage(factor) * u32::from(rating))
        .sum();

    Ok(WeightedScore { hundredths })
}
