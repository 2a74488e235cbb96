use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::fmt;
use std::str::FromStr;

/// Lowest rating a student can report for any factor.
pub const MIN_RATING: u8 = 1;
/// Highest rating a student can report for any factor.
pub const MAX_RATING: u8 = 5;
/// Rating preselected on intake forms.
pub const DEFAULT_RATING: u8 = 3;

/// Self-reported gender, carried through to audit records only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(alias = "female")]
    Female,
    #[serde(alias = "male")]
    Male,
}

impl Gender {
    pub fn label(&self) -> &'static str {
        match self {
            Gender::Female => "Female",
            Gender::Male => "Male",
        }
    }
}

/// Level of study, carried through to audit records only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StudyLevel {
    #[serde(alias = "undergraduate")]
    Undergraduate,
    #[serde(alias = "graduate")]
    Graduate,
}

impl StudyLevel {
    pub fn label(&self) -> &'static str {
        match self {
            StudyLevel::Undergraduate => "Undergraduate",
            StudyLevel::Graduate => "Graduate",
        }
    }
}

/// Stress factor contributing to dropout risk.
///
/// Variants are declared in tie-break priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Factor {
    Financial,
    Psychological,
    Social,
    Institutional,
}

impl Factor {
    /// Every factor, highest tie-break priority first.
    pub const PRIORITY: [Factor; 4] = [
        Factor::Financial,
        Factor::Psychological,
        Factor::Social,
        Factor::Institutional,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Factor::Financial => "Financial",
            Factor::Psychological => "Psychological",
            Factor::Social => "Social",
            Factor::Institutional => "Institutional",
        }
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Factor {
    type Err = AssessmentError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Factor::PRIORITY
            .into_iter()
            .find(|factor| factor.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| AssessmentError::UnknownFactor(trimmed.to_string()))
    }
}

/// Ratings for the four factors, each expected within `MIN_RATING..=MAX_RATING`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FactorScores {
    pub financial: u8,
    pub psychological: u8,
    pub social: u8,
    pub institutional: u8,
}

impl FactorScores {
    pub fn new(financial: u8, psychological: u8, social: u8, institutional: u8) -> Self {
        Self {
            financial,
            psychological,
            social,
            institutional,
        }
    }

    pub fn get(&self, factor: Factor) -> u8 {
        match factor {
            Factor::Financial => self.financial,
            Factor::Psychological => self.psychological,
            Factor::Social => self.social,
            Factor::Institutional => self.institutional,
        }
    }

    /// Ratings paired with their factor, in priority order.
    pub fn iter(&self) -> impl Iterator<Item = (Factor, u8)> + '_ {
        Factor::PRIORITY
            .into_iter()
            .map(move |factor| (factor, self.get(factor)))
    }

    pub fn validate(&self) -> Result<(), AssessmentError> {
        for (factor, value) in self.iter() {
            if !(MIN_RATING..=MAX_RATING).contains(&value) {
                return Err(AssessmentError::InvalidIntake(
                    IntakeViolation::OutOfRange {
                        factor,
                        value: Number::from(value),
                    },
                ));
            }
        }
        Ok(())
    }
}

impl Default for FactorScores {
    fn default() -> Self {
        Self::new(
            DEFAULT_RATING,
            DEFAULT_RATING,
            DEFAULT_RATING,
            DEFAULT_RATING,
        )
    }
}

/// Inputs for a single assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Intake {
    pub gender: Gender,
    pub study_level: StudyLevel,
    pub scores: FactorScores,
}

impl Intake {
    pub fn new(
        gender: Gender,
        study_level: StudyLevel,
        scores: FactorScores,
    ) -> Result<Self, AssessmentError> {
        scores.validate()?;
        Ok(Self {
            gender,
            study_level,
            scores,
        })
    }
}

/// Loosely typed intake as submitted by a form, JSON body, or CSV row.
///
/// Ratings are kept as any JSON number so that missing, fractional or wildly
/// out-of-range values surface as [`IntakeViolation`]s instead of parse failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeForm {
    pub gender: Gender,
    pub study_level: StudyLevel,
    #[serde(default)]
    pub financial: Option<Number>,
    #[serde(default)]
    pub psychological: Option<Number>,
    #[serde(default)]
    pub social: Option<Number>,
    #[serde(default)]
    pub institutional: Option<Number>,
}

impl IntakeForm {
    fn rating(factor: Factor, value: Option<Number>) -> Result<u8, AssessmentError> {
        let value = value.ok_or(AssessmentError::InvalidIntake(IntakeViolation::Missing(
            factor,
        )))?;
        let in_range = MIN_RATING..=MAX_RATING;

        if let Some(whole) = value.as_i64() {
            return u8::try_from(whole)
                .ok()
                .filter(|rating| in_range.contains(rating))
                .ok_or(AssessmentError::InvalidIntake(
                    IntakeViolation::OutOfRange { factor, value },
                ));
        }

        // u64 beyond i64::MAX and floats land here
        match value.as_f64() {
            Some(number) if number.fract() != 0.0 => Err(AssessmentError::InvalidIntake(
                IntakeViolation::NotWhole { factor, value },
            )),
            Some(number)
                if number >= f64::from(MIN_RATING) && number <= f64::from(MAX_RATING) =>
            {
                Ok(number as u8)
            }
            _ => Err(AssessmentError::InvalidIntake(
                IntakeViolation::OutOfRange { factor, value },
            )),
        }
    }
}

impl TryFrom<IntakeForm> for Intake {
    type Error = AssessmentError;

    fn try_from(form: IntakeForm) -> Result<Self, Self::Error> {
        let scores = FactorScores {
            financial: IntakeForm::rating(Factor::Financial, form.financial)?,
            psychological: IntakeForm::rating(Factor::Psychological, form.psychological)?,
            social: IntakeForm::rating(Factor::Social, form.social)?,
            institutional: IntakeForm::rating(Factor::Institutional, form.institutional)?,
        };
        Intake::new(form.gender, form.study_level, scores)
    }
}

/// Reason an intake was rejected before scoring.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntakeViolation {
    #[error("{0} rating is missing")]
    Missing(Factor),
    #[error("{factor} rating {value} is outside 1..=5")]
    OutOfRange { factor: Factor, value: Number },
    #[error("{factor} rating {value} is not a whole number")]
    NotWhole { factor: Factor, value: Number },
    #[error("unreadable intake: {0}")]
    Unreadable(String),
}

/// Failures raised by the assessment pipeline.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AssessmentError {
    #[error("invalid intake: {0}")]
    InvalidIntake(IntakeViolation),
    #[error("normalized score {0} is outside 0.0..=1.0")]
    InvalidScore(f64),
    #[error("unknown factor '{0}'")]
    UnknownFactor(String),
}
