use super::domain::{AssessmentError, Factor};

pub const RECOMMENDATIONS_PER_FACTOR: usize = 3;

const FINANCIAL: [&str; RECOMMENDATIONS_PER_FACTOR] = [
    "Fee installment plans",
    "Emergency financial aid or scholarships",
    "Part-time work opportunities",
];

const PSYCHOLOGICAL: [&str; RECOMMENDATIONS_PER_FACTOR] = [
    "Academic and mental health counseling",
    "Stress management workshops",
    "Faculty mentoring",
];

const SOCIAL: [&str; RECOMMENDATIONS_PER_FACTOR] = [
    "Peer mentoring programs",
    "Family engagement initiatives",
    "Student support groups",
];

const INSTITUTIONAL: [&str; RECOMMENDATIONS_PER_FACTOR] = [
    "Institutional advising services",
    "Academic policy flexibility",
    "Administrative support",
];

/// Support actions targeting the dominant factor.
pub fn recommend(factor: Factor) -> [&'static str; RECOMMENDATIONS_PER_FACTOR] {
    match factor {
        Factor::Financial => FINANCIAL,
        Factor::Psychological => PSYCHOLOGICAL,
        Factor::Social => SOCIAL,
        Factor::Institutional => INSTITUTIONAL,
    }
}

/// Look up support actions for a factor name received from outside the crate.
pub fn recommend_by_name(
    name: &str,
) -> Result<[&'static str; RECOMMENDATIONS_PER_FACTOR], AssessmentError> {
    let factor: Factor = name.parse()?;
    Ok(recommend(factor))
}
