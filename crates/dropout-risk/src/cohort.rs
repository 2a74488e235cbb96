//! Batch assessment of a cohort exported as CSV.
//!
//! Expected columns: `student_id,gender,study_level,financial,psychological,social,institutional`.
//! Rows that fail to parse or validate are set aside with their line number
//! so one bad row does not block the rest of the cohort.

use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::path::Path;

use crate::assessment::{
    Assessment, AssessmentService, Gender, Intake, IntakeForm, RiskLevel, StudyLevel,
};

#[derive(Debug)]
pub enum CohortError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for CohortError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CohortError::Io(err) => write!(f, "failed to access cohort file: {}", err),
            CohortError::Csv(err) => write!(f, "invalid cohort CSV data: {}", err),
        }
    }
}

impl std::error::Error for CohortError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CohortError::Io(err) => Some(err),
            CohortError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for CohortError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for CohortError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

#[derive(Debug, Deserialize)]
struct CohortRow {
    student_id: String,
    gender: Gender,
    study_level: StudyLevel,
    #[serde(default)]
    financial: Option<Number>,
    #[serde(default)]
    psychological: Option<Number>,
    #[serde(default)]
    social: Option<Number>,
    #[serde(default)]
    institutional: Option<Number>,
}

impl CohortRow {
    fn into_parts(self) -> (String, IntakeForm) {
        let form = IntakeForm {
            gender: self.gender,
            study_level: self.study_level,
            financial: self.financial,
            psychological: self.psychological,
            social: self.social,
            institutional: self.institutional,
        };
        (self.student_id, form)
    }
}

/// Assessment for one student in the cohort.
#[derive(Debug, Clone, PartialEq)]
pub struct CohortOutcome {
    pub student_id: String,
    pub intake: Intake,
    pub assessment: Assessment,
}

/// Row that could not be assessed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRow {
    pub line: u64,
    pub student_id: Option<String>,
    pub reason: String,
}

#[derive(Debug, Serialize)]
struct CohortResultRow<'a> {
    student_id: &'a str,
    raw_score: f64,
    normalized_score: f64,
    risk_label: &'static str,
    top_factor: &'static str,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CohortReport {
    pub outcomes: Vec<CohortOutcome>,
    pub rejected: Vec<RejectedRow>,
}

impl CohortReport {
    /// Number of assessed students per risk band, every band present.
    pub fn band_counts(&self) -> BTreeMap<RiskLevel, usize> {
        let mut counts: BTreeMap<RiskLevel, usize> =
            RiskLevel::ALL.into_iter().map(|level| (level, 0)).collect();
        for outcome in &self.outcomes {
            *counts.entry(outcome.assessment.risk_level).or_default() += 1;
        }
        counts
    }

    /// Write one result line per assessed student.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), CohortError> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for outcome in &self.outcomes {
            csv_writer.serialize(CohortResultRow {
                student_id: &outcome.student_id,
                raw_score: outcome.assessment.raw_score,
                normalized_score: outcome.assessment.rounded_score(),
                risk_label: outcome.assessment.risk_level.label(),
                top_factor: outcome
                    .assessment
                    .dominant_factor()
                    .map(|factor| factor.label())
                    .unwrap_or_default(),
            })?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

pub struct CohortAssessor;

impl CohortAssessor {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<CohortReport, CohortError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<CohortReport, CohortError> {
        let service = AssessmentService::new();
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let headers = csv_reader.headers()?.clone();
        let id_column = headers.iter().position(|name| name == "student_id");
        let mut report = CohortReport::default();

        for record in csv_reader.records() {
            let record = match record {
                Ok(record) => record,
                Err(err) if matches!(err.kind(), csv::ErrorKind::Io(_)) => return Err(err.into()),
                Err(err) => {
                    report.rejected.push(RejectedRow {
                        line: err.position().map(|position| position.line()).unwrap_or(0),
                        student_id: None,
                        reason: err.to_string(),
                    });
                    continue;
                }
            };

            // line where the record starts; blank lines and quoted newlines shift it
            let line = record
                .position()
                .map(|position| position.line())
                .unwrap_or(0);

            let (student_id, form) = match record.deserialize::<CohortRow>(Some(&headers)) {
                Ok(row) => row.into_parts(),
                Err(err) => {
                    report.rejected.push(RejectedRow {
                        line,
                        student_id: id_column
                            .and_then(|column| record.get(column))
                            .map(str::to_string),
                        reason: err.to_string(),
                    });
                    continue;
                }
            };

            let assessed = Intake::try_from(form)
                .and_then(|intake| service.assess(&intake).map(|assessment| (intake, assessment)));

            match assessed {
                Ok((intake, assessment)) => report.outcomes.push(CohortOutcome {
                    student_id,
                    intake,
                    assessment,
                }),
                Err(err) => report.rejected.push(RejectedRow {
                    line,
                    student_id: Some(student_id),
                    reason: err.to_string(),
                }),
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::Factor;
    use std::io::Cursor;

    const COHORT: &str = "\
student_id,gender,study_level,financial,psychological,social,institutional
S-001,Female,Undergraduate,5,1,1,1
S-002,Male,Graduate,2,5,2,2
S-003,Female,Graduate,1,1,1,1
S-004,Male,Undergraduate,0,3,3,3
S-005,Male,Undergraduate,5,5,5,5
S-006,Other,Undergraduate,3,3,3,3
S-007,Female,Graduate,3,3,,3
";

    fn report() -> CohortReport {
        CohortAssessor::from_reader(Cursor::new(COHORT)).expect("cohort parses")
    }

    #[test]
    fn assesses_valid_rows_in_order() {
        let report = report();

        let ids: Vec<&str> = report
            .outcomes
            .iter()
            .map(|outcome| outcome.student_id.as_str())
            .collect();
        assert_eq!(ids, vec!["S-001", "S-002", "S-003", "S-005"]);
        assert_eq!(
            report.outcomes[1].assessment.dominant_factor(),
            Some(Factor::Psychological)
        );
    }

    #[test]
    fn sets_aside_invalid_rows_with_line_numbers() {
        let report = report();

        assert_eq!(report.rejected.len(), 3);
        assert_eq!(report.rejected[0].line, 5);
        assert_eq!(report.rejected[0].student_id.as_deref(), Some("S-004"));
        assert!(report.rejected[0].reason.contains("Financial rating 0"));
        assert_eq!(report.rejected[1].line, 7);
        assert_eq!(report.rejected[1].student_id.as_deref(), Some("S-006"));
        assert_eq!(report.rejected[2].line, 8);
        assert!(report.rejected[2].reason.contains("Social rating is missing"));
    }

    #[test]
    fn line_numbers_follow_the_file_not_the_record_count() {
        let csv = "\
student_id,gender,study_level,financial,psychological,social,institutional
A,Female,Undergraduate,3,3,3,3

B,Male,Graduate,0,3,3,3
\"C
(transfer)\",Female,Graduate,3,3,3,3
D,Male,Graduate,3,3,9,3
";
        let report = CohortAssessor::from_reader(Cursor::new(csv)).expect("cohort parses");

        assert_eq!(report.outcomes.len(), 2);
        assert_eq!(report.outcomes[1].student_id, "C\n(transfer)");
        assert_eq!(report.rejected.len(), 2);
        assert_eq!(report.rejected[0].line, 4);
        assert_eq!(report.rejected[0].student_id.as_deref(), Some("B"));
        assert_eq!(report.rejected[1].line, 7);
        assert_eq!(report.rejected[1].student_id.as_deref(), Some("D"));
    }

    #[test]
    fn fractional_ratings_are_rejected_rows() {
        let csv = "\
student_id,gender,study_level,financial,psychological,social,institutional
A,Female,Undergraduate,3,2.5,3,3
";
        let report = CohortAssessor::from_reader(Cursor::new(csv)).expect("cohort parses");

        assert!(report.outcomes.is_empty());
        assert_eq!(report.rejected[0].line, 2);
        assert!(report.rejected[0]
            .reason
            .contains("Psychological rating 2.5 is not a whole number"));
    }

    #[test]
    fn counts_every_band() {
        let counts = report().band_counts();

        assert_eq!(counts.get(&RiskLevel::Low), Some(&1));
        assert_eq!(counts.get(&RiskLevel::Medium), Some(&2));
        assert_eq!(counts.get(&RiskLevel::High), Some(&1));

        let empty = CohortReport::default().band_counts();
        assert_eq!(empty.len(), 3);
        assert!(empty.values().all(|count| *count == 0));
    }

    #[test]
    fn writes_result_csv() {
        let mut buffer = Vec::new();
        report().write_csv(&mut buffer).expect("csv written");

        let output = String::from_utf8(buffer).expect("utf8 output");
        let mut lines = output.lines();
        assert_eq!(
            lines.next(),
            Some("student_id,raw_score,normalized_score,risk_label,top_factor")
        );
        assert_eq!(lines.next(), Some("S-001,2.6,0.52,Medium Risk,Financial"));
        assert_eq!(lines.next(), Some("S-002,2.9,0.58,Medium Risk,Psychological"));
        assert_eq!(lines.next(), Some("S-003,1.0,0.2,Low Risk,Financial"));
        assert_eq!(lines.next(), Some("S-005,5.0,1.0,High Risk,Financial"));
        assert_eq!(lines.next(), None);
    }
}
