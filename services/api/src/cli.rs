use crate::infra::{parse_gender, parse_study_level, ConfiguredAuditSink};
use crate::render::{render_assessment, render_cohort_summary};
use crate::server;
use clap::{Args, Parser, Subcommand};
use dropout_risk::assessment::{FactorScores, Gender, Intake, StudyLevel, DEFAULT_RATING};
use dropout_risk::cohort::CohortAssessor;
use dropout_risk::config::AppConfig;
use dropout_risk::error::AppError;
use dropout_risk::telemetry;
use dropout_risk::workflow::AssessmentWorkflow;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(
    name = "Student Dropout Risk Assessment",
    about = "Rule-based early warning decision support derived from dropout factor analysis",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Assess a single student and print the risk report
    Assess(AssessArgs),
    /// Assess every student in a cohort CSV export
    Batch(BatchArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// Gender (Female or Male)
    #[arg(long, value_parser = parse_gender)]
    pub(crate) gender: Gender,
    /// Level of study (Undergraduate or Graduate)
    #[arg(long, value_parser = parse_study_level)]
    pub(crate) study_level: StudyLevel,
    /// Financial stress, 1 (low) to 5 (high)
    #[arg(long, default_value_t = DEFAULT_RATING, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub(crate) financial: u8,
    /// Psychological stress, 1 (low) to 5 (high)
    #[arg(long, default_value_t = DEFAULT_RATING, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub(crate) psychological: u8,
    /// Social challenges, 1 (low) to 5 (high)
    #[arg(long, default_value_t = DEFAULT_RATING, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub(crate) social: u8,
    /// Institutional issues, 1 (low) to 5 (high)
    #[arg(long, default_value_t = DEFAULT_RATING, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub(crate) institutional: u8,
    /// Send the assessment to the configured audit store
    #[arg(long)]
    pub(crate) record: bool,
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// Cohort CSV (student_id,gender,study_level,financial,psychological,social,institutional)
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Where to write per-student results (defaults to stdout)
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Assess(args) => run_assess(args).await,
        Command::Batch(args) => run_batch(args),
    }
}

async fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let AssessArgs {
        gender,
        study_level,
        financial,
        psychological,
        social,
        institutional,
        record,
    } = args;

    let intake = Intake::new(
        gender,
        study_level,
        FactorScores::new(financial, psychological, social, institutional),
    )?;

    let config = AppConfig::load()?;
    telemetry::init_stderr(&config.telemetry)?;

    let sink = if record {
        ConfiguredAuditSink::from_config(&config.audit)?
    } else {
        ConfiguredAuditSink::disabled()
    };

    let workflow = AssessmentWorkflow::new(Arc::new(sink));
    let receipt = workflow.submit(intake, record).await?;
    render_assessment(&receipt);

    Ok(())
}

fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init_stderr(&config.telemetry)?;

    let report = CohortAssessor::from_path(&args.input)?;

    match args.output {
        Some(path) => report.write_csv(File::create(path)?)?,
        None => report.write_csv(io::stdout().lock())?,
    }

    render_cohort_summary(&report);
    Ok(())
}
