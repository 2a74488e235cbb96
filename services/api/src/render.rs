use dropout_risk::assessment::{AssessmentView, GaugeView};
use dropout_risk::cohort::CohortReport;
use dropout_risk::workflow::AssessmentReceipt;

const GAUGE_WIDTH: usize = 50;

pub(crate) fn render_assessment(receipt: &AssessmentReceipt) {
    let view = AssessmentView::from_assessment(&receipt.assessment);

    println!("Student dropout risk assessment");
    println!(
        "Student: {}, {}",
        receipt.intake.gender.label(),
        receipt.intake.study_level.label()
    );

    println!("\nRisk assessment result");
    println!("Risk level: {} ({})", view.risk_label, view.risk_color);
    println!("Risk score: {}", view.score_display);

    println!("\n{}", view.gauge.title);
    println!("{}", gauge_bar(&view.gauge, GAUGE_WIDTH));
    println!("{}", gauge_legend(&view.gauge));

    println!("\nDominant contributing factors");
    for line in &view.dominant_factors {
        println!("- {} (Score: {})", line.label, line.score);
    }

    println!("\nRecommended support actions");
    for action in &view.recommendations {
        println!("- {action}");
    }

    println!("\nNote: {}", view.note);
    println!("Audit: {}", receipt.audit.summary());
}

pub(crate) fn render_cohort_summary(report: &CohortReport) {
    eprintln!(
        "Assessed {} student(s), skipped {} row(s)",
        report.outcomes.len(),
        report.rejected.len()
    );

    for (level, count) in report.band_counts() {
        eprintln!("- {}: {}", level.label(), count);
    }

    for rejected in &report.rejected {
        let student = rejected.student_id.as_deref().unwrap_or("unknown student");
        eprintln!(
            "  line {} ({}): {}",
            rejected.line, student, rejected.reason
        );
    }
}

/// Text gauge: `[#####.....] 52.0%`, filled in proportion to the value.
pub(crate) fn gauge_bar(gauge: &GaugeView, width: usize) -> String {
    let span = f64::from(gauge.max - gauge.min);
    let fraction = ((gauge.value - f64::from(gauge.min)) / span).clamp(0.0, 1.0);
    let filled = (fraction * width as f64).round() as usize;

    format!(
        "[{}{}] {:.1}%",
        "#".repeat(filled),
        ".".repeat(width - filled),
        gauge.value
    )
}

/// Band legend with the band holding the bar in brackets.
fn gauge_legend(gauge: &GaugeView) -> String {
    let active = gauge.active_band();
    gauge
        .bands
        .iter()
        .map(|band| {
            let entry = format!("{} {}-{}", band.fill, band.from, band.to);
            if Some(band) == active {
                format!("[{entry}]")
            } else {
                entry
            }
        })
        .collect::<Vec<_>>()
        .join(" | ")
}
