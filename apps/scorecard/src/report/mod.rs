//! Report Synthesizer: a downloadable PDF summary of one analysis result, built
//! entirely from the in-memory value.

pub mod layout;
pub mod metrics;
pub mod pdf;
pub mod wrap;

pub use layout::{plan_report, OverflowPolicy, ReportLayout};
pub use pdf::{render_pdf, ReportError};

use crate::models::AnalysisResult;

/// Download name of the exported document.
pub const REPORT_FILENAME: &str = "resume-analysis-report.pdf";

/// Lays out and renders the report for `result`.
pub fn synthesize(result: &AnalysisResult, layout: &ReportLayout) -> Result<Vec<u8>, ReportError> {
    let plan = plan_report(result, layout);
    if plan.overflowed {
        tracing::warn!(
            overall_score = result.overall_score.value(),
            "Report content runs past the end of the page"
        );
    }
    render_pdf(&plan, layout)
}
