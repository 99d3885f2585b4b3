//! Report layout: turns one `AnalysisResult` into positioned text operations.
//!
//! Single pass over a vertical cursor. Coordinates are millimetres from the
//! top-left corner of the page. The PDF pass flips them to PDF space.
//!
//! # Overflow
//! With `OverflowPolicy::SinglePage` the cursor is never checked against the page
//! height: long suggestion text runs past the bottom edge and every operation stays
//! on page 0. `OverflowPolicy::Paginate` moves to a fresh page instead.

use serde::{Deserialize, Serialize};

use super::metrics::{FontMetricTable, HELVETICA};
use super::wrap::wrap_text;
use crate::models::{AnalysisResult, Category};

pub const REPORT_TITLE: &str = "Resume Analysis Report";

// ────────────────────────────────────────────────────────────────────────────
// Configuration
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Everything on one page; content past the bottom edge is clipped by viewers.
    SinglePage,
    /// Break to a new page when a line would cross the bottom margin.
    Paginate,
}

/// Page geometry and typographic constants for the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportLayout {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub title_size_pt: f32,
    pub title_y_mm: f32,
    pub overall_size_pt: f32,
    pub overall_y_mm: f32,
    pub body_size_pt: f32,
    pub section_x_mm: f32,
    pub entry_x_mm: f32,
    pub suggestion_x_mm: f32,
    pub breakdown_start_y_mm: f32,
    /// Gap between a section header and its first entry.
    pub header_gap_mm: f32,
    pub breakdown_line_height_mm: f32,
    /// Extra gap between the breakdown and the suggestions header.
    pub section_gap_mm: f32,
    /// Gap between a suggestion sub-header and its first body line.
    pub subheader_gap_mm: f32,
    pub suggestion_line_height_mm: f32,
    /// Space after each suggestion block.
    pub block_spacing_mm: f32,
    /// Horizontal space reserved around suggestion text (page width minus wrap width).
    pub wrap_inset_mm: f32,
    pub top_margin_mm: f32,
    pub bottom_margin_mm: f32,
    pub overflow: OverflowPolicy,
}

impl Default for ReportLayout {
    /// A4 portrait.
    fn default() -> Self {
        Self {
            page_width_mm: 210.0,
            page_height_mm: 297.0,
            title_size_pt: 24.0,
            title_y_mm: 30.0,
            overall_size_pt: 18.0,
            overall_y_mm: 60.0,
            body_size_pt: 14.0,
            section_x_mm: 20.0,
            entry_x_mm: 30.0,
            suggestion_x_mm: 35.0,
            breakdown_start_y_mm: 80.0,
            header_gap_mm: 20.0,
            breakdown_line_height_mm: 15.0,
            section_gap_mm: 10.0,
            subheader_gap_mm: 10.0,
            suggestion_line_height_mm: 6.0,
            block_spacing_mm: 10.0,
            wrap_inset_mm: 50.0,
            top_margin_mm: 20.0,
            bottom_margin_mm: 20.0,
            overflow: OverflowPolicy::SinglePage,
        }
    }
}

impl ReportLayout {
    pub fn with_overflow(mut self, overflow: OverflowPolicy) -> Self {
        self.overflow = overflow;
        self
    }

    fn wrap_width_mm(&self) -> f32 {
        self.page_width_mm - self.wrap_inset_mm
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Output
// ────────────────────────────────────────────────────────────────────────────

/// One line of text placed on a page. `y_mm` is the baseline, from the page top.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextOp {
    pub page: usize,
    pub x_mm: f32,
    pub y_mm: f32,
    pub font_size_pt: f32,
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportPlan {
    pub ops: Vec<TextOp>,
    pub page_count: usize,
    /// True when some line sits below the bottom edge of its page.
    pub overflowed: bool,
}

#[cfg(test)]
impl ReportPlan {
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().map(|op| op.text.as_str())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Layout pass
// ────────────────────────────────────────────────────────────────────────────

struct Cursor<'a> {
    layout: &'a ReportLayout,
    page: usize,
    y: f32,
    ops: Vec<TextOp>,
    overflowed: bool,
}

impl<'a> Cursor<'a> {
    fn new(layout: &'a ReportLayout) -> Self {
        Self {
            layout,
            page: 0,
            y: 0.0,
            ops: Vec::new(),
            overflowed: false,
        }
    }

    fn advance(&mut self, dy: f32) {
        self.y += dy;
    }

    fn paginating(&self) -> bool {
        self.layout.overflow == OverflowPolicy::Paginate
    }

    fn limit(&self) -> f32 {
        self.layout.page_height_mm - self.layout.bottom_margin_mm
    }

    fn break_page(&mut self) {
        self.page += 1;
        self.y = self.layout.top_margin_mm;
    }

    /// Breaks early when a line `dy` below the cursor would not fit, so a heading
    /// stays on the page of the line that follows it.
    fn keep_with_next(&mut self, dy: f32) {
        if self.paginating() && self.y <= self.limit() && self.y + dy > self.limit() {
            self.break_page();
        }
    }

    /// Places one line at the cursor's current baseline.
    fn write(&mut self, x_mm: f32, font_size_pt: f32, text: impl Into<String>) {
        if self.paginating() && self.y > self.limit() {
            self.break_page();
        }
        if self.y > self.layout.page_height_mm {
            self.overflowed = true;
        }
        self.ops.push(TextOp {
            page: self.page,
            x_mm,
            y_mm: self.y,
            font_size_pt,
            text: text.into(),
        });
    }

    fn finish(self) -> ReportPlan {
        ReportPlan {
            page_count: self.page + 1,
            ops: self.ops,
            overflowed: self.overflowed,
        }
    }
}

/// Lays out the report for `result`. Deterministic: equal inputs give equal plans.
pub fn plan_report(result: &AnalysisResult, layout: &ReportLayout) -> ReportPlan {
    plan_with_metrics(result, layout, &HELVETICA)
}

fn plan_with_metrics(
    result: &AnalysisResult,
    layout: &ReportLayout,
    metrics: &FontMetricTable,
) -> ReportPlan {
    let mut cursor = Cursor::new(layout);
    let body = layout.body_size_pt;

    // Title, centred.
    let title_w = metrics.width_mm(REPORT_TITLE, layout.title_size_pt);
    cursor.y = layout.title_y_mm;
    cursor.write(
        (layout.page_width_mm - title_w) / 2.0,
        layout.title_size_pt,
        REPORT_TITLE,
    );

    cursor.y = layout.overall_y_mm;
    cursor.write(
        layout.section_x_mm,
        layout.overall_size_pt,
        format!("Overall Score: {}/100", result.overall_score),
    );

    // Category breakdown.
    cursor.y = layout.breakdown_start_y_mm;
    cursor.write(layout.section_x_mm, body, "Category Breakdown:");
    cursor.advance(layout.header_gap_mm);

    for category in Category::ALL {
        cursor.write(
            layout.entry_x_mm,
            body,
            format!("{}: {}/100", category.label(), result.breakdown.get(category)),
        );
        cursor.advance(layout.breakdown_line_height_mm);
    }

    // Improvement suggestions.
    cursor.advance(layout.section_gap_mm);
    cursor.write(layout.section_x_mm, body, "Improvement Suggestions:");
    cursor.advance(layout.header_gap_mm);

    for category in Category::ALL {
        let Some(text) = result.suggestions.actionable(category) else {
            continue;
        };
        let lines = wrap_text(text, metrics, body, layout.wrap_width_mm());

        cursor.keep_with_next(layout.subheader_gap_mm);
        cursor.write(layout.entry_x_mm, body, format!("{}:", category.label()));
        cursor.advance(layout.subheader_gap_mm);

        for line in lines {
            cursor.write(layout.suggestion_x_mm, body, line);
            cursor.advance(layout.suggestion_line_height_mm);
        }
        cursor.advance(layout.block_spacing_mm);
    }

    cursor.finish()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::analysis::tests::sample_result;

    fn long_suggestions_result() -> AnalysisResult {
        let mut result = sample_result();
        let paragraph = "Rewrite each bullet to lead with a measurable outcome and remove \
                         filler phrases that dilute the message for recruiters. ";
        result.suggestions.grammar = paragraph.repeat(12);
        result.suggestions.structure = paragraph.repeat(12);
        result
    }

    #[test]
    fn test_worked_example_lines() {
        let plan = plan_report(&sample_result(), &ReportLayout::default());
        let texts: Vec<&str> = plan.texts().collect();

        assert_eq!(
            texts,
            [
                "Resume Analysis Report",
                "Overall Score: 72/100",
                "Category Breakdown:",
                "Grammar: 80/100",
                "Readability: 65/100",
                "Keywords: 70/100",
                "Structure: 75/100",
                "Improvement Suggestions:",
                "Readability:",
                "Shorten sentences.",
                "Keywords:",
                "Add more industry terms.",
            ]
        );
        assert!(!texts.contains(&"Grammar:"));
        assert!(!texts.contains(&"Structure:"));
    }

    #[test]
    fn test_worked_example_positions() {
        let plan = plan_report(&sample_result(), &ReportLayout::default());
        let y: Vec<f32> = plan.ops.iter().map(|op| op.y_mm).collect();
        assert_eq!(
            y,
            [30.0, 60.0, 80.0, 100.0, 115.0, 130.0, 145.0, 170.0, 190.0, 200.0, 216.0, 226.0]
        );
        assert_eq!(plan.ops[3].x_mm, 30.0);
        assert_eq!(plan.ops[9].x_mm, 35.0);
        assert_eq!(plan.page_count, 1);
        assert!(!plan.overflowed);
    }

    #[test]
    fn test_title_is_centred() {
        let layout = ReportLayout::default();
        let plan = plan_report(&sample_result(), &layout);
        let title = &plan.ops[0];
        let width = HELVETICA.width_mm(REPORT_TITLE, layout.title_size_pt);
        assert!((title.x_mm * 2.0 + width - layout.page_width_mm).abs() < 1e-3);
        assert_eq!(title.font_size_pt, 24.0);
    }

    #[test]
    fn test_no_suggestions_leaves_only_header() {
        let mut result = sample_result();
        result.suggestions = Default::default();
        let plan = plan_report(&result, &ReportLayout::default());
        assert_eq!(plan.texts().last(), Some("Improvement Suggestions:"));
    }

    #[test]
    fn test_plan_is_deterministic() {
        let layout = ReportLayout::default();
        let a = plan_report(&long_suggestions_result(), &layout);
        let b = plan_report(&long_suggestions_result(), &layout);
        assert_eq!(a.ops, b.ops);
    }

    #[test]
    fn test_single_page_runs_past_the_bottom_edge() {
        let layout = ReportLayout::default();
        let plan = plan_report(&long_suggestions_result(), &layout);

        assert_eq!(plan.page_count, 1);
        assert!(plan.ops.iter().all(|op| op.page == 0));
        assert!(plan.overflowed);
        let last = plan.ops.last().unwrap();
        assert!(last.y_mm > layout.page_height_mm);
    }

    #[test]
    fn test_paginate_keeps_lines_on_the_page() {
        let layout = ReportLayout::default().with_overflow(OverflowPolicy::Paginate);
        let plan = plan_report(&long_suggestions_result(), &layout);

        assert!(plan.page_count > 1);
        assert!(!plan.overflowed);
        let limit = layout.page_height_mm - layout.bottom_margin_mm;
        assert!(plan.ops.iter().all(|op| op.y_mm <= limit));
        // Pages are used in order.
        assert!(plan.ops.windows(2).all(|w| w[0].page <= w[1].page));
    }

    #[test]
    fn test_paginate_keeps_sub_header_with_its_first_line() {
        let layout = ReportLayout::default().with_overflow(OverflowPolicy::Paginate);
        let limit = layout.page_height_mm - layout.bottom_margin_mm;

        // One body line per grammar paragraph: find a count that leaves the
        // "Readability:" sub-header just above the bottom margin, with no room
        // for its first line.
        let with_lines = |n: usize| {
            let mut result = sample_result();
            result.suggestions.grammar = "Point.\n".repeat(n);
            result
        };
        let index_of_sub_header = |plan: &ReportPlan| {
            plan.ops
                .iter()
                .position(|op| op.text == "Readability:")
                .unwrap()
        };
        let n = (1..40)
            .find(|&n| {
                let plan = plan_report(&with_lines(n), &ReportLayout::default());
                let y = plan.ops[index_of_sub_header(&plan)].y_mm;
                y <= limit && y + layout.subheader_gap_mm > limit
            })
            .expect("some paragraph count lands the sub-header at the bottom");

        let plan = plan_report(&with_lines(n), &layout);
        let idx = index_of_sub_header(&plan);
        let (heading, first_line) = (&plan.ops[idx], &plan.ops[idx + 1]);
        assert_eq!(first_line.text, "Shorten sentences.");
        assert_eq!(heading.page, 1);
        assert_eq!(heading.page, first_line.page);
        assert_eq!(heading.y_mm, layout.top_margin_mm);
        assert!(!plan.overflowed);
    }

    #[test]
    fn test_pagination_does_not_change_short_reports() {
        let single = plan_report(&sample_result(), &ReportLayout::default());
        let paged = plan_report(
            &sample_result(),
            &ReportLayout::default().with_overflow(OverflowPolicy::Paginate),
        );
        assert_eq!(single.ops, paged.ops);
    }
}
