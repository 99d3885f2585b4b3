//! Renders a `ReportPlan` into PDF bytes with `printpdf` and the builtin Helvetica.

use printpdf::{BuiltinFont, Mm, PdfDocument, PdfLayerReference};
use thiserror::Error;

use super::layout::{ReportLayout, ReportPlan, REPORT_TITLE};

const LAYER_NAME: &str = "Report";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("PDF error: {0}")]
    Pdf(#[from] printpdf::Error),
}

/// Emits the plan as a PDF document. CPU-bound; async callers run it on the
/// blocking pool.
pub fn render_pdf(plan: &ReportPlan, layout: &ReportLayout) -> Result<Vec<u8>, ReportError> {
    let width = Mm(layout.page_width_mm);
    let height = Mm(layout.page_height_mm);

    let (doc, first_page, first_layer) = PdfDocument::new(REPORT_TITLE, width, height, LAYER_NAME);
    let font = doc.add_builtin_font(BuiltinFont::Helvetica)?;

    let mut layers: Vec<PdfLayerReference> = vec![doc.get_page(first_page).get_layer(first_layer)];
    for _ in 1..plan.page_count {
        let (page, layer) = doc.add_page(width, height, LAYER_NAME);
        layers.push(doc.get_page(page).get_layer(layer));
    }

    for op in &plan.ops {
        // PDF user space starts at the bottom-left corner.
        let y = layout.page_height_mm - op.y_mm;
        layers[op.page].use_text(op.text.clone(), op.font_size_pt, Mm(op.x_mm), Mm(y), &font);
    }

    Ok(doc.save_to_bytes()?)
}
