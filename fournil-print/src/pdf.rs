//! PDF rendering of print payloads
//!
//! Renders a resolved [`PrintDocument`] with the builtin Helvetica font,
//! which keeps the crate free of font assets and covers accented French
//! text. Payload offsets are measured from the top-left corner; PDF
//! coordinates grow from the bottom-left, so the vertical axis is
//! flipped here.

use printpdf::{BuiltinFont, Mm, PdfDocument};
use shared::layout::PrintDocument;

use crate::error::{PrintError, PrintResult};

/// Render a print payload to PDF bytes.
pub fn render_pdf(doc: &PrintDocument) -> PrintResult<Vec<u8>> {
    let (pdf, page, layer) = PdfDocument::new(
        doc.title.as_str(),
        Mm(doc.page.width_mm),
        Mm(doc.page.height_mm),
        "Layer 1",
    );
    let layer = pdf.get_page(page).get_layer(layer);
    let font = pdf
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| PrintError::Pdf(e.to_string()))?;

    for placed in &doc.texts {
        let y = doc.page.height_mm - placed.position.top;
        layer.use_text(
            placed.text.as_str(),
            placed.position.font_size,
            Mm(placed.position.left),
            Mm(y),
            &font,
        );
    }

    tracing::debug!(title = %doc.title, fields = doc.texts.len(), "rendered PDF payload");

    let mut writer = std::io::BufWriter::new(Vec::<u8>::new());
    pdf.save(&mut writer)
        .map_err(|e| PrintError::Pdf(e.to_string()))?;
    writer
        .into_inner()
        .map_err(|e| PrintError::Pdf(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cheque::{ChequeData, build_cheque};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::collections::HashMap;

    #[test]
    fn test_renders_nonempty_pdf() {
        let data = ChequeData {
            amount: Decimal::new(123456, 2),
            payee: "Minoterie du Nord".to_string(),
            place: "Casablanca".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 15),
        };
        let payload = build_cheque(&data, &HashMap::new());
        let bytes = render_pdf(&payload).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 500);
    }
}
