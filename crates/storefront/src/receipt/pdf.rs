//! PDF rendering of a [`Receipt`] layout.
//!
//! A4 pages, built-in Helvetica fonts (no font files to ship), 50pt margins.
//! Built-in fonts carry no glyph metrics here, so centered and right-aligned
//! lines use an average glyph width estimate.

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference};

use super::{Align, LineStyle, Receipt, ReceiptError};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
/// 50pt expressed in millimetres.
const MARGIN: f32 = 17.64;
const PT_TO_MM: f32 = 0.352_778;
const LINE_SPACING: f32 = 1.2;
/// Average Helvetica glyph width as a fraction of the font size.
const AVG_GLYPH_WIDTH: f32 = 0.5;
const LAYER_NAME: &str = "Ticket";

/// Render the receipt to PDF bytes.
///
/// # Errors
///
/// Returns `ReceiptError::Pdf` if the fonts cannot be registered or the
/// document cannot be serialized.
pub fn render(receipt: &Receipt) -> Result<Vec<u8>, ReceiptError> {
    let (doc, page, layer) = PdfDocument::new(
        receipt.title.as_str(),
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        LAYER_NAME,
    );
    let regular = builtin_font(&doc, BuiltinFont::Helvetica)?;
    let bold = builtin_font(&doc, BuiltinFont::HelveticaBold)?;

    let mut current = doc.get_page(page).get_layer(layer);
    let mut y = PAGE_HEIGHT - MARGIN;

    for line in &receipt.lines {
        let size = line.style.font_size();
        let line_height = size * LINE_SPACING * PT_TO_MM;
        let font = match line.style {
            LineStyle::Body => &regular,
            LineStyle::Title | LineStyle::Heading | LineStyle::Total => &bold,
        };

        y -= line.space_before * line_height;

        for chunk in wrap(&line.text, max_chars(size)) {
            y -= line_height;
            if y < MARGIN {
                let (next_page, next_layer) =
                    doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), LAYER_NAME);
                current = doc.get_page(next_page).get_layer(next_layer);
                y = PAGE_HEIGHT - MARGIN - line_height;
            }

            let x = x_position(line.align, &chunk, size);
            current.use_text(chunk, size, Mm(x), Mm(y), font);
        }
    }

    doc.save_to_bytes()
        .map_err(|e| ReceiptError::Pdf(e.to_string()))
}

fn builtin_font(
    doc: &PdfDocumentReference,
    font: BuiltinFont,
) -> Result<IndirectFontRef, ReceiptError> {
    doc.add_builtin_font(font)
        .map_err(|e| ReceiptError::Pdf(e.to_string()))
}

#[allow(clippy::cast_precision_loss)] // Line lengths are tiny
fn estimated_width(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * AVG_GLYPH_WIDTH * PT_TO_MM
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn max_chars(font_size: f32) -> usize {
    let usable = PAGE_WIDTH - 2.0 * MARGIN;
    (usable / (font_size * AVG_GLYPH_WIDTH * PT_TO_MM)).floor().max(1.0) as usize
}

fn x_position(align: Align, text: &str, font_size: f32) -> f32 {
    let width = estimated_width(text, font_size);
    match align {
        Align::Left => MARGIN,
        Align::Center => ((PAGE_WIDTH - width) / 2.0).max(MARGIN),
        Align::Right => (PAGE_WIDTH - MARGIN - width).max(MARGIN),
    }
}

/// Split `text` on whitespace into chunks of at most `max` characters.
/// A single word longer than `max` is kept whole.
fn wrap(text: &str, max: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for word in text.split(' ') {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };

        if needed > max && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    if !current.is_empty() || chunks.is_empty() {
        chunks.push(current);
    }
    chunks
}
