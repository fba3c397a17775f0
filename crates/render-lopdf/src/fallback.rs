use crate::writer::PdfBuilder;
use folio_render_core::{FallbackRenderer, RenderError, utils};
use folio_types::PhysicalPageSize;
use lopdf::content::{Content, Operation};
use lopdf::{Object, StringFormat};

const MARGIN_PT: f32 = 72.0;
const TITLE_SIZE: i64 = 18;
const BODY_SIZE: i64 = 11;
const LEADING: f32 = 15.0;
/// Characters per body line; Helvetica at 11pt fills a Letter text column.
const WRAP_COLUMNS: usize = 80;

/// A single Letter page stating why the real export is missing.
///
/// Output is deterministic for a given title and message.
pub fn fallback_pdf(title: &str, message: &str) -> Result<Vec<u8>, RenderError> {
    let (width, height) = utils::page_size_pt(PhysicalPageSize::LETTER);
    let mut builder = PdfBuilder::new(width, height);

    let top = utils::flip_y(MARGIN_PT, height);
    let mut ops = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec![PdfBuilder::FONT_NAME.into(), TITLE_SIZE.into()]),
        Operation::new("Td", vec![MARGIN_PT.into(), top.into()]),
        Operation::new("Tj", vec![pdf_text(title)]),
        Operation::new("Tf", vec![PdfBuilder::FONT_NAME.into(), BODY_SIZE.into()]),
        Operation::new("TL", vec![LEADING.into()]),
        // Blank line between title and body
        Operation::new("T*", vec![]),
    ];
    for line in wrap(message, WRAP_COLUMNS) {
        ops.push(Operation::new("T*", vec![]));
        ops.push(Operation::new("Tj", vec![pdf_text(&line)]));
    }
    ops.push(Operation::new("ET", vec![]));

    builder.add_page(Content { operations: ops }, &[])?;
    builder.finish()
}

/// `FallbackRenderer` backed by [`fallback_pdf`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfFallback;

impl FallbackRenderer for LopdfFallback {
    fn fallback_pdf(&self, title: &str, message: &str) -> Result<Vec<u8>, RenderError> {
        fallback_pdf(title, message)
    }
}

/// Encodes text for a Type1 font string; characters outside Latin-1 become `?`.
fn pdf_text(text: &str) -> Object {
    let bytes = text
        .chars()
        .map(|c| if (c as u32) < 256 { c as u8 } else { b'?' })
        .collect();
    Object::String(bytes, StringFormat::Literal)
}

/// Greedy word wrap. Words longer than `columns` are hard-split.
fn wrap(text: &str, columns: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            while word.len() > columns {
                if !line.is_empty() {
                    lines.push(std::mem::take(&mut line));
                }
                lines.push(word.drain(..columns).collect());
            }
            let word: String = word.into_iter().collect();
            if word.is_empty() {
                continue;
            }
            if !line.is_empty() && line.chars().count() + 1 + word.chars().count() > columns {
                lines.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(&word);
        }
        lines.push(line);
    }
    lines
}
