use folio_idf::{RichText, SegmentKind, TextSegment};
use folio_traits::{Capability, DocumentView, SpanKind, TextSpan, ViewError};
use std::ops::{ControlFlow, Range};

/// Exposes a page's rich text through the editor capability interface.
///
/// Highlights are kept as decorations on the view; the content itself is
/// never mutated.
#[derive(Debug, Clone)]
pub struct RichTextView<'a> {
    content: &'a RichText,
    segments: Vec<TextSegment>,
    caret: usize,
    highlights: Vec<Range<usize>>,
}

impl<'a> RichTextView<'a> {
    pub fn new(content: &'a RichText, caret: usize) -> Self {
        Self {
            content,
            segments: content.segments(),
            caret,
            highlights: Vec::new(),
        }
    }

    pub fn content(&self) -> &RichText {
        self.content
    }

    pub fn set_caret(&mut self, caret: usize) {
        self.caret = caret;
    }

    pub fn highlights(&self) -> &[Range<usize>] {
        &self.highlights
    }

    /// Length of the flattened plain text, in characters.
    pub fn text_len(&self) -> usize {
        self.segments.last().map_or(0, TextSegment::end)
    }
}

impl DocumentView for RichTextView<'_> {
    fn visit_spans(
        &self,
        visitor: &mut dyn FnMut(TextSpan<'_>) -> ControlFlow<()>,
    ) -> Result<(), ViewError> {
        for segment in &self.segments {
            let kind = match segment.kind {
                SegmentKind::Heading { level } => SpanKind::Heading { level },
                SegmentKind::Body => SpanKind::Body,
            };
            let span = TextSpan {
                kind,
                text: &segment.text,
                start: segment.start,
            };
            if visitor(span).is_break() {
                break;
            }
        }
        Ok(())
    }

    fn caret(&self) -> usize {
        self.caret
    }

    fn supports(&self, capability: Capability) -> bool {
        matches!(
            capability,
            Capability::ExpandSelection | Capability::InlineHighlight
        )
    }

    fn expand_selection(&self, offset: usize) -> Result<Range<usize>, ViewError> {
        let len = self.text_len();
        if offset > len {
            return Err(ViewError::OutOfRange { offset, len });
        }
        // Offsets on a separator belong to the block before it
        self.segments
            .iter()
            .find(|s| s.start <= offset && offset <= s.end())
            .map(|s| s.start..s.end())
            .ok_or(ViewError::OutOfRange { offset, len })
    }

    fn highlight(&mut self, range: Range<usize>) -> Result<(), ViewError> {
        let len = self.text_len();
        if range.start > range.end || range.end > len {
            return Err(ViewError::OutOfRange {
                offset: range.end,
                len,
            });
        }
        self.highlights.push(range);
        Ok(())
    }
}
