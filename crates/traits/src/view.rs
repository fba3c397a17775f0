//! DocumentView trait: the capability interface a rich-text editor exposes
//! to the core.
//!
//! The heading tracker and the editing session only ever see this trait, so
//! the concrete editor library can be swapped without touching them.

use std::ops::{ControlFlow, Range};
use thiserror::Error;

/// Optional editor capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Grow a caret position to the enclosing block's text range.
    ExpandSelection,
    /// Mark a text range with an inline highlight.
    InlineHighlight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    Heading { level: u8 },
    Body,
}

/// A text-bearing block as seen through the view, positioned in the
/// flattened plain text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextSpan<'a> {
    pub kind: SpanKind,
    pub text: &'a str,
    pub start: usize,
}

impl TextSpan<'_> {
    pub fn is_heading(&self) -> bool {
        matches!(self.kind, SpanKind::Heading { .. })
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    #[error("Editor capability {0:?} is not supported")]
    Unsupported(Capability),

    #[error("Offset {offset} is outside the document (length {len})")]
    OutOfRange { offset: usize, len: usize },

    #[error("Document traversal failed: {0}")]
    Traversal(String),
}

pub trait DocumentView {
    /// Walks text spans in document order until the visitor breaks.
    fn visit_spans(
        &self,
        visitor: &mut dyn FnMut(TextSpan<'_>) -> ControlFlow<()>,
    ) -> Result<(), ViewError>;

    /// Caret position in the flattened plain text.
    fn caret(&self) -> usize;

    fn supports(&self, _capability: Capability) -> bool {
        false
    }

    /// Returns the range of the block containing `offset`.
    fn expand_selection(&self, _offset: usize) -> Result<Range<usize>, ViewError> {
        Err(ViewError::Unsupported(Capability::ExpandSelection))
    }

    /// Highlights `range` inline.
    fn highlight(&mut self, _range: Range<usize>) -> Result<(), ViewError> {
        Err(ViewError::Unsupported(Capability::InlineHighlight))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Vec<(SpanKind, &'static str, usize)>);

    impl DocumentView for Fixed {
        fn visit_spans(
            &self,
            visitor: &mut dyn FnMut(TextSpan<'_>) -> ControlFlow<()>,
        ) -> Result<(), ViewError> {
            for (kind, text, start) in &self.0 {
                if visitor(TextSpan {
                    kind: *kind,
                    text,
                    start: *start,
                })
                .is_break()
                {
                    break;
                }
            }
            Ok(())
        }

        fn caret(&self) -> usize {
            0
        }
    }

    #[test]
    fn test_default_capabilities_are_unsupported() {
        let mut view = Fixed(vec![]);
        assert!(!view.supports(Capability::ExpandSelection));
        assert_eq!(
            view.expand_selection(0),
            Err(ViewError::Unsupported(Capability::ExpandSelection))
        );
        assert_eq!(
            view.highlight(0..1),
            Err(ViewError::Unsupported(Capability::InlineHighlight))
        );
    }

    #[test]
    fn test_visitor_can_stop_early() {
        let view = Fixed(vec![
            (SpanKind::Heading { level: 1 }, "A", 0),
            (SpanKind::Body, "b", 2),
            (SpanKind::Body, "c", 4),
        ]);
        let mut seen = 0;
        view.visit_spans(&mut |span| {
            seen += 1;
            if span.start >= 2 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        })
        .unwrap();
        assert_eq!(seen, 2);
    }
}
