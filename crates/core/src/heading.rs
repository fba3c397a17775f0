//! Tracks the section heading that governs the caret position.
//!
//! The heading context is the text of the last heading that starts before
//! the caret, found by a linear scan from the top of the document. It is
//! not an ancestor lookup: a heading stays in effect across block
//! boundaries until the next heading.

use folio_traits::{DocumentView, ViewError};
use std::ops::ControlFlow;

/// Returns the text of the nearest heading that starts strictly before
/// `caret`, or an empty string when none does.
pub fn heading_at(view: &dyn DocumentView, caret: usize) -> Result<String, ViewError> {
    let mut last: Option<String> = None;
    view.visit_spans(&mut |span| {
        if span.start >= caret {
            return ControlFlow::Break(());
        }
        if span.is_heading() {
            last = Some(span.text.trim().to_string());
        }
        ControlFlow::Continue(())
    })?;
    Ok(last.unwrap_or_default())
}

/// Holds the last emitted heading context.
#[derive(Debug, Clone, Default)]
pub struct HeadingTracker {
    current: String,
}

impl HeadingTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    /// Recomputes from the view at its caret. Returns the new context only
    /// when it differs from the last one emitted.
    ///
    /// On a traversal error the previous context is kept.
    pub fn update(&mut self, view: &dyn DocumentView) -> Option<String> {
        match heading_at(view, view.caret()) {
            Ok(heading) if heading != self.current => {
                log::debug!("Heading context '{}' -> '{}'", self.current, heading);
                self.current = heading.clone();
                Some(heading)
            }
            Ok(_) => None,
            Err(e) => {
                log::warn!(
                    "Heading traversal failed, keeping '{}': {}",
                    self.current,
                    e
                );
                None
            }
        }
    }

    /// Called when the editor regains focus. Always rescans.
    pub fn on_focus(&mut self, view: &dyn DocumentView) -> Option<String> {
        self.update(view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::RichTextView;
    use folio_idf::{RichText, from_markdown};
    use folio_traits::TextSpan;

    fn report() -> RichText {
        from_markdown("# Intro\nSome intro text\n# Methods\nWe inspected the roof")
    }

    fn caret_after(content: &RichText, needle: &str) -> usize {
        let text = content.plain_text();
        let byte = text.find(needle).unwrap() + needle.len();
        text[..byte].chars().count()
    }

    #[test]
    fn test_last_heading_before_caret_wins() {
        let content = report();
        let caret = caret_after(&content, "inspected");
        let view = RichTextView::new(&content, caret);
        assert_eq!(heading_at(&view, caret).unwrap(), "Methods");
    }

    #[test]
    fn test_caret_before_any_heading() {
        let content = RichText::new()
            .with_paragraph("preamble")
            .with_heading(1, "Roof");
        let view = RichTextView::new(&content, 3);
        assert_eq!(heading_at(&view, 3).unwrap(), "");
        // Caret at a heading's own start does not count as after it
        assert_eq!(heading_at(&view, 9).unwrap(), "");
        assert_eq!(heading_at(&view, 10).unwrap(), "Roof");
    }

    #[test]
    fn test_heading_spans_blocks_until_next() {
        let content = from_markdown("# Roof\n- slates\n- flashing\n\nfinal note");
        let caret = caret_after(&content, "final");
        let view = RichTextView::new(&content, caret);
        assert_eq!(heading_at(&view, caret).unwrap(), "Roof");
    }

    #[test]
    fn test_emits_only_on_change() {
        let content = report();
        let mut tracker = HeadingTracker::new();

        let mut view = RichTextView::new(&content, caret_after(&content, "intro text"));
        assert_eq!(tracker.update(&view), Some("Intro".to_string()));
        view.set_caret(caret_after(&content, "Some"));
        assert_eq!(tracker.update(&view), None);

        view.set_caret(caret_after(&content, "roof"));
        assert_eq!(tracker.update(&view), Some("Methods".to_string()));
        assert_eq!(tracker.current(), "Methods");
    }

    #[test]
    fn test_focus_rescans() {
        let before = report();
        let mut tracker = HeadingTracker::new();
        tracker.update(&RichTextView::new(&before, caret_after(&before, "roof")));
        assert_eq!(tracker.current(), "Methods");

        // Content replaced while unfocused
        let after = from_markdown("# Drainage\nGutters blocked");
        let view = RichTextView::new(&after, caret_after(&after, "blocked"));
        assert_eq!(tracker.on_focus(&view), Some("Drainage".to_string()));
    }

    struct Broken;

    impl DocumentView for Broken {
        fn visit_spans(
            &self,
            _visitor: &mut dyn FnMut(TextSpan<'_>) -> ControlFlow<()>,
        ) -> Result<(), ViewError> {
            Err(ViewError::Traversal("detached node".into()))
        }

        fn caret(&self) -> usize {
            5
        }
    }

    #[test]
    fn test_traversal_error_keeps_previous_context() {
        let _ = env_logger::builder().is_test(true).try_init();
        let content = report();
        let mut tracker = HeadingTracker::new();
        tracker.update(&RichTextView::new(&content, caret_after(&content, "roof")));

        assert_eq!(tracker.update(&Broken), None);
        assert_eq!(tracker.current(), "Methods");
    }
}
