use std::ops::Range;

pub struct BreakAnalysis {
    pub should_break: bool,
    pub remaining_height: f64,
}

/// Centralized logic to check if a block fits in the remaining space.
///
/// * `cursor_y`: The current Y position relative to the top of the content area.
/// * `block_height`: The required height for the block.
/// * `usable_height`: The height of the content area of one page.
pub fn check_child_fit(cursor_y: f64, block_height: f64, usable_height: f64) -> BreakAnalysis {
    let available = (usable_height - cursor_y).max(0.0);
    // Use a small epsilon to handle floating point inaccuracies
    const EPSILON: f64 = 0.01;
    BreakAnalysis {
        should_break: block_height > available + EPSILON,
        remaining_height: available,
    }
}

/// The blocks that land on one page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSpan {
    pub blocks: Range<usize>,
    /// Sum of the heights of the blocks on this page.
    pub height: f64,
}

/// Greedily splits a flowing sequence of block heights into pages.
///
/// Blocks are never split. A block taller than the usable height gets a
/// page of its own and overflows it. Always returns at least one page.
pub fn paginate_blocks(block_heights: &[f64], usable_height: f64) -> Vec<PageSpan> {
    let mut pages = Vec::new();
    let mut start = 0;
    let mut cursor_y = 0.0;

    for (i, &raw) in block_heights.iter().enumerate() {
        let height = if raw.is_finite() { raw.max(0.0) } else { 0.0 };
        let fit = check_child_fit(cursor_y, height, usable_height);
        // A block that does not fit on an empty page still goes there.
        if fit.should_break && i > start {
            pages.push(PageSpan {
                blocks: start..i,
                height: cursor_y,
            });
            start = i;
            cursor_y = 0.0;
        }
        if height > usable_height {
            log::warn!(
                "Block {} has a height of {:.2} which exceeds the page content height of {:.2}",
                i,
                height,
                usable_height
            );
        }
        cursor_y += height;
    }

    pages.push(PageSpan {
        blocks: start..block_heights.len(),
        height: cursor_y,
    });
    pages
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranges(pages: &[PageSpan]) -> Vec<Range<usize>> {
        pages.iter().map(|p| p.blocks.clone()).collect()
    }

    #[test]
    fn test_check_child_fit() {
        assert!(!check_child_fit(0.0, 100.0, 100.0).should_break);
        assert!(!check_child_fit(50.0, 50.005, 100.0).should_break);
        assert!(check_child_fit(50.0, 51.0, 100.0).should_break);
        assert_eq!(check_child_fit(150.0, 1.0, 100.0).remaining_height, 0.0);
    }

    #[test]
    fn test_empty_content_is_one_page() {
        let pages = paginate_blocks(&[], 900.0);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].blocks, 0..0);
        assert_eq!(pages[0].height, 0.0);
    }

    #[test]
    fn test_greedy_split() {
        let pages = paginate_blocks(&[400.0, 400.0, 200.0, 500.0, 100.0], 1000.0);
        assert_eq!(ranges(&pages), vec![0..3, 3..5]);
        assert_eq!(pages[0].height, 1000.0);
        assert_eq!(pages[1].height, 600.0);
    }

    #[test]
    fn test_oversized_block_gets_own_page() {
        let pages = paginate_blocks(&[100.0, 2500.0, 100.0], 1000.0);
        assert_eq!(ranges(&pages), vec![0..1, 1..2, 2..3]);
    }

    #[test]
    fn test_oversized_first_block() {
        let pages = paginate_blocks(&[2500.0, 100.0], 1000.0);
        assert_eq!(ranges(&pages), vec![0..1, 1..2]);
    }

    #[test]
    fn test_negative_and_nan_heights_are_zero() {
        let pages = paginate_blocks(&[-5.0, f64::NAN, 10.0], 100.0);
        assert_eq!(ranges(&pages), vec![0..3]);
        assert_eq!(pages[0].height, 10.0);
    }
}
