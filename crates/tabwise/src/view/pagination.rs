//! Page arithmetic for the paginated layout.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// How the visible sequence is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ViewLayout {
    /// Fixed-size pages; only the current page is displayed.
    Paginated { page_size: usize },
    /// The whole visible sequence, with an aggregate footer.
    Full,
}

impl Default for ViewLayout {
    fn default() -> Self {
        ViewLayout::Paginated { page_size: 50 }
    }
}

impl ViewLayout {
    /// Number of pages for `visible` rows; never less than 1.
    pub fn page_count(&self, visible: usize) -> usize {
        match *self {
            ViewLayout::Paginated { page_size } if page_size > 0 => {
                visible.div_ceil(page_size).max(1)
            }
            _ => 1,
        }
    }

    /// Clamp a 1-based page number into `[1, page_count]`.
    pub fn clamp_page(&self, page: usize, visible: usize) -> usize {
        page.clamp(1, self.page_count(visible))
    }

    /// Positions in the visible sequence shown on `page` (1-based).
    pub fn page_range(&self, page: usize, visible: usize) -> Range<usize> {
        match *self {
            ViewLayout::Paginated { page_size } if page_size > 0 => {
                let page = self.clamp_page(page, visible);
                let start = ((page - 1) * page_size).min(visible);
                let end = (start + page_size).min(visible);
                start..end
            }
            _ => 0..visible,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count_minimum_one() {
        let layout = ViewLayout::Paginated { page_size: 10 };
        assert_eq!(layout.page_count(0), 1);
        assert_eq!(layout.page_count(10), 1);
        assert_eq!(layout.page_count(11), 2);
        assert_eq!(ViewLayout::Full.page_count(500), 1);
    }

    #[test]
    fn test_page_range() {
        let layout = ViewLayout::Paginated { page_size: 10 };
        assert_eq!(layout.page_range(1, 25), 0..10);
        assert_eq!(layout.page_range(3, 25), 20..25);
        assert_eq!(layout.page_range(7, 25), 20..25);
        assert_eq!(layout.page_range(1, 0), 0..0);
        assert_eq!(ViewLayout::Full.page_range(4, 25), 0..25);
    }
}
