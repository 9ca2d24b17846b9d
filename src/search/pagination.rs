//! Pagination window arithmetic for result pages.
//!
//! A window always contains the first and last page plus the pages
//! adjacent to the current one; every run of hidden pages collapses
//! into a single ellipsis marker.

/// One slot in the pager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(usize),
    Ellipsis,
}

/// The visible pager state for a result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow {
    pub current_page: usize,
    pub total_pages: usize,
    pub items: Vec<PageItem>,
}

impl PageWindow {
    pub fn prev_page(&self) -> Option<usize> {
        (self.current_page > 1).then(|| self.current_page - 1)
    }

    pub fn next_page(&self) -> Option<usize> {
        (self.current_page < self.total_pages).then(|| self.current_page + 1)
    }
}

/// Compute the pagination window for a result set.
///
/// Returns `None` when there is nothing to paginate: a zero page size,
/// or all results fitting on a single page.
pub fn page_window(total_results: usize, offset: usize, page_size: usize) -> Option<PageWindow> {
    if page_size == 0 || total_results <= page_size {
        return None;
    }

    let total_pages = total_results.div_ceil(page_size);
    let current_page = (offset / page_size + 1).clamp(1, total_pages);

    let mut items = Vec::new();
    for page in 1..=total_pages {
        let visible = page == 1
            || page == total_pages
            || page.abs_diff(current_page) <= 1;

        if visible {
            items.push(PageItem::Page(page));
        } else if items.last() != Some(&PageItem::Ellipsis) {
            items.push(PageItem::Ellipsis);
        }
    }

    Some(PageWindow {
        current_page,
        total_pages,
        items,
    })
}

/// Offset of the first result on the given 1-based page.
pub fn offset_for_page(page: usize, page_size: usize) -> usize {
    page.saturating_sub(1) * page_size
}
