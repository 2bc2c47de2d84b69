// libntag/src/plan.rs

//! Pagination planner: split a tag's user memory into read windows no
//! larger than the transport allows.

use crate::constants::PAGE_SIZE;
use crate::types::PageWindow;
use crate::{Error, Result};

/// Ordered, contiguous, non-overlapping windows covering pages
/// `0..num_pages`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryPlan {
    num_pages: usize,
    windows: Vec<PageWindow>,
}

impl MemoryPlan {
    /// Pages covered
    pub fn num_pages(&self) -> usize {
        self.num_pages
    }

    /// Windows in read order
    pub fn windows(&self) -> &[PageWindow] {
        &self.windows
    }

    /// Number of windows
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    /// True when there is nothing to read
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Payload length a complete read of this plan produces.
    pub fn total_bytes(&self) -> usize {
        self.num_pages * PAGE_SIZE
    }

    /// Iterate windows in read order
    pub fn iter(&self) -> std::slice::Iter<'_, PageWindow> {
        self.windows.iter()
    }
}

impl<'a> IntoIterator for &'a MemoryPlan {
    type Item = &'a PageWindow;
    type IntoIter = std::slice::Iter<'a, PageWindow>;

    fn into_iter(self) -> Self::IntoIter {
        self.windows.iter()
    }
}

/// Lazily yields the windows of a plan.
pub struct WindowIterator {
    next_page: usize,
    num_pages: usize,
    max_window: usize,
}

impl WindowIterator {
    /// `max_window` must be non-zero; [`plan`] checks this.
    fn new(num_pages: usize, max_window: usize) -> Self {
        Self {
            next_page: 0,
            num_pages,
            max_window,
        }
    }
}

impl Iterator for WindowIterator {
    type Item = PageWindow;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_page >= self.num_pages {
            return None;
        }
        let remaining = self.num_pages - self.next_page;
        let span = remaining.min(self.max_window);
        let window = PageWindow::new(self.next_page, self.next_page + span - 1);
        self.next_page += span;
        Some(window)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.num_pages.saturating_sub(self.next_page);
        let n = remaining.div_ceil(self.max_window);
        (n, Some(n))
    }
}

/// Plan reads of `num_pages` pages in windows of at most `max_window`.
///
/// `num_pages == 0` yields an empty plan.
pub fn plan(num_pages: usize, max_window: usize) -> Result<MemoryPlan> {
    if max_window == 0 {
        return Err(Error::InvalidConfig(
            "max pages per transfer must be at least 1".into(),
        ));
    }
    Ok(MemoryPlan {
        num_pages,
        windows: WindowIterator::new(num_pages, max_window).collect(),
    })
}

/// Plan for a tag reporting `free_memory_bytes` of user memory. A trailing
/// partial page is not read.
pub fn plan_for_bytes(free_memory_bytes: usize, max_window: usize) -> Result<MemoryPlan> {
    plan(free_memory_bytes / PAGE_SIZE, max_window)
}
