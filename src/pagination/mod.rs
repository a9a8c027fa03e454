//! Paginated list primitives: page requests, inclusive row ranges, page
//! results with an exact total count and the render-ready [`Paginated`] view.
//!
//! Page indices are zero-based everywhere, including the `page` URL
//! parameter. Templates add one when displaying a page number.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::repository::ListOrder;

pub mod state;

pub use state::{Effect, Navigation, PaginationState};

pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;
pub const MAX_ITEMS_PER_PAGE: usize = 100;

/// Errors produced when a page request or a navigation target is invalid.
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum RangeError {
    #[error("page size must be greater than zero")]
    NonPositiveSize,

    #[error("page index cannot be negative")]
    NegativeIndex,

    #[error("page range does not fit into the addressable row space")]
    Overflow,

    #[error("page {page} is outside of 0..{total_pages}")]
    OutOfRange { page: usize, total_pages: usize },
}

/// Computes the inclusive row range `[index*size, index*size + size - 1]`.
pub fn compute_range(index: i64, size: i64) -> Result<(usize, usize), RangeError> {
    if size <= 0 {
        return Err(RangeError::NonPositiveSize);
    }
    if index < 0 {
        return Err(RangeError::NegativeIndex);
    }

    let index = usize::try_from(index).map_err(|_| RangeError::Overflow)?;
    let size = usize::try_from(size).map_err(|_| RangeError::Overflow)?;
    checked_range(index, size)
}

fn checked_range(index: usize, size: usize) -> Result<(usize, usize), RangeError> {
    let start = index.checked_mul(size).ok_or(RangeError::Overflow)?;
    let end = start.checked_add(size - 1).ok_or(RangeError::Overflow)?;
    // SQL offsets and limits are signed 64-bit.
    if i64::try_from(end).is_err() {
        return Err(RangeError::Overflow);
    }
    Ok((start, end))
}

/// Number of pages needed to show `total_count` rows, `ceil(total / size)`.
pub fn total_pages(total_count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total_count.div_ceil(page_size)
}

/// A validated request for one page of an ordered result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PageRequest {
    index: usize,
    size: usize,
}

impl PageRequest {
    /// Builds a request, rejecting zero sizes and ranges that overflow.
    pub fn new(index: usize, size: usize) -> Result<Self, RangeError> {
        if size == 0 {
            return Err(RangeError::NonPositiveSize);
        }
        checked_range(index, size)?;
        Ok(Self { index, size })
    }

    pub const fn index(self) -> usize {
        self.index
    }

    pub const fn size(self) -> usize {
        self.size
    }

    /// Inclusive `(start, end)` row range. Validated on construction.
    pub const fn range(self) -> (usize, usize) {
        let start = self.index * self.size;
        (start, start + self.size - 1)
    }

    /// Zero-based row offset of the first item, `range().0`.
    pub const fn offset(self) -> usize {
        self.index * self.size
    }
}

/// One page of rows plus the exact number of rows across all pages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub total_count: usize,
}

impl<T> PageResult<T> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
        }
    }

    /// Wraps backend output, enforcing `items.len() <= size` and
    /// `total_count >= items.len()`.
    ///
    /// The count and the rows come from two statements, so a concurrent
    /// insert or delete can skew them; the page is corrected and a warning
    /// logged instead of failing the whole fetch.
    pub fn from_backend(mut items: Vec<T>, total_count: usize, request: PageRequest) -> Self {
        if items.len() > request.size() {
            log::warn!(
                "Backend returned {} rows for a page of {}, truncating",
                items.len(),
                request.size()
            );
            items.truncate(request.size());
        }

        let minimum = request.offset().saturating_add(items.len());
        let total_count = if items.is_empty() || total_count >= minimum {
            total_count
        } else {
            log::warn!("Backend count {total_count} is below the rows seen ({minimum}), adjusting");
            minimum
        };

        Self { items, total_count }
    }

    pub fn is_empty(&self) -> bool {
        self.total_count == 0
    }
}

/// List sizing and ordering loaded from the `pagination` config section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PaginationSettings {
    pub default_page_size: usize,
    pub max_page_size: usize,
    pub order: ListOrder,
}

impl Default for PaginationSettings {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_ITEMS_PER_PAGE,
            max_page_size: MAX_ITEMS_PER_PAGE,
            order: ListOrder::Latest,
        }
    }
}

/// Returns 1-based page numbers with `None` marking skipped ranges.
fn get_pages(
    total_pages: usize,
    current_page: usize,
    left_edge: usize,
    left_current: usize,
    right_current: usize,
    right_edge: usize,
) -> Vec<Option<usize>> {
    let last_page = total_pages;

    if last_page == 0 {
        return vec![];
    }

    let mut pages = Vec::new();

    let left_end = (1 + left_edge).min(last_page + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = (current_page + right_current + 1).min(last_page + 1);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(right_edge) + 1);

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}

/// A clickable page control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageLink {
    pub index: usize,
    pub label: usize,
    pub query: String,
    pub current: bool,
}

/// Everything a list template needs: rows, counts and page controls.
#[derive(Debug, Clone, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pages: Vec<Option<PageLink>>,
    pub page: usize,
    pub page_size: usize,
    pub total_count: usize,
    pub total_pages: usize,
    pub prev_query: Option<String>,
    pub next_query: Option<String>,
}

impl<T> Paginated<T> {
    pub fn new(result: PageResult<T>, state: &PaginationState) -> Self {
        let page = state.page_index();
        let total_pages = total_pages(result.total_count, state.page_size());

        let pages = get_pages(total_pages, page + 1, 2, 2, 4, 2)
            .into_iter()
            .map(|label| {
                label.map(|label| PageLink {
                    index: label - 1,
                    label,
                    query: state.query_for(label - 1),
                    current: label - 1 == page,
                })
            })
            .collect();

        let prev_query = (page > 0 && total_pages > 0)
            .then(|| state.query_for((page - 1).min(total_pages - 1)));
        let next_query = (page + 1 < total_pages).then(|| state.query_for(page + 1));

        Self {
            items: result.items,
            pages,
            page,
            page_size: state.page_size(),
            total_count: result.total_count,
            total_pages,
            prev_query,
            next_query,
        }
    }

    /// No rows at all; the list shows its empty state and hides controls.
    pub fn is_empty(&self) -> bool {
        self.total_count == 0
    }
}
