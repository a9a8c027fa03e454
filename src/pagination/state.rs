//! Pagination state of a list screen, synchronized with the `page` (and
//! optional `size`) URL query parameters.

use serde::Deserialize;

use crate::breakpoint::width_to_breakpoint;
use crate::pagination::{PageRequest, PaginationSettings, RangeError, total_pages};

/// Side effects a committed navigation asks the caller to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Push the query string onto the browser history.
    UpdateUrl(String),
    ScrollToTop,
    /// Load the given page.
    Refetch(PageRequest),
}

/// Outcome of a successful `go_to`/`next`/`prev`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub request: PageRequest,
    pub query: String,
}

impl Navigation {
    pub fn effects(&self) -> [Effect; 3] {
        [
            Effect::UpdateUrl(self.query.clone()),
            Effect::ScrollToTop,
            Effect::Refetch(self.request),
        ]
    }
}

/// Raw query parameters. Everything is read as text, and repeated keys are
/// collected, so that malformed values can be coerced instead of rejected.
#[derive(Debug, Default, Deserialize)]
struct RawPageQuery {
    #[serde(default)]
    page: Vec<String>,
    #[serde(default)]
    size: Vec<String>,
    #[serde(default)]
    width: Vec<String>,
}

impl RawPageQuery {
    fn parse(raw_query: &str) -> Self {
        serde_html_form::from_str(raw_query).unwrap_or_else(|err| {
            log::warn!("Ignoring malformed page query {raw_query:?}: {err}");
            Self::default()
        })
    }
}

/// First value of a parameter that reads as a non-negative integer.
fn parse_usize(values: &[String]) -> Option<usize> {
    values.iter().find_map(|v| v.trim().parse::<usize>().ok())
}

/// Current page index and size of one list screen.
///
/// The state has a single shape, `Idle(page_index)`; loading and failure
/// belong to whoever performs the fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationState {
    page_index: usize,
    page_size: usize,
    default_size: usize,
    total_pages: Option<usize>,
}

impl PaginationState {
    pub fn new(page_index: usize, page_size: usize, default_size: usize) -> Result<Self, RangeError> {
        PageRequest::new(page_index, page_size)?;
        if default_size == 0 {
            return Err(RangeError::NonPositiveSize);
        }
        Ok(Self {
            page_index,
            page_size,
            default_size,
            total_pages: None,
        })
    }

    /// Builds the initial state from a raw URL query such as `page=2&size=20`.
    ///
    /// A missing, non-numeric or negative `page` becomes `0`. A missing or
    /// invalid `size` falls back to the page size of the `width` breakpoint
    /// when given, then to the configured default; it is capped at the
    /// configured maximum.
    pub fn from_query(raw_query: &str, settings: &PaginationSettings) -> Self {
        let raw = RawPageQuery::parse(raw_query);

        let default_size = settings.default_page_size.max(1);
        let max_size = settings.max_page_size.max(default_size);

        let page_size = parse_usize(&raw.size)
            .filter(|size| *size > 0)
            .or_else(|| {
                parse_usize(&raw.width).map(|px| width_to_breakpoint(px).page_size())
            })
            .unwrap_or(default_size)
            .min(max_size);

        let page_index = parse_usize(&raw.page)
            .filter(|page| PageRequest::new(*page, page_size).is_ok())
            .unwrap_or(0);

        Self {
            page_index,
            page_size,
            default_size,
            total_pages: None,
        }
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// `None` until the first successful fetch reports a count.
    pub fn total_pages(&self) -> Option<usize> {
        self.total_pages
    }

    pub fn request(&self) -> PageRequest {
        PageRequest {
            index: self.page_index,
            size: self.page_size,
        }
    }

    /// Records the count reported by a fetch. Never moves the page index.
    pub fn set_total_count(&mut self, total_count: usize) {
        self.total_pages = Some(total_pages(total_count, self.page_size));
    }

    /// Query string that deep-links to `page` with the current size.
    pub fn query_for(&self, page: usize) -> String {
        if self.page_size == self.default_size {
            format!("?page={page}")
        } else {
            format!("?page={page}&size={}", self.page_size)
        }
    }

    pub fn has_prev(&self) -> bool {
        self.page_index > 0
    }

    pub fn has_next(&self) -> bool {
        match self.total_pages {
            Some(total) => self.page_index + 1 < total,
            None => true,
        }
    }

    /// Moves to page `n`.
    ///
    /// Returns `Ok(None)` when `n` is already the current page, and an
    /// error without touching the state when `n` is past the last known page.
    pub fn go_to(&mut self, n: usize) -> Result<Option<Navigation>, RangeError> {
        if n == self.page_index {
            return Ok(None);
        }

        match self.total_pages {
            Some(total_pages) if n >= total_pages => {
                return Err(RangeError::OutOfRange {
                    page: n,
                    total_pages,
                });
            }
            _ => {}
        }

        let request = PageRequest::new(n, self.page_size)?;

        self.page_index = n;
        Ok(Some(Navigation {
            request,
            query: self.query_for(n),
        }))
    }

    pub fn next(&mut self) -> Option<Navigation> {
        if !self.has_next() {
            return None;
        }
        self.go_to(self.page_index + 1).ok().flatten()
    }

    pub fn prev(&mut self) -> Option<Navigation> {
        if !self.has_prev() {
            return None;
        }
        let target = match self.total_pages {
            Some(0) => return None,
            Some(total) => (self.page_index - 1).min(total - 1),
            None => self.page_index - 1,
        };
        self.go_to(target).ok().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, MAX_ITEMS_PER_PAGE};

    fn settings() -> PaginationSettings {
        PaginationSettings::default()
    }

    #[test]
    fn missing_page_defaults_to_zero() {
        let state = PaginationState::from_query("", &settings());
        assert_eq!(state.page_index(), 0);
        assert_eq!(state.page_size(), DEFAULT_ITEMS_PER_PAGE);
        assert_eq!(state.total_pages(), None);
    }

    #[test]
    fn malformed_page_is_coerced_to_zero() {
        for raw in ["page=-3", "page=abc", "page=", "page=1.5", "page=%ZZ"] {
            let state = PaginationState::from_query(raw, &settings());
            assert_eq!(state.page_index(), 0, "query {raw}");
        }
    }

    #[test]
    fn page_and_size_are_read() {
        let state = PaginationState::from_query("page=3&size=25&q=ignored", &settings());
        assert_eq!(state.page_index(), 3);
        assert_eq!(state.page_size(), 25);
        assert_eq!(state.query_for(4), "?page=4&size=25");
    }

    #[test]
    fn size_is_capped_and_zero_falls_back() {
        let state = PaginationState::from_query("size=100000", &settings());
        assert_eq!(state.page_size(), MAX_ITEMS_PER_PAGE);

        let state = PaginationState::from_query("size=0", &settings());
        assert_eq!(state.page_size(), DEFAULT_ITEMS_PER_PAGE);
    }

    #[test]
    fn width_picks_breakpoint_page_size() {
        let state = PaginationState::from_query("width=375", &settings());
        assert_eq!(state.page_size(), 4);

        let state = PaginationState::from_query("width=375&size=12", &settings());
        assert_eq!(state.page_size(), 12);
    }

    #[test]
    fn go_to_current_page_is_a_no_op() {
        let mut state = PaginationState::new(2, 4, 4).unwrap();
        state.set_total_count(10);
        assert_eq!(state.go_to(2), Ok(None));
        assert_eq!(state.page_index(), 2);
    }

    #[test]
    fn go_to_current_page_past_the_end_is_a_no_op() {
        let mut state = PaginationState::from_query("page=40&size=4", &settings());
        state.set_total_count(10);
        assert_eq!(state.go_to(40), Ok(None));
        assert_eq!(state.page_index(), 40);
        assert!(state.go_to(41).is_err());
    }

    #[test]
    fn repeated_key_keeps_other_parameters() {
        let state = PaginationState::from_query("page=1&page=2&size=25", &settings());
        assert_eq!(state.page_index(), 1);
        assert_eq!(state.page_size(), 25);
    }

    #[test]
    fn go_to_emits_url_scroll_and_refetch() {
        let mut state = PaginationState::new(0, 4, 4).unwrap();
        state.set_total_count(10);

        let navigation = state.go_to(2).unwrap().unwrap();
        assert_eq!(state.page_index(), 2);
        assert_eq!(
            navigation.effects(),
            [
                Effect::UpdateUrl("?page=2".to_string()),
                Effect::ScrollToTop,
                Effect::Refetch(PageRequest::new(2, 4).unwrap()),
            ]
        );
    }

    #[test]
    fn go_to_past_last_page_is_rejected() {
        let mut state = PaginationState::new(0, 4, 4).unwrap();
        state.set_total_count(10);
        assert_eq!(
            state.go_to(3),
            Err(RangeError::OutOfRange {
                page: 3,
                total_pages: 3
            })
        );
        assert_eq!(state.page_index(), 0);
    }

    #[test]
    fn go_to_is_unbounded_before_first_count() {
        let mut state = PaginationState::new(0, 4, 4).unwrap();
        assert!(state.go_to(40).unwrap().is_some());
        assert_eq!(state.page_index(), 40);
    }

    #[test]
    fn prev_at_first_page_does_not_underflow() {
        let mut state = PaginationState::new(0, 4, 4).unwrap();
        state.set_total_count(10);
        assert!(state.prev().is_none());
        assert_eq!(state.page_index(), 0);
    }

    #[test]
    fn next_at_last_page_does_not_overflow() {
        let mut state = PaginationState::new(2, 4, 4).unwrap();
        state.set_total_count(10);
        assert!(state.next().is_none());
        assert_eq!(state.page_index(), 2);

        let navigation = state.prev().unwrap();
        assert_eq!(navigation.request.index(), 1);
    }

    #[test]
    fn empty_list_has_no_navigation() {
        let mut state = PaginationState::new(0, 4, 4).unwrap();
        state.set_total_count(0);
        assert_eq!(state.total_pages(), Some(0));
        assert!(state.next().is_none());
        assert!(state.prev().is_none());
    }
}
