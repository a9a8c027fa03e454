//! List screen: one pagination state, the view of the latest page, and a
//! sequence guard so a slow response for an old page never overwrites a
//! newer one.

use std::time::Duration;

use serde::Serialize;

use crate::fetcher::{FetchError, PageFetcher};
use crate::pagination::{Navigation, PageRequest, PageResult, Paginated, PaginationState, RangeError};
use crate::repository::RangeReader;

/// What the list area currently shows.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ListView<T> {
    Loading,
    Loaded(Paginated<T>),
    /// The table has no rows; controls are hidden.
    Empty,
    Failed { message: String, retryable: bool },
}

impl<T> ListView<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ListView::Loading)
    }
}

/// Identifies one issued fetch. Only the newest ticket may update the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    pub request: PageRequest,
}

#[derive(Debug)]
pub struct ListScreen<T> {
    state: PaginationState,
    view: ListView<T>,
    latest_seq: u64,
    mounted: bool,
}

impl<T> ListScreen<T> {
    /// Mounts the screen with a state usually built from the URL.
    pub fn mount(state: PaginationState) -> Self {
        Self {
            state,
            view: ListView::Loading,
            latest_seq: 0,
            mounted: true,
        }
    }

    pub fn state(&self) -> &PaginationState {
        &self.state
    }

    pub fn view(&self) -> &ListView<T> {
        &self.view
    }

    pub fn into_view(self) -> ListView<T> {
        self.view
    }

    /// Issues a ticket for the current page and shows the loading state.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.latest_seq += 1;
        self.view = ListView::Loading;
        FetchTicket {
            seq: self.latest_seq,
            request: self.state.request(),
        }
    }

    fn navigated(&mut self, navigation: Option<Navigation>) -> Option<(Navigation, FetchTicket)> {
        let navigation = navigation?;
        let ticket = self.begin_fetch();
        Some((navigation, ticket))
    }

    /// Commits page `n` and asks for its rows.
    ///
    /// The index is committed here, before any fetch completes, so a failed
    /// fetch still leaves the screen on a coherent page.
    pub fn go_to(&mut self, n: usize) -> Result<Option<(Navigation, FetchTicket)>, RangeError> {
        let navigation = self.state.go_to(n)?;
        Ok(self.navigated(navigation))
    }

    pub fn next(&mut self) -> Option<(Navigation, FetchTicket)> {
        let navigation = self.state.next();
        self.navigated(navigation)
    }

    pub fn prev(&mut self) -> Option<(Navigation, FetchTicket)> {
        let navigation = self.state.prev();
        self.navigated(navigation)
    }

    /// Applies the outcome of a fetch.
    ///
    /// Returns `false` and leaves the screen untouched when the ticket was
    /// superseded by a newer fetch or the screen has been unmounted.
    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        result: Result<PageResult<T>, FetchError>,
    ) -> bool {
        if !self.mounted {
            log::debug!("Dropping page {} fetched after unmount", ticket.request.index());
            return false;
        }
        if ticket.seq != self.latest_seq {
            log::debug!(
                "Dropping stale page {} (request #{}, latest #{})",
                ticket.request.index(),
                ticket.seq,
                self.latest_seq
            );
            return false;
        }

        self.view = match result {
            Ok(page) => {
                self.state.set_total_count(page.total_count);
                if page.is_empty() {
                    ListView::Empty
                } else {
                    ListView::Loaded(Paginated::new(page, &self.state))
                }
            }
            Err(err) => ListView::Failed {
                message: err.user_message().to_string(),
                retryable: err.is_transient(),
            },
        };
        true
    }

    /// Fetches the current page and applies the result.
    pub fn load<R, S>(&mut self, fetcher: &PageFetcher<'_, R, S>) -> &ListView<T>
    where
        R: RangeReader<T> + ?Sized,
        S: Fn(Duration),
    {
        let ticket = self.begin_fetch();
        let result = fetcher.fetch_page(ticket.request);
        self.complete(ticket, result);
        &self.view
    }

    /// Abandons the screen; in-flight fetches can no longer change it.
    pub fn unmount(&mut self) {
        self.mounted = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::errors::RepositoryError;

    fn page(items: Vec<u32>, total_count: usize) -> Result<PageResult<u32>, FetchError> {
        Ok(PageResult { items, total_count })
    }

    fn screen() -> ListScreen<u32> {
        ListScreen::mount(PaginationState::new(0, 4, 4).unwrap())
    }

    #[test]
    fn first_load_shows_rows() {
        let mut screen = screen();
        let ticket = screen.begin_fetch();
        assert!(screen.view().is_loading());

        assert!(screen.complete(ticket, page(vec![1, 2, 3, 4], 10)));
        match screen.view() {
            ListView::Loaded(page) => {
                assert_eq!(page.items, vec![1, 2, 3, 4]);
                assert_eq!(page.total_pages, 3);
            }
            other => panic!("unexpected view {other:?}"),
        }
        assert_eq!(screen.state().total_pages(), Some(3));
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut screen = screen();
        let initial = screen.begin_fetch();
        screen.complete(initial, page(vec![1, 2, 3, 4], 10));

        let (_, slow) = screen.go_to(1).unwrap().unwrap();
        let (_, fast) = screen.go_to(2).unwrap().unwrap();

        assert!(screen.complete(fast, page(vec![9, 10], 10)));
        assert!(!screen.complete(slow, page(vec![5, 6, 7, 8], 10)));

        assert_eq!(screen.state().page_index(), 2);
        match screen.view() {
            ListView::Loaded(page) => assert_eq!(page.items, vec![9, 10]),
            other => panic!("unexpected view {other:?}"),
        }
    }

    #[test]
    fn completion_after_unmount_is_ignored() {
        let mut screen = screen();
        let ticket = screen.begin_fetch();
        screen.unmount();

        assert!(!screen.complete(ticket, page(vec![1], 1)));
        assert!(screen.view().is_loading());
    }

    #[test]
    fn empty_table_shows_empty_state() {
        let mut screen = screen();
        let ticket = screen.begin_fetch();
        screen.complete(ticket, page(Vec::new(), 0));

        assert!(matches!(screen.view(), ListView::Empty));
        assert!(screen.next().is_none());
    }

    #[test]
    fn failed_fetch_keeps_committed_page() {
        let mut screen = screen();
        let ticket = screen.begin_fetch();
        screen.complete(ticket, page(vec![1, 2, 3, 4], 10));

        let (_, ticket) = screen.next().unwrap();
        let failed = screen.complete(
            ticket,
            Err(FetchError::Transient {
                attempts: 3,
                source: RepositoryError::ConnectionError("reset".into()),
            }),
        );

        assert!(failed);
        assert_eq!(screen.state().page_index(), 1);
        match screen.view() {
            ListView::Failed { retryable, .. } => assert!(*retryable),
            other => panic!("unexpected view {other:?}"),
        }
    }

    #[test]
    fn going_to_current_page_issues_no_fetch() {
        let mut screen = screen();
        let ticket = screen.begin_fetch();
        screen.complete(ticket, page(vec![1, 2, 3, 4], 10));

        assert!(screen.go_to(0).unwrap().is_none());
        assert!(!screen.view().is_loading());
    }
}
