use std::cell::{Cell, RefCell};
use std::time::Duration;

use pushkind_content::domain::announcement::{Announcement, NewAnnouncement};
use pushkind_content::fetcher::{PageFetcher, RetryPolicy};
use pushkind_content::pagination::{Effect, PaginationSettings, PaginationState};
use pushkind_content::repository::errors::{RepositoryError, RepositoryResult};
use pushkind_content::repository::{
    AnnouncementWriter, DieselRepository, ListOrder, RangeQuery, RangeReader,
};
use pushkind_content::screen::{ListScreen, ListView};

mod common;

fn seeded_repo(test_db: &common::TestDb, count: usize) -> DieselRepository {
    let repo = DieselRepository::new(test_db.pool());
    for n in 1..=count {
        let new = NewAnnouncement::try_new(format!("Notice {n}"), "", None).unwrap();
        repo.create_announcement(&new).unwrap();
    }
    repo
}

fn settings(page_size: usize) -> PaginationSettings {
    PaginationSettings {
        default_page_size: page_size,
        max_page_size: 50,
        order: ListOrder::IdAscending,
    }
}

fn titles(view: &ListView<Announcement>) -> Vec<String> {
    match view {
        ListView::Loaded(page) => page.items.iter().map(|a| a.title.to_string()).collect(),
        other => panic!("expected loaded view, got {other:?}"),
    }
}

/// Fails the first `failures` reads with a lost connection.
struct Flaky {
    inner: DieselRepository,
    failures: Cell<usize>,
    calls: Cell<usize>,
}

impl RangeReader<Announcement> for Flaky {
    fn fetch_range(&self, query: &RangeQuery) -> RepositoryResult<(usize, Vec<Announcement>)> {
        self.calls.set(self.calls.get() + 1);
        if self.failures.get() > 0 {
            self.failures.set(self.failures.get() - 1);
            return Err(RepositoryError::ConnectionError("connection reset".into()));
        }
        self.inner.fetch_range(query)
    }
}

#[test]
fn ten_rows_in_pages_of_four() {
    let test_db = common::TestDb::new("ten_rows_in_pages_of_four.db");
    let repo = seeded_repo(&test_db, 10);
    let settings = settings(4);
    let fetcher = PageFetcher::new(&repo, RetryPolicy::no_retry(), settings.order);

    let mut screen: ListScreen<Announcement> =
        ListScreen::mount(PaginationState::from_query("", &settings));
    screen.load(&fetcher);

    assert_eq!(screen.state().total_pages(), Some(3));
    assert_eq!(
        titles(screen.view()),
        vec!["Notice 1", "Notice 2", "Notice 3", "Notice 4"]
    );

    let (navigation, ticket) = screen.go_to(2).unwrap().unwrap();
    assert_eq!(
        navigation.effects()[0],
        Effect::UpdateUrl("?page=2".to_string())
    );
    let result = fetcher.fetch_page::<Announcement>(ticket.request);
    assert!(screen.complete(ticket, result));

    assert_eq!(titles(screen.view()), vec!["Notice 9", "Notice 10"]);
    assert!(screen.next().is_none());
    assert!(screen.go_to(3).is_err());
}

#[test]
fn empty_table_hides_controls() {
    let test_db = common::TestDb::new("empty_table_hides_controls.db");
    let repo = seeded_repo(&test_db, 0);
    let settings = settings(4);
    let fetcher = PageFetcher::new(&repo, RetryPolicy::no_retry(), settings.order);

    let mut screen: ListScreen<Announcement> =
        ListScreen::mount(PaginationState::from_query("page=0", &settings));
    screen.load(&fetcher);

    assert!(matches!(screen.view(), ListView::Empty));
    assert_eq!(screen.state().total_pages(), Some(0));
    assert!(!screen.state().has_next());
    assert!(!screen.state().has_prev());
}

#[test]
fn two_transient_failures_then_data() {
    let test_db = common::TestDb::new("two_transient_failures_then_data.db");
    let repo = Flaky {
        inner: seeded_repo(&test_db, 10),
        failures: Cell::new(2),
        calls: Cell::new(0),
    };
    let settings = settings(4);
    let sleeps = RefCell::new(Vec::new());
    let fetcher = PageFetcher::new(&repo, RetryPolicy::default(), settings.order)
        .with_sleeper(|delay| sleeps.borrow_mut().push(delay));

    let mut screen: ListScreen<Announcement> =
        ListScreen::mount(PaginationState::from_query("", &settings));
    screen.load(&fetcher);

    assert_eq!(repo.calls.get(), 3);
    assert_eq!(titles(screen.view()).len(), 4);
    assert_eq!(
        *sleeps.borrow(),
        vec![Duration::from_secs(1), Duration::from_secs(2)]
    );
}

#[test]
fn negative_page_in_url_starts_at_first_page() {
    let test_db = common::TestDb::new("negative_page_in_url_starts_at_first_page.db");
    let repo = seeded_repo(&test_db, 10);
    let settings = settings(4);
    let fetcher = PageFetcher::new(&repo, RetryPolicy::no_retry(), settings.order);

    let state = PaginationState::from_query("page=-3", &settings);
    assert_eq!(state.page_index(), 0);

    let mut screen: ListScreen<Announcement> = ListScreen::mount(state);
    screen.load(&fetcher);
    assert_eq!(titles(screen.view())[0], "Notice 1");
}

#[test]
fn page_past_the_end_keeps_controls() {
    let test_db = common::TestDb::new("page_past_the_end_keeps_controls.db");
    let repo = seeded_repo(&test_db, 10);
    let settings = settings(4);
    let fetcher = PageFetcher::new(&repo, RetryPolicy::no_retry(), settings.order);

    let mut screen: ListScreen<Announcement> =
        ListScreen::mount(PaginationState::from_query("page=7", &settings));
    screen.load(&fetcher);

    match screen.view() {
        ListView::Loaded(page) => {
            assert!(page.items.is_empty());
            assert_eq!(page.total_pages, 3);
            assert!(page.prev_query.is_some());
        }
        other => panic!("expected loaded view, got {other:?}"),
    }
}

#[test]
fn page_beyond_signed_row_space_starts_at_first_page() {
    let test_db = common::TestDb::new("page_beyond_signed_row_space_starts_at_first_page.db");
    let repo = seeded_repo(&test_db, 10);
    let settings = settings(10);
    let fetcher = PageFetcher::new(&repo, RetryPolicy::no_retry(), settings.order);

    let huge = (i64::MAX as usize / 10) + 1;
    let state = PaginationState::from_query(&format!("page={huge}&size=10"), &settings);
    assert_eq!(state.page_index(), 0);

    let mut screen: ListScreen<Announcement> = ListScreen::mount(state);
    screen.load(&fetcher);

    match screen.view() {
        ListView::Loaded(page) => {
            assert_eq!(page.total_count, 10);
            assert_eq!(page.total_pages, 1);
            assert_eq!(page.items.len(), 10);
        }
        other => panic!("expected loaded view, got {other:?}"),
    }
}
