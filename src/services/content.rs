//! Paginated content lists shared by the dashboard and the public API.

use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::routes::check_role;

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::ContentKind;
use crate::domain::announcement::Announcement;
use crate::domain::article::Article;
use crate::domain::event::Event;
use crate::domain::news::News;
use crate::dto::content::ListPageData;
use crate::dto::main::{ContentSummary, DashboardData};
use crate::fetcher::{PageFetcher, RetryPolicy};
use crate::pagination::{PageRequest, PaginationSettings, PaginationState};
use crate::repository::{ListOrder, RangeQuery, RangeReader, SettingsReader};
use crate::screen::ListScreen;
use crate::services::{ServiceError, ServiceResult};

/// Loads the page named by `raw_query` (`page`, `size`, `width`).
///
/// Fetch failures do not fail the call; they are reported through
/// [`crate::screen::ListView::Failed`] so the page can offer a retry.
pub fn fetch_list<T, R>(
    repo: &R,
    kind: ContentKind,
    raw_query: &str,
    settings: &PaginationSettings,
    retry: RetryPolicy,
) -> ListPageData<T>
where
    R: RangeReader<T> + ?Sized,
{
    let state = PaginationState::from_query(raw_query, settings);
    let fetcher = PageFetcher::new(repo, retry, settings.order);

    let mut screen = ListScreen::mount(state);
    screen.load(&fetcher);

    let page = screen.state().page_index();
    let page_size = screen.state().page_size();
    let query = screen.state().query_for(page);

    ListPageData {
        kind,
        page,
        page_size,
        query,
        view: screen.into_view(),
    }
}

/// Loads a content list for the dashboard.
pub fn load_list_page<T, R>(
    repo: &R,
    user: &AuthenticatedUser,
    kind: ContentKind,
    raw_query: &str,
    settings: &PaginationSettings,
    retry: RetryPolicy,
) -> ServiceResult<ListPageData<T>>
where
    R: RangeReader<T> + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    Ok(fetch_list(repo, kind, raw_query, settings, retry))
}

fn count_rows<T, R>(repo: &R) -> ServiceResult<usize>
where
    R: RangeReader<T> + ?Sized,
{
    let request = PageRequest::new(0, 1).map_err(|e| ServiceError::Internal(e.to_string()))?;
    let (total, _) = repo
        .fetch_range(&RangeQuery::new(request, ListOrder::IdAscending))
        .map_err(|err| {
            log::error!("Failed to count rows: {err}");
            err
        })?;
    Ok(total)
}

/// Row counts of every content table plus the current site settings.
pub fn load_dashboard<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<DashboardData>
where
    R: RangeReader<Announcement>
        + RangeReader<Article>
        + RangeReader<News>
        + RangeReader<Event>
        + SettingsReader
        + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let mut sections = Vec::with_capacity(ContentKind::ALL.len());
    for kind in ContentKind::ALL {
        let total_count = match kind {
            ContentKind::Announcements => count_rows::<Announcement, R>(repo)?,
            ContentKind::Articles => count_rows::<Article, R>(repo)?,
            ContentKind::News => count_rows::<News, R>(repo)?,
            ContentKind::Events => count_rows::<Event, R>(repo)?,
        };
        sections.push(ContentSummary {
            kind,
            slug: kind.slug(),
            title: kind.title(),
            total_count,
        });
    }

    let settings = repo.get_site_settings().map_err(|err| {
        log::error!("Failed to load site settings: {err}");
        err
    })?;

    Ok(DashboardData { sections, settings })
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::repository::errors::{RepositoryError, RepositoryResult};
    use crate::screen::ListView;

    struct Numbers {
        total: usize,
        fail: bool,
        calls: Cell<usize>,
    }

    impl RangeReader<usize> for Numbers {
        fn fetch_range(&self, query: &RangeQuery) -> RepositoryResult<(usize, Vec<usize>)> {
            self.calls.set(self.calls.get() + 1);
            if self.fail {
                return Err(RepositoryError::ConnectionError("refused".into()));
            }
            Ok((
                self.total,
                (query.start..=query.end).filter(|n| *n < self.total).collect(),
            ))
        }
    }

    fn numbers(total: usize) -> Numbers {
        Numbers {
            total,
            fail: false,
            calls: Cell::new(0),
        }
    }

    fn user(roles: &[&str]) -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "1".to_string(),
            email: "editor@example.com".to_string(),
            hub_id: 1,
            name: "Editor".to_string(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
            exp: 0,
        }
    }

    fn settings(size: usize) -> PaginationSettings {
        PaginationSettings {
            default_page_size: size,
            ..PaginationSettings::default()
        }
    }

    #[test]
    fn lists_requested_page() {
        let repo = numbers(10);
        let data: ListPageData<usize> = fetch_list(
            &repo,
            ContentKind::News,
            "page=2",
            &settings(4),
            RetryPolicy::no_retry(),
        );

        assert_eq!(data.page, 2);
        match data.view {
            ListView::Loaded(page) => {
                assert_eq!(page.items, vec![8, 9]);
                assert_eq!(page.total_pages, 3);
                assert!(page.next_query.is_none());
            }
            other => panic!("unexpected view {other:?}"),
        }
    }

    #[test]
    fn negative_page_is_coerced_to_first() {
        let repo = numbers(10);
        let data: ListPageData<usize> = fetch_list(
            &repo,
            ContentKind::Articles,
            "page=-3",
            &settings(4),
            RetryPolicy::no_retry(),
        );

        assert_eq!(data.page, 0);
        assert!(matches!(data.view, ListView::Loaded(ref p) if p.items == vec![0, 1, 2, 3]));
    }

    #[test]
    fn width_picks_layout_page_size() {
        let repo = numbers(20);
        let data: ListPageData<usize> = fetch_list(
            &repo,
            ContentKind::Events,
            "width=1280",
            &settings(10),
            RetryPolicy::no_retry(),
        );
        assert_eq!(data.page_size, 9);
    }

    #[test]
    fn backend_failure_becomes_failed_view() {
        let repo = Numbers {
            total: 0,
            fail: true,
            calls: Cell::new(0),
        };
        let data: ListPageData<usize> = fetch_list(
            &repo,
            ContentKind::Announcements,
            "",
            &settings(4),
            RetryPolicy::no_retry(),
        );

        assert!(matches!(data.view, ListView::Failed { retryable: true, .. }));
        assert_eq!(repo.calls.get(), 1);
    }

    #[test]
    fn reload_query_keeps_custom_size() {
        let repo = Numbers {
            total: 0,
            fail: true,
            calls: Cell::new(0),
        };
        let data: ListPageData<usize> = fetch_list(
            &repo,
            ContentKind::News,
            "page=3&size=20",
            &settings(4),
            RetryPolicy::no_retry(),
        );

        assert_eq!(data.query, "?page=3&size=20");
    }

    #[test]
    fn list_page_requires_access_role() {
        let repo = numbers(3);
        let result: ServiceResult<ListPageData<usize>> = load_list_page(
            &repo,
            &user(&["billing"]),
            ContentKind::News,
            "",
            &settings(4),
            RetryPolicy::no_retry(),
        );

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
        assert_eq!(repo.calls.get(), 0);
    }

    #[test]
    fn list_page_for_viewer() {
        let repo = numbers(3);
        let data: ListPageData<usize> = load_list_page(
            &repo,
            &user(&[SERVICE_ACCESS_ROLE]),
            ContentKind::News,
            "",
            &settings(4),
            RetryPolicy::no_retry(),
        )
        .unwrap();

        assert!(matches!(data.view, ListView::Loaded(ref p) if p.total_count == 3));
    }
}
