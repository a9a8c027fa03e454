//! Remote page fetcher: one bounded range read plus the exact total count,
//! retried with capped exponential backoff while the backend reports
//! transient failures.

use std::time::Duration;

use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::pagination::{PageRequest, PageResult};
use crate::repository::errors::RepositoryError;
use crate::repository::{ListOrder, RangeQuery, RangeReader};

fn millis<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    u64::deserialize(deserializer).map(Duration::from_millis)
}

/// How often and how patiently a failed page read is repeated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Total attempts including the first one.
    pub max_attempts: u32,
    #[serde(rename = "base_delay_ms", deserialize_with = "millis")]
    pub base_delay: Duration,
    #[serde(rename = "max_delay_ms", deserialize_with = "millis")]
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    /// A policy that gives up after the first failure.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Delay before retry number `retry` (1-based): `base * 2^(retry-1)`,
    /// capped at `max_delay`.
    pub fn delay_for(&self, retry: u32) -> Duration {
        let exponent = retry.saturating_sub(1);
        2u32.checked_pow(exponent)
            .and_then(|factor| self.base_delay.checked_mul(factor))
            .map_or(self.max_delay, |delay| delay.min(self.max_delay))
    }

    fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("backend unavailable after {attempts} attempt(s): {source}")]
    Transient {
        attempts: u32,
        source: RepositoryError,
    },

    #[error("backend rejected the page request: {0}")]
    Permanent(#[source] RepositoryError),
}

impl FetchError {
    pub fn is_transient(&self) -> bool {
        matches!(self, FetchError::Transient { .. })
    }

    /// Message shown in place of the list.
    pub fn user_message(&self) -> &'static str {
        match self {
            FetchError::Transient { .. } => {
                "The content service is temporarily unavailable. Please try again."
            }
            FetchError::Permanent(_) => "This list could not be loaded.",
        }
    }
}

/// Reads pages through an injected repository.
pub struct PageFetcher<'a, R: ?Sized, S = fn(Duration)> {
    repo: &'a R,
    policy: RetryPolicy,
    order: ListOrder,
    sleep: S,
}

impl<'a, R: ?Sized> PageFetcher<'a, R> {
    pub fn new(repo: &'a R, policy: RetryPolicy, order: ListOrder) -> Self {
        Self {
            repo,
            policy,
            order,
            sleep: std::thread::sleep,
        }
    }
}

impl<'a, R: ?Sized, S> PageFetcher<'a, R, S>
where
    S: Fn(Duration),
{
    /// Replaces the function used to wait between attempts.
    pub fn with_sleeper<S2>(self, sleep: S2) -> PageFetcher<'a, R, S2>
    where
        S2: Fn(Duration),
    {
        PageFetcher {
            repo: self.repo,
            policy: self.policy,
            order: self.order,
            sleep,
        }
    }

    /// Fetches one page and the total row count.
    ///
    /// An empty page is a valid result, not an error.
    pub fn fetch_page<T>(&self, request: PageRequest) -> Result<PageResult<T>, FetchError>
    where
        R: RangeReader<T>,
    {
        let query = RangeQuery::new(request, self.order);
        let attempts = self.policy.attempts();
        let mut attempt = 1;

        loop {
            match self.repo.fetch_range(&query) {
                Ok((total, items)) => {
                    if attempt > 1 {
                        log::info!(
                            "Fetched rows {}..={} after {attempt} attempts",
                            query.start,
                            query.end
                        );
                    }
                    return Ok(PageResult::from_backend(items, total, request));
                }
                Err(err) if err.is_transient() && attempt < attempts => {
                    let delay = self.policy.delay_for(attempt);
                    log::warn!(
                        "Fetching rows {}..={} failed (attempt {attempt}/{attempts}): {err}; retrying in {delay:?}",
                        query.start,
                        query.end
                    );
                    (self.sleep)(delay);
                    attempt += 1;
                }
                Err(err) if err.is_transient() => {
                    log::error!("Giving up on rows {}..={}: {err}", query.start, query.end);
                    return Err(FetchError::Transient {
                        attempts: attempt,
                        source: err,
                    });
                }
                Err(err) => {
                    log::error!("Fetching rows {}..={} failed: {err}", query.start, query.end);
                    return Err(FetchError::Permanent(err));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use super::*;
    use crate::repository::errors::RepositoryResult;

    /// Serves rows `0..total` and fails the first `failures` calls.
    struct FlakyRepo {
        total: usize,
        failures: Cell<usize>,
        transient: bool,
        calls: Cell<usize>,
        seen: RefCell<Vec<RangeQuery>>,
    }

    impl FlakyRepo {
        fn new(total: usize, failures: usize, transient: bool) -> Self {
            Self {
                total,
                failures: Cell::new(failures),
                transient,
                calls: Cell::new(0),
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl RangeReader<usize> for FlakyRepo {
        fn fetch_range(&self, query: &RangeQuery) -> RepositoryResult<(usize, Vec<usize>)> {
            self.calls.set(self.calls.get() + 1);
            self.seen.borrow_mut().push(*query);
            if self.failures.get() > 0 {
                self.failures.set(self.failures.get() - 1);
                return Err(if self.transient {
                    RepositoryError::ConnectionError("connection reset".into())
                } else {
                    RepositoryError::ValidationError("bad column".into())
                });
            }
            let rows = (query.start..=query.end)
                .filter(|row| *row < self.total)
                .collect();
            Ok((self.total, rows))
        }
    }

    #[test]
    fn delays_double_and_cap() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(1), Duration::from_secs(1));
        assert_eq!(policy.delay_for(2), Duration::from_secs(2));
        assert_eq!(policy.delay_for(3), Duration::from_secs(4));
        assert_eq!(policy.delay_for(6), Duration::from_secs(30));
        assert_eq!(policy.delay_for(64), Duration::from_secs(30));
    }

    #[test]
    fn policy_reads_milliseconds() {
        let policy: RetryPolicy =
            serde_json::from_str(r#"{"max_attempts": 5, "base_delay_ms": 250}"#).unwrap();
        assert_eq!(policy.max_attempts, 5);
        assert_eq!(policy.base_delay, Duration::from_millis(250));
        assert_eq!(policy.max_delay, Duration::from_secs(30));
    }

    #[test]
    fn pages_report_items_and_total() {
        let repo = FlakyRepo::new(10, 0, true);
        let fetcher = PageFetcher::new(&repo, RetryPolicy::default(), ListOrder::Latest);

        let first = fetcher.fetch_page::<usize>(PageRequest::new(0, 4).unwrap()).unwrap();
        assert_eq!(first.items, vec![0, 1, 2, 3]);
        assert_eq!(first.total_count, 10);

        let last = fetcher.fetch_page::<usize>(PageRequest::new(2, 4).unwrap()).unwrap();
        assert_eq!(last.items, vec![8, 9]);
        assert_eq!(repo.seen.borrow()[1].order, ListOrder::Latest);
    }

    #[test]
    fn transient_failures_are_retried_with_backoff() {
        let repo = FlakyRepo::new(10, 2, true);
        let sleeps = RefCell::new(Vec::new());
        let fetcher = PageFetcher::new(&repo, RetryPolicy::default(), ListOrder::IdAscending)
            .with_sleeper(|d| sleeps.borrow_mut().push(d));

        let page = fetcher.fetch_page::<usize>(PageRequest::new(0, 4).unwrap()).unwrap();

        assert_eq!(page.items.len(), 4);
        assert_eq!(repo.calls.get(), 3);
        assert_eq!(
            *sleeps.borrow(),
            vec![Duration::from_secs(1), Duration::from_secs(2)]
        );
    }

    #[test]
    fn transient_failures_surface_after_max_attempts() {
        let repo = FlakyRepo::new(10, 5, true);
        let fetcher = PageFetcher::new(&repo, RetryPolicy::default(), ListOrder::Latest)
            .with_sleeper(|_| {});

        let err = fetcher
            .fetch_page::<usize>(PageRequest::new(0, 4).unwrap())
            .unwrap_err();

        assert!(err.is_transient());
        assert!(matches!(err, FetchError::Transient { attempts: 3, .. }));
        assert_eq!(repo.calls.get(), 3);
    }

    #[test]
    fn permanent_failures_are_not_retried() {
        let repo = FlakyRepo::new(10, 1, false);
        let sleeps = RefCell::new(Vec::new());
        let fetcher = PageFetcher::new(&repo, RetryPolicy::default(), ListOrder::Latest)
            .with_sleeper(|d| sleeps.borrow_mut().push(d));

        let err = fetcher
            .fetch_page::<usize>(PageRequest::new(0, 4).unwrap())
            .unwrap_err();

        assert!(matches!(err, FetchError::Permanent(_)));
        assert_eq!(repo.calls.get(), 1);
        assert!(sleeps.borrow().is_empty());
    }

    #[test]
    fn empty_table_is_not_an_error() {
        let repo = FlakyRepo::new(0, 0, true);
        let fetcher = PageFetcher::new(&repo, RetryPolicy::no_retry(), ListOrder::Latest);

        let page = fetcher.fetch_page::<usize>(PageRequest::new(0, 4).unwrap()).unwrap();
        assert!(page.is_empty());
        assert!(page.items.is_empty());
    }
}
