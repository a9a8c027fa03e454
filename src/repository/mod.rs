use serde::{Deserialize, Serialize};

use crate::db::{DbConnection, DbPool, get_connection};
use crate::domain::announcement::{Announcement, NewAnnouncement};
use crate::domain::article::{Article, NewArticle};
use crate::domain::event::{Event, NewEvent};
use crate::domain::news::{NewNews, News};
use crate::domain::settings::{SiteSettings, UpdateSiteSettings};
use crate::domain::types::{AnnouncementId, ArticleId, EventId, NewsId};
use crate::pagination::PageRequest;
use crate::repository::errors::RepositoryResult;

pub mod announcement;
pub mod article;
pub mod errors;
pub mod event;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod news;
pub mod settings;

/// Ordering clause of a range query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListOrder {
    /// Newest rows first (`created_at desc`).
    #[default]
    Latest,
    /// Creation order (`created_at asc`).
    Oldest,
    /// Stable primary-key order.
    IdAscending,
}

/// A zero-based, inclusive row range plus its ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeQuery {
    pub start: usize,
    pub end: usize,
    pub order: ListOrder,
}

impl RangeQuery {
    pub fn new(request: PageRequest, order: ListOrder) -> Self {
        let (start, end) = request.range();
        Self { start, end, order }
    }

    /// Row offset for the SQL `OFFSET` clause.
    ///
    /// `PageRequest` keeps ranges inside `i64`; an out-of-range start
    /// saturates so the read comes back empty instead of wrapping.
    pub fn offset(&self) -> i64 {
        i64::try_from(self.start).unwrap_or(i64::MAX)
    }

    pub fn limit(&self) -> i64 {
        i64::try_from(self.end.saturating_sub(self.start).saturating_add(1)).unwrap_or(i64::MAX)
    }
}

/// Bounded slice of one content table plus the table's exact row count.
///
/// This is the only read the list screens issue against the backend.
pub trait RangeReader<T> {
    fn fetch_range(&self, query: &RangeQuery) -> RepositoryResult<(usize, Vec<T>)>;
}

pub trait AnnouncementReader {
    fn get_announcement_by_id(&self, id: AnnouncementId) -> RepositoryResult<Option<Announcement>>;
}

pub trait AnnouncementWriter {
    fn create_announcement(&self, new: &NewAnnouncement) -> RepositoryResult<Announcement>;
    fn update_announcement(
        &self,
        id: AnnouncementId,
        updates: &NewAnnouncement,
    ) -> RepositoryResult<Announcement>;
    fn delete_announcement(&self, id: AnnouncementId) -> RepositoryResult<()>;
}

pub trait ArticleReader {
    fn get_article_by_id(&self, id: ArticleId) -> RepositoryResult<Option<Article>>;
}

pub trait ArticleWriter {
    fn create_article(&self, new: &NewArticle) -> RepositoryResult<Article>;
    fn update_article(&self, id: ArticleId, updates: &NewArticle) -> RepositoryResult<Article>;
    fn delete_article(&self, id: ArticleId) -> RepositoryResult<()>;
}

pub trait NewsReader {
    fn get_news_by_id(&self, id: NewsId) -> RepositoryResult<Option<News>>;
}

pub trait NewsWriter {
    fn create_news(&self, new: &NewNews) -> RepositoryResult<News>;
    fn update_news(&self, id: NewsId, updates: &NewNews) -> RepositoryResult<News>;
    fn delete_news(&self, id: NewsId) -> RepositoryResult<()>;
}

pub trait EventReader {
    fn get_event_by_id(&self, id: EventId) -> RepositoryResult<Option<Event>>;
}

pub trait EventWriter {
    fn create_event(&self, new: &NewEvent) -> RepositoryResult<Event>;
    fn update_event(&self, id: EventId, updates: &NewEvent) -> RepositoryResult<Event>;
    fn delete_event(&self, id: EventId) -> RepositoryResult<()>;
}

pub trait SettingsReader {
    fn get_site_settings(&self) -> RepositoryResult<SiteSettings>;
}

pub trait SettingsWriter {
    fn update_site_settings(&self, updates: &UpdateSiteSettings) -> RepositoryResult<SiteSettings>;
}

/// Diesel-backed repository shared by every handler.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_query_limit_and_offset() {
        let query = RangeQuery::new(PageRequest::new(2, 4).unwrap(), ListOrder::Latest);
        assert_eq!((query.start, query.end), (8, 11));
        assert_eq!(query.offset(), 8);
        assert_eq!(query.limit(), 4);
    }

    #[test]
    fn list_order_reads_snake_case() {
        let order: ListOrder = serde_json::from_str("\"id_ascending\"").unwrap();
        assert_eq!(order, ListOrder::IdAscending);
    }
}
