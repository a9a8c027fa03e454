//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::announcement::{Announcement, NewAnnouncement};
use crate::domain::article::{Article, NewArticle};
use crate::domain::event::{Event, NewEvent};
use crate::domain::news::{NewNews, News};
use crate::domain::settings::{SiteSettings, UpdateSiteSettings};
use crate::domain::types::{AnnouncementId, ArticleId, EventId, NewsId};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    AnnouncementReader, AnnouncementWriter, ArticleReader, ArticleWriter, EventReader,
    EventWriter, NewsReader, NewsWriter, SettingsReader, SettingsWriter,
};

mock! {
    pub Repository {}

    impl AnnouncementReader for Repository {
        fn get_announcement_by_id(&self, id: AnnouncementId) -> RepositoryResult<Option<Announcement>>;
    }

    impl AnnouncementWriter for Repository {
        fn create_announcement(&self, new: &NewAnnouncement) -> RepositoryResult<Announcement>;
        fn update_announcement(
            &self,
            id: AnnouncementId,
            updates: &NewAnnouncement,
        ) -> RepositoryResult<Announcement>;
        fn delete_announcement(&self, id: AnnouncementId) -> RepositoryResult<()>;
    }

    impl ArticleReader for Repository {
        fn get_article_by_id(&self, id: ArticleId) -> RepositoryResult<Option<Article>>;
    }

    impl ArticleWriter for Repository {
        fn create_article(&self, new: &NewArticle) -> RepositoryResult<Article>;
        fn update_article(&self, id: ArticleId, updates: &NewArticle) -> RepositoryResult<Article>;
        fn delete_article(&self, id: ArticleId) -> RepositoryResult<()>;
    }

    impl NewsReader for Repository {
        fn get_news_by_id(&self, id: NewsId) -> RepositoryResult<Option<News>>;
    }

    impl NewsWriter for Repository {
        fn create_news(&self, new: &NewNews) -> RepositoryResult<News>;
        fn update_news(&self, id: NewsId, updates: &NewNews) -> RepositoryResult<News>;
        fn delete_news(&self, id: NewsId) -> RepositoryResult<()>;
    }

    impl EventReader for Repository {
        fn get_event_by_id(&self, id: EventId) -> RepositoryResult<Option<Event>>;
    }

    impl EventWriter for Repository {
        fn create_event(&self, new: &NewEvent) -> RepositoryResult<Event>;
        fn update_event(&self, id: EventId, updates: &NewEvent) -> RepositoryResult<Event>;
        fn delete_event(&self, id: EventId) -> RepositoryResult<()>;
    }

    impl SettingsReader for Repository {
        fn get_site_settings(&self) -> RepositoryResult<SiteSettings>;
    }

    impl SettingsWriter for Repository {
        fn update_site_settings(&self, updates: &UpdateSiteSettings) -> RepositoryResult<SiteSettings>;
    }
}
