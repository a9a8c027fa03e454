//! DTOs exposed by the public API endpoints.

use serde::Serialize;

use crate::domain::settings::SiteSettings;
use crate::dto::content::ListPageData;
use crate::screen::ListView;

/// Page of content returned by `/api/v1/{kind}`.
#[derive(Debug, Serialize)]
pub struct ApiPage<T> {
    pub items: Vec<T>,
    pub total_count: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

/// Body of an API failure.
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
    pub retryable: bool,
}

impl<T> TryFrom<ListPageData<T>> for ApiPage<T> {
    type Error = ApiError;

    fn try_from(data: ListPageData<T>) -> Result<Self, Self::Error> {
        match data.view {
            ListView::Loaded(page) => Ok(ApiPage {
                items: page.items,
                total_count: page.total_count,
                page: page.page,
                page_size: page.page_size,
                total_pages: page.total_pages,
            }),
            ListView::Empty | ListView::Loading => Ok(ApiPage {
                items: Vec::new(),
                total_count: 0,
                page: data.page,
                page_size: data.page_size,
                total_pages: 0,
            }),
            ListView::Failed { message, retryable } => Err(ApiError {
                error: message,
                retryable,
            }),
        }
    }
}

/// Maintenance switch as seen by the public site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MaintenanceStatus {
    pub maintenance: bool,
    pub message: Option<String>,
}

impl From<SiteSettings> for MaintenanceStatus {
    fn from(settings: SiteSettings) -> Self {
        Self {
            maintenance: settings.maintenance,
            message: settings.message,
        }
    }
}
