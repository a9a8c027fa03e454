use serde::Serialize;

use crate::domain::ContentKind;
use crate::domain::settings::SiteSettings;

/// Row count of one content table on the dashboard.
#[derive(Debug, Serialize)]
pub struct ContentSummary {
    pub kind: ContentKind,
    pub slug: &'static str,
    pub title: &'static str,
    pub total_count: usize,
}

/// Data required to render the dashboard.
#[derive(Debug, Serialize)]
pub struct DashboardData {
    pub sections: Vec<ContentSummary>,
    pub settings: SiteSettings,
}
