//! Site-wide switches edited from the dashboard.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Singleton settings row. While `maintenance` is on the public site shows
/// `message` instead of content.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SiteSettings {
    pub maintenance: bool,
    pub message: Option<String>,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct UpdateSiteSettings {
    pub maintenance: bool,
    pub message: Option<String>,
}

impl UpdateSiteSettings {
    #[must_use]
    pub fn new(maintenance: bool, message: Option<String>) -> Self {
        Self {
            maintenance,
            message: message
                .map(|s| ammonia::clean(s.trim()))
                .filter(|s| !s.is_empty()),
        }
    }
}
