//! Diesel model for the singleton `site_settings` row.

use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;

use crate::domain::settings::{
    SiteSettings as DomainSiteSettings, UpdateSiteSettings as DomainUpdateSiteSettings,
};

/// Primary key of the only settings row.
pub const SETTINGS_ROW_ID: i32 = 1;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::site_settings)]
pub struct SiteSettings {
    pub id: i32,
    pub maintenance: bool,
    pub message: Option<String>,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset, Insertable)]
#[diesel(table_name = crate::schema::site_settings)]
#[diesel(treat_none_as_null = true)]
pub struct UpsertSiteSettings<'a> {
    pub id: i32,
    pub maintenance: bool,
    pub message: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

impl From<SiteSettings> for DomainSiteSettings {
    fn from(row: SiteSettings) -> Self {
        Self {
            maintenance: row.maintenance,
            message: row.message,
            updated_at: row.updated_at,
        }
    }
}

impl<'a> From<&'a DomainUpdateSiteSettings> for UpsertSiteSettings<'a> {
    fn from(updates: &'a DomainUpdateSiteSettings) -> Self {
        Self {
            id: SETTINGS_ROW_ID,
            maintenance: updates.maintenance,
            message: updates.message.as_deref(),
            updated_at: Utc::now().naive_utc(),
        }
    }
}
