//! Repository implementation for the site settings row.

use diesel::prelude::*;

use crate::domain::settings::{SiteSettings, UpdateSiteSettings};
use crate::models::settings::{
    SETTINGS_ROW_ID, SiteSettings as DbSiteSettings, UpsertSiteSettings as DbUpsertSiteSettings,
};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, SettingsReader, SettingsWriter};

impl SettingsReader for DieselRepository {
    fn get_site_settings(&self) -> RepositoryResult<SiteSettings> {
        use crate::schema::site_settings;

        let mut conn = self.conn()?;
        let row = site_settings::table
            .find(SETTINGS_ROW_ID)
            .first::<DbSiteSettings>(&mut conn)?;

        Ok(row.into())
    }
}

impl SettingsWriter for DieselRepository {
    fn update_site_settings(&self, updates: &UpdateSiteSettings) -> RepositoryResult<SiteSettings> {
        use crate::schema::site_settings;

        let mut conn = self.conn()?;
        let upsert: DbUpsertSiteSettings = updates.into();

        let row = diesel::insert_into(site_settings::table)
            .values(&upsert)
            .on_conflict(site_settings::id)
            .do_update()
            .set(&upsert)
            .get_result::<DbSiteSettings>(&mut conn)?;

        Ok(row.into())
    }
}
