//! Site settings and the maintenance switch.

use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::routes::check_role;
use validator::Validate;

use crate::SERVICE_ADMIN_ROLE;
use crate::domain::settings::{SiteSettings, UpdateSiteSettings};
use crate::dto::api::MaintenanceStatus;
use crate::forms::settings::SiteSettingsForm;
use crate::repository::{SettingsReader, SettingsWriter};
use crate::services::{ServiceError, ServiceResult};

pub fn load_settings<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<SiteSettings>
where
    R: SettingsReader + ?Sized,
{
    if !check_role(SERVICE_ADMIN_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    Ok(repo.get_site_settings().map_err(|err| {
        log::error!("Failed to load site settings: {err}");
        err
    })?)
}

pub fn save_settings<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: SiteSettingsForm,
) -> ServiceResult<SiteSettings>
where
    R: SettingsWriter + ?Sized,
{
    if !check_role(SERVICE_ADMIN_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    if let Err(err) = form.validate() {
        log::error!("Failed to validate settings form: {err}");
        return Err(ServiceError::Form("Maintenance message is too long".to_string()));
    }

    let updates = UpdateSiteSettings::from(form);
    let saved = repo.update_site_settings(&updates).map_err(|err| {
        log::error!("Failed to save site settings: {err}");
        err
    })?;
    log::info!(
        "Maintenance mode {} by {}",
        if saved.maintenance { "enabled" } else { "disabled" },
        user.email
    );
    Ok(saved)
}

/// Public view of the maintenance switch. No role required.
pub fn maintenance_status<R>(repo: &R) -> ServiceResult<MaintenanceStatus>
where
    R: SettingsReader + ?Sized,
{
    let settings = repo.get_site_settings().map_err(|err| {
        log::error!("Failed to read maintenance status: {err}");
        err
    })?;
    Ok(settings.into())
}
