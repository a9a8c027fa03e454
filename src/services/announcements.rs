//! Announcement editing workflows.

use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::routes::check_role;

use crate::SERVICE_ADMIN_ROLE;
use crate::domain::announcement::{Announcement, NewAnnouncement};
use crate::domain::types::AnnouncementId;
use crate::forms::announcements::AnnouncementForm;
use crate::repository::{AnnouncementReader, AnnouncementWriter};
use crate::services::{ServiceError, ServiceResult};

fn payload(form: AnnouncementForm) -> ServiceResult<NewAnnouncement> {
    NewAnnouncement::try_from(form).map_err(|err| {
        log::error!("Failed to validate announcement form: {err}");
        ServiceError::Form(format!("Invalid announcement: {err}"))
    })
}

/// Loads one announcement for the edit page.
pub fn load_announcement<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
) -> ServiceResult<Announcement>
where
    R: AnnouncementReader + ?Sized,
{
    if !check_role(SERVICE_ADMIN_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let id = AnnouncementId::new(id)?;
    repo.get_announcement_by_id(id)
        .map_err(|err| {
            log::error!("Failed to load announcement {id}: {err}");
            err
        })?
        .ok_or(ServiceError::NotFound)
}

pub fn create_announcement<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AnnouncementForm,
) -> ServiceResult<Announcement>
where
    R: AnnouncementWriter + ?Sized,
{
    if !check_role(SERVICE_ADMIN_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let new = payload(form)?;
    let created = repo.create_announcement(&new).map_err(|err| {
        log::error!("Failed to create announcement: {err}");
        err
    })?;
    log::info!("Announcement {} created by {}", created.id, user.email);
    Ok(created)
}

pub fn update_announcement<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    form: AnnouncementForm,
) -> ServiceResult<Announcement>
where
    R: AnnouncementWriter + ?Sized,
{
    if !check_role(SERVICE_ADMIN_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let id = AnnouncementId::new(id)?;
    let updates = payload(form)?;
    Ok(repo.update_announcement(id, &updates).map_err(|err| {
        log::error!("Failed to update announcement {id}: {err}");
        err
    })?)
}

pub fn delete_announcement<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<()>
where
    R: AnnouncementWriter + ?Sized,
{
    if !check_role(SERVICE_ADMIN_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let id = AnnouncementId::new(id)?;
    repo.delete_announcement(id).map_err(|err| {
        log::error!("Failed to delete announcement {id}: {err}");
        err
    })?;
    log::info!("Announcement {id} deleted by {}", user.email);
    Ok(())
}
