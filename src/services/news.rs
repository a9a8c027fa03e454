//! News and press release editing workflows.

use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::routes::check_role;

use crate::SERVICE_ADMIN_ROLE;
use crate::domain::news::{NewNews, News};
use crate::domain::types::NewsId;
use crate::forms::news::NewsForm;
use crate::repository::{NewsReader, NewsWriter};
use crate::services::{ServiceError, ServiceResult};

fn payload(form: NewsForm) -> ServiceResult<NewNews> {
    NewNews::try_from(form).map_err(|err| {
        log::error!("Failed to validate news form: {err}");
        ServiceError::Form(format!("Invalid news item: {err}"))
    })
}

pub fn load_news<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<News>
where
    R: NewsReader + ?Sized,
{
    if !check_role(SERVICE_ADMIN_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let id = NewsId::new(id)?;
    repo.get_news_by_id(id)
        .map_err(|err| {
            log::error!("Failed to load news {id}: {err}");
            err
        })?
        .ok_or(ServiceError::NotFound)
}

pub fn create_news<R>(repo: &R, user: &AuthenticatedUser, form: NewsForm) -> ServiceResult<News>
where
    R: NewsWriter + ?Sized,
{
    if !check_role(SERVICE_ADMIN_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let new = payload(form)?;
    let created = repo.create_news(&new).map_err(|err| {
        log::error!("Failed to create news: {err}");
        err
    })?;
    log::info!("News {} created by {}", created.id, user.email);
    Ok(created)
}

pub fn update_news<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    form: NewsForm,
) -> ServiceResult<News>
where
    R: NewsWriter + ?Sized,
{
    if !check_role(SERVICE_ADMIN_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let id = NewsId::new(id)?;
    let updates = payload(form)?;
    Ok(repo.update_news(id, &updates).map_err(|err| {
        log::error!("Failed to update news {id}: {err}");
        err
    })?)
}

pub fn delete_news<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<()>
where
    R: NewsWriter + ?Sized,
{
    if !check_role(SERVICE_ADMIN_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let id = NewsId::new(id)?;
    repo.delete_news(id).map_err(|err| {
        log::error!("Failed to delete news {id}: {err}");
        err
    })?;
    log::info!("News {id} deleted by {}", user.email);
    Ok(())
}
