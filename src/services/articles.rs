//! Article editing workflows.

use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::routes::check_role;

use crate::SERVICE_ADMIN_ROLE;
use crate::domain::article::{Article, NewArticle};
use crate::domain::types::ArticleId;
use crate::forms::articles::ArticleForm;
use crate::repository::{ArticleReader, ArticleWriter};
use crate::services::{ServiceError, ServiceResult};

fn payload(form: ArticleForm) -> ServiceResult<NewArticle> {
    NewArticle::try_from(form).map_err(|err| {
        log::error!("Failed to validate article form: {err}");
        ServiceError::Form(format!("Invalid article: {err}"))
    })
}

pub fn load_article<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<Article>
where
    R: ArticleReader + ?Sized,
{
    if !check_role(SERVICE_ADMIN_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let id = ArticleId::new(id)?;
    repo.get_article_by_id(id)
        .map_err(|err| {
            log::error!("Failed to load article {id}: {err}");
            err
        })?
        .ok_or(ServiceError::NotFound)
}

pub fn create_article<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: ArticleForm,
) -> ServiceResult<Article>
where
    R: ArticleWriter + ?Sized,
{
    if !check_role(SERVICE_ADMIN_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let new = payload(form)?;
    let created = repo.create_article(&new).map_err(|err| {
        log::error!("Failed to create article: {err}");
        err
    })?;
    log::info!("Article {} created by {}", created.id, user.email);
    Ok(created)
}

pub fn update_article<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    form: ArticleForm,
) -> ServiceResult<Article>
where
    R: ArticleWriter + ?Sized,
{
    if !check_role(SERVICE_ADMIN_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let id = ArticleId::new(id)?;
    let updates = payload(form)?;
    Ok(repo.update_article(id, &updates).map_err(|err| {
        log::error!("Failed to update article {id}: {err}");
        err
    })?)
}

pub fn delete_article<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<()>
where
    R: ArticleWriter + ?Sized,
{
    if !check_role(SERVICE_ADMIN_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let id = ArticleId::new(id)?;
    repo.delete_article(id).map_err(|err| {
        log::error!("Failed to delete article {id}: {err}");
        err
    })?;
    log::info!("Article {id} deleted by {}", user.email);
    Ok(())
}
