//! HTTP handlers for the dashboard and the public API.

use actix_web::{HttpRequest, HttpResponse, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::models::config::CommonServerConfig;
use pushkind_common::routes::{base_context, check_role, redirect, render_template};
use serde::Serialize;
use tera::Tera;

use crate::SERVICE_ADMIN_ROLE;
use crate::domain::ContentKind;
use crate::models::config::ServerConfig;
use crate::repository::{DieselRepository, RangeReader};
use crate::services::{ServiceError, ServiceResult, content as content_service};

pub mod announcements;
pub mod api;
pub mod articles;
pub mod events;
pub mod main;
pub mod news;
pub mod settings;

/// Dashboard URL of a content list.
pub fn list_url(kind: ContentKind) -> String {
    format!("/{}", kind.slug())
}

/// Turns the outcome of a form submission into a flash message and redirect.
pub(crate) fn redirect_with_outcome<T>(
    result: ServiceResult<T>,
    success: &str,
    back: &str,
) -> HttpResponse {
    match result {
        Ok(_) => {
            FlashMessage::success(success).send();
            redirect(back)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(back)
        }
        Err(ServiceError::TypeConstraint(message)) => {
            FlashMessage::error(format!("Invalid value: {message}")).send();
            redirect(back)
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("The item no longer exists.").send();
            redirect(back)
        }
        Err(err) => {
            log::error!("Request failed: {err}");
            FlashMessage::error("Something went wrong. Please try again.").send();
            redirect(back)
        }
    }
}

/// Renders the edit page of one item.
pub(crate) fn render_edit<T: Serialize>(
    kind: ContentKind,
    result: ServiceResult<T>,
    user: &AuthenticatedUser,
    flash_messages: &IncomingFlashMessages,
    common_config: &CommonServerConfig,
    tera: &Tera,
) -> HttpResponse {
    match result {
        Ok(item) => {
            let mut context = base_context(
                flash_messages,
                user,
                kind.slug(),
                &common_config.auth_service_url,
            );
            context.insert("kind", kind.slug());
            context.insert("title", kind.title());
            context.insert("item", &item);
            render_template(tera, "content/edit.html", &context)
        }
        other => redirect_with_outcome(other, "", &list_url(kind)),
    }
}

/// Renders a paginated dashboard list.
///
/// The fetch runs on the blocking pool so retry backoff never stalls the
/// worker's event loop.
#[allow(clippy::too_many_arguments)]
pub(crate) async fn render_list<T>(
    kind: ContentKind,
    req: &HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    common_config: &CommonServerConfig,
    server_config: &ServerConfig,
    tera: &Tera,
) -> HttpResponse
where
    T: Serialize + Send + 'static,
    DieselRepository: RangeReader<T>,
{
    let raw_query = req.query_string().to_string();
    let settings = server_config.pagination;
    let retry = server_config.retry;
    let repo = repo.into_inner();
    let viewer = user.clone();

    let result = web::block(move || {
        content_service::load_list_page::<T, DieselRepository>(
            repo.as_ref(),
            &viewer,
            kind,
            &raw_query,
            &settings,
            retry,
        )
    })
    .await;

    match result {
        Ok(Ok(data)) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                kind.slug(),
                &common_config.auth_service_url,
            );
            context.insert("kind", kind.slug());
            context.insert("title", kind.title());
            context.insert("list", &data);
            context.insert("can_edit", &check_role(SERVICE_ADMIN_ROLE, &user.roles));
            render_template(tera, "content/list.html", &context)
        }
        Ok(Err(ServiceError::Unauthorized)) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Ok(Err(err)) => {
            log::error!("Failed to load {} list: {err}", kind.slug());
            HttpResponse::InternalServerError().finish()
        }
        Err(err) => {
            log::error!("List worker for {} failed: {err}", kind.slug());
            HttpResponse::InternalServerError().finish()
        }
    }
}
