use actix_web::{HttpRequest, Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::models::config::CommonServerConfig;
use tera::Tera;

use crate::domain::ContentKind;
use crate::domain::announcement::Announcement;
use crate::forms::announcements::AnnouncementForm;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{list_url, redirect_with_outcome, render_edit, render_list};
use crate::services::announcements as announcement_service;

const KIND: ContentKind = ContentKind::Announcements;

#[get("/announcements")]
pub async fn list_announcements(
    req: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    common_config: web::Data<CommonServerConfig>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    render_list::<Announcement>(
        KIND,
        &req,
        user,
        repo,
        flash_messages,
        &common_config,
        &server_config,
        &tera,
    )
    .await
}

#[post("/announcements/add")]
pub async fn add_announcement(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AnnouncementForm>,
) -> impl Responder {
    let result = announcement_service::create_announcement(repo.get_ref(), &user, form);
    redirect_with_outcome(result, "Announcement added.", &list_url(KIND))
}

#[get("/announcements/{id}")]
pub async fn edit_announcement(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    common_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let result = announcement_service::load_announcement(repo.get_ref(), &user, id.into_inner());
    render_edit(KIND, result, &user, &flash_messages, &common_config, &tera)
}

#[post("/announcements/{id}/save")]
pub async fn save_announcement(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AnnouncementForm>,
) -> impl Responder {
    let id = id.into_inner();
    let result = announcement_service::update_announcement(repo.get_ref(), &user, id, form);
    redirect_with_outcome(result, "Announcement saved.", &list_url(KIND))
}

#[post("/announcements/{id}/delete")]
pub async fn delete_announcement(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let result = announcement_service::delete_announcement(repo.get_ref(), &user, id.into_inner());
    redirect_with_outcome(result, "Announcement deleted.", &list_url(KIND))
}
