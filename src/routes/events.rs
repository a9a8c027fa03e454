use actix_web::{HttpRequest, Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::models::config::CommonServerConfig;
use tera::Tera;

use crate::domain::ContentKind;
use crate::domain::event::Event;
use crate::forms::events::EventForm;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{list_url, redirect_with_outcome, render_edit, render_list};
use crate::services::events as event_service;

const KIND: ContentKind = ContentKind::Events;

#[get("/events")]
pub async fn list_events(
    req: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    common_config: web::Data<CommonServerConfig>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    render_list::<Event>(
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

#[post("/events/add")]
pub async fn add_event(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<EventForm>,
) -> impl Responder {
    let result = event_service::create_event(repo.get_ref(), &user, form);
    redirect_with_outcome(result, "Event added.", &list_url(KIND))
}

#[get("/events/{id}")]
pub async fn edit_event(
    id: web::Path<String>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    common_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let result = event_service::load_event(repo.get_ref(), &user, &id);
    render_edit(KIND, result, &user, &flash_messages, &common_config, &tera)
}

#[post("/events/{id}/save")]
pub async fn save_event(
    id: web::Path<String>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<EventForm>,
) -> impl Responder {
    let result = event_service::update_event(repo.get_ref(), &user, &id, form);
    redirect_with_outcome(result, "Event saved.", &list_url(KIND))
}

#[post("/events/{id}/delete")]
pub async fn delete_event(
    id: web::Path<String>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let result = event_service::delete_event(repo.get_ref(), &user, &id);
    redirect_with_outcome(result, "Event deleted.", &list_url(KIND))
}
