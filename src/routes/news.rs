use actix_web::{HttpRequest, Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::models::config::CommonServerConfig;
use tera::Tera;

use crate::domain::ContentKind;
use crate::domain::news::News;
use crate::forms::news::NewsForm;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{list_url, redirect_with_outcome, render_edit, render_list};
use crate::services::news as news_service;

const KIND: ContentKind = ContentKind::News;

#[get("/news")]
pub async fn list_news(
    req: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    common_config: web::Data<CommonServerConfig>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    render_list::<News>(
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

#[post("/news/add")]
pub async fn add_news(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<NewsForm>,
) -> impl Responder {
    let result = news_service::create_news(repo.get_ref(), &user, form);
    redirect_with_outcome(result, "News item added.", &list_url(KIND))
}

#[get("/news/{id}")]
pub async fn edit_news(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    common_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let result = news_service::load_news(repo.get_ref(), &user, id.into_inner());
    render_edit(KIND, result, &user, &flash_messages, &common_config, &tera)
}

#[post("/news/{id}/save")]
pub async fn save_news(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<NewsForm>,
) -> impl Responder {
    let id = id.into_inner();
    let result = news_service::update_news(repo.get_ref(), &user, id, form);
    redirect_with_outcome(result, "News item saved.", &list_url(KIND))
}

#[post("/news/{id}/delete")]
pub async fn delete_news(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let result = news_service::delete_news(repo.get_ref(), &user, id.into_inner());
    redirect_with_outcome(result, "News item deleted.", &list_url(KIND))
}
