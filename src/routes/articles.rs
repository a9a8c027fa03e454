use actix_web::{HttpRequest, Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::models::config::CommonServerConfig;
use tera::Tera;

use crate::domain::ContentKind;
use crate::domain::article::Article;
use crate::forms::articles::ArticleForm;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{list_url, redirect_with_outcome, render_edit, render_list};
use crate::services::articles as article_service;

const KIND: ContentKind = ContentKind::Articles;

#[get("/articles")]
pub async fn list_articles(
    req: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    common_config: web::Data<CommonServerConfig>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    render_list::<Article>(
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

#[post("/articles/add")]
pub async fn add_article(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<ArticleForm>,
) -> impl Responder {
    let result = article_service::create_article(repo.get_ref(), &user, form);
    redirect_with_outcome(result, "Article added.", &list_url(KIND))
}

#[get("/articles/{id}")]
pub async fn edit_article(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    common_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let result = article_service::load_article(repo.get_ref(), &user, id.into_inner());
    render_edit(KIND, result, &user, &flash_messages, &common_config, &tera)
}

#[post("/articles/{id}/save")]
pub async fn save_article(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<ArticleForm>,
) -> impl Responder {
    let id = id.into_inner();
    let result = article_service::update_article(repo.get_ref(), &user, id, form);
    redirect_with_outcome(result, "Article saved.", &list_url(KIND))
}

#[post("/articles/{id}/delete")]
pub async fn delete_article(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let result = article_service::delete_article(repo.get_ref(), &user, id.into_inner());
    redirect_with_outcome(result, "Article deleted.", &list_url(KIND))
}
