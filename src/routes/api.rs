//! Public read API consumed by the marketing site. No session required.

use actix_web::{HttpRequest, HttpResponse, Responder, get, web};
use serde::Serialize;

use crate::domain::ContentKind;
use crate::domain::announcement::Announcement;
use crate::domain::article::Article;
use crate::domain::event::Event;
use crate::domain::news::News;
use crate::dto::api::{ApiError, ApiPage};
use crate::models::config::ServerConfig;
use crate::repository::{DieselRepository, RangeReader};
use crate::services::{content as content_service, settings as settings_service};

async fn content_page<T>(
    kind: ContentKind,
    raw_query: String,
    repo: web::Data<DieselRepository>,
    server_config: &ServerConfig,
) -> HttpResponse
where
    T: Serialize + Send + 'static,
    DieselRepository: RangeReader<T>,
{
    let settings = server_config.pagination;
    let retry = server_config.retry;
    let repo = repo.into_inner();

    let result = web::block(move || {
        content_service::fetch_list::<T, DieselRepository>(
            repo.as_ref(),
            kind,
            &raw_query,
            &settings,
            retry,
        )
    })
    .await;

    match result {
        Ok(data) => match ApiPage::try_from(data) {
            Ok(page) => HttpResponse::Ok().json(page),
            Err(err) if err.retryable => HttpResponse::ServiceUnavailable().json(err),
            Err(err) => HttpResponse::InternalServerError().json(err),
        },
        Err(err) => {
            log::error!("List worker for {} failed: {err}", kind.slug());
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/v1/{kind}")]
/// One page of a content table: `?page=&size=&width=`.
pub async fn api_v1_content(
    kind: web::Path<String>,
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let kind: ContentKind = match kind.parse() {
        Ok(kind) => kind,
        Err(err) => {
            return HttpResponse::NotFound().json(ApiError {
                error: err.to_string(),
                retryable: false,
            });
        }
    };
    let raw_query = req.query_string().to_string();

    match kind {
        ContentKind::Announcements => {
            content_page::<Announcement>(kind, raw_query, repo, &server_config).await
        }
        ContentKind::Articles => content_page::<Article>(kind, raw_query, repo, &server_config).await,
        ContentKind::News => content_page::<News>(kind, raw_query, repo, &server_config).await,
        ContentKind::Events => content_page::<Event>(kind, raw_query, repo, &server_config).await,
    }
}

#[get("/v1/maintenance")]
pub async fn api_v1_maintenance(repo: web::Data<DieselRepository>) -> impl Responder {
    let repo = repo.into_inner();
    match web::block(move || settings_service::maintenance_status(repo.as_ref())).await {
        Ok(Ok(status)) => HttpResponse::Ok().json(status),
        Ok(Err(err)) => {
            log::error!("Failed to read maintenance status: {err}");
            HttpResponse::ServiceUnavailable().finish()
        }
        Err(err) => {
            log::error!("Maintenance worker failed: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
