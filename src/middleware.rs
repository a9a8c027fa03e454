//! Maintenance-mode gate for the public content endpoints.

use actix_web::body::{EitherBody, MessageBody};
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::header;
use actix_web::middleware::Next;
use actix_web::{Error, HttpResponse, web};

use crate::dto::api::MaintenanceStatus;
use crate::repository::DieselRepository;
use crate::services::settings as settings_service;

/// Seconds clients are told to wait before asking again.
const RETRY_AFTER_SECS: u32 = 120;

async fn current_status(repo: Option<web::Data<DieselRepository>>) -> Option<MaintenanceStatus> {
    let Some(repo) = repo else {
        log::warn!("Maintenance guard has no repository configured");
        return None;
    };
    let repo = repo.into_inner();

    match web::block(move || settings_service::maintenance_status(repo.as_ref())).await {
        Ok(Ok(status)) => Some(status),
        Ok(Err(err)) => {
            log::warn!("Serving content without maintenance check: {err}");
            None
        }
        Err(err) => {
            log::warn!("Maintenance check worker failed: {err}");
            None
        }
    }
}

/// Answers `503 Service Unavailable` with the maintenance message while
/// maintenance mode is on. Requests pass through when the switch cannot be
/// read.
///
/// Wrap with [`actix_web::middleware::from_fn`].
pub async fn maintenance_guard<B>(
    req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<EitherBody<B>>, Error>
where
    B: MessageBody + 'static,
{
    let repo = req.app_data::<web::Data<DieselRepository>>().cloned();

    if let Some(status) = current_status(repo).await.filter(|status| status.maintenance) {
        log::debug!("Maintenance mode: rejecting {}", req.path());
        let response = HttpResponse::ServiceUnavailable()
            .insert_header((header::RETRY_AFTER, RETRY_AFTER_SECS.to_string()))
            .json(status);
        return Ok(req.into_response(response).map_into_right_body());
    }

    next.call(req).await.map(ServiceResponse::map_into_left_body)
}
