use actix_web::middleware::from_fn;
use actix_web::{
    App, HttpResponse,
    http::{StatusCode, header},
    test, web,
};
use pushkind_content::domain::settings::UpdateSiteSettings;
use pushkind_content::middleware::maintenance_guard;
use pushkind_content::repository::{DieselRepository, SettingsWriter};
use serde_json::Value;

mod common;

#[actix_web::test]
async fn passes_through_when_maintenance_is_off() {
    let test_db = common::TestDb::new("passes_through_when_maintenance_is_off.db");
    let repo = DieselRepository::new(test_db.pool());

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(repo))
            .wrap(from_fn(maintenance_guard))
            .default_service(web::to(|| async { HttpResponse::Ok().body("content") })),
    )
    .await;

    let req = test::TestRequest::get().uri("/v1/news").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn answers_503_with_message_during_maintenance() {
    let test_db = common::TestDb::new("answers_503_with_message_during_maintenance.db");
    let repo = DieselRepository::new(test_db.pool());
    repo.update_site_settings(&UpdateSiteSettings::new(
        true,
        Some("Back at noon".to_string()),
    ))
    .unwrap();

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(repo))
            .wrap(from_fn(maintenance_guard))
            .default_service(web::to(|| async { HttpResponse::Ok().body("content") })),
    )
    .await;

    let req = test::TestRequest::get().uri("/v1/news").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert!(resp.headers().contains_key(header::RETRY_AFTER));

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["maintenance"], Value::Bool(true));
    assert_eq!(body["message"], Value::String("Back at noon".into()));
}

#[actix_web::test]
async fn missing_repository_does_not_block_requests() {
    let app = test::init_service(
        App::new()
            .wrap(from_fn(maintenance_guard))
            .default_service(web::to(|| async { HttpResponse::Ok().finish() })),
    )
    .await;

    let req = test::TestRequest::default().to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
}
