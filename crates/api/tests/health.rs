//! Health endpoint smoke test.

mod common;

use axum::http::{Method, StatusCode};
use common::{body_json, build_test_app, request};
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn test_healthz(pool: PgPool) {
    let app = build_test_app(pool);

    let response = request(&app, Method::GET, "/healthz", None, None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
}
