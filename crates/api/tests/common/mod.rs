#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use chrono::Utc;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use recetario_api::auth::jwt::{generate_opaque_token, JwtConfig};
use recetario_api::config::ServerConfig;
use recetario_api::router::build_app_router;
use recetario_api::state::AppState;
use recetario_db::models::magic_link::CreateMagicLinkToken;
use recetario_db::repositories::{MagicLinkRepo, UserRepo};
use recetario_storage::{LocalPhotoStore, PhotoStore};

/// Build a test `ServerConfig` with safe defaults and a known JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        magic_link_callback_url: "http://localhost:5173/auth/callback".to_string(),
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 30,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool, a temp-dir photo store, and no mailer.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let photos: Arc<dyn PhotoStore> = Arc::new(LocalPhotoStore::new(
        std::env::temp_dir().join("recetario-test-photos"),
        "http://localhost:3000/photos".to_string(),
    ));
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        photos,
        mailer: None,
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send one request through the router.
pub async fn request(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    family_id: Option<i64>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    if let Some(family_id) = family_id {
        builder = builder.header("x-family-id", family_id.to_string());
    }

    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    app.clone().oneshot(request).await.unwrap()
}

/// Send a request that also carries the cook-mode device key header.
pub async fn request_with_device(
    app: &Router,
    method: Method,
    uri: &str,
    token: &str,
    family_id: i64,
    device_key: &str,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .header("x-family-id", family_id.to_string())
        .header("x-device-key", device_key);

    let request = match body {
        Some(json) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            builder.body(Body::from(json.to_string())).unwrap()
        }
        None => builder.body(Body::empty()).unwrap(),
    };

    app.clone().oneshot(request).await.unwrap()
}

/// Build a multipart body with a `payload` JSON field and an optional
/// `photo` file, returning `(content_type, body)`.
pub fn multipart_body(
    payload: &serde_json::Value,
    photo: Option<(&str, &[u8])>,
) -> (String, Vec<u8>) {
    const BOUNDARY: &str = "recetario-test-boundary";

    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"payload\"\r\n\r\n{payload}\r\n"
        )
        .as_bytes(),
    );
    if let Some((filename, bytes)) = photo {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"photo\"; \
                 filename=\"{filename}\"\r\nContent-Type: image/jpeg\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    (format!("multipart/form-data; boundary={BOUNDARY}"), body)
}

/// Send a multipart request.
pub async fn post_multipart(
    app: &Router,
    uri: &str,
    token: &str,
    family_id: i64,
    content_type: String,
    body: Vec<u8>,
) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .header("x-family-id", family_id.to_string())
        .header(CONTENT_TYPE, content_type)
        .body(Body::from(body))
        .unwrap();

    app.clone().oneshot(request).await.unwrap()
}

/// Decode a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Flow helpers
// ---------------------------------------------------------------------------

/// Log a user in through the magic-link callback endpoint.
///
/// Seeds the user and a fresh token directly in the database (the email leg
/// is not under test), then exchanges the token via the API. Returns the
/// user id and an access token.
pub async fn login_user(app: &Router, pool: &PgPool, email: &str) -> (i64, String) {
    let user = UserRepo::upsert_by_email(pool, email)
        .await
        .expect("user creation should succeed");

    let (plaintext, token_hash) = generate_opaque_token();
    MagicLinkRepo::create(
        pool,
        &CreateMagicLinkToken {
            user_id: user.id,
            token_hash,
            expires_at: Utc::now() + chrono::Duration::minutes(15),
        },
    )
    .await
    .expect("token creation should succeed");

    let response = request(
        app,
        Method::POST,
        "/api/v1/auth/callback",
        None,
        None,
        Some(serde_json::json!({ "token": plaintext })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let access_token = json["access_token"].as_str().unwrap().to_string();
    (user.id, access_token)
}

/// Create a family via the API, returning the `FamilyJoined` payload
/// (`family`, `member`, `cookbook`).
pub async fn create_family(app: &Router, token: &str, display_name: &str) -> serde_json::Value {
    let response = request(
        app,
        Method::POST,
        "/api/v1/families",
        Some(token),
        None,
        Some(serde_json::json!({ "name": "Mi familia", "display_name": display_name })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    body_json(response).await["data"].clone()
}
