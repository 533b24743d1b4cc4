//! Handlers for the `/auth` resource (magic-link login, refresh, logout).

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;

use recetario_core::error::CoreError;
use recetario_core::types::DbId;
use recetario_db::models::magic_link::CreateMagicLinkToken;
use recetario_db::models::session::CreateSession;
use recetario_db::models::user::User;
use recetario_db::repositories::{MagicLinkRepo, SessionRepo, UserRepo};

use crate::auth::jwt::{generate_access_token, generate_opaque_token, hash_opaque_token};
use crate::auth::magic_link::MAGIC_LINK_EXPIRY_MINS;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/magic-link`.
#[derive(Debug, Deserialize)]
pub struct MagicLinkRequest {
    pub email: String,
}

/// Request body for `POST /auth/callback`.
#[derive(Debug, Deserialize)]
pub struct CallbackRequest {
    pub token: String,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Successful authentication response returned by callback and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserInfo,
}

/// Public user info embedded in [`AuthResponse`].
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: DbId,
    pub email: String,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self { id: user.id, email: user.email.clone() }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/magic-link
///
/// Request a passwordless login link. Creates the user on first contact and
/// always answers 202 so the endpoint does not leak which emails exist.
pub async fn request_magic_link(
    State(state): State<AppState>,
    Json(input): Json<MagicLinkRequest>,
) -> AppResult<impl IntoResponse> {
    let email = input.email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::Core(CoreError::Validation(
            "Escribe tu correo.".to_string(),
        )));
    }

    let user = UserRepo::upsert_by_email(&state.pool, &email).await?;

    let (plaintext, token_hash) = generate_opaque_token();
    let expires_at = Utc::now() + chrono::Duration::minutes(MAGIC_LINK_EXPIRY_MINS);
    MagicLinkRepo::create(
        &state.pool,
        &CreateMagicLinkToken { user_id: user.id, token_hash, expires_at },
    )
    .await?;

    let link = format!("{}?token={plaintext}", state.config.magic_link_callback_url);

    match &state.mailer {
        Some(mailer) => {
            mailer
                .send_login_link(&email, &link)
                .await
                .map_err(|e| AppError::InternalError(format!("Email delivery error: {e}")))?;
        }
        None => {
            tracing::info!(email = %email, link = %link, "SMTP not configured; magic link logged");
        }
    }

    Ok((
        StatusCode::ACCEPTED,
        Json(DataResponse {
            data: json!({
                "message": "Listo ✅ Revisa tu correo y abre el link para entrar."
            }),
        }),
    ))
}

/// POST /api/v1/auth/callback
///
/// Exchange an emailed single-use token for access + refresh tokens.
pub async fn callback(
    State(state): State<AppState>,
    Json(input): Json<CallbackRequest>,
) -> AppResult<Json<AuthResponse>> {
    // 1. Hash the presented token and atomically consume it.
    let token_hash = hash_opaque_token(input.token.trim());
    let token = MagicLinkRepo::consume(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired login link".into()))
        })?;

    // 2. Look up the user the link was minted for.
    let user = UserRepo::find_by_id(&state.pool, token.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    tracing::info!(user_id = user.id, "Magic link login");

    // 3. Generate tokens and create a session.
    let response = create_auth_response(&state, &user).await?;
    Ok(Json(response))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a valid refresh token for new access + refresh tokens.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    // 1. Hash the provided refresh token and find the matching session.
    let token_hash = hash_opaque_token(&input.refresh_token);
    let session = SessionRepo::find_by_refresh_token_hash(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;

    // 2. Revoke the old session (token rotation).
    SessionRepo::revoke(&state.pool, session.id).await?;

    // 3. Find the user and mint fresh tokens.
    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    let response = create_auth_response(&state, &user).await?;
    Ok(Json(response))
}

/// POST /api/v1/auth/logout
///
/// Revoke all sessions for the authenticated user. Returns 204 No Content.
pub async fn logout(State(state): State<AppState>, auth_user: AuthUser) -> AppResult<StatusCode> {
    SessionRepo::revoke_all_for_user(&state.pool, auth_user.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/auth/me
///
/// The authenticated user's public info.
pub async fn me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<impl IntoResponse> {
    let user = UserRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    Ok(Json(DataResponse { data: UserInfo::from(&user) }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Generate access + refresh tokens, persist a session row, and build the
/// response.
async fn create_auth_response(state: &AppState, user: &User) -> AppResult<AuthResponse> {
    let access_token = generate_access_token(user.id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let (refresh_plaintext, refresh_hash) = generate_opaque_token();

    let expires_at =
        Utc::now() + chrono::Duration::days(state.config.jwt.refresh_token_expiry_days);

    SessionRepo::create(
        &state.pool,
        &CreateSession {
            user_id: user.id,
            refresh_token_hash: refresh_hash,
            expires_at,
        },
    )
    .await?;

    Ok(AuthResponse {
        access_token,
        refresh_token: refresh_plaintext,
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        user: UserInfo::from(user),
    })
}
