//! Handlers for the account/profile page.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use recetario_core::color::{book_style_from_color, BookStyle};
use recetario_core::error::CoreError;
use recetario_core::family::validate_display_name;
use recetario_core::types::DbId;
use recetario_db::models::family::FamilyMember;
use recetario_db::repositories::{CookbookRepo, FamilyRepo, MemberRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::family::{FamilyContext, FAMILY_ID_HEADER};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// The caller's cookbook as shown on the account page.
#[derive(Debug, Serialize)]
pub struct ProfileCookbook {
    pub id: DbId,
    pub title: String,
    pub color: Option<String>,
    pub style: BookStyle,
}

/// Response for `GET /account`.
///
/// The family-scoped fields are `None` when the request carries no
/// `x-family-id` header (a fresh login with no active family yet).
#[derive(Debug, Serialize)]
pub struct Profile {
    pub email: String,
    pub display_name: Option<String>,
    pub family_name: Option<String>,
    pub family_code: Option<String>,
    pub members: Vec<FamilyMember>,
    pub cookbook: Option<ProfileCookbook>,
}

/// Request body for `PUT /account/display-name`.
#[derive(Debug, Deserialize)]
pub struct UpdateDisplayNameRequest {
    pub display_name: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/account
///
/// Profile overview: email, display name, family, members, own cookbook.
/// Works without a family context, returning just the email in that case.
pub async fn get_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
    headers: HeaderMap,
) -> AppResult<impl IntoResponse> {
    let user = UserRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    let mut profile = Profile {
        email: user.email,
        display_name: None,
        family_name: None,
        family_code: None,
        members: Vec::new(),
        cookbook: None,
    };

    // The family slice of the profile only loads when the client names its
    // active family.
    let family_id: Option<DbId> = headers
        .get(FAMILY_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok());

    if let Some(family_id) = family_id {
        if let Some(family) = FamilyRepo::find_by_id(&state.pool, family_id).await? {
            let membership = MemberRepo::find(&state.pool, family.id, auth_user.user_id).await?;
            let Some(membership) = membership else {
                return Err(AppError::Core(CoreError::Forbidden(
                    "No eres miembro de esta familia.".into(),
                )));
            };

            profile.display_name = Some(membership.display_name);
            profile.family_name = Some(family.name.clone());
            profile.family_code = Some(family.code.clone());
            profile.members = MemberRepo::list_for_family(&state.pool, family.id).await?;

            if let Some(cookbook) =
                CookbookRepo::find_for_owner(&state.pool, family.id, auth_user.user_id).await?
            {
                profile.cookbook = Some(ProfileCookbook {
                    id: cookbook.id,
                    title: cookbook.title,
                    style: book_style_from_color(cookbook.color.as_deref()),
                    color: cookbook.color,
                });
            }
        }
    }

    Ok(Json(DataResponse { data: profile }))
}

/// PUT /api/v1/account/display-name
///
/// Rename the caller within the context family.
pub async fn update_display_name(
    ctx: FamilyContext,
    State(state): State<AppState>,
    Json(input): Json<UpdateDisplayNameRequest>,
) -> AppResult<impl IntoResponse> {
    let display_name = validate_display_name(&input.display_name)?;

    let member = MemberRepo::update_display_name(
        &state.pool,
        ctx.family.id,
        ctx.user_id(),
        &display_name,
    )
    .await?
    .ok_or_else(|| {
        AppError::Core(CoreError::Forbidden("No eres miembro de esta familia.".into()))
    })?;

    tracing::info!(
        family_id = ctx.family.id,
        user_id = ctx.user_id(),
        "Display name updated",
    );

    Ok(Json(DataResponse { data: member }))
}
