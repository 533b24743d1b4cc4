//! Handlers for family creation, joining via code, and family detail.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use recetario_core::error::CoreError;
use recetario_core::family::{default_cookbook_title, generate_join_code, validate_display_name, validate_join_code};
use recetario_db::models::cookbook::{Cookbook, CreateCookbook};
use recetario_db::models::family::{CreateMember, Family, FamilyMember, ROLE_MEMBER};
use recetario_db::repositories::{CookbookRepo, FamilyRepo, MemberRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::family::FamilyContext;
use crate::response::DataResponse;
use crate::state::AppState;

/// How many join-code candidates to try before giving up.
const CODE_GENERATION_ATTEMPTS: usize = 10;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /families`.
#[derive(Debug, Deserialize)]
pub struct CreateFamilyRequest {
    /// Family name; blank falls back to "Mi familia".
    #[serde(default)]
    pub name: Option<String>,
    pub display_name: String,
}

/// Request body for `POST /families/join`.
#[derive(Debug, Deserialize)]
pub struct JoinFamilyRequest {
    pub code: String,
    pub display_name: String,
}

/// Family + caller's membership + caller's cookbook, returned by both the
/// create and join flows.
#[derive(Debug, Serialize)]
pub struct FamilyJoined {
    pub family: Family,
    pub member: FamilyMember,
    pub cookbook: Cookbook,
}

/// Response for `GET /family`.
#[derive(Debug, Serialize)]
pub struct FamilyDetail {
    pub family: Family,
    pub members: Vec<FamilyMember>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/families
///
/// Create a family: generates a unique six-digit join code, then inserts the
/// family, the creator's admin membership, and their cookbook atomically.
pub async fn create_family(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<CreateFamilyRequest>,
) -> AppResult<impl IntoResponse> {
    let display_name = validate_display_name(&input.display_name)?;
    let family_name = input
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or("Mi familia")
        .to_string();

    // Generate a unique code, retrying on collision.
    let mut code = None;
    for _ in 0..CODE_GENERATION_ATTEMPTS {
        let candidate = generate_join_code(&mut rand::rng());
        if !FamilyRepo::code_exists(&state.pool, &candidate).await? {
            code = Some(candidate);
            break;
        }
    }
    let code = code.ok_or_else(|| {
        AppError::Core(CoreError::Conflict(
            "No pude generar un código único, intenta de nuevo.".into(),
        ))
    })?;

    let (family, member, cookbook) = FamilyRepo::create_with_admin(
        &state.pool,
        &family_name,
        &code,
        auth_user.user_id,
        &display_name,
        &default_cookbook_title(&display_name),
    )
    .await?;

    tracing::info!(
        family_id = family.id,
        code = %family.code,
        user_id = auth_user.user_id,
        "Family created",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse { data: FamilyJoined { family, member, cookbook } }),
    ))
}

/// POST /api/v1/families/join
///
/// Join an existing family by its six-digit code. Idempotent: an existing
/// membership is kept as-is, and the member's cookbook is created only if
/// they do not already have one in this family.
pub async fn join_family(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<JoinFamilyRequest>,
) -> AppResult<impl IntoResponse> {
    let display_name = validate_display_name(&input.display_name)?;
    let code = validate_join_code(&input.code)?;

    // 1. Find the family by code.
    let family = FamilyRepo::find_by_code(&state.pool, &code)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Validation(
                "Código inválido o familia no encontrada.".into(),
            ))
        })?;

    // 2. Insert the membership only if it does not exist yet.
    let member = match MemberRepo::find(&state.pool, family.id, auth_user.user_id).await? {
        Some(existing) => existing,
        None => {
            MemberRepo::create(
                &state.pool,
                &CreateMember {
                    family_id: family.id,
                    user_id: auth_user.user_id,
                    display_name: display_name.clone(),
                    role: ROLE_MEMBER.to_string(),
                },
            )
            .await?
        }
    };

    // 3. Create the member's cookbook only if they have none here yet.
    let cookbook =
        match CookbookRepo::find_for_owner(&state.pool, family.id, auth_user.user_id).await? {
            Some(existing) => existing,
            None => {
                CookbookRepo::create(
                    &state.pool,
                    &CreateCookbook {
                        family_id: family.id,
                        owner_id: auth_user.user_id,
                        title: default_cookbook_title(&display_name),
                        color: None,
                    },
                )
                .await?
            }
        };

    tracing::info!(
        family_id = family.id,
        user_id = auth_user.user_id,
        "User joined family",
    );

    Ok(Json(DataResponse { data: FamilyJoined { family, member, cookbook } }))
}

/// GET /api/v1/family
///
/// The context family with its member list, in join order.
pub async fn get_family(
    ctx: FamilyContext,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let members = MemberRepo::list_for_family(&state.pool, ctx.family.id).await?;

    Ok(Json(DataResponse {
        data: FamilyDetail { family: ctx.family, members },
    }))
}
