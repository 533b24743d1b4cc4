//! Family-context and device-key extractors.
//!
//! The browser original kept the "active family id" in local storage and read
//! it ambiently. Here it is an explicit session-context value: every request
//! that operates within a family carries the `x-family-id` header, and
//! [`FamilyContext`] resolves it to a verified (family, membership) pair.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use recetario_core::error::CoreError;
use recetario_core::types::DbId;
use recetario_db::models::family::{Family, FamilyMember};
use recetario_db::repositories::{FamilyRepo, MemberRepo};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Header naming the family a request operates in.
pub const FAMILY_ID_HEADER: &str = "x-family-id";

/// Header carrying the opaque per-device key for cook-mode progress.
pub const DEVICE_KEY_HEADER: &str = "x-device-key";

/// The authenticated caller's verified context within one family.
///
/// Rejects with 400 when the header is missing or malformed, 404 when the
/// family does not exist, and 403 when the caller is not a member.
#[derive(Debug, Clone)]
pub struct FamilyContext {
    pub user: AuthUser,
    pub family: Family,
    pub member: FamilyMember,
}

impl FamilyContext {
    /// The caller's user id, for brevity at call sites.
    pub fn user_id(&self) -> DbId {
        self.user.user_id
    }
}

impl FromRequestParts<AppState> for FamilyContext {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;

        let family_id: DbId = parts
            .headers
            .get(FAMILY_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::BadRequest(format!("Missing {FAMILY_ID_HEADER} header"))
            })?
            .parse()
            .map_err(|_| {
                AppError::BadRequest(format!("Invalid {FAMILY_ID_HEADER} header"))
            })?;

        let family = FamilyRepo::find_by_id(&state.pool, family_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Family",
                id: family_id,
            }))?;

        let member = MemberRepo::find(&state.pool, family.id, user.user_id)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::Forbidden(
                    "No eres miembro de esta familia.".into(),
                ))
            })?;

        Ok(FamilyContext { user, family, member })
    }
}

/// Opaque per-device key scoping cook-mode progress to one browser/device.
#[derive(Debug, Clone)]
pub struct DeviceKey(pub String);

impl FromRequestParts<AppState> for DeviceKey {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let key = parts
            .headers
            .get(DEVICE_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                AppError::BadRequest(format!("Missing {DEVICE_KEY_HEADER} header"))
            })?;
        Ok(DeviceKey(key.to_string()))
    }
}
