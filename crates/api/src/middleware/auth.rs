//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use precinct_core::actor::{Actor, Division, Role};
use precinct_core::error::CoreError;
use precinct_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated actor extracted from a JWT Bearer token in the
/// `Authorization` header.
///
/// Role and division claims are parsed into their closed enumerations
/// here, at the boundary: a token carrying an unrecognized role or
/// division value is rejected outright rather than flowing into policy
/// checks as a string (fail-closed).
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.actor.id, role = %user.actor.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The authenticated actor (id, role, divisions) for policy checks.
    pub actor: Actor,
}

impl AuthUser {
    pub fn user_id(&self) -> DbId {
        self.actor.id
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let claims = validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        let role: Role = claims.role.parse().map_err(|_| {
            AppError::Core(CoreError::Forbidden("Unrecognized role claim".into()))
        })?;
        let divisions = claims
            .divisions
            .iter()
            .map(|d| d.parse::<Division>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| {
                AppError::Core(CoreError::Forbidden("Unrecognized division claim".into()))
            })?;

        Ok(AuthUser {
            actor: Actor::new(claims.sub, role, divisions),
        })
    }
}
