//! Identity/role resolution at the request boundary.
//!
//! [`Caller`] turns a verified [`Principal`] into a [`RequestContext`] by
//! looking up the principal's sponsor and publisher records. The context is
//! then passed explicitly into every booking operation.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use slotbook_core::identity::{RequestContext, ResolvedRole};
use slotbook_core::types::DbId;
use slotbook_db::repositories::IdentityRepo;
use slotbook_db::DbPool;

use super::auth::Principal;
use crate::error::AppError;
use crate::state::AppState;

/// Resolve a principal to its marketplace role.
///
/// Lookup failures resolve to no role (logged, not propagated): callers treat
/// the result like an unauthenticated-equivalent principal and fail closed.
pub async fn resolve_role(pool: &DbPool, principal_id: DbId) -> ResolvedRole {
    match IdentityRepo::owner_ids(pool, principal_id).await {
        Ok((sponsor_id, publisher_id)) => {
            if ResolvedRole::is_ambiguous(sponsor_id, publisher_id) {
                tracing::warn!(
                    principal_id,
                    ?sponsor_id,
                    ?publisher_id,
                    "Principal owns both a sponsor and a publisher; acting as sponsor"
                );
            }
            ResolvedRole::from_owner_ids(sponsor_id, publisher_id)
        }
        Err(e) => {
            tracing::warn!(principal_id, error = %e, "Role lookup failed; resolving to no role");
            ResolvedRole::none()
        }
    }
}

/// Authenticated caller with its resolved marketplace role.
///
/// ```ignore
/// async fn handler(Caller(ctx): Caller) -> AppResult<Json<()>> {
///     let sponsor_id = authz::require_sponsor(&ctx.resolved)?;
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Caller(pub RequestContext);

impl FromRequestParts<AppState> for Caller {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let principal = Principal::from_request_parts(parts, state).await?;
        let resolved = resolve_role(&state.pool, principal.id).await;
        Ok(Caller(principal.into_context(resolved)))
    }
}
