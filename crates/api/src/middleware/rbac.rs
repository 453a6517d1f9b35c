//! Role-based access control extractors.
//!
//! Each extractor builds on [`Caller`] and rejects with 403
//! when the required role is missing, so handlers receive the owner id they
//! need at the type level.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use slotbook_core::authz;
use slotbook_core::identity::RequestContext;
use slotbook_core::types::DbId;

use super::context::Caller;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the sponsor marketplace role; yields the context and sponsor id.
///
/// ```ignore
/// async fn sponsor_only(RequireSponsor(ctx, sponsor_id): RequireSponsor) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireSponsor(pub RequestContext, pub DbId);

impl FromRequestParts<AppState> for RequireSponsor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Caller(ctx) = Caller::from_request_parts(parts, state).await?;
        let sponsor_id = authz::require_sponsor(&ctx.resolved)?;
        Ok(RequireSponsor(ctx, sponsor_id))
    }
}

/// Requires the publisher marketplace role; yields the context and publisher id.
pub struct RequirePublisher(pub RequestContext, pub DbId);

impl FromRequestParts<AppState> for RequirePublisher {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Caller(ctx) = Caller::from_request_parts(parts, state).await?;
        let publisher_id = authz::require_publisher(&ctx.resolved)?;
        Ok(RequirePublisher(ctx, publisher_id))
    }
}
