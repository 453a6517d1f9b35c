//! Route definitions for campaigns and their creatives.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::{campaign, creative};
use crate::state::AppState;

/// Routes mounted at `/campaigns`.
///
/// ```text
/// GET    /                    -> list_campaigns
/// POST   /                    -> create_campaign
/// GET    /{id}                -> get_campaign
/// PATCH  /{id}                -> update_campaign
/// DELETE /{id}                -> delete_campaign
/// GET    /{id}/creatives      -> list_creatives
/// POST   /{id}/creatives      -> create_creative
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(campaign::list_campaigns).post(campaign::create_campaign),
        )
        .route(
            "/{id}",
            get(campaign::get_campaign)
                .patch(campaign::update_campaign)
                .delete(campaign::delete_campaign),
        )
        .route(
            "/{id}/creatives",
            get(creative::list_creatives).post(creative::create_creative),
        )
}

/// Routes mounted at `/creatives`.
///
/// ```text
/// DELETE /{id}                -> delete_creative
/// ```
pub fn creative_router() -> Router<AppState> {
    Router::new().route("/{id}", delete(creative::delete_creative))
}
