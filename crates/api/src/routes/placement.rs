//! Route definitions for the `/placements` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::placement;
use crate::state::AppState;

/// Routes mounted at `/placements`.
///
/// ```text
/// GET    /                -> list_placements
/// POST   /                -> create_placement
/// GET    /{id}            -> get_placement
/// PATCH  /{id}            -> review_placement
/// POST   /{id}/cancel     -> cancel_placement
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(placement::list_placements).post(placement::create_placement),
        )
        .route(
            "/{id}",
            get(placement::get_placement).patch(placement::review_placement),
        )
        .route("/{id}/cancel", post(placement::cancel_placement))
}
