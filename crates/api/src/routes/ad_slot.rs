//! Route definitions for the `/ad-slots` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::ad_slot;
use crate::state::AppState;

/// Routes mounted at `/ad-slots`.
///
/// ```text
/// GET    /                -> list_ad_slots (public)
/// POST   /                -> create_ad_slot (publisher)
/// GET    /{id}            -> get_ad_slot (public)
/// PUT    /{id}            -> update_ad_slot (owner)
/// DELETE /{id}            -> delete_ad_slot (owner)
/// POST   /{id}/book       -> book_ad_slot (sponsor)
/// POST   /{id}/unbook     -> unbook_ad_slot (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(ad_slot::list_ad_slots).post(ad_slot::create_ad_slot),
        )
        .route(
            "/{id}",
            get(ad_slot::get_ad_slot)
                .put(ad_slot::update_ad_slot)
                .delete(ad_slot::delete_ad_slot),
        )
        .route("/{id}/book", post(ad_slot::book_ad_slot))
        .route("/{id}/unbook", post(ad_slot::unbook_ad_slot))
}
