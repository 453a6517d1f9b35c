//! Route definitions for `/sponsors` and `/publishers`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{publisher, sponsor};
use crate::state::AppState;

/// Routes mounted at `/sponsors`.
///
/// ```text
/// POST /      -> create_sponsor
/// GET  /me    -> get_my_sponsor
/// PUT  /me    -> update_my_sponsor
/// ```
pub fn sponsor_router() -> Router<AppState> {
    Router::new()
        .route("/", post(sponsor::create_sponsor))
        .route(
            "/me",
            get(sponsor::get_my_sponsor).put(sponsor::update_my_sponsor),
        )
}

/// Routes mounted at `/publishers`.
///
/// ```text
/// POST /      -> create_publisher
/// GET  /me    -> get_my_publisher
/// PUT  /me    -> update_my_publisher
/// ```
pub fn publisher_router() -> Router<AppState> {
    Router::new()
        .route("/", post(publisher::create_publisher))
        .route(
            "/me",
            get(publisher::get_my_publisher).put(publisher::update_my_publisher),
        )
}
