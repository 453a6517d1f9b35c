pub mod ad_slot;
pub mod auth;
pub mod campaign;
pub mod health;
pub mod placement;
pub mod profile;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                       register (public)
/// /auth/login                          login (public)
/// /auth/refresh                        refresh (public)
/// /auth/logout                         logout (requires auth)
/// /auth/me                             principal + resolved role
///
/// /sponsors                            sponsor signup (POST)
/// /sponsors/me                         get, update own sponsor
/// /publishers                          publisher signup (POST)
/// /publishers/me                       get, update own publisher
///
/// /campaigns                           list, create (sponsor)
/// /campaigns/{id}                      get, update (PATCH), delete
/// /campaigns/{id}/creatives            list, create
/// /creatives/{id}                      delete
///
/// /ad-slots                            list (public), create (publisher)
/// /ad-slots/{id}                       get (public), update (PUT), delete
/// /ad-slots/{id}/book                  request placement (sponsor)
/// /ad-slots/{id}/unbook                release slot (admin)
///
/// /placements                          list (role-scoped), create (sponsor)
/// /placements/{id}                     get, review (PATCH, publisher)
/// /placements/{id}/cancel              cancel (publisher or admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes (register, login, refresh, logout, me).
        .nest("/auth", auth::router())
        // Marketplace identities.
        .nest("/sponsors", profile::sponsor_router())
        .nest("/publishers", profile::publisher_router())
        // Sponsor-side campaigns and creatives.
        .nest("/campaigns", campaign::router())
        .nest("/creatives", campaign::creative_router())
        // Publisher inventory and the booking shortcut.
        .nest("/ad-slots", ad_slot::router())
        // Booking requests and review.
        .nest("/placements", placement::router())
}
