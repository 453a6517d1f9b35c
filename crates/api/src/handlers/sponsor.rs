//! Handlers for the `/sponsors` resource (sponsor signup and own profile).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use slotbook_core::error::CoreError;
use slotbook_db::models::sponsor::{CreateSponsor, Sponsor, UpdateSponsor};
use slotbook_db::repositories::SponsorRepo;
use validator::Validate;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::auth::Principal;
use crate::state::AppState;

/// POST /api/v1/sponsors
///
/// Register the caller as a sponsor. A second sponsor for the same user is a 409.
pub async fn create_sponsor(
    State(state): State<AppState>,
    principal: Principal,
    AppJson(input): AppJson<CreateSponsor>,
) -> AppResult<(StatusCode, Json<Sponsor>)> {
    input.validate()?;
    let sponsor = SponsorRepo::create(&state.pool, principal.id, &input).await?;
    tracing::info!(sponsor_id = sponsor.id, user_id = principal.id, "Sponsor created");
    Ok((StatusCode::CREATED, Json(sponsor)))
}

/// GET /api/v1/sponsors/me
pub async fn get_my_sponsor(
    State(state): State<AppState>,
    principal: Principal,
) -> AppResult<Json<Sponsor>> {
    let sponsor = SponsorRepo::find_by_user_id(&state.pool, principal.id)
        .await?
        .ok_or_else(|| CoreError::not_found("Sponsor", principal.id))?;
    Ok(Json(sponsor))
}

/// PUT /api/v1/sponsors/me
pub async fn update_my_sponsor(
    State(state): State<AppState>,
    principal: Principal,
    AppJson(input): AppJson<UpdateSponsor>,
) -> AppResult<Json<Sponsor>> {
    input.validate()?;
    let existing = SponsorRepo::find_by_user_id(&state.pool, principal.id)
        .await?
        .ok_or_else(|| CoreError::not_found("Sponsor", principal.id))?;
    let sponsor = SponsorRepo::update(&state.pool, existing.id, &input)
        .await?
        .ok_or_else(|| CoreError::not_found("Sponsor", existing.id))?;
    Ok(Json(sponsor))
}
