//! Handlers for creatives, nested under their campaign.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use slotbook_core::authz::ensure_owner_hidden;
use slotbook_core::creative::CreativeType;
use slotbook_core::error::CoreError;
use slotbook_core::types::DbId;
use slotbook_db::models::creative::{CreateCreative, Creative};
use slotbook_db::repositories::{CampaignRepo, CreativeRepo};
use validator::Validate;

use super::campaign::find_owned;
use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::rbac::RequireSponsor;
use crate::state::AppState;

/// POST /api/v1/campaigns/{campaign_id}/creatives
pub async fn create_creative(
    State(state): State<AppState>,
    RequireSponsor(_, sponsor_id): RequireSponsor,
    Path(campaign_id): Path<DbId>,
    AppJson(input): AppJson<CreateCreative>,
) -> AppResult<(StatusCode, Json<Creative>)> {
    input.validate()?;
    let creative_type: CreativeType = input.creative_type.parse()?;
    let campaign = find_owned(&state, campaign_id, sponsor_id).await?;

    let creative = CreativeRepo::create(&state.pool, campaign.id, creative_type, &input).await?;
    tracing::info!(creative_id = creative.id, campaign_id, "Creative created");
    Ok((StatusCode::CREATED, Json(creative)))
}

/// GET /api/v1/campaigns/{campaign_id}/creatives
pub async fn list_creatives(
    State(state): State<AppState>,
    RequireSponsor(_, sponsor_id): RequireSponsor,
    Path(campaign_id): Path<DbId>,
) -> AppResult<Json<Vec<Creative>>> {
    let campaign = find_owned(&state, campaign_id, sponsor_id).await?;
    let creatives = CreativeRepo::list_for_campaign(&state.pool, campaign.id).await?;
    Ok(Json(creatives))
}

/// DELETE /api/v1/creatives/{id}
///
/// Ownership is checked through the creative's campaign. A creative still
/// referenced by a placement cannot be deleted (409).
pub async fn delete_creative(
    State(state): State<AppState>,
    RequireSponsor(_, sponsor_id): RequireSponsor,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let creative = CreativeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Creative", id))?;
    let campaign = CampaignRepo::find_by_id(&state.pool, creative.campaign_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Creative", id))?;
    ensure_owner_hidden("Creative", id, campaign.sponsor_id, sponsor_id)?;

    CreativeRepo::delete(&state.pool, id).await?;
    tracing::info!(creative_id = id, campaign_id = campaign.id, "Creative deleted");
    Ok(StatusCode::NO_CONTENT)
}
