//! Handlers for the `/campaigns` resource.
//!
//! Campaigns are private to their sponsor: another sponsor's campaign id
//! reads as missing. Responses carry the effective (schedule-derived) status.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use slotbook_core::accrual::{validate_budget_amount, validate_budget_update};
use slotbook_core::authz::ensure_owner_hidden;
use slotbook_core::campaign::{
    effective_status, normalize_targets, request_transition, validate_rate, CampaignStatus,
};
use slotbook_core::error::CoreError;
use slotbook_core::placement::validate_schedule;
use slotbook_core::types::DbId;
use slotbook_db::models::campaign::{Campaign, CreateCampaign, UpdateCampaign};
use slotbook_db::repositories::CampaignRepo;
use validator::Validate;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::rbac::RequireSponsor;
use crate::state::AppState;

/// Replace the stored status with the one in effect right now.
pub(crate) fn with_effective_status(mut campaign: Campaign) -> Campaign {
    campaign.status = effective_status(
        campaign.status,
        campaign.start_date,
        campaign.end_date,
        Utc::now(),
    );
    campaign
}

/// Load a campaign owned by `sponsor_id`, hiding other sponsors' campaigns.
pub(crate) async fn find_owned(
    state: &AppState,
    id: DbId,
    sponsor_id: DbId,
) -> AppResult<Campaign> {
    let campaign = CampaignRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Campaign", id))?;
    ensure_owner_hidden("Campaign", id, campaign.sponsor_id, sponsor_id)?;
    Ok(campaign)
}

/// POST /api/v1/campaigns
pub async fn create_campaign(
    State(state): State<AppState>,
    RequireSponsor(_, sponsor_id): RequireSponsor,
    AppJson(mut input): AppJson<CreateCampaign>,
) -> AppResult<(StatusCode, Json<Campaign>)> {
    input.validate()?;
    validate_budget_amount(input.budget)?;
    validate_rate("cpmRate", input.cpm_rate)?;
    validate_rate("cpcRate", input.cpc_rate)?;
    validate_schedule(input.start_date, input.end_date)?;
    input.target_categories = normalize_targets(input.target_categories);
    input.target_regions = normalize_targets(input.target_regions);

    let campaign = CampaignRepo::create(&state.pool, sponsor_id, &input).await?;
    tracing::info!(campaign_id = campaign.id, sponsor_id, budget = %campaign.budget, "Campaign created");
    Ok((StatusCode::CREATED, Json(with_effective_status(campaign))))
}

/// GET /api/v1/campaigns
pub async fn list_campaigns(
    State(state): State<AppState>,
    RequireSponsor(_, sponsor_id): RequireSponsor,
) -> AppResult<Json<Vec<Campaign>>> {
    let campaigns = CampaignRepo::list_for_sponsor(&state.pool, sponsor_id).await?;
    Ok(Json(campaigns.into_iter().map(with_effective_status).collect()))
}

/// GET /api/v1/campaigns/{id}
pub async fn get_campaign(
    State(state): State<AppState>,
    RequireSponsor(_, sponsor_id): RequireSponsor,
    Path(id): Path<DbId>,
) -> AppResult<Json<Campaign>> {
    let campaign = find_owned(&state, id, sponsor_id).await?;
    Ok(Json(with_effective_status(campaign)))
}

/// PATCH /api/v1/campaigns/{id}
///
/// Runs against the row locked `FOR UPDATE`, so the budget guard cannot
/// interleave with an approval accruing spend on the same campaign.
pub async fn update_campaign(
    State(state): State<AppState>,
    RequireSponsor(_, sponsor_id): RequireSponsor,
    Path(id): Path<DbId>,
    AppJson(mut input): AppJson<UpdateCampaign>,
) -> AppResult<Json<Campaign>> {
    input.validate()?;

    let mut tx = state.pool.begin().await?;
    let current = CampaignRepo::find_for_update(&mut *tx, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Campaign", id))?;
    ensure_owner_hidden("Campaign", id, current.sponsor_id, sponsor_id)?;

    if let Some(budget) = input.budget {
        validate_budget_update(budget, current.spent)?;
    }
    validate_rate("cpmRate", input.cpm_rate)?;
    validate_rate("cpcRate", input.cpc_rate)?;
    validate_schedule(
        input.start_date.unwrap_or(current.start_date),
        input.end_date.unwrap_or(current.end_date),
    )?;

    if let Some(requested) = input.status.take() {
        let requested: CampaignStatus = requested.parse()?;
        let from = effective_status(current.status, current.start_date, current.end_date, Utc::now());
        let to = request_transition(from, requested)?;
        if to != from {
            input.status = Some(to.as_str().to_string());
        }
    }
    input.target_categories = input.target_categories.map(normalize_targets);
    input.target_regions = input.target_regions.map(normalize_targets);

    let campaign = CampaignRepo::update_tx(&mut *tx, id, &input).await?;
    tx.commit().await?;

    tracing::info!(campaign_id = id, sponsor_id, status = %campaign.status, "Campaign updated");
    Ok(Json(with_effective_status(campaign)))
}

/// DELETE /api/v1/campaigns/{id}
///
/// Refused while any placement is pending or holding a slot; otherwise
/// creatives and settled placements go with the campaign.
pub async fn delete_campaign(
    State(state): State<AppState>,
    RequireSponsor(_, sponsor_id): RequireSponsor,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let mut tx = state.pool.begin().await?;
    let current = CampaignRepo::find_for_update(&mut *tx, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Campaign", id))?;
    ensure_owner_hidden("Campaign", id, current.sponsor_id, sponsor_id)?;

    if CampaignRepo::has_blocking_placements(&mut *tx, id).await? {
        return Err(CoreError::Conflict(
            "Campaign has pending or active placements and cannot be deleted".into(),
        )
        .into());
    }
    CampaignRepo::delete_tx(&mut *tx, id).await?;
    tx.commit().await?;

    tracing::info!(campaign_id = id, sponsor_id, "Campaign deleted");
    Ok(StatusCode::NO_CONTENT)
}
