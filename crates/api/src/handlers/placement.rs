//! Handlers for the `/placements` resource: requests, review, cancellation
//! and role-scoped listing.
//!
//! Placement visibility is limited to the two parties: the sponsor owning
//! the campaign and the publisher owning the slot. Anyone else gets 404.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use rust_decimal::Decimal;
use serde::Deserialize;
use slotbook_core::authz::{require_publisher, require_role, require_sponsor};
use slotbook_core::error::CoreError;
use slotbook_core::identity::Role;
use slotbook_core::placement::{missing_fields, PlacementStatus, PricingModel, ReviewDecision};
use slotbook_core::types::{DbId, Timestamp};
use slotbook_db::models::placement::{Placement, PlacementFilter, PlacementScope};
use slotbook_db::repositories::{CampaignRepo, PlacementRepo};

use crate::engine::booking::{self, PlacementDraft};
use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::context::Caller;
use crate::query::PlacementListParams;
use crate::state::AppState;

/// Request body for `POST /placements`. Every field but `message` is required.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlacementRequest {
    pub ad_slot_id: Option<DbId>,
    pub campaign_id: Option<DbId>,
    pub creative_id: Option<DbId>,
    pub agreed_price: Option<Decimal>,
    pub pricing_model: Option<String>,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
    pub message: Option<String>,
}

/// Request body for `PATCH /placements/{id}`.
#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    pub status: String,
}

/// POST /api/v1/placements
pub async fn create_placement(
    State(state): State<AppState>,
    Caller(ctx): Caller,
    AppJson(input): AppJson<CreatePlacementRequest>,
) -> AppResult<(StatusCode, Json<Placement>)> {
    require_sponsor(&ctx.resolved)?;

    let (
        Some(ad_slot_id),
        Some(campaign_id),
        Some(creative_id),
        Some(agreed_price),
        Some(pricing_model),
        Some(start_date),
        Some(end_date),
    ) = (
        input.ad_slot_id,
        input.campaign_id,
        input.creative_id,
        input.agreed_price,
        input.pricing_model.as_deref(),
        input.start_date,
        input.end_date,
    )
    else {
        return Err(missing_fields(&[
            ("adSlotId", input.ad_slot_id.is_none()),
            ("campaignId", input.campaign_id.is_none()),
            ("creativeId", input.creative_id.is_none()),
            ("agreedPrice", input.agreed_price.is_none()),
            ("pricingModel", input.pricing_model.is_none()),
            ("startDate", input.start_date.is_none()),
            ("endDate", input.end_date.is_none()),
        ])
        .into());
    };
    let pricing_model: PricingModel = pricing_model.parse()?;

    let draft = PlacementDraft {
        ad_slot_id,
        campaign_id,
        creative_id,
        agreed_price,
        pricing_model,
        start_date: Some(start_date),
        end_date: Some(end_date),
        message: input.message,
    };
    let placement = booking::request_placement(&state.pool, &ctx, draft).await?;
    Ok((StatusCode::CREATED, Json(placement)))
}

/// GET /api/v1/placements?campaignId=&status=
///
/// Sponsors see placements of their campaigns; publishers see placements on
/// their slots.
pub async fn list_placements(
    State(state): State<AppState>,
    Caller(ctx): Caller,
    Query(params): Query<PlacementListParams>,
) -> AppResult<Json<Vec<Placement>>> {
    let role = require_role(&ctx.resolved, &[Role::Sponsor, Role::Publisher])?;
    let status = params
        .status
        .as_deref()
        .map(str::parse::<PlacementStatus>)
        .transpose()?;

    let scope = match role {
        Role::Sponsor => PlacementScope::Sponsor(require_sponsor(&ctx.resolved)?),
        Role::Publisher => PlacementScope::Publisher(require_publisher(&ctx.resolved)?),
    };
    let filter = PlacementFilter {
        campaign_id: params.campaign_id,
        status,
    };

    let placements = PlacementRepo::list_scoped(&state.pool, scope, filter).await?;
    Ok(Json(placements))
}

/// GET /api/v1/placements/{id}
pub async fn get_placement(
    State(state): State<AppState>,
    Caller(ctx): Caller,
    Path(id): Path<DbId>,
) -> AppResult<Json<Placement>> {
    let placement = PlacementRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Placement", id))?;

    let visible = match (ctx.resolved.sponsor_id, ctx.resolved.publisher_id) {
        (Some(sponsor_id), _) => CampaignRepo::find_by_id(&state.pool, placement.campaign_id)
            .await?
            .is_some_and(|c| c.sponsor_id == sponsor_id),
        (None, Some(publisher_id)) => placement.publisher_id == publisher_id,
        (None, None) => false,
    };
    if !visible {
        return Err(CoreError::not_found("Placement", id).into());
    }
    Ok(Json(placement))
}

/// PATCH /api/v1/placements/{id}
///
/// Publisher review: `{"status": "APPROVED" | "REJECTED"}`.
pub async fn review_placement(
    State(state): State<AppState>,
    Caller(ctx): Caller,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<ReviewRequest>,
) -> AppResult<Json<Placement>> {
    let decision = ReviewDecision::from_requested_status(&input.status)?;
    let placement = booking::review_placement(
        &state.pool,
        &ctx,
        id,
        decision,
        state.config.budget_policy,
    )
    .await?;
    Ok(Json(placement))
}

/// POST /api/v1/placements/{id}/cancel
pub async fn cancel_placement(
    State(state): State<AppState>,
    Caller(ctx): Caller,
    Path(id): Path<DbId>,
) -> AppResult<Json<Placement>> {
    let placement = booking::cancel_placement(&state.pool, &ctx, id).await?;
    Ok(Json(placement))
}
