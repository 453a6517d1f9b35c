//! Handlers for the `/ad-slots` resource: publisher inventory management,
//! the public marketplace listing, and the book / unbook actions.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use rust_decimal::Decimal;
use serde::Deserialize;
use slotbook_core::ad_slot::{
    ensure_slot_mutable, normalize_dimensions, validate_base_price, AdSlotType,
};
use slotbook_core::authz::{ensure_owner_public, require_sponsor};
use slotbook_core::error::CoreError;
use slotbook_core::placement::{missing_fields, PricingModel};
use slotbook_core::types::{DbId, Timestamp};
use slotbook_db::models::ad_slot::{AdSlot, AdSlotFilter, AdSlotValues, CreateAdSlot, UpdateAdSlot};
use slotbook_db::repositories::AdSlotRepo;
use validator::Validate;

use crate::engine::booking::{self, PlacementDraft};
use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::context::Caller;
use crate::middleware::rbac::RequirePublisher;
use crate::query::AdSlotListParams;
use crate::response::{BookingResponse, UnbookResponse};
use crate::state::AppState;

/// Request body for `POST /ad-slots/{id}/book`.
///
/// Only the campaign and creative are required; everything else defaults
/// (campaign schedule, `FLAT_RATE`, zero add-on fee).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookRequest {
    pub campaign_id: Option<DbId>,
    pub creative_id: Option<DbId>,
    pub agreed_price: Option<Decimal>,
    pub pricing_model: Option<String>,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
    pub message: Option<String>,
}

/// POST /api/v1/ad-slots
pub async fn create_ad_slot(
    State(state): State<AppState>,
    RequirePublisher(_, publisher_id): RequirePublisher,
    AppJson(input): AppJson<CreateAdSlot>,
) -> AppResult<(StatusCode, Json<AdSlot>)> {
    input.validate()?;
    let slot_type: AdSlotType = input.slot_type.parse()?;
    let (width, height) = normalize_dimensions(slot_type, input.width, input.height)?;
    validate_base_price(input.base_price)?;

    let values = AdSlotValues {
        name: input.name,
        description: input.description,
        slot_type,
        width,
        height,
        base_price: input.base_price,
    };
    let slot = AdSlotRepo::create(&state.pool, publisher_id, &values).await?;
    tracing::info!(ad_slot_id = slot.id, publisher_id, slot_type = %slot.slot_type, "Ad slot created");
    Ok((StatusCode::CREATED, Json(slot)))
}

/// GET /api/v1/ad-slots?type=&available=&publisherId=
///
/// Public marketplace listing.
pub async fn list_ad_slots(
    State(state): State<AppState>,
    Query(params): Query<AdSlotListParams>,
) -> AppResult<Json<Vec<AdSlot>>> {
    let slot_type = params
        .slot_type
        .as_deref()
        .map(str::parse::<AdSlotType>)
        .transpose()?;
    let filter = AdSlotFilter {
        slot_type,
        available: params.available,
        publisher_id: params.publisher_id,
    };
    let slots = AdSlotRepo::list(&state.pool, &filter).await?;
    Ok(Json(slots))
}

/// GET /api/v1/ad-slots/{id}
pub async fn get_ad_slot(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<AdSlot>> {
    let slot = AdSlotRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("AdSlot", id))?;
    Ok(Json(slot))
}

/// PUT /api/v1/ad-slots/{id}
///
/// Owner only (403 otherwise, slots are public). Refused with 409 while the
/// slot is booked.
pub async fn update_ad_slot(
    State(state): State<AppState>,
    RequirePublisher(_, publisher_id): RequirePublisher,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateAdSlot>,
) -> AppResult<Json<AdSlot>> {
    input.validate()?;
    let slot_type = input
        .slot_type
        .as_deref()
        .map(str::parse::<AdSlotType>)
        .transpose()?;

    let mut tx = state.pool.begin().await?;
    let current = AdSlotRepo::find_for_update(&mut *tx, id)
        .await?
        .ok_or_else(|| CoreError::not_found("AdSlot", id))?;
    ensure_owner_public("AdSlot", current.publisher_id, publisher_id)?;
    ensure_slot_mutable(current.is_available)?;

    let slot_type = slot_type.unwrap_or(current.slot_type);
    let (width, height) = normalize_dimensions(
        slot_type,
        input.width.unwrap_or(current.width),
        input.height.unwrap_or(current.height),
    )?;
    let base_price = input.base_price.unwrap_or(current.base_price);
    validate_base_price(base_price)?;

    let values = AdSlotValues {
        name: input.name.unwrap_or(current.name),
        description: input.description.unwrap_or(current.description),
        slot_type,
        width,
        height,
        base_price,
    };
    let slot = AdSlotRepo::update_tx(&mut *tx, id, &values).await?;
    tx.commit().await?;

    tracing::info!(ad_slot_id = id, publisher_id, "Ad slot updated");
    Ok(Json(slot))
}

/// DELETE /api/v1/ad-slots/{id}
///
/// Same guards as update. A slot still referenced by placements cannot be
/// deleted (409).
pub async fn delete_ad_slot(
    State(state): State<AppState>,
    RequirePublisher(_, publisher_id): RequirePublisher,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let mut tx = state.pool.begin().await?;
    let current = AdSlotRepo::find_for_update(&mut *tx, id)
        .await?
        .ok_or_else(|| CoreError::not_found("AdSlot", id))?;
    ensure_owner_public("AdSlot", current.publisher_id, publisher_id)?;
    ensure_slot_mutable(current.is_available)?;

    AdSlotRepo::delete_tx(&mut *tx, id).await?;
    tx.commit().await?;

    tracing::info!(ad_slot_id = id, publisher_id, "Ad slot deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/ad-slots/{id}/book
///
/// Marketplace shortcut for requesting a placement on this slot.
pub async fn book_ad_slot(
    State(state): State<AppState>,
    Caller(ctx): Caller,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<BookRequest>,
) -> AppResult<(StatusCode, Json<BookingResponse>)> {
    require_sponsor(&ctx.resolved)?;

    let (Some(campaign_id), Some(creative_id)) = (input.campaign_id, input.creative_id) else {
        return Err(missing_fields(&[
            ("campaignId", input.campaign_id.is_none()),
            ("creativeId", input.creative_id.is_none()),
        ])
        .into());
    };
    let pricing_model = match input.pricing_model.as_deref() {
        Some(raw) => raw.parse()?,
        None => PricingModel::FlatRate,
    };

    let draft = PlacementDraft {
        ad_slot_id: id,
        campaign_id,
        creative_id,
        agreed_price: input.agreed_price.unwrap_or(Decimal::ZERO),
        pricing_model,
        start_date: input.start_date,
        end_date: input.end_date,
        message: input.message,
    };
    let placement = booking::request_placement(&state.pool, &ctx, draft).await?;
    Ok((StatusCode::CREATED, Json(BookingResponse::new(placement))))
}

/// POST /api/v1/ad-slots/{id}/unbook
///
/// Admin only. Cancels the holding placement, if any, and frees the slot.
pub async fn unbook_ad_slot(
    State(state): State<AppState>,
    Caller(ctx): Caller,
    Path(id): Path<DbId>,
) -> AppResult<Json<UnbookResponse>> {
    let slot = booking::unbook_ad_slot(&state.pool, &ctx, id).await?;
    Ok(Json(UnbookResponse::new(slot)))
}
