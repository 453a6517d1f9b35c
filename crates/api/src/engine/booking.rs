//! Booking/approval engine.
//!
//! Every operation takes the caller's [`RequestContext`] explicitly and does
//! its own role and ownership checks, so the engine can be driven from HTTP
//! handlers and tests alike.
//!
//! Mutations of the inventory lock (`ad_slots.is_available`) happen only
//! here, each inside one transaction. Row locks are always taken in the
//! order placement -> ad slot -> campaign so concurrent reviews, cancels and
//! unbooks queue up instead of deadlocking. The loser of an approval race
//! blocks on the ad slot row, then re-reads it as booked and fails with
//! `Conflict`; the partial unique index on holding placements backs this up
//! at the storage level.

use rust_decimal::Decimal;
use slotbook_core::accrual::{accrual_amount, apply_accrual, BudgetPolicy};
use slotbook_core::authz::{ensure_owner_hidden, require_admin, require_publisher, require_sponsor};
use slotbook_core::error::CoreError;
use slotbook_core::identity::RequestContext;
use slotbook_core::placement::{
    cancel_transition, ensure_slot_available, review_transition, validate_agreed_price,
    validate_schedule, PricingModel, ReviewDecision, SLOT_BOOKED_MESSAGE,
};
use slotbook_core::types::{DbId, Timestamp};
use slotbook_db::models::ad_slot::AdSlot;
use slotbook_db::models::placement::{CreatePlacement, Placement};
use slotbook_db::repositories::{AdSlotRepo, CampaignRepo, CreativeRepo, PlacementRepo};
use slotbook_db::DbPool;

use crate::error::AppResult;

/// A sponsor's request for an ad slot, after wire-level defaults are applied.
#[derive(Debug, Clone)]
pub struct PlacementDraft {
    pub ad_slot_id: DbId,
    pub campaign_id: DbId,
    pub creative_id: DbId,
    pub agreed_price: Decimal,
    pub pricing_model: PricingModel,
    /// `None` runs the placement over the campaign's own schedule.
    pub start_date: Option<Timestamp>,
    /// `None` runs the placement over the campaign's own schedule.
    pub end_date: Option<Timestamp>,
    pub message: Option<String>,
}

/// Create a `PENDING` placement for the calling sponsor.
///
/// The slot is neither checked for availability nor locked here; locking is
/// deferred to approval. The publisher is always taken from the slot row.
pub async fn request_placement(
    pool: &DbPool,
    ctx: &RequestContext,
    draft: PlacementDraft,
) -> AppResult<Placement> {
    let sponsor_id = require_sponsor(&ctx.resolved)?;
    validate_agreed_price(draft.agreed_price)?;

    let campaign = CampaignRepo::find_by_id(pool, draft.campaign_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Campaign", draft.campaign_id))?;
    ensure_owner_hidden("Campaign", campaign.id, campaign.sponsor_id, sponsor_id)?;

    let creative = CreativeRepo::find_by_id(pool, draft.creative_id)
        .await?
        .filter(|c| c.campaign_id == campaign.id)
        .ok_or_else(|| CoreError::not_found("Creative", draft.creative_id))?;

    let slot = AdSlotRepo::find_by_id(pool, draft.ad_slot_id)
        .await?
        .ok_or_else(|| CoreError::not_found("AdSlot", draft.ad_slot_id))?;

    let start_date = draft.start_date.unwrap_or(campaign.start_date);
    let end_date = draft.end_date.unwrap_or(campaign.end_date);
    validate_schedule(start_date, end_date)?;

    let input = CreatePlacement {
        campaign_id: campaign.id,
        creative_id: creative.id,
        ad_slot_id: slot.id,
        publisher_id: slot.publisher_id,
        agreed_price: draft.agreed_price,
        pricing_model: draft.pricing_model,
        start_date,
        end_date,
        message: draft.message,
    };
    let placement = PlacementRepo::create(pool, &input).await?;

    tracing::info!(
        placement_id = placement.id,
        campaign_id = placement.campaign_id,
        ad_slot_id = placement.ad_slot_id,
        publisher_id = placement.publisher_id,
        sponsor_id,
        "Placement requested"
    );
    Ok(placement)
}

/// Approve or reject a pending placement as its publisher.
///
/// Approval locks the slot and accrues `base_price * months` onto the
/// campaign's `spent`, subject to `policy`. Rejection touches nothing but the
/// placement. Any failure rolls the whole transaction back.
pub async fn review_placement(
    pool: &DbPool,
    ctx: &RequestContext,
    placement_id: DbId,
    decision: ReviewDecision,
    policy: BudgetPolicy,
) -> AppResult<Placement> {
    let publisher_id = require_publisher(&ctx.resolved)?;

    let mut tx = pool.begin().await?;

    let placement = PlacementRepo::find_for_update(&mut *tx, placement_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Placement", placement_id))?;
    ensure_owner_hidden("Placement", placement_id, placement.publisher_id, publisher_id)?;
    let next = review_transition(placement.status, decision)?;

    let updated = match decision {
        ReviewDecision::Approve => {
            let slot = AdSlotRepo::find_for_update(&mut *tx, placement.ad_slot_id)
                .await?
                .ok_or_else(|| CoreError::not_found("AdSlot", placement.ad_slot_id))?;
            ensure_slot_available(slot.is_available)?;

            let amount = accrual_amount(slot.base_price, placement.start_date, placement.end_date);

            let campaign = CampaignRepo::find_for_update(&mut *tx, placement.campaign_id)
                .await?
                .ok_or_else(|| CoreError::not_found("Campaign", placement.campaign_id))?;
            let new_spent = apply_accrual(policy, campaign.budget, campaign.spent, amount)?;

            AdSlotRepo::lock_tx(&mut *tx, slot.id)
                .await?
                .ok_or_else(|| CoreError::Conflict(SLOT_BOOKED_MESSAGE.into()))?;
            CampaignRepo::set_spent_tx(&mut *tx, campaign.id, new_spent).await?;
            let updated = PlacementRepo::set_status_tx(&mut *tx, placement_id, next).await?;

            tracing::info!(
                placement_id,
                publisher_id,
                ad_slot_id = slot.id,
                campaign_id = campaign.id,
                accrued = %amount,
                spent = %new_spent,
                "Placement approved"
            );
            updated
        }
        ReviewDecision::Reject => {
            let updated = PlacementRepo::set_status_tx(&mut *tx, placement_id, next).await?;
            tracing::info!(placement_id, publisher_id, "Placement rejected");
            updated
        }
    };

    tx.commit().await?;
    Ok(updated)
}

/// Cancel a holding placement and release its slot.
///
/// Allowed for the owning publisher or an admin. Accrued spend is kept so
/// `spent` stays monotonic.
pub async fn cancel_placement(
    pool: &DbPool,
    ctx: &RequestContext,
    placement_id: DbId,
) -> AppResult<Placement> {
    let caller_publisher = if ctx.is_admin() {
        None
    } else {
        Some(require_publisher(&ctx.resolved)?)
    };

    let mut tx = pool.begin().await?;

    let placement = PlacementRepo::find_for_update(&mut *tx, placement_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Placement", placement_id))?;
    if let Some(publisher_id) = caller_publisher {
        ensure_owner_hidden("Placement", placement_id, placement.publisher_id, publisher_id)?;
    }
    let next = cancel_transition(placement.status)?;

    AdSlotRepo::find_for_update(&mut *tx, placement.ad_slot_id)
        .await?
        .ok_or_else(|| CoreError::not_found("AdSlot", placement.ad_slot_id))?;
    let updated = PlacementRepo::set_status_tx(&mut *tx, placement_id, next).await?;
    AdSlotRepo::unlock_tx(&mut *tx, placement.ad_slot_id).await?;

    tx.commit().await?;

    tracing::info!(
        placement_id,
        ad_slot_id = placement.ad_slot_id,
        principal_id = ctx.principal_id,
        admin = ctx.is_admin(),
        "Placement cancelled"
    );
    Ok(updated)
}

/// Administrative release of a slot.
///
/// Cancels whichever placement holds the slot, then marks it available, so
/// the placement state machine stays closed over every unlock.
pub async fn unbook_ad_slot(
    pool: &DbPool,
    ctx: &RequestContext,
    ad_slot_id: DbId,
) -> AppResult<AdSlot> {
    require_admin(ctx)?;

    let mut tx = pool.begin().await?;

    let mut holder = PlacementRepo::find_holding_for_slot_for_update(&mut *tx, ad_slot_id).await?;
    let slot = AdSlotRepo::find_for_update(&mut *tx, ad_slot_id)
        .await?
        .ok_or_else(|| CoreError::not_found("AdSlot", ad_slot_id))?;

    // An approval may have committed while we waited on the slot lock.
    if holder.is_none() && !slot.is_available {
        holder = PlacementRepo::find_holding_for_slot_for_update(&mut *tx, ad_slot_id).await?;
    }

    let cancelled_id = match holder {
        Some(placement) => {
            let next = cancel_transition(placement.status)?;
            PlacementRepo::set_status_tx(&mut *tx, placement.id, next).await?;
            Some(placement.id)
        }
        None => None,
    };
    let slot = AdSlotRepo::unlock_tx(&mut *tx, ad_slot_id).await?;

    tx.commit().await?;

    tracing::info!(
        ad_slot_id,
        principal_id = ctx.principal_id,
        cancelled_placement_id = ?cancelled_id,
        "Ad slot unbooked"
    );
    Ok(slot)
}
