//! Placement (booking request / agreement) model and DTOs.

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use slotbook_core::placement::{PlacementStatus, PricingModel};
use slotbook_core::types::{DbId, Timestamp};

/// A row from the `placements` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    pub id: DbId,
    pub campaign_id: DbId,
    pub creative_id: DbId,
    pub ad_slot_id: DbId,
    pub publisher_id: DbId,
    pub agreed_price: Decimal,
    #[sqlx(try_from = "String")]
    pub pricing_model: PricingModel,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    #[sqlx(try_from = "String")]
    pub status: PlacementStatus,
    pub impressions: i64,
    pub clicks: i64,
    pub conversions: i64,
    pub message: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Fully validated values for a new placement.
///
/// `publisher_id` is always copied from the ad slot row, never from the client.
/// New placements start in `PENDING`.
#[derive(Debug, Clone)]
pub struct CreatePlacement {
    pub campaign_id: DbId,
    pub creative_id: DbId,
    pub ad_slot_id: DbId,
    pub publisher_id: DbId,
    pub agreed_price: Decimal,
    pub pricing_model: PricingModel,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub message: Option<String>,
}

/// Which side of the marketplace a listing is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementScope {
    /// Placements of campaigns owned by this sponsor.
    Sponsor(DbId),
    /// Placements on slots owned by this publisher.
    Publisher(DbId),
}

/// Optional filters for a scoped placement listing.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlacementFilter {
    pub campaign_id: Option<DbId>,
    pub status: Option<PlacementStatus>,
}
