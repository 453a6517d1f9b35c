//! Ad slot (publisher inventory) model and DTOs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use slotbook_core::ad_slot::AdSlotType;
use slotbook_core::types::{DbId, Timestamp};
use validator::Validate;

use super::nullable;

/// A row from the `ad_slots` table.
///
/// `is_available = false` is the inventory lock held by an approved placement.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdSlot {
    pub id: DbId,
    pub publisher_id: DbId,
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    #[sqlx(rename = "type", try_from = "String")]
    pub slot_type: AdSlotType,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub base_price: Decimal,
    pub is_available: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for `POST /ad-slots`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAdSlot {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub slot_type: String,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub base_price: Decimal,
}

/// Request body for `PUT /ad-slots/{id}`.
///
/// Omitted keys keep their current value. `description`, `width` and
/// `height` can be cleared with an explicit `null`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAdSlot {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[validate(length(max = 5000))]
    pub description: Option<Option<String>>,
    #[serde(rename = "type")]
    pub slot_type: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub width: Option<Option<i32>>,
    #[serde(default, deserialize_with = "nullable")]
    pub height: Option<Option<i32>>,
    pub base_price: Option<Decimal>,
}

/// Normalized values written by an ad slot insert or update.
///
/// Built by the handler after type parsing and dimension normalization so the
/// repository never sees podcast dimensions.
#[derive(Debug, Clone)]
pub struct AdSlotValues {
    pub name: String,
    pub description: Option<String>,
    pub slot_type: AdSlotType,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub base_price: Decimal,
}

/// Filters for the public marketplace listing.
#[derive(Debug, Clone, Default)]
pub struct AdSlotFilter {
    pub slot_type: Option<AdSlotType>,
    pub available: Option<bool>,
    pub publisher_id: Option<DbId>,
}
