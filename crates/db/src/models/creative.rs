//! Creative model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use slotbook_core::creative::CreativeType;
use slotbook_core::types::{DbId, Timestamp};
use validator::Validate;

/// A row from the `creatives` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Creative {
    pub id: DbId,
    pub campaign_id: DbId,
    pub name: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type", try_from = "String")]
    pub creative_type: CreativeType,
    pub asset_url: String,
    pub click_url: Option<String>,
    pub is_approved: bool,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for `POST /campaigns/{id}/creatives`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCreative {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[serde(rename = "type")]
    pub creative_type: String,
    #[validate(url)]
    pub asset_url: String,
    #[validate(url)]
    pub click_url: Option<String>,
}
