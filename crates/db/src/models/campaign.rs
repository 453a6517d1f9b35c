//! Campaign model and DTOs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use slotbook_core::campaign::CampaignStatus;
use slotbook_core::types::{DbId, Timestamp};
use validator::Validate;

/// A row from the `campaigns` table.
///
/// `status` is the stored status; handlers replace it with the effective
/// (schedule-derived) status before responding.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: DbId,
    pub sponsor_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub budget: Decimal,
    pub spent: Decimal,
    pub cpm_rate: Option<Decimal>,
    pub cpc_rate: Option<Decimal>,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    #[sqlx(try_from = "String")]
    pub status: CampaignStatus,
    pub target_categories: Vec<String>,
    pub target_regions: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for creating a campaign. The sponsor comes from the caller.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCampaign {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    pub budget: Decimal,
    pub cpm_rate: Option<Decimal>,
    pub cpc_rate: Option<Decimal>,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    #[serde(default)]
    pub target_categories: Vec<String>,
    #[serde(default)]
    pub target_regions: Vec<String>,
}

/// Patch body for a campaign. Only non-`None` fields are applied.
///
/// `status` is the requested status as sent on the wire; handlers resolve it
/// through the campaign transition table before it reaches the repository.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCampaign {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    pub budget: Option<Decimal>,
    pub cpm_rate: Option<Decimal>,
    pub cpc_rate: Option<Decimal>,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
    pub status: Option<String>,
    pub target_categories: Option<Vec<String>>,
    pub target_regions: Option<Vec<String>>,
}
