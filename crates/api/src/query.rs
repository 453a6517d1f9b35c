//! Query parameter types for list endpoints.
//!
//! Enum-valued parameters arrive as raw strings and are parsed by the
//! handlers so unknown values surface as `INVALID_ARGUMENT` rather than a
//! generic extractor rejection.

use serde::Deserialize;
use slotbook_core::types::DbId;

/// `GET /placements?campaignId=&status=`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementListParams {
    pub campaign_id: Option<DbId>,
    pub status: Option<String>,
}

/// `GET /ad-slots?type=&available=&publisherId=`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdSlotListParams {
    #[serde(rename = "type")]
    pub slot_type: Option<String>,
    pub available: Option<bool>,
    pub publisher_id: Option<DbId>,
}
