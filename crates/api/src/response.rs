//! Response envelopes for the booking endpoints.
//!
//! Most handlers return the entity itself; the marketplace booking actions
//! wrap theirs in a `{ "success": true, ... }` envelope.

use serde::Serialize;
use slotbook_db::models::ad_slot::AdSlot;
use slotbook_db::models::placement::Placement;

/// `{ "success": true, "placement": {...} }` returned by `POST /ad-slots/{id}/book`.
#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub success: bool,
    pub placement: Placement,
}

impl BookingResponse {
    pub fn new(placement: Placement) -> Self {
        Self {
            success: true,
            placement,
        }
    }
}

/// `{ "success": true, "adSlot": {...} }` returned by `POST /ad-slots/{id}/unbook`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnbookResponse {
    pub success: bool,
    pub ad_slot: AdSlot,
}

impl UnbookResponse {
    pub fn new(ad_slot: AdSlot) -> Self {
        Self {
            success: true,
            ad_slot,
        }
    }
}
