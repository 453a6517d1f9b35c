//! Placement state machine.
//!
//! ```text
//! PENDING --approve--> APPROVED        (locks the ad slot, accrues spend)
//! PENDING --reject---> REJECTED        (no side effects)
//! APPROVED | ACTIVE | PAUSED --cancel--> CANCELLED   (unlocks the ad slot)
//! ```
//!
//! The review engine accepts exactly one mutation on a PENDING placement.
//! ACTIVE / PAUSED / COMPLETED are driven by the schedule outside this engine.

use rust_decimal::Decimal;

use crate::error::CoreError;
use crate::text_enum::define_text_enum;
use crate::types::Timestamp;

define_text_enum! {
    /// Lifecycle status of a placement.
    PlacementStatus("placement status") {
        Pending = "PENDING",
        Approved = "APPROVED",
        Rejected = "REJECTED",
        Active = "ACTIVE",
        Paused = "PAUSED",
        Completed = "COMPLETED",
        Cancelled = "CANCELLED",
    }
}

define_text_enum! {
    /// How the negotiated add-on fee is priced.
    PricingModel("pricing model") {
        Cpm = "CPM",
        Cpc = "CPC",
        Cpa = "CPA",
        FlatRate = "FLAT_RATE",
    }
}

/// Statuses in which a placement holds its ad slot's inventory lock.
pub const HOLDING_STATUSES: &[PlacementStatus] = &[
    PlacementStatus::Approved,
    PlacementStatus::Active,
    PlacementStatus::Paused,
];

impl PlacementStatus {
    /// Whether a placement in this status holds the slot lock.
    pub fn is_holding(self) -> bool {
        HOLDING_STATUSES.contains(&self)
    }

    /// Whether a placement in this status prevents deleting its campaign.
    pub fn blocks_campaign_delete(self) -> bool {
        self == PlacementStatus::Pending || self.is_holding()
    }
}

/// A publisher's decision on a pending placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewDecision {
    Approve,
    Reject,
}

impl ReviewDecision {
    /// Parse the requested target status of a review (`APPROVED` / `REJECTED`).
    ///
    /// Any other value, including otherwise valid placement statuses, is an
    /// invalid argument: review can only approve or reject.
    pub fn from_requested_status(status: &str) -> Result<Self, CoreError> {
        match status {
            "APPROVED" => Ok(ReviewDecision::Approve),
            "REJECTED" => Ok(ReviewDecision::Reject),
            other => Err(CoreError::InvalidArgument(format!(
                "Invalid status '{other}'. Must be one of: APPROVED, REJECTED"
            ))),
        }
    }

    /// Status a placement moves to under this decision.
    pub fn target_status(self) -> PlacementStatus {
        match self {
            ReviewDecision::Approve => PlacementStatus::Approved,
            ReviewDecision::Reject => PlacementStatus::Rejected,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ReviewDecision::Approve => "APPROVE",
            ReviewDecision::Reject => "REJECT",
        }
    }
}

impl std::fmt::Display for ReviewDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Message returned when a review targets a placement that already left PENDING.
pub const NOT_PENDING_MESSAGE: &str = "Only pending requests can be updated";

/// Message returned when an approval finds its slot already locked.
pub const SLOT_BOOKED_MESSAGE: &str = "Ad slot already booked";

/// Apply a review decision to the current status.
pub fn review_transition(
    current: PlacementStatus,
    decision: ReviewDecision,
) -> Result<PlacementStatus, CoreError> {
    if current != PlacementStatus::Pending {
        return Err(CoreError::Conflict(NOT_PENDING_MESSAGE.into()));
    }
    Ok(decision.target_status())
}

/// Cancel a placement that holds its slot.
pub fn cancel_transition(current: PlacementStatus) -> Result<PlacementStatus, CoreError> {
    if !current.is_holding() {
        return Err(CoreError::Conflict(format!(
            "Only approved, active or paused placements can be cancelled (status is {current})"
        )));
    }
    Ok(PlacementStatus::Cancelled)
}

/// Approval-time availability re-check.
pub fn ensure_slot_available(is_available: bool) -> Result<(), CoreError> {
    if is_available {
        Ok(())
    } else {
        Err(CoreError::Conflict(SLOT_BOOKED_MESSAGE.into()))
    }
}

/// Validate a date range: the end must be strictly after the start.
pub fn validate_schedule(start: Timestamp, end: Timestamp) -> Result<(), CoreError> {
    if end <= start {
        return Err(CoreError::InvalidArgument(
            "endDate must be after startDate".into(),
        ));
    }
    Ok(())
}

/// Validate the negotiated add-on fee.
pub fn validate_agreed_price(agreed_price: Decimal) -> Result<(), CoreError> {
    if agreed_price.is_sign_negative() {
        return Err(CoreError::InvalidArgument(
            "agreedPrice must not be negative".into(),
        ));
    }
    Ok(())
}

/// Build the error for a request missing required fields.
///
/// `fields` pairs each wire field name with whether it is absent; only the
/// absent ones are named.
pub fn missing_fields(fields: &[(&str, bool)]) -> CoreError {
    let names: Vec<&str> = fields
        .iter()
        .filter_map(|&(name, absent)| absent.then_some(name))
        .collect();
    CoreError::InvalidArgument(format!("Missing required fields: {}", names.join(", ")))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{Duration, TimeZone, Utc};
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn pending_approves_and_rejects() {
        assert_eq!(
            review_transition(PlacementStatus::Pending, ReviewDecision::Approve).unwrap(),
            PlacementStatus::Approved
        );
        assert_eq!(
            review_transition(PlacementStatus::Pending, ReviewDecision::Reject).unwrap(),
            PlacementStatus::Rejected
        );
    }

    #[test]
    fn every_non_pending_status_is_closed_to_review() {
        for status in PlacementStatus::ALL.iter().copied() {
            if status == PlacementStatus::Pending {
                continue;
            }
            for decision in [ReviewDecision::Approve, ReviewDecision::Reject] {
                assert_matches!(
                    review_transition(status, decision),
                    Err(CoreError::Conflict(msg)) if msg == NOT_PENDING_MESSAGE
                );
            }
        }
    }

    #[test]
    fn cancel_only_from_holding_states() {
        for status in PlacementStatus::ALL.iter().copied() {
            let result = cancel_transition(status);
            if status.is_holding() {
                assert_eq!(result.unwrap(), PlacementStatus::Cancelled);
            } else {
                assert_matches!(result, Err(CoreError::Conflict(_)));
            }
        }
    }

    #[test]
    fn requested_status_parsing() {
        assert_eq!(
            ReviewDecision::from_requested_status("APPROVED").unwrap(),
            ReviewDecision::Approve
        );
        assert_eq!(
            ReviewDecision::from_requested_status("REJECTED").unwrap(),
            ReviewDecision::Reject
        );
        for bad in ["PENDING", "approved", "ACTIVE", ""] {
            assert_matches!(
                ReviewDecision::from_requested_status(bad),
                Err(CoreError::InvalidArgument(_))
            );
        }
    }

    #[test]
    fn status_text_round_trip_and_unknown_rejected() {
        assert_eq!("FLAT_RATE".parse::<PricingModel>().unwrap(), PricingModel::FlatRate);
        assert_eq!(PlacementStatus::Cancelled.as_str(), "CANCELLED");
        let err = "BOOKED".parse::<PlacementStatus>().unwrap_err();
        assert!(err.to_string().contains("Invalid placement status 'BOOKED'"));
    }

    #[test]
    fn holding_and_delete_blocking() {
        assert!(PlacementStatus::Approved.is_holding());
        assert!(!PlacementStatus::Pending.is_holding());
        assert!(PlacementStatus::Pending.blocks_campaign_delete());
        assert!(!PlacementStatus::Rejected.blocks_campaign_delete());
        assert!(!PlacementStatus::Cancelled.blocks_campaign_delete());
    }

    #[test]
    fn locked_slot_is_conflict() {
        assert!(ensure_slot_available(true).is_ok());
        assert_matches!(
            ensure_slot_available(false),
            Err(CoreError::Conflict(msg)) if msg == SLOT_BOOKED_MESSAGE
        );
    }

    #[test]
    fn schedule_requires_end_after_start() {
        let start = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        assert!(validate_schedule(start, start + Duration::days(1)).is_ok());
        assert_matches!(validate_schedule(start, start), Err(CoreError::InvalidArgument(_)));
        assert_matches!(
            validate_schedule(start, start - Duration::days(1)),
            Err(CoreError::InvalidArgument(_))
        );
    }

    #[test]
    fn missing_fields_names_only_absent_ones() {
        let err = missing_fields(&[("adSlotId", false), ("campaignId", true), ("endDate", true)]);
        assert_matches!(
            err,
            CoreError::InvalidArgument(msg) if msg == "Missing required fields: campaignId, endDate"
        );
    }

    #[test]
    fn agreed_price_not_negative() {
        assert!(validate_agreed_price(dec!(0)).is_ok());
        assert!(validate_agreed_price(dec!(12.50)).is_ok());
        assert_matches!(validate_agreed_price(dec!(-1)), Err(CoreError::InvalidArgument(_)));
    }
}
