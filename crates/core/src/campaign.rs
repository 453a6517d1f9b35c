//! Campaign status rules.
//!
//! The stored status is only part of the story: COMPLETED and ACTIVE are
//! derived from the schedule at read time (see [`effective_status`]). Status
//! changes requested by the owning sponsor go through [`request_transition`],
//! a total function over an explicit table.

use rust_decimal::Decimal;

use crate::error::CoreError;
use crate::text_enum::define_text_enum;
use crate::types::Timestamp;

define_text_enum! {
    /// Lifecycle status of a campaign.
    CampaignStatus("campaign status") {
        Draft = "DRAFT",
        PendingReview = "PENDING_REVIEW",
        Approved = "APPROVED",
        Active = "ACTIVE",
        Paused = "PAUSED",
        Completed = "COMPLETED",
        Cancelled = "CANCELLED",
    }
}

/// Status as seen at `now`, taking the schedule into account.
pub fn effective_status(
    stored: CampaignStatus,
    start_date: Timestamp,
    end_date: Timestamp,
    now: Timestamp,
) -> CampaignStatus {
    match stored {
        CampaignStatus::Cancelled => CampaignStatus::Cancelled,
        _ if now > end_date => CampaignStatus::Completed,
        CampaignStatus::Approved if now >= start_date => CampaignStatus::Active,
        other => other,
    }
}

/// Resolve a sponsor-requested status change.
///
/// `from` must be the effective status. Requesting the current status is a
/// no-op; pairs outside the table are a conflict.
pub fn request_transition(
    from: CampaignStatus,
    requested: CampaignStatus,
) -> Result<CampaignStatus, CoreError> {
    use CampaignStatus::*;

    if from == requested {
        return Ok(from);
    }

    let allowed = matches!(
        (from, requested),
        (Draft, PendingReview)
            | (PendingReview, Draft)
            | (Active, Paused)
            | (Paused, Active)
            | (Draft | PendingReview | Approved | Active | Paused, Cancelled)
    );

    if allowed {
        Ok(requested)
    } else {
        Err(CoreError::Conflict(format!(
            "Campaign cannot move from {from} to {requested}"
        )))
    }
}

/// Optional CPM/CPC rates must not be negative.
pub fn validate_rate(field: &str, rate: Option<Decimal>) -> Result<(), CoreError> {
    match rate {
        Some(r) if r.is_sign_negative() => Err(CoreError::InvalidArgument(format!(
            "{field} must not be negative"
        ))),
        _ => Ok(()),
    }
}

/// Trim, drop empties and deduplicate a targeting list, preserving order.
pub fn normalize_targets(values: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(values.len());
    for v in values {
        let v = v.trim().to_string();
        if !v.is_empty() && !out.contains(&v) {
            out.push(v);
        }
    }
    out
}
