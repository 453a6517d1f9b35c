//! Spend accrual for approved placements and the campaign budget ceiling.
//!
//! Approval adds `base_price * months` to the campaign's `spent`, where a
//! month is the 30-day average. The negotiated `agreed_price` is recorded on
//! the placement but does not accrue here.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::CoreError;
use crate::types::Timestamp;

/// Length of the average month used for accrual, in milliseconds.
pub const MS_PER_MONTH: i64 = 30 * 24 * 60 * 60 * 1000;

/// Decimal places kept on accrued amounts (matches `NUMERIC(14,2)`).
pub const MONEY_SCALE: u32 = 2;

/// Fractional number of average months between `start` and `end`.
pub fn months_between(start: Timestamp, end: Timestamp) -> Decimal {
    let ms = (end - start).num_milliseconds();
    Decimal::from(ms) / Decimal::from(MS_PER_MONTH)
}

/// Amount added to `campaign.spent` when a placement over `[start, end)` on a
/// slot with `base_price` per month is approved.
pub fn accrual_amount(base_price: Decimal, start: Timestamp, end: Timestamp) -> Decimal {
    (base_price * months_between(start, end))
        .round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Whether approval re-validates `spent <= budget`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BudgetPolicy {
    /// Refuse an approval whose accrual would push `spent` above `budget`.
    #[default]
    Enforce,
    /// Accrue unconditionally; only budget edits are guarded.
    Permissive,
}

impl std::str::FromStr for BudgetPolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "enforce" => Ok(BudgetPolicy::Enforce),
            "permissive" => Ok(BudgetPolicy::Permissive),
            other => Err(CoreError::InvalidArgument(format!(
                "Invalid budget policy '{other}'. Must be one of: enforce, permissive"
            ))),
        }
    }
}

/// Approval-time budget check. Returns the new `spent` value.
pub fn apply_accrual(
    policy: BudgetPolicy,
    budget: Decimal,
    spent: Decimal,
    amount: Decimal,
) -> Result<Decimal, CoreError> {
    let new_spent = spent + amount;
    if policy == BudgetPolicy::Enforce && new_spent > budget {
        return Err(CoreError::Conflict(format!(
            "Approval would exceed campaign budget (budget {budget}, spent {spent}, accrual {amount})"
        )));
    }
    Ok(new_spent)
}

/// Edit-time budget guard: a budget may not drop below what is already spent.
pub fn validate_budget_update(new_budget: Decimal, spent: Decimal) -> Result<(), CoreError> {
    validate_budget_amount(new_budget)?;
    if new_budget < spent {
        return Err(CoreError::InvalidArgument(format!(
            "Budget {new_budget} cannot be lower than amount already spent ({spent})"
        )));
    }
    Ok(())
}

/// A budget must be at least 1.
pub fn validate_budget_amount(budget: Decimal) -> Result<(), CoreError> {
    if budget < Decimal::ONE {
        return Err(CoreError::InvalidArgument(
            "budget must be at least 1".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{Duration, TimeZone, Utc};
    use rust_decimal_macros::dec;

    use super::*;

    fn day0() -> Timestamp {
        Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn thirty_days_is_one_month() {
        assert_eq!(months_between(day0(), day0() + Duration::days(30)), dec!(1));
        assert_eq!(accrual_amount(dec!(100), day0(), day0() + Duration::days(30)), dec!(100.00));
    }

    #[test]
    fn partial_months_accrue_proportionally() {
        assert_eq!(accrual_amount(dec!(100), day0(), day0() + Duration::days(15)), dec!(50.00));
        assert_eq!(accrual_amount(dec!(90), day0(), day0() + Duration::days(45)), dec!(135.00));
    }

    #[test]
    fn accrual_rounds_to_cents() {
        // 10 days of 100/month = 33.333...
        assert_eq!(accrual_amount(dec!(100), day0(), day0() + Duration::days(10)), dec!(33.33));
        // 20 days = 66.666...
        assert_eq!(accrual_amount(dec!(100), day0(), day0() + Duration::days(20)), dec!(66.67));
    }

    #[test]
    fn free_slot_accrues_nothing() {
        assert_eq!(accrual_amount(dec!(0), day0(), day0() + Duration::days(90)), dec!(0));
    }

    #[test]
    fn enforce_rejects_overrun() {
        assert_eq!(
            apply_accrual(BudgetPolicy::Enforce, dec!(1000), dec!(900), dec!(100)).unwrap(),
            dec!(1000)
        );
        assert_matches!(
            apply_accrual(BudgetPolicy::Enforce, dec!(1000), dec!(950), dec!(100)),
            Err(CoreError::Conflict(msg)) if msg.contains("exceed campaign budget")
        );
    }

    #[test]
    fn permissive_allows_overrun() {
        assert_eq!(
            apply_accrual(BudgetPolicy::Permissive, dec!(1000), dec!(950), dec!(100)).unwrap(),
            dec!(1050)
        );
    }

    #[test]
    fn budget_edit_below_spent_rejected() {
        assert_matches!(
            validate_budget_update(dec!(400), dec!(500)),
            Err(CoreError::InvalidArgument(_))
        );
        assert!(validate_budget_update(dec!(500), dec!(500)).is_ok());
        assert!(validate_budget_update(dec!(600), dec!(500)).is_ok());
    }

    #[test]
    fn budget_minimum_is_one() {
        assert_matches!(validate_budget_amount(dec!(0.99)), Err(CoreError::InvalidArgument(_)));
        assert!(validate_budget_amount(dec!(1)).is_ok());
    }

    #[test]
    fn policy_parsing() {
        assert_eq!("enforce".parse::<BudgetPolicy>().unwrap(), BudgetPolicy::Enforce);
        assert_eq!("PERMISSIVE".parse::<BudgetPolicy>().unwrap(), BudgetPolicy::Permissive);
        assert!("lenient".parse::<BudgetPolicy>().is_err());
        assert_eq!(BudgetPolicy::default(), BudgetPolicy::Enforce);
    }
}
