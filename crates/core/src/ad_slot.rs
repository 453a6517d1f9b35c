//! Ad slot rules: dimension normalization and the booked-slot edit guard.

use rust_decimal::Decimal;

use crate::error::CoreError;
use crate::text_enum::define_text_enum;

define_text_enum! {
    /// Kind of inventory a slot sells.
    AdSlotType("ad slot type") {
        Display = "DISPLAY",
        Video = "VIDEO",
        Newsletter = "NEWSLETTER",
        Podcast = "PODCAST",
    }
}

impl AdSlotType {
    /// Whether the slot type has pixel dimensions at all.
    pub fn has_dimensions(self) -> bool {
        self != AdSlotType::Podcast
    }
}

/// Normalize width/height for a slot type.
///
/// Podcast slots never carry dimensions; any supplied values are dropped.
/// Other types accept missing dimensions but reject non-positive ones.
pub fn normalize_dimensions(
    slot_type: AdSlotType,
    width: Option<i32>,
    height: Option<i32>,
) -> Result<(Option<i32>, Option<i32>), CoreError> {
    if !slot_type.has_dimensions() {
        return Ok((None, None));
    }
    for (name, value) in [("width", width), ("height", height)] {
        if let Some(v) = value {
            if v <= 0 {
                return Err(CoreError::InvalidArgument(format!(
                    "{name} must be a positive number of pixels"
                )));
            }
        }
    }
    Ok((width, height))
}

/// A monthly base price must not be negative.
pub fn validate_base_price(base_price: Decimal) -> Result<(), CoreError> {
    if base_price.is_sign_negative() {
        return Err(CoreError::InvalidArgument(
            "basePrice must not be negative".into(),
        ));
    }
    Ok(())
}

/// Booked slots (`is_available = false`) cannot be edited or deleted:
/// changing them would silently alter the terms of an active agreement.
pub fn ensure_slot_mutable(is_available: bool) -> Result<(), CoreError> {
    if is_available {
        Ok(())
    } else {
        Err(CoreError::Conflict(
            "Ad slot is currently booked and cannot be modified".into(),
        ))
    }
}
