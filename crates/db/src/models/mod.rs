//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//!
//! JSON field names are camelCase. Closed-enum columns decode straight into
//! the `slotbook_core` enums via `#[sqlx(try_from = "String")]`.

pub mod ad_slot;
pub mod campaign;
pub mod creative;
pub mod placement;
pub mod publisher;
pub mod session;
pub mod sponsor;
pub mod user;

use serde::{Deserialize, Deserializer};

/// Deserialize a clearable update field.
///
/// Use with `#[serde(default, deserialize_with = "nullable")]` on an
/// `Option<Option<T>>`: an absent key stays `None`, an explicit `null`
/// becomes `Some(None)`.
pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "nullable")]
        width: Option<Option<i32>>,
    }

    #[test]
    fn nullable_distinguishes_absent_from_null() {
        let absent: Patch = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.width, None);

        let cleared: Patch = serde_json::from_str(r#"{"width":null}"#).unwrap();
        assert_eq!(cleared.width, Some(None));

        let set: Patch = serde_json::from_str(r#"{"width":300}"#).unwrap();
        assert_eq!(set.width, Some(Some(300)));
    }
}
