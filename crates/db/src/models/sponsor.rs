//! Sponsor (buyer-side account) model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use slotbook_core::types::{DbId, Timestamp};
use validator::Validate;

/// A row from the `sponsors` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sponsor {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub contact_email: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for sponsor signup. The owning user comes from the token.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSponsor {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(email)]
    pub contact_email: Option<String>,
    #[validate(url)]
    pub website: Option<String>,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
}

/// Profile update. `user_id` is immutable and therefore absent.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSponsor {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(email)]
    pub contact_email: Option<String>,
    #[validate(url)]
    pub website: Option<String>,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
}
