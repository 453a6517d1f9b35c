//! Publisher (seller-side account) model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use slotbook_core::types::{DbId, Timestamp};
use validator::Validate;

/// A row from the `publishers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Publisher {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub website: Option<String>,
    pub category: Option<String>,
    pub monthly_views: i64,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for publisher signup.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePublisher {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(url)]
    pub website: Option<String>,
    #[validate(length(max = 100))]
    pub category: Option<String>,
    #[validate(range(min = 0))]
    pub monthly_views: Option<i64>,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
}

/// Profile update. All fields optional.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePublisher {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(url)]
    pub website: Option<String>,
    #[validate(length(max = 100))]
    pub category: Option<String>,
    #[validate(range(min = 0))]
    pub monthly_views: Option<i64>,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
}
