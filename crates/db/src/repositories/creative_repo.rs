//! Repository for the `creatives` table.

use sqlx::PgPool;
use slotbook_core::creative::CreativeType;
use slotbook_core::types::DbId;

use crate::models::creative::{CreateCreative, Creative};

const COLUMNS: &str = "id, campaign_id, name, type, asset_url, click_url, is_approved, \
    is_active, created_at, updated_at";

/// Provides CRUD operations for creatives.
pub struct CreativeRepo;

impl CreativeRepo {
    /// Insert a creative under `campaign_id` with the already-parsed type.
    pub async fn create(
        pool: &PgPool,
        campaign_id: DbId,
        creative_type: CreativeType,
        input: &CreateCreative,
    ) -> Result<Creative, sqlx::Error> {
        let query = format!(
            "INSERT INTO creatives (campaign_id, name, type, asset_url, click_url)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Creative>(&query)
            .bind(campaign_id)
            .bind(&input.name)
            .bind(creative_type.as_str())
            .bind(&input.asset_url)
            .bind(&input.click_url)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Creative>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM creatives WHERE id = $1");
        sqlx::query_as::<_, Creative>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_for_campaign(
        pool: &PgPool,
        campaign_id: DbId,
    ) -> Result<Vec<Creative>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM creatives WHERE campaign_id = $1 ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, Creative>(&query)
            .bind(campaign_id)
            .fetch_all(pool)
            .await
    }

    /// Delete a creative. Fails with a foreign key violation while placements
    /// still reference it.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM creatives WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
