//! Repository for the `campaigns` table.

use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use slotbook_core::campaign::CampaignStatus;
use slotbook_core::placement::PlacementStatus;
use slotbook_core::types::DbId;

use crate::models::campaign::{Campaign, CreateCampaign, UpdateCampaign};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, sponsor_id, name, description, budget, spent, cpm_rate, cpc_rate, \
    start_date, end_date, status, target_categories, target_regions, created_at, updated_at";

/// Provides CRUD and spend-accounting operations for campaigns.
pub struct CampaignRepo;

impl CampaignRepo {
    /// Insert a new campaign in `DRAFT` with `spent = 0`.
    pub async fn create(
        pool: &PgPool,
        sponsor_id: DbId,
        input: &CreateCampaign,
    ) -> Result<Campaign, sqlx::Error> {
        let query = format!(
            "INSERT INTO campaigns
                (sponsor_id, name, description, budget, cpm_rate, cpc_rate,
                 start_date, end_date, status, target_categories, target_regions)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Campaign>(&query)
            .bind(sponsor_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.budget)
            .bind(input.cpm_rate)
            .bind(input.cpc_rate)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(CampaignStatus::Draft.as_str())
            .bind(&input.target_categories)
            .bind(&input.target_regions)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Campaign>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM campaigns WHERE id = $1");
        sqlx::query_as::<_, Campaign>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a sponsor's campaigns, most recently created first.
    pub async fn list_for_sponsor(
        pool: &PgPool,
        sponsor_id: DbId,
    ) -> Result<Vec<Campaign>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM campaigns WHERE sponsor_id = $1 ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Campaign>(&query)
            .bind(sponsor_id)
            .fetch_all(pool)
            .await
    }

    /// Load and row-lock a campaign inside a transaction.
    pub async fn find_for_update(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Campaign>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM campaigns WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Campaign>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Apply an already-validated patch. Only non-`None` fields are written.
    pub async fn update_tx(
        conn: &mut PgConnection,
        id: DbId,
        input: &UpdateCampaign,
    ) -> Result<Campaign, sqlx::Error> {
        let query = format!(
            "UPDATE campaigns SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                budget = COALESCE($4, budget),
                cpm_rate = COALESCE($5, cpm_rate),
                cpc_rate = COALESCE($6, cpc_rate),
                start_date = COALESCE($7, start_date),
                end_date = COALESCE($8, end_date),
                status = COALESCE($9, status),
                target_categories = COALESCE($10, target_categories),
                target_regions = COALESCE($11, target_regions)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Campaign>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.budget)
            .bind(input.cpm_rate)
            .bind(input.cpc_rate)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(&input.status)
            .bind(&input.target_categories)
            .bind(&input.target_regions)
            .fetch_one(conn)
            .await
    }

    /// Set `spent` to an amount computed by the caller under the row lock.
    pub async fn set_spent_tx(
        conn: &mut PgConnection,
        id: DbId,
        spent: Decimal,
    ) -> Result<Campaign, sqlx::Error> {
        let query = format!("UPDATE campaigns SET spent = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Campaign>(&query)
            .bind(id)
            .bind(spent)
            .fetch_one(conn)
            .await
    }

    /// Whether any placement of this campaign is pending or holds a slot.
    pub async fn has_blocking_placements(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let blocking: Vec<&str> = PlacementStatus::ALL
            .iter()
            .filter(|s| s.blocks_campaign_delete())
            .map(|s| s.as_str())
            .collect();
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(
                SELECT 1 FROM placements WHERE campaign_id = $1 AND status = ANY($2)
             )",
        )
        .bind(id)
        .bind(&blocking)
        .fetch_one(conn)
        .await?;
        Ok(exists)
    }

    /// Delete a campaign; creatives and placements cascade.
    pub async fn delete_tx(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM campaigns WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
