//! Repository for the `placements` table.

use sqlx::{PgConnection, PgPool};
use slotbook_core::placement::{PlacementStatus, HOLDING_STATUSES};
use slotbook_core::types::DbId;

use crate::models::placement::{CreatePlacement, Placement, PlacementFilter, PlacementScope};

const COLUMNS: &str = "id, campaign_id, creative_id, ad_slot_id, publisher_id, agreed_price, \
    pricing_model, start_date, end_date, status, impressions, clicks, conversions, message, \
    created_at, updated_at";

/// Same columns qualified with the `p` alias, for joined queries.
const P_COLUMNS: &str = "p.id, p.campaign_id, p.creative_id, p.ad_slot_id, p.publisher_id, \
    p.agreed_price, p.pricing_model, p.start_date, p.end_date, p.status, p.impressions, \
    p.clicks, p.conversions, p.message, p.created_at, p.updated_at";

/// Provides persistence for placements. State changes are driven by the
/// booking engine inside its own transactions.
pub struct PlacementRepo;

impl PlacementRepo {
    /// Insert a `PENDING` placement.
    pub async fn create(pool: &PgPool, input: &CreatePlacement) -> Result<Placement, sqlx::Error> {
        let query = format!(
            "INSERT INTO placements
                (campaign_id, creative_id, ad_slot_id, publisher_id, agreed_price,
                 pricing_model, start_date, end_date, status, message)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Placement>(&query)
            .bind(input.campaign_id)
            .bind(input.creative_id)
            .bind(input.ad_slot_id)
            .bind(input.publisher_id)
            .bind(input.agreed_price)
            .bind(input.pricing_model.as_str())
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(PlacementStatus::Pending.as_str())
            .bind(&input.message)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Placement>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM placements WHERE id = $1");
        sqlx::query_as::<_, Placement>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Load and row-lock a placement inside a transaction.
    pub async fn find_for_update(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Placement>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM placements WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Placement>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// The placement currently holding `ad_slot_id`, row-locked.
    pub async fn find_holding_for_slot_for_update(
        conn: &mut PgConnection,
        ad_slot_id: DbId,
    ) -> Result<Option<Placement>, sqlx::Error> {
        let holding: Vec<&str> = HOLDING_STATUSES.iter().map(|s| s.as_str()).collect();
        let query = format!(
            "SELECT {COLUMNS} FROM placements
             WHERE ad_slot_id = $1 AND status = ANY($2)
             FOR UPDATE"
        );
        sqlx::query_as::<_, Placement>(&query)
            .bind(ad_slot_id)
            .bind(&holding)
            .fetch_optional(conn)
            .await
    }

    /// Write a new status on a locked placement.
    pub async fn set_status_tx(
        conn: &mut PgConnection,
        id: DbId,
        status: PlacementStatus,
    ) -> Result<Placement, sqlx::Error> {
        let query = format!("UPDATE placements SET status = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Placement>(&query)
            .bind(id)
            .bind(status.as_str())
            .fetch_one(conn)
            .await
    }

    /// List placements visible to one side of the marketplace, newest first.
    pub async fn list_scoped(
        pool: &PgPool,
        scope: PlacementScope,
        filter: PlacementFilter,
    ) -> Result<Vec<Placement>, sqlx::Error> {
        let (join, owner_clause, owner_id) = match scope {
            PlacementScope::Sponsor(id) => (
                "JOIN campaigns c ON c.id = p.campaign_id",
                "c.sponsor_id = $1",
                id,
            ),
            PlacementScope::Publisher(id) => ("", "p.publisher_id = $1", id),
        };
        let query = format!(
            "SELECT {P_COLUMNS} FROM placements p {join}
             WHERE {owner_clause}
               AND ($2::bigint IS NULL OR p.campaign_id = $2)
               AND ($3::text IS NULL OR p.status = $3)
             ORDER BY p.created_at DESC, p.id DESC"
        );
        sqlx::query_as::<_, Placement>(&query)
            .bind(owner_id)
            .bind(filter.campaign_id)
            .bind(filter.status.map(|s| s.as_str()))
            .fetch_all(pool)
            .await
    }
}
