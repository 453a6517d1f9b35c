//! Repository for the `ad_slots` table, including the inventory lock.

use sqlx::{PgConnection, PgPool};
use slotbook_core::types::DbId;

use crate::models::ad_slot::{AdSlot, AdSlotFilter, AdSlotValues};

const COLUMNS: &str = "id, publisher_id, name, description, type, width, height, base_price, \
    is_available, created_at, updated_at";

/// Provides CRUD operations and lock/unlock primitives for ad slots.
pub struct AdSlotRepo;

impl AdSlotRepo {
    /// Insert an available slot owned by `publisher_id`.
    pub async fn create(
        pool: &PgPool,
        publisher_id: DbId,
        values: &AdSlotValues,
    ) -> Result<AdSlot, sqlx::Error> {
        let query = format!(
            "INSERT INTO ad_slots (publisher_id, name, description, type, width, height, base_price)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AdSlot>(&query)
            .bind(publisher_id)
            .bind(&values.name)
            .bind(&values.description)
            .bind(values.slot_type.as_str())
            .bind(values.width)
            .bind(values.height)
            .bind(values.base_price)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<AdSlot>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ad_slots WHERE id = $1");
        sqlx::query_as::<_, AdSlot>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List slots matching every supplied filter, newest first.
    pub async fn list(pool: &PgPool, filter: &AdSlotFilter) -> Result<Vec<AdSlot>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM ad_slots
             WHERE ($1::text IS NULL OR type = $1)
               AND ($2::boolean IS NULL OR is_available = $2)
               AND ($3::bigint IS NULL OR publisher_id = $3)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, AdSlot>(&query)
            .bind(filter.slot_type.map(|t| t.as_str()))
            .bind(filter.available)
            .bind(filter.publisher_id)
            .fetch_all(pool)
            .await
    }

    /// Load and row-lock a slot inside a transaction.
    pub async fn find_for_update(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<AdSlot>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ad_slots WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, AdSlot>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Overwrite the editable fields of a slot with normalized values.
    pub async fn update_tx(
        conn: &mut PgConnection,
        id: DbId,
        values: &AdSlotValues,
    ) -> Result<AdSlot, sqlx::Error> {
        let query = format!(
            "UPDATE ad_slots SET
                name = $2, description = $3, type = $4,
                width = $5, height = $6, base_price = $7
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AdSlot>(&query)
            .bind(id)
            .bind(&values.name)
            .bind(&values.description)
            .bind(values.slot_type.as_str())
            .bind(values.width)
            .bind(values.height)
            .bind(values.base_price)
            .fetch_one(conn)
            .await
    }

    /// Delete a slot. Fails with a foreign key violation while placements
    /// reference it.
    pub async fn delete_tx(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM ad_slots WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Take the inventory lock. Returns `None` if the slot was not available.
    pub async fn lock_tx(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<AdSlot>, sqlx::Error> {
        let query = format!(
            "UPDATE ad_slots SET is_available = FALSE
             WHERE id = $1 AND is_available
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AdSlot>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Release the inventory lock. Idempotent.
    pub async fn unlock_tx(conn: &mut PgConnection, id: DbId) -> Result<AdSlot, sqlx::Error> {
        let query = format!(
            "UPDATE ad_slots SET is_available = TRUE WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AdSlot>(&query)
            .bind(id)
            .fetch_one(conn)
            .await
    }
}
