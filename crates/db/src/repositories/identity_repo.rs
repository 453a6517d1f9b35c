//! Principal → marketplace owner id lookup.

use sqlx::PgPool;
use slotbook_core::types::DbId;

/// Looks up which marketplace records a principal owns.
pub struct IdentityRepo;

impl IdentityRepo {
    /// Return `(sponsor_id, publisher_id)` for a user, each `None` if absent.
    pub async fn owner_ids(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<(Option<DbId>, Option<DbId>), sqlx::Error> {
        sqlx::query_as::<_, (Option<DbId>, Option<DbId>)>(
            "SELECT
                (SELECT id FROM sponsors WHERE user_id = $1) AS sponsor_id,
                (SELECT id FROM publishers WHERE user_id = $1) AS publisher_id",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
    }
}
