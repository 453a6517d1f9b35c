//! Repository for the `sponsors` table.

use sqlx::PgPool;
use slotbook_core::types::DbId;

use crate::models::sponsor::{CreateSponsor, Sponsor, UpdateSponsor};

const COLUMNS: &str =
    "id, user_id, name, contact_email, website, description, created_at, updated_at";

/// Provides CRUD operations for sponsors.
pub struct SponsorRepo;

impl SponsorRepo {
    /// Insert a sponsor owned by `user_id`.
    ///
    /// A second sponsor for the same user violates `uq_sponsors_user_id`.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateSponsor,
    ) -> Result<Sponsor, sqlx::Error> {
        let query = format!(
            "INSERT INTO sponsors (user_id, name, contact_email, website, description)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Sponsor>(&query)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.contact_email)
            .bind(&input.website)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_user_id(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<Sponsor>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sponsors WHERE user_id = $1");
        sqlx::query_as::<_, Sponsor>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Update profile fields. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSponsor,
    ) -> Result<Option<Sponsor>, sqlx::Error> {
        let query = format!(
            "UPDATE sponsors SET
                name = COALESCE($2, name),
                contact_email = COALESCE($3, contact_email),
                website = COALESCE($4, website),
                description = COALESCE($5, description)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Sponsor>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.contact_email)
            .bind(&input.website)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }
}
