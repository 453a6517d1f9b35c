//! Repository for the `publishers` table.

use sqlx::PgPool;
use slotbook_core::types::DbId;

use crate::models::publisher::{CreatePublisher, Publisher, UpdatePublisher};

const COLUMNS: &str = "id, user_id, name, website, category, monthly_views, description, \
    created_at, updated_at";

/// Provides CRUD operations for publishers.
pub struct PublisherRepo;

impl PublisherRepo {
    /// Insert a publisher owned by `user_id`. `monthly_views` defaults to 0.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreatePublisher,
    ) -> Result<Publisher, sqlx::Error> {
        let query = format!(
            "INSERT INTO publishers (user_id, name, website, category, monthly_views, description)
             VALUES ($1, $2, $3, $4, COALESCE($5, 0), $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Publisher>(&query)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.website)
            .bind(&input.category)
            .bind(input.monthly_views)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_user_id(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<Publisher>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM publishers WHERE user_id = $1");
        sqlx::query_as::<_, Publisher>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Update profile fields. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePublisher,
    ) -> Result<Option<Publisher>, sqlx::Error> {
        let query = format!(
            "UPDATE publishers SET
                name = COALESCE($2, name),
                website = COALESCE($3, website),
                category = COALESCE($4, category),
                monthly_views = COALESCE($5, monthly_views),
                description = COALESCE($6, description)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Publisher>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.website)
            .bind(&input.category)
            .bind(input.monthly_views)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }
}
