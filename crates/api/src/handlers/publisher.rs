//! Handlers for the `/publishers` resource (publisher signup and own profile).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use slotbook_core::error::CoreError;
use slotbook_db::models::publisher::{CreatePublisher, Publisher, UpdatePublisher};
use slotbook_db::repositories::PublisherRepo;
use validator::Validate;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::auth::Principal;
use crate::state::AppState;

/// POST /api/v1/publishers
pub async fn create_publisher(
    State(state): State<AppState>,
    principal: Principal,
    AppJson(input): AppJson<CreatePublisher>,
) -> AppResult<(StatusCode, Json<Publisher>)> {
    input.validate()?;
    let publisher = PublisherRepo::create(&state.pool, principal.id, &input).await?;
    tracing::info!(publisher_id = publisher.id, user_id = principal.id, "Publisher created");
    Ok((StatusCode::CREATED, Json(publisher)))
}

/// GET /api/v1/publishers/me
pub async fn get_my_publisher(
    State(state): State<AppState>,
    principal: Principal,
) -> AppResult<Json<Publisher>> {
    let publisher = PublisherRepo::find_by_user_id(&state.pool, principal.id)
        .await?
        .ok_or_else(|| CoreError::not_found("Publisher", principal.id))?;
    Ok(Json(publisher))
}

/// PUT /api/v1/publishers/me
pub async fn update_my_publisher(
    State(state): State<AppState>,
    principal: Principal,
    AppJson(input): AppJson<UpdatePublisher>,
) -> AppResult<Json<Publisher>> {
    input.validate()?;
    let existing = PublisherRepo::find_by_user_id(&state.pool, principal.id)
        .await?
        .ok_or_else(|| CoreError::not_found("Publisher", principal.id))?;
    let publisher = PublisherRepo::update(&state.pool, existing.id, &input)
        .await?
        .ok_or_else(|| CoreError::not_found("Publisher", existing.id))?;
    Ok(Json(publisher))
}
