//! Shared harness for API integration tests.
//!
//! Builds the same router as `main.rs` (minus the network listener) over the
//! per-test database created by `#[sqlx::test]`, plus request helpers and
//! marketplace fixtures.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{HeaderName, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use slotbook_api::auth::jwt::{issue_access_token, JwtConfig};
use slotbook_api::auth::password::hash_password;
use slotbook_api::config::ServerConfig;
use slotbook_api::routes;
use slotbook_api::state::AppState;
use slotbook_core::accrual::BudgetPolicy;
use slotbook_core::roles::{ROLE_ADMIN, ROLE_MEMBER};
use slotbook_core::types::DbId;
use slotbook_db::models::user::CreateUser;
use slotbook_db::repositories::UserRepo;

pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 5,
        db_max_connections: 5,
        budget_policy: BudgetPolicy::Enforce,
        jwt: JwtConfig {
            secret: "test-secret-not-for-production".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
    }
}

/// Build the full application router with the given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, test_config())
}

/// Build the application router with a custom configuration.
pub fn build_test_app_with(pool: PgPool, config: ServerConfig) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(config),
    };

    let cors = CorsLayer::new().allow_origin(
        "http://localhost:5173"
            .parse::<axum::http::HeaderValue>()
            .unwrap(),
    );

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, body_json(response).await)
}

/// Parse a decimal serialized as a JSON string.
pub fn money(value: &Value) -> rust_decimal::Decimal {
    value.as_str().unwrap().parse().unwrap()
}

/// Collect a response body as JSON. Empty bodies become `Value::Null`.
pub async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    }
}

pub async fn get(app: &Router, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
    send(app, "GET", uri, token, None).await
}

pub async fn post_json(
    app: &Router,
    uri: &str,
    token: Option<&str>,
    body: Value,
) -> (StatusCode, Value) {
    send(app, "POST", uri, token, Some(body)).await
}

pub async fn put_json(
    app: &Router,
    uri: &str,
    token: Option<&str>,
    body: Value,
) -> (StatusCode, Value) {
    send(app, "PUT", uri, token, Some(body)).await
}

pub async fn patch_json(
    app: &Router,
    uri: &str,
    token: Option<&str>,
    body: Value,
) -> (StatusCode, Value) {
    send(app, "PATCH", uri, token, Some(body)).await
}

pub async fn delete(app: &Router, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
    send(app, "DELETE", uri, token, None).await
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// An account plus a valid access token for it.
pub struct TestUser {
    pub user_id: DbId,
    pub email: String,
    pub token: String,
}

/// Insert a user directly and sign an access token for it.
pub async fn create_user(pool: &PgPool, email: &str, role: &str) -> TestUser {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            password_hash: hash_password(TEST_PASSWORD).unwrap(),
            role: role.to_string(),
        },
    )
    .await
    .unwrap();
    let token = issue_access_token(user.id, &user.role, &test_config().jwt).unwrap();
    TestUser {
        user_id: user.id,
        email: user.email,
        token,
    }
}

pub async fn create_member(pool: &PgPool, email: &str) -> TestUser {
    create_user(pool, email, ROLE_MEMBER).await
}

pub async fn create_admin(pool: &PgPool, email: &str) -> TestUser {
    create_user(pool, email, ROLE_ADMIN).await
}

/// A member with a sponsor profile. Returns the user and the sponsor id.
pub async fn create_sponsor(app: &Router, pool: &PgPool, email: &str) -> (TestUser, DbId) {
    let user = create_member(pool, email).await;
    let (status, json) = post_json(
        app,
        "/api/v1/sponsors",
        Some(&user.token),
        json!({ "name": format!("Sponsor {email}") }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "sponsor signup failed: {json}");
    let id = json["id"].as_i64().unwrap();
    (user, id)
}

/// A member with a publisher profile. Returns the user and the publisher id.
pub async fn create_publisher(app: &Router, pool: &PgPool, email: &str) -> (TestUser, DbId) {
    let user = create_member(pool, email).await;
    let (status, json) = post_json(
        app,
        "/api/v1/publishers",
        Some(&user.token),
        json!({ "name": format!("Publisher {email}"), "category": "tech" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "publisher signup failed: {json}");
    let id = json["id"].as_i64().unwrap();
    (user, id)
}

/// RFC 3339 timestamp `days` from now.
pub fn days_from_now(days: i64) -> String {
    (chrono::Utc::now() + chrono::Duration::days(days)).to_rfc3339()
}

/// Create a campaign running from tomorrow for exactly `days` days.
pub async fn create_campaign(app: &Router, token: &str, budget: &str, days: i64) -> Value {
    let start = chrono::Utc::now() + chrono::Duration::days(1);
    let end = start + chrono::Duration::days(days);
    let (status, json) = post_json(
        app,
        "/api/v1/campaigns",
        Some(token),
        json!({
            "name": "Spring launch",
            "budget": budget,
            "startDate": start.to_rfc3339(),
            "endDate": end.to_rfc3339(),
            "targetCategories": ["tech"],
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "campaign create failed: {json}");
    json
}

pub async fn create_creative(app: &Router, token: &str, campaign_id: i64) -> Value {
    let (status, json) = post_json(
        app,
        &format!("/api/v1/campaigns/{campaign_id}/creatives"),
        Some(token),
        json!({
            "name": "Leaderboard banner",
            "type": "IMAGE",
            "assetUrl": "https://cdn.example.com/banner.png",
            "clickUrl": "https://example.com/landing",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "creative create failed: {json}");
    json
}

pub async fn create_ad_slot(app: &Router, token: &str, base_price: &str) -> Value {
    let (status, json) = post_json(
        app,
        "/api/v1/ad-slots",
        Some(token),
        json!({
            "name": "Homepage leaderboard",
            "type": "DISPLAY",
            "width": 728,
            "height": 90,
            "basePrice": base_price,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "ad slot create failed: {json}");
    json
}

/// Request a placement over the campaign's schedule through `/book`.
pub async fn book(
    app: &Router,
    token: &str,
    slot_id: i64,
    campaign_id: i64,
    creative_id: i64,
) -> (StatusCode, Value) {
    post_json(
        app,
        &format!("/api/v1/ad-slots/{slot_id}/book"),
        Some(token),
        json!({ "campaignId": campaign_id, "creativeId": creative_id }),
    )
    .await
}

/// Approve or reject a placement as its publisher.
pub async fn review(app: &Router, token: &str, placement_id: i64, status: &str) -> (StatusCode, Value) {
    patch_json(
        app,
        &format!("/api/v1/placements/{placement_id}"),
        Some(token),
        json!({ "status": status }),
    )
    .await
}

/// A sponsor with a campaign and creative, and a publisher with one slot.
pub struct Marketplace {
    pub sponsor: TestUser,
    pub sponsor_id: DbId,
    pub publisher: TestUser,
    pub publisher_id: DbId,
    pub campaign_id: i64,
    pub creative_id: i64,
    pub slot_id: i64,
}

pub async fn marketplace(
    app: &Router,
    pool: &PgPool,
    budget: &str,
    days: i64,
    base_price: &str,
) -> Marketplace {
    let (sponsor, sponsor_id) = create_sponsor(app, pool, "brand@example.com").await;
    let (publisher, publisher_id) = create_publisher(app, pool, "site@example.com").await;
    let campaign = create_campaign(app, &sponsor.token, budget, days).await;
    let campaign_id = campaign["id"].as_i64().unwrap();
    let creative = create_creative(app, &sponsor.token, campaign_id).await;
    let slot = create_ad_slot(app, &publisher.token, base_price).await;
    Marketplace {
        sponsor,
        sponsor_id,
        publisher,
        publisher_id,
        campaign_id,
        creative_id: creative["id"].as_i64().unwrap(),
        slot_id: slot["id"].as_i64().unwrap(),
    }
}
