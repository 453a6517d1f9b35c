mod common;

use axum::http::StatusCode;
use sqlx::PgPool;

use common::{build_test_app, get};

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_reports_database(pool: PgPool) {
    let app = build_test_app(pool);

    let (status, json) = get(&app, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["dbHealthy"], true);
    assert!(json["version"].is_string());
}
