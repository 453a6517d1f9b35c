//! Integration tests for the public ad slot marketplace.

mod common;

use axum::http::StatusCode;
use rust_decimal_macros::dec;
use serde_json::json;
use sqlx::PgPool;

use common::{
    book, build_test_app, create_ad_slot, create_publisher, create_sponsor, delete, get,
    marketplace, money, post_json, put_json, review,
};

#[sqlx::test(migrations = "../../db/migrations")]
async fn podcast_slots_drop_dimensions(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let (publisher, publisher_id) = create_publisher(&app, &pool, "cast@example.com").await;

    let (status, json) = post_json(
        &app,
        "/api/v1/ad-slots",
        Some(&publisher.token),
        json!({ "name": "Mid-roll", "type": "PODCAST", "width": 300, "height": 250, "basePrice": "80" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{json}");
    assert_eq!(json["type"], "PODCAST");
    assert!(json["width"].is_null());
    assert!(json["height"].is_null());
    assert_eq!(json["isAvailable"], true);
    assert_eq!(json["publisherId"], publisher_id);
    assert_eq!(money(&json["basePrice"]), dec!(80));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_validates_type_price_and_role(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let (publisher, _) = create_publisher(&app, &pool, "site@example.com").await;
    let (sponsor, _) = create_sponsor(&app, &pool, "brand@example.com").await;

    let (status, json) = post_json(
        &app,
        "/api/v1/ad-slots",
        Some(&publisher.token),
        json!({ "name": "Banner", "type": "BANNER", "basePrice": "10" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("DISPLAY, VIDEO, NEWSLETTER, PODCAST"));

    let (status, _) = post_json(
        &app,
        "/api/v1/ad-slots",
        Some(&publisher.token),
        json!({ "name": "Banner", "type": "DISPLAY", "basePrice": "-1" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post_json(
        &app,
        "/api/v1/ad-slots",
        Some(&publisher.token),
        json!({ "name": "Banner", "type": "DISPLAY", "width": 0, "height": 90, "basePrice": "10" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post_json(
        &app,
        "/api/v1/ad-slots",
        Some(&sponsor.token),
        json!({ "name": "Banner", "type": "DISPLAY", "basePrice": "10" }),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn listing_is_public_and_filterable(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let (first, first_id) = create_publisher(&app, &pool, "site@example.com").await;
    let (second, _) = create_publisher(&app, &pool, "blog@example.com").await;
    create_ad_slot(&app, &first.token, "100").await;
    create_ad_slot(&app, &second.token, "200").await;
    post_json(
        &app,
        "/api/v1/ad-slots",
        Some(&second.token),
        json!({ "name": "Weekly issue", "type": "NEWSLETTER", "basePrice": "40" }),
    )
    .await;

    let (status, all) = get(&app, "/api/v1/ad-slots", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 3);

    let (_, newsletters) = get(&app, "/api/v1/ad-slots?type=NEWSLETTER", None).await;
    let newsletters = newsletters.as_array().unwrap();
    assert_eq!(newsletters.len(), 1);
    assert_eq!(newsletters[0]["type"], "NEWSLETTER");

    let (_, mine) = get(&app, &format!("/api/v1/ad-slots?publisherId={first_id}"), None).await;
    assert_eq!(mine.as_array().unwrap().len(), 1);

    let (status, _) = get(&app, "/api/v1/ad-slots?type=BILLBOARD", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get(&app, "/api/v1/ad-slots/999999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn availability_filter_tracks_bookings(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let m = marketplace(&app, &pool, "1000", 30, "100").await;
    create_ad_slot(&app, &m.publisher.token, "50").await;

    let (_, json) = book(&app, &m.sponsor.token, m.slot_id, m.campaign_id, m.creative_id).await;
    let placement_id = json["placement"]["id"].as_i64().unwrap();
    review(&app, &m.publisher.token, placement_id, "APPROVED").await;

    let (_, available) = get(&app, "/api/v1/ad-slots?available=true", None).await;
    let available = available.as_array().unwrap();
    assert_eq!(available.len(), 1);
    assert_ne!(available[0]["id"], m.slot_id);

    let (_, booked) = get(&app, "/api/v1/ad-slots?available=false", None).await;
    let booked = booked.as_array().unwrap();
    assert_eq!(booked.len(), 1);
    assert_eq!(booked[0]["id"], m.slot_id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn only_owner_may_edit(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let (owner, _) = create_publisher(&app, &pool, "site@example.com").await;
    let (other, _) = create_publisher(&app, &pool, "blog@example.com").await;
    let slot = create_ad_slot(&app, &owner.token, "100").await;
    let uri = format!("/api/v1/ad-slots/{}", slot["id"]);

    let (status, json) = put_json(&app, &uri, Some(&other.token), json!({ "basePrice": "1" })).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["code"], "FORBIDDEN");

    let (status, _) = delete(&app, &uri, Some(&other.token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, json) = put_json(
        &app,
        &uri,
        Some(&owner.token),
        json!({ "basePrice": "150", "description": "Above the fold" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{json}");
    assert_eq!(money(&json["basePrice"]), dec!(150));
    assert_eq!(json["description"], "Above the fold");
    assert_eq!(json["width"], 728);
    assert_eq!(json["name"], slot["name"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn changing_type_to_podcast_clears_dimensions(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let (owner, _) = create_publisher(&app, &pool, "site@example.com").await;
    let slot = create_ad_slot(&app, &owner.token, "100").await;

    let (status, json) = put_json(
        &app,
        &format!("/api/v1/ad-slots/{}", slot["id"]),
        Some(&owner.token),
        json!({ "type": "PODCAST" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{json}");
    assert!(json["width"].is_null());
    assert!(json["height"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn explicit_null_clears_optional_fields(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let (owner, _) = create_publisher(&app, &pool, "site@example.com").await;
    let slot = create_ad_slot(&app, &owner.token, "100").await;
    let uri = format!("/api/v1/ad-slots/{}", slot["id"]);

    let (status, json) = put_json(
        &app,
        &uri,
        Some(&owner.token),
        json!({ "description": "Above the fold" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{json}");
    assert_eq!(json["description"], "Above the fold");

    // Omitted keys are kept.
    let (status, json) = put_json(&app, &uri, Some(&owner.token), json!({ "basePrice": "120" })).await;
    assert_eq!(status, StatusCode::OK, "{json}");
    assert_eq!(json["description"], "Above the fold");
    assert_eq!(json["width"], 728);
    assert_eq!(json["height"], 90);

    let (status, json) = put_json(
        &app,
        &uri,
        Some(&owner.token),
        json!({ "description": null, "width": null }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{json}");
    assert!(json["description"].is_null());
    assert!(json["width"].is_null());
    assert_eq!(json["height"], 90);
    assert_eq!(json["type"], "DISPLAY");
    assert_eq!(money(&json["basePrice"]), dec!(120));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn booked_slot_is_frozen(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let m = marketplace(&app, &pool, "1000", 30, "100").await;
    let uri = format!("/api/v1/ad-slots/{}", m.slot_id);

    let (_, json) = book(&app, &m.sponsor.token, m.slot_id, m.campaign_id, m.creative_id).await;
    let placement_id = json["placement"]["id"].as_i64().unwrap();
    review(&app, &m.publisher.token, placement_id, "APPROVED").await;

    let (status, json) = put_json(&app, &uri, Some(&m.publisher.token), json!({ "basePrice": "1" })).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");

    let (status, _) = delete(&app, &uri, Some(&m.publisher.token)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, slot) = get(&app, &uri, None).await;
    assert_eq!(money(&slot["basePrice"]), dec!(100));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn slot_with_history_cannot_be_deleted(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let m = marketplace(&app, &pool, "1000", 30, "100").await;
    let uri = format!("/api/v1/ad-slots/{}", m.slot_id);

    let (_, json) = book(&app, &m.sponsor.token, m.slot_id, m.campaign_id, m.creative_id).await;
    let placement_id = json["placement"]["id"].as_i64().unwrap();
    review(&app, &m.publisher.token, placement_id, "REJECTED").await;

    let (status, json) = delete(&app, &uri, Some(&m.publisher.token)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(json["error"].as_str().unwrap().contains("reference constraint"));

    let fresh = create_ad_slot(&app, &m.publisher.token, "10").await;
    let (status, _) = delete(&app, &format!("/api/v1/ad-slots/{}", fresh["id"]), Some(&m.publisher.token)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}
