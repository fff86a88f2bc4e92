//! Server API tests

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use ledgercast_core::db::Database;
use tower::ServiceExt;

fn setup_test_app() -> Router {
    let db = Database::in_memory().unwrap();
    create_router(db, ServerConfig::default())
}

fn setup_test_app_with_db() -> (Router, Database) {
    let db = Database::in_memory().unwrap();
    let app = create_router(db.clone(), ServerConfig::default());
    (app, db)
}

async fn get_body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body();
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

// ========== Health ==========

#[tokio::test]
async fn test_health() {
    let app = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["status"], "ok");
}

// ========== Transaction API ==========

#[tokio::test]
async fn test_create_and_list_transactions() {
    let (app, _db) = setup_test_app_with_db();

    let body = serde_json::json!({
        "title": "Groceries",
        "amount": "84.20",
        "date": "2025-03-14",
        "category": "Food"
    });
    let response = app
        .clone()
        .oneshot(post_json("/api/transactions", &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let created = get_body_json(response).await;
    assert_eq!(created["title"], "Groceries");
    assert_eq!(created["amount"], "84.20");
    assert_eq!(created["category"], "Food");

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/transactions")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let listed = get_body_json(response).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_transaction_rejects_bad_amount() {
    let app = setup_test_app();

    let body = serde_json::json!({
        "title": "Mystery",
        "amount": "lots",
        "date": "2025-03-14"
    });
    let response = app
        .oneshot(post_json("/api/transactions", &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_missing_transaction_is_404() {
    let app = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/transactions/999")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ========== Income-source API ==========

#[tokio::test]
async fn test_income_source_lifecycle() {
    let app = setup_test_app();

    let body = serde_json::json!({
        "name": "Salary",
        "monthly_amount": "4200.00"
    });
    let response = app
        .clone()
        .oneshot(post_json("/api/income-sources", &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let created = get_body_json(response).await;
    assert_eq!(created["name"], "Salary");
    // Sources default to active
    assert_eq!(created["active"], true);
    let id = created["id"].as_i64().unwrap();

    // Deactivate it
    let update = serde_json::json!({ "active": false });
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(format!("/api/income-sources/{}", id))
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(&update).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let updated = get_body_json(response).await;
    assert_eq!(updated["active"], false);

    // And remove it
    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/income-sources/{}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

// ========== Forecast API ==========

#[tokio::test]
async fn test_forecast_empty_database() {
    let app = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/forecast")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert!(json["monthly_data"].as_array().unwrap().is_empty());
    assert_eq!(json["predictions"].as_array().unwrap().len(), 6);
    assert!(json["algorithms"]["linear_regression"]["mae"].is_null());

    let weights = json["algorithms"]["linear_regression"]["weight"]
        .as_u64()
        .unwrap()
        + json["algorithms"]["exponential_smoothing"]["weight"]
            .as_u64()
            .unwrap()
        + json["algorithms"]["monte_carlo"]["weight"].as_u64().unwrap();
    assert_eq!(weights, 100);
}

#[tokio::test]
async fn test_forecast_with_history() {
    let (app, db) = setup_test_app_with_db();

    for (i, amount) in ["1000", "1050", "1100", "1150", "1200", "1250"]
        .iter()
        .enumerate()
    {
        db.insert_transaction(&ledgercast_core::models::NewTransaction {
            title: "Groceries".to_string(),
            amount: amount.to_string(),
            date: chrono::NaiveDate::from_ymd_opt(2025, 1 + i as u32, 10).unwrap(),
            category: "Food".to_string(),
            notes: String::new(),
        })
        .unwrap();
    }

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/forecast?seed=42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["monthly_data"].as_array().unwrap().len(), 6);
    assert_eq!(json["predictions"].as_array().unwrap().len(), 6);
    assert_eq!(json["insights"]["trend"], "up");
    assert_eq!(json["category_breakdown"][0]["category"], "Food");
    assert!(json["predictions"][0]["confidence_lower"].is_number());
    assert!(json["algorithms"]["monte_carlo"]["confidence_range"].is_string());
}

#[tokio::test]
async fn test_forecast_horizon_is_clamped() {
    let app = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/forecast?horizon=100")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["predictions"].as_array().unwrap().len(), 24);
}
