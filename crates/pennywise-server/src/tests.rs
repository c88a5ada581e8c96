//! Server API tests

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{Duration, Local};
use http_body_util::BodyExt;
use pennywise_core::db::Database;
use pennywise_core::models::NewExpense;
use rust_decimal::Decimal;
use tower::ServiceExt;

fn test_config() -> ServerConfig {
    ServerConfig {
        require_auth: false,
        allowed_origins: vec![],
        ..Default::default()
    }
}

fn setup_test_app() -> Router {
    create_router(Database::in_memory().unwrap(), None, test_config())
}

fn setup_test_app_with_db() -> (Router, Database) {
    let db = Database::in_memory().unwrap();
    (create_router(db.clone(), None, test_config()), db)
}

fn days_ago(n: i64) -> String {
    (Local::now().date_naive() - Duration::days(n)).to_string()
}

fn seed(db: &Database, amount: &str, category: &str, date: &str) -> i64 {
    db.insert_expense(&NewExpense::parse(amount, category, date, None).unwrap())
        .unwrap()
}

async fn get_body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body();
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn get_body_text(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

// ========== Expense API Tests ==========

#[tokio::test]
async fn test_list_expenses_empty() {
    let app = setup_test_app();

    let response = app.oneshot(get("/api/expenses")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert!(json.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_create_expense() {
    let (app, db) = setup_test_app_with_db();

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/expenses",
            serde_json::json!({
                "amount": 12.5,
                "category": "food",
                "date": "2024-03-01",
                "note": "  lunch  "
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = get_body_json(response).await;
    assert_eq!(json["category"], "Food");
    assert_eq!(json["date"], "2024-03-01");
    assert_eq!(json["note"], "lunch");

    let id = json["id"].as_i64().unwrap();
    let stored = db.get_expense(id).unwrap().unwrap();
    assert_eq!(stored.amount, Decimal::new(125, 1));
}

#[tokio::test]
async fn test_create_expense_accepts_string_amount() {
    let (app, db) = setup_test_app_with_db();

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/expenses",
            serde_json::json!({"amount": "0.10", "category": "Other", "date": "2024-03-01"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let all = db.list_all_expenses().unwrap();
    assert_eq!(all[0].amount, Decimal::new(10, 2));
}

#[tokio::test]
async fn test_create_expense_validation() {
    let cases = [
        serde_json::json!({"amount": 0, "category": "Food", "date": "2024-03-01"}),
        serde_json::json!({"amount": -5, "category": "Food", "date": "2024-03-01"}),
        serde_json::json!({"amount": "abc", "category": "Food", "date": "2024-03-01"}),
        serde_json::json!({"category": "Food", "date": "2024-03-01"}),
        serde_json::json!({"amount": 5, "category": "Snacks", "date": "2024-03-01"}),
        serde_json::json!({"amount": 5, "category": "Food", "date": "03/01/2024"}),
        serde_json::json!({"amount": 5, "category": "Food"}),
        serde_json::json!({"amount": "1000000000.01", "category": "Rent", "date": "2024-03-01"}),
        serde_json::json!({"amount": "79228162514264337593543950335", "category": "Food", "date": "2024-03-01"}),
        serde_json::json!({"amount": "4.999", "category": "Food", "date": "2024-03-01"}),
    ];

    for body in cases {
        let (app, db) = setup_test_app_with_db();
        let response = app
            .oneshot(json_request("POST", "/api/expenses", body.clone()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {}", body);
        let json = get_body_json(response).await;
        assert!(json["error"].is_string());
        assert_eq!(db.count_expenses().unwrap(), 0);
    }
}

#[tokio::test]
async fn test_create_expense_invalid_json() {
    let app = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/expenses")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = get_body_json(response).await;
    assert_eq!(json["error"], "Invalid JSON");
}

#[tokio::test]
async fn test_get_expense() {
    let (app, db) = setup_test_app_with_db();
    let id = seed(&db, "42", "Bills", "2024-03-01");

    let response = app
        .clone()
        .oneshot(get(&format!("/api/expenses/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["id"], id);
    assert_eq!(json["category"], "Bills");

    let response = app.oneshot(get("/api/expenses/999")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = get_body_json(response).await;
    assert_eq!(json["error"], "Expense 999 not found");
}

#[tokio::test]
async fn test_update_expense() {
    let (app, db) = setup_test_app_with_db();
    let id = seed(&db, "42", "Bills", "2024-03-01");

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/expenses/{}", id),
            serde_json::json!({"amount": 50, "category": "Travel", "date": "2024-03-02"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["category"], "Travel");
    assert_eq!(json["date"], "2024-03-02");

    let stored = db.get_expense(id).unwrap().unwrap();
    assert_eq!(stored.amount, Decimal::from(50));

    let response = app
        .oneshot(json_request(
            "PUT",
            "/api/expenses/999",
            serde_json::json!({"amount": 50, "category": "Travel", "date": "2024-03-02"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_expense_rejects_invalid_amount() {
    let (app, db) = setup_test_app_with_db();
    let id = seed(&db, "42", "Bills", "2024-03-01");

    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/api/expenses/{}", id),
            serde_json::json!({"amount": 0, "category": "Bills", "date": "2024-03-01"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(db.get_expense(id).unwrap().unwrap().amount, Decimal::from(42));
}

#[tokio::test]
async fn test_delete_expense() {
    let (app, db) = setup_test_app_with_db();
    let id = seed(&db, "42", "Bills", "2024-03-01");

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/api/expenses/{}", id))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["success"], true);
    assert!(db.get_expense(id).unwrap().is_none());

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/api/expenses/{}", id))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_expenses_with_filters() {
    let (app, db) = setup_test_app_with_db();
    seed(&db, "10", "Food", "2024-01-10");
    seed(&db, "20", "Food", "2024-02-10");
    seed(&db, "900", "Rent", "2024-02-01");

    let response = app
        .clone()
        .oneshot(get("/api/expenses?category=food&from=2024-02-01&to=2024-02-29"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    let expenses = json.as_array().unwrap();
    assert_eq!(expenses.len(), 1);
    assert_eq!(expenses[0]["date"], "2024-02-10");

    let response = app
        .clone()
        .oneshot(get("/api/expenses?sort=amount&order=asc"))
        .await
        .unwrap();
    let json = get_body_json(response).await;
    let categories: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["category"].as_str().unwrap())
        .collect();
    assert_eq!(categories, vec!["Food", "Food", "Rent"]);

    let response = app
        .oneshot(get("/api/expenses?from=2024-03-01&to=2024-02-01"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_expenses_invalid_params() {
    for uri in [
        "/api/expenses?category=Groceries",
        "/api/expenses?from=yesterday",
        "/api/expenses?sort=size",
        "/api/expenses?order=sideways",
    ] {
        let app = setup_test_app();
        let response = app.oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "uri: {}", uri);
    }
}

#[tokio::test]
async fn test_top_expenses() {
    let (app, db) = setup_test_app_with_db();
    seed(&db, "5", "Food", "2024-01-10");
    seed(&db, "900", "Rent", "2024-02-01");
    seed(&db, "60", "Travel", "2024-02-03");
    seed(&db, "30", "Bills", "2024-02-04");

    let response = app.clone().oneshot(get("/api/expenses/top")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    let categories: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["category"].as_str().unwrap())
        .collect();
    assert_eq!(categories, vec!["Rent", "Travel", "Bills"]);

    let response = app.oneshot(get("/api/expenses/top?limit=1")).await.unwrap();
    let json = get_body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
}

// ========== Budget API Tests ==========

#[tokio::test]
async fn test_budget_defaults_and_update() {
    let app = setup_test_app();

    let response = app.clone().oneshot(get("/api/budget")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["monthly_income"].as_f64(), Some(0.0));
    assert_eq!(json["savings_goal"].as_f64(), Some(0.0));

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/budget",
            serde_json::json!({"monthly_income": 5000, "savings_goal": "1000"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get("/api/budget")).await.unwrap();
    let json = get_body_json(response).await;
    assert_eq!(json["monthly_income"].as_f64(), Some(5000.0));
    assert_eq!(json["savings_goal"].as_f64(), Some(1000.0));
}

#[tokio::test]
async fn test_budget_rejects_negative() {
    let (app, db) = setup_test_app_with_db();

    let response = app
        .oneshot(json_request(
            "PUT",
            "/api/budget",
            serde_json::json!({"monthly_income": -1, "savings_goal": 0}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(db.get_budget().unwrap().monthly_income, Decimal::ZERO);
}

#[tokio::test]
async fn test_budget_rejects_oversized_values() {
    let (app, db) = setup_test_app_with_db();

    let response = app
        .oneshot(json_request(
            "PUT",
            "/api/budget",
            serde_json::json!({"monthly_income": "1000000001", "savings_goal": 0}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(db.get_budget().unwrap().monthly_income, Decimal::ZERO);
}

// ========== Report API Tests ==========

#[tokio::test]
async fn test_report_categories_always_lists_every_category() {
    let (app, db) = setup_test_app_with_db();
    seed(&db, "10", "Food", "2024-01-10");
    seed(&db, "20", "Food", "2024-02-10");

    let response = app
        .oneshot(get("/api/reports/categories?from=2024-02-01"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["total"].as_f64(), Some(20.0));
    let categories = json["categories"].as_array().unwrap();
    assert_eq!(categories.len(), 6);
    assert_eq!(categories[0]["category"], "Food");
    assert_eq!(categories[0]["count"], 1);
    assert_eq!(categories[1]["amount"].as_f64(), Some(0.0));
}

#[tokio::test]
async fn test_report_trends() {
    let (app, db) = setup_test_app_with_db();
    seed(&db, "10", "Food", "2021-01-03");
    seed(&db, "20", "Food", "2021-01-04");

    let response = app
        .clone()
        .oneshot(get("/api/reports/trends?granularity=weekly"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["granularity"], "weekly");
    let buckets = json["buckets"].as_array().unwrap();
    assert_eq!(buckets[0]["period"], "2020-W53");
    assert_eq!(buckets[1]["period"], "2021-W01");

    let response = app
        .oneshot(get("/api/reports/trends?granularity=hourly"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_report_forecast_no_data() {
    let app = setup_test_app();

    let response = app.oneshot(get("/api/reports/forecast")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["forecast"]["status"], "no_data");
    assert!(json["forecast"]["amount"].is_null());
    assert_eq!(json["forecast"]["window"], 3);
}

#[tokio::test]
async fn test_report_forecast_with_history() {
    let (app, db) = setup_test_app_with_db();
    seed(&db, "120", "Food", &days_ago(0));

    let response = app
        .clone()
        .oneshot(get("/api/reports/forecast?by_category=true"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["forecast"]["status"], "insufficient_history");
    assert_eq!(json["forecast"]["amount"].as_f64(), Some(120.0));
    assert_eq!(json["by_category"]["Food"]["amount"].as_f64(), Some(120.0));

    let response = app
        .clone()
        .oneshot(get("/api/reports/forecast?window=1"))
        .await
        .unwrap();
    let json = get_body_json(response).await;
    assert_eq!(json["forecast"]["status"], "complete");

    let response = app
        .oneshot(get("/api/reports/forecast?window=0"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_report_forecast_window_bounds() {
    let (app, db) = setup_test_app_with_db();
    seed(&db, "120", "Food", &days_ago(0));

    let too_wide = format!("/api/reports/forecast?window={}", pennywise_core::MAX_WINDOW + 1);
    let huge = format!("/api/reports/forecast?window={}", usize::MAX);
    for uri in ["/api/reports/forecast?window=0", too_wide.as_str(), huge.as_str()] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "uri: {}", uri);
        let json = get_body_json(response).await;
        assert!(json["error"].as_str().unwrap().contains("window"));
    }

    let widest = format!("/api/reports/forecast?window={}", pennywise_core::MAX_WINDOW);
    let response = app.oneshot(get(&widest)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["forecast"]["window"], pennywise_core::MAX_WINDOW);
    assert_eq!(json["forecast"]["status"], "insufficient_history");
}

#[tokio::test]
async fn test_report_monthly_trend_and_budget() {
    let (app, db) = setup_test_app_with_db();
    seed(&db, "250", "Rent", &days_ago(0));
    db.set_budget(
        &pennywise_core::BudgetSettings::new(Decimal::from(1000), Decimal::from(200)).unwrap(),
    )
    .unwrap();

    let response = app
        .clone()
        .oneshot(get("/api/reports/monthly-trend"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["actual"].as_array().unwrap().len(), 1);
    assert!(json["forecast_month"].is_string());

    let response = app.oneshot(get("/api/reports/budget")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["spent_this_month"].as_f64(), Some(250.0));
    assert_eq!(json["remaining"].as_f64(), Some(750.0));
    assert_eq!(json["spendable"].as_f64(), Some(800.0));
    assert_eq!(json["projected_savings"].as_f64(), Some(750.0));
    assert_eq!(json["on_track"], true);
}

#[tokio::test]
async fn test_dashboard() {
    let (app, db) = setup_test_app_with_db();
    seed(&db, "15", "Food", &days_ago(1));
    seed(&db, "80", "Travel", &days_ago(2));

    let response = app
        .oneshot(get("/api/dashboard?category=Food"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["expenses"].as_array().unwrap().len(), 1);
    assert_eq!(json["total_spent"].as_f64(), Some(15.0));
    assert_eq!(json["categories"]["total"].as_f64(), Some(95.0));
    assert_eq!(json["daily"].as_array().unwrap().len(), 2);
    assert_eq!(json["top_expenses"][0]["category"], "Travel");
    assert_eq!(json["category_names"].as_array().unwrap().len(), 6);
    assert!(json["budget"].is_object());
    assert!(json["monthly_trend"].is_object());
}

// ========== Export API Tests ==========

#[tokio::test]
async fn test_export_csv_for_month() {
    let (app, db) = setup_test_app_with_db();
    seed(&db, "10", "Food", "2024-02-10");
    seed(&db, "20", "Bills", "2024-02-20");
    seed(&db, "30", "Rent", "2024-03-01");

    let response = app
        .oneshot(get("/api/export/expenses?month=2024-02"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "text/csv; charset=utf-8"
    );
    assert_eq!(
        response.headers().get("content-disposition").unwrap(),
        "attachment; filename=\"expenses_2024-02.csv\""
    );

    let body = get_body_text(response).await;
    let lines: Vec<&str> = body.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "id,date,category,amount,note");
    assert!(lines[1].contains("2024-02-20,Bills,20"));
}

#[tokio::test]
async fn test_export_json_all() {
    let (app, db) = setup_test_app_with_db();
    seed(&db, "10", "Food", "2024-02-10");
    seed(&db, "30", "Rent", "2024-03-01");

    let response = app
        .oneshot(get("/api/export/expenses?format=json&month=all"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_export_invalid_params() {
    for uri in [
        "/api/export/expenses?format=xml",
        "/api/export/expenses?month=2024-13",
    ] {
        let app = setup_test_app();
        let response = app.oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "uri: {}", uri);
    }
}

// ========== Audit API Tests ==========

#[tokio::test]
async fn test_api_access_is_audited() {
    let (app, db) = setup_test_app_with_db();

    app.clone().oneshot(get("/api/expenses")).await.unwrap();
    app.clone().oneshot(get("/api/budget")).await.unwrap();

    let response = app.oneshot(get("/api/audit?limit=10")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 2);

    // The audit listing logs itself after reading
    let entries = db
        .list_audit_log(&pennywise_core::AuditFilter::default(), 10)
        .unwrap();
    assert_eq!(entries.len(), 3);
    assert!(entries.iter().all(|e| e.actor == "local-dev"));
}

#[tokio::test]
async fn test_audit_history_of_one_expense() {
    let (app, db) = setup_test_app_with_db();
    let id = seed(&db, "20", "Food", "2024-03-01");
    let other = seed(&db, "35", "Bills", "2024-03-02");

    app.clone()
        .oneshot(get(&format!("/api/expenses/{}", id)))
        .await
        .unwrap();
    app.clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/expenses/{}", id),
            serde_json::json!({"amount": "22.50", "category": "Food", "date": "2024-03-01"}),
        ))
        .await
        .unwrap();
    app.clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/expenses/{}", other))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let uri = format!("/api/audit?entity_type=Expense&entity_id={}", id);
    let response = app.oneshot(get(&uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    let actions: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["action"].as_str().unwrap())
        .collect();
    assert_eq!(actions, vec!["update", "view"]);
}

// ========== Security Tests ==========

fn secured_app() -> Router {
    let config = ServerConfig {
        require_auth: true,
        api_keys: vec!["secret-key".to_string()],
        ..Default::default()
    };
    create_router(Database::in_memory().unwrap(), None, config)
}

#[tokio::test]
async fn test_auth_required_without_key() {
    let response = secured_app().oneshot(get("/api/expenses")).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = get_body_json(response).await;
    assert_eq!(json["error"], "Authentication required");
}

#[tokio::test]
async fn test_auth_with_valid_and_invalid_keys() {
    let app = secured_app();

    let request = Request::builder()
        .uri("/api/expenses")
        .header("authorization", "Bearer secret-key")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    for header in ["Bearer wrong-key", "Bearer secret-ke", "secret-key"] {
        let request = Request::builder()
            .uri("/api/expenses")
            .header("authorization", header)
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "header: {}", header);
    }
}

#[tokio::test]
async fn test_security_headers() {
    let response = setup_test_app().oneshot(get("/api/budget")).await.unwrap();

    let headers = response.headers();
    assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
    assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
    assert!(headers.get("content-security-policy").is_some());
}

#[test]
fn test_validate_api_key() {
    let keys = vec!["abc123".to_string(), "other".to_string()];
    assert!(validate_api_key("abc123", &keys));
    assert!(validate_api_key("other", &keys));
    assert!(!validate_api_key("abc12", &keys));
    assert!(!validate_api_key("", &keys));
    assert!(!validate_api_key("abc123", &[]));
}

#[test]
fn test_parse_api_keys() {
    assert_eq!(parse_api_keys(" a, b ,,c "), vec!["a", "b", "c"]);
    assert!(parse_api_keys("").is_empty());
}
