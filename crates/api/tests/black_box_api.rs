use chrono::{Duration as ChronoDuration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use mpsystem_api::config::ApiConfig;
use mpsystem_auth::{JwtClaims, Role};
use mpsystem_core::UserId;
use reqwest::StatusCode;
use serde_json::json;

const JWT_SECRET: &str = "test-secret";

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// Same router as prod with demo data loaded, bound to an ephemeral port.
    async fn spawn() -> Self {
        Self::spawn_with(ApiConfig::with_secret(JWT_SECRET)).await
    }

    async fn spawn_with(config: ApiConfig) -> Self {
        let app = mpsystem_api::app::build_app(&config).expect("failed to build app");
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}/api", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn mint_jwt(user_id: u64, username: &str, role: Role, ttl: ChronoDuration) -> String {
    let now = Utc::now();
    let claims = JwtClaims {
        sub: UserId::new(user_id),
        username: username.to_string(),
        role,
        iat: now.timestamp(),
        exp: (now + ttl).timestamp(),
        jti: format!("test-{user_id}"),
    };

    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .expect("failed to encode jwt")
}

async fn login(client: &reqwest::Client, srv: &TestServer, username: &str, password: &str) -> String {
    let res = client
        .post(srv.url("/auth/login"))
        .json(&json!({ "username": username, "password": password }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK, "login as {username}");
    let body: serde_json::Value = res.json().await.unwrap();
    body["token"].as_str().unwrap().to_string()
}

async fn get_json(
    client: &reqwest::Client,
    url: String,
    token: &str,
) -> (StatusCode, serde_json::Value) {
    let res = client.get(url).bearer_auth(token).send().await.unwrap();
    let status = res.status();
    let body = res.json().await.unwrap_or(serde_json::Value::Null);
    (status, body)
}

fn num(v: &serde_json::Value) -> f64 {
    v.as_f64().unwrap_or_else(|| panic!("expected a number, got {v}"))
}

#[tokio::test]
async fn health_is_public() {
    let srv = TestServer::spawn().await;

    let res = reqwest::get(srv.url("/health")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["status"], "OK");
    assert_eq!(body["environment"], "development");
}

#[tokio::test]
async fn auth_required_for_protected_endpoints() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client.get(srv.url("/inventory")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "unauthorized");

    let res = client
        .get(srv.url("/inventory"))
        .bearer_auth("not-a-token")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn expired_token_is_rejected() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let token = mint_jwt(1, "admin", Role::Administrator, ChronoDuration::minutes(-5));
    let (status, _) = get_json(&client, srv.url("/inventory"), &token).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_issues_token_and_profile_resolves_it() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/auth/login"))
        .json(&json!({ "username": "admin", "password": "admin123" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["role"], "administrator");
    assert!(body["user"].get("passwordHash").is_none());
    assert!(body["user"]["lastLogin"].is_string());

    let token = body["token"].as_str().unwrap();
    let (status, profile) = get_json(&client, srv.url("/auth/profile"), token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["user"]["username"], "admin");
}

#[tokio::test]
async fn bad_logins_are_rejected() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/auth/login"))
        .json(&json!({ "username": "admin", "password": "wrong-password" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client
        .post(srv.url("/auth/login"))
        .json(&json!({ "username": "admin" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn registration_rules() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/auth/register"))
        .json(&json!({
            "username": "mallory",
            "email": "mallory@example.com",
            "password": "secret1",
            "role": "administrator"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = client
        .post(srv.url("/auth/register"))
        .json(&json!({
            "username": "viewer",
            "email": "viewer@example.com",
            "password": "secret1"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["user"]["role"], "user");
    assert_eq!(body["user"]["id"], 4);

    let res = client
        .post(srv.url("/auth/register"))
        .json(&json!({
            "username": "Viewer",
            "email": "other@example.com",
            "password": "secret1"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);

    let token = login(&client, &srv, "viewer", "secret1").await;
    let (status, _) = get_json(&client, srv.url("/inventory"), &token).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn read_only_role_cannot_write() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = mint_jwt(9, "viewer", Role::User, ChronoDuration::minutes(10));

    let res = client
        .post(srv.url("/inventory"))
        .bearer_auth(&token)
        .json(&json!({ "name": "Widget", "sku": "WID-1", "quantity": 1, "price": 10 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "forbidden");

    let (status, _) = get_json(&client, srv.url("/users"), &token).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn inventory_lifecycle_create_adjust_query() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = login(&client, &srv, "manager", "manager123").await;

    // Create
    let res = client
        .post(srv.url("/inventory"))
        .bearer_auth(&token)
        .json(&json!({
            "name": "Widget",
            "sku": "WID-001",
            "quantity": 5,
            "price": 250,
            "cost": 100,
            "category": "Gadgets"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: serde_json::Value = res.json().await.unwrap();
    let id = created["item"]["id"].as_u64().unwrap();
    assert_eq!(id, 4);
    assert_eq!(created["item"]["unit"], "шт");

    // Same SKU, different case
    let res = client
        .post(srv.url("/inventory"))
        .bearer_auth(&token)
        .json(&json!({ "name": "Copy", "sku": "wid-001", "quantity": 1, "price": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);

    // Missing price
    let res = client
        .post(srv.url("/inventory"))
        .bearer_auth(&token)
        .json(&json!({ "name": "Broken", "sku": "BRK-1", "quantity": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "validation_error");

    // Adjust
    let res = client
        .post(srv.url(&format!("/inventory/{id}/adjust")))
        .bearer_auth(&token)
        .json(&json!({ "delta": 10, "reason": "delivery" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["change"]["oldQuantity"], 5);
    assert_eq!(body["change"]["newQuantity"], 15);

    let res = client
        .post(srv.url(&format!("/inventory/{id}/adjust")))
        .bearer_auth(&token)
        .json(&json!({ "delta": -100 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // Query
    let (status, item) = get_json(&client, srv.url(&format!("/inventory/{id}")), &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(item["name"], "Widget");
    assert_eq!(item["quantity"], 15);

    let (status, list) = get_json(&client, srv.url("/inventory?category=gadg"), &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["items"].as_array().unwrap().len(), 1);
    assert_eq!(list["pagination"]["total"], 1);

    // Delete, then it is gone
    let res = client
        .delete(srv.url(&format!("/inventory/{id}")))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let (status, _) = get_json(&client, srv.url(&format!("/inventory/{id}")), &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = get_json(&client, srv.url("/inventory/abc"), &token).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_id");
}

#[tokio::test]
async fn sales_lifecycle_and_listing() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = login(&client, &srv, "employee", "employee123").await;

    let res = client
        .post(srv.url("/sales"))
        .bearer_auth(&token)
        .json(&json!({
            "customerName": "Ольга Смирнова",
            "items": [{ "itemId": 1, "name": "Товар 1", "quantity": 2, "price": 1000 }],
            "discount": 200,
            "status": "pending",
            "date": "2024-01-18"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: serde_json::Value = res.json().await.unwrap();
    let sale = &created["sale"];
    assert_eq!(num(&sale["subtotal"]), 2000.0);
    assert_eq!(num(&sale["tax"]), 200.0);
    assert_eq!(num(&sale["total"]), 2000.0);
    let id = sale["id"].as_u64().unwrap();

    let res = client
        .post(srv.url(&format!("/sales/{id}/complete")))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["sale"]["status"], "completed");
    assert_eq!(body["sale"]["paymentStatus"], "paid");

    let res = client
        .post(srv.url(&format!("/sales/{id}/refund")))
        .bearer_auth(&token)
        .json(&json!({ "amount": 500 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(num(&body["refundAmount"]), 500.0);

    // Newest first; the new sale leads the list.
    let (status, list) = get_json(&client, srv.url("/sales?limit=2"), &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["sales"][0]["id"].as_u64(), Some(id));
    assert_eq!(list["pagination"]["totalPages"], 2);

    let (status, list) = get_json(&client, srv.url("/sales?paymentMethod=card"), &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["sales"].as_array().unwrap().len(), 1);

    let res = client
        .post(srv.url("/sales"))
        .bearer_auth(&token)
        .json(&json!({ "customerName": "Nobody", "items": [] }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn sales_report_over_seed_data() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = login(&client, &srv, "admin", "admin123").await;

    let (status, report) = get_json(&client, srv.url("/reports/sales"), &token).await;
    assert_eq!(status, StatusCode::OK);
    let summary = &report["summary"];
    assert_eq!(summary["totalSales"], 3);
    assert_eq!(num(&summary["totalRevenue"]), 15410.0);
    assert_eq!(num(&summary["averageOrderValue"]), 5136.67);
    assert_eq!(summary["completedSales"], 2);
    assert_eq!(summary["pendingSales"], 1);
    assert_eq!(num(&report["dailyBreakdown"]["2024-01-16"]["revenue"]), 5510.0);
    assert_eq!(report["dailyBreakdown"]["2024-01-15"]["itemsSold"], 3);
    assert_eq!(report["paymentMethodBreakdown"]["card"]["count"], 1);

    let (status, filtered) = get_json(
        &client,
        srv.url("/reports/sales?status=completed&dateFrom=2024-01-16&dateTo=2024-01-16"),
        &token,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(filtered["summary"]["totalSales"], 1);
    assert_eq!(num(&filtered["summary"]["completedRevenue"]), 5510.0);

    let (status, body) = get_json(&client, srv.url("/reports/sales?dateFrom=yesterday"), &token).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");

    let (status, _) = get_json(&client, srv.url("/reports/sales?status=shipped"), &token).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn inventory_financial_and_dashboard_reports() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = login(&client, &srv, "admin", "admin123").await;

    let (status, inventory) = get_json(&client, srv.url("/reports/inventory"), &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(inventory["summary"]["totalItems"], 3);
    assert_eq!(inventory["summary"]["totalQuantity"], 225);
    assert_eq!(num(&inventory["summary"]["totalValue"]), 340000.0);
    assert_eq!(inventory["categoryBreakdown"]["Категория А"]["count"], 2);

    let (status, financial) = get_json(&client, srv.url("/reports/financial"), &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(num(&financial["summary"]["totalRevenue"]), 15410.0);
    assert_eq!(num(&financial["summary"]["totalCost"]), 9900.0);
    assert_eq!(num(&financial["summary"]["totalExpenses"]), 255000.0);
    assert_eq!(num(&financial["summary"]["grossMargin"]), 35.76);

    let (status, dash) = get_json(&client, srv.url("/reports/dashboard?date=2024-01-17"), &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(num(&dash["today"]["revenue"]), 4400.0);
    assert_eq!(num(&dash["yesterday"]["revenue"]), 5510.0);
    assert_eq!(dash["recentActivity"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn export_serves_csv_attachment() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = login(&client, &srv, "admin", "admin123").await;

    let res = client
        .get(srv.url("/reports/export/sales"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let content_type = res.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/csv"));
    assert_eq!(
        res.headers()["content-disposition"].to_str().unwrap(),
        "attachment; filename=\"sales-report.csv\""
    );
    let body = res.text().await.unwrap();
    let mut lines = body.lines();
    assert_eq!(
        lines.next(),
        Some("id,date,customerName,status,paymentMethod,itemsSold,subtotal,tax,discount,total")
    );
    assert_eq!(lines.count(), 3);

    let (status, json_export) =
        get_json(&client, srv.url("/reports/export/inventory?format=json"), &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_export["summary"]["totalItems"], 3);

    let (status, _) = get_json(&client, srv.url("/reports/export/payroll"), &token).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = get_json(&client, srv.url("/reports/export/sales?format=pdf"), &token).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn user_administration() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = login(&client, &srv, "admin", "admin123").await;

    let res = client
        .post(srv.url("/users"))
        .bearer_auth(&token)
        .json(&json!({ "username": "clerk", "email": "clerk@mpsystem.com", "password": "clerk123" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = client
        .post(srv.url("/users"))
        .bearer_auth(&token)
        .json(&json!({
            "username": "clerk",
            "email": "clerk@mpsystem.com",
            "password": "clerk123",
            "firstName": "Анна",
            "lastName": "Кузнецова"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["user"]["role"], "employee");
    let clerk_id = body["user"]["id"].as_u64().unwrap();

    let res = client
        .put(srv.url(&format!("/users/{clerk_id}")))
        .bearer_auth(&token)
        .json(&json!({ "email": "manager@mpsystem.com" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);

    let (status, list) = get_json(&client, srv.url("/users?search=кузн"), &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["users"].as_array().unwrap().len(), 1);

    // The clerk changes their own password.
    let clerk_token = login(&client, &srv, "clerk", "clerk123").await;
    let res = client
        .put(srv.url(&format!("/users/{clerk_id}/password")))
        .bearer_auth(&clerk_token)
        .json(&json!({ "currentPassword": "wrong1", "newPassword": "clerk456" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let res = client
        .put(srv.url(&format!("/users/{clerk_id}/password")))
        .bearer_auth(&clerk_token)
        .json(&json!({ "currentPassword": "clerk123", "newPassword": "clerk456" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    login(&client, &srv, "clerk", "clerk456").await;

    let res = client
        .delete(srv.url("/users/1"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let (status, stats) = get_json(&client, srv.url("/users/stats/summary"), &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["summary"]["totalUsers"], 4);
    assert_eq!(stats["roleStats"]["employee"], 2);
}

#[tokio::test]
async fn expenses_feed_the_financial_report() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = login(&client, &srv, "manager", "manager123").await;

    let res = client
        .post(srv.url("/expenses"))
        .bearer_auth(&token)
        .json(&json!({ "date": "2024-01-17", "category": "Rent", "amount": 5000 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let (status, list) = get_json(&client, srv.url("/expenses?category=rent"), &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["expenses"].as_array().unwrap().len(), 2);
    assert_eq!(num(&list["total"]), 55000.0);

    let (_, financial) = get_json(&client, srv.url("/reports/financial"), &token).await;
    assert_eq!(num(&financial["summary"]["totalExpenses"]), 260000.0);
    assert_eq!(num(&financial["expenseByCategory"]["Rent"]), 55000.0);

    let employee = mint_jwt(3, "employee", Role::Employee, ChronoDuration::minutes(10));
    let res = client
        .post(srv.url("/expenses"))
        .bearer_auth(&employee)
        .json(&json!({ "category": "Misc", "amount": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn unknown_routes_are_json_404() {
    let srv = TestServer::spawn_with(ApiConfig {
        seed_demo_data: false,
        ..ApiConfig::with_secret(JWT_SECRET)
    })
    .await;

    let res = reqwest::get(srv.url("/nope")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn malformed_query_strings_are_json_validation_errors() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = mint_jwt(1, "admin", Role::Administrator, ChronoDuration::minutes(10));

    for path in [
        "/sales?page=abc",
        "/inventory?limit=-1",
        "/users?page=1.5",
    ] {
        let res = client.get(srv.url(path)).bearer_auth(&token).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "{path}");
        let content_type = res.headers()[reqwest::header::CONTENT_TYPE].to_str().unwrap().to_string();
        assert!(content_type.starts_with("application/json"), "{path}: {content_type}");
        let body: serde_json::Value = res.json().await.unwrap();
        assert_eq!(body["error"], "validation_error", "{path}");
        assert!(body["message"].as_str().is_some_and(|m| !m.is_empty()), "{path}");
    }
}

#[tokio::test]
async fn out_of_range_amounts_are_rejected_not_crashing() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = mint_jwt(1, "admin", Role::Administrator, ChronoDuration::minutes(10));

    let res = client
        .post(srv.url("/sales"))
        .bearer_auth(&token)
        .json(&json!({
            "customerName": "Оптовик",
            "items": [{ "itemId": 1, "quantity": 4000000000u64, "price": 1e27 }],
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "validation_error");

    let (status, report) = get_json(&client, srv.url("/reports/sales"), &token).await;
    assert_eq!(status, StatusCode::OK);
    assert!(report["summary"]["totalSales"].is_number());
}
