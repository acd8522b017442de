use super::*;
use axum::body::{to_bytes, Body};
use axum::http::Request;
use tower::ServiceExt;

// -------------------------------------------------------------------------
// Unit tests (no DB)
// -------------------------------------------------------------------------

#[test]
fn normalize_limit_applies_defaults_and_bounds() {
    assert_eq!(normalize_limit(None), 50);
    assert_eq!(normalize_limit(Some(0)), 1);
    assert_eq!(normalize_limit(Some(1_000)), 200);
    assert_eq!(normalize_limit(Some(25)), 25);
}

#[test]
fn api_error_validation_error_maps_to_bad_request() {
    let response = ApiError::new("req-1", "validation_error", "invalid input").into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[test]
fn api_error_forbidden_maps_to_403() {
    let response = ApiError::new("req-1", "forbidden", "admin access required").into_response();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[test]
fn api_error_not_found_maps_to_404() {
    let response = ApiError::new("req-1", "not_found", "missing").into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[test]
fn api_error_unknown_code_maps_to_500() {
    let response = ApiError::new("req-1", "internal_error", "boom").into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

// -------------------------------------------------------------------------
// Integration test helpers (with DB)
// -------------------------------------------------------------------------

/// App state whose enrichment client points at a dead port: lookups fail
/// immediately and degrade to `null`, exercising the failure-tolerant path
/// without touching the network.
fn test_state(pool: sqlx::PgPool) -> AppState {
    let foodfacts =
        ecograde_foodfacts::FoodFactsClient::with_base_url(1, "ecograde-test/0.1", "http://127.0.0.1:9")
            .expect("client construction should not fail");
    AppState {
        pool,
        foodfacts,
        session_ttl_hours: 1,
    }
}

fn test_app(pool: sqlx::PgPool) -> Router {
    build_app(test_state(pool), default_rate_limit_state())
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
    token: Option<&str>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    };

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json parse")
    };
    (status, json)
}

/// Register and log in a fresh customer account, returning its session token.
async fn login_customer(app: &Router, email: &str) -> String {
    let (status, _) = send(
        app,
        "POST",
        "/api/v1/auth/register",
        Some(serde_json::json!({
            "email": email,
            "password": "CustomerPass1",
            "first_name": "Test",
            "last_name": "Customer"
        })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        app,
        "POST",
        "/api/v1/auth/login",
        Some(serde_json::json!({
            "email": email,
            "password": "CustomerPass1"
        })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["data"]["token"].as_str().expect("token").to_string()
}

/// Insert an admin user directly and log in through the API.
async fn login_admin(pool: &sqlx::PgPool, app: &Router, email: &str) -> String {
    let hash = ecograde_core::credentials::hash_password("AdminPass123").expect("hash");
    ecograde_db::seed_admin_user(pool, email, &hash)
        .await
        .expect("seed admin");

    let (status, body) = send(
        app,
        "POST",
        "/api/v1/auth/login",
        Some(serde_json::json!({
            "email": email,
            "password": "AdminPass123"
        })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["data"]["token"].as_str().expect("token").to_string()
}

/// Seed a product with an optional sustainability block.
async fn seed_product(
    pool: &sqlx::PgPool,
    name: &str,
    sustainability: Option<serde_json::Value>,
    score: i32,
) -> i64 {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO products \
             (name, brand, category, description, price, sustainability, sustainability_score) \
         VALUES ($1, 'Test Brand', 'Test Category', NULL, 9.99, $2, $3) \
         RETURNING id",
    )
    .bind(name)
    .bind(sustainability)
    .bind(score)
    .fetch_one(pool)
    .await
    .expect("seed product")
}

fn best_block() -> serde_json::Value {
    serde_json::json!({
        "recyclable_material": true,
        "biodegradable": true,
        "plastic_free": true,
        "carbon_footprint": 1.0,
        "cruelty_free": true,
        "fair_trade_certified": true,
        "renewable_energy_used": true,
        "energy_efficiency_rating": 5
    })
}

fn worst_block() -> serde_json::Value {
    serde_json::json!({
        "recyclable_material": false,
        "biodegradable": false,
        "plastic_free": false,
        "carbon_footprint": 10.0,
        "cruelty_free": false,
        "fair_trade_certified": false,
        "renewable_energy_used": false
    })
}

// -------------------------------------------------------------------------
// Health & auth
// -------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn health_returns_ok(pool: sqlx::PgPool) {
    let app = test_app(pool);
    let (status, body) = send(&app, "GET", "/api/v1/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"].as_str(), Some("ok"));
}

#[sqlx::test(migrations = "../../migrations")]
async fn register_rejects_duplicate_email(pool: sqlx::PgPool) {
    let app = test_app(pool);
    let payload = serde_json::json!({
        "email": "dup@example.com",
        "password": "CustomerPass1",
        "first_name": "Dup",
        "last_name": "User"
    });

    let (status, body) = send(&app, "POST", "/api/v1/auth/register", Some(payload.clone()), None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["role"].as_str(), Some("customer"));
    assert!(body["data"]["password_hash"].is_null(), "hash must not leak");

    let (status, _) = send(&app, "POST", "/api/v1/auth/register", Some(payload), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../migrations")]
async fn register_rejects_short_password(pool: sqlx::PgPool) {
    let app = test_app(pool);
    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/auth/register",
        Some(serde_json::json!({
            "email": "short@example.com",
            "password": "short",
            "first_name": "A",
            "last_name": "B"
        })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../migrations")]
async fn login_rejects_wrong_password(pool: sqlx::PgPool) {
    let app = test_app(pool);
    login_customer(&app, "wrongpw@example.com").await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/auth/login",
        Some(serde_json::json!({
            "email": "wrongpw@example.com",
            "password": "NotThePassword1"
        })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../migrations")]
async fn login_rejects_blocked_account(pool: sqlx::PgPool) {
    let app = test_app(pool.clone());
    login_customer(&app, "blocked@example.com").await;

    sqlx::query("UPDATE users SET is_blocked = TRUE WHERE email = $1")
        .bind("blocked@example.com")
        .execute(&pool)
        .await
        .expect("block user");

    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/auth/login",
        Some(serde_json::json!({
            "email": "blocked@example.com",
            "password": "CustomerPass1"
        })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

// -------------------------------------------------------------------------
// Compare
// -------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn compare_requires_auth(pool: sqlx::PgPool) {
    let app = test_app(pool);
    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/comparisons/compare",
        Some(serde_json::json!({ "product_id1": 1, "product_id2": 2 })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../migrations")]
async fn compare_computes_result_and_saves_history(pool: sqlx::PgPool) {
    let app = test_app(pool.clone());
    let id_a = seed_product(&pool, "Solar Soap", Some(best_block()), 100).await;
    let id_b = seed_product(&pool, "Diesel Soap", Some(worst_block()), 0).await;
    let token = login_customer(&app, "compare@example.com").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/comparisons/compare",
        Some(serde_json::json!({ "product_id1": id_a, "product_id2": id_b })),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let data = &body["data"];
    assert_eq!(data["scores"]["product1"].as_i64(), Some(100));
    assert_eq!(data["scores"]["product2"].as_i64(), Some(0));
    assert_eq!(data["scores"]["difference"].as_i64(), Some(100));
    assert_eq!(data["winner"].as_i64(), Some(id_a));
    assert_eq!(data["summary"]["best_for"].as_str(), Some("Solar Soap"));
    assert!(
        data["eco_description"]
            .as_str()
            .expect("eco description")
            .contains("significantly more eco-friendly"),
        "unexpected description: {}",
        data["eco_description"]
    );
    // Enrichment is pointed at a dead port; both slots degrade to null.
    assert!(data["external_data"]["product1"].is_null());
    assert!(data["external_data"]["product2"].is_null());
    assert_eq!(
        data["comparison_graph"]["labels"].as_array().map(Vec::len),
        Some(8)
    );

    let (status, body) = send(&app, "GET", "/api/v1/comparisons/history", None, Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    let items = body["data"].as_array().expect("history array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["scores"]["difference"].as_i64(), Some(100));
    assert_eq!(items[0]["products"][0]["name"].as_str(), Some("Solar Soap"));
}

#[sqlx::test(migrations = "../../migrations")]
async fn compare_validates_ids(pool: sqlx::PgPool) {
    let app = test_app(pool.clone());
    let token = login_customer(&app, "validate@example.com").await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/comparisons/compare",
        Some(serde_json::json!({ "product_id1": 1 })),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/comparisons/compare",
        Some(serde_json::json!({ "product_id1": 7, "product_id2": 7 })),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/comparisons/compare",
        Some(serde_json::json!({ "product_id1": 998, "product_id2": 999 })),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../migrations")]
async fn tied_comparison_has_no_winner(pool: sqlx::PgPool) {
    let app = test_app(pool.clone());
    let id_a = seed_product(&pool, "Twin One", Some(best_block()), 100).await;
    let id_b = seed_product(&pool, "Twin Two", Some(best_block()), 100).await;
    let token = login_customer(&app, "tie@example.com").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/comparisons/compare",
        Some(serde_json::json!({ "product_id1": id_a, "product_id2": id_b })),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["winner"].is_null());
    assert_eq!(
        body["data"]["summary"]["best_for"].as_str(),
        Some("Both products")
    );
}

// -------------------------------------------------------------------------
// Quick compare
// -------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn quick_compare_matches_names_case_insensitively(pool: sqlx::PgPool) {
    let app = test_app(pool.clone());
    seed_product(&pool, "Bamboo Toothbrush", Some(best_block()), 100).await;
    seed_product(&pool, "Plastic Toothbrush", Some(worst_block()), 0).await;

    let (status, body) = send(
        &app,
        "GET",
        "/api/v1/comparisons/quick?name1=BAMBOO&name2=plastic",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["scores"]["difference"].as_i64(), Some(100));

    // Quick compare never persists.
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comparisons")
        .fetch_one(&pool)
        .await
        .expect("count");
    assert_eq!(count, 0);
}

#[sqlx::test(migrations = "../../migrations")]
async fn quick_compare_requires_both_names(pool: sqlx::PgPool) {
    let app = test_app(pool);
    let (status, _) = send(&app, "GET", "/api/v1/comparisons/quick?name1=soap", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../migrations")]
async fn quick_compare_unknown_name_is_404(pool: sqlx::PgPool) {
    let app = test_app(pool.clone());
    seed_product(&pool, "Known Product", None, 0).await;
    let (status, _) = send(
        &app,
        "GET",
        "/api/v1/comparisons/quick?name1=known&name2=unknown-xyz",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// -------------------------------------------------------------------------
// History authorization & retention
// -------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn history_entry_is_owner_or_admin_only(pool: sqlx::PgPool) {
    let app = test_app(pool.clone());
    let id_a = seed_product(&pool, "Owner Soap", Some(best_block()), 100).await;
    let id_b = seed_product(&pool, "Other Soap", Some(worst_block()), 0).await;

    let owner_token = login_customer(&app, "owner@example.com").await;
    let other_token = login_customer(&app, "other@example.com").await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/comparisons/compare",
        Some(serde_json::json!({ "product_id1": id_a, "product_id2": id_b })),
        Some(&owner_token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, "GET", "/api/v1/comparisons/history", None, Some(&owner_token)).await;
    let entry_id = body["data"][0]["id"].as_i64().expect("entry id");

    let uri = format!("/api/v1/comparisons/history/{entry_id}");
    let (status, _) = send(&app, "GET", &uri, None, Some(&other_token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = send(&app, "DELETE", &uri, None, Some(&other_token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let admin_token = login_admin(&pool, &app, "admin-hist@example.com").await;
    let (status, _) = send(&app, "GET", &uri, None, Some(&admin_token)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "DELETE", &uri, None, Some(&owner_token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["deleted"].as_i64(), Some(1));

    let (status, _) = send(&app, "GET", &uri, None, Some(&owner_token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../migrations")]
async fn clear_history_removes_only_callers_rows(pool: sqlx::PgPool) {
    let app = test_app(pool.clone());
    let id_a = seed_product(&pool, "Clear A", Some(best_block()), 100).await;
    let id_b = seed_product(&pool, "Clear B", Some(worst_block()), 0).await;

    let token1 = login_customer(&app, "clear1@example.com").await;
    let token2 = login_customer(&app, "clear2@example.com").await;
    for token in [&token1, &token2] {
        let (status, _) = send(
            &app,
            "POST",
            "/api/v1/comparisons/compare",
            Some(serde_json::json!({ "product_id1": id_a, "product_id2": id_b })),
            Some(token),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = send(
        &app,
        "DELETE",
        "/api/v1/comparisons/history/clear",
        None,
        Some(&token1),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["deleted"].as_i64(), Some(1));

    let (_, body) = send(&app, "GET", "/api/v1/comparisons/history", None, Some(&token2)).await;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));
}

#[sqlx::test(migrations = "../../migrations")]
async fn expired_comparisons_are_invisible(pool: sqlx::PgPool) {
    let app = test_app(pool.clone());
    let id_a = seed_product(&pool, "Expired A", Some(best_block()), 100).await;
    let id_b = seed_product(&pool, "Expired B", Some(worst_block()), 0).await;
    let token = login_customer(&app, "expired@example.com").await;

    let user_id: i64 = sqlx::query_scalar("SELECT id FROM users WHERE email = $1")
        .bind("expired@example.com")
        .fetch_one(&pool)
        .await
        .expect("user id");

    // A row written 31 days ago, past its retention window.
    let comparison_id: i64 = sqlx::query_scalar(
        "INSERT INTO comparisons \
             (user_id, product1_id, product2_id, product1_score, product2_score, \
              score_difference, winner_product_id, highlights, comparison_graph, \
              external_data, recommendations, eco_description, best_for, key_difference, \
              created_at, expires_at) \
         VALUES ($1, $2, $3, 100, 0, 100, $2, \
                 '{\"product1_advantages\":[],\"product2_advantages\":[]}'::jsonb, \
                 '{\"labels\":[],\"datasets\":[]}'::jsonb, \
                 '{\"product1\":null,\"product2\":null}'::jsonb, \
                 '{\"general\":[],\"product1_suggestions\":[],\"product2_suggestions\":[]}'::jsonb, \
                 'desc', 'Expired A', 'diff', \
                 NOW() - INTERVAL '31 days', NOW() - INTERVAL '1 day') \
         RETURNING id",
    )
    .bind(user_id)
    .bind(id_a)
    .bind(id_b)
    .fetch_one(&pool)
    .await
    .expect("insert expired comparison");

    let (_, body) = send(&app, "GET", "/api/v1/comparisons/history", None, Some(&token)).await;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(0));

    let uri = format!("/api/v1/comparisons/history/{comparison_id}");
    let (status, _) = send(&app, "GET", &uri, None, Some(&token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let purged = ecograde_db::purge_expired(&pool).await.expect("purge");
    assert_eq!(purged, 1);
}

// -------------------------------------------------------------------------
// Stats
// -------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn stats_requires_admin_role(pool: sqlx::PgPool) {
    let app = test_app(pool.clone());
    let customer = login_customer(&app, "plain@example.com").await;

    let (status, _) = send(&app, "GET", "/api/v1/comparisons/stats", None, Some(&customer)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, "GET", "/api/v1/comparisons/stats", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../migrations")]
async fn stats_aggregates_comparisons(pool: sqlx::PgPool) {
    let app = test_app(pool.clone());
    let id_a = seed_product(&pool, "Stats A", Some(best_block()), 100).await;
    let id_b = seed_product(&pool, "Stats B", Some(worst_block()), 0).await;
    let id_c = seed_product(&pool, "Stats C", Some(worst_block()), 0).await;

    let token = login_customer(&app, "stats@example.com").await;
    for pair in [(id_a, id_b), (id_a, id_c)] {
        let (status, _) = send(
            &app,
            "POST",
            "/api/v1/comparisons/compare",
            Some(serde_json::json!({ "product_id1": pair.0, "product_id2": pair.1 })),
            Some(&token),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let admin = login_admin(&pool, &app, "admin-stats@example.com").await;
    let (status, body) = send(&app, "GET", "/api/v1/comparisons/stats", None, Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);

    let data = &body["data"];
    assert_eq!(data["total_comparisons"].as_i64(), Some(2));
    let most = data["most_compared_products"].as_array().expect("ranking");
    assert_eq!(most[0]["name"].as_str(), Some("Stats A"));
    assert_eq!(most[0]["count"].as_i64(), Some(2));
    assert!((data["average_score_difference"].as_f64().expect("avg") - 100.0).abs() < 1e-9);
    let trend = data["last7_days_trend"].as_array().expect("trend");
    assert_eq!(trend.len(), 1);
    assert_eq!(trend[0]["count"].as_i64(), Some(2));
}

// -------------------------------------------------------------------------
// Product CRUD
// -------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn product_writes_require_admin(pool: sqlx::PgPool) {
    let app = test_app(pool.clone());
    let customer = login_customer(&app, "notadmin@example.com").await;

    let payload = serde_json::json!({
        "name": "New Soap",
        "brand": "CleanCo",
        "category": "Personal Care",
        "price": "4.99",
        "sustainability": null
    });

    let (status, _) = send(&app, "POST", "/api/v1/products", Some(payload.clone()), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, "POST", "/api/v1/products", Some(payload), Some(&customer)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../migrations")]
async fn product_create_derives_score_from_attributes(pool: sqlx::PgPool) {
    let app = test_app(pool.clone());
    let admin = login_admin(&pool, &app, "admin-prod@example.com").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/products",
        Some(serde_json::json!({
            "name": "Scored Soap",
            "brand": "CleanCo",
            "category": "Personal Care",
            "price": "4.99",
            "sustainability": best_block()
        })),
        Some(&admin),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["sustainability_score"].as_i64(), Some(100));

    // Stripping the block on update resets the denormalized score.
    let id = body["data"]["id"].as_i64().expect("id");
    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/v1/products/{id}"),
        Some(serde_json::json!({
            "name": "Scored Soap",
            "brand": "CleanCo",
            "category": "Personal Care",
            "price": "4.99",
            "sustainability": null
        })),
        Some(&admin),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["sustainability_score"].as_i64(), Some(0));
}

#[sqlx::test(migrations = "../../migrations")]
async fn product_get_returns_404_for_unknown_id(pool: sqlx::PgPool) {
    let app = test_app(pool);
    let (status, _) = send(&app, "GET", "/api/v1/products/424242", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../migrations")]
async fn product_list_returns_seeded_rows(pool: sqlx::PgPool) {
    let app = test_app(pool.clone());
    seed_product(&pool, "Listed One", None, 0).await;
    seed_product(&pool, "Listed Two", Some(best_block()), 100).await;

    let (status, body) = send(&app, "GET", "/api/v1/products", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().map(Vec::len), Some(2));
}

#[sqlx::test(migrations = "../../migrations")]
async fn product_create_validates_efficiency_rating(pool: sqlx::PgPool) {
    let app = test_app(pool.clone());
    let admin = login_admin(&pool, &app, "admin-val@example.com").await;

    let mut block = best_block();
    block["energy_efficiency_rating"] = serde_json::json!(9);
    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/products",
        Some(serde_json::json!({
            "name": "Bad Rating",
            "brand": "CleanCo",
            "category": "Personal Care",
            "price": "4.99",
            "sustainability": block
        })),
        Some(&admin),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
