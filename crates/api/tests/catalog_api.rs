//! HTTP-level integration tests for category and product management plus the
//! gated catalog listing.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_admin_user, create_user_with_status, delete_auth, get_auth, get_gated,
    post_json_auth, put_json_auth, token_for, ADMIN_EMAIL,
};
use sqlx::PgPool;
use vitrine_core::approval::ApprovalStatus;

async fn admin_token(pool: &PgPool) -> String {
    let admin = create_admin_user(pool).await;
    token_for(admin.id, ADMIN_EMAIL)
}

fn product_body(name: &str, category_id: i64) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "description": "Bolsa de couro legítimo",
        "price": 249.9,
        "category_id": category_id,
        "image_path": "products/bolsa.jpg",
        "color_code": "#80471c",
        "variations": [{ "name": "Grande", "price": 299.9 }],
        "stock": 12,
    })
}

async fn create_category(app: axum::Router, token: &str, name: &str) -> serde_json::Value {
    let response = post_json_auth(
        app,
        "/api/v1/admin/categories",
        token,
        serde_json::json!({ "name": name }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn category_crud_lifecycle(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = common::build_test_app(pool);

    let created = create_category(app.clone(), &token, "Bolsas").await;
    let id = created["id"].as_i64().unwrap();

    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/admin/categories/{id}"),
        &token,
        serde_json::json!({ "name": "Bolsas e Acessórios" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Bolsas e Acessórios");

    let response = delete_auth(app.clone(), &format!("/api/v1/admin/categories/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(app, "/api/v1/admin/categories", &token).await;
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn duplicate_category_name_conflicts(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = common::build_test_app(pool);

    create_category(app.clone(), &token, "Sapatos").await;
    let response = post_json_auth(
        app,
        "/api/v1/admin/categories",
        &token,
        serde_json::json!({ "name": "Sapatos" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Categoria já existe.");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn blank_category_name_rejected(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app,
        "/api/v1/admin/categories",
        &token,
        serde_json::json!({ "name": "   " }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn category_with_products_cannot_be_deleted(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = common::build_test_app(pool);

    let category = create_category(app.clone(), &token, "Cintos").await;
    let category_id = category["id"].as_i64().unwrap();

    let response = post_json_auth(
        app.clone(),
        "/api/v1/admin/products",
        &token,
        product_body("Cinto clássico", category_id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = delete_auth(
        app,
        &format!("/api/v1/admin/categories/{category_id}"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(
        json["error"],
        "Não é possível excluir categoria com produtos vinculados."
    );
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn product_crud_lifecycle(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = common::build_test_app(pool);

    let category = create_category(app.clone(), &token, "Bolsas").await;
    let category_id = category["id"].as_i64().unwrap();

    let response = post_json_auth(
        app.clone(),
        "/api/v1/admin/products",
        &token,
        product_body("Bolsa tote", category_id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["variations"][0]["name"], "Grande");

    // Partial update: only the price changes.
    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/admin/products/{id}"),
        &token,
        serde_json::json!({ "price": 199.9 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["price"], 199.9);
    assert_eq!(json["name"], "Bolsa tote");

    let response = get_auth(app.clone(), &format!("/api/v1/admin/products/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = delete_auth(app.clone(), &format!("/api/v1/admin/products/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(app, &format!("/api/v1/admin/products/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn negative_price_rejected(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = common::build_test_app(pool);

    let category = create_category(app.clone(), &token, "Bolsas").await;
    let mut body = product_body("Bolsa grátis?", category["id"].as_i64().unwrap());
    body["price"] = serde_json::json!(-1.0);

    let response = post_json_auth(app, "/api/v1/admin/products", &token, body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn product_management_is_closed_to_non_admins(pool: PgPool) {
    let user = create_user_with_status(&pool, "cliente@test.com", ApprovalStatus::Approved).await;
    let token = token_for(user.id, "cliente@test.com");
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app,
        "/api/v1/admin/products",
        &token,
        product_body("Invasão", 1),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Gated catalog listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn catalog_lists_products_with_category_names(pool: PgPool) {
    let token = admin_token(&pool).await;
    create_user_with_status(&pool, "vitrine@test.com", ApprovalStatus::Approved).await;
    let app = common::build_test_app(pool);

    let category = create_category(app.clone(), &token, "Bolsas").await;
    let category_id = category["id"].as_i64().unwrap();
    for name in ["Bolsa tote", "Bolsa clutch"] {
        let response = post_json_auth(
            app.clone(),
            "/api/v1/admin/products",
            &token,
            product_body(name, category_id),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let json = common::login(app.clone(), "vitrine@test.com", "device-a").await;
    let user_token = json["access_token"].as_str().unwrap();

    let response = get_gated(app.clone(), "/api/v1/catalog/products", user_token, "device-a").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let products = json.as_array().unwrap();
    assert_eq!(products.len(), 2);
    // Newest first.
    assert_eq!(products[0]["name"], "Bolsa clutch");
    assert_eq!(products[0]["category_name"], "Bolsas");

    let response = get_gated(app, "/api/v1/catalog/categories", user_token, "device-a").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
}
