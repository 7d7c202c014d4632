//! Shared helpers for HTTP-level integration tests.
//!
//! Not every test binary uses every helper.
#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use vitrine_core::admin::AdminIdentifiers;
use vitrine_core::approval::ApprovalStatus;
use vitrine_db::models::profile::CreateProfile;
use vitrine_db::models::user::{CreateUser, User};
use vitrine_db::repositories::{ProfileRepo, UserRepo};

use vitrine_api::auth::jwt::{generate_access_token, JwtConfig};
use vitrine_api::auth::password::hash_password;
use vitrine_api::config::ServerConfig;
use vitrine_api::middleware::device::DEVICE_ID_HEADER;
use vitrine_api::router::build_app_router;
use vitrine_api::state::AppState;

/// Email the test configuration recognises as the administrator.
pub const ADMIN_EMAIL: &str = "admin@test.com";

/// Build a test `ServerConfig` with safe defaults.
///
/// The admin is identified by [`ADMIN_EMAIL`] only; `JWT_SECRET` is a fixed
/// test value so tokens can be minted directly by tests.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret-0123456789".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
        admin: AdminIdentifiers {
            user_id: None,
            email: Some(ADMIN_EMAIL.to_string()),
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// Goes through [`build_app_router`] so integration tests exercise the same
/// middleware stack (CORS, request ID, timeout, tracing, panic recovery)
/// that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Mint an access token for the given user with the test JWT config.
pub fn token_for(user_id: i64, email: &str) -> String {
    generate_access_token(user_id, email, &test_config().jwt)
        .expect("token generation should succeed")
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Plaintext password shared by all fixture users.
pub const TEST_PASSWORD: &str = "senha-de-teste-123";

/// Create a user plus a profile with the given approval status.
pub async fn create_user_with_status(pool: &PgPool, email: &str, status: ApprovalStatus) -> User {
    let hashed = hash_password(TEST_PASSWORD).expect("hashing should succeed");
    let user = UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            password_hash: hashed,
        },
    )
    .await
    .expect("user creation should succeed");

    ProfileRepo::create(
        pool,
        &CreateProfile {
            user_id: user.id,
            full_name: "Usuária de Teste".to_string(),
            email: email.to_string(),
            document: "123.456.789-00".to_string(),
            phone: "+55 11 91234-5678".to_string(),
        },
    )
    .await
    .expect("profile creation should succeed");

    if status != ApprovalStatus::Pending {
        ProfileRepo::update_status(pool, user.id, status)
            .await
            .expect("status update should succeed")
            .expect("profile should exist");
    }

    user
}

/// Create the administrator account (no profile; the admin path ignores it).
pub async fn create_admin_user(pool: &PgPool) -> User {
    let hashed = hash_password(TEST_PASSWORD).expect("hashing should succeed");
    UserRepo::create(
        pool,
        &CreateUser {
            email: ADMIN_EMAIL.to_string(),
            password_hash: hashed,
        },
    )
    .await
    .expect("admin creation should succeed")
}

/// Log an approved user in through the API, returning the JSON response.
pub async fn login(app: Router, email: &str, device_id: &str) -> serde_json::Value {
    let body = serde_json::json!({
        "email": email,
        "password": TEST_PASSWORD,
        "device_id": device_id,
    });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a GET request with no credentials.
pub async fn get(app: Router, path: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(path)
        .body(Body::empty())
        .expect("request builds");
    app.oneshot(request).await.expect("request succeeds")
}

/// Send a GET request with a Bearer token.
pub async fn get_auth(app: Router, path: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(path)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .expect("request builds");
    app.oneshot(request).await.expect("request succeeds")
}

/// Send a GET request with a Bearer token and a device fingerprint header.
pub async fn get_gated(app: Router, path: &str, token: &str, device_id: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(path)
        .header("authorization", format!("Bearer {token}"))
        .header(DEVICE_ID_HEADER, device_id)
        .body(Body::empty())
        .expect("request builds");
    app.oneshot(request).await.expect("request succeeds")
}

/// Send a POST request with a JSON body and no credentials.
pub async fn post_json(app: Router, path: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds");
    app.oneshot(request).await.expect("request succeeds")
}

/// Send a POST request with a JSON body and a Bearer token.
pub async fn post_json_auth(
    app: Router,
    path: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .expect("request builds");
    app.oneshot(request).await.expect("request succeeds")
}

/// Send a PUT request with a JSON body and a Bearer token.
pub async fn put_json_auth(
    app: Router,
    path: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method("PUT")
        .uri(path)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .expect("request builds");
    app.oneshot(request).await.expect("request succeeds")
}

/// Send a DELETE request with a Bearer token.
pub async fn delete_auth(app: Router, path: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method("DELETE")
        .uri(path)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .expect("request builds");
    app.oneshot(request).await.expect("request succeeds")
}

/// Send a POST request with a Bearer token and an empty body.
pub async fn post_auth(app: Router, path: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .expect("request builds");
    app.oneshot(request).await.expect("request succeeds")
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body collects")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body is valid JSON")
}
