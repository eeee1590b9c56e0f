//! HTTP-level integration tests for the auth endpoints.
//!
//! Covers login, token refresh with rotation, logout, and the
//! fail-closed handling of missing or malformed credentials.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_test_user, get_auth, post_json, post_json_auth, token_for};
use sqlx::PgPool;

/// Log in a user via the API and return the JSON response containing
/// `access_token`, `refresh_token`, and `user` info.
async fn login_user(app: axum::Router, username: &str, password: &str) -> serde_json::Value {
    let body = serde_json::json!({ "username": username, "password": password });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

/// Successful login returns tokens plus role and division claims.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_success(pool: PgPool) {
    let (user, password) =
        create_test_user(&pool, "loginuser", "detective", &["detective_bureau"]).await;
    let app = common::build_test_app(pool);

    let json = login_user(app, "loginuser", &password).await;

    assert!(json["access_token"].is_string());
    assert!(json["refresh_token"].is_string());
    assert!(json["expires_in"].is_number());
    assert_eq!(json["user"]["id"], user.id);
    assert_eq!(json["user"]["role"], "detective");
    assert_eq!(json["user"]["divisions"][0], "detective_bureau");
}

/// Login with an incorrect password returns 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_wrong_password(pool: PgPool) {
    create_test_user(&pool, "wrongpw", "detective", &[]).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "username": "wrongpw", "password": "incorrect_password" });
    let response = post_json(app, "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Login with a nonexistent username returns 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_nonexistent_user(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "username": "ghost", "password": "whatever" });
    let response = post_json(app, "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Login to a deactivated account returns 403.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_inactive_user(pool: PgPool) {
    let (user, password) = create_test_user(&pool, "inactive", "detective", &[]).await;
    precinct_db::repositories::UserRepo::deactivate(&pool, user.id)
        .await
        .expect("deactivation should succeed");

    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "username": "inactive", "password": password });
    let response = post_json(app, "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// A valid refresh token returns new tokens and revokes the old one.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_token_refresh_rotates(pool: PgPool) {
    let (_user, password) = create_test_user(&pool, "refresher", "detective", &[]).await;

    let app = common::build_test_app(pool.clone());
    let login_json = login_user(app, "refresher", &password).await;
    let refresh_token = login_json["refresh_token"].as_str().unwrap();

    // First refresh succeeds.
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "refresh_token": refresh_token });
    let response = post_json(app, "/api/v1/auth/refresh", body.clone()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let refreshed = body_json(response).await;
    assert!(refreshed["access_token"].is_string());
    assert_ne!(refreshed["refresh_token"].as_str().unwrap(), refresh_token);

    // Replaying the consumed refresh token fails.
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Logout revokes the refresh token.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_logout_revokes_refresh_token(pool: PgPool) {
    let (user, password) = create_test_user(&pool, "leaver", "detective", &[]).await;

    let app = common::build_test_app(pool.clone());
    let login_json = login_user(app, "leaver", &password).await;
    let refresh_token = login_json["refresh_token"].as_str().unwrap().to_string();

    let token = token_for(&user, &[]);
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "refresh_token": refresh_token });
    let response = post_json_auth(app, "/api/v1/auth/logout", &token, body.clone()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Requests without a bearer token are rejected with 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_missing_token_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = common::get(app, "/api/v1/features").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// A token carrying a role outside the closed vocabulary is rejected
/// with 403, never treated as any valid role.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_unknown_role_claim_fails_closed(pool: PgPool) {
    let (mut user, _password) = create_test_user(&pool, "mystery", "detective", &[]).await;
    user.role = "sergeant".to_string(); // not in the vocabulary
    let token = token_for(&user, &[]);

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/features", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
