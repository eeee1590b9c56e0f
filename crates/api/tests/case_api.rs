//! HTTP-level integration tests for case files: creation, numbering,
//! division isolation, and the Open/Closed/Archived workflow.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_test_user, get_auth, post_json_auth, token_for};
use precinct_db::models::user::User;
use sqlx::PgPool;

fn case_body(kind: &str, title: &str) -> serde_json::Value {
    serde_json::json!({
        "kind": kind,
        "title": title,
        "location": "Alta St",
        "description": "Initial report",
        "occurred_at": "2026-03-01T21:15:00Z",
        "assignee_ids": [],
    })
}

async fn create_case_as(
    pool: &PgPool,
    user: &User,
    divisions: &[&str],
    body: serde_json::Value,
) -> serde_json::Value {
    let app = common::build_test_app(pool.clone());
    let token = token_for(user, divisions);
    let response = post_json_auth(app, "/api/v1/cases", &token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

/// A Detective Bureau coordinator opens a case; it starts Open with the
/// next display number for its kind.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_case_assigns_sequence_number(pool: PgPool) {
    let (user, _) = create_test_user(&pool, "coord", "coordinator", &["detective_bureau"]).await;

    let first = create_case_as(
        &pool,
        &user,
        &["detective_bureau"],
        case_body("criminal", "The Dockside Murder"),
    )
    .await;
    assert_eq!(first["data"]["status"], "open");
    assert_eq!(first["data"]["case_number"], 1);

    let second = create_case_as(
        &pool,
        &user,
        &["detective_bureau"],
        case_body("criminal", "Warehouse Arson"),
    )
    .await;
    assert_eq!(second["data"]["case_number"], 2);
}

/// Each kind numbers independently.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_sequence_numbers_are_per_kind(pool: PgPool) {
    let (det, _) = create_test_user(&pool, "det", "detective", &["detective_bureau"]).await;
    let (ia, _) =
        create_test_user(&pool, "ia", "internal_affairs_agent", &["internal_affairs"]).await;

    create_case_as(
        &pool,
        &det,
        &["detective_bureau"],
        case_body("criminal", "The Dockside Murder"),
    )
    .await;
    let ia_case = create_case_as(
        &pool,
        &ia,
        &["internal_affairs"],
        case_body("internal_affairs", "Complaint 17"),
    )
    .await;

    assert_eq!(ia_case["data"]["case_number"], 1);
}

/// Creating a case outside the actor's divisions is forbidden.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_case_requires_division(pool: PgPool) {
    let (user, _) = create_test_user(&pool, "det2", "detective", &["detective_bureau"]).await;
    let app = common::build_test_app(pool);
    let token = token_for(&user, &["detective_bureau"]);

    let response = post_json_auth(
        app,
        "/api/v1/cases",
        &token,
        case_body("internal_affairs", "Not Yours"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// An empty title is a validation error.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_case_empty_title_rejected(pool: PgPool) {
    let (user, _) = create_test_user(&pool, "det3", "detective", &["detective_bureau"]).await;
    let app = common::build_test_app(pool);
    let token = token_for(&user, &["detective_bureau"]);

    let response =
        post_json_auth(app, "/api/v1/cases", &token, case_body("criminal", "   ")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Assigning an actor outside the owning division is rejected.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_case_rejects_outside_assignee(pool: PgPool) {
    let (user, _) = create_test_user(&pool, "det4", "detective", &["detective_bureau"]).await;
    let (outsider, _) =
        create_test_user(&pool, "ia2", "internal_affairs_agent", &["internal_affairs"]).await;

    let mut body = case_body("criminal", "Pier Theft");
    body["assignee_ids"] = serde_json::json!([outsider.id]);

    let app = common::build_test_app(pool);
    let token = token_for(&user, &["detective_bureau"]);
    let response = post_json_auth(app, "/api/v1/cases", &token, body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// A case is invisible across divisions: fetching it returns 404, not
/// 403, so its existence does not leak.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_cross_division_get_is_not_found(pool: PgPool) {
    let (det, _) = create_test_user(&pool, "det5", "detective", &["detective_bureau"]).await;
    let (ia, _) =
        create_test_user(&pool, "ia3", "internal_affairs_agent", &["internal_affairs"]).await;

    let created = create_case_as(
        &pool,
        &det,
        &["detective_bureau"],
        case_body("criminal", "Harbor Smuggling"),
    )
    .await;
    let case_id = created["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let token = token_for(&ia, &["internal_affairs"]);
    let response = get_auth(app, &format!("/api/v1/cases/{case_id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Listing filters by division visibility; an administrator bypasses it.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_division_isolation_and_admin_bypass(pool: PgPool) {
    let (det, _) = create_test_user(&pool, "det6", "detective", &["detective_bureau"]).await;
    let (ia, _) =
        create_test_user(&pool, "ia4", "internal_affairs_agent", &["internal_affairs"]).await;
    let (admin, _) = create_test_user(&pool, "root", "admin", &[]).await;

    create_case_as(
        &pool,
        &det,
        &["detective_bureau"],
        case_body("criminal", "Dockside Murder"),
    )
    .await;
    create_case_as(
        &pool,
        &ia,
        &["internal_affairs"],
        case_body("internal_affairs", "Complaint 9"),
    )
    .await;

    // The IA agent sees only internal affairs cases.
    let app = common::build_test_app(pool.clone());
    let token = token_for(&ia, &["internal_affairs"]);
    let response = get_auth(app, "/api/v1/cases", &token).await;
    let json = body_json(response).await;
    let cases = json["data"].as_array().unwrap();
    assert_eq!(cases.len(), 1);
    assert_eq!(cases[0]["kind"], "internal_affairs");

    // An administrator with no divisions lists IA cases explicitly.
    let app = common::build_test_app(pool);
    let token = token_for(&admin, &[]);
    let response = get_auth(
        app,
        "/api/v1/cases?kind=internal_affairs&status=open",
        &token,
    )
    .await;
    let json = body_json(response).await;
    let cases = json["data"].as_array().unwrap();
    assert_eq!(cases.len(), 1);
    assert_eq!(cases[0]["kind"], "internal_affairs");
}

/// Full lifecycle: close, reopen, close, archive; archived is absorbing
/// and disappears from the default listing.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_case_lifecycle(pool: PgPool) {
    let (user, _) = create_test_user(&pool, "det7", "detective", &["detective_bureau"]).await;
    let token = token_for(&user, &["detective_bureau"]);

    let created = create_case_as(
        &pool,
        &user,
        &["detective_bureau"],
        case_body("criminal", "Rooftop Break-in"),
    )
    .await;
    let case_id = created["data"]["id"].as_i64().unwrap();
    let uri = format!("/api/v1/cases/{case_id}/transition");

    for (target, expected) in [
        ("closed", StatusCode::OK),
        ("open", StatusCode::OK),
        ("closed", StatusCode::OK),
        ("archived", StatusCode::OK),
    ] {
        let app = common::build_test_app(pool.clone());
        let response =
            post_json_auth(app, &uri, &token, serde_json::json!({ "status": target })).await;
        assert_eq!(response.status(), expected, "transition to {target}");
    }

    // Archived is absorbing.
    for target in ["open", "closed", "archived"] {
        let app = common::build_test_app(pool.clone());
        let response =
            post_json_auth(app, &uri, &token, serde_json::json!({ "status": target })).await;
        assert_eq!(
            response.status(),
            StatusCode::CONFLICT,
            "archived -> {target} must be rejected"
        );
    }

    // Gone from the default listing, present under the explicit filter.
    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/cases", &token).await;
    let json = body_json(response).await;
    assert!(json["data"].as_array().unwrap().is_empty());

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/cases?status=archived", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}

/// Transitioning an invisible case reports 404 like any other read.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_cross_division_transition_is_not_found(pool: PgPool) {
    let (det, _) = create_test_user(&pool, "det8", "detective", &["detective_bureau"]).await;
    let (ia, _) =
        create_test_user(&pool, "ia5", "internal_affairs_agent", &["internal_affairs"]).await;

    let created = create_case_as(
        &pool,
        &det,
        &["detective_bureau"],
        case_body("criminal", "Impound Lot Theft"),
    )
    .await;
    let case_id = created["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let token = token_for(&ia, &["internal_affairs"]);
    let response = post_json_auth(
        app,
        &format!("/api/v1/cases/{case_id}/transition"),
        &token,
        serde_json::json!({ "status": "closed" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
