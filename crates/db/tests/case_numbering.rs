//! Repository tests for per-kind case numbering.
//!
//! Numbers are assigned exactly once at creation, monotonic within a
//! kind, and never reused after deletion.

use chrono::Utc;
use precinct_db::models::case::CreateCase;
use precinct_db::models::user::CreateUser;
use precinct_db::repositories::{CaseRepo, UserRepo};
use sqlx::PgPool;

async fn seed_user(pool: &PgPool) -> i64 {
    let input = CreateUser {
        username: "seed".to_string(),
        email: "seed@precinct.test".to_string(),
        password_hash: "x".to_string(),
        role: "detective".to_string(),
        divisions: vec!["detective_bureau".to_string()],
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
        .id
}

fn new_case(kind: &str, title: &str, created_by: i64) -> CreateCase {
    CreateCase {
        kind: kind.to_string(),
        title: title.to_string(),
        location: "Alta St".to_string(),
        description: String::new(),
        occurred_at: Utc::now(),
        evidence_image_path: None,
        created_by,
        assignee_ids: vec![],
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_numbers_are_monotonic_per_kind(pool: PgPool) {
    let user_id = seed_user(&pool).await;

    let a = CaseRepo::create(&pool, &new_case("criminal", "First", user_id))
        .await
        .unwrap();
    let b = CaseRepo::create(&pool, &new_case("criminal", "Second", user_id))
        .await
        .unwrap();
    let ia = CaseRepo::create(&pool, &new_case("internal_affairs", "Complaint", user_id))
        .await
        .unwrap();

    assert_eq!(a.case_number, 1);
    assert_eq!(b.case_number, 2);
    // The other kind keeps its own sequence.
    assert_eq!(ia.case_number, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_numbers_are_not_reused_after_delete(pool: PgPool) {
    let user_id = seed_user(&pool).await;

    CaseRepo::create(&pool, &new_case("criminal", "First", user_id))
        .await
        .unwrap();
    let second = CaseRepo::create(&pool, &new_case("criminal", "Second", user_id))
        .await
        .unwrap();
    assert_eq!(second.case_number, 2);

    let deleted = CaseRepo::delete(&pool, second.id).await.unwrap();
    assert!(deleted);

    // The gap stays; the next case takes number 3.
    let third = CaseRepo::create(&pool, &new_case("criminal", "Third", user_id))
        .await
        .unwrap();
    assert_eq!(third.case_number, 3);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_assignments_recorded_and_cascade(pool: PgPool) {
    let user_id = seed_user(&pool).await;

    let mut input = new_case("criminal", "Assigned", user_id);
    input.assignee_ids = vec![user_id];
    let case = CaseRepo::create(&pool, &input).await.unwrap();

    assert!(CaseRepo::is_assigned(&pool, case.id, user_id).await.unwrap());
    assert_eq!(
        CaseRepo::list_assignees(&pool, case.id).await.unwrap(),
        vec![user_id]
    );

    CaseRepo::delete(&pool, case.id).await.unwrap();
    assert!(!CaseRepo::is_assigned(&pool, case.id, user_id).await.unwrap());
}
