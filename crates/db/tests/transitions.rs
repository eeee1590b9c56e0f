//! Repository tests for the compare-and-swap transition discipline.
//!
//! Two writers racing on the same row must resolve to exactly one
//! winner; the loser observes a failed swap and re-reads.

use assert_matches::assert_matches;
use chrono::Utc;
use precinct_db::models::case::CreateCase;
use precinct_db::models::user::CreateUser;
use precinct_db::models::warrant::CreateWarrant;
use precinct_db::repositories::{CaseRepo, UserRepo, WarrantRepo};
use sqlx::PgPool;

async fn seed_user(pool: &PgPool, username: &str) -> i64 {
    let input = CreateUser {
        username: username.to_string(),
        email: format!("{username}@precinct.test"),
        password_hash: "x".to_string(),
        role: "captain".to_string(),
        divisions: vec![],
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
        .id
}

#[sqlx::test(migrations = "./migrations")]
async fn test_case_status_swap_requires_expected_state(pool: PgPool) {
    let user_id = seed_user(&pool, "writer").await;
    let case = CaseRepo::create(
        &pool,
        &CreateCase {
            kind: "criminal".to_string(),
            title: "Race".to_string(),
            location: "Alta St".to_string(),
            description: String::new(),
            occurred_at: Utc::now(),
            evidence_image_path: None,
            created_by: user_id,
            assignee_ids: vec![],
        },
    )
    .await
    .unwrap();

    // First swap wins.
    assert!(CaseRepo::update_status(&pool, case.id, "open", "closed")
        .await
        .unwrap());

    // A writer holding the stale "open" snapshot loses.
    assert!(!CaseRepo::update_status(&pool, case.id, "open", "closed")
        .await
        .unwrap());

    let current = CaseRepo::find_by_id(&pool, case.id).await.unwrap().unwrap();
    assert_eq!(current.status, "closed");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_concurrent_warrant_reviews_one_winner(pool: PgPool) {
    let requester = seed_user(&pool, "requester").await;
    let approver = seed_user(&pool, "approver").await;
    let rejecter = seed_user(&pool, "rejecter").await;

    let warrant = WarrantRepo::create(
        &pool,
        &CreateWarrant {
            kind: "search".to_string(),
            target: "12 Alta St".to_string(),
            location: None,
            reasoning: "Probable cause".to_string(),
            requested_by: requester,
        },
    )
    .await
    .unwrap();

    // One approve and one reject, racing on the same pending row.
    let (approved, rejected) = tokio::join!(
        WarrantRepo::review(&pool, warrant.id, "pending", "approved", approver),
        WarrantRepo::review(&pool, warrant.id, "pending", "rejected", rejecter),
    );
    let approved = approved.unwrap();
    let rejected = rejected.unwrap();

    // Exactly one call observed Pending and performed the transition.
    assert!(
        approved.is_some() ^ rejected.is_some(),
        "exactly one review must win, got approve={approved:?} reject={rejected:?}"
    );

    // The persisted status matches the winner, with reviewer recorded.
    let current = WarrantRepo::find_by_id(&pool, warrant.id)
        .await
        .unwrap()
        .unwrap();
    if let Some(winner) = approved {
        assert_eq!(current.status, "approved");
        assert_eq!(winner.reviewed_by, Some(approver));
    } else {
        assert_eq!(current.status, "rejected");
        assert_eq!(current.reviewed_by, Some(rejecter));
    }
    assert!(current.reviewed_at.is_some());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_review_records_reviewer_atomically(pool: PgPool) {
    let requester = seed_user(&pool, "req2").await;
    let reviewer = seed_user(&pool, "rev2").await;

    let warrant = WarrantRepo::create(
        &pool,
        &CreateWarrant {
            kind: "arrest".to_string(),
            target: "J. Doe".to_string(),
            location: None,
            reasoning: "Outstanding charges".to_string(),
            requested_by: requester,
        },
    )
    .await
    .unwrap();

    let updated = WarrantRepo::review(&pool, warrant.id, "pending", "rejected", reviewer)
        .await
        .unwrap()
        .expect("first review must win");
    assert_eq!(updated.status, "rejected");
    assert_eq!(updated.reviewed_by, Some(reviewer));
    assert!(updated.reviewed_at.is_some());

    // Re-review: the swap finds no pending row.
    let second = WarrantRepo::review(&pool, warrant.id, "pending", "approved", reviewer)
        .await
        .unwrap();
    assert_matches!(second, None);
}
