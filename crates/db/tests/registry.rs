//! Repository tests for the per-division officer registries and the
//! sanction cascade.

use chrono::Utc;
use precinct_db::models::officer::{CreateOfficer, UpdateOfficer};
use precinct_db::models::sanction::CreateSanction;
use precinct_db::models::user::CreateUser;
use precinct_db::repositories::{OfficerRepo, SanctionRepo, UserRepo};
use sqlx::PgPool;

async fn seed_user(pool: &PgPool) -> i64 {
    let input = CreateUser {
        username: "recorder".to_string(),
        email: "recorder@precinct.test".to_string(),
        password_hash: "x".to_string(),
        role: "internal_affairs_supervisor".to_string(),
        divisions: vec!["internal_affairs".to_string()],
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
        .id
}

fn new_officer(division: &str, name: &str) -> CreateOfficer {
    CreateOfficer {
        division: division.to_string(),
        full_name: name.to_string(),
        badge_number: Some("4471".to_string()),
        rank: Some("Officer".to_string()),
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_registries_do_not_overlap(pool: PgPool) {
    let db_officer = OfficerRepo::create(&pool, &new_officer("detective_bureau", "M. Voss"))
        .await
        .unwrap();

    // Scoped lookup from the other registry misses.
    let from_ia = OfficerRepo::find_in_division(&pool, "internal_affairs", db_officer.id)
        .await
        .unwrap();
    assert!(from_ia.is_none());

    let from_db = OfficerRepo::find_in_division(&pool, "detective_bureau", db_officer.id)
        .await
        .unwrap();
    assert!(from_db.is_some());

    // Listings are disjoint.
    let ia_list = OfficerRepo::list_division(&pool, "internal_affairs")
        .await
        .unwrap();
    assert!(ia_list.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_patches_only_provided_fields(pool: PgPool) {
    let officer = OfficerRepo::create(&pool, &new_officer("internal_affairs", "N. Ortiz"))
        .await
        .unwrap();

    let updated = OfficerRepo::update(
        &pool,
        officer.id,
        &UpdateOfficer {
            full_name: None,
            badge_number: None,
            rank: Some("Sergeant".to_string()),
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(updated.full_name, "N. Ortiz");
    assert_eq!(updated.rank.as_deref(), Some("Sergeant"));
    assert_eq!(updated.badge_number.as_deref(), Some("4471"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_officer_delete_cascades_sanction_history(pool: PgPool) {
    let recorder = seed_user(&pool).await;
    let officer = OfficerRepo::create(&pool, &new_officer("internal_affairs", "R. Calder"))
        .await
        .unwrap();

    for severity in ["minor", "severe"] {
        SanctionRepo::create(
            &pool,
            &CreateSanction {
                officer_id: officer.id,
                severity: severity.to_string(),
                description: "Conduct violation".to_string(),
                incident_date: Utc::now(),
                case_id: None,
                created_by: recorder,
            },
        )
        .await
        .unwrap();
    }
    assert_eq!(
        SanctionRepo::list_for_officer(&pool, officer.id)
            .await
            .unwrap()
            .len(),
        2
    );

    // One delete removes the profile and the history together.
    assert!(OfficerRepo::delete(&pool, officer.id).await.unwrap());
    assert!(SanctionRepo::list_for_officer(&pool, officer.id)
        .await
        .unwrap()
        .is_empty());
    assert!(OfficerRepo::find_by_id(&pool, officer.id)
        .await
        .unwrap()
        .is_none());
}
