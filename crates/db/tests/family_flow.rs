//! Integration tests for the family create/join flow at the repository level:
//! atomic family creation, membership uniqueness, one-cookbook-per-member.

use sqlx::PgPool;

use recetario_db::models::cookbook::CreateCookbook;
use recetario_db::models::family::{CreateMember, ROLE_ADMIN, ROLE_MEMBER};
use recetario_db::repositories::{CookbookRepo, FamilyRepo, MemberRepo, UserRepo};

async fn seed_user(pool: &PgPool, email: &str) -> recetario_db::models::user::User {
    UserRepo::upsert_by_email(pool, email)
        .await
        .expect("user creation should succeed")
}

#[sqlx::test]
async fn create_with_admin_creates_family_member_and_cookbook(pool: PgPool) {
    let user = seed_user(&pool, "lupita@test.com").await;

    let (family, member, cookbook) = FamilyRepo::create_with_admin(
        &pool,
        "Familia Patiño",
        "482913",
        user.id,
        "Abuela Lupita",
        "Recetario de Abuela Lupita",
    )
    .await
    .expect("family creation should succeed");

    assert_eq!(family.name, "Familia Patiño");
    assert_eq!(family.code, "482913");
    assert_eq!(family.created_by, user.id);

    assert_eq!(member.family_id, family.id);
    assert_eq!(member.role, ROLE_ADMIN);
    assert_eq!(member.display_name, "Abuela Lupita");

    assert_eq!(cookbook.family_id, family.id);
    assert_eq!(cookbook.owner_id, user.id);
    assert_eq!(cookbook.title, "Recetario de Abuela Lupita");
    assert!(cookbook.color.is_none());
}

#[sqlx::test]
async fn join_code_lookup(pool: PgPool) {
    let user = seed_user(&pool, "lupita@test.com").await;
    FamilyRepo::create_with_admin(&pool, "Mi familia", "482913", user.id, "Lupita", "Recetario de Lupita")
        .await
        .expect("family creation should succeed");

    assert!(FamilyRepo::code_exists(&pool, "482913").await.unwrap());
    assert!(!FamilyRepo::code_exists(&pool, "111111").await.unwrap());

    let family = FamilyRepo::find_by_code(&pool, "482913")
        .await
        .unwrap()
        .expect("family should be found by code");
    assert_eq!(family.name, "Mi familia");
    assert!(FamilyRepo::find_by_code(&pool, "999999").await.unwrap().is_none());
}

#[sqlx::test]
async fn duplicate_join_code_is_rejected(pool: PgPool) {
    let user = seed_user(&pool, "lupita@test.com").await;
    FamilyRepo::create_with_admin(&pool, "Una", "482913", user.id, "Lupita", "Recetario de Lupita")
        .await
        .expect("first family should succeed");

    let other = seed_user(&pool, "tono@test.com").await;
    let result =
        FamilyRepo::create_with_admin(&pool, "Otra", "482913", other.id, "Toño", "Recetario de Toño")
            .await;
    assert!(result.is_err(), "reusing a join code must violate uq_families_code");
}

#[sqlx::test]
async fn membership_is_unique_per_family_and_user(pool: PgPool) {
    let admin = seed_user(&pool, "lupita@test.com").await;
    let (family, _, _) =
        FamilyRepo::create_with_admin(&pool, "Mi familia", "482913", admin.id, "Lupita", "Recetario de Lupita")
            .await
            .unwrap();

    let joiner = seed_user(&pool, "tono@test.com").await;
    let input = CreateMember {
        family_id: family.id,
        user_id: joiner.id,
        display_name: "Toño".to_string(),
        role: ROLE_MEMBER.to_string(),
    };

    let member = MemberRepo::create(&pool, &input).await.expect("first join should succeed");
    assert_eq!(member.role, ROLE_MEMBER);

    let result = MemberRepo::create(&pool, &input).await;
    assert!(result.is_err(), "second membership row for the same user must be rejected");

    // The existing row is still there and findable.
    let existing = MemberRepo::find(&pool, family.id, joiner.id).await.unwrap();
    assert_eq!(existing.expect("membership should exist").id, member.id);
}

#[sqlx::test]
async fn one_cookbook_per_member_per_family(pool: PgPool) {
    let admin = seed_user(&pool, "lupita@test.com").await;
    let (family, _, _) =
        FamilyRepo::create_with_admin(&pool, "Mi familia", "482913", admin.id, "Lupita", "Recetario de Lupita")
            .await
            .unwrap();

    let joiner = seed_user(&pool, "tono@test.com").await;
    let input = CreateCookbook {
        family_id: family.id,
        owner_id: joiner.id,
        title: "Recetario de Toño".to_string(),
        color: None,
    };

    let cookbook = CookbookRepo::create(&pool, &input).await.expect("first cookbook should succeed");
    assert!(CookbookRepo::create(&pool, &input).await.is_err());

    let found = CookbookRepo::find_for_owner(&pool, family.id, joiner.id)
        .await
        .unwrap()
        .expect("cookbook should be found");
    assert_eq!(found.id, cookbook.id);
}

#[sqlx::test]
async fn members_list_in_join_order(pool: PgPool) {
    let admin = seed_user(&pool, "lupita@test.com").await;
    let (family, _, _) =
        FamilyRepo::create_with_admin(&pool, "Mi familia", "482913", admin.id, "Lupita", "Recetario de Lupita")
            .await
            .unwrap();

    for (email, name) in [("tono@test.com", "Toño"), ("maria@test.com", "María")] {
        let user = seed_user(&pool, email).await;
        MemberRepo::create(
            &pool,
            &CreateMember {
                family_id: family.id,
                user_id: user.id,
                display_name: name.to_string(),
                role: ROLE_MEMBER.to_string(),
            },
        )
        .await
        .unwrap();
    }

    let members = MemberRepo::list_for_family(&pool, family.id).await.unwrap();
    let names: Vec<&str> = members.iter().map(|m| m.display_name.as_str()).collect();
    assert_eq!(names, vec!["Lupita", "Toño", "María"]);
}

#[sqlx::test]
async fn display_name_update(pool: PgPool) {
    let admin = seed_user(&pool, "lupita@test.com").await;
    let (family, _, _) =
        FamilyRepo::create_with_admin(&pool, "Mi familia", "482913", admin.id, "Lupita", "Recetario de Lupita")
            .await
            .unwrap();

    let updated = MemberRepo::update_display_name(&pool, family.id, admin.id, "Abuela Lupita")
        .await
        .unwrap()
        .expect("membership should exist");
    assert_eq!(updated.display_name, "Abuela Lupita");

    let missing = MemberRepo::update_display_name(&pool, family.id, admin.id + 999, "X")
        .await
        .unwrap();
    assert!(missing.is_none());
}
