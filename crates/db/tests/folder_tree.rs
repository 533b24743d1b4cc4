//! Integration tests for folder nesting and the reassign-on-delete behavior.

use sqlx::PgPool;

use recetario_core::types::DbId;
use recetario_db::models::folder::CreateFolder;
use recetario_db::models::recipe::CreateRecipe;
use recetario_db::repositories::{FamilyRepo, FolderRepo, RecipeRepo, UserRepo};

/// Seed a user, family and cookbook; returns (family_id, user_id, cookbook_id).
async fn seed(pool: &PgPool) -> (DbId, DbId, DbId) {
    let user = UserRepo::upsert_by_email(pool, "lupita@test.com").await.unwrap();
    let (family, _, cookbook) = FamilyRepo::create_with_admin(
        pool,
        "Mi familia",
        "482913",
        user.id,
        "Lupita",
        "Recetario de Lupita",
    )
    .await
    .unwrap();
    (family.id, user.id, cookbook.id)
}

fn new_recipe(cookbook_id: DbId, family_id: DbId, author_id: DbId, title: &str) -> CreateRecipe {
    CreateRecipe {
        cookbook_id,
        family_id,
        author_id,
        title: title.to_string(),
        ingredients_text: "- Sal".to_string(),
        steps_text: "Mezclar".to_string(),
        folder_id: None,
        prep_minutes: None,
        cook_minutes: None,
        servings: None,
        difficulty: None,
        notes: None,
    }
}

#[sqlx::test]
async fn folders_nest_and_list_by_level(pool: PgPool) {
    let (_, _, cookbook_id) = seed(&pool).await;

    let postres = FolderRepo::create(
        &pool,
        &CreateFolder { cookbook_id, name: "Postres".to_string(), parent_id: None },
    )
    .await
    .unwrap();
    let pasteles = FolderRepo::create(
        &pool,
        &CreateFolder { cookbook_id, name: "Pasteles".to_string(), parent_id: Some(postres.id) },
    )
    .await
    .unwrap();

    let roots = FolderRepo::list_children(&pool, cookbook_id, None).await.unwrap();
    assert_eq!(roots.len(), 1);
    assert_eq!(roots[0].id, postres.id);

    let children = FolderRepo::list_children(&pool, cookbook_id, Some(postres.id)).await.unwrap();
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].id, pasteles.id);
    assert_eq!(children[0].parent_id, Some(postres.id));
}

#[sqlx::test]
async fn delete_reassigns_recipes_and_reparents_children(pool: PgPool) {
    let (family_id, user_id, cookbook_id) = seed(&pool).await;

    let postres = FolderRepo::create(
        &pool,
        &CreateFolder { cookbook_id, name: "Postres".to_string(), parent_id: None },
    )
    .await
    .unwrap();
    let pasteles = FolderRepo::create(
        &pool,
        &CreateFolder { cookbook_id, name: "Pasteles".to_string(), parent_id: Some(postres.id) },
    )
    .await
    .unwrap();

    let mut input = new_recipe(cookbook_id, family_id, user_id, "Flan");
    input.folder_id = Some(postres.id);
    let flan = RecipeRepo::create(&pool, &input).await.unwrap();
    assert_eq!(flan.folder_id, Some(postres.id));

    let deleted = FolderRepo::delete_reassigning(&pool, postres.id).await.unwrap();
    assert!(deleted);

    // The contained recipe is orphaned to no-folder, not deleted.
    let flan = RecipeRepo::find_by_id(&pool, flan.id).await.unwrap().unwrap();
    assert_eq!(flan.folder_id, None);

    // The child folder moves up to the deleted folder's parent (root here).
    let pasteles = FolderRepo::find_by_id(&pool, pasteles.id).await.unwrap().unwrap();
    assert_eq!(pasteles.parent_id, None);
}

#[sqlx::test]
async fn delete_missing_folder_returns_false(pool: PgPool) {
    let (_, _, _) = seed(&pool).await;
    let deleted = FolderRepo::delete_reassigning(&pool, 424242).await.unwrap();
    assert!(!deleted);
}
