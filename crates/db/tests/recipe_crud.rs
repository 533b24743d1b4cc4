//! Integration tests for recipe CRUD, folder scoping, search, and cook-mode
//! progress persistence.

use sqlx::PgPool;

use recetario_core::types::DbId;
use recetario_db::models::cook_progress::UpsertCookProgress;
use recetario_db::models::folder::CreateFolder;
use recetario_db::models::recipe::{CreateRecipe, FolderScope, UpdateRecipe};
use recetario_db::repositories::{
    CookProgressRepo, FamilyRepo, FolderRepo, RecipeRepo, UserRepo,
};

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
        ingredients_text: "- 200g de Harina".to_string(),
        steps_text: "Mezclar\nHornear [spec: 180°C]".to_string(),
        folder_id: None,
        prep_minutes: Some(30),
        cook_minutes: Some(45),
        servings: Some(4),
        difficulty: None,
        notes: Some("De la abuela".to_string()),
    }
}

#[sqlx::test]
async fn create_and_find(pool: PgPool) {
    let (family_id, user_id, cookbook_id) = seed(&pool).await;

    let recipe = RecipeRepo::create(&pool, &new_recipe(cookbook_id, family_id, user_id, "Mole"))
        .await
        .unwrap();
    assert_eq!(recipe.title, "Mole");
    assert_eq!(recipe.prep_minutes, Some(30));
    assert!(recipe.photo_url.is_none());

    let found = RecipeRepo::find_by_id(&pool, recipe.id).await.unwrap().unwrap();
    assert_eq!(found.ingredients_text, "- 200g de Harina");
    assert!(RecipeRepo::find_by_id(&pool, recipe.id + 999).await.unwrap().is_none());
}

#[sqlx::test]
async fn listing_scopes_by_folder_and_searches_by_title(pool: PgPool) {
    let (family_id, user_id, cookbook_id) = seed(&pool).await;

    let folder = FolderRepo::create(
        &pool,
        &CreateFolder { cookbook_id, name: "Postres".to_string(), parent_id: None },
    )
    .await
    .unwrap();

    RecipeRepo::create(&pool, &new_recipe(cookbook_id, family_id, user_id, "Mole de la abuela"))
        .await
        .unwrap();
    let mut in_folder = new_recipe(cookbook_id, family_id, user_id, "Flan napolitano");
    in_folder.folder_id = Some(folder.id);
    RecipeRepo::create(&pool, &in_folder).await.unwrap();

    let all = RecipeRepo::list_for_cookbook(&pool, cookbook_id, FolderScope::All, None)
        .await
        .unwrap();
    assert_eq!(all.len(), 2);

    let root = RecipeRepo::list_for_cookbook(&pool, cookbook_id, FolderScope::Root, None)
        .await
        .unwrap();
    assert_eq!(root.len(), 1);
    assert_eq!(root[0].title, "Mole de la abuela");

    let scoped =
        RecipeRepo::list_for_cookbook(&pool, cookbook_id, FolderScope::In(folder.id), None)
            .await
            .unwrap();
    assert_eq!(scoped.len(), 1);
    assert_eq!(scoped[0].title, "Flan napolitano");

    // Search is case-insensitive containment; blank queries are ignored.
    let hits = RecipeRepo::list_for_cookbook(&pool, cookbook_id, FolderScope::All, Some("FLAN"))
        .await
        .unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "Flan napolitano");

    let blank = RecipeRepo::list_for_cookbook(&pool, cookbook_id, FolderScope::All, Some("  "))
        .await
        .unwrap();
    assert_eq!(blank.len(), 2);

    let none = RecipeRepo::list_for_cookbook(&pool, cookbook_id, FolderScope::All, Some("tamal"))
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[sqlx::test]
async fn partial_update_keeps_unset_fields(pool: PgPool) {
    let (family_id, user_id, cookbook_id) = seed(&pool).await;
    let recipe = RecipeRepo::create(&pool, &new_recipe(cookbook_id, family_id, user_id, "Mole"))
        .await
        .unwrap();

    let updated = RecipeRepo::update(
        &pool,
        recipe.id,
        &UpdateRecipe { title: Some("Mole poblano".to_string()), ..Default::default() },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(updated.title, "Mole poblano");
    assert_eq!(updated.ingredients_text, recipe.ingredients_text);
    assert_eq!(updated.servings, Some(4));
    assert!(updated.updated_at >= recipe.updated_at);
}

#[sqlx::test]
async fn move_between_folders(pool: PgPool) {
    let (family_id, user_id, cookbook_id) = seed(&pool).await;
    let folder = FolderRepo::create(
        &pool,
        &CreateFolder { cookbook_id, name: "Postres".to_string(), parent_id: None },
    )
    .await
    .unwrap();
    let recipe = RecipeRepo::create(&pool, &new_recipe(cookbook_id, family_id, user_id, "Flan"))
        .await
        .unwrap();

    // Drop onto a folder.
    let moved = RecipeRepo::move_to_folder(&pool, recipe.id, Some(folder.id))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(moved.folder_id, Some(folder.id));

    // Drop onto the remove-from-folder target.
    let cleared = RecipeRepo::move_to_folder(&pool, recipe.id, None).await.unwrap().unwrap();
    assert_eq!(cleared.folder_id, None);
}

#[sqlx::test]
async fn photo_url_and_delete(pool: PgPool) {
    let (family_id, user_id, cookbook_id) = seed(&pool).await;
    let recipe = RecipeRepo::create(&pool, &new_recipe(cookbook_id, family_id, user_id, "Mole"))
        .await
        .unwrap();

    let with_photo = RecipeRepo::set_photo_url(
        &pool,
        recipe.id,
        "https://photos.test/1/2/3.jpg",
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(with_photo.photo_url.as_deref(), Some("https://photos.test/1/2/3.jpg"));

    assert!(RecipeRepo::delete(&pool, recipe.id).await.unwrap());
    assert!(!RecipeRepo::delete(&pool, recipe.id).await.unwrap());
}

#[sqlx::test]
async fn cook_progress_upsert_is_device_scoped(pool: PgPool) {
    let (family_id, user_id, cookbook_id) = seed(&pool).await;
    let recipe = RecipeRepo::create(&pool, &new_recipe(cookbook_id, family_id, user_id, "Mole"))
        .await
        .unwrap();

    let dto = UpsertCookProgress { step_index: 1, checked: vec![0, 2], sidebar_open: true };
    let progress = CookProgressRepo::upsert(&pool, recipe.id, "device-a", &dto).await.unwrap();
    assert_eq!(progress.step_index, 1);
    assert_eq!(progress.checked, serde_json::json!([0, 2]));

    // A second save for the same device updates in place.
    let dto = UpsertCookProgress { step_index: 2, checked: vec![0, 1, 2], sidebar_open: false };
    let progress = CookProgressRepo::upsert(&pool, recipe.id, "device-a", &dto).await.unwrap();
    assert_eq!(progress.step_index, 2);
    assert!(!progress.sidebar_open);

    // Another device sees no progress.
    let other = CookProgressRepo::find(&pool, recipe.id, "device-b").await.unwrap();
    assert!(other.is_none());

    assert!(CookProgressRepo::reset(&pool, recipe.id, "device-a").await.unwrap());
    assert!(CookProgressRepo::find(&pool, recipe.id, "device-a").await.unwrap().is_none());
}
