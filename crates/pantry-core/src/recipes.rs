//! Recipe submission, owner edits, and lookups.
//!
//! Submissions and edits arrive as raw text. They are normalized, checked
//! by the data-shape validator, and only then handed to the store. Neither
//! path can set `status`: submissions always start pending and edits
//! leave it alone.

use tracing::info;
use uuid::Uuid;

use crate::error::{RecipeError, RecipeResult};
use crate::models::{Recipe, RecipeChanges, RecipeEdit, RecipeStatus, RecipeSubmission};
use crate::normalize::{normalize_ingredients, normalize_instructions};
use crate::store::RecipeStore;
use crate::validate::{self, Violations};

/// Calories per serving recorded when the submitter leaves it blank.
pub const DEFAULT_CALORIES_PER_SERVING: f64 = 2.0;

/// Build a pending recipe from a raw submission.
///
/// `now` is the creation timestamp in Unix seconds.
pub fn build_recipe(
    submission: RecipeSubmission,
    default_calories_per_serving: f64,
    now: i64,
) -> RecipeResult<Recipe> {
    let ingredients = normalize_ingredients(submission.ingredients.as_deref());
    let instructions = normalize_instructions(submission.instructions.as_deref());
    let title = submission.title.trim().to_string();
    let owner_id = submission.owner_id.trim().to_string();
    let calories_per_serving = submission
        .calories_per_serving
        .unwrap_or(default_calories_per_serving);

    let mut v = Violations::default();
    v.check(!owner_id.is_empty(), "owner_id must not be empty");
    validate::title(&mut v, &title);
    validate::ingredients(&mut v, &ingredients);
    validate::servings(&mut v, submission.servings);
    validate::calories(&mut v, "calories_per_serving", calories_per_serving);
    if let Some(c) = submission.calories {
        validate::calories(&mut v, "calories", c);
    }
    v.into_result()?;

    Ok(Recipe {
        id: Uuid::new_v4().to_string(),
        owner_id,
        title,
        ingredients,
        instructions,
        prep_time: submission.prep_time,
        cook_time: submission.cook_time,
        servings: submission.servings,
        calories: submission.calories,
        calories_per_serving,
        image: submission.image.filter(|i| !i.trim().is_empty()),
        status: RecipeStatus::Pending,
        created_at: now,
        updated_at: now,
    })
}

/// Normalize and validate an owner edit.
///
/// Only the fields present in `edit` are checked. An edit that changes
/// nothing is rejected.
pub fn prepare_changes(edit: RecipeEdit, now: i64) -> RecipeResult<RecipeChanges> {
    let changes = RecipeChanges {
        title: edit.title.map(|t| t.trim().to_string()),
        ingredients: edit
            .ingredients
            .as_deref()
            .map(|raw| normalize_ingredients(Some(raw))),
        instructions: edit
            .instructions
            .as_deref()
            .map(|raw| normalize_instructions(Some(raw))),
        prep_time: edit.prep_time,
        cook_time: edit.cook_time,
        servings: edit.servings,
        calories: edit.calories,
        calories_per_serving: edit.calories_per_serving,
        image: edit.image,
        updated_at: now,
    };

    if changes.is_empty() {
        return Err(RecipeError::Validation(
            "edit must change at least one field".to_string(),
        ));
    }

    let mut v = Violations::default();
    if let Some(ref title) = changes.title {
        validate::title(&mut v, title);
    }
    if let Some(ref ingredients) = changes.ingredients {
        validate::ingredients(&mut v, ingredients);
    }
    if let Some(servings) = changes.servings {
        validate::servings(&mut v, servings);
    }
    if let Some(c) = changes.calories {
        validate::calories(&mut v, "calories", c);
    }
    if let Some(c) = changes.calories_per_serving {
        validate::calories(&mut v, "calories_per_serving", c);
    }
    v.into_result()?;

    Ok(changes)
}

/// Submit a new recipe. It is stored as pending whatever the caller wants.
pub async fn submit_recipe<S: RecipeStore + ?Sized>(
    store: &S,
    submission: RecipeSubmission,
    default_calories_per_serving: f64,
) -> RecipeResult<Recipe> {
    let recipe = build_recipe(
        submission,
        default_calories_per_serving,
        chrono::Utc::now().timestamp(),
    )?;
    store.insert(&recipe).await?;
    info!(
        recipe_id = %recipe.id,
        owner_id = %recipe.owner_id,
        ingredients = recipe.ingredients.len(),
        "recipe submitted"
    );
    Ok(recipe)
}

pub async fn get_recipe<S: RecipeStore + ?Sized>(store: &S, id: &str) -> RecipeResult<Recipe> {
    store
        .get(id)
        .await?
        .ok_or_else(|| RecipeError::NotFound(id.to_string()))
}

/// Apply an owner edit and return the updated recipe.
pub async fn edit_recipe<S: RecipeStore + ?Sized>(
    store: &S,
    id: &str,
    edit: RecipeEdit,
) -> RecipeResult<Recipe> {
    let changes = prepare_changes(edit, chrono::Utc::now().timestamp())?;
    let updated = store
        .update(id, &changes)
        .await?
        .ok_or_else(|| RecipeError::NotFound(id.to_string()))?;
    info!(recipe_id = id, "recipe edited");
    Ok(updated)
}

/// Delete a recipe.
///
/// Ratings and favorites that reference it belong to other systems; the
/// caller removes those.
pub async fn delete_recipe<S: RecipeStore + ?Sized>(store: &S, id: &str) -> RecipeResult<()> {
    if !store.delete(id).await? {
        return Err(RecipeError::NotFound(id.to_string()));
    }
    info!(recipe_id = id, "recipe deleted");
    Ok(())
}

/// List recipes, optionally narrowed by owner and/or status.
pub async fn list_recipes<S: RecipeStore + ?Sized>(
    store: &S,
    owner_id: Option<&str>,
    status: Option<RecipeStatus>,
) -> RecipeResult<Vec<Recipe>> {
    let recipes = match (owner_id, status) {
        (Some(owner), status) => store.list_by_owner(owner, status).await?,
        (None, Some(status)) => store.list_by_status(status).await?,
        (None, None) => store.list_all().await?,
    };
    Ok(recipes)
}
