//! Recipe submission, retrieval, edits, and listings.
//!
//! Each operation opens the configured database, runs the corresponding
//! `pantry_core::recipes` function through [`SqliteStore`], and closes the
//! pool. The `run_*` functions are the CLI entry points and handle output
//! formatting.

use anyhow::Result;

use pantry_core::models::{Recipe, RecipeEdit, RecipeStatus, RecipeSubmission};
use pantry_core::{moderation, recipes};

use crate::config::Config;
use crate::db;
use crate::sqlite_store::SqliteStore;

/// Submit a recipe. It is always stored as pending.
pub async fn submit(config: &Config, submission: RecipeSubmission) -> Result<Recipe> {
    let pool = db::connect(config).await?;
    let store = SqliteStore::new(pool.clone());
    let result = recipes::submit_recipe(
        &store,
        submission,
        config.recipes.default_calories_per_serving,
    )
    .await;
    pool.close().await;
    Ok(result?)
}

pub async fn get(config: &Config, id: &str) -> Result<Recipe> {
    let pool = db::connect(config).await?;
    let store = SqliteStore::new(pool.clone());
    let result = recipes::get_recipe(&store, id).await;
    pool.close().await;
    Ok(result?)
}

pub async fn edit(config: &Config, id: &str, edit: RecipeEdit) -> Result<Recipe> {
    let pool = db::connect(config).await?;
    let store = SqliteStore::new(pool.clone());
    let result = recipes::edit_recipe(&store, id, edit).await;
    pool.close().await;
    Ok(result?)
}

pub async fn delete(config: &Config, id: &str) -> Result<()> {
    let pool = db::connect(config).await?;
    let store = SqliteStore::new(pool.clone());
    let result = recipes::delete_recipe(&store, id).await;
    pool.close().await;
    Ok(result?)
}

pub async fn list(
    config: &Config,
    owner_id: Option<&str>,
    status: Option<RecipeStatus>,
) -> Result<Vec<Recipe>> {
    let pool = db::connect(config).await?;
    let store = SqliteStore::new(pool.clone());
    let result = recipes::list_recipes(&store, owner_id, status).await;
    pool.close().await;
    Ok(result?)
}

/// Recipes waiting on a moderator (pending or rejected).
pub async fn queue(config: &Config) -> Result<Vec<Recipe>> {
    let pool = db::connect(config).await?;
    let store = SqliteStore::new(pool.clone());
    let result = moderation::moderation_queue(&store).await;
    pool.close().await;
    Ok(result?)
}

/// Print one recipe in full.
pub fn print_recipe(recipe: &Recipe) {
    println!("--- Recipe ---");
    println!("id:                   {}", recipe.id);
    println!("title:                {}", recipe.title);
    println!("owner:                {}", recipe.owner_id);
    println!("status:               {}", recipe.status);
    println!("prep_time:            {} min", recipe.prep_time);
    println!("cook_time:            {} min", recipe.cook_time);
    println!("servings:             {}", recipe.servings);
    if let Some(calories) = recipe.calories {
        println!("calories:             {}", calories);
    }
    println!("calories_per_serving: {}", recipe.calories_per_serving);
    if let Some(ref image) = recipe.image {
        println!("image:                {}", image);
    }
    println!();

    println!("--- Ingredients ({}) ---", recipe.ingredients.len());
    for ingredient in &recipe.ingredients {
        println!("- {}", ingredient);
    }
    println!();

    println!("--- Instructions ({}) ---", recipe.instructions.len());
    for (i, step) in recipe.instructions.iter().enumerate() {
        println!("{}. {}", i + 1, step);
    }
}

/// Print a compact one-line-per-recipe listing.
pub fn print_listing(recipes: &[Recipe]) {
    if recipes.is_empty() {
        println!("No recipes.");
        return;
    }
    for recipe in recipes {
        println!(
            "{}  [{}]  {}  ({} ingredients, by {})",
            recipe.id,
            recipe.status,
            recipe.title,
            recipe.ingredients.len(),
            recipe.owner_id
        );
    }
}

pub fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// CLI entry point for `pantry submit`.
pub async fn run_submit(config: &Config, submission: RecipeSubmission, json: bool) -> Result<()> {
    let recipe = submit(config, submission).await?;
    if json {
        return print_json(&recipe);
    }
    println!("Submitted recipe {} (status: {})", recipe.id, recipe.status);
    println!("ingredients: {}", recipe.ingredients.join(", "));
    Ok(())
}

/// CLI entry point for `pantry get <id>`.
pub async fn run_get(config: &Config, id: &str, json: bool) -> Result<()> {
    let recipe = get(config, id).await?;
    if json {
        return print_json(&recipe);
    }
    print_recipe(&recipe);
    Ok(())
}

/// CLI entry point for `pantry edit <id>`.
pub async fn run_edit(config: &Config, id: &str, changes: RecipeEdit, json: bool) -> Result<()> {
    let recipe = edit(config, id, changes).await?;
    if json {
        return print_json(&recipe);
    }
    println!("Updated recipe {}", recipe.id);
    print_recipe(&recipe);
    Ok(())
}

/// CLI entry point for `pantry delete <id>`.
pub async fn run_delete(config: &Config, id: &str) -> Result<()> {
    delete(config, id).await?;
    println!("Deleted recipe {}", id);
    Ok(())
}

/// CLI entry point for `pantry list`.
pub async fn run_list(
    config: &Config,
    owner_id: Option<&str>,
    status: Option<RecipeStatus>,
    json: bool,
) -> Result<()> {
    let recipes = list(config, owner_id, status).await?;
    if json {
        return print_json(&recipes);
    }
    print_listing(&recipes);
    Ok(())
}

/// CLI entry point for `pantry queue`.
pub async fn run_queue(config: &Config, json: bool) -> Result<()> {
    let recipes = queue(config).await?;
    if json {
        return print_json(&recipes);
    }
    print_listing(&recipes);
    Ok(())
}
