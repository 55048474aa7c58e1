//! Moderation commands.
//!
//! Thin wrapper over `pantry_core::moderation`: the state machine decides
//! whether a transition is legal, [`SqliteStore`] applies it atomically.

use anyhow::Result;

use pantry_core::models::{Recipe, RecipeStatus};

use crate::config::Config;
use crate::db;
use crate::recipes::print_json;
use crate::sqlite_store::SqliteStore;

/// Move a recipe to `target` and return the updated record.
pub async fn moderate_recipe(config: &Config, id: &str, target: RecipeStatus) -> Result<Recipe> {
    let pool = db::connect(config).await?;
    let store = SqliteStore::new(pool.clone());
    let result = pantry_core::moderation::transition_status(&store, id, target).await;
    pool.close().await;

    Ok(result?)
}

/// CLI entry point for `pantry moderate <id> <status>`.
pub async fn run_moderate(
    config: &Config,
    id: &str,
    target: RecipeStatus,
    json: bool,
) -> Result<()> {
    let recipe = moderate_recipe(config, id, target).await?;
    if json {
        return print_json(&recipe);
    }
    println!("Recipe {} is now {}", recipe.id, recipe.status);
    Ok(())
}
