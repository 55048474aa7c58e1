//! Ingredient search and the ingredient catalog.
//!
//! This module provides the application-level entry points. The ranking
//! algorithm lives in `pantry_core::search` and the catalog in
//! `pantry_core::catalog`; both operate through the
//! [`RecipeStore`](pantry_core::store::RecipeStore) trait. This wrapper
//! handles config, database connection, and CLI output.

use anyhow::Result;

pub use pantry_core::search::{MatchParams, RecipeMatch};

use crate::config::Config;
use crate::db;
use crate::recipes::print_json;
use crate::sqlite_store::SqliteStore;

/// Rank approved recipes by how many of their ingredients the query covers.
///
/// `limit` overrides `[search].limit` from the config.
pub async fn search_recipes(
    config: &Config,
    query: &str,
    limit: Option<usize>,
) -> Result<Vec<RecipeMatch>> {
    let params = config.search.match_params(limit);

    let pool = db::connect(config).await?;
    let store = SqliteStore::new(pool.clone());
    let result = pantry_core::search::search_by_ingredients(&store, query, &params).await;
    pool.close().await;

    Ok(result?)
}

/// Every distinct ingredient used by an approved recipe, for autocomplete.
pub async fn ingredient_catalog(config: &Config) -> Result<Vec<String>> {
    let pool = db::connect(config).await?;
    let store = SqliteStore::new(pool.clone());
    let result = pantry_core::catalog::distinct_approved_ingredients(&store).await;
    pool.close().await;

    Ok(result?)
}

/// CLI entry point for `pantry search`.
pub async fn run_search(
    config: &Config,
    query: &str,
    limit: Option<usize>,
    json: bool,
) -> Result<()> {
    let results = search_recipes(config, query, limit).await?;

    if json {
        return print_json(&results);
    }

    if results.is_empty() {
        println!("No results.");
        return Ok(());
    }

    for (i, m) in results.iter().enumerate() {
        println!(
            "{}. [{:.1}%] {}",
            i + 1,
            m.match_percentage,
            m.recipe.title
        );
        println!("    ingredients: {}", m.recipe.ingredients.join(", "));
        println!(
            "    time: {} min prep + {} min cook, serves {}",
            m.recipe.prep_time, m.recipe.cook_time, m.recipe.servings
        );
        println!("    id: {}", m.recipe.id);
        println!();
    }

    Ok(())
}

/// CLI entry point for `pantry ingredients`.
pub async fn run_ingredients(config: &Config, json: bool) -> Result<()> {
    let ingredients = ingredient_catalog(config).await?;

    if json {
        return print_json(&ingredients);
    }

    if ingredients.is_empty() {
        println!("No ingredients.");
        return Ok(());
    }
    for ingredient in &ingredients {
        println!("{}", ingredient);
    }
    Ok(())
}
