//! Ingredient-match search over the approved catalog.
//!
//! The scoring function is pure; [`search_by_ingredients`] wires it to a
//! [`RecipeStore`] by reading one snapshot of approved recipes per call.
//!
//! # Scoring Algorithm
//!
//! 1. Split the query on commas, trim and lower-case each piece, drop
//!    empty pieces. No usable piece is a validation error.
//! 2. For each recipe, count its ingredients whose lower-cased form is in
//!    the query set (exact equality, no stemming or substrings).
//! 3. `match_percentage = 100 × matched / total`. Recipes without
//!    ingredients are skipped rather than divided by zero.
//! 4. Keep recipes strictly above `min_match_percent` (default 40).
//! 5. Sort by percentage, descending. The sort is stable, so ties keep the
//!    store's read order.
//! 6. Truncate to `limit` when one is set.
//!
//! Percentages are returned unrounded and never persisted.

use std::cmp::Ordering;
use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use crate::error::{RecipeError, RecipeResult};
use crate::models::{Recipe, RecipeStatus};
use crate::store::RecipeStore;

/// Default strict lower bound on the match percentage.
pub const DEFAULT_MIN_MATCH_PERCENT: f64 = 40.0;

/// Ranking parameters, decoupled from application config.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchParams {
    /// Recipes must score strictly above this percentage.
    pub min_match_percent: f64,
    /// Maximum results to return; `None` returns every match.
    pub limit: Option<usize>,
}

impl Default for MatchParams {
    fn default() -> Self {
        Self {
            min_match_percent: DEFAULT_MIN_MATCH_PERCENT,
            limit: None,
        }
    }
}

/// A recipe together with the share of its ingredients the user has.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeMatch {
    #[serde(flatten)]
    pub recipe: Recipe,
    /// In `(min_match_percent, 100]`.
    pub match_percentage: f64,
}

/// Parse a comma-separated query into lower-cased ingredient names.
///
/// Fails with [`RecipeError::Validation`] when nothing usable remains.
pub fn parse_query(query: &str) -> RecipeResult<Vec<String>> {
    let terms: Vec<String> = query
        .split(',')
        .map(|piece| piece.trim().to_lowercase())
        .filter(|piece| !piece.is_empty())
        .collect();

    if terms.is_empty() {
        return Err(RecipeError::Validation(
            "search query must name at least one ingredient".to_string(),
        ));
    }
    Ok(terms)
}

/// Percentage of `ingredients` present in `available`, or `None` for a
/// recipe with no ingredients.
///
/// `available` must already be lower-cased.
pub fn match_percentage(ingredients: &[String], available: &HashSet<&str>) -> Option<f64> {
    if ingredients.is_empty() {
        return None;
    }
    let matched = ingredients
        .iter()
        .filter(|ing| available.contains(ing.to_lowercase().as_str()))
        .count();
    Some(100.0 * matched as f64 / ingredients.len() as f64)
}

/// Score, filter, and rank `recipes` against the parsed query terms.
///
/// Does not look at recipe status; callers pass the approved set.
pub fn rank_recipes(
    terms: &[String],
    recipes: Vec<Recipe>,
    params: &MatchParams,
) -> Vec<RecipeMatch> {
    let available: HashSet<&str> = terms.iter().map(String::as_str).collect();

    let mut matches: Vec<RecipeMatch> = recipes
        .into_iter()
        .filter_map(|recipe| {
            let pct = match_percentage(&recipe.ingredients, &available)?;
            (pct > params.min_match_percent).then_some(RecipeMatch {
                recipe,
                match_percentage: pct,
            })
        })
        .collect();

    matches.sort_by(|a, b| {
        b.match_percentage
            .partial_cmp(&a.match_percentage)
            .unwrap_or(Ordering::Equal)
    });

    if let Some(limit) = params.limit {
        matches.truncate(limit);
    }
    matches
}

/// Search the approved catalog for recipes the user can (mostly) cook.
///
/// This is the entry point every frontend delegates to.
pub async fn search_by_ingredients<S: RecipeStore + ?Sized>(
    store: &S,
    query: &str,
    params: &MatchParams,
) -> RecipeResult<Vec<RecipeMatch>> {
    let terms = parse_query(query)?;
    let approved = store.list_by_status(RecipeStatus::Approved).await?;
    let candidates = approved.len();

    let matches = rank_recipes(&terms, approved, params);
    debug!(
        terms = terms.len(),
        candidates,
        matches = matches.len(),
        "ingredient search complete"
    );
    Ok(matches)
}
