//! Storage abstraction for Pantry.
//!
//! The [`RecipeStore`] trait is the only way the core touches persisted
//! recipes, so the backend (SQLite, in-memory, anything else) can be
//! swapped without changing the algorithms.
//!
//! Implementations must be `Send + Sync` to work with async runtimes.

pub mod memory;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{Recipe, RecipeChanges, RecipeStatus};

/// Abstract recipe storage backend.
///
/// All list operations return recipes in the store's read order, which
/// must be stable (insertion order for both bundled backends). Ranking
/// relies on it to break ties.
///
/// # Operations
///
/// | Method | Purpose |
/// |--------|---------|
/// | [`insert`](RecipeStore::insert) | Persist a new recipe |
/// | [`get`](RecipeStore::get) | Fetch one recipe by id |
/// | [`update`](RecipeStore::update) | Apply a partial field update |
/// | [`delete`](RecipeStore::delete) | Remove a recipe |
/// | [`set_status_if`](RecipeStore::set_status_if) | Compare-and-set the status of one recipe |
/// | [`list_all`](RecipeStore::list_all) | Every recipe |
/// | [`list_by_status`](RecipeStore::list_by_status) | Recipes in one moderation state |
/// | [`list_by_owner`](RecipeStore::list_by_owner) | Recipes of one submitter |
#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// Insert a new recipe. Returns its id.
    async fn insert(&self, recipe: &Recipe) -> Result<String>;

    /// Retrieve a recipe by id.
    async fn get(&self, id: &str) -> Result<Option<Recipe>>;

    /// Apply `changes` to the recipe and return the updated record, or
    /// `None` if no recipe has this id. Must not touch `status`.
    async fn update(&self, id: &str, changes: &RecipeChanges) -> Result<Option<Recipe>>;

    /// Delete a recipe. Returns `true` if a record was removed.
    async fn delete(&self, id: &str) -> Result<bool>;

    /// Atomically set the status to `target` if it is currently `expected`.
    ///
    /// Returns the updated recipe, or `None` when the recipe is missing or
    /// its status was no longer `expected`. Only `status` changes.
    async fn set_status_if(
        &self,
        id: &str,
        expected: RecipeStatus,
        target: RecipeStatus,
    ) -> Result<Option<Recipe>>;

    async fn list_all(&self) -> Result<Vec<Recipe>>;

    async fn list_by_status(&self, status: RecipeStatus) -> Result<Vec<Recipe>>;

    /// Recipes submitted by `owner_id`, optionally narrowed to one status.
    async fn list_by_owner(
        &self,
        owner_id: &str,
        status: Option<RecipeStatus>,
    ) -> Result<Vec<Recipe>>;
}
