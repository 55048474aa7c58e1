//! In-memory [`RecipeStore`] implementation for tests and embedded use.
//!
//! Recipes live in a `Vec` behind `std::sync::RwLock`, so read order is
//! insertion order. Every mutation happens under the write lock, which
//! makes [`set_status_if`](RecipeStore::set_status_if) atomic per record.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;

use crate::models::{Recipe, RecipeChanges, RecipeStatus};

use super::RecipeStore;

/// In-memory recipe store.
pub struct InMemoryStore {
    recipes: RwLock<Vec<Recipe>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            recipes: RwLock::new(Vec::new()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Recipe>>> {
        self.recipes
            .read()
            .map_err(|_| anyhow!("recipe store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Recipe>>> {
        self.recipes
            .write()
            .map_err(|_| anyhow!("recipe store lock poisoned"))
    }

    fn filtered(&self, keep: impl Fn(&Recipe) -> bool) -> Result<Vec<Recipe>> {
        Ok(self.read()?.iter().filter(|r| keep(r)).cloned().collect())
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecipeStore for InMemoryStore {
    async fn insert(&self, recipe: &Recipe) -> Result<String> {
        let mut recipes = self.write()?;
        if recipes.iter().any(|r| r.id == recipe.id) {
            bail!("duplicate recipe id: {}", recipe.id);
        }
        recipes.push(recipe.clone());
        Ok(recipe.id.clone())
    }

    async fn get(&self, id: &str) -> Result<Option<Recipe>> {
        Ok(self.read()?.iter().find(|r| r.id == id).cloned())
    }

    async fn update(&self, id: &str, changes: &RecipeChanges) -> Result<Option<Recipe>> {
        let mut recipes = self.write()?;
        Ok(recipes.iter_mut().find(|r| r.id == id).map(|recipe| {
            changes.apply_to(recipe);
            recipe.clone()
        }))
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let mut recipes = self.write()?;
        let before = recipes.len();
        recipes.retain(|r| r.id != id);
        Ok(recipes.len() != before)
    }

    async fn set_status_if(
        &self,
        id: &str,
        expected: RecipeStatus,
        target: RecipeStatus,
    ) -> Result<Option<Recipe>> {
        let mut recipes = self.write()?;
        Ok(recipes
            .iter_mut()
            .find(|r| r.id == id && r.status == expected)
            .map(|recipe| {
                recipe.status = target;
                recipe.clone()
            }))
    }

    async fn list_all(&self) -> Result<Vec<Recipe>> {
        self.filtered(|_| true)
    }

    async fn list_by_status(&self, status: RecipeStatus) -> Result<Vec<Recipe>> {
        self.filtered(|r| r.status == status)
    }

    async fn list_by_owner(
        &self,
        owner_id: &str,
        status: Option<RecipeStatus>,
    ) -> Result<Vec<Recipe>> {
        self.filtered(|r| r.owner_id == owner_id && status.map_or(true, |s| r.status == s))
    }
}
