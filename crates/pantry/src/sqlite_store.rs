//! SQLite-backed [`RecipeStore`] implementation.
//!
//! Ingredient and instruction lists are stored as JSON arrays. Read order
//! is `rowid`, i.e. insertion order, which search ranking uses to break
//! ties.

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use pantry_core::models::{Recipe, RecipeChanges, RecipeStatus};
use pantry_core::store::RecipeStore;

const RECIPE_COLUMNS: &str = "id, owner_id, title, ingredients_json, instructions_json, \
     prep_time, cook_time, servings, calories, calories_per_serving, image, status, \
     created_at, updated_at";

/// SQLite implementation of the [`RecipeStore`] trait.
///
/// Wraps a [`SqlitePool`]. Status compare-and-set runs as a single
/// conditional `UPDATE`, so two moderators racing on one recipe cannot
/// interleave.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn fetch_where(&self, clause: &str, binds: &[&str]) -> Result<Vec<Recipe>> {
        let sql = format!(
            "SELECT {} FROM recipes {} ORDER BY rowid ASC",
            RECIPE_COLUMNS, clause
        );
        let mut query = sqlx::query(&sql);
        for b in binds {
            query = query.bind(*b);
        }
        let rows = query.fetch_all(&self.pool).await?;
        rows.iter().map(row_to_recipe).collect()
    }
}

fn to_u32(row: &SqliteRow, column: &str) -> Result<u32> {
    let value: i64 = row.get(column);
    u32::try_from(value).with_context(|| format!("column {} out of range: {}", column, value))
}

fn row_to_recipe(row: &SqliteRow) -> Result<Recipe> {
    let id: String = row.get("id");
    let ingredients_json: String = row.get("ingredients_json");
    let instructions_json: String = row.get("instructions_json");
    let status: String = row.get("status");

    Ok(Recipe {
        ingredients: serde_json::from_str(&ingredients_json)
            .with_context(|| format!("corrupt ingredients for recipe {}", id))?,
        instructions: serde_json::from_str(&instructions_json)
            .with_context(|| format!("corrupt instructions for recipe {}", id))?,
        status: status
            .parse::<RecipeStatus>()
            .with_context(|| format!("corrupt status for recipe {}", id))?,
        owner_id: row.get("owner_id"),
        title: row.get("title"),
        prep_time: to_u32(row, "prep_time")?,
        cook_time: to_u32(row, "cook_time")?,
        servings: to_u32(row, "servings")?,
        calories: row.get("calories"),
        calories_per_serving: row.get("calories_per_serving"),
        image: row.get("image"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
        id,
    })
}

fn to_json(list: &Option<Vec<String>>) -> Result<Option<String>> {
    list.as_ref()
        .map(serde_json::to_string)
        .transpose()
        .map_err(Into::into)
}

#[async_trait]
impl RecipeStore for SqliteStore {
    async fn insert(&self, recipe: &Recipe) -> Result<String> {
        sqlx::query(
            r#"
            INSERT INTO recipes (id, owner_id, title, ingredients_json, instructions_json,
                                 prep_time, cook_time, servings, calories,
                                 calories_per_serving, image, status, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&recipe.id)
        .bind(&recipe.owner_id)
        .bind(&recipe.title)
        .bind(serde_json::to_string(&recipe.ingredients)?)
        .bind(serde_json::to_string(&recipe.instructions)?)
        .bind(i64::from(recipe.prep_time))
        .bind(i64::from(recipe.cook_time))
        .bind(i64::from(recipe.servings))
        .bind(recipe.calories)
        .bind(recipe.calories_per_serving)
        .bind(&recipe.image)
        .bind(recipe.status.as_str())
        .bind(recipe.created_at)
        .bind(recipe.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(recipe.id.clone())
    }

    async fn get(&self, id: &str) -> Result<Option<Recipe>> {
        let sql = format!("SELECT {} FROM recipes WHERE id = ?", RECIPE_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_recipe).transpose()
    }

    async fn update(&self, id: &str, changes: &RecipeChanges) -> Result<Option<Recipe>> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE recipes SET
                title = COALESCE(?, title),
                ingredients_json = COALESCE(?, ingredients_json),
                instructions_json = COALESCE(?, instructions_json),
                prep_time = COALESCE(?, prep_time),
                cook_time = COALESCE(?, cook_time),
                servings = COALESCE(?, servings),
                calories = COALESCE(?, calories),
                calories_per_serving = COALESCE(?, calories_per_serving),
                image = COALESCE(?, image),
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&changes.title)
        .bind(to_json(&changes.ingredients)?)
        .bind(to_json(&changes.instructions)?)
        .bind(changes.prep_time.map(i64::from))
        .bind(changes.cook_time.map(i64::from))
        .bind(changes.servings.map(i64::from))
        .bind(changes.calories)
        .bind(changes.calories_per_serving)
        .bind(&changes.image)
        .bind(changes.updated_at)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        let sql = format!("SELECT {} FROM recipes WHERE id = ?", RECIPE_COLUMNS);
        let row = sqlx::query(&sql).bind(id).fetch_one(&mut *tx).await?;
        tx.commit().await?;

        row_to_recipe(&row).map(Some)
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn set_status_if(
        &self,
        id: &str,
        expected: RecipeStatus,
        target: RecipeStatus,
    ) -> Result<Option<Recipe>> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("UPDATE recipes SET status = ? WHERE id = ? AND status = ?")
            .bind(target.as_str())
            .bind(id)
            .bind(expected.as_str())
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        let sql = format!("SELECT {} FROM recipes WHERE id = ?", RECIPE_COLUMNS);
        let row = sqlx::query(&sql).bind(id).fetch_one(&mut *tx).await?;
        tx.commit().await?;

        row_to_recipe(&row).map(Some)
    }

    async fn list_all(&self) -> Result<Vec<Recipe>> {
        self.fetch_where("", &[]).await
    }

    async fn list_by_status(&self, status: RecipeStatus) -> Result<Vec<Recipe>> {
        self.fetch_where("WHERE status = ?", &[status.as_str()]).await
    }

    async fn list_by_owner(
        &self,
        owner_id: &str,
        status: Option<RecipeStatus>,
    ) -> Result<Vec<Recipe>> {
        match status {
            Some(s) => {
                self.fetch_where("WHERE owner_id = ? AND status = ?", &[owner_id, s.as_str()])
                    .await
            }
            None => self.fetch_where("WHERE owner_id = ?", &[owner_id]).await,
        }
    }
}
