//! Core data models used throughout Pantry.
//!
//! These types represent the recipes that flow through submission,
//! moderation, and ingredient search, plus the raw inputs users send in.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RecipeError;

/// Moderation status of a recipe.
///
/// Only [`RecipeStatus::Approved`] recipes are visible to ingredient search
/// and the ingredient catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecipeStatus {
    Pending,
    Approved,
    Rejected,
}

impl RecipeStatus {
    /// All statuses, in the order the moderation views are usually shown.
    pub const ALL: [RecipeStatus; 3] = [
        RecipeStatus::Pending,
        RecipeStatus::Approved,
        RecipeStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecipeStatus::Pending => "pending",
            RecipeStatus::Approved => "approved",
            RecipeStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for RecipeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecipeStatus {
    type Err = RecipeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(RecipeStatus::Pending),
            "approved" => Ok(RecipeStatus::Approved),
            "rejected" => Ok(RecipeStatus::Rejected),
            other => Err(RecipeError::Validation(format!(
                "unknown recipe status '{}': expected pending, approved, or rejected",
                other
            ))),
        }
    }
}

/// A stored recipe.
///
/// `ingredients` holds normalized, deduplicated entries in first-occurrence
/// order and is never empty for a recipe that went through submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub owner_id: String,
    pub title: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    /// Preparation time in minutes.
    pub prep_time: u32,
    /// Cooking time in minutes.
    pub cook_time: u32,
    pub servings: u32,
    /// Total calories for the whole recipe, when the submitter gave one.
    pub calories: Option<f64>,
    pub calories_per_serving: f64,
    /// Opaque reference to an externally stored image.
    pub image: Option<String>,
    pub status: RecipeStatus,
    /// Unix seconds.
    pub created_at: i64,
    /// Unix seconds. Bumped by owner edits, not by moderation.
    pub updated_at: i64,
}

/// Raw recipe submission as a user types it.
///
/// Ingredients and instructions are free text; they are normalized into
/// lists by [`crate::recipes::submit_recipe`]. There is no status field:
/// every submission starts out pending.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecipeSubmission {
    pub owner_id: String,
    pub title: String,
    #[serde(default)]
    pub ingredients: Option<String>,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub prep_time: u32,
    #[serde(default)]
    pub cook_time: u32,
    pub servings: u32,
    #[serde(default)]
    pub calories: Option<f64>,
    #[serde(default)]
    pub calories_per_serving: Option<f64>,
    #[serde(default)]
    pub image: Option<String>,
}

/// Owner edit with raw text fields. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecipeEdit {
    pub title: Option<String>,
    pub ingredients: Option<String>,
    pub instructions: Option<String>,
    pub prep_time: Option<u32>,
    pub cook_time: Option<u32>,
    pub servings: Option<u32>,
    pub calories: Option<f64>,
    pub calories_per_serving: Option<f64>,
    pub image: Option<String>,
}

/// Normalized partial update handed to a [`RecipeStore`](crate::store::RecipeStore).
///
/// Never carries `status`, `id`, `owner_id`, or `created_at`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeChanges {
    pub title: Option<String>,
    pub ingredients: Option<Vec<String>>,
    pub instructions: Option<Vec<String>>,
    pub prep_time: Option<u32>,
    pub cook_time: Option<u32>,
    pub servings: Option<u32>,
    pub calories: Option<f64>,
    pub calories_per_serving: Option<f64>,
    pub image: Option<String>,
    pub updated_at: i64,
}

impl RecipeChanges {
    /// True when no field (other than the timestamp) would change.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.ingredients.is_none()
            && self.instructions.is_none()
            && self.prep_time.is_none()
            && self.cook_time.is_none()
            && self.servings.is_none()
            && self.calories.is_none()
            && self.calories_per_serving.is_none()
            && self.image.is_none()
    }

    /// Apply these changes to a recipe in place.
    ///
    /// Shared by store backends that cannot express a partial update
    /// natively.
    pub fn apply_to(&self, recipe: &mut Recipe) {
        if let Some(ref title) = self.title {
            recipe.title = title.clone();
        }
        if let Some(ref ingredients) = self.ingredients {
            recipe.ingredients = ingredients.clone();
        }
        if let Some(ref instructions) = self.instructions {
            recipe.instructions = instructions.clone();
        }
        if let Some(v) = self.prep_time {
            recipe.prep_time = v;
        }
        if let Some(v) = self.cook_time {
            recipe.cook_time = v;
        }
        if let Some(v) = self.servings {
            recipe.servings = v;
        }
        if let Some(v) = self.calories {
            recipe.calories = Some(v);
        }
        if let Some(v) = self.calories_per_serving {
            recipe.calories_per_serving = v;
        }
        if let Some(ref image) = self.image {
            recipe.image = Some(image.clone());
        }
        recipe.updated_at = self.updated_at;
    }
}
