//! Data-shape checks applied before a recipe is built or edited.
//!
//! Kept apart from the algorithms so that submission, edits, and the
//! store backends all agree on what a well-formed recipe looks like.

use uuid::Uuid;

use crate::error::{RecipeError, RecipeResult};

/// Collects every violated constraint so the caller sees them all at once.
#[derive(Debug, Default)]
pub(crate) struct Violations(Vec<String>);

impl Violations {
    pub(crate) fn check(&mut self, ok: bool, message: impl Into<String>) {
        if !ok {
            self.0.push(message.into());
        }
    }

    pub(crate) fn into_result(self) -> RecipeResult<()> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(RecipeError::Validation(self.0.join("; ")))
        }
    }
}

pub(crate) fn title(v: &mut Violations, title: &str) {
    v.check(!title.trim().is_empty(), "title must not be empty");
}

pub(crate) fn ingredients(v: &mut Violations, ingredients: &[String]) {
    v.check(
        !ingredients.is_empty(),
        "ingredients must contain at least one entry",
    );
}

pub(crate) fn servings(v: &mut Violations, servings: u32) {
    v.check(servings > 0, "servings must be > 0");
}

pub(crate) fn calories(v: &mut Violations, field: &str, value: f64) {
    v.check(
        value.is_finite() && value >= 0.0,
        format!("{} must be a non-negative number", field),
    );
}

/// Validate that `id` looks like a recipe id (a UUID).
pub fn recipe_id(id: &str) -> RecipeResult<()> {
    Uuid::parse_str(id)
        .map(|_| ())
        .map_err(|_| RecipeError::Validation(format!("invalid recipe id format: {}", id)))
}
