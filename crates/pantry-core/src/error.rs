//! Error taxonomy for recipe operations.
//!
//! Normalizers never fail. Everything else reports one of these variants;
//! store failures are carried through unchanged as [`RecipeError::Store`].

use thiserror::Error;

use crate::models::RecipeStatus;

#[derive(Error, Debug)]
pub enum RecipeError {
    /// Malformed or missing required input.
    #[error("invalid input: {0}")]
    Validation(String),

    /// The referenced recipe does not exist.
    #[error("recipe not found: {0}")]
    NotFound(String),

    /// A moderation transition into the recipe's current status.
    #[error("invalid status transition: recipe is already {current} (requested {requested})")]
    InvalidTransition {
        current: RecipeStatus,
        requested: RecipeStatus,
    },

    /// The storage backend failed.
    #[error("store error: {0}")]
    Store(#[from] anyhow::Error),
}

impl RecipeError {
    /// Machine-readable code for CLI and JSON output.
    pub fn code(&self) -> &'static str {
        match self {
            RecipeError::Validation(_) => "validation",
            RecipeError::NotFound(_) => "not_found",
            RecipeError::InvalidTransition { .. } => "invalid_transition",
            RecipeError::Store(_) => "store",
        }
    }
}

pub type RecipeResult<T> = std::result::Result<T, RecipeError>;
