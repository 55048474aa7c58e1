//! # Pantry Core
//!
//! Shared logic for Pantry: the recipe model, free-text normalizers,
//! ingredient-match ranking, the moderation state machine, the ingredient
//! catalog, and the [`store::RecipeStore`] abstraction.
//!
//! This crate contains no tokio, sqlx, or filesystem I/O. Everything that
//! touches storage goes through the store trait, so the algorithms can be
//! exercised against [`store::memory::InMemoryStore`].

pub mod catalog;
pub mod error;
pub mod models;
pub mod moderation;
pub mod normalize;
pub mod recipes;
pub mod search;
pub mod store;
pub mod validate;

pub use error::{RecipeError, RecipeResult};
pub use models::{Recipe, RecipeChanges, RecipeEdit, RecipeStatus, RecipeSubmission};
