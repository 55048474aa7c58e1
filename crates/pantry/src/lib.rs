//! # Pantry
//!
//! **A moderated recipe catalog with ingredient-based search.**
//!
//! Users submit recipes as free text. Submissions are normalized into
//! canonical ingredient and instruction lists and wait in a moderation
//! queue. Once approved, a recipe becomes searchable: given the
//! ingredients someone has on hand, Pantry ranks approved recipes by the
//! share of their ingredients that are covered.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌────────────────┐   ┌──────────┐
//! │  Submission  │──▶│  Normalizers   │──▶│  SQLite  │
//! └──────────────┘   └────────────────┘   └────┬─────┘
//!                                              │
//!        ┌──────────────────┬──────────────────┤
//!        ▼                  ▼                  ▼
//!  ┌────────────┐    ┌──────────────┐    ┌───────────┐
//!  │ Moderation │    │ Match scorer │    │  Catalog  │
//!  └────────────┘    └──────────────┘    └───────────┘
//! ```
//!
//! The algorithms live in `pantry-core` and only see the
//! [`RecipeStore`](pantry_core::store::RecipeStore) trait. This crate
//! supplies the SQLite backend, configuration, logging, and the `pantry`
//! CLI.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing and validation |
//! | [`db`] | SQLite connection pool with WAL mode |
//! | [`migrate`] | Database schema migrations (idempotent) |
//! | [`sqlite_store`] | SQLite implementation of `RecipeStore` |
//! | [`logging`] | `tracing` subscriber setup |
//! | [`recipes`] | Submit, get, edit, delete, list, moderation queue |
//! | [`moderate`] | Status transitions |
//! | [`search`] | Ingredient search and ingredient catalog |

pub mod config;
pub mod db;
pub mod logging;
pub mod migrate;
pub mod moderate;
pub mod recipes;
pub mod search;
pub mod sqlite_store;

pub use pantry_core::store;
pub use pantry_core::{Recipe, RecipeError, RecipeStatus};
