//! # Pantry CLI (`pantry`)
//!
//! The `pantry` binary drives every recipe operation: submission, edits,
//! moderation, ingredient search, and the ingredient catalog.
//!
//! ## Usage
//!
//! ```bash
//! pantry --config ./config/pantry.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `pantry init` | Create the SQLite database and run schema migrations |
//! | `pantry submit` | Submit a recipe (stored as pending) |
//! | `pantry get <id>` | Show a recipe |
//! | `pantry edit <id>` | Edit recipe fields (never the status) |
//! | `pantry delete <id>` | Delete a recipe |
//! | `pantry list` | List recipes, by status and/or owner |
//! | `pantry queue` | List recipes awaiting moderation |
//! | `pantry moderate <id> <status>` | Move a recipe to pending, approved, or rejected |
//! | `pantry search "<ingredients>"` | Rank approved recipes by ingredient coverage |
//! | `pantry ingredients` | List every ingredient in the approved catalog |
//! | `pantry normalize <kind> "<text>"` | Preview normalization without a database |
//!
//! ## Examples
//!
//! ```bash
//! pantry init
//! pantry submit --owner alice --title Pancakes \
//!     --ingredients "flour, egg, milk" --instructions "Mix, Fry" --servings 2
//! pantry moderate 550e8400-e29b-41d4-a716-446655440000 approved
//! pantry search "flour, egg"
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use pantry::{config, logging, migrate, moderate, recipes, search};
use pantry_core::models::{RecipeEdit, RecipeStatus, RecipeSubmission};
use pantry_core::normalize::{normalize_ingredients, normalize_instructions};

/// Pantry CLI: a moderated recipe catalog with ingredient-based search.
#[derive(Parser)]
#[command(
    name = "pantry",
    about = "Pantry: a moderated recipe catalog with ingredient-based search",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/pantry.toml")]
    config: PathBuf,

    /// Print results as JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Initialize the database schema.
    ///
    /// Idempotent: running it multiple times is safe.
    Init,

    /// Submit a new recipe.
    ///
    /// Ingredients and instructions are free text; separate entries with
    /// newlines or commas. Ingredients may also be separated by runs of
    /// two or more spaces. The recipe starts out pending.
    Submit {
        /// Id of the submitting user.
        #[arg(long)]
        owner: String,

        #[arg(long)]
        title: String,

        #[arg(long)]
        ingredients: String,

        #[arg(long)]
        instructions: Option<String>,

        /// Preparation time in minutes.
        #[arg(long, default_value_t = 0)]
        prep_time: u32,

        /// Cooking time in minutes.
        #[arg(long, default_value_t = 0)]
        cook_time: u32,

        #[arg(long)]
        servings: u32,

        /// Total calories for the whole recipe.
        #[arg(long)]
        calories: Option<f64>,

        /// Defaults to `[recipes].default_calories_per_serving`.
        #[arg(long)]
        calories_per_serving: Option<f64>,

        /// Reference to an already stored image (URL or path).
        #[arg(long)]
        image: Option<String>,
    },

    /// Show a recipe by id.
    Get { id: String },

    /// Edit a recipe. Only the given fields change.
    Edit {
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        ingredients: Option<String>,

        #[arg(long)]
        instructions: Option<String>,

        #[arg(long)]
        prep_time: Option<u32>,

        #[arg(long)]
        cook_time: Option<u32>,

        #[arg(long)]
        servings: Option<u32>,

        #[arg(long)]
        calories: Option<f64>,

        #[arg(long)]
        calories_per_serving: Option<f64>,

        #[arg(long)]
        image: Option<String>,
    },

    /// Delete a recipe.
    Delete { id: String },

    /// List recipes.
    List {
        /// Only recipes in this status.
        #[arg(long)]
        status: Option<RecipeStatus>,

        /// Only recipes submitted by this user.
        #[arg(long)]
        owner: Option<String>,
    },

    /// List recipes awaiting moderation (pending or rejected).
    Queue,

    /// Move a recipe to a new moderation status.
    Moderate {
        id: String,

        /// `pending`, `approved`, or `rejected`.
        status: RecipeStatus,
    },

    /// Rank approved recipes by how many of their ingredients you have.
    Search {
        /// Comma-separated ingredients, e.g. "flour, egg, milk".
        query: String,

        /// Maximum number of results to return.
        #[arg(long)]
        limit: Option<usize>,
    },

    /// List every ingredient used by an approved recipe.
    Ingredients,

    /// Show how text would be normalized. Needs no config or database.
    Normalize {
        kind: NormalizeKind,
        text: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum NormalizeKind {
    Ingredients,
    Instructions,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Commands that don't require config
    if let Commands::Normalize { kind, text } = &cli.command {
        let items = match kind {
            NormalizeKind::Ingredients => normalize_ingredients(Some(text.as_str())),
            NormalizeKind::Instructions => normalize_instructions(Some(text.as_str())),
        };
        if cli.json {
            recipes::print_json(&items)?;
        } else {
            for item in &items {
                println!("{}", item);
            }
        }
        return Ok(());
    }

    let cfg = config::load_config(&cli.config)?;
    logging::init(&cfg.logging)?;

    let json = cli.json;
    match cli.command {
        Commands::Init => {
            migrate::run_migrations(&cfg).await?;
            println!("Database initialized successfully.");
        }
        Commands::Submit {
            owner,
            title,
            ingredients,
            instructions,
            prep_time,
            cook_time,
            servings,
            calories,
            calories_per_serving,
            image,
        } => {
            let submission = RecipeSubmission {
                owner_id: owner,
                title,
                ingredients: Some(ingredients),
                instructions,
                prep_time,
                cook_time,
                servings,
                calories,
                calories_per_serving,
                image,
            };
            recipes::run_submit(&cfg, submission, json).await?;
        }
        Commands::Get { id } => {
            recipes::run_get(&cfg, &id, json).await?;
        }
        Commands::Edit {
            id,
            title,
            ingredients,
            instructions,
            prep_time,
            cook_time,
            servings,
            calories,
            calories_per_serving,
            image,
        } => {
            let edit = RecipeEdit {
                title,
                ingredients,
                instructions,
                prep_time,
                cook_time,
                servings,
                calories,
                calories_per_serving,
                image,
            };
            recipes::run_edit(&cfg, &id, edit, json).await?;
        }
        Commands::Delete { id } => {
            recipes::run_delete(&cfg, &id).await?;
        }
        Commands::List { status, owner } => {
            recipes::run_list(&cfg, owner.as_deref(), status, json).await?;
        }
        Commands::Queue => {
            recipes::run_queue(&cfg, json).await?;
        }
        Commands::Moderate { id, status } => {
            moderate::run_moderate(&cfg, &id, status, json).await?;
        }
        Commands::Search { query, limit } => {
            search::run_search(&cfg, &query, limit, json).await?;
        }
        Commands::Ingredients => {
            search::run_ingredients(&cfg, json).await?;
        }
        Commands::Normalize { .. } => {
            // Handled above (before config loading)
            unreachable!()
        }
    }

    Ok(())
}
