//! Recipe moderation state machine.
//!
//! Three states, every pair connected in both directions:
//!
//! ```text
//!            ┌──────────┐
//!      ┌────▶│ approved │◀────┐
//!      │     └──────────┘     │
//!      ▼                      ▼
//! ┌─────────┐           ┌──────────┐
//! │ pending │◀─────────▶│ rejected │
//! └─────────┘           └──────────┘
//! ```
//!
//! A transition into the state a recipe is already in is refused with
//! [`RecipeError::InvalidTransition`]. A transition writes `status` and
//! nothing else. The pending/approved/rejected views are filters over the
//! store, never separate collections, so they always partition the set.

use tracing::{debug, info};

use crate::error::{RecipeError, RecipeResult};
use crate::models::{Recipe, RecipeStatus};
use crate::store::RecipeStore;
use crate::validate;

/// Attempts before a transition that keeps losing compare-and-set races
/// gives up.
const MAX_TRANSITION_ATTEMPTS: usize = 5;

/// Check that `current → target` is a legal move.
pub fn check_transition(current: RecipeStatus, target: RecipeStatus) -> RecipeResult<()> {
    if current == target {
        return Err(RecipeError::InvalidTransition {
            current,
            requested: target,
        });
    }
    Ok(())
}

/// Move the recipe `id` into `target` and return the updated record.
///
/// The read, the legality check, and the write form one compare-and-set
/// cycle: if another moderator changed the status in between, the new
/// status is re-read and re-checked.
pub async fn transition_status<S: RecipeStore + ?Sized>(
    store: &S,
    id: &str,
    target: RecipeStatus,
) -> RecipeResult<Recipe> {
    validate::recipe_id(id)?;

    for attempt in 1..=MAX_TRANSITION_ATTEMPTS {
        let current = store
            .get(id)
            .await?
            .ok_or_else(|| RecipeError::NotFound(id.to_string()))?
            .status;

        check_transition(current, target)?;

        if let Some(updated) = store.set_status_if(id, current, target).await? {
            info!(recipe_id = id, from = %current, to = %target, "recipe status changed");
            return Ok(updated);
        }
        debug!(recipe_id = id, attempt, "status changed concurrently, retrying");
    }

    Err(RecipeError::Store(anyhow::anyhow!(
        "recipe {} kept changing status; gave up after {} attempts",
        id,
        MAX_TRANSITION_ATTEMPTS
    )))
}

pub async fn approve<S: RecipeStore + ?Sized>(store: &S, id: &str) -> RecipeResult<Recipe> {
    transition_status(store, id, RecipeStatus::Approved).await
}

pub async fn reject<S: RecipeStore + ?Sized>(store: &S, id: &str) -> RecipeResult<Recipe> {
    transition_status(store, id, RecipeStatus::Rejected).await
}

/// Send a recipe back to the pending queue.
pub async fn reset_to_pending<S: RecipeStore + ?Sized>(
    store: &S,
    id: &str,
) -> RecipeResult<Recipe> {
    transition_status(store, id, RecipeStatus::Pending).await
}

/// Recipes awaiting a moderator: everything not approved, in read order.
pub async fn moderation_queue<S: RecipeStore + ?Sized>(store: &S) -> RecipeResult<Vec<Recipe>> {
    let all = store.list_all().await?;
    Ok(all
        .into_iter()
        .filter(|r| r.status != RecipeStatus::Approved)
        .collect())
}
