//! Ingredient catalog for autocomplete.
//!
//! Collects every distinct ingredient across approved recipes. Dedup is
//! case-sensitive on the stored strings and happens before display
//! capitalization, so `"egg"` and `"Egg"` both come out as `"Egg"`.

use std::collections::BTreeSet;

use crate::error::RecipeResult;
use crate::models::{Recipe, RecipeStatus};
use crate::store::RecipeStore;

/// Distinct ingredients of the approved recipes in `recipes`, sorted by
/// their stored form and then capitalized for display.
///
/// Recipes in any other status are ignored.
pub fn distinct_ingredients<'a, I>(recipes: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Recipe>,
{
    let distinct: BTreeSet<&str> = recipes
        .into_iter()
        .filter(|r| r.status == RecipeStatus::Approved)
        .flat_map(|r| r.ingredients.iter().map(String::as_str))
        .collect();

    distinct.into_iter().map(capitalize_first).collect()
}

/// Upper-case the first character and leave the rest as is.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Catalog of every ingredient used by an approved recipe.
pub async fn distinct_approved_ingredients<S: RecipeStore + ?Sized>(
    store: &S,
) -> RecipeResult<Vec<String>> {
    let approved = store.list_by_status(RecipeStatus::Approved).await?;
    Ok(distinct_ingredients(&approved))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;
    use crate::testing::recipe;

    #[test]
    fn test_capitalize_first() {
        assert_eq!(capitalize_first("olive oil"), "Olive oil");
        assert_eq!(capitalize_first("BASIL"), "BASIL");
        assert_eq!(capitalize_first("éclair"), "Éclair");
        assert_eq!(capitalize_first(""), "");
    }

    #[test]
    fn test_sorted_and_deduplicated() {
        let recipes = vec![
            recipe("A", &["sugar", "flour", "egg"], RecipeStatus::Approved),
            recipe("B", &["egg", "butter"], RecipeStatus::Approved),
        ];
        assert_eq!(
            distinct_ingredients(&recipes),
            vec!["Butter", "Egg", "Flour", "Sugar"]
        );
    }

    #[test]
    fn test_case_sensitive_dedup_before_capitalizing() {
        let recipes = vec![recipe("A", &["egg", "Egg"], RecipeStatus::Approved)];
        // Byte order puts "Egg" before "egg".
        assert_eq!(distinct_ingredients(&recipes), vec!["Egg", "Egg"]);
    }

    #[test]
    fn test_non_approved_excluded() {
        let recipes = vec![
            recipe("A", &["salt"], RecipeStatus::Approved),
            recipe("P", &["saffron"], RecipeStatus::Pending),
            recipe("R", &["truffle"], RecipeStatus::Rejected),
        ];
        assert_eq!(distinct_ingredients(&recipes), vec!["Salt"]);
    }

    #[tokio::test]
    async fn test_empty_catalog() {
        let store = InMemoryStore::new();
        assert!(distinct_approved_ingredients(&store).await.unwrap().is_empty());

        store
            .insert(&recipe("P", &["saffron"], RecipeStatus::Pending))
            .await
            .unwrap();
        assert!(distinct_approved_ingredients(&store).await.unwrap().is_empty());
    }
}
