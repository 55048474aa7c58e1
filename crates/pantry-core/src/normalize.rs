//! Free-text normalizers for ingredient and instruction input.
//!
//! Users paste ingredient lists in whatever shape their source had: one per
//! line, comma separated, or laid out in columns with runs of spaces. The
//! normalizers turn that into canonical lists. Both are total: malformed
//! text degrades to a shorter (possibly empty) list, never to an error.
//!
//! # Ingredient algorithm
//!
//! 1. Convert `\r\n` and lone `\r` line endings to `\n`.
//! 2. Split on `\n`, then split every piece on `,`, then split every piece
//!    on runs of two or more whitespace characters. A single space is part
//!    of the name (`olive oil` stays whole).
//! 3. Trim each token and collapse inner whitespace runs to one space.
//! 4. Drop empty tokens.
//! 5. Drop exact duplicates, keeping the first occurrence. Case is kept
//!    as typed; case folding only happens at match time.
//!
//! # Example
//!
//! ```rust
//! use pantry_core::normalize::normalize_ingredients;
//!
//! let items = normalize_ingredients(Some("Tomato, Onion\n  Garlic   Salt"));
//! assert_eq!(items, vec!["Tomato", "Onion", "Garlic", "Salt"]);
//! ```

use std::collections::HashSet;

/// Normalize raw ingredient text into a deduplicated, ordered list.
///
/// `None` and empty input both yield an empty list.
pub fn normalize_ingredients(raw: Option<&str>) -> Vec<String> {
    let raw = match raw {
        Some(r) if !r.is_empty() => r,
        _ => return Vec::new(),
    };

    let unified = unify_line_endings(raw);
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::new();

    for line in unified.split('\n') {
        for piece in line.split(',') {
            for token in split_on_wide_gaps(piece) {
                let cleaned = collapse_whitespace(token);
                if cleaned.is_empty() {
                    continue;
                }
                if seen.insert(cleaned.clone()) {
                    out.push(cleaned);
                }
            }
        }
    }

    out
}

/// Normalize raw instruction text into an ordered list of steps.
///
/// Splits once on commas and newlines and trims each step. Unlike
/// ingredients, repeated steps are kept: "stir" twice is a real recipe.
pub fn normalize_instructions(raw: Option<&str>) -> Vec<String> {
    let raw = match raw {
        Some(r) => r,
        None => return Vec::new(),
    };

    raw.split([',', '\n'])
        .map(str::trim)
        .filter(|step| !step.is_empty())
        .map(str::to_string)
        .collect()
}

fn unify_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Split on every run of two or more whitespace characters.
fn split_on_wide_gaps(text: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !c.is_whitespace() {
            continue;
        }
        let mut run = 1;
        let mut end = i + c.len_utf8();
        while let Some(&(j, next)) = chars.peek() {
            if !next.is_whitespace() {
                break;
            }
            run += 1;
            end = j + next.len_utf8();
            chars.next();
        }
        if run >= 2 {
            pieces.push(&text[start..i]);
            start = end;
        }
    }
    pieces.push(&text[start..]);

    pieces
}

fn collapse_whitespace(token: &str) -> String {
    token.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_and_empty_input() {
        assert!(normalize_ingredients(None).is_empty());
        assert!(normalize_ingredients(Some("")).is_empty());
        assert!(normalize_instructions(None).is_empty());
        assert!(normalize_instructions(Some("")).is_empty());
    }

    #[test]
    fn test_only_separators() {
        assert!(normalize_ingredients(Some(",,\n\r\n   ,  \t\n")).is_empty());
        assert!(normalize_instructions(Some(" , \n,, ")).is_empty());
    }

    #[test]
    fn test_mixed_separators() {
        let items = normalize_ingredients(Some("Tomato, Onion\n  Garlic   Salt"));
        assert_eq!(items, vec!["Tomato", "Onion", "Garlic", "Salt"]);
    }

    #[test]
    fn test_single_space_kept_inside_name() {
        let items = normalize_ingredients(Some("olive oil, sea salt"));
        assert_eq!(items, vec!["olive oil", "sea salt"]);
    }

    #[test]
    fn test_tab_run_splits_but_single_tab_collapses() {
        let items = normalize_ingredients(Some("brown\tsugar\t\tbutter"));
        assert_eq!(items, vec!["brown sugar", "butter"]);
    }

    #[test]
    fn test_crlf_and_lone_cr() {
        let items = normalize_ingredients(Some("flour\r\neggs\rmilk"));
        assert_eq!(items, vec!["flour", "eggs", "milk"]);
    }

    #[test]
    fn test_dedup_is_case_sensitive() {
        let items = normalize_ingredients(Some("egg, egg, Egg"));
        assert_eq!(items, vec!["egg", "Egg"]);
    }

    #[test]
    fn test_dedup_keeps_first_occurrence_order() {
        let items = normalize_ingredients(Some("salt\npepper\nsalt\nthyme\npepper"));
        assert_eq!(items, vec!["salt", "pepper", "thyme"]);
    }

    #[test]
    fn test_output_is_clean() {
        let inputs = [
            "  a  ,b ,,\n\n c c  ",
            "\t\tx\t y \r\n z,  ,  w",
            "one , two  three\r\nfour",
            "ünïcödé  näme , ünïcödé näme",
        ];
        for input in inputs {
            let items = normalize_ingredients(Some(input));
            let mut seen = HashSet::new();
            for item in &items {
                assert!(!item.is_empty(), "empty item from {:?}", input);
                assert_eq!(item.trim(), item, "untrimmed item from {:?}", input);
                assert!(!item.contains("  "), "doubled space in {:?}", item);
                assert!(seen.insert(item.clone()), "duplicate {:?}", item);
            }
        }
    }

    #[test]
    fn test_idempotent_through_newline_join() {
        let inputs = [
            "Tomato, Onion\n  Garlic   Salt",
            "egg, egg, Egg",
            " olive   oil ,\r\n\r\nbasil leaves\t\tpine nuts",
            "",
        ];
        for input in inputs {
            let once = normalize_ingredients(Some(input));
            let twice = normalize_ingredients(Some(&once.join("\n")));
            assert_eq!(once, twice, "not idempotent for {:?}", input);
        }
    }

    #[test]
    fn test_instructions_keep_duplicates_and_order() {
        let steps = normalize_instructions(Some("Stir, Wait\nStir ,  Serve "));
        assert_eq!(steps, vec!["Stir", "Wait", "Stir", "Serve"]);
    }

    #[test]
    fn test_instructions_do_not_split_on_spaces() {
        let steps = normalize_instructions(Some("Preheat the oven    to 180C"));
        assert_eq!(steps, vec!["Preheat the oven    to 180C"]);
    }

    #[test]
    fn test_split_on_wide_gaps() {
        assert_eq!(split_on_wide_gaps("a  b c   d"), vec!["a", "b c", "d"]);
        assert_eq!(split_on_wide_gaps("  lead"), vec!["", "lead"]);
        assert_eq!(split_on_wide_gaps("none"), vec!["none"]);
    }
}
