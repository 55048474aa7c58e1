use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn pantry_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("pantry");
    path
}

fn setup_test_env() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    let config_dir = root.join("config");
    fs::create_dir_all(&config_dir).unwrap();

    let config_content = format!(
        r#"[db]
path = "{}/data/pantry.sqlite"

[search]
min_match_percent = 40.0

[logging]
level = "warn"
"#,
        root.display()
    );

    let config_path = config_dir.join("pantry.toml");
    fs::write(&config_path, config_content).unwrap();

    (tmp, config_path)
}

fn run_pantry(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = pantry_binary();
    let output = Command::new(&binary)
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap_or_else(|e| panic!("Failed to run pantry binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();
    (stdout, stderr, success)
}

fn run_json(config_path: &Path, args: &[&str]) -> serde_json::Value {
    let mut full = vec!["--json"];
    full.extend_from_slice(args);
    let (stdout, stderr, success) = run_pantry(config_path, &full);
    assert!(success, "{:?} failed: stdout={}, stderr={}", args, stdout, stderr);
    serde_json::from_str(&stdout)
        .unwrap_or_else(|e| panic!("invalid JSON from {:?}: {}: {}", args, e, stdout))
}

/// Submit a recipe and return its id.
fn submit(config_path: &Path, owner: &str, title: &str, ingredients: &str) -> String {
    let recipe = run_json(
        config_path,
        &[
            "submit",
            "--owner",
            owner,
            "--title",
            title,
            "--ingredients",
            ingredients,
            "--instructions",
            "Mix,Cook\nServe",
            "--servings",
            "2",
        ],
    );
    recipe["id"].as_str().unwrap().to_string()
}

fn approve(config_path: &Path, id: &str) {
    let (stdout, stderr, success) = run_pantry(config_path, &["moderate", id, "approved"]);
    assert!(success, "approve failed: stdout={}, stderr={}", stdout, stderr);
}

#[test]
fn test_init_creates_database() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) = run_pantry(&config_path, &["init"]);
    assert!(success, "init failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("initialized"));
}

#[test]
fn test_init_idempotent() {
    let (_tmp, config_path) = setup_test_env();

    let (_, _, success1) = run_pantry(&config_path, &["init"]);
    assert!(success1, "First init failed");

    let (_, _, success2) = run_pantry(&config_path, &["init"]);
    assert!(success2, "Second init failed (not idempotent)");
}

#[test]
fn test_missing_config_fails() {
    let tmp = TempDir::new().unwrap();
    let (_, stderr, success) = run_pantry(&tmp.path().join("nope.toml"), &["init"]);
    assert!(!success);
    assert!(stderr.contains("Failed to read config file"));
}

#[test]
fn test_normalize_needs_no_config() {
    let tmp = TempDir::new().unwrap();
    let (stdout, stderr, success) = run_pantry(
        &tmp.path().join("nope.toml"),
        &["normalize", "ingredients", "Tomato, Onion\n  Garlic   Salt, Tomato"],
    );
    assert!(success, "normalize failed: {}", stderr);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec!["Tomato", "Onion", "Garlic", "Salt"]);
}

#[test]
fn test_submit_starts_pending_and_normalizes() {
    let (_tmp, config_path) = setup_test_env();
    run_pantry(&config_path, &["init"]);

    let id = submit(&config_path, "alice", "Omelette", "egg, egg, Egg\nbutter  salt");
    let recipe = run_json(&config_path, &["get", &id]);

    assert_eq!(recipe["status"], "pending");
    assert_eq!(recipe["owner_id"], "alice");
    assert_eq!(
        recipe["ingredients"],
        serde_json::json!(["egg", "Egg", "butter", "salt"])
    );
    assert_eq!(
        recipe["instructions"],
        serde_json::json!(["Mix", "Cook", "Serve"])
    );
    assert_eq!(recipe["calories_per_serving"], 2.0);
}

#[test]
fn test_submit_without_ingredients_fails() {
    let (_tmp, config_path) = setup_test_env();
    run_pantry(&config_path, &["init"]);

    let (_, stderr, success) = run_pantry(
        &config_path,
        &[
            "submit",
            "--owner",
            "alice",
            "--title",
            "Air",
            "--ingredients",
            " , \n ",
            "--servings",
            "1",
        ],
    );
    assert!(!success);
    assert!(stderr.contains("ingredients must contain at least one entry"));
}

#[test]
fn test_search_ranks_approved_recipes() {
    let (_tmp, config_path) = setup_test_env();
    run_pantry(&config_path, &["init"]);

    let b = submit(&config_path, "bob", "Cake", "flour, sugar, butter, egg");
    let a = submit(&config_path, "alice", "Crepes", "flour, egg, milk");
    let pending = submit(&config_path, "carol", "Flour Egg", "flour, egg");
    approve(&config_path, &b);
    approve(&config_path, &a);

    let results = run_json(&config_path, &["search", "Flour, EGG"]);
    let results = results.as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["title"], "Crepes");
    assert_eq!(results[1]["title"], "Cake");
    let pct = results[0]["match_percentage"].as_f64().unwrap();
    assert!((pct - 200.0 / 3.0).abs() < 1e-6);
    assert_eq!(results[1]["match_percentage"].as_f64().unwrap(), 50.0);
    assert!(results.iter().all(|r| r["id"] != pending.as_str()));

    let (stdout, _, _) = run_pantry(&config_path, &["search", "flour, egg", "--limit", "1"]);
    assert!(stdout.contains("1. [66.7%] Crepes"));
    assert!(!stdout.contains("Cake"));
}

#[test]
fn test_search_below_threshold_returns_nothing() {
    let (_tmp, config_path) = setup_test_env();
    run_pantry(&config_path, &["init"]);

    let id = submit(&config_path, "alice", "Stew", "beef, carrot, onion");
    approve(&config_path, &id);

    let (stdout, stderr, success) = run_pantry(&config_path, &["search", "beef"]);
    assert!(success, "search failed: {}", stderr);
    assert!(stdout.contains("No results."));
}

#[test]
fn test_empty_search_query_is_rejected() {
    let (_tmp, config_path) = setup_test_env();
    run_pantry(&config_path, &["init"]);

    let (_, stderr, success) = run_pantry(&config_path, &["search", " , "]);
    assert!(!success);
    assert!(stderr.contains("invalid input"));
}

#[test]
fn test_moderation_lifecycle() {
    let (_tmp, config_path) = setup_test_env();
    run_pantry(&config_path, &["init"]);

    let id = submit(&config_path, "alice", "Soup", "water, stone");

    let queue = run_json(&config_path, &["queue"]);
    assert_eq!(queue.as_array().unwrap().len(), 1);

    approve(&config_path, &id);
    let (_, stderr, success) = run_pantry(&config_path, &["moderate", &id, "approved"]);
    assert!(!success, "re-approval should fail");
    assert!(stderr.contains("already approved"));

    let recipe = run_json(&config_path, &["moderate", &id, "rejected"]);
    assert_eq!(recipe["status"], "rejected");
    let recipe = run_json(&config_path, &["moderate", &id, "pending"]);
    assert_eq!(recipe["status"], "pending");

    let approved = run_json(&config_path, &["list", "--status", "approved"]);
    assert!(approved.as_array().unwrap().is_empty());
    let pending = run_json(&config_path, &["list", "--status", "pending"]);
    assert_eq!(pending.as_array().unwrap().len(), 1);
}

#[test]
fn test_moderate_unknown_recipe() {
    let (_tmp, config_path) = setup_test_env();
    run_pantry(&config_path, &["init"]);

    let (_, stderr, success) = run_pantry(
        &config_path,
        &["moderate", "550e8400-e29b-41d4-a716-446655440000", "approved"],
    );
    assert!(!success);
    assert!(stderr.contains("recipe not found"));

    let (_, stderr, success) = run_pantry(&config_path, &["moderate", "abc", "approved"]);
    assert!(!success);
    assert!(stderr.contains("invalid recipe id format"));
}

#[test]
fn test_ingredient_catalog_only_approved() {
    let (_tmp, config_path) = setup_test_env();
    run_pantry(&config_path, &["init"]);

    let a = submit(&config_path, "alice", "Salad", "tomato, olive oil, basil");
    let b = submit(&config_path, "bob", "Bruschetta", "bread, tomato, basil");
    submit(&config_path, "carol", "Risotto", "saffron, rice");
    approve(&config_path, &a);
    approve(&config_path, &b);

    let (stdout, stderr, success) = run_pantry(&config_path, &["ingredients"]);
    assert!(success, "ingredients failed: {}", stderr);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec!["Basil", "Bread", "Olive oil", "Tomato"]);
}

#[test]
fn test_edit_and_delete() {
    let (_tmp, config_path) = setup_test_env();
    run_pantry(&config_path, &["init"]);

    let id = submit(&config_path, "alice", "Toast", "bread");
    approve(&config_path, &id);

    let recipe = run_json(
        &config_path,
        &["edit", &id, "--ingredients", "bread\nbutter", "--servings", "3"],
    );
    assert_eq!(recipe["ingredients"], serde_json::json!(["bread", "butter"]));
    assert_eq!(recipe["servings"], 3);
    assert_eq!(recipe["title"], "Toast");
    assert_eq!(recipe["status"], "approved", "edits must not touch status");

    let (_, stderr, success) = run_pantry(&config_path, &["edit", &id]);
    assert!(!success);
    assert!(stderr.contains("at least one field"));

    let (stdout, _, success) = run_pantry(&config_path, &["delete", &id]);
    assert!(success);
    assert!(stdout.contains("Deleted"));

    let (_, stderr, success) = run_pantry(&config_path, &["get", &id]);
    assert!(!success);
    assert!(stderr.contains("recipe not found"));
}

#[test]
fn test_list_by_owner() {
    let (_tmp, config_path) = setup_test_env();
    run_pantry(&config_path, &["init"]);

    let mine = submit(&config_path, "alice", "Mine", "a");
    submit(&config_path, "alice", "Also Mine", "b");
    submit(&config_path, "bob", "Not Mine", "c");
    approve(&config_path, &mine);

    let all_mine = run_json(&config_path, &["list", "--owner", "alice"]);
    assert_eq!(all_mine.as_array().unwrap().len(), 2);

    let my_approved = run_json(
        &config_path,
        &["list", "--owner", "alice", "--status", "approved"],
    );
    let my_approved = my_approved.as_array().unwrap();
    assert_eq!(my_approved.len(), 1);
    assert_eq!(my_approved[0]["id"], mine.as_str());

    let (stdout, _, _) = run_pantry(&config_path, &["list"]);
    assert!(stdout.contains("[approved]  Mine"));
    assert!(stdout.contains("[pending]  Not Mine"));
}
