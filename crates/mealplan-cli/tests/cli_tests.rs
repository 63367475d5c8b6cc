use std::{fs, path::Path};

use assert_cmd::Command;
use mealplan_core::{validate_and_clean, Database, PlanEntryCandidate, Weekday};
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper function to create a temporary directory for CLI tests
fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Command with --no-color, run inside `dir` with no model credentials.
fn mealplan_cmd(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("mealplan").expect("Failed to find mealplan binary");
    cmd.current_dir(dir)
        .env_remove("OPENAI_API_KEY")
        .env_remove("MEALPLAN_DB_PATH")
        .arg("--no-color");
    cmd
}

/// Stores a current plan and one history entry directly in the database.
fn seed_plan(db_path: &Path) {
    let candidates = Weekday::ALL
        .iter()
        .map(|day| PlanEntryCandidate {
            day: day.as_str().to_string(),
            meal: format!("{day} shakshuka"),
            rationale: "Eggs and tomatoes, ready in 20 minutes".to_string(),
            recipe: "Soften onions\nAdd tomatoes, spiced\nPoach eggs".to_string(),
            nutritional_value: "22g protein".to_string(),
        })
        .collect();
    let plan = validate_and_clean(candidates).expect("Failed to build plan");

    let mut db = Database::new(db_path).expect("Failed to open database");
    db.save_current(&plan).expect("Failed to save plan");
    db.append_history(&plan, "quick dinners", "Mediterranean Diet")
        .expect("Failed to append history");
}

#[test]
fn test_cli_lists_diets() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    mealplan_cmd(temp_dir.path())
        .args(["--database-file", db_path.to_str().unwrap(), "diets"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. Mediterranean Diet"))
        .stdout(predicate::str::contains("Custom Diet"));

    assert!(!db_path.exists());
}

#[test]
fn test_cli_empty_history() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    mealplan_cmd(temp_dir.path())
        .args(["--database-file", db_path.to_str().unwrap(), "history"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No saved plans found."));

    assert!(!db_path.exists());
}

#[test]
fn test_cli_show_without_plan() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    mealplan_cmd(temp_dir.path())
        .args(["--database-file", db_path.to_str().unwrap(), "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No current plan found."));
}

#[test]
fn test_cli_show_and_history_with_stored_plan() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    seed_plan(&db_path);
    let db_arg = db_path.to_str().unwrap();

    mealplan_cmd(temp_dir.path())
        .args(["--database-file", db_arg, "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Weekday Meal Plan"))
        .stdout(predicate::str::contains("## Monday: Monday shakshuka"))
        .stdout(predicate::str::contains("2. Add tomatoes, spiced"));

    mealplan_cmd(temp_dir.path())
        .args(["--database-file", db_arg, "history", "--limit", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Plan History"))
        .stdout(predicate::str::contains("## 1. quick dinners"))
        .stdout(predicate::str::contains("- Diet: Mediterranean Diet"));
}

#[test]
fn test_cli_history_limit_out_of_range() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    mealplan_cmd(temp_dir.path())
        .args(["--database-file", db_path.to_str().unwrap(), "history", "--limit", "0"])
        .assert()
        .failure();
}

#[test]
fn test_cli_export_current_plan() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let csv_path = temp_dir.path().join("exports").join("plan.csv");
    seed_plan(&db_path);

    mealplan_cmd(temp_dir.path())
        .args([
            "--database-file",
            db_path.to_str().unwrap(),
            "export",
            csv_path.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported current plan"));

    let csv = fs::read_to_string(&csv_path).expect("Failed to read export");
    assert!(csv.starts_with("day,meal,rationale,recipe,nutritional_value\n"));
    assert!(csv.contains("Friday,Friday shakshuka,"));
    assert!(csv.contains("\"Soften onions\nAdd tomatoes, spiced\nPoach eggs\""));
}

#[test]
fn test_cli_export_without_plan_fails() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    mealplan_cmd(temp_dir.path())
        .args([
            "--database-file",
            db_path.to_str().unwrap(),
            "export",
            "plan.csv",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No current plan to export"));
}

#[test]
fn test_cli_generate_without_api_key() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    mealplan_cmd(temp_dir.path())
        .args([
            "--database-file",
            db_arg,
            "generate",
            "--item",
            "chickpeas",
            "--goal",
            "more protein",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to generate meal plan"))
        .stderr(predicate::str::contains("OPENAI_API_KEY"));

    mealplan_cmd(temp_dir.path())
        .args(["--database-file", db_arg, "history"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No saved plans found."));
}

#[test]
fn test_cli_generate_rejects_unknown_diet() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    mealplan_cmd(temp_dir.path())
        .args([
            "--database-file",
            db_path.to_str().unwrap(),
            "generate",
            "--goal",
            "more protein",
            "--diet",
            "Moon Diet",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("preprocess stage failed"));
}
