mod common;

use std::fs;

use common::{create_test_planner, plan_json, sample_input, weekday_json, StubModel};
use mealplan_core::{
    MealPlanError, MealPlannerBuilder, ModelSettings, PlanViolation, Stage, Weekday,
};
use tempfile::TempDir;

#[tokio::test]
async fn test_fenced_response_is_persisted() {
    let raw = format!("Here is your plan:\n```json\n{}\n```\nEnjoy!", weekday_json());
    let model = StubModel::new(raw);
    let (_temp_dir, planner) = create_test_planner(model.clone(), None).await;

    let generated = planner.run(&sample_input()).await.expect("pipeline succeeds");

    assert_eq!(model.calls(), 1);
    let days: Vec<Weekday> = generated.plan.iter().map(|entry| entry.day).collect();
    assert_eq!(days, Weekday::ALL.to_vec());
    assert_eq!(generated.plan[Weekday::Monday].recipe, "Rinse lentils\nSimmer 20 minutes");
    assert_eq!(generated.database_path, planner.database_path());
    assert!(generated.csv_path.is_none());

    let current = planner
        .current_plan()
        .await
        .expect("load current")
        .expect("plan stored");
    assert_eq!(current, generated.plan);

    let history = planner.list_history(10).await.expect("history");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].id, generated.history_id);
    assert_eq!(history[0].weekly_goal.as_deref(), Some("more fibre"));
    assert_eq!(history[0].diet_descriptor.as_deref(), Some("No Specific Diet"));
}

#[tokio::test]
async fn test_second_run_replaces_current_and_extends_history() {
    let model = StubModel::new(weekday_json());
    let (_temp_dir, planner) = create_test_planner(model, None).await;

    let first = planner.run(&sample_input()).await.expect("first run");
    let second = planner.run(&sample_input()).await.expect("second run");

    assert!(second.history_id > first.history_id);
    let history = planner.list_history(10).await.expect("history");
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].id, second.history_id);
}

#[tokio::test]
async fn test_four_entries_fail_without_persisting() {
    let model = StubModel::new(plan_json(&["Monday", "Tuesday", "Wednesday", "Thursday"]));
    let (_temp_dir, planner) = create_test_planner(model, None).await;

    let err = planner.run(&sample_input()).await.unwrap_err();

    assert_eq!(err.stage, Stage::Generate);
    assert!(err.to_string().contains("exactly five"));
    assert!(err.source.raw_output().is_some());
    assert!(planner.current_plan().await.expect("load").is_none());
    assert!(planner.list_history(10).await.expect("history").is_empty());
}

#[tokio::test]
async fn test_duplicate_day_is_a_validation_failure() {
    let model = StubModel::new(plan_json(&["Monday", "Tuesday", "Tuesday", "Thursday", "Friday"]));
    let (_temp_dir, planner) = create_test_planner(model, None).await;

    let err = planner.run(&sample_input()).await.unwrap_err();

    assert_eq!(err.stage, Stage::Validate);
    assert!(matches!(
        err.source,
        MealPlanError::Validation(PlanViolation::DuplicateDay {
            day: Weekday::Tuesday
        })
    ));
    assert!(planner.list_history(10).await.expect("history").is_empty());
}

#[tokio::test]
async fn test_weekend_day_is_rejected() {
    let model = StubModel::new(plan_json(&["Monday", "Tuesday", "Saturday", "Thursday", "Friday"]));
    let (_temp_dir, planner) = create_test_planner(model, None).await;

    let err = planner.run(&sample_input()).await.unwrap_err();

    assert_eq!(err.stage, Stage::Validate);
    assert!(err.to_string().contains("invalid day entry encountered: 'Saturday'"));
}

#[tokio::test]
async fn test_invalid_input_is_a_client_error() {
    let model = StubModel::new(weekday_json());
    let (_temp_dir, planner) = create_test_planner(model.clone(), None).await;

    let mut input = sample_input();
    input.weekly_goal = "   ".to_string();
    let err = planner.run(&input).await.unwrap_err();

    assert_eq!(err.stage, Stage::Preprocess);
    assert!(err.is_client_error());
    assert_eq!(model.calls(), 0);
}

#[tokio::test]
async fn test_missing_api_key_fails_at_generate_stage() {
    let temp_dir = TempDir::new().expect("temp dir");
    let planner = MealPlannerBuilder::new()
        .with_database_path(Some(temp_dir.path().join("test.db")))
        .with_model_settings(ModelSettings::default())
        .build()
        .await
        .expect("planner");

    let err = planner.run(&sample_input()).await.unwrap_err();

    assert_eq!(err.stage, Stage::Generate);
    assert!(matches!(err.source, MealPlanError::Configuration { .. }));
    assert!(err.to_string().contains("OPENAI_API_KEY"));
    assert!(!err.is_client_error());
}

#[tokio::test]
async fn test_output_dir_receives_artifacts() {
    let output = TempDir::new().expect("output dir");
    let model = StubModel::new(weekday_json());
    let (_temp_dir, planner) = create_test_planner(model, Some(output.path())).await;

    let generated = planner.run(&sample_input()).await.expect("pipeline succeeds");

    let csv_path = generated.csv_path.expect("csv exported");
    let csv = fs::read_to_string(&csv_path).expect("read csv");
    assert!(csv.starts_with("day,meal,rationale,recipe,nutritional_value\n"));
    assert!(csv.contains("\"Rinse lentils\nSimmer 20 minutes\""));

    for name in [
        "available_items.csv",
        "weekly_preferences.csv",
        "prompt.txt",
        "model_output.txt",
    ] {
        assert!(output.path().join(name).exists(), "missing {name}");
    }
    let raw = fs::read_to_string(output.path().join("model_output.txt")).expect("raw output");
    assert_eq!(raw, weekday_json());
}

#[tokio::test]
async fn test_reads_on_fresh_location_do_not_create_store() {
    let model = StubModel::new(weekday_json());
    let (temp_dir, planner) = create_test_planner(model, None).await;
    let db_path = temp_dir.path().join("test.db");

    assert!(!db_path.exists());
    assert!(planner.list_history(5).await.expect("history").is_empty());
    assert!(planner.current_plan().await.expect("current").is_none());
    assert!(!db_path.exists());

    planner.run(&sample_input()).await.expect("pipeline succeeds");
    assert!(db_path.exists());
}

#[tokio::test]
async fn test_failed_export_leaves_store_untouched() {
    let output = TempDir::new().expect("output dir");
    fs::create_dir(output.path().join("weekday_plan.csv")).expect("blocking directory");
    let model = StubModel::new(weekday_json());
    let (_temp_dir, planner) = create_test_planner(model, Some(output.path())).await;

    let err = planner.run(&sample_input()).await.unwrap_err();

    assert_eq!(err.stage, Stage::Export);
    assert!(matches!(err.source, MealPlanError::FileSystem { .. }));
    assert!(planner.current_plan().await.expect("load").is_none());
    assert!(planner.list_history(10).await.expect("history").is_empty());
}
