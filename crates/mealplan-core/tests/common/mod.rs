#![allow(dead_code)]

use std::{
    path::Path,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

use async_trait::async_trait;
use mealplan_core::{
    CompletionRequest, MealPlanner, MealPlannerBuilder, PlanModel, Result, UserInput,
    NO_DIET_OPTION,
};
use tempfile::TempDir;

/// Model stub answering every request with canned text.
pub struct StubModel {
    response: String,
    calls: AtomicUsize,
}

impl StubModel {
    pub fn new(response: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            response: response.into(),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PlanModel for StubModel {
    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        assert!(request.prompt.contains("Monday through Friday"));
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.response.clone())
    }
}

/// A JSON array with one entry per listed day.
pub fn plan_json(days: &[&str]) -> String {
    let entries: Vec<String> = days
        .iter()
        .map(|day| {
            format!(
                r#"{{"day": "{day}", "meal": "{day} lentil soup", "rationale": "Warm and filling", "recipe": "Rinse lentils\nSimmer 20 minutes", "nutritional_value": "18g protein"}}"#
            )
        })
        .collect();
    format!("[{}]", entries.join(",\n"))
}

pub fn weekday_json() -> String {
    plan_json(&["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"])
}

pub fn sample_input() -> UserInput {
    UserInput {
        available_items: vec!["lentils".to_string(), "carrots".to_string()],
        weekly_goal: "more fibre".to_string(),
        diet_choice: NO_DIET_OPTION.to_string(),
        custom_diet_description: None,
    }
}

/// Helper function to create a test planner backed by `model`.
pub async fn create_test_planner(
    model: Arc<dyn PlanModel>,
    output_dir: Option<&Path>,
) -> (TempDir, MealPlanner) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let planner = MealPlannerBuilder::new()
        .with_database_path(Some(&db_path))
        .with_output_dir(output_dir)
        .with_model(model)
        .build()
        .await
        .expect("Failed to create planner");
    (temp_dir, planner)
}
