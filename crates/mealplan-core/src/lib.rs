//! Core library for the weekday meal planner.
//!
//! This crate turns a planning request (pantry items, a weekly goal and a
//! diet) into a validated Monday through Friday meal plan using a generative
//! text model, then stores it as the current plan and in an append-only
//! history.
//!
//! # Pipeline
//!
//! - **Preprocess** ([`preprocess`]): validate the request and derive the
//!   prompt inputs
//! - **Prompt** ([`prompt`]): a deterministic instruction block
//! - **Generate** ([`generation`]): one model call behind the [`PlanModel`]
//!   trait, followed by tolerant JSON extraction
//! - **Validate** ([`validate`]): sanitize text and enforce the five-weekday
//!   schema
//! - **Persist** ([`db`]): replace the current snapshot and append history
//! - **Render** ([`display`], [`export`]): markdown and CSV output
//!
//! [`MealPlanner`] runs these stages in order and tags any failure with the
//! [`Stage`] it came from.
//!
//! # Quick Start
//!
//! ```rust
//! use mealplan_core::{validate_and_clean, PlanEntryCandidate, Weekday};
//!
//! let candidates = Weekday::ALL
//!     .iter()
//!     .map(|day| PlanEntryCandidate {
//!         day: day.as_str().to_lowercase(),
//!         meal: "Bean chili".to_string(),
//!         rationale: "High in fibre".to_string(),
//!         recipe: "Simmer beans\nServe".to_string(),
//!         nutritional_value: "520 kcal".to_string(),
//!     })
//!     .collect();
//!
//! let plan = validate_and_clean(candidates).expect("valid plan");
//! assert_eq!(plan[Weekday::Wednesday].meal, "Bean chili");
//! ```

pub mod config;
pub mod db;
pub mod display;
pub mod error;
pub mod export;
pub mod generation;
pub mod models;
pub mod planner;
pub mod preprocess;
pub mod prompt;
pub mod validate;

// Re-export commonly used types
pub use config::ModelSettings;
pub use db::Database;
pub use display::{DietOptions, HistoryRecords, LocalDateTime};
pub use error::{MealPlanError, PipelineError, PlanViolation, Result, Stage};
pub use export::{plan_to_csv, write_plan_csv};
pub use generation::{extract_plan, generate, CompletionRequest, OpenAiClient, PlanModel};
pub use models::{
    diet_options, HistoryRecord, Plan, PlanEntry, PlanEntryCandidate, UserInput, Weekday,
    COMMON_DIETS, CUSTOM_DIET_OPTION, NO_DIET_OPTION,
};
pub use planner::{GeneratedPlan, MealPlanner, MealPlannerBuilder};
pub use preprocess::{preprocess, PlanningArtifacts};
pub use prompt::build_prompt;
pub use validate::{sanitize_text, validate_and_clean};
