//! High-level planner API: the weekday meal plan pipeline.
//!
//! [`MealPlanner`] is the single entry point used by the CLI and the MCP
//! server. It owns the storage location, the optional artifact directory and
//! the generative model, and runs the fixed stage sequence:
//!
//! ```text
//! preprocess ─▶ prompt ─▶ generate + extract ─▶ validate ─▶ export ─▶ persist
//! ```
//!
//! Each failure surfaces as a [`PipelineError`](crate::error::PipelineError)
//! naming the stage it came from. The store is written last, in one
//! transaction, so a failed run never leaves a partial plan behind.
//!
//! ## Submodules
//!
//! - [`builder`]: Factory for creating [`MealPlanner`] instances
//! - [`pipeline`]: The end-to-end [`MealPlanner::run`] operation
//! - [`store_ops`]: Async wrappers around the SQLite store
//!
//! # Usage
//!
//! ```rust,no_run
//! use mealplan_core::{MealPlannerBuilder, ModelSettings, UserInput, NO_DIET_OPTION};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = MealPlannerBuilder::new()
//!     .with_database_path(Some("/tmp/mealplan.db"))
//!     .with_model_settings(ModelSettings::from_env())
//!     .build()
//!     .await?;
//!
//! let input = UserInput {
//!     available_items: vec!["lentils".to_string(), "carrots".to_string()],
//!     weekly_goal: "more fibre".to_string(),
//!     diet_choice: NO_DIET_OPTION.to_string(),
//!     custom_diet_description: None,
//! };
//! let generated = planner.run(&input).await?;
//! println!("{}", generated.plan);
//! # Ok(())
//! # }
//! ```

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::{config::ModelSettings, generation::PlanModel};

pub mod builder;
pub mod pipeline;
pub mod store_ops;

pub use builder::MealPlannerBuilder;
pub use pipeline::GeneratedPlan;

/// Main planner interface for generating and storing weekday plans.
pub struct MealPlanner {
    pub(crate) db_path: PathBuf,
    pub(crate) output_dir: Option<PathBuf>,
    pub(crate) model: Option<Arc<dyn PlanModel>>,
    pub(crate) settings: ModelSettings,
}

impl MealPlanner {
    pub(crate) fn new(
        db_path: PathBuf,
        output_dir: Option<PathBuf>,
        model: Option<Arc<dyn PlanModel>>,
        settings: ModelSettings,
    ) -> Self {
        Self {
            db_path,
            output_dir,
            model,
            settings,
        }
    }

    /// Location of the SQLite store.
    pub fn database_path(&self) -> &Path {
        &self.db_path
    }

    /// Directory receiving artifacts, if one was configured.
    pub fn output_dir(&self) -> Option<&Path> {
        self.output_dir.as_deref()
    }

    /// Model identifier sent with each completion request.
    pub fn model_name(&self) -> &str {
        &self.settings.model
    }
}
