//! Builder for creating and configuring MealPlanner instances.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use tokio::task;

use super::MealPlanner;
use crate::{
    config::ModelSettings,
    error::{IoResultExt, MealPlanError, Result},
    generation::PlanModel,
};

/// Builder for creating and configuring MealPlanner instances.
#[derive(Clone, Default)]
pub struct MealPlannerBuilder {
    database_path: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    model: Option<Arc<dyn PlanModel>>,
    settings: ModelSettings,
}

impl MealPlannerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/mealplan/mealplan.db` or
    /// `~/.local/share/mealplan/mealplan.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Sets the directory that receives preprocessing artifacts, the raw
    /// model output and the cleaned plan CSV.
    pub fn with_output_dir<P: AsRef<Path>>(mut self, dir: Option<P>) -> Self {
        self.output_dir = dir.map(|d| d.as_ref().to_path_buf());
        self
    }

    /// Uses `model` for generation instead of the HTTP client built from the
    /// model settings.
    pub fn with_model(mut self, model: Arc<dyn PlanModel>) -> Self {
        self.model = Some(model);
        self
    }

    /// Sets the model identifier, temperature and credentials.
    ///
    /// A missing API key is not an error here; it surfaces as
    /// [`MealPlanError::Configuration`] from the generate stage.
    pub fn with_model_settings(mut self, settings: ModelSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Overrides the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.settings.temperature = temperature;
        self
    }

    /// Builds the configured planner instance.
    ///
    /// The database file itself is created by the first write, so read-only
    /// commands against a fresh location leave nothing behind.
    ///
    /// # Errors
    ///
    /// Returns `MealPlanError::XdgDirectory` if no default location exists
    /// Returns `MealPlanError::FileSystem` if the parent directory cannot be
    /// created
    pub async fn build(self) -> Result<MealPlanner> {
        let db_path = if let Some(path) = self.database_path {
            path
        } else {
            Self::default_database_path()?
        };

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            let parent = parent.to_path_buf();
            task::spawn_blocking(move || std::fs::create_dir_all(&parent).fs_context(&parent))
                .await
                .map_err(|e| MealPlanError::Configuration {
                    message: format!("Task join error: {e}"),
                })??;
        }

        Ok(MealPlanner::new(
            db_path,
            self.output_dir,
            self.model,
            self.settings,
        ))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    pub fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("mealplan")
            .place_data_file("mealplan.db")
            .map_err(|e| MealPlanError::XdgDirectory(e.to_string()))
    }
}
