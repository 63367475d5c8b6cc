//! The end-to-end planning run.

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{debug, info, warn};

use super::MealPlanner;
use crate::{
    error::{IoResultExt, MealPlanError, PipelineError, Result, Stage, StageResultExt},
    export::{write_plan_csv, PLAN_CSV_FILE},
    generation::{extract_plan, generate, CompletionRequest},
    models::{Plan, UserInput},
    preprocess::preprocess,
    prompt::build_prompt,
    validate::validate_and_clean,
};

/// File receiving the prompt when an output directory is configured.
pub const PROMPT_FILE: &str = "prompt.txt";
/// File receiving the unprocessed model response.
pub const MODEL_OUTPUT_FILE: &str = "model_output.txt";

/// Outcome of a successful [`MealPlanner::run`].
#[derive(Debug, Clone)]
pub struct GeneratedPlan {
    /// The validated plan, Monday through Friday
    pub plan: Plan,
    /// Id of the history record appended for this run
    pub history_id: u64,
    /// Store the plan was persisted to
    pub database_path: PathBuf,
    /// Exported plan CSV, when an output directory is configured
    pub csv_path: Option<PathBuf>,
}

impl MealPlanner {
    /// Runs every stage once for `input` and persists the resulting plan.
    ///
    /// The first failing stage aborts the run and nothing is retried. The
    /// store is written last, in a single transaction, so a failed run
    /// leaves neither the snapshot nor the history changed.
    pub async fn run(&self, input: &UserInput) -> std::result::Result<GeneratedPlan, PipelineError> {
        info!("Preprocessing planning request");
        let artifacts = preprocess(input).at_stage(Stage::Preprocess)?;
        if let Some(dir) = &self.output_dir {
            let paths = artifacts.write_csv(dir).at_stage(Stage::Preprocess)?;
            debug!(
                "Wrote artifacts to {} and {}",
                paths.available_items.display(),
                paths.weekly_preferences.display()
            );
        }

        info!("Building prompt");
        let prompt = build_prompt(
            &artifacts.available_items,
            &artifacts.weekly_goal,
            &artifacts.diet_descriptor,
        );
        if let Some(dir) = &self.output_dir {
            write_text(dir, PROMPT_FILE, &prompt).at_stage(Stage::Prompt)?;
        }

        info!("Generating plan with model {}", self.settings.model);
        let raw = self.complete(&prompt).await.at_stage(Stage::Generate)?;
        debug!("Raw model output:\n{raw}");
        if let Some(dir) = &self.output_dir {
            write_text(dir, MODEL_OUTPUT_FILE, &raw).at_stage(Stage::Generate)?;
        }
        let candidates = extract_plan(&raw)
            .map_err(reject)
            .at_stage(Stage::Generate)?;

        info!("Validating {} plan entries", candidates.len());
        let plan = validate_and_clean(candidates)
            .map_err(reject)
            .at_stage(Stage::Validate)?;

        // The store is written last; an export failure must leave it untouched.
        let csv_path = match &self.output_dir {
            Some(dir) => {
                info!("Exporting plan CSV");
                Some(write_plan_csv(&plan, &dir.join(PLAN_CSV_FILE)).at_stage(Stage::Export)?)
            }
            None => None,
        };

        info!("Persisting plan to {}", self.db_path.display());
        let record = self
            .record_plan(&plan, &artifacts.weekly_goal, &artifacts.diet_descriptor)
            .await
            .at_stage(Stage::Persist)?;

        Ok(GeneratedPlan {
            plan,
            history_id: record.id,
            database_path: self.db_path.clone(),
            csv_path,
        })
    }

    /// Sends one completion request to the injected model, or to the HTTP
    /// client described by the model settings.
    async fn complete(&self, prompt: &str) -> Result<String> {
        match &self.model {
            Some(model) => {
                let request = CompletionRequest::new(
                    self.settings.model.clone(),
                    prompt,
                    self.settings.temperature,
                );
                model.complete(&request).await
            }
            None => generate(prompt, &self.settings).await,
        }
    }
}

fn reject(e: MealPlanError) -> MealPlanError {
    warn!("Rejected model output: {e}");
    e
}

fn write_text(dir: &Path, name: &str, contents: &str) -> Result<()> {
    fs::create_dir_all(dir).fs_context(dir)?;
    let path = dir.join(name);
    fs::write(&path, contents).fs_context(&path)
}
