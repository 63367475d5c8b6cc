//! Command handlers for the terminal interface.
//!
//! Each handler calls one [`MealPlanner`] operation and hands the markdown
//! produced by the core display layer to the [`TerminalRenderer`].

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use log::debug;
use mealplan_core::{
    diet_options, write_plan_csv, DietOptions, HistoryRecords, MealPlanner, UserInput,
};

use crate::{args::GenerateArgs, renderer::TerminalRenderer};

const NO_CURRENT_PLAN: &str = "No current plan found. Run `mealplan generate` to create one.\n";

/// Dispatches CLI commands to the planner.
pub struct Cli {
    planner: MealPlanner,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(planner: MealPlanner, renderer: TerminalRenderer) -> Self {
        Self { planner, renderer }
    }

    pub fn list_diets(&self) -> Result<()> {
        self.renderer.render(&DietOptions(diet_options()).to_string())
    }

    pub async fn generate(&self, args: &GenerateArgs) -> Result<()> {
        let input = UserInput::from(args);
        debug!("Generating plan for goal '{}'", input.weekly_goal);

        let generated = match self.planner.run(&input).await {
            Ok(generated) => generated,
            Err(e) => {
                if let Some(raw) = e.source.raw_output() {
                    eprintln!("Model output that could not be used:\n{raw}");
                }
                return Err(anyhow!(e)).context("Failed to generate meal plan");
            }
        };

        let mut output = generated.plan.to_string();
        output.push_str(&format!(
            "\nSaved as current plan and history entry {} in {}\n",
            generated.history_id,
            generated.database_path.display()
        ));
        if let Some(csv_path) = &generated.csv_path {
            output.push_str(&format!("Plan CSV written to {}\n", csv_path.display()));
        }
        self.renderer.render(&output)
    }

    pub async fn show(&self) -> Result<()> {
        let plan = self
            .planner
            .current_plan()
            .await
            .context("Failed to load current plan")?;

        match plan {
            Some(plan) => self.renderer.render(&plan.to_string()),
            None => self.renderer.render(NO_CURRENT_PLAN),
        }
    }

    pub async fn history(&self, limit: u32) -> Result<()> {
        let records = self
            .planner
            .list_history(limit)
            .await
            .context("Failed to list plan history")?;

        self.renderer.render(&HistoryRecords(records).to_string())
    }

    pub async fn export(&self, path: &Path) -> Result<()> {
        let plan = self
            .planner
            .current_plan()
            .await
            .context("Failed to load current plan")?
            .ok_or_else(|| anyhow!("No current plan to export"))?;

        let written = write_plan_csv(&plan, path)
            .with_context(|| format!("Failed to export plan to {}", path.display()))?;
        self.renderer
            .render(&format!("Exported current plan to {}\n", written.display()))
    }
}
