//! Store operations for the MealPlanner.

use tokio::task;

use super::MealPlanner;
use crate::{
    db::Database,
    error::{MealPlanError, Result},
    models::{HistoryRecord, Plan},
};

fn join_error(e: task::JoinError) -> MealPlanError {
    MealPlanError::Configuration {
        message: format!("Task join error: {e}"),
    }
}

impl MealPlanner {
    /// Replaces the current snapshot and appends `plan` to the history as one
    /// atomic write.
    pub async fn record_plan(
        &self,
        plan: &Plan,
        weekly_goal: &str,
        diet_descriptor: &str,
    ) -> Result<HistoryRecord> {
        let db_path = self.db_path.clone();
        let plan = plan.clone();
        let weekly_goal = weekly_goal.to_string();
        let diet_descriptor = diet_descriptor.to_string();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.record_plan(&plan, &weekly_goal, &diet_descriptor)
        })
        .await
        .map_err(join_error)?
    }

    /// Lists up to `limit` history records, newest first.
    ///
    /// A store that was never created yields an empty list rather than a
    /// fresh database file.
    pub async fn list_history(&self, limit: u32) -> Result<Vec<HistoryRecord>> {
        if limit == 0 {
            return Err(MealPlanError::invalid_input("limit").with_reason("must be at least 1"));
        }
        if !self.db_path.exists() {
            return Ok(Vec::new());
        }

        let db_path = self.db_path.clone();
        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.list_history(limit)
        })
        .await
        .map_err(join_error)?
    }

    /// Reads the current snapshot, if one has been saved.
    pub async fn current_plan(&self) -> Result<Option<Plan>> {
        if !self.db_path.exists() {
            return Ok(None);
        }

        let db_path = self.db_path.clone();
        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.load_current()
        })
        .await
        .map_err(join_error)?
    }
}
