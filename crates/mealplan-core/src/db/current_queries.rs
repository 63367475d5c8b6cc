//! Queries for the current plan snapshot.

use rusqlite::{params, Connection};

use crate::{
    error::{DatabaseResultExt, Result},
    models::{Plan, PlanEntryCandidate},
    validate::validate_and_clean,
};

const DELETE_CURRENT_SQL: &str = "DELETE FROM meal_plan";
const INSERT_CURRENT_SQL: &str = "INSERT INTO meal_plan (day, meal, rationale, recipe, nutritional_value) VALUES (?1, ?2, ?3, ?4, ?5)";
const SELECT_CURRENT_SQL: &str =
    "SELECT day, meal, rationale, recipe, nutritional_value FROM meal_plan ORDER BY id";

impl super::Database {
    /// Replaces the current snapshot with `plan`.
    ///
    /// The delete and the five inserts run in one transaction, so concurrent
    /// replacements never leave a mixed snapshot behind. The `UNIQUE` day
    /// column rejects duplicate days even if a caller bypassed validation.
    pub fn save_current(&mut self, plan: &Plan) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        replace_current(&tx, plan)?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(())
    }

    /// Loads the current snapshot, or `None` if no plan has been saved.
    ///
    /// Stored rows go through the validator again, so the returned plan
    /// carries the same guarantees as a freshly generated one.
    pub fn load_current(&self) -> Result<Option<Plan>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_CURRENT_SQL)
            .db_context("Failed to prepare query")?;

        let rows = stmt
            .query_map([], |row| {
                Ok(PlanEntryCandidate {
                    day: row.get(0)?,
                    meal: row.get(1)?,
                    rationale: row.get(2)?,
                    recipe: row.get(3)?,
                    nutritional_value: row.get(4)?,
                })
            })
            .db_context("Failed to query current plan")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read current plan")?;

        if rows.is_empty() {
            return Ok(None);
        }

        validate_and_clean(rows).map(Some)
    }

    /// Number of rows in the current snapshot.
    pub fn current_row_count(&self) -> Result<usize> {
        self.connection
            .query_row("SELECT COUNT(*) FROM meal_plan", [], |row| row.get::<_, i64>(0))
            .map(|count| count as usize)
            .db_context("Failed to count current plan rows")
    }
}

/// Deletes the snapshot and inserts `plan`; the caller owns the transaction.
pub(super) fn replace_current(connection: &Connection, plan: &Plan) -> Result<()> {
    connection
        .execute(DELETE_CURRENT_SQL, [])
        .db_context("Failed to clear current plan")?;

    let mut stmt = connection
        .prepare(INSERT_CURRENT_SQL)
        .db_context("Failed to prepare insert")?;
    for entry in plan {
        stmt.execute(params![
            entry.day.as_str(),
            entry.meal,
            entry.rationale,
            entry.recipe,
            entry.nutritional_value,
        ])
        .db_context("Failed to insert plan entry")?;
    }
    Ok(())
}
