//! Queries for the append-only plan history.

use jiff::Timestamp;
use log::warn;
use rusqlite::{params, types::Type, Connection};

use super::current_queries::replace_current;

use crate::{
    error::{DatabaseResultExt, MealPlanError, Result},
    models::{HistoryRecord, Plan, PlanEntry},
};

const INSERT_HISTORY_SQL: &str = "INSERT INTO plan_history (created_at, weekly_goal, diet_descriptor, plan_json) VALUES (?1, ?2, ?3, ?4)";
const SELECT_HISTORY_SQL: &str = "SELECT id, created_at, weekly_goal, diet_descriptor, plan_json FROM plan_history ORDER BY id DESC LIMIT ?1";

impl super::Database {
    /// Appends a plan to the history and returns the stored record.
    ///
    /// Existing rows are never touched; the id comes from SQLite's
    /// `AUTOINCREMENT`, so it only ever grows.
    pub fn append_history(
        &mut self,
        plan: &Plan,
        weekly_goal: &str,
        diet_descriptor: &str,
    ) -> Result<HistoryRecord> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let record = insert_history(&tx, plan, weekly_goal, diet_descriptor)?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(record)
    }

    /// Replaces the current snapshot and appends the history record in one
    /// transaction, so neither is visible without the other.
    pub fn record_plan(
        &mut self,
        plan: &Plan,
        weekly_goal: &str,
        diet_descriptor: &str,
    ) -> Result<HistoryRecord> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        replace_current(&tx, plan)?;
        let record = insert_history(&tx, plan, weekly_goal, diet_descriptor)?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(record)
    }

    /// Lists at most `limit` history records, newest first.
    pub fn list_history(&self, limit: u32) -> Result<Vec<HistoryRecord>> {
        if limit == 0 {
            return Err(MealPlanError::invalid_input("limit").with_reason("must be at least 1"));
        }

        let mut stmt = self
            .connection
            .prepare(SELECT_HISTORY_SQL)
            .db_context("Failed to prepare query")?;

        let records = stmt
            .query_map(params![limit as i64], |row| {
                let created_at = row
                    .get::<_, String>(1)?
                    .parse::<Timestamp>()
                    .map_err(|e| rusqlite::Error::FromSqlConversionFailure(1, Type::Text, Box::new(e)))?;
                let plan_json: Option<String> = row.get(4)?;

                Ok(HistoryRecord {
                    id: row.get::<_, i64>(0)? as u64,
                    created_at,
                    weekly_goal: row.get(2)?,
                    diet_descriptor: row.get(3)?,
                    plan: decode_plan(plan_json.as_deref()),
                })
            })
            .db_context("Failed to query plan history")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read plan history")?;

        Ok(records)
    }
}

/// Inserts one history row with a second-precision UTC timestamp; the caller
/// owns the transaction.
fn insert_history(
    connection: &Connection,
    plan: &Plan,
    weekly_goal: &str,
    diet_descriptor: &str,
) -> Result<HistoryRecord> {
    let now = Timestamp::now();
    let created_at = Timestamp::from_second(now.as_second()).unwrap_or(now);
    let plan_json = serde_json::to_string(plan)?;

    connection
        .execute(
            INSERT_HISTORY_SQL,
            params![created_at.to_string(), weekly_goal, diet_descriptor, plan_json],
        )
        .db_context("Failed to insert plan history")?;

    Ok(HistoryRecord {
        id: connection.last_insert_rowid() as u64,
        created_at,
        weekly_goal: Some(weekly_goal.to_string()),
        diet_descriptor: Some(diet_descriptor.to_string()),
        plan: plan.entries().to_vec(),
    })
}

/// Decodes a stored plan payload; unreadable payloads become an empty plan
/// so one bad row does not hide the rest of the history.
fn decode_plan(plan_json: Option<&str>) -> Vec<PlanEntry> {
    let Some(json) = plan_json else {
        return Vec::new();
    };
    serde_json::from_str(json).unwrap_or_else(|e| {
        warn!("Ignoring unreadable plan payload in history: {e}");
        Vec::new()
    })
}
