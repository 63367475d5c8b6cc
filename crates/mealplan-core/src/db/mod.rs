//! Database operations and SQLite management for meal plans.
//!
//! Two tables live in one SQLite file: `meal_plan` holds the current
//! snapshot (one row per weekday) and `plan_history` is the append-only log
//! of generated plans. Queries for each table live in their own submodule.

use std::path::Path;

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod current_queries;
pub mod history_queries;
pub mod migrations;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Opens (or creates) the database file and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}
