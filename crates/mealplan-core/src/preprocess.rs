//! Preprocessing of user input into the artifacts the generator consumes.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Serialize;

use crate::{
    error::{IoResultExt, Result},
    models::UserInput,
};

pub const AVAILABLE_ITEMS_FILE: &str = "available_items.csv";
pub const WEEKLY_PREFERENCES_FILE: &str = "weekly_preferences.csv";

/// Inputs for prompt building derived from one planning request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanningArtifacts {
    /// Non-blank pantry items, trimmed, in entry order
    pub available_items: Vec<String>,
    /// Trimmed weekly goal
    pub weekly_goal: String,
    /// Resolved diet descriptor
    pub diet_descriptor: String,
}

/// Where [`PlanningArtifacts::write_csv`] put its files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub available_items: PathBuf,
    pub weekly_preferences: PathBuf,
}

#[derive(Serialize)]
struct PreferencesRow<'a> {
    goal: &'a str,
    diet: &'a str,
}

/// Validates the request and derives the planning artifacts.
pub fn preprocess(input: &UserInput) -> Result<PlanningArtifacts> {
    input.validate()?;

    let available_items = input
        .available_items
        .iter()
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect();

    Ok(PlanningArtifacts {
        available_items,
        weekly_goal: input.weekly_goal.trim().to_string(),
        diet_descriptor: input.diet_descriptor(),
    })
}

impl PlanningArtifacts {
    /// Writes `available_items.csv` (column `available_food`) and
    /// `weekly_preferences.csv` (columns `goal,diet`) into `dir`.
    pub fn write_csv(&self, dir: &Path) -> Result<ArtifactPaths> {
        fs::create_dir_all(dir).fs_context(dir)?;

        let items_path = dir.join(AVAILABLE_ITEMS_FILE);
        let mut items = csv::Writer::from_path(&items_path)?;
        items.write_record(["available_food"])?;
        for item in &self.available_items {
            items.write_record([item])?;
        }
        items.flush().fs_context(&items_path)?;

        let preferences_path = dir.join(WEEKLY_PREFERENCES_FILE);
        let mut preferences = csv::Writer::from_path(&preferences_path)?;
        preferences.serialize(PreferencesRow {
            goal: &self.weekly_goal,
            diet: &self.diet_descriptor,
        })?;
        preferences.flush().fs_context(&preferences_path)?;

        Ok(ArtifactPaths {
            available_items: items_path,
            weekly_preferences: preferences_path,
        })
    }
}
