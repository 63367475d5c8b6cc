//! User preferences captured for a planning request and the diet catalog.

use serde::{Deserialize, Serialize};

use crate::error::{MealPlanError, Result};

/// Named diets offered to the user.
pub const COMMON_DIETS: [&str; 12] = [
    "Mediterranean Diet",
    "Ketogenic Diet",
    "Paleo Diet",
    "Vegetarian Diet",
    "Vegan Diet",
    "Pescatarian Diet",
    "DASH Diet",
    "Low-Carb Diet",
    "High-Protein Diet",
    "Gluten-Free Diet",
    "Whole30 Diet",
    "Flexitarian Diet",
];

/// Sentinel choice for "no dietary framework".
pub const NO_DIET_OPTION: &str = "No Specific Diet";

/// Sentinel choice meaning the diet is described in free text.
pub const CUSTOM_DIET_OPTION: &str = "Custom Diet";

/// Every selectable diet option in display order.
pub fn diet_options() -> Vec<&'static str> {
    COMMON_DIETS
        .iter()
        .copied()
        .chain([NO_DIET_OPTION, CUSTOM_DIET_OPTION])
        .collect()
}

/// Structured container for the user's preferences for one planning request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct UserInput {
    /// Pantry items in the order the user entered them
    #[serde(default)]
    pub available_items: Vec<String>,

    /// Primary goal for the week, e.g. "cut down on sugar"
    pub weekly_goal: String,

    /// One of the catalog diets, "No Specific Diet" or "Custom Diet"
    pub diet_choice: String,

    /// Free-text diet, used when `diet_choice` is "Custom Diet"
    #[serde(default)]
    pub custom_diet_description: Option<String>,
}

impl UserInput {
    /// Rejects requests the pipeline cannot plan for.
    pub fn validate(&self) -> Result<()> {
        if self.weekly_goal.trim().is_empty() {
            return Err(MealPlanError::invalid_input("weekly_goal").with_reason("must not be empty"));
        }

        if !diet_options().contains(&self.diet_choice.as_str()) {
            return Err(MealPlanError::invalid_input("diet_choice")
                .with_reason(format!("unknown diet option '{}'", self.diet_choice)));
        }

        Ok(())
    }

    /// True when the user picked the free-text diet option.
    pub fn is_custom_diet(&self) -> bool {
        self.diet_choice == CUSTOM_DIET_OPTION
    }

    /// The human-readable diet descriptor handed to the model.
    pub fn diet_descriptor(&self) -> String {
        if self.is_custom_diet() {
            self.custom_diet_description
                .as_deref()
                .map(str::trim)
                .unwrap_or_default()
                .to_string()
        } else {
            self.diet_choice.clone()
        }
    }
}
