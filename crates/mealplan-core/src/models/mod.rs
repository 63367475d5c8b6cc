//! Data models for planning requests, plans and plan history.
//!
//! Display implementations for these models live in
//! [`crate::display::models`], keeping presentation separate from the data
//! structures.
//!
//! # Examples
//!
//! ```rust
//! use mealplan_core::models::{UserInput, CUSTOM_DIET_OPTION};
//!
//! let input = UserInput {
//!     available_items: vec!["eggs".to_string(), "spinach".to_string()],
//!     weekly_goal: "cut down on sugar".to_string(),
//!     diet_choice: CUSTOM_DIET_OPTION.to_string(),
//!     custom_diet_description: Some("  no dairy ".to_string()),
//! };
//! assert_eq!(input.diet_descriptor(), "no dairy");
//! ```

pub mod history;
pub mod input;
pub mod plan;
pub mod weekday;


pub use history::HistoryRecord;
pub use input::{diet_options, UserInput, COMMON_DIETS, CUSTOM_DIET_OPTION, NO_DIET_OPTION};
pub use plan::{Plan, PlanEntry, PlanEntryCandidate, PLAN_FIELDS};
pub use weekday::Weekday;
