//! Markdown formatting for plans and plan history.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! collections are wrapped in newtypes (see [`collections`]) so that empty
//! lists and headings are handled in one place. All output is markdown,
//! rendered richly by the CLI or passed through verbatim to MCP clients.
//!
//! ```rust
//! use mealplan_core::display::HistoryRecords;
//!
//! let empty = HistoryRecords(Vec::new());
//! assert_eq!(empty.to_string(), "No saved plans found.\n");
//! ```

pub mod collections;
pub mod datetime;
pub mod models;

pub use collections::{DietOptions, HistoryRecords};
pub use datetime::LocalDateTime;
