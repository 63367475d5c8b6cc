//! Collection wrapper types for displaying groups of domain objects.

use std::fmt;

use crate::models::{HistoryRecord, CUSTOM_DIET_OPTION, NO_DIET_OPTION};

/// Newtype wrapper for displaying plan history, newest first.
pub struct HistoryRecords(pub Vec<HistoryRecord>);

impl HistoryRecords {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for HistoryRecords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No saved plans found.");
        }

        writeln!(f, "# Plan History")?;
        for record in &self.0 {
            writeln!(f)?;
            write!(f, "{record}")?;
        }
        Ok(())
    }
}

/// Newtype wrapper for the selectable diet list, numbered for menus.
pub struct DietOptions(pub Vec<&'static str>);

impl fmt::Display for DietOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Diet Options")?;
        writeln!(f)?;
        for (index, option) in self.0.iter().enumerate() {
            match *option {
                NO_DIET_OPTION => writeln!(f, "{}. {option} (no restrictions)", index + 1)?,
                CUSTOM_DIET_OPTION => writeln!(f, "{}. {option} (describe your own)", index + 1)?,
                _ => writeln!(f, "{}. {option}", index + 1)?,
            }
        }
        Ok(())
    }
}
