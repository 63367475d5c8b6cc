//! Plan model definitions.

use std::ops::Index;

use serde::{Deserialize, Serialize};

use super::Weekday;

/// Names of the five fields every plan entry carries, in column order.
pub const PLAN_FIELDS: [&str; 5] = ["day", "meal", "rationale", "recipe", "nutritional_value"];

/// One extracted model object, trimmed but not yet sanitized or validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanEntryCandidate {
    pub day: String,
    pub meal: String,
    pub rationale: String,
    pub recipe: String,
    pub nutritional_value: String,
}

/// One weekday's meal record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct PlanEntry {
    /// Day of the week the meal is planned for
    pub day: Weekday,

    /// Short description of the meal
    pub meal: String,

    /// Why the meal fits the diet and weekly goal
    pub rationale: String,

    /// Recipe, one instruction per line
    pub recipe: String,

    /// Key nutrition facts
    pub nutritional_value: String,
}

impl PlanEntry {
    /// Field values in [`PLAN_FIELDS`] order.
    pub fn as_record(&self) -> [&str; 5] {
        [
            self.day.as_str(),
            &self.meal,
            &self.rationale,
            &self.recipe,
            &self.nutritional_value,
        ]
    }
}

/// A validated weekday plan: exactly five entries, Monday through Friday.
///
/// Only the validator constructs plans, so holding one is proof that the
/// weekday invariants hold.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Plan {
    entries: Vec<PlanEntry>,
}

impl Plan {
    /// Wraps entries that the validator has already checked and ordered.
    pub(crate) fn from_validated(entries: Vec<PlanEntry>) -> Self {
        debug_assert_eq!(entries.len(), Weekday::ALL.len());
        Self { entries }
    }

    pub fn entries(&self) -> &[PlanEntry] {
        &self.entries
    }

    /// The entry for a given day.
    pub fn entry(&self, day: Weekday) -> &PlanEntry {
        &self.entries[day.index()]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PlanEntry> {
        self.entries.iter()
    }

    pub fn into_entries(self) -> Vec<PlanEntry> {
        self.entries
    }
}

impl Index<Weekday> for Plan {
    type Output = PlanEntry;

    fn index(&self, day: Weekday) -> &Self::Output {
        self.entry(day)
    }
}

impl<'a> IntoIterator for &'a Plan {
    type Item = &'a PlanEntry;
    type IntoIter = std::slice::Iter<'a, PlanEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl From<PlanEntry> for PlanEntryCandidate {
    fn from(entry: PlanEntry) -> Self {
        Self {
            day: entry.day.as_str().to_string(),
            meal: entry.meal,
            rationale: entry.rationale,
            recipe: entry.recipe,
            nutritional_value: entry.nutritional_value,
        }
    }
}
