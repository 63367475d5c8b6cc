//! Sanitization and validation of extracted plan candidates.
//!
//! Every text field is sanitized before any check runs. Checks are fail-fast:
//! a plan with four good days and one bad one is rejected as a whole.

use std::collections::HashSet;

use unicode_general_category::{get_general_category, GeneralCategory};

use crate::{
    error::{PlanViolation, Result},
    models::{Plan, PlanEntry, PlanEntryCandidate, Weekday},
};

/// Cleans model text for storage and rendering.
///
/// Removes carriage returns and control/format characters other than `\n`
/// and `\t`, collapses whitespace runs inside each line to a single space,
/// drops lines left empty, and trims the result. Line breaks survive so that
/// multi-step recipes keep their structure.
pub fn sanitize_text(value: &str) -> String {
    let filtered: String = value.chars().filter(|&c| keep_char(c)).collect();

    filtered
        .split('\n')
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn keep_char(c: char) -> bool {
    if c == '\n' || c == '\t' {
        return true;
    }
    !matches!(
        get_general_category(c),
        GeneralCategory::Control | GeneralCategory::Format
    )
}

/// Maps a raw day string onto a planning weekday, ignoring case and
/// surrounding whitespace.
pub fn normalize_day(value: &str) -> Option<Weekday> {
    value.parse().ok()
}

/// Sanitizes and validates candidates into a Monday..Friday ordered [`Plan`].
///
/// # Errors
///
/// Returns [`crate::MealPlanError::Validation`] with the first violation
/// found: an unknown day, an empty field, a repeated day, or a number of
/// entries other than five.
pub fn validate_and_clean(candidates: Vec<PlanEntryCandidate>) -> Result<Plan> {
    let mut seen = HashSet::new();
    let mut entries = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        let raw_day = sanitize_text(&candidate.day);
        let day = normalize_day(&raw_day).ok_or(PlanViolation::InvalidDay { value: raw_day })?;

        let entry = PlanEntry {
            day,
            meal: sanitize_text(&candidate.meal),
            rationale: sanitize_text(&candidate.rationale),
            recipe: sanitize_text(&candidate.recipe),
            nutritional_value: sanitize_text(&candidate.nutritional_value),
        };

        if let Some(field) = first_empty_field(&entry) {
            return Err(PlanViolation::EmptyField { field, day }.into());
        }

        if !seen.insert(day) {
            return Err(PlanViolation::DuplicateDay { day }.into());
        }

        entries.push(entry);
    }

    if entries.len() != Weekday::ALL.len() {
        return Err(PlanViolation::WrongEntryCount {
            found: entries.len(),
        }
        .into());
    }

    entries.sort_by_key(|entry| entry.day);
    Ok(Plan::from_validated(entries))
}

fn first_empty_field(entry: &PlanEntry) -> Option<&'static str> {
    [
        ("meal", &entry.meal),
        ("rationale", &entry.rationale),
        ("recipe", &entry.recipe),
        ("nutritional_value", &entry.nutritional_value),
    ]
    .into_iter()
    .find(|(_, value)| value.is_empty())
    .map(|(name, _)| name)
}
