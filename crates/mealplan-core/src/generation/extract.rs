//! Extraction of plan candidates from free-form model output.
//!
//! Two phases: a permissive text pass that digs the JSON array out of any
//! surrounding prose or code fence, followed by a strict schema check on the
//! parsed value.

use serde_json::{Map, Value};

use crate::{
    error::{MealPlanError, Result},
    models::{PlanEntryCandidate, PLAN_FIELDS},
};

const EXPECTED_ENTRIES: usize = 5;

/// Parses raw model text into exactly five plan candidates.
///
/// # Errors
///
/// Returns [`MealPlanError::Parse`], carrying the raw text, when no JSON
/// array can be parsed, when an element is not an object or lacks one of the
/// required keys, or when the array does not hold five entries.
pub fn extract_plan(raw: &str) -> Result<Vec<PlanEntryCandidate>> {
    let candidate = extract_json_array(raw);

    let data: Value = serde_json::from_str(candidate)
        .map_err(|_| MealPlanError::parse("Model response was not valid JSON.", raw))?;

    let Value::Array(items) = data else {
        return Err(MealPlanError::parse("Model response must be a JSON array.", raw));
    };

    let entries = items
        .iter()
        .map(|item| match item {
            Value::Object(object) => candidate_from_object(object, raw),
            _ => Err(MealPlanError::parse("Each plan entry must be an object.", raw)),
        })
        .collect::<Result<Vec<_>>>()?;

    if entries.len() != EXPECTED_ENTRIES {
        return Err(MealPlanError::parse(
            format!(
                "Plan must contain exactly five entries (model returned {}).",
                entries.len()
            ),
            raw,
        ));
    }

    Ok(entries)
}

/// Strips code fences and prose, returning the bracketed JSON slice.
///
/// When no `[`..`]` pair exists the whole trimmed text is returned so that
/// JSON parsing reports the failure.
pub fn extract_json_array(raw: &str) -> &str {
    let text = strip_code_fence(raw.trim());

    match (text.find('['), text.rfind(']')) {
        (Some(start), Some(end)) if end > start => &text[start..=end],
        _ => text,
    }
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };

    // The opening fence may carry a language tag such as `json`.
    let rest = rest
        .strip_prefix("json")
        .or_else(|| rest.strip_prefix("JSON"))
        .unwrap_or(rest)
        .trim();

    rest.strip_suffix("```").unwrap_or(rest).trim()
}

fn candidate_from_object(object: &Map<String, Value>, raw: &str) -> Result<PlanEntryCandidate> {
    let missing: Vec<&str> = PLAN_FIELDS
        .iter()
        .copied()
        .filter(|key| !object.contains_key(*key))
        .collect();

    if !missing.is_empty() {
        let mut sorted = missing;
        sorted.sort_unstable();
        return Err(MealPlanError::parse(
            format!("Model response missing fields: {}.", sorted.join(", ")),
            raw,
        ));
    }

    let field = |key: &str| object.get(key).map(value_text).unwrap_or_default();

    Ok(PlanEntryCandidate {
        day: field("day"),
        meal: field("meal"),
        rationale: field("rationale"),
        recipe: field("recipe"),
        nutritional_value: field("nutritional_value"),
    })
}

/// String form of a JSON value: strings as-is, `null` as empty, anything
/// else as its JSON text.
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Null => String::new(),
        other => other.to_string().trim().to_string(),
    }
}
