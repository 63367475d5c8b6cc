//! CSV interchange format for plans.
//!
//! The file has the header `day,meal,rationale,recipe,nutritional_value`
//! followed by five weekday-ordered rows. Fields holding commas, quotes or
//! line breaks are quoted RFC 4180 style.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::{
    error::{IoResultExt, MealPlanError, Result},
    models::{Plan, PLAN_FIELDS},
};

/// File name used when a plan CSV is written into an output directory.
pub const PLAN_CSV_FILE: &str = "weekday_plan.csv";

/// Renders a plan as CSV text.
pub fn plan_to_csv(plan: &Plan) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(PLAN_FIELDS)?;
    for entry in plan {
        writer.write_record(entry.as_record())?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| csv_failure(io::Error::new(e.error().kind(), e.error().to_string())))?;

    String::from_utf8(bytes).map_err(|e| csv_failure(io::Error::new(io::ErrorKind::InvalidData, e)))
}

/// Maps an encoder failure onto [`MealPlanError::Csv`].
fn csv_failure(error: io::Error) -> MealPlanError {
    csv::Error::from(error).into()
}

/// Writes a plan CSV to `destination`, creating parent directories.
pub fn write_plan_csv(plan: &Plan, destination: &Path) -> Result<PathBuf> {
    if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).fs_context(parent)?;
    }

    let contents = plan_to_csv(plan)?;
    fs::write(destination, contents).fs_context(destination)?;
    Ok(destination.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::PlanEntryCandidate, validate::validate_and_clean};

    fn sample_plan() -> Plan {
        let days = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"];
        let candidates = days
            .iter()
            .map(|day| PlanEntryCandidate {
                day: day.to_string(),
                meal: format!("{day} bowl"),
                rationale: "Quick, filling".to_string(),
                recipe: "1. Cook grains\n2. Add \"sauce\"".to_string(),
                nutritional_value: "450 kcal".to_string(),
            })
            .collect();
        validate_and_clean(candidates).expect("valid plan")
    }

    #[test]
    fn test_csv_has_header_and_five_rows() {
        let csv_text = plan_to_csv(&sample_plan()).expect("csv");
        assert!(csv_text.starts_with("day,meal,rationale,recipe,nutritional_value\n"));

        let mut reader = csv::Reader::from_reader(csv_text.as_bytes());
        let rows: Vec<csv::StringRecord> = reader
            .records()
            .collect::<std::result::Result<_, _>>()
            .expect("readable csv");
        assert_eq!(rows.len(), 5);
        assert_eq!(&rows[0][0], "Monday");
        assert_eq!(&rows[4][0], "Friday");
        assert_eq!(&rows[2][3], "1. Cook grains\n2. Add \"sauce\"");
    }

    #[test]
    fn test_csv_quotes_commas_and_newlines() {
        let csv_text = plan_to_csv(&sample_plan()).expect("csv");
        assert!(csv_text.contains("\"Quick, filling\""));
        assert!(csv_text.contains("\"1. Cook grains\n2. Add \"\"sauce\"\"\""));
    }

    #[test]
    fn test_write_plan_csv_creates_directories() {
        let dir = tempfile::TempDir::new().expect("temp dir");
        let destination = dir.path().join("nested").join(PLAN_CSV_FILE);

        let written = write_plan_csv(&sample_plan(), &destination).expect("written");
        assert_eq!(written, destination);
        let contents = fs::read_to_string(&destination).expect("readable");
        assert_eq!(contents.lines().next(), Some("day,meal,rationale,recipe,nutritional_value"));
    }

    #[test]
    fn test_encoder_failures_are_not_client_errors() {
        let invalid = String::from_utf8(vec![0xff]).unwrap_err();
        let err = csv_failure(io::Error::new(io::ErrorKind::InvalidData, invalid));

        assert!(matches!(err, MealPlanError::Csv { .. }));
        assert!(!err.is_client_error());
    }
}
