//! Display implementations for domain models.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::models::{HistoryRecord, Plan, PlanEntry, Weekday};

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for PlanEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {}: {}", self.day, self.meal)?;
        writeln!(f)?;
        writeln!(f, "#### Why this meal")?;
        writeln!(f)?;
        writeln!(f, "{}", self.rationale)?;
        writeln!(f)?;
        writeln!(f, "#### Recipe")?;
        writeln!(f)?;
        write_recipe(f, &self.recipe)?;
        writeln!(f)?;
        writeln!(f, "#### Nutritional Value")?;
        writeln!(f)?;
        writeln!(f, "{}", self.nutritional_value)
    }
}

/// Multi-line recipes become a numbered list; lines the model already
/// numbered keep their own numbers.
fn write_recipe(f: &mut fmt::Formatter<'_>, recipe: &str) -> fmt::Result {
    let steps: Vec<&str> = recipe
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    if steps.len() <= 1 {
        return writeln!(f, "{}", recipe.trim());
    }

    for (index, step) in steps.iter().enumerate() {
        if is_numbered(step) {
            writeln!(f, "{step}")?;
        } else {
            writeln!(f, "{}. {step}", index + 1)?;
        }
    }
    Ok(())
}

/// A step is numbered when it opens with digits, then `.` or `)`, then
/// whitespace. "1.5 cups oats" is a quantity, not a step number.
fn is_numbered(line: &str) -> bool {
    let digits = line.chars().take_while(char::is_ascii_digit).count();
    let mut rest = line[digits..].chars();
    digits > 0
        && matches!(rest.next(), Some('.' | ')'))
        && rest.next().is_some_and(char::is_whitespace)
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Weekday Meal Plan")?;
        for entry in self {
            writeln!(f)?;
            write!(f, "{entry}")?;
        }
        Ok(())
    }
}

impl fmt::Display for HistoryRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let goal = self.weekly_goal.as_deref().unwrap_or("(no goal)");
        writeln!(f, "## {}. {}", self.id, goal)?;
        writeln!(f)?;
        if let Some(diet) = self.diet_descriptor.as_deref().filter(|d| !d.is_empty()) {
            writeln!(f, "- Diet: {diet}")?;
        }
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;

        if self.plan.is_empty() {
            writeln!(f, "- Meals: unavailable")?;
        } else {
            for entry in &self.plan {
                writeln!(f, "- {}: {}", entry.day, entry.meal)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use crate::{
        models::{HistoryRecord, PlanEntry, PlanEntryCandidate, Weekday},
        validate::validate_and_clean,
    };

    fn create_test_entry(day: Weekday, recipe: &str) -> PlanEntry {
        PlanEntry {
            day,
            meal: "Chickpea curry".to_string(),
            rationale: "Plant protein keeps you full".to_string(),
            recipe: recipe.to_string(),
            nutritional_value: "18g protein, 12g fibre".to_string(),
        }
    }

    #[test]
    fn test_entry_display_sections() {
        let output = create_test_entry(Weekday::Tuesday, "Simmer everything").to_string();
        assert!(output.starts_with("## Tuesday: Chickpea curry\n"));
        assert!(output.contains("#### Why this meal\n\nPlant protein keeps you full\n"));
        assert!(output.contains("#### Recipe\n\nSimmer everything\n"));
        assert!(output.contains("#### Nutritional Value\n\n18g protein, 12g fibre\n"));
    }

    #[test]
    fn test_multiline_recipe_is_numbered() {
        let output = create_test_entry(Weekday::Monday, "Rinse chickpeas\nFry onion\nSimmer").to_string();
        assert!(output.contains("1. Rinse chickpeas\n2. Fry onion\n3. Simmer\n"));

        let numbered = create_test_entry(Weekday::Monday, "1. Rinse\n2) Fry").to_string();
        assert!(numbered.contains("1. Rinse\n2) Fry\n"));
        assert!(!numbered.contains("1. 1. Rinse"));
    }

    #[test]
    fn test_leading_quantity_is_not_a_step_number() {
        let output = create_test_entry(Weekday::Monday, "1.5 cups oats\n2)Stir\nCook").to_string();
        assert!(output.contains("1. 1.5 cups oats\n2. 2)Stir\n3. Cook\n"));
    }

    #[test]
    fn test_plan_display_in_weekday_order() {
        let candidates = ["Friday", "Thursday", "Wednesday", "Tuesday", "Monday"]
            .iter()
            .map(|day| PlanEntryCandidate::from(create_test_entry(day.parse().unwrap(), "Cook")))
            .collect();
        let plan = validate_and_clean(candidates).expect("valid plan");

        let output = plan.to_string();
        assert!(output.starts_with("# Weekday Meal Plan\n"));
        let monday = output.find("## Monday").expect("monday");
        let friday = output.find("## Friday").expect("friday");
        assert!(monday < friday);
    }

    #[test]
    fn test_history_record_display() {
        let record = HistoryRecord {
            id: 7,
            created_at: Timestamp::from_second(1_700_000_000).unwrap(),
            weekly_goal: Some("less sugar".to_string()),
            diet_descriptor: Some("DASH Diet".to_string()),
            plan: vec![create_test_entry(Weekday::Monday, "Cook")],
        };
        let output = record.to_string();
        assert!(output.starts_with("## 7. less sugar\n"));
        assert!(output.contains("- Diet: DASH Diet\n"));
        assert!(output.contains("- Monday: Chickpea curry\n"));

        let empty = HistoryRecord {
            plan: Vec::new(),
            weekly_goal: None,
            ..record
        };
        let output = empty.to_string();
        assert!(output.contains("(no goal)"));
        assert!(output.contains("- Meals: unavailable"));
    }
}
