//! Prompt construction for weekday meal plan generation.

/// System message sent alongside every planning prompt.
pub const SYSTEM_INSTRUCTION: &str = "You are a meticulous dietitian and recipe developer.";

/// Bullet line used when the user listed no pantry items.
pub const NO_ITEMS_PLACEHOLDER: &str = "- (no items provided)";

const INTRODUCTION: &str = "\
You are a registered dietitian and culinary expert helping a client plan weekday meals.
Craft a Monday-through-Friday plan that uses the user's available items when reasonable,
advances the weekly wellness goal, and aligns with the stated dietary approach.";

const REQUIREMENTS: &str = r#"Requirements
------------
1. Create exactly five entries, one for each weekday from Monday through Friday.
2. Each entry must include the keys "day", "meal", "rationale", "recipe", "nutritional_value".
3. Vary meal types, cuisines, and primary ingredients across the week while honoring restrictions.
4. Assume the client has staple pantry basics (olive oil, salt, pepper, spices) unless the diet forbids them.
5. If the available items list omits an essential component, you may introduce reasonable grocery additions while keeping focus on items on hand.
6. Write each recipe as step-by-step instructions, one step per line."#;

const OUTPUT_FORMAT: &str = r#"Output Format
-------------
Respond with a bare JSON array only. Do not wrap the array in an object, and do not include explanations, code fences, Markdown, or any text before or after the JSON.
Return an array of exactly five objects ordered Monday through Friday with the structure:
[
  {
    "day": "Monday",
    "meal": "meal description",
    "rationale": "why this meal fits the diet and weekly goal",
    "recipe": "step-by-step instructions",
    "nutritional_value": "key nutrition facts"
  },
  ... (Tuesday through Friday)
]"#;

/// Renders user preferences into the instruction string sent to the model.
///
/// The output is fully determined by the arguments.
pub fn build_prompt(available_items: &[String], weekly_goal: &str, diet_description: &str) -> String {
    let items_section = if available_items.is_empty() {
        NO_ITEMS_PLACEHOLDER.to_string()
    } else {
        available_items
            .iter()
            .map(|item| format!("- {item}"))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        "{INTRODUCTION}\n\n\
         Context\n\
         -------\n\
         Weekly goal: {weekly_goal}\n\
         Dietary framework: {diet_description}\n\
         Ingredients on hand:\n\
         {items_section}\n\n\
         {REQUIREMENTS}\n\n\
         {OUTPUT_FORMAT}"
    )
}
