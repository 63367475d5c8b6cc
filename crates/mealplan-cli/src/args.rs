use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use mealplan_core::{UserInput, CUSTOM_DIET_OPTION, NO_DIET_OPTION};

/// Weekday meal planner
///
/// Generates a Monday to Friday meal plan from the food you have on hand, a
/// weekly wellness goal and a diet, using a generative language model. Plans
/// are validated before they are stored as the current plan and appended to
/// the plan history. The planner can also run as an MCP (Model Context
/// Protocol) server for integration with AI assistants.
#[derive(Parser)]
#[command(version, about, name = "mealplan")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/mealplan/mealplan.db
    #[arg(long, global = true, env = "MEALPLAN_DB_PATH")]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the meal planner
#[derive(Subcommand)]
pub enum Commands {
    /// List the selectable diets
    Diets,
    /// Generate, validate and store a new weekday plan
    #[command(alias = "g")]
    Generate(GenerateArgs),
    /// Show the current plan
    Show,
    /// List previously generated plans, newest first
    History {
        /// Maximum number of plans to list
        #[arg(short, long, default_value_t = 20, value_parser = clap::value_parser!(u32).range(1..=100))]
        limit: u32,
    },
    /// Write the current plan as CSV
    Export {
        /// Destination file
        path: PathBuf,
    },
    /// Start the MCP server
    Serve,
}

/// Generate a new weekday plan
#[derive(ClapArgs)]
pub struct GenerateArgs {
    /// Food item you have on hand; repeat for several items
    #[arg(short, long = "item", value_name = "ITEM")]
    pub items: Vec<String>,

    /// What you want to achieve this week
    #[arg(short, long)]
    pub goal: String,

    /// Diet to follow, as listed by `mealplan diets`
    #[arg(short, long)]
    pub diet: Option<String>,

    /// Free-text description of your own diet; implies --diet "Custom Diet"
    #[arg(long)]
    pub custom_diet: Option<String>,

    /// Directory receiving the request artifacts, the raw model output and
    /// the plan CSV
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
}

impl From<&GenerateArgs> for UserInput {
    fn from(val: &GenerateArgs) -> Self {
        let diet_choice = match (&val.diet, &val.custom_diet) {
            (Some(diet), _) => diet.clone(),
            (None, Some(_)) => CUSTOM_DIET_OPTION.to_string(),
            (None, None) => NO_DIET_OPTION.to_string(),
        };

        UserInput {
            available_items: val.items.clone(),
            weekly_goal: val.goal.clone(),
            diet_choice,
            custom_diet_description: val.custom_diet.clone(),
        }
    }
}
