//! MCP tool handlers implementation

use std::sync::Arc;

use log::debug;
use mealplan_core::{self as core, diet_options, DietOptions, HistoryRecords, MealPlanner};
use rmcp::{
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
    ErrorData,
};
use schemars::JsonSchema;
use serde::Deserialize;
use tokio::sync::Mutex;

use super::errors::{pipeline_to_mcp_error, to_mcp_error};

const DEFAULT_HISTORY_LIMIT: u32 = 20;
const MAX_HISTORY_LIMIT: u32 = 100;

/// Transparent MCP wrapper adding schema generation to core request types.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct McpParams<T>(T)
where
    T: JsonSchema;

impl<T> JsonSchema for McpParams<T>
where
    T: JsonSchema,
{
    fn schema_name() -> std::borrow::Cow<'static, str> {
        T::schema_name()
    }

    fn json_schema(g: &mut schemars::SchemaGenerator) -> schemars::Schema {
        T::json_schema(g)
    }
}

impl<T> AsRef<T> for McpParams<T>
where
    T: JsonSchema,
{
    fn as_ref(&self) -> &T {
        &self.0
    }
}

pub type GeneratePlan = McpParams<core::UserInput>;

/// Parameters for listing plan history.
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct ListHistory {
    /// Maximum number of plans to return, newest first (1-100, default 20)
    #[serde(default)]
    pub limit: Option<u32>,
}

pub type McpResult = Result<CallToolResult, ErrorData>;

fn text_result(text: String) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text)])
}

/// Handler implementations for the MCP server
pub struct McpHandlers {
    planner: Arc<Mutex<MealPlanner>>,
}

impl McpHandlers {
    pub fn new(planner: Arc<Mutex<MealPlanner>>) -> Self {
        Self { planner }
    }

    pub fn list_diets(&self) -> McpResult {
        Ok(text_result(DietOptions(diet_options()).to_string()))
    }

    pub async fn generate_plan(&self, Parameters(params): Parameters<GeneratePlan>) -> McpResult {
        debug!("generate_plan: {params:?}");

        let generated = self
            .planner
            .lock()
            .await
            .run(params.as_ref())
            .await
            .map_err(|e| pipeline_to_mcp_error(&e))?;

        Ok(text_result(format!(
            "{}\nSaved as history entry {}.\n",
            generated.plan, generated.history_id
        )))
    }

    pub async fn show_current_plan(&self) -> McpResult {
        let plan = self
            .planner
            .lock()
            .await
            .current_plan()
            .await
            .map_err(|e| to_mcp_error("Failed to load current plan", &e))?;

        Ok(text_result(match plan {
            Some(plan) => plan.to_string(),
            None => "No current plan found.".to_string(),
        }))
    }

    pub async fn list_history(&self, Parameters(params): Parameters<ListHistory>) -> McpResult {
        debug!("list_history: {params:?}");

        let limit = params.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
        if !(1..=MAX_HISTORY_LIMIT).contains(&limit) {
            return Err(ErrorData::invalid_params(
                format!("limit must be between 1 and {MAX_HISTORY_LIMIT}"),
                None,
            ));
        }

        let records = self
            .planner
            .lock()
            .await
            .list_history(limit)
            .await
            .map_err(|e| to_mcp_error("Failed to list plan history", &e))?;

        Ok(text_result(HistoryRecords(records).to_string()))
    }
}
