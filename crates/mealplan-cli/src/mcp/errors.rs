//! Error handling utilities for MCP server

use mealplan_core::{MealPlanError, PipelineError};
use rmcp::ErrorData;

/// Converts a planner error to an MCP error; only malformed requests are
/// reported as invalid parameters.
pub fn to_mcp_error(message: &str, error: &MealPlanError) -> ErrorData {
    if error.is_client_error() {
        ErrorData::invalid_params(format!("{message}: {error}"), None)
    } else {
        ErrorData::internal_error(format!("{message}: {error}"), None)
    }
}

/// Converts a failed pipeline run to an MCP error.
pub fn pipeline_to_mcp_error(error: &PipelineError) -> ErrorData {
    let message = format!("Failed to generate meal plan: {error}");
    if error.is_client_error() {
        ErrorData::invalid_params(message, None)
    } else {
        ErrorData::internal_error(message, None)
    }
}
