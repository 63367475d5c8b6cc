//! MCP server implementation for the meal planner
//!
//! Exposes plan generation and the stored plans as Model Context Protocol
//! tools so AI assistants can drive the planner over stdio.

use std::sync::Arc;

use anyhow::Result;
use log::{debug, error, info};
use mealplan_core::MealPlanner;
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ServerHandler,
};
use tokio::{
    signal::unix::{signal, SignalKind},
    sync::Mutex,
};

pub mod errors;
pub mod handlers;

pub use handlers::{GeneratePlan, ListHistory, McpResult};

const INSTRUCTIONS: &str = r#"The meal planner creates Monday to Friday meal plans from the food a user has on hand, a weekly wellness goal and a diet.

## Workflow
1. Call `list_diets` to see the accepted `diet_choice` values
2. Call `generate_plan` with `available_items`, `weekly_goal` and `diet_choice`. For "Custom Diet" also pass `custom_diet_description`
3. The validated plan replaces the current plan and is appended to the history
4. Use `show_current_plan` and `list_history` to review stored plans

Generation calls a language model once and can take a while. Requests with an empty goal or an unknown diet are rejected as invalid parameters; model or storage failures are reported as internal errors."#;

/// MCP server for the meal planner
#[derive(Clone)]
pub struct MealPlanMcpServer {
    // One pipeline run at a time.
    planner: Arc<Mutex<MealPlanner>>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl MealPlanMcpServer {
    pub fn new(planner: MealPlanner) -> Self {
        Self {
            planner: Arc::new(Mutex::new(planner)),
            tool_router: Self::tool_router(),
        }
    }

    fn handlers(&self) -> handlers::McpHandlers {
        handlers::McpHandlers::new(self.planner.clone())
    }

    #[tool(
        name = "list_diets",
        description = "List the diets accepted as `diet_choice` by generate_plan, including the 'No Specific Diet' and 'Custom Diet' options."
    )]
    async fn list_diets(&self) -> McpResult {
        self.handlers().list_diets()
    }

    #[tool(
        name = "generate_plan",
        description = "Generate a Monday to Friday meal plan. Provide available_items (food on hand), weekly_goal (required) and diet_choice (from list_diets). With 'Custom Diet', describe the diet in custom_diet_description. The validated plan becomes the current plan and is added to the history. Returns the plan as markdown."
    )]
    async fn generate_plan(&self, params: Parameters<GeneratePlan>) -> McpResult {
        self.handlers().generate_plan(params).await
    }

    #[tool(
        name = "show_current_plan",
        description = "Show the most recently generated plan with meals, rationale, recipes and nutritional value for each weekday."
    )]
    async fn show_current_plan(&self) -> McpResult {
        self.handlers().show_current_plan().await
    }

    #[tool(
        name = "list_history",
        description = "List previously generated plans, newest first, with their goal, diet, creation time and meals. Optional limit between 1 and 100 (default 20)."
    )]
    async fn list_history(&self, params: Parameters<ListHistory>) -> McpResult {
        self.handlers().list_history(params).await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for MealPlanMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "mealplan".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                website_url: None,
                icons: None,
            },
            instructions: Some(INSTRUCTIONS.to_string()),
        }
    }
}

/// Run the MCP server with stdio transport
pub async fn run_stdio_server(server: MealPlanMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!("Starting meal planner MCP server on stdio");
    debug!(
        "Server created with {} tools",
        server.tool_router.list_all().len()
    );

    let service = server.serve(stdio()).await.map_err(|e| {
        error!("serving error: {e:?}");
        e
    })?;

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down gracefully...");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down gracefully...");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mealplan_core::MealPlannerBuilder;
    use tempfile::TempDir;

    async fn create_test_server() -> (TempDir, MealPlanMcpServer) {
        let temp_dir = TempDir::new().expect("temp dir");
        let planner = MealPlannerBuilder::new()
            .with_database_path(Some(temp_dir.path().join("mcp.db")))
            .build()
            .await
            .expect("planner");
        (temp_dir, MealPlanMcpServer::new(planner))
    }

    #[tokio::test]
    async fn test_server_registers_tools() {
        let (_temp_dir, server) = create_test_server().await;
        let names: Vec<String> = server
            .tool_router
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect();

        for expected in ["list_diets", "generate_plan", "show_current_plan", "list_history"] {
            assert!(names.iter().any(|name| name == expected), "missing {expected}");
        }
        assert_eq!(server.get_info().server_info.name, "mealplan");
    }

    #[tokio::test]
    async fn test_list_history_rejects_out_of_range_limit() {
        let (_temp_dir, server) = create_test_server().await;

        let err = server
            .list_history(Parameters(ListHistory { limit: Some(0) }))
            .await
            .unwrap_err();
        assert_eq!(err.code, rmcp::model::ErrorCode::INVALID_PARAMS);

        let ok = server
            .list_history(Parameters(ListHistory::default()))
            .await
            .expect("empty history");
        assert_eq!(ok.is_error, Some(false));
    }

    #[tokio::test]
    async fn test_generate_with_empty_goal_is_invalid_params() {
        let (_temp_dir, server) = create_test_server().await;
        let params: GeneratePlan = serde_json::from_value(serde_json::json!({
            "available_items": ["rice"],
            "weekly_goal": "",
            "diet_choice": "No Specific Diet"
        }))
        .expect("params");

        let err = server.generate_plan(Parameters(params)).await.unwrap_err();
        assert_eq!(err.code, rmcp::model::ErrorCode::INVALID_PARAMS);
    }
}
