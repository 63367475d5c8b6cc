//! Meal planner CLI application
//!
//! Command-line interface and MCP server for the weekday meal planner.

mod args;
mod cli;
mod mcp;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use mcp::{run_stdio_server, MealPlanMcpServer};
use mealplan_core::{MealPlannerBuilder, ModelSettings};
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        command,
    } = Args::parse();

    let output_dir = match &command {
        Some(Generate(args)) => args.output_dir.clone(),
        _ => None,
    };

    let planner = MealPlannerBuilder::new()
        .with_database_path(database_file)
        .with_output_dir(output_dir)
        .with_model_settings(ModelSettings::from_env())
        .build()
        .await
        .context("Failed to initialize planner")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!("Meal planner started");

    match command {
        Some(Diets) | None => Cli::new(planner, renderer).list_diets(),
        Some(Generate(args)) => Cli::new(planner, renderer).generate(&args).await,
        Some(Show) => Cli::new(planner, renderer).show().await,
        Some(History { limit }) => Cli::new(planner, renderer).history(limit).await,
        Some(Export { path }) => Cli::new(planner, renderer).export(&path).await,
        Some(Serve) => {
            info!("Starting meal planner MCP server");
            run_stdio_server(MealPlanMcpServer::new(planner))
                .await
                .context("MCP server failed")
        }
    }
}
