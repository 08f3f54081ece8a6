//! Main entry point for the application.
//!
//! This module initializes logging, loads environment variables and configuration,
//! builds the generation client and the in-memory application state, then either
//! serves the HTTP API or runs a single generation from the command line.
//!
//! All state is volatile: it is seeded from configuration on start and
//! discarded on exit.

mod api;
mod cli;
mod config;
mod constants;
mod core;
mod errors;
mod llm;
mod utils;

use clap::Parser;
use cli::{Cli, Command};
use crate::core::{AppState, GenerationSlot};
use llm::GenerationClient;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

/// Main entry point that initializes and runs the application.
///
/// # Initialization steps:
/// 1. Parse CLI arguments
/// 2. Initialize logging system
/// 3. Load environment variables
/// 4. Load configuration and seed state
/// 5. Run the requested command
#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    utils::init_logging(&cli.logging_level, cli.log_to_file);

    if let Err(e) = dotenvy::dotenv() {
        debug!("No .env file loaded: {}", e);
    }

    if let Err(e) = run(cli).await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = config::load_config(cli.config.as_deref())?;
    let client = Arc::new(GenerationClient::from_config(&config.generation)?);
    let mut state = AppState::from_config(&config)?;

    match cli.command {
        Command::Serve { port } => {
            let port = port.unwrap_or(config.server.port);
            info!("Starting API server on port {}", port);
            api::server::launch_server(port, Arc::new(Mutex::new(state)), client).await?;
        }
        Command::Template { prompt, use_for } => {
            if prompt.trim().is_empty() {
                return Err(errors::Error::EmptyPrompt.into());
            }
            let ticket = state.issue_ticket(GenerationSlot::TemplateCreation);
            let bar = utils::spinner("Generating template...");
            let draft = client.project_template(&prompt).await;
            bar.finish_and_clear();

            let template = state.apply_generated_template(ticket, draft)?;
            utils::print_template(&template);

            if let Some(client_id) = use_for {
                let project = state.use_template(&template.id, Some(&client_id))?;
                utils::print_project(&project);
            }
        }
        Command::Workflow { prompt } => {
            if prompt.trim().is_empty() {
                return Err(errors::Error::EmptyPrompt.into());
            }
            let ticket = state.issue_ticket(GenerationSlot::WorkflowBuilder);
            let bar = utils::spinner("Architecting workflow...");
            let steps = client.workflow_from_prompt(&prompt).await;
            bar.finish_and_clear();

            let steps = state.apply_workflow(ticket, steps)?;
            utils::print_workflow(&steps);
        }
        Command::Report { client_id } => {
            let target = state.client(&client_id)?.clone();
            let ticket = state.issue_ticket(GenerationSlot::ClientReport(client_id));
            let bar = utils::spinner("Analyzing account...");
            let report = client.client_report(&target.name, &target.metrics()).await;
            bar.finish_and_clear();

            let report = state.apply_report(ticket, report)?;
            utils::display_header(&format!("📊 {} ({})", target.name, target.company));
            println!("{}", report);
        }
    }

    Ok(())
}
