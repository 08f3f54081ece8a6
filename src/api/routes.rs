//! API routes configuration module

use crate::api::handlers::*;
use crate::core::AppState;
use crate::llm::GenerationClient;
use axum::{
    routing::{get, post, put},
    Extension, Router,
};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Application state shared by all handlers
pub type SharedState = Arc<Mutex<AppState>>;

/// Generation client shared by all handlers
pub type SharedClient = Arc<GenerationClient>;

/// Creates and configures the API router with all routes
///
/// # Arguments
/// * `state` - Application state, locked per operation
/// * `client` - Generation client used by the generate endpoints
///
/// # Returns
/// * `Router` - Configured router with all API endpoints
pub fn app(state: SharedState, client: SharedClient) -> Router {
    Router::new()
        .route("/clients", get(list_clients))
        .route("/clients/:id/report", get(last_report).post(generate_report))
        .route("/templates", get(list_templates).post(create_template))
        .route("/templates/generate", post(generate_template))
        .route("/templates/generate/cancel", post(cancel_template_generation))
        .route("/templates/:id/duplicate", post(duplicate_template))
        .route("/templates/:id/use", post(use_template))
        .route("/templates/:id/edit", post(begin_edit))
        .route("/projects", get(list_projects))
        .route("/projects/:id", get(get_project))
        .route("/workflows/generate", post(generate_workflow))
        .route("/workflows/cancel", post(cancel_workflow_generation))
        .route("/workflows/current", get(current_workflow))
        .route("/editor", get(get_editor).patch(update_fields))
        .route("/editor/tasks", post(add_task))
        .route("/editor/tasks/:index", put(set_task).delete(remove_task))
        .route("/editor/commit", post(commit_edit))
        .route("/editor/cancel", post(cancel_edit))
        .layer(Extension(state))
        .layer(Extension(client))
}
