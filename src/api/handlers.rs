use crate::api::errors::{api_error, ApiError};
use crate::api::routes::{SharedClient, SharedState};
use crate::core::{
    Category, Client, EditorState, GenerationSlot, Project, Template, TemplateDraft,
    TemplateField, WorkflowStep,
};
use crate::errors::Error;
use axum::http::StatusCode;
use axum::{
    extract::{Extension, Path},
    Json,
};
use serde::{Deserialize, Serialize};

/// Request payload for the generation endpoints
#[derive(Deserialize)]
pub struct PromptRequest {
    pub prompt: String,
}

/// Optional payload when spinning up a project
#[derive(Deserialize, Default)]
pub struct UseTemplateRequest {
    #[serde(default)]
    pub client_id: Option<String>,
}

/// Field changes applied to the working copy; absent fields are left alone
#[derive(Deserialize, Default)]
pub struct FieldUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<Category>,
}

#[derive(Deserialize)]
pub struct TaskTitle {
    pub title: String,
}

#[derive(Serialize)]
pub struct ReportResponse {
    pub client_id: String,
    pub report: String,
}

#[derive(Serialize)]
pub struct CancelResponse {
    pub cancelled: bool,
}

fn require_prompt(payload: &PromptRequest) -> Result<(), ApiError> {
    if payload.prompt.trim().is_empty() {
        return Err(Error::EmptyPrompt.into());
    }
    Ok(())
}

pub async fn list_clients(Extension(state): Extension<SharedState>) -> Json<Vec<Client>> {
    let state = state.lock().await;
    Json(state.clients().to_vec())
}

/// Generates an executive summary for a client.
///
/// The state lock is released while the provider is working; the result is
/// only kept if no newer report request for the same client was issued.
#[axum::debug_handler]
pub async fn generate_report(
    Path(id): Path<String>,
    Extension(state): Extension<SharedState>,
    Extension(client): Extension<SharedClient>,
) -> Result<Json<ReportResponse>, ApiError> {
    let (ticket, name, metrics) = {
        let mut state = state.lock().await;
        let target = state.client(&id)?.clone();
        let ticket = state.issue_ticket(GenerationSlot::ClientReport(id.clone()));
        (ticket, target.name.clone(), target.metrics())
    };

    let report = client.client_report(&name, &metrics).await;
    let report = state.lock().await.apply_report(ticket, report)?;

    Ok(Json(ReportResponse {
        client_id: id,
        report,
    }))
}

/// Returns the last report kept for a client, if any
pub async fn last_report(
    Path(id): Path<String>,
    Extension(state): Extension<SharedState>,
) -> Result<Json<Option<ReportResponse>>, ApiError> {
    let state = state.lock().await;
    state.client(&id)?;
    Ok(Json(state.report(&id).map(|report| ReportResponse {
        client_id: id.clone(),
        report: report.to_string(),
    })))
}

pub async fn list_templates(Extension(state): Extension<SharedState>) -> Json<Vec<Template>> {
    let state = state.lock().await;
    Json(state.templates().to_vec())
}

pub async fn create_template(
    Extension(state): Extension<SharedState>,
    Json(draft): Json<TemplateDraft>,
) -> Result<(StatusCode, Json<Template>), ApiError> {
    let template = state.lock().await.create_template(draft)?;
    Ok((StatusCode::CREATED, Json(template)))
}

/// Creates a template from a prompt via the generation client
#[axum::debug_handler]
pub async fn generate_template(
    Extension(state): Extension<SharedState>,
    Extension(client): Extension<SharedClient>,
    Json(payload): Json<PromptRequest>,
) -> Result<(StatusCode, Json<Template>), ApiError> {
    require_prompt(&payload)?;
    let ticket = state
        .lock()
        .await
        .issue_ticket(GenerationSlot::TemplateCreation);

    let draft = client.project_template(&payload.prompt).await;
    let template = state.lock().await.apply_generated_template(ticket, draft)?;
    Ok((StatusCode::CREATED, Json(template)))
}

pub async fn cancel_template_generation(
    Extension(state): Extension<SharedState>,
) -> Json<CancelResponse> {
    let cancelled = state
        .lock()
        .await
        .cancel_generation(&GenerationSlot::TemplateCreation);
    Json(CancelResponse { cancelled })
}

pub async fn duplicate_template(
    Path(id): Path<String>,
    Extension(state): Extension<SharedState>,
) -> Result<(StatusCode, Json<Template>), ApiError> {
    let copy = state.lock().await.duplicate_template(&id)?;
    Ok((StatusCode::CREATED, Json(copy)))
}

/// Spins up a project from a template; the body is optional
pub async fn use_template(
    Path(id): Path<String>,
    Extension(state): Extension<SharedState>,
    payload: Option<Json<UseTemplateRequest>>,
) -> Result<(StatusCode, Json<Project>), ApiError> {
    let Json(payload) = payload.unwrap_or_default();
    let project = state
        .lock()
        .await
        .use_template(&id, payload.client_id.as_deref())?;
    Ok((StatusCode::CREATED, Json(project)))
}

pub async fn list_projects(Extension(state): Extension<SharedState>) -> Json<Vec<Project>> {
    let state = state.lock().await;
    Json(state.projects().to_vec())
}

pub async fn get_project(
    Path(id): Path<String>,
    Extension(state): Extension<SharedState>,
) -> Result<Json<Project>, ApiError> {
    let state = state.lock().await;
    state
        .project(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "Project not found"))
}

#[axum::debug_handler]
pub async fn generate_workflow(
    Extension(state): Extension<SharedState>,
    Extension(client): Extension<SharedClient>,
    Json(payload): Json<PromptRequest>,
) -> Result<Json<Vec<WorkflowStep>>, ApiError> {
    require_prompt(&payload)?;
    let ticket = state
        .lock()
        .await
        .issue_ticket(GenerationSlot::WorkflowBuilder);

    let steps = client.workflow_from_prompt(&payload.prompt).await;
    let steps = state.lock().await.apply_workflow(ticket, steps)?;
    Ok(Json(steps))
}

pub async fn cancel_workflow_generation(
    Extension(state): Extension<SharedState>,
) -> Json<CancelResponse> {
    let cancelled = state
        .lock()
        .await
        .cancel_generation(&GenerationSlot::WorkflowBuilder);
    Json(CancelResponse { cancelled })
}

pub async fn current_workflow(
    Extension(state): Extension<SharedState>,
) -> Json<Option<Vec<WorkflowStep>>> {
    let state = state.lock().await;
    Json(state.current_workflow().map(<[_]>::to_vec))
}

pub async fn get_editor(Extension(state): Extension<SharedState>) -> Json<EditorState> {
    let state = state.lock().await;
    Json(state.editor().state().clone())
}

pub async fn begin_edit(
    Path(id): Path<String>,
    Extension(state): Extension<SharedState>,
) -> Result<Json<EditorState>, ApiError> {
    let mut state = state.lock().await;
    state.begin_edit(&id)?;
    Ok(Json(state.editor().state().clone()))
}

pub async fn update_fields(
    Extension(state): Extension<SharedState>,
    Json(update): Json<FieldUpdate>,
) -> Result<Json<EditorState>, ApiError> {
    let mut state = state.lock().await;
    let fields = [
        update.name.map(TemplateField::Name),
        update.description.map(TemplateField::Description),
        update.category.map(TemplateField::Category),
    ];
    if !state.editor().is_editing() {
        return Err(Error::NoActiveEdit.into());
    }
    for field in fields.into_iter().flatten() {
        state.set_field(field)?;
    }
    Ok(Json(state.editor().state().clone()))
}

pub async fn add_task(
    Extension(state): Extension<SharedState>,
) -> Result<(StatusCode, Json<EditorState>), ApiError> {
    let mut state = state.lock().await;
    state.add_task()?;
    Ok((StatusCode::CREATED, Json(state.editor().state().clone())))
}

pub async fn set_task(
    Path(index): Path<usize>,
    Extension(state): Extension<SharedState>,
    Json(payload): Json<TaskTitle>,
) -> Result<Json<EditorState>, ApiError> {
    let mut state = state.lock().await;
    state.set_task_title(index, payload.title)?;
    Ok(Json(state.editor().state().clone()))
}

pub async fn remove_task(
    Path(index): Path<usize>,
    Extension(state): Extension<SharedState>,
) -> Result<Json<EditorState>, ApiError> {
    let mut state = state.lock().await;
    state.remove_task(index)?;
    Ok(Json(state.editor().state().clone()))
}

pub async fn commit_edit(
    Extension(state): Extension<SharedState>,
) -> Result<Json<Template>, ApiError> {
    let template = state.lock().await.commit_edit()?;
    Ok(Json(template))
}

pub async fn cancel_edit(
    Extension(state): Extension<SharedState>,
) -> Result<Json<EditorState>, ApiError> {
    let mut state = state.lock().await;
    state.cancel_edit()?;
    Ok(Json(state.editor().state().clone()))
}
