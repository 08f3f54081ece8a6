use chrono::Local;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{info, warn};

use super::client::Client;
use super::editor::{TemplateEditor, TemplateField};
use super::ids::IdGenerator;
use super::project::{project_from_template, Project, ProjectBook};
use super::template::{Template, TemplateDraft};
use super::template_store::TemplateStore;
use super::workflow::WorkflowStep;
use crate::config::AppConfig;
use crate::constants::{PROJECT_ID_PREFIX, TEMPLATE_ID_PREFIX};
use crate::errors::Error;

/// The view a generation result belongs to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GenerationSlot {
    WorkflowBuilder,
    TemplateCreation,
    ClientReport(String),
}

/// Tag carried by an in-flight generation.
///
/// Only the most recently issued ticket of a slot can apply its result;
/// anything older arrived late and is discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationTicket {
    pub slot: GenerationSlot,
    seq: u64,
}

/// All mutable application data, owned by one controller.
///
/// Every operation the shell can trigger is a method here.
#[derive(Debug)]
pub struct AppState {
    clients: Vec<Client>,
    templates: TemplateStore,
    projects: ProjectBook,
    editor: TemplateEditor,
    current_workflow: Option<Vec<WorkflowStep>>,
    reports: HashMap<String, String>,
    ids: IdGenerator,
    pending: HashMap<GenerationSlot, u64>,
    next_seq: u64,
    default_client_id: String,
    deadline_lead_time: Duration,
}

impl AppState {
    /// Builds the state from the configured seed data
    pub fn from_config(config: &AppConfig) -> Result<Self, Error> {
        let seed = config.seed()?;
        let templates = TemplateStore::from_templates(seed.templates)?;
        let projects = ProjectBook::from_projects(seed.projects)?;
        info!(
            "Loaded {} clients, {} templates, {} projects",
            seed.clients.len(),
            templates.len(),
            projects.list().len()
        );
        Ok(AppState {
            clients: seed.clients,
            templates,
            projects,
            editor: TemplateEditor::default(),
            current_workflow: None,
            reports: HashMap::new(),
            ids: IdGenerator::default(),
            pending: HashMap::new(),
            next_seq: 0,
            default_client_id: config.projects.default_client_id.clone(),
            deadline_lead_time: config.projects.deadline_lead_time,
        })
    }

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    pub fn client(&self, id: &str) -> Result<&Client, Error> {
        self.clients
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| Error::ClientNotFound(id.to_string()))
    }

    pub fn templates(&self) -> &[Template] {
        self.templates.list()
    }

    pub fn template(&self, id: &str) -> Result<&Template, Error> {
        self.templates
            .get(id)
            .ok_or_else(|| Error::TemplateNotFound(id.to_string()))
    }

    pub fn projects(&self) -> &[Project] {
        self.projects.list()
    }

    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.get(id)
    }

    pub fn editor(&self) -> &TemplateEditor {
        &self.editor
    }

    pub fn current_workflow(&self) -> Option<&[WorkflowStep]> {
        self.current_workflow.as_deref()
    }

    pub fn report(&self, client_id: &str) -> Option<&str> {
        self.reports.get(client_id).map(String::as_str)
    }

    /// Creates a template from a draft, defaulting missing fields
    pub fn create_template(&mut self, draft: TemplateDraft) -> Result<Template, Error> {
        let template = draft.into_template(self.ids.next(TEMPLATE_ID_PREFIX));
        self.templates.create(template)
    }

    pub fn duplicate_template(&mut self, id: &str) -> Result<Template, Error> {
        let new_id = self.ids.next(TEMPLATE_ID_PREFIX);
        self.templates.duplicate(id, new_id)
    }

    /// Spins up a project from a template.
    ///
    /// # Arguments
    /// * `template_id` - Source template
    /// * `client_id` - Owning client; the configured default when `None`.
    ///   Not checked against the client directory.
    pub fn use_template(
        &mut self,
        template_id: &str,
        client_id: Option<&str>,
    ) -> Result<Project, Error> {
        let template = self.template(template_id)?.clone();
        let client_id = client_id
            .map(str::to_string)
            .unwrap_or_else(|| self.default_client_id.clone());
        let deadline = self.placeholder_deadline()?;
        let id = self.ids.next(PROJECT_ID_PREFIX);
        let project = project_from_template(&template, &client_id, id, deadline);
        Ok(self.projects.add(project))
    }

    pub fn begin_edit(&mut self, template_id: &str) -> Result<Template, Error> {
        let template = self.template(template_id)?.clone();
        self.editor.begin_edit(&template)?;
        Ok(template)
    }

    pub fn set_field(&mut self, field: TemplateField) -> Result<(), Error> {
        self.editor.set_field(field)
    }

    pub fn set_task_title(&mut self, index: usize, title: String) -> Result<(), Error> {
        self.editor.set_task_title(index, title)
    }

    pub fn add_task(&mut self) -> Result<usize, Error> {
        self.editor.add_task()
    }

    pub fn remove_task(&mut self, index: usize) -> Result<String, Error> {
        self.editor.remove_task(index)
    }

    pub fn commit_edit(&mut self) -> Result<Template, Error> {
        self.editor.commit(&mut self.templates)
    }

    pub fn cancel_edit(&mut self) -> Result<Template, Error> {
        self.editor.cancel()
    }

    /// Issues a ticket for a new generation, superseding any in flight for
    /// the same slot
    pub fn issue_ticket(&mut self, slot: GenerationSlot) -> GenerationTicket {
        self.next_seq += 1;
        self.pending.insert(slot.clone(), self.next_seq);
        GenerationTicket {
            slot,
            seq: self.next_seq,
        }
    }

    /// Abandons whatever generation is in flight for `slot`
    pub fn cancel_generation(&mut self, slot: &GenerationSlot) -> bool {
        self.pending.remove(slot).is_some()
    }

    pub fn apply_generated_template(
        &mut self,
        ticket: GenerationTicket,
        draft: TemplateDraft,
    ) -> Result<Template, Error> {
        self.redeem(&ticket)?;
        self.create_template(draft)
    }

    pub fn apply_workflow(
        &mut self,
        ticket: GenerationTicket,
        steps: Vec<WorkflowStep>,
    ) -> Result<Vec<WorkflowStep>, Error> {
        self.redeem(&ticket)?;
        self.current_workflow = Some(steps.clone());
        Ok(steps)
    }

    pub fn apply_report(&mut self, ticket: GenerationTicket, report: String) -> Result<String, Error> {
        self.redeem(&ticket)?;
        if let GenerationSlot::ClientReport(client_id) = &ticket.slot {
            self.reports.insert(client_id.clone(), report.clone());
        }
        Ok(report)
    }

    fn redeem(&mut self, ticket: &GenerationTicket) -> Result<(), Error> {
        if self.pending.get(&ticket.slot) == Some(&ticket.seq) {
            self.pending.remove(&ticket.slot);
            Ok(())
        } else {
            warn!("Discarding stale generation result for {:?}", ticket.slot);
            Err(Error::StaleGeneration)
        }
    }

    fn placeholder_deadline(&self) -> Result<String, Error> {
        let lead = chrono::Duration::from_std(self.deadline_lead_time)
            .map_err(|e| Error::InvalidDuration(e.to_string()))?;
        let deadline = Local::now()
            .date_naive()
            .checked_add_signed(lead)
            .ok_or_else(|| {
                Error::InvalidDuration(format!(
                    "deadline lead time {} is out of range",
                    humantime::format_duration(self.deadline_lead_time)
                ))
            })?;
        Ok(deadline.format("%Y-%m-%d").to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Category, EditorState, ProjectStatus, StepType, TaskStatus};
    use chrono::NaiveDate;

    fn state() -> AppState {
        AppState::from_config(&AppConfig::default()).unwrap()
    }

    #[test]
    fn seeded_from_mock_data() {
        let state = state();
        assert_eq!(state.clients().len(), 4);
        assert_eq!(state.templates().len(), 2);
        assert_eq!(state.projects().len(), 2);
        assert_eq!(state.client("3").unwrap().name, "Wayne Ent");
        assert!(matches!(state.client("9"), Err(Error::ClientNotFound(_))));
    }

    #[test]
    fn created_templates_get_fresh_ids() {
        let mut state = state();
        let a = state.create_template(TemplateDraft::default()).unwrap();
        let b = state.create_template(TemplateDraft::default()).unwrap();
        assert_ne!(a.id, b.id);
        assert!(a.id.starts_with('t'));
        assert_eq!(state.templates().len(), 4);
    }

    #[test]
    fn use_template_appends_project() {
        let mut state = state();
        let project = state.use_template("t2", Some("3")).unwrap();
        assert_eq!(project.client_id, "3");
        assert_eq!(project.template_id.as_deref(), Some("t2"));
        assert_eq!(project.tasks.len(), 7);
        assert!(project.tasks.iter().all(|t| t.status == TaskStatus::Todo));
        assert_eq!(project.status, ProjectStatus::Planning);
        assert_eq!(state.projects().len(), 3);
        assert_eq!(state.projects().last(), Some(&project));
        assert!(NaiveDate::parse_from_str(&project.deadline, "%Y-%m-%d").is_ok());
    }

    #[test]
    fn use_template_defaults_client() {
        let mut state = state();
        let project = state.use_template("t1", None).unwrap();
        assert_eq!(project.client_id, "1");
    }

    #[test]
    fn oversized_lead_time_is_an_error() {
        let mut config = AppConfig::default();
        config.projects.deadline_lead_time = humantime::parse_duration("1000000years").unwrap();
        let mut state = AppState::from_config(&config).unwrap();

        assert!(matches!(
            state.use_template("t1", None),
            Err(Error::InvalidDuration(_))
        ));
        assert_eq!(state.projects().len(), 2);
    }

    #[test]
    fn use_unknown_template_fails() {
        let mut state = state();
        assert!(matches!(
            state.use_template("t404", None),
            Err(Error::TemplateNotFound(_))
        ));
        assert_eq!(state.projects().len(), 2);
    }

    #[test]
    fn edit_session_round_trip() {
        let mut state = state();
        state.begin_edit("t1").unwrap();
        state.set_field(TemplateField::Category(Category::Design)).unwrap();
        state.remove_task(0).unwrap();
        state.commit_edit().unwrap();

        let t1 = state.template("t1").unwrap();
        assert_eq!(t1.category, Category::Design);
        assert_eq!(t1.tasks[0], "Wireframing");
        assert_eq!(state.editor().state(), &EditorState::Idle);
    }

    #[test]
    fn latest_ticket_wins() {
        let mut state = state();
        let first = state.issue_ticket(GenerationSlot::WorkflowBuilder);
        let second = state.issue_ticket(GenerationSlot::WorkflowBuilder);
        let steps = vec![WorkflowStep::new("1", StepType::Trigger, "a", "b", "c")];

        assert!(matches!(
            state.apply_workflow(first, steps.clone()),
            Err(Error::StaleGeneration)
        ));
        assert!(state.current_workflow().is_none());
        state.apply_workflow(second.clone(), steps.clone()).unwrap();
        assert_eq!(state.current_workflow(), Some(steps.as_slice()));

        // a ticket applies once
        assert!(state.apply_workflow(second, steps).is_err());
    }

    #[test]
    fn slots_are_independent() {
        let mut state = state();
        let report_1 = state.issue_ticket(GenerationSlot::ClientReport("1".to_string()));
        let _report_2 = state.issue_ticket(GenerationSlot::ClientReport("2".to_string()));
        state.apply_report(report_1, "fine".to_string()).unwrap();
        assert_eq!(state.report("1"), Some("fine"));
        assert_eq!(state.report("2"), None);
    }

    #[test]
    fn cancelled_generation_is_discarded() {
        let mut state = state();
        let ticket = state.issue_ticket(GenerationSlot::TemplateCreation);
        assert!(state.cancel_generation(&GenerationSlot::TemplateCreation));
        assert!(matches!(
            state.apply_generated_template(ticket, TemplateDraft::default()),
            Err(Error::StaleGeneration)
        ));
        assert_eq!(state.templates().len(), 2);
    }
}
