use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

use super::template::Template;
use crate::constants::NEW_PROJECT_SUFFIX;
use crate::errors::Error;

/// Lifecycle status of a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProjectStatus {
    #[default]
    Planning,
    #[serde(rename = "In Progress")]
    InProgress,
    Review,
    Completed,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Planning => "Planning",
            ProjectStatus::InProgress => "In Progress",
            ProjectStatus::Review => "Review",
            ProjectStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Completion status of a single project task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Done,
}

/// A unit of work inside a project, derived from a template task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectTask {
    /// Positional id (`task<i>`), unique within its project only
    pub id: String,
    pub title: String,
    pub status: TaskStatus,
}

/// A client engagement, usually spun up from a template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    /// Owning client. Not checked against the client directory.
    pub client_id: String,
    /// Template the project was created from, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    pub name: String,
    pub status: ProjectStatus,
    /// Due date as `YYYY-MM-DD`
    pub deadline: String,
    /// Percentage in 0..=100; not derived from task completion
    pub progress: u8,
    #[serde(default)]
    pub tasks: Vec<ProjectTask>,
}

/// Materializes a project from a template.
///
/// Every template task becomes a project task with the same title, status
/// `todo` and an id derived from its position. The project starts in
/// `Planning` with zero progress.
///
/// # Arguments
/// * `template` - Source template
/// * `client_id` - Owning client
/// * `id` - Fresh project identifier
/// * `deadline` - Placeholder due date
pub fn project_from_template(
    template: &Template,
    client_id: &str,
    id: String,
    deadline: String,
) -> Project {
    let tasks = template
        .tasks
        .iter()
        .enumerate()
        .map(|(i, title)| ProjectTask {
            id: format!("task{}", i),
            title: title.clone(),
            status: TaskStatus::Todo,
        })
        .collect();

    Project {
        id,
        client_id: client_id.to_string(),
        template_id: Some(template.id.clone()),
        name: format!("{}{}", template.name, NEW_PROJECT_SUFFIX),
        status: ProjectStatus::Planning,
        deadline,
        progress: 0,
        tasks,
    }
}

/// In-memory, insertion-ordered project collection
#[derive(Debug, Default, Clone)]
pub struct ProjectBook {
    projects: Vec<Project>,
}

impl ProjectBook {
    /// Builds a book from seed projects, rejecting repeated ids and
    /// progress above 100
    pub fn from_projects(projects: Vec<Project>) -> Result<Self, Error> {
        let mut book = ProjectBook::default();
        for project in projects {
            if book.get(&project.id).is_some() {
                return Err(Error::DuplicateProjectId(project.id));
            }
            if project.progress > 100 {
                return Err(Error::InvalidProgress {
                    id: project.id,
                    progress: project.progress,
                });
            }
            book.projects.push(project);
        }
        Ok(book)
    }

    pub fn list(&self) -> &[Project] {
        &self.projects
    }

    pub fn get(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// Appends a project and returns a copy of what was stored
    pub fn add(&mut self, project: Project) -> Project {
        info!(
            "Project '{}' created for client {} ({} tasks)",
            project.name,
            project.client_id,
            project.tasks.len()
        );
        self.projects.push(project.clone());
        project
    }
}
