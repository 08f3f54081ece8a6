//! Template edit session.
//!
//! The editor is either idle or holds a private working copy of one
//! template. Edits touch only the working copy until `commit` writes it
//! back to the store; `cancel` throws it away.

use serde::Serialize;
use tracing::{debug, info};

use super::template::{Category, Template};
use super::template_store::TemplateStore;
use crate::constants::NEW_TASK_PLACEHOLDER;
use crate::errors::Error;

/// Current state of the edit session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum EditorState {
    #[default]
    Idle,
    Editing { working_copy: Template },
}

/// A scalar template field that can be changed while editing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateField {
    Name(String),
    Description(String),
    Category(Category),
}

#[derive(Debug, Default)]
pub struct TemplateEditor {
    state: EditorState,
}

impl TemplateEditor {
    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn working_copy(&self) -> Option<&Template> {
        match &self.state {
            EditorState::Editing { working_copy } => Some(working_copy),
            EditorState::Idle => None,
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.state, EditorState::Editing { .. })
    }

    /// Starts editing `template`.
    ///
    /// Only valid while idle; an open session must be committed or cancelled
    /// first.
    pub fn begin_edit(&mut self, template: &Template) -> Result<(), Error> {
        if let EditorState::Editing { working_copy } = &self.state {
            return Err(Error::EditInProgress(working_copy.id.clone()));
        }
        debug!("Editing template {}", template.id);
        self.state = EditorState::Editing {
            working_copy: template.clone(),
        };
        Ok(())
    }

    pub fn set_field(&mut self, field: TemplateField) -> Result<(), Error> {
        let working = self.working_mut()?;
        match field {
            TemplateField::Name(name) => working.name = name,
            TemplateField::Description(description) => working.description = description,
            TemplateField::Category(category) => working.category = category,
        }
        Ok(())
    }

    pub fn set_task_title(&mut self, index: usize, title: String) -> Result<(), Error> {
        let working = self.working_mut()?;
        let len = working.tasks.len();
        let task = working
            .tasks
            .get_mut(index)
            .ok_or(Error::TaskIndexOutOfRange { index, len })?;
        *task = title;
        Ok(())
    }

    /// Appends a placeholder task and returns its index
    pub fn add_task(&mut self) -> Result<usize, Error> {
        let working = self.working_mut()?;
        working.tasks.push(NEW_TASK_PLACEHOLDER.to_string());
        Ok(working.tasks.len() - 1)
    }

    /// Removes the task at `index`; later tasks shift down by one.
    ///
    /// # Returns
    /// * `Result<String, Error>` - The removed title
    pub fn remove_task(&mut self, index: usize) -> Result<String, Error> {
        let working = self.working_mut()?;
        let len = working.tasks.len();
        if index >= len {
            return Err(Error::TaskIndexOutOfRange { index, len });
        }
        Ok(working.tasks.remove(index))
    }

    /// Writes the working copy back to `store` and returns to idle.
    ///
    /// If the store no longer holds the template the error is returned and
    /// the session stays open, so the edits are not lost.
    pub fn commit(&mut self, store: &mut TemplateStore) -> Result<Template, Error> {
        let working = self.working_copy().cloned().ok_or(Error::NoActiveEdit)?;
        store.replace(&working.id, working.clone())?;
        self.state = EditorState::Idle;
        info!("Committed edits to template {}", working.id);
        Ok(working)
    }

    /// Discards the working copy without touching the store
    pub fn cancel(&mut self) -> Result<Template, Error> {
        match std::mem::take(&mut self.state) {
            EditorState::Editing { working_copy } => {
                debug!("Discarded edits to template {}", working_copy.id);
                Ok(working_copy)
            }
            EditorState::Idle => Err(Error::NoActiveEdit),
        }
    }

    fn working_mut(&mut self) -> Result<&mut Template, Error> {
        match &mut self.state {
            EditorState::Editing { working_copy } => Ok(working_copy),
            EditorState::Idle => Err(Error::NoActiveEdit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(tasks: &[&str]) -> Template {
        Template {
            id: "t1".to_string(),
            name: "Social Media Campaign".to_string(),
            description: "Monthly content".to_string(),
            category: Category::Marketing,
            tasks: tasks.iter().map(|t| t.to_string()).collect(),
        }
    }

    fn store_with(t: &Template) -> TemplateStore {
        TemplateStore::from_templates(vec![t.clone()]).unwrap()
    }

    #[test]
    fn idle_rejects_everything_but_begin() {
        let mut editor = TemplateEditor::default();
        let mut store = TemplateStore::default();
        assert!(matches!(editor.add_task(), Err(Error::NoActiveEdit)));
        assert!(matches!(editor.remove_task(0), Err(Error::NoActiveEdit)));
        assert!(matches!(
            editor.set_task_title(0, "x".to_string()),
            Err(Error::NoActiveEdit)
        ));
        assert!(matches!(
            editor.set_field(TemplateField::Name("x".to_string())),
            Err(Error::NoActiveEdit)
        ));
        assert!(matches!(editor.commit(&mut store), Err(Error::NoActiveEdit)));
        assert!(matches!(editor.cancel(), Err(Error::NoActiveEdit)));
    }

    #[test]
    fn begin_twice_is_rejected() {
        let t = template(&["A"]);
        let mut editor = TemplateEditor::default();
        editor.begin_edit(&t).unwrap();
        assert!(matches!(editor.begin_edit(&t), Err(Error::EditInProgress(id)) if id == "t1"));
    }

    #[test]
    fn cancel_leaves_store_untouched() {
        let t = template(&["A", "B"]);
        let mut store = store_with(&t);
        let mut editor = TemplateEditor::default();

        editor.begin_edit(store.get("t1").unwrap()).unwrap();
        editor.set_field(TemplateField::Name("Renamed".to_string())).unwrap();
        editor.set_task_title(0, "Changed".to_string()).unwrap();
        editor.add_task().unwrap();
        editor.cancel().unwrap();

        assert_eq!(store.get("t1"), Some(&t));
        assert!(!editor.is_editing());
        assert!(editor.commit(&mut store).is_err());
    }

    #[test]
    fn commit_stores_exact_working_copy() {
        let t = template(&["A", "B"]);
        let mut store = store_with(&t);
        let mut editor = TemplateEditor::default();

        editor.begin_edit(store.get("t1").unwrap()).unwrap();
        editor
            .set_field(TemplateField::Description("Quarterly".to_string()))
            .unwrap();
        editor.set_field(TemplateField::Category(Category::Design)).unwrap();
        editor.set_task_title(1, "B2".to_string()).unwrap();
        let expected = editor.working_copy().unwrap().clone();

        let committed = editor.commit(&mut store).unwrap();
        assert_eq!(committed, expected);
        assert_eq!(store.get("t1"), Some(&expected));
        assert_eq!(editor.state(), &EditorState::Idle);
    }

    #[test]
    fn working_copy_is_isolated_until_commit() {
        let t = template(&["A"]);
        let mut store = store_with(&t);
        let mut editor = TemplateEditor::default();
        editor.begin_edit(store.get("t1").unwrap()).unwrap();
        editor.add_task().unwrap();
        assert_eq!(store.get("t1").unwrap().tasks, vec!["A"]);
        editor.commit(&mut store).unwrap();
        assert_eq!(store.get("t1").unwrap().tasks, vec!["A", "New Task"]);
    }

    #[test]
    fn removal_shifts_and_add_appends_at_end() {
        let t = template(&["A", "B", "C"]);
        let mut editor = TemplateEditor::default();
        editor.begin_edit(&t).unwrap();

        assert_eq!(editor.remove_task(1).unwrap(), "B");
        assert_eq!(editor.working_copy().unwrap().tasks, vec!["A", "C"]);

        assert_eq!(editor.add_task().unwrap(), 2);
        assert_eq!(
            editor.working_copy().unwrap().tasks,
            vec!["A", "C", "New Task"]
        );
    }

    #[test]
    fn out_of_range_task_index_is_reported() {
        let t = template(&["A"]);
        let mut editor = TemplateEditor::default();
        editor.begin_edit(&t).unwrap();
        assert!(matches!(
            editor.remove_task(3),
            Err(Error::TaskIndexOutOfRange { index: 3, len: 1 })
        ));
        assert!(matches!(
            editor.set_task_title(1, "x".to_string()),
            Err(Error::TaskIndexOutOfRange { index: 1, len: 1 })
        ));
    }

    #[test]
    fn commit_to_vanished_template_keeps_session() {
        let t = template(&["A"]);
        let mut store = TemplateStore::default();
        let mut editor = TemplateEditor::default();
        editor.begin_edit(&t).unwrap();
        editor.add_task().unwrap();

        assert!(matches!(
            editor.commit(&mut store),
            Err(Error::TemplateNotFound(_))
        ));
        assert!(editor.is_editing());
        assert_eq!(editor.working_copy().unwrap().tasks.len(), 2);
    }

    #[test]
    fn state_serializes_with_tag() {
        let mut editor = TemplateEditor::default();
        let idle = serde_json::to_value(editor.state()).unwrap();
        assert_eq!(idle["state"], "idle");

        editor.begin_edit(&template(&["A"])).unwrap();
        let editing = serde_json::to_value(editor.state()).unwrap();
        assert_eq!(editing["state"], "editing");
        assert_eq!(editing["working_copy"]["id"], "t1");
    }
}
