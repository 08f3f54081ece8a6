use tracing::{info, warn};

use super::template::Template;
use crate::errors::Error;

/// Ordered, in-memory collection of committed templates.
///
/// Ids are unique within the store. Every mutation is a single synchronous
/// step, so observers only ever see the state before or after it.
#[derive(Debug, Default, Clone)]
pub struct TemplateStore {
    templates: Vec<Template>,
}

impl TemplateStore {
    /// Builds a store from seed templates, rejecting repeated ids
    pub fn from_templates(templates: Vec<Template>) -> Result<Self, Error> {
        let mut store = TemplateStore::default();
        for template in templates {
            store.create(template)?;
        }
        Ok(store)
    }

    pub fn list(&self) -> &[Template] {
        &self.templates
    }

    pub fn get(&self, id: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Appends a fully formed template.
    ///
    /// # Arguments
    /// * `template` - Template whose id the caller generated
    ///
    /// # Returns
    /// * `Result<Template, Error>` - Copy of the stored template, or
    ///   `DuplicateTemplateId` if the id is taken
    pub fn create(&mut self, template: Template) -> Result<Template, Error> {
        if self.get(&template.id).is_some() {
            return Err(Error::DuplicateTemplateId(template.id));
        }
        info!("Template '{}' created ({})", template.name, template.id);
        self.templates.push(template.clone());
        Ok(template)
    }

    /// Appends a copy of `source_id` under `new_id`.
    ///
    /// The copy owns its own task list; see [`Template::duplicate_as`].
    pub fn duplicate(&mut self, source_id: &str, new_id: String) -> Result<Template, Error> {
        let copy = self
            .get(source_id)
            .ok_or_else(|| Error::TemplateNotFound(source_id.to_string()))?
            .duplicate_as(new_id);
        self.create(copy)
    }

    /// Swaps the stored template with the given id for `updated`.
    ///
    /// An unknown id is reported rather than ignored, so an edit is never
    /// silently dropped. `updated` must keep the id it replaces.
    pub fn replace(&mut self, id: &str, updated: Template) -> Result<(), Error> {
        if updated.id != id {
            return Err(Error::TemplateIdMismatch {
                expected: id.to_string(),
                found: updated.id,
            });
        }
        match self.templates.iter_mut().find(|t| t.id == id) {
            Some(slot) => {
                info!("Template '{}' updated ({})", updated.name, id);
                *slot = updated;
                Ok(())
            }
            None => {
                warn!("Replace requested for unknown template {}", id);
                Err(Error::TemplateNotFound(id.to_string()))
            }
        }
    }
}
