use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::{COPY_PREFIX, DEFAULT_TEMPLATE_DESCRIPTION, DEFAULT_TEMPLATE_NAME};

/// Business area a template belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Category {
    Design,
    Development,
    Marketing,
    #[default]
    Strategy,
}

impl Category {
    /// All categories, in the order they are offered to the provider
    pub const ALL: [Category; 4] = [
        Category::Design,
        Category::Development,
        Category::Marketing,
        Category::Strategy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Design => "Design",
            Category::Development => "Development",
            Category::Marketing => "Marketing",
            Category::Strategy => "Strategy",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ();

    /// Parses a category name, ignoring case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or(())
    }
}

/// A reusable, named sequence of task titles used to seed new projects
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    /// Unique identifier within the template store
    pub id: String,
    /// Display name
    pub name: String,
    /// Short description of the deliverable
    pub description: String,
    /// Business area
    pub category: Category,
    /// Ordered task titles; position is the only identity a task has here
    #[serde(default)]
    pub tasks: Vec<String>,
}

impl Template {
    /// Builds a copy of this template under a new id.
    ///
    /// The copy gets its own task list, so later edits to either template
    /// never show up in the other.
    ///
    /// # Arguments
    /// * `id` - Identifier for the copy
    ///
    /// # Returns
    /// * `Template` - The copy, named `Copy of <name>`
    pub fn duplicate_as(&self, id: String) -> Template {
        Template {
            id,
            name: format!("{}{}", COPY_PREFIX, self.name),
            description: self.description.clone(),
            category: self.category,
            tasks: self.tasks.clone(),
        }
    }
}

/// A possibly incomplete template, as produced by the generation client or
/// submitted by a caller. Missing fields are defaulted when it is promoted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateDraft {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub tasks: Option<Vec<String>>,
}

impl TemplateDraft {
    /// Promotes the draft to a full template under the given id.
    ///
    /// Absent or blank name and description fall back to placeholders, an
    /// absent category becomes `Strategy` and absent tasks become empty.
    pub fn into_template(self, id: String) -> Template {
        Template {
            id,
            name: non_blank(self.name).unwrap_or_else(|| DEFAULT_TEMPLATE_NAME.to_string()),
            description: non_blank(self.description)
                .unwrap_or_else(|| DEFAULT_TEMPLATE_DESCRIPTION.to_string()),
            category: self.category.unwrap_or_default(),
            tasks: self.tasks.unwrap_or_default(),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Template {
        Template {
            id: "t1".to_string(),
            name: "Website Redesign".to_string(),
            description: "Complete overhaul".to_string(),
            category: Category::Development,
            tasks: vec!["Wireframing".to_string(), "Launch".to_string()],
        }
    }

    #[test]
    fn duplicate_marks_name_and_keeps_content() {
        let source = sample();
        let copy = source.duplicate_as("t2".to_string());
        assert_eq!(copy.id, "t2");
        assert_eq!(copy.name, "Copy of Website Redesign");
        assert_eq!(copy.description, source.description);
        assert_eq!(copy.category, Category::Development);
        assert_eq!(copy.tasks, source.tasks);
    }

    #[test]
    fn duplicate_does_not_share_tasks() {
        let source = sample();
        let mut copy = source.duplicate_as("t2".to_string());
        copy.tasks[0] = "Moodboard".to_string();
        copy.tasks.push("Retro".to_string());
        assert_eq!(source.tasks, vec!["Wireframing", "Launch"]);
    }

    #[test]
    fn draft_defaults_missing_and_blank_fields() {
        let draft = TemplateDraft {
            name: Some("   ".to_string()),
            description: None,
            category: None,
            tasks: None,
        };
        let template = draft.into_template("t9".to_string());
        assert_eq!(template.name, "Untitled Template");
        assert_eq!(template.description, "No description");
        assert_eq!(template.category, Category::Strategy);
        assert!(template.tasks.is_empty());
    }

    #[test]
    fn category_parses_case_insensitively() {
        assert_eq!("marketing".parse::<Category>(), Ok(Category::Marketing));
        assert_eq!(" Design ".parse::<Category>(), Ok(Category::Design));
        assert!("Sales".parse::<Category>().is_err());
    }

    #[test]
    fn category_serializes_as_display_name() {
        let json = serde_json::to_string(&Category::Development).unwrap();
        assert_eq!(json, "\"Development\"");
    }
}
