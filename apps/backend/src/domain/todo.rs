//! The `Todo` record and the form-binding rules that produce valid changes.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::validation::ValidationErrors;

pub const TITLE_MAX_CHARS: usize = 255;
pub const DESCRIPTION_MAX_CHARS: usize = 2000;

pub const TITLE_BLANK: &str = "Title can not be blank.";
pub const TITLE_TOO_LONG: &str = "Title must be at most 255 characters.";
pub const DESCRIPTION_TOO_LONG: &str = "Description must be at most 2000 characters.";
pub const COMPLETED_INVALID: &str = "Completed must be true or false.";

/// A persisted todo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Todo {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Raw `completed` input: a JSON bool or number, or form text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum FlagInput {
    Bool(bool),
    Number(i64),
    Text(String),
}

impl FlagInput {
    /// `None` when the input is not a recognizable boolean.
    pub fn to_bool(&self) -> Option<bool> {
        match self {
            FlagInput::Bool(b) => Some(*b),
            FlagInput::Number(1) => Some(true),
            FlagInput::Number(0) => Some(false),
            FlagInput::Number(_) => None,
            FlagInput::Text(text) => match text.trim().to_ascii_lowercase().as_str() {
                "" | "false" | "off" | "0" | "no" => Some(false),
                "true" | "on" | "1" | "yes" => Some(true),
                _ => None,
            },
        }
    }
}

/// Fields a client may submit. Absent fields are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TodoParams {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: Option<FlagInput>,
}

/// Validated values ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoChanges {
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
}

/// Values shown in the new/edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TodoForm {
    pub title: String,
    pub description: String,
    pub completed: bool,
}

impl From<&Todo> for TodoForm {
    fn from(todo: &Todo) -> Self {
        Self {
            title: todo.title.clone(),
            description: todo.description.clone().unwrap_or_default(),
            completed: todo.completed,
        }
    }
}

/// Validation failure: the messages plus the submitted values to re-render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejected {
    pub errors: ValidationErrors,
    pub form: TodoForm,
}

impl TodoParams {
    /// Validate as a new record; absent fields take their defaults.
    pub fn into_new(self) -> Result<TodoChanges, Rejected> {
        self.resolve(None)
    }

    /// Validate as an update of `current`; absent fields keep stored values.
    pub fn into_update(self, current: &Todo) -> Result<TodoChanges, Rejected> {
        self.resolve(Some(current))
    }

    fn resolve(self, current: Option<&Todo>) -> Result<TodoChanges, Rejected> {
        let mut errors = ValidationErrors::new();

        let title = match self.title {
            Some(title) => title.trim().to_string(),
            None => current.map(|t| t.title.clone()).unwrap_or_default(),
        };
        if title.is_empty() {
            errors.add("title", TITLE_BLANK);
        } else if title.chars().count() > TITLE_MAX_CHARS {
            errors.add("title", TITLE_TOO_LONG);
        }

        let description = match self.description {
            Some(description) => {
                let trimmed = description.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            None => current.and_then(|t| t.description.clone()),
        };
        if description
            .as_deref()
            .is_some_and(|d| d.chars().count() > DESCRIPTION_MAX_CHARS)
        {
            errors.add("description", DESCRIPTION_TOO_LONG);
        }

        let completed = match self.completed {
            Some(flag) => flag.to_bool().unwrap_or_else(|| {
                errors.add("completed", COMPLETED_INVALID);
                false
            }),
            None => current.is_some_and(|t| t.completed),
        };

        if errors.is_empty() {
            Ok(TodoChanges {
                title,
                description,
                completed,
            })
        } else {
            Err(Rejected {
                errors,
                form: TodoForm {
                    title,
                    description: description.unwrap_or_default(),
                    completed,
                },
            })
        }
    }
}
