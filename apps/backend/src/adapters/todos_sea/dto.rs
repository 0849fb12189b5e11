//! DTOs for todos_sea adapter.

/// DTO for inserting a new todo.
#[derive(Debug, Clone)]
pub struct TodoCreate {
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
}

impl TodoCreate {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            completed: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }
}

/// DTO for overwriting the editable columns of an existing todo.
#[derive(Debug, Clone)]
pub struct TodoUpdate {
    pub id: uuid::Uuid,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
}
