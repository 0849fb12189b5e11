//! Server-rendered HTML views.
//!
//! Templates are compiled into the binary and registered once at startup.

use serde::Serialize;
use tera::{Context, Tera};
use tracing::error;

use crate::domain::{Page, Todo, TodoForm, ValidationErrors};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::web::flash::FlashMessage;

const TEMPLATES: [(&str, &str); 6] = [
    ("layout.html", include_str!("../../templates/layout.html")),
    ("todos/_form.html", include_str!("../../templates/todos/_form.html")),
    ("todos/index.html", include_str!("../../templates/todos/index.html")),
    ("todos/show.html", include_str!("../../templates/todos/show.html")),
    ("todos/new.html", include_str!("../../templates/todos/new.html")),
    ("todos/edit.html", include_str!("../../templates/todos/edit.html")),
];

pub struct Views {
    tera: Tera,
}

impl std::fmt::Debug for Views {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Views")
            .field("templates", &TEMPLATES.len())
            .finish()
    }
}

impl Views {
    pub fn new() -> Result<Self, AppError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES)
            .map_err(|e| AppError::config(format!("failed to register templates: {e}")))?;
        Ok(Self { tera })
    }

    fn render(&self, name: &str, context: &Context) -> Result<String, AppError> {
        self.tera.render(name, context).map_err(|e| {
            error!(template = name, error = ?e, "template rendering failed");
            AppError::internal(ErrorCode::RenderError, format!("failed to render {name}"))
        })
    }

    fn base_context(flash: &[FlashMessage]) -> Context {
        let mut context = Context::new();
        context.insert("flash", flash);
        context
    }

    pub fn index(&self, page: &Page<Todo>, flash: &[FlashMessage]) -> Result<String, AppError> {
        let mut context = Self::base_context(flash);
        context.insert("todos", &page.items);
        context.insert("pagination", &page.paginator);
        context.insert("has_previous", &page.paginator.has_previous());
        context.insert("has_next", &page.paginator.has_next());
        self.render("todos/index.html", &context)
    }

    /// `destroyed` hides the edit and destroy controls.
    pub fn show(
        &self,
        todo: &Todo,
        destroyed: bool,
        flash: &[FlashMessage],
    ) -> Result<String, AppError> {
        let mut context = Self::base_context(flash);
        context.insert("todo", todo);
        context.insert("destroyed", &destroyed);
        self.render("todos/show.html", &context)
    }

    pub fn new_form(
        &self,
        form: &TodoForm,
        errors: &ValidationErrors,
        flash: &[FlashMessage],
    ) -> Result<String, AppError> {
        let mut context = Self::form_context(form, errors, "/todos".to_string(), flash);
        context.insert("todo", &None::<Todo>);
        self.render("todos/new.html", &context)
    }

    pub fn edit_form(
        &self,
        todo: &Todo,
        form: &TodoForm,
        errors: &ValidationErrors,
        flash: &[FlashMessage],
    ) -> Result<String, AppError> {
        let action = format!("/todos/{}?_method=PUT", todo.id);
        let mut context = Self::form_context(form, errors, action, flash);
        context.insert("todo", todo);
        self.render("todos/edit.html", &context)
    }

    fn form_context(
        form: &TodoForm,
        errors: &ValidationErrors,
        action: String,
        flash: &[FlashMessage],
    ) -> Context {
        let mut context = Self::base_context(flash);
        context.insert("form", form);
        context.insert("errors", errors);
        context.insert("action", &action);
        context
    }
}

/// JSON body of the list endpoint.
#[derive(Serialize)]
pub struct TodoList<'a> {
    pub todos: &'a [Todo],
    pub pagination: &'a crate::domain::Paginator,
}

impl<'a> From<&'a Page<Todo>> for TodoList<'a> {
    fn from(page: &'a Page<Todo>) -> Self {
        Self {
            todos: &page.items,
            pagination: &page.paginator,
        }
    }
}
