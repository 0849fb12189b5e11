//! Repository functions for todos.
//!
//! Every function takes the caller's connection (normally the request
//! transaction); nothing here commits or rolls back.

use sea_orm::ConnectionTrait;
use tracing::debug;
use uuid::Uuid;

use crate::adapters::todos_sea::{self as adapter, TodoCreate, TodoUpdate};
use crate::domain::{Page, Pagination, Paginator, Rejected, Todo, TodoParams};
use crate::entities::todos;
use crate::errors::domain::{DomainError, NotFoundKind};

/// Outcome of a validate-then-write operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validated<T> {
    Valid(T),
    Invalid(Rejected),
}

impl From<todos::Model> for Todo {
    fn from(model: todos::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            completed: model.completed,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

fn not_found(id: Uuid) -> DomainError {
    DomainError::not_found(NotFoundKind::Todo, format!("Todo {id} not found"))
}

pub async fn find<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
) -> Result<Option<Todo>, DomainError> {
    let model = adapter::find_by_id(conn, id)
        .await
        .map_err(|e| DomainError::from(e).context(format!("failed to load todo {id}")))?;
    Ok(model.map(Todo::from))
}

/// Like [`find`], but a missing row is a `NotFound` error.
pub async fn require<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
) -> Result<Todo, DomainError> {
    find(conn, id).await?.ok_or_else(|| not_found(id))
}

pub async fn list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    pagination: Pagination,
) -> Result<Page<Todo>, DomainError> {
    let (rows, total) = adapter::list_page(conn, pagination.page_index(), pagination.per_page)
        .await
        .map_err(|e| DomainError::from(e).context("failed to list todos"))?;

    let items: Vec<Todo> = rows.into_iter().map(Todo::from).collect();
    let paginator = Paginator::new(pagination, total, items.len() as u64);
    Ok(Page { items, paginator })
}

pub async fn count<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, DomainError> {
    adapter::count_all(conn)
        .await
        .map_err(|e| DomainError::from(e).context("failed to count todos"))
}

/// Validate `params` as a new todo and insert it when valid.
pub async fn validate_and_create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    params: TodoParams,
) -> Result<Validated<Todo>, DomainError> {
    let changes = match params.into_new() {
        Ok(changes) => changes,
        Err(rejected) => {
            debug!(fields = rejected.errors.len(), "todo create rejected");
            return Ok(Validated::Invalid(rejected));
        }
    };

    let mut dto = TodoCreate::new(changes.title).with_completed(changes.completed);
    if let Some(description) = changes.description {
        dto = dto.with_description(description);
    }
    let model = adapter::create(conn, dto)
        .await
        .map_err(|e| DomainError::from(e).context("failed to create todo"))?;
    Ok(Validated::Valid(model.into()))
}

/// Validate `params` against `current` and write the merged values when valid.
pub async fn validate_and_update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    current: &Todo,
    params: TodoParams,
) -> Result<Validated<Todo>, DomainError> {
    let changes = match params.into_update(current) {
        Ok(changes) => changes,
        Err(rejected) => {
            debug!(todo_id = %current.id, fields = rejected.errors.len(), "todo update rejected");
            return Ok(Validated::Invalid(rejected));
        }
    };

    let dto = TodoUpdate {
        id: current.id,
        title: changes.title,
        description: changes.description,
        completed: changes.completed,
    };
    let model = adapter::update(conn, dto)
        .await
        .map_err(|e| DomainError::from(e).context(format!("failed to update todo {}", current.id)))?;
    Ok(Validated::Valid(model.into()))
}

/// Delete `todo`; a row that is already gone is `NotFound`.
pub async fn destroy<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    todo: &Todo,
) -> Result<(), DomainError> {
    let removed = adapter::delete_by_id(conn, todo.id)
        .await
        .map_err(|e| DomainError::from(e).context(format!("failed to delete todo {}", todo.id)))?;

    if removed == 0 {
        return Err(not_found(todo.id));
    }
    Ok(())
}
