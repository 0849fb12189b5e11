//! Handlers for the todo resource.
//!
//! Every handler borrows the request transaction first, then finds, binds
//! and validates, and finally renders HTML or JSON depending on the request.

use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse};
use tracing::info;

use crate::domain::{Rejected, Todo, TodoForm, TodoParams, ValidationErrors};
use crate::error::AppError;
use crate::extractors::{FormBody, PageQuery, RequestTxn, TodoId};
use crate::repos::todos::{self, Validated};
use crate::state::app_state::AppState;
use crate::views::TodoList;
use crate::web::{flash, Format};

pub const CREATED_MESSAGE: &str = "Todo was created successfully";
pub const UPDATED_MESSAGE: &str = "Todo was updated successfully";
pub const DESTROYED_MESSAGE: &str = "Todo was destroyed successfully";

fn html(status: StatusCode, body: String) -> HttpResponse {
    HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .body(body)
}

fn respond_todo(
    req: &HttpRequest,
    state: &AppState,
    status: StatusCode,
    todo: &Todo,
    destroyed: bool,
) -> Result<HttpResponse, AppError> {
    match Format::negotiate(req) {
        Format::Json => Ok(HttpResponse::build(status).json(todo)),
        Format::Html => {
            let body = state.views().show(todo, destroyed, &flash::take(req))?;
            Ok(html(status, body))
        }
    }
}

/// 422: problem details for JSON clients, the form again for browsers.
fn respond_invalid(
    req: &HttpRequest,
    state: &AppState,
    current: Option<&Todo>,
    rejected: Rejected,
) -> Result<HttpResponse, AppError> {
    match Format::negotiate(req) {
        Format::Json => Err(AppError::invalid_fields(rejected.errors)),
        Format::Html => {
            let flash = flash::take(req);
            let body = match current {
                Some(todo) => state
                    .views()
                    .edit_form(todo, &rejected.form, &rejected.errors, &flash)?,
                None => state
                    .views()
                    .new_form(&rejected.form, &rejected.errors, &flash)?,
            };
            Ok(html(StatusCode::UNPROCESSABLE_ENTITY, body))
        }
    }
}

/// GET /todos
pub async fn list(
    req: HttpRequest,
    txn: RequestTxn,
    PageQuery(pagination): PageQuery,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let page = todos::list(&*txn, pagination).await?;

    match Format::negotiate(&req) {
        Format::Json => Ok(HttpResponse::Ok().json(TodoList::from(&page))),
        Format::Html => {
            let body = state.views().index(&page, &flash::take(&req))?;
            Ok(html(StatusCode::OK, body))
        }
    }
}

/// GET /todos/{todo_id}
pub async fn show(
    req: HttpRequest,
    txn: RequestTxn,
    id: TodoId,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let todo = todos::require(&*txn, id.0).await?;
    respond_todo(&req, &state, StatusCode::OK, &todo, false)
}

/// GET /todos/new
pub async fn new(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let form = TodoForm::default();

    match Format::negotiate(&req) {
        Format::Json => Ok(HttpResponse::Ok().json(form)),
        Format::Html => {
            let body = state
                .views()
                .new_form(&form, &ValidationErrors::new(), &flash::take(&req))?;
            Ok(html(StatusCode::OK, body))
        }
    }
}

/// POST /todos
pub async fn create(
    req: HttpRequest,
    txn: RequestTxn,
    body: FormBody,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let params: TodoParams = body.bind()?;

    match todos::validate_and_create(&*txn, params).await? {
        Validated::Valid(todo) => {
            info!(todo_id = %todo.id, "todo created");
            flash::success(&req, CREATED_MESSAGE);
            respond_todo(&req, &state, StatusCode::CREATED, &todo, false)
        }
        Validated::Invalid(rejected) => respond_invalid(&req, &state, None, rejected),
    }
}

/// GET /todos/{todo_id}/edit
pub async fn edit(
    req: HttpRequest,
    txn: RequestTxn,
    id: TodoId,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let todo = todos::require(&*txn, id.0).await?;

    match Format::negotiate(&req) {
        Format::Json => Ok(HttpResponse::Ok().json(&todo)),
        Format::Html => {
            let body = state.views().edit_form(
                &todo,
                &TodoForm::from(&todo),
                &ValidationErrors::new(),
                &flash::take(&req),
            )?;
            Ok(html(StatusCode::OK, body))
        }
    }
}

/// PUT /todos/{todo_id}
pub async fn update(
    req: HttpRequest,
    txn: RequestTxn,
    id: TodoId,
    body: FormBody,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let current = todos::require(&*txn, id.0).await?;
    let params: TodoParams = body.bind()?;

    match todos::validate_and_update(&*txn, &current, params).await? {
        Validated::Valid(todo) => {
            info!(todo_id = %todo.id, "todo updated");
            flash::success(&req, UPDATED_MESSAGE);
            respond_todo(&req, &state, StatusCode::OK, &todo, false)
        }
        Validated::Invalid(rejected) => respond_invalid(&req, &state, Some(&current), rejected),
    }
}

/// DELETE /todos/{todo_id}
pub async fn destroy(
    req: HttpRequest,
    txn: RequestTxn,
    id: TodoId,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let todo = todos::require(&*txn, id.0).await?;
    todos::destroy(&*txn, &todo).await?;

    info!(todo_id = %todo.id, "todo destroyed");
    flash::success(&req, DESTROYED_MESSAGE);
    respond_todo(&req, &state, StatusCode::OK, &todo, true)
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(list))
        .route("", web::post().to(create))
        .route("/new", web::get().to(new))
        .route("/{todo_id}", web::get().to(show))
        .route("/{todo_id}", web::put().to(update))
        .route("/{todo_id}", web::patch().to(update))
        .route("/{todo_id}", web::delete().to(destroy))
        .route("/{todo_id}/edit", web::get().to(edit));
}
