use actix_web::error::ResponseError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

use crate::domain::validation::ValidationErrors;
use crate::errors::domain::{DomainError, InfraErrorKind, NotFoundKind};
use crate::errors::ErrorCode;
use crate::web::trace_ctx;

#[derive(Serialize)]
pub struct ProblemDetails<'a> {
    #[serde(rename = "type")]
    pub type_: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    pub code: &'static str,
    pub trace_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<&'a ValidationErrors>,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {detail}")]
    Validation {
        code: ErrorCode,
        detail: String,
        status: StatusCode,
    },
    #[error("Invalid fields: {errors}")]
    InvalidFields { errors: ValidationErrors },
    #[error("Database error: {detail}")]
    Db { detail: String },
    #[error("Not found: {detail}")]
    NotFound { code: ErrorCode, detail: String },
    #[error("Bad request: {detail}")]
    BadRequest { code: ErrorCode, detail: String },
    #[error("Internal error: {detail}")]
    Internal { code: ErrorCode, detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error("Database unavailable: {detail}")]
    DbUnavailable { detail: String },
    #[error("no transaction found")]
    MissingTransaction,
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation { code, .. } => *code,
            AppError::InvalidFields { .. } => ErrorCode::ValidationError,
            AppError::Db { .. } => ErrorCode::DbError,
            AppError::NotFound { code, .. } => *code,
            AppError::BadRequest { code, .. } => *code,
            AppError::Internal { code, .. } => *code,
            AppError::Config { .. } => ErrorCode::ConfigError,
            AppError::DbUnavailable { .. } => ErrorCode::DbUnavailable,
            AppError::MissingTransaction => ErrorCode::MissingTransaction,
        }
    }

    fn detail(&self) -> String {
        match self {
            AppError::Validation { detail, .. } => detail.clone(),
            AppError::InvalidFields { errors } => {
                format!("{} field(s) failed validation", errors.len())
            }
            AppError::Db { detail } => detail.clone(),
            AppError::NotFound { detail, .. } => detail.clone(),
            AppError::BadRequest { detail, .. } => detail.clone(),
            AppError::Internal { detail, .. } => detail.clone(),
            AppError::Config { detail } => detail.clone(),
            AppError::DbUnavailable { detail } => detail.clone(),
            AppError::MissingTransaction => "no transaction found".to_string(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { status, .. } => *status,
            AppError::InvalidFields { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Db { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::DbUnavailable { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::MissingTransaction => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn invalid(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Validation {
            code,
            detail: detail.into(),
            status: StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    pub fn invalid_fields(errors: ValidationErrors) -> Self {
        Self::InvalidFields { errors }
    }

    pub fn internal(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Internal {
            code,
            detail: detail.into(),
        }
    }

    pub fn bad_request(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            detail: detail.into(),
        }
    }

    pub fn not_found(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::NotFound {
            code,
            detail: detail.into(),
        }
    }

    pub fn db(detail: impl Into<String>) -> Self {
        Self::Db {
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    pub fn db_unavailable(detail: impl Into<String>) -> Self {
        Self::DbUnavailable {
            detail: detail.into(),
        }
    }

    pub fn missing_transaction() -> Self {
        Self::MissingTransaction
    }

    fn humanize_code(code: &str) -> String {
        code.split('_')
            .map(|word| {
                let lower = word.to_lowercase();
                let mut chars = lower.chars();
                match chars.next() {
                    None => String::new(),
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(e: sea_orm::DbErr) -> Self {
        AppError::from(DomainError::from(e))
    }
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation(detail) => AppError::invalid(ErrorCode::ValidationError, detail),
            DomainError::NotFound(NotFoundKind::Todo, detail) => {
                AppError::not_found(ErrorCode::TodoNotFound, detail)
            }
            DomainError::NotFound(_, detail) => AppError::not_found(ErrorCode::NotFound, detail),
            DomainError::Infra(InfraErrorKind::DbUnavailable, detail) => {
                AppError::db_unavailable(detail)
            }
            DomainError::Infra(InfraErrorKind::DataCorruption, detail) => {
                AppError::internal(ErrorCode::DataCorruption, detail)
            }
            DomainError::Infra(_, detail) => AppError::db(detail),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status();
        let code = self.code().as_str();
        let detail = self.detail();
        let trace_id = trace_ctx::trace_id();

        if status.is_server_error() {
            error!(trace_id = %trace_id, code, detail = %detail, "request failed");
        } else {
            warn!(trace_id = %trace_id, code, detail = %detail, "request rejected");
        }

        let errors = match self {
            AppError::InvalidFields { errors } => Some(errors),
            _ => None,
        };

        let problem_details = ProblemDetails {
            type_: format!("https://todos.local/errors/{code}"),
            title: Self::humanize_code(code),
            status: status.as_u16(),
            detail,
            code,
            trace_id: trace_id.clone(),
            errors,
        };

        HttpResponse::build(status)
            .content_type("application/problem+json")
            .insert_header(("x-trace-id", trace_id))
            .json(problem_details)
    }
}
