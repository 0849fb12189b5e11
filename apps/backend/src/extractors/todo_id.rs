use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use uuid::Uuid;

use crate::error::AppError;
use crate::errors::ErrorCode;

/// Todo id taken from the `{todo_id}` path segment.
///
/// An id that is not a UUID cannot name a stored todo, so it is reported as
/// not found rather than as a bad request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TodoId(pub Uuid);

impl TodoId {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        Uuid::parse_str(raw.trim())
            .map(TodoId)
            .map_err(|_| AppError::not_found(ErrorCode::TodoNotFound, format!("Todo {raw} not found")))
    }
}

impl FromRequest for TodoId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(match req.match_info().get("todo_id") {
            Some(raw) => TodoId::parse(raw),
            None => Err(AppError::bad_request(
                ErrorCode::BadRequest,
                "Missing todo_id parameter",
            )),
        })
    }
}
