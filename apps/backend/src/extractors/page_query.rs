use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use tracing::debug;

use crate::domain::{PageParams, Pagination};
use crate::error::AppError;

/// Normalized `page` / `per_page` from the query string. Never fails:
/// unusable input falls back to the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageQuery(pub Pagination);

impl PageQuery {
    pub fn from_query(query: &str) -> Self {
        let params = serde_urlencoded::from_str::<PageParams>(query).unwrap_or_else(|e| {
            debug!(error = %e, "unparsable pagination query, using defaults");
            PageParams::default()
        });
        PageQuery(Pagination::from_params(&params))
    }
}

impl FromRequest for PageQuery {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Ok(Self::from_query(req.query_string())))
    }
}
