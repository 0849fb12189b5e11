//! Representation negotiation for rendered responses.

use actix_web::http::header::{HeaderName, ACCEPT, CONTENT_TYPE};
use actix_web::HttpRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Html,
    Json,
}

impl Format {
    /// JSON when the client asks for it in `Accept`; when `Accept` is absent
    /// or a wildcard, a JSON request body implies a JSON response. HTML
    /// otherwise.
    pub fn negotiate(req: &HttpRequest) -> Self {
        let header = |name: HeaderName| {
            req.headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_ascii_lowercase)
                .unwrap_or_default()
        };
        let accept = header(ACCEPT);

        if accept.contains("application/json") || accept.contains("+json") {
            return Format::Json;
        }
        if accept.contains("text/html") {
            return Format::Html;
        }
        if header(CONTENT_TYPE).starts_with("application/json") {
            return Format::Json;
        }
        Format::Html
    }
}
