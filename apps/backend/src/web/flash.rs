//! One-shot notifications attached to the response being rendered.
//!
//! Handlers queue messages on the request; the view layer drains them when it
//! renders. Nothing is stored between requests.

use actix_web::{HttpMessage, HttpRequest};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlashMessage {
    pub kind: &'static str,
    pub message: String,
}

#[derive(Debug, Default)]
struct FlashQueue(Vec<FlashMessage>);

/// Queue a message for the response to this request.
pub fn add(req: &HttpRequest, kind: &'static str, message: impl Into<String>) {
    let message = FlashMessage {
        kind,
        message: message.into(),
    };
    let mut extensions = req.extensions_mut();
    match extensions.get_mut::<FlashQueue>() {
        Some(queue) => queue.0.push(message),
        None => {
            extensions.insert(FlashQueue(vec![message]));
        }
    }
}

/// Queue a `success` message.
pub fn success(req: &HttpRequest, message: impl Into<String>) {
    add(req, "success", message);
}

/// Remove and return every queued message.
pub fn take(req: &HttpRequest) -> Vec<FlashMessage> {
    req.extensions_mut()
        .remove::<FlashQueue>()
        .map(|queue| queue.0)
        .unwrap_or_default()
}
