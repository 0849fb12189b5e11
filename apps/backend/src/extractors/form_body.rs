use actix_web::dev::Payload;
use actix_web::http::header::CONTENT_TYPE;
use actix_web::{FromRequest, HttpRequest};
use bytes::{Bytes, BytesMut};
use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::web::trace_ctx;

const MAX_BODY_BYTES: usize = 256 * 1024;

/// Raw request body, decoded later with [`FormBody::bind`].
///
/// Decoding is deferred so handlers can look the record up before binding.
#[derive(Debug, Clone)]
pub struct FormBody {
    content_type: String,
    body: Bytes,
}

impl FormBody {
    pub fn new(content_type: impl Into<String>, body: impl Into<Bytes>) -> Self {
        Self {
            content_type: content_type.into(),
            body: body.into(),
        }
    }

    pub fn is_json(&self) -> bool {
        let essence = self
            .content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        essence == "application/json" || essence.ends_with("+json")
    }

    /// Decode the body as JSON or as a urlencoded form, by content type.
    /// Undecodable input is a bind error (500).
    pub fn bind<T: DeserializeOwned>(&self) -> Result<T, AppError> {
        let result = if self.is_json() {
            serde_json::from_slice::<T>(&self.body).map_err(|e| e.to_string())
        } else {
            serde_urlencoded::from_bytes::<T>(&self.body).map_err(|e| e.to_string())
        };

        result.map_err(|e| {
            debug!(
                trace_id = %trace_ctx::trace_id(),
                content_type = %self.content_type,
                body_size = self.body.len(),
                error = %e,
                "form binding failed"
            );
            AppError::internal(ErrorCode::BindError, format!("failed to bind request body: {e}"))
        })
    }
}

impl FromRequest for FormBody {
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let mut payload = payload.take();
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|ct| ct.to_str().ok())
            .unwrap_or("")
            .to_string();

        Box::pin(async move {
            let mut body = BytesMut::new();
            while let Some(chunk) = payload.next().await {
                let chunk = chunk.map_err(|e| {
                    warn!(error = %e, "Failed to read request body chunk");
                    AppError::bad_request(ErrorCode::BadRequest, "Failed to read request body")
                })?;
                if body.len() + chunk.len() > MAX_BODY_BYTES {
                    return Err(AppError::bad_request(
                        ErrorCode::BadRequest,
                        format!("Request body exceeds {MAX_BODY_BYTES} bytes"),
                    ));
                }
                body.extend_from_slice(&chunk);
            }

            Ok(FormBody::new(content_type, body.freeze()))
        })
    }
}
