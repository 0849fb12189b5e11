//! Lets HTML forms, which can only send GET and POST, reach the PUT, PATCH
//! and DELETE routes: a POST carrying `_method=<verb>` in its query string is
//! dispatched as that verb. Must wrap the app so it runs before routing.

use std::future::{ready, Ready};

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::Method;
use actix_web::Error;
use tracing::debug;

const OVERRIDE_PARAM: &str = "_method";

#[derive(Clone, Default)]
pub struct MethodOverride;

/// The verb a POST with `query` should be dispatched as, if any.
pub fn override_method(query: &str) -> Option<Method> {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query).ok()?;
    let (_, verb) = pairs.into_iter().find(|(key, _)| key == OVERRIDE_PARAM)?;

    match verb.trim().to_ascii_uppercase().as_str() {
        "PUT" => Some(Method::PUT),
        "PATCH" => Some(Method::PATCH),
        "DELETE" => Some(Method::DELETE),
        _ => None,
    }
}

impl<S, B> Transform<S, ServiceRequest> for MethodOverride
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = MethodOverrideMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(MethodOverrideMiddleware { service }))
    }
}

pub struct MethodOverrideMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for MethodOverrideMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = S::Future;

    forward_ready!(service);

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        if req.method() == Method::POST {
            if let Some(method) = override_method(req.query_string()) {
                debug!(method = %method, path = %req.path(), "method_override");
                req.head_mut().method = method;
            }
        }
        self.service.call(req)
    }
}
