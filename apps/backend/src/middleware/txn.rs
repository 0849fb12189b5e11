//! Request transaction layer.
//!
//! Opens one transaction per request and stores it in request extensions as
//! a [`SharedTxn`]. Once the handler has produced a response the transaction
//! is committed when the status is below 400 (subject to the process
//! [`TxnPolicy`]) and rolled back otherwise.
//!
//! A `SharedTxn` that is already present (injected by tests) is left alone;
//! its owner decides what happens to it.

use std::future::{ready, Ready};

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{web, Error, HttpMessage};
use futures_util::future::LocalBoxFuture;
use tracing::{debug, warn};

use crate::db::txn::SharedTxn;
use crate::db::txn_policy::{self, TxnPolicy};
use crate::error::AppError;
use crate::state::app_state::AppState;

#[derive(Clone, Default)]
pub struct TxnMiddleware;

impl<S, B> Transform<S, ServiceRequest> for TxnMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = TxnMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TxnMiddlewareService {
            service: std::rc::Rc::new(service),
        }))
    }
}

pub struct TxnMiddlewareService<S> {
    service: std::rc::Rc<S>,
}

impl<S, B> Service<ServiceRequest> for TxnMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        Box::pin(async move {
            if req.extensions().get::<SharedTxn>().is_some() {
                let res = service.call(req).await?;
                return Ok(res.map_into_left_body());
            }

            let Some(state) = req.app_data::<web::Data<AppState>>().cloned() else {
                // Handlers will answer with a missing-transaction error.
                warn!("txn=skipped reason=no_app_state");
                let res = service.call(req).await?;
                return Ok(res.map_into_left_body());
            };

            let shared = match SharedTxn::open(state.db()).await {
                Ok(shared) => shared,
                Err(e) => {
                    let err = AppError::from(e);
                    return Ok(req.error_response(err).map_into_right_body());
                }
            };
            req.extensions_mut().insert(shared.clone());

            let res = match service.call(req).await {
                Ok(res) => res,
                Err(e) => {
                    // The request (and its clone of the txn) is gone; dropping
                    // the last handle rolls back.
                    drop(shared);
                    return Err(e);
                }
            };

            res.request().extensions_mut().remove::<SharedTxn>();

            let outcome = if res.status().as_u16() < 400 {
                match txn_policy::current() {
                    TxnPolicy::CommitOnOk => shared.commit().await,
                    TxnPolicy::RollbackOnOk => shared.rollback().await,
                }
            } else {
                shared.rollback().await
            };

            match outcome {
                Ok(()) => {
                    debug!(
                        status = res.status().as_u16(),
                        policy = txn_policy::current().as_str(),
                        "txn=finished"
                    );
                    Ok(res.map_into_left_body())
                }
                Err(e) => {
                    let err = AppError::from(e);
                    let (req, _) = res.into_parts();
                    Ok(ServiceResponse::from_err(err, req).map_into_right_body())
                }
            }
        })
    }
}
