use std::future::{ready, Ready};
use std::ops::Deref;

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use sea_orm::DatabaseTransaction;

use crate::db::txn::SharedTxn;
use crate::error::AppError;

/// Borrow of the request transaction opened by the transaction layer.
///
/// Extraction fails with a missing-transaction error (500) when no
/// [`SharedTxn`] is present on the request.
pub struct RequestTxn(SharedTxn);

impl Deref for RequestTxn {
    type Target = DatabaseTransaction;

    fn deref(&self) -> &Self::Target {
        self.0.transaction()
    }
}

impl FromRequest for RequestTxn {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            SharedTxn::from_req(req)
                .map(RequestTxn)
                .ok_or_else(AppError::missing_transaction),
        )
    }
}
