use std::sync::Arc;

use actix_web::{HttpMessage, HttpRequest};
use sea_orm::{DatabaseConnection, DatabaseTransaction, DbErr, TransactionTrait};

/// Request-scoped transaction handle kept in request extensions.
///
/// Handlers only borrow it; whoever inserted it owns commit and rollback.
#[derive(Clone)]
pub struct SharedTxn(pub Arc<DatabaseTransaction>);

impl SharedTxn {
    /// Begin a new transaction on `db`.
    pub async fn open(db: &DatabaseConnection) -> Result<Self, DbErr> {
        Ok(Self(Arc::new(db.begin().await?)))
    }

    /// The transaction stored on `req`, if any.
    pub fn from_req(req: &HttpRequest) -> Option<Self> {
        req.extensions().get::<SharedTxn>().cloned()
    }

    pub fn transaction(&self) -> &DatabaseTransaction {
        &self.0
    }

    /// Commit the transaction. Fails while other clones are alive.
    pub async fn commit(self) -> Result<(), DbErr> {
        self.into_inner()?.commit().await
    }

    /// Roll the transaction back. Fails while other clones are alive.
    pub async fn rollback(self) -> Result<(), DbErr> {
        self.into_inner()?.rollback().await
    }

    fn into_inner(self) -> Result<DatabaseTransaction, DbErr> {
        Arc::try_unwrap(self.0)
            .map_err(|_| DbErr::Custom("transaction is still shared".to_string()))
    }
}
