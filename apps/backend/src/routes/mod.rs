use actix_web::web;

use crate::middleware::TxnMiddleware;

pub mod health;
pub mod todos;

/// Register every route. The todo resource runs inside the request
/// transaction layer; health checks use the pool directly.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure_routes);
    cfg.service(
        web::scope("/todos")
            .wrap(TxnMiddleware)
            .configure(todos::configure_routes),
    );
}
