use actix_web::{web, HttpResponse};
use migration::get_latest_migration_version;
use sea_orm::{ConnectionTrait, Statement};
use serde::Serialize;
use time::OffsetDateTime;

use crate::error::AppError;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    app_version: &'static str,
    profile: &'static str,
    db: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    db_error: Option<String>,
    migrations: String,
    time: String,
}

async fn health(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let time = OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string());

    let db = app_state.db();
    let ping = db
        .query_one(Statement::from_string(
            db.get_database_backend(),
            "SELECT 1 AS health_check".to_string(),
        ))
        .await;

    let (db_status, db_error, migrations) = match ping {
        Ok(_) => {
            let migrations = match get_latest_migration_version(db).await {
                Ok(Some(version)) => version,
                Ok(None) => "no_migrations".to_string(),
                Err(_) => "unknown".to_string(),
            };
            ("ok", None, migrations)
        }
        Err(e) => ("error", Some(format!("DB query failed: {e}")), "unknown".to_string()),
    };

    Ok(HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        app_version: env!("CARGO_PKG_VERSION"),
        profile: app_state.profile().as_str(),
        db: db_status,
        db_error,
        migrations,
        time,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health));
}
