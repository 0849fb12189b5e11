use actix_web::{web, App, HttpServer};
use backend::bin_support::config_app::Config;
use backend::config::db::sanitize_db_url;
use backend::infra::state::build_state;
use backend::middleware::{MethodOverride, RequestTrace, StructuredLogger, TraceSpan};
use backend::routes;
use tracing::{error, info};

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // A missing .env is fine; the real environment still applies.
    let _ = dotenvy::dotenv();
    telemetry::init_tracing();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let app_state = match build_state().with_profile(config.profile).build().await {
        Ok(state) => state,
        Err(e) => {
            error!(error = %sanitize_db_url(&e.to_string()), "failed to build application state");
            std::process::exit(1);
        }
    };

    info!(
        profile = %config.profile,
        host = %config.host,
        port = config.port,
        "server=starting"
    );

    let data = web::Data::new(app_state.clone());

    HttpServer::new(move || {
        App::new()
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .wrap(MethodOverride)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    if let Err(e) = app_state.close().await {
        error!(error = %e, "failed to close database pool");
    }
    info!("server=stopped");
    Ok(())
}
