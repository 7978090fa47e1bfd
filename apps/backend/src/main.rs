use std::time::Duration;

use actix_web::{web, App, HttpServer};
use backend::config::GameConfig;
use backend::infra::state::build_state;
use backend::middleware::cors::cors_middleware;
use backend::middleware::request_trace::RequestTrace;
use backend::middleware::structured_logger::StructuredLogger;
use backend::middleware::trace_span::TraceSpan;
use backend::routes;
use backend::services::sweeper::spawn_sweeper;
use tracing::{error, info};

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment
    // (docker env_file, or `set -a; . ./.env; set +a` locally).
    let config = GameConfig::from_env();
    let (host, port) = config.bind_addr();
    let sweep_every = Duration::from_secs(config.sweep_interval_seconds);

    let app_state = match build_state().with_config(config.clone()).build() {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "Failed to build application state");
            std::process::exit(1);
        }
    };

    info!(
        host = %host,
        port,
        catalog_items = app_state.sessions().catalog_items().len(),
        duration_seconds = config.duration_seconds,
        max_players = config.max_players,
        game_ttl_seconds = config.game_ttl_seconds,
        "Starting Fitcheck backend"
    );

    let _sweeper = spawn_sweeper(app_state.sessions_handle(), sweep_every);

    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
