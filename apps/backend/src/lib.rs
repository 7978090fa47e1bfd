#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod infra;
pub mod logging;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;
pub mod trace_ctx;
pub mod utils;


// Re-exports for public API
pub use config::GameConfig;
pub use domain::{Phase, Session, SessionView};
pub use error::AppError;
pub use errors::ErrorCode;
pub use extractors::game_id::GameId;
pub use extractors::validated_json::ValidatedJson;
pub use middleware::cors::cors_middleware;
pub use middleware::request_trace::RequestTrace;
pub use middleware::structured_logger::StructuredLogger;
pub use middleware::trace_span::TraceSpan;
pub use services::{CatalogProvider, SessionService, SessionStore, StaticCatalog};
pub use state::app_state::AppState;
pub use utils::clock::{Clock, ManualClock, SystemClock};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
