use actix_web::web;

pub mod catalog;
pub mod health;
pub mod multiplayer;

/// Register every route. Shared by `main` and the test app builder so both
/// serve the same paths.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check: /health
    cfg.service(web::scope("/health").configure(health::configure_routes));

    // Catalog listing: /api/catalog
    cfg.service(web::scope("/api/catalog").configure(catalog::configure_routes));

    // Session coordination: /api/multiplayer/**
    cfg.service(web::scope("/api/multiplayer").configure(multiplayer::configure_routes));
}
