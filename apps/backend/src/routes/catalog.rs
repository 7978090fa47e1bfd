use actix_web::{web, HttpResponse, Result};

use crate::error::AppError;
use crate::state::app_state::AppState;

/// GET /api/catalog
async fn list(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(app_state.sessions().catalog_items()))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("").route(web::get().to(list)));
}
