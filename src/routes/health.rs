use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::state::AppState;

pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "version": state.config.app_version,
        "uptime_seconds": state.uptime_seconds(),
    }))
}
