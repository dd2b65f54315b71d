use actix_web::{web, HttpResponse};
use tracing::warn;

use crate::{error::AppError, services::SchemaStatus, state::AppState};

pub fn create_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(get_setup_config));
}

/// Ensures the schema, then answers with the app settings.
/// A stale schema is reported through `adminSetup.hasSchema = false`.
async fn get_setup_config(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let outcome = state.provisioner.ensure_schema().await?;

    if let SchemaStatus::Stale(reason) = &outcome.status {
        warn!("Serving setup with a stale schema: {}", reason);
    }

    Ok(HttpResponse::Ok().json(outcome.settings))
}
