use actix_web::{web, HttpResponse};

use crate::{error::AppError, models::SaveChangesParams, state::AppState};

pub fn create_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::post().to(save_changes))
        .route("", web::get().to(get_history))
        .route("/{id}", web::get().to(get_by_id));
}

async fn save_changes(
    state: web::Data<AppState>,
    payload: web::Json<SaveChangesParams>,
) -> Result<HttpResponse, AppError> {
    let ack = state.pipeline.save_changes(payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ack))
}

async fn get_history(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let history = state.history.get_history().await?;
    Ok(HttpResponse::Ok().json(history))
}

async fn get_by_id(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let customization = state.history.get_by_id(&id).await?;
    Ok(HttpResponse::Ok().json(customization))
}
