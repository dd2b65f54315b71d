use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::{error::AppError, middleware::SessionToken, state::AppState};

pub fn create_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(get_workspaces))
        .route("/{workspace}/latest", web::get().to(get_last));
}

async fn get_workspaces(
    state: web::Data<AppState>,
    token: SessionToken,
) -> Result<HttpResponse, AppError> {
    let workspaces = state.workspaces.list_workspaces(token.as_str()).await?;
    Ok(HttpResponse::Ok().json(workspaces))
}

async fn get_last(
    state: web::Data<AppState>,
    workspace: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    match state.history.get_last(&workspace).await? {
        Some(latest) => Ok(HttpResponse::Ok().json(latest)),
        None => Ok(HttpResponse::Ok().json(json!({}))),
    }
}
