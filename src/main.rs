mod clients;
mod config;
mod error;
mod middleware;
mod models;
mod routes;
mod services;
mod state;
mod utils;

use actix_cors::Cors;
use actix_web::{
    middleware::{Compress, Logger, NormalizePath},
    web, App, HttpServer,
};
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use crate::clients::{AppsClient, HubClient, MasterDataClient};
use crate::config::Config;
use crate::models::CHECKOUT_CUSTOM_SCHEMA;
use crate::routes::create_routes;
use crate::state::AppState;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let log_level = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "info".to_string())
        .parse()
        .unwrap_or(Level::INFO);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting checkout customizer");

    let config = Config::from_env().map_err(anyhow::Error::msg)?;
    info!(
        "Configuration loaded for account {} ({} {})",
        config.account, config.app_id, config.app_version
    );

    CHECKOUT_CUSTOM_SCHEMA
        .validate()
        .map_err(anyhow::Error::msg)?;
    info!(
        "Schema {} for {} validated: {}",
        CHECKOUT_CUSTOM_SCHEMA.version,
        CHECKOUT_CUSTOM_SCHEMA.entity,
        CHECKOUT_CUSTOM_SCHEMA.layout()
    );

    let http = clients::build_http_client(config.http_timeout_secs)?;
    let store = Arc::new(MasterDataClient::new(
        http.clone(),
        config.document_store_url.clone(),
        config.app_token.clone(),
    ));
    let settings = Arc::new(AppsClient::new(
        http.clone(),
        config.settings_store_url.clone(),
        config.app_token.clone(),
    ));
    let gateway = Arc::new(HubClient::new(http));

    let state = web::Data::new(AppState::new(
        config.clone(),
        CHECKOUT_CUSTOM_SCHEMA,
        store,
        settings,
        gateway,
    ));

    let bind_addr = config.bind_addr();
    let cors_allow_origin = config.cors_allow_origin.clone();

    info!("Server running at http://{}", bind_addr);

    HttpServer::new(move || {
        let cors = if cors_allow_origin == "*" {
            Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600)
        } else {
            let mut cors = Cors::default();
            for origin in cors_allow_origin.split(',').map(|s| s.trim()) {
                cors = cors.allowed_origin(origin);
            }
            cors.allowed_methods(vec!["GET", "POST", "OPTIONS"])
                .allow_any_header()
                .supports_credentials()
                .max_age(3600)
        };

        App::new()
            .app_data(state.clone())
            .wrap(cors)
            .wrap(Compress::default())
            .wrap(Logger::default())
            .wrap(NormalizePath::trim())
            .configure(create_routes)
    })
    .bind(&bind_addr)?
    .run()
    .await?;

    Ok(())
}
