pub mod customizations;
pub mod health;
pub mod setup;
pub mod workspaces;

use actix_web::web;

pub fn create_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check)).service(
        web::scope("/api/v1")
            .service(web::scope("/customizations").configure(customizations::create_routes))
            .service(web::scope("/setup").configure(setup::create_routes))
            .service(web::scope("/workspaces").configure(workspaces::create_routes)),
    );
}
