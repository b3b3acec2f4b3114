pub mod health;
pub mod auth;
pub mod chambres;

use actix_web::web;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(health::health_check)
            .configure(auth::auth_routes)
            .configure(chambres::chambres_routes)
    );
}
