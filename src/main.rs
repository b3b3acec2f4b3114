mod models;
mod routes;
mod db;
mod services;
mod utils;
mod middleware;
mod error;
use actix_web::{middleware::Logger, App, HttpServer, web};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    log::info!("🔌 Connecting to database...");
    let db = db::establish_connection()
        .await
        .expect("Failed to connect to database");
    log::info!("✅ Database connected!");

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    log::info!("🚀 Starting server on http://{}", bind_addr);

    let db = web::Data::new(db);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(db.clone())
            .configure(routes::configure_routes)
    })
        .bind(bind_addr)?
        .run()
        .await
}
