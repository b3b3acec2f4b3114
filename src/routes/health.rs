use actix_web::{get, HttpResponse};

use crate::models::health::HealthResponse;

/// GET /api/health - Vérification de vie (PUBLIC)
#[get("/health")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
    })
}
