use actix_web::{dev::Payload, Error, FromRequest, HttpRequest, HttpResponse};
use futures::future::{ready, Ready};
use serde::{Deserialize, Serialize};

use crate::utils::jwt;

/// Nom du cookie HTTP-only qui transporte le token de session
pub const SESSION_COOKIE: &str = "session";

/// Identité de l'utilisateur authentifié, extraite du token de session.
/// Déclarée en paramètre de chaque route protégée : la validation est
/// centralisée ici, les routes API ne re-vérifient rien elles-mêmes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub user_id: i32,
    pub username: String,
}

fn unauthorized(message: &str) -> Error {
    let response = HttpResponse::Unauthorized().json(serde_json::json!({
        "error": message
    }));
    actix_web::error::InternalError::from_response("", response).into()
}

/// Cherche le token de session : cookie d'abord (navigateur), puis
/// header "Authorization: Bearer <token>" (clients hors navigateur).
fn extract_token(req: &HttpRequest) -> Option<String> {
    if let Some(cookie) = req.cookie(SESSION_COOKIE) {
        return Some(cookie.value().to_string());
    }

    let auth_str = req.headers().get("Authorization")?.to_str().ok()?;
    auth_str.strip_prefix("Bearer ").map(|t| t.to_string())
}

impl FromRequest for AuthUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        // 1. Récupérer le token (cookie ou header)
        let token = match extract_token(req) {
            Some(token) => token,
            None => return ready(Err(unauthorized("Missing session token"))),
        };

        // 2. Vérifier la signature et l'expiration
        let claims = match jwt::verify_session_token(&token) {
            Ok(claims) => claims,
            Err(e) => return ready(Err(unauthorized(&format!("Invalid session: {}", e)))),
        };

        ready(Ok(AuthUser {
            user_id: claims.sub,
            username: claims.username,
        }))
    }
}
