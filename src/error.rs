use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use sea_orm::DbErr;
use thiserror::Error;

/// Erreurs métier de l'application.
/// Chaque variante correspond à un statut HTTP et devient une enveloppe
/// JSON {"error": "..."} — aucune erreur brute ne sort vers le client.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Authentication(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Storage(#[from] DbErr),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            // Le doublon de username est surfacé en 400 comme une erreur
            // de saisie, pas en 409
            ApiError::Validation(_) | ApiError::Conflict(_) => StatusCode::BAD_REQUEST,
            ApiError::Authentication(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Storage(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.to_string()
        }))
    }
}

impl ApiError {
    /// Échec d'authentification générique : ne révèle jamais si le
    /// username existe ou si c'est le mot de passe qui est faux.
    pub fn invalid_credentials() -> Self {
        ApiError::Authentication("Invalid username or password".to_string())
    }
}
