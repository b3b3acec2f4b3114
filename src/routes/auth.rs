use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use actix_web::{post, get, web, HttpResponse};
use sea_orm::{DatabaseConnection, EntityTrait, QueryFilter, ColumnTrait, Set, ActiveModelTrait};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::ApiError;
use crate::middleware::{auth::SESSION_COOKIE, AuthUser};
use crate::models::users::{Entity as Users, Column as UserColumn, ActiveModel as UserActiveModel};
use crate::utils::{password, jwt};

// DTO pour l'inscription
#[derive(Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

// DTO pour la connexion
#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

// Réponse après login
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub user_id: i32,
    pub username: String,
}

// Réponse pour /auth/me
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub user_id: i32,
    pub username: String,
}

/// POST /api/register - Créer un compte (PUBLIC)
/// Aucune session n'est créée : l'utilisateur doit se connecter ensuite.
#[post("/register")]
pub async fn register(
    body: web::Json<RegisterRequest>,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    // 1. Champs obligatoires
    body.validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    // 2. Vérifier si le username est déjà pris
    let existing_user = Users::find()
        .filter(UserColumn::Username.eq(&body.username))
        .one(db.get_ref())
        .await?;

    if existing_user.is_some() {
        return Err(ApiError::Conflict("Username already exists".to_string()));
    }

    // 3. Hash le mot de passe
    let password_hash = password::hash_password(&body.password)
        .map_err(ApiError::Internal)?;

    // 4. Créer l'utilisateur
    let new_user = UserActiveModel {
        username: Set(body.username.clone()),
        password_hash: Set(password_hash),
        ..Default::default()
    };
    new_user.insert(db.get_ref()).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "success": true })))
}

/// POST /api/auth - Se connecter (PUBLIC)
/// En cas de succès, pose le token de session en cookie HTTP-only.
/// L'échec est toujours générique : on ne dit jamais si c'est le
/// username ou le mot de passe qui est faux.
#[post("")]
pub async fn login(
    body: web::Json<LoginRequest>,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    // 1. Trouver l'utilisateur
    let user = Users::find()
        .filter(UserColumn::Username.eq(&body.username))
        .one(db.get_ref())
        .await?
        .ok_or_else(ApiError::invalid_credentials)?;

    // 2. Vérifier le mot de passe
    let is_valid = password::verify_password(&body.password, &user.password_hash)
        .map_err(ApiError::Internal)?;

    if !is_valid {
        return Err(ApiError::invalid_credentials());
    }

    // 3. Générer le token de session
    let token = jwt::generate_session_token(user.id, &user.username)
        .map_err(ApiError::Internal)?;

    // 4. Poser le cookie et retourner la réponse
    let cookie = Cookie::build(SESSION_COOKIE, token.clone())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(CookieDuration::hours(24))
        .finish();

    Ok(HttpResponse::Ok().cookie(cookie).json(AuthResponse {
        token,
        user_id: user.id,
        username: user.username,
    }))
}

/// POST /api/auth/logout - Se déconnecter (PUBLIC)
/// Invalide le cookie côté client ; le token lui-même expire tout seul.
#[post("/logout")]
pub async fn logout() -> HttpResponse {
    let mut cookie = Cookie::build(SESSION_COOKIE, "")
        .path("/")
        .http_only(true)
        .finish();
    cookie.make_removal();

    HttpResponse::Ok()
        .cookie(cookie)
        .json(serde_json::json!({ "success": true }))
}

/// GET /api/auth/me - Vérifier la session (PROTÉGÉE)
#[get("/me")]
pub async fn me(auth_user: AuthUser) -> HttpResponse {
    HttpResponse::Ok().json(MeResponse {
        user_id: auth_user.user_id,
        username: auth_user.username,
    })
}

pub fn auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(register).service(
        web::scope("/auth")
            .service(login)
            .service(logout)
            .service(me),
    );
}
