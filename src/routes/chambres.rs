use actix_web::{delete, get, post, put, web, HttpResponse};
use sea_orm::DatabaseConnection;

use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::models::dto::{
    ChambreResponse, CreateChambreRequest, MonthRequest, MonthResponse, UpdateChambreRequest,
};
use crate::services::chambre_service::ChambreService;

// Toutes les routes prennent AuthUser en paramètre : l'API est une
// entrée non fiable, chaque requête revalide le token de session.

/// GET /api/chambres - Toutes les chambres avec leurs months
#[get("")]
pub async fn list_chambres(
    _auth_user: AuthUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let chambres = ChambreService::list_chambres(db.get_ref()).await?;

    let response: Vec<ChambreResponse> = chambres
        .into_iter()
        .map(|(chambre, months)| ChambreResponse::new(chambre, months))
        .collect();

    Ok(HttpResponse::Ok().json(response))
}

/// POST /api/chambres - Créer une chambre (name et property obligatoires)
#[post("")]
pub async fn create_chambre(
    _auth_user: AuthUser,
    body: web::Json<CreateChambreRequest>,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let chambre = ChambreService::create_chambre(db.get_ref(), body.into_inner()).await?;

    // Une chambre neuve n'a encore aucun month
    Ok(HttpResponse::Ok().json(ChambreResponse::new(chambre, Vec::new())))
}

/// GET /api/chambres/{id} - Une chambre avec ses months
#[get("/{id}")]
pub async fn get_chambre(
    _auth_user: AuthUser,
    path: web::Path<i32>,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let (chambre, months) = ChambreService::get_chambre(db.get_ref(), path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ChambreResponse::new(chambre, months)))
}

/// PUT /api/chambres/{id} - Mise à jour partielle d'une chambre
#[put("/{id}")]
pub async fn update_chambre(
    _auth_user: AuthUser,
    path: web::Path<i32>,
    body: web::Json<UpdateChambreRequest>,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let chambre = ChambreService::update_chambre(db.get_ref(), id, body.into_inner()).await?;

    // La réponse renvoie la chambre complète, months compris
    let (_, months) = ChambreService::get_chambre(db.get_ref(), id).await?;
    Ok(HttpResponse::Ok().json(ChambreResponse::new(chambre, months)))
}

/// DELETE /api/chambres/{id} - Supprime la chambre et tous ses months
#[delete("/{id}")]
pub async fn delete_chambre(
    _auth_user: AuthUser,
    path: web::Path<i32>,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    ChambreService::delete_chambre(db.get_ref(), path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "success": true })))
}

/// POST /api/chambres/{id}/months - Ajouter un relevé mensuel
#[post("/{id}/months")]
pub async fn add_month(
    _auth_user: AuthUser,
    path: web::Path<i32>,
    body: web::Json<MonthRequest>,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let month =
        ChambreService::add_month(db.get_ref(), path.into_inner(), body.into_inner()).await?;

    Ok(HttpResponse::Ok().json(MonthResponse::from(month)))
}

/// PUT /api/chambres/{id}/months/{monthId} - Remplacer un relevé
/// (édition complète ou toggle payé, le client renvoie tout le relevé)
#[put("/{id}/months/{month_id}")]
pub async fn update_month(
    _auth_user: AuthUser,
    path: web::Path<(i32, i32)>,
    body: web::Json<MonthRequest>,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let (_chambre_id, month_id) = path.into_inner();
    let month = ChambreService::update_month(db.get_ref(), month_id, body.into_inner()).await?;

    Ok(HttpResponse::Ok().json(MonthResponse::from(month)))
}

/// DELETE /api/chambres/{id}/months/{monthId} - Supprimer un relevé
#[delete("/{id}/months/{month_id}")]
pub async fn delete_month(
    _auth_user: AuthUser,
    path: web::Path<(i32, i32)>,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let (_chambre_id, month_id) = path.into_inner();
    ChambreService::delete_month(db.get_ref(), month_id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "success": true })))
}

pub fn chambres_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/chambres")
            .service(list_chambres)
            .service(create_chambre)
            .service(get_chambre)
            .service(update_chambre)
            .service(delete_chambre)
            .service(add_month)
            .service(update_month)
            .service(delete_month),
    );
}
