// DTOs des requêtes et réponses API.
// Le contrat JSON est en camelCase (compteurEau, fraisLouer, paye...) ;
// les montants circulent en f64 sur le fil mais sont stockés en Decimal.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{chambre, month};

// ---------------------------------------------------------------------------
// Requêtes
// ---------------------------------------------------------------------------

/// Création d'une chambre : name et property sont obligatoires et non vides.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateChambreRequest {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    pub description: Option<String>,
    #[validate(length(min = 1, message = "property is required"))]
    pub property: String,
    pub tenant_name: Option<String>,
    pub tenant_phone: Option<String>,
    pub tenant_id_front: Option<String>,
    pub tenant_id_back: Option<String>,
    pub tenant_contract: Option<String>,
}

/// Mise à jour partielle d'une chambre : seuls les champs présents dans le
/// body sont remplacés. Pas de re-validation des champs obligatoires ici,
/// c'est la responsabilité de l'appelant.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateChambreRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub property: Option<String>,
    pub tenant_name: Option<String>,
    pub tenant_phone: Option<String>,
    pub tenant_id_front: Option<String>,
    pub tenant_id_back: Option<String>,
    pub tenant_contract: Option<String>,
}

/// Payload complet d'un month, utilisé pour la création ET la mise à jour
/// (y compris le toggle payé, qui renvoie tout le relevé avec paye inversé).
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MonthRequest {
    pub month: String,
    #[validate(range(min = 0, message = "compteurEau must be non-negative"))]
    pub compteur_eau: i32,
    #[validate(range(min = 0.0, message = "montantEau must be non-negative"))]
    pub montant_eau: f64,
    #[validate(range(min = 0, message = "compteurElectricite must be non-negative"))]
    pub compteur_electricite: i32,
    #[validate(range(min = 0.0, message = "montantElectricite must be non-negative"))]
    pub montant_electricite: f64,
    #[validate(range(min = 0.0, message = "fraisLouer must be non-negative"))]
    pub frais_louer: f64,
    pub paye: bool,
}

// ---------------------------------------------------------------------------
// Réponses
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthResponse {
    pub id: i32,
    pub chambre_id: i32,
    pub month: String,
    pub compteur_eau: i32,
    pub montant_eau: f64,
    pub compteur_electricite: i32,
    pub montant_electricite: f64,
    pub frais_louer: f64,
    pub paye: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChambreResponse {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub property: String,
    pub tenant_name: Option<String>,
    pub tenant_phone: Option<String>,
    pub tenant_id_front: Option<String>,
    pub tenant_id_back: Option<String>,
    pub tenant_contract: Option<String>,
    pub months: Vec<MonthResponse>,
}

impl From<month::Model> for MonthResponse {
    fn from(m: month::Model) -> Self {
        MonthResponse {
            id: m.id,
            chambre_id: m.chambre_id,
            month: m.month,
            compteur_eau: m.compteur_eau,
            montant_eau: decimal_to_f64(m.montant_eau),
            compteur_electricite: m.compteur_electricite,
            montant_electricite: decimal_to_f64(m.montant_electricite),
            frais_louer: decimal_to_f64(m.frais_louer),
            paye: m.paye,
        }
    }
}

impl ChambreResponse {
    pub fn new(c: chambre::Model, months: Vec<month::Model>) -> Self {
        ChambreResponse {
            id: c.id,
            name: c.name,
            description: c.description,
            property: c.property,
            tenant_name: c.tenant_name,
            tenant_phone: c.tenant_phone,
            tenant_id_front: c.tenant_id_front,
            tenant_id_back: c.tenant_id_back,
            tenant_contract: c.tenant_contract,
            months: months.into_iter().map(MonthResponse::from).collect(),
        }
    }
}

// Fonction helper pour convertir Decimal en f64
pub fn decimal_to_f64(decimal: Decimal) -> f64 {
    decimal.to_string().parse::<f64>().unwrap_or(0.0)
}
