use rust_decimal::Decimal;
use sea_orm::*;
use validator::Validate;

use crate::error::ApiError;
use crate::models::dto::{CreateChambreRequest, MonthRequest, UpdateChambreRequest};
use crate::models::{chambre, month};

pub struct ChambreService;

impl ChambreService {
    /// Liste toutes les chambres avec leurs months rattachés, dans
    /// l'ordre de stockage. Pas de pagination, pas de filtre.
    pub async fn list_chambres(
        db: &DatabaseConnection,
    ) -> Result<Vec<(chambre::Model, Vec<month::Model>)>, ApiError> {
        let chambres = chambre::Entity::find()
            .find_with_related(month::Entity)
            .order_by_asc(chambre::Column::Id)
            .order_by_asc(month::Column::Id)
            .all(db)
            .await?;

        Ok(chambres)
    }

    /// Une chambre et ses months, ou NotFound.
    pub async fn get_chambre(
        db: &DatabaseConnection,
        id: i32,
    ) -> Result<(chambre::Model, Vec<month::Model>), ApiError> {
        let chambre = chambre::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Chambre {} not found", id)))?;

        // L'ordre par id = ordre d'insertion, utilisé pour "dernier mois"
        let months = chambre
            .find_related(month::Entity)
            .order_by_asc(month::Column::Id)
            .all(db)
            .await?;

        log::debug!(
            "Chambre {} : {} month(s) impayé(s), total dû {}, dernier mois {:?}",
            chambre.id,
            mois_impayes(&months),
            total_du(&months),
            dernier_mois(&months).map(|m| m.month.as_str())
        );

        Ok((chambre, months))
    }

    /// Crée une chambre (name et property obligatoires), collection de
    /// months vide.
    pub async fn create_chambre(
        db: &DatabaseConnection,
        req: CreateChambreRequest,
    ) -> Result<chambre::Model, ApiError> {
        req.validate()
            .map_err(|e| ApiError::Validation(e.to_string()))?;

        let new_chambre = chambre::ActiveModel {
            name: Set(req.name),
            description: Set(req.description),
            property: Set(req.property),
            tenant_name: Set(req.tenant_name),
            tenant_phone: Set(req.tenant_phone),
            tenant_id_front: Set(req.tenant_id_front),
            tenant_id_back: Set(req.tenant_id_back),
            tenant_contract: Set(req.tenant_contract),
            ..Default::default()
        };

        Ok(new_chambre.insert(db).await?)
    }

    /// Remplacement partiel : seuls les champs présents dans la requête
    /// sont écrits. Pas de re-validation des champs obligatoires à ce
    /// niveau.
    pub async fn update_chambre(
        db: &DatabaseConnection,
        id: i32,
        req: UpdateChambreRequest,
    ) -> Result<chambre::Model, ApiError> {
        let existing = chambre::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Chambre {} not found", id)))?;

        let mut active: chambre::ActiveModel = existing.into();
        if let Some(name) = req.name {
            active.name = Set(name);
        }
        if let Some(description) = req.description {
            active.description = Set(Some(description));
        }
        if let Some(property) = req.property {
            active.property = Set(property);
        }
        if let Some(tenant_name) = req.tenant_name {
            active.tenant_name = Set(Some(tenant_name));
        }
        if let Some(tenant_phone) = req.tenant_phone {
            active.tenant_phone = Set(Some(tenant_phone));
        }
        if let Some(tenant_id_front) = req.tenant_id_front {
            active.tenant_id_front = Set(Some(tenant_id_front));
        }
        if let Some(tenant_id_back) = req.tenant_id_back {
            active.tenant_id_back = Set(Some(tenant_id_back));
        }
        if let Some(tenant_contract) = req.tenant_contract {
            active.tenant_contract = Set(Some(tenant_contract));
        }

        Ok(active.update(db).await?)
    }

    /// Supprime une chambre et tous ses months dans une seule
    /// transaction. Les months partent EN PREMIER : le stockage ne
    /// garantit pas de cascade, et l'ordre inverse pourrait laisser des
    /// months orphelins si la transaction n'était pas disponible.
    pub async fn delete_chambre(db: &DatabaseConnection, id: i32) -> Result<(), ApiError> {
        chambre::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Chambre {} not found", id)))?;

        let txn = db.begin().await?;

        month::Entity::delete_many()
            .filter(month::Column::ChambreId.eq(id))
            .exec(&txn)
            .await?;

        chambre::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        Ok(())
    }

    /// Ajoute un month à une chambre existante.
    pub async fn add_month(
        db: &DatabaseConnection,
        chambre_id: i32,
        req: MonthRequest,
    ) -> Result<month::Model, ApiError> {
        req.validate()
            .map_err(|e| ApiError::Validation(e.to_string()))?;

        chambre::Entity::find_by_id(chambre_id)
            .one(db)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Chambre {} not found", chambre_id)))?;

        let new_month = month::ActiveModel {
            chambre_id: Set(chambre_id),
            month: Set(req.month),
            compteur_eau: Set(req.compteur_eau),
            montant_eau: Set(to_decimal(req.montant_eau, "montantEau")?),
            compteur_electricite: Set(req.compteur_electricite),
            montant_electricite: Set(to_decimal(req.montant_electricite, "montantElectricite")?),
            frais_louer: Set(to_decimal(req.frais_louer, "fraisLouer")?),
            paye: Set(req.paye),
            ..Default::default()
        };

        Ok(new_month.insert(db).await?)
    }

    /// Remplace tous les champs d'un month. Sert aussi au toggle payé :
    /// le client renvoie le relevé complet avec paye inversé.
    pub async fn update_month(
        db: &DatabaseConnection,
        month_id: i32,
        req: MonthRequest,
    ) -> Result<month::Model, ApiError> {
        req.validate()
            .map_err(|e| ApiError::Validation(e.to_string()))?;

        let existing = month::Entity::find_by_id(month_id)
            .one(db)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Month {} not found", month_id)))?;

        let mut active: month::ActiveModel = existing.into();
        active.month = Set(req.month);
        active.compteur_eau = Set(req.compteur_eau);
        active.montant_eau = Set(to_decimal(req.montant_eau, "montantEau")?);
        active.compteur_electricite = Set(req.compteur_electricite);
        active.montant_electricite = Set(to_decimal(req.montant_electricite, "montantElectricite")?);
        active.frais_louer = Set(to_decimal(req.frais_louer, "fraisLouer")?);
        active.paye = Set(req.paye);

        Ok(active.update(db).await?)
    }

    /// Supprime un month par identifiant.
    pub async fn delete_month(db: &DatabaseConnection, month_id: i32) -> Result<(), ApiError> {
        let result = month::Entity::delete_by_id(month_id).exec(db).await?;
        if result.rows_affected == 0 {
            return Err(ApiError::NotFound(format!("Month {} not found", month_id)));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Valeurs dérivées, non persistées (comptées côté consommateur)
// ---------------------------------------------------------------------------

/// Nombre de months impayés d'une chambre
pub fn mois_impayes(months: &[month::Model]) -> usize {
    months.iter().filter(|m| !m.paye).count()
}

/// Total dû : eau + électricité + loyer sur les months impayés.
/// Sommé en Decimal pour éviter la dérive d'arrondi.
pub fn total_du(months: &[month::Model]) -> Decimal {
    months
        .iter()
        .filter(|m| !m.paye)
        .map(|m| m.montant_eau + m.montant_electricite + m.frais_louer)
        .sum()
}

/// Dernier month saisi (dernier élément dans l'ordre d'insertion)
pub fn dernier_mois(months: &[month::Model]) -> Option<&month::Model> {
    months.last()
}

// Fonction helper pour convertir f64 en Decimal
fn to_decimal(value: f64, field: &str) -> Result<Decimal, ApiError> {
    Decimal::from_f64_retain(value)
        .ok_or_else(|| ApiError::Validation(format!("Invalid amount for {}", field)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn chambre_model(id: i32) -> chambre::Model {
        chambre::Model {
            id,
            name: "Chambre 1".to_string(),
            description: None,
            property: "123 Rue Principale".to_string(),
            tenant_name: None,
            tenant_phone: None,
            tenant_id_front: None,
            tenant_id_back: None,
            tenant_contract: None,
        }
    }

    fn month_model(id: i32, chambre_id: i32, paye: bool) -> month::Model {
        month::Model {
            id,
            chambre_id,
            month: format!("Mois {}", id),
            compteur_eau: 1250,
            montant_eau: Decimal::new(4550, 2),
            compteur_electricite: 8750,
            montant_electricite: Decimal::new(12000, 2),
            frais_louer: Decimal::new(15000, 2),
            paye,
        }
    }

    fn month_request(paye: bool) -> MonthRequest {
        MonthRequest {
            month: "Janvier 2024".to_string(),
            compteur_eau: 1250,
            montant_eau: 45.5,
            compteur_electricite: 8750,
            montant_electricite: 120.0,
            frais_louer: 150.0,
            paye,
        }
    }

    #[tokio::test]
    async fn test_create_chambre_rejects_empty_name() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let req = CreateChambreRequest {
            name: "".to_string(),
            description: None,
            property: "123 Rue Principale".to_string(),
            tenant_name: None,
            tenant_phone: None,
            tenant_id_front: None,
            tenant_id_back: None,
            tenant_contract: None,
        };

        let err = ChambreService::create_chambre(&db, req).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn test_get_chambre_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<chambre::Model>::new()])
            .into_connection();

        let err = ChambreService::get_chambre(&db, 99).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_get_chambre_returns_months_in_insertion_order() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![chambre_model(1)]])
            .append_query_results([vec![
                month_model(1, 1, true),
                month_model(2, 1, false),
            ]])
            .into_connection();

        let (chambre, months) = ChambreService::get_chambre(&db, 1).await.unwrap();
        assert_eq!(chambre.id, 1);
        assert_eq!(months.len(), 2);
        assert_eq!(dernier_mois(&months).unwrap().id, 2);
    }

    #[tokio::test]
    async fn test_delete_chambre_removes_months_before_chambre() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![chambre_model(1)]])
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 2,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
            ])
            .into_connection();

        ChambreService::delete_chambre(&db, 1).await.unwrap();

        // L'ordre months -> chambre est une exigence de correction :
        // on vérifie dans le journal que le DELETE sur months précède
        // celui sur chambres, dans la même transaction.
        let log = format!("{:?}", db.into_transaction_log());
        let months_pos = log.find("DELETE FROM \\\"months\\\"").or_else(|| log.find("DELETE FROM \"months\""));
        let chambres_pos = log.find("DELETE FROM \\\"chambres\\\"").or_else(|| log.find("DELETE FROM \"chambres\""));
        assert!(months_pos.is_some(), "months delete missing from log: {}", log);
        assert!(chambres_pos.is_some(), "chambres delete missing from log: {}", log);
        assert!(months_pos.unwrap() < chambres_pos.unwrap());
    }

    #[tokio::test]
    async fn test_delete_chambre_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<chambre::Model>::new()])
            .into_connection();

        let err = ChambreService::delete_chambre(&db, 42).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_add_month_requires_existing_chambre() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<chambre::Model>::new()])
            .into_connection();

        let err = ChambreService::add_month(&db, 42, month_request(false))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_month_replaces_all_fields() {
        let updated = month::Model {
            paye: true,
            ..month_model(7, 1, false)
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![month_model(7, 1, false)]])
            .append_query_results([vec![updated]])
            .into_connection();

        let mut req = month_request(false);
        req.paye = true;
        let month = ChambreService::update_month(&db, 7, req).await.unwrap();
        assert!(month.paye);
        assert_eq!(month.chambre_id, 1);
    }

    #[tokio::test]
    async fn test_delete_month_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let err = ChambreService::delete_month(&db, 99).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[test]
    fn test_derived_values() {
        let months = vec![
            month_model(1, 1, true),
            month_model(2, 1, false),
            month_model(3, 1, false),
        ];

        assert_eq!(mois_impayes(&months), 2);
        // 2 impayés x (45.50 + 120.00 + 150.00)
        assert_eq!(total_du(&months), Decimal::new(63100, 2));
        assert_eq!(dernier_mois(&months).unwrap().id, 3);
        assert!(dernier_mois(&[]).is_none());
    }

    #[test]
    fn test_paye_toggle_twice_restores_original() {
        let original = month_request(false);

        let mut toggled = original.clone();
        toggled.paye = !toggled.paye;
        let mut toggled_back = toggled.clone();
        toggled_back.paye = !toggled_back.paye;

        assert_eq!(toggled_back.paye, original.paye);
        assert_eq!(toggled_back.month, original.month);
        assert_eq!(toggled_back.frais_louer, original.frais_louer);
    }
}
