use serde::{Serialize, Deserialize};
use sea_orm::entity::prelude::*;

/// Une chambre louée : infos locataire, adresse de la propriété et
/// documents scannés. Les trois colonnes d'images contiennent des data
/// URIs base64 auto-suffisants (pas de référence fichier).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "chambres")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub property: String,
    pub tenant_name: Option<String>,
    pub tenant_phone: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub tenant_id_front: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub tenant_id_back: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub tenant_contract: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::month::Entity")]
    Month,
}

impl Related<super::month::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Month.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
