use serde::{Serialize, Deserialize};
use sea_orm::entity::prelude::*;

/// Relevé mensuel d'une chambre : compteurs, montants dus et statut de
/// paiement. Le libellé du mois est du texte libre ("Janvier 2024"),
/// pas une date structurée. L'ordre d'affichage suit l'id d'insertion.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "months")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub chambre_id: i32,
    pub month: String,
    pub compteur_eau: i32,
    pub montant_eau: Decimal,
    pub compteur_electricite: i32,
    pub montant_electricite: Decimal,
    pub frais_louer: Decimal,
    pub paye: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::chambre::Entity",
        from = "Column::ChambreId",
        to = "super::chambre::Column::Id"
    )]
    Chambre,
}

impl Related<super::chambre::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Chambre.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
