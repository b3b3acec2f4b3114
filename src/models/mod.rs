// ============================================================================
// MODELS - MODULE PRINCIPAL
// ============================================================================
//
// Description:
//   Point d'entrée pour tous les modèles de données.
//   Chaque modèle correspond à une table PostgreSQL avec SeaORM.
//
// Liste des modules:
//   - health : Health check API
//   - users : Utilisateurs (username unique + hash de mot de passe)
//   - chambre : Chambres louées (locataire, documents, adresse)
//   - month : Relevés mensuels d'une chambre (eau, électricité, loyer, payé)
//   - dto : Data Transfer Objects pour les requêtes/réponses API
//
// Points d'attention:
//   - Tous les modèles utilisent SeaORM (pas de SQL brut)
//   - La relation chambre -> months est définie dans chaque modèle
//   - La suppression d'une chambre doit supprimer ses months d'abord
//     (pas de cascade garantie côté stockage)
//
// ============================================================================

pub mod health;
pub mod users;
pub mod chambre;
pub mod month;
pub mod dto;
