pub mod chambre_service;
