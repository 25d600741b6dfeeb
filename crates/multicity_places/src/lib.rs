pub mod cache;
pub mod kilometers;
pub mod mock_places;
pub mod place;
pub mod places_client;
pub mod places_provider;
