pub mod controller;
pub mod itinerary;
pub mod json;
pub mod presentation;
pub mod validation;
