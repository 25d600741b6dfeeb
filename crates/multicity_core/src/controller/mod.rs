pub mod edit_error;
pub mod form_params;
pub mod pending_lookup;
pub mod route_form_controller;
pub mod route_form_ops;
pub mod sightseeing_extension;
