pub mod leg;
pub mod location;
pub mod route_form;
pub mod sightseeing;
pub mod trip_totals;
