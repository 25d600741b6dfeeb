#![allow(dead_code)]

use std::sync::Arc;

use jiff::{
    SignedDuration,
    civil::{Date, date},
};
use multicity_core::{
    controller::{
        form_params::FormParams, route_form_controller::RouteFormController,
        route_form_ops::RouteFormOps, sightseeing_extension::SightseeingExtension,
    },
    itinerary::{leg::LegId, location::Location},
    presentation::notice_board::NoticeBoard,
};
use multicity_places::{
    cache::NoCache, places_client::PlacesClient, places_provider::PlacesProvider,
};

pub type TestExtension = SightseeingExtension<RouteFormController, PlacesClient>;

pub fn today() -> Date {
    date(2026, 10, 19)
}

/// `offset` days after [`today`].
pub fn day(offset: i64) -> Date {
    today()
        .checked_add(SignedDuration::from_hours(24 * offset))
        .unwrap()
}

pub fn city(id: u32) -> Location {
    let name = match id {
        1 => "Delhi",
        2 => "Agra",
        3 => "Jaipur",
        4 => "Udaipur",
        5 => "Jodhpur",
        _ => "Pushkar",
    };
    Location::city(id, name)
}

pub fn params() -> FormParams {
    FormParams {
        today: Some(today()),
        ..FormParams::default()
    }
}

pub fn create_controller(params: FormParams) -> (RouteFormController, NoticeBoard) {
    let board = NoticeBoard::default();
    let controller = RouteFormController::new(params, Arc::new(board.clone()));
    (controller, board)
}

pub fn mock_client(latency_ms: i64) -> Arc<PlacesClient> {
    Arc::new(PlacesClient::new(
        PlacesProvider::Mock {
            latency: SignedDuration::from_millis(latency_ms),
        },
        NoCache,
    ))
}

pub fn create_extension(latency_ms: i64) -> (TestExtension, NoticeBoard) {
    let board = NoticeBoard::default();
    let extension = SightseeingExtension::with_base(
        params(),
        Arc::new(board.clone()),
        mock_client(latency_ms),
    );
    (extension, board)
}

/// Fills the last leg and returns its id.
pub fn fill_last_leg(
    form: &mut impl RouteFormOps,
    date: Date,
    from: Location,
    to: Location,
) -> LegId {
    let leg = form.form().last().map(|l| l.id()).unwrap();
    form.set_date(leg, Some(date)).unwrap();
    form.set_origin(leg, Some(from)).unwrap();
    form.set_destination(leg, Some(to)).unwrap();
    leg
}

/// Builds a chain of legs `stops[0] → stops[1] → ...`, one per date.
pub fn fill_route(form: &mut impl RouteFormOps, stops: &[u32], dates: &[Date]) -> Vec<LegId> {
    let mut legs = Vec::new();

    for (index, pair) in stops.windows(2).enumerate() {
        if index > 0 {
            form.add_leg().unwrap();
        }
        legs.push(fill_last_leg(
            form,
            dates[index],
            city(pair[0]),
            city(pair[1]),
        ));
    }

    legs
}
