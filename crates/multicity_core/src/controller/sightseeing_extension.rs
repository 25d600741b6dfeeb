use std::sync::Arc;

use fxhash::{FxHashMap, FxHashSet};
use jiff::civil::Date;
use multicity_places::{
    kilometers::Kilometers,
    place::{Place, PlaceId, PlacesQuery},
    places_client::{PlacesError, PlacesLookup},
};
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::{
    itinerary::{
        leg::{Leg, LegId},
        location::Location,
        route_form::RouteForm,
        sightseeing::{SightseeingError, SightseeingSelection},
    },
    presentation::{
        field_error_presenter::FieldErrorPresenter,
        notification::{Notice, NotificationFacade, NotificationKind},
        render::{
            CheckItemView, PanelStatus, PanelView, RowView, SearchAction, SummarySection,
            SummaryView, ToggleView, distance_badge,
        },
    },
    validation::validation_outcome::ValidationOutcome,
};

use super::{
    edit_error::EditError,
    form_params::FormParams,
    pending_lookup::{LookupTicket, PendingLookups},
    route_form_controller::RouteFormController,
    route_form_ops::RouteFormOps,
};

pub const PANEL_TITLE: &str = "Local Sightseeing";
pub const SUMMARY_SECTION_TITLE: &str = "Sightseeing Summary";

/// A places lookup ready to run. Running it does not need the extension, so it can be
/// spawned while the form keeps being edited.
pub struct PlacesRequest<L> {
    ticket: LookupTicket,
    query: PlacesQuery,
    lookup: Arc<L>,
}

impl<L: PlacesLookup> PlacesRequest<L> {
    pub fn ticket(&self) -> LookupTicket {
        self.ticket
    }

    pub fn query(&self) -> &PlacesQuery {
        &self.query
    }

    pub async fn run(self) -> PlacesResponse {
        let result = self.lookup.fetch_places(&self.query).await;
        PlacesResponse {
            ticket: self.ticket,
            result,
        }
    }
}

#[derive(Debug)]
pub struct PlacesResponse {
    ticket: LookupTicket,
    result: Result<Vec<Place>, PlacesError>,
}

impl PlacesResponse {
    pub fn leg(&self) -> LegId {
        self.ticket.leg
    }
}

/// Selected places of one leg, as submitted with the booking.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SightseeingData {
    pub leg: LegId,
    pub day: usize,
    pub places: Vec<Place>,
    pub total_distance: Kilometers,
}

/// Adds local sightseeing to every leg of a wrapped route form.
///
/// Each leg gets a toggle. Turning it on loads the tourist places around the leg's destination
/// and the places the user picks add their distance to the trip. Wrapping a form turns on the
/// continuity check and the no-revisit flag, which only decides whether sightseeing counts
/// towards the summary and totals.
pub struct SightseeingExtension<C, L> {
    inner: C,
    lookup: Arc<L>,
    selections: FxHashMap<LegId, SightseeingSelection>,
    pending: PendingLookups,
    stale: FxHashSet<LegId>,
}

impl<L: PlacesLookup> SightseeingExtension<RouteFormController, L> {
    pub fn with_base(
        params: FormParams,
        notifications: Arc<dyn NotificationFacade>,
        lookup: Arc<L>,
    ) -> Self {
        Self::new(RouteFormController::new(params, notifications), lookup)
    }
}

impl<C: RouteFormOps, L: PlacesLookup> SightseeingExtension<C, L> {
    pub fn new(mut inner: C, lookup: Arc<L>) -> Self {
        let params = inner.params_mut();
        params.continuity_check = true;
        params.no_revisit_check = true;

        let selections = inner
            .form()
            .leg_ids()
            .map(|leg| (leg, SightseeingSelection::default()))
            .collect();

        Self {
            inner,
            lookup,
            selections,
            pending: PendingLookups::default(),
            stale: FxHashSet::default(),
        }
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    pub fn lookup(&self) -> &Arc<L> {
        &self.lookup
    }

    pub fn selection(&self, leg: LegId) -> Option<&SightseeingSelection> {
        self.selections.get(&leg)
    }

    fn selection_mut(&mut self, leg: LegId) -> Result<&mut SightseeingSelection, SightseeingError> {
        self.selections
            .get_mut(&leg)
            .ok_or(SightseeingError::UnknownLeg(leg))
    }

    fn counts_towards_trip(&self) -> bool {
        let params = self.inner.params();
        params.continuity_check && params.no_revisit_check
    }

    /// Starts a lookup for the places around the leg's destination, superseding any lookup
    /// still pending for that leg.
    pub fn places_request(&mut self, leg: LegId) -> Result<PlacesRequest<L>, SightseeingError> {
        if !self.selection_mut(leg)?.is_enabled() {
            return Err(SightseeingError::Disabled(leg));
        }

        let destination = self
            .inner
            .form()
            .leg(leg)
            .and_then(|l| l.destination())
            .ok_or(SightseeingError::NoDestination(leg))?;
        let query = PlacesQuery::new(destination.id().to_string(), destination.name());

        self.stale.remove(&leg);
        let ticket = self.pending.start(leg);
        debug!("Loading places for leg {} around {}", leg, query.city_name);

        Ok(PlacesRequest {
            ticket,
            query,
            lookup: Arc::clone(&self.lookup),
        })
    }

    /// Flips the sightseeing toggle of `leg`. Turning it on returns the lookup to run.
    pub fn set_sightseeing_enabled(
        &mut self,
        leg: LegId,
        enabled: bool,
    ) -> Result<Option<PlacesRequest<L>>, SightseeingError> {
        let has_destination = self
            .inner
            .form()
            .leg(leg)
            .is_some_and(|l| l.destination().is_some());
        let selection = self
            .selections
            .get_mut(&leg)
            .ok_or(SightseeingError::UnknownLeg(leg))?;

        if !enabled {
            selection.disable();
            self.pending.cancel(leg);
            self.stale.remove(&leg);
            debug!("Sightseeing disabled for leg {}", leg);
            return Ok(None);
        }

        if !has_destination {
            return Err(SightseeingError::NoDestination(leg));
        }

        selection.enable();
        debug!("Sightseeing enabled for leg {}", leg);
        self.places_request(leg).map(Some)
    }

    /// Applies a finished lookup. Returns false when the response is discarded because a newer
    /// lookup was started, the toggle was turned off or the leg is gone.
    pub fn apply_places(&mut self, response: PlacesResponse) -> Result<bool, SightseeingError> {
        let leg = response.leg();

        if !self.pending.finish(&response.ticket) {
            debug!("Discarding superseded places for leg {}", leg);
            return Ok(false);
        }

        let Some(selection) = self.selections.get_mut(&leg) else {
            return Ok(false);
        };

        if !selection.is_enabled() {
            debug!("Discarding places for leg {}, sightseeing is off", leg);
            return Ok(false);
        }

        match response.result {
            Ok(places) => {
                selection.set_candidates(places);
                Ok(true)
            }
            Err(error) => {
                let error = SightseeingError::from(error);
                self.inner
                    .notifications()
                    .notify(Notice::new(error.to_string(), NotificationKind::Error));
                Err(error)
            }
        }
    }

    pub async fn toggle_sightseeing(
        &mut self,
        leg: LegId,
        enabled: bool,
    ) -> Result<bool, SightseeingError> {
        match self.set_sightseeing_enabled(leg, enabled)? {
            Some(request) => {
                let response = request.run().await;
                self.apply_places(response)
            }
            None => Ok(false),
        }
    }

    /// Reloads the places of an enabled leg.
    pub async fn load_places(&mut self, leg: LegId) -> Result<bool, SightseeingError> {
        let request = self.places_request(leg)?;
        let response = request.run().await;
        self.apply_places(response)
    }

    /// Lookups for the legs whose destination changed while sightseeing was on.
    pub fn reload_requests(&mut self) -> Vec<PlacesRequest<L>> {
        let mut stale: Vec<LegId> = self.stale.drain().collect();
        stale.sort();

        stale
            .into_iter()
            .filter_map(|leg| self.places_request(leg).ok())
            .collect()
    }

    pub fn select_place(
        &mut self,
        leg: LegId,
        place: PlaceId,
        selected: bool,
    ) -> Result<Kilometers, SightseeingError> {
        let total = self.selection_mut(leg)?.select(leg, place, selected)?;
        debug!("Sightseeing distance for leg {} is now {}", leg, total);
        Ok(total)
    }

    /// The enabled legs with at least one place selected, in route order.
    pub fn sightseeing_data(&self) -> Vec<SightseeingData> {
        self.inner
            .form()
            .legs()
            .iter()
            .enumerate()
            .filter_map(|(index, leg)| {
                let selection = self.selections.get(&leg.id())?;
                if !selection.is_enabled() || selection.selected_count() == 0 {
                    return None;
                }

                Some(SightseeingData {
                    leg: leg.id(),
                    day: index + 1,
                    places: selection.selected_places().cloned().collect(),
                    total_distance: selection.total_distance(),
                })
            })
            .collect()
    }

    fn panel(&self, leg: &Leg) -> Option<PanelView> {
        let selection = self.selections.get(&leg.id())?;
        let has_destination = leg.destination().is_some();

        let status = if !selection.is_enabled() {
            PanelStatus::Collapsed
        } else if !has_destination {
            PanelStatus::NeedsDestination
        } else if self.pending.is_pending(leg.id()) || self.stale.contains(&leg.id()) {
            PanelStatus::Loading
        } else {
            PanelStatus::Ready
        };

        let items = if status == PanelStatus::Ready {
            selection
                .candidates()
                .iter()
                .map(|place| CheckItemView {
                    key: place.id.get(),
                    label: format!("{} ({} km)", place.name, place.distance.value()),
                    checked: selection.is_selected(place.id),
                })
                .collect()
        } else {
            Vec::new()
        };

        Some(PanelView {
            title: String::from(PANEL_TITLE),
            visible: has_destination,
            toggle: ToggleView {
                label: String::from("Include Local Sightseeing"),
                hint: String::from("Add sightseeing distance to total trip"),
                checked: selection.is_enabled(),
            },
            status,
            items,
            badge: selection
                .is_enabled()
                .then(|| distance_badge(selection.total_distance())),
        })
    }
}

impl<C: RouteFormOps, L: PlacesLookup> RouteFormOps for SightseeingExtension<C, L> {
    fn form(&self) -> &RouteForm {
        self.inner.form()
    }

    fn params(&self) -> &FormParams {
        self.inner.params()
    }

    fn params_mut(&mut self) -> &mut FormParams {
        self.inner.params_mut()
    }

    fn notifications(&self) -> &Arc<dyn NotificationFacade> {
        self.inner.notifications()
    }

    fn field_errors(&self) -> &FieldErrorPresenter {
        self.inner.field_errors()
    }

    fn search_action(&self) -> SearchAction {
        self.inner.search_action()
    }

    fn add_leg(&mut self) -> Result<LegId, EditError> {
        let leg = self.inner.add_leg()?;
        self.selections.insert(leg, SightseeingSelection::default());
        Ok(leg)
    }

    fn remove_leg(&mut self, leg: LegId) -> Result<Leg, EditError> {
        let removed = self.inner.remove_leg(leg)?;
        self.selections.remove(&leg);
        self.pending.cancel(leg);
        self.stale.remove(&leg);
        Ok(removed)
    }

    fn set_pickup_city(&mut self, city: Option<Location>) {
        self.inner.set_pickup_city(city)
    }

    fn set_date(&mut self, leg: LegId, date: Option<Date>) -> Result<(), EditError> {
        self.inner.set_date(leg, date)
    }

    fn set_origin(&mut self, leg: LegId, origin: Option<Location>) -> Result<(), EditError> {
        self.inner.set_origin(leg, origin)
    }

    fn set_destination(
        &mut self,
        leg: LegId,
        destination: Option<Location>,
    ) -> Result<(), EditError> {
        let previous = self
            .inner
            .form()
            .leg(leg)
            .and_then(|l| l.destination())
            .map(|l| l.id());
        let next = destination.as_ref().map(|l| l.id());

        self.inner.set_destination(leg, destination)?;

        let Some(selection) = self.selections.get_mut(&leg) else {
            return Ok(());
        };

        if next.is_none() {
            if selection.is_enabled() {
                debug!("Destination of leg {} cleared, sightseeing disabled", leg);
            }
            selection.disable();
            self.pending.cancel(leg);
            self.stale.remove(&leg);
        } else if selection.is_enabled() && previous != next {
            selection.clear_candidates();
            self.pending.cancel(leg);
            self.stale.insert(leg);
        }

        Ok(())
    }

    fn set_distance(
        &mut self,
        leg: LegId,
        distance: Option<Kilometers>,
    ) -> Result<(), EditError> {
        self.inner.set_distance(leg, distance)
    }

    #[instrument(skip_all, level = "debug")]
    async fn validate_all(&mut self) -> ValidationOutcome {
        let outcome = self.inner.validate_all().await;

        if outcome.is_valid() {
            let data = self.sightseeing_data();
            if !data.is_empty() {
                info!(
                    legs = data.len(),
                    distance = %self.extra_distance(),
                    "Sightseeing selected"
                );
                debug!("Sightseeing data: {:?}", data);
            }
        }

        outcome
    }

    fn base_rows(&self) -> Vec<RowView> {
        self.inner.base_rows()
    }

    fn render_row_extra(&self, leg: LegId) -> Vec<PanelView> {
        let mut panels = self.inner.render_row_extra(leg);
        if let Some(panel) = self.form().leg(leg).and_then(|l| self.panel(l)) {
            panels.push(panel);
        }
        panels
    }

    fn base_summary(&self) -> Option<SummaryView> {
        self.inner.base_summary()
    }

    fn render_summary_extra(&self) -> Vec<SummarySection> {
        let mut sections = self.inner.render_summary_extra();

        if !self.counts_towards_trip() {
            return sections;
        }

        let lines: Vec<String> = self
            .sightseeing_data()
            .iter()
            .map(|data| {
                format!(
                    "Day {}: {} places selected (+{:.1} km)",
                    data.day,
                    data.places.len(),
                    data.total_distance.value()
                )
            })
            .collect();

        if !lines.is_empty() {
            sections.push(SummarySection {
                title: String::from(SUMMARY_SECTION_TITLE),
                lines,
            });
        }

        sections
    }

    fn extra_distance(&self) -> Kilometers {
        let mut distance = self.inner.extra_distance();
        if self.counts_towards_trip() {
            distance += self
                .sightseeing_data()
                .iter()
                .map(|data| data.total_distance)
                .sum::<Kilometers>();
        }
        distance
    }
}

#[cfg(test)]
mod tests {
    use jiff::SignedDuration;
    use multicity_places::{
        cache::NoCache, places_client::PlacesClient, places_provider::PlacesProvider,
    };

    use crate::presentation::notice_board::NoticeBoard;

    use super::*;

    type Extension = SightseeingExtension<RouteFormController, PlacesClient>;

    fn extension() -> Extension {
        let client = PlacesClient::new(
            PlacesProvider::Mock {
                latency: SignedDuration::ZERO,
            },
            NoCache,
        );
        SightseeingExtension::with_base(
            FormParams::default(),
            Arc::new(NoticeBoard::default()),
            Arc::new(client),
        )
    }

    fn first_leg(extension: &Extension) -> LegId {
        extension.form().legs()[0].id()
    }

    #[test]
    fn test_wrapping_enables_trip_checks() {
        let extension = extension();

        assert!(extension.params().continuity_check);
        assert!(extension.params().no_revisit_check);
        assert!(extension.selection(first_leg(&extension)).is_some());
    }

    #[test]
    fn test_toggle_requires_destination() {
        let mut extension = extension();
        let leg = first_leg(&extension);

        assert_eq!(
            extension.set_sightseeing_enabled(leg, true).err(),
            Some(SightseeingError::NoDestination(leg))
        );
        assert!(!extension.render_row_extra(leg)[0].visible);
    }

    #[tokio::test]
    async fn test_selected_places_feed_summary_lines() {
        let mut extension = extension();
        let leg = first_leg(&extension);
        extension
            .set_destination(leg, Some(Location::city(3, "Jaipur")))
            .unwrap();

        assert!(extension.toggle_sightseeing(leg, true).await.unwrap());
        extension.select_place(leg, PlaceId::new(1), true).unwrap();
        extension.select_place(leg, PlaceId::new(2), true).unwrap();

        let lines = &extension.render_summary_extra()[0].lines;
        assert_eq!(lines, &vec![String::from("Day 1: 2 places selected (+8.0 km)")]);
        assert_eq!(extension.extra_distance(), Kilometers::new(8.0));

        let panel = &extension.render_row_extra(leg)[0];
        assert_eq!(panel.status, PanelStatus::Ready);
        assert_eq!(panel.items[0].label, "Jaipur Fort (5 km)");
        assert_eq!(panel.badge.as_deref(), Some("8.0 KM"));
    }

    #[tokio::test]
    async fn test_changing_destination_marks_places_stale() {
        let mut extension = extension();
        let leg = first_leg(&extension);
        extension
            .set_destination(leg, Some(Location::city(3, "Jaipur")))
            .unwrap();
        extension.toggle_sightseeing(leg, true).await.unwrap();
        extension.select_place(leg, PlaceId::new(5), true).unwrap();

        extension
            .set_destination(leg, Some(Location::city(4, "Udaipur")))
            .unwrap();

        let selection = extension.selection(leg).unwrap();
        assert!(selection.is_enabled());
        assert_eq!(selection.selected_count(), 0);
        assert_eq!(extension.render_row_extra(leg)[0].status, PanelStatus::Loading);

        let requests = extension.reload_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].query().city_name, "Udaipur");

        for request in requests {
            let response = request.run().await;
            assert!(extension.apply_places(response).unwrap());
        }
        assert_eq!(
            extension.selection(leg).unwrap().candidates()[0].name,
            "Udaipur Fort"
        );
    }

    #[test]
    fn test_clearing_destination_disables_toggle() {
        let mut extension = extension();
        let leg = first_leg(&extension);
        extension
            .set_destination(leg, Some(Location::city(3, "Jaipur")))
            .unwrap();
        let _ = extension.set_sightseeing_enabled(leg, true).unwrap();

        extension.set_destination(leg, None).unwrap();

        assert!(!extension.selection(leg).unwrap().is_enabled());
    }
}
