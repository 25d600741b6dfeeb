use std::collections::BTreeMap;

use multicity_places::{
    kilometers::Kilometers,
    place::{Place, PlaceId},
    places_client::PlacesError,
};
use thiserror::Error;

use super::leg::LegId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SightseeingError {
    #[error("Leg {0} is not part of the route")]
    UnknownLeg(LegId),
    #[error("Select a destination city to see available tourist places")]
    NoDestination(LegId),
    #[error("Sightseeing is not enabled for leg {0}")]
    Disabled(LegId),
    #[error("Place {place} is not offered for leg {leg}")]
    UnknownPlace { leg: LegId, place: PlaceId },
    #[error("Could not load tourist places: {0}")]
    Lookup(#[from] PlacesError),
}

/// The places picked for one leg. The total distance is kept equal to the sum of the
/// selected places on every change.
#[derive(Debug, Clone, Default)]
pub struct SightseeingSelection {
    enabled: bool,
    candidates: Vec<Place>,
    selected: BTreeMap<PlaceId, Place>,
    total_distance: Kilometers,
}

impl SightseeingSelection {
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn candidates(&self) -> &[Place] {
        &self.candidates
    }

    pub fn selected_places(&self) -> impl Iterator<Item = &Place> {
        self.selected.values()
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    pub fn is_selected(&self, place: PlaceId) -> bool {
        self.selected.contains_key(&place)
    }

    pub fn total_distance(&self) -> Kilometers {
        self.total_distance
    }

    /// Turns the toggle on with nothing loaded and nothing selected.
    pub fn enable(&mut self) {
        self.reset();
        self.enabled = true;
    }

    pub fn disable(&mut self) {
        self.reset();
        self.enabled = false;
    }

    /// Replaces the offered places. Selections made against the previous list are dropped.
    pub fn set_candidates(&mut self, places: Vec<Place>) {
        self.candidates = places;
        self.selected.clear();
        self.recompute_total();
    }

    pub fn clear_candidates(&mut self) {
        self.set_candidates(Vec::new());
    }

    pub fn select(
        &mut self,
        leg: LegId,
        place: PlaceId,
        selected: bool,
    ) -> Result<Kilometers, SightseeingError> {
        if !self.enabled {
            return Err(SightseeingError::Disabled(leg));
        }

        let candidate = self
            .candidates
            .iter()
            .find(|candidate| candidate.id == place)
            .ok_or(SightseeingError::UnknownPlace { leg, place })?;

        if selected {
            self.selected.insert(place, candidate.clone());
        } else {
            self.selected.remove(&place);
        }

        self.recompute_total();
        Ok(self.total_distance)
    }

    fn reset(&mut self) {
        self.candidates.clear();
        self.selected.clear();
        self.recompute_total();
    }

    fn recompute_total(&mut self) {
        self.total_distance = self.selected.values().map(|place| place.distance).sum();
    }
}

#[cfg(test)]
mod tests {
    use multicity_places::mock_places::mock_places;

    use super::*;

    const LEG: LegId = LegId::new(0);

    fn loaded_selection() -> SightseeingSelection {
        let mut selection = SightseeingSelection::default();
        selection.enable();
        selection.set_candidates(mock_places("Agra"));
        selection
    }

    #[test]
    fn test_total_follows_selection() {
        let mut selection = loaded_selection();

        selection.select(LEG, PlaceId::new(1), true).unwrap();
        let total = selection.select(LEG, PlaceId::new(2), true).unwrap();
        assert_eq!(total, Kilometers::new(8.0));

        let total = selection.select(LEG, PlaceId::new(1), false).unwrap();
        assert_eq!(total, Kilometers::new(3.0));
        assert_eq!(selection.selected_count(), 1);
    }

    #[test]
    fn test_disable_clears_everything() {
        let mut selection = loaded_selection();
        selection.select(LEG, PlaceId::new(1), true).unwrap();
        selection.select(LEG, PlaceId::new(2), true).unwrap();

        selection.disable();

        assert_eq!(selection.total_distance(), Kilometers::ZERO);
        assert_eq!(selection.selected_count(), 0);

        selection.enable();
        assert_eq!(selection.selected_count(), 0);
        assert!(selection.candidates().is_empty());
    }

    #[test]
    fn test_select_requires_enabled_and_known_place() {
        let mut selection = SightseeingSelection::default();
        assert_eq!(
            selection.select(LEG, PlaceId::new(1), true),
            Err(SightseeingError::Disabled(LEG))
        );

        let mut selection = loaded_selection();
        assert_eq!(
            selection.select(LEG, PlaceId::new(42), true),
            Err(SightseeingError::UnknownPlace {
                leg: LEG,
                place: PlaceId::new(42)
            })
        );
    }

    #[test]
    fn test_new_candidates_drop_selection() {
        let mut selection = loaded_selection();
        selection.select(LEG, PlaceId::new(5), true).unwrap();

        selection.set_candidates(mock_places("Goa"));

        assert_eq!(selection.selected_count(), 0);
        assert_eq!(selection.total_distance(), Kilometers::ZERO);
    }
}
