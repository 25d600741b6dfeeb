use fxhash::FxHashSet;
use jiff::civil::Date;
use multicity_places::kilometers::Kilometers;

use super::{leg::Leg, location::Location};

/// Trip-level figures shown next to a validated itinerary.
#[derive(Debug, Clone, PartialEq)]
pub struct TripTotals {
    pub total_legs: usize,
    pub leg_distance: Kilometers,
    pub extra_distance: Kilometers,
    pub total_distance: Kilometers,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub total_days: Option<i32>,
    pub is_circular: bool,
    /// Distinct origins and destinations, in the order they are first reached
    pub visited_locations: Vec<Location>,
}

impl TripTotals {
    pub fn compute(legs: &[Leg], extra_distance: Kilometers) -> Self {
        let leg_distance: Kilometers = legs.iter().filter_map(|leg| leg.distance()).sum();

        let start_date = legs.iter().filter_map(|leg| leg.date()).min();
        let end_date = legs.iter().filter_map(|leg| leg.date()).max();
        let total_days = match (start_date, end_date) {
            (Some(start), Some(end)) => Some((end - start).get_days() + 1),
            _ => None,
        };

        let is_circular = legs.len() >= 2
            && match (
                legs.first().and_then(|leg| leg.origin()),
                legs.last().and_then(|leg| leg.destination()),
            ) {
                (Some(first), Some(last)) => first == last,
                _ => false,
            };

        let mut seen = FxHashSet::default();
        let visited_locations = legs
            .iter()
            .flat_map(|leg| [leg.origin(), leg.destination()])
            .flatten()
            .filter(|location| seen.insert(location.id()))
            .cloned()
            .collect();

        TripTotals {
            total_legs: legs.len(),
            leg_distance,
            extra_distance,
            total_distance: leg_distance + extra_distance,
            start_date,
            end_date,
            total_days,
            is_circular,
            visited_locations,
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use crate::itinerary::leg::{LegBuilder, LegId};

    use super::*;

    fn leg(id: u64, day: i8, from: (u32, &str), to: (u32, &str), km: f64) -> Leg {
        let mut builder = LegBuilder::default();
        builder
            .set_id(LegId::new(id))
            .set_date(date(2026, 11, day))
            .set_origin(Location::city(from.0, from.1))
            .set_destination(Location::city(to.0, to.1))
            .set_distance(Kilometers::new(km));
        builder.build()
    }

    #[test]
    fn test_totals_of_circular_trip() {
        let legs = vec![
            leg(0, 3, (1, "Delhi"), (2, "Agra"), 230.0),
            leg(1, 4, (2, "Agra"), (3, "Jaipur"), 240.0),
            leg(2, 6, (3, "Jaipur"), (1, "Delhi"), 280.0),
        ];

        let totals = TripTotals::compute(&legs, Kilometers::new(12.0));

        assert_eq!(totals.total_legs, 3);
        assert_eq!(totals.leg_distance, Kilometers::new(750.0));
        assert_eq!(totals.total_distance, Kilometers::new(762.0));
        assert_eq!(totals.total_days, Some(4));
        assert_eq!(totals.start_date, Some(date(2026, 11, 3)));
        assert_eq!(totals.end_date, Some(date(2026, 11, 6)));
        assert!(totals.is_circular);
        assert_eq!(
            totals
                .visited_locations
                .iter()
                .map(|l| l.name())
                .collect::<Vec<_>>(),
            vec!["Delhi", "Agra", "Jaipur"]
        );
    }

    #[test]
    fn test_single_leg_is_not_circular() {
        let legs = vec![leg(0, 3, (1, "Delhi"), (1, "Delhi"), 0.0)];
        assert!(!TripTotals::compute(&legs, Kilometers::ZERO).is_circular);
    }
}
