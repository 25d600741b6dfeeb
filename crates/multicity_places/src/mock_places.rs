use crate::{
    kilometers::Kilometers,
    place::{Place, PlaceId},
};

const MOCK_PLACES: [(&str, f64); 5] = [
    ("Fort", 5.0),
    ("Museum", 3.0),
    ("Temple", 7.0),
    ("Market", 2.0),
    ("Lake", 10.0),
];

/// Deterministic stand-in for the tourist places of a city, derived from its display name.
pub fn mock_places(city_name: &str) -> Vec<Place> {
    MOCK_PLACES
        .iter()
        .enumerate()
        .map(|(index, (suffix, distance))| Place {
            id: PlaceId::new(index as u32 + 1),
            name: format!("{city_name} {suffix}"),
            distance: Kilometers::new(*distance),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_places_are_deterministic() {
        let places = mock_places("Jaipur");

        assert_eq!(places.len(), 5);
        assert_eq!(places, mock_places("Jaipur"));
        assert_eq!(places[0].name, "Jaipur Fort");
        assert_eq!(places[0].id, PlaceId::new(1));
        assert_eq!(
            places.iter().map(|p| p.distance.value()).collect::<Vec<_>>(),
            vec![5.0, 3.0, 7.0, 2.0, 10.0]
        );
    }
}
