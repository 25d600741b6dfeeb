use std::collections::BTreeMap;

use jiff::SignedDuration;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::place::Place;

pub const DEFAULT_MOCK_LATENCY: SignedDuration = SignedDuration::from_millis(500);

#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone)]
pub enum PlacesProvider {
    /// Five synthetic places per city name, answered after a simulated latency
    Mock { latency: SignedDuration },

    /// Fixed places per city id, e.g. loaded from a fixture file
    Custom { places: BTreeMap<String, Vec<Place>> },
}

impl Default for PlacesProvider {
    fn default() -> Self {
        PlacesProvider::Mock {
            latency: DEFAULT_MOCK_LATENCY,
        }
    }
}

impl std::hash::Hash for PlacesProvider {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        match self {
            PlacesProvider::Mock { latency } => {
                state.write_u8(0);
                latency.hash(state);
            }
            PlacesProvider::Custom { places } => {
                state.write_u8(1);
                for (city_id, city_places) in places {
                    city_id.hash(state);
                    for place in city_places {
                        place.id.hash(state);
                        place.name.hash(state);
                        state.write_u64(place.distance.value().to_bits());
                    }
                }
            }
        }
    }
}
