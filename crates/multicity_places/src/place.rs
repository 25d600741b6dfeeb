use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::kilometers::Kilometers;

#[derive(
    Serialize, Deserialize, JsonSchema, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
pub struct PlaceId(u32);

impl PlaceId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for PlaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A point of interest around a city, with the extra distance needed to visit it.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct Place {
    pub id: PlaceId,
    pub name: String,
    pub distance: Kilometers,
}

/// The city a lookup is made for. The id is the form value (`city_3`), the name its label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlacesQuery {
    pub city_id: String,
    pub city_name: String,
}

impl PlacesQuery {
    pub fn new(city_id: impl Into<String>, city_name: impl Into<String>) -> Self {
        Self {
            city_id: city_id.into(),
            city_name: city_name.into(),
        }
    }
}
