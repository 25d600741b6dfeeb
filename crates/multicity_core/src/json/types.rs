use jiff::civil::Date;
use multicity_places::{kilometers::Kilometers, place::PlaceId};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};
use thiserror::Error;

use crate::itinerary::{
    leg::LegBuilder,
    location::{Location, LocationId},
    route_form::RouteForm,
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JsonFormError {
    #[error("The form has {legs} legs, at most {max_rows} are allowed")]
    TooManyLegs { legs: usize, max_rows: usize },
}

/// A filled-in route form.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Default)]
#[serde(deny_unknown_fields, rename = "RouteForm")]
pub struct JsonRouteForm {
    pub pickup_city: Option<JsonLocation>,
    #[serde(default)]
    pub legs: Vec<JsonLeg>,
}

#[serde_as]
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields, rename = "Location")]
pub struct JsonLocation {
    /// `city_<n>`, `area_<n>` or a bare city number
    #[serde_as(as = "DisplayFromStr")]
    pub id: LocationId,
    pub name: String,
}

impl From<&JsonLocation> for Location {
    fn from(value: &JsonLocation) -> Self {
        Location::new(value.id, value.name.clone())
    }
}

impl From<&Location> for JsonLocation {
    fn from(value: &Location) -> Self {
        JsonLocation {
            id: value.id(),
            name: value.name().to_owned(),
        }
    }
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Default)]
#[serde(deny_unknown_fields, rename = "Leg")]
pub struct JsonLeg {
    pub date: Option<Date>,
    pub from: Option<JsonLocation>,
    pub to: Option<JsonLocation>,
    pub distance: Option<Kilometers>,
    /// Tourist places to select once the leg's sightseeing is turned on
    pub sightseeing: Option<Vec<PlaceId>>,
}

impl JsonRouteForm {
    pub fn build_form(&self, max_rows: usize) -> Result<RouteForm, JsonFormError> {
        if self.legs.len() > max_rows {
            return Err(JsonFormError::TooManyLegs {
                legs: self.legs.len(),
                max_rows,
            });
        }

        let legs = self
            .legs
            .iter()
            .map(|leg| {
                let mut builder = LegBuilder::default();
                if let Some(date) = leg.date {
                    builder.set_date(date);
                }
                if let Some(from) = &leg.from {
                    builder.set_origin(from.into());
                }
                if let Some(to) = &leg.to {
                    builder.set_destination(to.into());
                }
                if let Some(distance) = leg.distance {
                    builder.set_distance(distance);
                }
                builder
            })
            .collect();

        Ok(RouteForm::from_legs(
            self.pickup_city.as_ref().map(Location::from),
            legs,
        ))
    }

    /// Places to select, by leg position. Legs without a list are left out.
    pub fn sightseeing(&self) -> impl Iterator<Item = (usize, &[PlaceId])> {
        self.legs
            .iter()
            .enumerate()
            .filter_map(|(index, leg)| leg.sightseeing.as_deref().map(|places| (index, places)))
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    const FORM: &str = r#"{
        "pickup_city": { "id": "city_1", "name": "Delhi" },
        "legs": [
            {
                "date": "2026-12-01",
                "from": { "id": "city_1", "name": "Delhi" },
                "to": { "id": "area_7", "name": "Connaught Place" },
                "distance": 12.5,
                "sightseeing": [1, 4]
            },
            { "date": "2026-12-02" }
        ]
    }"#;

    #[test]
    fn test_build_form_from_json() {
        let json: JsonRouteForm = serde_json::from_str(FORM).unwrap();

        let form = json.build_form(10).unwrap();

        assert_eq!(form.len(), 2);
        assert_eq!(form.pickup_city().map(|c| c.name()), Some("Delhi"));
        let first = &form.legs()[0];
        assert_eq!(first.date(), Some(date(2026, 12, 1)));
        assert_eq!(
            first.destination().map(|l| l.id()),
            Some(LocationId::Area(7))
        );
        assert_eq!(first.distance(), Some(Kilometers::new(12.5)));
        assert!(form.legs()[1].origin().is_none());

        let sightseeing: Vec<_> = json.sightseeing().collect();
        assert_eq!(sightseeing, vec![(0, &[PlaceId::new(1), PlaceId::new(4)][..])]);
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let result = serde_json::from_str::<JsonRouteForm>(r#"{ "legs": [], "vehicles": [] }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_too_many_legs() {
        let json = JsonRouteForm {
            pickup_city: None,
            legs: vec![JsonLeg::default(); 3],
        };

        assert_eq!(
            json.build_form(2).unwrap_err(),
            JsonFormError::TooManyLegs {
                legs: 3,
                max_rows: 2
            }
        );
    }
}
