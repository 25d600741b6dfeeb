use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LocationIdParseError {
    #[error("Location id is empty")]
    Empty,
    #[error("Invalid location id \"{0}\", expected city_<n>, area_<n> or <n>")]
    Invalid(String),
}

/// Form value of a location select. Cities and local areas share the same select, prefixed
/// with `city_` and `area_`. A bare number is a city.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LocationId {
    City(u32),
    Area(u32),
}

impl std::fmt::Display for LocationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocationId::City(id) => write!(f, "city_{id}"),
            LocationId::Area(id) => write!(f, "area_{id}"),
        }
    }
}

impl FromStr for LocationId {
    type Err = LocationIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        if value.is_empty() {
            return Err(LocationIdParseError::Empty);
        }

        let (constructor, digits): (fn(u32) -> LocationId, &str) =
            if let Some(rest) = value.strip_prefix("city_") {
                (LocationId::City, rest)
            } else if let Some(rest) = value.strip_prefix("area_") {
                (LocationId::Area, rest)
            } else {
                (LocationId::City, value)
            };

        digits
            .parse::<u32>()
            .map(constructor)
            .map_err(|_| LocationIdParseError::Invalid(value.to_owned()))
    }
}

/// A selected city or area. Two locations are the same place when their ids match; the name
/// is the label shown to the user.
#[derive(Debug, Clone)]
pub struct Location {
    id: LocationId,
    name: String,
}

impl Location {
    pub fn new(id: LocationId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    pub fn city(id: u32, name: impl Into<String>) -> Self {
        Self::new(LocationId::City(id), name)
    }

    pub fn area(id: u32, name: impl Into<String>) -> Self {
        Self::new(LocationId::Area(id), name)
    }

    pub fn id(&self) -> LocationId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Location {}

impl std::hash::Hash for Location {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_prefixed_ids() {
        assert_eq!("city_12".parse::<LocationId>(), Ok(LocationId::City(12)));
        assert_eq!("area_3".parse::<LocationId>(), Ok(LocationId::Area(3)));
        assert_eq!(" 7 ".parse::<LocationId>(), Ok(LocationId::City(7)));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<LocationId>(), Err(LocationIdParseError::Empty));
        assert_eq!(
            "town_4".parse::<LocationId>(),
            Err(LocationIdParseError::Invalid(String::from("town_4")))
        );
    }

    #[test]
    fn test_display_round_trips_form_value() {
        assert_eq!(LocationId::Area(9).to_string(), "area_9");
        assert_eq!(LocationId::City(1).to_string(), "city_1");
    }

    #[test]
    fn test_locations_compare_by_id() {
        assert_eq!(Location::city(1, "Jaipur"), Location::city(1, "Jaipur City"));
        assert_ne!(Location::city(1, "Jaipur"), Location::area(1, "Jaipur"));
    }
}
