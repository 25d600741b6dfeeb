use jiff::civil::Date;
use multicity_places::kilometers::Kilometers;
use serde::Serialize;

use super::location::Location;

/// Stable identity of a leg. Unlike its position, it does not change when other legs are
/// removed.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct LegId(u64);

impl LegId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for LegId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LegField {
    Date,
    Origin,
    Destination,
    Distance,
}

impl std::fmt::Display for LegField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LegField::Date => write!(f, "Date"),
            LegField::Origin => write!(f, "From location"),
            LegField::Destination => write!(f, "To location"),
            LegField::Distance => write!(f, "Distance"),
        }
    }
}

/// One day of the trip: travel from `origin` to `destination` on `date`.
#[derive(Debug, Clone)]
pub struct Leg {
    id: LegId,
    date: Option<Date>,
    origin: Option<Location>,
    destination: Option<Location>,
    distance: Option<Kilometers>,
}

impl Leg {
    pub fn new(id: LegId) -> Self {
        Self {
            id,
            date: None,
            origin: None,
            destination: None,
            distance: None,
        }
    }

    pub fn id(&self) -> LegId {
        self.id
    }

    pub fn date(&self) -> Option<Date> {
        self.date
    }

    pub fn origin(&self) -> Option<&Location> {
        self.origin.as_ref()
    }

    pub fn destination(&self) -> Option<&Location> {
        self.destination.as_ref()
    }

    pub fn distance(&self) -> Option<Kilometers> {
        self.distance
    }

    pub(crate) fn set_date(&mut self, date: Option<Date>) {
        self.date = date;
    }

    pub(crate) fn set_origin(&mut self, origin: Option<Location>) {
        self.origin = origin;
    }

    pub(crate) fn set_destination(&mut self, destination: Option<Location>) {
        self.destination = destination;
    }

    pub(crate) fn set_distance(&mut self, distance: Option<Kilometers>) {
        self.distance = distance;
    }
}

#[derive(Default)]
pub struct LegBuilder {
    id: Option<LegId>,
    date: Option<Date>,
    origin: Option<Location>,
    destination: Option<Location>,
    distance: Option<Kilometers>,
}

impl LegBuilder {
    pub fn set_id(&mut self, id: LegId) -> &mut LegBuilder {
        self.id = Some(id);
        self
    }

    pub fn set_date(&mut self, date: Date) -> &mut LegBuilder {
        self.date = Some(date);
        self
    }

    pub fn set_origin(&mut self, origin: Location) -> &mut LegBuilder {
        self.origin = Some(origin);
        self
    }

    pub fn set_destination(&mut self, destination: Location) -> &mut LegBuilder {
        self.destination = Some(destination);
        self
    }

    pub fn set_distance(&mut self, distance: Kilometers) -> &mut LegBuilder {
        self.distance = Some(distance);
        self
    }

    pub fn build(self) -> Leg {
        Leg {
            id: self.id.unwrap_or_default(),
            date: self.date,
            origin: self.origin,
            destination: self.destination,
            distance: self.distance,
        }
    }
}
