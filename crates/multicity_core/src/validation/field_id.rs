use serde::Serialize;

use crate::itinerary::leg::{LegField, LegId};

/// An input of the route form that can carry an error annotation.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldId {
    PickupCity,
    Leg { leg: LegId, field: LegField },
}

impl FieldId {
    pub fn leg(leg: LegId, field: LegField) -> Self {
        FieldId::Leg { leg, field }
    }

    pub fn leg_id(&self) -> Option<LegId> {
        match self {
            FieldId::PickupCity => None,
            FieldId::Leg { leg, .. } => Some(*leg),
        }
    }
}

impl std::fmt::Display for FieldId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldId::PickupCity => write!(f, "pickup_city"),
            FieldId::Leg { leg, field } => {
                let name = match field {
                    LegField::Date => "date",
                    LegField::Origin => "from",
                    LegField::Destination => "to",
                    LegField::Distance => "distance",
                };
                write!(f, "leg_{leg}.{name}")
            }
        }
    }
}
