use jiff::civil::Date;

use crate::itinerary::leg::{Leg, LegField};

use super::validation_error::ValidationError;

/// Checks the fields of a single leg against the calendar day `today`.
pub struct RowValidator {
    today: Date,
}

impl RowValidator {
    pub fn new(today: Date) -> Self {
        Self { today }
    }

    pub fn today(&self) -> Date {
        self.today
    }

    /// Every rule the leg at position `row` breaks. Rules are independent, so a leg with
    /// several problems reports all of them.
    pub fn validate(&self, row: usize, leg: &Leg) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if let Some(error) = self.validate_date(row, leg) {
            errors.push(error);
        }

        if leg.origin().is_none() {
            errors.push(ValidationError::FieldRequired {
                row,
                leg: leg.id(),
                field: LegField::Origin,
            });
        }

        if leg.destination().is_none() {
            errors.push(ValidationError::FieldRequired {
                row,
                leg: leg.id(),
                field: LegField::Destination,
            });
        }

        if let (Some(origin), Some(destination)) = (leg.origin(), leg.destination()) {
            if origin == destination {
                errors.push(ValidationError::SameCity { row, leg: leg.id() });
            }
        }

        errors
    }

    pub fn validate_date(&self, row: usize, leg: &Leg) -> Option<ValidationError> {
        match leg.date() {
            None => Some(ValidationError::DateRequired { row, leg: leg.id() }),
            Some(date) if date < self.today => Some(ValidationError::PastDate {
                row,
                leg: leg.id(),
                date,
            }),
            Some(_) => None,
        }
    }
}
