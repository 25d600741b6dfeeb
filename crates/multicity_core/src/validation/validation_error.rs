use jiff::civil::Date;
use thiserror::Error;

use crate::itinerary::leg::{LegField, LegId};

use super::field_id::FieldId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationCode {
    PickupCityRequired,
    DateRequired,
    FieldRequired,
    PastDate,
    SameCity,
    DateSequenceViolation,
    ContinuityViolation,
}

/// A rule the route form breaks. `row` is the zero-based position of the offending leg.
///
/// Row-level messages are written for the annotation next to the field, so they do not
/// mention the row; cross-row messages do.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please select a pickup city first.")]
    PickupCityRequired,

    #[error("Please select a date")]
    DateRequired { row: usize, leg: LegId },

    #[error("{field} is required")]
    FieldRequired {
        row: usize,
        leg: LegId,
        field: LegField,
    },

    #[error("Date cannot be in the past")]
    PastDate { row: usize, leg: LegId, date: Date },

    #[error("To city cannot be same as from city")]
    SameCity { row: usize, leg: LegId },

    #[error("Row {}: Date cannot be before the previous row's date", .row + 1)]
    DateSequenceViolation { row: usize, leg: LegId },

    #[error(
        "Row {}: \"From\" location ({actual}) must match the previous row's \"To\" location ({expected}). Route must be continuous.",
        .row + 1
    )]
    ContinuityViolation {
        row: usize,
        leg: LegId,
        expected: String,
        actual: String,
    },
}

impl ValidationError {
    pub fn code(&self) -> ValidationCode {
        match self {
            ValidationError::PickupCityRequired => ValidationCode::PickupCityRequired,
            ValidationError::DateRequired { .. } => ValidationCode::DateRequired,
            ValidationError::FieldRequired { .. } => ValidationCode::FieldRequired,
            ValidationError::PastDate { .. } => ValidationCode::PastDate,
            ValidationError::SameCity { .. } => ValidationCode::SameCity,
            ValidationError::DateSequenceViolation { .. } => ValidationCode::DateSequenceViolation,
            ValidationError::ContinuityViolation { .. } => ValidationCode::ContinuityViolation,
        }
    }

    pub fn row(&self) -> Option<usize> {
        match self {
            ValidationError::PickupCityRequired => None,
            ValidationError::DateRequired { row, .. }
            | ValidationError::FieldRequired { row, .. }
            | ValidationError::PastDate { row, .. }
            | ValidationError::SameCity { row, .. }
            | ValidationError::DateSequenceViolation { row, .. }
            | ValidationError::ContinuityViolation { row, .. } => Some(*row),
        }
    }

    /// The field the error is annotated on.
    pub fn field(&self) -> FieldId {
        match self {
            ValidationError::PickupCityRequired => FieldId::PickupCity,
            ValidationError::DateRequired { leg, .. }
            | ValidationError::PastDate { leg, .. }
            | ValidationError::DateSequenceViolation { leg, .. } => {
                FieldId::leg(*leg, LegField::Date)
            }
            ValidationError::FieldRequired { leg, field, .. } => FieldId::leg(*leg, *field),
            ValidationError::SameCity { leg, .. } => FieldId::leg(*leg, LegField::Destination),
            ValidationError::ContinuityViolation { leg, .. } => {
                FieldId::leg(*leg, LegField::Origin)
            }
        }
    }
}
