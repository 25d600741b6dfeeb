use std::collections::BTreeMap;

use super::{field_id::FieldId, validation_error::ValidationError};

/// Everything a full validation pass found, grouped the way it is reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    valid: bool,
    precondition: Option<ValidationError>,
    field_errors: BTreeMap<FieldId, String>,
    row_errors: Vec<ValidationError>,
    sequence_errors: Vec<ValidationError>,
}

impl ValidationOutcome {
    pub fn new(row_errors: Vec<ValidationError>, sequence_errors: Vec<ValidationError>) -> Self {
        let mut field_errors = BTreeMap::new();

        // Later errors replace earlier ones on the same field, like the annotations do.
        for error in row_errors.iter().chain(sequence_errors.iter()) {
            field_errors.insert(error.field(), error.to_string());
        }

        Self {
            valid: row_errors.is_empty() && sequence_errors.is_empty(),
            precondition: None,
            field_errors,
            row_errors,
            sequence_errors,
        }
    }

    /// A form-level gate failed and nothing else was checked.
    pub fn precondition_failed(error: ValidationError) -> Self {
        let mut field_errors = BTreeMap::new();
        field_errors.insert(error.field(), error.to_string());

        Self {
            valid: false,
            precondition: Some(error),
            field_errors,
            row_errors: Vec::new(),
            sequence_errors: Vec::new(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn precondition(&self) -> Option<&ValidationError> {
        self.precondition.as_ref()
    }

    pub fn field_errors(&self) -> &BTreeMap<FieldId, String> {
        &self.field_errors
    }

    pub fn row_errors(&self) -> &[ValidationError] {
        &self.row_errors
    }

    pub fn sequence_errors(&self) -> &[ValidationError] {
        &self.sequence_errors
    }

    pub fn errors(&self) -> impl Iterator<Item = &ValidationError> {
        self.precondition
            .iter()
            .chain(self.row_errors.iter())
            .chain(self.sequence_errors.iter())
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    /// One line per error, prefixed with the row for row-level errors.
    pub fn report(&self) -> String {
        let row_lines = self.row_errors.iter().map(|error| match error.row() {
            Some(row) => format!("Row {}: {}", row + 1, error),
            None => error.to_string(),
        });

        self.precondition
            .iter()
            .map(|error| error.to_string())
            .chain(row_lines)
            .chain(self.sequence_errors.iter().map(|error| error.to_string()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use crate::itinerary::leg::{LegField, LegId};

    use super::*;

    #[test]
    fn test_report_lists_every_error() {
        let leg = LegId::new(3);
        let outcome = ValidationOutcome::new(
            vec![ValidationError::DateRequired { row: 1, leg }],
            vec![ValidationError::DateSequenceViolation { row: 2, leg }],
        );

        assert!(!outcome.is_valid());
        assert_eq!(outcome.error_count(), 2);
        assert_eq!(
            outcome.report(),
            "Row 2: Please select a date\nRow 3: Date cannot be before the previous row's date"
        );
        assert_eq!(outcome.field_errors().len(), 1);
        assert_eq!(
            outcome.field_errors()[&FieldId::leg(leg, LegField::Date)],
            "Row 3: Date cannot be before the previous row's date"
        );
    }

    #[test]
    fn test_empty_outcome_is_valid() {
        let outcome = ValidationOutcome::new(vec![], vec![]);
        assert!(outcome.is_valid());
        assert_eq!(outcome.report(), "");
    }
}
