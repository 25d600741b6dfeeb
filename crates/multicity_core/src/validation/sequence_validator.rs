use crate::itinerary::leg::Leg;

use super::validation_error::ValidationError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SequenceOptions {
    /// Each leg must start where the previous one ended
    pub continuity_check: bool,
}

/// Runs every cross-row rule enabled in `options` over the ordered legs.
pub fn validate(legs: &[Leg], options: SequenceOptions) -> Vec<ValidationError> {
    let mut errors = validate_date_sequence(legs);

    if options.continuity_check {
        errors.extend(validate_route_continuity(legs));
    }

    errors
}

/// Dates must never go backwards from one leg to the next. Legs without a date are skipped,
/// the row validator reports them.
pub fn validate_date_sequence(legs: &[Leg]) -> Vec<ValidationError> {
    legs.windows(2)
        .enumerate()
        .filter_map(|(index, pair)| match (pair[0].date(), pair[1].date()) {
            (Some(previous), Some(current)) if current < previous => {
                Some(ValidationError::DateSequenceViolation {
                    row: index + 1,
                    leg: pair[1].id(),
                })
            }
            _ => None,
        })
        .collect()
}

pub fn validate_route_continuity(legs: &[Leg]) -> Vec<ValidationError> {
    legs.windows(2)
        .enumerate()
        .filter_map(|(index, pair)| {
            let expected = pair[0].destination()?;
            let actual = pair[1].origin();

            if actual == Some(expected) {
                return None;
            }

            Some(ValidationError::ContinuityViolation {
                row: index + 1,
                leg: pair[1].id(),
                expected: expected.name().to_owned(),
                actual: actual.map(|a| a.name().to_owned()).unwrap_or_default(),
            })
        })
        .collect()
}
