use thiserror::Error;

use crate::itinerary::leg::LegId;

/// Why an add or remove was refused. The form is left untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("Maximum {max_rows} rows allowed")]
    MaxRowsReached { max_rows: usize },
    #[error("Please complete the current row before adding a new one")]
    IncompleteCurrentRow,
    #[error("At least one row is required")]
    MinRowsRequired,
    #[error("Leg {0} is not part of the route")]
    UnknownLeg(LegId),
}
