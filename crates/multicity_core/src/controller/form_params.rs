use jiff::{SignedDuration, Timestamp, civil::Date, tz::TimeZone};

use crate::validation::sequence_validator::SequenceOptions;

#[derive(Clone, Debug)]
pub struct FormParams {
    pub max_rows: usize,

    pub continuity_check: bool,
    /// Route flag read by the sightseeing extension. Sightseeing distance counts towards the
    /// trip only when both this and `continuity_check` are set. Never a validation rule.
    pub no_revisit_check: bool,

    /// Pause between a passing validation and the summary
    pub validation_delay: SignedDuration,

    /// Pins the day past dates are measured against. When unset, the current day in
    /// `time_zone` is used.
    pub today: Option<Date>,
    pub time_zone: TimeZone,
}

impl Default for FormParams {
    fn default() -> Self {
        Self {
            max_rows: 10,
            continuity_check: false,
            no_revisit_check: false,
            validation_delay: SignedDuration::from_millis(1500),
            today: None,
            time_zone: TimeZone::system(),
        }
    }
}

impl FormParams {
    pub fn today(&self) -> Date {
        self.today
            .unwrap_or_else(|| Timestamp::now().to_zoned(self.time_zone.clone()).date())
    }

    pub fn sequence_options(&self) -> SequenceOptions {
        SequenceOptions {
            continuity_check: self.continuity_check,
        }
    }
}
