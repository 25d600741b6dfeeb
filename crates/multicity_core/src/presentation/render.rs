use jiff::civil::Date;
use multicity_places::kilometers::Kilometers;
use serde::Serialize;

use crate::itinerary::leg::{LegField, LegId};

/// What one leg row shows.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RowView {
    pub leg_id: LegId,
    /// One-based day number, the row's position in the form
    pub day: usize,
    pub date: Option<Date>,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub distance: Option<Kilometers>,
    pub remove_visible: bool,
    pub errors: Vec<(LegField, String)>,
    pub extras: Vec<PanelView>,
}

/// An extension panel attached below a row.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PanelView {
    pub title: String,
    pub visible: bool,
    pub toggle: ToggleView,
    pub status: PanelStatus,
    pub items: Vec<CheckItemView>,
    pub badge: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ToggleView {
    pub label: String,
    pub hint: String,
    pub checked: bool,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CheckItemView {
    pub key: u32,
    pub label: String,
    pub checked: bool,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelStatus {
    Collapsed,
    NeedsDestination,
    Loading,
    Ready,
}

impl PanelStatus {
    pub fn message(&self) -> Option<&'static str> {
        match self {
            PanelStatus::NeedsDestination => {
                Some("Select a destination city to see available tourist places")
            }
            PanelStatus::Loading => Some("Loading tourist places..."),
            PanelStatus::Collapsed | PanelStatus::Ready => None,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SummaryItem {
    pub day: usize,
    pub origin: String,
    pub destination: String,
    pub date: Option<Date>,
}

impl std::fmt::Display for SummaryItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Day {}: {} → {}", self.day, self.origin, self.destination)?;
        if let Some(date) = self.date {
            write!(f, " ({date})")?;
        }
        Ok(())
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SummarySection {
    pub title: String,
    pub lines: Vec<String>,
}

/// The success panel shown after a route validates.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SummaryView {
    pub heading: String,
    pub items: Vec<SummaryItem>,
    pub sections: Vec<SummarySection>,
    pub message: String,
}

pub const SUMMARY_HEADING: &str = "Validation Successful!";
pub const VALIDATION_SUCCESS: &str = "Route validation successful!";

/// Locations without a label are shown as this in the summary.
pub const UNKNOWN_LOCATION: &str = "Unknown";

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchAction {
    #[default]
    Search,
    Confirmed,
}

impl SearchAction {
    pub fn label(&self) -> &'static str {
        match self {
            SearchAction::Search => "Search Vehicles",
            SearchAction::Confirmed => "Validation Passed - Search Vehicles",
        }
    }
}

/// Formats a distance badge the way the panels show it.
pub fn distance_badge(distance: Kilometers) -> String {
    format!("{:.1} KM", distance.value())
}
