use std::sync::Arc;

use jiff::civil::Date;
use multicity_places::kilometers::Kilometers;

use crate::{
    itinerary::{
        leg::{Leg, LegId},
        location::Location,
        route_form::RouteForm,
        trip_totals::TripTotals,
    },
    presentation::{
        field_error_presenter::FieldErrorPresenter,
        notification::NotificationFacade,
        render::{PanelView, RowView, SearchAction, SummarySection, SummaryView},
    },
    validation::validation_outcome::ValidationOutcome,
};

use super::{edit_error::EditError, form_params::FormParams};

/// Operations of a multicity route form.
///
/// [`RouteFormController`](super::route_form_controller::RouteFormController) implements the
/// whole form. Extensions wrap another implementation, forward every call they do not care
/// about and add to the `*_extra` hooks. The composed views ([`rows`](Self::rows),
/// [`summary`](Self::summary), [`trip_totals`](Self::trip_totals)) are provided methods built
/// from the hooks, so a wrapper never has to re-render the base form.
pub trait RouteFormOps: Send {
    fn form(&self) -> &RouteForm;

    fn params(&self) -> &FormParams;

    fn params_mut(&mut self) -> &mut FormParams;

    /// Where this form sends anything the user has to see.
    fn notifications(&self) -> &Arc<dyn NotificationFacade>;

    fn field_errors(&self) -> &FieldErrorPresenter;

    fn search_action(&self) -> SearchAction;

    /// Appends a leg starting where the last one ends.
    fn add_leg(&mut self) -> Result<LegId, EditError>;

    fn remove_leg(&mut self, leg: LegId) -> Result<Leg, EditError>;

    fn set_pickup_city(&mut self, city: Option<Location>);

    /// Sets the date and checks it right away, like leaving the date field does.
    fn set_date(&mut self, leg: LegId, date: Option<Date>) -> Result<(), EditError>;

    fn set_origin(&mut self, leg: LegId, origin: Option<Location>) -> Result<(), EditError>;

    fn set_destination(
        &mut self,
        leg: LegId,
        destination: Option<Location>,
    ) -> Result<(), EditError>;

    fn set_distance(&mut self, leg: LegId, distance: Option<Kilometers>)
    -> Result<(), EditError>;

    /// Validates the whole form. A passing form shows its summary once the validation delay
    /// has elapsed; dropping the future before then leaves the summary hidden.
    fn validate_all(&mut self) -> impl Future<Output = ValidationOutcome> + Send;

    fn base_rows(&self) -> Vec<RowView>;

    fn render_row_extra(&self, _leg: LegId) -> Vec<PanelView> {
        Vec::new()
    }

    fn rows(&self) -> Vec<RowView> {
        let mut rows = self.base_rows();
        for row in rows.iter_mut() {
            row.extras.extend(self.render_row_extra(row.leg_id));
        }
        rows
    }

    /// The summary of the last passing validation, if it is still current.
    fn base_summary(&self) -> Option<SummaryView>;

    fn render_summary_extra(&self) -> Vec<SummarySection> {
        Vec::new()
    }

    fn summary(&self) -> Option<SummaryView> {
        let mut summary = self.base_summary()?;
        summary.sections.extend(self.render_summary_extra());
        Some(summary)
    }

    /// Distance travelled on top of the legs themselves.
    fn extra_distance(&self) -> Kilometers {
        Kilometers::ZERO
    }

    fn trip_totals(&self) -> TripTotals {
        TripTotals::compute(self.form().legs(), self.extra_distance())
    }
}
