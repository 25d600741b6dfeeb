use std::sync::Arc;

use jiff::civil::Date;
use multicity_places::kilometers::Kilometers;
use tracing::{debug, info, instrument, warn};

use crate::{
    itinerary::{
        leg::{Leg, LegField, LegId},
        location::Location,
        route_form::RouteForm,
    },
    presentation::{
        field_error_presenter::{FieldErrorPresenter, Scope},
        notification::{Notice, NotificationFacade, NotificationKind},
        render::{
            RowView, SUMMARY_HEADING, SearchAction, SummaryItem, SummaryView, UNKNOWN_LOCATION,
            VALIDATION_SUCCESS,
        },
    },
    validation::{
        field_id::FieldId, row_validator::RowValidator, sequence_validator,
        validation_error::ValidationError, validation_outcome::ValidationOutcome,
    },
};

use super::{edit_error::EditError, form_params::FormParams, route_form_ops::RouteFormOps};

/// Inline container the success banner is shown in.
pub const RESULTS_TARGET: &str = "validationResults";

pub const VALIDATION_FAILED_TITLE: &str = "Route Validation Failed";

pub struct RouteFormController {
    form: RouteForm,
    params: FormParams,
    notifications: Arc<dyn NotificationFacade>,
    field_errors: FieldErrorPresenter,
    summary: Option<Vec<SummaryItem>>,
    search_action: SearchAction,
}

impl RouteFormController {
    pub fn new(params: FormParams, notifications: Arc<dyn NotificationFacade>) -> Self {
        Self::with_form(RouteForm::new(), params, notifications)
    }

    pub fn with_form(
        form: RouteForm,
        params: FormParams,
        notifications: Arc<dyn NotificationFacade>,
    ) -> Self {
        Self {
            form,
            params,
            notifications,
            field_errors: FieldErrorPresenter::default(),
            summary: None,
            search_action: SearchAction::default(),
        }
    }

    /// Runs every rule without touching annotations or notifications.
    pub fn check(&self) -> ValidationOutcome {
        if self.form.pickup_city().is_none() {
            return ValidationOutcome::precondition_failed(ValidationError::PickupCityRequired);
        }

        let validator = RowValidator::new(self.params.today());
        let row_errors = self
            .form
            .legs()
            .iter()
            .enumerate()
            .flat_map(|(row, leg)| validator.validate(row, leg))
            .collect();
        let sequence_errors =
            sequence_validator::validate(self.form.legs(), self.params.sequence_options());

        ValidationOutcome::new(row_errors, sequence_errors)
    }

    fn reject(&self, error: EditError) -> EditError {
        warn!("{}", error);
        self.notifications
            .notify(Notice::new(error.to_string(), NotificationKind::Warning));
        error
    }

    /// Hides the summary of an earlier validation once the form changes.
    fn clear_results(&mut self) {
        if self.summary.take().is_some() {
            debug!("Validation results cleared");
        }
        self.search_action = SearchAction::Search;
    }

    fn edit_leg(
        &mut self,
        leg: LegId,
        field: LegField,
        edit: impl FnOnce(&mut Leg),
    ) -> Result<(), EditError> {
        let target = self.form.leg_mut(leg).ok_or(EditError::UnknownLeg(leg))?;
        edit(target);
        self.field_errors.clear(FieldId::leg(leg, field));
        self.clear_results();
        Ok(())
    }

    fn summary_items(&self) -> Vec<SummaryItem> {
        let label = |location: Option<&Location>| {
            location
                .map(|l| l.name().to_owned())
                .unwrap_or_else(|| String::from(UNKNOWN_LOCATION))
        };

        self.form
            .legs()
            .iter()
            .enumerate()
            .map(|(index, leg)| SummaryItem {
                day: index + 1,
                origin: label(leg.origin()),
                destination: label(leg.destination()),
                date: leg.date(),
            })
            .collect()
    }
}

impl RouteFormOps for RouteFormController {
    fn form(&self) -> &RouteForm {
        &self.form
    }

    fn params(&self) -> &FormParams {
        &self.params
    }

    fn params_mut(&mut self) -> &mut FormParams {
        &mut self.params
    }

    fn notifications(&self) -> &Arc<dyn NotificationFacade> {
        &self.notifications
    }

    fn field_errors(&self) -> &FieldErrorPresenter {
        &self.field_errors
    }

    fn search_action(&self) -> SearchAction {
        self.search_action
    }

    fn add_leg(&mut self) -> Result<LegId, EditError> {
        if self.form.len() >= self.params.max_rows {
            return Err(self.reject(EditError::MaxRowsReached {
                max_rows: self.params.max_rows,
            }));
        }

        let Some(origin) = self.form.last().and_then(|leg| leg.destination()).cloned() else {
            return Err(self.reject(EditError::IncompleteCurrentRow));
        };

        let id = self.form.push_leg(Some(origin));
        self.clear_results();
        debug!("Added leg {} as day {}", id, self.form.len());

        Ok(id)
    }

    fn remove_leg(&mut self, leg: LegId) -> Result<Leg, EditError> {
        if self.form.len() <= 1 {
            return Err(self.reject(EditError::MinRowsRequired));
        }

        let removed = self
            .form
            .remove_leg(leg)
            .ok_or_else(|| self.reject(EditError::UnknownLeg(leg)))?;

        self.field_errors.clear_all(Scope::Leg(leg));
        self.clear_results();
        debug!("Removed leg {}, {} left", leg, self.form.len());

        Ok(removed)
    }

    fn set_pickup_city(&mut self, city: Option<Location>) {
        self.form.set_pickup_city(city);
        self.field_errors.clear(FieldId::PickupCity);
        self.clear_results();
    }

    fn set_date(&mut self, leg: LegId, date: Option<Date>) -> Result<(), EditError> {
        self.edit_leg(leg, LegField::Date, |target| target.set_date(date))?;

        let validator = RowValidator::new(self.params.today());
        let (Some(row), Some(target)) = (self.form.position(leg), self.form.leg(leg)) else {
            return Ok(());
        };

        if let Some(error) = validator.validate_date(row, target) {
            self.field_errors.show(error.field(), error.to_string());
        }

        Ok(())
    }

    fn set_origin(&mut self, leg: LegId, origin: Option<Location>) -> Result<(), EditError> {
        self.edit_leg(leg, LegField::Origin, |target| target.set_origin(origin))
    }

    fn set_destination(
        &mut self,
        leg: LegId,
        destination: Option<Location>,
    ) -> Result<(), EditError> {
        self.edit_leg(leg, LegField::Destination, |target| {
            target.set_destination(destination)
        })
    }

    fn set_distance(
        &mut self,
        leg: LegId,
        distance: Option<Kilometers>,
    ) -> Result<(), EditError> {
        self.edit_leg(leg, LegField::Distance, |target| target.set_distance(distance))
    }

    #[instrument(skip_all, level = "debug")]
    async fn validate_all(&mut self) -> ValidationOutcome {
        self.field_errors.clear_all(Scope::Form);
        self.clear_results();

        let outcome = self.check();

        if let Some(error) = outcome.precondition() {
            warn!("{}", error);
            self.field_errors.show(error.field(), error.to_string());
            self.notifications
                .notify(Notice::new(error.to_string(), NotificationKind::Warning));
            return outcome;
        }

        if !outcome.is_valid() {
            for (field, message) in outcome.field_errors() {
                self.field_errors.show(*field, message.clone());
            }

            info!(
                errors = outcome.error_count(),
                "Route validation failed"
            );
            self.notifications.notify(
                Notice::new(outcome.report(), NotificationKind::Error)
                    .with_title(VALIDATION_FAILED_TITLE),
            );
            return outcome;
        }

        debug!("Route is valid, waiting {}", self.params.validation_delay);
        tokio::time::sleep(self.params.validation_delay.unsigned_abs()).await;

        self.summary = Some(self.summary_items());
        self.search_action = SearchAction::Confirmed;
        info!(legs = self.form.len(), "Route validated");

        self.notifications
            .notify_inline(VALIDATION_SUCCESS, NotificationKind::Success, RESULTS_TARGET);

        outcome
    }

    fn base_rows(&self) -> Vec<RowView> {
        let remove_visible = self.form.len() > 1;

        self.form
            .legs()
            .iter()
            .enumerate()
            .map(|(index, leg)| RowView {
                leg_id: leg.id(),
                day: index + 1,
                date: leg.date(),
                origin: leg.origin().map(|l| l.name().to_owned()),
                destination: leg.destination().map(|l| l.name().to_owned()),
                distance: leg.distance(),
                remove_visible,
                errors: self
                    .field_errors
                    .for_leg(leg.id())
                    .map(|(field, message)| (field, message.to_owned()))
                    .collect(),
                extras: Vec::new(),
            })
            .collect()
    }

    fn base_summary(&self) -> Option<SummaryView> {
        let items = self.summary.clone()?;

        Some(SummaryView {
            heading: String::from(SUMMARY_HEADING),
            items,
            sections: Vec::new(),
            message: String::from(VALIDATION_SUCCESS),
        })
    }
}
