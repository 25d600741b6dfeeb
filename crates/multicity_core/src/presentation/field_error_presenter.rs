use std::collections::BTreeMap;

use crate::{
    itinerary::leg::{LegField, LegId},
    validation::field_id::FieldId,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Form,
    Leg(LegId),
}

/// The error annotations currently shown next to form fields. A field shows at most one.
#[derive(Debug, Default, Clone)]
pub struct FieldErrorPresenter {
    annotations: BTreeMap<FieldId, String>,
}

impl FieldErrorPresenter {
    /// Shows `message` on `field`, replacing whatever was there.
    pub fn show(&mut self, field: FieldId, message: impl Into<String>) {
        self.annotations.insert(field, message.into());
    }

    pub fn clear(&mut self, field: FieldId) -> Option<String> {
        self.annotations.remove(&field)
    }

    pub fn clear_all(&mut self, scope: Scope) {
        match scope {
            Scope::Form => self.annotations.clear(),
            Scope::Leg(leg) => self
                .annotations
                .retain(|field, _| field.leg_id() != Some(leg)),
        }
    }

    pub fn get(&self, field: FieldId) -> Option<&str> {
        self.annotations.get(&field).map(String::as_str)
    }

    pub fn for_leg(&self, leg: LegId) -> impl Iterator<Item = (LegField, &str)> {
        self.annotations
            .iter()
            .filter_map(move |(field, message)| match field {
                FieldId::Leg { leg: l, field: f } if *l == leg => Some((*f, message.as_str())),
                _ => None,
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldId, &String)> {
        self.annotations.iter()
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_replaces_previous_annotation() {
        let mut presenter = FieldErrorPresenter::default();
        let field = FieldId::leg(LegId::new(0), LegField::Date);

        presenter.show(field, "Please select a date");
        presenter.show(field, "Date cannot be in the past");

        assert_eq!(presenter.len(), 1);
        assert_eq!(presenter.get(field), Some("Date cannot be in the past"));
    }

    #[test]
    fn test_clear_all_by_scope() {
        let mut presenter = FieldErrorPresenter::default();
        let first = LegId::new(0);
        let second = LegId::new(1);
        presenter.show(FieldId::PickupCity, "Please select a pickup city first.");
        presenter.show(FieldId::leg(first, LegField::Origin), "From location is required");
        presenter.show(FieldId::leg(second, LegField::Date), "Please select a date");
        presenter.show(FieldId::leg(second, LegField::Origin), "From location is required");

        presenter.clear_all(Scope::Leg(second));

        assert_eq!(presenter.len(), 2);
        assert_eq!(presenter.for_leg(second).count(), 0);
        assert_eq!(
            presenter.for_leg(first).collect::<Vec<_>>(),
            vec![(LegField::Origin, "From location is required")]
        );

        presenter.clear_all(Scope::Form);
        assert!(presenter.is_empty());
    }
}
