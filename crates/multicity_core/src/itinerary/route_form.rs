use super::{
    leg::{Leg, LegBuilder, LegId},
    location::Location,
};

/// The ordered legs of a multicity trip and the pickup city they start from.
///
/// A form always holds at least one leg. Upper bounds are enforced by the controller, which
/// owns the form's configuration.
#[derive(Debug, Clone)]
pub struct RouteForm {
    pickup_city: Option<Location>,
    legs: Vec<Leg>,
    next_leg_id: u64,
}

impl Default for RouteForm {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteForm {
    pub fn new() -> Self {
        Self {
            pickup_city: None,
            legs: vec![Leg::new(LegId::new(0))],
            next_leg_id: 1,
        }
    }

    /// Builds a form from prepared legs. Leg ids are reassigned in order so they are unique
    /// within the form.
    pub fn from_legs(pickup_city: Option<Location>, legs: Vec<LegBuilder>) -> Self {
        let mut form = Self {
            pickup_city,
            legs: Vec::with_capacity(legs.len().max(1)),
            next_leg_id: 0,
        };

        for mut builder in legs {
            let id = form.allocate_id();
            builder.set_id(id);
            form.legs.push(builder.build());
        }

        if form.legs.is_empty() {
            let id = form.allocate_id();
            form.legs.push(Leg::new(id));
        }

        form
    }

    fn allocate_id(&mut self) -> LegId {
        let id = LegId::new(self.next_leg_id);
        self.next_leg_id += 1;
        id
    }

    pub fn pickup_city(&self) -> Option<&Location> {
        self.pickup_city.as_ref()
    }

    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    pub fn len(&self) -> usize {
        self.legs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.legs.is_empty()
    }

    pub fn leg(&self, id: LegId) -> Option<&Leg> {
        self.legs.iter().find(|leg| leg.id() == id)
    }

    pub fn position(&self, id: LegId) -> Option<usize> {
        self.legs.iter().position(|leg| leg.id() == id)
    }

    pub fn last(&self) -> Option<&Leg> {
        self.legs.last()
    }

    pub fn leg_ids(&self) -> impl Iterator<Item = LegId> + '_ {
        self.legs.iter().map(|leg| leg.id())
    }

    pub(crate) fn leg_mut(&mut self, id: LegId) -> Option<&mut Leg> {
        self.legs.iter_mut().find(|leg| leg.id() == id)
    }

    pub(crate) fn set_pickup_city(&mut self, city: Option<Location>) {
        self.pickup_city = city;
    }

    /// Appends an empty leg starting at `origin`.
    pub(crate) fn push_leg(&mut self, origin: Option<Location>) -> LegId {
        let id = self.allocate_id();
        let mut leg = Leg::new(id);
        leg.set_origin(origin);
        self.legs.push(leg);
        id
    }

    pub(crate) fn remove_leg(&mut self, id: LegId) -> Option<Leg> {
        let position = self.position(id)?;
        Some(self.legs.remove(position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_form_has_one_empty_leg() {
        let form = RouteForm::new();

        assert_eq!(form.len(), 1);
        assert!(form.pickup_city().is_none());
        assert!(form.legs()[0].origin().is_none());
    }

    #[test]
    fn test_ids_are_stable_after_removal() {
        let mut form = RouteForm::new();
        let second = form.push_leg(Some(Location::city(1, "Delhi")));
        let third = form.push_leg(None);

        form.remove_leg(second);

        assert_eq!(form.len(), 2);
        assert_eq!(form.position(third), Some(1));
        assert!(form.leg(second).is_none());

        let fourth = form.push_leg(None);
        assert_ne!(fourth, second);
        assert_ne!(fourth, third);
    }

    #[test]
    fn test_from_legs_never_empty() {
        let form = RouteForm::from_legs(None, vec![]);
        assert_eq!(form.len(), 1);
    }
}
