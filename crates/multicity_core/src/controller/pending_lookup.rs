use fxhash::FxHashMap;

use crate::itinerary::leg::LegId;

/// Identifies one lookup started for a leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LookupTicket {
    pub leg: LegId,
    generation: u64,
}

/// At most one lookup per leg counts. Starting another one for the same leg supersedes the
/// previous ticket.
#[derive(Debug, Default)]
pub struct PendingLookups {
    latest: FxHashMap<LegId, u64>,
    next_generation: u64,
}

impl PendingLookups {
    pub fn start(&mut self, leg: LegId) -> LookupTicket {
        let generation = self.next_generation;
        self.next_generation += 1;
        self.latest.insert(leg, generation);

        LookupTicket { leg, generation }
    }

    pub fn is_current(&self, ticket: &LookupTicket) -> bool {
        self.latest.get(&ticket.leg) == Some(&ticket.generation)
    }

    pub fn is_pending(&self, leg: LegId) -> bool {
        self.latest.contains_key(&leg)
    }

    /// Settles `ticket` if it is still the latest for its leg. Returns whether it was.
    pub fn finish(&mut self, ticket: &LookupTicket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.latest.remove(&ticket.leg);
        true
    }

    pub fn cancel(&mut self, leg: LegId) {
        self.latest.remove(&leg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newer_ticket_supersedes() {
        let mut pending = PendingLookups::default();
        let leg = LegId::new(0);

        let first = pending.start(leg);
        let second = pending.start(leg);

        assert!(!pending.is_current(&first));
        assert!(!pending.finish(&first));
        assert!(pending.is_pending(leg));
        assert!(pending.finish(&second));
        assert!(!pending.is_pending(leg));
    }

    #[test]
    fn test_tickets_are_per_leg() {
        let mut pending = PendingLookups::default();

        let first = pending.start(LegId::new(0));
        let other = pending.start(LegId::new(1));
        pending.cancel(LegId::new(1));

        assert!(pending.is_current(&first));
        assert!(!pending.is_current(&other));
    }
}
