//! In-memory deed ledger.

use crate::error::LedgerError;
use crate::types::DeedEvent;

/// Append-only sequence of sealed deeds.
///
/// Appending seals unsealed events and verifies sealed ones, so every
/// stored event carries a hash consistent with its content.
#[derive(Debug, Default, Clone)]
pub struct DeedLedger {
    events: Vec<DeedEvent>,
}

impl DeedLedger {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Rebuild a ledger from already sealed events, verifying each one.
    pub fn from_events(events: Vec<DeedEvent>) -> Result<Self, LedgerError> {
        let mut ledger = Self::new();
        for event in events {
            ledger.append(event)?;
        }
        Ok(ledger)
    }

    pub fn append(&mut self, event: DeedEvent) -> Result<(), LedgerError> {
        let event = match event.content_hash {
            Some(_) => {
                event.verify_hash()?;
                event
            }
            None => event.seal()?,
        };
        tracing::debug!(deed = %event.id, actor = %event.actor, "deed appended");
        self.events.push(event);
        Ok(())
    }

    pub fn all(&self) -> &[DeedEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Net MP-token balance across all deeds.
    pub fn total_mp(&self) -> f64 {
        self.events.iter().map(|e| e.mp_delta).sum()
    }

    /// Deeds recorded under `actor`, in append order.
    pub fn by_actor<'a>(&'a self, actor: &'a str) -> impl Iterator<Item = &'a DeedEvent> + 'a {
        self.events.iter().filter(move |e| e.actor == actor)
    }

    /// Re-verify every stored deed and return how many passed.
    pub fn verify(&self) -> Result<usize, LedgerError> {
        for event in &self.events {
            event.verify_hash()?;
        }
        Ok(self.events.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_seals_unsealed_events() {
        let mut ledger = DeedLedger::new();
        ledger
            .append(DeedEvent::new("attendant", "session opened"))
            .unwrap();
        assert_eq!(ledger.len(), 1);
        assert!(ledger.all()[0].content_hash.is_some());
        assert_eq!(ledger.verify().unwrap(), 1);
    }

    #[test]
    fn append_rejects_tampered_events() {
        let mut sealed = DeedEvent::new("attendant", "original wording")
            .seal()
            .unwrap();
        sealed.mp_delta = 99.0;

        let mut ledger = DeedLedger::new();
        assert!(matches!(
            ledger.append(sealed),
            Err(LedgerError::Tampered { .. })
        ));
        assert!(ledger.is_empty());
    }

    #[test]
    fn total_mp_sums_deltas() {
        let mut ledger = DeedLedger::new();
        ledger
            .append(DeedEvent::new("gate", "denied petition").with_mp_delta(0.6))
            .unwrap();
        ledger
            .append(DeedEvent::new("gate", "denied petition").with_mp_delta(1.0))
            .unwrap();
        ledger
            .append(DeedEvent::new("steward", "debt settled").with_mp_delta(-0.5))
            .unwrap();
        assert!((ledger.total_mp() - 1.1).abs() < 1e-9);
    }

    #[test]
    fn by_actor_filters_in_append_order() {
        let mut ledger = DeedLedger::new();
        ledger.append(DeedEvent::new("gate", "first")).unwrap();
        ledger.append(DeedEvent::new("steward", "second")).unwrap();
        ledger.append(DeedEvent::new("gate", "third")).unwrap();

        let descriptions: Vec<&str> = ledger
            .by_actor("gate")
            .map(|d| d.description.as_str())
            .collect();
        assert_eq!(descriptions, ["first", "third"]);
    }

    #[test]
    fn from_events_verifies_the_whole_batch() {
        let good = DeedEvent::new("a", "one").seal().unwrap();
        let mut bad = DeedEvent::new("b", "two").seal().unwrap();
        bad.actor = "c".to_string();

        assert!(DeedLedger::from_events(vec![good.clone()]).is_ok());
        assert!(DeedLedger::from_events(vec![good, bad]).is_err());
    }
}
