//! Tier-1 rights ledger.

use serde::{Deserialize, Serialize};

use crate::error::LedgerError;
use crate::types::RightsEntry;

/// Monotone rights ledger. Entries only ever strengthen protections;
/// an entry that would grant standing reversal rights never lands.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct RightsLedger {
    pub entries: Vec<RightsEntry>,
}

impl RightsLedger {
    pub fn append(&mut self, entry: RightsEntry) -> Result<(), LedgerError> {
        if entry.allow_neuromorph_reversal {
            return Err(LedgerError::RightsViolation(format!(
                "allow_neuromorph_reversal must remain false in the Tier-1 ledger (subject '{}')",
                entry.subject.label
            )));
        }
        tracing::debug!(subject = %entry.subject.label, "rights entry appended");
        self.entries.push(entry);
        Ok(())
    }

    pub fn entries_for<'a>(
        &'a self,
        subject_label: &'a str,
    ) -> impl Iterator<Item = &'a RightsEntry> + 'a {
        self.entries
            .iter()
            .filter(move |e| e.subject.label == subject_label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RightsEntry;

    #[test]
    fn monotone_entries_are_accepted() {
        let mut ledger = RightsLedger::default();
        ledger
            .append(RightsEntry::monotone_default("subject-7", "opt-in recorded"))
            .unwrap();
        assert_eq!(ledger.entries.len(), 1);
    }

    #[test]
    fn standing_reversal_grants_are_refused() {
        let mut entry = RightsEntry::monotone_default("subject-7", "attempted downgrade");
        entry.allow_neuromorph_reversal = true;

        let mut ledger = RightsLedger::default();
        let err = ledger.append(entry).unwrap_err();
        assert!(matches!(err, LedgerError::RightsViolation(_)));
        assert!(err.to_string().contains("subject-7"));
        assert!(ledger.entries.is_empty());
    }

    #[test]
    fn entries_for_filters_by_subject() {
        let mut ledger = RightsLedger::default();
        ledger
            .append(RightsEntry::monotone_default("subject-7", "a"))
            .unwrap();
        ledger
            .append(RightsEntry::monotone_default("subject-9", "b"))
            .unwrap();
        ledger
            .append(RightsEntry::monotone_default("subject-7", "c"))
            .unwrap();
        assert_eq!(ledger.entries_for("subject-7").count(), 2);
    }
}
