//! # Requirement Registry
//!
//! The injectable store holding both slot collections. Lives at the
//! application root and is handed to the association workspace by
//! mutable reference for the three commit-style operations; all other
//! access is read-only.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use cdesk_core::Timestamp;

use crate::slot::{RequirementSlot, SlotFile};

/// Errors from registry lookups and mutations.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// No slot with this name exists in either collection.
    #[error("unknown requirement slot: {name:?}")]
    UnknownSlot {
        /// The name that failed to resolve.
        name: String,
    },
}

/// The registry of requirement slots, in two independent collections.
///
/// Slot names are unique within their collection; lookups search
/// background checks first, then medical documents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequirementRegistry {
    /// Background-check requirements (criminal records, vulnerable sector).
    pub background_checks: Vec<RequirementSlot>,
    /// Medical document requirements (vaccinations, serologies, clearances).
    pub medical_documents: Vec<RequirementSlot>,
}

impl RequirementRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// All slots across both collections, background checks first.
    pub fn all_slots(&self) -> impl Iterator<Item = &RequirementSlot> {
        self.background_checks
            .iter()
            .chain(self.medical_documents.iter())
    }

    /// Total number of slots across both collections.
    pub fn slot_count(&self) -> usize {
        self.background_checks.len() + self.medical_documents.len()
    }

    /// Look up a slot by name in either collection.
    pub fn slot(&self, name: &str) -> Option<&RequirementSlot> {
        self.all_slots().find(|s| s.name == name)
    }

    /// Whether a slot with this name exists in either collection.
    pub fn contains_slot(&self, name: &str) -> bool {
        self.slot(name).is_some()
    }

    // ─── Mutation surface ────────────────────────────────────────────
    //
    // Reached only from the association workspace's save, remove-all,
    // and confirm-delete operations.

    /// Associate a file with the named slot (idempotent on the name).
    pub fn attach_file(
        &mut self,
        slot_name: &str,
        file_name: &str,
        issue_date: Option<String>,
        now: Timestamp,
    ) -> Result<bool, RegistryError> {
        let slot = self.slot_mut(slot_name)?;
        let added = slot.attach(file_name, issue_date, now);
        debug!(slot = slot_name, file = file_name, added, "attached file");
        Ok(added)
    }

    /// Remove a file from the named slot by display name.
    ///
    /// Returns `true` when an entry was removed.
    pub fn detach_file(
        &mut self,
        slot_name: &str,
        file_name: &str,
        now: Timestamp,
    ) -> Result<bool, RegistryError> {
        let slot = self.slot_mut(slot_name)?;
        let removed = slot.detach(file_name, now);
        debug!(slot = slot_name, file = file_name, removed, "detached file");
        Ok(removed)
    }

    /// Replace the named slot's whole file set.
    pub fn replace_slot_files(
        &mut self,
        slot_name: &str,
        files: Vec<SlotFile>,
        now: Timestamp,
    ) -> Result<(), RegistryError> {
        let slot = self.slot_mut(slot_name)?;
        slot.replace_files(files, now);
        debug!(slot = slot_name, count = slot.upload_count(), "replaced slot files");
        Ok(())
    }

    /// Clear all upload state from the named slot.
    pub fn clear_slot(&mut self, slot_name: &str) -> Result<(), RegistryError> {
        let slot = self.slot_mut(slot_name)?;
        slot.clear();
        debug!(slot = slot_name, "cleared slot");
        Ok(())
    }

    fn slot_mut(&mut self, name: &str) -> Result<&mut RequirementSlot, RegistryError> {
        self.background_checks
            .iter_mut()
            .chain(self.medical_documents.iter_mut())
            .find(|s| s.name == name)
            .ok_or_else(|| RegistryError::UnknownSlot {
                name: name.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> Timestamp {
        Timestamp::parse("2026-06-02T12:00:00Z").unwrap()
    }

    fn make_registry() -> RequirementRegistry {
        let mut reg = RequirementRegistry::new();
        reg.background_checks
            .push(RequirementSlot::new("Criminal Records Check", "No Status"));
        reg.medical_documents
            .push(RequirementSlot::new("COVID-19", "No Status"));
        reg.medical_documents
            .push(RequirementSlot::new("Influenza", "No Status"));
        reg
    }

    #[test]
    fn test_lookup_searches_both_collections() {
        let reg = make_registry();
        assert!(reg.slot("Criminal Records Check").is_some());
        assert!(reg.slot("Influenza").is_some());
        assert!(reg.slot("Polio").is_none());
    }

    #[test]
    fn test_slot_count_spans_collections() {
        let reg = make_registry();
        assert_eq!(reg.slot_count(), 3);
        assert_eq!(reg.all_slots().count(), 3);
    }

    #[test]
    fn test_attach_unknown_slot_is_error() {
        let mut reg = make_registry();
        let result = reg.attach_file("Polio", "scan.pdf", None, now());
        assert!(matches!(result, Err(RegistryError::UnknownSlot { .. })));
    }

    #[test]
    fn test_attach_and_detach_through_registry() {
        let mut reg = make_registry();
        assert!(reg.attach_file("COVID-19", "scan.pdf", None, now()).unwrap());
        assert!(reg.slot("COVID-19").unwrap().has_upload());

        assert!(reg.detach_file("COVID-19", "scan.pdf", now()).unwrap());
        let slot = reg.slot("COVID-19").unwrap();
        assert!(!slot.has_upload());
        assert_eq!(slot.upload_count(), 0);
        assert!(slot.last_updated_at().is_none());
    }

    #[test]
    fn test_clear_slot() {
        let mut reg = make_registry();
        reg.attach_file("COVID-19", "scan.pdf", None, now()).unwrap();
        reg.clear_slot("COVID-19").unwrap();
        assert!(!reg.slot("COVID-19").unwrap().has_upload());
    }

    #[test]
    fn test_registry_serde_roundtrip() {
        let mut reg = make_registry();
        reg.attach_file("COVID-19", "scan.pdf", Some("2025-06-02".to_string()), now())
            .unwrap();
        let json = serde_json::to_string(&reg).unwrap();
        let parsed: RequirementRegistry = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.slot_count(), reg.slot_count());
        assert!(parsed.slot("COVID-19").unwrap().contains("scan.pdf"));
    }
}
