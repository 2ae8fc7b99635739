//! # Standard Slot Catalog
//!
//! The default requirement catalog shown on a fresh compliance dashboard:
//! one background-check collection and one medical-document collection.

use crate::registry::RequirementRegistry;
use crate::slot::RequirementSlot;

/// Status label for a slot with no uploads yet.
const NO_STATUS: &str = "No Status";

/// Background-check requirements.
const BACKGROUND_CHECKS: &[&str] = &["Criminal Records Check", "Vulnerable Sector Check"];

/// Medical document requirements.
const MEDICAL_DOCUMENTS: &[&str] = &[
    "COVID-19",
    "Health Clearance Card",
    "Hepatitis B Antigen Serology - HBsAg (Test for Infection)",
    "Hepatitis B Primary Series",
    "Hepatitis B Second Series",
    "Hepatitis C",
    "Human Immunodeficiency Virus (HIV)",
    "Influenza",
    "Measles",
    "MMR Booster",
    "Mumps",
    "Polio",
    "Rabies Primary Series",
];

/// Build the standard requirement catalog with no uploads.
pub fn standard_catalog() -> RequirementRegistry {
    let mut registry = RequirementRegistry::new();
    registry.background_checks = BACKGROUND_CHECKS
        .iter()
        .map(|name| RequirementSlot::new(*name, NO_STATUS))
        .collect();
    registry.medical_documents = MEDICAL_DOCUMENTS
        .iter()
        .map(|name| RequirementSlot::new(*name, NO_STATUS))
        .collect();
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance::{compliance_status, ComplianceStatus};

    #[test]
    fn test_catalog_has_both_collections() {
        let reg = standard_catalog();
        assert_eq!(reg.background_checks.len(), 2);
        assert_eq!(reg.medical_documents.len(), 13);
        assert_eq!(reg.slot_count(), 15);
    }

    #[test]
    fn test_catalog_starts_empty() {
        let reg = standard_catalog();
        assert!(reg.all_slots().all(|s| !s.has_upload()));
        assert_eq!(compliance_status(&reg), ComplianceStatus::NoStatus);
    }

    #[test]
    fn test_catalog_names_are_unique() {
        let reg = standard_catalog();
        let mut names: Vec<&str> = reg.all_slots().map(|s| s.name.as_str()).collect();
        let before = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), before);
    }
}
