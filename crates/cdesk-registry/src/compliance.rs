//! # Compliance Aggregator
//!
//! Derives the overall compliance signal from the requirement registry.
//! Pure functions of the registry, recomputed on demand; nothing here is
//! stored, so the signal can never go stale.

use serde::{Deserialize, Serialize};

use crate::registry::RequirementRegistry;

/// The aggregate compliance signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComplianceStatus {
    /// No requirement slot has satisfying uploads yet.
    NoStatus,
    /// Every requirement slot has satisfying uploads.
    Pass,
    /// Some, but not all, requirement slots have satisfying uploads.
    Fail,
}

impl ComplianceStatus {
    /// Whether the signal is a full pass.
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }
}

impl std::fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::NoStatus => "NO_STATUS",
            Self::Pass => "PASS",
            Self::Fail => "FAIL",
        };
        f.write_str(s)
    }
}

/// Completion progress across all requirement slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceProgress {
    /// Slots with satisfying uploads.
    pub completed: usize,
    /// Total slots across both collections.
    pub total: usize,
    /// `round(100 * completed / total)`; 0 when there are no slots.
    pub percentage: u32,
}

/// Count the slots with satisfying uploads.
fn satisfied(registry: &RequirementRegistry) -> usize {
    registry.all_slots().filter(|s| s.has_upload()).count()
}

/// The aggregate compliance status over both collections.
pub fn compliance_status(registry: &RequirementRegistry) -> ComplianceStatus {
    let total = registry.slot_count();
    let satisfied = satisfied(registry);
    if satisfied == 0 {
        ComplianceStatus::NoStatus
    } else if satisfied == total {
        ComplianceStatus::Pass
    } else {
        ComplianceStatus::Fail
    }
}

/// Completion progress over both collections.
pub fn progress(registry: &RequirementRegistry) -> ComplianceProgress {
    let total = registry.slot_count();
    let completed = satisfied(registry);
    let percentage = if total == 0 {
        0
    } else {
        (100.0 * completed as f64 / total as f64).round() as u32
    };
    ComplianceProgress {
        completed,
        total,
        percentage,
    }
}

/// Whether the gated "book a review" action is available.
pub fn can_book(registry: &RequirementRegistry) -> bool {
    compliance_status(registry).is_pass()
}
