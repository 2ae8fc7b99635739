//! # cdesk-registry — Requirement Slots and Compliance Status
//!
//! The shared side of Compliance Desk: the registry of named requirement
//! slots (two independent collections, background checks and medical
//! documents) and the compliance signal derived from them.
//!
//! ## Design
//!
//! - **Closed mutation surface.** Slot upload state changes only through
//!   [`RequirementRegistry::attach_file`], [`detach_file`],
//!   [`replace_slot_files`], and [`clear_slot`]
//!   (`RequirementRegistry::detach_file` etc.) — the operations the
//!   association workspace commits through. Everything else is a read.
//!
//! - **No cached derived values.** `has_upload` and `upload_count` are
//!   computed from the file list on demand, so the invariant
//!   `has_upload == (upload_count > 0) == files non-empty` holds by
//!   construction. The same goes for [`compliance_status`],
//!   [`progress`], and [`can_book`].
//!
//! [`detach_file`]: RequirementRegistry::detach_file
//! [`replace_slot_files`]: RequirementRegistry::replace_slot_files
//! [`clear_slot`]: RequirementRegistry::clear_slot

pub mod catalog;
pub mod compliance;
pub mod registry;
pub mod slot;

pub use catalog::standard_catalog;
pub use compliance::{can_book, compliance_status, progress, ComplianceProgress, ComplianceStatus};
pub use registry::{RegistryError, RequirementRegistry};
pub use slot::{RequirementSlot, SlotFile};
