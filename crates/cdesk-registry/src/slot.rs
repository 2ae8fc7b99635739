//! # Requirement Slot
//!
//! A named compliance item (a certification, a background-check record)
//! that may or may not currently hold satisfying uploaded evidence.
//!
//! ## Invariant
//!
//! `has_upload() == (upload_count() > 0) == !files().is_empty()` — both
//! derived values are computed from the file list, never stored, so they
//! cannot drift. `last_updated_at` is set by any mutation that leaves the
//! slot with uploads and cleared when the count returns to zero.

use serde::{Deserialize, Serialize};

use cdesk_core::Timestamp;

/// One uploaded file associated with a requirement slot.
///
/// The issue date entered for the file at commit time is persisted here,
/// so reopening the slot for editing can seed it back instead of asking
/// the user to retype it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotFile {
    /// Display name of the uploaded file.
    pub name: String,
    /// Issue date as entered (`YYYY-MM-DD`), if one was provided.
    pub issue_date: Option<String>,
}

impl SlotFile {
    /// Create a slot file entry.
    pub fn new(name: impl Into<String>, issue_date: Option<String>) -> Self {
        Self {
            name: name.into(),
            issue_date,
        }
    }
}

/// A named requirement slot with its upload state.
///
/// Upload state is mutated only through the methods here; the association
/// workspace reaches them via the registry's mutation surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequirementSlot {
    /// Unique name within the slot's collection.
    pub name: String,
    /// Free-text status label, display only.
    pub status: String,
    files: Vec<SlotFile>,
    last_updated_at: Option<Timestamp>,
}

impl RequirementSlot {
    /// Create an empty slot.
    pub fn new(name: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: status.into(),
            files: Vec::new(),
            last_updated_at: None,
        }
    }

    /// The associated files, in upload order.
    pub fn files(&self) -> &[SlotFile] {
        &self.files
    }

    /// The associated file names, in upload order.
    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(|f| f.name.as_str())
    }

    /// Whether a file with this display name is associated.
    pub fn contains(&self, file_name: &str) -> bool {
        self.files.iter().any(|f| f.name == file_name)
    }

    /// Number of associated files.
    pub fn upload_count(&self) -> usize {
        self.files.len()
    }

    /// Whether the slot currently has satisfying uploads.
    pub fn has_upload(&self) -> bool {
        !self.files.is_empty()
    }

    /// When the slot's upload state last changed, if it has uploads.
    pub fn last_updated_at(&self) -> Option<Timestamp> {
        self.last_updated_at
    }

    /// Associate a file with the slot.
    ///
    /// Idempotent on the name: a duplicate of an already-associated name
    /// collapses into the existing entry, updating its issue date when a
    /// new one is provided. Returns `true` when the name was new.
    pub(crate) fn attach(
        &mut self,
        file_name: &str,
        issue_date: Option<String>,
        now: Timestamp,
    ) -> bool {
        let added = match self.files.iter_mut().find(|f| f.name == file_name) {
            Some(existing) => {
                if issue_date.is_some() {
                    existing.issue_date = issue_date;
                }
                false
            }
            None => {
                self.files.push(SlotFile::new(file_name, issue_date));
                true
            }
        };
        self.last_updated_at = Some(now);
        added
    }

    /// Remove a file from the slot by display name.
    ///
    /// Returns `true` when an entry was removed. Clears `last_updated_at`
    /// when the slot empties out.
    pub(crate) fn detach(&mut self, file_name: &str, now: Timestamp) -> bool {
        let before = self.files.len();
        self.files.retain(|f| f.name != file_name);
        let removed = self.files.len() != before;
        if removed {
            self.last_updated_at = if self.files.is_empty() {
                None
            } else {
                Some(now)
            };
        }
        removed
    }

    /// Replace the whole file set, collapsing duplicate names.
    ///
    /// Used by the preselected-slot save path, where the committed batch
    /// fully defines the slot's contents (omission deletes).
    pub(crate) fn replace_files(&mut self, files: Vec<SlotFile>, now: Timestamp) {
        self.files.clear();
        for file in files {
            match self.files.iter_mut().find(|f| f.name == file.name) {
                Some(existing) => {
                    if file.issue_date.is_some() {
                        existing.issue_date = file.issue_date;
                    }
                }
                None => self.files.push(file),
            }
        }
        self.last_updated_at = if self.files.is_empty() {
            None
        } else {
            Some(now)
        };
    }

    /// Clear all upload state from the slot.
    pub(crate) fn clear(&mut self) {
        self.files.clear();
        self.last_updated_at = None;
    }
}
