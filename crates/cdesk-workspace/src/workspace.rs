//! # Association Workspace State Machine
//!
//! Owns the in-progress batch of uploaded-file records, the cursor over
//! them, the per-file associations and metadata, and the dirty and
//! validation flags. All registry mutation in the system happens inside
//! three operations here: `save`, `remove_all`, and `confirm_delete`.
//!
//! ## Phases
//!
//! ```text
//! Closed ──▶ OpenEditing ──▶ ClosingConfirm ──▶ Closed (discard)
//!                │    ▲            │
//!                │    └────────────┘ (cancel)
//!                │
//!                └──▶ DeleteConfirm ──▶ OpenEditing (confirm or cancel)
//! ```
//!
//! `save` and `remove_all` jump straight from `OpenEditing` to `Closed`.
//!
//! ## Error Policy
//!
//! A failed save is user-correctable: it returns `BatchIncomplete`, sets
//! the sticky validation flag, and changes nothing else. Wrong-phase
//! calls are programmer errors and come back as `InvalidPhase`. Read
//! paths never panic; the cursor is clamped defensively.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use cdesk_core::{FileId, Timestamp};
use cdesk_registry::{RegistryError, RequirementRegistry, SlotFile};

use crate::notice::{Notice, NoticeBoard};
use crate::record::UploadedFileRecord;
use crate::validate::{is_batch_valid, is_file_valid};

// ─── Phase ───────────────────────────────────────────────────────────

/// The workspace phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkspacePhase {
    /// No batch in progress.
    #[default]
    Closed,
    /// A batch is open for editing.
    OpenEditing,
    /// The unsaved-changes prompt is showing.
    ClosingConfirm,
    /// A per-file delete confirmation is showing.
    DeleteConfirm(FileId),
}

impl std::fmt::Display for WorkspacePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Closed => "CLOSED",
            Self::OpenEditing => "OPEN_EDITING",
            Self::ClosingConfirm => "CLOSING_CONFIRM",
            Self::DeleteConfirm(_) => "DELETE_CONFIRM",
        };
        f.write_str(s)
    }
}

// ─── Errors ──────────────────────────────────────────────────────────

/// Errors from workspace operations.
#[derive(Error, Debug)]
pub enum WorkspaceError {
    /// The operation is not available in the current phase.
    #[error("cannot {action} while workspace is {phase}")]
    InvalidPhase {
        /// What was attempted.
        action: &'static str,
        /// The phase it was attempted in.
        phase: String,
    },

    /// Intake commit with nothing selected.
    #[error("no files selected for upload")]
    EmptySelection,

    /// Save attempted while at least one file is incomplete.
    #[error("batch has incomplete files and cannot be saved")]
    BatchIncomplete,

    /// An edit or navigation call with no file under the cursor.
    #[error("workspace has no files")]
    NoCurrentFile,

    /// The first association entry can never be removed.
    #[error("the primary association entry cannot be removed")]
    PrimaryAssociation,

    /// An index was out of range.
    #[error("index {index} out of range (len {len})")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// The length it was checked against.
        len: usize,
    },

    /// No record with this id exists in the batch.
    #[error("no uploaded file with id {id}")]
    UnknownFile {
        /// The id that failed to resolve.
        id: FileId,
    },

    /// Remove-all outside a slot-scoped workspace.
    #[error("remove-all requires a workspace opened for a specific slot")]
    NoPreselectedSlot,

    /// A registry lookup failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

// ─── Save summary ────────────────────────────────────────────────────

/// Outcome of a successful save, for the transient notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveSummary {
    /// Files whose name was new to at least one targeted slot.
    pub added: usize,
    /// Files already present in every slot they target.
    pub updated: usize,
}

impl SaveSummary {
    /// Human-readable notice text.
    pub fn message(&self) -> String {
        format!(
            "{} file{} added, {} file{} updated",
            self.added,
            if self.added == 1 { "" } else { "s" },
            self.updated,
            if self.updated == 1 { "" } else { "s" },
        )
    }
}

// ─── Workspace ───────────────────────────────────────────────────────

/// The association workspace.
///
/// Exclusively owns its uploaded-file records; the requirement registry
/// is borrowed only for the three commit-style operations. Discarding
/// the workspace destroys all records with no registry side effects.
#[derive(Debug, Clone, Default)]
pub struct AssociationWorkspace {
    phase: WorkspacePhase,
    files: Vec<UploadedFileRecord>,
    cursor: usize,
    preselected_slot: Option<String>,
    dirty: bool,
    show_validation_errors: bool,
    notices: NoticeBoard,
}

impl AssociationWorkspace {
    /// Create a closed workspace.
    pub fn new() -> Self {
        Self::default()
    }

    // ─── Read surface ────────────────────────────────────────────────

    /// The current phase.
    pub fn phase(&self) -> &WorkspacePhase {
        &self.phase
    }

    /// The batch, in upload order.
    pub fn files(&self) -> &[UploadedFileRecord] {
        &self.files
    }

    /// The cursor index. Meaningful only while files are present.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The file under the cursor, clamped defensively.
    pub fn current_file(&self) -> Option<&UploadedFileRecord> {
        debug_assert!(self.files.is_empty() || self.cursor < self.files.len());
        if self.files.is_empty() {
            None
        } else {
            self.files.get(self.cursor.min(self.files.len() - 1))
        }
    }

    /// The slot this workspace was opened for, if any.
    pub fn preselected_slot(&self) -> Option<&str> {
        self.preselected_slot.as_deref()
    }

    /// Whether any edit happened since the last open or save.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// The sticky submit-attempted flag.
    pub fn show_validation_errors(&self) -> bool {
        self.show_validation_errors
    }

    /// The live transient notice, if any.
    pub fn notice(&self) -> Option<&Notice> {
        self.notices.visible()
    }

    /// Dismiss the live notice early.
    pub fn dismiss_notice(&mut self) {
        self.notices.dismiss();
    }

    /// Expire the live notice once its delay has elapsed.
    pub fn tick(&mut self, now: Timestamp) {
        self.notices.tick(now);
    }

    // ─── Opening ─────────────────────────────────────────────────────

    /// Open an empty workspace for a fresh upload, no slot scope.
    pub fn open_for_new_upload(&mut self) -> Result<(), WorkspaceError> {
        self.require_phase(WorkspacePhase::Closed, "open")?;
        self.reset_open(None);
        Ok(())
    }

    /// Open scoped to one slot, seeding a placeholder record per file
    /// already associated with it.
    ///
    /// Seeded records carry the slot association, the persisted issue
    /// date (when one was saved), and a standing confirmation; saving in
    /// this mode replaces the slot's file set wholesale.
    pub fn open_for_slot(
        &mut self,
        registry: &RequirementRegistry,
        slot_name: &str,
    ) -> Result<(), WorkspaceError> {
        self.require_phase(WorkspacePhase::Closed, "open")?;
        let slot = registry
            .slot(slot_name)
            .ok_or_else(|| RegistryError::UnknownSlot {
                name: slot_name.to_string(),
            })?;

        self.reset_open(Some(slot_name.to_string()));
        self.files = slot
            .files()
            .iter()
            .map(|f| {
                let mut rec = UploadedFileRecord::new(f.name.clone(), Some(slot_name));
                rec.issue_date = f.issue_date.clone().unwrap_or_default();
                rec.confirmed = true;
                rec
            })
            .collect();
        Ok(())
    }

    /// Append freshly intaken records and open the workspace.
    ///
    /// The cursor moves to the front only when the workspace was empty,
    /// so adding more files does not disrupt an in-progress review. A
    /// fresh upload is not itself a change: both flags reset.
    pub(crate) fn admit_files(
        &mut self,
        records: Vec<UploadedFileRecord>,
    ) -> Result<(), WorkspaceError> {
        match self.phase {
            WorkspacePhase::Closed | WorkspacePhase::OpenEditing => {}
            _ => {
                return Err(WorkspaceError::InvalidPhase {
                    action: "admit files",
                    phase: self.phase.to_string(),
                })
            }
        }
        let was_empty = self.files.is_empty();
        self.files.extend(records);
        if was_empty {
            self.cursor = 0;
        }
        self.phase = WorkspacePhase::OpenEditing;
        self.dirty = false;
        self.show_validation_errors = false;
        Ok(())
    }

    // ─── Edits ───────────────────────────────────────────────────────

    /// Set one association entry on the current file.
    pub fn set_association(&mut self, index: usize, value: &str) -> Result<(), WorkspaceError> {
        let file = self.current_file_mut()?;
        let len = file.associations.len();
        let entry = file
            .associations
            .get_mut(index)
            .ok_or(WorkspaceError::IndexOutOfRange { index, len })?;
        *entry = value.to_string();
        self.mark_edited();
        Ok(())
    }

    /// Append an unset association entry to the current file.
    pub fn add_association_slot(&mut self) -> Result<(), WorkspaceError> {
        self.current_file_mut()?.associations.push(String::new());
        self.mark_edited();
        Ok(())
    }

    /// Remove an association entry from the current file.
    ///
    /// Entry 0 can never be removed, so a file can never reach zero
    /// associations.
    pub fn remove_association_slot(&mut self, index: usize) -> Result<(), WorkspaceError> {
        let file = self.current_file_mut()?;
        if index == 0 {
            return Err(WorkspaceError::PrimaryAssociation);
        }
        let len = file.associations.len();
        if index >= len {
            return Err(WorkspaceError::IndexOutOfRange { index, len });
        }
        file.associations.remove(index);
        self.mark_edited();
        Ok(())
    }

    /// Set the issue date on the current file.
    pub fn set_issue_date(&mut self, value: &str) -> Result<(), WorkspaceError> {
        self.current_file_mut()?.issue_date = value.to_string();
        self.mark_edited();
        Ok(())
    }

    /// Set the correctness attestation on the current file.
    pub fn set_confirmed(&mut self, value: bool) -> Result<(), WorkspaceError> {
        self.current_file_mut()?.confirmed = value;
        self.mark_edited();
        Ok(())
    }

    // ─── Navigation ──────────────────────────────────────────────────

    /// Move the cursor back one file.
    pub fn back(&mut self) -> Result<(), WorkspaceError> {
        self.require_phase(WorkspacePhase::OpenEditing, "navigate")?;
        if self.cursor > 0 {
            self.cursor -= 1;
        }
        Ok(())
    }

    /// Advance the cursor, with the block-or-wrap policy at the end.
    ///
    /// Before the last file this simply advances. At the last file: if
    /// the current file is incomplete, refuse to move and raise the
    /// validation flag; otherwise wrap to the first incomplete file,
    /// falling back to the front when every file is complete.
    pub fn next(&mut self) -> Result<(), WorkspaceError> {
        self.require_phase(WorkspacePhase::OpenEditing, "navigate")?;
        if self.files.is_empty() {
            return Ok(());
        }
        if self.cursor < self.files.len() - 1 {
            self.cursor += 1;
            return Ok(());
        }
        // At the last file.
        if !is_file_valid(&self.files[self.cursor]) {
            self.show_validation_errors = true;
            return Ok(());
        }
        self.cursor = self
            .files
            .iter()
            .position(|f| !is_file_valid(f))
            .unwrap_or(0);
        Ok(())
    }

    /// Jump straight to a file tab, clamped to the batch.
    pub fn select_tab(&mut self, index: usize) -> Result<(), WorkspaceError> {
        self.require_phase(WorkspacePhase::OpenEditing, "navigate")?;
        if !self.files.is_empty() {
            self.cursor = index.min(self.files.len() - 1);
        }
        Ok(())
    }

    // ─── Deletion ────────────────────────────────────────────────────

    /// Ask to delete one file; shows the blocking confirmation.
    pub fn request_delete(&mut self, id: FileId) -> Result<(), WorkspaceError> {
        self.require_phase(WorkspacePhase::OpenEditing, "request delete")?;
        if !self.files.iter().any(|f| f.id == id) {
            return Err(WorkspaceError::UnknownFile { id });
        }
        self.phase = WorkspacePhase::DeleteConfirm(id);
        Ok(())
    }

    /// Dismiss the delete confirmation with no mutation.
    pub fn cancel_delete(&mut self) -> Result<(), WorkspaceError> {
        match self.phase {
            WorkspacePhase::DeleteConfirm(_) => {
                self.phase = WorkspacePhase::OpenEditing;
                Ok(())
            }
            _ => Err(WorkspaceError::InvalidPhase {
                action: "cancel delete",
                phase: self.phase.to_string(),
            }),
        }
    }

    /// Delete the pending file.
    ///
    /// Applied directly to the registry, not staged: if the record's
    /// primary association names a known slot, the record's display name
    /// is detached from that slot immediately. The cursor is clamped to
    /// the new batch end.
    pub fn confirm_delete(
        &mut self,
        registry: &mut RequirementRegistry,
    ) -> Result<FileId, WorkspaceError> {
        let id = match self.phase {
            WorkspacePhase::DeleteConfirm(id) => id,
            _ => {
                return Err(WorkspaceError::InvalidPhase {
                    action: "confirm delete",
                    phase: self.phase.to_string(),
                })
            }
        };
        let pos = self
            .files
            .iter()
            .position(|f| f.id == id)
            .ok_or(WorkspaceError::UnknownFile { id })?;
        let record = self.files.remove(pos);

        if let Some(slot_name) = record.primary_association() {
            if registry.contains_slot(slot_name) {
                registry.detach_file(slot_name, &record.display_name, Timestamp::now())?;
            }
        }

        if !self.files.is_empty() && self.cursor >= self.files.len() {
            self.cursor = self.files.len() - 1;
        }
        if self.files.is_empty() {
            self.cursor = 0;
        }
        self.phase = WorkspacePhase::OpenEditing;
        info!(file = %record.display_name, "deleted uploaded file");
        Ok(id)
    }

    // ─── Closing ─────────────────────────────────────────────────────

    /// Ask to close the workspace.
    ///
    /// Dirty workspaces get the unsaved-changes prompt; clean ones close
    /// immediately, destroying every record. There is no autosave.
    pub fn request_close(&mut self) -> Result<(), WorkspaceError> {
        self.require_phase(WorkspacePhase::OpenEditing, "close")?;
        if self.dirty {
            self.phase = WorkspacePhase::ClosingConfirm;
        } else {
            self.reset_closed();
        }
        Ok(())
    }

    /// Force-discard from the unsaved-changes prompt.
    pub fn confirm_close(&mut self) -> Result<(), WorkspaceError> {
        self.require_phase(WorkspacePhase::ClosingConfirm, "discard")?;
        self.reset_closed();
        Ok(())
    }

    /// Return to editing with all in-progress edits intact.
    pub fn cancel_close(&mut self) -> Result<(), WorkspaceError> {
        self.require_phase(WorkspacePhase::ClosingConfirm, "cancel close")?;
        self.phase = WorkspacePhase::OpenEditing;
        Ok(())
    }

    // ─── Commit ──────────────────────────────────────────────────────

    /// Commit the batch into the registry, all-or-nothing.
    ///
    /// Rejected when any file is incomplete (the sticky validation flag
    /// is raised, nothing else changes) or when an association names an
    /// unknown slot. On success every non-empty association upserts the
    /// file into its slot; when the workspace is slot-scoped, that slot's
    /// file set is replaced wholesale by this batch's files naming it,
    /// so omission deletes. Closes the workspace and posts one notice.
    pub fn save(
        &mut self,
        registry: &mut RequirementRegistry,
    ) -> Result<SaveSummary, WorkspaceError> {
        self.require_phase(WorkspacePhase::OpenEditing, "save")?;

        if !is_batch_valid(&self.files) {
            self.show_validation_errors = true;
            return Err(WorkspaceError::BatchIncomplete);
        }

        // Resolve every association before mutating anything, so the
        // commit below cannot fail halfway.
        for file in &self.files {
            for target in file.association_targets() {
                if !registry.contains_slot(target) {
                    return Err(RegistryError::UnknownSlot {
                        name: target.to_string(),
                    }
                    .into());
                }
            }
        }

        // Added-vs-updated tally against pre-commit membership.
        let mut added = 0;
        let mut updated = 0;
        for file in &self.files {
            let targets = file.association_targets();
            if targets.is_empty() {
                continue; // unreachable past validation, kept for clamp safety
            }
            let is_new = targets.iter().any(|t| {
                registry
                    .slot(t)
                    .map(|s| !s.contains(&file.display_name))
                    .unwrap_or(false)
            });
            if is_new {
                added += 1;
            } else {
                updated += 1;
            }
        }

        let now = Timestamp::now();

        if let Some(slot_name) = self.preselected_slot.clone() {
            let replacement: Vec<SlotFile> = self
                .files
                .iter()
                .filter(|f| f.association_targets().contains(&slot_name.as_str()))
                .map(|f| SlotFile::new(f.display_name.clone(), Some(f.issue_date.clone())))
                .collect();
            registry.replace_slot_files(&slot_name, replacement, now)?;

            for file in &self.files {
                for target in file.association_targets() {
                    if target != slot_name {
                        registry.attach_file(
                            target,
                            &file.display_name,
                            Some(file.issue_date.clone()),
                            now,
                        )?;
                    }
                }
            }
        } else {
            for file in &self.files {
                for target in file.association_targets() {
                    registry.attach_file(
                        target,
                        &file.display_name,
                        Some(file.issue_date.clone()),
                        now,
                    )?;
                }
            }
        }

        let summary = SaveSummary { added, updated };
        self.notices.post(summary.message(), now);
        info!(added, updated, "batch committed");
        self.reset_closed();
        Ok(summary)
    }

    /// Clear the preselected slot's upload state entirely and close.
    ///
    /// Skips validation; the workspace is discarded like a close.
    pub fn remove_all(
        &mut self,
        registry: &mut RequirementRegistry,
    ) -> Result<(), WorkspaceError> {
        self.require_phase(WorkspacePhase::OpenEditing, "remove all")?;
        let slot_name = self
            .preselected_slot
            .clone()
            .ok_or(WorkspaceError::NoPreselectedSlot)?;
        registry.clear_slot(&slot_name)?;
        info!(slot = %slot_name, "removed all uploads for slot");
        self.reset_closed();
        Ok(())
    }

    // ─── Internal ────────────────────────────────────────────────────

    fn require_phase(
        &self,
        expected: WorkspacePhase,
        action: &'static str,
    ) -> Result<(), WorkspaceError> {
        if self.phase != expected {
            return Err(WorkspaceError::InvalidPhase {
                action,
                phase: self.phase.to_string(),
            });
        }
        Ok(())
    }

    fn current_file_mut(&mut self) -> Result<&mut UploadedFileRecord, WorkspaceError> {
        self.require_phase(WorkspacePhase::OpenEditing, "edit")?;
        if self.files.is_empty() {
            return Err(WorkspaceError::NoCurrentFile);
        }
        let idx = self.cursor.min(self.files.len() - 1);
        Ok(&mut self.files[idx])
    }

    fn mark_edited(&mut self) {
        self.dirty = true;
        self.show_validation_errors = false;
    }

    fn reset_open(&mut self, preselected_slot: Option<String>) {
        self.phase = WorkspacePhase::OpenEditing;
        self.files.clear();
        self.cursor = 0;
        self.preselected_slot = preselected_slot;
        self.dirty = false;
        self.show_validation_errors = false;
    }

    fn reset_closed(&mut self) {
        self.phase = WorkspacePhase::Closed;
        self.files.clear();
        self.cursor = 0;
        self.preselected_slot = None;
        self.dirty = false;
        self.show_validation_errors = false;
    }
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use cdesk_registry::RequirementSlot;

    fn registry() -> RequirementRegistry {
        let mut reg = RequirementRegistry::new();
        reg.background_checks
            .push(RequirementSlot::new("Criminal Records Check", "No Status"));
        reg.medical_documents
            .push(RequirementSlot::new("COVID-19", "No Status"));
        reg.medical_documents
            .push(RequirementSlot::new("Influenza", "No Status"));
        reg
    }

    fn open_with(names: &[&str]) -> AssociationWorkspace {
        let mut ws = AssociationWorkspace::new();
        ws.open_for_new_upload().unwrap();
        let records = names
            .iter()
            .map(|n| UploadedFileRecord::new(*n, None))
            .collect();
        ws.admit_files(records).unwrap();
        ws
    }

    /// Fill in the current file so it passes validation.
    fn complete_current(ws: &mut AssociationWorkspace, slot: &str) {
        ws.set_association(0, slot).unwrap();
        ws.set_issue_date("2025-06-02").unwrap();
        ws.set_confirmed(true).unwrap();
    }

    // ── Phases ───────────────────────────────────────────────────────

    #[test]
    fn test_new_workspace_is_closed() {
        let ws = AssociationWorkspace::new();
        assert_eq!(*ws.phase(), WorkspacePhase::Closed);
        assert!(ws.files().is_empty());
        assert!(ws.current_file().is_none());
    }

    #[test]
    fn test_cannot_edit_while_closed() {
        let mut ws = AssociationWorkspace::new();
        assert!(matches!(
            ws.set_issue_date("2025-06-02"),
            Err(WorkspaceError::InvalidPhase { .. })
        ));
    }

    #[test]
    fn test_cannot_save_while_closed() {
        let mut ws = AssociationWorkspace::new();
        let mut reg = registry();
        assert!(matches!(
            ws.save(&mut reg),
            Err(WorkspaceError::InvalidPhase { .. })
        ));
    }

    #[test]
    fn test_open_for_unknown_slot_is_error() {
        let mut ws = AssociationWorkspace::new();
        let reg = registry();
        assert!(ws.open_for_slot(&reg, "Polio").is_err());
        assert_eq!(*ws.phase(), WorkspacePhase::Closed);
    }

    // ── Edits ────────────────────────────────────────────────────────

    #[test]
    fn test_edits_set_dirty_and_reset_validation_flag() {
        let mut ws = open_with(&["a.pdf"]);
        assert!(!ws.is_dirty());
        ws.set_association(0, "COVID-19").unwrap();
        assert!(ws.is_dirty());

        let mut reg = registry();
        // Incomplete save raises the flag; next edit clears it.
        assert!(ws.save(&mut reg).is_err());
        assert!(ws.show_validation_errors());
        ws.set_issue_date("2025-06-02").unwrap();
        assert!(!ws.show_validation_errors());
    }

    #[test]
    fn test_association_slots_grow_and_shrink() {
        let mut ws = open_with(&["a.pdf"]);
        ws.add_association_slot().unwrap();
        assert_eq!(ws.current_file().unwrap().associations.len(), 2);
        ws.remove_association_slot(1).unwrap();
        assert_eq!(ws.current_file().unwrap().associations.len(), 1);
    }

    #[test]
    fn test_primary_association_slot_cannot_be_removed() {
        let mut ws = open_with(&["a.pdf"]);
        assert!(matches!(
            ws.remove_association_slot(0),
            Err(WorkspaceError::PrimaryAssociation)
        ));
        assert_eq!(ws.current_file().unwrap().associations.len(), 1);
    }

    #[test]
    fn test_set_association_out_of_range() {
        let mut ws = open_with(&["a.pdf"]);
        assert!(matches!(
            ws.set_association(3, "COVID-19"),
            Err(WorkspaceError::IndexOutOfRange { .. })
        ));
    }

    // ── Navigation ───────────────────────────────────────────────────

    #[test]
    fn test_back_stops_at_front() {
        let mut ws = open_with(&["a.pdf", "b.pdf"]);
        ws.back().unwrap();
        assert_eq!(ws.cursor(), 0);
        ws.next().unwrap();
        ws.back().unwrap();
        assert_eq!(ws.cursor(), 0);
    }

    #[test]
    fn test_next_advances_before_last() {
        let mut ws = open_with(&["a.pdf", "b.pdf", "c.pdf"]);
        ws.next().unwrap();
        assert_eq!(ws.cursor(), 1);
    }

    #[test]
    fn test_next_at_last_blocks_when_current_invalid() {
        let mut ws = open_with(&["a.pdf", "b.pdf"]);
        ws.select_tab(1).unwrap();
        ws.next().unwrap();
        assert_eq!(ws.cursor(), 1);
        assert!(ws.show_validation_errors());
    }

    #[test]
    fn test_next_at_last_wraps_to_first_invalid() {
        let mut ws = open_with(&["a.pdf", "b.pdf", "c.pdf"]);
        ws.select_tab(2).unwrap();
        complete_current(&mut ws, "COVID-19");
        ws.next().unwrap();
        // a.pdf (index 0) is the first incomplete file.
        assert_eq!(ws.cursor(), 0);
        assert!(!ws.show_validation_errors());
    }

    #[test]
    fn test_next_at_last_wraps_to_front_when_all_valid() {
        let mut ws = open_with(&["a.pdf", "b.pdf"]);
        complete_current(&mut ws, "COVID-19");
        ws.select_tab(1).unwrap();
        complete_current(&mut ws, "Influenza");
        ws.next().unwrap();
        assert_eq!(ws.cursor(), 0);
    }

    #[test]
    fn test_select_tab_clamps() {
        let mut ws = open_with(&["a.pdf", "b.pdf"]);
        ws.select_tab(9).unwrap();
        assert_eq!(ws.cursor(), 1);
    }

    // ── Deletion ─────────────────────────────────────────────────────

    #[test]
    fn test_delete_requires_confirmation() {
        let mut ws = open_with(&["a.pdf"]);
        let id = ws.files()[0].id;
        ws.request_delete(id).unwrap();
        assert_eq!(*ws.phase(), WorkspacePhase::DeleteConfirm(id));

        ws.cancel_delete().unwrap();
        assert_eq!(*ws.phase(), WorkspacePhase::OpenEditing);
        assert_eq!(ws.files().len(), 1);
    }

    #[test]
    fn test_request_delete_unknown_id() {
        let mut ws = open_with(&["a.pdf"]);
        assert!(matches!(
            ws.request_delete(FileId::new()),
            Err(WorkspaceError::UnknownFile { .. })
        ));
    }

    #[test]
    fn test_confirm_delete_detaches_from_registry() {
        let mut reg = registry();
        let mut ws = AssociationWorkspace::new();
        let mut rec = UploadedFileRecord::new("scan.pdf", Some("COVID-19"));
        rec.issue_date = "2025-06-02".to_string();
        rec.confirmed = true;
        ws.open_for_new_upload().unwrap();
        ws.admit_files(vec![rec]).unwrap();
        ws.save(&mut reg).unwrap();
        assert!(reg.slot("COVID-19").unwrap().has_upload());

        ws.open_for_slot(&reg, "COVID-19").unwrap();
        let id = ws.files()[0].id;
        ws.request_delete(id).unwrap();
        ws.confirm_delete(&mut reg).unwrap();

        let slot = reg.slot("COVID-19").unwrap();
        assert!(!slot.has_upload());
        assert_eq!(slot.upload_count(), 0);
        assert!(slot.last_updated_at().is_none());
    }

    #[test]
    fn test_confirm_delete_clamps_cursor() {
        let mut reg = registry();
        let mut ws = open_with(&["a.pdf", "b.pdf", "c.pdf"]);
        ws.select_tab(2).unwrap();
        let id = ws.files()[2].id;
        ws.request_delete(id).unwrap();
        ws.confirm_delete(&mut reg).unwrap();
        assert_eq!(ws.files().len(), 2);
        assert_eq!(ws.cursor(), 1);
    }

    // ── Closing ──────────────────────────────────────────────────────

    #[test]
    fn test_clean_close_discards_immediately() {
        let mut ws = open_with(&["a.pdf"]);
        ws.request_close().unwrap();
        assert_eq!(*ws.phase(), WorkspacePhase::Closed);
        assert!(ws.files().is_empty());
    }

    #[test]
    fn test_dirty_close_prompts_then_cancel_keeps_edits() {
        let mut ws = open_with(&["a.pdf"]);
        ws.set_issue_date("2025-06-02").unwrap();
        ws.request_close().unwrap();
        assert_eq!(*ws.phase(), WorkspacePhase::ClosingConfirm);

        ws.cancel_close().unwrap();
        assert_eq!(*ws.phase(), WorkspacePhase::OpenEditing);
        assert_eq!(ws.current_file().unwrap().issue_date, "2025-06-02");
    }

    #[test]
    fn test_dirty_close_discard_destroys_everything() {
        let reg = registry();
        let mut ws = open_with(&["a.pdf"]);
        complete_current(&mut ws, "COVID-19");
        ws.request_close().unwrap();
        ws.confirm_close().unwrap();
        assert_eq!(*ws.phase(), WorkspacePhase::Closed);
        assert!(ws.files().is_empty());
        // Nothing was committed.
        assert!(!reg.slot("COVID-19").unwrap().has_upload());
    }

    // ── Save ─────────────────────────────────────────────────────────

    #[test]
    fn test_save_rejects_incomplete_batch_without_mutation() {
        let mut reg = registry();
        let mut ws = open_with(&["a.pdf", "b.pdf"]);
        // Complete only the second file.
        ws.select_tab(1).unwrap();
        complete_current(&mut ws, "COVID-19");
        ws.select_tab(0).unwrap();

        let result = ws.save(&mut reg);
        assert!(matches!(result, Err(WorkspaceError::BatchIncomplete)));
        assert!(ws.show_validation_errors());
        assert_eq!(ws.cursor(), 0);
        assert_eq!(*ws.phase(), WorkspacePhase::OpenEditing);
        assert!(reg.all_slots().all(|s| !s.has_upload()));
    }

    #[test]
    fn test_save_rejects_unknown_slot_name() {
        let mut reg = registry();
        let mut ws = open_with(&["a.pdf"]);
        complete_current(&mut ws, "Not A Slot");
        assert!(matches!(
            ws.save(&mut reg),
            Err(WorkspaceError::Registry(RegistryError::UnknownSlot { .. }))
        ));
        assert!(reg.all_slots().all(|s| !s.has_upload()));
    }

    #[test]
    fn test_save_merges_into_slots_and_closes() {
        let mut reg = registry();
        let mut ws = open_with(&["a.pdf", "b.pdf"]);
        complete_current(&mut ws, "COVID-19");
        ws.next().unwrap();
        complete_current(&mut ws, "Influenza");

        let summary = ws.save(&mut reg).unwrap();
        assert_eq!(summary, SaveSummary { added: 2, updated: 0 });
        assert_eq!(*ws.phase(), WorkspacePhase::Closed);
        assert!(reg.slot("COVID-19").unwrap().contains("a.pdf"));
        assert!(reg.slot("Influenza").unwrap().contains("b.pdf"));
        assert_eq!(ws.notice().unwrap().message, "2 files added, 0 files updated");
    }

    #[test]
    fn test_save_with_multiple_associations() {
        let mut reg = registry();
        let mut ws = open_with(&["a.pdf"]);
        complete_current(&mut ws, "COVID-19");
        ws.add_association_slot().unwrap();
        ws.set_association(1, "Influenza").unwrap();

        ws.save(&mut reg).unwrap();
        assert!(reg.slot("COVID-19").unwrap().contains("a.pdf"));
        assert!(reg.slot("Influenza").unwrap().contains("a.pdf"));
    }

    #[test]
    fn test_save_is_idempotent_for_merge() {
        let mut reg = registry();
        for _ in 0..2 {
            let mut ws = open_with(&["a.pdf"]);
            complete_current(&mut ws, "COVID-19");
            ws.save(&mut reg).unwrap();
        }
        let slot = reg.slot("COVID-19").unwrap();
        assert_eq!(slot.upload_count(), 1);
        let names: Vec<&str> = slot.file_names().collect();
        assert_eq!(names, vec!["a.pdf"]);
    }

    #[test]
    fn test_second_save_counts_as_update() {
        let mut reg = registry();
        let mut ws = open_with(&["a.pdf"]);
        complete_current(&mut ws, "COVID-19");
        assert_eq!(ws.save(&mut reg).unwrap(), SaveSummary { added: 1, updated: 0 });

        let mut ws = open_with(&["a.pdf"]);
        complete_current(&mut ws, "COVID-19");
        assert_eq!(ws.save(&mut reg).unwrap(), SaveSummary { added: 0, updated: 1 });
    }

    #[test]
    fn test_slot_scoped_save_replaces_by_omission() {
        let mut reg = registry();
        reg.attach_file("COVID-19", "old1.pdf", None, Timestamp::now())
            .unwrap();
        reg.attach_file("COVID-19", "old2.pdf", None, Timestamp::now())
            .unwrap();

        let mut ws = AssociationWorkspace::new();
        ws.open_for_slot(&reg, "COVID-19").unwrap();
        assert_eq!(ws.files().len(), 2);
        // Drop the second placeholder from the batch, fill in the first.
        let id = ws.files()[1].id;
        ws.request_delete(id).unwrap();
        ws.confirm_delete(&mut reg).unwrap();
        ws.set_issue_date("2025-06-02").unwrap();

        ws.save(&mut reg).unwrap();
        let slot = reg.slot("COVID-19").unwrap();
        let names: Vec<&str> = slot.file_names().collect();
        assert_eq!(names, vec!["old1.pdf"]);
    }

    #[test]
    fn test_slot_scoped_save_persists_issue_dates() {
        let mut reg = registry();
        let mut ws = open_with(&["scan.pdf"]);
        complete_current(&mut ws, "COVID-19");
        ws.save(&mut reg).unwrap();

        // Reopening seeds the persisted issue date and confirmation back.
        let mut ws = AssociationWorkspace::new();
        ws.open_for_slot(&reg, "COVID-19").unwrap();
        let rec = ws.current_file().unwrap();
        assert_eq!(rec.issue_date, "2025-06-02");
        assert!(rec.confirmed);
        assert_eq!(rec.associations, vec!["COVID-19".to_string()]);
    }

    #[test]
    fn test_empty_batch_save_is_a_noop_commit() {
        let mut reg = registry();
        let mut ws = AssociationWorkspace::new();
        ws.open_for_new_upload().unwrap();
        let summary = ws.save(&mut reg).unwrap();
        assert_eq!(summary, SaveSummary { added: 0, updated: 0 });
        assert!(reg.all_slots().all(|s| !s.has_upload()));
        assert_eq!(*ws.phase(), WorkspacePhase::Closed);
    }

    // ── Remove all ───────────────────────────────────────────────────

    #[test]
    fn test_remove_all_clears_slot_and_closes() {
        let mut reg = registry();
        reg.attach_file("COVID-19", "scan.pdf", None, Timestamp::now())
            .unwrap();

        let mut ws = AssociationWorkspace::new();
        ws.open_for_slot(&reg, "COVID-19").unwrap();
        // Validation is skipped: seeded files have no issue date here.
        ws.remove_all(&mut reg).unwrap();

        assert_eq!(*ws.phase(), WorkspacePhase::Closed);
        let slot = reg.slot("COVID-19").unwrap();
        assert!(!slot.has_upload());
        assert_eq!(slot.upload_count(), 0);
        assert!(slot.last_updated_at().is_none());
    }

    #[test]
    fn test_remove_all_requires_preselected_slot() {
        let mut reg = registry();
        let mut ws = open_with(&["a.pdf"]);
        assert!(matches!(
            ws.remove_all(&mut reg),
            Err(WorkspaceError::NoPreselectedSlot)
        ));
    }

    // ── Notices ──────────────────────────────────────────────────────

    #[test]
    fn test_save_posts_notice_and_tick_expires_it() {
        let mut reg = registry();
        let mut ws = open_with(&["a.pdf"]);
        complete_current(&mut ws, "COVID-19");
        ws.save(&mut reg).unwrap();
        assert!(ws.notice().is_some());

        let posted = ws.notice().unwrap().posted_at;
        let later = Timestamp::parse("2100-01-01T00:00:00Z").unwrap();
        assert!(later > posted);
        ws.tick(later);
        assert!(ws.notice().is_none());
    }
}
