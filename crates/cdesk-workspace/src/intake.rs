//! # Upload Intake
//!
//! Accumulates raw file selections ahead of batch creation. The picker
//! and the drag-drop surface both feed [`UploadIntake::select_files`];
//! identical filenames may coexist, there is no de-duplication here.
//! Committing turns every pending selection into an uploaded-file record
//! inside the association workspace.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::record::UploadedFileRecord;
use crate::workspace::{AssociationWorkspace, WorkspaceError};

/// A raw file handle as delivered by the presentation layer.
///
/// The core never reads file content; the name is all it needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileHandle {
    /// Filename as reported by the picker or drop event. May be empty.
    pub name: String,
}

impl FileHandle {
    /// Create a handle.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// The pending selection list.
#[derive(Debug, Clone, Default)]
pub struct UploadIntake {
    pending: Vec<FileHandle>,
}

impl UploadIntake {
    /// Create an empty intake.
    pub fn new() -> Self {
        Self::default()
    }

    /// The pending selections, in selection order.
    pub fn pending(&self) -> &[FileHandle] {
        &self.pending
    }

    /// Whether nothing is selected yet.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Append selections from a picker or drop event. Always additive.
    pub fn select_files(&mut self, handles: impl IntoIterator<Item = FileHandle>) {
        self.pending.extend(handles);
    }

    /// Remove one pending selection by index.
    pub fn remove_pending(&mut self, index: usize) -> Result<FileHandle, WorkspaceError> {
        if index >= self.pending.len() {
            return Err(WorkspaceError::IndexOutOfRange {
                index,
                len: self.pending.len(),
            });
        }
        Ok(self.pending.remove(index))
    }

    /// Commit the pending selection into the workspace.
    ///
    /// Each pending file becomes a fresh uploaded-file record seeded with
    /// the workspace's preselected slot (or the unset sentinel). Handles
    /// with an empty name get a generated placeholder (`File N`). The
    /// workspace is opened, its cursor moves to the front only when it
    /// was previously empty, and a fresh upload is not itself a change:
    /// the dirty and validation-errors flags are reset.
    ///
    /// # Errors
    ///
    /// [`WorkspaceError::EmptySelection`] when nothing is pending; a
    /// phase error when the workspace is mid-confirmation.
    pub fn commit(
        &mut self,
        workspace: &mut AssociationWorkspace,
    ) -> Result<usize, WorkspaceError> {
        if self.pending.is_empty() {
            return Err(WorkspaceError::EmptySelection);
        }

        let seed = workspace.preselected_slot().map(str::to_string);
        let base = workspace.files().len();
        let records: Vec<UploadedFileRecord> = self
            .pending
            .drain(..)
            .enumerate()
            .map(|(i, handle)| {
                let name = if handle.name.is_empty() {
                    format!("File {}", base + i + 1)
                } else {
                    handle.name
                };
                UploadedFileRecord::new(name, seed.as_deref())
            })
            .collect();

        let count = records.len();
        workspace.admit_files(records)?;
        debug!(count, "intake committed into workspace");
        Ok(count)
    }
}
