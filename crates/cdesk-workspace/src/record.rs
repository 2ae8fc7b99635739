//! # Uploaded-File Records
//!
//! The ephemeral, workspace-scoped record of one uploaded file: its
//! requirement associations and the metadata the user must attach before
//! the batch can be committed. Records are created at intake commit,
//! mutated by edits, and destroyed when the workspace is discarded,
//! committed, or the file is deleted.

use serde::{Deserialize, Serialize};

use cdesk_core::FileId;

/// The empty sentinel meaning "no requirement selected yet".
pub const UNSET_ASSOCIATION: &str = "";

/// One uploaded file inside the association workspace.
///
/// `associations` always holds at least one entry; the first entry is the
/// primary association and can never be removed, only changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFileRecord {
    /// Unique record identifier, assigned at intake commit.
    pub id: FileId,
    /// Display name, falling back to a generated placeholder when the
    /// underlying handle had no name.
    pub display_name: String,
    /// Requirement-slot names, or the empty sentinel for "unset".
    pub associations: Vec<String>,
    /// Issue date as entered (`YYYY-MM-DD`); empty means unset.
    pub issue_date: String,
    /// Whether the user attested that the entered data is correct.
    pub confirmed: bool,
}

impl UploadedFileRecord {
    /// Create a fresh record, seeded with one association entry
    /// (the preselected slot when the workspace was opened for one,
    /// the unset sentinel otherwise).
    pub fn new(display_name: impl Into<String>, seed_association: Option<&str>) -> Self {
        Self {
            id: FileId::new(),
            display_name: display_name.into(),
            associations: vec![seed_association.unwrap_or(UNSET_ASSOCIATION).to_string()],
            issue_date: String::new(),
            confirmed: false,
        }
    }

    /// The primary association: the first non-empty entry, if any.
    pub fn primary_association(&self) -> Option<&str> {
        self.associations
            .iter()
            .map(String::as_str)
            .find(|a| !a.is_empty())
    }

    /// All distinct non-empty association names, in entry order.
    pub fn association_targets(&self) -> Vec<&str> {
        let mut targets: Vec<&str> = Vec::new();
        for assoc in &self.associations {
            if !assoc.is_empty() && !targets.contains(&assoc.as_str()) {
                targets.push(assoc);
            }
        }
        targets
    }
}
