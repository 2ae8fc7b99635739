//! # Identifier Newtypes
//!
//! Newtype wrappers for identifiers, so an uploaded-file id cannot be
//! confused with any other string or uuid floating through the system.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an uploaded-file record.
///
/// Assigned once at intake commit and never reused; deletion and close
/// confirmations are keyed by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileId(pub Uuid);

impl FileId {
    /// Generate a new random file identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for FileId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for FileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "file:{}", self.0)
    }
}
