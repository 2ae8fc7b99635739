//! # cdesk-workspace — The Upload-Association-Validation Core
//!
//! Owns the in-progress batch of uploaded files: intake of raw file
//! selections, the association workspace state machine that edits and
//! navigates the batch, the pure validation predicates that gate it, and
//! the transient notices the commit produces.
//!
//! ## Components
//!
//! - **Intake** (`intake.rs`): accumulates raw file selections from the
//!   picker or drag-drop into a pending list, then commits them into the
//!   workspace as uploaded-file records.
//!
//! - **Workspace** (`workspace.rs`): the state machine.
//!   `Closed → OpenEditing → ClosingConfirm / DeleteConfirm`, with
//!   per-file association and metadata edits, block-or-wrap cursor
//!   navigation, confirmed deletion applied straight to the registry, a
//!   dirty-guarded close, and the all-or-nothing `save` commit.
//!
//! - **Validation** (`validate.rs`): stateless predicates over one record
//!   and over the whole batch, recomputed from current state on demand.
//!
//! - **Notices** (`notice.rs`): at most one non-blocking transient
//!   message with a fixed time-to-live, dismissable early.
//!
//! The requirement registry (`cdesk-registry`) is mutated only inside
//! `save`, `remove_all`, and `confirm_delete`; cancelling or discarding
//! leaves it untouched.

pub mod intake;
pub mod notice;
pub mod record;
pub mod validate;
pub mod workspace;

pub use intake::{FileHandle, UploadIntake};
pub use notice::{Notice, NoticeBoard, NOTICE_TTL_SECS};
pub use record::UploadedFileRecord;
pub use validate::{is_batch_valid, is_file_valid, FileCompleteness};
pub use workspace::{AssociationWorkspace, SaveSummary, WorkspaceError, WorkspacePhase};
