//! # cdesk-cli — Compliance Desk Command-Line Interface
//!
//! A thin driver over the domain crates for scripting and inspection.
//! The registry lives in a JSON snapshot on disk; each invocation loads
//! it, runs one operation through the same workspace machinery the
//! interactive surface uses, and writes the snapshot back.
//!
//! ## Subcommands
//!
//! - `status` — Per-slot upload state and the aggregate compliance signal
//! - `upload` — Upload files, associate them with slots, and commit
//! - `book` — Check booking eligibility
//!
//! ## Crate Policy
//!
//! - CLI construction (argument parsing) is separated from business logic.
//! - Handler functions delegate to the domain crates — no validation or
//!   compliance rules are re-implemented here.

pub mod book;
pub mod snapshot;
pub mod status;
pub mod upload;
