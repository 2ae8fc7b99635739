//! # cdesk-core — Foundational Types for Compliance Desk
//!
//! The leaf crate of the workspace. It defines the small set of primitives
//! shared by the registry and the association workspace: identifier
//! newtypes, a UTC-only timestamp, and the shared error type. Every other
//! crate depends on `cdesk-core`; it depends on nothing internal.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `cdesk-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug` and `Clone`, and implement
//!   `Serialize`/`Deserialize`.

pub mod error;
pub mod identity;
pub mod temporal;

pub use error::CoreError;
pub use identity::FileId;
pub use temporal::Timestamp;
