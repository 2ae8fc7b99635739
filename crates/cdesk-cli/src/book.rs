//! # Book Subcommand
//!
//! Booking-eligibility gate: the appointment flow opens only when every
//! requirement slot is satisfied.

use std::path::Path;

use clap::Args;

use cdesk_registry::{can_book, compliance_status, progress};

use crate::snapshot;

/// Arguments for the book subcommand.
#[derive(Args, Debug)]
pub struct BookArgs {}

/// Report booking eligibility; exits non-zero when not eligible.
pub fn run(_args: &BookArgs, registry_path: &Path) -> anyhow::Result<()> {
    let registry = snapshot::load(registry_path)?;
    let p = progress(&registry);

    if can_book(&registry) {
        println!("Booking is open: all {} requirements satisfied.", p.total);
        Ok(())
    } else {
        anyhow::bail!(
            "booking unavailable: compliance is {} ({}/{} requirements satisfied)",
            compliance_status(&registry),
            p.completed,
            p.total
        )
    }
}
