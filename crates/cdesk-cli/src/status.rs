//! # Status Subcommand
//!
//! Per-slot upload state plus the aggregate compliance signal.

use std::path::Path;

use clap::Args;

use cdesk_registry::{can_book, compliance_status, progress, RequirementSlot};

use crate::snapshot;

/// Arguments for the status subcommand.
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Emit machine-readable JSON instead of the table.
    #[arg(long)]
    pub json: bool,
}

/// Print the registry's per-slot state and compliance summary.
pub fn run(args: &StatusArgs, registry_path: &Path) -> anyhow::Result<()> {
    let registry = snapshot::load(registry_path)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&registry)?);
        return Ok(());
    }

    println!("Background Checks");
    for slot in &registry.background_checks {
        print_slot(slot);
    }
    println!();
    println!("Medical Documents");
    for slot in &registry.medical_documents {
        print_slot(slot);
    }

    let p = progress(&registry);
    println!();
    println!(
        "Compliance: {} ({}/{} satisfied, {}%)",
        compliance_status(&registry),
        p.completed,
        p.total,
        p.percentage
    );
    println!(
        "Booking: {}",
        if can_book(&registry) { "eligible" } else { "not eligible" }
    );
    Ok(())
}

fn print_slot(slot: &RequirementSlot) {
    let detail = if slot.has_upload() {
        let names: Vec<&str> = slot.file_names().collect();
        format!("{} file(s): {}", slot.upload_count(), names.join(", "))
    } else {
        "no upload".to_string()
    };
    match slot.last_updated_at() {
        Some(ts) => println!("  {:<50} {} (updated {})", slot.name, detail, ts),
        None => println!("  {:<50} {}", slot.name, detail),
    }
}
