//! # Upload Subcommand
//!
//! Drives the same intake-edit-save pipeline as the interactive surface:
//! files enter the workspace as a batch, every record is filled in from
//! the flags, and one all-or-nothing save commits the batch into the
//! registry snapshot.

use std::path::Path;

use anyhow::bail;
use clap::Args;

use cdesk_workspace::{AssociationWorkspace, FileHandle, UploadIntake};

use crate::snapshot;

/// Arguments for the upload subcommand.
#[derive(Args, Debug)]
pub struct UploadArgs {
    /// File name(s) to upload. Repeatable.
    #[arg(long = "file")]
    pub files: Vec<String>,

    /// Requirement slot(s) to associate every file with. Repeatable.
    #[arg(long = "slot", required = true)]
    pub slots: Vec<String>,

    /// Issue date for the files (YYYY-MM-DD).
    #[arg(long)]
    pub issue_date: Option<String>,

    /// Attest that the entered data is correct. Required to commit.
    #[arg(long)]
    pub confirm: bool,

    /// Remove every file from the first named slot instead of uploading.
    #[arg(long, conflicts_with_all = ["files", "issue_date", "confirm"])]
    pub remove_all: bool,
}

/// Upload and commit a batch, or clear a slot with `--remove-all`.
pub fn run(args: &UploadArgs, registry_path: &Path) -> anyhow::Result<()> {
    let mut registry = snapshot::load(registry_path)?;

    if args.remove_all {
        let slot_name = match args.slots.first() {
            Some(name) => name,
            None => bail!("--remove-all requires a --slot"),
        };
        let mut workspace = AssociationWorkspace::new();
        workspace.open_for_slot(&registry, slot_name)?;
        workspace.remove_all(&mut registry)?;
        snapshot::store(registry_path, &registry)?;
        println!("Removed all uploads from {slot_name:?}");
        return Ok(());
    }

    if args.files.is_empty() {
        bail!("at least one --file is required");
    }
    let issue_date = match args.issue_date.as_deref() {
        Some(date) => date,
        None => bail!("--issue-date is required"),
    };
    if !args.confirm {
        bail!("refusing to commit without --confirm (correctness attestation)");
    }

    let mut intake = UploadIntake::new();
    let mut workspace = AssociationWorkspace::new();
    workspace.open_for_new_upload()?;
    intake.select_files(args.files.iter().map(|f| FileHandle::new(f.as_str())));
    intake.commit(&mut workspace)?;

    // Fill in every record from the flags: first slot into the seeded
    // association entry, further slots into added entries.
    let count = workspace.files().len();
    for tab in 0..count {
        workspace.select_tab(tab)?;
        for (i, slot_name) in args.slots.iter().enumerate() {
            if i > 0 {
                workspace.add_association_slot()?;
            }
            workspace.set_association(i, slot_name)?;
        }
        workspace.set_issue_date(issue_date)?;
        workspace.set_confirmed(true)?;
    }

    let summary = workspace.save(&mut registry)?;
    snapshot::store(registry_path, &registry)?;
    println!("{}", summary.message());
    Ok(())
}
