//! # Registry Snapshot Persistence
//!
//! Loads and stores the requirement registry as a JSON snapshot. A
//! missing snapshot file is not an error: it means a fresh start, so the
//! standard catalog is returned and will be written on the first commit.

use std::fs;
use std::path::Path;

use anyhow::Context;

use cdesk_registry::{standard_catalog, RequirementRegistry};

/// Load the registry from a snapshot file, or seed the standard catalog
/// when the file does not exist yet.
pub fn load(path: &Path) -> anyhow::Result<RequirementRegistry> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no snapshot found, seeding standard catalog");
        return Ok(standard_catalog());
    }
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading registry snapshot {}", path.display()))?;
    let registry = serde_json::from_str(&raw)
        .with_context(|| format!("parsing registry snapshot {}", path.display()))?;
    Ok(registry)
}

/// Write the registry back to its snapshot file.
pub fn store(path: &Path, registry: &RequirementRegistry) -> anyhow::Result<()> {
    let raw = serde_json::to_string_pretty(registry).context("serializing registry snapshot")?;
    fs::write(path, raw)
        .with_context(|| format!("writing registry snapshot {}", path.display()))?;
    tracing::debug!(path = %path.display(), "snapshot written");
    Ok(())
}
