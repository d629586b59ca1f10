//! Snapshot command: freeze an inventory's known facts into the static
//! facts file format consumed by gather runs.

use anyhow::Result;
use std::path::Path;
use tracing::info;

use gleaner_common::static_facts::{snapshot, Inventory};

use crate::errors::EXIT_SUCCESS;

pub fn run(inventory_path: &Path, out: &Path) -> Result<i32> {
    let inventory = Inventory::load(inventory_path)?;
    let facts = snapshot(&inventory);
    facts.write(out)?;
    info!(
        "wrote static facts for {} target(s) to {}",
        facts.len(),
        out.display()
    );
    Ok(EXIT_SUCCESS)
}
