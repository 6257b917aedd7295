//! Command handlers.

pub mod list;
pub mod show;

use anyhow::{Context, Result};
use revq_core::{Homework, TicketSnapshot};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;
use tracing::warn;

/// Read the fetched tracker records from `path`, `-` meaning stdin.
pub fn read_snapshots(path: &Path) -> Result<Vec<TicketSnapshot>> {
    if path.as_os_str() == "-" {
        let stdin = io::stdin();
        serde_json::from_reader(stdin.lock()).context("Failed to parse snapshot from stdin")
    } else {
        let file =
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse {}", path.display()))
    }
}

/// Construct homeworks, skipping malformed records with a warning so one bad
/// ticket doesn't abort the rest of the snapshot.
pub fn construct_homeworks(snapshots: Vec<TicketSnapshot>) -> Vec<Homework> {
    let mut homeworks = Vec::with_capacity(snapshots.len());
    for snapshot in snapshots {
        let key = snapshot.issue_key.clone();
        match Homework::from_snapshot(snapshot) {
            Ok(homework) => homeworks.push(homework),
            Err(err) => warn!(issue_key = %key, error = %err, "skipping malformed ticket record"),
        }
    }
    homeworks
}
