//! One-off JSON export of the current monitoring state.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::data::Stats;

/// What gets written by the export command.
#[derive(Debug, Serialize)]
pub struct ExportSnapshot<'a> {
    pub host: &'a str,
    pub interval_secs: f64,
    pub capacity: usize,
    /// Window contents, oldest first; `null` marks a failed ping.
    pub samples: Vec<Option<f64>>,
    pub stats: &'a Stats,
    pub status: Option<&'a str>,
}

/// Write the snapshot as pretty-printed JSON, replacing any existing file.
pub fn write_json(path: &Path, snapshot: &ExportSnapshot<'_>) -> Result<()> {
    let json = serde_json::to_string_pretty(snapshot)?;
    let mut file = std::fs::File::create(path)
        .with_context(|| format!("cannot create {}", path.display()))?;
    file.write_all(json.as_bytes())?;
    Ok(())
}
