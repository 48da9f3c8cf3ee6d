use std::path::Path;

use tracing::{info, instrument};

use crate::Status;

use super::Record;

/// Parses a `games.json` style array of records.
pub fn parse(json: &str) -> Result<Vec<Record>, Status> {
    serde_json::from_str::<Vec<Record>>(json)
        .map_err(|e| Status::invalid_argument(format!("Failed to parse seed collection: {e}")))
}

#[instrument(level = "trace")]
pub fn load(path: &Path) -> Result<Vec<Record>, Status> {
    let text = std::fs::read_to_string(path)?;
    let records = parse(&text)?;
    info!("loaded {} records from '{}'", records.len(), path.display());
    Ok(records)
}
