use std::io::Read;

use thiserror::Error;
use tracing::debug;

use crate::record::RawCommit;

/// Failure while reading wire records from a commit source.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read commit records: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed commit records: {0}")]
    Json(#[from] serde_json::Error),
}

/// Read an ordered JSON array of wire records.
pub fn records_from_reader(mut reader: impl Read) -> Result<Vec<RawCommit>, IngestError> {
    let mut buffer = String::new();
    reader.read_to_string(&mut buffer)?;
    records_from_str(&buffer)
}

/// Parse an ordered JSON array of wire records.
pub fn records_from_str(text: &str) -> Result<Vec<RawCommit>, IngestError> {
    let records: Vec<RawCommit> = serde_json::from_str(text)?;
    debug!(count = records.len(), "loaded commit records");
    Ok(records)
}
