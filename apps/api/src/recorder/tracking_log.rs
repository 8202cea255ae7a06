//! Append-only CSV tracking log.
//!
//! The header row is written only when the file is new or empty; existing rows
//! are never rewritten.

use std::fs::{self, OpenOptions};
use std::path::Path;

use csv::WriterBuilder;

use crate::models::tracking::TrackingRecord;

pub fn append_record(path: &Path, record: &TrackingRecord) -> Result<(), csv::Error> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let needs_header = fs::metadata(path).map(|m| m.len() == 0).unwrap_or(true);

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut writer = WriterBuilder::new()
        .has_headers(needs_header)
        .from_writer(file);
    writer.serialize(record)?;
    writer.flush()?;
    Ok(())
}
