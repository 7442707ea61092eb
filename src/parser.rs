//! CSV parsing for the EV population dataset.

use anyhow::{Context, Result};
use csv::{ReaderBuilder, Trim};

use crate::record::VehicleRecord;

/// Parses CSV text (header row expected) into typed [`VehicleRecord`]s.
///
/// Columns the dashboard does not consume are ignored. Value-level garbage
/// inside a well-formed row is handled leniently by [`VehicleRecord`] and
/// becomes a `None` field.
///
/// # Errors
///
/// Returns an error if the CSV is structurally malformed (bad quoting, wrong
/// field count). The whole batch is rejected; partial datasets would skew
/// every chart downstream.
pub fn parse_records(csv_text: &str) -> Result<Vec<VehicleRecord>> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .from_reader(csv_text.as_bytes());

    let mut records = Vec::new();
    for (i, row) in reader.deserialize().enumerate() {
        // +2: header line plus 1-based numbering
        let record: VehicleRecord = row.with_context(|| format!("malformed CSV row {}", i + 2))?;
        records.push(record);
    }

    Ok(records)
}
