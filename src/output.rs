//! Output formatting and export for dashboard reports.
//!
//! Supports pretty-printing, JSON export, and CSV export of ranked
//! distributions. This is the hand-off surface to the presentation layer.

use anyhow::Result;
use tracing::{debug, info};

use crate::aggregate::CountEntry;
use crate::report::DashboardReport;
use csv::WriterBuilder;
use std::fs::File;

/// Logs a report using Rust's debug pretty-print format.
pub fn print_pretty(report: &DashboardReport) {
    debug!("{:#?}", report);
}

/// Logs a report as pretty-printed JSON.
pub fn print_json(report: &DashboardReport) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

/// Writes a report as pretty-printed JSON, the shape the charts consume.
pub fn write_report_json(path: &str, report: &DashboardReport) -> Result<()> {
    debug!(path, "Writing report JSON");

    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, report)?;

    Ok(())
}

/// Writes a ranked distribution to a CSV file with a header row.
pub fn write_distribution_csv(path: &str, entries: &[CountEntry]) -> Result<()> {
    debug!(path, rows = entries.len(), "Writing distribution CSV");

    let mut writer = WriterBuilder::new().from_path(path)?;
    for entry in entries {
        writer.serialize(entry)?;
    }
    writer.flush()?;

    Ok(())
}
