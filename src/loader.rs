//! One-time load of the dataset: fetch or read, then parse.

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::fetch::{BasicClient, fetch_text};
use crate::parser::parse_records;
use crate::record::VehicleRecord;

/// Loads vehicle records from a local file path or an HTTP(S) URL.
///
/// This is the only asynchronous boundary in the crate. Once the records are
/// materialized, everything downstream is synchronous and pure.
#[tracing::instrument(fields(source = %source))]
pub async fn load_records(source: &str) -> Result<Vec<VehicleRecord>> {
    let csv_text = if source.starts_with("http") {
        let client = BasicClient::new();
        fetch_text(&client, source).await?
    } else {
        std::fs::read_to_string(source)
            .with_context(|| format!("failed to read dataset file {source}"))?
    };

    debug!(bytes = csv_text.len(), "Dataset text loaded, parsing");
    let records = parse_records(&csv_text)?;
    info!(record_count = records.len(), "Dataset loaded");

    Ok(records)
}
