//! Dashboard-level aggregations built on the engine.
//!
//! Each function corresponds to one chart or tile group of the dashboard.
//! UI-selectable knobs (top-N sizes) are parameters, not ambient state, so the
//! same records always produce the same report.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

use crate::aggregate::{
    CountEntry, group_count, numeric_bucket_summary, percentage_of, top_n,
};
use crate::record::VehicleRecord;

/// Full dataset label for battery-electric vehicles.
pub const BEV_LABEL: &str = "Battery Electric Vehicle (BEV)";
/// Full dataset label for plug-in hybrids.
pub const PHEV_LABEL: &str = "Plug-in Hybrid Electric Vehicle (PHEV)";

/// Top-N sizes the dashboard starts with.
pub const DEFAULT_TOP_MAKES: usize = 10;
pub const DEFAULT_TOP_COUNTIES: usize = 15;

/// Summary tile numbers for the whole dataset.
#[derive(Debug, Default, Serialize, PartialEq)]
pub struct DatasetSummary {
    pub total_vehicles: usize,
    pub distinct_makes: usize,
    pub distinct_models: usize,
    pub distinct_counties: usize,
    /// Average electric range over records with a positive range, rounded to
    /// the nearest mile; 0 when no record qualifies.
    pub average_range: i64,
    pub most_recent_year: Option<i32>,
    pub bev_count: usize,
    pub phev_count: usize,
}

impl DatasetSummary {
    pub fn from_records(records: &[VehicleRecord]) -> Self {
        let mut range_sum = 0i64;
        let mut range_count = 0usize;
        let mut bev_count = 0;
        let mut phev_count = 0;
        let mut most_recent_year: Option<i32> = None;

        for record in records {
            if let Some(range) = record.positive_range() {
                range_sum += i64::from(range);
                range_count += 1;
            }

            match record.ev_type.as_deref() {
                Some(BEV_LABEL) => bev_count += 1,
                Some(PHEV_LABEL) => phev_count += 1,
                _ => {}
            }

            if let Some(year) = record.model_year {
                most_recent_year = Some(most_recent_year.map_or(year, |y| y.max(year)));
            }
        }

        let average_range = if range_count == 0 {
            0
        } else {
            (range_sum as f64 / range_count as f64).round() as i64
        };

        DatasetSummary {
            total_vehicles: records.len(),
            distinct_makes: group_count(records, |r| r.make.as_deref()).len(),
            distinct_models: group_count(records, |r| r.model.as_deref()).len(),
            distinct_counties: group_count(records, |r| r.county.as_deref()).len(),
            average_range,
            most_recent_year,
            bev_count,
            phev_count,
        }
    }
}

/// One slice of the EV type pie chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeShare {
    pub label: String,
    pub count: usize,
    /// Nearest-integer share of all typed records; 0 for an empty dataset.
    pub percentage: u32,
}

/// Vehicles registered per model year, for the adoption line chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearCount {
    pub year: i32,
    pub count: usize,
}

/// Electric range summary per model year, for the range scatter chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RangeByYear {
    pub year: i32,
    pub min_range: i64,
    pub max_range: i64,
    /// Rounded for display; the unrounded mean stays available through
    /// [`crate::aggregate::BucketSummary::average`].
    pub average_range: i64,
    pub count: usize,
}

/// Top-N manufacturers by registration count.
pub fn make_distribution(records: &[VehicleRecord], n: usize) -> Vec<CountEntry> {
    top_n(&group_count(records, |r| r.make.as_deref()), n)
}

/// Top-N counties by registration count.
pub fn county_distribution(records: &[VehicleRecord], n: usize) -> Vec<CountEntry> {
    top_n(&group_count(records, |r| r.county.as_deref()), n)
}

/// Every EV type with its count and percentage share, largest first.
pub fn type_distribution(records: &[VehicleRecord]) -> Vec<TypeShare> {
    let counts = group_count(records, |r| r.ev_type.as_deref());
    let total: usize = counts.values().sum();

    top_n(&counts, counts.len())
        .into_iter()
        .map(|entry| TypeShare {
            percentage: percentage_of(entry.count, total),
            count: entry.count,
            label: entry.key,
        })
        .collect()
}

/// Vehicle counts per model year, ascending. Records without a year are
/// excluded, never bucketed under a placeholder.
pub fn model_year_distribution(records: &[VehicleRecord]) -> Vec<YearCount> {
    let mut counts: HashMap<i32, usize> = HashMap::new();
    for record in records {
        if let Some(year) = record.model_year {
            *counts.entry(year).or_insert(0) += 1;
        }
    }

    let mut years: Vec<YearCount> = counts
        .into_iter()
        .map(|(year, count)| YearCount { year, count })
        .collect();
    years.sort_by_key(|y| y.year);

    years
}

/// Min, max, and average electric range per model year, ascending by year.
///
/// A record participates only with both a model year and a positive range, so
/// a year whose records all have unreported ranges is absent from the output.
pub fn range_by_model_year(records: &[VehicleRecord]) -> Vec<RangeByYear> {
    numeric_bucket_summary(
        records,
        |r| r.model_year.map(f64::from),
        |r| r.positive_range().map(f64::from),
    )
    .into_iter()
    .map(|bucket| RangeByYear {
        year: bucket.bucket as i32,
        min_range: bucket.min as i64,
        max_range: bucket.max as i64,
        average_range: bucket.display_average(),
        count: bucket.count,
    })
    .collect()
}

/// Complete dashboard payload, serialized to JSON for the presentation layer.
#[derive(Debug, Serialize)]
pub struct DashboardReport {
    pub generated_at: DateTime<Utc>,
    pub summary: DatasetSummary,
    pub top_makes: Vec<CountEntry>,
    pub type_shares: Vec<TypeShare>,
    pub adoption_by_year: Vec<YearCount>,
    pub range_by_year: Vec<RangeByYear>,
    pub top_counties: Vec<CountEntry>,
}

impl DashboardReport {
    pub fn build(records: &[VehicleRecord], makes_n: usize, counties_n: usize) -> Self {
        DashboardReport {
            generated_at: Utc::now(),
            summary: DatasetSummary::from_records(records),
            top_makes: make_distribution(records, makes_n),
            type_shares: type_distribution(records),
            adoption_by_year: model_year_distribution(records),
            range_by_year: range_by_model_year(records),
            top_counties: county_distribution(records, counties_n),
        }
    }
}
