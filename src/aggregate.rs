//! The aggregation engine: pure transforms from a record slice to summary
//! structures.
//!
//! Every operation is stateless and synchronous; identical input produces
//! identical output and the input is never mutated. Records with a missing or
//! invalid value for the grouped field are silently excluded, never counted
//! under a placeholder key.

use serde::Serialize;
use std::collections::HashMap;

/// One entry of a ranked categorical distribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountEntry {
    pub key: String,
    pub count: usize,
}

/// Per-bucket numeric summary produced by [`numeric_bucket_summary`].
///
/// `count` is always at least 1; buckets with no valid values are never
/// emitted.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketSummary {
    pub bucket: f64,
    pub min: f64,
    pub max: f64,
    pub count: usize,
    sum: f64,
}

impl BucketSummary {
    /// Unrounded mean of the bucket's values.
    pub fn average(&self) -> f64 {
        self.sum / self.count as f64
    }

    /// Mean rounded to the nearest integer, the form the dashboard displays.
    pub fn display_average(&self) -> i64 {
        self.average().round() as i64
    }
}

/// Counts records per extracted key, skipping records whose key is absent or
/// empty.
///
/// The sum of the returned counts equals the number of records with a
/// non-empty key. Key order is unspecified; consumers sort afterward.
pub fn group_count<R, K>(records: &[R], key_fn: K) -> HashMap<String, usize>
where
    K: Fn(&R) -> Option<&str>,
{
    let mut counts = HashMap::new();

    for record in records {
        if let Some(key) = key_fn(record) {
            if !key.is_empty() {
                *counts.entry(key.to_string()).or_insert(0) += 1;
            }
        }
    }

    counts
}

/// Ranks a distribution by count descending and truncates to the first `n`.
///
/// Ties are broken by key ascending so rankings are deterministic across runs.
/// `n = 0` yields an empty vector; `n` beyond the number of distinct keys
/// returns every entry.
pub fn top_n(dist: &HashMap<String, usize>, n: usize) -> Vec<CountEntry> {
    if n == 0 {
        return Vec::new();
    }

    let mut entries: Vec<CountEntry> = dist
        .iter()
        .map(|(key, count)| CountEntry {
            key: key.clone(),
            count: *count,
        })
        .collect();

    entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.key.cmp(&b.key)));
    entries.truncate(n);

    entries
}

/// Accumulates min, max, sum, and count of `value_fn` per `bucket_fn` bucket.
///
/// A record participates only when both closures return a finite number;
/// domain thresholds (e.g. "range must be positive") belong in `value_fn`,
/// which opts a record out by returning `None`. Output is sorted ascending by
/// bucket key. No valid records yields an empty vector, not an error.
pub fn numeric_bucket_summary<R, B, V>(
    records: &[R],
    bucket_fn: B,
    value_fn: V,
) -> Vec<BucketSummary>
where
    B: Fn(&R) -> Option<f64>,
    V: Fn(&R) -> Option<f64>,
{
    let mut buckets: HashMap<u64, BucketSummary> = HashMap::new();

    for record in records {
        let (Some(bucket), Some(value)) = (bucket_fn(record), value_fn(record)) else {
            continue;
        };
        if !bucket.is_finite() || !value.is_finite() {
            continue;
        }

        // Collapse -0.0 so it shares a bucket with 0.0
        let bucket = if bucket == 0.0 { 0.0 } else { bucket };

        let entry = buckets.entry(bucket.to_bits()).or_insert(BucketSummary {
            bucket,
            min: value,
            max: value,
            count: 0,
            sum: 0.0,
        });

        entry.min = entry.min.min(value);
        entry.max = entry.max.max(value);
        entry.sum += value;
        entry.count += 1;
    }

    let mut summaries: Vec<BucketSummary> = buckets.into_values().collect();
    summaries.sort_by(|a, b| a.bucket.total_cmp(&b.bucket));

    summaries
}

/// Nearest-integer percentage of `count` out of `total`.
///
/// Defined as `0` when `total == 0`; an empty dataset reads as 0%, never a
/// division fault.
pub fn percentage_of(count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (count as f64 / total as f64 * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::VehicleRecord;

    fn sample_records() -> Vec<VehicleRecord> {
        vec![
            VehicleRecord {
                make: Some("Tesla".to_string()),
                model_year: Some(2020),
                electric_range: Some(250),
                ev_type: Some("BEV".to_string()),
                ..Default::default()
            },
            VehicleRecord {
                make: Some("Tesla".to_string()),
                model_year: Some(2021),
                electric_range: Some(0),
                ev_type: Some("BEV".to_string()),
                ..Default::default()
            },
            VehicleRecord {
                make: Some("Nissan".to_string()),
                model_year: Some(2020),
                electric_range: Some(150),
                ev_type: Some("BEV".to_string()),
                ..Default::default()
            },
        ]
    }

    #[test]
    fn test_group_count_by_make() {
        let records = sample_records();
        let counts = group_count(&records, |r| r.make.as_deref());

        assert_eq!(counts.len(), 2);
        assert_eq!(counts["Tesla"], 2);
        assert_eq!(counts["Nissan"], 1);
    }

    #[test]
    fn test_group_count_sum_matches_records_with_key() {
        let mut records = sample_records();
        records.push(VehicleRecord::default()); // no make
        records.push(VehicleRecord {
            make: Some(String::new()), // empty counts as absent
            ..Default::default()
        });

        let counts = group_count(&records, |r| r.make.as_deref());
        let total: usize = counts.values().sum();
        let with_key = records
            .iter()
            .filter(|r| r.make.as_deref().is_some_and(|m| !m.is_empty()))
            .count();

        assert_eq!(total, with_key);
        assert_eq!(total, 3);
    }

    #[test]
    fn test_group_count_empty_input() {
        let records: Vec<VehicleRecord> = Vec::new();
        assert!(group_count(&records, |r| r.make.as_deref()).is_empty());
    }

    #[test]
    fn test_top_n_orders_by_count_then_key() {
        let dist = HashMap::from([
            ("Tesla".to_string(), 5),
            ("Nissan".to_string(), 2),
            ("Chevrolet".to_string(), 2),
            ("Ford".to_string(), 1),
        ]);

        let ranked = top_n(&dist, 3);
        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].key, "Tesla");
        assert_eq!(ranked[0].count, 5);
        // tie at 2 broken by key ascending
        assert_eq!(ranked[1].key, "Chevrolet");
        assert_eq!(ranked[2].key, "Nissan");
    }

    #[test]
    fn test_top_n_larger_than_distinct_keys() {
        let dist = HashMap::from([("Tesla".to_string(), 5), ("Nissan".to_string(), 2)]);
        assert_eq!(top_n(&dist, 100).len(), 2);
    }

    #[test]
    fn test_top_n_zero_and_empty() {
        let dist = HashMap::from([("Tesla".to_string(), 5)]);
        assert!(top_n(&dist, 0).is_empty());
        assert!(top_n(&HashMap::new(), 5).is_empty());
    }

    #[test]
    fn test_top_n_single_entry_matches_scenario() {
        let records = sample_records();
        let counts = group_count(&records, |r| r.make.as_deref());
        let ranked = top_n(&counts, 1);

        assert_eq!(
            ranked,
            vec![CountEntry {
                key: "Tesla".to_string(),
                count: 2,
            }]
        );
    }

    #[test]
    fn test_bucket_summary_excludes_invalid_values() {
        let records = sample_records();
        let summaries = numeric_bucket_summary(
            &records,
            |r| r.model_year.map(f64::from),
            |r| r.positive_range().map(f64::from),
        );

        // 2021 is excluded entirely: its only record has range 0
        assert_eq!(summaries.len(), 1);
        let bucket = &summaries[0];
        assert_eq!(bucket.bucket, 2020.0);
        assert_eq!(bucket.min, 150.0);
        assert_eq!(bucket.max, 250.0);
        assert_eq!(bucket.count, 2);
        assert_eq!(bucket.average(), 200.0);
        assert_eq!(bucket.display_average(), 200);
    }

    #[test]
    fn test_bucket_summary_sorted_ascending_and_bounds_hold() {
        let records = vec![
            VehicleRecord {
                model_year: Some(2022),
                electric_range: Some(300),
                ..Default::default()
            },
            VehicleRecord {
                model_year: Some(2018),
                electric_range: Some(100),
                ..Default::default()
            },
            VehicleRecord {
                model_year: Some(2018),
                electric_range: Some(220),
                ..Default::default()
            },
        ];

        let summaries = numeric_bucket_summary(
            &records,
            |r| r.model_year.map(f64::from),
            |r| r.positive_range().map(f64::from),
        );

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].bucket, 2018.0);
        assert_eq!(summaries[1].bucket, 2022.0);
        for bucket in &summaries {
            assert!(bucket.count > 0);
            assert!(bucket.min <= bucket.average());
            assert!(bucket.average() <= bucket.max);
        }
    }

    #[test]
    fn test_bucket_summary_empty_input() {
        let records: Vec<VehicleRecord> = Vec::new();
        let summaries = numeric_bucket_summary(
            &records,
            |r| r.model_year.map(f64::from),
            |r| r.positive_range().map(f64::from),
        );
        assert!(summaries.is_empty());
    }

    #[test]
    fn test_percentage_of() {
        assert_eq!(percentage_of(5, 0), 0);
        assert_eq!(percentage_of(0, 10), 0);
        assert_eq!(percentage_of(5, 10), 50);
        assert_eq!(percentage_of(2, 3), 67);
        assert_eq!(percentage_of(10, 10), 100);
    }

    #[test]
    fn test_aggregations_are_idempotent() {
        let records = sample_records();
        let before = records.clone();

        let first = group_count(&records, |r| r.make.as_deref());
        let second = group_count(&records, |r| r.make.as_deref());
        assert_eq!(first, second);

        let first = numeric_bucket_summary(
            &records,
            |r| r.model_year.map(f64::from),
            |r| r.positive_range().map(f64::from),
        );
        let second = numeric_bucket_summary(
            &records,
            |r| r.model_year.map(f64::from),
            |r| r.positive_range().map(f64::from),
        );
        assert_eq!(first, second);

        // input is untouched
        assert_eq!(records, before);
    }
}
