//! Rating analytics: distribution buckets, calibration against suggested
//! ranges, and per-group averages. Only rated employees are counted.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::EmployeeRecord;

/// Distribution bucket labels with inclusive upper bounds
const DISTRIBUTION_BUCKETS: [(&str, f64); 5] = [
    ("0-50", 50.0),
    ("51-80", 80.0),
    ("81-100", 100.0),
    ("101-130", 130.0),
    ("131-200", f64::INFINITY),
];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingBucket {
    pub label: String,
    pub count: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingDistribution {
    pub buckets: Vec<RatingBucket>,
    pub total_rated: usize,
}

/// Calibration band status
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalibrationStatus {
    /// Share within the suggested range
    Good,
    /// Outside the range but within 10 points of its midpoint
    Warning,
    Alert,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalibrationBand {
    pub band: String,
    pub count: usize,
    /// Share of rated employees, percent rounded to one decimal
    pub percentage: f64,
    pub suggested_min: f64,
    pub suggested_max: f64,
    pub suggested_mid: f64,
    /// percentage - suggested_mid
    pub delta: f64,
    pub within_range: bool,
    pub status: CalibrationStatus,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalibrationReport {
    pub bands: Vec<CalibrationBand>,
    pub total_rated: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupAverage {
    pub group: Option<String>,
    pub rated_count: usize,
    /// Rounded to one decimal
    pub average_rating: f64,
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn ratings(employees: &[EmployeeRecord]) -> impl Iterator<Item = f64> + '_ {
    employees.iter().filter_map(|e| e.rating)
}

pub fn rating_distribution(employees: &[EmployeeRecord]) -> RatingDistribution {
    let mut counts = [0usize; DISTRIBUTION_BUCKETS.len()];
    let mut total_rated = 0;

    for rating in ratings(employees) {
        total_rated += 1;
        if let Some(idx) = DISTRIBUTION_BUCKETS
            .iter()
            .position(|(_, upper)| rating <= *upper)
        {
            counts[idx] += 1;
        }
    }

    RatingDistribution {
        buckets: DISTRIBUTION_BUCKETS
            .iter()
            .zip(counts)
            .map(|((label, _), count)| RatingBucket {
                label: (*label).to_string(),
                count,
            })
            .collect(),
        total_rated,
    }
}

/// Band a rating falls in: (>120, >=90, >=60, rest)
fn calibration_band(rating: f64) -> usize {
    if rating > 120.0 {
        0
    } else if rating >= 90.0 {
        1
    } else if rating >= 60.0 {
        2
    } else {
        3
    }
}

pub fn calibration_report(employees: &[EmployeeRecord]) -> CalibrationReport {
    // (name, suggested min %, suggested max %)
    const BANDS: [(&str, f64, f64); 4] = [
        ("above_120", 10.0, 20.0),
        ("90_to_120", 60.0, 80.0),
        ("60_to_90", 5.0, 15.0),
        ("below_60", 2.0, 5.0),
    ];

    let mut counts = [0usize; BANDS.len()];
    let mut total_rated = 0;
    for rating in ratings(employees) {
        total_rated += 1;
        counts[calibration_band(rating)] += 1;
    }

    let bands = BANDS
        .iter()
        .zip(counts)
        .map(|(&(band, suggested_min, suggested_max), count)| {
            let percentage = if total_rated > 0 {
                round1(count as f64 / total_rated as f64 * 100.0)
            } else {
                0.0
            };
            let suggested_mid = (suggested_min + suggested_max) / 2.0;
            let delta = percentage - suggested_mid;
            let within_range = (suggested_min..=suggested_max).contains(&percentage);
            let status = if within_range {
                CalibrationStatus::Good
            } else if delta.abs() <= 10.0 {
                CalibrationStatus::Warning
            } else {
                CalibrationStatus::Alert
            };

            CalibrationBand {
                band: band.to_string(),
                count,
                percentage,
                suggested_min,
                suggested_max,
                suggested_mid,
                delta,
                within_range,
                status,
            }
        })
        .collect();

    CalibrationReport { bands, total_rated }
}

pub fn group_averages(employees: &[EmployeeRecord]) -> Vec<GroupAverage> {
    let mut sums: BTreeMap<Option<&str>, (f64, usize)> = BTreeMap::new();
    for employee in employees {
        if let Some(rating) = employee.rating {
            let entry = sums.entry(employee.group.as_deref()).or_insert((0.0, 0));
            entry.0 += rating;
            entry.1 += 1;
        }
    }

    sums.into_iter()
        .map(|(group, (sum, count))| GroupAverage {
            group: group.map(str::to_string),
            rated_count: count,
            average_rating: round1(sum / count as f64),
        })
        .collect()
}
