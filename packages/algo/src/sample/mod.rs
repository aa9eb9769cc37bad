//! Synthetic Team Generator
//!
//! Deterministic sample employees for demos, benchmarks and property tests.
//! Same options (including seed) always produce the same team.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::types::{EmployeeRecord, RATING_MAX, RATING_MIN};

/// Annual bonus target as a percent of base pay
const TARGET_PERCENTS: [f64; 4] = [10.0, 12.0, 15.0, 20.0];

/// Base pay band (accounting currency)
const BASE_PAY_MIN: f64 = 90_000.0;
const BASE_PAY_MAX: f64 = 220_000.0;

/// Ratings are rounded to this step, like calibrated review scores
const RATING_STEP: f64 = 5.0;

/// Chance of a standout (or struggling) rating outside the main cluster
const OUTLIER_PROBABILITY: f64 = 0.1;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SampleTeamOptions {
    /// Number of employees
    pub size: usize,
    /// Number of groups; 0 or 1 leaves everyone in the implicit group
    pub groups: usize,
    pub seed: u64,
    /// Fraction of employees left unrated, clamped to [0, 1]
    pub unrated_ratio: f64,
}

impl Default for SampleTeamOptions {
    fn default() -> Self {
        Self {
            size: 12,
            groups: 1,
            seed: 42,
            unrated_ratio: 0.0,
        }
    }
}

/// Label for the n-th group: "Team A", "Team B", ... then "Team 27", ...
pub fn group_label(index: usize) -> String {
    if index < 26 {
        format!("Team {}", (b'A' + index as u8) as char)
    } else {
        format!("Team {}", index + 1)
    }
}

fn sample_rating(rng: &mut ChaCha8Rng) -> f64 {
    let raw = if rng.gen_bool(OUTLIER_PROBABILITY) {
        rng.gen_range(RATING_MIN..=RATING_MAX)
    } else {
        // Triangular around 100, spanning 40..160
        100.0 + (rng.gen::<f64>() + rng.gen::<f64>() - 1.0) * 60.0
    };
    ((raw / RATING_STEP).round() * RATING_STEP).clamp(RATING_MIN, RATING_MAX)
}

pub fn generate_team(options: &SampleTeamOptions) -> Vec<EmployeeRecord> {
    let mut rng = ChaCha8Rng::seed_from_u64(options.seed);
    let unrated_ratio = if options.unrated_ratio.is_finite() {
        options.unrated_ratio.clamp(0.0, 1.0)
    } else {
        0.0
    };

    (0..options.size)
        .map(|i| {
            let base_pay = rng.gen_range(BASE_PAY_MIN..BASE_PAY_MAX);
            let percent = TARGET_PERCENTS.choose(&mut rng).copied().unwrap_or(10.0);
            let target = (base_pay * percent / 100.0).round();

            let mut employee = EmployeeRecord::new(format!("EMP{:04}", i + 1), target);
            if !rng.gen_bool(unrated_ratio) {
                employee.rating = Some(sample_rating(&mut rng));
            }
            if options.groups > 1 {
                employee.group = Some(group_label(i % options.groups));
            }
            employee
        })
        .collect()
}
