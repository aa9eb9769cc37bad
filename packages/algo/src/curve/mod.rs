//! Payout Curve
//!
//! Samples the effective payout (percent of target) across the rating
//! range for a given normalization factor, and computes the factor reference
//! teams would see. Useful for explaining the curve to managers before any
//! real ratings exist.

use serde::{Deserialize, Serialize};

use crate::multiplier::performance_multiplier;
use crate::sanitize::{validate_params, EngineError};
use crate::types::{CalculationParams, RATING_MAX, RATING_MIN};

/// Minimum number of sampled points (both range ends)
pub const MIN_CURVE_POINTS: usize = 2;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurvePoint {
    pub rating: f64,
    pub multiplier: f64,
    /// multiplier × factor × 100
    pub payout_percent: f64,
}

/// Named reference team
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub name: String,
    pub description: String,
    pub ratings: Vec<f64>,
}

impl Scenario {
    fn new(name: &str, description: &str, ratings: Vec<f64>) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            ratings,
        }
    }
}

/// Evenly spaced points over [0, 200]. `points` below 2 is raised to 2.
pub fn payout_curve(
    params: &CalculationParams,
    normalization_factor: f64,
    points: usize,
) -> Result<Vec<CurvePoint>, EngineError> {
    validate_params(params)?;

    let points = points.max(MIN_CURVE_POINTS);
    let step = (RATING_MAX - RATING_MIN) / (points - 1) as f64;

    (0..points)
        .map(|i| {
            // Pin the last point so rounding never lands past the range.
            let rating = if i == points - 1 {
                RATING_MAX
            } else {
                RATING_MIN + step * i as f64
            };
            let multiplier = params.multiplier(rating)?;
            Ok(CurvePoint {
                rating,
                multiplier,
                payout_percent: multiplier * normalization_factor * 100.0,
            })
        })
        .collect()
}

/// Normalization factor of a team with equal targets and these ratings.
///
/// Returns 1.0 when the multipliers sum to zero (or there are no ratings).
pub fn scenario_normalization(
    ratings: &[f64],
    params: &CalculationParams,
) -> Result<f64, EngineError> {
    let mut total = 0.0;
    for &rating in ratings {
        total += performance_multiplier(rating, params.upside_exponent, params.downside_exponent)?;
    }

    if total > 0.0 {
        Ok(ratings.len() as f64 / total)
    } else {
        Ok(1.0)
    }
}

pub fn standard_scenarios() -> Vec<Scenario> {
    vec![
        Scenario::new("All Average", "Everyone at target", vec![100.0; 10]),
        Scenario::new("High Performing Team", "Everyone at 120%", vec![120.0; 10]),
        Scenario::new("Low Performing Team", "Everyone at 80%", vec![80.0; 10]),
        Scenario::new(
            "Balanced Team",
            "Typical team with three stars",
            vec![50.0, 80.0, 90.0, 95.0, 100.0, 100.0, 105.0, 140.0, 160.0, 180.0],
        ),
        Scenario::new(
            "Bimodal",
            "Two clusters, stars and strugglers",
            vec![60.0, 65.0, 70.0, 75.0, 80.0, 130.0, 135.0, 140.0, 145.0, 150.0],
        ),
        Scenario::new(
            "Top Heavy",
            "Most of the team above target",
            vec![95.0, 100.0, 105.0, 110.0, 120.0, 125.0, 130.0, 135.0, 140.0, 150.0],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curve_endpoints_and_spacing() {
        let curve = payout_curve(&CalculationParams::default(), 1.0, 5).unwrap();
        let ratings: Vec<f64> = curve.iter().map(|p| p.rating).collect();
        assert_eq!(ratings, vec![0.0, 50.0, 100.0, 150.0, 200.0]);
        assert_eq!(curve[0].payout_percent, 0.0);
        assert_eq!(curve[2].payout_percent, 100.0);
    }

    #[test]
    fn test_curve_scales_with_factor() {
        let curve = payout_curve(&CalculationParams::default(), 0.5, 3).unwrap();
        assert!((curve[1].payout_percent - 50.0).abs() < 1e-12);
        assert!((curve[2].payout_percent - 2f64.powf(1.35) * 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_curve_minimum_points() {
        let curve = payout_curve(&CalculationParams::default(), 1.0, 0).unwrap();
        assert_eq!(curve.len(), MIN_CURVE_POINTS);
        assert_eq!(curve[1].rating, RATING_MAX);
    }

    #[test]
    fn test_curve_rejects_bad_params() {
        assert!(payout_curve(&CalculationParams::new(-1.0, 1.9), 1.0, 10).is_err());
    }

    #[test]
    fn test_scenario_normalization_reference_teams() {
        let params = CalculationParams::default();
        let average = scenario_normalization(&[100.0; 10], &params).unwrap();
        assert!((average - 1.0).abs() < 1e-12);

        let high = scenario_normalization(&[120.0; 10], &params).unwrap();
        let low = scenario_normalization(&[80.0; 10], &params).unwrap();
        assert!(high < 1.0);
        assert!(low > 1.0);
        assert!((high - 1.0 / 1.2f64.powf(1.35)).abs() < 1e-12);
    }

    #[test]
    fn test_scenario_normalization_degenerate() {
        let params = CalculationParams::default();
        assert_eq!(scenario_normalization(&[], &params).unwrap(), 1.0);
        assert_eq!(scenario_normalization(&[0.0, 0.0], &params).unwrap(), 1.0);
    }

    #[test]
    fn test_standard_scenarios() {
        let scenarios = standard_scenarios();
        assert_eq!(scenarios.len(), 6);
        assert!(scenarios.iter().all(|s| s.ratings.len() == 10));
        let params = CalculationParams::default();
        for scenario in &scenarios {
            let factor = scenario_normalization(&scenario.ratings, &params).unwrap();
            assert!(factor.is_finite() && factor > 0.0, "{}", scenario.name);
        }
    }
}
