//! Performance Multiplier
//!
//! Split power curve mapping a rating (percent of expectation) to a
//! dimensionless multiplier:
//!
//! - `r = rating / 100`
//! - `r >= 1`: `r ^ upside_exponent`
//! - `r < 1`: `r ^ downside_exponent`
//!
//! Both branches meet at `r == 1`, so the curve is continuous at 100%
//! whatever the exponents are. A zero rating gives a zero multiplier.

use crate::sanitize::{EngineError, Field};
use crate::types::{CalculationParams, TARGET_RATING};

/// Computes the curve multiplier for one rating.
///
/// Negative or non-finite ratings and non-positive exponents are rejected
/// rather than clamped.
pub fn performance_multiplier(
    rating: f64,
    upside_exponent: f64,
    downside_exponent: f64,
) -> Result<f64, EngineError> {
    if !rating.is_finite() || rating < 0.0 {
        return Err(EngineError::InvalidParameter {
            field: Field::Rating,
            value: rating,
        });
    }
    if !upside_exponent.is_finite() || upside_exponent <= 0.0 {
        return Err(EngineError::InvalidParameter {
            field: Field::UpsideExponent,
            value: upside_exponent,
        });
    }
    if !downside_exponent.is_finite() || downside_exponent <= 0.0 {
        return Err(EngineError::InvalidParameter {
            field: Field::DownsideExponent,
            value: downside_exponent,
        });
    }

    Ok(curve(rating, upside_exponent, downside_exponent))
}

/// Curve evaluation for inputs already validated at the boundary
pub(crate) fn curve(rating: f64, upside_exponent: f64, downside_exponent: f64) -> f64 {
    let r = rating / TARGET_RATING;
    if r >= 1.0 {
        r.powf(upside_exponent)
    } else {
        r.powf(downside_exponent)
    }
}

impl CalculationParams {
    /// Multiplier for `rating` under these parameters
    pub fn multiplier(&self, rating: f64) -> Result<f64, EngineError> {
        performance_multiplier(rating, self.upside_exponent, self.downside_exponent)
    }
}
