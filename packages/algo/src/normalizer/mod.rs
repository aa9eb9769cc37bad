//! Pool Normalizer
//!
//! Finds the single scalar that rescales raw shares so they sum to the
//! adjusted pool. When the raw shares sum to zero the scalar is undefined
//! and the caller gets an explicit equal-split fallback instead. Only
//! eligible shares (employees with a positive target) take part in the
//! split; the rest receive nothing.

/// Outcome of normalizing one set of raw shares
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Normalization {
    /// Multiply every raw share by this factor
    Factor(f64),
    /// Raw shares sum to zero; every eligible employee gets `per_employee`
    EqualSplit { per_employee: f64 },
    /// No shares to normalize
    Empty,
}

impl Normalization {
    /// Factor reported in summaries (0 on the fallback paths)
    pub fn factor(&self) -> f64 {
        match self {
            Normalization::Factor(factor) => *factor,
            Normalization::EqualSplit { .. } | Normalization::Empty => 0.0,
        }
    }

    /// Final bonus for one raw share
    pub fn apply(&self, raw_share: f64, eligible: bool) -> f64 {
        match self {
            Normalization::Factor(factor) => raw_share * factor,
            Normalization::EqualSplit { per_employee } if eligible => *per_employee,
            Normalization::EqualSplit { .. } | Normalization::Empty => 0.0,
        }
    }
}

/// `adjusted_pool / sum(raw_shares)`, or `None` when the sum is not positive.
///
/// A negative pool yields a negative factor; that is allowed.
pub fn normalization_factor(adjusted_pool: f64, raw_shares: &[f64]) -> Option<f64> {
    let total_raw: f64 = raw_shares.iter().sum();
    if total_raw > 0.0 {
        let factor = adjusted_pool / total_raw;
        // Denormal totals can push the quotient to infinity.
        factor.is_finite().then_some(factor)
    } else {
        None
    }
}

/// Normalizes raw shares, falling back to an equal split of the pool across
/// the eligible entries of `eligible` (one flag per raw share).
///
/// With no eligible entry the split pays nobody and the pool stays
/// unallocated.
pub fn normalize(adjusted_pool: f64, raw_shares: &[f64], eligible: &[bool]) -> Normalization {
    debug_assert_eq!(raw_shares.len(), eligible.len());
    if raw_shares.is_empty() {
        return Normalization::Empty;
    }

    match normalization_factor(adjusted_pool, raw_shares) {
        Some(factor) => Normalization::Factor(factor),
        None => {
            let eligible_count = eligible.iter().filter(|e| **e).count();
            let per_employee = if eligible_count > 0 {
                adjusted_pool / eligible_count as f64
            } else {
                0.0
            };
            Normalization::EqualSplit { per_employee }
        }
    }
}
