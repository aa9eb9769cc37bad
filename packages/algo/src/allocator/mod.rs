//! Bonus Allocator
//!
//! Allocates one group's pool:
//!
//! 1. Validate parameters and every rated record (the whole call fails on
//!    the first bad record)
//! 2. Partition into included (rated) and excluded (unrated)
//! 3. `base_pool = Σ target`, `adjusted_pool = base_pool + budget_override`
//! 4. `raw_share = target × multiplier(rating)`
//! 5. Normalize raw shares onto the adjusted pool
//! 6. `final_bonus = raw_share × factor`; a zero target always gets 0,
//!    including on the equal-split fallback
//!
//! `total_allocated` is the literal sum of final bonuses so that any
//! floating-point drift stays visible to callers.

use std::cmp::Ordering;

use crate::multiplier::curve;
use crate::normalizer::{normalize, Normalization};
use crate::sanitize::{has_invalid_values, validate_employees, validate_params, EngineError};
use crate::types::{
    Allocation, BonusResult, CalculationParams, CalculationSummary, EmployeeRecord,
    NormalizationMode,
};

/// Allocates the (adjusted) pool across the rated employees.
///
/// Results keep the input order of the included employees.
pub fn allocate(
    employees: &[EmployeeRecord],
    params: &CalculationParams,
) -> Result<Allocation, EngineError> {
    validate_params(params)?;
    validate_employees(employees)?;

    let included: Vec<(&EmployeeRecord, f64)> = employees
        .iter()
        .filter_map(|e| e.rating.map(|rating| (e, rating)))
        .collect();
    let excluded_count = employees.len() - included.len();

    let base_pool: f64 = included.iter().map(|(e, _)| e.bonus_target).sum();

    let multipliers: Vec<f64> = included
        .iter()
        .map(|(_, rating)| curve(*rating, params.upside_exponent, params.downside_exponent))
        .collect();
    let raw_shares: Vec<f64> = included
        .iter()
        .zip(&multipliers)
        .map(|((e, _), m)| e.bonus_target * m)
        .collect();

    let eligible: Vec<bool> = included.iter().map(|(e, _)| e.bonus_target > 0.0).collect();

    if has_invalid_values(&raw_shares) || !raw_shares.iter().sum::<f64>().is_finite() {
        return Err(EngineError::NonFiniteShares);
    }

    let (adjusted_pool, normalization) = if included.is_empty() {
        (0.0, Normalization::Empty)
    } else {
        let adjusted_pool = base_pool + params.budget_override;
        if !adjusted_pool.is_finite() {
            return Err(EngineError::NonFinitePool);
        }
        (adjusted_pool, normalize(adjusted_pool, &raw_shares, &eligible))
    };

    let results: Vec<BonusResult> = included
        .iter()
        .zip(multipliers.iter().zip(&raw_shares).zip(&eligible))
        .map(|((employee, rating), ((&multiplier, &raw_share), &eligible))| {
            let final_bonus = normalization.apply(raw_share, eligible);
            let percent_of_target = if employee.bonus_target > 0.0 {
                Some(final_bonus / employee.bonus_target * 100.0)
            } else {
                None
            };
            BonusResult {
                id: employee.id.clone(),
                group: employee.group.clone(),
                target: employee.bonus_target,
                rating: *rating,
                multiplier,
                raw_share,
                final_bonus,
                percent_of_target,
            }
        })
        .collect();

    let total_allocated: f64 = results.iter().map(|r| r.final_bonus).sum();
    let normalization_mode = match normalization {
        Normalization::Factor(_) => NormalizationMode::Curve,
        Normalization::EqualSplit { .. } => NormalizationMode::EqualSplit,
        Normalization::Empty => NormalizationMode::Empty,
    };

    let summary = CalculationSummary {
        base_pool: if included.is_empty() { 0.0 } else { base_pool },
        adjusted_pool,
        total_allocated,
        normalization_factor: normalization.factor(),
        included_count: included.len(),
        excluded_count,
        zero_target_count: included.iter().filter(|(e, _)| e.bonus_target == 0.0).count(),
        normalization_mode,
    };

    if summary.used_fallback() {
        tracing::warn!(
            included = summary.included_count,
            adjusted_pool = summary.adjusted_pool,
            eligible = eligible.iter().filter(|e| **e).count(),
            "all raw shares are zero, splitting pool equally"
        );
    }
    tracing::debug!(
        included = summary.included_count,
        excluded = summary.excluded_count,
        base_pool = summary.base_pool,
        adjusted_pool = summary.adjusted_pool,
        factor = summary.normalization_factor,
        drift = summary.unallocated(),
        "bonus pool allocated"
    );

    Ok(Allocation { results, summary })
}

/// Sorts results by final bonus, largest first; ties fall back to id.
pub fn sort_by_final_bonus(results: &mut [BonusResult]) {
    results.sort_by(|a, b| {
        b.final_bonus
            .partial_cmp(&a.final_bonus)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.id.cmp(&b.id))
    });
}
