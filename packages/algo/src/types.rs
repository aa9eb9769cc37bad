//! Common Types and Constants
//!
//! Shared data structures used across the allocation modules.

use serde::{Deserialize, Serialize};

// ==================== Constants ====================

/// Default curve steepness for ratings at or above 100
pub const DEFAULT_UPSIDE_EXPONENT: f64 = 1.35;

/// Default curve steepness for ratings below 100
pub const DEFAULT_DOWNSIDE_EXPONENT: f64 = 1.9;

/// Lowest accepted rating (percent of expectation)
pub const RATING_MIN: f64 = 0.0;

/// Highest accepted rating (percent of expectation)
pub const RATING_MAX: f64 = 200.0;

/// Rating that means "fully met expectations"
pub const TARGET_RATING: f64 = 100.0;

/// Relative pool tolerance for conservation checks
pub const POOL_RELATIVE_TOLERANCE: f64 = 1e-6;

/// Smallest currency denomination (one cent)
pub const CURRENCY_EPSILON: f64 = 0.01;

// ==================== Input Types ====================

/// One employee as supplied by the data source
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRecord {
    /// Stable identifier
    pub id: String,
    /// Baseline bonus at 100% performance, already in the accounting currency
    #[serde(alias = "target")]
    pub bonus_target: f64,
    /// Percent of expectation in [0, 200]; `None` excludes the employee
    #[serde(default)]
    pub rating: Option<f64>,
    /// Immediate team label; `None` is the implicit single group
    #[serde(default)]
    pub group: Option<String>,
}

impl EmployeeRecord {
    pub fn new(id: impl Into<String>, bonus_target: f64) -> Self {
        Self {
            id: id.into(),
            bonus_target,
            rating: None,
            group: None,
        }
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn in_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Whether the employee takes part in allocation
    pub fn is_rated(&self) -> bool {
        self.rating.is_some()
    }
}

/// Calculation parameters, one set per invocation
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CalculationParams {
    /// Curve steepness for ratings >= 100 (must be > 0)
    pub upside_exponent: f64,
    /// Curve steepness for ratings < 100 (must be > 0)
    pub downside_exponent: f64,
    /// Signed delta applied to the pool before allocation
    pub budget_override: f64,
}

impl Default for CalculationParams {
    fn default() -> Self {
        Self {
            upside_exponent: DEFAULT_UPSIDE_EXPONENT,
            downside_exponent: DEFAULT_DOWNSIDE_EXPONENT,
            budget_override: 0.0,
        }
    }
}

impl CalculationParams {
    pub fn new(upside_exponent: f64, downside_exponent: f64) -> Self {
        Self {
            upside_exponent,
            downside_exponent,
            budget_override: 0.0,
        }
    }

    pub fn with_budget_override(mut self, budget_override: f64) -> Self {
        self.budget_override = budget_override;
        self
    }
}

// ==================== Output Types ====================

/// Per-employee allocation result
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BonusResult {
    pub id: String,
    pub group: Option<String>,
    /// Bonus target used for this calculation
    pub target: f64,
    pub rating: f64,
    /// Curve multiplier derived from the rating
    pub multiplier: f64,
    /// target × multiplier, before normalization
    pub raw_share: f64,
    pub final_bonus: f64,
    /// final_bonus / target × 100; `None` when the target is zero
    pub percent_of_target: Option<f64>,
}

/// Which normalization path produced the final bonuses
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalizationMode {
    /// Raw shares scaled by adjusted_pool / total_raw
    Curve,
    /// Every raw share was zero, the pool was split equally
    EqualSplit,
    /// Nobody was included
    Empty,
}

/// Summary of one allocation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationSummary {
    /// Sum of included targets
    pub base_pool: f64,
    /// base_pool + budget_override
    pub adjusted_pool: f64,
    /// Literal sum of final bonuses
    pub total_allocated: f64,
    pub normalization_factor: f64,
    pub included_count: usize,
    /// Records without a rating
    pub excluded_count: usize,
    /// Included employees whose target is zero
    pub zero_target_count: usize,
    pub normalization_mode: NormalizationMode,
}

impl CalculationSummary {
    /// True when the equal-split fallback replaced the curve
    pub fn used_fallback(&self) -> bool {
        self.normalization_mode == NormalizationMode::EqualSplit
    }

    /// Floating-point drift between the pool and what was handed out
    pub fn unallocated(&self) -> f64 {
        self.adjusted_pool - self.total_allocated
    }
}

/// Results and summary of one allocation call
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    pub results: Vec<BonusResult>,
    pub summary: CalculationSummary,
}

impl Allocation {
    pub fn into_parts(self) -> (Vec<BonusResult>, CalculationSummary) {
        (self.results, self.summary)
    }

    pub fn get(&self, id: &str) -> Option<&BonusResult> {
        self.results.iter().find(|r| r.id == id)
    }
}
