//! Input Validation
//!
//! Boundary checks that run before any curve or normalization math.
//!
//! Functions:
//! - Non-finite value detection
//! - Parameter and employee record validation
//! - Pool tolerance helpers

use std::collections::HashSet;
use std::fmt;

use crate::types::{
    CalculationParams, EmployeeRecord, CURRENCY_EPSILON, POOL_RELATIVE_TOLERANCE, RATING_MAX,
    RATING_MIN,
};

/// Field that failed validation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Id,
    BonusTarget,
    Rating,
    UpsideExponent,
    DownsideExponent,
    BudgetOverride,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::BonusTarget => "bonusTarget",
            Field::Rating => "rating",
            Field::UpsideExponent => "upsideExponent",
            Field::DownsideExponent => "downsideExponent",
            Field::BudgetOverride => "budgetOverride",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error("employee {employee_id}: bonus target must be finite and non-negative, got {value}")]
    InvalidTarget { employee_id: String, value: f64 },
    #[error("employee {employee_id}: rating must be finite and within [0, 200], got {value}")]
    InvalidRating { employee_id: String, value: f64 },
    #[error("duplicate employee id: {0}")]
    DuplicateId(String),
    #[error("invalid parameter {field}: {value}")]
    InvalidParameter { field: Field, value: f64 },
    #[error("raw shares overflowed to a non-finite total")]
    NonFiniteShares,
    #[error("bonus pool overflowed to a non-finite value")]
    NonFinitePool,
}

impl EngineError {
    /// Offending employee, when the failure is tied to one record
    pub fn employee_id(&self) -> Option<&str> {
        match self {
            EngineError::InvalidTarget { employee_id, .. }
            | EngineError::InvalidRating { employee_id, .. } => Some(employee_id),
            EngineError::DuplicateId(id) => Some(id),
            EngineError::InvalidParameter { .. }
            | EngineError::NonFiniteShares
            | EngineError::NonFinitePool => None,
        }
    }

    pub fn field(&self) -> Option<Field> {
        match self {
            EngineError::InvalidTarget { .. } => Some(Field::BonusTarget),
            EngineError::InvalidRating { .. } => Some(Field::Rating),
            EngineError::DuplicateId(_) => Some(Field::Id),
            EngineError::InvalidParameter { field, .. } => Some(*field),
            EngineError::NonFiniteShares | EngineError::NonFinitePool => None,
        }
    }
}

/// 检查数组是否包含无效值 (NaN 或 Inf)
pub fn has_invalid_values(arr: &[f64]) -> bool {
    arr.iter().any(|&x| x.is_nan() || x.is_infinite())
}

fn check_exponent(field: Field, value: f64) -> Result<(), EngineError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(EngineError::InvalidParameter { field, value })
    }
}

/// Exponents must be finite and positive, the override finite.
pub fn validate_params(params: &CalculationParams) -> Result<(), EngineError> {
    check_exponent(Field::UpsideExponent, params.upside_exponent)?;
    check_exponent(Field::DownsideExponent, params.downside_exponent)?;
    if !params.budget_override.is_finite() {
        return Err(EngineError::InvalidParameter {
            field: Field::BudgetOverride,
            value: params.budget_override,
        });
    }
    Ok(())
}

/// Validates one included employee. Unrated records are not checked.
pub fn validate_employee(employee: &EmployeeRecord) -> Result<(), EngineError> {
    let Some(rating) = employee.rating else {
        return Ok(());
    };

    if !employee.bonus_target.is_finite() || employee.bonus_target < 0.0 {
        return Err(EngineError::InvalidTarget {
            employee_id: employee.id.clone(),
            value: employee.bonus_target,
        });
    }

    if !rating.is_finite() || !(RATING_MIN..=RATING_MAX).contains(&rating) {
        return Err(EngineError::InvalidRating {
            employee_id: employee.id.clone(),
            value: rating,
        });
    }

    Ok(())
}

/// Validates the whole batch; the first failure rejects the call.
pub fn validate_employees(employees: &[EmployeeRecord]) -> Result<(), EngineError> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(employees.len());
    for employee in employees {
        if !seen.insert(employee.id.as_str()) {
            return Err(EngineError::DuplicateId(employee.id.clone()));
        }
        validate_employee(employee)?;
    }
    Ok(())
}

/// Allowed drift for a pool: 1e-6 of the pool, never below one cent
pub fn pool_tolerance(pool: f64) -> f64 {
    (pool.abs() * POOL_RELATIVE_TOLERANCE).max(CURRENCY_EPSILON)
}

pub fn within_pool_tolerance(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() <= pool_tolerance(expected)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== has_invalid_values 测试 ====================

    #[test]
    fn test_has_invalid_values_with_valid_array() {
        assert!(!has_invalid_values(&[1.0, 2.0, 3.0]));
        assert!(!has_invalid_values(&[0.0, -1.0, 1e10]));
        assert!(!has_invalid_values(&[]));
    }

    #[test]
    fn test_has_invalid_values_with_nan_or_infinity() {
        assert!(has_invalid_values(&[1.0, f64::NAN, 3.0]));
        assert!(has_invalid_values(&[f64::INFINITY]));
        assert!(has_invalid_values(&[f64::NEG_INFINITY, 2.0]));
    }

    // ==================== validate_params 测试 ====================

    #[test]
    fn test_validate_params_default_ok() {
        assert!(validate_params(&CalculationParams::default()).is_ok());
    }

    #[test]
    fn test_validate_params_rejects_non_positive_exponents() {
        let err = validate_params(&CalculationParams::new(0.0, 1.9)).unwrap_err();
        assert_eq!(err.field(), Some(Field::UpsideExponent));

        let err = validate_params(&CalculationParams::new(1.35, -1.0)).unwrap_err();
        assert_eq!(err.field(), Some(Field::DownsideExponent));

        let err = validate_params(&CalculationParams::new(f64::NAN, 1.9)).unwrap_err();
        assert_eq!(err.field(), Some(Field::UpsideExponent));
    }

    #[test]
    fn test_validate_params_rejects_non_finite_override() {
        let params = CalculationParams::default().with_budget_override(f64::INFINITY);
        let err = validate_params(&params).unwrap_err();
        assert_eq!(err.field(), Some(Field::BudgetOverride));
        assert!(err.employee_id().is_none());
    }

    #[test]
    fn test_validate_params_accepts_negative_override() {
        let params = CalculationParams::default().with_budget_override(-50_000.0);
        assert!(validate_params(&params).is_ok());
    }

    // ==================== validate_employee 测试 ====================

    #[test]
    fn test_validate_employee_negative_target() {
        let e = EmployeeRecord::new("EMP1", -1.0).with_rating(100.0);
        let err = validate_employee(&e).unwrap_err();
        assert_eq!(err.employee_id(), Some("EMP1"));
        assert_eq!(err.field(), Some(Field::BonusTarget));
    }

    #[test]
    fn test_validate_employee_rating_out_of_range() {
        for rating in [-0.1, 200.1, f64::NAN, f64::INFINITY] {
            let e = EmployeeRecord::new("EMP2", 1000.0).with_rating(rating);
            let err = validate_employee(&e).unwrap_err();
            assert_eq!(err.field(), Some(Field::Rating), "rating {}", rating);
        }
    }

    #[test]
    fn test_validate_employee_range_bounds_inclusive() {
        assert!(validate_employee(&EmployeeRecord::new("a", 0.0).with_rating(0.0)).is_ok());
        assert!(validate_employee(&EmployeeRecord::new("b", 10.0).with_rating(200.0)).is_ok());
    }

    #[test]
    fn test_validate_employee_unrated_is_not_checked() {
        let e = EmployeeRecord::new("EMP3", -500.0);
        assert!(validate_employee(&e).is_ok());
    }

    #[test]
    fn test_validate_employees_duplicate_id() {
        let employees = vec![
            EmployeeRecord::new("EMP1", 100.0).with_rating(100.0),
            EmployeeRecord::new("EMP1", 200.0),
        ];
        let err = validate_employees(&employees).unwrap_err();
        assert_eq!(err, EngineError::DuplicateId("EMP1".to_string()));
    }

    #[test]
    fn test_error_message_names_employee_and_field() {
        let e = EmployeeRecord::new("EMP9", 100.0).with_rating(250.0);
        let message = validate_employee(&e).unwrap_err().to_string();
        assert!(message.contains("EMP9"));
        assert!(message.contains("rating"));
    }

    #[test]
    fn test_overflow_errors_name_no_employee_or_field() {
        for err in [EngineError::NonFiniteShares, EngineError::NonFinitePool] {
            assert!(err.employee_id().is_none());
            assert!(err.field().is_none());
        }
        assert!(EngineError::NonFinitePool.to_string().contains("pool"));
    }

    // ==================== tolerance 测试 ====================

    #[test]
    fn test_pool_tolerance_floor_is_one_cent() {
        assert_eq!(pool_tolerance(0.0), CURRENCY_EPSILON);
        assert_eq!(pool_tolerance(100.0), CURRENCY_EPSILON);
    }

    #[test]
    fn test_pool_tolerance_scales_with_pool() {
        assert!((pool_tolerance(1e9) - 1000.0).abs() < 1e-9);
        assert!((pool_tolerance(-1e9) - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_within_pool_tolerance() {
        assert!(within_pool_tolerance(20_000.004, 20_000.0));
        assert!(!within_pool_tolerance(20_000.5, 20_000.0));
    }
}
