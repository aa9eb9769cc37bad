//! # bonus-algo - 奖金池分配核心算法库
//!
//! Pure Rust bonus pool allocation:
//!
//! - **Performance Multiplier** - asymmetric power curve over ratings
//! - **Pool Normalizer** - one scalar that makes raw shares sum to the pool
//! - **Bonus Allocator** - validation, raw shares, normalization, budget override
//! - **Multi-Group Comparator** - team-level vs combined-level budget impact
//!
//! ## 设计理念
//!
//! - **纯计算** - no I/O, no global state; every parameter is passed in
//! - **池守恒** - final bonuses sum to the adjusted pool within tolerance
//! - **确定性** - identical inputs always produce identical outputs
//!
//! ## 模块结构
//!
//! - [`types`] - records, parameters, results and constants
//! - [`sanitize`] - boundary validation, errors, tolerance helpers
//! - [`multiplier`] - rating → multiplier curve
//! - [`normalizer`] - normalization factor and equal-split fallback
//! - [`allocator`] - single-group allocation
//! - [`comparator`] - multi-group comparison
//! - [`analytics`] - rating distribution and calibration
//! - [`curve`] - payout curve sampling and reference scenarios
//! - [`sample`] - deterministic synthetic teams
//!
//! ## 使用示例
//!
//! ```rust
//! use bonus_algo::{allocate, CalculationParams, EmployeeRecord};
//!
//! let team = vec![
//!     EmployeeRecord::new("EMP1", 10_000.0).with_rating(120.0),
//!     EmployeeRecord::new("EMP2", 10_000.0).with_rating(80.0),
//! ];
//! let allocation = allocate(&team, &CalculationParams::default()).unwrap();
//! assert_eq!(allocation.results.len(), 2);
//! assert!((allocation.summary.total_allocated - 20_000.0).abs() < 0.01);
//! ```

// ============================================================================
// 模块声明
// ============================================================================

pub mod allocator;
pub mod analytics;
pub mod comparator;
pub mod curve;
pub mod multiplier;
pub mod normalizer;
pub mod sample;
pub mod sanitize;
pub mod types;

// ============================================================================
// 重新导出
// ============================================================================

/// 重新导出所有公共类型
pub use types::*;

pub use allocator::{allocate, sort_by_final_bonus};
pub use comparator::{compare_groups, EmployeeComparison, GroupComparison, MultiGroupComparison};
pub use multiplier::performance_multiplier;
pub use normalizer::{normalization_factor, normalize, Normalization};
pub use sanitize::{pool_tolerance, within_pool_tolerance, EngineError, Field};

pub use analytics::{
    calibration_report, group_averages, rating_distribution, CalibrationReport,
    CalibrationStatus, RatingDistribution,
};
pub use curve::{payout_curve, scenario_normalization, standard_scenarios, CurvePoint, Scenario};
pub use sample::{generate_team, SampleTeamOptions};
