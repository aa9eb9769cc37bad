//! Multi-Group Comparator
//!
//! Compares team-level allocation (each group normalized on its own pool)
//! with combined-level allocation (one normalization across every group).
//! The difference per group is its budget impact: a zero-sum transfer
//! between groups caused by sharing one normalization factor.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::allocator::allocate;
use crate::sanitize::EngineError;
use crate::types::{CalculationParams, CalculationSummary, EmployeeRecord, NormalizationMode};

/// Per-group side of the comparison
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupComparison {
    /// Group label (`None` is the implicit group)
    pub group: Option<String>,
    pub included_count: usize,
    /// Team-level adjusted pool
    pub pool: f64,
    /// Mean rating of the group's included employees
    pub average_rating: Option<f64>,
    pub team_factor: f64,
    pub combined_factor: f64,
    pub team_mode: NormalizationMode,
    /// Σ final bonus when the group is normalized alone
    pub team_total: f64,
    /// Σ final bonus for the group's employees in the combined run
    pub combined_total: f64,
    /// combined_total - team_total
    pub budget_impact: f64,
    /// budget_impact as a percent of |pool|; `None` for a zero pool
    pub impact_percent: Option<f64>,
}

/// Per-employee drill-down
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeComparison {
    pub id: String,
    pub group: Option<String>,
    pub team_bonus: f64,
    pub combined_bonus: f64,
}

impl EmployeeComparison {
    pub fn delta(&self) -> f64 {
        self.combined_bonus - self.team_bonus
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiGroupComparison {
    pub groups: Vec<GroupComparison>,
    pub employees: Vec<EmployeeComparison>,
    /// Summary of the combined-level run
    pub combined: CalculationSummary,
}

impl MultiGroupComparison {
    /// Σ budget impact; zero within pool tolerance
    pub fn net_impact(&self) -> f64 {
        self.groups.iter().map(|g| g.budget_impact).sum()
    }

    pub fn group(&self, label: Option<&str>) -> Option<&GroupComparison> {
        self.groups.iter().find(|g| g.group.as_deref() == label)
    }
}

/// Splits a non-zero budget override across groups in proportion to their
/// base pools, so the per-group overrides add up to the combined one.
fn override_shares(
    budget_override: f64,
    groups: &BTreeMap<Option<String>, Vec<EmployeeRecord>>,
) -> Vec<f64> {
    if budget_override == 0.0 {
        return vec![0.0; groups.len()];
    }

    let base_pools: Vec<f64> = groups
        .values()
        .map(|members| {
            members
                .iter()
                .filter(|e| e.is_rated())
                .map(|e| e.bonus_target)
                .sum::<f64>()
        })
        .collect();
    let combined_base: f64 = base_pools.iter().sum();

    if combined_base > 0.0 {
        return base_pools
            .iter()
            .map(|pool| budget_override * pool / combined_base)
            .collect();
    }

    // No targets anywhere: split equally across groups that have someone rated.
    let rated: Vec<bool> = groups
        .values()
        .map(|members| members.iter().any(EmployeeRecord::is_rated))
        .collect();
    let rated_groups = rated.iter().filter(|r| **r).count();
    rated
        .iter()
        .map(|has_rated| {
            if *has_rated {
                budget_override / rated_groups as f64
            } else {
                0.0
            }
        })
        .collect()
}

/// Runs team-level and combined-level allocation and compares them.
///
/// Returns `Ok(None)` when fewer than two distinct groups are present. Any
/// allocation failure rejects the whole comparison.
pub fn compare_groups(
    employees: &[EmployeeRecord],
    params: &CalculationParams,
) -> Result<Option<MultiGroupComparison>, EngineError> {
    let mut groups: BTreeMap<Option<String>, Vec<EmployeeRecord>> = BTreeMap::new();
    for employee in employees {
        groups
            .entry(employee.group.clone())
            .or_default()
            .push(employee.clone());
    }
    if groups.len() < 2 {
        return Ok(None);
    }

    let combined = allocate(employees, params)?;
    let combined_bonus: HashMap<&str, f64> = combined
        .results
        .iter()
        .map(|r| (r.id.as_str(), r.final_bonus))
        .collect();

    let shares = override_shares(params.budget_override, &groups);
    let mut group_rows = Vec::with_capacity(groups.len());
    let mut employee_rows = Vec::with_capacity(combined.results.len());

    for ((label, members), share) in groups.iter().zip(shares) {
        let team = allocate(members, &params.with_budget_override(share))?;

        let mut combined_total = 0.0;
        for result in &team.results {
            let combined_value = combined_bonus
                .get(result.id.as_str())
                .copied()
                .unwrap_or_default();
            combined_total += combined_value;
            employee_rows.push(EmployeeComparison {
                id: result.id.clone(),
                group: label.clone(),
                team_bonus: result.final_bonus,
                combined_bonus: combined_value,
            });
        }

        let average_rating = if team.results.is_empty() {
            None
        } else {
            Some(team.results.iter().map(|r| r.rating).sum::<f64>() / team.results.len() as f64)
        };

        let pool = team.summary.adjusted_pool;
        let budget_impact = combined_total - team.summary.total_allocated;
        let impact_percent = if pool != 0.0 {
            Some(budget_impact / pool.abs() * 100.0)
        } else {
            None
        };

        tracing::debug!(
            group = label.as_deref().unwrap_or("-"),
            pool,
            team_factor = team.summary.normalization_factor,
            budget_impact,
            "group compared"
        );

        group_rows.push(GroupComparison {
            group: label.clone(),
            included_count: team.summary.included_count,
            pool,
            average_rating,
            team_factor: team.summary.normalization_factor,
            combined_factor: combined.summary.normalization_factor,
            team_mode: team.summary.normalization_mode,
            team_total: team.summary.total_allocated,
            combined_total,
            budget_impact,
            impact_percent,
        });
    }

    Ok(Some(MultiGroupComparison {
        groups: group_rows,
        employees: employee_rows,
        combined: combined.summary,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sanitize::{pool_tolerance, Field};

    fn member(id: &str, group: &str, target: f64, rating: f64) -> EmployeeRecord {
        EmployeeRecord::new(id, target).with_rating(rating).in_group(group)
    }

    #[test]
    fn test_single_group_is_noop() {
        let employees = vec![
            member("A1", "A", 5_000.0, 150.0),
            member("A2", "A", 5_000.0, 50.0),
        ];
        let comparison = compare_groups(&employees, &CalculationParams::default()).unwrap();
        assert!(comparison.is_none());
    }

    #[test]
    fn test_two_single_member_groups() {
        let employees = vec![
            member("A1", "A", 5_000.0, 150.0),
            member("B1", "B", 5_000.0, 50.0),
        ];
        let comparison = compare_groups(&employees, &CalculationParams::default())
            .unwrap()
            .unwrap();

        let a = comparison.group(Some("A")).unwrap();
        let b = comparison.group(Some("B")).unwrap();

        // Alone, each employee takes the whole group pool.
        assert!((a.team_total - 5_000.0).abs() < 1e-9);
        assert!((b.team_total - 5_000.0).abs() < 1e-9);

        let m_a = 1.5f64.powf(1.35);
        let m_b = 0.5f64.powf(1.9);
        let expected_a = 10_000.0 * m_a / (m_a + m_b);
        assert!((a.combined_total - expected_a).abs() < 1e-6);

        assert!(a.budget_impact > 0.0);
        assert!(b.budget_impact < 0.0);
        assert!((a.budget_impact + b.budget_impact).abs() < pool_tolerance(10_000.0));
        assert!((a.budget_impact - 3_658.04).abs() < 0.01);
        assert!((a.impact_percent.unwrap() - a.budget_impact / 50.0).abs() < 1e-9);
        assert_eq!(a.combined_factor, b.combined_factor);
        assert_eq!(a.average_rating, Some(150.0));
    }

    #[test]
    fn test_employee_drilldown_matches_group_totals() {
        let employees = vec![
            member("A1", "A", 8_000.0, 130.0),
            member("A2", "A", 4_000.0, 90.0),
            member("B1", "B", 6_000.0, 110.0),
            member("B2", "B", 6_000.0, 70.0),
            EmployeeRecord::new("B3", 9_000.0).in_group("B"),
        ];
        let comparison = compare_groups(&employees, &CalculationParams::default())
            .unwrap()
            .unwrap();

        assert_eq!(comparison.employees.len(), 4);
        for group in &comparison.groups {
            let rows: Vec<&EmployeeComparison> = comparison
                .employees
                .iter()
                .filter(|e| e.group == group.group)
                .collect();
            let delta: f64 = rows.iter().map(|e| e.delta()).sum();
            assert!((delta - group.budget_impact).abs() < 1e-6);
        }
        assert!(comparison.net_impact().abs() < pool_tolerance(24_000.0));
    }

    #[test]
    fn test_budget_override_split_keeps_zero_sum() {
        let employees = vec![
            member("A1", "A", 10_000.0, 140.0),
            member("A2", "A", 5_000.0, 100.0),
            member("B1", "B", 5_000.0, 60.0),
        ];
        let params = CalculationParams::default().with_budget_override(-4_000.0);
        let comparison = compare_groups(&employees, &params).unwrap().unwrap();

        let a = comparison.group(Some("A")).unwrap();
        let b = comparison.group(Some("B")).unwrap();
        assert!((a.pool - 12_000.0).abs() < 1e-9);
        assert!((b.pool - 4_000.0).abs() < 1e-9);
        assert!((comparison.combined.adjusted_pool - 16_000.0).abs() < 1e-9);
        assert!(comparison.net_impact().abs() < pool_tolerance(16_000.0));
    }

    #[test]
    fn test_implicit_group_counts_as_distinct() {
        let employees = vec![
            EmployeeRecord::new("X", 1_000.0).with_rating(100.0),
            member("A1", "A", 1_000.0, 120.0),
        ];
        let comparison = compare_groups(&employees, &CalculationParams::default())
            .unwrap()
            .unwrap();
        assert_eq!(comparison.groups.len(), 2);
        assert!(comparison.groups[0].group.is_none());
    }

    #[test]
    fn test_group_without_rated_members() {
        let employees = vec![
            member("A1", "A", 5_000.0, 120.0),
            EmployeeRecord::new("B1", 5_000.0).in_group("B"),
        ];
        let comparison = compare_groups(&employees, &CalculationParams::default())
            .unwrap()
            .unwrap();
        let b = comparison.group(Some("B")).unwrap();
        assert_eq!(b.team_mode, NormalizationMode::Empty);
        assert_eq!(b.budget_impact, 0.0);
        assert!(b.impact_percent.is_none());
        assert!(b.average_rating.is_none());
    }

    #[test]
    fn test_invalid_member_rejects_comparison() {
        let employees = vec![
            member("A1", "A", 5_000.0, 120.0),
            member("B1", "B", 5_000.0, 300.0),
        ];
        let err = compare_groups(&employees, &CalculationParams::default()).unwrap_err();
        assert_eq!(err.employee_id(), Some("B1"));
        assert_eq!(err.field(), Some(Field::Rating));
    }

    #[test]
    fn test_override_shares_without_targets() {
        let mut groups: BTreeMap<Option<String>, Vec<EmployeeRecord>> = BTreeMap::new();
        groups.insert(Some("A".into()), vec![member("A1", "A", 0.0, 100.0)]);
        groups.insert(Some("B".into()), vec![member("B1", "B", 0.0, 100.0)]);
        groups.insert(Some("C".into()), vec![EmployeeRecord::new("C1", 0.0).in_group("C")]);
        let shares = override_shares(900.0, &groups);
        assert_eq!(shares, vec![450.0, 450.0, 0.0]);
    }
}
