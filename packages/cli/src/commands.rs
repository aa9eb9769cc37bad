use std::path::PathBuf;

use bonus_algo::analytics::GroupAverage;
use bonus_algo::{
    allocate, calibration_report, compare_groups, generate_team, group_averages, payout_curve,
    rating_distribution, scenario_normalization, sort_by_final_bonus, standard_scenarios,
    BonusResult, CalculationParams, CalculationSummary, CalibrationReport, CurvePoint,
    EmployeeRecord, MultiGroupComparison, RatingDistribution, SampleTeamOptions,
};
use clap::Subcommand;
use serde::Serialize;

use crate::config::Config;
use crate::error::CliError;
use crate::input::load_employees;

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Allocate the pool across rated employees
    Allocate {
        /// Employee JSON file (`-` for stdin)
        file: PathBuf,
        /// Keep input order instead of sorting by final bonus
        #[arg(long)]
        input_order: bool,
    },
    /// Compare team-level and combined-level allocation across groups
    Compare {
        file: PathBuf,
    },
    /// Rating distribution, calibration and group averages
    Analytics {
        file: PathBuf,
    },
    /// Sample the payout curve
    Curve {
        #[arg(long, default_value_t = 41)]
        points: usize,
        /// Normalization factor to apply (defaults to 1.0)
        #[arg(long)]
        factor: Option<f64>,
    },
    /// Generate a synthetic team
    Sample {
        #[arg(long, default_value_t = 12)]
        size: usize,
        #[arg(long, default_value_t = 1)]
        groups: usize,
        #[arg(long, default_value_t = 42)]
        seed: u64,
        #[arg(long, default_value_t = 0.0)]
        unrated_ratio: f64,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocateReport {
    pub params: CalculationParams,
    pub results: Vec<BonusResult>,
    pub summary: CalculationSummary,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub distribution: RatingDistribution,
    pub calibration: CalibrationReport,
    pub group_averages: Vec<GroupAverage>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioFactor {
    pub name: String,
    pub description: String,
    pub normalization_factor: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurveReport {
    pub params: CalculationParams,
    pub normalization_factor: f64,
    pub points: Vec<CurvePoint>,
    pub scenarios: Vec<ScenarioFactor>,
}

pub fn run_allocate(
    employees: &[EmployeeRecord],
    params: CalculationParams,
    input_order: bool,
) -> Result<AllocateReport, CliError> {
    let (mut results, summary) = allocate(employees, &params)?.into_parts();
    if !input_order {
        sort_by_final_bonus(&mut results);
    }
    Ok(AllocateReport {
        params,
        results,
        summary,
    })
}

pub fn run_compare(
    employees: &[EmployeeRecord],
    params: CalculationParams,
) -> Result<MultiGroupComparison, CliError> {
    compare_groups(employees, &params)?.ok_or(CliError::TooFewGroups)
}

pub fn run_analytics(employees: &[EmployeeRecord]) -> AnalyticsReport {
    AnalyticsReport {
        distribution: rating_distribution(employees),
        calibration: calibration_report(employees),
        group_averages: group_averages(employees),
    }
}

pub fn run_curve(
    params: CalculationParams,
    factor: Option<f64>,
    points: usize,
) -> Result<CurveReport, CliError> {
    let normalization_factor = factor.unwrap_or(1.0);
    let points = payout_curve(&params, normalization_factor, points)?;
    let scenarios = standard_scenarios()
        .into_iter()
        .map(|scenario| {
            Ok(ScenarioFactor {
                normalization_factor: scenario_normalization(&scenario.ratings, &params)?,
                name: scenario.name,
                description: scenario.description,
            })
        })
        .collect::<Result<Vec<_>, CliError>>()?;

    Ok(CurveReport {
        params,
        normalization_factor,
        points,
        scenarios,
    })
}

/// Runs one command and renders its result as pretty JSON.
pub fn execute(command: &Command, config: &Config) -> Result<String, CliError> {
    let params = config.params();
    tracing::debug!(?params, "calculation parameters");

    let json = match command {
        Command::Allocate { file, input_order } => {
            let employees = load_employees(file)?;
            serde_json::to_string_pretty(&run_allocate(&employees, params, *input_order)?)?
        }
        Command::Compare { file } => {
            let employees = load_employees(file)?;
            serde_json::to_string_pretty(&run_compare(&employees, params)?)?
        }
        Command::Analytics { file } => {
            let employees = load_employees(file)?;
            serde_json::to_string_pretty(&run_analytics(&employees))?
        }
        Command::Curve { points, factor } => {
            serde_json::to_string_pretty(&run_curve(params, *factor, *points)?)?
        }
        Command::Sample {
            size,
            groups,
            seed,
            unrated_ratio,
        } => {
            let team = generate_team(&SampleTeamOptions {
                size: *size,
                groups: *groups,
                seed: *seed,
                unrated_ratio: *unrated_ratio,
            });
            serde_json::to_string_pretty(&team)?
        }
    };

    Ok(json)
}
