//! Compound-growth projections
//!
//! All growth uses a single annual rate (7% by default) compounded yearly.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Future value of a level yearly contribution after `years` years
///
/// `yearly * ((1 + r)^n - 1) / r`; a zero rate degenerates to `yearly * n`.
pub fn future_value_of_contributions(yearly: f64, annual_rate: f64, years: u32) -> f64 {
    if annual_rate == 0.0 {
        return yearly * years as f64;
    }
    yearly * ((1.0 + annual_rate).powi(years as i32) - 1.0) / annual_rate
}

/// `principal` compounded for `years` years
pub fn grow_lump_sum(principal: f64, annual_rate: f64, years: u32) -> f64 {
    principal * (1.0 + annual_rate).powi(years as i32)
}

/// Savings outlook for the coming year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearProjection {
    /// Disposable income saved over the year, never negative
    pub expected_savings: f64,
    pub end_balance: f64,
    /// Interest paid on all debts over the year
    pub interest_paid: f64,
}

/// One-year-end balance: current savings plus any positive yearly disposable
pub fn one_year_projection(
    current_savings: f64,
    yearly_disposable: f64,
    yearly_interest: f64,
) -> YearProjection {
    let expected_savings = yearly_disposable.max(0.0);
    YearProjection {
        expected_savings,
        end_balance: current_savings + expected_savings,
        interest_paid: yearly_interest,
    }
}

/// Outcome of the years-to-target search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum YearsToTarget {
    Reached { years: u32 },
    /// Cap hit before the balance met the target
    NotReached { cap: u32, balance: f64 },
}

impl YearsToTarget {
    pub fn years(&self) -> Option<u32> {
        match self {
            Self::Reached { years } => Some(*years),
            Self::NotReached { .. } => None,
        }
    }
}

/// Compound `start` yearly, adding `yearly_contribution` each year, until it
/// meets `target` or `cap` years pass
pub fn years_to_target(
    start: f64,
    yearly_contribution: f64,
    target: f64,
    annual_rate: f64,
    cap: u32,
) -> YearsToTarget {
    let mut balance = start;
    let mut years = 0;

    while balance < target && years < cap {
        balance = balance * (1.0 + annual_rate) + yearly_contribution;
        years += 1;
    }

    if balance >= target {
        YearsToTarget::Reached { years }
    } else {
        warn!(cap, balance, target, "Years-to-target search hit its cap");
        YearsToTarget::NotReached { cap, balance }
    }
}

/// Lump sum grown over several horizons
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HorizonValue {
    pub years: u32,
    pub value: f64,
    /// Growth above the principal
    pub gain: f64,
}

/// `principal` grown to each of `horizons`
pub fn horizons(principal: f64, annual_rate: f64, horizons: &[u32]) -> Vec<HorizonValue> {
    horizons
        .iter()
        .map(|&years| {
            let value = grow_lump_sum(principal, annual_rate, years);
            HorizonValue {
                years,
                value,
                gain: value - principal,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_future_value_30_years() {
        // 1.07^30 = 7.612255...
        let fv = future_value_of_contributions(6000.0, 0.07, 30);
        assert!((fv - 566_764.72).abs() < 0.01);
    }

    #[test]
    fn test_future_value_zero_rate() {
        assert_eq!(future_value_of_contributions(1200.0, 0.0, 10), 12_000.0);
        assert_eq!(future_value_of_contributions(1200.0, 0.07, 0), 0.0);
    }

    #[test]
    fn test_grow_lump_sum() {
        let value = grow_lump_sum(14_000.0, 0.07, 10);
        assert!((value - 27_540.12).abs() < 0.01);
        assert_eq!(grow_lump_sum(14_000.0, 0.07, 0), 14_000.0);
    }

    #[test]
    fn test_one_year_projection() {
        let p = one_year_projection(500.0, 6000.0, 0.0);
        assert_eq!(p.expected_savings, 6000.0);
        assert_eq!(p.end_balance, 6500.0);

        let p = one_year_projection(500.0, -2400.0, 120.0);
        assert_eq!(p.expected_savings, 0.0);
        assert_eq!(p.end_balance, 500.0);
        assert_eq!(p.interest_paid, 120.0);
    }

    #[test]
    fn test_years_to_target_reached() {
        assert_eq!(
            years_to_target(0.0, 100.0, 250.0, 0.0, 50),
            YearsToTarget::Reached { years: 3 }
        );
        // Already there
        assert_eq!(
            years_to_target(1000.0, 0.0, 500.0, 0.07, 50),
            YearsToTarget::Reached { years: 0 }
        );
    }

    #[test]
    fn test_years_to_target_capped() {
        let result = years_to_target(0.0, 100.0, 1_000_000.0, 0.0, 50);
        assert_eq!(result.years(), None);
        match result {
            YearsToTarget::NotReached { cap, balance } => {
                assert_eq!(cap, 50);
                assert_eq!(balance, 5000.0);
            }
            other => panic!("expected cap, got {:?}", other),
        }
    }

    #[test]
    fn test_horizons() {
        let values = horizons(14_000.0, 0.07, &[10, 20, 30]);
        assert_eq!(values.len(), 3);
        assert_eq!(values[2].years, 30);
        assert!((values[1].value - 14_000.0 * 1.07f64.powi(20)).abs() < 1e-6);
        assert!((values[0].gain - (values[0].value - 14_000.0)).abs() < 1e-9);
    }
}
