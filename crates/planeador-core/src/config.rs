//! Planner configuration
//!
//! Every threshold and growth assumption the planner uses lives here. The
//! values are fixed: the CLI never overrides them, and `Planner::new()` always
//! starts from `PlannerConfig::default()`.

/// Thresholds and assumptions used across all planner stages
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    /// Liquid buffer targeted by the starter-fund tier (€)
    pub starter_fund_target: f64,
    /// Recommended emergency fund, in months of total expenses
    pub emergency_fund_months: f64,
    /// Floor reference for the emergency fund, in months (informational)
    pub minimum_emergency_fund_months: f64,
    /// Savings rate (percent of monthly income) targeted by the invest tier
    pub target_savings_rate: f64,
    /// Assumed annual return for every projection
    pub annual_return: f64,
    /// Financial-independence target as a multiple of annual expenses (4% rule)
    pub fi_multiple: f64,
    /// Upper bound on monthly amortization steps
    pub amortization_cap: u32,
    /// Upper bound on yearly compounding steps in the years-to-target search
    pub years_to_target_cap: u32,
    /// Housing ratio (percent) above which the housing rule fires
    pub housing_alert_ratio: f64,
    /// Housing ratio (percent) the housing rule recommends reducing to
    pub housing_target_ratio: f64,
    /// Share of monthly income above which subscriptions are flagged
    pub subscription_alert_share: f64,
    /// Savings above the emergency fund (€) that trigger the excess-savings rule
    pub excess_savings_threshold: f64,
    /// Horizon (years) of the long-term projections
    pub projection_years: u32,
    /// Share of monthly disposable income directed at the avalanche target
    pub extra_payment_share: f64,
    /// Minimum extra monthly payment directed at the avalanche target (€)
    pub minimum_extra_payment: f64,
    /// Months reported when a target cannot be reached with the current margin
    pub unreachable_months: u32,
    /// Age assumed when phrasing the financial-independence estimate
    pub assumed_current_age: u32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            starter_fund_target: 1000.0,
            emergency_fund_months: 6.0,
            minimum_emergency_fund_months: 3.0,
            target_savings_rate: 15.0,
            annual_return: 0.07,
            fi_multiple: 25.0,
            amortization_cap: 600,   // 50 years of monthly steps
            years_to_target_cap: 50,
            housing_alert_ratio: 35.0,
            housing_target_ratio: 30.0,
            subscription_alert_share: 0.05,
            excess_savings_threshold: 1000.0,
            projection_years: 30,
            extra_payment_share: 0.5,
            minimum_extra_payment: 100.0,
            unreachable_months: 999,
            assumed_current_age: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        let config = PlannerConfig::default();
        assert_eq!(config.starter_fund_target, 1000.0);
        assert_eq!(config.emergency_fund_months, 6.0);
        assert_eq!(config.minimum_emergency_fund_months, 3.0);
        assert_eq!(config.target_savings_rate, 15.0);
        assert_eq!(config.annual_return, 0.07);
        assert_eq!(config.fi_multiple, 25.0);
        assert_eq!(config.amortization_cap, 600);
        assert_eq!(config.years_to_target_cap, 50);
        assert_eq!(config.housing_alert_ratio, 35.0);
        assert_eq!(config.subscription_alert_share, 0.05);
        assert_eq!(config.excess_savings_threshold, 1000.0);
    }
}
