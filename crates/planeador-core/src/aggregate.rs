//! Aggregator: reduces raw snapshot fields into monthly/yearly totals and ratios
//!
//! Subsídios (holiday and Christmas bonus pay) are kept out of the monthly
//! income figure. They only appear in the yearly total and in the
//! subsidy-strategy recommendation.

use serde::{Deserialize, Serialize};

use crate::config::PlannerConfig;
use crate::models::HouseholdFinances;

/// Monthly and yearly totals derived from a snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aggregates {
    pub monthly_fixed: f64,
    pub monthly_variable: f64,
    pub monthly_loan_payments: f64,
    /// Loan payments plus the credit-card monthly payment
    pub monthly_debt_payments: f64,
    pub total_monthly_expenses: f64,
    /// Salary plus other monthly income; subsídios excluded
    pub average_monthly_income: f64,
    pub subsidies_total: f64,
    /// Yearly income without subsídios
    pub yearly_base_income: f64,
    pub total_yearly_income: f64,
    pub monthly_disposable: f64,
    pub yearly_disposable: f64,
    /// Percent of monthly income left after expenses
    pub savings_rate: f64,
    pub expense_ratio: f64,
    pub housing_ratio: f64,
    pub debt_ratio: f64,
    /// Sum of all loan balances, mortgages included
    pub total_loan_debt: f64,
    /// Balance-weighted average loan rate (percent); 0 without loan debt
    pub weighted_loan_rate: f64,
    /// Loan balances plus the credit-card balance
    pub total_debt: f64,
    pub monthly_interest: f64,
    pub yearly_interest: f64,
    pub recommended_emergency_fund: f64,
    pub minimum_emergency_fund: f64,
    pub emergency_fund_gap: f64,
    pub monthly_savings_target: f64,
}

/// Compute the aggregates of an already-normalized snapshot
pub fn aggregate(finances: &HouseholdFinances, config: &PlannerConfig) -> Aggregates {
    let salary = finances.monthly_salary;

    let subsidies_total = if finances.receives_subsidies {
        or_salary(finances.holiday_subsidy, salary) + or_salary(finances.christmas_subsidy, salary)
    } else {
        0.0
    };

    let average_monthly_income = salary + finances.other_monthly_income;
    let yearly_base_income =
        salary * 12.0 + finances.other_monthly_income * 12.0 + finances.other_yearly_income;
    let total_yearly_income = yearly_base_income + subsidies_total;

    let monthly_fixed = finances.rent
        + finances.utilities
        + finances.insurance
        + finances.phone_internet
        + finances.transport_pass
        + finances.condominium;

    let monthly_variable = finances.groceries
        + finances.dining
        + finances.entertainment
        + finances.subscriptions
        + finances.clothing
        + finances.health
        + finances.education
        + finances.pets
        + finances.other;

    let monthly_loan_payments: f64 = finances.loans.iter().map(|l| l.monthly_payment).sum();
    let monthly_debt_payments = monthly_loan_payments + finances.credit_card_monthly_payment;
    let total_monthly_expenses = monthly_fixed + monthly_variable + monthly_debt_payments;

    let monthly_disposable = average_monthly_income - total_monthly_expenses;
    let yearly_disposable = monthly_disposable * 12.0;

    let total_loan_debt: f64 = finances.loans.iter().map(|l| l.total_amount).sum();
    let weighted_loan_rate = if total_loan_debt > 0.0 {
        finances
            .loans
            .iter()
            .map(|l| l.total_amount * l.interest_rate)
            .sum::<f64>()
            / total_loan_debt
    } else {
        0.0
    };

    let monthly_interest = finances
        .loans
        .iter()
        .map(|l| l.total_amount * l.interest_rate / 100.0 / 12.0)
        .sum::<f64>()
        + finances.credit_card_debt * finances.credit_card_interest_rate / 100.0 / 12.0;

    let recommended_emergency_fund = total_monthly_expenses * config.emergency_fund_months;

    Aggregates {
        monthly_fixed,
        monthly_variable,
        monthly_loan_payments,
        monthly_debt_payments,
        total_monthly_expenses,
        average_monthly_income,
        subsidies_total,
        yearly_base_income,
        total_yearly_income,
        monthly_disposable,
        yearly_disposable,
        savings_rate: percent_of_income(monthly_disposable, average_monthly_income),
        expense_ratio: percent_of_income(total_monthly_expenses, average_monthly_income),
        housing_ratio: percent_of_income(
            finances.rent + finances.condominium,
            average_monthly_income,
        ),
        debt_ratio: percent_of_income(monthly_debt_payments, average_monthly_income),
        total_loan_debt,
        weighted_loan_rate,
        total_debt: total_loan_debt + finances.credit_card_debt,
        monthly_interest,
        yearly_interest: monthly_interest * 12.0,
        recommended_emergency_fund,
        minimum_emergency_fund: total_monthly_expenses * config.minimum_emergency_fund_months,
        emergency_fund_gap: (recommended_emergency_fund - finances.current_savings).max(0.0),
        monthly_savings_target: monthly_disposable.max(0.0),
    }
}

/// `amount` as a percentage of `income`; 0 when there is no income
pub fn percent_of_income(amount: f64, income: f64) -> f64 {
    if income > 0.0 {
        amount / income * 100.0
    } else {
        0.0
    }
}

fn or_salary(bonus: f64, salary: f64) -> f64 {
    if bonus > 0.0 {
        bonus
    } else {
        salary
    }
}
