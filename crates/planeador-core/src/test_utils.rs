//! Snapshot fixtures shared by unit tests, integration tests and the CLI tests
//!
//! Enable the `test-utils` feature to use these outside this crate.

use chrono::NaiveDate;

use crate::models::{HouseholdFinances, Loan};

/// Planning date used by tests that render target dates
pub fn plan_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 15).expect("valid fixture date")
}

/// €1500 salary with default subsídios, €600 fixed + €400 variable, €500 saved
pub fn scenario_a() -> HouseholdFinances {
    HouseholdFinances {
        monthly_salary: 1500.0,
        receives_subsidies: true,
        rent: 400.0,
        utilities: 100.0,
        phone_internet: 50.0,
        transport_pass: 50.0,
        groceries: 250.0,
        dining: 80.0,
        subscriptions: 20.0,
        other: 50.0,
        current_savings: 500.0,
        ..Default::default()
    }
}

/// Scenario A with €1000 saved, a personal loan at 8% and a €2000 card at 20%
pub fn scenario_b() -> HouseholdFinances {
    HouseholdFinances {
        current_savings: 1000.0,
        credit_card_debt: 2000.0,
        credit_card_monthly_payment: 100.0,
        credit_card_interest_rate: 20.0,
        loans: vec![Loan::new(1, "Crédito Pessoal", 10_000.0, 300.0, 8.0, 40)],
        ..scenario_a()
    }
}

/// No income and no expenses at all
pub fn scenario_c() -> HouseholdFinances {
    HouseholdFinances {
        receives_subsidies: false,
        ..Default::default()
    }
}

/// Debt-free, €1000/month of expenses and €20000 saved
pub fn scenario_d() -> HouseholdFinances {
    HouseholdFinances {
        monthly_salary: 1500.0,
        receives_subsidies: false,
        rent: 600.0,
        groceries: 400.0,
        current_savings: 20_000.0,
        ..Default::default()
    }
}

/// Spends more than it earns
pub fn overspending() -> HouseholdFinances {
    HouseholdFinances {
        monthly_salary: 1000.0,
        rent: 900.0,
        groceries: 300.0,
        current_savings: 200.0,
        ..Default::default()
    }
}
