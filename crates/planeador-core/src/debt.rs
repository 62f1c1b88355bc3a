//! Debt planner: avalanche ordering and accelerated payoff simulation
//!
//! Non-mortgage debts (loans plus a synthetic credit-card entry) are ordered by
//! interest rate, highest first. The head of that list receives an extra
//! monthly payment, and its payoff is simulated month by month. Once it is
//! cleared, the freed payment rolls into the next debt (snowball effect).
//!
//! Mortgage-like loans are recognised by name and never take part in the
//! avalanche. The amortization loop is bounded; a payment that never outgrows
//! the monthly interest is reported as `PayoffSimulation::Capped`.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::PlannerConfig;
use crate::models::HouseholdFinances;

/// Case-insensitive name fragments that mark a loan as housing debt
pub const MORTGAGE_KEYWORDS: [&str; 3] = ["habitação", "casa", "mortgage"];

/// Name of the debt entry synthesized from the credit-card fields
pub const CREDIT_CARD_NAME: &str = "Cartão de Crédito";

/// Whether a loan name refers to housing debt
pub fn is_mortgage(name: &str) -> bool {
    let lower = name.to_lowercase();
    MORTGAGE_KEYWORDS.iter().any(|k| lower.contains(k))
}

/// A debt taking part in the avalanche
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtEntry {
    pub name: String,
    pub amount: f64,
    /// Minimum monthly payment
    pub payment: f64,
    /// Annual interest rate in percent
    pub rate: f64,
    /// Months to payoff at the minimum payment
    pub months: u32,
}

/// Outcome of the month-by-month amortization of one debt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PayoffSimulation {
    /// Balance reached zero
    Converged { months: u32, total_interest: f64 },
    /// Iteration cap hit with a balance still outstanding
    Capped {
        iteration_limit: u32,
        remaining_balance: f64,
        interest_accrued: f64,
    },
}

impl PayoffSimulation {
    pub fn is_converged(&self) -> bool {
        matches!(self, Self::Converged { .. })
    }

    /// Months to payoff, when the simulation converged
    pub fn months(&self) -> Option<u32> {
        match self {
            Self::Converged { months, .. } => Some(*months),
            Self::Capped { .. } => None,
        }
    }
}

/// Accelerated plan for the avalanche target and the debts behind it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcceleratedPayoff {
    /// Name of the highest-rate debt
    pub target: String,
    pub extra_payment: f64,
    /// Target's minimum payment plus the extra payment
    pub new_monthly_payment: f64,
    pub simulation: PayoffSimulation,
    /// Target's months at its minimum payment
    pub original_months: u32,
    /// Linear interest estimate at the minimum payment
    pub original_interest: f64,
    /// Signed; only known when the simulation converged
    pub months_saved: Option<i64>,
    /// Signed; only known when the simulation converged
    pub interest_saved: Option<f64>,
    /// Months until every non-mortgage debt is retired
    pub months_to_debt_free: Option<u32>,
}

/// Output of the debt planner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtPlan {
    /// Non-mortgage debts in avalanche order
    pub entries: Vec<DebtEntry>,
    pub total_non_mortgage_debt: f64,
    /// Sum of the minimum payments of `entries`
    pub total_debt_payment: f64,
    /// Present when `total_non_mortgage_debt` is positive
    pub payoff: Option<AcceleratedPayoff>,
}

impl DebtPlan {
    /// The avalanche target (highest rate)
    pub fn target(&self) -> Option<&DebtEntry> {
        self.entries.first()
    }

    pub fn has_debt(&self) -> bool {
        self.total_non_mortgage_debt > 0.0
    }
}

/// Non-mortgage debts sorted by rate, highest first
///
/// The sort is stable: equal rates keep loan-list order, and the credit card
/// comes after the loans.
pub fn avalanche_order(finances: &HouseholdFinances, config: &PlannerConfig) -> Vec<DebtEntry> {
    let mut entries: Vec<DebtEntry> = finances
        .loans
        .iter()
        .filter(|loan| !is_mortgage(&loan.name))
        .map(|loan| DebtEntry {
            name: loan.name.clone(),
            amount: loan.total_amount,
            payment: loan.monthly_payment,
            rate: loan.interest_rate,
            months: loan.remaining_months,
        })
        .collect();

    if finances.credit_card_debt > 0.0 {
        let months = if finances.credit_card_monthly_payment > 0.0 {
            (finances.credit_card_debt / finances.credit_card_monthly_payment).ceil() as u32
        } else {
            config.unreachable_months
        };
        entries.push(DebtEntry {
            name: CREDIT_CARD_NAME.to_string(),
            amount: finances.credit_card_debt,
            payment: finances.credit_card_monthly_payment,
            rate: finances.credit_card_interest_rate,
            months,
        });
    }

    entries.sort_by(|a, b| b.rate.total_cmp(&a.rate));
    entries
}

/// Amortize `balance` at `annual_rate` percent with a fixed monthly payment
///
/// Stops after `cap` months. A non-finite balance (runaway interest) is
/// reported as capped.
pub fn simulate_payoff(
    balance: f64,
    annual_rate: f64,
    monthly_payment: f64,
    cap: u32,
) -> PayoffSimulation {
    let monthly_rate = annual_rate / 100.0 / 12.0;
    let mut remaining = balance;
    let mut months = 0;
    let mut total_interest = 0.0;

    while remaining > 0.0 && months < cap {
        let interest = remaining * monthly_rate;
        total_interest += interest;
        let principal = (monthly_payment - interest).min(remaining);
        remaining -= principal;
        months += 1;
    }

    if remaining <= 0.0 {
        PayoffSimulation::Converged {
            months,
            total_interest,
        }
    } else {
        PayoffSimulation::Capped {
            iteration_limit: cap,
            remaining_balance: remaining,
            interest_accrued: total_interest,
        }
    }
}

/// Total months to clear `rest` after the first debt, rolling payments forward
///
/// Each cleared debt's payment is added to the next one's minimum payment.
pub fn snowball_months(first_months: u32, first_payment: f64, rest: &[DebtEntry]) -> u32 {
    let mut total = first_months;
    let mut available = first_payment;

    for debt in rest {
        let payment = available + debt.payment;
        let months = if payment > 0.0 {
            (debt.amount / payment).ceil() as u32
        } else {
            0
        };
        total = total.saturating_add(months);
        available = payment;
    }

    total
}

/// Order the household's debts and simulate the accelerated payoff
pub fn plan_debts(
    finances: &HouseholdFinances,
    monthly_disposable: f64,
    config: &PlannerConfig,
) -> DebtPlan {
    let entries = avalanche_order(finances, config);
    let total_non_mortgage_debt: f64 = entries.iter().map(|d| d.amount).sum();
    let total_debt_payment: f64 = entries.iter().map(|d| d.payment).sum();

    let payoff = match entries.first() {
        Some(target) if total_non_mortgage_debt > 0.0 => {
            Some(accelerate(target, &entries[1..], monthly_disposable, config))
        }
        _ => None,
    };

    debug!(
        debts = entries.len(),
        total = total_non_mortgage_debt,
        "Debt plan computed"
    );

    DebtPlan {
        entries,
        total_non_mortgage_debt,
        total_debt_payment,
        payoff,
    }
}

fn accelerate(
    target: &DebtEntry,
    rest: &[DebtEntry],
    monthly_disposable: f64,
    config: &PlannerConfig,
) -> AcceleratedPayoff {
    let extra_payment =
        (monthly_disposable * config.extra_payment_share).max(config.minimum_extra_payment);
    let new_monthly_payment = target.payment + extra_payment;

    let simulation = simulate_payoff(
        target.amount,
        target.rate,
        new_monthly_payment,
        config.amortization_cap,
    );

    let original_months = target.months;
    let original_interest = target.amount * (target.rate / 100.0 / 12.0) * original_months as f64;

    let (months_saved, interest_saved, months_to_debt_free) = match &simulation {
        PayoffSimulation::Converged {
            months,
            total_interest,
        } => (
            Some(original_months as i64 - *months as i64),
            Some(original_interest - total_interest),
            Some(snowball_months(*months, new_monthly_payment, rest)),
        ),
        PayoffSimulation::Capped {
            remaining_balance, ..
        } => {
            warn!(
                debt = %target.name,
                payment = new_monthly_payment,
                remaining = remaining_balance,
                "Payoff simulation hit its iteration cap"
            );
            (None, None, None)
        }
    };

    AcceleratedPayoff {
        target: target.name.clone(),
        extra_payment,
        new_monthly_payment,
        simulation,
        original_months,
        original_interest,
        months_saved,
        interest_saved,
        months_to_debt_free,
    }
}
