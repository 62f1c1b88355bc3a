//! Plan assembly
//!
//! `compute_plan` is the entry point of the library: it normalizes the
//! snapshot, runs every stage once (aggregate, debts, recommendations,
//! projection) and copies the results into an immutable `Plan`. The date is
//! always passed in, so identical inputs give identical plans.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::aggregate::{aggregate, Aggregates};
use crate::clock::Clock;
use crate::config::PlannerConfig;
use crate::debt::{plan_debts, AcceleratedPayoff, DebtEntry, DebtPlan};
use crate::models::{HouseholdFinances, Investments, Loan};
use crate::projection::{one_year_projection, YearProjection};
use crate::recommend::{Recommendation, RecommendationContext, RecommendationEngine, Tier};

/// Savings-rate classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SavingsHealth {
    #[serde(rename = "Excelente")]
    Excellent,
    #[serde(rename = "Muito Bom")]
    VeryGood,
    #[serde(rename = "Bom")]
    Good,
    #[serde(rename = "Razoável")]
    Fair,
    #[serde(rename = "Preocupante")]
    Worrying,
    #[serde(rename = "Crítico")]
    Critical,
}

impl SavingsHealth {
    /// Classify a savings rate given in percent
    pub fn from_rate(rate: f64) -> Self {
        if rate >= 20.0 {
            Self::Excellent
        } else if rate >= 15.0 {
            Self::VeryGood
        } else if rate >= 10.0 {
            Self::Good
        } else if rate >= 5.0 {
            Self::Fair
        } else if rate >= 0.0 {
            Self::Worrying
        } else {
            Self::Critical
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "Excelente",
            Self::VeryGood => "Muito Bom",
            Self::Good => "Bom",
            Self::Fair => "Razoável",
            Self::Worrying => "Preocupante",
            Self::Critical => "Crítico",
        }
    }
}

impl fmt::Display for SavingsHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Variable-expense category with a savings heuristic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpendingCategory {
    Dining,
    Subscriptions,
    Groceries,
    Entertainment,
}

/// A concrete way to trim variable spending
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingOpportunity {
    pub category: SpendingCategory,
    pub description: String,
    pub yearly_savings: f64,
}

/// Subscriptions above this monthly amount (€) count as an opportunity
const SUBSCRIPTION_OPPORTUNITY_FLOOR: f64 = 50.0;

/// Heuristic savings on variable expenses
pub fn spending_opportunities(
    finances: &HouseholdFinances,
    average_monthly_income: f64,
) -> Vec<SpendingOpportunity> {
    let income = average_monthly_income;
    let candidates = [
        (
            SpendingCategory::Dining,
            finances.dining > income * 0.05,
            "Reduzir restaurantes em 50%",
            finances.dining * 0.5,
        ),
        (
            SpendingCategory::Subscriptions,
            finances.subscriptions > SUBSCRIPTION_OPPORTUNITY_FLOOR,
            "Cancelar subscrições não usadas",
            finances.subscriptions * 0.3,
        ),
        (
            SpendingCategory::Groceries,
            finances.groceries > income * 0.15,
            "Meal prep e lista de compras",
            finances.groceries * 0.15,
        ),
        (
            SpendingCategory::Entertainment,
            finances.entertainment > income * 0.05,
            "Opções gratuitas/mais baratas",
            finances.entertainment * 0.3,
        ),
    ];

    candidates
        .into_iter()
        .filter(|(_, applies, _, _)| *applies)
        .map(|(category, _, description, monthly)| SpendingOpportunity {
            category,
            description: description.to_string(),
            yearly_savings: monthly * 12.0,
        })
        .collect()
}

/// Sum of the investment categories; 0 unless the household declares investments
pub fn total_investments(finances: &HouseholdFinances) -> f64 {
    if finances.has_investments {
        finances.investments.total()
    } else {
        0.0
    }
}

/// Savings plus investments minus all debt, mortgages included
pub fn net_worth(current_savings: f64, investments: f64, total_debt: f64) -> f64 {
    current_savings + investments - total_debt
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeSummary {
    pub monthly_salary: f64,
    pub subsidies: f64,
    pub other_monthly: f64,
    /// Excludes subsídios
    pub average_monthly: f64,
    pub yearly: f64,
    pub yearly_base: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseSummary {
    pub fixed: f64,
    pub variable: f64,
    pub debt: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisposableSummary {
    pub monthly: f64,
    pub yearly: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtSummary {
    pub total_debt: f64,
    pub monthly_payment: f64,
    pub monthly_interest: f64,
    pub yearly_interest: f64,
    pub weighted_loan_rate: f64,
    pub credit_card: f64,
    pub loans: Vec<Loan>,
    pub total_non_mortgage_debt: f64,
    /// Non-mortgage debts, highest rate first
    pub avalanche: Vec<DebtEntry>,
    pub payoff: Option<AcceleratedPayoff>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsSummary {
    pub rate: f64,
    pub current_savings: f64,
    pub recommended_emergency_fund: f64,
    pub minimum_emergency_fund: f64,
    pub gap: f64,
    pub monthly_target: f64,
    pub total_investments: f64,
    pub investment_breakdown: Investments,
    pub has_investments: bool,
    pub total_net_worth: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ratios {
    pub expense_ratio: f64,
    pub housing_ratio: f64,
    pub debt_ratio: f64,
    pub savings_rate: f64,
    /// Monthly housing cost above the target share of income, 0 when within
    pub housing_excess_monthly: f64,
}

/// The computed plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    /// Date the plan was computed for
    pub date: NaiveDate,
    pub tier: Tier,
    pub income: IncomeSummary,
    pub expenses: ExpenseSummary,
    pub disposable: DisposableSummary,
    pub debt: DebtSummary,
    pub savings: SavingsSummary,
    pub ratios: Ratios,
    pub health: SavingsHealth,
    pub spending_opportunities: Vec<SpendingOpportunity>,
    /// Ordered by priority rank
    pub recommendations: Vec<Recommendation>,
    /// Coming year
    pub projection: YearProjection,
}

/// Runs every planning stage with a fixed configuration
pub struct Planner {
    config: PlannerConfig,
    engine: RecommendationEngine,
}

impl Default for Planner {
    fn default() -> Self {
        Self::new()
    }
}

impl Planner {
    pub fn new() -> Self {
        Self::with_config(PlannerConfig::default())
    }

    pub fn with_config(config: PlannerConfig) -> Self {
        Self {
            config,
            engine: RecommendationEngine::new(),
        }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Compute the plan using the clock's current date
    pub fn plan_with_clock(&self, finances: &HouseholdFinances, clock: &impl Clock) -> Plan {
        self.plan(finances, clock.today())
    }

    /// Compute the plan for `today`
    pub fn plan(&self, finances: &HouseholdFinances, today: NaiveDate) -> Plan {
        let config = &self.config;
        let finances = finances.normalized();

        let aggregates = aggregate(&finances, config);
        debug!(
            income = aggregates.average_monthly_income,
            expenses = aggregates.total_monthly_expenses,
            disposable = aggregates.monthly_disposable,
            "Aggregates computed"
        );

        let debt = plan_debts(&finances, aggregates.monthly_disposable, config);
        let investments = total_investments(&finances);

        let ctx = RecommendationContext {
            finances: &finances,
            aggregates: &aggregates,
            debt: &debt,
            total_investments: investments,
            today,
            config,
        };
        let set = self.engine.recommend(&ctx);
        debug!(
            tier = set.tier.as_str(),
            count = set.items.len(),
            "Recommendations ready"
        );

        let projection = one_year_projection(
            finances.current_savings,
            aggregates.yearly_disposable,
            aggregates.yearly_interest,
        );

        assemble(
            &finances,
            &aggregates,
            debt,
            investments,
            today,
            set.tier,
            set.items,
            projection,
            config,
        )
    }
}

/// Compute the plan for a snapshot on a given date with the default settings
pub fn compute_plan(finances: &HouseholdFinances, today: NaiveDate) -> Plan {
    Planner::new().plan(finances, today)
}

#[allow(clippy::too_many_arguments)]
fn assemble(
    finances: &HouseholdFinances,
    aggregates: &Aggregates,
    debt: DebtPlan,
    investments: f64,
    today: NaiveDate,
    tier: Tier,
    recommendations: Vec<Recommendation>,
    projection: YearProjection,
    config: &PlannerConfig,
) -> Plan {
    let housing_excess_monthly = if aggregates.housing_ratio > config.housing_target_ratio {
        (aggregates.housing_ratio - config.housing_target_ratio) / 100.0
            * aggregates.average_monthly_income
    } else {
        0.0
    };

    Plan {
        date: today,
        tier,
        income: IncomeSummary {
            monthly_salary: finances.monthly_salary,
            subsidies: aggregates.subsidies_total,
            other_monthly: finances.other_monthly_income,
            average_monthly: aggregates.average_monthly_income,
            yearly: aggregates.total_yearly_income,
            yearly_base: aggregates.yearly_base_income,
        },
        expenses: ExpenseSummary {
            fixed: aggregates.monthly_fixed,
            variable: aggregates.monthly_variable,
            debt: aggregates.monthly_debt_payments,
            total: aggregates.total_monthly_expenses,
        },
        disposable: DisposableSummary {
            monthly: aggregates.monthly_disposable,
            yearly: aggregates.yearly_disposable,
        },
        debt: DebtSummary {
            total_debt: aggregates.total_debt,
            monthly_payment: aggregates.monthly_debt_payments,
            monthly_interest: aggregates.monthly_interest,
            yearly_interest: aggregates.yearly_interest,
            weighted_loan_rate: aggregates.weighted_loan_rate,
            credit_card: finances.credit_card_debt,
            loans: finances.loans.clone(),
            total_non_mortgage_debt: debt.total_non_mortgage_debt,
            avalanche: debt.entries,
            payoff: debt.payoff,
        },
        savings: SavingsSummary {
            rate: aggregates.savings_rate,
            current_savings: finances.current_savings,
            recommended_emergency_fund: aggregates.recommended_emergency_fund,
            minimum_emergency_fund: aggregates.minimum_emergency_fund,
            gap: aggregates.emergency_fund_gap,
            monthly_target: aggregates.monthly_savings_target,
            total_investments: investments,
            investment_breakdown: finances.investments.clone(),
            has_investments: finances.has_investments,
            total_net_worth: net_worth(finances.current_savings, investments, aggregates.total_debt),
        },
        ratios: Ratios {
            expense_ratio: aggregates.expense_ratio,
            housing_ratio: aggregates.housing_ratio,
            debt_ratio: aggregates.debt_ratio,
            savings_rate: aggregates.savings_rate,
            housing_excess_monthly,
        },
        health: SavingsHealth::from_rate(aggregates.savings_rate),
        spending_opportunities: spending_opportunities(finances, aggregates.average_monthly_income),
        recommendations,
        projection,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::test_utils::{plan_date, scenario_a, scenario_b, scenario_d};

    #[test]
    fn test_savings_health_bands() {
        assert_eq!(SavingsHealth::from_rate(25.0), SavingsHealth::Excellent);
        assert_eq!(SavingsHealth::from_rate(20.0), SavingsHealth::Excellent);
        assert_eq!(SavingsHealth::from_rate(15.0), SavingsHealth::VeryGood);
        assert_eq!(SavingsHealth::from_rate(12.0), SavingsHealth::Good);
        assert_eq!(SavingsHealth::from_rate(5.0), SavingsHealth::Fair);
        assert_eq!(SavingsHealth::from_rate(0.0), SavingsHealth::Worrying);
        assert_eq!(SavingsHealth::from_rate(-0.1), SavingsHealth::Critical);
        assert_eq!(SavingsHealth::Fair.to_string(), "Razoável");
    }

    #[test]
    fn test_spending_opportunities_scenario_a() {
        // dining 80 > 75, groceries 250 > 225
        let found = spending_opportunities(&scenario_a(), 1500.0);
        let categories: Vec<_> = found.iter().map(|o| o.category).collect();
        assert_eq!(
            categories,
            vec![SpendingCategory::Dining, SpendingCategory::Groceries]
        );
        assert_eq!(found[0].yearly_savings, 480.0);
        assert!((found[1].yearly_savings - 450.0).abs() < 1e-9);
    }

    #[test]
    fn test_spending_opportunities_subscriptions_floor() {
        let finances = HouseholdFinances {
            subscriptions: 60.0,
            entertainment: 200.0,
            ..Default::default()
        };
        let found = spending_opportunities(&finances, 2000.0);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].category, SpendingCategory::Subscriptions);
        assert!((found[0].yearly_savings - 216.0).abs() < 1e-9);
        assert_eq!(found[1].category, SpendingCategory::Entertainment);
        assert!((found[1].yearly_savings - 720.0).abs() < 1e-9);
    }

    #[test]
    fn test_total_investments_requires_flag() {
        let mut finances = HouseholdFinances {
            investments: Investments {
                ppr: 2000.0,
                etfs: 3000.0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(total_investments(&finances), 0.0);
        finances.has_investments = true;
        assert_eq!(total_investments(&finances), 5000.0);
    }

    #[test]
    fn test_plan_scenario_a_sections() {
        let plan = compute_plan(&scenario_a(), plan_date());
        assert_eq!(plan.tier, Tier::StarterFund);
        assert_eq!(plan.income.average_monthly, 1500.0);
        assert_eq!(plan.income.subsidies, 3000.0);
        assert_eq!(plan.expenses.total, 1000.0);
        assert_eq!(plan.disposable.monthly, 500.0);
        assert_eq!(plan.savings.total_net_worth, 500.0);
        assert_eq!(plan.health, SavingsHealth::Excellent);
        assert_eq!(plan.projection.end_balance, 6500.0);
        assert_eq!(plan.ratios.housing_excess_monthly, 0.0);
        assert!(plan.debt.payoff.is_none());
    }

    #[test]
    fn test_plan_scenario_b_debt_section() {
        let plan = compute_plan(&scenario_b(), plan_date());
        assert_eq!(plan.tier, Tier::DebtElimination);
        assert_eq!(plan.debt.total_debt, 12_000.0);
        assert_eq!(plan.debt.total_non_mortgage_debt, 12_000.0);
        assert_eq!(plan.debt.avalanche[0].name, "Cartão de Crédito");
        assert_eq!(plan.savings.total_net_worth, -11_000.0);
        assert!(plan.debt.payoff.as_ref().unwrap().simulation.is_converged());
    }

    #[test]
    fn test_housing_excess() {
        let plan = compute_plan(&scenario_d(), plan_date());
        // 40% of 1500 against a 30% target
        assert!((plan.ratios.housing_excess_monthly - 150.0).abs() < 1e-9);
    }

    #[test]
    fn test_plan_with_clock_matches_plan() {
        let planner = Planner::new();
        let clock = FixedClock(plan_date());
        assert_eq!(
            planner.plan_with_clock(&scenario_b(), &clock),
            planner.plan(&scenario_b(), plan_date())
        );
    }

    #[test]
    fn test_negative_inputs_are_normalized() {
        let finances = HouseholdFinances {
            monthly_salary: 1500.0,
            rent: -400.0,
            current_savings: f64::NAN,
            ..Default::default()
        };
        let plan = compute_plan(&finances, plan_date());
        assert_eq!(plan.expenses.total, 0.0);
        assert_eq!(plan.savings.current_savings, 0.0);
        assert_eq!(plan.tier, Tier::StarterFund);
    }
}
