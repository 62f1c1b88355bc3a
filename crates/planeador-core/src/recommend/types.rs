//! Core types for the recommendation engine

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Urgency of a recommendation, used for global ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    /// Spending exceeds income
    #[serde(rename = "EMERGÊNCIA")]
    Emergency,
    #[serde(rename = "Crítica")]
    Critical,
    #[serde(rename = "Muito Alta")]
    VeryHigh,
    #[serde(rename = "Alta")]
    High,
    #[serde(rename = "Média")]
    Medium,
    #[serde(rename = "Baixa")]
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Emergency => "EMERGÊNCIA",
            Priority::Critical => "Crítica",
            Priority::VeryHigh => "Muito Alta",
            Priority::High => "Alta",
            Priority::Medium => "Média",
            Priority::Low => "Baixa",
        }
    }

    /// Sort rank (lower = shown first)
    pub fn rank(&self) -> i8 {
        match self {
            Priority::Emergency => -1,
            Priority::Critical => 0,
            Priority::VeryHigh => 1,
            Priority::High => 2,
            Priority::Medium => 3,
            Priority::Low => 4,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EMERGÊNCIA" => Ok(Priority::Emergency),
            "Crítica" => Ok(Priority::Critical),
            "Muito Alta" => Ok(Priority::VeryHigh),
            "Alta" => Ok(Priority::High),
            "Média" => Ok(Priority::Medium),
            "Baixa" => Ok(Priority::Low),
            _ => Err(format!("Unknown priority: {}", s)),
        }
    }
}

/// Primary tier of the household, exactly one per plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Build a €1000 liquid buffer
    StarterFund,
    /// Pay off non-mortgage debt, highest rate first
    DebtElimination,
    /// Grow savings to six months of expenses
    FullEmergencyFund,
    /// Raise investing to 15% of income
    Invest15,
    /// Keep going and optimize
    Optimize,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::StarterFund => "starter_fund",
            Tier::DebtElimination => "debt_elimination",
            Tier::FullEmergencyFund => "full_emergency_fund",
            Tier::Invest15 => "invest_15",
            Tier::Optimize => "optimize",
        }
    }

    /// Position in the decision chain, 1-based
    pub fn step(&self) -> u8 {
        match self {
            Tier::StarterFund => 1,
            Tier::DebtElimination => 2,
            Tier::FullEmergencyFund => 3,
            Tier::Invest15 => 4,
            Tier::Optimize => 5,
        }
    }

    /// Recommendation kind produced by this tier's primary recommendation
    pub fn kind(&self) -> RecommendationKind {
        match self {
            Tier::StarterFund => RecommendationKind::StarterFund,
            Tier::DebtElimination => RecommendationKind::DebtElimination,
            Tier::FullEmergencyFund => RecommendationKind::FullEmergencyFund,
            Tier::Invest15 => RecommendationKind::Invest15,
            Tier::Optimize => RecommendationKind::Optimize,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "starter_fund" => Ok(Tier::StarterFund),
            "debt_elimination" => Ok(Tier::DebtElimination),
            "full_emergency_fund" => Ok(Tier::FullEmergencyFund),
            "invest_15" => Ok(Tier::Invest15),
            "optimize" => Ok(Tier::Optimize),
            _ => Err(format!("Unknown tier: {}", s)),
        }
    }
}

/// Rule that produced a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    StarterFund,
    DebtElimination,
    /// Informational follow-up listing the full avalanche order
    DebtOrder,
    FullEmergencyFund,
    Invest15,
    Optimize,
    ExcessSavings,
    NegativeSavings,
    HousingCost,
    Subscriptions,
    SubsidyStrategy,
}

impl RecommendationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationKind::StarterFund => "starter_fund",
            RecommendationKind::DebtElimination => "debt_elimination",
            RecommendationKind::DebtOrder => "debt_order",
            RecommendationKind::FullEmergencyFund => "full_emergency_fund",
            RecommendationKind::Invest15 => "invest_15",
            RecommendationKind::Optimize => "optimize",
            RecommendationKind::ExcessSavings => "excess_savings",
            RecommendationKind::NegativeSavings => "negative_savings",
            RecommendationKind::HousingCost => "housing_cost",
            RecommendationKind::Subscriptions => "subscriptions",
            RecommendationKind::SubsidyStrategy => "subsidy_strategy",
        }
    }

    /// Whether this kind is the single primary recommendation of a tier
    pub fn is_primary(&self) -> bool {
        matches!(
            self,
            RecommendationKind::StarterFund
                | RecommendationKind::DebtElimination
                | RecommendationKind::FullEmergencyFund
                | RecommendationKind::Invest15
                | RecommendationKind::Optimize
        )
    }
}

impl fmt::Display for RecommendationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where a supplementary rule places its output before the final sort
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Append,
    Prepend,
}

/// One actionable recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub kind: RecommendationKind,
    pub priority: Priority,
    /// Step label, e.g. "PASSO 1"
    pub step: String,
    /// Category label, e.g. "🎯 Fundo de Emergência Inicial"
    pub category: String,
    pub action: String,
    pub impact: String,
    pub timeline: String,
    pub action_steps: Vec<String>,
    /// Rule-specific structured figures
    pub data: serde_json::Value,
}

impl Recommendation {
    pub fn new(
        kind: RecommendationKind,
        priority: Priority,
        step: impl Into<String>,
        category: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            priority,
            step: step.into(),
            category: category.into(),
            action: action.into(),
            impact: String::new(),
            timeline: String::new(),
            action_steps: vec![],
            data: serde_json::Value::Null,
        }
    }

    pub fn with_impact(mut self, impact: impl Into<String>) -> Self {
        self.impact = impact.into();
        self
    }

    pub fn with_timeline(mut self, timeline: impl Into<String>) -> Self {
        self.timeline = timeline.into();
        self
    }

    pub fn with_steps<I, S>(mut self, steps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.action_steps = steps.into_iter().map(Into::into).collect();
        self
    }

    /// Attach a typed payload; serialization failures leave `data` as null
    pub fn with_data<T: Serialize>(mut self, data: &T) -> Self {
        self.data = serde_json::to_value(data).unwrap_or(serde_json::Value::Null);
        self
    }
}

// ========== Rule-specific data ==========

/// Data for the starter-fund recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarterFundData {
    pub target: f64,
    pub needed: f64,
    pub monthly_disposable: f64,
    /// None when disposable income is not positive
    pub months_to_target: Option<u32>,
}

/// Data for the debt-elimination recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtEliminationData {
    pub debt_count: usize,
    pub total_non_mortgage_debt: f64,
    pub total_debt_payment: f64,
    pub target: String,
    pub extra_payment: f64,
    pub new_monthly_payment: f64,
    pub converged: bool,
    pub months_saved: Option<i64>,
    pub interest_saved: Option<f64>,
    pub months_to_debt_free: Option<u32>,
    /// e.g. "março de 2028"
    pub debt_free_by: Option<String>,
}

/// Data for the full-emergency-fund recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergencyFundData {
    pub recommended: f64,
    pub needed: f64,
    pub monthly_disposable: f64,
    pub months_to_target: Option<u32>,
    pub target_date: Option<String>,
    pub total_investments: f64,
}

/// Data for the invest-15% recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestData {
    pub monthly_target: f64,
    pub current_monthly: f64,
    pub gap: f64,
    pub savings_rate: f64,
    pub years: u32,
    pub contributed: f64,
    pub future_value: f64,
    pub existing_investments: f64,
    pub existing_future_value: f64,
    pub total_future_value: f64,
}

/// Data for the optimize recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizeData {
    pub monthly_investment: f64,
    pub future_value: f64,
    pub fi_target: f64,
    /// None when the target is not reached within the cap
    pub years_to_fi: Option<u32>,
    pub fi_age: Option<u32>,
}

/// Data for the excess-savings recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExcessSavingsData {
    pub excess_savings: f64,
    pub projections: Vec<crate::projection::HorizonValue>,
}

/// Data for the negative-savings alert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NegativeSavingsData {
    pub monthly_shortfall: f64,
    pub savings_rate: f64,
}

/// Data for the housing-cost recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HousingCostData {
    pub housing_ratio: f64,
    pub target_ratio: f64,
    pub yearly_savings_if_reduced: f64,
}

/// Data for the subscriptions recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionsData {
    pub monthly: f64,
    pub yearly: f64,
    pub half_cut_yearly: f64,
}

/// Data for the subsidy-strategy recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubsidyStrategyData {
    pub subsidies_total: f64,
    pub tier: Tier,
    pub suggested_use: String,
}
