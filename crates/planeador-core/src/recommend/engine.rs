//! Recommendation engine - picks the primary tier and runs the supplementary rules

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aggregate::Aggregates;
use crate::config::PlannerConfig;
use crate::debt::DebtPlan;
use crate::models::HouseholdFinances;

use super::supplementary::{
    ExcessSavingsRule, HousingCostRule, NegativeSavingsRule, SubscriptionsRule,
    SubsidyStrategyRule,
};
use super::tiers::{classify_tier, primary_recommendations, TierFacts};
use super::types::{Placement, Recommendation, RecommendationKind, Tier};

/// Everything a rule may look at
pub struct RecommendationContext<'a> {
    /// Normalized snapshot
    pub finances: &'a HouseholdFinances,
    pub aggregates: &'a Aggregates,
    pub debt: &'a DebtPlan,
    /// Sum of the investment categories, 0 when the household has none
    pub total_investments: f64,
    /// Planning date used for target-date strings
    pub today: NaiveDate,
    pub config: &'a PlannerConfig,
}

impl RecommendationContext<'_> {
    pub fn tier_facts(&self) -> TierFacts {
        TierFacts {
            current_savings: self.finances.current_savings,
            non_mortgage_debt: self.debt.total_non_mortgage_debt,
            recommended_emergency_fund: self.aggregates.recommended_emergency_fund,
            savings_rate: self.aggregates.savings_rate,
        }
    }

    pub fn tier(&self) -> Tier {
        classify_tier(&self.tier_facts(), self.config)
    }
}

/// A supplementary rule, evaluated regardless of the primary tier
pub trait RecommendationRule: Send + Sync {
    /// Kind of recommendation this rule produces
    fn kind(&self) -> RecommendationKind;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Where the output goes before the final sort
    fn placement(&self) -> Placement {
        Placement::Append
    }

    /// Produce a recommendation when the rule applies
    fn evaluate(&self, ctx: &RecommendationContext<'_>) -> Option<Recommendation>;
}

/// Engine output: the selected tier and the ordered recommendations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationSet {
    pub tier: Tier,
    pub items: Vec<Recommendation>,
}

/// Runs the tier chain and the registered supplementary rules
pub struct RecommendationEngine {
    rules: Vec<Box<dyn RecommendationRule>>,
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RecommendationEngine {
    /// Create an engine with the built-in supplementary rules
    pub fn new() -> Self {
        let mut engine = Self { rules: vec![] };

        engine.register(Box::new(ExcessSavingsRule));
        engine.register(Box::new(NegativeSavingsRule));
        engine.register(Box::new(HousingCostRule));
        engine.register(Box::new(SubscriptionsRule));
        engine.register(Box::new(SubsidyStrategyRule));

        engine
    }

    /// Register a supplementary rule; rules run in registration order
    pub fn register(&mut self, rule: Box<dyn RecommendationRule>) {
        self.rules.push(rule);
    }

    /// Evaluate the tier chain and every rule, then order by priority
    pub fn recommend(&self, ctx: &RecommendationContext<'_>) -> RecommendationSet {
        let tier = ctx.tier();
        debug!(tier = tier.as_str(), "Primary tier selected");

        let mut items = primary_recommendations(tier, ctx);

        for rule in &self.rules {
            if let Some(rec) = rule.evaluate(ctx) {
                debug!(rule = rule.name(), kind = rule.kind().as_str(), "Supplementary rule fired");
                match rule.placement() {
                    Placement::Append => items.push(rec),
                    Placement::Prepend => items.insert(0, rec),
                }
            }
        }

        // Stable: equal priorities keep insertion order
        items.sort_by_key(|rec| rec.priority.rank());

        RecommendationSet { tier, items }
    }

    /// Kinds of the registered supplementary rules
    pub fn rule_kinds(&self) -> Vec<RecommendationKind> {
        self.rules.iter().map(|r| r.kind()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use crate::debt::plan_debts;
    use crate::recommend::types::Priority;
    use crate::test_utils::{overspending, plan_date, scenario_a, scenario_b, scenario_d};

    fn run(engine: &RecommendationEngine, finances: &HouseholdFinances) -> RecommendationSet {
        let config = PlannerConfig::default();
        let finances = finances.normalized();
        let aggregates = aggregate(&finances, &config);
        let debt = plan_debts(&finances, aggregates.monthly_disposable, &config);
        let ctx = RecommendationContext {
            finances: &finances,
            aggregates: &aggregates,
            debt: &debt,
            total_investments: 0.0,
            today: plan_date(),
            config: &config,
        };
        engine.recommend(&ctx)
    }

    struct AlwaysLow;

    impl RecommendationRule for AlwaysLow {
        fn kind(&self) -> RecommendationKind {
            RecommendationKind::Subscriptions
        }

        fn name(&self) -> &'static str {
            "Always low"
        }

        fn evaluate(&self, _ctx: &RecommendationContext<'_>) -> Option<Recommendation> {
            Some(Recommendation::new(
                self.kind(),
                Priority::Low,
                "TESTE",
                "Teste",
                "sempre",
            ))
        }
    }

    #[test]
    fn test_engine_creation() {
        let kinds = RecommendationEngine::new().rule_kinds();
        assert_eq!(
            kinds,
            vec![
                RecommendationKind::ExcessSavings,
                RecommendationKind::NegativeSavings,
                RecommendationKind::HousingCost,
                RecommendationKind::Subscriptions,
                RecommendationKind::SubsidyStrategy,
            ]
        );
    }

    #[test]
    fn test_scenario_a_order() {
        let set = run(&RecommendationEngine::new(), &scenario_a());
        assert_eq!(set.tier, Tier::StarterFund);

        let kinds: Vec<_> = set.items.iter().map(|r| r.kind).collect();
        // Crítica before Alta
        assert_eq!(
            kinds,
            vec![
                RecommendationKind::StarterFund,
                RecommendationKind::SubsidyStrategy
            ]
        );
    }

    #[test]
    fn test_scenario_b_debt_order_follows_primary() {
        let set = run(&RecommendationEngine::new(), &scenario_b());
        assert_eq!(set.tier, Tier::DebtElimination);

        let kinds: Vec<_> = set.items.iter().map(|r| r.kind).collect();
        // Both Alta; debt order was inserted before the subsidy strategy
        assert_eq!(
            kinds,
            vec![
                RecommendationKind::DebtElimination,
                RecommendationKind::DebtOrder,
                RecommendationKind::SubsidyStrategy
            ]
        );
    }

    #[test]
    fn test_negative_savings_first() {
        let set = run(&RecommendationEngine::new(), &overspending());
        assert_eq!(set.items[0].kind, RecommendationKind::NegativeSavings);
        assert_eq!(set.items[0].priority, Priority::Emergency);
        assert!(set
            .items
            .windows(2)
            .all(|w| w[0].priority.rank() <= w[1].priority.rank()));
    }

    #[test]
    fn test_registered_rule_runs_and_sorts_stably() {
        let mut engine = RecommendationEngine::new();
        engine.register(Box::new(AlwaysLow));

        let set = run(&engine, &scenario_d());
        assert_eq!(set.tier, Tier::Optimize);

        // Optimize (Baixa) was inserted before the custom Baixa rule
        let low: Vec<_> = set
            .items
            .iter()
            .filter(|r| r.priority == Priority::Low)
            .map(|r| r.step.as_str())
            .collect();
        assert_eq!(low, vec!["🌟 PARABÉNS", "TESTE"]);
        assert_eq!(set.items[0].kind, RecommendationKind::ExcessSavings);
    }
}
