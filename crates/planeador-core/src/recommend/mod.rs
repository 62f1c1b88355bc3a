//! Recommendation Engine - prioritized, actionable guidance
//!
//! A household is placed in exactly one of five primary tiers, evaluated as an
//! ordered guard chain (first match wins). Independent supplementary rules run
//! on every plan and may add any number of further recommendations. The final
//! list is ordered by priority rank with a stable sort.
//!
//! ## Tiers
//!
//! 1. **Starter fund** - reach a €1000 liquid buffer
//! 2. **Debt elimination** - avalanche payoff of non-mortgage debt
//! 3. **Full emergency fund** - six months of expenses
//! 4. **Invest 15%** - raise investing to 15% of income
//! 5. **Optimize** - keep going, estimate financial independence
//!
//! ## Usage
//!
//! ```rust,ignore
//! use planeador_core::recommend::{RecommendationContext, RecommendationEngine};
//!
//! let engine = RecommendationEngine::new();
//! let set = engine.recommend(&ctx);
//! println!("{} recommendations for tier {}", set.items.len(), set.tier);
//! ```

pub mod engine;
pub mod supplementary;
pub mod tiers;
pub mod types;

pub use engine::{RecommendationContext, RecommendationEngine, RecommendationRule, RecommendationSet};
pub use supplementary::{
    ExcessSavingsRule, HousingCostRule, NegativeSavingsRule, SubscriptionsRule,
    SubsidyStrategyRule,
};
pub use tiers::{classify_tier, TierFacts};
pub use types::{
    DebtEliminationData, EmergencyFundData, ExcessSavingsData, HousingCostData, InvestData,
    NegativeSavingsData, OptimizeData, Placement, Priority, Recommendation, RecommendationKind,
    StarterFundData, SubscriptionsData, SubsidyStrategyData, Tier,
};
