//! Planeador Core Library
//!
//! Household finance planning for Portuguese households:
//! - Snapshot model with lenient parsing (JSON/TOML)
//! - Aggregation of income, expenses and ratios
//! - Debt avalanche ordering and bounded payoff simulation
//! - Tiered recommendation engine with pluggable supplementary rules
//! - Compound-growth projections
//! - Plan assembly behind a single `compute_plan(snapshot, today)` call

pub mod aggregate;
pub mod clock;
pub mod config;
pub mod debt;
pub mod error;
pub mod format;
pub mod models;
pub mod plan;
pub mod projection;
pub mod recommend;
pub mod snapshot;

/// Snapshot fixtures for tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use aggregate::{aggregate, Aggregates};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::PlannerConfig;
pub use debt::{AcceleratedPayoff, DebtEntry, DebtPlan, PayoffSimulation};
pub use error::{Error, Result};
pub use models::{HouseholdFinances, Investments, Loan};
pub use plan::{compute_plan, Plan, Planner, SavingsHealth, SpendingCategory, SpendingOpportunity};
pub use projection::{YearProjection, YearsToTarget};
pub use recommend::{Priority, Recommendation, RecommendationEngine, RecommendationKind, Tier};
pub use snapshot::SnapshotFormat;
