//! Optimizer configuration.

use joinplan_core::CostConstants;

/// When a split point also competes as a cross join.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CrossJoinPolicy {
    /// Only when none of the split's predicate candidates became the running best.
    ///
    /// Covers splits with no connecting predicate and splits whose predicates
    /// are all infeasible.
    #[default]
    Fallback,
    /// At every split, alongside the predicate candidates.
    Always,
}

/// Optimizer configuration.
///
/// # Examples
///
/// ```
/// use joinplan_engine::{Config, CrossJoinPolicy};
///
/// let config = Config::default()
///     .with_parallel(true)
///     .with_cross_join(CrossJoinPolicy::Always);
/// assert!(config.memoize);
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Per-row constants of the join cost model.
    pub cost: CostConstants,
    /// Cross-join candidate policy.
    pub cross_join: CrossJoinPolicy,
    /// Cache sub-sequence results across split points.
    pub memoize: bool,
    /// Solve the halves of every split point on the rayon pool.
    pub parallel: bool,
    /// Shortest sequence for which split points are solved in parallel.
    pub parallel_threshold: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cost: CostConstants::default(),
            cross_join: CrossJoinPolicy::Fallback,
            memoize: true,
            parallel: false,
            parallel_threshold: 6,
        }
    }
}

impl Config {
    /// Sets the cost model constants.
    #[must_use]
    pub fn with_cost_constants(mut self, cost: CostConstants) -> Self {
        self.cost = cost;
        self
    }

    /// Sets the cross-join policy.
    #[must_use]
    pub fn with_cross_join(mut self, policy: CrossJoinPolicy) -> Self {
        self.cross_join = policy;
        self
    }

    /// Enables or disables memoization.
    #[must_use]
    pub fn with_memoization(mut self, enabled: bool) -> Self {
        self.memoize = enabled;
        self
    }

    /// Enables or disables parallel split evaluation.
    #[must_use]
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Sets the parallel threshold. Values below 2 are treated as 2.
    #[must_use]
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold.max(2);
        self
    }
}
