//! Rule engine for multi-criteria process selection.
//!
//! Applies rules in sequence: the next rule is consulted only when every
//! earlier rule ties. When all rules tie, the process closest to the
//! front of the queue wins, which keeps selection deterministic.

use std::cmp::Ordering;
use std::sync::Arc;

use super::{DispatchingRule, RuleScore, SchedulingContext};
use crate::models::ProcessControlBlock;

/// A composable rule engine for process selection.
///
/// # Example
/// ```
/// use u_procsched::dispatching::RuleEngine;
/// use u_procsched::dispatching::rules;
///
/// let engine = RuleEngine::new()
///     .with_rule(rules::HighestPriority)
///     .with_tie_breaker(rules::FirstArrival);
/// assert_eq!(engine.rule_names(), vec!["PRIORITY", "FIFO"]);
/// ```
#[derive(Clone)]
pub struct RuleEngine {
    rules: Vec<Arc<dyn DispatchingRule>>,
    epsilon: f64,
}

impl RuleEngine {
    /// Creates an empty rule engine (pure queue order).
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            epsilon: 1e-9,
        }
    }

    /// Adds the primary rule.
    pub fn with_rule<R: DispatchingRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Adds a tie-breaking rule, consulted when all earlier rules tie.
    pub fn with_tie_breaker<R: DispatchingRule + 'static>(self, rule: R) -> Self {
        self.with_rule(rule)
    }

    /// Names of the configured rules, in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    /// Returns the index of the best eligible (arrived) process.
    ///
    /// `None` if no process has arrived by `context.current_time`.
    /// Ties after all rules go to the lowest index.
    pub fn select_best(
        &self,
        processes: &[ProcessControlBlock],
        context: &SchedulingContext,
    ) -> Option<usize> {
        processes
            .iter()
            .enumerate()
            .filter(|(_, process)| context.is_eligible(process))
            .min_by(|(ia, a), (ib, b)| {
                self.compare_sequential(a, b, context).then(ia.cmp(ib))
            })
            .map(|(index, _)| index)
    }

    /// Evaluates a single process and returns the score from each rule.
    pub fn evaluate(
        &self,
        process: &ProcessControlBlock,
        context: &SchedulingContext,
    ) -> Vec<RuleScore> {
        self.rules
            .iter()
            .map(|rule| rule.evaluate(process, context))
            .collect()
    }

    fn compare_sequential(
        &self,
        a: &ProcessControlBlock,
        b: &ProcessControlBlock,
        context: &SchedulingContext,
    ) -> Ordering {
        for rule in &self.rules {
            let score_a = rule.evaluate(a, context);
            let score_b = rule.evaluate(b, context);

            if (score_a - score_b).abs() > self.epsilon {
                return score_a.partial_cmp(&score_b).unwrap_or(Ordering::Equal);
            }
        }
        Ordering::Equal
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field("rules", &self.rule_names())
            .finish()
    }
}
