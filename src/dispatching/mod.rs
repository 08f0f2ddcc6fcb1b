//! Dispatching rules and rule engine for process selection.
//!
//! Non-preemptive policies and SRTF pick the next process by evaluating
//! a primary rule over every arrived process, falling back to tie-breaking
//! rules and finally to queue position.
//!
//! # Usage
//!
//! ```
//! use u_procsched::dispatching::{RuleEngine, SchedulingContext};
//! use u_procsched::dispatching::rules;
//! use u_procsched::models::ProcessControlBlock;
//!
//! let engine = RuleEngine::new()
//!     .with_rule(rules::ShortestJob)
//!     .with_tie_breaker(rules::FirstArrival);
//!
//! let processes = [
//!     ProcessControlBlock::new(8, 1, 0),
//!     ProcessControlBlock::new(3, 1, 0),
//!     ProcessControlBlock::new(1, 1, 9),
//! ];
//! let context = SchedulingContext::at_time(0);
//! assert_eq!(engine.select_best(&processes, &context), Some(1));
//! ```
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4

mod context;
mod engine;
pub mod rules;

pub use context::SchedulingContext;
pub use engine::RuleEngine;

use crate::models::ProcessControlBlock;
use std::fmt::Debug;

/// Score returned by a dispatching rule.
///
/// Lower scores = dispatched first.
pub type RuleScore = f64;

/// A dispatching rule that scores a process.
///
/// # Score Convention
/// **Lower score = higher priority.** Rules return smaller values for
/// processes that should run first.
pub trait DispatchingRule: Send + Sync + Debug {
    /// Rule name (e.g., "SJF", "FIFO").
    fn name(&self) -> &'static str;

    /// Evaluates a process given the current scheduling context.
    fn evaluate(&self, process: &ProcessControlBlock, context: &SchedulingContext) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
