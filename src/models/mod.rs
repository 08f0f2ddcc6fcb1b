//! Process scheduling domain models.
//!
//! Provides the data types consumed and produced by the scheduling
//! policies.
//!
//! # Domain Mappings
//!
//! | u-procsched | OS textbook |
//! |-------------|-------------|
//! | ProcessControlBlock | PCB / job |
//! | ScheduleResult | Scheduling criteria |

mod process;
mod result;

pub use process::ProcessControlBlock;
pub use result::{ScheduleResult, ScheduleStats};
