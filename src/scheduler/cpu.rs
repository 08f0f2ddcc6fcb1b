//! Virtual CPU: the simulation clock and the "run one unit" primitive.

use crate::dispatching::SchedulingContext;
use crate::models::ProcessControlBlock;

/// Simulated single-core CPU.
///
/// Running a process for one time unit decrements its remaining burst
/// time and advances the clock by one. Idling moves the clock without
/// touching any process.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VirtualCpu {
    clock: u64,
}

impl VirtualCpu {
    /// Creates a CPU whose clock starts at `clock`.
    pub fn starting_at(clock: u64) -> Self {
        Self { clock }
    }

    /// Current simulation time.
    pub fn clock(&self) -> u64 {
        self.clock
    }

    /// Dispatch context for the current time.
    pub fn context(&self) -> SchedulingContext {
        SchedulingContext::at_time(self.clock)
    }

    /// Advances the clock to `time` if it lies in the future.
    pub fn idle_until(&mut self, time: u64) {
        self.clock = self.clock.max(time);
    }

    /// Runs `process` for one time unit. Returns units executed (0 or 1).
    pub fn tick(&mut self, process: &mut ProcessControlBlock) -> u32 {
        self.run(process, 1)
    }

    /// Runs `process` for up to `units`, stopping early when it completes.
    ///
    /// Returns the number of units actually executed. Equivalent to
    /// calling [`tick`](Self::tick) that many times.
    pub fn run(&mut self, process: &mut ProcessControlBlock, units: u32) -> u32 {
        let executed = units.min(process.remaining_burst_time);
        process.remaining_burst_time -= executed;
        self.clock += u64::from(executed);
        executed
    }

    /// Runs `process` until its remaining burst time reaches zero.
    pub fn run_to_completion(&mut self, process: &mut ProcessControlBlock) -> u32 {
        self.run(process, process.remaining_burst_time)
    }
}
