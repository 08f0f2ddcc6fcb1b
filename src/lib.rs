//! CPU process scheduling simulator.
//!
//! Loads process control blocks from a flat binary file into an owned
//! dynamic array and simulates classic single-core scheduling policies
//! over them, reporting average waiting time, average turnaround time
//! and total CPU-busy time.
//!
//! # Modules
//!
//! - **`collections`**: `DynArray<T>`, the ready-queue container
//! - **`models`**: `ProcessControlBlock`, `ScheduleResult`
//! - **`validation`**: Input checks run before any policy mutates a queue
//! - **`dispatching`**: Scoring rules and the rule engine that picks the
//!   next process
//! - **`scheduler`**: FCFS, SJF, Priority, Round Robin, SRTF
//! - **`loader`**: Binary file reader and writer
//! - **`workload`**: Random workload generation
//! - **`config`** / **`analysis`**: Settings and pipeline behind the
//!   `analysis` binary
//!
//! # Example
//!
//! ```
//! use u_procsched::collections::DynArray;
//! use u_procsched::models::ProcessControlBlock;
//! use u_procsched::scheduler;
//!
//! let mut ready_queue = DynArray::import(&[
//!     ProcessControlBlock::new(5, 1, 0),
//!     ProcessControlBlock::new(3, 1, 0),
//!     ProcessControlBlock::new(8, 1, 0),
//! ], None).unwrap();
//!
//! let result = scheduler::first_come_first_serve(&mut ready_queue).unwrap();
//! assert_eq!(result.total_run_time, 16);
//! assert!(ready_queue.is_empty());
//! ```
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

pub mod analysis;
pub mod collections;
pub mod config;
pub mod dispatching;
pub mod loader;
pub mod models;
pub mod scheduler;
pub mod validation;
pub mod workload;
