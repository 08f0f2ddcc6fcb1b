//! Owned containers used by the simulator.
//!
//! # Types
//!
//! - **`DynArray<T>`**: resizable array with power-of-two growth, a hard
//!   capacity ceiling, block-move shifting, and an optional per-element
//!   destructor. Every ready queue in the crate is a `DynArray`.
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 17.4 (Dynamic Tables)

mod dyn_array;

pub use dyn_array::{Destructor, DynArray, DynArrayError, MAX_CAPACITY, MIN_CAPACITY};
