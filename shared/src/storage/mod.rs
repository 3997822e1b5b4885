//! In-memory record storage.
//!
//! The [`Accumulator`] is the only mutable shared resource of the receiver:
//! one instance per signal holds every export request received since the
//! last reset.

pub mod accumulator;

pub use accumulator::{Accumulator, AccumulatorError};
