//! Simulation of two-level adaptive branch predictors (GAg, GAs, SAg).
//!
//! Predictors are built from fixed-width bit-vector registers and
//! direct-mapped tables of saturating counters.

pub mod error;
pub mod bit;
pub mod branch;
pub mod hash;
pub mod history;
pub mod predictor;

pub use error::*;
pub use bit::*;
pub use branch::*;
pub use hash::*;
pub use history::*;
pub use predictor::*;
