//! Hybrid simulated annealing with memetic climbing.
//!
//! The outer loop is classic simulated annealing over a single incumbent.
//! Every global proposal is first refined by the [`LocalClimber`], and
//! only the refined point faces the Metropolis test. The global best is
//! tracked separately from the incumbent, so a rejected candidate can
//! still become the answer.
//!
//! Restarts counter premature convergence: after a configurable stall the
//! temperature is reheated and, optionally, the incumbent is moved to a
//! fresh random point.
//!
//! # References
//!
//! - Xiang et al. (1997), dual annealing
//! - Moscato (1989), memetic algorithms
//!
//! [`LocalClimber`]: crate::climber::LocalClimber

mod config;
mod runner;

pub use config::{HybridConfig, RestartPolicy};
pub use runner::{optimize, HybridResult, HybridRunner};
