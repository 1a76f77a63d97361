//! Memetic climbing: local refinement of annealing candidates.
//!
//! Each global candidate is improved by strict greedy hill climbing
//! before the annealing acceptance test sees it. Acceptance randomness
//! stays in the annealing layer; the climber only ever moves downhill,
//! so its output is never worse than its input.
//!
//! A deterministic compass search ([`LocalClimber::polish`]) is also
//! available for a final clean-up of the best point.
//!
//! # References
//!
//! - Moscato, P. (1989), "On Evolution, Search, Optimization, Genetic
//!   Algorithms and Martial Arts: Towards Memetic Algorithms"
//! - Kolda, Lewis & Torczon (2003), "Optimization by Direct Search"

mod config;
mod runner;

pub use config::ClimberConfig;
pub use runner::{ClimbOutcome, LocalClimber};
