//! Global optimization over box-bounded real domains.
//!
//! Combines simulated annealing with memetic hill climbing:
//!
//! - **Bounds** ([`bounds`]): per-dimension intervals, clamping, random
//!   sampling and hollow perturbations. Nothing ever leaves the box.
//! - **Objective** ([`objective`]): a single-method trait for black-box
//!   cost functions and a budgeted evaluator that turns NaN and infinite
//!   values into `+inf` instead of failing.
//! - **Local climber** ([`climber`]): strict greedy refinement of each
//!   candidate before it is judged; never returns a worse point.
//! - **Annealing scheduler** ([`anneal`]): temperature schedule,
//!   Metropolis acceptance and stopping rules.
//! - **Hybrid optimizer** ([`hybrid`]): the main loop tying them together,
//!   with reheat/respawn restarts and an optional final polish.
//!
//! # Example
//!
//! ```
//! use memetic_anneal::{Bounds, HybridConfig, HybridRunner};
//!
//! let rastrigin = |x: &[f64]| {
//!     10.0 * x.len() as f64
//!         + x.iter()
//!             .map(|v| v * v - 10.0 * (2.0 * std::f64::consts::PI * v).cos())
//!             .sum::<f64>()
//! };
//! let bounds = Bounds::uniform(-5.12, 5.12, 2).unwrap();
//! let config = HybridConfig::default().with_max_evaluations(20_000).with_seed(42);
//!
//! let result = HybridRunner::run(&rastrigin, &bounds, &config).unwrap();
//! assert!(bounds.contains(&result.best));
//! assert!(result.evaluations <= 20_000);
//! ```
//!
//! Runs are single-threaded. A fixed seed makes a run reproducible bit for
//! bit; independent runs can be spread over threads by the caller.

pub mod anneal;
pub mod bounds;
pub mod climber;
pub mod error;
pub mod hybrid;
pub mod objective;

pub use anneal::{AnnealConfig, CoolingSchedule, TerminationReason};
pub use bounds::{Bounds, Candidate, Perturbation};
pub use climber::{ClimberConfig, LocalClimber};
pub use error::ConfigError;
pub use hybrid::{optimize, HybridConfig, HybridResult, HybridRunner, RestartPolicy};
pub use objective::{Evaluator, Objective};
