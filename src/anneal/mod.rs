//! Simulated annealing schedule.
//!
//! The [`AnnealingScheduler`] owns the temperature, applies the cooling
//! schedule once per outer iteration, runs the Metropolis acceptance test,
//! and decides when the search is over. It knows nothing about points or
//! objectives; the hybrid optimizer feeds it costs.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Lundy & Mees (1986), "Convergence of an Annealing Algorithm"
//! - Tsallis & Stariolo (1996), "Generalized Simulated Annealing"
//! - Xiang, Sun, Fan & Gong (1997), "Generalized Simulated Annealing
//!   Algorithm and Its Application to the Thomson Model"

mod config;
mod scheduler;

pub use config::{
    AnnealConfig, CoolingSchedule, DEFAULT_FLOOR_RATIO, DEFAULT_INITIAL_TEMPERATURE,
    DEFAULT_VISIT,
};
pub use scheduler::{
    acceptance_probability, AnnealingScheduler, SchedulerState, TerminationReason,
};
