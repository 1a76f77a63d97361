//! Annealing state machine and acceptance rule.

use super::config::{AnnealConfig, CoolingSchedule};
use crate::error::Result;
use rand::Rng;
use tracing::debug;

/// Scheduler state.
///
/// `Cooling` is transient: [`AnnealingScheduler::advance`] enters it to
/// update the temperature and leaves it before returning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Running,
    Cooling,
    Terminated,
}

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerminationReason {
    /// The evaluation budget was used up.
    BudgetExhausted,
    /// The temperature fell below `min_temperature`.
    TemperatureFloor,
    /// `max_iterations` outer iterations were completed.
    IterationCap,
    /// The cancel flag was raised.
    Cancelled,
    /// Every dimension has zero width; there is nothing to search.
    DegenerateDomain,
}

/// Metropolis acceptance probability of moving from `current_cost` to
/// `candidate_cost` at `temperature`.
///
/// Equal or lower candidate costs are always accepted (probability 1),
/// which keeps the search moving across flat regions. An infinite
/// candidate cost is never accepted against a finite incumbent.
///
/// ```
/// use memetic_anneal::anneal::acceptance_probability;
///
/// assert_eq!(acceptance_probability(1.0, 1.0, 0.5), 1.0);
/// assert!((acceptance_probability(0.0, 2.0, 2.0) - (-1.0f64).exp()).abs() < 1e-15);
/// ```
pub fn acceptance_probability(current_cost: f64, candidate_cost: f64, temperature: f64) -> f64 {
    if candidate_cost.is_nan() {
        return 0.0;
    }
    if candidate_cost <= current_cost {
        return 1.0;
    }
    if temperature <= 0.0 {
        return 0.0;
    }
    (-(candidate_cost - current_cost) / temperature).exp()
}

/// Owns the temperature and decides acceptance and termination.
///
/// # Transitions
///
/// - `Running → Cooling` on [`advance`](Self::advance), which applies one
///   cooling step.
/// - `Cooling → Running` immediately afterwards, unless a stopping rule
///   fires.
/// - `Running → Terminated` when the budget is exhausted, the
///   temperature drops below the floor, the iteration cap is reached, or
///   [`terminate`](Self::terminate) is called.
///
/// The temperature never increases except through [`reheat`](Self::reheat).
#[derive(Debug, Clone)]
pub struct AnnealingScheduler {
    config: AnnealConfig,
    temperature: f64,
    step: usize,
    iterations: usize,
    reheats: usize,
    state: SchedulerState,
    termination: Option<TerminationReason>,
}

impl AnnealingScheduler {
    /// Validates `config` and starts at the initial temperature.
    pub fn new(config: AnnealConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            temperature: config.initial_temperature,
            config,
            step: 0,
            iterations: 0,
            reheats: 0,
            state: SchedulerState::Running,
            termination: None,
        })
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn is_terminated(&self) -> bool {
        self.state == SchedulerState::Terminated
    }

    /// Why the scheduler terminated, if it has.
    pub fn termination(&self) -> Option<TerminationReason> {
        self.termination
    }

    /// Outer iterations completed (not reset by reheating).
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Cooling steps since the start or the last reheat.
    pub fn step(&self) -> usize {
        self.step
    }

    pub fn reheats(&self) -> usize {
        self.reheats
    }

    /// Metropolis test: accept improvements and ties outright, otherwise
    /// draw one uniform number against [`acceptance_probability`].
    pub fn accept<R: Rng + ?Sized>(
        &self,
        current_cost: f64,
        candidate_cost: f64,
        rng: &mut R,
    ) -> bool {
        let p = acceptance_probability(current_cost, candidate_cost, self.temperature);
        if p >= 1.0 {
            return true;
        }
        rng.random::<f64>() < p
    }

    /// Ends one outer iteration: cools, then checks the stopping rules.
    ///
    /// Does nothing once terminated.
    pub fn advance(&mut self, budget_exhausted: bool) -> SchedulerState {
        if self.is_terminated() {
            return self.state;
        }

        self.state = SchedulerState::Cooling;
        self.iterations += 1;
        self.step += 1;
        self.temperature = self.cool();

        if budget_exhausted {
            self.terminate(TerminationReason::BudgetExhausted);
        } else if self.config.max_iterations > 0 && self.iterations >= self.config.max_iterations {
            self.terminate(TerminationReason::IterationCap);
        } else if self.temperature < self.config.min_temperature {
            self.terminate(TerminationReason::TemperatureFloor);
        } else {
            self.state = SchedulerState::Running;
        }
        self.state
    }

    /// Restores the initial temperature and restarts the schedule.
    pub fn reheat(&mut self) {
        if self.is_terminated() {
            return;
        }
        debug!(
            iteration = self.iterations,
            from = self.temperature,
            to = self.config.initial_temperature,
            "reheating"
        );
        self.temperature = self.config.initial_temperature;
        self.step = 0;
        self.reheats += 1;
    }

    /// Stops the schedule. The first reason given is kept.
    pub fn terminate(&mut self, reason: TerminationReason) {
        if self.termination.is_none() {
            debug!(?reason, iteration = self.iterations, "annealing terminated");
            self.termination = Some(reason);
        }
        self.state = SchedulerState::Terminated;
    }

    /// Temperature after `self.step` cooling steps.
    fn cool(&self) -> f64 {
        let t0 = self.config.initial_temperature;
        let k = self.step as f64;
        match self.config.cooling {
            CoolingSchedule::Geometric { alpha } => self.temperature * alpha,

            CoolingSchedule::Linear => {
                let span = t0 - self.config.min_temperature;
                let t = t0 - k * span / self.config.max_iterations as f64;
                t.max(self.config.min_temperature)
            }

            CoolingSchedule::LundyMees { beta } => {
                self.temperature / (1.0 + beta * self.temperature)
            }

            CoolingSchedule::Visiting { qv } => {
                let t1 = 2f64.powf(qv - 1.0) - 1.0;
                let t2 = (k + 2.0).powf(qv - 1.0) - 1.0;
                t0 * t1 / t2
            }
        }
    }
}
