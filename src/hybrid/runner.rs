//! Hybrid annealing execution loop.

use super::config::{HybridConfig, RestartPolicy};
use crate::anneal::{AnnealingScheduler, TerminationReason};
use crate::bounds::{Bounds, Candidate, Perturbation};
use crate::climber::LocalClimber;
use crate::error::Result;
use crate::objective::{Evaluator, Objective};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, trace};

/// Result of a hybrid annealing run.
#[derive(Debug, Clone)]
pub struct HybridResult {
    /// The best point found.
    pub best: Vec<f64>,

    /// Cost of the best point (`+inf` if every evaluation was non-finite).
    pub best_cost: f64,

    /// Objective evaluations consumed. Never exceeds the budget.
    pub evaluations: usize,

    /// Outer annealing iterations completed.
    pub iterations: usize,

    /// Temperature when the run stopped.
    pub final_temperature: f64,

    /// Refined candidates accepted as the new incumbent.
    pub accepted_moves: usize,

    /// Accepted candidates that were strictly better than the incumbent.
    pub improving_moves: usize,

    /// Restarts triggered by the restart policy.
    pub restarts: usize,

    /// Evaluations that returned NaN or an infinity.
    pub anomalies: usize,

    /// Why the run stopped.
    pub termination: TerminationReason,

    /// Best cost after initialization and after each outer iteration.
    pub cost_history: Vec<f64>,
}

/// Executes hybrid simulated annealing with memetic climbing.
///
/// # Algorithm
///
/// 1. Start from the configured point (clamped) or a uniform random one.
/// 2. Each outer iteration:
///    a. perturb the incumbent along every coordinate with the global step;
///    b. refine the proposal with [`LocalClimber::climb`], whose final
///    cost is reused as the candidate's cost;
///    c. run the Metropolis test against the incumbent;
///    d. record a new global best on strict improvement, accepted or not;
///    e. cool down, check stopping rules, apply the restart policy.
/// 3. Optionally polish the best point with any remaining budget.
pub struct HybridRunner;

impl HybridRunner {
    /// Runs the optimizer.
    ///
    /// # Examples
    ///
    /// ```
    /// use memetic_anneal::{Bounds, HybridConfig, HybridRunner};
    ///
    /// let sphere = |x: &[f64]| x.iter().map(|v| v * v).sum::<f64>();
    /// let bounds = Bounds::uniform(-5.0, 5.0, 2).unwrap();
    /// let config = HybridConfig::default().with_max_evaluations(2_000).with_seed(1);
    ///
    /// let result = HybridRunner::run(&sphere, &bounds, &config).unwrap();
    /// assert!(result.best_cost < 1e-3);
    /// assert!(result.evaluations <= 2_000);
    /// ```
    pub fn run<O: Objective + ?Sized>(
        objective: &O,
        bounds: &Bounds,
        config: &HybridConfig,
    ) -> Result<HybridResult> {
        Self::run_with_cancel(objective, bounds, config, None)
    }

    /// Runs the optimizer with an optional cancellation token.
    ///
    /// The flag is checked once per outer iteration.
    pub fn run_with_cancel<O: Objective + ?Sized>(
        objective: &O,
        bounds: &Bounds,
        config: &HybridConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<HybridResult> {
        config.validate_for(bounds)?;
        let scheduler = AnnealingScheduler::new(config.anneal.clone())?;

        let seed = config.seed.unwrap_or_else(rand::random);
        info!(
            dimension = bounds.dimension(),
            budget = config.max_evaluations,
            seed,
            "starting hybrid annealing"
        );

        let mut run = Run::start(objective, bounds, config, scheduler, seed)?;

        while !run.scheduler.is_terminated() {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    run.scheduler.terminate(TerminationReason::Cancelled);
                    break;
                }
            }
            if run.evaluator.is_exhausted() {
                run.scheduler.terminate(TerminationReason::BudgetExhausted);
                break;
            }
            run.iterate();
        }

        if config.polish {
            run.polish();
        }

        let result = run.finish();
        info!(
            best_cost = result.best_cost,
            evaluations = result.evaluations,
            iterations = result.iterations,
            restarts = result.restarts,
            termination = ?result.termination,
            "hybrid annealing finished"
        );
        Ok(result)
    }
}

/// Minimizes `objective` over `bounds` and returns
/// `(best_point, best_cost, evaluations)`.
///
/// ```
/// use memetic_anneal::{optimize, HybridConfig};
///
/// let f = |x: &[f64]| (x[0] - 1.0).powi(2);
/// let (x, cost, evals) = optimize(&f, &[(-4.0, 4.0)], &HybridConfig::default().with_seed(3)).unwrap();
/// assert!((x[0] - 1.0).abs() < 1e-2);
/// assert!(cost < 1e-4);
/// assert!(evals <= 10_000);
/// ```
pub fn optimize<O: Objective + ?Sized>(
    objective: &O,
    bounds: &[(f64, f64)],
    config: &HybridConfig,
) -> Result<(Vec<f64>, f64, usize)> {
    let bounds = Bounds::new(bounds)?;
    let result = HybridRunner::run(objective, &bounds, config)?;
    Ok((result.best, result.best_cost, result.evaluations))
}

/// State of one optimization run.
struct Run<'a, O: Objective + ?Sized> {
    bounds: &'a Bounds,
    config: &'a HybridConfig,
    evaluator: Evaluator<'a, O>,
    scheduler: AnnealingScheduler,
    rng: StdRng,
    incumbent: Candidate,
    incumbent_cost: f64,
    best_cost: f64,
    stall: usize,
    accepted_moves: usize,
    improving_moves: usize,
    restarts: usize,
    cost_history: Vec<f64>,
}

impl<'a, O: Objective + ?Sized> Run<'a, O> {
    /// Evaluates the starting point. The budget is at least 1 here.
    fn start(
        objective: &'a O,
        bounds: &'a Bounds,
        config: &'a HybridConfig,
        mut scheduler: AnnealingScheduler,
        seed: u64,
    ) -> Result<Self> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut evaluator = Evaluator::new(objective, config.max_evaluations);

        let mut incumbent = match &config.initial_point {
            Some(point) => Candidate::within(bounds, point.clone())?,
            None => Candidate::random(bounds, &mut rng),
        };
        let incumbent_cost = evaluator.score(&mut incumbent);

        if bounds.is_degenerate() {
            scheduler.terminate(TerminationReason::DegenerateDomain);
        }

        Ok(Self {
            bounds,
            config,
            evaluator,
            scheduler,
            rng,
            best_cost: incumbent_cost,
            incumbent,
            incumbent_cost,
            stall: 0,
            accepted_moves: 0,
            improving_moves: 0,
            restarts: 0,
            cost_history: vec![incumbent_cost],
        })
    }

    /// One outer iteration: global move, local refinement, acceptance,
    /// bookkeeping, cooling and restart.
    fn iterate(&mut self) {
        let step = self.global_step();
        let proposal = self.bounds.perturb(
            self.incumbent.point(),
            step,
            Perturbation::Directional,
            &mut self.rng,
        );
        let outcome = LocalClimber::climb(
            &mut self.evaluator,
            self.bounds,
            Candidate::clamped(self.bounds, proposal),
            &self.config.climber,
            &mut self.rng,
        );

        let cost = outcome.cost;
        let accepted = self
            .scheduler
            .accept(self.incumbent_cost, cost, &mut self.rng);
        let new_best = cost < self.best_cost;

        if new_best {
            debug!(
                iteration = self.scheduler.iterations(),
                cost,
                previous = self.best_cost,
                "new global best"
            );
            self.best_cost = cost;
            self.stall = 0;
        } else {
            self.stall += 1;
        }

        if accepted {
            if cost < self.incumbent_cost {
                self.improving_moves += 1;
            }
            self.accepted_moves += 1;
            self.incumbent = outcome.candidate;
            self.incumbent_cost = cost;
        }

        self.cost_history.push(self.best_cost);

        trace!(
            iteration = self.scheduler.iterations(),
            temperature = self.scheduler.temperature(),
            step,
            cost,
            accepted,
            local_iterations = outcome.iterations,
            "outer iteration"
        );

        self.scheduler.advance(self.evaluator.is_exhausted());
        if !self.scheduler.is_terminated() {
            self.maybe_restart();
        }
    }

    /// Global step: `global_step_size * T / T_0`, floored at the local step.
    fn global_step(&self) -> f64 {
        let ratio = self.scheduler.temperature() / self.config.anneal.initial_temperature;
        (self.config.global_step_size * ratio).max(self.config.climber.step_size)
    }

    fn maybe_restart(&mut self) {
        let Some(after) = self.config.restart.trigger() else {
            return;
        };
        if self.stall < after {
            return;
        }

        self.scheduler.reheat();
        self.restarts += 1;
        self.stall = 0;

        if let RestartPolicy::Respawn { .. } = self.config.restart {
            if self.evaluator.is_exhausted() {
                return;
            }
            let mut fresh = Candidate::random(self.bounds, &mut self.rng);
            let cost = self.evaluator.score(&mut fresh);
            debug!(cost, restarts = self.restarts, "respawned incumbent");
            self.best_cost = self.best_cost.min(cost);
            self.incumbent = fresh;
            self.incumbent_cost = cost;
        }
    }

    /// The global best: the lowest-cost point the evaluator has seen.
    fn best(&self) -> Candidate {
        match self.evaluator.best_seen() {
            Some((point, cost)) => Candidate::with_cost(point.to_vec(), cost),
            None => self.incumbent.clone(),
        }
    }

    /// Compass search on the best point with whatever budget is left.
    fn polish(&mut self) {
        if self.evaluator.is_exhausted() || self.bounds.is_degenerate() {
            return;
        }
        let start = self.best();
        let outcome =
            LocalClimber::polish(&mut self.evaluator, self.bounds, start, &self.config.climber);
        if outcome.cost < self.best_cost {
            debug!(from = self.best_cost, to = outcome.cost, "polish improved best");
            self.best_cost = outcome.cost;
            self.cost_history.push(self.best_cost);
        }
    }

    fn finish(self) -> HybridResult {
        let best = self.best();
        HybridResult {
            best_cost: best.cost().unwrap_or(self.best_cost),
            best: best.into_point(),
            evaluations: self.evaluator.evaluations(),
            iterations: self.scheduler.iterations(),
            final_temperature: self.scheduler.temperature(),
            accepted_moves: self.accepted_moves,
            improving_moves: self.improving_moves,
            restarts: self.restarts,
            anomalies: self.evaluator.anomalies(),
            termination: self
                .scheduler
                .termination()
                .unwrap_or(TerminationReason::BudgetExhausted),
            cost_history: self.cost_history,
        }
    }
}
