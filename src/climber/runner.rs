//! Greedy local refinement.

use super::config::ClimberConfig;
use crate::bounds::{Bounds, Candidate};
use crate::objective::{Evaluator, Objective};
use rand::Rng;
use tracing::trace;

/// Result of one local climb.
#[derive(Debug, Clone)]
pub struct ClimbOutcome {
    /// The refined candidate. Always evaluated.
    pub candidate: Candidate,

    /// Cost of the refined candidate.
    pub cost: f64,

    /// Neighbors evaluated during the climb.
    pub iterations: usize,

    /// Accepted (strictly improving) moves.
    pub improvements: usize,

    /// Whether the climb stopped on the no-improvement limit.
    pub stalled: bool,
}

/// Strict greedy hill climbing with a shrinking step.
///
/// # Algorithm
///
/// 1. Score the start point (at most once; a cached cost is reused).
/// 2. Repeat up to `max_local_iters` times while budget remains:
///    perturb the current point by the local step, evaluate, and move only
///    on a strictly lower cost. The step is multiplied by `step_decay`
///    after every attempt.
/// 3. Stop after `no_improvement_limit` consecutive failures.
///
/// The returned cost never exceeds the start cost. Neighbors with an
/// infinite (infeasible) cost are never accepted.
pub struct LocalClimber;

impl LocalClimber {
    /// Refines `start`.
    ///
    /// If `start` has no cost yet it is evaluated even when the budget is
    /// already exhausted; callers check the budget before climbing.
    pub fn climb<O, R>(
        evaluator: &mut Evaluator<'_, O>,
        bounds: &Bounds,
        mut start: Candidate,
        config: &ClimberConfig,
        rng: &mut R,
    ) -> ClimbOutcome
    where
        O: Objective + ?Sized,
        R: Rng + ?Sized,
    {
        let mut cost = evaluator.score(&mut start);
        let mut current = start;
        let mut step = config.step_size;
        let mut failures = 0usize;
        let mut iterations = 0usize;
        let mut improvements = 0usize;
        let mut stalled = false;

        while iterations < config.max_local_iters && !evaluator.is_exhausted() {
            let neighbor = bounds.perturb(current.point(), step, config.perturbation, rng);
            let neighbor_cost = evaluator.evaluate(&neighbor);
            iterations += 1;

            if neighbor_cost < cost {
                current = Candidate::with_cost(neighbor, neighbor_cost);
                cost = neighbor_cost;
                improvements += 1;
                failures = 0;
            } else {
                failures += 1;
                if config.no_improvement_limit > 0 && failures >= config.no_improvement_limit {
                    stalled = true;
                    break;
                }
            }

            step *= config.step_decay;
        }

        trace!(iterations, improvements, stalled, cost, "local climb finished");

        ClimbOutcome {
            candidate: current,
            cost,
            iterations,
            improvements,
            stalled,
        }
    }

    /// Deterministic compass search around `start`.
    ///
    /// Tries `±step * width` along each free dimension, moving on the first
    /// strict improvement. When a full sweep fails the step is halved; the
    /// search ends once the step drops below `polish_tolerance` or the
    /// budget runs out. Like [`climb`](Self::climb), it never returns a
    /// worse point than it was given.
    pub fn polish<O>(
        evaluator: &mut Evaluator<'_, O>,
        bounds: &Bounds,
        mut start: Candidate,
        config: &ClimberConfig,
    ) -> ClimbOutcome
    where
        O: Objective + ?Sized,
    {
        let mut cost = evaluator.score(&mut start);
        let mut point = start.into_point();
        let mut step = config.step_size;
        let mut iterations = 0usize;
        let mut improvements = 0usize;

        'search: while step >= config.polish_tolerance {
            let mut moved = false;
            for i in 0..bounds.dimension() {
                let width = bounds.width(i);
                if width == 0.0 {
                    continue;
                }
                for direction in [1.0, -1.0] {
                    if evaluator.is_exhausted() {
                        break 'search;
                    }
                    let mut trial = point.clone();
                    trial[i] += direction * step * width;
                    bounds.clamp(&mut trial);
                    if trial[i] == point[i] {
                        continue;
                    }
                    let trial_cost = evaluator.evaluate(&trial);
                    iterations += 1;
                    if trial_cost < cost {
                        point = trial;
                        cost = trial_cost;
                        improvements += 1;
                        moved = true;
                        break;
                    }
                }
            }
            if !moved {
                step *= 0.5;
            }
        }

        trace!(iterations, improvements, cost, "compass polish finished");

        ClimbOutcome {
            candidate: Candidate::with_cost(point, cost),
            cost,
            iterations,
            improvements,
            stalled: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::Perturbation;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sphere(x: &[f64]) -> f64 {
        x.iter().map(|v| v * v).sum()
    }

    fn rastrigin(x: &[f64]) -> f64 {
        10.0 * x.len() as f64
            + x.iter()
                .map(|&v| v * v - 10.0 * (2.0 * std::f64::consts::PI * v).cos())
                .sum::<f64>()
    }

    #[test]
    fn test_climb_improves_sphere() {
        let bounds = Bounds::uniform(-5.0, 5.0, 2).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let mut ev = Evaluator::new(&sphere, 1_000);
        let start = Candidate::within(&bounds, vec![3.0, -2.0]).unwrap();

        let out = LocalClimber::climb(&mut ev, &bounds, start, &ClimberConfig::default(), &mut rng);

        assert!(out.cost < 13.0);
        assert!(out.improvements > 0);
        assert_eq!(out.candidate.cost(), Some(out.cost));
        // start evaluation + one per neighbor
        assert_eq!(ev.evaluations(), out.iterations + 1);
    }

    #[test]
    fn test_climb_reuses_cached_start_cost() {
        let bounds = Bounds::uniform(-1.0, 1.0, 1).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let mut ev = Evaluator::new(&sphere, 100);
        let mut start = Candidate::within(&bounds, vec![0.5]).unwrap();
        ev.score(&mut start);

        let config = ClimberConfig::default().with_max_local_iters(5);
        let out = LocalClimber::climb(&mut ev, &bounds, start, &config, &mut rng);

        assert_eq!(ev.evaluations(), 1 + out.iterations);
    }

    #[test]
    fn test_climb_respects_budget() {
        let bounds = Bounds::uniform(-5.0, 5.0, 3).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let mut ev = Evaluator::new(&sphere, 10);
        let start = Candidate::within(&bounds, vec![1.0, 1.0, 1.0]).unwrap();

        LocalClimber::climb(&mut ev, &bounds, start, &ClimberConfig::default(), &mut rng);

        assert_eq!(ev.evaluations(), 10);
    }

    #[test]
    fn test_climb_stalls_on_plateau() {
        let flat = |_: &[f64]| 1.0;
        let bounds = Bounds::uniform(-1.0, 1.0, 2).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let mut ev = Evaluator::new(&flat, 1_000);
        let config = ClimberConfig::default()
            .with_max_local_iters(100)
            .with_no_improvement_limit(7);

        let out = LocalClimber::climb(
            &mut ev,
            &bounds,
            Candidate::within(&bounds, vec![0.0, 0.0]).unwrap(),
            &config,
            &mut rng,
        );

        assert!(out.stalled);
        assert_eq!(out.iterations, 7);
        assert_eq!(out.improvements, 0);
        assert_eq!(out.candidate.point(), &[0.0, 0.0]);
    }

    #[test]
    fn test_climb_zero_iterations_only_scores() {
        let bounds = Bounds::uniform(-1.0, 1.0, 2).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let mut ev = Evaluator::new(&sphere, 100);
        let config = ClimberConfig::default().with_max_local_iters(0);

        let out = LocalClimber::climb(
            &mut ev,
            &bounds,
            Candidate::within(&bounds, vec![0.5, 0.5]).unwrap(),
            &config,
            &mut rng,
        );

        assert_eq!(ev.evaluations(), 1);
        assert_eq!(out.cost, 0.5);
    }

    #[test]
    fn test_climb_never_accepts_nan_neighbors() {
        // NaN everywhere except the exact start point
        let f = |x: &[f64]| if x[0] == 0.2 && x[1] == 0.2 { 3.0 } else { f64::NAN };
        let bounds = Bounds::uniform(-1.0, 1.0, 2).unwrap();
        let mut rng = StdRng::seed_from_u64(9);
        let mut ev = Evaluator::new(&f, 500);

        let out = LocalClimber::climb(
            &mut ev,
            &bounds,
            Candidate::within(&bounds, vec![0.2, 0.2]).unwrap(),
            &ClimberConfig::default(),
            &mut rng,
        );

        assert_eq!(out.cost, 3.0);
        assert_eq!(out.candidate.point(), &[0.2, 0.2]);
        assert!(ev.anomalies() > 0);
    }

    #[test]
    fn test_polish_converges_on_sphere() {
        let bounds = Bounds::uniform(-5.0, 5.0, 3).unwrap();
        let mut ev = Evaluator::new(&sphere, 5_000);
        let start = Candidate::within(&bounds, vec![0.3, -0.2, 0.1]).unwrap();

        let out = LocalClimber::polish(&mut ev, &bounds, start, &ClimberConfig::default());

        assert!(out.cost < 1e-12, "got {}", out.cost);
    }

    #[test]
    fn test_polish_respects_budget_and_pinned_dimensions() {
        let bounds = Bounds::new(&[(1.0, 1.0), (-5.0, 5.0)]).unwrap();
        let mut ev = Evaluator::new(&sphere, 20);
        let start = Candidate::within(&bounds, vec![1.0, 4.0]).unwrap();

        let out = LocalClimber::polish(&mut ev, &bounds, start, &ClimberConfig::default());

        assert!(ev.evaluations() <= 20);
        assert_eq!(out.candidate.point()[0], 1.0);
        assert!(out.cost < 17.0);
    }

    proptest! {
        #[test]
        fn prop_climb_never_worsens(
            seed in any::<u64>(),
            start in prop::collection::vec(-5.12_f64..5.12, 3),
            directional in any::<bool>(),
            iters in 0_usize..60,
        ) {
            let bounds = Bounds::uniform(-5.12, 5.12, 3).unwrap();
            let mut rng = StdRng::seed_from_u64(seed);
            let mut ev = Evaluator::new(&rastrigin, 1_000);
            let input_cost = rastrigin(&start);
            let mode = if directional { Perturbation::Directional } else { Perturbation::Coordinate };
            let config = ClimberConfig::default()
                .with_max_local_iters(iters)
                .with_perturbation(mode);

            let out = LocalClimber::climb(
                &mut ev,
                &bounds,
                Candidate::within(&bounds, start).unwrap(),
                &config,
                &mut rng,
            );

            prop_assert!(out.cost <= input_cost);
            prop_assert!(bounds.contains(out.candidate.point()));
            prop_assert_eq!(rastrigin(out.candidate.point()), out.cost);
        }

        #[test]
        fn prop_polish_never_worsens(
            start in prop::collection::vec(-5.12_f64..5.12, 2),
            budget in 1_usize..200,
        ) {
            let bounds = Bounds::uniform(-5.12, 5.12, 2).unwrap();
            let mut ev = Evaluator::new(&rastrigin, budget);
            let input_cost = rastrigin(&start);

            let out = LocalClimber::polish(
                &mut ev,
                &bounds,
                Candidate::within(&bounds, start).unwrap(),
                &ClimberConfig::default(),
            );

            prop_assert!(out.cost <= input_cost);
            prop_assert!(ev.evaluations() <= budget);
        }
    }
}
