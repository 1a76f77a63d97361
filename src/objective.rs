//! Objective functions and the budgeted evaluator.

use crate::bounds::Candidate;
use tracing::debug;

/// A black-box scalar objective over a real vector. Lower is better.
///
/// Implemented for every `Fn(&[f64]) -> f64`, so closures and plain
/// functions can be passed directly.
///
/// # Examples
///
/// ```
/// use memetic_anneal::Objective;
///
/// struct Sphere;
///
/// impl Objective for Sphere {
///     fn evaluate(&self, x: &[f64]) -> f64 {
///         x.iter().map(|v| v * v).sum()
///     }
/// }
///
/// assert_eq!(Sphere.evaluate(&[1.0, 2.0]), 5.0);
/// ```
pub trait Objective {
    /// Cost of `x`. May return NaN or infinities; the evaluator maps those
    /// to `+inf`.
    fn evaluate(&self, x: &[f64]) -> f64;
}

impl<F> Objective for F
where
    F: Fn(&[f64]) -> f64,
{
    fn evaluate(&self, x: &[f64]) -> f64 {
        self(x)
    }
}

/// Wraps an [`Objective`] with an evaluation budget.
///
/// Every call to [`evaluate`](Self::evaluate) counts exactly once. Non-finite
/// objective values are recorded as anomalies and replaced by `+inf`, so
/// the search rejects them without any special casing. The best point seen
/// so far is kept as a side record.
///
/// The evaluator does not refuse calls past the budget; callers check
/// [`is_exhausted`](Self::is_exhausted) before evaluating.
pub struct Evaluator<'a, O: Objective + ?Sized> {
    objective: &'a O,
    budget: usize,
    evaluations: usize,
    anomalies: usize,
    best: Option<Candidate>,
}

impl<'a, O: Objective + ?Sized> Evaluator<'a, O> {
    pub fn new(objective: &'a O, budget: usize) -> Self {
        Self {
            objective,
            budget,
            evaluations: 0,
            anomalies: 0,
            best: None,
        }
    }

    /// Evaluates `x`, consuming one unit of budget.
    pub fn evaluate(&mut self, x: &[f64]) -> f64 {
        self.evaluations += 1;
        let raw = self.objective.evaluate(x);
        let cost = if raw.is_finite() {
            raw
        } else {
            self.anomalies += 1;
            debug!(evaluation = self.evaluations, value = %raw, "non-finite objective value");
            f64::INFINITY
        };

        let improved = match &self.best {
            Some(best) => best.cost().is_some_and(|b| cost < b),
            None => true,
        };
        if improved {
            self.best = Some(Candidate::with_cost(x.to_vec(), cost));
        }
        cost
    }

    /// Returns the candidate's cost, evaluating it only if not yet known.
    pub fn score(&mut self, candidate: &mut Candidate) -> f64 {
        if let Some(cost) = candidate.cost() {
            return cost;
        }
        let cost = self.evaluate(candidate.point());
        candidate.set_cost(cost);
        cost
    }

    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    pub fn budget(&self) -> usize {
        self.budget
    }

    pub fn remaining(&self) -> usize {
        self.budget.saturating_sub(self.evaluations)
    }

    pub fn is_exhausted(&self) -> bool {
        self.evaluations >= self.budget
    }

    /// Number of evaluations that returned NaN or an infinity.
    pub fn anomalies(&self) -> usize {
        self.anomalies
    }

    /// Lowest-cost point evaluated so far. Ties keep the earliest point.
    ///
    /// The hybrid runner reports this as its global best.
    pub fn best_seen(&self) -> Option<(&[f64], f64)> {
        self.best
            .as_ref()
            .and_then(|c| c.cost().map(|cost| (c.point(), cost)))
    }
}
