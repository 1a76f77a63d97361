//! Box bounds and bounded candidate points.
//!
//! Every point handled by the optimizer lives inside a [`Bounds`] box.
//! Operations here never fail: anything that would leave the box is
//! clamped back into it, so floating-point drift cannot abort a run.

use crate::error::{ConfigError, Result};
use rand::Rng;

/// How a perturbation distributes its offset over the coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Perturbation {
    /// Move a single, randomly chosen coordinate.
    #[default]
    Coordinate,
    /// Move every coordinate at once.
    Directional,
}

/// Per-dimension `[lower, upper]` intervals.
///
/// Validated once at construction: at least one dimension, finite
/// limits and widths, and `lower <= upper` everywhere. Zero-width
/// dimensions are allowed and simply pin their coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct Bounds {
    lower: Vec<f64>,
    upper: Vec<f64>,
}

impl Bounds {
    /// Builds bounds from `(lower, upper)` pairs.
    ///
    /// # Examples
    ///
    /// ```
    /// use memetic_anneal::Bounds;
    ///
    /// let bounds = Bounds::new(&[(-5.0, 5.0), (0.0, 1.0)]).unwrap();
    /// assert_eq!(bounds.dimension(), 2);
    /// assert!(Bounds::new(&[(1.0, 0.0)]).is_err());
    /// // width overflows to +inf
    /// assert!(Bounds::new(&[(-1e308, 1e308)]).is_err());
    /// ```
    pub fn new(pairs: &[(f64, f64)]) -> Result<Self> {
        if pairs.is_empty() {
            return Err(ConfigError::EmptyBounds);
        }
        for (dimension, &(lower, upper)) in pairs.iter().enumerate() {
            if !(upper - lower).is_finite() || lower > upper {
                return Err(ConfigError::InvalidBound {
                    dimension,
                    lower,
                    upper,
                });
            }
        }
        Ok(Self {
            lower: pairs.iter().map(|p| p.0).collect(),
            upper: pairs.iter().map(|p| p.1).collect(),
        })
    }

    /// Same interval repeated over `dimension` coordinates.
    pub fn uniform(lower: f64, upper: f64, dimension: usize) -> Result<Self> {
        Self::new(&vec![(lower, upper); dimension])
    }

    pub fn dimension(&self) -> usize {
        self.lower.len()
    }

    pub fn lower(&self) -> &[f64] {
        &self.lower
    }

    pub fn upper(&self) -> &[f64] {
        &self.upper
    }

    /// Width of dimension `i`.
    pub fn width(&self, i: usize) -> f64 {
        self.upper[i] - self.lower[i]
    }

    /// True when every dimension has zero width (the box is one point).
    pub fn is_degenerate(&self) -> bool {
        self.lower.iter().zip(&self.upper).all(|(lo, hi)| lo == hi)
    }

    /// True when `point` has the right length and lies inside the box.
    pub fn contains(&self, point: &[f64]) -> bool {
        point.len() == self.dimension()
            && point
                .iter()
                .zip(self.lower.iter().zip(&self.upper))
                .all(|(&x, (&lo, &hi))| lo <= x && x <= hi)
    }

    /// Projects each coordinate into its interval in place.
    ///
    /// NaN coordinates are sent to the lower bound.
    pub fn clamp(&self, point: &mut [f64]) {
        for ((x, &lo), &hi) in point.iter_mut().zip(&self.lower).zip(&self.upper) {
            *x = if x.is_nan() { lo } else { x.clamp(lo, hi) };
        }
    }

    /// Draws a point uniformly at random inside the box.
    pub fn random_within<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<f64> {
        self.lower
            .iter()
            .zip(&self.upper)
            .map(|(&lo, &hi)| {
                if lo == hi {
                    lo
                } else {
                    let u: f64 = rng.random();
                    (lo * (1.0 - u) + hi * u).clamp(lo, hi)
                }
            })
            .collect()
    }

    /// Returns a perturbed copy of `point`, clamped into the box.
    ///
    /// Each moved coordinate is shifted by `step * width` scaled by a
    /// hollow sample from `[-1, -0.5] ∪ [0.5, 1]`, so a move always covers
    /// at least half the requested step. Zero-width dimensions are never
    /// selected by [`Perturbation::Coordinate`]. Coordinates past the
    /// bounds' dimension are left untouched.
    pub fn perturb<R: Rng + ?Sized>(
        &self,
        point: &[f64],
        step: f64,
        mode: Perturbation,
        rng: &mut R,
    ) -> Vec<f64> {
        let mut next = point.to_vec();
        match mode {
            Perturbation::Coordinate => {
                let free = self.free_dimensions();
                if !free.is_empty() {
                    let i = free[rng.random_range(0..free.len())];
                    if let Some(x) = next.get_mut(i) {
                        *x += hollow_sample(rng) * step * self.width(i);
                    }
                }
            }
            Perturbation::Directional => {
                for (i, x) in next.iter_mut().take(self.dimension()).enumerate() {
                    *x += hollow_sample(rng) * step * self.width(i);
                }
            }
        }
        self.clamp(&mut next);
        next
    }

    fn free_dimensions(&self) -> Vec<usize> {
        (0..self.dimension()).filter(|&i| self.width(i) > 0.0).collect()
    }
}

/// Uniform sample from `[-1, -0.5] ∪ [0.5, 1]`.
pub fn hollow_sample<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let magnitude = rng.random_range(0.5..=1.0);
    if rng.random_bool(0.5) {
        magnitude
    } else {
        -magnitude
    }
}

/// A point inside the bounds together with its cost, once known.
///
/// The cost is filled in by [`Evaluator::score`](crate::Evaluator::score)
/// and never recomputed for the same candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    point: Vec<f64>,
    cost: Option<f64>,
}

impl Candidate {
    /// Wraps `point`, clamping it into `bounds` first.
    ///
    /// Fails with [`ConfigError::DimensionMismatch`] when the lengths
    /// differ.
    ///
    /// ```
    /// use memetic_anneal::{Bounds, Candidate};
    ///
    /// let bounds = Bounds::uniform(0.0, 1.0, 2).unwrap();
    /// assert_eq!(Candidate::within(&bounds, vec![2.0, 0.5]).unwrap().point(), &[1.0, 0.5]);
    /// assert!(Candidate::within(&bounds, vec![0.5; 3]).is_err());
    /// ```
    pub fn within(bounds: &Bounds, point: Vec<f64>) -> Result<Self> {
        if point.len() != bounds.dimension() {
            return Err(ConfigError::DimensionMismatch {
                expected: bounds.dimension(),
                actual: point.len(),
            });
        }
        Ok(Self::clamped(bounds, point))
    }

    /// Clamps a point already known to have the bounds' dimension.
    pub(crate) fn clamped(bounds: &Bounds, mut point: Vec<f64>) -> Self {
        debug_assert_eq!(point.len(), bounds.dimension());
        bounds.clamp(&mut point);
        Self { point, cost: None }
    }

    /// A uniformly random, not yet evaluated candidate.
    pub fn random<R: Rng + ?Sized>(bounds: &Bounds, rng: &mut R) -> Self {
        Self {
            point: bounds.random_within(rng),
            cost: None,
        }
    }

    pub(crate) fn with_cost(point: Vec<f64>, cost: f64) -> Self {
        Self {
            point,
            cost: Some(cost),
        }
    }

    pub fn point(&self) -> &[f64] {
        &self.point
    }

    pub fn into_point(self) -> Vec<f64> {
        self.point
    }

    /// Cached cost, `None` until evaluated.
    pub fn cost(&self) -> Option<f64> {
        self.cost
    }

    pub fn is_evaluated(&self) -> bool {
        self.cost.is_some()
    }

    pub(crate) fn set_cost(&mut self, cost: f64) {
        self.cost = Some(cost);
    }
}
