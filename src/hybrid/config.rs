//! Hybrid optimizer configuration.
//!
//! [`HybridConfig`] bundles the annealing schedule, the local climber, the
//! evaluation budget and the restart policy.

use crate::anneal::{AnnealConfig, CoolingSchedule};
use crate::bounds::Bounds;
use crate::climber::ClimberConfig;
use crate::error::{ConfigError, Result};

/// What to do when the global best stops improving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RestartPolicy {
    /// Never restart.
    Disabled,

    /// Reheat to the initial temperature after `after` consecutive outer
    /// iterations without a new global best.
    Reheat { after: usize },

    /// Reheat and move the incumbent to a fresh random point.
    Respawn { after: usize },
}

impl Default for RestartPolicy {
    fn default() -> Self {
        RestartPolicy::Reheat { after: 100 }
    }
}

impl RestartPolicy {
    /// Stall length that triggers a restart, if any.
    pub fn trigger(&self) -> Option<usize> {
        match *self {
            RestartPolicy::Disabled => None,
            RestartPolicy::Reheat { after } | RestartPolicy::Respawn { after } => Some(after),
        }
    }
}

/// Configuration for the hybrid annealing / memetic climbing optimizer.
///
/// Defaults follow dual annealing for the temperature schedule
/// (`T_0 = 5230`, visiting schedule with `q_v = 2.62`, floor at
/// `2e-5 * T_0`).
///
/// # Examples
///
/// ```
/// use memetic_anneal::{HybridConfig, RestartPolicy};
///
/// let config = HybridConfig::default()
///     .with_max_evaluations(5_000)
///     .with_global_step_size(0.3)
///     .with_local_step_size(0.05)
///     .with_restart(RestartPolicy::Respawn { after: 50 })
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HybridConfig {
    /// Temperature schedule and iteration cap.
    pub anneal: AnnealConfig,

    /// Local refinement parameters.
    pub climber: ClimberConfig,

    /// Global move size as a fraction of each dimension's width, at the
    /// initial temperature.
    ///
    /// The effective step shrinks in proportion to `T / T_0` but never
    /// below the climber's step.
    pub global_step_size: f64,

    /// Maximum objective evaluations for the whole run.
    pub max_evaluations: usize,

    /// Restart trigger.
    pub restart: RestartPolicy,

    /// Random seed for reproducibility. `None` draws one.
    pub seed: Option<u64>,

    /// Starting point; clamped into the bounds. `None` starts at random.
    pub initial_point: Option<Vec<f64>>,

    /// Run a compass search on the best point with any budget left
    /// after the annealing loop.
    pub polish: bool,
}

impl Default for HybridConfig {
    fn default() -> Self {
        Self {
            anneal: AnnealConfig::default(),
            climber: ClimberConfig::default(),
            global_step_size: 0.5,
            max_evaluations: 10_000,
            restart: RestartPolicy::default(),
            seed: None,
            initial_point: None,
            polish: false,
        }
    }
}

impl HybridConfig {
    pub fn with_anneal(mut self, anneal: AnnealConfig) -> Self {
        self.anneal = anneal;
        self
    }

    pub fn with_climber(mut self, climber: ClimberConfig) -> Self {
        self.climber = climber;
        self
    }

    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.anneal.initial_temperature = t;
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.anneal.min_temperature = t;
        self
    }

    pub fn with_cooling(mut self, cooling: CoolingSchedule) -> Self {
        self.anneal.cooling = cooling;
        self
    }

    /// Caps the number of outer iterations (0 = no cap).
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.anneal.max_iterations = n;
        self
    }

    pub fn with_global_step_size(mut self, step: f64) -> Self {
        self.global_step_size = step;
        self
    }

    pub fn with_local_step_size(mut self, step: f64) -> Self {
        self.climber.step_size = step;
        self
    }

    pub fn with_max_local_iters(mut self, n: usize) -> Self {
        self.climber.max_local_iters = n;
        self
    }

    pub fn with_no_improvement_limit(mut self, n: usize) -> Self {
        self.climber.no_improvement_limit = n;
        self
    }

    pub fn with_max_evaluations(mut self, n: usize) -> Self {
        self.max_evaluations = n;
        self
    }

    pub fn with_restart(mut self, restart: RestartPolicy) -> Self {
        self.restart = restart;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_initial_point(mut self, point: Vec<f64>) -> Self {
        self.initial_point = Some(point);
        self
    }

    pub fn with_polish(mut self, polish: bool) -> Self {
        self.polish = polish;
        self
    }

    /// Validates the configuration on its own.
    pub fn validate(&self) -> Result<()> {
        if self.max_evaluations == 0 {
            return Err(ConfigError::ZeroBudget);
        }
        if !self.global_step_size.is_finite() || self.global_step_size <= 0.0 {
            return Err(ConfigError::NonPositive {
                name: "global_step_size",
                value: self.global_step_size,
            });
        }
        if self.restart.trigger() == Some(0) {
            return Err(ConfigError::OutOfRange {
                name: "restart.after",
                value: 0.0,
                expected: "[1, inf)",
            });
        }
        self.anneal.validate()?;
        self.climber.validate()
    }

    /// Validates the configuration against the bounds it will run on.
    pub fn validate_for(&self, bounds: &Bounds) -> Result<()> {
        self.validate()?;
        if let Some(point) = &self.initial_point {
            if point.len() != bounds.dimension() {
                return Err(ConfigError::DimensionMismatch {
                    expected: bounds.dimension(),
                    actual: point.len(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HybridConfig::default();
        assert_eq!(config.max_evaluations, 10_000);
        assert!((config.global_step_size - 0.5).abs() < 1e-12);
        assert_eq!(config.restart, RestartPolicy::Reheat { after: 100 });
        assert!(config.seed.is_none());
        assert!(!config.polish);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builders_reach_nested_configs() {
        let config = HybridConfig::default()
            .with_initial_temperature(50.0)
            .with_min_temperature(0.5)
            .with_max_iterations(10)
            .with_local_step_size(0.02)
            .with_max_local_iters(7)
            .with_no_improvement_limit(3);
        assert_eq!(config.anneal.initial_temperature, 50.0);
        assert_eq!(config.anneal.min_temperature, 0.5);
        assert_eq!(config.anneal.max_iterations, 10);
        assert_eq!(config.climber.step_size, 0.02);
        assert_eq!(config.climber.max_local_iters, 7);
        assert_eq!(config.climber.no_improvement_limit, 3);
    }

    #[test]
    fn test_zero_budget_rejected() {
        let config = HybridConfig::default().with_max_evaluations(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroBudget));
    }

    #[test]
    fn test_bad_steps_rejected() {
        assert!(HybridConfig::default()
            .with_global_step_size(0.0)
            .validate()
            .is_err());
        assert!(HybridConfig::default()
            .with_local_step_size(-0.1)
            .validate()
            .is_err());
    }

    #[test]
    fn test_nested_errors_propagate() {
        let config = HybridConfig::default().with_initial_temperature(0.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive { name: "initial_temperature", .. })
        ));
    }

    #[test]
    fn test_zero_restart_trigger_rejected() {
        let config = HybridConfig::default().with_restart(RestartPolicy::Reheat { after: 0 });
        assert!(config.validate().is_err());
        let config = HybridConfig::default().with_restart(RestartPolicy::Disabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_initial_point_dimension_checked() {
        let bounds = Bounds::uniform(-1.0, 1.0, 3).unwrap();
        let config = HybridConfig::default().with_initial_point(vec![0.0, 0.0]);
        assert_eq!(
            config.validate_for(&bounds),
            Err(ConfigError::DimensionMismatch {
                expected: 3,
                actual: 2
            })
        );
    }
}
