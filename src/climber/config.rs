//! Local climber configuration.

use crate::bounds::Perturbation;
use crate::error::{ConfigError, Result};

/// Parameters of the memetic hill climb.
///
/// # Examples
///
/// ```
/// use memetic_anneal::climber::ClimberConfig;
/// use memetic_anneal::Perturbation;
///
/// let config = ClimberConfig::default()
///     .with_step_size(0.05)
///     .with_max_local_iters(200)
///     .with_no_improvement_limit(40)
///     .with_perturbation(Perturbation::Directional);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ClimberConfig {
    /// Initial local step as a fraction of each dimension's width.
    ///
    /// Usually much smaller than the global annealing step.
    pub step_size: f64,

    /// Multiplier applied to the step after every local iteration, in (0, 1].
    ///
    /// 1.0 keeps the step fixed.
    pub step_decay: f64,

    /// Maximum neighbors tried per climb. 0 disables refinement.
    pub max_local_iters: usize,

    /// Consecutive non-improving neighbors before the climb stops.
    ///
    /// Set to 0 to disable plateau detection.
    pub no_improvement_limit: usize,

    /// Which coordinates a local move touches.
    pub perturbation: Perturbation,

    /// Smallest step the final compass polish tries before giving up.
    pub polish_tolerance: f64,
}

impl Default for ClimberConfig {
    fn default() -> Self {
        Self {
            step_size: 0.1,
            step_decay: 0.95,
            max_local_iters: 100,
            no_improvement_limit: 30,
            perturbation: Perturbation::Coordinate,
            polish_tolerance: 1e-9,
        }
    }
}

impl ClimberConfig {
    pub fn with_step_size(mut self, step: f64) -> Self {
        self.step_size = step;
        self
    }

    pub fn with_step_decay(mut self, decay: f64) -> Self {
        self.step_decay = decay;
        self
    }

    pub fn with_max_local_iters(mut self, n: usize) -> Self {
        self.max_local_iters = n;
        self
    }

    pub fn with_no_improvement_limit(mut self, n: usize) -> Self {
        self.no_improvement_limit = n;
        self
    }

    pub fn with_perturbation(mut self, mode: Perturbation) -> Self {
        self.perturbation = mode;
        self
    }

    pub fn with_polish_tolerance(mut self, tolerance: f64) -> Self {
        self.polish_tolerance = tolerance;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.step_size.is_nan() || self.step_size <= 0.0 {
            return Err(ConfigError::NonPositive {
                name: "step_size",
                value: self.step_size,
            });
        }
        if self.step_decay.is_nan() || self.step_decay <= 0.0 || self.step_decay > 1.0 {
            return Err(ConfigError::OutOfRange {
                name: "step_decay",
                value: self.step_decay,
                expected: "(0, 1]",
            });
        }
        if self.polish_tolerance.is_nan() || self.polish_tolerance <= 0.0 {
            return Err(ConfigError::NonPositive {
                name: "polish_tolerance",
                value: self.polish_tolerance,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClimberConfig::default();
        assert!((config.step_size - 0.1).abs() < 1e-12);
        assert_eq!(config.max_local_iters, 100);
        assert_eq!(config.no_improvement_limit, 30);
        assert_eq!(config.perturbation, Perturbation::Coordinate);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_bad_step() {
        assert!(ClimberConfig::default().with_step_size(0.0).validate().is_err());
        assert!(ClimberConfig::default()
            .with_step_size(f64::NAN)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_bad_decay() {
        assert!(ClimberConfig::default().with_step_decay(1.5).validate().is_err());
        assert!(ClimberConfig::default().with_step_decay(0.0).validate().is_err());
        assert!(ClimberConfig::default().with_step_decay(1.0).validate().is_ok());
    }
}
