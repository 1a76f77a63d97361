//! Temperature schedule configuration.

use crate::error::{ConfigError, Result};

/// Initial temperature used by dual annealing (Xiang et al. 1997).
pub const DEFAULT_INITIAL_TEMPERATURE: f64 = 5230.0;

/// Floor relative to the initial temperature (dual annealing's
/// `restart_temp_ratio`).
pub const DEFAULT_FLOOR_RATIO: f64 = 2e-5;

/// Visiting parameter `q_v` of generalized simulated annealing.
pub const DEFAULT_VISIT: f64 = 2.62;

/// Cooling schedule for temperature reduction.
///
/// `k` below is the number of cooling steps since the start (or since the
/// last reheat).
///
/// # References
///
/// - Geometric: standard textbook approach
/// - LundyMees: Lundy & Mees (1986), with convergence proof
/// - Visiting: Tsallis & Stariolo (1996), as used by dual annealing
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CoolingSchedule {
    /// Geometric (exponential) cooling: `T_{k+1} = alpha * T_k`.
    Geometric {
        /// Cooling factor in (0, 1). Higher = slower cooling.
        alpha: f64,
    },

    /// Linear cooling: `T_k = T_0 - k * (T_0 - T_min) / max_iterations`.
    ///
    /// Requires an iteration cap.
    Linear,

    /// Lundy-Mees cooling: `T_{k+1} = T_k / (1 + beta * T_k)`.
    LundyMees {
        /// Cooling parameter. Typically `(T_0 - T_min) / (max_iter * T_0 * T_min)`.
        beta: f64,
    },

    /// Generalized annealing schedule:
    /// `T_k = T_0 * (2^(qv-1) - 1) / ((k+2)^(qv-1) - 1)`.
    ///
    /// Cools quickly at first, then very slowly.
    Visiting {
        /// Visiting parameter in (1, 3].
        qv: f64,
    },
}

impl Default for CoolingSchedule {
    fn default() -> Self {
        CoolingSchedule::Visiting { qv: DEFAULT_VISIT }
    }
}

/// Configuration of the annealing schedule and its stopping rules.
///
/// # Examples
///
/// ```
/// use memetic_anneal::anneal::{AnnealConfig, CoolingSchedule};
///
/// let config = AnnealConfig::default()
///     .with_initial_temperature(100.0)
///     .with_min_temperature(1e-3)
///     .with_cooling(CoolingSchedule::Geometric { alpha: 0.98 });
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AnnealConfig {
    /// Starting (and reheat) temperature.
    pub initial_temperature: f64,

    /// The run terminates once the temperature falls below this floor.
    pub min_temperature: f64,

    /// Cooling schedule.
    pub cooling: CoolingSchedule,

    /// Maximum outer iterations. 0 = no limit.
    pub max_iterations: usize,
}

impl Default for AnnealConfig {
    fn default() -> Self {
        Self {
            initial_temperature: DEFAULT_INITIAL_TEMPERATURE,
            min_temperature: DEFAULT_INITIAL_TEMPERATURE * DEFAULT_FLOOR_RATIO,
            cooling: CoolingSchedule::default(),
            max_iterations: 0,
        }
    }
}

impl AnnealConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    pub fn with_cooling(mut self, cooling: CoolingSchedule) -> Self {
        self.cooling = cooling;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        let t0 = self.initial_temperature;
        if !t0.is_finite() || t0 <= 0.0 {
            return Err(ConfigError::NonPositive {
                name: "initial_temperature",
                value: t0,
            });
        }
        if self.min_temperature.is_nan() || self.min_temperature <= 0.0 {
            return Err(ConfigError::NonPositive {
                name: "min_temperature",
                value: self.min_temperature,
            });
        }
        if self.min_temperature >= t0 {
            return Err(ConfigError::OutOfRange {
                name: "min_temperature",
                value: self.min_temperature,
                expected: "(0, initial_temperature)",
            });
        }
        match self.cooling {
            CoolingSchedule::Geometric { alpha } => {
                if alpha.is_nan() || alpha <= 0.0 || alpha >= 1.0 {
                    return Err(ConfigError::OutOfRange {
                        name: "alpha",
                        value: alpha,
                        expected: "(0, 1)",
                    });
                }
            }
            CoolingSchedule::LundyMees { beta } => {
                if beta.is_nan() || beta <= 0.0 {
                    return Err(ConfigError::NonPositive {
                        name: "beta",
                        value: beta,
                    });
                }
            }
            CoolingSchedule::Visiting { qv } => {
                if qv.is_nan() || qv <= 1.0 || qv > 3.0 {
                    return Err(ConfigError::OutOfRange {
                        name: "qv",
                        value: qv,
                        expected: "(1, 3]",
                    });
                }
            }
            CoolingSchedule::Linear => {
                if self.max_iterations == 0 {
                    return Err(ConfigError::MissingIterationCap);
                }
            }
        }
        Ok(())
    }
}
