//! Runtime configuration of the visualizer.
//!
//! The `const` values double as defaults for missing keys in option files.

use crate::curve::Algorithm;
use crate::error::{ConfigError, CurveError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default number of subdivisions or samples
pub const DEFAULT_ITERATIONS: usize = 5;

/// Default pause between two emitted steps in milliseconds
pub const STEP_DELAY_MS: f64 = 150.0;

/// Default duration of a single step animation in seconds
pub const STEP_DURATION_SECS: f64 = 0.5;

/// Everything the user can change while the visualizer runs
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Subdivisions for divide and conquer, interior samples for the other algorithms
    pub iterations: usize,

    /// Selected algorithm, stored by its numeric id
    pub algorithm: Algorithm,

    /// Pause between two emitted steps in milliseconds
    pub step_delay_ms: f64,

    /// Duration of a single step animation in seconds
    pub step_duration_secs: f64,

    /// Re-sync the curve every frame so it follows dragged control points
    pub dynamic_update: bool,

    /// Draw the control polygon
    pub show_input_lines: bool,

    /// Report the coordinates of the result points
    pub show_result_coordinates: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            algorithm: Algorithm::default(),
            step_delay_ms: STEP_DELAY_MS,
            step_duration_secs: STEP_DURATION_SECS,
            dynamic_update: true,
            show_input_lines: true,
            show_result_coordinates: false,
        }
    }
}

impl Options {
    /// Checks every value is in its allowed range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.iterations < 1 {
            return Err(CurveError::InvalidIterations(self.iterations).into());
        }
        if !self.step_delay_ms.is_finite() || self.step_delay_ms < 0.0 {
            return Err(ConfigError::InvalidStepDelay(self.step_delay_ms));
        }
        if !self.step_duration_secs.is_finite() || self.step_duration_secs <= 0.0 {
            return Err(ConfigError::InvalidStepDuration(self.step_duration_secs));
        }
        Ok(())
    }

    /// Parses and validates options from TOML
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let options: Options = toml::from_str(content)?;
        options.validate()?;
        Ok(options)
    }

    /// Loads options from a TOML file. Falls back to the defaults on any error.
    pub fn load_from_file(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_toml_str(&content) {
                Ok(options) => {
                    log::info!("loaded options from {}", path.display());
                    options
                }
                Err(e) => {
                    log::warn!("invalid options file, using defaults: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("no options file found, using defaults");
                Self::default()
            }
        }
    }

    /// Stores the options as a TOML file
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("saved options to {}", path.display());
        Ok(())
    }

    /// [`step_delay_ms`](Options::step_delay_ms) as a [`Duration`], zero if invalid
    pub fn step_delay(&self) -> Duration {
        Duration::try_from_secs_f64(self.step_delay_ms / 1000.0).unwrap_or_default()
    }

    /// [`step_duration_secs`](Options::step_duration_secs) as a [`Duration`], zero if invalid
    pub fn step_duration(&self) -> Duration {
        Duration::try_from_secs_f64(self.step_duration_secs).unwrap_or_default()
    }
}
