use super::error::ShellError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
}

/// Parameters of the adaptive radius expansion used by the closest-n search.
///
/// The search starts at `initial_radius` and grows by `radius_increment`
/// until enough distinct molecules are in range. `max_expansions` bounds the
/// number of growth steps so the search terminates even on a near-empty
/// system.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOptions {
    pub initial_radius: f64,
    pub radius_increment: f64,
    pub max_expansions: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            initial_radius: 3.0,
            radius_increment: 1.0,
            max_expansions: 64,
        }
    }
}

impl SearchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_initial_radius(mut self, radius: f64) -> Self {
        self.initial_radius = radius;
        self
    }

    pub fn with_radius_increment(mut self, increment: f64) -> Self {
        self.radius_increment = increment;
        self
    }

    pub fn with_max_expansions(mut self, expansions: usize) -> Self {
        self.max_expansions = expansions;
        self
    }

    /// Checks that both radius parameters are positive and finite.
    pub fn validate(&self) -> Result<(), ShellError> {
        if !self.initial_radius.is_finite() || self.initial_radius <= 0.0 {
            return Err(ShellError::InvalidRadius {
                radius: self.initial_radius,
            });
        }
        if !self.radius_increment.is_finite() || self.radius_increment <= 0.0 {
            return Err(ShellError::InvalidRadius {
                radius: self.radius_increment,
            });
        }
        Ok(())
    }
}
