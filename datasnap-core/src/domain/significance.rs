use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{AnalysisError, Result};

/// Significance threshold (alpha) below which a p-value counts as significant.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct SignificanceLevel(f64);

impl SignificanceLevel {
    pub const DEFAULT: f64 = 0.05;

    /// Lower bound of the range offered to interactive users.
    pub const MIN_INTERACTIVE: f64 = 0.001;

    /// Upper bound of the range offered to interactive users.
    pub const MAX_INTERACTIVE: f64 = 0.2;

    pub fn new(alpha: f64) -> Result<Self> {
        if alpha.is_finite() && alpha > 0.0 && alpha < 1.0 {
            Ok(Self(alpha))
        } else {
            Err(AnalysisError::InvalidAlpha(alpha))
        }
    }

    /// Clamp into `[MIN_INTERACTIVE, MAX_INTERACTIVE]`; `NaN` falls back to the default.
    pub fn clamped(alpha: f64) -> Self {
        if alpha.is_nan() {
            return Self::default();
        }
        Self(alpha.clamp(Self::MIN_INTERACTIVE, Self::MAX_INTERACTIVE))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Confidence level matching this alpha, e.g. 0.95 for 0.05.
    pub fn confidence_level(self) -> f64 {
        1.0 - self.0
    }

    pub fn is_significant(self, p_value: f64) -> bool {
        p_value < self.0
    }
}

impl Default for SignificanceLevel {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl TryFrom<f64> for SignificanceLevel {
    type Error = AnalysisError;

    fn try_from(value: f64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<SignificanceLevel> for f64 {
    fn from(value: SignificanceLevel) -> Self {
        value.0
    }
}

impl fmt::Display for SignificanceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
