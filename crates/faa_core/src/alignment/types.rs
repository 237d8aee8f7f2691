//! Core types for offset search and alignment.

use std::ops::Range;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// MSE reported when no candidate offset improved on the initial best.
///
/// Also returned by the scanner when it aborts early.
pub const NO_IMPROVEMENT: f32 = 1e20;

/// Polarity of the delayed signal relative to the reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    /// Delayed signal used as given.
    #[default]
    Normal,
    /// Delayed signal sign-inverted.
    Inverted,
}

impl Polarity {
    /// Sign factor applied to delayed samples.
    pub fn sign(self) -> f32 {
        match self {
            Polarity::Normal => 1.0,
            Polarity::Inverted => -1.0,
        }
    }
}

impl std::fmt::Display for Polarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Polarity::Normal => write!(f, "normal"),
            Polarity::Inverted => write!(f, "inverted"),
        }
    }
}

/// Best offset found by a search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OffsetEstimate {
    /// Signed offset in samples. Positive means the delayed signal must be
    /// advanced (cropped at its front) to line up with the reference.
    pub offset: i64,
    /// MSE (lower is better) or correlation coefficient, depending on method.
    pub score: f64,
    /// Polarity of the delayed signal at the winning offset.
    pub polarity: Polarity,
}

impl OffsetEstimate {
    /// Create a new estimate with normal polarity.
    pub fn new(offset: i64, score: f64) -> Self {
        Self {
            offset,
            score,
            polarity: Polarity::Normal,
        }
    }

    /// Set the polarity.
    pub fn with_polarity(mut self, polarity: Polarity) -> Self {
        self.polarity = polarity;
        self
    }

    /// Offset converted to milliseconds at the given sample rate.
    pub fn offset_ms(&self, sample_rate: u32) -> f64 {
        self.offset as f64 / sample_rate as f64 * 1000.0
    }
}

/// Half-open `[start, end)` region of an aligned output that was zero-filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Gap {
    pub start: usize,
    pub end: usize,
}

impl Gap {
    /// Region `[start, end)`.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of zero-filled samples.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// True when the region covers no samples.
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Whether `index` falls inside the region.
    pub fn contains(&self, index: usize) -> bool {
        (self.start..self.end).contains(&index)
    }
}

impl From<Gap> for Range<usize> {
    fn from(gap: Gap) -> Self {
        gap.start..gap.end
    }
}

impl From<(usize, usize)> for Gap {
    fn from((start, end): (usize, usize)) -> Self {
        Self { start, end }
    }
}

/// Offset search method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignMethod {
    /// Windowed mean squared error scan (fast, default).
    #[default]
    Mse,
    /// Decimated correlation coefficient scan (slow).
    Corr,
}

impl AlignMethod {
    /// Lowercase name used in settings files and reports.
    pub fn name(&self) -> &'static str {
        match self {
            AlignMethod::Mse => "mse",
            AlignMethod::Corr => "corr",
        }
    }
}

impl std::fmt::Display for AlignMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AlignMethod {
    type Err = AlignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mse" => Ok(AlignMethod::Mse),
            "corr" => Ok(AlignMethod::Corr),
            other => Err(AlignError::InvalidInput(format!(
                "unknown method {other:?} (expected \"mse\" or \"corr\")"
            ))),
        }
    }
}

/// How a pair of signals is brought into alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignMode {
    /// Remove the offset from the front of the leading signal.
    Crop,
    /// Prepend the offset as silence to the lagging signal.
    #[default]
    Pad,
}

impl FromStr for AlignMode {
    type Err = AlignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "crop" => Ok(AlignMode::Crop),
            "pad" => Ok(AlignMode::Pad),
            other => Err(AlignError::InvalidInput(format!(
                "align_mode={other:?} not understood"
            ))),
        }
    }
}

/// How the lengths of an aligned pair are reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FixLength {
    /// Crop the longer signal at its end.
    Shortest,
    /// Zero-pad the shorter signal at its end.
    Longest,
}

impl FromStr for FixLength {
    type Err = AlignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "shortest" => Ok(FixLength::Shortest),
            "longest" => Ok(FixLength::Longest),
            other => Err(AlignError::InvalidInput(format!(
                "fix_length={other:?} not understood"
            ))),
        }
    }
}

/// Error types for search and alignment operations.
#[derive(Debug, thiserror::Error)]
pub enum AlignError {
    /// Malformed buffer, empty search range, or unknown option literal.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Type alias for alignment results.
pub type AlignResult<T> = Result<T, AlignError>;
