//! Error types for the analysis crate.

use thiserror::Error;

/// Errors produced by the quality analyzer.
///
/// Only genuinely invalid arguments are errors; silence and aperiodic
/// signals analyze normally and produce conservative reports.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// The sample rate passed to the constructor was zero, negative, or
    /// not finite.
    #[error("invalid sample rate: {0} Hz")]
    InvalidSampleRate(f32),

    /// An empty buffer was passed to analyze.
    #[error("cannot analyze an empty buffer")]
    EmptyBuffer,
}
