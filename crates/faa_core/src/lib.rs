//! faa_core - fast sample-offset estimation and alignment for audio signals.
//!
//! Finds the integer sample offset that best lines up two recordings of the
//! same event, then shifts one onto the other's timeline while tracking the
//! zero-filled edges. Decoding is left to the caller.
//!
//! - [`alignment`]: the pure search and alignment functions
//! - [`pipeline`]: settings-driven alignment of decoded audio
//! - [`config`]: TOML configuration
//! - [`logging`]: `tracing` setup

pub mod alignment;
pub mod config;
pub mod logging;
pub mod pipeline;

pub use alignment::{
    align_with_offset, find_best_alignment_offset, search_offset_correlation, search_offset_mse,
    AlignError, AlignMethod, AlignResult, Gap, OffsetEstimate,
};
pub use pipeline::{Aligner, AlignmentReport, AudioBuffer};

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
