//! Alignment pipeline on decoded audio.
//!
//! Turns millisecond settings into sample counts, runs the configured search
//! and applies the offset. Decoding is left to the caller, who hands over
//! [`AudioBuffer`]s.

mod aligner;
mod audio;

pub use aligner::{AlignedPair, Aligner, AlignmentReport};
pub use audio::{ms_to_samples, AudioBuffer};
