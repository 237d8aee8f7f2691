//! Offset search and alignment for pairs of audio signals.
//!
//! All functions here are pure: they borrow the caller's buffers read-only,
//! keep no state between calls and do no I/O.
//!
//! # Architecture
//!
//! 1. **Scanner** (`mse`): windowed mean squared error reduced in 8 lanes,
//!    with early abort once the running error cannot beat the current best.
//!
//! 2. **MSE search** (`search`): drives the scanner over offsets
//!    `0, 1, -1, 2, -2, ...` and optionally over the inverted polarity.
//!
//! 3. **Correlation search** (`correlation`): decimated Pearson coefficient
//!    for every lag in an asymmetric range.
//!
//! 4. **Applicator** (`apply`): shifts a (possibly multi-channel) signal onto
//!    the reference timeline and reports zero-filled gaps.
//!
//! # Usage
//!
//! ```
//! use faa_core::alignment::{align_slice_with_offset, search_offset_mse, Gap};
//!
//! let reference = [0.0f32, 1.0, 0.0, 0.0];
//! let delayed = [1.0f32, 0.0, 0.0, 0.0];
//!
//! let estimate = search_offset_mse(&reference, &delayed, 4, None, false)?;
//! assert_eq!(estimate.offset, -1);
//!
//! let (aligned, gaps) = align_slice_with_offset(reference.len(), &delayed, estimate.offset);
//! assert_eq!(aligned, reference);
//! assert_eq!(gaps, vec![Gap::new(0, 1)]);
//! # Ok::<(), faa_core::alignment::AlignError>(())
//! ```

mod apply;
mod correlation;
mod mse;
mod pair;
mod search;
mod signal;
pub mod types;

pub use types::{
    AlignError, AlignMethod, AlignMode, AlignResult, FixLength, Gap, OffsetEstimate, Polarity,
    NO_IMPROVEMENT,
};

pub use apply::{align_slice_with_offset, align_with_offset, Aligned};
pub use correlation::{search_offset_correlation, DECIMATION};
pub use mse::{windowed_mse, LANES};
pub use pair::align_pair;
pub use search::{find_best_alignment_offset, search_offset_mse};
pub use signal::Samples;
