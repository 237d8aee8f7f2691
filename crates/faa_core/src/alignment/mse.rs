//! Windowed mean squared error with early abort.
//!
//! The bulk of the window is reduced in fixed-width lanes (`LANES` samples per
//! block, one accumulator per lane) so the compiler can lower the loop to SIMD
//! on any target. A scalar loop handles the tail shorter than one block.
//!
//! Every `CHECKPOINT_BLOCKS` blocks the partial sum divided by the full
//! window length is compared against the caller's threshold. The partial sum
//! only grows, so once it reaches the threshold the final MSE cannot be a
//! strict improvement and the scan returns `NO_IMPROVEMENT`.

use super::types::{Polarity, NO_IMPROVEMENT};

/// Number of `f32` lanes reduced in parallel.
pub const LANES: usize = 8;

/// Blocks between two early-abort checks (96 samples).
const CHECKPOINT_BLOCKS: usize = 12;

/// Mean squared error of the first `n` samples of `a` and `b`.
///
/// Returns `NO_IMPROVEMENT` instead of the exact value when a checkpoint
/// shows the running mean is already `>= threshold`, and for an empty window.
/// `n` is clamped to the shorter buffer.
pub fn windowed_mse(a: &[f32], b: &[f32], n: usize, threshold: f32) -> f32 {
    scan_window(a, b, n, threshold, Polarity::Normal)
}

/// Same as [`windowed_mse`] with `b` taken at the given polarity.
///
/// `(x - (-y))^2 == (-x - y)^2`, so inverting either operand gives the same
/// score; callers can put the delayed signal on either side.
pub(crate) fn scan_window(
    a: &[f32],
    b: &[f32],
    n: usize,
    threshold: f32,
    polarity: Polarity,
) -> f32 {
    let n = n.min(a.len()).min(b.len());
    if n == 0 {
        return NO_IMPROVEMENT;
    }

    let sign = polarity.sign();
    let len = n as f32;
    let a_blocks = a[..n].chunks_exact(LANES);
    let b_blocks = b[..n].chunks_exact(LANES);
    let a_tail = a_blocks.remainder();
    let b_tail = b_blocks.remainder();

    let mut acc = LaneAccumulator::default();
    for (block, (xa, xb)) in a_blocks.zip(b_blocks).enumerate() {
        acc.add_squared_diff(xa, xb, sign);
        if (block + 1) % CHECKPOINT_BLOCKS == 0 && acc.sum() / len >= threshold {
            return NO_IMPROVEMENT;
        }
    }

    let mut sum = acc.sum();
    for (&x, &y) in a_tail.iter().zip(b_tail) {
        let d = x - sign * y;
        sum += d * d;
    }
    sum / len
}

/// One running sum per lane.
#[derive(Debug, Default)]
struct LaneAccumulator {
    lanes: [f32; LANES],
}

impl LaneAccumulator {
    #[inline(always)]
    fn add_squared_diff(&mut self, a: &[f32], b: &[f32], sign: f32) {
        for ((acc, &x), &y) in self.lanes.iter_mut().zip(a).zip(b) {
            let d = x - sign * y;
            *acc += d * d;
        }
    }

    #[inline]
    fn sum(&self) -> f32 {
        self.lanes.iter().sum()
    }
}
