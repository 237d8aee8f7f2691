//! Applying a found offset to a delayed signal.
//!
//! The output always has the reference length along the time axis (the last
//! axis). Positions that receive no delayed data are zero and reported as
//! gaps: at most one at the front and one at the back.

use std::ops::Range;

use ndarray::{Array, ArrayBase, Axis, Data, Dimension, Slice};

use super::types::{AlignError, AlignResult, Gap};

/// Delayed signal shifted onto the reference timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Aligned<D: Dimension> {
    /// Output with the last axis resized to the reference length.
    pub signal: Array<f32, D>,
    /// Zero-filled regions in ascending order.
    pub gaps: Vec<Gap>,
}

/// Shift `delayed` by `offset` onto a timeline of `reference_length` samples.
///
/// - `offset < 0`: `-offset` samples of silence are inserted at the front.
/// - `offset == 0`: samples are copied as they are.
/// - `offset > 0`: the first `offset` samples of `delayed` are dropped.
///
/// Delayed data that overflows the output is truncated; a shortfall is
/// zero-filled and reported as a trailing gap. Leading axes (channels,
/// batches) are preserved.
///
/// # Errors
/// `InvalidInput` for a zero-dimensional array, which has no time axis.
pub fn align_with_offset<S, D>(
    reference_length: usize,
    delayed: &ArrayBase<S, D>,
    offset: i64,
) -> AlignResult<Aligned<D>>
where
    S: Data<Elem = f32>,
    D: Dimension,
{
    if delayed.ndim() == 0 {
        return Err(AlignError::InvalidInput(
            "cannot align a zero-dimensional array".to_string(),
        ));
    }
    let axis = Axis(delayed.ndim() - 1);
    let plan = ShiftPlan::new(reference_length, delayed.len_of(axis), offset);

    let mut shape = delayed.raw_dim();
    shape[axis.index()] = reference_length;
    let mut signal = Array::<f32, D>::zeros(shape);
    if !plan.dst.is_empty() {
        signal
            .slice_axis_mut(axis, Slice::from(plan.dst.clone()))
            .assign(&delayed.slice_axis(axis, Slice::from(plan.src.clone())));
    }

    Ok(Aligned {
        signal,
        gaps: plan.gaps(),
    })
}

/// Single-channel form of [`align_with_offset`] on plain slices.
pub fn align_slice_with_offset(
    reference_length: usize,
    delayed: &[f32],
    offset: i64,
) -> (Vec<f32>, Vec<Gap>) {
    let plan = ShiftPlan::new(reference_length, delayed.len(), offset);
    let mut signal = vec![0.0; reference_length];
    signal[plan.dst.clone()].copy_from_slice(&delayed[plan.src.clone()]);
    (signal, plan.gaps())
}

/// Which source range lands where in the output.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ShiftPlan {
    src: Range<usize>,
    dst: Range<usize>,
    output_len: usize,
}

impl ShiftPlan {
    fn new(output_len: usize, source_len: usize, offset: i64) -> Self {
        let shift = usize::try_from(offset.unsigned_abs()).unwrap_or(usize::MAX);
        let (src_start, dst_start) = if offset < 0 {
            (0, shift.min(output_len))
        } else {
            (shift.min(source_len), 0)
        };
        let count = (source_len - src_start).min(output_len - dst_start);
        Self {
            src: src_start..src_start + count,
            dst: dst_start..dst_start + count,
            output_len,
        }
    }

    fn gaps(&self) -> Vec<Gap> {
        if self.output_len == 0 {
            return Vec::new();
        }
        if self.dst.is_empty() {
            return vec![Gap::new(0, self.output_len)];
        }
        let mut gaps = Vec::with_capacity(2);
        if self.dst.start > 0 {
            gaps.push(Gap::new(0, self.dst.start));
        }
        if self.dst.end < self.output_len {
            gaps.push(Gap::new(self.dst.end, self.output_len));
        }
        gaps
    }
}
