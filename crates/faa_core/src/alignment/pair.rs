//! Crop or pad a pair of signals once their offset is known.

use super::types::{AlignMode, FixLength};

/// Bring `reference` and `delayed` into alignment for a known `offset`.
///
/// A positive offset means `delayed` starts late: `Crop` drops `offset`
/// samples from its front, `Pad` prepends `offset` zeros to `reference`.
/// A negative offset swaps the roles. `fix` then optionally reconciles the
/// lengths at the end of the signals.
pub fn align_pair(
    reference: &[f32],
    delayed: &[f32],
    offset: i64,
    mode: AlignMode,
    fix: Option<FixLength>,
) -> (Vec<f32>, Vec<f32>) {
    let shift = usize::try_from(offset.unsigned_abs()).unwrap_or(usize::MAX);
    let (reference, delayed) = if offset >= 0 {
        let (delayed, reference) = shift_one(delayed, reference, shift, mode);
        (reference, delayed)
    } else {
        shift_one(reference, delayed, shift, mode)
    };
    fix_lengths(reference, delayed, fix)
}

/// `Crop`: drop `shift` samples from `leading`. `Pad`: delay `lagging`.
fn shift_one(
    leading: &[f32],
    lagging: &[f32],
    shift: usize,
    mode: AlignMode,
) -> (Vec<f32>, Vec<f32>) {
    match mode {
        AlignMode::Crop => {
            let start = shift.min(leading.len());
            (leading[start..].to_vec(), lagging.to_vec())
        }
        AlignMode::Pad => {
            let mut padded = vec![0.0; shift];
            padded.extend_from_slice(lagging);
            (leading.to_vec(), padded)
        }
    }
}

fn fix_lengths(mut a: Vec<f32>, mut b: Vec<f32>, fix: Option<FixLength>) -> (Vec<f32>, Vec<f32>) {
    match fix {
        None => {}
        Some(FixLength::Shortest) => {
            let len = a.len().min(b.len());
            a.truncate(len);
            b.truncate(len);
        }
        Some(FixLength::Longest) => {
            let len = a.len().max(b.len());
            a.resize(len, 0.0);
            b.resize(len, 0.0);
        }
    }
    (a, b)
}
