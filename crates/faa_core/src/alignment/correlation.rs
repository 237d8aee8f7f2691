//! Offset search by decimated correlation coefficient.
//!
//! For each lag the Pearson coefficient of the two overlapping ranges is
//! computed on every `DECIMATION`th sample only. This trades accuracy for
//! speed; the extremum lands in the same place as the full-resolution one
//! for typical audio bandwidths.

use tracing::{debug, warn};

use super::signal::Samples;
use super::types::{AlignError, AlignResult, OffsetEstimate, Polarity};

/// Only every `DECIMATION`th sample enters the coefficient.
pub const DECIMATION: usize = 4;

/// Find the lag in `[min_offset, max_offset)` whose correlation coefficient is
/// most extreme.
///
/// Lag `t > 0` compares `reference[0..]` with `delayed[t..]`, lag `t < 0`
/// compares `reference[-t..]` with `delayed[0..]`; both ranges are cut to
/// their common length. The sign convention therefore matches
/// [`search_offset_mse`](super::search_offset_mse).
///
/// If `lookahead` is set and shorter than the reference, both signals are
/// first cropped to `lookahead` samples starting at the middle of the
/// reference (the window begins there; it is not centred on it).
///
/// With `consider_both_polarities` the largest `|coefficient|` wins and a
/// negative winner is reported as [`Polarity::Inverted`]; otherwise the
/// largest signed coefficient wins. Ties keep the first lag scanned.
///
/// # Caveat
/// Unlike the MSE search, degenerate windows (empty, or constant on either
/// side) are not errors: their coefficient is NaN. A NaN never beats a defined
/// coefficient, but if every lag is degenerate the first lag is returned with
/// a NaN score. Callers must check `score.is_nan()`.
///
/// # Errors
/// `InvalidInput` when either input is not a contiguous 1-D buffer or the lag
/// range is empty.
pub fn search_offset_correlation<R, D>(
    reference: &R,
    delayed: &D,
    min_offset: i64,
    max_offset: i64,
    lookahead: Option<usize>,
    consider_both_polarities: bool,
) -> AlignResult<OffsetEstimate>
where
    R: Samples + ?Sized,
    D: Samples + ?Sized,
{
    let reference = reference.samples()?;
    let delayed = delayed.samples()?;
    if min_offset >= max_offset {
        return Err(AlignError::InvalidInput(format!(
            "empty lag range [{min_offset}, {max_offset})"
        )));
    }

    let (reference, delayed) = match lookahead {
        Some(len) if reference.len() > len => {
            let middle = reference.len() / 2;
            (
                window_from(reference, middle, len),
                window_from(delayed, middle, len),
            )
        }
        _ => (reference, delayed),
    };

    let magnitude = |coef: f64| {
        if consider_both_polarities {
            coef.abs()
        } else {
            coef
        }
    };

    let mut best_lag = min_offset;
    let mut best_coef = lagged_coefficient(reference, delayed, min_offset);
    for lag in (min_offset + 1)..max_offset {
        let coef = lagged_coefficient(reference, delayed, lag);
        if is_more_extreme(magnitude(coef), magnitude(best_coef)) {
            best_lag = lag;
            best_coef = coef;
        }
    }

    if best_coef.is_nan() {
        warn!(min_offset, max_offset, "no lag had a defined coefficient");
    }

    let polarity = if consider_both_polarities && best_coef < 0.0 {
        Polarity::Inverted
    } else {
        Polarity::Normal
    };
    debug!(
        offset = best_lag,
        coefficient = best_coef,
        %polarity,
        "correlation offset search finished"
    );
    let estimate = OffsetEstimate::new(best_lag, best_coef).with_polarity(polarity);
    Ok(estimate)
}

/// NaN is never more extreme than anything; anything defined beats NaN.
fn is_more_extreme(candidate: f64, incumbent: f64) -> bool {
    !candidate.is_nan() && (incumbent.is_nan() || candidate > incumbent)
}

/// Up to `len` samples beginning at `start`, clamped to the signal.
fn window_from(signal: &[f32], start: usize, len: usize) -> &[f32] {
    let start = start.min(signal.len());
    let end = start.saturating_add(len).min(signal.len());
    &signal[start..end]
}

fn lagged_coefficient(reference: &[f32], delayed: &[f32], lag: i64) -> f64 {
    let shift = usize::try_from(lag.unsigned_abs()).unwrap_or(usize::MAX);
    let (a, b) = if lag >= 0 {
        (reference, delayed.get(shift..).unwrap_or_default())
    } else {
        (reference.get(shift..).unwrap_or_default(), delayed)
    };
    let len = a.len().min(b.len());
    pearson(&a[..len], &b[..len], DECIMATION)
}

/// Pearson coefficient of `x[::step]` and `y[::step]`, in `f64`.
///
/// NaN when fewer than two samples or either side has zero variance.
pub(crate) fn pearson(x: &[f32], y: &[f32], step: usize) -> f64 {
    let len = x.len().min(y.len());
    let (x, y) = (&x[..len], &y[..len]);
    let xs = || x.iter().step_by(step).map(|&v| v as f64);
    let ys = || y.iter().step_by(step).map(|&v| v as f64);

    let count = xs().count();
    if count < 2 {
        return f64::NAN;
    }
    let mean_x = xs().sum::<f64>() / count as f64;
    let mean_y = ys().sum::<f64>() / count as f64;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (a, b) in xs().zip(ys()) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denom = (var_x * var_y).sqrt();
    if denom == 0.0 {
        return f64::NAN;
    }
    (cov / denom).clamp(-1.0, 1.0)
}
