//! Offset search by minimum windowed MSE.
//!
//! Candidate offsets are visited as one signed sequence `0, 1, -1, 2, -2, ...`
//! sharing a single best-so-far. That best value doubles as the scanner's
//! abort threshold, so most candidates stop after a few hundred samples.

use tracing::{debug, trace};

use super::correlation::search_offset_correlation;
use super::mse::scan_window;
use super::signal::Samples;
use super::types::{AlignMethod, AlignResult, OffsetEstimate, Polarity, NO_IMPROVEMENT};

/// Find the offset of `delayed` relative to `reference` with the smallest MSE.
///
/// Offsets `-(limit-1) ..= limit-1` are scanned, where
/// `limit = min(reference.len(), delayed.len(), max_offset)`. A positive
/// offset `k` means `delayed[k..]` lines up with `reference[..]`; a negative
/// offset `-k` means `reference[k..]` lines up with `delayed[..]`. Each
/// comparison uses at most `lookahead` samples (default: the longer input).
///
/// Ties keep the candidate found first, i.e. the smallest `|offset|`, with the
/// positive direction preferred. With `consider_both_polarities` the scan is
/// repeated on the sign-inverted delayed signal and the lower MSE wins.
///
/// If no candidate exists the result is offset 0 with score
/// [`NO_IMPROVEMENT`].
///
/// # Errors
/// `InvalidInput` when either input is not a contiguous 1-D buffer.
pub fn search_offset_mse<R, D>(
    reference: &R,
    delayed: &D,
    max_offset: usize,
    lookahead: Option<usize>,
    consider_both_polarities: bool,
) -> AlignResult<OffsetEstimate>
where
    R: Samples + ?Sized,
    D: Samples + ?Sized,
{
    let reference = reference.samples()?;
    let delayed = delayed.samples()?;
    let lookahead = lookahead.unwrap_or_else(|| reference.len().max(delayed.len()));

    let scan = |polarity| scan_offsets(reference, delayed, max_offset, lookahead, polarity);
    let mut best = scan(Polarity::Normal);
    if consider_both_polarities {
        let inverted = scan(Polarity::Inverted);
        if inverted.score < best.score {
            best = inverted;
        }
    }

    debug!(
        offset = best.offset,
        mse = best.score,
        polarity = %best.polarity,
        "MSE offset search finished"
    );
    Ok(best)
}

/// Find the best offset with the chosen method.
///
/// `Mse` scans `|offset| < max_offset`; `Corr` scans lags in
/// `[-max_offset, max_offset)`. Both honour `lookahead`.
pub fn find_best_alignment_offset<R, D>(
    reference: &R,
    delayed: &D,
    max_offset: usize,
    lookahead: Option<usize>,
    method: AlignMethod,
    consider_both_polarities: bool,
) -> AlignResult<OffsetEstimate>
where
    R: Samples + ?Sized,
    D: Samples + ?Sized,
{
    match method {
        AlignMethod::Mse => search_offset_mse(
            reference,
            delayed,
            max_offset,
            lookahead,
            consider_both_polarities,
        ),
        AlignMethod::Corr => {
            let bound = i64::try_from(max_offset).unwrap_or(i64::MAX);
            search_offset_correlation(
                reference,
                delayed,
                -bound,
                bound,
                lookahead,
                consider_both_polarities,
            )
        }
    }
}

/// One full pass over the candidate offsets at a fixed polarity.
fn scan_offsets(
    reference: &[f32],
    delayed: &[f32],
    max_offset: usize,
    lookahead: usize,
    polarity: Polarity,
) -> OffsetEstimate {
    let limit = reference.len().min(delayed.len()).min(max_offset);

    let mut best_offset = 0i64;
    let mut best_mse = NO_IMPROVEMENT;
    for offset in candidate_offsets(limit) {
        let (a, b, n) = window(reference, delayed, offset, lookahead);
        let mse = scan_window(a, b, n, best_mse, polarity);
        if mse < best_mse {
            best_mse = mse;
            best_offset = offset;
        }
    }

    trace!(%polarity, offset = best_offset, mse = best_mse, "polarity pass done");
    OffsetEstimate::new(best_offset, best_mse as f64).with_polarity(polarity)
}

/// `0, 1, -1, 2, -2, ...` up to `|offset| < limit`.
fn candidate_offsets(limit: usize) -> impl Iterator<Item = i64> {
    let limit = i64::try_from(limit).unwrap_or(i64::MAX);
    (0..limit).flat_map(|i| {
        let backward = (i > 0).then_some(-i);
        std::iter::once(i).chain(backward)
    })
}

/// The two overlapping slices compared for `offset`, plus the window length.
///
/// `offset` is always within `(-len, len)` of both signals here.
fn window<'a>(
    reference: &'a [f32],
    delayed: &'a [f32],
    offset: i64,
    lookahead: usize,
) -> (&'a [f32], &'a [f32], usize) {
    let shift = offset.unsigned_abs() as usize;
    if offset >= 0 {
        let a = &delayed[shift..];
        (a, reference, a.len().min(reference.len()).min(lookahead))
    } else {
        let a = &reference[shift..];
        (a, delayed, a.len().min(delayed.len()).min(lookahead))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidates_alternate_sign() {
        let got: Vec<i64> = candidate_offsets(3).collect();
        assert_eq!(got, vec![0, 1, -1, 2, -2]);
        assert_eq!(candidate_offsets(0).count(), 0);
    }

    #[test]
    fn finds_positive_offset() {
        let reference = [0.0f32, 1.0, 0.0, 0.0];
        let delayed = [0.0f32, 0.0, 1.0, 0.0];
        let est = search_offset_mse(&reference, &delayed, 4, None, false).unwrap();
        assert_eq!(est.offset, 1);
        assert_eq!(est.score, 0.0);
    }

    #[test]
    fn finds_negative_offset() {
        let reference = [0.0f32, 1.0, 0.0, 0.0];
        let delayed = [1.0f32, 0.0, 0.0, 0.0];
        let est = search_offset_mse(&reference, &delayed, 4, None, false).unwrap();
        assert_eq!(est.offset, -1);
    }

    #[test]
    fn zero_max_offset_finds_nothing() {
        let s = [1.0f32, 2.0, 3.0];
        let est = search_offset_mse(&s, &s, 0, None, false).unwrap();
        assert_eq!(est.offset, 0);
        assert_eq!(est.score, NO_IMPROVEMENT as f64);
    }

    #[test]
    fn empty_input_finds_nothing() {
        let empty: [f32; 0] = [];
        let est = search_offset_mse(&empty, &[1.0f32, 2.0], 10, None, true).unwrap();
        assert_eq!(est.offset, 0);
        assert_eq!(est.score, NO_IMPROVEMENT as f64);
        assert_eq!(est.polarity, Polarity::Normal);
    }

    #[test]
    fn ties_prefer_smallest_offset() {
        // Constant signals match equally well at every offset.
        let s = vec![0.5f32; 64];
        let est = search_offset_mse(&s, &s, 10, None, false).unwrap();
        assert_eq!(est.offset, 0);
    }

    #[test]
    fn ties_prefer_forward_direction() {
        // Offsets +1 and -1 both give zero error on an alternating signal
        // that is misaligned at offset 0.
        let reference: Vec<f32> = (0..32)
            .map(|i| if i % 2 == 0 { 1.0 } else { -1.0 })
            .collect();
        let delayed: Vec<f32> = reference.iter().map(|v| -v).collect();
        let est = search_offset_mse(&reference, &delayed, 4, None, false).unwrap();
        assert_eq!(est.offset, 1);
    }

    #[test]
    fn lookahead_bounds_the_window() {
        // Signals agree on the first 8 samples at offset 0 and diverge after.
        let reference: Vec<f32> = (0..32)
            .map(|i| if i < 8 { i as f32 } else { 0.0 })
            .collect();
        let mut delayed = reference.clone();
        for v in delayed.iter_mut().skip(8) {
            *v = 5.0;
        }
        let est = search_offset_mse(&reference, &delayed, 4, Some(8), false).unwrap();
        assert_eq!(est.offset, 0);
        assert_eq!(est.score, 0.0);
    }

    #[test]
    fn inverted_pass_wins_on_inverted_signal() {
        let reference: Vec<f32> = (0..200).map(|i| (i as f32 * 0.3).sin()).collect();
        let mut delayed = vec![0.0f32; 5];
        delayed.extend(reference.iter().map(|v| -v));
        let est = search_offset_mse(&reference, &delayed, 20, None, true).unwrap();
        assert_eq!(est.offset, 5);
        assert_eq!(est.polarity, Polarity::Inverted);
        assert!(est.score < 1e-9);
    }

    #[test]
    fn dispatcher_routes_by_method() {
        let reference: Vec<f32> = (0..400)
            .map(|i| (i as f32 * 0.37).sin() * (i as f32 * 0.011).cos())
            .collect();
        let mut delayed = vec![0.0f32; 12];
        delayed.extend_from_slice(&reference);

        let mse =
            find_best_alignment_offset(&reference, &delayed, 40, None, AlignMethod::Mse, false)
                .unwrap();
        let corr =
            find_best_alignment_offset(&reference, &delayed, 40, None, AlignMethod::Corr, false)
                .unwrap();
        assert_eq!(mse.offset, 12);
        assert_eq!(corr.offset, 12);
        assert!(corr.score > 0.99);
    }
}
