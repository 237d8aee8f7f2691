//! Settings-driven alignment of decoded audio.

use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

use crate::alignment::{
    align_pair, align_slice_with_offset, find_best_alignment_offset, AlignError, AlignMethod,
    AlignResult, Gap, OffsetEstimate, Polarity,
};
use crate::config::AlignmentSettings;

use super::audio::{ms_to_samples, AudioBuffer};

/// Outcome of aligning one delayed buffer to a reference.
#[derive(Debug, Clone, Serialize)]
pub struct AlignmentReport {
    /// Method that produced the offset.
    pub method: AlignMethod,
    /// Offset in samples (see [`OffsetEstimate::offset`]).
    pub offset_samples: i64,
    /// Offset in milliseconds.
    pub offset_ms: f64,
    /// MSE or correlation coefficient.
    pub score: f64,
    /// Polarity of the delayed signal at the chosen offset.
    pub polarity: Polarity,
    /// Zero-filled regions of `aligned`.
    pub gaps: Vec<Gap>,
    /// Delayed audio shifted onto the reference timeline.
    #[serde(skip_serializing)]
    pub aligned: AudioBuffer,
}

impl AlignmentReport {
    /// Serialize the report (without samples) as pretty JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Both signals of a pair after crop/pad and length fixing.
#[derive(Debug, Clone)]
pub struct AlignedPair {
    pub reference: Vec<f32>,
    pub delayed: Vec<f32>,
    pub estimate: OffsetEstimate,
}

/// Aligns delayed audio to a reference according to [`AlignmentSettings`].
#[derive(Debug, Clone, Default)]
pub struct Aligner {
    settings: AlignmentSettings,
}

impl Aligner {
    /// Aligner using `settings` for every call.
    pub fn new(settings: AlignmentSettings) -> Self {
        Self { settings }
    }

    /// Settings this aligner was built with.
    pub fn settings(&self) -> &AlignmentSettings {
        &self.settings
    }

    /// Estimate the offset of `delayed` relative to `reference`.
    pub fn estimate(
        &self,
        reference: &AudioBuffer,
        delayed: &AudioBuffer,
    ) -> AlignResult<OffsetEstimate> {
        if reference.sample_rate != delayed.sample_rate {
            return Err(AlignError::InvalidInput(format!(
                "sample rate mismatch: {} vs {}",
                reference.sample_rate, delayed.sample_rate
            )));
        }
        let sample_rate = reference.sample_rate;
        let max_offset = ms_to_samples(self.settings.max_offset_ms, sample_rate);
        let lookahead = self
            .settings
            .lookahead_ms
            .map(|ms| ms_to_samples(ms, sample_rate));

        let estimate = find_best_alignment_offset(
            &reference.samples,
            &delayed.samples,
            max_offset,
            lookahead,
            self.settings.method,
            self.settings.consider_both_polarities,
        )?;

        if estimate.score.is_nan() {
            warn!(
                offset = estimate.offset,
                "correlation undefined for every lag; offset is a fallback"
            );
        }
        Ok(estimate)
    }

    /// Estimate the offset and shift `delayed` onto the reference timeline.
    pub fn align(
        &self,
        reference: &AudioBuffer,
        delayed: &AudioBuffer,
    ) -> AlignResult<AlignmentReport> {
        let estimate = self.estimate(reference, delayed)?;
        let (samples, gaps) =
            align_slice_with_offset(reference.len(), &delayed.samples, estimate.offset);

        let filled = gaps.iter().map(Gap::len).sum::<usize>();
        if !reference.is_empty() && filled == reference.len() {
            warn!(
                offset = estimate.offset,
                "aligned output contains no delayed samples"
            );
        }

        let offset_ms = estimate.offset_ms(reference.sample_rate);
        info!(
            method = %self.settings.method,
            offset_samples = estimate.offset,
            offset_ms,
            score = estimate.score,
            polarity = %estimate.polarity,
            gaps = gaps.len(),
            duration_secs = reference.duration_secs(),
            "aligned delayed audio"
        );

        Ok(AlignmentReport {
            method: self.settings.method,
            offset_samples: estimate.offset,
            offset_ms,
            score: estimate.score,
            polarity: estimate.polarity,
            gaps,
            aligned: AudioBuffer::new(samples, reference.sample_rate),
        })
    }

    /// Align several recordings of the same event to one reference.
    ///
    /// Runs in parallel; results are in the order of `others`.
    pub fn align_many(
        &self,
        reference: &AudioBuffer,
        others: &[AudioBuffer],
    ) -> Vec<AlignResult<AlignmentReport>> {
        others
            .par_iter()
            .map(|delayed| self.align(reference, delayed))
            .collect()
    }

    /// Estimate the offset, then crop or pad the pair per `align_mode` and
    /// `fix_length`.
    pub fn align_pair(
        &self,
        reference: &AudioBuffer,
        delayed: &AudioBuffer,
    ) -> AlignResult<AlignedPair> {
        let estimate = self.estimate(reference, delayed)?;
        let (reference, delayed) = align_pair(
            &reference.samples,
            &delayed.samples,
            estimate.offset,
            self.settings.align_mode,
            self.settings.fix_length,
        );
        Ok(AlignedPair {
            reference,
            delayed,
            estimate,
        })
    }
}
