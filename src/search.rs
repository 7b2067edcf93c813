/// Quality search engine.
///
/// Given an `encode(quality) -> size` capability and a target size
/// reduction, finds a quality level whose output meets the target within
/// a bounded number of trials. The engine performs no I/O itself; the
/// caller wraps a concrete encoder (in-memory JPEG, oxipng, ...) in the
/// closure.
///
/// Precondition: the encoder's output size must be monotonically
/// non-increasing as quality decreases. Real JPEG quality-vs-size curves
/// are not perfectly monotonic at every level; the engine treats this as
/// an accepted approximation and does not verify it.

use crate::constants::{CONVERGENCE_TOLERANCE, MAX_QUALITY, MIN_QUALITY};
use crate::error::{CompressionError, Result};

/// Inclusive integer quality range the search bisects over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualityRange {
    pub min: u8,
    pub max: u8,
}

impl QualityRange {
    pub fn new(min: u8, max: u8) -> Result<Self> {
        if min >= max {
            return Err(CompressionError::InvalidQualityRange(min, max));
        }
        Ok(Self { min, max })
    }

    pub fn span(&self) -> u8 {
        self.max - self.min
    }
}

impl Default for QualityRange {
    fn default() -> Self {
        Self {
            min: MIN_QUALITY,
            max: MAX_QUALITY,
        }
    }
}

/// One encoder trial: the quality asked for and the size that came back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeResult {
    pub quality: u8,
    pub encoded_size: u64,
}

/// Final report of a search run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchOutcome {
    pub quality: u8,
    pub encoded_size: u64,
    /// `(original - encoded) / original`; negative when the output grew.
    pub reduction: f64,
    /// False means the target was unreachable even at the range minimum.
    pub target_met: bool,
    /// Number of encoder invocations this run made.
    pub trials: u32,
}

struct SearchRun<F> {
    encode: F,
    trials: u32,
}

impl<F> SearchRun<F>
where
    F: FnMut(u8) -> Result<u64>,
{
    fn trial(&mut self, quality: u8) -> Result<EncodeResult> {
        self.trials += 1;
        let encoded_size = (self.encode)(quality).map_err(|e| CompressionError::EncodeFailed {
            quality,
            source: Box::new(e),
        })?;
        Ok(EncodeResult {
            quality,
            encoded_size,
        })
    }
}

fn validate_inputs(original_size: u64, target_reduction: f64) -> Result<()> {
    if !(target_reduction > 0.0 && target_reduction < 1.0) {
        return Err(CompressionError::InvalidTargetReduction(target_reduction));
    }
    if original_size == 0 {
        return Err(CompressionError::EmptySource);
    }
    Ok(())
}

fn reduction_of(original_size: u64, encoded_size: u64) -> f64 {
    (original_size as f64 - encoded_size as f64) / original_size as f64
}

fn midpoint(low: u8, high: u8) -> u8 {
    ((low as u16 + high as u16) / 2) as u8
}

fn outcome(result: EncodeResult, reduction: f64, target_met: bool, trials: u32) -> SearchOutcome {
    SearchOutcome {
        quality: result.quality,
        encoded_size: result.encoded_size,
        reduction,
        target_met,
        trials,
    }
}

/// Search for the quality level that reaches `target_reduction`.
///
/// Probes the range maximum first; if that already meets the target the
/// search returns after exactly one trial. Otherwise the quality range is
/// bisected until a trial meets the target or the window narrows to the
/// convergence tolerance. A run that converges unmet ends with a floor
/// trial at the range minimum, reported with `target_met = false` (an
/// unreachable target is a normal outcome, not an error).
///
/// Total encoder invocations are bounded by `ceil(log2(span)) + 1`.
pub fn search_quality<F>(
    original_size: u64,
    target_reduction: f64,
    range: QualityRange,
    encode: F,
) -> Result<SearchOutcome>
where
    F: FnMut(u8) -> Result<u64>,
{
    validate_inputs(original_size, target_reduction)?;

    let mut run = SearchRun { encode, trials: 0 };

    // Baseline probe at maximum quality.
    let probe = run.trial(range.max)?;
    let mut reduction = reduction_of(original_size, probe.encoded_size);
    if reduction >= target_reduction {
        return Ok(outcome(probe, reduction, true, run.trials));
    }

    let low = range.min;
    let mut high = range.max;
    let mut last = probe;

    while high - low > CONVERGENCE_TOLERANCE {
        let mid = midpoint(low, high);
        last = run.trial(mid)?;
        reduction = reduction_of(original_size, last.encoded_size);
        if reduction >= target_reduction {
            // First quality known to satisfy the target; every earlier
            // trial fell short at a higher quality.
            return Ok(outcome(last, reduction, true, run.trials));
        }
        high = mid;
    }

    // Converged without meeting the target. The floor trial decides
    // whether the range minimum still reaches it.
    if last.quality != range.min {
        last = run.trial(range.min)?;
        reduction = reduction_of(original_size, last.encoded_size);
    }
    Ok(outcome(
        last,
        reduction,
        reduction >= target_reduction,
        run.trials,
    ))
}

/// Single-trial shortcut for encoders without a continuous quality axis
/// (lossless targets, discrete presets). One encode call, no search; the
/// outcome carries the same target bookkeeping as a full run.
pub fn single_trial<F>(
    original_size: u64,
    target_reduction: f64,
    quality: u8,
    encode: F,
) -> Result<SearchOutcome>
where
    F: FnMut(u8) -> Result<u64>,
{
    validate_inputs(original_size, target_reduction)?;

    let mut run = SearchRun { encode, trials: 0 };
    let result = run.trial(quality)?;
    let reduction = reduction_of(original_size, result.encoded_size);
    Ok(outcome(
        result,
        reduction,
        reduction >= target_reduction,
        run.trials,
    ))
}
