//! Handicap range generation.

use once_cell::sync::Lazy;
use thiserror::Error;

use crate::models::HandicapRange;

/// Smallest handicap magnitude in the default range.
pub const DEFAULT_HANDICAP_START: f64 = 0.5;

/// Spacing between consecutive handicaps on the same side of zero.
pub const DEFAULT_HANDICAP_STEP: f64 = 2.0;

/// Values on each side of zero (so 18 in total).
pub const DEFAULT_HANDICAP_PER_SIDE: usize = 9;

/// Errors building a handicap range from configuration.
#[derive(Debug, Error, PartialEq)]
pub enum HandicapError {
    #[error("Handicap start must be a positive finite number, got {0}")]
    InvalidStart(f64),

    #[error("Handicap step must be a positive finite number, got {0}")]
    InvalidStep(f64),

    #[error("Handicap range needs at least one value per side")]
    Empty,

    #[error("Handicap value {0} is integral and could tie a kill differential")]
    IntegralValue(f64),
}

static DEFAULT_RANGE: Lazy<HandicapRange> = Lazy::new(|| {
    symmetric_range(
        DEFAULT_HANDICAP_START,
        DEFAULT_HANDICAP_STEP,
        DEFAULT_HANDICAP_PER_SIDE,
    )
    .unwrap_or_else(|e| unreachable!("default handicap range is valid: {e}"))
});

/// The process-wide default range: -16.5 ..= -0.5 then 0.5 ..= 16.5.
pub fn default_range() -> &'static HandicapRange {
    &DEFAULT_RANGE
}

/// Build a range mirrored around zero.
///
/// The positive half is `start + step * i` for `i in 0..per_side`; the negative
/// half is its mirror. Values are computed by index, never by repeated addition.
pub fn symmetric_range(
    start: f64,
    step: f64,
    per_side: usize,
) -> Result<HandicapRange, HandicapError> {
    if !start.is_finite() || start <= 0.0 {
        return Err(HandicapError::InvalidStart(start));
    }
    if !step.is_finite() || step <= 0.0 {
        return Err(HandicapError::InvalidStep(step));
    }
    if per_side == 0 {
        return Err(HandicapError::Empty);
    }

    let positive: Vec<f64> = (0..per_side).map(|i| start + step * i as f64).collect();
    if let Some(&v) = positive.iter().find(|v| v.fract() == 0.0) {
        return Err(HandicapError::IntegralValue(v));
    }

    let values = positive
        .iter()
        .rev()
        .map(|v| -v)
        .chain(positive.iter().copied())
        .collect();

    Ok(HandicapRange::from_values(values))
}
