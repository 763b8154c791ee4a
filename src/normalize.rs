//! Maps trajectories onto the `[-1, 1]` range of a control signal.

use tracing::warn;

use crate::{
    error::{Error, Result},
    float::Float,
};

pub const MIN_FREQ: f64 = 65.0;
pub const MAX_FREQ: f64 = 1000.0;

/// Input range of the frequency mapping, in Hz.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyRange<T> {
    pub min: T,
    pub max: T,
}

impl<T: Float> Default for FrequencyRange<T> {
    fn default() -> Self {
        Self {
            min: T::lit(MIN_FREQ),
            max: T::lit(MAX_FREQ),
        }
    }
}

impl<T: Float> FrequencyRange<T> {
    pub fn new(min: T, max: T) -> Result<Self> {
        check_range(min, max)?;
        Ok(Self { min, max })
    }
}

fn check_range<T: Float>(min: T, max: T) -> Result<()> {
    if !(max > min) || !min.is_finite() || !max.is_finite() {
        return Err(Error::DegenerateRange {
            min: min.to_f64().unwrap_or(f64::NAN),
            max: max.to_f64().unwrap_or(f64::NAN),
        });
    }
    Ok(())
}

pub fn scale_to_unit<T: Float>(x: T, in_min: T, in_max: T) -> T {
    T::lit(2.0) * (x - in_min) / (in_max - in_min) - T::one()
}

pub fn unscale_from_unit<T: Float>(y: T, in_min: T, in_max: T) -> T {
    (y + T::one()) * (in_max - in_min) / T::lit(2.0) + in_min
}

/// Linear magnitude of a dB value.
pub fn delog<T: Float>(db: T) -> T {
    T::lit(10.0).powf(db / T::lit(20.0))
}

/// Rescales every frequency trajectory from `range` to `[-1, 1]`.
///
/// Values outside `range` map outside `[-1, 1]` and are passed through.
pub fn normalize_frequencies<T: Float>(
    frequencies: &[Vec<T>],
    range: FrequencyRange<T>,
) -> Result<Vec<Vec<T>>> {
    check_range(range.min, range.max)?;

    let outside = frequencies
        .iter()
        .flatten()
        .filter(|&&f| f < range.min || f > range.max)
        .count();
    if outside > 0 {
        warn!(
            "[normalize] {} frequency values fall outside {:?}..{:?} Hz",
            outside, range.min, range.max
        );
    }

    Ok(frequencies
        .iter()
        .map(|track| {
            track
                .iter()
                .map(|&f| scale_to_unit(f, range.min, range.max))
                .collect()
        })
        .collect())
}

/// De-logs every amplitude trajectory and rescales all of them with one
/// shared range, the global minimum and maximum over every partial.
pub fn normalize_amplitudes<T: Float>(amplitudes_db: &[Vec<T>]) -> Result<Vec<Vec<T>>> {
    let linear: Vec<Vec<T>> = amplitudes_db
        .iter()
        .map(|track| track.iter().map(|&db| delog(db)).collect())
        .collect();

    let (min, max) = linear
        .iter()
        .flatten()
        .fold((T::infinity(), T::neg_infinity()), |(lo, hi), &x| {
            (lo.min(x), hi.max(x))
        });
    check_range(min, max)?;

    Ok(linear
        .into_iter()
        .map(|track| {
            track
                .into_iter()
                .map(|x| scale_to_unit(x, min, max))
                .collect()
        })
        .collect())
}
