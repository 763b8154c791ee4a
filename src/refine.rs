//! Sub-bin frequency estimation from the phase advance between two FFTs.

use crate::{
    error::{Error, Result},
    float::Float,
};

/// Brings `phase` into `[-pi, pi]` by whole turns.
///
/// Steps one turn at a time rather than taking a remainder, so the result is
/// the same as unwinding a phase that drifted by a few turns.
pub fn wrap_phase<T: Float>(mut phase: T) -> T {
    while phase > T::PI() {
        phase = phase - T::TAU();
    }
    while phase < -T::PI() {
        phase = phase + T::TAU();
    }
    phase
}

/// Corrected frequency in Hz of the partial found at `bin`.
///
/// `phase1` and `phase2` are the phases of `bin` in the spectra of two
/// blocks `hop` samples apart. The nominal phase advance attributed to the
/// bin is `2 pi / (fft_size * bin * hop)`; the wrapped deviation from it is
/// added back before converting the phase difference to Hz.
pub fn refine_frequency<T: Float>(
    bin: usize,
    phase1: T,
    phase2: T,
    fft_size: usize,
    hop: usize,
    sample_rate: T,
) -> Result<T> {
    if bin == 0 {
        return Err(Error::DegenerateBin);
    }
    let expected = phase1 + T::TAU() / T::from_index(fft_size * bin * hop);
    let unwrapped = expected + wrap_phase(phase2 - expected);
    let dt = T::from_index(hop) / sample_rate;
    Ok((unwrapped - phase1) / (T::TAU() * dt))
}
