//! Windowed spectra of the two time-shifted analysis blocks.
//!
//! Block 1 starts at offset `i`, block 2 at `i + hop`. Both are Hann-windowed
//! and transformed, and each spectrum is reduced to magnitude in dB and phase.

use crate::{
    error::{Error, Result},
    fft::Fft,
    float::Float,
    windows::{apply_window, hann_window},
};

/// Magnitude (dB) and phase of the `fft_size / 2 + 1` non-negative bins.
///
/// A bin with zero magnitude holds `-inf` dB.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum<T> {
    pub magnitude_db: Vec<T>,
    pub phase: Vec<T>,
}

impl<T> Spectrum<T> {
    pub fn len(&self) -> usize {
        self.magnitude_db.len()
    }

    pub fn is_empty(&self) -> bool {
        self.magnitude_db.is_empty()
    }
}

pub fn bin_frequency<T: Float>(bin: usize, sample_rate: T, fft_size: usize) -> T {
    T::from_index(bin) * sample_rate / T::from_index(fft_size)
}

pub struct SpectrumAnalyzer<T: Float> {
    fft: Fft<T>,
    window: Vec<T>,
}

impl<T: Float> SpectrumAnalyzer<T> {
    pub fn new(fft_size: usize) -> Self {
        Self {
            fft: Fft::new(fft_size),
            window: hann_window(fft_size),
        }
    }

    pub fn fft_size(&self) -> usize {
        self.fft.size()
    }

    pub fn analyze(&self, block: &[T]) -> Spectrum<T> {
        let spec = self
            .fft
            .real_spectrum(apply_window(&self.window, block.iter().copied()));
        let twenty = T::lit(20.0);
        Spectrum {
            magnitude_db: spec.iter().map(|x| twenty * x.norm().log10()).collect(),
            phase: spec.iter().map(|x| x.arg()).collect(),
        }
    }

    /// Spectra of `signal[offset..offset + N]` and `signal[offset + hop..offset + hop + N]`.
    pub fn analyze_pair(
        &self,
        signal: &[T],
        offset: usize,
        hop: usize,
    ) -> Result<(Spectrum<T>, Spectrum<T>)> {
        let fft_size = self.fft_size();
        if offset + fft_size + hop > signal.len() {
            return Err(Error::BlockOutOfRange {
                offset,
                fft_size,
                hop,
                len: signal.len(),
            });
        }
        let block1 = &signal[offset..offset + fft_size];
        let block2 = &signal[offset + hop..offset + hop + fft_size];
        Ok((self.analyze(block1), self.analyze(block2)))
    }
}
