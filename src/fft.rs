use std::sync::Arc;

use rustfft::num_complex::Complex;

use crate::float::Float;

/// A planned forward FFT of a fixed size.
pub struct Fft<T: Float> {
    size: usize,
    forward: Arc<dyn rustfft::Fft<T>>,
}

impl<T: Float> Fft<T> {
    pub fn new(size: usize) -> Self {
        let mut planner = rustfft::FftPlanner::new();
        Self {
            size,
            forward: planner.plan_fft_forward(size),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn forward(&self, buffer: &mut [Complex<T>]) {
        self.forward.process(buffer);
    }

    /// Transforms a real buffer of `size` samples and keeps the
    /// `size / 2 + 1` non-negative frequency bins.
    pub fn real_spectrum(&self, buf: impl IntoIterator<Item = T>) -> Vec<Complex<T>> {
        let mut spec: Vec<_> = buf.into_iter().map(Complex::from).collect();
        spec.resize(self.size, Complex::from(T::zero()));
        self.forward(&mut spec);
        spec.truncate(self.size / 2 + 1);
        spec
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn real_spectrum_keeps_half_plus_one_bins() {
        let fft = Fft::<f64>::new(16);
        let tone = (0..16).map(|i| (i as f64 * std::f64::consts::TAU * 2.0 / 16.0).cos());
        let spec = fft.real_spectrum(tone);
        assert_eq!(spec.len(), 9);
        assert!((spec[2].norm() - 8.0).abs() < 1e-9);
        assert!(spec[3].norm() < 1e-9);
    }
}
