//! Butterworth lowpass applied to the recording before tracking.
//!
//! The filter is designed from the analog prototype poles with a prewarped
//! bilinear transform and runs as a cascade of second-order sections, one
//! forward pass from rest.

use std::f64::consts::PI;

use rustfft::num_complex::Complex64;

use crate::error::{Error, Result};

/// One second-order section, Direct Form II transposed.
///
/// `H(z) = (b0 + b1 z^-1 + b2 z^-2) / (1 + a1 z^-1 + a2 z^-2)`
#[derive(Debug, Clone)]
pub struct Biquad {
    b: [f64; 3],
    a: [f64; 2],
    state: [f64; 2],
}

impl Biquad {
    pub fn new(b: [f64; 3], a: [f64; 2]) -> Self {
        Self {
            b,
            a,
            state: [0.0; 2],
        }
    }

    pub fn process(&mut self, input: f64) -> f64 {
        let output = self.b[0] * input + self.state[0];
        self.state[0] = self.b[1] * input - self.a[0] * output + self.state[1];
        self.state[1] = self.b[2] * input - self.a[1] * output;
        output
    }

    pub fn reset(&mut self) {
        self.state = [0.0; 2];
    }

    /// Poles inside the unit circle.
    pub fn is_stable(&self) -> bool {
        self.a[1].abs() < 1.0 && self.a[0].abs() < 1.0 + self.a[1]
    }
}

#[derive(Debug, Clone)]
pub struct Lowpass {
    sections: Vec<Biquad>,
    order: usize,
}

impl Lowpass {
    pub fn butterworth(order: usize, cutoff_hz: f64, sample_rate: f64) -> Result<Self> {
        if order == 0 {
            return Err(Error::invalid("order", "must be at least 1"));
        }
        if !(sample_rate > 0.0) {
            return Err(Error::invalid("sample_rate", "must be positive"));
        }
        if !(cutoff_hz > 0.0 && cutoff_hz < sample_rate / 2.0) {
            return Err(Error::invalid(
                "cutoff",
                format!(
                    "{cutoff_hz} Hz is not between 0 and Nyquist ({} Hz)",
                    sample_rate / 2.0
                ),
            ));
        }

        let k = 2.0 * sample_rate;
        let wc = k * (PI * cutoff_hz / sample_rate).tan();

        // upper half plane poles pair with their conjugates; an odd order
        // leaves one real pole on the negative axis
        let mut sections: Vec<_> = (0..order / 2)
            .map(|i| {
                let theta = PI * (2 * i + order + 1) as f64 / (2 * order) as f64;
                second_order_section(Complex64::from_polar(wc, theta), k)
            })
            .collect();
        if order % 2 == 1 {
            sections.push(first_order_section(-wc, k));
        }

        Ok(Self { sections, order })
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn is_stable(&self) -> bool {
        self.sections.iter().all(Biquad::is_stable)
    }

    pub fn reset(&mut self) {
        self.sections.iter_mut().for_each(Biquad::reset);
    }

    pub fn process(&mut self, input: f64) -> f64 {
        self.sections
            .iter_mut()
            .fold(input, |x, section| section.process(x))
    }

    /// Filters `buf` from rest. The internal state is cleared first.
    pub fn apply(&mut self, buf: &[f64]) -> Vec<f64> {
        self.reset();
        buf.iter().map(|&x| self.process(x)).collect()
    }
}

/// `p` and its conjugate, unity gain at DC.
fn second_order_section(p: Complex64, k: f64) -> Biquad {
    let mag_sq = p.norm_sqr();
    let k2 = k * k;
    let d = k2 - 2.0 * k * p.re + mag_sq;
    Biquad::new(
        [mag_sq / d, 2.0 * mag_sq / d, mag_sq / d],
        [2.0 * (mag_sq - k2) / d, (k2 + 2.0 * k * p.re + mag_sq) / d],
    )
}

/// Real pole `p < 0`, unity gain at DC.
fn first_order_section(p: f64, k: f64) -> Biquad {
    let alpha = k - p;
    Biquad::new([-p / alpha, -p / alpha, 0.0], [-(k + p) / alpha, 0.0])
}
