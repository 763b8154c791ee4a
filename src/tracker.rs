//! Slides the block pair over the signal and collects the loudest partials
//! of every hop.

use tracing::debug;

use crate::{
    error::{Error, Result},
    float::Float,
    peaks::select_peaks,
    refine::refine_frequency,
    spectrum::SpectrumAnalyzer,
    trajectory::Trajectories,
};

const PROGRESS_INTERVAL: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackerParams<T> {
    pub fft_size: usize,
    /// Offset between the two blocks of a pair, in samples.
    pub phase_hop: usize,
    /// Offset between consecutive block pairs, in samples.
    pub time_hop: usize,
    pub partials: usize,
    pub sample_rate: T,
}

impl<T: Float> TrackerParams<T> {
    pub fn validate(&self) -> Result<()> {
        if self.fft_size < 4 || self.fft_size % 2 != 0 {
            return Err(Error::invalid("fft_size", "must be even and at least 4"));
        }
        if self.phase_hop == 0 {
            return Err(Error::invalid("phase_hop", "must be at least 1"));
        }
        if self.time_hop == 0 {
            return Err(Error::invalid("time_hop", "must be at least 1"));
        }
        if self.partials == 0 {
            return Err(Error::invalid("partials", "must be at least 1"));
        }
        if !(self.sample_rate > T::zero()) {
            return Err(Error::invalid("sample_rate", "must be positive"));
        }
        Ok(())
    }

    /// Samples spanned by one block pair.
    pub fn span(&self) -> usize {
        self.fft_size + self.phase_hop
    }

    /// Start offsets of every block pair that fits in a signal of `len` samples.
    pub fn hop_offsets(&self, len: usize) -> Result<impl Iterator<Item = usize>> {
        let span = self.span();
        if len < span {
            return Err(Error::SignalTooShort {
                len,
                required: span,
            });
        }
        Ok((0..=len - span).step_by(self.time_hop))
    }

    pub fn hop_count(&self, len: usize) -> usize {
        len.checked_sub(self.span())
            .map_or(0, |last| last / self.time_hop + 1)
    }
}

/// One rank at one hop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PartialEstimate<T> {
    pub bin: usize,
    pub frequency: T,
    pub magnitude_db: T,
}

pub struct PartialTracker<T: Float> {
    params: TrackerParams<T>,
    analyzer: SpectrumAnalyzer<T>,
}

impl<T: Float> PartialTracker<T> {
    pub fn new(params: TrackerParams<T>) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            analyzer: SpectrumAnalyzer::new(params.fft_size),
            params,
        })
    }

    pub fn params(&self) -> &TrackerParams<T> {
        &self.params
    }

    /// Partials of the block pair starting at `offset`, loudest first.
    ///
    /// The frequency and the magnitude of each rank come from the same peak,
    /// so the two trajectories built from them stay aligned.
    pub fn estimate_hop(&self, signal: &[T], offset: usize) -> Result<Vec<PartialEstimate<T>>> {
        let TrackerParams {
            fft_size,
            phase_hop,
            partials,
            sample_rate,
            ..
        } = self.params;

        let (first, second) = self.analyzer.analyze_pair(signal, offset, phase_hop)?;
        select_peaks(&first.magnitude_db, partials)?
            .into_iter()
            .map(|peak| {
                let frequency = refine_frequency(
                    peak.bin,
                    first.phase[peak.bin],
                    second.phase[peak.bin],
                    fft_size,
                    phase_hop,
                    sample_rate,
                )?;
                Ok(PartialEstimate {
                    bin: peak.bin,
                    frequency,
                    magnitude_db: peak.magnitude_db,
                })
            })
            .collect()
    }

    pub fn track(&self, signal: &[T]) -> Result<Trajectories<T>> {
        let hops = self.params.hop_count(signal.len());
        let mut trajectories = Trajectories::with_capacity(self.params.partials, hops);
        let mut frequencies = Vec::with_capacity(self.params.partials);
        let mut amplitudes = Vec::with_capacity(self.params.partials);

        for (hop, offset) in self.params.hop_offsets(signal.len())?.enumerate() {
            let estimates = self.estimate_hop(signal, offset)?;
            frequencies.clear();
            amplitudes.clear();
            frequencies.extend(estimates.iter().map(|e| e.frequency));
            amplitudes.extend(estimates.iter().map(|e| e.magnitude_db));
            trajectories.push_hop(&frequencies, &amplitudes);

            if hop % PROGRESS_INTERVAL == 0 {
                debug!("[tracker] hop {}/{} at sample {}", hop + 1, hops, offset);
            }
        }

        debug!(
            "[tracker] {} hops, {} partials",
            trajectories.hops(),
            trajectories.partials()
        );
        Ok(trajectories)
    }
}
