//! Recording in, control signals out.
//!
//! Filtering and tracking run first over the whole signal; normalization needs
//! the global amplitude range, so it only starts once every hop is known.

use tracing::info;

use crate::{
    config::AnalysisConfig,
    emit::{control_rate, ControlKind, ControlSignal},
    error::Result,
    filter::Lowpass,
    normalize::{normalize_amplitudes, normalize_frequencies, FrequencyRange},
    tracker::{PartialTracker, TrackerParams},
    trajectory::Trajectories,
};

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisOutput {
    pub sample_rate: u32,
    pub signal_len: usize,
    pub time_hop: usize,
    pub trajectories: Trajectories<f64>,
    /// Frequency trajectories mapped from the configured Hz range to `[-1, 1]`.
    pub normalized_frequencies: Vec<Vec<f64>>,
    /// Linear amplitudes mapped from their global range to `[-1, 1]`.
    pub normalized_amplitudes: Vec<Vec<f64>>,
    /// `floor(hops / len * sample_rate) - 1`; may be below 1 for short input.
    pub control_rate: i64,
}

impl AnalysisOutput {
    pub fn hops(&self) -> usize {
        self.trajectories.hops()
    }

    /// Every frequency signal by rank, then every amplitude signal by rank.
    pub fn control_signals(&self) -> Vec<ControlSignal> {
        let to_signal = |kind, (rank, track): (usize, &Vec<f64>)| ControlSignal {
            kind,
            rank,
            samples: track.iter().map(|&x| x as f32).collect(),
        };
        self.normalized_frequencies
            .iter()
            .enumerate()
            .map(|t| to_signal(ControlKind::Frequency, t))
            .chain(
                self.normalized_amplitudes
                    .iter()
                    .enumerate()
                    .map(|t| to_signal(ControlKind::Amplitude, t)),
            )
            .collect()
    }
}

pub fn tracker_params(config: &AnalysisConfig, sample_rate: u32) -> TrackerParams<f64> {
    TrackerParams {
        fft_size: config.fft_size,
        phase_hop: config.phase_hop,
        time_hop: config.time_hop,
        partials: config.partials,
        sample_rate: sample_rate as f64,
    }
}

pub fn analyze(
    signal: &[f64],
    sample_rate: u32,
    config: &AnalysisConfig,
) -> Result<AnalysisOutput> {
    let range = FrequencyRange::new(config.min_freq, config.max_freq)?;
    let tracker = PartialTracker::new(tracker_params(config, sample_rate))?;

    let filtered;
    let signal = match config.lowpass {
        Some(lowpass) => {
            let mut filter =
                Lowpass::butterworth(lowpass.order, lowpass.cutoff, sample_rate as f64)?;
            info!(
                "[pipeline] lowpass order {} at {} Hz",
                lowpass.order, lowpass.cutoff
            );
            filtered = filter.apply(signal);
            &filtered[..]
        }
        None => signal,
    };

    info!(
        "[pipeline] tracking {} partials over {} samples (fft {}, phase hop {}, time hop {})",
        config.partials,
        signal.len(),
        config.fft_size,
        config.phase_hop,
        config.time_hop
    );
    let trajectories = tracker.track(signal)?;

    let normalized_frequencies = normalize_frequencies(&trajectories.frequencies, range)?;
    let normalized_amplitudes = normalize_amplitudes(&trajectories.amplitudes_db)?;
    let control_rate = control_rate(trajectories.hops(), signal.len(), sample_rate);
    info!(
        "[pipeline] {} hops, control rate {} Hz",
        trajectories.hops(),
        control_rate
    );

    Ok(AnalysisOutput {
        sample_rate,
        signal_len: signal.len(),
        time_hop: config.time_hop,
        trajectories,
        normalized_frequencies,
        normalized_amplitudes,
        control_rate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::f64::consts::TAU;

    const SAMPLE_RATE: u32 = 8000;

    fn config() -> AnalysisConfig {
        AnalysisConfig {
            fft_size: 2048,
            time_hop: 256,
            partials: 2,
            lowpass: None,
            ..AnalysisConfig::default()
        }
    }

    fn tremolo_pair(len: usize) -> Vec<f64> {
        (0..len)
            .map(|i| {
                let t = i as f64 / SAMPLE_RATE as f64;
                let swell = 1.0 + 0.3 * (TAU * 0.5 * t).sin();
                swell * (TAU * 130.0 * t).sin() + 0.4 * (TAU * 390.0 * t).sin()
            })
            .collect()
    }

    #[test]
    fn control_signals_are_ordered_by_kind_then_rank() {
        let output = analyze(&tremolo_pair(16000), SAMPLE_RATE, &config()).unwrap();
        let names: Vec<_> = output.control_signals().iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["f0", "f1", "env_f0", "env_f1"]);
        assert!(output
            .control_signals()
            .iter()
            .all(|s| s.samples.len() == output.hops()));
    }

    #[test]
    fn amplitudes_span_the_unit_range() {
        let output = analyze(&tremolo_pair(16000), SAMPLE_RATE, &config()).unwrap();
        let all: Vec<f64> = output
            .normalized_amplitudes
            .iter()
            .flatten()
            .copied()
            .collect();
        let min = all.iter().copied().fold(f64::INFINITY, f64::min);
        let max = all.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        assert!((min + 1.0).abs() < 1e-12);
        assert!((max - 1.0).abs() < 1e-12);
    }

    #[test]
    fn frequencies_normalize_against_fixed_range() {
        let output = analyze(&tremolo_pair(16000), SAMPLE_RATE, &config()).unwrap();
        let expected = 2.0 * (130.0 - 65.0) / (1000.0 - 65.0) - 1.0;
        assert!(output.normalized_frequencies[0]
            .iter()
            .all(|&y| (y - expected).abs() < 0.01));
    }

    #[test]
    fn lowpass_keeps_partials_below_cutoff() {
        let config = AnalysisConfig {
            lowpass: Some(crate::config::LowpassConfig {
                cutoff: 1000.0,
                order: 5,
            }),
            ..config()
        };
        let output = analyze(&tremolo_pair(16000), SAMPLE_RATE, &config).unwrap();
        let settled = &output.trajectories.frequency(0)[2..];
        assert!(settled.iter().all(|f| (f - 130.0).abs() < 1.3));
    }

    #[test]
    fn single_hop_signal_still_analyses() {
        let config = AnalysisConfig {
            fft_size: 8192,
            ..config()
        };
        let output = analyze(&tremolo_pair(8192 + 1), SAMPLE_RATE, &config).unwrap();
        assert_eq!(output.hops(), 1);
        assert_eq!(output.normalized_frequencies[0].len(), 1);
        // floor(1 / 8193 * 8000) - 1
        assert_eq!(output.control_rate, -1);
        assert!(matches!(
            crate::emit::checked_control_rate(output.control_rate),
            Err(Error::DegenerateControlRate(-1))
        ));
    }

    #[test]
    fn silence_has_no_partials_to_track() {
        match analyze(&vec![0.0; 4000], SAMPLE_RATE, &config()) {
            Err(Error::InsufficientPeaks { found, requested }) => {
                assert_eq!((found, requested), (0, 2));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn invalid_range_fails_before_tracking() {
        let config = AnalysisConfig {
            min_freq: 500.0,
            max_freq: 100.0,
            ..config()
        };
        assert!(matches!(
            analyze(&tremolo_pair(16000), SAMPLE_RATE, &config),
            Err(Error::DegenerateRange { .. })
        ));
    }
}
