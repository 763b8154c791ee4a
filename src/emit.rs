//! Writes control signals as mono 32-bit float WAV files.

use std::{
    fs,
    path::{Path, PathBuf},
};

use hound::{SampleFormat, WavSpec, WavWriter};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlKind {
    Frequency,
    Amplitude,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlSignal {
    pub kind: ControlKind,
    pub rank: usize,
    pub samples: Vec<f32>,
}

impl ControlSignal {
    /// `f{rank}` for frequency, `env_f{rank}` for amplitude.
    pub fn name(&self) -> String {
        match self.kind {
            ControlKind::Frequency => format!("f{}", self.rank),
            ControlKind::Amplitude => format!("env_f{}", self.rank),
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}Ctrl.wav", self.name())
    }
}

/// `floor(hops / len * sample_rate) - 1`, the rate at which one control
/// sample per hop spans the duration of the analysed signal.
///
/// Short signals or coarse hops give values below 1; those only become an
/// error once the signals are written.
pub fn control_rate(hops: usize, signal_len: usize, sample_rate: u32) -> i64 {
    if signal_len == 0 {
        return -1;
    }
    (hops as f64 / signal_len as f64 * sample_rate as f64).floor() as i64 - 1
}

/// A rate from [`control_rate`] that a WAV header can carry.
pub fn checked_control_rate(rate: i64) -> Result<u32> {
    if rate < 1 {
        return Err(Error::DegenerateControlRate(rate));
    }
    u32::try_from(rate).map_err(|_| Error::DegenerateControlRate(rate))
}

pub fn control_spec(sample_rate: u32) -> WavSpec {
    WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    }
}

pub fn write_control_signal(
    path: impl AsRef<Path>,
    sample_rate: u32,
    signal: &ControlSignal,
) -> Result<()> {
    let mut writer = WavWriter::create(path, control_spec(sample_rate))?;
    for &x in &signal.samples {
        writer.write_sample(x)?;
    }
    writer.finalize()?;
    Ok(())
}

/// Writes one file per signal into `dir`, creating it if needed.
///
/// Fails with [`Error::DegenerateControlRate`] before touching the
/// filesystem when `control_rate` is below 1.
pub fn write_control_signals<'a>(
    dir: impl AsRef<Path>,
    control_rate: i64,
    signals: impl IntoIterator<Item = &'a ControlSignal>,
) -> Result<Vec<PathBuf>> {
    let sample_rate = checked_control_rate(control_rate)?;
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    let mut written = Vec::new();
    for signal in signals {
        let path = dir.join(signal.file_name());
        write_control_signal(&path, sample_rate, signal)?;
        debug!("[emit] {} samples -> {}", signal.samples.len(), path.display());
        written.push(path);
    }
    info!(
        "[emit] wrote {} control signals at {} Hz to {}",
        written.len(),
        sample_rate,
        dir.display()
    );
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_follow_kind_and_rank() {
        let f = ControlSignal {
            kind: ControlKind::Frequency,
            rank: 3,
            samples: vec![],
        };
        let a = ControlSignal {
            kind: ControlKind::Amplitude,
            rank: 0,
            samples: vec![],
        };
        assert_eq!(f.file_name(), "f3Ctrl.wav");
        assert_eq!(a.file_name(), "env_f0Ctrl.wav");
    }

    #[test]
    fn control_rate_matches_hop_density() {
        // 1000 hops over 128000 samples at 16 kHz: floor(125.0) - 1
        assert_eq!(control_rate(1000, 128_000, 16000), 124);
        assert_eq!(control_rate(7, 1000, 44100), 307);
        assert_eq!(checked_control_rate(124).unwrap(), 124);
    }

    #[test]
    fn too_few_hops_give_no_usable_rate() {
        assert_eq!(control_rate(1, 8193, 16000), 0);
        assert_eq!(control_rate(0, 0, 16000), -1);
        assert!(matches!(
            checked_control_rate(0),
            Err(Error::DegenerateControlRate(0))
        ));
    }

    #[test]
    fn degenerate_rate_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("controlValues");
        let signals = vec![ControlSignal {
            kind: ControlKind::Frequency,
            rank: 0,
            samples: vec![0.0],
        }];
        assert!(matches!(
            write_control_signals(&out, 0, &signals),
            Err(Error::DegenerateControlRate(0))
        ));
        assert!(!out.exists());
    }

    #[test]
    fn written_files_hold_float_samples() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("controlValues");
        let signals = vec![
            ControlSignal {
                kind: ControlKind::Frequency,
                rank: 0,
                samples: vec![-1.0, 0.0, 0.5],
            },
            ControlSignal {
                kind: ControlKind::Amplitude,
                rank: 0,
                samples: vec![1.0, -0.25],
            },
        ];
        let paths = write_control_signals(&out, 124, &signals).unwrap();
        assert_eq!(paths.len(), 2);
        assert!(paths[0].ends_with("f0Ctrl.wav"));

        let mut reader = hound::WavReader::open(&paths[1]).unwrap();
        assert_eq!(reader.spec(), control_spec(124));
        let samples: Vec<f32> = reader.samples::<f32>().map(|x| x.unwrap()).collect();
        assert_eq!(samples, vec![1.0, -0.25]);
    }
}
