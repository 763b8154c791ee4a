use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec};
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Reads the first channel of a WAV file as `f64` samples in `[-1, 1)`.
///
/// Returns the sample rate alongside the samples.
pub fn read_mono(p: impl AsRef<Path>) -> Result<(u32, Vec<f64>)> {
    let mut reader = WavReader::open(&p)?;
    let spec = reader.spec();
    debug!("[wav] {}: {:?}", p.as_ref().display(), spec);
    if spec.channels > 1 {
        warn!(
            "[wav] {} channels in {}, using the first",
            spec.channels,
            p.as_ref().display()
        );
    }

    let channels = spec.channels.max(1) as usize;
    let buf: Vec<f64> = match spec {
        WavSpec {
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
            ..
        } => reader
            .samples::<f32>()
            .step_by(channels)
            .map(|x| x.map(f64::from))
            .collect::<std::result::Result<_, _>>()?,
        WavSpec {
            bits_per_sample: bits @ 8..=32,
            sample_format: SampleFormat::Int,
            ..
        } => {
            let scale = (1i64 << (bits - 1)) as f64;
            reader
                .samples::<i32>()
                .step_by(channels)
                .map(|x| x.map(|x| x as f64 / scale))
                .collect::<std::result::Result<_, _>>()?
        }
        _ => {
            return Err(Error::invalid(
                "wav",
                format!(
                    "unsupported format: {} bit {:?}",
                    spec.bits_per_sample, spec.sample_format
                ),
            ))
        }
    };
    Ok((spec.sample_rate, buf))
}
