use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("found {found} spectral peaks, {requested} partials requested")]
    InsufficientPeaks { found: usize, requested: usize },

    #[error("bin 0 has no phase advance to refine")]
    DegenerateBin,

    #[error("cannot rescale a range with min {min} and max {max}")]
    DegenerateRange { min: f64, max: f64 },

    #[error("derived control sample rate {0} is not positive")]
    DegenerateControlRate(i64),

    #[error("block pair at offset {offset} (fft size {fft_size}, hop {hop}) exceeds signal length {len}")]
    BlockOutOfRange {
        offset: usize,
        fft_size: usize,
        hop: usize,
        len: usize,
    },

    #[error("signal of {len} samples is shorter than one block pair ({required} samples)")]
    SignalTooShort { len: usize, required: usize },

    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("wav: {0}")]
    Wav(#[from] hound::Error),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("config: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
