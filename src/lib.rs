pub mod config;
pub mod emit;
pub mod error;
pub mod export;
pub mod fft;
pub mod filter;
pub mod float;
pub mod normalize;
pub mod peaks;
pub mod pipeline;
pub mod refine;
pub mod spectrum;
pub mod telemetry;
pub mod tracker;
pub mod trajectory;
pub mod wav;
pub mod windows;

pub use config::{AnalysisConfig, LowpassConfig};
pub use error::{Error, Result};
pub use float::Float;
pub use pipeline::{analyze, AnalysisOutput};
pub use tracker::{PartialEstimate, PartialTracker, TrackerParams};
pub use trajectory::Trajectories;
