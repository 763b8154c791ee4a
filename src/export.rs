//! JSON dump of the trajectories for external plotting. The time axis is the
//! hop index.

use std::{fs, path::Path};

use serde::Serialize;
use tracing::info;

use crate::{error::Result, pipeline::AnalysisOutput};

#[derive(Debug, Serialize)]
pub struct TrajectoryExport<'a> {
    pub sample_rate: u32,
    pub control_rate: i64,
    pub time_hop: usize,
    pub hops: usize,
    pub partials: Vec<PartialExport<'a>>,
}

#[derive(Debug, Serialize)]
pub struct PartialExport<'a> {
    pub rank: usize,
    pub frequency_hz: &'a [f64],
    pub amplitude_db: &'a [f64],
    pub frequency_ctrl: &'a [f64],
    pub amplitude_ctrl: &'a [f64],
}

impl<'a> TrajectoryExport<'a> {
    pub fn new(output: &'a AnalysisOutput) -> Self {
        let t = &output.trajectories;
        Self {
            sample_rate: output.sample_rate,
            control_rate: output.control_rate,
            time_hop: output.time_hop,
            hops: t.hops(),
            partials: (0..t.partials())
                .map(|rank| PartialExport {
                    rank,
                    frequency_hz: t.frequency(rank),
                    amplitude_db: t.amplitude_db(rank),
                    frequency_ctrl: &output.normalized_frequencies[rank],
                    amplitude_ctrl: &output.normalized_amplitudes[rank],
                })
                .collect(),
        }
    }
}

pub fn write_trajectories(path: impl AsRef<Path>, output: &AnalysisOutput) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_vec(&TrajectoryExport::new(output))?)?;
    info!("[export] trajectories -> {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trajectory::Trajectories;

    fn output() -> AnalysisOutput {
        let mut trajectories = Trajectories::with_capacity(2, 2);
        trajectories.push_hop(&[100.0, 200.0], &[-3.0, -9.0]);
        trajectories.push_hop(&[101.0, 199.0], &[-4.0, -8.0]);
        AnalysisOutput {
            sample_rate: 16000,
            signal_len: 9000,
            time_hop: 128,
            trajectories,
            normalized_frequencies: vec![vec![-0.8, -0.79], vec![-0.6, -0.61]],
            normalized_amplitudes: vec![vec![1.0, 0.5], vec![-1.0, -0.7]],
            control_rate: 2,
        }
    }

    #[test]
    fn export_groups_series_by_rank() {
        let output = output();
        let export = TrajectoryExport::new(&output);
        assert_eq!(export.hops, 2);
        assert_eq!(export.partials.len(), 2);
        assert_eq!(export.partials[1].frequency_hz, &[200.0, 199.0]);
        assert_eq!(export.partials[1].amplitude_ctrl, &[-1.0, -0.7]);
    }

    #[test]
    fn written_json_parses_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plots").join("trajectories.json");
        write_trajectories(&path, &output()).unwrap();

        let value: serde_json::Value =
            serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
        assert_eq!(value["hops"], 2);
        assert_eq!(value["partials"][0]["frequency_hz"][1], 101.0);
        assert_eq!(value["partials"][1]["rank"], 1);
    }
}
