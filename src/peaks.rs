use std::cmp::Ordering;

use crate::{
    error::{Error, Result},
    float::Float,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Peak<T> {
    pub bin: usize,
    pub magnitude_db: T,
}

/// Indices strictly greater than both neighbours. The first and last bins
/// have only one neighbour and are never reported.
pub fn local_maxima<T: Float>(magnitude_db: &[T]) -> Vec<usize> {
    magnitude_db
        .windows(3)
        .enumerate()
        .filter(|(_, w)| w[1] > w[0] && w[1] > w[2])
        .map(|(i, _)| i + 1)
        .collect()
}

/// The `n` loudest local maxima, loudest first.
///
/// Equal magnitudes keep ascending bin order, so the first occurrence of a
/// tied value always takes the higher rank.
pub fn select_peaks<T: Float>(magnitude_db: &[T], n: usize) -> Result<Vec<Peak<T>>> {
    let mut peaks: Vec<_> = local_maxima(magnitude_db)
        .into_iter()
        .map(|bin| Peak {
            bin,
            magnitude_db: magnitude_db[bin],
        })
        .collect();

    if peaks.len() < n {
        return Err(Error::InsufficientPeaks {
            found: peaks.len(),
            requested: n,
        });
    }

    peaks.sort_by(|a, b| {
        b.magnitude_db
            .partial_cmp(&a.magnitude_db)
            .unwrap_or(Ordering::Equal)
    });
    peaks.truncate(n);
    Ok(peaks)
}
