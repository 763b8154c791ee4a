use serde::Serialize;

/// Per-rank time series over all hops.
///
/// Rank `r` at hop `t` is whatever was the `r`-th loudest peak at that hop.
/// No identity is carried between hops, so two partials whose loudness order
/// flips will swap trajectories at that point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trajectories<T> {
    pub frequencies: Vec<Vec<T>>,
    pub amplitudes_db: Vec<Vec<T>>,
}

impl<T: Copy> Trajectories<T> {
    /// `partials` empty buffers, each with room for `hops` values.
    pub fn with_capacity(partials: usize, hops: usize) -> Self {
        Self {
            frequencies: (0..partials).map(|_| Vec::with_capacity(hops)).collect(),
            amplitudes_db: (0..partials).map(|_| Vec::with_capacity(hops)).collect(),
        }
    }

    pub fn partials(&self) -> usize {
        self.frequencies.len()
    }

    pub fn hops(&self) -> usize {
        self.frequencies.first().map_or(0, Vec::len)
    }

    pub fn frequency(&self, rank: usize) -> &[T] {
        &self.frequencies[rank]
    }

    pub fn amplitude_db(&self, rank: usize) -> &[T] {
        &self.amplitudes_db[rank]
    }

    /// Appends one hop. `frequencies` and `amplitudes_db` must hold one
    /// value per partial.
    pub fn push_hop(&mut self, frequencies: &[T], amplitudes_db: &[T]) {
        assert_eq!(frequencies.len(), self.partials());
        assert_eq!(amplitudes_db.len(), self.partials());
        for (track, &f) in self.frequencies.iter_mut().zip(frequencies) {
            track.push(f);
        }
        for (track, &a) in self.amplitudes_db.iter_mut().zip(amplitudes_db) {
            track.push(a);
        }
    }
}
