use crate::float::Float;

/// Symmetric Hann window, `0.5 * (1 - cos(2 pi i / (size - 1)))`.
///
/// Both ends are exactly zero. A window of size 1 is `[1.0]`.
pub fn hann_window<T: Float>(size: usize) -> Vec<T> {
    if size == 1 {
        return vec![T::one()];
    }
    let denom = T::from_index(size - 1);
    (0..size)
        .map(|i| T::lit(0.5) * (T::one() - (T::from_index(i) * T::TAU() / denom).cos()))
        .collect()
}

pub fn apply_window<'a, T: Float>(
    window: &'a [T],
    buf: impl IntoIterator<Item = T> + 'a,
) -> impl Iterator<Item = T> + 'a {
    buf.into_iter().zip(window.iter()).map(|(x, &w)| x * w)
}
