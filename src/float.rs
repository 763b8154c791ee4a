use rustfft::{num_traits, FftNum};

pub trait Float: FftNum + num_traits::Float + num_traits::FloatConst {
    /// Lossy conversion from an `f64` literal or parameter.
    fn lit(x: f64) -> Self {
        <Self as num_traits::NumCast>::from(x).unwrap_or_else(Self::nan)
    }

    fn from_index(x: usize) -> Self {
        <Self as num_traits::NumCast>::from(x).unwrap_or_else(Self::nan)
    }
}

impl<T: FftNum + num_traits::Float + num_traits::FloatConst> Float for T {}
