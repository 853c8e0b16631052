//! Rank bounds and numeric constants

/// Default bound on every interior TT-rank.
pub const DEFAULT_MAX_TT_RANK: usize = 10;

/// Additive term under the square root of [`crate::frobenius_norm`].
///
/// Keeps the derivative of the norm finite at zero.
pub const DEFAULT_NORM_EPSILON: f64 = 1e-5;

/// Scale of the numerical-rank cutoff.
///
/// At a cut whose unfolding is `rows x cols`, singular values at or below
/// `SINGULAR_VALUE_EPS_FACTOR * max(rows, cols) * T::epsilon() * σ_max` are
/// treated as numerically zero, so the cutoff follows the precision of the
/// scalar type (`f32` or `f64`).
pub const SINGULAR_VALUE_EPS_FACTOR: f64 = 32.0;

/// Upper bound on TT-ranks requested from the decomposer or the rounding.
///
/// # Examples
///
/// ```
/// use ttensor_train::MaxRank;
///
/// assert_eq!(MaxRank::default(), MaxRank::Uniform(10));
/// assert_eq!(MaxRank::from(4), MaxRank::Uniform(4));
/// assert_eq!(MaxRank::from(vec![1, 3, 1]), MaxRank::PerBond(vec![1, 3, 1]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaxRank {
    /// The same bound for every rank of the train
    Uniform(usize),
    /// One bound per rank, `d + 1` entries (a single entry acts as `Uniform`)
    PerBond(Vec<usize>),
}

impl Default for MaxRank {
    fn default() -> Self {
        MaxRank::Uniform(DEFAULT_MAX_TT_RANK)
    }
}

impl From<usize> for MaxRank {
    fn from(bound: usize) -> Self {
        MaxRank::Uniform(bound)
    }
}

impl From<Vec<usize>> for MaxRank {
    fn from(bounds: Vec<usize>) -> Self {
        MaxRank::PerBond(bounds)
    }
}

impl From<&[usize]> for MaxRank {
    fn from(bounds: &[usize]) -> Self {
        MaxRank::PerBond(bounds.to_vec())
    }
}

impl<const N: usize> From<[usize; N]> for MaxRank {
    fn from(bounds: [usize; N]) -> Self {
        MaxRank::PerBond(bounds.to_vec())
    }
}
