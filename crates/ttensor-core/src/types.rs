//! Core type aliases shared by the ttensor crates.

use smallvec::SmallVec;

pub use crate::dense::DenseND;

/// Index of a tensor axis (zero-based).
pub type Axis = usize;

/// Number of dimensions of a tensor.
///
/// ```
/// use ttensor_core::{DenseND, Rank};
///
/// let matrix = DenseND::<f64>::zeros(&[2, 3]);
/// let rank: Rank = matrix.rank();
/// assert_eq!(rank, 2);
/// ```
pub type Rank = usize;

/// Shape storage that stays on the stack for up to 6 dimensions.
///
/// Tensor-Train mode lists are short in practice, so this avoids a heap
/// allocation per shape while still supporting arbitrary lengths.
///
/// ```
/// use ttensor_core::Shape;
///
/// let modes: Shape = Shape::from_slice(&[2, 3, 4]);
/// assert_eq!(modes.iter().product::<usize>(), 24);
/// ```
pub type Shape = SmallVec<[usize; 6]>;
