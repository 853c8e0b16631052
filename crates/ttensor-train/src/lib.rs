//! # ttensor-train - Tensor-Train decomposition and TT algebra
//!
//! A Tensor-Train (TT) stores a `d`-way array as a chain of small cores:
//!
//! ```text
//! X(i₁,...,i_d) = G₁[i₁] × G₂[i₂] × ... × G_d[i_d]
//! ```
//!
//! where `G_k[i_k]` is an `r_{k-1} × r_k` matrix and `r_0 = r_d = 1`.
//! Storage is `O(d n r²)` instead of `O(n^d)`. A TT-matrix uses 4-way cores
//! `(r, row_k, col_k, r')` to represent an `∏ rows × ∏ cols` matrix.
//!
//! **Operations:**
//! - [`to_tt_tensor`], [`to_tt_matrix`]: sequential SVD with a rank bound and
//!   an optional relative accuracy target
//! - [`full`]: exact dense reconstruction
//! - [`tt_tt_matmul`]: product of two TT-matrices, core by core
//! - [`tt_tt_flat_inner`], [`tt_sparse_flat_inner`]: inner products without
//!   materialising the dense array
//! - [`frobenius_norm`], [`frobenius_norm_squared`]
//! - [`round`]: re-compression of an existing train
//! - [`matmul`], [`flat_inner`]: dispatch over [`Operand`] representations
//!
//! ## Quick Start
//!
//! ```
//! use ttensor_core::DenseND;
//! use ttensor_train::{frobenius_norm, full, to_tt_tensor};
//!
//! // sin of a sum has TT-rank 2 at every cut
//! let x = DenseND::<f64>::from_fn(&[4, 4, 4, 4], |i| {
//!     (0.5 * (i[0] + i[1] + i[2] + i[3]) as f64).sin()
//! });
//!
//! let tt = to_tt_tensor(&x, 4, None)?;
//! assert_eq!(tt.get_tt_ranks(), &[1, 2, 2, 2, 1]);
//! println!("Compression: {:.2}x", tt.compression_ratio());
//!
//! let approx = full(&tt)?;
//! assert_eq!(approx.shape(), x.shape());
//! assert!(tt.relative_error(&x)? < 1e-10);
//!
//! let norm: f64 = frobenius_norm(&tt, 0.0)?;
//! assert!((norm - x.frobenius_norm()).abs() < 1e-10 * norm);
//! # Ok::<(), ttensor_train::TtError>(())
//! ```
//!
//! ## Rank Selection
//!
//! `max_tt_rank` accepts a single bound or one bound per bond (`d + 1`
//! entries, see [`MaxRank`]). Singular values at the round-off level of the
//! scalar type (see [`SINGULAR_VALUE_EPS_FACTOR`]) are always dropped, so
//! data of exact TT-rank `r` decomposes to rank `r`. With
//! `epsilon = Some(eps)` ranks are further reduced while
//! `||X - full(tt)||_F <= eps ||X||_F` holds.
//!
//! ## Logging
//!
//! Diagnostics go through the `log` facade: chosen ranks at `debug`, kernel
//! dimensions at `trace`, unsupported operand pairs at `warn`.

use faer::traits::RealField;
use scirs2_core::ndarray_ext::ScalarOperand;
use scirs2_core::numeric::{Float, NumAssign, NumCast};
use std::fmt::Debug;
use std::iter::Sum;

pub mod algebra;
pub mod dispatch;
pub mod error;
pub mod full;
pub mod options;
pub mod round;
pub mod shapes;
pub mod sparse_inner;
mod svd;
pub mod train;
pub mod tt;

#[cfg(test)]
mod property_tests;

/// Scalar types the TT routines accept (`f32`, `f64`).
///
/// `RealField` lets the SVD run in faer.
pub trait TtScalar:
    Float + RealField + NumCast + NumAssign + Sum + Send + Sync + ScalarOperand + Debug + 'static
{
}

impl<T> TtScalar for T where
    T: Float
        + RealField
        + NumCast
        + NumAssign
        + Sum
        + Send
        + Sync
        + ScalarOperand
        + Debug
        + 'static
{
}

pub use algebra::{
    frobenius_norm, frobenius_norm_default, frobenius_norm_squared, tt_tt_flat_inner, tt_tt_matmul,
};
pub use dispatch::{
    dense_tt_flat_inner, dense_tt_matmul, flat_inner, matmul, sparse_tt_flat_inner,
    sparse_tt_matmul, tt_dense_flat_inner, tt_dense_matmul, tt_sparse_matmul, MatmulOutput,
    Operand,
};
pub use error::{TtError, TtResult};
pub use full::full;
pub use options::{MaxRank, DEFAULT_MAX_TT_RANK, DEFAULT_NORM_EPSILON, SINGULAR_VALUE_EPS_FACTOR};
pub use round::round;
pub use shapes::MatrixShape;
pub use sparse_inner::tt_sparse_flat_inner;
pub use train::{RawShape, TensorTrain};
pub use tt::{to_tt_matrix, to_tt_tensor};
