//! Thin SVD shared by the decomposer and the rounding.
//!
//! Factorization runs in faer, which stays accurate on rank-deficient
//! unfoldings; results come back as ndarray arrays for the rest of the crate.

use crate::error::{TtError, TtResult};
use crate::TtScalar;
use faer::Mat;
use scirs2_core::ndarray_ext::{Array1, Array2};

/// Thin SVD `a = U diag(S) Vᵀ`.
///
/// With `k = min(rows, cols)`, returns `U` as `rows x k`, `S` of length `k`
/// sorted non-increasing, and `Vᵀ` as `k x cols`.
pub(crate) fn thin_svd<T: TtScalar>(
    a: &Array2<T>,
    context: &str,
) -> TtResult<(Array2<T>, Array1<T>, Array2<T>)> {
    let (rows, cols) = a.dim();
    let k = rows.min(cols);
    let mat = Mat::<T>::from_fn(rows, cols, |i, j| a[[i, j]]);
    let svd = mat.thin_svd().map_err(|e| {
        TtError::SvdError(format!("{}: {:?} on a {}x{} unfolding", context, e, rows, cols))
    })?;

    let u_ref = svd.U();
    let v_ref = svd.V();
    let s_ref = svd.S().column_vector();

    let u = Array2::from_shape_fn((rows, k), |(i, j)| u_ref[(i, j)]);
    let s = Array1::from_shape_fn(k, |i| s_ref[i]);
    let vt = Array2::from_shape_fn((k, cols), |(i, j)| v_ref[(j, i)]);
    Ok((u, s, vt))
}
