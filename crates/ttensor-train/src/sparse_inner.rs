//! Inner product of a train with a sparse coordinate tensor
//!
//! Each nonzero reads one value of the train by gathering, per core, the
//! `(r_k, r_{k+1})` slice its coordinate selects and multiplying through a
//! running row vector. The work is `O(nnz · d)` small products and is
//! inherently per element; it does not scale to dense operands.

use crate::error::{TtError, TtResult};
use crate::train::TensorTrain;
use crate::TtScalar;
use scirs2_core::ndarray_ext::{Array1, Axis};
use ttensor_sparse::CooTensor;

/// `Σ_k full(tt_a)[index_k] * value_k` over the nonzeros of `sparse_b`.
///
/// For a TT-tensor each sparse coordinate has one component per mode. For a
/// TT-matrix it is a `(row, col)` pair over the dense `[∏ rows, ∏ cols]`
/// matrix; both are unravelled into per-core sub-indices before the gather.
/// Duplicate coordinates contribute once per occurrence.
///
/// # Errors
///
/// [`TtError::ShapeError`] if the sparse shape is not `tt_a.get_shape()`.
///
/// # Examples
///
/// ```
/// use ttensor_core::DenseND;
/// use ttensor_sparse::CooTensor;
/// use ttensor_train::{to_tt_tensor, tt_sparse_flat_inner};
///
/// let x = DenseND::<f64>::from_fn(&[2, 3, 2], |i| (i[0] * 6 + i[1] * 2 + i[2]) as f64);
/// let tt = to_tt_tensor(&x, 4, None).unwrap();
///
/// let sparse = CooTensor::new(
///     vec![vec![0, 1, 1], vec![1, 2, 0]],
///     vec![2.0, -1.0],
///     vec![2, 3, 2],
/// ).unwrap();
/// let dot = tt_sparse_flat_inner(&tt, &sparse).unwrap();
/// assert!((dot - (2.0 * 3.0 - 10.0)).abs() < 1e-9);
/// ```
pub fn tt_sparse_flat_inner<T: TtScalar>(
    tt_a: &TensorTrain<T>,
    sparse_b: &CooTensor<T>,
) -> TtResult<T> {
    let shape = tt_a.get_shape();
    let expected_order = if tt_a.is_tt_matrix() { 2 } else { tt_a.ndims() };
    if sparse_b.rank() != expected_order {
        return Err(TtError::ShapeError(format!(
            "Sparse operand of order {} cannot be paired with a train of order {}",
            sparse_b.rank(),
            expected_order
        )));
    }
    if sparse_b.shape() != shape.as_slice() {
        return Err(TtError::ShapeError(format!(
            "Arguments should have the same shape, got {:?} and {:?}",
            shape.as_slice(),
            sparse_b.shape()
        )));
    }

    let nnz = sparse_b.nnz();
    log::debug!("tt_sparse_flat_inner: nnz {} d {}", nnz, tt_a.ndims());
    if nnz == 0 {
        return Ok(T::zero());
    }

    let positions = sparse_b
        .indices()
        .iter()
        .map(|idx| tt_a.core_positions(idx))
        .collect::<TtResult<Vec<_>>>()?;

    let mut acc: Vec<Array1<T>> = vec![Array1::ones(1); nnz];
    for (k, stack) in tt_a.mode_major_cores()?.iter().enumerate() {
        for (row, pos) in acc.iter_mut().zip(&positions) {
            *row = row.dot(&stack.index_axis(Axis(0), pos[k]));
        }
    }

    Ok(acc
        .iter()
        .zip(sparse_b.values())
        .fold(T::zero(), |sum, (row, &value)| sum + row[0] * value))
}
