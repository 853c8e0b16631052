//! Reconstruction of the dense equivalent of a train

use crate::error::{TtError, TtResult};
use crate::train::{as_matrix, RawShape, TensorTrain};
use crate::TtScalar;
use scirs2_core::ndarray_ext::Array2;
use ttensor_core::DenseND;

/// Expand a train into its dense tensor or matrix.
///
/// Cores are chained left to right: the running product is viewed as
/// `(-1, r_k)`, core k as `(r_k, -1)`, and the two are multiplied. A
/// TT-matrix is then unfolded from `(m_0, n_0, m_1, n_1, ...)` to
/// `(m_0, m_1, ..., n_0, n_1, ...)` and flattened to `(∏ m, ∏ n)`.
///
/// Cost and memory are proportional to the dense element count.
///
/// # Examples
///
/// ```
/// use ttensor_core::DenseND;
/// use ttensor_train::{full, RawShape, TensorTrain};
///
/// let a = DenseND::<f64>::from_vec(vec![1.0, 2.0], &[1, 2, 1]).unwrap();
/// let b = DenseND::<f64>::from_vec(vec![3.0, 4.0, 5.0], &[1, 3, 1]).unwrap();
/// let tt = TensorTrain::new(vec![a, b], RawShape::tensor(&[2, 3])).unwrap();
///
/// let dense = full(&tt).unwrap();
/// assert_eq!(dense.to_vec(), vec![3.0, 4.0, 5.0, 6.0, 8.0, 10.0]);
/// ```
pub fn full<T: TtScalar>(tt: &TensorTrain<T>) -> TtResult<DenseND<T>> {
    let ranks = tt.get_tt_ranks();
    let cores = tt.cores();

    let mut res = cores[0].to_vec();
    for (k, core) in cores.iter().enumerate().skip(1) {
        let left = unflatten(res, ranks[k])?;
        let right = as_matrix(core, ranks[k], core.len() / ranks[k])?;
        res = left.dot(&right).iter().copied().collect();
    }

    match tt.get_raw_shape() {
        RawShape::Tensor(modes) => Ok(DenseND::from_vec(res, modes)?),
        RawShape::Matrix { rows, cols } => {
            let d = tt.ndims();
            let interleaved: Vec<usize> = rows
                .iter()
                .zip(cols)
                .flat_map(|(&r, &c)| [r, c])
                .collect();
            let grouped: Vec<usize> = (0..d)
                .map(|k| 2 * k)
                .chain((0..d).map(|k| 2 * k + 1))
                .collect();
            let shape = tt.get_shape();
            Ok(DenseND::from_vec(res, &interleaved)?
                .permute(&grouped)?
                .reshape(&shape)?)
        }
    }
}

/// Row-major data as a `(-1, cols)` matrix.
fn unflatten<T: TtScalar>(data: Vec<T>, cols: usize) -> TtResult<Array2<T>> {
    let rows = data.len() / cols;
    Array2::from_shape_vec((rows, cols), data).map_err(|e| TtError::ShapeError(e.to_string()))
}
