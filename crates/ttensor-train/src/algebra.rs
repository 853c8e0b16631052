//! TT-by-TT algebra: matrix product, flat inner product, Frobenius norm
//!
//! Every routine works core by core and never forms the dense equivalent.

use crate::error::{TtError, TtResult};
use crate::options::DEFAULT_NORM_EPSILON;
use crate::train::{RawShape, TensorTrain};
use crate::tt::cast;
use crate::TtScalar;
use scirs2_core::ndarray_ext::{Array, IxDyn};
use ttensor_core::DenseND;
use ttensor_kernels::{contract_permuted, contract_tensors};

/// Product of two TT-matrices, `A (M x N)` times `B (N x P)`.
///
/// Core k of the result is `A_k(a, i, j, a') B_k(b, j, l, b')` summed over `j`
/// and arranged as `(a*b, i, l, a'*b')`, so result ranks are the elementwise
/// products of the operand ranks. Re-compress with [`crate::round`] when
/// bounded ranks are needed.
///
/// # Errors
///
/// - [`TtError::TypeMismatch`] if either operand is a TT-tensor
/// - [`TtError::ShapeError`] if the core counts differ or the column factors
///   of `a` differ from the row factors of `b`
///
/// # Examples
///
/// ```
/// use ttensor_core::DenseND;
/// use ttensor_train::{full, to_tt_matrix, tt_tt_matmul, MatrixShape};
///
/// let a = DenseND::<f64>::from_fn(&[4, 4], |i| (i[0] + i[1]) as f64);
/// let tt = to_tt_matrix(&a, MatrixShape::new(&[2, 2], &[2, 2]), 4, None).unwrap();
/// let square = tt_tt_matmul(&tt, &tt).unwrap();
///
/// let expected: Vec<f64> = (0..4)
///     .flat_map(|i| (0..4).map(move |j| (0..4).map(|k| ((i + k) * (k + j)) as f64).sum()))
///     .collect();
/// let got = full(&square).unwrap().to_vec();
/// assert!(got.iter().zip(&expected).all(|(g, e)| (g - e).abs() < 1e-9));
/// ```
pub fn tt_tt_matmul<T: TtScalar>(
    tt_a: &TensorTrain<T>,
    tt_b: &TensorTrain<T>,
) -> TtResult<TensorTrain<T>> {
    if !tt_a.is_tt_matrix() || !tt_b.is_tt_matrix() {
        return Err(TtError::TypeMismatch(
            "tt_tt_matmul arguments should be TT-matrices".to_string(),
        ));
    }
    let d = tt_a.ndims();
    if tt_b.ndims() != d {
        return Err(TtError::ShapeError(format!(
            "Arguments should have the same number of dimensions, got {} and {}",
            d,
            tt_b.ndims()
        )));
    }
    let (a_rows, a_cols) = matrix_factors(tt_a);
    let (b_rows, b_cols) = matrix_factors(tt_b);
    if a_cols != b_rows {
        return Err(TtError::ShapeError(format!(
            "Column factors {:?} of the left operand do not match row factors {:?} of the right",
            a_cols, b_rows
        )));
    }

    let mut cores = Vec::with_capacity(d);
    for (a_core, b_core) in tt_a.cores().iter().zip(tt_b.cores()) {
        // (a, i, a', b, l, b') -> (a, b, i, l, a', b')
        let product = contract_permuted(
            &a_core.view(),
            &b_core.view(),
            &[2],
            &[1],
            &[0, 3, 1, 4, 2, 5],
        )?;
        let s = product.shape().to_vec();
        let core = DenseND::from_array(product).into_reshaped(&[s[0] * s[1], s[2], s[3], s[4] * s[5]])?;
        cores.push(core);
    }

    let result = TensorTrain::new(cores, RawShape::matrix(a_rows, b_cols))?;
    log::debug!(
        "tt_tt_matmul: ranks {:?} x {:?} -> {:?}",
        tt_a.get_tt_ranks(),
        tt_b.get_tt_ranks(),
        result.get_tt_ranks()
    );
    Ok(result)
}

/// Sum of elementwise products of the dense equivalents of two trains.
///
/// A running `(r_a, r_b)` matrix is threaded through the cores: the first
/// pair is contracted over all of its non-rank axes, each later pair is
/// contracted with the running matrix over its left ranks and shared mode
/// axes. The final `1 x 1` entry is the result.
///
/// # Errors
///
/// - [`TtError::TypeMismatch`] if one operand is a TT-matrix and the other is not
/// - [`TtError::ShapeError`] if the raw shapes differ
///
/// # Examples
///
/// ```
/// use ttensor_core::DenseND;
/// use ttensor_train::{to_tt_tensor, tt_tt_flat_inner};
///
/// let x = DenseND::<f64>::from_fn(&[3, 3, 3], |i| (i[0] * 9 + i[1] * 3 + i[2]) as f64);
/// let y = DenseND::<f64>::ones(&[3, 3, 3]);
/// let tx = to_tt_tensor(&x, 3, None).unwrap();
/// let ty = to_tt_tensor(&y, 3, None).unwrap();
///
/// let dot = tt_tt_flat_inner(&tx, &ty).unwrap();
/// assert!((dot - 351.0).abs() < 1e-9);
/// ```
pub fn tt_tt_flat_inner<T: TtScalar>(tt_a: &TensorTrain<T>, tt_b: &TensorTrain<T>) -> TtResult<T> {
    if tt_a.is_tt_matrix() != tt_b.is_tt_matrix() {
        return Err(TtError::TypeMismatch(
            "One of the arguments is a TT-tensor, the other is a TT-matrix, disallowed".to_string(),
        ));
    }
    if tt_a.get_raw_shape() != tt_b.get_raw_shape() {
        return Err(TtError::ShapeError(format!(
            "Arguments should have the same shape, got {:?} and {:?}",
            tt_a.get_raw_shape(),
            tt_b.get_raw_shape()
        )));
    }

    // left rank plus one (tensor) or two (matrix) mode axes
    let shared: Vec<usize> = if tt_a.is_tt_matrix() {
        vec![0, 1, 2]
    } else {
        vec![0, 1]
    };
    let modes_only = &shared[1..];

    let a_cores = tt_a.cores();
    let b_cores = tt_b.cores();
    let mut res: Array<T, IxDyn> =
        contract_tensors(&a_cores[0].view(), &b_cores[0].view(), &shared, &shared)?;

    for (a_core, b_core) in a_cores.iter().zip(b_cores).skip(1) {
        // res(a, b) a_core(a, modes.., a') -> (b, modes.., a')
        let partial = contract_tensors(&res.view(), &a_core.view(), &[0], &[0])?;
        // (b, modes.., a') b_core(b, modes.., b') -> (a', b')
        let mut partial_axes = vec![0];
        partial_axes.extend(modes_only.iter().copied());
        res = contract_tensors(&partial.view(), &b_core.view(), &partial_axes, &shared)?;
    }

    res.iter().next().copied().ok_or_else(|| {
        TtError::ShapeError("Inner product contraction produced no value".to_string())
    })
}

/// Squared Frobenius norm via the self inner product.
pub fn frobenius_norm_squared<T: TtScalar>(tt: &TensorTrain<T>) -> TtResult<T> {
    tt_tt_flat_inner(tt, tt)
}

/// `sqrt(frobenius_norm_squared(tt) + epsilon)`.
///
/// The additive `epsilon` keeps the derivative finite at zero; pass
/// [`DEFAULT_NORM_EPSILON`] (or call [`frobenius_norm_default`]) unless the
/// caller needs another value.
pub fn frobenius_norm<T: TtScalar>(tt: &TensorTrain<T>, epsilon: f64) -> TtResult<T> {
    let squared = frobenius_norm_squared(tt)?;
    Ok((squared + cast::<T>(epsilon)?).sqrt())
}

/// [`frobenius_norm`] with [`DEFAULT_NORM_EPSILON`].
pub fn frobenius_norm_default<T: TtScalar>(tt: &TensorTrain<T>) -> TtResult<T> {
    frobenius_norm(tt, DEFAULT_NORM_EPSILON)
}

fn matrix_factors<T: TtScalar>(tt: &TensorTrain<T>) -> (&[usize], &[usize]) {
    match tt.get_raw_shape() {
        RawShape::Matrix { rows, cols } => (rows.as_slice(), cols.as_slice()),
        RawShape::Tensor(modes) => (modes.as_slice(), &[]),
    }
}
