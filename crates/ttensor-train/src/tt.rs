//! Dense-to-TT decomposition (sequential SVD)
//!
//! For `core_idx` in `0..d-1` the working array is unfolded to a
//! `(r_k * n_k, remaining)` matrix, its truncated SVD yields core k from the
//! left singular vectors, and `diag(S) Vᵀ` becomes the next working array.
//! The remainder after the last step is the final core.
//!
//! Rank at each cut is the smallest of:
//! - the requested bound,
//! - the unfolding's row and column counts,
//! - the numerical rank (singular values above
//!   `SINGULAR_VALUE_EPS_FACTOR * max(rows, cols) * T::epsilon() * σ_max`),
//! - with `epsilon`, the smallest rank whose discarded tail satisfies
//!   `Σ σ² ≤ (epsilon / sqrt(d - 1))² ||X||²`.
//!
//! At least one singular component is always kept, and a bound of exactly 1
//! forces rank 1.

use crate::error::{TtError, TtResult};
use crate::options::{MaxRank, SINGULAR_VALUE_EPS_FACTOR};
use crate::shapes::{self, MatrixShape};
use crate::svd::thin_svd;
use crate::train::{RawShape, TensorTrain};
use crate::TtScalar;
use scirs2_core::ndarray_ext::{s, Array2, ArrayView1};
use scirs2_core::numeric::NumCast;
use ttensor_core::DenseND;

/// Compress a dense tensor into a TT-tensor.
///
/// # Arguments
///
/// * `tensor` - Input tensor of order d ≥ 1
/// * `max_tt_rank` - A single bound for every rank, or `d + 1` bounds
/// * `epsilon` - Target relative Frobenius error; ranks are reduced while the
///   error stays within it
///
/// # Errors
///
/// - [`TtError::InvalidArgument`] for a bound below 1, a bound sequence of the
///   wrong length, or a negative `epsilon`
/// - [`TtError::ShapeError`] for a 0-dimensional tensor or an empty mode
/// - [`TtError::SvdError`] if the SVD backend fails
///
/// # Examples
///
/// ```
/// use ttensor_core::DenseND;
/// use ttensor_train::{full, to_tt_tensor};
///
/// // Outer product of [1, 2], [3, 4], [5, 6]
/// let x = DenseND::<f64>::from_fn(&[2, 2, 2], |i| {
///     (1 + i[0]) as f64 * (3 + i[1]) as f64 * (5 + i[2]) as f64
/// });
/// let tt = to_tt_tensor(&x, 5, None).unwrap();
/// assert_eq!(tt.get_tt_ranks(), &[1, 1, 1, 1]);
///
/// let y = full(&tt).unwrap();
/// assert!(x.max_abs_diff(&y).unwrap() < 1e-10);
/// ```
pub fn to_tt_tensor<T: TtScalar>(
    tensor: &DenseND<T>,
    max_tt_rank: impl Into<MaxRank>,
    epsilon: Option<f64>,
) -> TtResult<TensorTrain<T>> {
    let modes = tensor.shape().to_vec();
    let d = modes.len();
    if d == 0 {
        return Err(TtError::ShapeError(
            "Cannot determine the number of dimensions of a 0-dimensional tensor".to_string(),
        ));
    }
    let bounds = shapes::resolve_max_ranks(&max_tt_rank.into(), d)?;
    validate_epsilon(epsilon)?;
    if modes.contains(&0) {
        return Err(TtError::ShapeError(format!(
            "Cannot decompose tensor with an empty mode: {:?}",
            modes
        )));
    }

    let cores = sequential_svd(tensor, &bounds, epsilon)?;
    TensorTrain::new(cores, RawShape::tensor(&modes))
}

/// Compress a matrix (or vector) into a TT-matrix.
///
/// The matrix is viewed as a tensor with axes `rows ++ cols`, axes are
/// interleaved to `(r_0, c_0, r_1, c_1, ...)`, each `(r_k, c_k)` pair is merged,
/// and the result is decomposed with [`to_tt_tensor`]. Cores are finally split
/// back to `(rank, r_k, c_k, rank')`.
///
/// # Errors
///
/// As [`to_tt_tensor`], plus [`TtError::ShapeError`] if the factorization does
/// not multiply out to the element count of `matrix`.
///
/// # Examples
///
/// ```
/// use ttensor_core::DenseND;
/// use ttensor_train::{full, to_tt_matrix, MatrixShape};
///
/// let m = DenseND::<f64>::from_fn(&[6, 4], |i| (i[0] * 4 + i[1]) as f64);
/// let tt = to_tt_matrix(&m, MatrixShape::new(&[2, 3], &[2, 2]), 10, None).unwrap();
/// assert!(tt.is_tt_matrix());
/// assert_eq!(tt.core(0).unwrap().shape(), &[1, 2, 2, 4]);
///
/// let back = full(&tt).unwrap();
/// assert_eq!(back.shape(), &[6, 4]);
/// assert!(m.max_abs_diff(&back).unwrap() < 1e-9);
/// ```
pub fn to_tt_matrix<T: TtScalar>(
    matrix: &DenseND<T>,
    shape: impl Into<MatrixShape>,
    max_tt_rank: impl Into<MaxRank>,
    epsilon: Option<f64>,
) -> TtResult<TensorTrain<T>> {
    let (rows, cols) = shape.into().resolve()?;
    let d = rows.len();
    let expected = rows.iter().product::<usize>() * cols.iter().product::<usize>();
    if matrix.len() != expected {
        return Err(TtError::ShapeError(format!(
            "Matrix of shape {:?} does not factor as {:?} x {:?}",
            matrix.shape(),
            rows,
            cols
        )));
    }

    let flat: Vec<usize> = rows.iter().chain(cols.iter()).copied().collect();
    let interleave: Vec<usize> = (0..d).flat_map(|k| [k, d + k]).collect();
    let merged: Vec<usize> = rows.iter().zip(&cols).map(|(r, c)| r * c).collect();

    let tensor = matrix
        .reshape(&flat)?
        .permute(&interleave)?
        .reshape(&merged)?;
    let tt_tensor = to_tt_tensor(&tensor, max_tt_rank, epsilon)?;

    let ranks = tt_tensor.get_tt_ranks().to_vec();
    let cores = tt_tensor
        .into_cores()
        .into_iter()
        .enumerate()
        .map(|(k, core)| core.into_reshaped(&[ranks[k], rows[k], cols[k], ranks[k + 1]]))
        .collect::<anyhow::Result<Vec<_>>>()?;

    TensorTrain::new(cores, RawShape::Matrix { rows, cols })
}

pub(crate) fn validate_epsilon(epsilon: Option<f64>) -> TtResult<()> {
    match epsilon {
        Some(eps) if eps.is_nan() || eps < 0.0 => Err(TtError::InvalidArgument(format!(
            "Epsilon should be non-negative, got {}",
            eps
        ))),
        _ => Ok(()),
    }
}

pub(crate) fn cast<T: TtScalar>(value: f64) -> TtResult<T> {
    <T as NumCast>::from(value).ok_or_else(|| {
        TtError::InvalidArgument(format!("{} is not representable in the scalar type", value))
    })
}

/// Squared per-cut error budget `(epsilon / sqrt(d - 1))² ||X||²`.
pub(crate) fn cut_budget<T: TtScalar>(epsilon: Option<f64>, d: usize, norm_sq: T) -> TtResult<Option<T>> {
    match epsilon {
        Some(eps) if d > 1 => {
            let share = cast::<T>(eps * eps / (d - 1) as f64)?;
            Ok(Some(share * norm_sq))
        }
        _ => Ok(None),
    }
}

/// Number of singular components to keep at one cut.
pub(crate) fn truncation_rank<T: TtScalar>(
    s: ArrayView1<T>,
    bound: usize,
    rows: usize,
    cols: usize,
    budget_sq: Option<T>,
) -> TtResult<usize> {
    if bound == 1 {
        return Ok(1);
    }
    let mut rank = bound.min(rows).min(cols).min(s.len());

    let s_max = s.iter().fold(T::zero(), |m, &x| m.max(x));
    let scale = cast::<T>(SINGULAR_VALUE_EPS_FACTOR * rows.max(cols) as f64)?;
    let cutoff = scale * T::epsilon() * s_max;
    rank = rank.min(s.iter().take_while(|&&sigma| sigma > cutoff).count());

    if let Some(budget_sq) = budget_sq {
        let mut tail = T::zero();
        let mut keep = s.len();
        for k in (0..s.len()).rev() {
            tail += s[k] * s[k];
            if tail > budget_sq {
                break;
            }
            keep = k;
        }
        rank = rank.min(keep);
    }

    Ok(rank.max(1))
}

fn sequential_svd<T: TtScalar>(
    tensor: &DenseND<T>,
    bounds: &[usize],
    epsilon: Option<f64>,
) -> TtResult<Vec<DenseND<T>>> {
    let modes = tensor.shape().to_vec();
    let d = modes.len();
    if d == 1 {
        return Ok(vec![tensor.reshape(&[1, modes[0], 1])?]);
    }

    let norm_sq: T = tensor.iter().map(|&x| x * x).sum();
    let budget_sq = cut_budget(epsilon, d, norm_sq)?;

    let mut cores = Vec::with_capacity(d);
    let mut work = tensor.to_vec();
    let mut rank = 1;
    let mut remaining: usize = modes.iter().product();

    for (core_idx, &mode) in modes[..d - 1].iter().enumerate() {
        remaining /= mode;
        let (rows, cols) = (rank * mode, remaining);
        let unfolding = Array2::from_shape_vec((rows, cols), work)
            .map_err(|e| TtError::ShapeError(format!("Unfolding {} failed: {}", core_idx, e)))?;

        let (u, sigma, vt) = thin_svd(&unfolding, &format!("SVD failed at core {}", core_idx))?;

        let bound = bounds[core_idx + 1];
        let next_rank = truncation_rank(sigma.view(), bound, rows, cols, budget_sq)?;
        log::debug!(
            "to_tt_tensor: core {} unfolding {}x{} bound {} -> rank {}",
            core_idx,
            rows,
            cols,
            bound,
            next_rank
        );

        let u_trunc: Vec<T> = u.slice(s![.., ..next_rank]).iter().copied().collect();
        cores.push(DenseND::from_vec(u_trunc, &[rank, mode, next_rank])?);

        let vt_trunc = vt.slice(s![..next_rank, ..]);
        work = Array2::from_shape_fn((next_rank, cols), |(i, j)| sigma[i] * vt_trunc[[i, j]])
            .iter()
            .copied()
            .collect();
        rank = next_rank;
    }

    cores.push(DenseND::from_vec(work, &[rank, modes[d - 1], 1])?);
    Ok(cores)
}
