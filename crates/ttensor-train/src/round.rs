//! TT rounding: re-compress an existing train without expanding it
//!
//! A right-to-left QR sweep leaves cores 1..d right-orthonormal, so the norm
//! of the whole train equals the norm of core 0. A left-to-right SVD sweep then
//! truncates every bond with the same rule the decomposer uses.

use crate::error::{TtError, TtResult};
use crate::options::MaxRank;
use crate::shapes;
use crate::svd::thin_svd;
use crate::train::{RawShape, TensorTrain};
use crate::tt::{cut_budget, truncation_rank, validate_epsilon};
use crate::TtScalar;
use scirs2_core::ndarray_ext::{s, Array2};
use scirs2_linalg::qr;
use std::mem;
use ttensor_core::DenseND;

/// Reduce the TT-ranks of `tt`.
///
/// Ranks never grow. With a non-binding bound and no `epsilon` only
/// numerically redundant rank is removed, so the dense equivalent is
/// unchanged up to round-off. Matrix trains are supported; their cores are
/// treated as `(r, rows * cols, r')` during the sweeps.
///
/// # Errors
///
/// - [`TtError::InvalidArgument`] for invalid bounds or a negative `epsilon`
/// - [`TtError::SvdError`] if the QR or SVD backend fails
///
/// # Examples
///
/// ```
/// use ttensor_core::DenseND;
/// use ttensor_train::{round, to_tt_tensor, tt_tt_matmul, to_tt_matrix, MatrixShape};
///
/// let m = DenseND::<f64>::from_fn(&[4, 4], |i| 1.0 + (i[0] * 4 + i[1]) as f64);
/// let tt = to_tt_matrix(&m, MatrixShape::new(&[2, 2], &[2, 2]), 4, None).unwrap();
/// let squared = tt_tt_matmul(&tt, &tt).unwrap();
///
/// let rounded = round(&squared, 4, Some(1e-10)).unwrap();
/// assert!(rounded.get_tt_ranks()[1] <= squared.get_tt_ranks()[1]);
/// assert_eq!(rounded.get_shape().as_slice(), &[4, 4]);
/// ```
pub fn round<T: TtScalar>(
    tt: &TensorTrain<T>,
    max_tt_rank: impl Into<MaxRank>,
    epsilon: Option<f64>,
) -> TtResult<TensorTrain<T>> {
    let d = tt.ndims();
    let bounds = shapes::resolve_max_ranks(&max_tt_rank.into(), d)?;
    validate_epsilon(epsilon)?;
    if d == 1 {
        return Ok(tt.clone());
    }

    let mut ranks = tt.get_tt_ranks().to_vec();
    let mids: Vec<usize> = tt
        .cores()
        .iter()
        .enumerate()
        .map(|(k, core)| core.len() / (ranks[k] * ranks[k + 1]))
        .collect();
    let mut cores: Vec<Vec<T>> = tt.cores().iter().map(|core| core.to_vec()).collect();

    for k in (1..d).rev() {
        let (left, cols) = (ranks[k], mids[k] * ranks[k + 1]);
        let unfolding = matrix(mem::take(&mut cores[k]), left, cols)?;
        let transposed = unfolding.t().to_owned();
        let (q, r) = qr(&transposed.view(), None)
            .map_err(|e| TtError::SvdError(format!("QR failed at core {}: {}", k, e)))?;

        let m = left.min(cols);
        cores[k] = q.slice(s![.., ..m]).t().iter().copied().collect();

        let prev = matrix(mem::take(&mut cores[k - 1]), ranks[k - 1] * mids[k - 1], left)?;
        cores[k - 1] = prev.dot(&r.slice(s![..m, ..]).t()).iter().copied().collect();
        ranks[k] = m;
    }

    let norm_sq: T = cores[0].iter().map(|&x| x * x).sum();
    let budget_sq = cut_budget(epsilon, d, norm_sq)?;

    for k in 0..d - 1 {
        let (rows, cols) = (ranks[k] * mids[k], ranks[k + 1]);
        let unfolding = matrix(mem::take(&mut cores[k]), rows, cols)?;
        let (u, sigma, vt) = thin_svd(&unfolding, &format!("SVD failed at core {}", k))?;

        let rank = truncation_rank(sigma.view(), bounds[k + 1], rows, cols, budget_sq)?;
        cores[k] = u.slice(s![.., ..rank]).iter().copied().collect();

        let carry = Array2::from_shape_fn((rank, cols), |(i, j)| sigma[i] * vt[[i, j]]);
        let next = matrix(mem::take(&mut cores[k + 1]), cols, mids[k + 1] * ranks[k + 2])?;
        cores[k + 1] = carry.dot(&next).iter().copied().collect();
        ranks[k + 1] = rank;
    }

    log::debug!("round: ranks {:?} -> {:?}", tt.get_tt_ranks(), ranks);

    let raw_shape = tt.get_raw_shape().clone();
    let cores = cores
        .into_iter()
        .enumerate()
        .map(|(k, data)| {
            let shape: Vec<usize> = match &raw_shape {
                RawShape::Tensor(modes) => vec![ranks[k], modes[k], ranks[k + 1]],
                RawShape::Matrix { rows, cols } => {
                    vec![ranks[k], rows[k], cols[k], ranks[k + 1]]
                }
            };
            DenseND::from_vec(data, &shape)
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    TensorTrain::new(cores, raw_shape)
}

fn matrix<T: TtScalar>(data: Vec<T>, rows: usize, cols: usize) -> TtResult<Array2<T>> {
    Array2::from_shape_vec((rows, cols), data)
        .map_err(|e| TtError::ShapeError(format!("Cannot view core as {}x{}: {}", rows, cols, e)))
}
