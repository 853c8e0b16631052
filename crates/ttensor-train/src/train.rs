//! The Tensor-Train value type
//!
//! A train of order d stores d cores. For a TT-tensor core k has shape
//! `(r_k, n_k, r_{k+1})`; for a TT-matrix it has shape
//! `(r_k, m_k, n_k, r_{k+1})`, with `m_k` a row factor and `n_k` a column
//! factor. Boundary ranks satisfy `r_0 = r_d = 1`.

use crate::error::{TtError, TtResult};
use crate::shapes;
use crate::TtScalar;
use scirs2_core::ndarray_ext::{Array2, Array3, Axis};
use std::fmt;
use ttensor_core::{DenseND, Shape};
use ttensor_kernels::unravel_index;

/// Mode sizes represented by a train.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawShape {
    /// One mode size per core
    Tensor(Shape),
    /// Row and column factors, one pair per core
    Matrix { rows: Shape, cols: Shape },
}

impl RawShape {
    pub fn tensor(modes: &[usize]) -> Self {
        RawShape::Tensor(Shape::from_slice(modes))
    }

    pub fn matrix(rows: &[usize], cols: &[usize]) -> Self {
        RawShape::Matrix {
            rows: Shape::from_slice(rows),
            cols: Shape::from_slice(cols),
        }
    }

    /// Number of cores the shape describes.
    pub fn ndims(&self) -> usize {
        match self {
            RawShape::Tensor(modes) => modes.len(),
            RawShape::Matrix { rows, .. } => rows.len(),
        }
    }

    pub fn is_matrix(&self) -> bool {
        matches!(self, RawShape::Matrix { .. })
    }
}

/// Immutable Tensor-Train representation of a tensor or matrix.
///
/// Construction validates the chain; every operation on a train returns a
/// new value.
///
/// # Examples
///
/// ```
/// use ttensor_core::DenseND;
/// use ttensor_train::{RawShape, TensorTrain};
///
/// let cores = vec![
///     DenseND::<f64>::ones(&[1, 2, 3]),
///     DenseND::<f64>::ones(&[3, 4, 1]),
/// ];
/// let tt = TensorTrain::new(cores, RawShape::tensor(&[2, 4])).unwrap();
/// assert_eq!(tt.ndims(), 2);
/// assert_eq!(tt.get_tt_ranks(), &[1, 3, 1]);
/// assert_eq!(tt.get_shape().as_slice(), &[2, 4]);
/// ```
#[derive(Clone)]
pub struct TensorTrain<T> {
    cores: Vec<DenseND<T>>,
    raw_shape: RawShape,
    ranks: Shape,
}

impl<T: TtScalar> TensorTrain<T> {
    /// Build a train from cores and the mode sizes they represent.
    ///
    /// # Errors
    ///
    /// [`TtError::ShapeError`] when there are no cores, when the core count
    /// differs from `raw_shape`, when a core has the wrong order or mode
    /// sizes, when adjacent cores disagree on their shared rank, or when a
    /// boundary rank is not 1.
    pub fn new(cores: Vec<DenseND<T>>, raw_shape: RawShape) -> TtResult<Self> {
        let d = cores.len();
        if d == 0 {
            return Err(TtError::ShapeError(
                "A tensor train needs at least one core".to_string(),
            ));
        }
        if raw_shape.ndims() != d {
            return Err(TtError::ShapeError(format!(
                "Raw shape describes {} modes but {} cores were given",
                raw_shape.ndims(),
                d
            )));
        }

        let order = if raw_shape.is_matrix() { 4 } else { 3 };
        for (k, core) in cores.iter().enumerate() {
            if core.rank() != order {
                return Err(TtError::ShapeError(format!(
                    "Core {} has {} axes, expected {}",
                    k,
                    core.rank(),
                    order
                )));
            }
            if core.shape().contains(&0) {
                return Err(TtError::ShapeError(format!(
                    "Core {} has an empty axis: {:?}",
                    k,
                    core.shape()
                )));
            }
            let modes_match = match &raw_shape {
                RawShape::Tensor(modes) => core.shape()[1] == modes[k],
                RawShape::Matrix { rows, cols } => {
                    core.shape()[1] == rows[k] && core.shape()[2] == cols[k]
                }
            };
            if !modes_match {
                return Err(TtError::ShapeError(format!(
                    "Core {} with shape {:?} does not match raw shape {:?}",
                    k,
                    core.shape(),
                    raw_shape
                )));
            }
        }

        for k in 1..d {
            let left = cores[k - 1].shape()[order - 1];
            let right = cores[k].shape()[0];
            if left != right {
                return Err(TtError::ShapeError(format!(
                    "Rank mismatch between cores {} and {}: {} vs {}",
                    k - 1,
                    k,
                    left,
                    right
                )));
            }
        }

        let ranks = shapes::tt_ranks(&cores);
        if ranks[0] != 1 || ranks[d] != 1 {
            return Err(TtError::ShapeError(format!(
                "Boundary ranks must be 1, got {} and {}",
                ranks[0], ranks[d]
            )));
        }

        Ok(Self {
            cores,
            raw_shape,
            ranks,
        })
    }

    /// As [`TensorTrain::new`], additionally checking a declared rank sequence.
    pub fn with_ranks(
        cores: Vec<DenseND<T>>,
        raw_shape: RawShape,
        ranks: &[usize],
    ) -> TtResult<Self> {
        let tt = Self::new(cores, raw_shape)?;
        if tt.ranks.as_slice() != ranks {
            return Err(TtError::ShapeError(format!(
                "Declared ranks {:?} do not match core ranks {:?}",
                ranks, tt.ranks
            )));
        }
        Ok(tt)
    }

    /// Number of cores (d).
    pub fn ndims(&self) -> usize {
        self.cores.len()
    }

    pub fn is_tt_matrix(&self) -> bool {
        self.raw_shape.is_matrix()
    }

    /// TT-ranks `[r_0, ..., r_d]`.
    pub fn get_tt_ranks(&self) -> &[usize] {
        &self.ranks
    }

    pub fn get_raw_shape(&self) -> &RawShape {
        &self.raw_shape
    }

    /// Shape of the dense equivalent returned by [`crate::full`].
    pub fn get_shape(&self) -> Shape {
        shapes::dense_shape(&self.raw_shape)
    }

    pub fn cores(&self) -> &[DenseND<T>] {
        &self.cores
    }

    pub fn core(&self, k: usize) -> Option<&DenseND<T>> {
        self.cores.get(k)
    }

    pub fn into_cores(self) -> Vec<DenseND<T>> {
        self.cores
    }

    /// Total number of stored scalars across all cores.
    pub fn num_parameters(&self) -> usize {
        self.cores.iter().map(|core| core.len()).sum()
    }

    /// Dense element count divided by [`TensorTrain::num_parameters`].
    pub fn compression_ratio(&self) -> f64 {
        let full_size: usize = self.get_shape().iter().product();
        full_size as f64 / self.num_parameters() as f64
    }

    /// Value of the dense equivalent at one index.
    ///
    /// For a TT-matrix `index` is `[row, col]` into the dense matrix.
    ///
    /// ```
    /// use ttensor_core::DenseND;
    /// use ttensor_train::{full, to_tt_tensor};
    ///
    /// let x = DenseND::<f64>::from_fn(&[2, 3, 2], |i| (i[0] + 2 * i[1] + 3 * i[2]) as f64);
    /// let tt = to_tt_tensor(&x, 4, None).unwrap();
    /// assert!((tt.evaluate(&[1, 2, 1]).unwrap() - 8.0).abs() < 1e-10);
    /// ```
    pub fn evaluate(&self, index: &[usize]) -> TtResult<T> {
        let slices = self.mode_major_cores()?;
        let positions = self.core_positions(index)?;
        let mut acc = Array2::<T>::ones((1, 1));
        for (stack, &pos) in slices.iter().zip(&positions) {
            acc = acc.dot(&stack.index_axis(Axis(0), pos));
        }
        Ok(acc[[0, 0]])
    }

    /// Relative Frobenius error `||X - full(tt)|| / ||X||`.
    pub fn relative_error(&self, original: &DenseND<T>) -> TtResult<T> {
        let reconstructed = crate::full(self)?;
        if reconstructed.shape() != original.shape() {
            return Err(TtError::ShapeError(format!(
                "Cannot compare train of shape {:?} with tensor of shape {:?}",
                reconstructed.shape(),
                original.shape()
            )));
        }
        let diff = original - &reconstructed;
        Ok(diff.frobenius_norm() / original.frobenius_norm())
    }

    /// Each core rearranged as a stack of `(r_k, r_{k+1})` slices indexed by
    /// the core's position: `n_k` slices for a TT-tensor, `m_k * n_k` slices
    /// (position `row * n_k + col`) for a TT-matrix.
    pub(crate) fn mode_major_cores(&self) -> TtResult<Vec<Array3<T>>> {
        self.cores
            .iter()
            .map(|core| {
                let s = core.shape();
                let (left, right) = (s[0], s[s.len() - 1]);
                let positions = core.len() / (left * right);
                let axes: &[usize] = if self.is_tt_matrix() {
                    &[1, 2, 0, 3]
                } else {
                    &[1, 0, 2]
                };
                let data = core.permute(axes)?.to_vec();
                Array3::from_shape_vec((positions, left, right), data)
                    .map_err(|e| TtError::ShapeError(e.to_string()))
            })
            .collect()
    }

    /// Per-core positions addressed by a dense index.
    pub(crate) fn core_positions(&self, index: &[usize]) -> TtResult<Vec<usize>> {
        let shape = self.get_shape();
        if index.len() != shape.len() || index.iter().zip(&shape).any(|(&i, &n)| i >= n) {
            return Err(TtError::InvalidArgument(format!(
                "Index {:?} out of bounds for shape {:?}",
                index, shape
            )));
        }
        match &self.raw_shape {
            RawShape::Tensor(_) => Ok(index.to_vec()),
            RawShape::Matrix { rows, cols } => {
                let row_idx = unravel_index(index[0], rows)?;
                let col_idx = unravel_index(index[1], cols)?;
                Ok(row_idx
                    .iter()
                    .zip(&col_idx)
                    .zip(cols)
                    .map(|((&r, &c), &n)| r * n + c)
                    .collect())
            }
        }
    }
}

impl<T: TtScalar> fmt::Debug for TensorTrain<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TensorTrain")
            .field("raw_shape", &self.raw_shape)
            .field("ranks", &self.ranks)
            .finish()
    }
}

/// View a tensor as a `(rows, cols)` matrix in row-major order.
pub(crate) fn as_matrix<T: TtScalar>(t: &DenseND<T>, rows: usize, cols: usize) -> TtResult<Array2<T>> {
    Array2::from_shape_vec((rows, cols), t.to_vec()).map_err(|e| {
        TtError::ShapeError(format!(
            "Cannot view tensor of shape {:?} as {}x{} matrix: {}",
            t.shape(),
            rows,
            cols,
            e
        ))
    })
}
