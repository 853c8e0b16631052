//! Rank and mode bookkeeping for Tensor-Train values
//!
//! All shapes are known when an operation runs, so every helper here
//! returns concrete integers.

use crate::error::{TtError, TtResult};
use crate::options::MaxRank;
use crate::train::RawShape;
use smallvec::smallvec;
use ttensor_core::{DenseND, Shape};

/// Rank sequence `[r_0, ..., r_d]` read off the cores.
pub fn tt_ranks<T>(cores: &[DenseND<T>]) -> Shape
where
    T: Clone + scirs2_core::numeric::Num,
{
    let mut ranks = Shape::with_capacity(cores.len() + 1);
    if let Some(first) = cores.first() {
        ranks.push(first.shape()[0]);
    }
    for core in cores {
        ranks.push(core.shape()[core.rank() - 1]);
    }
    ranks
}

/// Mode sizes read off the cores: axis 1 for TT-tensors, axes 1 and 2 for TT-matrices.
pub fn raw_shape_of<T>(cores: &[DenseND<T>], is_matrix: bool) -> RawShape
where
    T: Clone + scirs2_core::numeric::Num,
{
    if is_matrix {
        RawShape::Matrix {
            rows: cores.iter().map(|c| c.shape()[1]).collect(),
            cols: cores.iter().map(|c| c.shape()[2]).collect(),
        }
    } else {
        RawShape::Tensor(cores.iter().map(|c| c.shape()[1]).collect())
    }
}

/// Expand a rank bound into one entry per rank (`d + 1` entries).
///
/// # Errors
///
/// [`TtError::InvalidArgument`] if any bound is below 1 or the sequence
/// length is neither 1 nor `d + 1`.
///
/// ```
/// use ttensor_train::{shapes::resolve_max_ranks, MaxRank};
///
/// assert_eq!(resolve_max_ranks(&MaxRank::Uniform(4), 3).unwrap().as_slice(), &[4, 4, 4, 4]);
/// assert!(resolve_max_ranks(&MaxRank::PerBond(vec![1, 2]), 3).is_err());
/// ```
pub fn resolve_max_ranks(max_tt_rank: &MaxRank, d: usize) -> TtResult<Shape> {
    let bounds: Shape = match max_tt_rank {
        MaxRank::Uniform(r) => smallvec![*r; d + 1],
        MaxRank::PerBond(v) if v.len() == 1 => smallvec![v[0]; d + 1],
        MaxRank::PerBond(v) if v.len() == d + 1 => Shape::from_slice(v),
        MaxRank::PerBond(v) => {
            return Err(TtError::InvalidArgument(format!(
                "max_tt_rank should be a number or a sequence of {} bounds (d + 1), got {}",
                d + 1,
                v.len()
            )))
        }
    };
    if bounds.contains(&0) {
        return Err(TtError::InvalidArgument(
            "Maximum TT-rank should be greater or equal to 1".to_string(),
        ));
    }
    Ok(bounds)
}

/// Shape of the dense equivalent: the modes of a TT-tensor, or
/// `[∏ rows, ∏ cols]` for a TT-matrix.
pub fn dense_shape(raw_shape: &RawShape) -> Shape {
    match raw_shape {
        RawShape::Tensor(modes) => modes.clone(),
        RawShape::Matrix { rows, cols } => {
            smallvec![rows.iter().product::<usize>(), cols.iter().product::<usize>()]
        }
    }
}

/// Row and column factors of a matrix to be stored as a TT-matrix.
///
/// One side may be omitted for vectors; it is then taken as all ones.
///
/// ```
/// use ttensor_train::MatrixShape;
///
/// let shape = MatrixShape::column_vector(&[2, 3]);
/// let (rows, cols) = shape.resolve().unwrap();
/// assert_eq!(rows.as_slice(), &[2, 3]);
/// assert_eq!(cols.as_slice(), &[1, 1]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixShape {
    pub rows: Option<Shape>,
    pub cols: Option<Shape>,
}

impl MatrixShape {
    pub fn new(rows: &[usize], cols: &[usize]) -> Self {
        Self {
            rows: Some(Shape::from_slice(rows)),
            cols: Some(Shape::from_slice(cols)),
        }
    }

    /// `rows x 1` matrix
    pub fn column_vector(rows: &[usize]) -> Self {
        Self {
            rows: Some(Shape::from_slice(rows)),
            cols: None,
        }
    }

    /// `1 x cols` matrix
    pub fn row_vector(cols: &[usize]) -> Self {
        Self {
            rows: None,
            cols: Some(Shape::from_slice(cols)),
        }
    }

    /// Fill an omitted side with ones and check both sides have length d.
    pub fn resolve(&self) -> TtResult<(Shape, Shape)> {
        let (rows, cols) = match (&self.rows, &self.cols) {
            (Some(rows), Some(cols)) => (rows.clone(), cols.clone()),
            (Some(rows), None) => (rows.clone(), smallvec![1; rows.len()]),
            (None, Some(cols)) => (smallvec![1; cols.len()], cols.clone()),
            (None, None) => {
                return Err(TtError::InvalidArgument(
                    "At least one of the row or column factorizations is required".to_string(),
                ))
            }
        };
        if rows.len() != cols.len() {
            return Err(TtError::ShapeError(format!(
                "Row and column factorizations must have equal length, got {} and {}",
                rows.len(),
                cols.len()
            )));
        }
        if rows.is_empty() {
            return Err(TtError::ShapeError(
                "Matrix factorization must have at least one factor".to_string(),
            ));
        }
        Ok((rows, cols))
    }
}

impl From<(&[usize], &[usize])> for MatrixShape {
    fn from((rows, cols): (&[usize], &[usize])) -> Self {
        MatrixShape::new(rows, cols)
    }
}
