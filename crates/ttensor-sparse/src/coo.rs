//! COO (Coordinate) sparse tensor format
//!
//! For an N-dimensional sparse tensor:
//! - `indices`: one coordinate `[i₀, i₁, ..., iₙ₋₁]` per stored entry
//! - `values`: the stored values, parallel to `indices`
//! - `shape`: the dense shape the coordinates address
//!
//! Every coordinate is bounds-checked on insertion, so consumers can index
//! dense data with it directly.

use anyhow::Result;
use scirs2_core::ndarray_ext::Dimension;
use scirs2_core::numeric::Float;
use thiserror::Error;
use ttensor_core::DenseND;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CooError {
    #[error("Coordinate has {index_len} components but shape has {shape_len} dimensions")]
    OrderMismatch { index_len: usize, shape_len: usize },

    #[error("Length mismatch: {indices} coordinates but {values} values")]
    LengthMismatch { indices: usize, values: usize },

    #[error("Index out of bounds: {index:?} exceeds shape {shape:?}")]
    IndexOutOfBounds {
        index: Vec<usize>,
        shape: Vec<usize>,
    },

    #[error("Invalid shape: {0}")]
    InvalidShape(String),
}

/// Sparse tensor stored as (coordinate, value) pairs.
#[derive(Debug, Clone)]
pub struct CooTensor<T> {
    indices: Vec<Vec<usize>>,
    values: Vec<T>,
    shape: Vec<usize>,
}

fn validate_shape(shape: &[usize]) -> Result<(), CooError> {
    if shape.is_empty() {
        return Err(CooError::InvalidShape("Shape cannot be empty".to_string()));
    }
    if shape.contains(&0) {
        return Err(CooError::InvalidShape(
            "Shape cannot contain zeros".to_string(),
        ));
    }
    Ok(())
}

fn validate_index(index: &[usize], shape: &[usize]) -> Result<(), CooError> {
    if index.len() != shape.len() {
        return Err(CooError::OrderMismatch {
            index_len: index.len(),
            shape_len: shape.len(),
        });
    }
    if index.iter().zip(shape).any(|(&coord, &size)| coord >= size) {
        return Err(CooError::IndexOutOfBounds {
            index: index.to_vec(),
            shape: shape.to_vec(),
        });
    }
    Ok(())
}

impl<T: Clone> CooTensor<T> {
    /// Create a sparse tensor from parallel coordinate and value arrays.
    ///
    /// # Errors
    ///
    /// - [`CooError::LengthMismatch`] if `indices` and `values` differ in length
    /// - [`CooError::InvalidShape`] if `shape` is empty or contains a zero
    /// - [`CooError::OrderMismatch`] if a coordinate has the wrong number of components
    /// - [`CooError::IndexOutOfBounds`] if a coordinate lies outside `shape`
    pub fn new(
        indices: Vec<Vec<usize>>,
        values: Vec<T>,
        shape: Vec<usize>,
    ) -> Result<Self, CooError> {
        if indices.len() != values.len() {
            return Err(CooError::LengthMismatch {
                indices: indices.len(),
                values: values.len(),
            });
        }
        validate_shape(&shape)?;
        for idx in &indices {
            validate_index(idx, &shape)?;
        }

        Ok(Self {
            indices,
            values,
            shape,
        })
    }

    /// Create a sparse tensor with no stored entries.
    pub fn zeros(shape: Vec<usize>) -> Result<Self, CooError> {
        validate_shape(&shape)?;
        Ok(Self {
            indices: Vec::new(),
            values: Vec::new(),
            shape,
        })
    }

    /// Number of stored entries
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Number of dimensions
    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    pub fn indices(&self) -> &[Vec<usize>] {
        &self.indices
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Iterate over `(coordinate, value)` pairs in storage order.
    pub fn iter(&self) -> impl Iterator<Item = (&[usize], &T)> {
        self.indices
            .iter()
            .map(|idx| idx.as_slice())
            .zip(self.values.iter())
    }

    /// Fraction of the dense shape that is stored.
    pub fn density(&self) -> f64 {
        let total: usize = self.shape.iter().product();
        self.nnz() as f64 / total as f64
    }

    /// Append an entry. Duplicate coordinates are allowed.
    pub fn push(&mut self, index: Vec<usize>, value: T) -> Result<(), CooError> {
        validate_index(&index, &self.shape)?;
        self.indices.push(index);
        self.values.push(value);
        Ok(())
    }
}

impl<T: Float> CooTensor<T> {
    /// Materialise as a dense tensor; repeated coordinates are summed.
    pub fn to_dense(&self) -> Result<DenseND<T>> {
        let mut dense = DenseND::zeros(&self.shape);
        for (idx, &value) in self.iter() {
            let slot = &mut dense[idx];
            *slot = *slot + value;
        }
        Ok(dense)
    }

    /// Collect entries of `dense` whose magnitude exceeds `threshold`.
    pub fn from_dense(dense: &DenseND<T>, threshold: T) -> Result<Self, CooError> {
        let shape = dense.shape().to_vec();
        validate_shape(&shape)?;

        let mut indices = Vec::new();
        let mut values = Vec::new();
        for (idx, &value) in dense.view().indexed_iter() {
            if value.abs() > threshold {
                indices.push(idx.slice().to_vec());
                values.push(value);
            }
        }

        Ok(Self {
            indices,
            values,
            shape,
        })
    }
}
