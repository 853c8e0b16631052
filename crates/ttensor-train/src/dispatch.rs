//! Dispatch over operand representations
//!
//! [`Operand`] is a closed set of the representations the algebra can meet.
//! [`matmul`] and [`flat_inner`] route every pair either to its TT
//! implementation or to a named stub that reports
//! [`TtError::UnsupportedOperation`].

use crate::algebra::{tt_tt_flat_inner, tt_tt_matmul};
use crate::error::{TtError, TtResult};
use crate::sparse_inner::tt_sparse_flat_inner;
use crate::train::TensorTrain;
use crate::TtScalar;
use std::fmt;
use ttensor_core::DenseND;
use ttensor_sparse::CooTensor;

/// Borrowed operand of a generic algebra call.
///
/// ```
/// use ttensor_core::DenseND;
/// use ttensor_train::Operand;
///
/// let dense = DenseND::<f64>::ones(&[2, 2]);
/// let op = Operand::from(&dense);
/// assert_eq!(op.kind(), "dense");
/// ```
pub enum Operand<'a, T> {
    /// Tensor-Train (tensor or matrix)
    Train(&'a TensorTrain<T>),
    /// Dense array
    Dense(&'a DenseND<T>),
    /// Sparse coordinate tensor
    Sparse(&'a CooTensor<T>),
}

impl<T> Clone for Operand<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Operand<'_, T> {}

impl<T> Operand<'_, T> {
    /// Short name of the representation, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Train(_) => "train",
            Self::Dense(_) => "dense",
            Self::Sparse(_) => "sparse",
        }
    }
}

impl<T: TtScalar> fmt::Debug for Operand<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Train(tt) => f.debug_tuple("Train").field(tt).finish(),
            Self::Dense(d) => f.debug_tuple("Dense").field(&d.shape()).finish(),
            Self::Sparse(s) => f.debug_tuple("Sparse").field(&s.shape()).finish(),
        }
    }
}

impl<'a, T> From<&'a TensorTrain<T>> for Operand<'a, T> {
    fn from(tt: &'a TensorTrain<T>) -> Self {
        Self::Train(tt)
    }
}

impl<'a, T> From<&'a DenseND<T>> for Operand<'a, T> {
    fn from(dense: &'a DenseND<T>) -> Self {
        Self::Dense(dense)
    }
}

impl<'a, T> From<&'a CooTensor<T>> for Operand<'a, T> {
    fn from(sparse: &'a CooTensor<T>) -> Self {
        Self::Sparse(sparse)
    }
}

/// Result of [`matmul`]: a train, or a dense array for pairs whose product
/// would be dense.
#[derive(Debug)]
pub enum MatmulOutput<T: TtScalar> {
    Train(TensorTrain<T>),
    Dense(DenseND<T>),
}

impl<T: TtScalar> MatmulOutput<T> {
    /// The train, if the product is one.
    pub fn into_train(self) -> Option<TensorTrain<T>> {
        match self {
            Self::Train(tt) => Some(tt),
            Self::Dense(_) => None,
        }
    }
}

/// Matrix product of two operands.
///
/// This dispatcher is partial. `(Train, Train)` computes a real product via
/// [`tt_tt_matmul`]. The dense and sparse mixes are routed to their named
/// entry points ([`tt_dense_matmul`], [`sparse_tt_matmul`], ...), which are
/// placeholders that always return [`TtError::UnsupportedOperation`], so
/// callers must not rely on them producing a value.
///
/// # Errors
///
/// [`TtError::UnsupportedOperation`] for every other pair, plus whatever the
/// selected implementation reports.
pub fn matmul<T: TtScalar>(a: Operand<'_, T>, b: Operand<'_, T>) -> TtResult<MatmulOutput<T>> {
    match (a, b) {
        (Operand::Train(a), Operand::Train(b)) => tt_tt_matmul(a, b).map(MatmulOutput::Train),
        (Operand::Train(a), Operand::Dense(b)) => tt_dense_matmul(a, b).map(MatmulOutput::Dense),
        (Operand::Dense(a), Operand::Train(b)) => dense_tt_matmul(a, b).map(MatmulOutput::Dense),
        (Operand::Sparse(a), Operand::Train(b)) => sparse_tt_matmul(a, b).map(MatmulOutput::Dense),
        (Operand::Train(a), Operand::Sparse(b)) => tt_sparse_matmul(a, b).map(MatmulOutput::Dense),
        (a, b) => Err(unsupported_pair("matmul", a, b)),
    }
}

/// Flat inner product of two operands.
///
/// This dispatcher is partial. `(Train, Train)` and `(Train, Sparse)` compute
/// a value via [`tt_tt_flat_inner`] and [`tt_sparse_flat_inner`]. The other
/// mixes go to placeholder entry points ([`tt_dense_flat_inner`],
/// [`sparse_tt_flat_inner`], ...) that always return
/// [`TtError::UnsupportedOperation`]; `(Sparse, Train)` is not reordered
/// into `(Train, Sparse)`.
///
/// # Errors
///
/// [`TtError::UnsupportedOperation`] for every other pair, plus whatever the
/// selected implementation reports.
///
/// ```
/// use ttensor_core::DenseND;
/// use ttensor_train::{flat_inner, to_tt_tensor, Operand, TtError};
///
/// let x = DenseND::<f64>::ones(&[2, 2]);
/// let tt = to_tt_tensor(&x, 2, None).unwrap();
///
/// let dot = flat_inner(Operand::from(&tt), Operand::from(&tt)).unwrap();
/// assert!((dot - 4.0).abs() < 1e-12);
///
/// let err = flat_inner(Operand::from(&tt), Operand::from(&x)).unwrap_err();
/// assert!(matches!(err, TtError::UnsupportedOperation(_)));
/// ```
pub fn flat_inner<T: TtScalar>(a: Operand<'_, T>, b: Operand<'_, T>) -> TtResult<T> {
    match (a, b) {
        (Operand::Train(a), Operand::Train(b)) => tt_tt_flat_inner(a, b),
        (Operand::Train(a), Operand::Sparse(b)) => tt_sparse_flat_inner(a, b),
        (Operand::Train(a), Operand::Dense(b)) => tt_dense_flat_inner(a, b),
        (Operand::Dense(a), Operand::Train(b)) => dense_tt_flat_inner(a, b),
        (Operand::Sparse(a), Operand::Train(b)) => sparse_tt_flat_inner(a, b),
        (a, b) => Err(unsupported_pair("flat_inner", a, b)),
    }
}

/// Train times dense matrix. Not implemented.
pub fn tt_dense_matmul<T: TtScalar>(_tt_a: &TensorTrain<T>, _dense_b: &DenseND<T>) -> TtResult<DenseND<T>> {
    Err(unsupported("tt_dense_matmul"))
}

/// Dense matrix times train. Not implemented.
pub fn dense_tt_matmul<T: TtScalar>(_dense_a: &DenseND<T>, _tt_b: &TensorTrain<T>) -> TtResult<DenseND<T>> {
    Err(unsupported("dense_tt_matmul"))
}

/// Sparse matrix times train. Not implemented.
pub fn sparse_tt_matmul<T: TtScalar>(_sparse_a: &CooTensor<T>, _tt_b: &TensorTrain<T>) -> TtResult<DenseND<T>> {
    Err(unsupported("sparse_tt_matmul"))
}

/// Train times sparse matrix. Not implemented.
pub fn tt_sparse_matmul<T: TtScalar>(_tt_a: &TensorTrain<T>, _sparse_b: &CooTensor<T>) -> TtResult<DenseND<T>> {
    Err(unsupported("tt_sparse_matmul"))
}

/// Inner product of a train and a dense array. Not implemented.
pub fn tt_dense_flat_inner<T: TtScalar>(_tt_a: &TensorTrain<T>, _dense_b: &DenseND<T>) -> TtResult<T> {
    Err(unsupported("tt_dense_flat_inner"))
}

/// Inner product of a dense array and a train. Not implemented.
pub fn dense_tt_flat_inner<T: TtScalar>(_dense_a: &DenseND<T>, _tt_b: &TensorTrain<T>) -> TtResult<T> {
    Err(unsupported("dense_tt_flat_inner"))
}

/// Inner product of a sparse tensor and a train. Not implemented; use
/// [`tt_sparse_flat_inner`] with the operands swapped.
pub fn sparse_tt_flat_inner<T: TtScalar>(_sparse_a: &CooTensor<T>, _tt_b: &TensorTrain<T>) -> TtResult<T> {
    Err(unsupported("sparse_tt_flat_inner"))
}

fn unsupported(operation: &str) -> TtError {
    log::warn!("{} is not implemented", operation);
    TtError::UnsupportedOperation(format!("{} is not implemented", operation))
}

fn unsupported_pair<T>(operation: &str, a: Operand<'_, T>, b: Operand<'_, T>) -> TtError {
    log::warn!("{} has no implementation for ({}, {}) operands", operation, a.kind(), b.kind());
    TtError::UnsupportedOperation(format!(
        "{} is not supported for ({}, {}) operands",
        operation,
        a.kind(),
        b.kind()
    ))
}
