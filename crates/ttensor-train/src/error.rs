//! Error type shared by every Tensor-Train operation

use thiserror::Error;
use ttensor_kernels::KernelError;
use ttensor_sparse::CooError;

/// Errors raised by Tensor-Train construction, decomposition and algebra.
///
/// Every failure is reported synchronously; no operation returns a partial
/// result.
#[derive(Error, Debug)]
pub enum TtError {
    /// A caller-supplied parameter is out of range (rank bound < 1,
    /// negative epsilon, malformed rank-bound sequence)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Inconsistent shapes: core/rank mismatch, differing dimension counts,
    /// undeterminable number of dimensions
    #[error("Shape error: {0}")]
    ShapeError(String),

    /// A TT-matrix was combined with a TT-tensor where matching kinds are required
    #[error("Type mismatch: {0}")]
    TypeMismatch(String),

    /// The operation or operand pairing is declared but not implemented
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("SVD computation failed: {0}")]
    SvdError(String),

    #[error(transparent)]
    Kernel(#[from] KernelError),

    #[error(transparent)]
    Sparse(#[from] CooError),
}

/// Dense-engine failures are always shape failures.
impl From<anyhow::Error> for TtError {
    fn from(err: anyhow::Error) -> Self {
        TtError::ShapeError(err.to_string())
    }
}

pub type TtResult<T> = Result<T, TtError>;
