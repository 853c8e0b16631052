//! Error types for tensor kernel operations

use std::fmt;

/// Error type for tensor kernel operations
#[derive(Debug, Clone, PartialEq)]
pub enum KernelError {
    /// Invalid mode/axis specification
    InvalidMode {
        mode: usize,
        max_mode: usize,
        context: String,
    },

    /// Shape incompatibility between two operands
    IncompatibleShapes {
        operation: String,
        shape_a: Vec<usize>,
        shape_b: Vec<usize>,
        reason: String,
    },

    /// Index outside the addressed extent
    IndexOutOfBounds {
        index: Vec<usize>,
        shape: Vec<usize>,
    },

    /// Generic operation error with context
    OperationError { operation: String, message: String },
}

impl fmt::Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KernelError::InvalidMode {
                mode,
                max_mode,
                context,
            } => write!(
                f,
                "Invalid mode {}: must be < {}. {}",
                mode, max_mode, context
            ),

            KernelError::IncompatibleShapes {
                operation,
                shape_a,
                shape_b,
                reason,
            } => write!(
                f,
                "{}: incompatible shapes {:?} and {:?}: {}",
                operation, shape_a, shape_b, reason
            ),

            KernelError::IndexOutOfBounds { index, shape } => {
                write!(f, "Index {:?} out of bounds for shape {:?}", index, shape)
            }

            KernelError::OperationError { operation, message } => {
                write!(f, "{}: {}", operation, message)
            }
        }
    }
}

impl std::error::Error for KernelError {}

/// Result type for kernel operations
pub type KernelResult<T> = Result<T, KernelError>;

impl KernelError {
    pub fn invalid_mode(mode: usize, max_mode: usize, context: impl Into<String>) -> Self {
        KernelError::InvalidMode {
            mode,
            max_mode,
            context: context.into(),
        }
    }

    pub fn incompatible_shapes(
        operation: impl Into<String>,
        shape_a: Vec<usize>,
        shape_b: Vec<usize>,
        reason: impl Into<String>,
    ) -> Self {
        KernelError::IncompatibleShapes {
            operation: operation.into(),
            shape_a,
            shape_b,
            reason: reason.into(),
        }
    }

    pub fn index_out_of_bounds(index: &[usize], shape: &[usize]) -> Self {
        KernelError::IndexOutOfBounds {
            index: index.to_vec(),
            shape: shape.to_vec(),
        }
    }

    pub fn operation_error(operation: impl Into<String>, message: impl Into<String>) -> Self {
        KernelError::OperationError {
            operation: operation.into(),
            message: message.into(),
        }
    }
}
