//! # ttensor-kernels
//!
//! Tensor kernels used by the Tensor-Train algebra:
//!
//! - **Pairwise contraction** over an explicit list of paired axes, with an
//!   optional reordering of the surviving axes ([`contract_tensors`],
//!   [`contract_permuted`])
//! - **Index arithmetic** between flat row-major offsets and multi-indices
//!   ([`unravel_index`], [`ravel_index`])
//!
//! ```rust
//! use scirs2_core::ndarray_ext::Array;
//! use ttensor_kernels::contract_tensors;
//!
//! // core(a, i, b) x core(b, j, c) over the shared bond
//! let left = Array::<f64, _>::ones(vec![1, 2, 3]);
//! let right = Array::<f64, _>::ones(vec![3, 4, 1]);
//! let merged = contract_tensors(&left.view(), &right.view(), &[2], &[0]).unwrap();
//! assert_eq!(merged.shape(), &[1, 2, 4, 1]);
//! assert_eq!(merged[[0, 1, 3, 0]], 3.0);
//! ```

pub mod contractions;
pub mod error;
pub mod indexing;


pub use contractions::{contract_permuted, contract_tensors};
pub use error::{KernelError, KernelResult};
pub use indexing::{ravel_index, unravel_index};
