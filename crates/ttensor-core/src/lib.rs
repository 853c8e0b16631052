//! # ttensor-core
//!
//! Dense N-dimensional tensor type for the ttensor stack.
//!
//! [`DenseND`] wraps a dynamic-dimensionality array from `scirs2_core::ndarray_ext`
//! and provides the handful of array-engine operations that Tensor-Train
//! compression and TT algebra need from a dense backend:
//!
//! - **Creation** from row-major data, fill values, or a closure over multi-indices
//! - **Shape operations**: reshape and axis permutation
//! - **Reductions**: Frobenius norm, flat inner product
//! - **Elementwise subtraction** for error measurements
//!
//! ## Quick Start
//!
//! ```
//! use ttensor_core::DenseND;
//!
//! let tensor = DenseND::<f64>::from_vec((0..24).map(|x| x as f64).collect(), &[2, 3, 4]).unwrap();
//! assert_eq!(tensor.rank(), 3);
//!
//! let matrix = tensor.reshape(&[6, 4]).unwrap();
//! assert_eq!(matrix.shape(), &[6, 4]);
//!
//! let permuted = tensor.permute(&[2, 0, 1]).unwrap();
//! assert_eq!(permuted.shape(), &[4, 2, 3]);
//! assert_eq!(permuted[&[3, 1, 2][..]], tensor[&[1, 2, 3][..]]);
//! ```
//!
//! ## Memory Layout
//!
//! Tensors are C-contiguous (row-major) unless produced by [`DenseND::permute`],
//! which returns a strided view of the same data. [`DenseND::reshape`] always
//! interprets elements in logical row-major order, copying when the layout
//! requires it.
//!
//! ## Error Handling
//!
//! Shape-changing operations return `anyhow::Result`:
//!
//! ```
//! use ttensor_core::DenseND;
//!
//! let tensor = DenseND::<f64>::zeros(&[2, 3]);
//! assert!(tensor.reshape(&[7]).is_err());
//! assert!(tensor.permute(&[0, 0]).is_err());
//! ```

pub mod dense;
pub mod types;

pub use types::{Axis, DenseND, Rank, Shape};
