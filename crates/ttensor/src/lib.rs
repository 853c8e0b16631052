//! # ttensor - Tensor-Train compression and algebra
//!
//! This is the **meta crate** that re-exports the ttensor components.
//!
//! ## Quick Start
//!
//! ```
//! use ttensor::prelude::*;
//!
//! // Rank-1 outer product of [1, 2], [3, 4], [5, 6]
//! let x = DenseND::<f64>::from_fn(&[2, 2, 2], |i| {
//!     (1 + i[0]) as f64 * (3 + i[1]) as f64 * (5 + i[2]) as f64
//! });
//!
//! let tt = to_tt_tensor(&x, 5, None)?;
//! assert_eq!(tt.get_tt_ranks(), &[1, 1, 1, 1]);
//!
//! let norm_sq = frobenius_norm_squared(&tt)?;
//! let expected: f64 = x.iter().map(|v| v * v).sum();
//! assert!((norm_sq - expected).abs() < 1e-9 * expected);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Components
//!
//! ### Dense Tensors ([`core`])
//!
//! ```
//! use ttensor::core::DenseND;
//!
//! let tensor = DenseND::<f64>::ones(&[2, 3, 4]);
//! let reshaped = tensor.reshape(&[6, 4]).unwrap();
//! assert_eq!(reshaped.shape(), &[6, 4]);
//! ```
//!
//! ### Sparse Tensors ([`sparse`])
//!
//! ```
//! use ttensor::sparse::CooTensor;
//!
//! let coo = CooTensor::new(vec![vec![0, 0], vec![1, 1]], vec![1.0, 2.0], vec![2, 2]).unwrap();
//! assert_eq!(coo.nnz(), 2);
//! ```
//!
//! ### Contraction Kernels ([`kernels`])
//!
//! Pairwise contraction over explicit axis lists, index raveling.
//!
//! ### Tensor-Train ([`train`])
//!
//! Decomposition (`to_tt_tensor`, `to_tt_matrix`), reconstruction (`full`),
//! TT-matrix products, inner products, norms and rounding.
//!
//! ```
//! use ttensor::core::DenseND;
//! use ttensor::train::{full, to_tt_matrix, tt_tt_matmul, MatrixShape};
//!
//! let eye = DenseND::<f64>::from_fn(&[8, 8], |i| if i[0] == i[1] { 1.0 } else { 0.0 });
//! let tt = to_tt_matrix(&eye, MatrixShape::new(&[2, 2, 2], &[2, 2, 2]), 4, None).unwrap();
//! assert_eq!(tt.get_tt_ranks(), &[1, 1, 1, 1]);
//!
//! let product = full(&tt_tt_matmul(&tt, &tt).unwrap()).unwrap();
//! assert!(eye.max_abs_diff(&product).unwrap() < 1e-12);
//! ```

pub use ttensor_core as core;
pub use ttensor_kernels as kernels;
pub use ttensor_sparse as sparse;
pub use ttensor_train as train;

pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! # Example
    //!
    //! ```
    //! use ttensor::prelude::*;
    //!
    //! let tensor = DenseND::<f64>::ones(&[4, 4, 4]);
    //! let tt = to_tt_tensor(&tensor, 2, None).unwrap();
    //! assert_eq!(tt.ndims(), 3);
    //! ```

    // Core types
    pub use crate::core::{DenseND, Shape};

    // Sparse types
    pub use crate::sparse::CooTensor;

    // Tensor-Train
    pub use crate::train::{
        flat_inner, frobenius_norm, frobenius_norm_squared, full, matmul, round, to_tt_matrix,
        to_tt_tensor, tt_sparse_flat_inner, tt_tt_flat_inner, tt_tt_matmul, MatrixShape, MaxRank,
        Operand, TensorTrain, TtError, TtResult,
    };
}
