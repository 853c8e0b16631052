//! # ttensor-sparse
//!
//! Coordinate-format sparse tensors for the ttensor stack.
//!
//! A [`CooTensor`] is the sparse operand accepted by the Tensor-Train sparse
//! inner product: parallel arrays of coordinate tuples and values, one pair
//! per stored entry. Entry order carries no meaning, and repeated coordinates
//! act additively.
//!
//! ```
//! use ttensor_sparse::CooTensor;
//!
//! let coo = CooTensor::new(vec![vec![0, 1], vec![2, 0]], vec![2.5, -1.0], vec![3, 4]).unwrap();
//! assert_eq!(coo.nnz(), 2);
//! assert_eq!(coo.shape(), &[3, 4]);
//! ```

pub mod coo;

pub use coo::{CooError, CooTensor};
