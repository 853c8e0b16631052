//! Dense tensor implementation and operations
//!
//! The type lives in [`types`]; operations are grouped by concern in the
//! private sub-modules and attached to [`DenseND`] as inherent methods.

pub mod types;

mod arithmetic;
mod shape_ops;

pub mod densend_traits;

pub use types::DenseND;
