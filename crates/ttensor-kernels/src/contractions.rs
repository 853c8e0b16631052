//! Pairwise tensor contraction over explicit axis pairs
//!
//! Contractions are lowered to a single matrix product: the free axes of
//! `a` are moved in front of its contracted axes, the contracted axes of `b`
//! are moved in front of its free axes, both operands are flattened to
//! matrices and multiplied.
//!
//! The result enumerates the free axes of `a` (in their original order)
//! followed by the free axes of `b`. [`contract_permuted`] additionally
//! reorders that result.

use crate::error::{KernelError, KernelResult};
use scirs2_core::ndarray_ext::{Array, Array2, ArrayView, IxDyn};
use scirs2_core::numeric::Float;

/// Contract two tensors along the paired axes `modes_a[k] <-> modes_b[k]`.
///
/// When every axis of both operands is contracted the result has shape `[1]`.
///
/// # Errors
///
/// Returns error if:
/// - `modes_a` and `modes_b` differ in length
/// - a mode is out of bounds or listed twice
/// - paired axes have different extents
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::Array;
/// use ttensor_kernels::contract_tensors;
///
/// // Matrix multiplication as tensor contraction
/// let a = Array::from_shape_vec(vec![2, 3], (0..6).map(|x| x as f64).collect()).unwrap();
/// let b = Array::from_shape_vec(vec![3, 4], (0..12).map(|x| x as f64).collect()).unwrap();
///
/// let result = contract_tensors(&a.view(), &b.view(), &[1], &[0]).unwrap();
/// assert_eq!(result.shape(), &[2, 4]);
/// assert_eq!(result[[0, 0]], 20.0);
/// ```
pub fn contract_tensors<T>(
    a: &ArrayView<T, IxDyn>,
    b: &ArrayView<T, IxDyn>,
    modes_a: &[usize],
    modes_b: &[usize],
) -> KernelResult<Array<T, IxDyn>>
where
    T: Float + 'static,
{
    if modes_a.len() != modes_b.len() {
        return Err(KernelError::operation_error(
            "contract_tensors",
            format!(
                "Number of contraction modes must match: {} vs {}",
                modes_a.len(),
                modes_b.len()
            ),
        ));
    }

    let shape_a = a.shape();
    let shape_b = b.shape();
    validate_modes(modes_a, shape_a.len(), "contract_tensors: modes_a")?;
    validate_modes(modes_b, shape_b.len(), "contract_tensors: modes_b")?;

    for (&mode_a, &mode_b) in modes_a.iter().zip(modes_b) {
        if shape_a[mode_a] != shape_b[mode_b] {
            return Err(KernelError::incompatible_shapes(
                "contract_tensors",
                shape_a.to_vec(),
                shape_b.to_vec(),
                format!(
                    "Contracted dimensions must match: axis {} has {}, axis {} has {}",
                    mode_a, shape_a[mode_a], mode_b, shape_b[mode_b]
                ),
            ));
        }
    }

    let free_a: Vec<usize> = (0..shape_a.len())
        .filter(|m| !modes_a.contains(m))
        .collect();
    let free_b: Vec<usize> = (0..shape_b.len())
        .filter(|m| !modes_b.contains(m))
        .collect();

    let rows: usize = free_a.iter().map(|&m| shape_a[m]).product();
    let inner: usize = modes_a.iter().map(|&m| shape_a[m]).product();
    let cols: usize = free_b.iter().map(|&m| shape_b[m]).product();

    log::trace!(
        "contract_tensors: {:?} x {:?} over {:?}/{:?} as GEMM ({} x {}) * ({} x {})",
        shape_a,
        shape_b,
        modes_a,
        modes_b,
        rows,
        inner,
        inner,
        cols
    );

    let order_a: Vec<usize> = free_a.iter().chain(modes_a).copied().collect();
    let order_b: Vec<usize> = modes_b.iter().chain(&free_b).copied().collect();
    let mat_a = unfold(a, &order_a, rows, inner)?;
    let mat_b = unfold(b, &order_b, inner, cols)?;
    let product = mat_a.dot(&mat_b);

    let mut output_shape: Vec<usize> = free_a
        .iter()
        .map(|&m| shape_a[m])
        .chain(free_b.iter().map(|&m| shape_b[m]))
        .collect();
    if output_shape.is_empty() {
        output_shape.push(1);
    }

    product
        .into_shape_with_order(IxDyn(&output_shape))
        .map_err(|e| KernelError::operation_error("contract_tensors", e.to_string()))
}

/// Contract as [`contract_tensors`], then reorder the result.
///
/// Axis `k` of the returned tensor is axis `output_order[k]` of the
/// free-axes-of-`a`-then-free-axes-of-`b` result. The output is C-contiguous.
///
/// ```
/// use scirs2_core::ndarray_ext::Array;
/// use ttensor_kernels::contract_permuted;
///
/// let a = Array::from_shape_vec(vec![2, 3], (0..6).map(|x| x as f64).collect()).unwrap();
/// let b = Array::from_shape_vec(vec![3, 4], (0..12).map(|x| x as f64).collect()).unwrap();
///
/// // (a @ b)^T
/// let result = contract_permuted(&a.view(), &b.view(), &[1], &[0], &[1, 0]).unwrap();
/// assert_eq!(result.shape(), &[4, 2]);
/// ```
pub fn contract_permuted<T>(
    a: &ArrayView<T, IxDyn>,
    b: &ArrayView<T, IxDyn>,
    modes_a: &[usize],
    modes_b: &[usize],
    output_order: &[usize],
) -> KernelResult<Array<T, IxDyn>>
where
    T: Float + 'static,
{
    let contracted = contract_tensors(a, b, modes_a, modes_b)?;
    let rank = contracted.ndim();
    if output_order.len() != rank {
        return Err(KernelError::operation_error(
            "contract_permuted",
            format!(
                "Output order has {} axes but the contraction yields {}",
                output_order.len(),
                rank
            ),
        ));
    }
    validate_modes(output_order, rank, "contract_permuted: output_order")?;

    let permuted = contracted.permuted_axes(IxDyn(output_order));
    Ok(permuted.as_standard_layout().into_owned())
}

fn validate_modes(modes: &[usize], rank: usize, context: &str) -> KernelResult<()> {
    for (k, &mode) in modes.iter().enumerate() {
        if mode >= rank {
            return Err(KernelError::invalid_mode(mode, rank, context));
        }
        if modes[..k].contains(&mode) {
            return Err(KernelError::operation_error(
                context,
                format!("Mode {} listed more than once", mode),
            ));
        }
    }
    Ok(())
}

/// Permute `t` into `order` and flatten it to a `(rows, cols)` matrix.
fn unfold<T>(t: &ArrayView<T, IxDyn>, order: &[usize], rows: usize, cols: usize) -> KernelResult<Array2<T>>
where
    T: Float,
{
    let permuted = t.view().permuted_axes(IxDyn(order));
    let data: Vec<T> = permuted.iter().copied().collect();
    Array2::from_shape_vec((rows, cols), data)
        .map_err(|e| KernelError::operation_error("unfold", e.to_string()))
}
