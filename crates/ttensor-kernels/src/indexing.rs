//! Row-major conversions between flat offsets and multi-indices

use crate::error::{KernelError, KernelResult};

/// Split a flat row-major offset into one coordinate per dimension.
///
/// Coordinates are produced by successive division/modulo from the last
/// dimension to the first.
///
/// # Errors
///
/// Fails when `flat` is not below the product of `dims`.
///
/// ```
/// use ttensor_kernels::unravel_index;
///
/// assert_eq!(unravel_index(11, &[2, 3, 4]).unwrap(), vec![0, 2, 3]);
/// assert_eq!(unravel_index(23, &[2, 3, 4]).unwrap(), vec![1, 2, 3]);
/// ```
pub fn unravel_index(flat: usize, dims: &[usize]) -> KernelResult<Vec<usize>> {
    let total: usize = dims.iter().product();
    if flat >= total {
        return Err(KernelError::index_out_of_bounds(&[flat], &[total]));
    }
    let mut coord = vec![0; dims.len()];
    let mut rest = flat;
    for (slot, &size) in coord.iter_mut().zip(dims).rev() {
        *slot = rest % size;
        rest /= size;
    }
    Ok(coord)
}

/// Inverse of [`unravel_index`].
///
/// ```
/// use ttensor_kernels::ravel_index;
///
/// assert_eq!(ravel_index(&[1, 2, 3], &[2, 3, 4]).unwrap(), 23);
/// ```
pub fn ravel_index(coord: &[usize], dims: &[usize]) -> KernelResult<usize> {
    if coord.len() != dims.len() || coord.iter().zip(dims).any(|(&c, &d)| c >= d) {
        return Err(KernelError::index_out_of_bounds(coord, dims));
    }
    Ok(coord
        .iter()
        .zip(dims)
        .fold(0, |acc, (&c, &size)| acc * size + c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unravel_all_offsets() {
        let dims = [3, 1, 2];
        let coords: Vec<_> = (0..6).map(|k| unravel_index(k, &dims).unwrap()).collect();
        assert_eq!(
            coords,
            vec![
                vec![0, 0, 0],
                vec![0, 0, 1],
                vec![1, 0, 0],
                vec![1, 0, 1],
                vec![2, 0, 0],
                vec![2, 0, 1],
            ]
        );
    }

    #[test]
    fn test_unravel_out_of_range() {
        assert!(unravel_index(6, &[2, 3]).is_err());
    }

    #[test]
    fn test_ravel_rejects_bad_coord() {
        assert!(ravel_index(&[2, 0], &[2, 3]).is_err());
        assert!(ravel_index(&[0], &[2, 3]).is_err());
    }

    #[test]
    fn test_empty_dims() {
        assert_eq!(unravel_index(0, &[]).unwrap(), Vec::<usize>::new());
        assert_eq!(ravel_index(&[], &[]).unwrap(), 0);
    }
}
