//! Shape manipulation: reshape and axis permutation

use super::types::DenseND;
use scirs2_core::ndarray_ext::IxDyn;
use scirs2_core::numeric::Num;

impl<T> DenseND<T>
where
    T: Clone + Num,
{
    /// Reshape the tensor, reading elements in logical row-major order.
    ///
    /// Zero-copy views are used when the layout allows it; strided tensors
    /// (e.g. the output of [`DenseND::permute`]) are materialised first.
    ///
    /// # Errors
    ///
    /// Fails when the element count of `new_shape` differs from [`DenseND::len`].
    ///
    /// # Examples
    ///
    /// ```
    /// use ttensor_core::dense::DenseND;
    ///
    /// let tensor = DenseND::<f64>::zeros(&[2, 3, 4]);
    /// let reshaped = tensor.reshape(&[6, 4]).unwrap();
    /// assert_eq!(reshaped.shape(), &[6, 4]);
    /// ```
    pub fn reshape(&self, new_shape: &[usize]) -> anyhow::Result<Self> {
        let new_size: usize = new_shape.iter().product();
        let old_size = self.len();
        if new_size != old_size {
            anyhow::bail!(
                "Cannot reshape tensor of size {} into shape {:?} (size {})",
                old_size,
                new_shape,
                new_size
            );
        }
        if let Ok(reshaped) = self.data.view().into_shape_with_order(IxDyn(new_shape)) {
            Ok(Self {
                data: reshaped.to_owned(),
            })
        } else {
            Self::from_vec(self.to_vec(), new_shape)
        }
    }

    /// Reshape, consuming the tensor. Avoids a copy for contiguous data.
    pub fn into_reshaped(self, new_shape: &[usize]) -> anyhow::Result<Self> {
        if self.is_contiguous() {
            let new_size: usize = new_shape.iter().product();
            if new_size != self.len() {
                anyhow::bail!(
                    "Cannot reshape tensor of size {} into shape {:?} (size {})",
                    self.len(),
                    new_shape,
                    new_size
                );
            }
            let data = self.data.into_shape_with_order(IxDyn(new_shape))?;
            Ok(Self { data })
        } else {
            self.reshape(new_shape)
        }
    }

    /// Permute the axes of the tensor.
    ///
    /// Axis `k` of the result is axis `axes[k]` of the input.
    ///
    /// # Errors
    ///
    /// Fails if `axes` is not a permutation of `0..rank`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ttensor_core::dense::DenseND;
    ///
    /// let tensor = DenseND::<f64>::zeros(&[2, 3, 4]);
    /// let permuted = tensor.permute(&[2, 0, 1]).unwrap();
    /// assert_eq!(permuted.shape(), &[4, 2, 3]);
    /// ```
    pub fn permute(&self, axes: &[usize]) -> anyhow::Result<Self> {
        if axes.len() != self.rank() {
            anyhow::bail!(
                "Permutation axes length {} does not match tensor rank {}",
                axes.len(),
                self.rank()
            );
        }
        let mut seen = vec![false; self.rank()];
        for &axis in axes {
            if axis >= self.rank() {
                anyhow::bail!("Invalid axis {} for rank {}", axis, self.rank());
            }
            if seen[axis] {
                anyhow::bail!("Duplicate axis {} in permutation", axis);
            }
            seen[axis] = true;
        }
        let permuted = self.data.clone().permuted_axes(IxDyn(axes));
        Ok(Self { data: permuted })
    }
}
