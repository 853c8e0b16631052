//! Dense tensor type definition, constructors and accessors

use scirs2_core::ndarray_ext::{Array, ArrayView, Dimension, IxDyn};
use scirs2_core::numeric::Num;

/// Dense N-dimensional tensor backed by scirs2_core's ndarray
///
/// # Type Parameters
///
/// * `T` - The element type (typically `f32` or `f64`)
///
/// # Examples
///
/// ```
/// use ttensor_core::dense::DenseND;
///
/// let tensor = DenseND::<f64>::zeros(&[2, 3, 4]);
/// assert_eq!(tensor.shape(), &[2, 3, 4]);
/// assert_eq!(tensor.rank(), 3);
/// ```
#[derive(Clone)]
pub struct DenseND<T> {
    pub(crate) data: Array<T, IxDyn>,
}

impl<T> DenseND<T>
where
    T: Clone + Num,
{
    /// Wrap an existing dynamic-dimension array.
    ///
    /// ```
    /// use scirs2_core::ndarray_ext::Array;
    /// use ttensor_core::dense::DenseND;
    ///
    /// let arr = Array::<f64, _>::zeros(vec![2, 3]);
    /// let tensor = DenseND::from_array(arr);
    /// assert_eq!(tensor.shape(), &[2, 3]);
    /// ```
    pub fn from_array(array: Array<T, IxDyn>) -> Self {
        Self { data: array }
    }

    /// Create a tensor from row-major data.
    ///
    /// # Errors
    ///
    /// Fails when `vec.len()` differs from the product of `shape`.
    ///
    /// ```
    /// use ttensor_core::dense::DenseND;
    ///
    /// let tensor = DenseND::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
    /// assert_eq!(tensor[&[1, 0][..]], 4.0);
    /// ```
    pub fn from_vec(vec: Vec<T>, shape: &[usize]) -> anyhow::Result<Self> {
        let total: usize = shape.iter().product();
        if vec.len() != total {
            anyhow::bail!(
                "Shape {:?} requires {} elements, but got {}",
                shape,
                total,
                vec.len()
            );
        }
        let array = Array::from_shape_vec(IxDyn(shape), vec)?;
        Ok(Self { data: array })
    }

    /// Create a tensor by evaluating `f` at every multi-index.
    ///
    /// ```
    /// use ttensor_core::DenseND;
    ///
    /// let t = DenseND::<f64>::from_fn(&[2, 3], |idx| (idx[0] * 10 + idx[1]) as f64);
    /// assert_eq!(t[&[1, 2][..]], 12.0);
    /// ```
    pub fn from_fn<F>(shape: &[usize], mut f: F) -> Self
    where
        F: FnMut(&[usize]) -> T,
    {
        let data = Array::from_shape_fn(IxDyn(shape), |idx| f(idx.slice()));
        Self { data }
    }

    /// Create a tensor filled with `value`.
    pub fn from_elem(shape: &[usize], value: T) -> Self {
        Self {
            data: Array::from_elem(IxDyn(shape), value),
        }
    }

    /// Create a tensor of zeros.
    pub fn zeros(shape: &[usize]) -> Self {
        Self::from_elem(shape, T::zero())
    }

    /// Create a tensor of ones.
    pub fn ones(shape: &[usize]) -> Self {
        Self::from_elem(shape, T::one())
    }

    /// Number of dimensions.
    pub fn rank(&self) -> usize {
        self.data.ndim()
    }

    /// Shape of the tensor.
    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    /// Total number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the tensor holds no elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Whether the data is C-contiguous.
    ///
    /// ```
    /// use ttensor_core::DenseND;
    ///
    /// let tensor = DenseND::<f64>::zeros(&[2, 3, 4]);
    /// assert!(tensor.is_contiguous());
    /// assert!(!tensor.permute(&[2, 0, 1]).unwrap().is_contiguous());
    /// ```
    pub fn is_contiguous(&self) -> bool {
        self.data.is_standard_layout()
    }

    /// Borrow the underlying array.
    pub fn as_array(&self) -> &Array<T, IxDyn> {
        &self.data
    }

    /// Consume the tensor and return the underlying array.
    pub fn into_array(self) -> Array<T, IxDyn> {
        self.data
    }

    /// Immutable view of the data.
    pub fn view(&self) -> ArrayView<'_, T, IxDyn> {
        self.data.view()
    }

    /// Elements in logical row-major order.
    pub fn to_vec(&self) -> Vec<T> {
        self.data.iter().cloned().collect()
    }

    /// Iterate over elements in logical row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    /// Whether both tensors have the same shape.
    pub fn same_shape(&self, other: &Self) -> bool {
        self.shape() == other.shape()
    }
}
