//! Reductions and elementwise arithmetic used for error measurement

use super::types::DenseND;
use scirs2_core::numeric::{Float, Num};
use std::ops::Sub;

impl<T> DenseND<T>
where
    T: Clone + Num,
{
    /// Frobenius norm: square root of the sum of squared entries.
    ///
    /// ```
    /// use ttensor_core::DenseND;
    ///
    /// let t = DenseND::<f64>::from_vec(vec![3.0, 4.0], &[2]).unwrap();
    /// assert_eq!(t.frobenius_norm(), 5.0);
    /// ```
    pub fn frobenius_norm(&self) -> T
    where
        T: Float,
    {
        self.data.iter().map(|&x| x * x).fold(T::zero(), |acc, v| acc + v).sqrt()
    }

    /// Sum of elementwise products of two tensors of equal shape.
    ///
    /// # Errors
    ///
    /// Fails when the shapes differ.
    pub fn flat_inner(&self, other: &Self) -> anyhow::Result<T> {
        if !self.same_shape(other) {
            anyhow::bail!(
                "Shape mismatch in flat inner product: {:?} vs {:?}",
                self.shape(),
                other.shape()
            );
        }
        Ok(self
            .data
            .iter()
            .zip(other.data.iter())
            .fold(T::zero(), |acc, (a, b)| acc + a.clone() * b.clone()))
    }

    /// Largest absolute elementwise difference, or `None` on shape mismatch.
    pub fn max_abs_diff(&self, other: &Self) -> Option<T>
    where
        T: Float,
    {
        if !self.same_shape(other) {
            return None;
        }
        Some(
            self.data
                .iter()
                .zip(other.data.iter())
                .map(|(&a, &b)| (a - b).abs())
                .fold(T::zero(), T::max),
        )
    }
}

impl<'a, T> Sub<&'a DenseND<T>> for &'a DenseND<T>
where
    T: Clone + Num,
{
    type Output = DenseND<T>;

    /// Elementwise difference.
    ///
    /// # Panics
    ///
    /// Panics when the shapes differ.
    fn sub(self, rhs: &'a DenseND<T>) -> DenseND<T> {
        assert_eq!(
            self.shape(),
            rhs.shape(),
            "Shape mismatch in tensor subtraction"
        );
        DenseND::from_array(&self.data - &rhs.data)
    }
}
