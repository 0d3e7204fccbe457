use crate::error::{MatrixError, Result};
use crate::traits::Scalar;

use super::{storage_len, DynMatrix};

impl<T> DynMatrix<T> {
    /// View the entire matrix as a flat slice in row-major order.
    ///
    /// ```
    /// use echelon::DynMatrix;
    /// let m = DynMatrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
    /// assert_eq!(m.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
    /// ```
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// View the entire matrix as a mutable flat slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// View row `i` as a slice.
    ///
    /// ```
    /// use echelon::DynMatrix;
    /// let m = DynMatrix::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    /// assert_eq!(m.row_slice(0), &[1.0, 2.0, 3.0]);
    /// assert_eq!(m.row_slice(1), &[4.0, 5.0, 6.0]);
    /// ```
    #[inline]
    pub fn row_slice(&self, i: usize) -> &[T] {
        assert!(i < self.nrows, "row {} out of bounds for {} rows", i, self.nrows);
        let start = i * self.ncols;
        &self.data[start..start + self.ncols]
    }

    /// View row `i` as a mutable slice.
    #[inline]
    pub fn row_slice_mut(&mut self, i: usize) -> &mut [T] {
        assert!(i < self.nrows, "row {} out of bounds for {} rows", i, self.nrows);
        let start = i * self.ncols;
        let end = start + self.ncols;
        &mut self.data[start..end]
    }

    /// Iterate over all elements in row-major order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Iterate mutably over all elements in row-major order.
    #[inline]
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.data.iter_mut()
    }

    /// Iterate over rows as slices.
    ///
    /// ```
    /// use echelon::DynMatrix;
    /// let m = DynMatrix::from_rows(2, 2, &[1, 2, 3, 4]);
    /// let sums: Vec<i32> = m.rows().map(|r| r.iter().sum()).collect();
    /// assert_eq!(sums, vec![3, 7]);
    /// ```
    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        (0..self.nrows).map(move |i| {
            let start = i * self.ncols;
            &self.data[start..start + self.ncols]
        })
    }
}

impl<T: Scalar> DynMatrix<T> {
    /// Extract column `j` as an `nrows x 1` matrix.
    ///
    /// ```
    /// use echelon::DynMatrix;
    /// let m = DynMatrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
    /// let c = m.column(1);
    /// assert_eq!(c.as_slice(), &[2.0, 4.0]);
    /// ```
    pub fn column(&self, j: usize) -> Self {
        assert!(j < self.ncols, "column {} out of bounds for {} columns", j, self.ncols);
        DynMatrix::from_fn(self.nrows, 1, |i, _| self.data[i * self.ncols + j])
    }

    /// Horizontal concatenation `[self | rhs]`.
    ///
    /// Fails with [`MatrixError::DimensionMismatch`] unless both operands
    /// have the same number of rows.
    ///
    /// ```
    /// use echelon::DynMatrix;
    /// let a = DynMatrix::from_rows(2, 1, &[1.0, 2.0]);
    /// let b = DynMatrix::from_rows(2, 1, &[3.0, 4.0]);
    /// let ab = a.hstack(&b).unwrap();
    /// assert_eq!(ab.as_slice(), &[1.0, 3.0, 2.0, 4.0]);
    /// ```
    pub fn hstack(&self, rhs: &Self) -> Result<Self> {
        if self.nrows != rhs.nrows {
            return Err(MatrixError::DimensionMismatch {
                expected: (self.nrows, rhs.ncols),
                got: (rhs.nrows, rhs.ncols),
            });
        }
        let ncols = self
            .ncols
            .checked_add(rhs.ncols)
            .ok_or(MatrixError::InvalidDimension {
                rows: self.nrows,
                cols: usize::MAX,
            })?;
        let mut data = Vec::with_capacity(storage_len(self.nrows, ncols)?);
        for i in 0..self.nrows {
            data.extend_from_slice(&self.data[i * self.ncols..(i + 1) * self.ncols]);
            data.extend_from_slice(&rhs.data[i * rhs.ncols..(i + 1) * rhs.ncols]);
        }
        Ok(DynMatrix {
            data,
            nrows: self.nrows,
            ncols,
        })
    }
}

impl<'a, T> IntoIterator for &'a DynMatrix<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut DynMatrix<T> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn as_mut_slice() {
        let mut m = DynMatrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        m.as_mut_slice()[0] = 99.0;
        assert_eq!(m[(0, 0)], 99.0);
    }

    #[test]
    fn row_slice_mut() {
        let mut m = DynMatrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        m.row_slice_mut(1)[0] = -3.0;
        assert_eq!(m[(1, 0)], -3.0);
    }

    #[test]
    fn into_iter_for_loop() {
        let m = DynMatrix::from_rows(2, 2, &[1, 2, 3, 4]);
        let mut sum = 0;
        for &x in &m {
            sum += x;
        }
        assert_eq!(sum, 10);
    }

    #[test]
    fn column_of_wide_matrix() {
        let m = DynMatrix::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let c = m.column(2);
        assert_eq!(c.shape(), (2, 1));
        assert_eq!(c.as_slice(), &[3.0, 6.0]);
    }

    #[test]
    fn hstack_mismatch() {
        let a = DynMatrix::<f64>::zeros(2, 2);
        let b = DynMatrix::<f64>::zeros(3, 1);
        assert!(matches!(
            a.hstack(&b),
            Err(MatrixError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn hstack_zero_width() {
        let a = DynMatrix::from_rows(2, 2, &[1, 2, 3, 4]);
        let empty = DynMatrix::<i32>::zeros(2, 0);
        assert_eq!(a.hstack(&empty).unwrap(), a);
    }
}
