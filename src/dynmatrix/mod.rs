mod linalg;
mod ops;
mod parse;
mod slice;
mod square;
mod util;

pub use linalg::Echelon;

use std::ops::{Index, IndexMut};

use crate::error::{MatrixError, Result};
use crate::traits::{MatrixMut, MatrixRef, Scalar};

/// Dynamically-sized heap-allocated matrix.
///
/// Row-major `Vec<T>` storage whose length is always exactly
/// `nrows * ncols`. Dimensions are set at runtime and may be zero.
/// Implements [`MatrixRef`] and [`MatrixMut`], so the generic elimination
/// free functions in [`linalg`](crate::linalg) work with `DynMatrix` directly.
///
/// `Clone` is a deep copy: the clone owns its own storage.
///
/// # Examples
///
/// ```
/// use echelon::DynMatrix;
///
/// let a = DynMatrix::from_rows(2, 2, &[1.0_f64, 2.0, 3.0, 4.0]);
/// assert_eq!(a[(0, 1)], 2.0);
/// assert_eq!(a.nrows(), 2);
/// assert_eq!(a.ncols(), 2);
///
/// let b = DynMatrix::<f64>::identity(3).unwrap();
/// assert_eq!(b[(0, 0)], 1.0);
/// assert_eq!(b[(0, 1)], 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DynMatrix<T> {
    data: Vec<T>,
    nrows: usize,
    ncols: usize,
}

/// Storage length for an `nrows x ncols` matrix, or `InvalidDimension` on overflow.
fn storage_len(nrows: usize, ncols: usize) -> Result<usize> {
    nrows.checked_mul(ncols).ok_or(MatrixError::InvalidDimension {
        rows: nrows,
        cols: ncols,
    })
}

/// [`storage_len`] for the infallible constructors, which panic on overflow.
fn storage_len_or_panic(nrows: usize, ncols: usize) -> usize {
    match storage_len(nrows, ncols) {
        Ok(len) => len,
        Err(e) => panic!("{}", e),
    }
}

// ── Constructors ────────────────────────────────────────────────────

impl<T: Scalar> DynMatrix<T> {
    /// Create a zero-filled `nrows x ncols` matrix.
    ///
    /// Fails with [`MatrixError::InvalidDimension`] if `nrows * ncols`
    /// does not fit in `usize`.
    ///
    /// ```
    /// use echelon::DynMatrix;
    /// let m = DynMatrix::<f64>::new(2, 3).unwrap();
    /// assert_eq!(m.nrows(), 2);
    /// assert_eq!(m.ncols(), 3);
    /// assert_eq!(m[(1, 2)], 0.0);
    /// ```
    pub fn new(nrows: usize, ncols: usize) -> Result<Self> {
        let len = storage_len(nrows, ncols)?;
        Ok(Self {
            data: vec![T::zero(); len],
            nrows,
            ncols,
        })
    }

    /// Create a zero-filled `nrows x ncols` matrix.
    ///
    /// Infallible counterpart of [`new`](Self::new); panics on size overflow.
    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        Self::fill(nrows, ncols, T::zero())
    }

    /// Create a matrix filled with a given value. Panics on size overflow.
    ///
    /// ```
    /// use echelon::DynMatrix;
    /// let m = DynMatrix::fill(2, 3, 7.0_f64);
    /// assert_eq!(m[(0, 0)], 7.0);
    /// assert_eq!(m[(1, 2)], 7.0);
    /// ```
    pub fn fill(nrows: usize, ncols: usize, value: T) -> Self {
        Self {
            data: vec![value; storage_len_or_panic(nrows, ncols)],
            nrows,
            ncols,
        }
    }

    /// Create a matrix from a flat slice in row-major order.
    ///
    /// Panics if `row_major.len() != nrows * ncols`.
    ///
    /// ```
    /// use echelon::DynMatrix;
    /// let m = DynMatrix::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    /// assert_eq!(m[(0, 2)], 3.0);
    /// assert_eq!(m[(1, 0)], 4.0);
    /// ```
    pub fn from_rows(nrows: usize, ncols: usize, row_major: &[T]) -> Self {
        assert_eq!(
            row_major.len(),
            storage_len_or_panic(nrows, ncols),
            "slice length {} does not match {}x{} matrix",
            row_major.len(),
            nrows,
            ncols,
        );
        Self {
            data: row_major.to_vec(),
            nrows,
            ncols,
        }
    }

    /// Create a matrix from an owned `Vec<T>` in row-major order.
    ///
    /// Fails with [`MatrixError::DimensionMismatch`] if the length does not
    /// match `nrows * ncols`.
    ///
    /// ```
    /// use echelon::DynMatrix;
    /// let m = DynMatrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    /// assert_eq!(m[(1, 0)], 3.0);
    /// assert!(DynMatrix::from_vec(2, 2, vec![1.0]).is_err());
    /// ```
    pub fn from_vec(nrows: usize, ncols: usize, data: Vec<T>) -> Result<Self> {
        let len = storage_len(nrows, ncols)?;
        if data.len() != len {
            return Err(MatrixError::DimensionMismatch {
                expected: (nrows, ncols),
                got: (1, data.len()),
            });
        }
        Ok(Self { data, nrows, ncols })
    }

    /// Build a `n x 1` column matrix.
    ///
    /// ```
    /// use echelon::DynMatrix;
    /// let b = DynMatrix::column_vector(&[5.0, 6.0]);
    /// assert_eq!(b.nrows(), 2);
    /// assert_eq!(b.ncols(), 1);
    /// ```
    pub fn column_vector(values: &[T]) -> Self {
        Self::from_rows(values.len(), 1, values)
    }

    /// Read one element, failing on an out-of-range index.
    ///
    /// ```
    /// use echelon::DynMatrix;
    /// let m = DynMatrix::from_rows(1, 2, &[1.0, 2.0]);
    /// assert_eq!(m.try_get(0, 1).unwrap(), 2.0);
    /// assert!(m.try_get(1, 0).is_err());
    /// ```
    pub fn try_get(&self, row: usize, col: usize) -> Result<T> {
        self.check_index(row, col)?;
        Ok(self.data[row * self.ncols + col])
    }

    /// Write one element, failing on an out-of-range index.
    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        self.check_index(row, col)?;
        self.data[row * self.ncols + col] = value;
        Ok(())
    }

    /// Change the dimensions in place.
    ///
    /// Values whose `(row, col)` is still in range are preserved; new cells
    /// are zero. A fresh buffer is allocated and the overlapping block copied.
    ///
    /// ```
    /// use echelon::DynMatrix;
    /// let mut m = DynMatrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
    /// m.resize(3, 1).unwrap();
    /// assert_eq!(m.as_slice(), &[1.0, 3.0, 0.0]);
    /// ```
    pub fn resize(&mut self, nrows: usize, ncols: usize) -> Result<()> {
        let len = storage_len(nrows, ncols)?;
        let mut data = vec![T::zero(); len];
        let keep_rows = self.nrows.min(nrows);
        let keep_cols = self.ncols.min(ncols);
        for i in 0..keep_rows {
            let src = i * self.ncols;
            let dst = i * ncols;
            data[dst..dst + keep_cols].copy_from_slice(&self.data[src..src + keep_cols]);
        }
        self.data = data;
        self.nrows = nrows;
        self.ncols = ncols;
        Ok(())
    }
}

impl<T> DynMatrix<T> {
    /// Number of rows.
    #[inline]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Number of columns.
    #[inline]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// `(nrows, ncols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    /// Create a matrix by calling `f(row, col)` for each element.
    /// Panics on size overflow.
    ///
    /// ```
    /// use echelon::DynMatrix;
    /// let m = DynMatrix::from_fn(3, 3, |i, j| if i == j { 1.0_f64 } else { 0.0 });
    /// assert_eq!(m[(0, 0)], 1.0);
    /// assert_eq!(m[(0, 1)], 0.0);
    /// ```
    pub fn from_fn(nrows: usize, ncols: usize, f: impl Fn(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(storage_len_or_panic(nrows, ncols));
        for i in 0..nrows {
            for j in 0..ncols {
                data.push(f(i, j));
            }
        }
        Self { data, nrows, ncols }
    }

    fn check_index(&self, row: usize, col: usize) -> Result<()> {
        if row >= self.nrows || col >= self.ncols {
            return Err(MatrixError::IndexOutOfBounds {
                row,
                col,
                nrows: self.nrows,
                ncols: self.ncols,
            });
        }
        Ok(())
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.nrows && col < self.ncols,
            "index ({}, {}) out of bounds for {}x{} matrix",
            row,
            col,
            self.nrows,
            self.ncols,
        );
        row * self.ncols + col
    }
}

// ── MatrixRef / MatrixMut ───────────────────────────────────────────

impl<T> MatrixRef<T> for DynMatrix<T> {
    #[inline]
    fn nrows(&self) -> usize {
        self.nrows
    }

    #[inline]
    fn ncols(&self) -> usize {
        self.ncols
    }

    #[inline]
    fn get(&self, row: usize, col: usize) -> &T {
        &self.data[self.offset(row, col)]
    }
}

impl<T> MatrixMut<T> for DynMatrix<T> {
    #[inline]
    fn get_mut(&mut self, row: usize, col: usize) -> &mut T {
        let k = self.offset(row, col);
        &mut self.data[k]
    }

    fn swap_rows(&mut self, a: usize, b: usize)
    where
        T: Copy,
    {
        DynMatrix::swap_rows(self, a, b);
    }
}

// ── Index ───────────────────────────────────────────────────────────

impl<T> Index<(usize, usize)> for DynMatrix<T> {
    type Output = T;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &T {
        &self.data[self.offset(row, col)]
    }
}

impl<T> IndexMut<(usize, usize)> for DynMatrix<T> {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        let k = self.offset(row, col);
        &mut self.data[k]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_zero_filled() {
        let m = DynMatrix::<f64>::new(3, 4).unwrap();
        assert_eq!(m.nrows(), 3);
        assert_eq!(m.ncols(), 4);
        for i in 0..3 {
            for j in 0..4 {
                assert_eq!(m[(i, j)], 0.0);
            }
        }
    }

    #[test]
    fn new_empty() {
        let m = DynMatrix::<f64>::new(0, 5).unwrap();
        assert_eq!(m.shape(), (0, 5));
        assert!(m.as_slice().is_empty());
    }

    #[test]
    fn new_overflow() {
        let err = DynMatrix::<u8>::new(usize::MAX, 2).unwrap_err();
        assert_eq!(
            err,
            MatrixError::InvalidDimension {
                rows: usize::MAX,
                cols: 2
            }
        );
    }

    #[test]
    #[should_panic(expected = "invalid dimension")]
    fn zeros_overflow_panics() {
        let _ = DynMatrix::<u8>::zeros(usize::MAX, 2);
    }

    #[test]
    #[should_panic(expected = "invalid dimension")]
    fn from_fn_overflow_panics() {
        let _ = DynMatrix::from_fn(2, usize::MAX, |_, _| 0u8);
    }

    #[test]
    fn fill() {
        let m = DynMatrix::fill(2, 3, 7.0_f64);
        for i in 0..2 {
            for j in 0..3 {
                assert_eq!(m[(i, j)], 7.0);
            }
        }
    }

    #[test]
    fn from_rows() {
        let m = DynMatrix::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(m[(0, 0)], 1.0);
        assert_eq!(m[(0, 2)], 3.0);
        assert_eq!(m[(1, 0)], 4.0);
        assert_eq!(m[(1, 2)], 6.0);
    }

    #[test]
    #[should_panic(expected = "slice length")]
    fn from_rows_wrong_length() {
        let _ = DynMatrix::from_rows(2, 2, &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn from_fn() {
        let m = DynMatrix::from_fn(3, 3, |i, j| (i * 3 + j) as f64);
        assert_eq!(m[(0, 0)], 0.0);
        assert_eq!(m[(1, 1)], 4.0);
        assert_eq!(m[(2, 2)], 8.0);
    }

    #[test]
    fn get_set_checked() {
        let mut m = DynMatrix::<i32>::new(2, 2).unwrap();
        m.set(1, 0, 9).unwrap();
        assert_eq!(m.try_get(1, 0).unwrap(), 9);
        assert_eq!(
            m.set(0, 2, 1).unwrap_err(),
            MatrixError::IndexOutOfBounds {
                row: 0,
                col: 2,
                nrows: 2,
                ncols: 2
            }
        );
        assert!(m.try_get(2, 0).is_err());
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn index_column_overrun_panics() {
        // (0, 3) would alias (1, 0) in flat storage
        let m = DynMatrix::from_rows(2, 3, &[0.0; 6]);
        let _ = m[(0, 3)];
    }

    #[test]
    fn resize_grow_preserves_overlap() {
        let mut m = DynMatrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        m.resize(3, 3).unwrap();
        assert_eq!(m.shape(), (3, 3));
        assert_eq!(
            m.as_slice(),
            &[1.0, 2.0, 0.0, 3.0, 4.0, 0.0, 0.0, 0.0, 0.0]
        );
    }

    #[test]
    fn resize_shrink() {
        let mut m = DynMatrix::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        m.resize(1, 2).unwrap();
        assert_eq!(m.as_slice(), &[1.0, 2.0]);
        m.resize(0, 0).unwrap();
        assert_eq!(m.shape(), (0, 0));
    }

    #[test]
    fn clone_is_deep() {
        let a = DynMatrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let mut b = a.clone();
        b[(0, 0)] = 100.0;
        assert_eq!(a[(0, 0)], 1.0);
        assert_ne!(a, b);
    }

    #[test]
    fn matrix_ref_trait() {
        let m = DynMatrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        fn trace<T: Scalar>(m: &impl MatrixRef<T>) -> T {
            let mut sum = T::zero();
            let n = m.nrows().min(m.ncols());
            for i in 0..n {
                sum = sum + *m.get(i, i);
            }
            sum
        }
        assert_eq!(trace(&m), 5.0);
    }

    #[test]
    fn matrix_mut_trait_swap() {
        let mut m = DynMatrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        fn swap_via_trait<T: Scalar>(m: &mut impl MatrixMut<T>) {
            m.swap_rows(0, 1);
        }
        swap_via_trait(&mut m);
        assert_eq!(m.as_slice(), &[3.0, 4.0, 1.0, 2.0]);
    }
}
