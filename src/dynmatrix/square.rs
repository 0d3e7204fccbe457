use crate::error::{MatrixError, Result};
use crate::traits::Scalar;

use super::DynMatrix;

impl<T: Scalar> DynMatrix<T> {
    /// Create an `n x n` identity matrix.
    ///
    /// Fails with [`MatrixError::InvalidDimension`] if `n == 0`.
    ///
    /// ```
    /// use echelon::DynMatrix;
    /// let id = DynMatrix::<f64>::identity(3).unwrap();
    /// assert_eq!(id[(0, 0)], 1.0);
    /// assert_eq!(id[(0, 1)], 0.0);
    /// assert_eq!(id[(2, 2)], 1.0);
    /// ```
    pub fn identity(n: usize) -> Result<Self> {
        if n == 0 {
            return Err(MatrixError::InvalidDimension { rows: n, cols: n });
        }
        let mut m = Self::new(n, n)?;
        for i in 0..n {
            m[(i, i)] = T::one();
        }
        Ok(m)
    }

    /// Identity of order `n` with rows `r1` and `r2` exchanged.
    ///
    /// Left-multiplying an `n`-row matrix by this permutation swaps its rows
    /// `r1` and `r2`. Fails with [`MatrixError::InvalidDimension`] if
    /// `n == 0` and [`MatrixError::IndexOutOfBounds`] if either row is `>= n`.
    ///
    /// ```
    /// use echelon::DynMatrix;
    /// let p = DynMatrix::<f64>::row_exchange(3, 0, 2).unwrap();
    /// let a = DynMatrix::from_rows(3, 1, &[1.0, 2.0, 3.0]);
    /// assert_eq!((&p * &a).as_slice(), &[3.0, 2.0, 1.0]);
    /// ```
    pub fn row_exchange(n: usize, r1: usize, r2: usize) -> Result<Self> {
        let mut m = Self::identity(n)?;
        for r in [r1, r2] {
            if r >= n {
                return Err(MatrixError::IndexOutOfBounds {
                    row: r,
                    col: 0,
                    nrows: n,
                    ncols: n,
                });
            }
        }
        m.swap_rows(r1, r2);
        Ok(m)
    }

    /// Sum of diagonal elements.
    ///
    /// ```
    /// use echelon::DynMatrix;
    /// let m = DynMatrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
    /// assert_eq!(m.trace(), 5.0);
    /// ```
    pub fn trace(&self) -> T {
        let n = self.nrows.min(self.ncols);
        let mut sum = T::zero();
        for i in 0..n {
            sum = sum + self[(i, i)];
        }
        sum
    }
}

impl<T> DynMatrix<T> {
    /// Whether the matrix is square.
    #[inline]
    pub fn is_square(&self) -> bool {
        self.nrows == self.ncols
    }
}
