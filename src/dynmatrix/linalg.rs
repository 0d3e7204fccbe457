use log::debug;

use crate::error::{MatrixError, Result};
use crate::linalg::{
    is_row_echelon, is_rref, nullspace, particular_from_rref, reduce_in_place,
    row_echelon_in_place, rref_in_place, EliminationSettings,
};
use crate::traits::FloatScalar;

use super::DynMatrix;

// ── Echelon ─────────────────────────────────────────────────────────

/// Echelon form of a matrix together with its pivot structure.
///
/// Built from a copy of the input, which is never modified.
///
/// # Example
///
/// ```
/// use echelon::{DynMatrix, Echelon};
///
/// let a = DynMatrix::from_rows(2, 3, &[1.0_f64, 2.0, 3.0, 2.0, 4.0, 7.0]);
/// let e = Echelon::new(&a);
/// assert_eq!(e.rank(), 2);
/// assert_eq!(e.pivots(), &[0, 2]);
/// assert_eq!(e.free_columns(), vec![1]);
/// assert_eq!(e.matrix().row_slice(0), &[1.0, 2.0, 0.0]);
/// ```
#[derive(Debug, Clone)]
pub struct Echelon<T> {
    matrix: DynMatrix<T>,
    pivots: Vec<usize>,
    reduced: bool,
    settings: EliminationSettings<T>,
}

impl<T: FloatScalar> Echelon<T> {
    /// Reduced row echelon form with default settings.
    pub fn new(a: &DynMatrix<T>) -> Self {
        Self::reduced(a, &EliminationSettings::default())
    }

    /// Row echelon form (forward elimination only).
    pub fn row_echelon(a: &DynMatrix<T>, settings: &EliminationSettings<T>) -> Self {
        let mut matrix = a.clone();
        let pivots = row_echelon_in_place(&mut matrix, settings);
        Self {
            matrix,
            pivots,
            reduced: false,
            settings: *settings,
        }
    }

    /// Reduced row echelon form.
    pub fn reduced(a: &DynMatrix<T>, settings: &EliminationSettings<T>) -> Self {
        let mut matrix = a.clone();
        let pivots = rref_in_place(&mut matrix, settings);
        Self {
            matrix,
            pivots,
            reduced: true,
            settings: *settings,
        }
    }

    /// The echelon-form matrix.
    #[inline]
    pub fn matrix(&self) -> &DynMatrix<T> {
        &self.matrix
    }

    /// Number of pivot rows.
    #[inline]
    pub fn rank(&self) -> usize {
        self.pivots.len()
    }

    /// Pivot column of each pivot row, strictly increasing.
    #[inline]
    pub fn pivots(&self) -> &[usize] {
        &self.pivots
    }

    /// Whether this is the reduced form.
    #[inline]
    pub fn is_reduced(&self) -> bool {
        self.reduced
    }

    /// Columns without a pivot, ascending. There are `ncols - rank` of them.
    pub fn free_columns(&self) -> Vec<usize> {
        let mut next = self.pivots.iter().peekable();
        (0..self.matrix.ncols())
            .filter(|&j| {
                if next.peek() == Some(&&j) {
                    next.next();
                    false
                } else {
                    true
                }
            })
            .collect()
    }

    /// Convert a row echelon form to the reduced form.
    pub fn into_reduced(mut self) -> Self {
        if !self.reduced {
            reduce_in_place(&mut self.matrix, &self.settings, &self.pivots);
            self.reduced = true;
        }
        self
    }

    /// Nullspace basis as the columns of a `ncols × (ncols − rank)` matrix.
    pub fn nullspace(&self) -> DynMatrix<T> {
        if self.reduced {
            nullspace::basis(&self.matrix, &self.pivots)
        } else {
            let reduced = self.clone().into_reduced();
            nullspace::basis(&reduced.matrix, &reduced.pivots)
        }
    }

    /// The echelon matrix and its rank.
    pub fn into_parts(self) -> (DynMatrix<T>, usize) {
        let rank = self.pivots.len();
        (self.matrix, rank)
    }
}

// ── Convenience methods ─────────────────────────────────────────────

impl<T: FloatScalar> DynMatrix<T> {
    /// Row echelon form and rank, with default settings.
    ///
    /// ```
    /// use echelon::DynMatrix;
    /// let a = DynMatrix::from_rows(2, 2, &[2.0_f64, 4.0, 1.0, 2.0]);
    /// let (r, rank) = a.row_echelon();
    /// assert_eq!(rank, 1);
    /// assert_eq!(r.row_slice(1), &[0.0, 0.0]);
    /// ```
    pub fn row_echelon(&self) -> (Self, usize) {
        self.row_echelon_with(&EliminationSettings::default())
    }

    /// Row echelon form and rank.
    pub fn row_echelon_with(&self, settings: &EliminationSettings<T>) -> (Self, usize) {
        Echelon::row_echelon(self, settings).into_parts()
    }

    /// Reduced row echelon form and rank, with default settings.
    ///
    /// ```
    /// use echelon::DynMatrix;
    /// let a = DynMatrix::from_rows(2, 2, &[2.0_f64, 4.0, 1.0, 3.0]);
    /// let (r, rank) = a.rref();
    /// assert_eq!(rank, 2);
    /// assert_eq!(r, DynMatrix::identity(2).unwrap());
    /// ```
    pub fn rref(&self) -> (Self, usize) {
        self.rref_with(&EliminationSettings::default())
    }

    /// Reduced row echelon form and rank.
    pub fn rref_with(&self, settings: &EliminationSettings<T>) -> (Self, usize) {
        Echelon::reduced(self, settings).into_parts()
    }

    /// Rank, with default settings.
    pub fn rank(&self) -> usize {
        self.rank_with(&EliminationSettings::default())
    }

    /// Rank.
    pub fn rank_with(&self, settings: &EliminationSettings<T>) -> usize {
        Echelon::row_echelon(self, settings).rank()
    }

    /// Nullspace basis, one basis vector per column, with default settings.
    ///
    /// ```
    /// use echelon::DynMatrix;
    /// let a = DynMatrix::from_rows(1, 2, &[1.0_f64, 1.0]);
    /// let n = a.nullspace();
    /// assert_eq!(n.shape(), (2, 1));
    /// assert_eq!(n.as_slice(), &[-1.0, 1.0]);
    /// ```
    pub fn nullspace(&self) -> Self {
        self.nullspace_with(&EliminationSettings::default())
    }

    /// Nullspace basis, one basis vector per column.
    ///
    /// The result is `ncols × (ncols − rank)`; it has zero columns when the
    /// matrix has full column rank.
    pub fn nullspace_with(&self, settings: &EliminationSettings<T>) -> Self {
        Echelon::reduced(self, settings).nullspace()
    }

    /// One particular solution of `self · x = b`, with default settings.
    ///
    /// `b` has one column per right-hand side; the result has the same
    /// number of columns. Free variables are set to zero.
    ///
    /// ```
    /// use echelon::DynMatrix;
    /// let a = DynMatrix::from_rows(2, 2, &[1.0_f64, 2.0, 3.0, 4.0]);
    /// let b = DynMatrix::column_vector(&[5.0, 6.0]);
    /// let x = a.special_solution(&b).unwrap();
    /// assert!((x[(0, 0)] + 4.0).abs() < 1e-12);
    /// assert!((x[(1, 0)] - 4.5).abs() < 1e-12);
    /// ```
    pub fn special_solution(&self, b: &Self) -> Result<Self> {
        self.special_solution_with(b, &EliminationSettings::default())
    }

    /// One particular solution of `self · x = b`.
    ///
    /// Fails with [`MatrixError::DimensionMismatch`] if `b` does not have
    /// `self.nrows()` rows and with [`MatrixError::NoSolution`] if the system
    /// is inconsistent.
    pub fn special_solution_with(
        &self,
        b: &Self,
        settings: &EliminationSettings<T>,
    ) -> Result<Self> {
        if b.nrows() != self.nrows() {
            return Err(MatrixError::DimensionMismatch {
                expected: (self.nrows(), b.ncols()),
                got: b.shape(),
            });
        }
        let aug = self.hstack(b)?;
        let reduced = Echelon::reduced(&aug, settings);
        particular_from_rref(reduced.matrix(), reduced.pivots(), self.ncols())
    }

    /// Particular solution and nullspace basis: every solution of
    /// `self · x = b` is `x_p + N · t` for some `t`.
    ///
    /// ```
    /// use echelon::DynMatrix;
    /// let a = DynMatrix::from_rows(1, 2, &[1.0_f64, 1.0]);
    /// let b = DynMatrix::column_vector(&[3.0]);
    /// let (xp, n) = a.general_solution(&b).unwrap();
    /// assert_eq!(xp.as_slice(), &[3.0, 0.0]);
    /// assert_eq!(n.as_slice(), &[-1.0, 1.0]);
    /// ```
    pub fn general_solution(&self, b: &Self) -> Result<(Self, Self)> {
        let settings = EliminationSettings::default();
        let particular = self.special_solution_with(b, &settings)?;
        Ok((particular, self.nullspace_with(&settings)))
    }

    /// Inverse via Gauss-Jordan elimination on `[A | I]`, with default settings.
    ///
    /// ```
    /// use echelon::DynMatrix;
    /// let a = DynMatrix::from_rows(2, 2, &[4.0_f64, 7.0, 2.0, 6.0]);
    /// let inv = a.inverse().unwrap();
    /// let id = &a * &inv;
    /// assert!(id.approx_eq(&DynMatrix::identity(2).unwrap(), 1e-12));
    /// ```
    pub fn inverse(&self) -> Result<Self> {
        self.inverse_with(&EliminationSettings::default())
    }

    /// Inverse via Gauss-Jordan elimination on `[A | I]`.
    ///
    /// Fails with [`MatrixError::DimensionMismatch`] for a non-square
    /// matrix and [`MatrixError::Singular`] when the rank is below the order.
    pub fn inverse_with(&self, settings: &EliminationSettings<T>) -> Result<Self> {
        let n = self.nrows();
        if !self.is_square() {
            return Err(MatrixError::DimensionMismatch {
                expected: (n, n),
                got: self.shape(),
            });
        }
        let eye = DynMatrix::from_fn(n, n, |i, j| if i == j { T::one() } else { T::zero() });
        let mut aug = self.hstack(&eye)?;
        let pivots = rref_in_place(&mut aug, settings);
        if pivots.iter().any(|&p| p >= n) {
            debug!("inverse: {}x{} matrix is singular", n, n);
            return Err(MatrixError::Singular);
        }
        Ok(DynMatrix::from_fn(n, n, |i, j| aug[(i, n + j)]))
    }

    /// Whether the matrix is in row echelon form, treating `|x| <= tol` as zero.
    pub fn is_row_echelon(&self, tol: T) -> bool {
        is_row_echelon(self, &EliminationSettings::with_tolerance(tol))
    }

    /// Whether the matrix is in reduced row echelon form, treating
    /// `|x| <= tol` as zero.
    pub fn is_rref(&self, tol: T) -> bool {
        is_rref(self, &EliminationSettings::with_tolerance(tol))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_is_not_mutated() {
        let a = DynMatrix::from_rows(2, 3, &[0.0_f64, 1.0, 2.0, 3.0, 4.0, 5.0]);
        let before = a.clone();
        let _ = a.row_echelon();
        let _ = a.rref();
        let _ = a.nullspace();
        let _ = a.special_solution(&DynMatrix::column_vector(&[1.0, 2.0]));
        assert_eq!(a, before);
    }

    #[test]
    fn row_echelon_scenario() {
        let a = DynMatrix::from_rows(2, 2, &[2.0_f64, 4.0, 1.0, 2.0]);
        let (r, rank) = a.row_echelon();
        assert_eq!(rank, 1);
        assert_eq!(r.row_slice(0), &[2.0, 4.0]);
        assert_eq!(r.row_slice(1), &[0.0, 0.0]);
    }

    #[test]
    fn echelon_free_columns() {
        let a = DynMatrix::from_rows(
            3,
            4,
            &[1.0_f64, 2.0, 2.0, 2.0, 2.0, 4.0, 6.0, 8.0, 3.0, 6.0, 8.0, 10.0],
        );
        let e = Echelon::row_echelon(&a, &EliminationSettings::default());
        assert!(!e.is_reduced());
        assert_eq!(e.pivots(), &[0, 2]);
        assert_eq!(e.free_columns(), vec![1, 3]);

        // Forward-only form still yields the reduced nullspace
        assert_eq!(e.nullspace(), a.nullspace());
        let reduced = e.into_reduced();
        assert!(reduced.is_reduced());
        assert!(reduced.matrix().is_rref(1e-12));
    }

    #[test]
    fn rank_of_wide_and_tall() {
        let wide = DynMatrix::from_rows(2, 4, &[1.0_f64, 2.0, 3.0, 4.0, 2.0, 4.0, 6.0, 8.0]);
        assert_eq!(wide.rank(), 1);
        assert_eq!(wide.transpose().rank(), 1);
        let tall = DynMatrix::from_rows(3, 2, &[1.0_f64, 0.0, 0.0, 1.0, 1.0, 1.0]);
        assert_eq!(tall.rank(), 2);
    }

    #[test]
    fn nullspace_full_rank_has_no_columns() {
        let a = DynMatrix::from_rows(2, 2, &[1.0_f64, 2.0, 3.0, 4.0]);
        assert_eq!(a.nullspace().shape(), (2, 0));
    }

    #[test]
    fn special_solution_inconsistent() {
        let a = DynMatrix::from_rows(2, 2, &[1.0_f64, 1.0, 1.0, 1.0]);
        let b = DynMatrix::column_vector(&[1.0, 2.0]);
        assert_eq!(
            a.special_solution(&b).unwrap_err(),
            MatrixError::NoSolution { row: 1 }
        );
    }

    #[test]
    fn special_solution_rhs_rows_mismatch() {
        let a = DynMatrix::from_rows(2, 2, &[1.0_f64, 0.0, 0.0, 1.0]);
        let b = DynMatrix::column_vector(&[1.0, 2.0, 3.0]);
        assert!(matches!(
            a.special_solution(&b),
            Err(MatrixError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn special_solution_free_variables_zero() {
        // x + 2y + 3z = 6 with y, z free
        let a = DynMatrix::from_rows(1, 3, &[1.0_f64, 2.0, 3.0]);
        let b = DynMatrix::column_vector(&[6.0]);
        let x = a.special_solution(&b).unwrap();
        assert_eq!(x.as_slice(), &[6.0, 0.0, 0.0]);
    }

    #[test]
    fn general_solution_spans_solutions() {
        let a = DynMatrix::from_rows(2, 3, &[1.0_f64, 1.0, 1.0, 0.0, 1.0, 2.0]);
        let b = DynMatrix::column_vector(&[6.0, 8.0]);
        let (xp, n) = a.general_solution(&b).unwrap();
        assert_eq!(n.ncols(), 1);
        for t in [-2.0, 0.5, 3.0] {
            let x = &xp + &(&n * t);
            assert!((&a * &x).approx_eq(&b, 1e-12));
        }
    }

    #[test]
    fn special_solution_below_tolerance_after_division() {
        let a = DynMatrix::from_rows(1, 1, &[1e6_f64]);
        let b = DynMatrix::column_vector(&[1e-4]);
        let x = a.special_solution(&b).unwrap();
        assert!((x[(0, 0)] - 1e-10).abs() < 1e-24);
        assert!((&a * &x).approx_eq(&b, 1e-18));
    }

    #[test]
    fn nullspace_with_dominant_pivot() {
        let a = DynMatrix::from_rows(1, 2, &[1e10_f64, 1.0]);
        let n = a.nullspace();
        assert_eq!(n.shape(), (2, 1));
        assert_eq!(n.as_slice(), &[-1e-10, 1.0]);
        assert!((&a * &n).is_zero(1e-12));
    }

    #[test]
    fn inverse_3x3() {
        let a = DynMatrix::from_rows(3, 3, &[1.0_f64, 2.0, 3.0, 0.0, 1.0, 4.0, 5.0, 6.0, 0.0]);
        let inv = a.inverse().unwrap();
        let expected =
            DynMatrix::from_rows(3, 3, &[-24.0, 18.0, 5.0, 20.0, -15.0, -4.0, -5.0, 4.0, 1.0]);
        assert!(inv.approx_eq(&expected, 1e-10), "{}", inv);
    }

    #[test]
    fn inverse_singular_and_nonsquare() {
        let singular = DynMatrix::from_rows(2, 2, &[1.0_f64, 2.0, 2.0, 4.0]);
        assert_eq!(singular.inverse().unwrap_err(), MatrixError::Singular);

        let rect = DynMatrix::<f64>::zeros(2, 3);
        assert!(matches!(
            rect.inverse(),
            Err(MatrixError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn inverse_empty() {
        let e = DynMatrix::<f64>::zeros(0, 0);
        assert_eq!(e.inverse().unwrap(), e);
    }
}
