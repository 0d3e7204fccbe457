use log::debug;

use crate::dynmatrix::DynMatrix;
use crate::error::{MatrixError, Result};
use crate::traits::{FloatScalar, MatrixRef};

/// One particular solution of `A·X = B` from the RREF of `[A | B]`.
///
/// `aug` is the reduced augmented matrix whose first `ncols_a` columns come
/// from `A`; `pivots` are its pivot columns. A pivot inside the `B` block
/// means some row reads `0 = nonzero`, reported as
/// [`MatrixError::NoSolution`] with that row. Otherwise each pivot row `i`
/// assigns `X[pivots[i]] = aug[i][ncols_a..]` and every free variable is zero.
///
/// Fails with [`MatrixError::DimensionMismatch`] if `ncols_a` exceeds the
/// width of `aug` and with [`MatrixError::IndexOutOfBounds`] if there are
/// more pivots than rows.
pub fn particular_from_rref<T: FloatScalar>(
    aug: &impl MatrixRef<T>,
    pivots: &[usize],
    ncols_a: usize,
) -> Result<DynMatrix<T>> {
    if ncols_a > aug.ncols() {
        return Err(MatrixError::DimensionMismatch {
            expected: (aug.nrows(), ncols_a),
            got: (aug.nrows(), aug.ncols()),
        });
    }
    if let Some(&col) = pivots.get(aug.nrows()) {
        return Err(MatrixError::IndexOutOfBounds {
            row: aug.nrows(),
            col,
            nrows: aug.nrows(),
            ncols: aug.ncols(),
        });
    }
    let k = aug.ncols() - ncols_a;

    if let Some(row) = pivots.iter().position(|&p| p >= ncols_a) {
        debug!(
            "inconsistent system: row {} has zero coefficients but rhs column {}",
            row,
            pivots[row] - ncols_a
        );
        return Err(MatrixError::NoSolution { row });
    }

    let mut x = DynMatrix::zeros(ncols_a, k);
    for (i, &p) in pivots.iter().enumerate() {
        for c in 0..k {
            x[(p, c)] = *aug.get(i, ncols_a + c);
        }
    }
    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_pivot_rows() {
        // x1 + 2x2 = 3, x3 = 4
        let aug = DynMatrix::from_rows(2, 4, &[1.0_f64, 2.0, 0.0, 3.0, 0.0, 0.0, 1.0, 4.0]);
        let x = particular_from_rref(&aug, &[0, 2], 3).unwrap();
        assert_eq!(x.as_slice(), &[3.0, 0.0, 4.0]);
    }

    #[test]
    fn pivot_in_rhs_is_inconsistent() {
        let aug = DynMatrix::from_rows(2, 3, &[1.0_f64, 1.0, 0.0, 0.0, 0.0, 1.0]);
        assert_eq!(
            particular_from_rref(&aug, &[0, 2], 2).unwrap_err(),
            MatrixError::NoSolution { row: 1 }
        );
    }

    #[test]
    fn several_right_hand_sides() {
        let aug = DynMatrix::from_rows(2, 4, &[1.0_f64, 0.0, 5.0, 7.0, 0.0, 1.0, 6.0, 8.0]);
        let x = particular_from_rref(&aug, &[0, 1], 2).unwrap();
        assert_eq!(x.shape(), (2, 2));
        assert_eq!(x.as_slice(), &[5.0, 7.0, 6.0, 8.0]);
    }

    #[test]
    fn malformed_inputs_are_errors() {
        let aug = DynMatrix::from_rows(1, 2, &[1.0_f64, 3.0]);
        assert_eq!(
            particular_from_rref(&aug, &[0], 3).unwrap_err(),
            MatrixError::DimensionMismatch {
                expected: (1, 3),
                got: (1, 2)
            }
        );
        assert!(matches!(
            particular_from_rref(&aug, &[0, 1], 1),
            Err(MatrixError::IndexOutOfBounds { row: 1, .. })
        ));
    }
}
