use log::debug;

use crate::dynmatrix::DynMatrix;
use crate::error::{MatrixError, Result};
use crate::traits::{FloatScalar, MatrixRef};

/// Nullspace basis read off a reduced row echelon form.
///
/// `rref` must be in reduced row echelon form with pivot columns `pivots`.
/// Returns a `c × (c − r)` matrix, one column per free (pivot-less) column
/// `f` in ascending order: coordinate `f` is one, the coordinate of the
/// `i`-th pivot column is `−rref[i][f]`, and every other free coordinate is
/// zero. Full column rank gives a `c × 0` matrix.
///
/// Fails with [`MatrixError::IndexOutOfBounds`] if there are more pivots
/// than rows or a pivot column lies outside the matrix.
pub fn nullspace_from_rref<T: FloatScalar>(
    rref: &impl MatrixRef<T>,
    pivots: &[usize],
) -> Result<DynMatrix<T>> {
    for (i, &p) in pivots.iter().enumerate() {
        if i >= rref.nrows() || p >= rref.ncols() {
            return Err(MatrixError::IndexOutOfBounds {
                row: i,
                col: p,
                nrows: rref.nrows(),
                ncols: rref.ncols(),
            });
        }
    }
    Ok(basis(rref, pivots))
}

/// Basis construction for pivots already known to be in range.
pub(crate) fn basis<T: FloatScalar>(rref: &impl MatrixRef<T>, pivots: &[usize]) -> DynMatrix<T> {
    let n = rref.ncols();
    let mut is_pivot = vec![false; n];
    for &p in pivots {
        is_pivot[p] = true;
    }
    let free: Vec<usize> = (0..n).filter(|&j| !is_pivot[j]).collect();
    debug!(
        "nullspace: {} columns, rank {}, {} free",
        n,
        pivots.len(),
        free.len()
    );

    let mut basis = DynMatrix::zeros(n, free.len());
    for (k, &f) in free.iter().enumerate() {
        basis[(f, k)] = T::one();
        for (i, &p) in pivots.iter().enumerate() {
            basis[(p, k)] = -*rref.get(i, f);
        }
    }
    basis
}
