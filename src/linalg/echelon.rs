use log::{debug, trace};

use crate::linalg::EliminationSettings;
use crate::traits::{FloatScalar, MatrixMut, MatrixRef};

/// `row[j] -= factor * pivot_row[j]` for `j >= col`, clamping negligible
/// results to exact zero. `a[row][col]` itself is set to zero.
fn eliminate_row<T: FloatScalar>(
    a: &mut impl MatrixMut<T>,
    settings: &EliminationSettings<T>,
    pivot_row: usize,
    row: usize,
    col: usize,
    factor: T,
) {
    *a.get_mut(row, col) = T::zero();
    for j in (col + 1)..a.ncols() {
        let v = *a.get(row, j) - factor * *a.get(pivot_row, j);
        *a.get_mut(row, j) = if settings.is_zero(v) { T::zero() } else { v };
    }
}

/// Forward Gaussian elimination in place.
///
/// Columns are scanned left to right. In each column the first row at or
/// below the current pivot row whose entry is not negligible becomes the
/// pivot (positional pivoting, not largest magnitude) and is swapped up;
/// the pivot column is then cleared in every row below. A column with no
/// usable entry contributes no pivot and leaves the pivot row where it is.
///
/// Returns the pivot column of each pivot row, so `pivots.len()` is the
/// rank and `pivots` is strictly increasing. Negligible entries are written
/// back as exact zeros, so rows `rank..` are exactly zero on return.
///
/// ```
/// use echelon::DynMatrix;
/// use echelon::linalg::{row_echelon_in_place, EliminationSettings};
///
/// let mut a = DynMatrix::from_rows(2, 2, &[2.0_f64, 4.0, 1.0, 2.0]);
/// let pivots = row_echelon_in_place(&mut a, &EliminationSettings::default());
/// assert_eq!(pivots, vec![0]);
/// assert_eq!(a.row_slice(1), &[0.0, 0.0]);
/// ```
pub fn row_echelon_in_place<T: FloatScalar>(
    a: &mut impl MatrixMut<T>,
    settings: &EliminationSettings<T>,
) -> Vec<usize> {
    let m = a.nrows();
    let n = a.ncols();
    let mut pivots = Vec::with_capacity(m.min(n));
    let mut pivot_row = 0;

    for col in 0..n {
        if pivot_row == m {
            break;
        }

        let found = (pivot_row..m).find(|&r| !settings.is_zero(*a.get(r, col)));
        let Some(r) = found else {
            // No pivot: flush round-off left in this column to zero
            for r in pivot_row..m {
                *a.get_mut(r, col) = T::zero();
            }
            continue;
        };

        if r != pivot_row {
            trace!("swap rows {} and {} for pivot in column {}", pivot_row, r, col);
            a.swap_rows(pivot_row, r);
        }

        let pivot = *a.get(pivot_row, col);
        trace!("pivot ({}, {}) = {:?}", pivot_row, col, pivot);
        for row in (pivot_row + 1)..m {
            let entry = *a.get(row, col);
            if entry == T::zero() {
                continue;
            }
            eliminate_row(a, settings, pivot_row, row, col, entry / pivot);
        }

        pivots.push(col);
        pivot_row += 1;
    }

    debug!("row echelon form of {}x{} matrix: rank {}", m, n, pivots.len());
    pivots
}

/// Reduce a row echelon form to reduced row echelon form in place.
///
/// `pivots` must be the pivot columns returned by [`row_echelon_in_place`]
/// for this matrix. Each pivot row is divided by its pivot so the pivot is
/// exactly one, and the pivot column is cleared in every other row.
/// Normalized entries are kept however small they get relative to the
/// tolerance, so a large pivot never erases the rest of its row.
pub fn reduce_in_place<T: FloatScalar>(
    a: &mut impl MatrixMut<T>,
    settings: &EliminationSettings<T>,
    pivots: &[usize],
) {
    let m = a.nrows();
    let n = a.ncols();

    for (i, &col) in pivots.iter().enumerate().rev() {
        let pivot = *a.get(i, col);
        *a.get_mut(i, col) = T::one();
        // Entries were already clamped in the row's own scale; the quotient
        // is not compared against the tolerance again.
        for j in (col + 1)..n {
            let v = *a.get(i, j);
            if v != T::zero() {
                *a.get_mut(i, j) = v / pivot;
            }
        }

        for row in (0..m).filter(|&r| r != i) {
            let factor = *a.get(row, col);
            if factor == T::zero() {
                continue;
            }
            eliminate_row(a, settings, i, row, col, factor);
        }
    }
}

/// Reduced row echelon form in place. Returns the pivot columns.
///
/// ```
/// use echelon::DynMatrix;
/// use echelon::linalg::{rref_in_place, EliminationSettings};
///
/// let mut a = DynMatrix::from_rows(2, 3, &[1.0_f64, 2.0, 3.0, 2.0, 4.0, 7.0]);
/// let pivots = rref_in_place(&mut a, &EliminationSettings::default());
/// assert_eq!(pivots, vec![0, 2]);
/// assert_eq!(a.as_slice(), &[1.0, 2.0, 0.0, 0.0, 0.0, 1.0]);
/// ```
pub fn rref_in_place<T: FloatScalar>(
    a: &mut impl MatrixMut<T>,
    settings: &EliminationSettings<T>,
) -> Vec<usize> {
    let pivots = row_echelon_in_place(a, settings);
    reduce_in_place(a, settings, &pivots);
    pivots
}

/// Leading-entry column of each non-negligible row, stopping at the first
/// negligible row.
///
/// For a matrix already in row echelon form this is its pivot list.
pub fn pivot_columns<T: FloatScalar>(
    a: &impl MatrixRef<T>,
    settings: &EliminationSettings<T>,
) -> Vec<usize> {
    let mut pivots = Vec::new();
    for i in 0..a.nrows() {
        match (0..a.ncols()).find(|&j| !settings.is_zero(*a.get(i, j))) {
            Some(j) => pivots.push(j),
            None => break,
        }
    }
    pivots
}

/// Whether `a` is in row echelon form: leading entries move strictly right
/// going down and all negligible rows come last.
pub fn is_row_echelon<T: FloatScalar>(
    a: &impl MatrixRef<T>,
    settings: &EliminationSettings<T>,
) -> bool {
    let mut last_lead: Option<usize> = None;
    let mut seen_zero_row = false;
    for i in 0..a.nrows() {
        match (0..a.ncols()).find(|&j| !settings.is_zero(*a.get(i, j))) {
            None => seen_zero_row = true,
            Some(lead) => {
                if seen_zero_row || last_lead.is_some_and(|prev| lead <= prev) {
                    return false;
                }
                last_lead = Some(lead);
            }
        }
    }
    true
}

/// Whether `a` is in reduced row echelon form: row echelon form, every pivot
/// equal to one, and every pivot the only non-negligible entry of its column.
pub fn is_rref<T: FloatScalar>(a: &impl MatrixRef<T>, settings: &EliminationSettings<T>) -> bool {
    if !is_row_echelon(a, settings) {
        return false;
    }
    for (i, col) in pivot_columns(a, settings).into_iter().enumerate() {
        if !settings.is_zero(*a.get(i, col) - T::one()) {
            return false;
        }
        if (0..a.nrows()).any(|r| r != i && !settings.is_zero(*a.get(r, col))) {
            return false;
        }
    }
    true
}
