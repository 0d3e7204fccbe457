//! Gaussian elimination engine.
//!
//! Free functions operate in place on `&mut impl MatrixMut<T>` so they work
//! with any storage; [`DynMatrix`](crate::DynMatrix) wraps them in
//! non-mutating convenience methods (`row_echelon`, `rref`, `rank`,
//! `nullspace`, `special_solution`, `inverse`) that copy their input first.
//!
//! | Function | Result |
//! |----------|--------|
//! | [`row_echelon_in_place`] | forward elimination, returns pivot columns |
//! | [`reduce_in_place`] | back elimination of an echelon form to RREF |
//! | [`rref_in_place`] | both passes |
//! | [`nullspace_from_rref`] | `c × (c − r)` basis matrix |
//! | [`particular_from_rref`] | one solution of `A·x = b` from RREF of `[A | b]` |
//!
//! Every zero test uses the same absolute tolerance, carried by
//! [`EliminationSettings`].

pub(crate) mod echelon;
pub(crate) mod nullspace;
pub(crate) mod solve;

pub use echelon::{
    is_rref, is_row_echelon, pivot_columns, reduce_in_place, row_echelon_in_place, rref_in_place,
};
pub use nullspace::nullspace_from_rref;
pub use solve::particular_from_rref;

use crate::traits::FloatScalar;

/// Default zero tolerance for `f64` elimination.
///
/// Entries with `|x| <= 1e-9` are treated as zero. This absorbs the round-off
/// of a few hundred `f64` operations on entries of order one (about `1e7`
/// machine epsilons) while staying far below the magnitude of any entry a
/// caller would consider significant. Inputs with much larger or smaller
/// typical magnitudes should scale the tolerance through
/// [`EliminationSettings`].
pub const DEFAULT_PIVOT_TOL_F64: f64 = 1e-9;

/// Default zero tolerance for `f32` elimination (about `80` machine epsilons).
pub const DEFAULT_PIVOT_TOL_F32: f32 = 1e-5;

/// Settings for the elimination engine.
///
/// ```
/// use echelon::{DynMatrix, EliminationSettings};
///
/// let a = DynMatrix::from_rows(2, 2, &[1.0_f64, 1.0, 1.0, 1.0 + 1e-7]);
/// assert_eq!(a.rank(), 2);
///
/// let loose = EliminationSettings { pivot_tol: 1e-6, ..Default::default() };
/// assert_eq!(a.rank_with(&loose), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EliminationSettings<T> {
    /// Absolute zero threshold: `|x| <= pivot_tol` counts as zero in pivot
    /// search, post-elimination clamping and the consistency check
    /// (default: [`DEFAULT_PIVOT_TOL_F64`] / [`DEFAULT_PIVOT_TOL_F32`]).
    pub pivot_tol: T,
}

impl<T: FloatScalar> Default for EliminationSettings<T> {
    fn default() -> Self {
        Self {
            pivot_tol: T::default_pivot_tol(),
        }
    }
}

impl<T: FloatScalar> EliminationSettings<T> {
    /// Settings with an explicit tolerance.
    pub fn with_tolerance(pivot_tol: T) -> Self {
        Self { pivot_tol }
    }

    #[inline]
    pub(crate) fn is_zero(&self, x: T) -> bool {
        x.abs() <= self.pivot_tol
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_per_precision() {
        assert_eq!(EliminationSettings::<f64>::default().pivot_tol, 1e-9);
        assert_eq!(EliminationSettings::<f32>::default().pivot_tol, 1e-5);
    }

    #[test]
    fn zero_test_is_inclusive() {
        let s = EliminationSettings::with_tolerance(0.5_f64);
        assert!(s.is_zero(0.5));
        assert!(s.is_zero(-0.5));
        assert!(!s.is_zero(0.5000001));
    }
}
