use core::fmt::Debug;
use num_traits::{Float, Num, One, Zero};

/// Trait for types that can be used as matrix elements.
///
/// Blanket-implemented for all types satisfying the bounds.
/// Covers `f32`, `f64`, and all integer types.
pub trait Scalar: Copy + PartialEq + Debug + Zero + One + Num {}

impl<T: Copy + PartialEq + Debug + Zero + One + Num> Scalar for T {}

/// Trait for floating-point matrix elements.
///
/// Required by the elimination engine, which divides by pivots and compares
/// magnitudes against a tolerance.
pub trait FloatScalar: Scalar + Float {
    /// Zero tolerance used by [`EliminationSettings::default`](crate::EliminationSettings).
    fn default_pivot_tol() -> Self;
}

impl FloatScalar for f64 {
    #[inline]
    fn default_pivot_tol() -> f64 {
        crate::linalg::DEFAULT_PIVOT_TOL_F64
    }
}

impl FloatScalar for f32 {
    #[inline]
    fn default_pivot_tol() -> f32 {
        crate::linalg::DEFAULT_PIVOT_TOL_F32
    }
}

/// Read-only access to a matrix-like type.
///
/// The elimination free functions in [`linalg`](crate::linalg) are written
/// against this trait rather than a concrete storage type.
pub trait MatrixRef<T> {
    fn nrows(&self) -> usize;
    fn ncols(&self) -> usize;
    fn get(&self, row: usize, col: usize) -> &T;
}

/// Mutable access to a matrix-like type.
///
/// Extends `MatrixRef` with mutable element access, enabling
/// in-place row reduction to work generically.
pub trait MatrixMut<T>: MatrixRef<T> {
    fn get_mut(&mut self, row: usize, col: usize) -> &mut T;

    /// Exchange two rows in place.
    fn swap_rows(&mut self, a: usize, b: usize)
    where
        T: Copy,
    {
        if a == b {
            return;
        }
        for j in 0..self.ncols() {
            let tmp = *self.get(a, j);
            *self.get_mut(a, j) = *self.get(b, j);
            *self.get_mut(b, j) = tmp;
        }
    }
}
