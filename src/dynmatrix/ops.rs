use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::error::{MatrixError, Result};
use crate::traits::Scalar;

use super::DynMatrix;

// ── Checked elementary algebra ──────────────────────────────────────

impl<T: Scalar> DynMatrix<T> {
    fn require_same_shape(&self, rhs: &Self) -> Result<()> {
        if self.shape() != rhs.shape() {
            return Err(MatrixError::DimensionMismatch {
                expected: self.shape(),
                got: rhs.shape(),
            });
        }
        Ok(())
    }

    fn zip_with(&self, rhs: &Self, f: impl Fn(T, T) -> T) -> Self {
        let data = self
            .data
            .iter()
            .zip(rhs.data.iter())
            .map(|(&a, &b)| f(a, b))
            .collect();
        DynMatrix {
            data,
            nrows: self.nrows,
            ncols: self.ncols,
        }
    }

    /// Element-wise sum. Fails unless both operands share both dimensions.
    ///
    /// ```
    /// use echelon::DynMatrix;
    /// let a = DynMatrix::from_rows(1, 2, &[1.0, 2.0]);
    /// let b = DynMatrix::from_rows(1, 2, &[10.0, 20.0]);
    /// assert_eq!(a.checked_add(&b).unwrap().as_slice(), &[11.0, 22.0]);
    /// assert!(a.checked_add(&b.transpose()).is_err());
    /// ```
    pub fn checked_add(&self, rhs: &Self) -> Result<Self> {
        self.require_same_shape(rhs)?;
        Ok(self.zip_with(rhs, |a, b| a + b))
    }

    /// Element-wise difference. Fails unless both operands share both dimensions.
    pub fn checked_sub(&self, rhs: &Self) -> Result<Self> {
        self.require_same_shape(rhs)?;
        Ok(self.zip_with(rhs, |a, b| a - b))
    }

    /// Matrix product `(M×N) * (N×P) → (M×P)`.
    ///
    /// Fails with [`MatrixError::DimensionMismatch`] unless
    /// `self.ncols() == rhs.nrows()`.
    ///
    /// ```
    /// use echelon::DynMatrix;
    /// let a = DynMatrix::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    /// let b = DynMatrix::from_rows(3, 1, &[1.0, 0.0, -1.0]);
    /// let c = a.checked_mul(&b).unwrap();
    /// assert_eq!(c.as_slice(), &[-2.0, -2.0]);
    /// assert!(b.checked_mul(&a).is_err());
    /// ```
    pub fn checked_mul(&self, rhs: &Self) -> Result<Self> {
        if self.ncols != rhs.nrows {
            return Err(MatrixError::DimensionMismatch {
                expected: (self.ncols, rhs.ncols),
                got: (rhs.nrows, rhs.ncols),
            });
        }
        let m = self.nrows;
        let n = self.ncols;
        let p = rhs.ncols;
        let mut data = vec![T::zero(); m * p];
        for i in 0..m {
            for k in 0..n {
                let a_ik = self.data[i * n + k];
                for j in 0..p {
                    data[i * p + j] = data[i * p + j] + a_ik * rhs.data[k * p + j];
                }
            }
        }
        Ok(DynMatrix {
            data,
            nrows: m,
            ncols: p,
        })
    }

    /// Multiply every element by `k`.
    ///
    /// ```
    /// use echelon::DynMatrix;
    /// let a = DynMatrix::from_rows(1, 3, &[1, -2, 3]);
    /// assert_eq!(a.scale(2).as_slice(), &[2, -4, 6]);
    /// ```
    pub fn scale(&self, k: T) -> Self {
        self.map(|x| x * k)
    }

    /// Transpose: (M×N) → (N×M).
    ///
    /// ```
    /// use echelon::DynMatrix;
    /// let a = DynMatrix::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    /// let t = a.transpose();
    /// assert_eq!(t.nrows(), 3);
    /// assert_eq!(t.ncols(), 2);
    /// assert_eq!(t[(1, 0)], 2.0);
    /// ```
    pub fn transpose(&self) -> Self {
        let n = self.ncols;
        DynMatrix::from_fn(self.ncols, self.nrows, |i, j| self.data[j * n + i])
    }
}

fn unwrap_shape<T>(r: Result<T>) -> T {
    match r {
        Ok(v) => v,
        Err(e) => panic!("{}", e),
    }
}

// ── Element-wise addition / subtraction ─────────────────────────────

macro_rules! impl_elementwise_op {
    ($trait:ident, $method:ident, $checked:ident, $assign_trait:ident, $assign_method:ident) => {
        impl<T: Scalar> $trait<&DynMatrix<T>> for &DynMatrix<T> {
            type Output = DynMatrix<T>;
            fn $method(self, rhs: &DynMatrix<T>) -> DynMatrix<T> {
                unwrap_shape(self.$checked(rhs))
            }
        }

        impl<T: Scalar> $trait for DynMatrix<T> {
            type Output = DynMatrix<T>;
            fn $method(self, rhs: DynMatrix<T>) -> DynMatrix<T> {
                (&self).$method(&rhs)
            }
        }

        impl<T: Scalar> $trait<&DynMatrix<T>> for DynMatrix<T> {
            type Output = DynMatrix<T>;
            fn $method(self, rhs: &DynMatrix<T>) -> DynMatrix<T> {
                (&self).$method(rhs)
            }
        }

        impl<T: Scalar> $trait<DynMatrix<T>> for &DynMatrix<T> {
            type Output = DynMatrix<T>;
            fn $method(self, rhs: DynMatrix<T>) -> DynMatrix<T> {
                self.$method(&rhs)
            }
        }

        impl<T: Scalar> $assign_trait<&DynMatrix<T>> for DynMatrix<T> {
            fn $assign_method(&mut self, rhs: &DynMatrix<T>) {
                *self = (&*self).$method(rhs);
            }
        }

        impl<T: Scalar> $assign_trait for DynMatrix<T> {
            fn $assign_method(&mut self, rhs: DynMatrix<T>) {
                self.$assign_method(&rhs);
            }
        }
    };
}

impl_elementwise_op!(Add, add, checked_add, AddAssign, add_assign);
impl_elementwise_op!(Sub, sub, checked_sub, SubAssign, sub_assign);

// ── Negation ────────────────────────────────────────────────────────

impl<T: Scalar> Neg for &DynMatrix<T> {
    type Output = DynMatrix<T>;

    fn neg(self) -> DynMatrix<T> {
        self.map(|x| T::zero() - x)
    }
}

impl<T: Scalar> Neg for DynMatrix<T> {
    type Output = Self;

    fn neg(self) -> Self {
        -&self
    }
}

// ── Matrix multiplication ───────────────────────────────────────────

impl<T: Scalar> Mul<&DynMatrix<T>> for &DynMatrix<T> {
    type Output = DynMatrix<T>;

    fn mul(self, rhs: &DynMatrix<T>) -> DynMatrix<T> {
        unwrap_shape(self.checked_mul(rhs))
    }
}

impl<T: Scalar> Mul for DynMatrix<T> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        &self * &rhs
    }
}

impl<T: Scalar> Mul<&DynMatrix<T>> for DynMatrix<T> {
    type Output = DynMatrix<T>;
    fn mul(self, rhs: &DynMatrix<T>) -> DynMatrix<T> {
        &self * rhs
    }
}

impl<T: Scalar> Mul<DynMatrix<T>> for &DynMatrix<T> {
    type Output = DynMatrix<T>;
    fn mul(self, rhs: DynMatrix<T>) -> DynMatrix<T> {
        self * &rhs
    }
}

// ── Scalar multiplication / division ────────────────────────────────

impl<T: Scalar> Mul<T> for &DynMatrix<T> {
    type Output = DynMatrix<T>;

    fn mul(self, rhs: T) -> DynMatrix<T> {
        self.scale(rhs)
    }
}

impl<T: Scalar> Mul<T> for DynMatrix<T> {
    type Output = Self;

    fn mul(mut self, rhs: T) -> Self {
        self *= rhs;
        self
    }
}

impl<T: Scalar> MulAssign<T> for DynMatrix<T> {
    fn mul_assign(&mut self, rhs: T) {
        for x in self.data.iter_mut() {
            *x = *x * rhs;
        }
    }
}

macro_rules! impl_scalar_mul_dyn {
    ($($t:ty),*) => {
        $(
            impl Mul<DynMatrix<$t>> for $t {
                type Output = DynMatrix<$t>;
                fn mul(self, rhs: DynMatrix<$t>) -> DynMatrix<$t> {
                    rhs * self
                }
            }

            impl Mul<&DynMatrix<$t>> for $t {
                type Output = DynMatrix<$t>;
                fn mul(self, rhs: &DynMatrix<$t>) -> DynMatrix<$t> {
                    rhs * self
                }
            }
        )*
    };
}

impl_scalar_mul_dyn!(f32, f64, i8, i16, i32, i64, i128, u8, u16, u32, u64, u128);

impl<T: Scalar> Div<T> for &DynMatrix<T> {
    type Output = DynMatrix<T>;

    fn div(self, rhs: T) -> DynMatrix<T> {
        self.map(|x| x / rhs)
    }
}

impl<T: Scalar> Div<T> for DynMatrix<T> {
    type Output = Self;

    fn div(self, rhs: T) -> Self {
        &self / rhs
    }
}
