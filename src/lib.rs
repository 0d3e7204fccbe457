//! # echelon
//!
//! Dense-matrix Gaussian elimination: row echelon form, reduced row echelon
//! form, rank, nullspace basis and particular solutions of `A·x = b`, on a
//! small heap-allocated matrix type.
//!
//! ## Quick start
//!
//! ```
//! use echelon::DynMatrix;
//!
//! let a: DynMatrix<f64> = "1 2 2 2; 2 4 6 8; 3 6 8 10".parse().unwrap();
//!
//! let (r, rank) = a.rref();
//! assert_eq!(rank, 2);
//! assert_eq!(r.row_slice(1), &[0.0, 0.0, 1.0, 2.0]);
//!
//! // Every nullspace basis vector is annihilated by A
//! let n = a.nullspace();
//! assert_eq!(n.ncols(), 2);
//! assert!((&a * &n).is_zero(1e-12));
//!
//! // One particular solution; free variables are zero
//! let b = DynMatrix::column_vector(&[1.0, 5.0, 6.0]);
//! let x = a.special_solution(&b).unwrap();
//! assert!((&a * &x).approx_eq(&b, 1e-12));
//! ```
//!
//! ## Modules
//!
//! - [`dynmatrix`]: `DynMatrix<T>` with runtime dimensions and row-major
//!   `Vec<T>` storage: checked construction, indexing and resizing,
//!   elementary algebra (`transpose`, `scale`, `checked_add`,
//!   `checked_mul` and the matching operators), constructors (`identity`,
//!   `row_exchange`), text parsing and display. Implements [`MatrixRef`] /
//!   [`MatrixMut`], so the elimination free functions work on it directly.
//!
//! - [`linalg`]: the elimination engine. In-place free functions over
//!   `&mut impl MatrixMut<T>` ([`linalg::row_echelon_in_place`],
//!   [`linalg::reduce_in_place`]) plus the [`Echelon`] wrapper and the
//!   non-mutating convenience methods on `DynMatrix`: `row_echelon`, `rref`,
//!   `rank`, `nullspace`, `special_solution`, `general_solution`, `inverse`.
//!
//! - [`traits`]: element trait hierarchy:
//!   - [`Scalar`]: all matrix elements (`Copy + PartialEq + Debug + Num`)
//!   - [`FloatScalar`]: `f32` / `f64`, required by elimination
//!   - [`MatrixRef`] / [`MatrixMut`]: generic read/write access for algorithms
//!
//! - [`error`]: [`MatrixError`], returned by every fallible operation.
//!
//! ## Tolerance
//!
//! All zero tests in the engine compare `|x|` against one absolute
//! tolerance, [`EliminationSettings::pivot_tol`]: `1e-9` for `f64` and
//! `1e-5` for `f32` by default. Each operation has a `*_with` variant
//! taking explicit settings.
//!
//! ## Logging
//!
//! The engine reports pivots, row swaps and inconsistencies through the
//! [`log`] facade at `trace` / `debug` level. No logger is installed by the
//! library.

pub mod dynmatrix;
pub mod error;
pub mod linalg;
pub mod traits;

pub use dynmatrix::{DynMatrix, Echelon};
pub use error::{MatrixError, Result};
pub use linalg::EliminationSettings;
pub use traits::{FloatScalar, MatrixMut, MatrixRef, Scalar};
