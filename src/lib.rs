//! # matfact
//!
//! Dense matrix factorizations in pure Rust, no-std compatible: LU by
//! Gaussian elimination (with or without row exchanges) and QR by Householder
//! reflections.
//!
//! ## Quick start
//!
//! ```
//! use matfact::{lu_no_pivot, lu_with_pivot, qr_householder, Matrix};
//!
//! let a = Matrix::from_rows(&[
//!     [2.0_f64, 4.0, 1.0],
//!     [0.0, 3.0, 5.0],
//!     [1.0, -2.0, 1.0],
//! ]).unwrap();
//!
//! let (l, u) = lu_no_pivot(&a).unwrap();
//! assert!((&l * &u).allclose(&a));
//!
//! let (p, l, u) = lu_with_pivot(&a).unwrap();
//! assert!((&l * &u).allclose(&(&p * &a)));
//!
//! let (q, r) = qr_householder(&a).unwrap();
//! assert!((&q * &r).allclose(&a));
//! ```
//!
//! ## Modules
//!
//! - [`matrix`]: [`Matrix<T>`], a heap-allocated dense matrix with runtime
//!   dimensions and row-major `Vec<T>` storage. Construction from rows,
//!   products, transpose, structural checks (`is_upper_triangular`,
//!   `is_unit_lower_triangular`, `is_permutation`) and `allclose`-style
//!   approximate comparison.
//!
//! - [`linalg`]: the decompositions. Tuple entry points
//!   [`lu_no_pivot`], [`lu_with_pivot`] and [`qr_householder`]; owning
//!   wrappers [`LuDecomposition`](linalg::LuDecomposition) and
//!   [`QrDecomposition`](linalg::QrDecomposition); generic in-place kernels
//!   over [`MatrixMut`]. Every call works on its own copy of the input and
//!   keeps no state between calls.
//!
//! - [`traits`]: element traits:
//!   - [`Scalar`]: all matrix elements (`Copy + PartialEq + Debug + Zero + One + Num`)
//!   - [`FloatScalar`]: real floats (`Scalar + Float`), used by the decompositions
//!   - [`MatrixRef`] / [`MatrixMut`]: generic read/write access for the kernels
//!
//! ## Pivoting
//!
//! [`lu_with_pivot`] exchanges rows only when a pivot is exactly zero and
//! picks the replacement row by greatest signed value. That is not textbook
//! partial pivoting; [`linalg::Pivoting::Threshold`] and
//! [`linalg::Pivoting::partial`] select by magnitude instead.
//!
//! ## Logging
//!
//! Row exchanges and skipped QR reflections are reported through the
//! [`log`](https://docs.rs/log) facade under the `matfact` target.
//!
//! ## Cargo features
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `std`   | yes     | Hardware FPU via system libm, `std::error::Error` impls |
//! | `libm`  | no      | Pure-Rust software float fallback for `no_std` targets |

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod linalg;
pub mod matrix;
pub mod traits;

pub use linalg::{lu_no_pivot, lu_with_pivot, qr_householder, LinalgError};
pub use matrix::Matrix;
pub use traits::{FloatScalar, MatrixMut, MatrixRef, Scalar};
