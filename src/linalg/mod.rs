pub(crate) mod lu;
pub(crate) mod qr;

pub use lu::{lu_in_place, LuDecomposition};
pub use qr::{householder_in_place, QrDecomposition};

use crate::traits::FloatScalar;
use crate::Matrix;

/// Target used for all `log` records emitted by the decompositions.
pub(crate) const LOG_TARGET: &str = "matfact";

/// Shape precondition violated by an input matrix.
///
/// Wrapped in [`LinalgError::DimensionMismatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimensionMismatch {
    /// LU decomposition was given a non-square matrix.
    NotSquare { nrows: usize, ncols: usize },
    /// QR decomposition was given more columns than rows.
    TooFewRows { nrows: usize, ncols: usize },
    /// A row passed to [`Matrix::from_rows`] differs in length from the first row.
    RaggedRow { row: usize, expected: usize, got: usize },
}

impl core::fmt::Display for DimensionMismatch {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DimensionMismatch::NotSquare { nrows, ncols } => {
                write!(f, "expected a square matrix, got {}x{}", nrows, ncols)
            }
            DimensionMismatch::TooFewRows { nrows, ncols } => write!(
                f,
                "expected at least as many rows as columns, got {}x{}",
                nrows, ncols
            ),
            DimensionMismatch::RaggedRow { row, expected, got } => write!(
                f,
                "row {} has {} elements, expected {}",
                row, got, expected
            ),
        }
    }
}

/// Errors from the factorization routines.
///
/// A failed call never hands back partial factors: the caller gets either
/// the complete decomposition or one of these.
///
/// ```
/// use matfact::Matrix;
/// use matfact::linalg::LinalgError;
///
/// let a = Matrix::from_rows(&[[0.0_f64, 2.0, 3.0], [1.0, 1.0, 1.0], [4.0, 5.0, 6.0]]).unwrap();
/// assert_eq!(a.lu().unwrap_err(), LinalgError::ZeroPivot { col: 0 });
/// assert!(a.lu_pivoted().is_ok());
///
/// let zero_col = Matrix::from_rows(&[[0.0_f64, 1.0], [0.0, 2.0]]).unwrap();
/// assert_eq!(zero_col.lu_pivoted().unwrap_err(), LinalgError::Singular { col: 0 });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinalgError {
    /// Input shape violates the decomposition's precondition.
    DimensionMismatch(DimensionMismatch),
    /// Elimination without pivoting hit an exactly-zero pivot in column `col`.
    /// The pivoted variant may still succeed.
    ZeroPivot { col: usize },
    /// The pivot in column `col` is still zero after the row search:
    /// the column is linearly dependent on the ones already eliminated.
    Singular { col: usize },
}

impl From<DimensionMismatch> for LinalgError {
    fn from(e: DimensionMismatch) -> Self {
        LinalgError::DimensionMismatch(e)
    }
}

impl core::fmt::Display for LinalgError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LinalgError::DimensionMismatch(e) => write!(f, "dimension mismatch: {}", e),
            LinalgError::ZeroPivot { col } => {
                write!(f, "zero pivot in column {} (no pivoting)", col)
            }
            LinalgError::Singular { col } => {
                write!(f, "matrix is singular: no nonzero pivot in column {}", col)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DimensionMismatch {}

#[cfg(feature = "std")]
impl std::error::Error for LinalgError {}

/// Row-exchange policy for LU decomposition.
///
/// `ExactZero` reproduces the classic "swap only when stuck" scheme: a row
/// exchange happens only when the pivot is exactly zero, and the replacement
/// row is the one with the greatest *signed* value in the pivot column.
/// This is not textbook partial pivoting and can be unstable for small but
/// nonzero pivots or columns dominated by negative values.
///
/// `Threshold(tol)` is the corrected mode: exchange whenever `|pivot| <= tol`,
/// choosing the row with the greatest magnitude. [`Pivoting::partial`] gives
/// textbook partial pivoting (exchange considered at every column).
///
/// In both modes an exactly-zero pivot that survives the search is reported
/// as [`LinalgError::Singular`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pivoting<T> {
    ExactZero,
    Threshold(T),
}

impl<T> Default for Pivoting<T> {
    fn default() -> Self {
        Pivoting::ExactZero
    }
}

impl<T: FloatScalar> Pivoting<T> {
    /// Textbook partial pivoting: largest-magnitude pivot at every column.
    pub fn partial() -> Self {
        Pivoting::Threshold(T::infinity())
    }
}

// ── Tuple entry points ──────────────────────────────────────────────

/// LU decomposition by plain Gaussian elimination: returns `(L, U)` with `L·U ≈ A`.
///
/// `L` is unit-lower-triangular and `U` upper-triangular. Fails with
/// [`LinalgError::ZeroPivot`] as soon as a division by an exactly-zero pivot
/// would be needed; use [`lu_with_pivot`] for such inputs.
///
/// ```
/// use matfact::{lu_no_pivot, Matrix};
///
/// let a = Matrix::from_rows(&[[2.0_f64, 4.0, 1.0], [0.0, 3.0, 5.0], [1.0, -2.0, 1.0]]).unwrap();
/// let (l, u) = lu_no_pivot(&a).unwrap();
/// assert!((&l * &u).allclose(&a));
/// assert!(l.is_unit_lower_triangular());
/// assert!(u.is_upper_triangular());
/// ```
pub fn lu_no_pivot<T: FloatScalar>(a: &Matrix<T>) -> Result<(Matrix<T>, Matrix<T>), LinalgError> {
    let (_, l, u) = LuDecomposition::new(a)?.into_parts();
    Ok((l, u))
}

/// LU decomposition with exact-zero pivoting: returns `(P, L, U)` with `L·U ≈ P·A`.
///
/// Uses [`Pivoting::ExactZero`]; see [`LuDecomposition::with_pivoting`] for the
/// magnitude-based policies.
///
/// ```
/// use matfact::{lu_with_pivot, Matrix};
///
/// let a = Matrix::from_rows(&[[0.0_f64, 2.0, 3.0], [1.0, 1.0, 1.0], [4.0, 5.0, 6.0]]).unwrap();
/// let (p, l, u) = lu_with_pivot(&a).unwrap();
/// assert!(p.is_permutation());
/// assert!((&l * &u).allclose(&(&p * &a)));
/// ```
pub fn lu_with_pivot<T: FloatScalar>(
    a: &Matrix<T>,
) -> Result<(Matrix<T>, Matrix<T>, Matrix<T>), LinalgError> {
    Ok(LuDecomposition::with_pivoting(a, Pivoting::ExactZero)?.into_parts())
}

/// Householder QR decomposition: returns `(Q, R)` with `Q·R ≈ A`.
///
/// Requires `nrows >= ncols`. `Q` is `nrows x ncols` with orthonormal
/// columns and `R` is `ncols x ncols` upper-triangular.
///
/// ```
/// use matfact::{qr_householder, Matrix};
///
/// let a = Matrix::from_rows(&[[1.0_f64, 0.0], [0.0, 1.0], [1.0, 1.0], [2.0, 3.0]]).unwrap();
/// let (q, r) = qr_householder(&a).unwrap();
/// assert_eq!(q.shape(), (4, 2));
/// assert_eq!(r.shape(), (2, 2));
/// assert!((&q * &r).allclose(&a));
/// assert!((&q.transpose() * &q).allclose(&Matrix::eye(2)));
/// ```
pub fn qr_householder<T: FloatScalar>(
    a: &Matrix<T>,
) -> Result<(Matrix<T>, Matrix<T>), LinalgError> {
    Ok(QrDecomposition::new(a)?.into_parts())
}
