use alloc::vec;
use alloc::vec::Vec;

use crate::linalg::{DimensionMismatch, LinalgError, Pivoting, LOG_TARGET};
use crate::traits::{FloatScalar, MatrixMut, MatrixRef};
use crate::Matrix;

/// Perform LU decomposition by Gaussian elimination, in place.
///
/// On entry `u` holds the square matrix A and `l` must be the identity of the
/// same size. On return `u` holds the upper-triangular factor (exact zeros
/// below the diagonal) and `l` the unit-lower-triangular factor, with
/// `L·U = P·A` where row `i` of `P·A` is row `perm[i]` of A.
///
/// Columns are eliminated left to right, rows top to bottom. With
/// `pivoting = None` rows are never exchanged and an exactly-zero pivot fails
/// with [`LinalgError::ZeroPivot`]. With a [`Pivoting`] policy a row exchange
/// may happen before each column's elimination; a pivot that is still zero
/// afterwards fails with [`LinalgError::Singular`].
///
/// The last column has no rows below it, so its pivot is never divided by and
/// may be zero.
///
/// Returns the number of row exchanges performed.
pub fn lu_in_place<T: FloatScalar>(
    u: &mut impl MatrixMut<T>,
    l: &mut impl MatrixMut<T>,
    perm: &mut [usize],
    pivoting: Option<Pivoting<T>>,
) -> Result<usize, LinalgError> {
    let n = u.nrows();
    assert_eq!(n, u.ncols(), "LU decomposition requires a square matrix");
    assert_eq!((n, n), (l.nrows(), l.ncols()), "L must match the size of U");
    assert_eq!(n, perm.len(), "permutation slice length must match matrix size");

    for (i, p) in perm.iter_mut().enumerate() {
        *p = i;
    }

    let mut swaps = 0;

    for col in 0..n.saturating_sub(1) {
        if let Some(policy) = pivoting {
            if let Some(row) = pivot_row(&*u, col, policy) {
                if row != col {
                    log::debug!(
                        target: LOG_TARGET,
                        "LU column {}: pivot {:?}, swapping rows {} and {} ({:?})",
                        col,
                        *u.get(col, col),
                        col,
                        row,
                        policy,
                    );
                    u.swap_row_prefix(col, row, n);
                    perm.swap(col, row);
                    // Only L's finished columns 0..col carry multipliers.
                    l.swap_row_prefix(col, row, col);
                    swaps += 1;
                }
            }
        }

        let pivot = *u.get(col, col);
        if pivot == T::zero() {
            return Err(match pivoting {
                None => LinalgError::ZeroPivot { col },
                Some(_) => LinalgError::Singular { col },
            });
        }

        for row in (col + 1)..n {
            let factor = *u.get(row, col) / pivot;
            for j in (col + 1)..n {
                let val = *u.get(row, j) - factor * *u.get(col, j);
                *u.get_mut(row, j) = val;
            }
            *u.get_mut(row, col) = T::zero();
            *l.get_mut(row, col) = factor;
        }
    }

    Ok(swaps)
}

/// Pick the replacement pivot row for column `col`, or `None` when the
/// policy does not ask for an exchange.
///
/// Ties keep the first row found; the current row wins unless another one is
/// strictly better.
fn pivot_row<T: FloatScalar>(
    u: &impl MatrixRef<T>,
    col: usize,
    policy: Pivoting<T>,
) -> Option<usize> {
    let n = u.nrows();
    let pivot = *u.get(col, col);
    match policy {
        Pivoting::ExactZero => {
            if pivot != T::zero() {
                return None;
            }
            // Greatest signed value, not greatest magnitude.
            let mut best_row = col;
            let mut best = pivot;
            for row in (col + 1)..n {
                let val = *u.get(row, col);
                if val > best {
                    best = val;
                    best_row = row;
                }
            }
            Some(best_row)
        }
        Pivoting::Threshold(tol) => {
            if pivot.abs() > tol {
                return None;
            }
            let mut best_row = col;
            let mut best = pivot.abs();
            for row in (col + 1)..n {
                let val = u.get(row, col).abs();
                if val > best {
                    best = val;
                    best_row = row;
                }
            }
            Some(best_row)
        }
    }
}

/// Permutation matrix with `P[i][perm[i]] = 1`, so that `(P·A)[i] = A[perm[i]]`.
fn permutation_matrix<T: FloatScalar>(perm: &[usize]) -> Matrix<T> {
    let n = perm.len();
    let mut p = Matrix::zeros(n, n);
    for (i, &j) in perm.iter().enumerate() {
        p[(i, j)] = T::one();
    }
    p
}

/// LU decomposition of a square matrix: `L·U = P·A`.
///
/// Owns the unit-lower-triangular `L`, the upper-triangular `U`, and the row
/// permutation. Without pivoting the permutation is the identity.
///
/// # Example
///
/// ```
/// use matfact::Matrix;
/// use matfact::linalg::Pivoting;
///
/// let a = Matrix::from_rows(&[[0.0_f64, 2.0, 3.0], [1.0, 1.0, 1.0], [4.0, 5.0, 6.0]]).unwrap();
/// let lu = a.lu_with(Pivoting::ExactZero).unwrap();
///
/// // Zero at (0, 0): row 2 holds the greatest value in column 0.
/// assert_eq!(lu.perm(), &[2, 1, 0]);
/// assert!((lu.l() * lu.u()).allclose(&(&lu.p() * &a)));
/// assert!((lu.det() - (-1.0)).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct LuDecomposition<T> {
    l: Matrix<T>,
    u: Matrix<T>,
    perm: Vec<usize>,
    swaps: usize,
}

impl<T: FloatScalar> LuDecomposition<T> {
    /// Decompose without row exchanges.
    ///
    /// Fails with [`LinalgError::ZeroPivot`] on an exactly-zero pivot.
    pub fn new(a: &Matrix<T>) -> Result<Self, LinalgError> {
        Self::factor(a, None)
    }

    /// Decompose with the given row-exchange policy.
    ///
    /// Fails with [`LinalgError::Singular`] when no usable pivot exists.
    pub fn with_pivoting(a: &Matrix<T>, pivoting: Pivoting<T>) -> Result<Self, LinalgError> {
        Self::factor(a, Some(pivoting))
    }

    fn factor(a: &Matrix<T>, pivoting: Option<Pivoting<T>>) -> Result<Self, LinalgError> {
        if !a.is_square() {
            return Err(DimensionMismatch::NotSquare {
                nrows: a.nrows(),
                ncols: a.ncols(),
            }
            .into());
        }
        let n = a.nrows();
        log::trace!(target: LOG_TARGET, "LU decomposition of {}x{} matrix, pivoting {:?}", n, n, pivoting);

        let mut u = a.clone();
        let mut l = Matrix::eye(n);
        let mut perm = vec![0usize; n];
        let swaps = lu_in_place(&mut u, &mut l, &mut perm, pivoting)?;
        Ok(Self { l, u, perm, swaps })
    }

    /// Unit-lower-triangular factor.
    #[inline]
    pub fn l(&self) -> &Matrix<T> {
        &self.l
    }

    /// Upper-triangular factor.
    #[inline]
    pub fn u(&self) -> &Matrix<T> {
        &self.u
    }

    /// Row permutation: row `i` of `P·A` is row `perm()[i]` of A.
    #[inline]
    pub fn perm(&self) -> &[usize] {
        &self.perm
    }

    /// Number of row exchanges performed.
    #[inline]
    pub fn swaps(&self) -> usize {
        self.swaps
    }

    /// Permutation matrix P.
    pub fn p(&self) -> Matrix<T> {
        permutation_matrix(&self.perm)
    }

    /// Determinant of A: `(-1)^swaps` times the product of U's diagonal.
    pub fn det(&self) -> T {
        let mut d = if self.swaps % 2 == 0 {
            T::one()
        } else {
            T::zero() - T::one()
        };
        for i in 0..self.u.nrows() {
            d = d * self.u[(i, i)];
        }
        d
    }

    /// Consume the decomposition, returning `(P, L, U)`.
    pub fn into_parts(self) -> (Matrix<T>, Matrix<T>, Matrix<T>) {
        let p = self.p();
        (p, self.l, self.u)
    }
}

/// Convenience methods on square matrices.
impl<T: FloatScalar> Matrix<T> {
    /// LU decomposition without pivoting.
    pub fn lu(&self) -> Result<LuDecomposition<T>, LinalgError> {
        LuDecomposition::new(self)
    }

    /// LU decomposition with exact-zero pivoting ([`Pivoting::ExactZero`]).
    pub fn lu_pivoted(&self) -> Result<LuDecomposition<T>, LinalgError> {
        LuDecomposition::with_pivoting(self, Pivoting::ExactZero)
    }

    /// LU decomposition with an explicit row-exchange policy.
    ///
    /// ```
    /// use matfact::Matrix;
    /// use matfact::linalg::Pivoting;
    ///
    /// // The exact-zero policy keeps the tiny pivot; partial pivoting swaps it away.
    /// let a = Matrix::from_rows(&[[1e-20_f64, 1.0], [1.0, 1.0]]).unwrap();
    /// assert_eq!(a.lu_with(Pivoting::ExactZero).unwrap().swaps(), 0);
    /// assert_eq!(a.lu_with(Pivoting::partial()).unwrap().swaps(), 1);
    /// ```
    pub fn lu_with(&self, pivoting: Pivoting<T>) -> Result<LuDecomposition<T>, LinalgError> {
        LuDecomposition::with_pivoting(self, pivoting)
    }
}
