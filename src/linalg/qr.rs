use alloc::vec;
use alloc::vec::Vec;

use crate::linalg::{DimensionMismatch, LinalgError, LOG_TARGET};
use crate::traits::{FloatScalar, MatrixMut};
use crate::Matrix;

/// Householder QR decomposition in place.
///
/// On entry `r` holds the `m x n` matrix A (`m >= n`) and `q` must be the
/// `m x m` identity. For each column `c` the sub-column `x = R[c.., c]` is
/// reflected onto `-sign(x[0])·‖x‖·e₀` by `H = I - 2·v·vᵀ / vᵀ·v` with
/// `v = x + sign(x[0])·‖x‖·e₀`, then `R ← H·R` and `Q ← Q·H`. `sign(0)` is
/// taken as `+1`, so a zero leading entry maps to `-‖x‖`.
///
/// `H` is never formed: it is applied to the trailing rows of `R` and the
/// trailing columns of `Q` directly. Entries of `R` below the diagonal are
/// written as exact zeros once their column is reduced.
///
/// A sub-column whose entries are all exactly zero needs no reflection and is
/// skipped (identity `H`). The indices of such columns are returned. Norms
/// are computed with scaling, so tiny or huge but finite entries are still
/// reflected.
///
/// On return `Q·R = A` with `Q` orthogonal; the thin factors are the first
/// `n` columns of `Q` and the top `n x n` block of `R`.
pub fn householder_in_place<T: FloatScalar>(
    r: &mut impl MatrixMut<T>,
    q: &mut impl MatrixMut<T>,
) -> Vec<usize> {
    let m = r.nrows();
    let n = r.ncols();
    assert!(m >= n, "QR decomposition requires nrows >= ncols");
    assert_eq!((q.nrows(), q.ncols()), (m, m), "Q must be square with as many rows as R");

    let two = T::one() + T::one();
    let mut v = vec![T::zero(); m];
    let mut degenerate = Vec::new();

    for col in 0..n {
        let mut scale = T::zero();
        for i in col..m {
            scale = scale.max(r.get(i, col).abs());
        }

        if scale == T::zero() {
            log::debug!(
                target: LOG_TARGET,
                "QR column {}: sub-column already zero, skipping reflection",
                col
            );
            degenerate.push(col);
            continue;
        }

        // Scaled sum of squares: no underflow for tiny entries, no overflow for huge ones.
        let mut ssq = T::zero();
        for i in col..m {
            let x = *r.get(i, col) / scale;
            ssq = ssq + x * x;
        }
        let norm = scale * ssq.sqrt();
        let x0 = *r.get(col, col);
        let e0 = if x0 < T::zero() { T::one() } else { -T::one() };

        // H depends only on the direction of v, so v is normalized by its
        // largest entry |v[col]| = |x0| + norm.
        let v0 = x0 - norm * e0;
        let v_scale = v0.abs();
        v[col] = v0 / v_scale;
        for i in (col + 1)..m {
            v[i] = *r.get(i, col) / v_scale;
        }
        let mut vtv = T::zero();
        for vi in &v[col..] {
            vtv = vtv + *vi * *vi;
        }
        let beta = two / vtv;

        // R ← H·R, rows col.. of columns col+1..
        for j in (col + 1)..n {
            let mut dot = T::zero();
            for i in col..m {
                dot = dot + v[i] * *r.get(i, j);
            }
            let s = beta * dot;
            for i in col..m {
                let val = *r.get(i, j) - s * v[i];
                *r.get_mut(i, j) = val;
            }
        }
        *r.get_mut(col, col) = norm * e0;
        for i in (col + 1)..m {
            *r.get_mut(i, col) = T::zero();
        }

        // Q ← Q·H, columns col..
        for i in 0..m {
            let mut dot = T::zero();
            for k in col..m {
                dot = dot + *q.get(i, k) * v[k];
            }
            let s = beta * dot;
            for k in col..m {
                let val = *q.get(i, k) - s * v[k];
                *q.get_mut(i, k) = val;
            }
        }
    }

    degenerate
}

/// Thin QR decomposition of an `m x n` matrix (`m >= n`): `Q·R = A`.
///
/// `Q` is `m x n` with orthonormal columns, `R` is `n x n` upper-triangular.
/// Rank-deficient input is accepted: a column whose remaining part is
/// already zero gets no reflection and leaves a zero on R's diagonal.
///
/// # Example
///
/// ```
/// use matfact::Matrix;
///
/// let a = Matrix::from_rows(&[
///     [12.0_f64, -51.0, 4.0],
///     [6.0, 167.0, -68.0],
///     [-4.0, 24.0, -41.0],
/// ]).unwrap();
/// let qr = a.qr().unwrap();
///
/// assert!(qr.r().is_upper_triangular());
/// assert!((qr.q() * qr.r()).allclose(&a));
/// assert!((&qr.q().transpose() * qr.q()).allclose(&Matrix::eye(3)));
/// assert!((qr.r()[(0, 0)] - (-14.0)).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct QrDecomposition<T> {
    q: Matrix<T>,
    r: Matrix<T>,
    degenerate: Vec<usize>,
}

impl<T: FloatScalar> QrDecomposition<T> {
    /// Decompose a matrix with at least as many rows as columns.
    pub fn new(a: &Matrix<T>) -> Result<Self, LinalgError> {
        let (m, n) = a.shape();
        if m < n {
            return Err(DimensionMismatch::TooFewRows { nrows: m, ncols: n }.into());
        }
        log::trace!(target: LOG_TARGET, "QR decomposition of {}x{} matrix", m, n);

        let mut r_full = a.clone();
        let mut q_full = Matrix::<T>::eye(m);
        let degenerate = householder_in_place(&mut r_full, &mut q_full);

        let q = Matrix::from_fn(m, n, |i, j| q_full[(i, j)]);
        let r = Matrix::from_fn(n, n, |i, j| r_full[(i, j)]);
        Ok(Self { q, r, degenerate })
    }

    /// Thin orthonormal factor (`m x n`).
    #[inline]
    pub fn q(&self) -> &Matrix<T> {
        &self.q
    }

    /// Upper-triangular factor (`n x n`).
    #[inline]
    pub fn r(&self) -> &Matrix<T> {
        &self.r
    }

    /// Columns whose reflection was skipped because the remaining
    /// sub-column was already zero.
    #[inline]
    pub fn degenerate_columns(&self) -> &[usize] {
        &self.degenerate
    }

    /// Determinant of the original matrix.
    ///
    /// Every applied reflection has determinant -1. Fails with
    /// [`DimensionMismatch::NotSquare`] when A had more rows than columns.
    pub fn det(&self) -> Result<T, LinalgError> {
        let (m, n) = self.q.shape();
        if m != n {
            return Err(DimensionMismatch::NotSquare { nrows: m, ncols: n }.into());
        }
        let reflections = n - self.degenerate.len();
        let mut d = if reflections % 2 == 0 {
            T::one()
        } else {
            T::zero() - T::one()
        };
        for i in 0..n {
            d = d * self.r[(i, i)];
        }
        Ok(d)
    }

    /// Consume the decomposition, returning `(Q, R)`.
    pub fn into_parts(self) -> (Matrix<T>, Matrix<T>) {
        (self.q, self.r)
    }
}

impl<T: FloatScalar> Matrix<T> {
    /// QR decomposition using Householder reflections.
    pub fn qr(&self) -> Result<QrDecomposition<T>, LinalgError> {
        QrDecomposition::new(self)
    }
}
