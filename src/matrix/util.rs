use alloc::vec::Vec;
use core::fmt::{self, Write as _};

use num_traits::{Float, NumCast};

use crate::traits::{FloatScalar, MatrixMut, Scalar};

use super::Matrix;

// ── Row manipulation ────────────────────────────────────────────────

impl<T: Copy> Matrix<T> {
    /// Swap two rows in place.
    ///
    /// ```
    /// use matfact::Matrix;
    /// let mut m = Matrix::from_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]);
    /// m.swap_rows(0, 1);
    /// assert_eq!(m[(0, 0)], 3.0);
    /// assert_eq!(m[(1, 0)], 1.0);
    /// ```
    pub fn swap_rows(&mut self, a: usize, b: usize) {
        let n = self.ncols;
        MatrixMut::swap_row_prefix(self, a, b, n);
    }
}

// ── Structural predicates ───────────────────────────────────────────

impl<T: Scalar> Matrix<T> {
    /// All entries strictly below the diagonal are exactly zero.
    pub fn is_upper_triangular(&self) -> bool {
        (0..self.nrows).all(|i| (0..i.min(self.ncols)).all(|j| self[(i, j)] == T::zero()))
    }

    /// Square, ones on the diagonal, exact zeros above it.
    ///
    /// ```
    /// use matfact::Matrix;
    /// let l = Matrix::from_rows(&[[1.0_f64, 0.0], [0.5, 1.0]]).unwrap();
    /// assert!(l.is_unit_lower_triangular());
    /// assert!(!l.transpose().is_unit_lower_triangular());
    /// ```
    pub fn is_unit_lower_triangular(&self) -> bool {
        if !self.is_square() {
            return false;
        }
        (0..self.nrows).all(|i| {
            self[(i, i)] == T::one() && ((i + 1)..self.ncols).all(|j| self[(i, j)] == T::zero())
        })
    }

    /// Square 0/1 matrix with exactly one 1 in every row and every column.
    pub fn is_permutation(&self) -> bool {
        if !self.is_square() {
            return false;
        }
        let n = self.nrows;
        let mut col_hits = alloc::vec![0usize; n];
        for i in 0..n {
            let mut row_hits = 0;
            for (j, &x) in self.row(i).iter().enumerate() {
                if x == T::one() {
                    row_hits += 1;
                    col_hits[j] += 1;
                } else if x != T::zero() {
                    return false;
                }
            }
            if row_hits != 1 {
                return false;
            }
        }
        col_hits.iter().all(|&c| c == 1)
    }
}

// ── Approximate comparison ──────────────────────────────────────────

impl<T: FloatScalar> Matrix<T> {
    /// Elementwise `|a - b| <= atol + rtol * |b|`, with `b` taken from `other`.
    ///
    /// Returns `false` when the shapes differ or any entry is NaN.
    ///
    /// ```
    /// use matfact::Matrix;
    /// let a = Matrix::from_slice(1, 2, &[1.0_f64, 2.0]);
    /// let b = Matrix::from_slice(1, 2, &[1.0 + 1e-10, 2.0]);
    /// assert!(a.approx_eq(&b, 0.0, 1e-8));
    /// assert!(!a.approx_eq(&b, 0.0, 1e-12));
    /// ```
    pub fn approx_eq(&self, other: &Self, rtol: T, atol: T) -> bool {
        if self.shape() != other.shape() {
            return false;
        }
        self.data
            .iter()
            .zip(other.data.iter())
            .all(|(&a, &b)| (a - b).abs() <= atol + rtol * b.abs())
    }

    /// [`approx_eq`](Self::approx_eq) with `rtol = 1e-5` and `atol = 1e-8`.
    pub fn allclose(&self, other: &Self) -> bool {
        let rtol = <T as NumCast>::from(1e-5).unwrap_or_else(T::epsilon);
        let atol = <T as NumCast>::from(1e-8).unwrap_or_else(T::epsilon);
        self.approx_eq(other, rtol, atol)
    }

    /// Largest elementwise `|a - b|`.
    ///
    /// Panics if the shapes differ.
    pub fn max_abs_diff(&self, other: &Self) -> T {
        assert_eq!(
            self.shape(),
            other.shape(),
            "dimension mismatch: {}x{} vs {}x{}",
            self.nrows, self.ncols, other.nrows, other.ncols,
        );
        self.data
            .iter()
            .zip(other.data.iter())
            .fold(T::zero(), |acc, (&a, &b)| Float::max(acc, (a - b).abs()))
    }
}

// ── Display ─────────────────────────────────────────────────────────

impl<T: fmt::Display> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.nrows;
        let n = self.ncols;

        // Measure column widths
        let mut widths: Vec<usize> = alloc::vec![0; n];
        for j in 0..n {
            for i in 0..m {
                let w = WriteCounting::count(|wc| write!(wc, "{}", self[(i, j)]));
                if w > widths[j] {
                    widths[j] = w;
                }
            }
        }

        for i in 0..m {
            write!(f, "│")?;
            for j in 0..n {
                if j > 0 {
                    write!(f, "  ")?;
                }
                write!(f, "{:>width$}", self[(i, j)], width = widths[j])?;
            }
            write!(f, "│")?;
            if i < m - 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

struct WriteCounting {
    count: usize,
}

impl WriteCounting {
    fn count(f: impl FnOnce(&mut Self) -> fmt::Result) -> usize {
        let mut wc = WriteCounting { count: 0 };
        let _ = f(&mut wc);
        wc.count
    }
}

impl fmt::Write for WriteCounting {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.count += s.chars().count();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    #[test]
    fn swap_rows() {
        let mut m = Matrix::from_slice(3, 2, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        m.swap_rows(2, 0);
        assert_eq!(m.as_slice(), &[5.0, 6.0, 3.0, 4.0, 1.0, 2.0]);
        m.swap_rows(1, 1);
        assert_eq!(m.row(1), &[3.0, 4.0]);
    }

    #[test]
    fn swap_row_prefix_leaves_tail() {
        let mut m = Matrix::from_slice(3, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        m.swap_row_prefix(2, 1, 1);
        assert_eq!(m.row(1), &[7.0, 5.0, 6.0]);
        assert_eq!(m.row(2), &[4.0, 8.0, 9.0]);
        m.swap_row_prefix(0, 2, 0);
        assert_eq!(m.row(0), &[1.0, 2.0, 3.0]);
    }

    fn swap_prefix_generic<M: MatrixMut<f64>>(m: &mut M, a: usize, b: usize, len: usize) {
        m.swap_row_prefix(a, b, len);
    }

    #[test]
    fn generic_swap_uses_contiguous_rows() {
        let mut m = Matrix::from_slice(3, 2, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        swap_prefix_generic(&mut m, 0, 2, 2);
        assert_eq!(m.as_slice(), &[5.0, 6.0, 3.0, 4.0, 1.0, 2.0]);
    }

    #[test]
    #[should_panic(expected = "prefix length")]
    fn generic_swap_rejects_overlong_prefix() {
        // A per-element swap would silently spill into the next row here.
        let mut m = Matrix::from_slice(3, 2, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        swap_prefix_generic(&mut m, 0, 1, 3);
    }

    #[test]
    fn triangular_predicates() {
        let u = Matrix::from_slice(3, 3, &[1.0, 2.0, 3.0, 0.0, 4.0, 5.0, 0.0, 0.0, 6.0]);
        assert!(u.is_upper_triangular());
        assert!(!u.transpose().is_upper_triangular());
        assert!(!u.is_unit_lower_triangular());
        assert!(Matrix::<f64>::eye(4).is_unit_lower_triangular());

        let tall = Matrix::from_slice(3, 2, &[1.0, 2.0, 0.0, 3.0, 0.0, 0.0]);
        assert!(tall.is_upper_triangular());
    }

    #[test]
    fn permutation_predicate() {
        let p = Matrix::from_slice(3, 3, &[0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0]);
        assert!(p.is_permutation());
        let dup = Matrix::from_slice(3, 3, &[0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 1.0, 0.0, 0.0]);
        assert!(!dup.is_permutation());
        let scaled = Matrix::from_slice(2, 2, &[2.0, 0.0, 0.0, 1.0]);
        assert!(!scaled.is_permutation());
        assert!(!Matrix::<f64>::zeros(2, 3).is_permutation());
    }

    #[test]
    fn approx_eq_relative_and_absolute() {
        let a = Matrix::from_slice(1, 2, &[1000.0_f64, 0.0]);
        let b = Matrix::from_slice(1, 2, &[1000.001, 1e-9]);
        assert!(a.allclose(&b));
        assert!(!a.approx_eq(&b, 0.0, 1e-8));
        assert!(!a.allclose(&Matrix::zeros(2, 1)));

        let nan = Matrix::from_slice(1, 1, &[f64::NAN]);
        assert!(!nan.allclose(&nan));
    }

    #[test]
    fn max_abs_diff() {
        let a = Matrix::from_slice(2, 2, &[1.0_f64, 2.0, 3.0, 4.0]);
        let b = Matrix::from_slice(2, 2, &[1.0, 2.5, 2.0, 4.0]);
        assert_eq!(a.max_abs_diff(&b), 1.0);
        assert_eq!(a.max_abs_diff(&a), 0.0);
    }

    #[test]
    fn display() {
        let m = Matrix::from_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let s = format!("{}", m);
        assert!(s.contains('1'));
        assert!(s.contains('4'));
        assert_eq!(s.lines().count(), 2);
    }

    #[test]
    fn display_alignment() {
        let m = Matrix::from_slice(2, 2, &[1.0, 100.0, 1000.0, 2.0]);
        let s = format!("{}", m);
        let lines: Vec<&str> = s.lines().collect();
        assert_eq!(lines[0].chars().count(), lines[1].chars().count());
    }
}
