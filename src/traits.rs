use core::fmt::Debug;
use num_traits::{Float, Num, One, Zero};

/// Trait for types that can be stored in a [`Matrix`](crate::Matrix).
///
/// Blanket-implemented for all types satisfying the bounds.
/// Covers `f32`, `f64`, and all integer types.
pub trait Scalar: Copy + PartialEq + Debug + Zero + One + Num {}

impl<T: Copy + PartialEq + Debug + Zero + One + Num> Scalar for T {}

/// Trait for floating-point matrix elements.
///
/// Required by the decompositions and by approximate comparisons, which need
/// `sqrt`, `abs`, and infinities. Implemented for `f32` and `f64`.
pub trait FloatScalar: Scalar + Float {}

impl<T: Scalar + Float> FloatScalar for T {}

/// Read-only access to a matrix-like type.
///
/// The factorization kernels are written against this trait so they can run
/// on any row/column addressable storage, not only [`Matrix`](crate::Matrix).
pub trait MatrixRef<T> {
    fn nrows(&self) -> usize;
    fn ncols(&self) -> usize;
    fn get(&self, row: usize, col: usize) -> &T;
}

/// Mutable access to a matrix-like type.
///
/// Extends `MatrixRef` with mutable element access and a row swap, enabling
/// the in-place elimination and reflection kernels to work generically.
pub trait MatrixMut<T>: MatrixRef<T> {
    fn get_mut(&mut self, row: usize, col: usize) -> &mut T;

    /// Swap the first `len` entries of rows `a` and `b`.
    ///
    /// The default goes through `get_mut`; contiguous storage can override it.
    ///
    /// ```
    /// use matfact::{Matrix, MatrixMut};
    /// let mut m = Matrix::from_slice(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    /// m.swap_row_prefix(0, 1, 2);
    /// assert_eq!(m.row(0), &[4.0, 5.0, 3.0]);
    /// assert_eq!(m.row(1), &[1.0, 2.0, 6.0]);
    /// ```
    fn swap_row_prefix(&mut self, a: usize, b: usize, len: usize)
    where
        T: Copy,
    {
        if a == b {
            return;
        }
        for j in 0..len {
            let tmp = *self.get(a, j);
            *self.get_mut(a, j) = *self.get(b, j);
            *self.get_mut(b, j) = tmp;
        }
    }
}
