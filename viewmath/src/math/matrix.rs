use super::{identity, ops::impl_linear_ops, Linear, Row, Scalar};
use crate::error::MathError;
use approx::{AbsDiffEq, RelativeEq};
use core::{
    fmt,
    ops::{Index, IndexMut, Mul, MulAssign, Not},
};

pub type Matrix3<T> = Matrix<T, 3>;
pub type Matrix4<T> = Matrix<T, 4>;
pub type Matrix3f = Matrix3<f32>;
pub type Matrix4f = Matrix4<f32>;
pub type Matrix4d = Matrix4<f64>;
pub type Matrix4i = Matrix4<i32>;
pub type Matrix4u = Matrix4<u32>;

/// A square `N x N` matrix stored as `N` rows.
///
/// Row vectors are transformed by right multiplication, `v * m`, so transforms compose left to
/// right: `v * a * b` applies `a` first.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Matrix<T, const N: usize> {
    pub rows: [Row<T, N>; N],
}

impl<T: Scalar, const N: usize> Matrix<T, N> {
    #[inline]
    pub fn zero() -> Self {
        Matrix {
            rows: [Row::zero(); N],
        }
    }

    #[inline]
    pub const fn from_rows(rows: [Row<T, N>; N]) -> Self {
        Matrix { rows }
    }

    /// The identity matrix, copied out of the process-wide shared instance.
    #[inline]
    pub fn identity() -> Self {
        *Self::identity_ref()
    }

    /// The process-wide identity for this `(T, N)`, built on first use.
    pub fn identity_ref() -> &'static Self {
        identity::shared(|| {
            let mut mat = Matrix::zero();
            for i in 0..N {
                mat.rows[i][i] = T::ONE;
            }
            mat
        })
    }

    #[inline]
    pub fn row(&self, index: usize) -> Row<T, N> {
        self.rows[index]
    }

    pub fn transposed(&self) -> Self {
        let mut mat = Matrix::zero();
        for i in 0..N {
            for j in 0..N {
                mat.rows[j][i] = self.rows[i][j];
            }
        }
        mat
    }

    pub fn transpose(&mut self) -> &mut Self {
        *self = self.transposed();
        self
    }

    /// Determinant by forward elimination without row exchanges.
    ///
    /// This is best-effort. An elimination step whose pivot is zero is skipped, so a matrix that
    /// needs row exchanges (a zero on the diagonal with non-zero entries below it) gets a wrong
    /// answer instead of an error. Use [`Matrix::try_determinant`] to detect that case.
    ///
    /// Integer elements use truncating division and wrapping arithmetic, so the result is only
    /// exact when every elimination step divides evenly.
    pub fn determinant(&self) -> T {
        let mut tmp = self.rows;
        forward_eliminate::<T, _, N>(&mut tmp);
        diagonal_product(&tmp)
    }

    /// Like [`Matrix::determinant`], but reports the zero pivots that would make it wrong.
    ///
    /// A zero pivot with only zeros below it is fine: the column is already eliminated and the
    /// determinant is zero.
    pub fn try_determinant(&self) -> Result<T, MathError> {
        let mut tmp = self.rows;
        let report = forward_eliminate::<T, _, N>(&mut tmp);
        match report.unresolved {
            Some(column) => Err(MathError::ZeroPivot { column }),
            None => Ok(diagonal_product(&tmp)),
        }
    }

    /// Gauss-Jordan inverse, best-effort.
    ///
    /// The matrix must be non-singular and must not need row exchanges. Otherwise the zero-pivot
    /// steps are skipped and the returned matrix is not an inverse. Use [`Matrix::try_inversed`]
    /// when that cannot be guaranteed.
    pub fn inversed(&self) -> Self {
        gauss_jordan(self).0
    }

    /// Replaces `self` with [`Matrix::inversed`], with the same precondition.
    pub fn inverse(&mut self) -> &mut Self {
        *self = self.inversed();
        self
    }

    /// Gauss-Jordan inverse that fails instead of returning a best-effort value.
    pub fn try_inversed(&self) -> Result<Self, MathError> {
        match gauss_jordan(self) {
            (inv, None) => Ok(inv),
            (_, Some(column)) => Err(MathError::Singular { column }),
        }
    }

    /// Inverts in place. On error `self` is left unchanged.
    pub fn try_inverse(&mut self) -> Result<&mut Self, MathError> {
        *self = self.try_inversed()?;
        Ok(self)
    }
}

/// One row of the augmented matrix `[A | I]` used by Gauss-Jordan inversion.
#[derive(Copy, Clone, Debug)]
struct AugmentedRow<T, const N: usize> {
    left: Row<T, N>,
    right: Row<T, N>,
}

impl<T: Scalar, const N: usize> Linear<T> for AugmentedRow<T, N> {
    #[inline]
    fn add(self, rhs: Self) -> Self {
        AugmentedRow {
            left: self.left + rhs.left,
            right: self.right + rhs.right,
        }
    }

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        AugmentedRow {
            left: self.left - rhs.left,
            right: self.right - rhs.right,
        }
    }

    #[inline]
    fn scale(self, rhs: T) -> Self {
        AugmentedRow {
            left: self.left * rhs,
            right: self.right * rhs,
        }
    }

    #[inline]
    fn div_scalar(self, rhs: T) -> Self {
        AugmentedRow {
            left: self.left / rhs,
            right: self.right / rhs,
        }
    }

    #[inline]
    fn map(self, f: impl Fn(T) -> T) -> Self {
        AugmentedRow {
            left: Linear::map(self.left, &f),
            right: Linear::map(self.right, &f),
        }
    }
}

impl<T, const N: usize> Index<usize> for AugmentedRow<T, N> {
    type Output = T;
    #[inline]
    fn index(&self, index: usize) -> &T {
        if index < N {
            &self.left[index]
        } else {
            &self.right[index - N]
        }
    }
}

#[derive(Default)]
struct EliminationReport {
    /// First pivot column that was zero.
    zero_pivot: Option<usize>,
    /// First zero pivot column that still had non-zero entries below it.
    unresolved: Option<usize>,
}

/// `rows[target] -= rows[pivot] * rows[target][pivot] / rows[pivot][pivot]`.
#[inline]
fn eliminate<T, R>(rows: &mut [R], pivot: usize, target: usize)
where
    T: Scalar,
    R: Linear<T> + Index<usize, Output = T>,
{
    let factor = rows[target][pivot];
    let delta = rows[pivot].scale(factor).div_scalar(rows[pivot][pivot]);
    rows[target] = rows[target].sub(delta);
}

/// Zeroes everything below the diagonal, left to right, skipping steps with a zero pivot.
fn forward_eliminate<T, R, const N: usize>(rows: &mut [R; N]) -> EliminationReport
where
    T: Scalar,
    R: Linear<T> + Index<usize, Output = T>,
{
    let mut report = EliminationReport::default();
    for i in 1..N {
        let pivot = i - 1;
        if rows[pivot][pivot] == T::ZERO {
            log::debug!("zero pivot in column {}, skipping elimination step", pivot);
            report.zero_pivot.get_or_insert(pivot);
            if (i..N).any(|j| rows[j][pivot] != T::ZERO) {
                report.unresolved.get_or_insert(pivot);
            }
            continue;
        }
        for j in i..N {
            eliminate::<T, R>(rows, pivot, j);
        }
    }
    report
}

/// Zeroes everything above the diagonal, right to left, skipping steps with a zero pivot.
fn backward_eliminate<T, R, const N: usize>(rows: &mut [R; N]) -> Option<usize>
where
    T: Scalar,
    R: Linear<T> + Index<usize, Output = T>,
{
    let mut zero_pivot = None;
    for i in (0..N.saturating_sub(1)).rev() {
        let pivot = i + 1;
        if rows[pivot][pivot] == T::ZERO {
            log::debug!("zero pivot in column {}, skipping elimination step", pivot);
            zero_pivot.get_or_insert(pivot);
            continue;
        }
        for j in (0..=i).rev() {
            eliminate::<T, R>(rows, pivot, j);
        }
    }
    zero_pivot
}

fn diagonal_product<T: Scalar, const N: usize>(rows: &[Row<T, N>; N]) -> T {
    (0..N).fold(T::ONE, |det, i| T::lane_mul(det, rows[i][i]))
}

/// Returns the best-effort inverse and the first column whose pivot was zero, if any.
fn gauss_jordan<T: Scalar, const N: usize>(m: &Matrix<T, N>) -> (Matrix<T, N>, Option<usize>) {
    let id = Matrix::<T, N>::identity_ref();
    let mut tmp = [AugmentedRow {
        left: Row::zero(),
        right: Row::zero(),
    }; N];
    for i in 0..N {
        tmp[i] = AugmentedRow {
            left: m.rows[i],
            right: id.rows[i],
        };
    }

    let forward = forward_eliminate::<T, _, N>(&mut tmp);
    let backward = backward_eliminate::<T, _, N>(&mut tmp);
    let mut singular = forward.zero_pivot.or(backward);

    // make the main diagonal 1
    for (i, row) in tmp.iter_mut().enumerate() {
        let diagonal = row.left[i];
        if diagonal == T::ZERO {
            singular.get_or_insert(i);
            continue;
        }
        *row = row.div_scalar(diagonal);
    }

    let mut inv = Matrix::zero();
    for (dst, src) in inv.rows.iter_mut().zip(tmp.iter()) {
        *dst = src.right;
    }
    (inv, singular)
}

impl<T: Scalar, const N: usize> Default for Matrix<T, N> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<T: Scalar, const N: usize> From<[Row<T, N>; N]> for Matrix<T, N> {
    #[inline]
    fn from(rows: [Row<T, N>; N]) -> Self {
        Matrix { rows }
    }
}

impl<T: Scalar, const N: usize> From<[[T; N]; N]> for Matrix<T, N> {
    #[inline]
    fn from(rows: [[T; N]; N]) -> Self {
        Matrix {
            rows: rows.map(Row::new),
        }
    }
}

impl<T: Scalar, const N: usize> Linear<T> for Matrix<T, N> {
    #[inline]
    fn add(self, rhs: Self) -> Self {
        let mut tmp = self;
        for (lhs, rhs) in tmp.rows.iter_mut().zip(rhs.rows.iter()) {
            *lhs += *rhs;
        }
        tmp
    }

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        let mut tmp = self;
        for (lhs, rhs) in tmp.rows.iter_mut().zip(rhs.rows.iter()) {
            *lhs -= *rhs;
        }
        tmp
    }

    #[inline]
    fn scale(self, rhs: T) -> Self {
        Matrix {
            rows: self.rows.map(|row| row * rhs),
        }
    }

    #[inline]
    fn div_scalar(self, rhs: T) -> Self {
        Matrix {
            rows: self.rows.map(|row| row / rhs),
        }
    }

    #[inline]
    fn map(self, f: impl Fn(T) -> T) -> Self {
        Matrix {
            rows: self.rows.map(|row| Linear::map(row, &f)),
        }
    }
}

impl_linear_ops!(Matrix);

impl<T: Scalar, const N: usize> Mul for Matrix<T, N> {
    type Output = Self;

    /// `C[i] = sum over k of A[i][k] * B[k]`, accumulating scaled rows of `B`.
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Matrix {
            rows: self.rows.map(|row| row * rhs),
        }
    }
}

impl<T: Scalar, const N: usize> MulAssign for Matrix<T, N> {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl<T: Scalar, const N: usize> Mul<Matrix<T, N>> for Row<T, N> {
    type Output = Row<T, N>;

    /// Transforms a row vector, `v * m`.
    #[inline]
    fn mul(self, rhs: Matrix<T, N>) -> Row<T, N> {
        let mut tmp = Row::zero();
        for k in 0..N {
            tmp += rhs.rows[k] * self[k];
        }
        tmp
    }
}

impl<T: Scalar, const N: usize> Not for Matrix<T, N> {
    type Output = T;

    /// Alias for [`Matrix::determinant`], so a singular matrix reads as zero.
    #[inline]
    fn not(self) -> T {
        self.determinant()
    }
}

impl<T, const N: usize> Index<usize> for Matrix<T, N> {
    type Output = Row<T, N>;
    #[inline]
    fn index(&self, index: usize) -> &Row<T, N> {
        &self.rows[index]
    }
}

impl<T, const N: usize> IndexMut<usize> for Matrix<T, N> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Row<T, N> {
        &mut self.rows[index]
    }
}

impl<T: fmt::Display, const N: usize> fmt::Display for Matrix<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

impl<T: Scalar + AbsDiffEq<Epsilon = T>, const N: usize> AbsDiffEq for Matrix<T, N> {
    type Epsilon = T;

    fn default_epsilon() -> T {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: T) -> bool {
        self.rows
            .iter()
            .zip(other.rows.iter())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl<T: Scalar + RelativeEq<Epsilon = T>, const N: usize> RelativeEq for Matrix<T, N> {
    fn default_max_relative() -> T {
        T::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: T, max_relative: T) -> bool {
        self.rows
            .iter()
            .zip(other.rows.iter())
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}

#[cfg(test)]
mod test {
    use super::{Matrix, Matrix4d, Matrix4f};
    use crate::{error::MathError, math::Row};
    use approx::assert_abs_diff_eq;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    fn random_matrix<const N: usize>(rng: &mut Pcg32) -> Matrix<f64, N> {
        let mut mat = Matrix::zero();
        for i in 0..N {
            for j in 0..N {
                mat.rows[i][j] = rng.gen_range(-1.0..1.0);
            }
        }
        mat
    }

    /// Diagonally dominant, so elimination without row exchanges is well conditioned.
    fn random_invertible<const N: usize>(rng: &mut Pcg32) -> Matrix<f64, N> {
        let mut mat = random_matrix::<N>(rng);
        for i in 0..N {
            mat.rows[i][i] += N as f64 + 1.0;
        }
        mat
    }

    fn m1() -> Matrix4f {
        Matrix::from([
            [1.0, 2.0, 3.0, 4.0],
            [1.0, 3.0, 4.0, 5.0],
            [1.0, 4.0, 5.0, 6.0],
            [1.0, 5.0, 6.0, 7.0],
        ])
    }

    #[test]
    fn test_identity() {
        let id = Matrix4f::identity();
        for i in 0..4 {
            for j in 0..4 {
                assert_eq!(id[i][j], if i == j { 1.0 } else { 0.0 });
            }
        }
        assert!(std::ptr::eq(Matrix4f::identity_ref(), Matrix4f::identity_ref()));
        assert_eq!(Matrix::<i32, 3>::identity().rows[2], Row::new([0, 0, 1]));
    }

    #[test]
    fn test_identity_shared_across_threads() {
        let addrs: Vec<usize> = (0..8)
            .map(|_| std::thread::spawn(|| Matrix::<f64, 5>::identity_ref() as *const _ as usize))
            .collect::<Vec<_>>()
            .into_iter()
            .map(|t| t.join().unwrap())
            .collect();
        assert!(addrs.iter().all(|&a| a == addrs[0]));
    }

    #[test]
    fn test_mul_identity() {
        let mut rng = Pcg32::seed_from_u64(1);
        let a = random_matrix::<4>(&mut rng);
        let id = Matrix4d::identity();
        assert_abs_diff_eq!(a * id, a, epsilon = 1e-12);
        assert_abs_diff_eq!(id * a, a, epsilon = 1e-12);

        let b = m1();
        assert_abs_diff_eq!(b * Matrix4f::identity(), b, epsilon = 1e-6);
        assert_abs_diff_eq!(Matrix4f::identity() * b, b, epsilon = 1e-6);

        let c = random_matrix::<3>(&mut rng);
        assert_abs_diff_eq!(c * Matrix::identity(), c, epsilon = 1e-12);
    }

    #[test]
    fn test_mul_row_accumulation() {
        let a = Matrix::<i32, 2>::from([[1, 2], [3, 4]]);
        let b = Matrix::<i32, 2>::from([[5, 6], [7, 8]]);
        assert_eq!(a * b, Matrix::from([[19, 22], [43, 50]]));

        let mut c = a;
        c *= b;
        assert_eq!(c, a * b);

        let v = Row::new([1, 1]);
        assert_eq!(v * a, Row::new([4, 6]));
    }

    #[test]
    fn test_mul_associative() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..16 {
            let a = random_matrix::<4>(&mut rng);
            let b = random_matrix::<4>(&mut rng);
            let c = random_matrix::<4>(&mut rng);
            assert_abs_diff_eq!((a * b) * c, a * (b * c), epsilon = 1e-9);
        }
    }

    #[test]
    fn test_add_sub() {
        let a = m1();
        let b = m1().transposed();
        assert_eq!((a + b) - b, a);
        let mut c = a;
        c += b;
        c -= a;
        assert_eq!(c, b);
        assert_eq!(a * 2.0, a + a);
        assert_eq!(-a + a, Matrix::zero());
    }

    #[test]
    fn test_transpose() {
        let a = m1();
        let t = a.transposed();
        assert_eq!(t[0], Row::new([1.0, 1.0, 1.0, 1.0]));
        assert_eq!(t[3], Row::new([4.0, 5.0, 6.0, 7.0]));
        assert_eq!(t.transposed(), a);

        let mut rng = Pcg32::seed_from_u64(3);
        let mut b = random_matrix::<4>(&mut rng);
        let original = b;
        b.transpose().transpose();
        assert_eq!(b, original);
    }

    #[test]
    fn test_determinant() {
        assert_eq!(Matrix4f::identity().determinant(), 1.0);
        assert_eq!(Matrix4d::identity().determinant(), 1.0);
        assert_eq!(!Matrix4d::identity(), 1.0);

        let a = Matrix::<f64, 3>::from([[2.0, 0.0, 1.0], [1.0, 3.0, 2.0], [1.0, 1.0, 2.0]]);
        assert_abs_diff_eq!(a.determinant(), 6.0, epsilon = 1e-12);
        assert_abs_diff_eq!(a.try_determinant().unwrap(), 6.0, epsilon = 1e-12);

        // the last row is a third of the sum of the first two
        let b = Matrix::<f64, 3>::from([[2.0, 0.0, 1.0], [1.0, 3.0, 2.0], [1.0, 1.0, 1.0]]);
        assert_abs_diff_eq!(b.determinant(), 0.0, epsilon = 1e-12);

        // rows 2..4 are linear combinations of the first two
        assert_abs_diff_eq!(m1().determinant(), 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_determinant_zero_row() {
        let mut rng = Pcg32::seed_from_u64(11);
        for zero_row in 0..4 {
            let mut a = random_matrix::<4>(&mut rng);
            a.rows[zero_row] = Row::zero();
            assert_eq!(a.determinant(), 0.0);
            assert_eq!(!a, 0.0);
        }

        // a zero last row never becomes a pivot, so nothing is left unresolved
        let mut a = random_matrix::<4>(&mut rng);
        a.rows[3] = Row::zero();
        assert_eq!(a.try_determinant(), Ok(0.0));
    }

    #[test]
    fn test_determinant_needs_row_exchange() {
        // det is -1, but the leading zero pivot cannot be eliminated without swapping rows
        let a = Matrix::<f64, 2>::from([[0.0, 1.0], [1.0, 0.0]]);
        assert_eq!(a.try_determinant(), Err(MathError::ZeroPivot { column: 0 }));
        assert_eq!(a.determinant(), 0.0);
    }

    #[test]
    fn test_integer_elimination_wraps() {
        let a = Matrix::<u32, 2>::from([[1, 2], [3, 4]]);
        assert_eq!(a.determinant(), 2_u32.wrapping_neg());
        assert_eq!(!a, u32::MAX - 1);

        let b = Matrix::<i32, 2>::from([[1, 2], [3, 4]]);
        assert_eq!(b.determinant(), -2);
        assert_eq!(b.try_determinant(), Ok(-2));

        // overflowing products must not panic
        let c = Matrix::<i32, 2>::from([[3, 70_000], [70_000, 1]]);
        let _ = c.determinant();
        let _ = c.inversed();

        let d = Matrix::<u32, 2>::from([[2, 1], [1, 1]]);
        assert!(d.try_inversed().is_ok());
        assert_eq!(Matrix::<u32, 3>::identity().inversed(), Matrix::identity());
        assert_eq!(
            Matrix::<i64, 2>::from([[0, 1], [1, 0]]).try_inversed(),
            Err(MathError::Singular { column: 0 })
        );
    }

    #[test]
    fn test_inverse() {
        let mut rng = Pcg32::seed_from_u64(5);
        for _ in 0..16 {
            let a = random_invertible::<4>(&mut rng);
            let inv = a.inversed();
            assert_abs_diff_eq!(a * inv, Matrix4d::identity(), epsilon = 1e-9);
            assert_abs_diff_eq!(inv * a, Matrix4d::identity(), epsilon = 1e-9);
            assert_eq!(a.try_inversed(), Ok(inv));
        }

        let a = Matrix4f::from([
            [4.0, 1.0, 0.0, 0.5],
            [1.0, 5.0, 1.0, 0.0],
            [0.0, 1.0, 6.0, 1.0],
            [0.5, 0.0, 1.0, 3.0],
        ]);
        assert_abs_diff_eq!(a * a.inversed(), Matrix4f::identity(), epsilon = 1e-4);

        let mut b = a;
        b.inverse();
        assert_eq!(b, a.inversed());
    }

    #[test]
    fn test_inverse_singular() {
        let a = m1();
        assert!(matches!(a.try_inversed(), Err(MathError::Singular { .. })));

        let mut b = Matrix::<f64, 3>::from([[1.0, 2.0, 3.0], [0.0, 0.0, 0.0], [4.0, 5.0, 6.0]]);
        let before = b;
        assert!(b.try_inverse().is_err());
        assert_eq!(b, before);

        // best-effort path must not panic
        let _ = b.inversed();
    }

    #[test]
    fn test_display() {
        let a = Matrix::<i32, 2>::from([[1, 2], [3, 4]]);
        assert_eq!(a.to_string(), "(1, 2)\n(3, 4)\n");
    }
}
