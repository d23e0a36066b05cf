use super::{ops::impl_linear_ops, AsScalar, Linear, Scalar};
use approx::{AbsDiffEq, RelativeEq};
use core::{
    fmt,
    ops::{
        Div, DivAssign, Index, IndexMut, Mul, MulAssign, Shl, ShlAssign, Shr, ShrAssign,
    },
};

/// A fixed-length row of `N` scalars backed by lane-parallel storage.
#[derive(Copy, Clone, Debug, PartialEq)]
#[repr(C, align(16))]
pub struct Row<T, const N: usize>(pub(crate) [T; N]);

/// Builds a [`Row`] from an explicit list of 2 to `N` scalars, zero-padding the rest.
#[macro_export]
macro_rules! row {
    ($($value:expr),+ $(,)?) => {
        $crate::Row::from_partial(&[$($value),+])
    };
}

impl<T: Scalar, const N: usize> Row<T, N> {
    pub const SIZE: usize = N;

    #[inline]
    pub const fn new(values: [T; N]) -> Self {
        Self(values)
    }

    #[inline]
    pub fn zero() -> Self {
        Self([T::ZERO; N])
    }

    #[inline]
    pub fn splat(value: T) -> Self {
        Self([value; N])
    }

    /// Reads exactly `N` scalars.
    ///
    /// # Panics
    ///
    /// Panics if `values.len() != N`.
    pub fn from_slice(values: &[T]) -> Self {
        assert_eq!(
            values.len(),
            N,
            "Row::from_slice expects exactly {} values",
            N
        );
        let mut row = Self::zero();
        row.0.copy_from_slice(values);
        row
    }

    /// Sets the leading lanes from `values`, the remaining lanes are zero.
    ///
    /// # Panics
    ///
    /// Panics unless `2 <= values.len() <= N`.
    pub fn from_partial(values: &[T]) -> Self {
        assert!(
            values.len() >= 2 && values.len() <= N,
            "Row::from_partial expects between 2 and {} values, got {}",
            N,
            values.len()
        );
        let mut row = Self::zero();
        row.0[..values.len()].copy_from_slice(values);
        row
    }

    /// Converts from a row of another element type and/or length.
    ///
    /// Longer rows are truncated, shorter ones zero-padded, and each element is converted with
    /// `as` semantics.
    pub fn from_row<R, const S: usize>(row: &Row<R, S>) -> Self
    where
        R: Scalar + AsScalar<T>,
    {
        let mut tmp = Self::zero();
        for (dst, src) in tmp.0.iter_mut().zip(row.0.iter()) {
            *dst = src.as_scalar();
        }
        tmp
    }

    /// Converts `row` and appends `extra` after it.
    ///
    /// # Panics
    ///
    /// Panics unless `S + extra.len() == N`.
    pub fn extend_from<R, const S: usize>(row: &Row<R, S>, extra: &[R]) -> Self
    where
        R: Scalar + AsScalar<T>,
    {
        assert_eq!(
            S + extra.len(),
            N,
            "Row::extend_from needs {} extra values",
            N.saturating_sub(S)
        );
        let mut tmp = Self::from_row(row);
        for (dst, src) in tmp.0[S..].iter_mut().zip(extra.iter()) {
            *dst = src.as_scalar();
        }
        tmp
    }

    /// Returns a row whose lane `i` holds lane `permutation[i]` of `self`.
    ///
    /// # Panics
    ///
    /// Panics if any index in `permutation` is `>= N`.
    #[inline]
    pub fn shuffle(&self, permutation: [usize; N]) -> Self {
        Self(T::shuffle_lanes(self.0, permutation))
    }

    #[inline]
    pub fn dot(&self, rhs: &Self) -> T {
        T::mul_lanes(self.0, rhs.0)
            .iter()
            .fold(T::ZERO, |dot, &x| T::lane_add(dot, x))
    }

    #[inline]
    pub fn sum(&self) -> T {
        self.0.iter().fold(T::ZERO, |sum, &x| T::lane_add(sum, x))
    }

    #[inline]
    pub fn to_array(&self) -> [T; N] {
        self.0
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.0
    }
}

impl<T: Scalar, const N: usize> Default for Row<T, N> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<T: Scalar, const N: usize> From<T> for Row<T, N> {
    #[inline]
    fn from(value: T) -> Self {
        Self::splat(value)
    }
}

impl<T: Scalar, const N: usize> From<[T; N]> for Row<T, N> {
    #[inline]
    fn from(values: [T; N]) -> Self {
        Self(values)
    }
}

impl<T: Scalar, const N: usize> Linear<T> for Row<T, N> {
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(T::add_lanes(self.0, rhs.0))
    }

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self(T::sub_lanes(self.0, rhs.0))
    }

    #[inline]
    fn scale(self, rhs: T) -> Self {
        Self(T::scale_lanes(self.0, rhs))
    }

    #[inline]
    fn div_scalar(self, rhs: T) -> Self {
        Self(T::div_scalar_lanes(self.0, rhs))
    }

    #[inline]
    fn map(self, f: impl Fn(T) -> T) -> Self {
        Self(self.0.map(f))
    }
}

impl_linear_ops!(Row);

impl<T: Scalar, const N: usize> Mul for Row<T, N> {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self(T::mul_lanes(self.0, rhs.0))
    }
}

impl<T: Scalar, const N: usize> Div for Row<T, N> {
    type Output = Self;
    #[inline]
    fn div(self, rhs: Self) -> Self {
        Self(T::div_lanes(self.0, rhs.0))
    }
}

impl<T: Scalar, const N: usize> MulAssign for Row<T, N> {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        self.0 = T::mul_lanes(self.0, rhs.0);
    }
}

impl<T: Scalar, const N: usize> DivAssign for Row<T, N> {
    #[inline]
    fn div_assign(&mut self, rhs: Self) {
        self.0 = T::div_lanes(self.0, rhs.0);
    }
}

// only integer element types implement the shift operators
impl<T: Scalar + Shl<Output = T>, const N: usize> Shl for Row<T, N> {
    type Output = Self;
    #[inline]
    fn shl(self, rhs: Self) -> Self {
        Self(super::lanes::zip_map(self.0, rhs.0, |x, y| x << y))
    }
}

impl<T: Scalar + Shr<Output = T>, const N: usize> Shr for Row<T, N> {
    type Output = Self;
    #[inline]
    fn shr(self, rhs: Self) -> Self {
        Self(super::lanes::zip_map(self.0, rhs.0, |x, y| x >> y))
    }
}

impl<T: Scalar + Shl<Output = T>, const N: usize> ShlAssign for Row<T, N> {
    #[inline]
    fn shl_assign(&mut self, rhs: Self) {
        *self = *self << rhs;
    }
}

impl<T: Scalar + Shr<Output = T>, const N: usize> ShrAssign for Row<T, N> {
    #[inline]
    fn shr_assign(&mut self, rhs: Self) {
        *self = *self >> rhs;
    }
}

impl<T, const N: usize> Index<usize> for Row<T, N> {
    type Output = T;
    #[inline]
    fn index(&self, index: usize) -> &T {
        &self.0[index]
    }
}

impl<T, const N: usize> IndexMut<usize> for Row<T, N> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.0[index]
    }
}

impl<T: fmt::Display, const N: usize> fmt::Display for Row<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, value) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", value)?;
        }
        write!(f, ")")
    }
}

impl<T: Scalar + AbsDiffEq<Epsilon = T>, const N: usize> AbsDiffEq for Row<T, N> {
    type Epsilon = T;

    fn default_epsilon() -> T {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: T) -> bool {
        self.0
            .iter()
            .zip(other.0.iter())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl<T: Scalar + RelativeEq<Epsilon = T>, const N: usize> RelativeEq for Row<T, N> {
    fn default_max_relative() -> T {
        T::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: T, max_relative: T) -> bool {
        self.0
            .iter()
            .zip(other.0.iter())
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}
