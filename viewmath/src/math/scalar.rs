use super::lanes::Lanes;
use core::{
    fmt,
    ops::{AddAssign, DivAssign, MulAssign, Neg, SubAssign},
};

/// Element type of a [`Row`](super::Row) or [`Matrix`](super::Matrix).
///
/// Implemented for `i32`, `u32`, `i64`, `u64`, `f32` and `f64`.
pub trait Scalar:
    Lanes
    + fmt::Debug
    + fmt::Display
    + PartialEq
    + PartialOrd
    + Default
    + AddAssign
    + SubAssign
    + MulAssign
    + DivAssign
    + Send
    + Sync
    + 'static
{
    const ZERO: Self;
    const ONE: Self;
}

/// Floating point scalars, required by anything that needs trigonometry or square roots.
pub trait Float: Scalar + Neg<Output = Self> {
    const HALF: Self;
    const TWO: Self;
    const PI: Self;

    fn sqrt(self) -> Self;
    fn abs(self) -> Self;
    fn sin_cos(self) -> (Self, Self);
    fn is_finite(self) -> bool;
    fn from_f64(v: f64) -> Self;

    /// Approximate `1 / sqrt(self)` using the bit-level estimate refined by one Newton step.
    fn finv_sqrt(self) -> Self;

    /// Raw bit-level estimate of `1 / sqrt(self)` without the Newton step.
    fn ffinv_sqrt(self) -> Self;
}

/// Standard numeric conversion between element types, with `as` semantics.
pub trait AsScalar<T>: Copy {
    fn as_scalar(self) -> T;
}

macro_rules! impl_scalar {
    ($zero:expr, $one:expr => $($t:ty),*) => {
        $(
            impl Scalar for $t {
                const ZERO: Self = $zero;
                const ONE: Self = $one;
            }
        )*
    };
}

impl_scalar!(0, 1 => i32, u32, i64, u64);
impl_scalar!(0.0, 1.0 => f32, f64);

macro_rules! impl_as_scalar {
    ($($from:ty),*) => {
        $(impl_as_scalar!(@to $from => i32, u32, i64, u64, f32, f64);)*
    };
    (@to $from:ty => $($to:ty),*) => {
        $(
            impl AsScalar<$to> for $from {
                #[inline]
                fn as_scalar(self) -> $to {
                    self as $to
                }
            }
        )*
    };
}

impl_as_scalar!(i32, u32, i64, u64, f32, f64);

impl Float for f32 {
    const HALF: Self = 0.5;
    const TWO: Self = 2.0;
    const PI: Self = core::f32::consts::PI;

    #[inline]
    fn sqrt(self) -> Self {
        f32::sqrt(self)
    }

    #[inline]
    fn abs(self) -> Self {
        f32::abs(self)
    }

    #[inline]
    fn sin_cos(self) -> (Self, Self) {
        f32::sin_cos(self)
    }

    #[inline]
    fn is_finite(self) -> bool {
        f32::is_finite(self)
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        v as f32
    }

    #[inline]
    fn finv_sqrt(self) -> Self {
        let x2 = self * 0.5;
        let y = self.ffinv_sqrt();
        y * (1.5 - x2 * y * y)
    }

    #[inline]
    fn ffinv_sqrt(self) -> Self {
        f32::from_bits(0x5f37_59df - (self.to_bits() >> 1))
    }
}

impl Float for f64 {
    const HALF: Self = 0.5;
    const TWO: Self = 2.0;
    const PI: Self = core::f64::consts::PI;

    #[inline]
    fn sqrt(self) -> Self {
        f64::sqrt(self)
    }

    #[inline]
    fn abs(self) -> Self {
        f64::abs(self)
    }

    #[inline]
    fn sin_cos(self) -> (Self, Self) {
        f64::sin_cos(self)
    }

    #[inline]
    fn is_finite(self) -> bool {
        f64::is_finite(self)
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        v
    }

    #[inline]
    fn finv_sqrt(self) -> Self {
        let x2 = self * 0.5;
        let y = self.ffinv_sqrt();
        y * (1.5 - x2 * y * y)
    }

    #[inline]
    fn ffinv_sqrt(self) -> Self {
        f64::from_bits(0x5fe6_f7ce_d916_8800 - (self.to_bits() >> 1))
    }
}
