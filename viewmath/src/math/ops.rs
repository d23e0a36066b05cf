use super::Scalar;

/// The minimal arithmetic a type has to provide to get the full set of linear operators.
///
/// `impl_linear_ops!` derives `+ - += -=`, scalar `* / *= /=`, scalar-on-the-left `*` and
/// unary `-` from these four methods.
pub trait Linear<T: Scalar>: Copy {
    fn add(self, rhs: Self) -> Self;
    fn sub(self, rhs: Self) -> Self;
    fn scale(self, rhs: T) -> Self;
    fn div_scalar(self, rhs: T) -> Self;
    fn map(self, f: impl Fn(T) -> T) -> Self;
}

macro_rules! impl_linear_ops {
    ($ty:ident) => {
        impl<T: Scalar, const N: usize> core::ops::Add for $ty<T, N> {
            type Output = Self;
            #[inline]
            fn add(self, rhs: Self) -> Self {
                $crate::math::Linear::add(self, rhs)
            }
        }

        impl<T: Scalar, const N: usize> core::ops::Sub for $ty<T, N> {
            type Output = Self;
            #[inline]
            fn sub(self, rhs: Self) -> Self {
                $crate::math::Linear::sub(self, rhs)
            }
        }

        impl<T: Scalar, const N: usize> core::ops::AddAssign for $ty<T, N> {
            #[inline]
            fn add_assign(&mut self, rhs: Self) {
                *self = $crate::math::Linear::add(*self, rhs);
            }
        }

        impl<T: Scalar, const N: usize> core::ops::SubAssign for $ty<T, N> {
            #[inline]
            fn sub_assign(&mut self, rhs: Self) {
                *self = $crate::math::Linear::sub(*self, rhs);
            }
        }

        impl<T: Scalar, const N: usize> core::ops::Mul<T> for $ty<T, N> {
            type Output = Self;
            #[inline]
            fn mul(self, rhs: T) -> Self {
                $crate::math::Linear::scale(self, rhs)
            }
        }

        impl<T: Scalar, const N: usize> core::ops::Div<T> for $ty<T, N> {
            type Output = Self;
            #[inline]
            fn div(self, rhs: T) -> Self {
                $crate::math::Linear::div_scalar(self, rhs)
            }
        }

        impl<T: Scalar, const N: usize> core::ops::MulAssign<T> for $ty<T, N> {
            #[inline]
            fn mul_assign(&mut self, rhs: T) {
                *self = $crate::math::Linear::scale(*self, rhs);
            }
        }

        impl<T: Scalar, const N: usize> core::ops::DivAssign<T> for $ty<T, N> {
            #[inline]
            fn div_assign(&mut self, rhs: T) {
                *self = $crate::math::Linear::div_scalar(*self, rhs);
            }
        }

        impl<T: Scalar + core::ops::Neg<Output = T>, const N: usize> core::ops::Neg for $ty<T, N> {
            type Output = Self;
            #[inline]
            fn neg(self) -> Self {
                $crate::math::Linear::map(self, |x| -x)
            }
        }

        impl_linear_ops!(@lhs $ty => i32, u32, i64, u64, f32, f64);
    };
    (@lhs $ty:ident => $($t:ty),*) => {
        $(
            impl<const N: usize> core::ops::Mul<$ty<$t, N>> for $t {
                type Output = $ty<$t, N>;
                #[inline]
                fn mul(self, rhs: $ty<$t, N>) -> $ty<$t, N> {
                    $crate::math::Linear::scale(rhs, self)
                }
            }
        )*
    };
}

pub(crate) use impl_linear_ops;
