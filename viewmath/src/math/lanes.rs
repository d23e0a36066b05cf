//! Lane-parallel backing for [`Row`](super::Row).
//!
//! Every element type gets a portable lane-by-lane implementation. `f32` rows that are exactly
//! four lanes wide are routed through `glam::Vec4`, which uses SSE2, NEON or simd128 when the
//! target has them. The results are identical either way, the vector path only changes speed.
//!
//! Integer lanes wrap on overflow, so elimination on integer matrices never panics.
use core::ops::{Add, Div, Mul, Sub};
use glam::Vec4;

pub trait Lanes:
    Copy + Add<Output = Self> + Sub<Output = Self> + Mul<Output = Self> + Div<Output = Self>
{
    #[inline]
    fn lane_add(a: Self, b: Self) -> Self {
        a + b
    }

    #[inline]
    fn lane_sub(a: Self, b: Self) -> Self {
        a - b
    }

    #[inline]
    fn lane_mul(a: Self, b: Self) -> Self {
        a * b
    }

    #[inline]
    fn lane_div(a: Self, b: Self) -> Self {
        a / b
    }

    #[inline]
    fn add_lanes<const N: usize>(a: [Self; N], b: [Self; N]) -> [Self; N] {
        zip_map(a, b, Self::lane_add)
    }

    #[inline]
    fn sub_lanes<const N: usize>(a: [Self; N], b: [Self; N]) -> [Self; N] {
        zip_map(a, b, Self::lane_sub)
    }

    #[inline]
    fn mul_lanes<const N: usize>(a: [Self; N], b: [Self; N]) -> [Self; N] {
        zip_map(a, b, Self::lane_mul)
    }

    #[inline]
    fn div_lanes<const N: usize>(a: [Self; N], b: [Self; N]) -> [Self; N] {
        zip_map(a, b, Self::lane_div)
    }

    #[inline]
    fn scale_lanes<const N: usize>(a: [Self; N], s: Self) -> [Self; N] {
        a.map(|x| Self::lane_mul(x, s))
    }

    #[inline]
    fn div_scalar_lanes<const N: usize>(a: [Self; N], s: Self) -> [Self; N] {
        a.map(|x| Self::lane_div(x, s))
    }

    /// Lane `i` of the result is lane `permutation[i]` of `a`.
    #[inline]
    fn shuffle_lanes<const N: usize>(a: [Self; N], permutation: [usize; N]) -> [Self; N] {
        permutation.map(|i| a[i])
    }
}

#[inline]
pub(crate) fn zip_map<T: Copy, const N: usize>(
    a: [T; N],
    b: [T; N],
    f: impl Fn(T, T) -> T,
) -> [T; N] {
    let mut out = a;
    for n in 0..N {
        out[n] = f(a[n], b[n]);
    }
    out
}

/// Runs `op` on a `Vec4` pair when the row is four lanes wide, `None` otherwise.
#[inline]
fn vec4_op<const N: usize>(
    a: &[f32; N],
    b: &[f32; N],
    op: impl FnOnce(Vec4, Vec4) -> Vec4,
) -> Option<[f32; N]> {
    if N != 4 {
        return None;
    }
    let mut out = [0.0; N];
    op(Vec4::from_slice(a), Vec4::from_slice(b)).write_to_slice(&mut out);
    Some(out)
}

impl Lanes for f32 {
    #[inline]
    fn add_lanes<const N: usize>(a: [f32; N], b: [f32; N]) -> [f32; N] {
        vec4_op(&a, &b, |x, y| x + y).unwrap_or_else(|| zip_map(a, b, |x, y| x + y))
    }

    #[inline]
    fn sub_lanes<const N: usize>(a: [f32; N], b: [f32; N]) -> [f32; N] {
        vec4_op(&a, &b, |x, y| x - y).unwrap_or_else(|| zip_map(a, b, |x, y| x - y))
    }

    #[inline]
    fn mul_lanes<const N: usize>(a: [f32; N], b: [f32; N]) -> [f32; N] {
        vec4_op(&a, &b, |x, y| x * y).unwrap_or_else(|| zip_map(a, b, |x, y| x * y))
    }

    #[inline]
    fn div_lanes<const N: usize>(a: [f32; N], b: [f32; N]) -> [f32; N] {
        vec4_op(&a, &b, |x, y| x / y).unwrap_or_else(|| zip_map(a, b, |x, y| x / y))
    }

    #[inline]
    fn scale_lanes<const N: usize>(a: [f32; N], s: f32) -> [f32; N] {
        vec4_op(&a, &a, |x, _| x * s).unwrap_or_else(|| a.map(|x| x * s))
    }
}

impl Lanes for f64 {}

macro_rules! impl_wrapping_lanes {
    ($($t:ty),*) => {
        $(
            impl Lanes for $t {
                #[inline]
                fn lane_add(a: $t, b: $t) -> $t {
                    a.wrapping_add(b)
                }

                #[inline]
                fn lane_sub(a: $t, b: $t) -> $t {
                    a.wrapping_sub(b)
                }

                #[inline]
                fn lane_mul(a: $t, b: $t) -> $t {
                    a.wrapping_mul(b)
                }

                /// Panics on a zero divisor like plain integer division.
                #[inline]
                fn lane_div(a: $t, b: $t) -> $t {
                    a.wrapping_div(b)
                }
            }
        )*
    };
}

impl_wrapping_lanes!(i32, u32, i64, u64);

#[cfg(test)]
mod test {
    use super::{zip_map, Lanes};

    #[test]
    fn test_vec4_path_matches_portable() {
        let a = [1.5_f32, -2.0, 3.25, 8.0];
        let b = [0.5_f32, 4.0, -1.0, 2.0];
        assert_eq!(f32::add_lanes(a, b), zip_map(a, b, |x, y| x + y));
        assert_eq!(f32::sub_lanes(a, b), zip_map(a, b, |x, y| x - y));
        assert_eq!(f32::mul_lanes(a, b), zip_map(a, b, |x, y| x * y));
        assert_eq!(f32::div_lanes(a, b), zip_map(a, b, |x, y| x / y));
        assert_eq!(f32::scale_lanes(a, 3.0), a.map(|x| x * 3.0));
    }

    #[test]
    fn test_shuffle_lanes() {
        let a = [10_i32, 20, 30, 40, 50];
        assert_eq!(i32::shuffle_lanes(a, [4, 3, 2, 1, 0]), [50, 40, 30, 20, 10]);
        assert_eq!(i32::shuffle_lanes(a, [0, 0, 1, 1, 2]), [10, 10, 20, 20, 30]);

        let f = [1.0_f32, 2.0, 3.0, 4.0];
        assert_eq!(f32::shuffle_lanes(f, [3, 2, 1, 0]), [4.0, 3.0, 2.0, 1.0]);
    }

    #[test]
    fn test_integer_lanes_wrap() {
        assert_eq!(u32::sub_lanes([1, 5], [2, 5]), [u32::MAX, 0]);
        assert_eq!(u32::add_lanes([u32::MAX, 1], [1, 1]), [0, 2]);
        let squared = 70_000_i32.wrapping_mul(70_000);
        assert_eq!(i32::mul_lanes([70_000, -3], [70_000, 2]), [squared, -6]);
        assert_eq!(i32::div_scalar_lanes([i32::MIN, 9], -1), [i32::MIN, -9]);
        assert_eq!(i64::scale_lanes([i64::MAX, 2], 2), [-2, 4]);
    }

    #[test]
    fn test_odd_width_f32_falls_back() {
        let a = [1.0_f32, 2.0, 3.0];
        let b = [4.0_f32, 5.0, 6.0];
        assert_eq!(f32::add_lanes(a, b), [5.0, 7.0, 9.0]);
    }
}
