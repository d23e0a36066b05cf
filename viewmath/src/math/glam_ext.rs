use super::{Float, Row};
use core::{
    fmt,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
};
use glam::{DVec3, Vec3};

/// The 3-vector operations the camera and the 4x4 factories need.
///
/// Implemented for `glam::Vec3` (`f32`) and `glam::DVec3` (`f64`).
pub trait Vector3:
    Copy
    + fmt::Debug
    + PartialEq
    + Add<Output = Self>
    + Sub<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
    + Send
    + Sync
    + 'static
{
    type Scalar: Float;

    fn new(x: Self::Scalar, y: Self::Scalar, z: Self::Scalar) -> Self;
    fn x(self) -> Self::Scalar;
    fn y(self) -> Self::Scalar;
    fn z(self) -> Self::Scalar;
    fn dot(self, rhs: Self) -> Self::Scalar;
    fn cross(self, rhs: Self) -> Self;
    fn normalize(self) -> Self;
    fn scale(self, rhs: Self::Scalar) -> Self;

    /// Normalizes with the fast approximate inverse square root, accurate to about 0.2%.
    #[inline]
    fn normalize_fast(self) -> Self {
        self.scale(self.dot(self).finv_sqrt())
    }

    /// Homogeneous row `(x, y, z, w)`.
    #[inline]
    fn to_row(self, w: Self::Scalar) -> Row<Self::Scalar, 4> {
        Row::new([self.x(), self.y(), self.z(), w])
    }

    /// Drops the fourth lane.
    #[inline]
    fn from_row(row: &Row<Self::Scalar, 4>) -> Self {
        Self::new(row[0], row[1], row[2])
    }
}

macro_rules! impl_vector3 {
    ($vec:ty, $t:ty) => {
        impl Vector3 for $vec {
            type Scalar = $t;

            #[inline]
            fn new(x: $t, y: $t, z: $t) -> Self {
                <$vec>::new(x, y, z)
            }

            #[inline]
            fn x(self) -> $t {
                self.x
            }

            #[inline]
            fn y(self) -> $t {
                self.y
            }

            #[inline]
            fn z(self) -> $t {
                self.z
            }

            #[inline]
            fn dot(self, rhs: Self) -> $t {
                <$vec>::dot(self, rhs)
            }

            #[inline]
            fn cross(self, rhs: Self) -> Self {
                <$vec>::cross(self, rhs)
            }

            #[inline]
            fn normalize(self) -> Self {
                <$vec>::normalize(self)
            }

            #[inline]
            fn scale(self, rhs: $t) -> Self {
                self * rhs
            }
        }
    };
}

impl_vector3!(Vec3, f32);
impl_vector3!(DVec3, f64);

#[cfg(test)]
mod test {
    use super::Vector3;
    use crate::math::Row;
    use glam::{DVec3, Vec3};

    #[test]
    fn test_normalize_fast() {
        let v = Vec3::new(3.0, -4.0, 12.0);
        let exact = Vector3::normalize(v);
        let fast = v.normalize_fast();
        assert!(exact.abs_diff_eq(fast, 3e-3));

        let d = DVec3::new(1.0, 2.0, 2.0);
        assert!(Vector3::normalize(d).abs_diff_eq(d.normalize_fast(), 3e-3));
    }

    #[test]
    fn test_rows() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        let r = v.to_row(1.0);
        assert_eq!(r, Row::new([1.0, 2.0, 3.0, 1.0]));
        assert_eq!(<Vec3 as Vector3>::from_row(&r), v);
    }
}
