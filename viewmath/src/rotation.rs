//! Camera orientation as an orthonormal basis, updated by incremental angle deltas.
use crate::math::{Float, Scalar, Vector3};
use core::ops::{AddAssign, Index, IndexMut};

/// Rotation about the right axis, in radians.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pitch<T>(pub T);

/// Rotation about the up axis, in radians.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Yaw<T>(pub T);

/// Rotation about the direction axis, in radians.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Roll<T>(pub T);

/// Orthonormal basis indexed as `[0] = direction`, `[1] = right`, `[2] = up`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rotation<V> {
    basis: [V; 3],
}

impl<V: Vector3> Default for Rotation<V> {
    fn default() -> Self {
        let (o, l) = (V::Scalar::ZERO, V::Scalar::ONE);
        Rotation {
            basis: [V::new(o, o, l), V::new(l, o, o), V::new(o, l, o)],
        }
    }
}

/// Rotates `v` by `angle` radians about the unit vector `axis`.
fn rotate_about<V: Vector3>(v: V, axis: V, angle: V::Scalar) -> V {
    let (s, c) = angle.sin_cos();
    let along = axis.scale(axis.dot(v) * (V::Scalar::ONE - c));
    v.scale(c) + axis.cross(v).scale(s) + along
}

impl<V: Vector3> Rotation<V> {
    /// Builds the basis looking along `direction`, with `up` as a hint for the vertical axis.
    ///
    /// `direction` must not be parallel to `up`, otherwise the basis is not finite.
    pub fn looking(direction: V, up: V) -> Self {
        let direction = direction.normalize();
        let right = up.cross(direction).normalize();
        let up = direction.cross(right);
        Rotation {
            basis: [direction, right, up],
        }
    }

    #[inline]
    pub fn direction(&self) -> V {
        self.basis[0]
    }

    #[inline]
    pub fn right(&self) -> V {
        self.basis[1]
    }

    #[inline]
    pub fn up(&self) -> V {
        self.basis[2]
    }
}

impl<V> Index<usize> for Rotation<V> {
    type Output = V;
    #[inline]
    fn index(&self, index: usize) -> &V {
        &self.basis[index]
    }
}

impl<V> IndexMut<usize> for Rotation<V> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut V {
        &mut self.basis[index]
    }
}

impl<V: Vector3> AddAssign<Pitch<V::Scalar>> for Rotation<V> {
    fn add_assign(&mut self, Pitch(angle): Pitch<V::Scalar>) {
        let right = self.right();
        self.basis[0] = rotate_about(self.basis[0], right, angle);
        self.basis[2] = rotate_about(self.basis[2], right, angle);
    }
}

impl<V: Vector3> AddAssign<Yaw<V::Scalar>> for Rotation<V> {
    fn add_assign(&mut self, Yaw(angle): Yaw<V::Scalar>) {
        let up = self.up();
        self.basis[0] = rotate_about(self.basis[0], up, angle);
        self.basis[1] = rotate_about(self.basis[1], up, angle);
    }
}

impl<V: Vector3> AddAssign<Roll<V::Scalar>> for Rotation<V> {
    fn add_assign(&mut self, Roll(angle): Roll<V::Scalar>) {
        let direction = self.direction();
        self.basis[1] = rotate_about(self.basis[1], direction, angle);
        self.basis[2] = rotate_about(self.basis[2], direction, angle);
    }
}
