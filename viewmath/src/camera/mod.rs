//! A camera holding position, orientation and projection settings, with its view, ortholinear
//! and frustum matrices recomputed lazily on first access after a change.
mod cache;
mod projection;

pub use projection::{load_projection, save_projection, Projection};

use crate::{
    math::{Matrix, Matrix4, Row, Scalar, Vector3},
    rotation::Rotation,
};
use cache::Cached;
use core::ops::AddAssign;
use glam::Vec3;
use log::trace;

#[derive(Clone, Debug)]
pub struct Camera<V: Vector3 = Vec3> {
    position: V,
    rotation: Rotation<V>,
    projection: Projection<V::Scalar>,
    view: Cached<Matrix4<V::Scalar>>,
    ortholinear: Cached<Matrix4<V::Scalar>>,
    frustum: Cached<Matrix4<V::Scalar>>,
}

impl<V: Vector3> Default for Camera<V> {
    fn default() -> Self {
        Self::new()
    }
}

fn view_matrix<V: Vector3>(position: V, rotation: &Rotation<V>) -> Matrix4<V::Scalar> {
    let (d, r, u) = (rotation.direction(), rotation.right(), rotation.up());
    let o = V::Scalar::ZERO;
    Matrix::from_rows([
        Row::new([r.x(), u.x(), d.x(), o]),
        Row::new([r.y(), u.y(), d.y(), o]),
        Row::new([r.z(), u.z(), d.z(), o]),
        Row::new([
            -position.dot(r),
            -position.dot(u),
            position.dot(d),
            V::Scalar::ONE,
        ]),
    ])
}

impl<V: Vector3> Camera<V> {
    /// Camera at the origin looking down `+z` with the default projection.
    pub fn new() -> Self {
        let o = V::Scalar::ZERO;
        Self::with(V::new(o, o, o), Rotation::default(), Projection::default())
    }

    pub fn at(position: V) -> Self {
        Self::with(position, Rotation::default(), Projection::default())
    }

    /// `direction` must not be parallel to `up`.
    pub fn looking(position: V, direction: V, up: V) -> Self {
        Self::with(
            position,
            Rotation::looking(direction, up),
            Projection::default(),
        )
    }

    pub fn with(position: V, rotation: Rotation<V>, projection: Projection<V::Scalar>) -> Self {
        let placeholder = Matrix4::identity();
        Camera {
            position,
            rotation,
            projection,
            view: Cached::new(placeholder),
            ortholinear: Cached::new(placeholder),
            frustum: Cached::new(placeholder),
        }
    }

    #[inline]
    pub fn position(&self) -> V {
        self.position
    }

    pub fn set_position(&mut self, position: V) {
        self.position = position;
        self.view.invalidate();
    }

    pub fn translate(&mut self, delta: V) {
        self.position += delta;
        self.view.invalidate();
    }

    #[inline]
    pub fn direction(&self) -> V {
        self.rotation.direction()
    }

    /// Rebuilds the basis around `direction`, keeping the current up vector as the hint.
    pub fn set_direction(&mut self, direction: V) {
        self.rotation = Rotation::looking(direction, self.rotation.up());
        self.view.invalidate();
    }

    #[inline]
    pub fn right(&self) -> V {
        self.rotation.right()
    }

    #[inline]
    pub fn up(&self) -> V {
        self.rotation.up()
    }

    #[inline]
    pub fn rotation(&self) -> &Rotation<V> {
        &self.rotation
    }

    pub fn set_rotation(&mut self, rotation: Rotation<V>) {
        self.rotation = rotation;
        self.view.invalidate();
    }

    /// Applies a [`Pitch`](crate::Pitch), [`Yaw`](crate::Yaw) or [`Roll`](crate::Roll) delta.
    pub fn rotate<D>(&mut self, delta: D)
    where
        Rotation<V>: AddAssign<D>,
    {
        self.rotation += delta;
        self.view.invalidate();
    }

    #[inline]
    pub fn projection(&self) -> &Projection<V::Scalar> {
        &self.projection
    }

    /// Marks the ortholinear and frustum matrices stale. The view is unaffected.
    pub fn projection_mut(&mut self) -> &mut Projection<V::Scalar> {
        self.ortholinear.invalidate();
        self.frustum.invalidate();
        &mut self.projection
    }

    pub fn view(&self) -> Matrix4<V::Scalar> {
        self.view.get_or_update(|| {
            trace!("recomputing view matrix");
            view_matrix(self.position, &self.rotation)
        })
    }

    /// Same as [`Camera::view`].
    #[inline]
    pub fn perspective(&self) -> Matrix4<V::Scalar> {
        self.view()
    }

    pub fn ortholinear(&self) -> Matrix4<V::Scalar> {
        self.ortholinear.get_or_update(|| {
            trace!("recomputing ortholinear matrix");
            self.projection.ortholinear_matrix()
        })
    }

    pub fn frustum(&self) -> Matrix4<V::Scalar> {
        self.frustum.get_or_update(|| {
            trace!("recomputing frustum matrix");
            self.projection.frustum_matrix()
        })
    }
}

impl<V: Vector3, D> AddAssign<D> for Camera<V>
where
    Rotation<V>: AddAssign<D>,
{
    #[inline]
    fn add_assign(&mut self, delta: D) {
        self.rotate(delta);
    }
}

#[cfg(test)]
mod test {
    use super::Camera;
    use crate::{
        math::{Matrix4, Matrix4d, Row},
        rotation::{Pitch, Roll, Yaw},
    };
    use approx::assert_relative_eq;
    use glam::{DVec3, Vec3};
    use std::{f32::consts::FRAC_PI_2, sync::Arc};

    #[test]
    fn test_default_view_is_identity() {
        let camera = Camera::<Vec3>::new();
        assert_eq!(camera.view(), Matrix4::identity());
        assert_eq!(camera.view()[3], Row::new([0.0, 0.0, 0.0, 1.0]));
        assert_eq!(camera.perspective(), camera.view());
    }

    #[test]
    fn test_view_translation_row() {
        let camera = Camera::at(DVec3::new(1.0, 2.0, 3.0));
        let view: Matrix4d = camera.view();
        assert_eq!(view[3], Row::new([-1.0, -2.0, 3.0, 1.0]));
        for i in 0..3 {
            assert_eq!(view[i], Matrix4d::identity()[i]);
        }
    }

    #[test]
    fn test_view_is_cached_until_moved() {
        let mut camera = Camera::<Vec3>::new();
        assert!(!camera.view.is_valid());
        let first = camera.view();
        assert!(camera.view.is_valid());
        assert_eq!(camera.view(), first);

        camera.translate(Vec3::new(0.0, 0.0, 2.0));
        assert!(!camera.view.is_valid());
        let moved = camera.view();
        assert_ne!(moved, first);
        assert_eq!(moved[3], Row::new([0.0, 0.0, 2.0, 1.0]));
        assert_eq!(camera.position(), Vec3::new(0.0, 0.0, 2.0));

        camera.set_position(Vec3::ZERO);
        assert_eq!(camera.view(), first);
    }

    #[test]
    fn test_validity_flags() {
        let mut camera = Camera::<Vec3>::new();
        camera.view();
        camera.ortholinear();
        camera.frustum();
        assert!(camera.view.is_valid());
        assert!(camera.ortholinear.is_valid());
        assert!(camera.frustum.is_valid());

        camera.projection_mut().far = 10.0;
        assert!(camera.view.is_valid());
        assert!(!camera.ortholinear.is_valid());
        assert!(!camera.frustum.is_valid());

        camera.ortholinear();
        camera.frustum();
        camera += Yaw(0.1_f32);
        assert!(!camera.view.is_valid());
        assert!(camera.ortholinear.is_valid());
        assert!(camera.frustum.is_valid());

        camera.view();
        camera.set_direction(Vec3::X);
        assert!(!camera.view.is_valid());
    }

    #[test]
    fn test_projection_change_is_visible() {
        let mut camera = Camera::<Vec3>::new();
        assert_relative_eq!(camera.ortholinear()[0][0], 20.0, epsilon = 1e-4);
        camera.projection_mut().resize(1.0);
        assert_relative_eq!(camera.ortholinear()[0][0], 2.0);
        assert_eq!(camera.frustum(), camera.projection().frustum_matrix());
    }

    #[test]
    fn test_rotation_deltas() {
        let mut camera = Camera::<Vec3>::new();
        camera += Yaw(FRAC_PI_2);
        assert!(camera.direction().abs_diff_eq(Vec3::X, 1e-6));
        camera.rotate(Yaw(-FRAC_PI_2));
        camera += Pitch(FRAC_PI_2);
        assert!(camera.up().abs_diff_eq(Vec3::Z, 1e-6));
        assert!(camera.direction().abs_diff_eq(Vec3::NEG_Y, 1e-6));
        camera += Roll(0.3_f32);
        assert_relative_eq!(camera.direction().length(), 1.0, epsilon = 1e-6);
        assert_relative_eq!(camera.right().dot(camera.up()), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_looking() {
        let camera = Camera::looking(Vec3::ZERO, Vec3::new(3.0, 0.0, 0.0), Vec3::Y);
        assert!(camera.direction().abs_diff_eq(Vec3::X, 1e-6));
        assert!(camera.right().abs_diff_eq(Vec3::NEG_Z, 1e-6));
        assert!(camera.up().abs_diff_eq(Vec3::Y, 1e-6));

        // the view maps the camera's own direction onto +z
        let ahead = camera.view().transform_vector(camera.direction());
        assert!(ahead.abs_diff_eq(Vec3::Z, 1e-6));
    }

    #[test]
    fn test_concurrent_view() {
        let mut camera = Camera::<Vec3>::at(Vec3::new(4.0, -1.0, 0.5));
        camera += Pitch(0.25_f32);
        let camera = Arc::new(camera);
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let camera = Arc::clone(&camera);
                std::thread::spawn(move || camera.view())
            })
            .collect();
        let expected = super::view_matrix(camera.position(), camera.rotation());
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    }

    #[test]
    fn test_clone_keeps_cache() {
        let camera = Camera::<DVec3>::at(DVec3::new(1.0, 1.0, 1.0));
        let view = camera.view();
        let copy = camera.clone();
        assert!(copy.view.is_valid());
        assert!(!copy.frustum.is_valid());
        assert_eq!(copy.view(), view);
    }
}
