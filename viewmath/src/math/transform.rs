//! 4x4 transform factories, in the row-vector convention used by [`Matrix`]: a point `p` is
//! transformed as `p.to_row(1) * m`, rotations act on the upper 3x3 block and translation
//! lives in the last row.
use super::{Float, Matrix, Row, Vector3};

impl<T: Float> Matrix<T, 4> {
    pub fn scale<V: Vector3<Scalar = T>>(v: V) -> Self {
        let (o, l) = (T::ZERO, T::ONE);
        Matrix::from_rows([
            Row::new([v.x(), o, o, o]),
            Row::new([o, v.y(), o, o]),
            Row::new([o, o, v.z(), o]),
            Row::new([o, o, o, l]),
        ])
    }

    pub fn translate<V: Vector3<Scalar = T>>(v: V) -> Self {
        let mut mat = Self::identity();
        mat.rows[3] = v.to_row(T::ONE);
        mat
    }

    /// Rotation about the x axis, `angle` in radians.
    pub fn rotate_x(angle: T) -> Self {
        let (s, c) = angle.sin_cos();
        let (o, l) = (T::ZERO, T::ONE);
        Matrix::from_rows([
            Row::new([l, o, o, o]),
            Row::new([o, c, s, o]),
            Row::new([o, -s, c, o]),
            Row::new([o, o, o, l]),
        ])
    }

    /// Rotation about the y axis, `angle` in radians.
    pub fn rotate_y(angle: T) -> Self {
        let (s, c) = angle.sin_cos();
        let (o, l) = (T::ZERO, T::ONE);
        Matrix::from_rows([
            Row::new([c, o, -s, o]),
            Row::new([o, l, o, o]),
            Row::new([s, o, c, o]),
            Row::new([o, o, o, l]),
        ])
    }

    /// Rotation about the z axis, `angle` in radians.
    pub fn rotate_z(angle: T) -> Self {
        let (s, c) = angle.sin_cos();
        let (o, l) = (T::ZERO, T::ONE);
        Matrix::from_rows([
            Row::new([c, s, o, o]),
            Row::new([-s, c, o, o]),
            Row::new([o, o, l, o]),
            Row::new([o, o, o, l]),
        ])
    }

    /// Rotation by `angle` radians about `axis` (Rodrigues' formula).
    ///
    /// `axis` must already be normalized, it is not checked.
    pub fn rotate<V: Vector3<Scalar = T>>(angle: T, axis: V) -> Self {
        let (s, c) = angle.sin_cos();
        let t = T::ONE - c;
        let (x, y, z) = (axis.x(), axis.y(), axis.z());
        let (o, l) = (T::ZERO, T::ONE);
        Matrix::from_rows([
            Row::new([c + x * x * t, x * y * t + z * s, x * z * t - y * s, o]),
            Row::new([x * y * t - z * s, c + y * y * t, y * z * t + x * s, o]),
            Row::new([x * z * t + y * s, y * z * t - x * s, c + z * z * t, o]),
            Row::new([o, o, o, l]),
        ])
    }

    /// Transforms a point, dividing by `w` when the result is not affine.
    pub fn transform_point<V: Vector3<Scalar = T>>(&self, point: V) -> V {
        let row = point.to_row(T::ONE) * *self;
        let w = row[3];
        if w == T::ZERO || w == T::ONE {
            V::from_row(&row)
        } else {
            V::from_row(&(row / w))
        }
    }

    /// Transforms a direction, ignoring the translation row.
    pub fn transform_vector<V: Vector3<Scalar = T>>(&self, vector: V) -> V {
        V::from_row(&(vector.to_row(T::ZERO) * *self))
    }
}
