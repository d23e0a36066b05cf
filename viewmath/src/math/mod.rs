mod glam_ext;
mod identity;
mod lanes;
mod matrix;
mod ops;
mod row;
mod scalar;
mod transform;

pub use glam_ext::Vector3;
pub use lanes::Lanes;
pub use matrix::{Matrix, Matrix3, Matrix3f, Matrix4, Matrix4d, Matrix4f, Matrix4i, Matrix4u};
pub use ops::Linear;
pub use row::Row;
pub use scalar::{AsScalar, Float, Scalar};

pub type Row3f = Row<f32, 3>;
pub type Row4f = Row<f32, 4>;
pub type Row4d = Row<f64, 4>;
pub type Row4i = Row<i32, 4>;
