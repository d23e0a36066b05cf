pub mod camera;
pub mod error;
pub mod math;
pub mod rotation;

pub use camera::{load_projection, save_projection, Camera, Projection};
pub use error::{ConfigError, MathError};
pub use math::{Matrix, Matrix3, Matrix4, Row, Vector3};
pub use rotation::{Pitch, Roll, Rotation, Yaw};
