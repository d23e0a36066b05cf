use crate::{
    error::ConfigError,
    math::{Float, Matrix4, Row},
};
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

/// Clip volume settings shared by the ortholinear and frustum matrices.
///
/// `width` spans the vertical clip bounds and `height` the horizontal ones.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(
    from = "ProjectionConfig<T>",
    bound(
        serialize = "T: Serialize",
        deserialize = "T: Float + Deserialize<'de>"
    )
)]
pub struct Projection<T> {
    /// Near plane.
    pub distance: T,
    pub far: T,
    pub size: T,
    pub width: T,
    pub height: T,
}

impl<T: Float> Default for Projection<T> {
    fn default() -> Self {
        let size = default_size();
        Projection {
            distance: default_distance(),
            far: default_far(),
            size,
            width: size,
            height: size,
        }
    }
}

impl<T: Float> Projection<T> {
    /// Sets `size` and resets `width` and `height` to it.
    pub fn resize(&mut self, size: T) {
        self.size = size;
        self.width = size;
        self.height = size;
    }

    /// Clip bounds as `(left, right, bottom, top, near, far)`.
    fn bounds(&self) -> (T, T, T, T, T, T) {
        let half_h = self.height * T::HALF;
        let half_w = self.width * T::HALF;
        (-half_h, half_h, -half_w, half_w, self.distance, self.far)
    }

    pub fn ortholinear_matrix(&self) -> Matrix4<T> {
        let (l, r, b, t, n, f) = self.bounds();
        let o = T::ZERO;
        Matrix4::from_rows([
            Row::new([T::TWO / (r - l), o, o, o]),
            Row::new([o, T::TWO / (t - b), o, o]),
            Row::new([o, o, T::TWO / (n - f), o]),
            Row::new([(r + l) / (l - r), (t + b) / (b - t), (f + n) / (n - f), T::ONE]),
        ])
    }

    pub fn frustum_matrix(&self) -> Matrix4<T> {
        let (l, r, b, t, n, f) = self.bounds();
        let o = T::ZERO;
        let n2 = T::TWO * n;
        Matrix4::from_rows([
            Row::new([n2 / (r - l), o, o, o]),
            Row::new([o, n2 / (t - b), o, o]),
            Row::new([(r + l) / (r - l), (t + b) / (t - b), (f + n) / (n - f), -T::ONE]),
            Row::new([o, o, n2 * f / (n - f), o]),
        ])
    }
}

fn default_distance<T: Float>() -> T {
    T::from_f64(0.1)
}

fn default_far<T: Float>() -> T {
    T::from_f64(1024.0)
}

fn default_size<T: Float>() -> T {
    T::from_f64(0.1)
}

/// On-disk form, `width` and `height` fall back to `size` when absent.
#[derive(Deserialize)]
#[serde(bound(deserialize = "T: Float + Deserialize<'de>"))]
struct ProjectionConfig<T> {
    #[serde(default = "default_distance")]
    distance: T,
    #[serde(default = "default_far")]
    far: T,
    #[serde(default = "default_size")]
    size: T,
    #[serde(default)]
    width: Option<T>,
    #[serde(default)]
    height: Option<T>,
}

impl<T: Float> From<ProjectionConfig<T>> for Projection<T> {
    fn from(config: ProjectionConfig<T>) -> Self {
        Projection {
            distance: config.distance,
            far: config.far,
            size: config.size,
            width: config.width.unwrap_or(config.size),
            height: config.height.unwrap_or(config.size),
        }
    }
}

pub fn load_projection<T, P>(path: P) -> Result<Projection<T>, ConfigError>
where
    T: Float + for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let projection = serde_json::from_reader(reader)?;

    Ok(projection)
}

pub fn save_projection<T, P>(path: P, projection: &Projection<T>) -> Result<(), ConfigError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let file = File::create(path)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, projection)?;

    Ok(())
}
