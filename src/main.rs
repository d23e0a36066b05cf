mod time_accumulator;

use glam::Vec3;
use log::{debug, info, warn};
use std::{error::Error, time::Duration};
use time_accumulator::TimeAccumulator;
use viewmath::{load_projection, save_projection, Camera, Projection, Yaw};

const PROJECTION_PATH: &str = "projection.json";
const FRAME_COUNT: u32 = 12;
const TURN_RATE: f32 = 0.5;
const MOVE_SPEED: f32 = 2.0;
const SLOW_MOTION: f32 = 0.5;

fn load_or_create_projection() -> Result<Projection<f32>, Box<dyn Error>> {
    match load_projection(PROJECTION_PATH) {
        Ok(projection) => {
            info!("loaded {}", PROJECTION_PATH);
            Ok(projection)
        }
        Err(err) => {
            warn!("{}: {}, writing defaults", PROJECTION_PATH, err);
            let projection = Projection::default();
            save_projection(PROJECTION_PATH, &projection)?;
            Ok(projection)
        }
    }
}

fn camera_update(camera: &mut Camera<Vec3>, accum: &TimeAccumulator) {
    let step_secs = accum.step_secs();
    for _ in 0..accum.num_steps() {
        *camera += Yaw(TURN_RATE * step_secs);
        let forward = camera.direction() * (MOVE_SPEED * step_secs);
        camera.translate(forward);
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let projection = load_or_create_projection()?;
    let mut camera = Camera::with(
        Vec3::new(0.0, 1.0, -5.0),
        Default::default(),
        projection,
    );
    info!("ortholinear:\n{}", camera.ortholinear());
    info!("frustum:\n{}", camera.frustum());

    let mut accum = TimeAccumulator::default();
    // uneven frame times, the occasional long frame gets capped
    let frame_times = [16, 17, 15, 33, 16, 120];
    for frame in 0..FRAME_COUNT {
        let delta = Duration::from_millis(frame_times[frame as usize % frame_times.len()]);
        if frame == FRAME_COUNT / 2 {
            accum.set_time_dilation(accum.time_dilation() * SLOW_MOTION);
            info!("time dilation: {}", accum.time_dilation());
        }
        accum.update(delta);
        camera_update(&mut camera, &accum);

        let view = camera.view();
        debug!("frame {} took {} steps", accum.frame(), accum.num_steps());
        info!(
            "frame {}: position {} direction {} det {}",
            frame,
            camera.position(),
            camera.direction(),
            view.determinant()
        );
    }
    info!("view:\n{}", camera.view());

    Ok(())
}
