use log::warn;
use std::time::Duration;

/// Converts variable frame deltas into a whole number of fixed-size camera steps.
pub struct TimeAccumulator {
    accumulated: Duration,
    frame: u64,
    steps: u32,
    max_steps: u32,
    step: Duration,
    time_dilation: f32,
}

impl Default for TimeAccumulator {
    fn default() -> Self {
        Self::new(Duration::from_secs(1) / 60)
    }
}

impl TimeAccumulator {
    pub fn new(step: Duration) -> Self {
        TimeAccumulator {
            accumulated: Duration::ZERO,
            frame: 0,
            steps: 0,
            max_steps: 4,
            step,
            time_dilation: 1.0,
        }
    }

    pub fn update(&mut self, delta: Duration) {
        self.frame += 1;
        self.accumulated += if self.time_dilation == 1.0 {
            delta
        } else {
            delta.mul_f32(self.time_dilation)
        };
        self.steps = (self.accumulated.as_nanos() / self.step.as_nanos()) as u32;
        if self.steps > self.max_steps {
            warn!(
                "frame {}: capping camera steps {} at {} (delta {}s, accumulated {}s)",
                self.frame,
                self.steps,
                self.max_steps,
                delta.as_secs_f64(),
                self.accumulated.as_secs_f64(),
            );
            self.accumulated = Duration::ZERO;
            self.steps = self.max_steps;
        } else {
            self.accumulated -= self.step * self.steps;
        }
    }

    pub fn step_secs(&self) -> f32 {
        self.step.as_secs_f32()
    }

    pub fn num_steps(&self) -> u32 {
        self.steps
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn time_dilation(&self) -> f32 {
        self.time_dilation
    }

    pub fn set_time_dilation(&mut self, time_dilation: f32) {
        self.time_dilation = time_dilation;
    }
}
