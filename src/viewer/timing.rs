//! Per-step durations of a tile render.

use std::fmt;
use std::time::{Duration, Instant};

use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStep {
    Load,
    Transform,
    Project,
    Crop,
    Resize,
    Overlay,
}

impl fmt::Display for RenderStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RenderStep::Load => "load",
            RenderStep::Transform => "transform",
            RenderStep::Project => "project",
            RenderStep::Crop => "crop",
            RenderStep::Resize => "resize",
            RenderStep::Overlay => "overlay",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Default, Clone)]
pub struct RenderTimings {
    steps: Vec<(RenderStep, Duration)>,
}

impl RenderTimings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_step(&mut self, step: RenderStep, duration: Duration) {
        self.steps.push((step, duration));
    }

    pub fn record(&mut self, timer: Timer) {
        let (step, duration) = timer.stop();
        self.add_step(step, duration);
    }

    pub fn total_duration(&self) -> Duration {
        self.steps.iter().map(|(_, d)| *d).sum()
    }

    /// Summed duration of every occurrence of `step`.
    pub fn get_step(&self, step: RenderStep) -> Option<Duration> {
        let mut matching = self.steps.iter().filter(|(s, _)| *s == step).peekable();
        matching.peek()?;
        Some(matching.map(|(_, d)| *d).sum())
    }

    pub fn steps(&self) -> &[(RenderStep, Duration)] {
        &self.steps
    }

    pub fn log_summary(&self, tile: usize) {
        let total = self.total_duration();
        for (step, duration) in &self.steps {
            let percentage = if total.as_secs_f64() > 0.0 {
                duration.as_secs_f64() / total.as_secs_f64() * 100.0
            } else {
                0.0
            };
            debug!(tile, "{:<10} {:>9.3}ms ({:>5.1}%)", step, duration.as_secs_f64() * 1000.0, percentage);
        }
        debug!(tile, "Render total {:.3}ms", total.as_secs_f64() * 1000.0);
    }
}

pub struct Timer {
    start: Instant,
    step: RenderStep,
}

impl Timer {
    pub fn start(step: RenderStep) -> Self {
        Self {
            start: Instant::now(),
            step,
        }
    }

    pub fn stop(self) -> (RenderStep, Duration) {
        (self.step, self.start.elapsed())
    }
}
