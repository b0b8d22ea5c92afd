use std::time::Duration;

use bevy::prelude::*;

/// Drives one timed animation: advanced once per frame, reports normalized
/// progress, and finishes once elapsed time reaches the duration.
#[derive(Debug, Clone)]
pub struct Tween {
    timer: Timer,
}

impl Tween {
    pub fn new(duration: Duration) -> Self {
        Self {
            timer: Timer::new(duration, TimerMode::Once),
        }
    }

    pub fn from_seconds(seconds: f32) -> Self {
        Self::new(Duration::from_secs_f32(seconds.max(0.0)))
    }

    /// Advances by one frame and returns progress in [0, 1]. The final
    /// frame always reports exactly 1.0.
    pub fn advance(&mut self, delta: Duration) -> f32 {
        self.timer.tick(delta);
        self.progress()
    }

    pub fn progress(&self) -> f32 {
        if self.timer.finished() {
            1.0
        } else {
            self.timer.fraction().clamp(0.0, 1.0)
        }
    }

    pub fn finished(&self) -> bool {
        self.timer.finished()
    }
}
