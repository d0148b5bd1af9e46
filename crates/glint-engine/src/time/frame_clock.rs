use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous frame tick, in seconds.
    pub dt: f32,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,
}

/// Frame clock producing [`FrameTime`] snapshots.
///
/// Delta time is clamped: the minimum keeps tight loops from producing
/// zero-dt frames, the maximum keeps motion from exploding after a stall
/// (debugger pause, window drag, minimize).
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
            dt_min: Duration::from_micros(100),
            dt_max: Duration::from_millis(250),
        }
    }

    /// Resets the baseline, e.g. after the loop was suspended.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    /// Advances the clock and returns the elapsed frame time.
    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max);
        self.last = now;

        FrameTime {
            dt: dt.as_secs_f32(),
            now,
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dt_stays_within_clamp_bounds() {
        let mut clock = FrameClock::new();
        // Immediate tick: raw dt is near zero, clamped up to the minimum.
        let ft = clock.tick();
        assert!(ft.dt >= 0.0001);

        // Simulate a long stall by backdating the baseline.
        clock.last = Instant::now() - Duration::from_secs(5);
        let ft = clock.tick();
        assert!(ft.dt <= 0.25 + f32::EPSILON);
    }
}
