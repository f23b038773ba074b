use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Clamped time since the previous tick, in seconds.
    pub dt: f32,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Monotonic frame counter, starting at zero.
    pub frame_index: u64,
}

/// Paced frame clock for a presenter loop.
///
/// `tick()` yields the clamped delta since the previous frame and schedules the
/// next deadline one `interval` later. `time_until_next()` tells the loop how long
/// to sleep. A presenter that falls behind does not try to catch up: the deadline
/// is rebased on the late tick.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    next: Instant,
    interval: Duration,
    frame_index: u64,
    dt_max: Duration,
}

impl FrameClock {
    /// Creates a clock targeting `fps` frames per second. `fps == 0` is treated as 1.
    pub fn with_rate(fps: u32) -> Self {
        let interval = Duration::from_secs_f64(1.0 / f64::from(fps.max(1)));
        let now = Instant::now();
        Self {
            last: now,
            next: now,
            interval,
            frame_index: 0,
            dt_max: Duration::from_millis(250),
        }
    }

    /// Target interval between frames.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let dt = now.saturating_duration_since(self.last).min(self.dt_max);

        self.last = now;
        self.next = if now > self.next + self.interval {
            now + self.interval
        } else {
            self.next + self.interval
        };

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            now,
            frame_index: self.frame_index,
        };
        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }

    /// Time left before the next frame is due; zero when already late.
    pub fn time_until_next(&self) -> Duration {
        self.next.saturating_duration_since(Instant::now())
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::with_rate(60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_index_increments() {
        let mut clock = FrameClock::with_rate(60);
        assert_eq!(clock.tick().frame_index, 0);
        assert_eq!(clock.tick().frame_index, 1);
        assert_eq!(clock.tick().frame_index, 2);
    }

    #[test]
    fn zero_rate_is_one_per_second() {
        let clock = FrameClock::with_rate(0);
        assert_eq!(clock.interval(), Duration::from_secs(1));
    }

    #[test]
    fn next_deadline_is_in_the_future_after_tick() {
        let mut clock = FrameClock::with_rate(1);
        clock.tick();
        let wait = clock.time_until_next();
        assert!(wait > Duration::from_millis(500));
        assert!(wait <= Duration::from_secs(1));
    }

    #[test]
    fn dt_is_clamped() {
        let mut clock = FrameClock::with_rate(60);
        let Some(past) = Instant::now().checked_sub(Duration::from_secs(5)) else {
            return;
        };
        clock.last = past;
        let ft = clock.tick();
        assert!(ft.dt <= 0.25 + f32::EPSILON);
    }
}
