use std::time::{Duration, Instant};

/// Drives uniform animation from wall-clock time.
///
/// Each tick adds the time since the previous tick, clamped, to the elapsed
/// total. A stalled window resumes its animation where it left off instead of
/// jumping.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    elapsed: Duration,
    dt_max: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::with_max_step(Duration::from_millis(250))
    }

    pub fn with_max_step(dt_max: Duration) -> Self {
        Self {
            last: Instant::now(),
            elapsed: Duration::ZERO,
            dt_max,
        }
    }

    /// Restarts delta measurement without touching elapsed time, so the
    /// time spent suspended is not counted.
    pub fn reset(&mut self) {
        self.restart_at(Instant::now());
    }

    /// Advances the clock and returns the elapsed animation time in seconds.
    pub fn tick(&mut self) -> f32 {
        self.advance(Instant::now())
    }

    fn restart_at(&mut self, now: Instant) {
        self.last = now;
    }

    fn advance(&mut self, now: Instant) -> f32 {
        let dt = now.saturating_duration_since(self.last).min(self.dt_max);
        self.last = now;
        self.elapsed += dt;
        self.elapsed.as_secs_f32()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn elapsed_accumulates_deltas() {
        let mut clock = FrameClock::new();
        let start = clock.last;
        assert!(close(clock.advance(start + Duration::from_millis(100)), 0.1));
        assert!(close(clock.advance(start + Duration::from_millis(150)), 0.15));
    }

    #[test]
    fn long_stall_is_clamped() {
        let mut clock = FrameClock::with_max_step(Duration::from_millis(100));
        let start = clock.last;
        assert!(close(clock.advance(start + Duration::from_secs(10)), 0.1));
    }

    #[test]
    fn time_going_backwards_adds_nothing() {
        let mut clock = FrameClock::new();
        let start = clock.last;
        clock.advance(start + Duration::from_millis(20));
        assert!(close(clock.advance(start), 0.02));
    }

    #[test]
    fn restart_skips_suspended_time() {
        let mut clock = FrameClock::new();
        let start = clock.last;
        clock.advance(start + Duration::from_millis(100));

        clock.restart_at(start + Duration::from_secs(5));
        let elapsed = clock.advance(start + Duration::from_secs(5) + Duration::from_millis(20));
        assert!(close(elapsed, 0.12));
    }

    #[test]
    fn reset_keeps_elapsed() {
        let mut clock = FrameClock::new();
        let start = clock.last;
        clock.advance(start + Duration::from_millis(50));
        clock.reset();
        assert!(close(clock.elapsed.as_secs_f32(), 0.05));
    }
}
