use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous tick, in seconds. Never negative.
    pub dt: f32,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Monotonic clock producing per-frame delta times for the animation update.
///
/// The first tick after construction (or after [`reset`](Self::reset)) reports
/// `dt = 0` so that start-up latency (device creation, texture uploads) never
/// shows up as one large animation step.
///
/// Delta time is clamped to `max_dt` to keep the accumulated animation stable
/// after the process is stalled by a debugger, a minimized window, etc.
#[derive(Debug, Clone)]
pub struct AnimationClock {
    last: Option<Instant>,
    frame_index: u64,
    max_dt: Duration,
}

impl AnimationClock {
    pub const DEFAULT_MAX_DT: Duration = Duration::from_millis(250);

    pub fn new() -> Self {
        Self::with_max_dt(Self::DEFAULT_MAX_DT)
    }

    /// Creates a clock with a custom upper clamp for delta time.
    pub fn with_max_dt(max_dt: Duration) -> Self {
        Self {
            last: None,
            frame_index: 0,
            max_dt,
        }
    }

    /// Forgets the previous timestamp; the next tick reports `dt = 0`.
    pub fn reset(&mut self) {
        self.last = None;
    }

    /// Number of ticks taken so far.
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// Advances the clock using the monotonic system clock.
    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    /// Advances the clock as if the current time were `now`.
    ///
    /// An instant earlier than the previous one yields `dt = 0` and does not move
    /// the baseline backwards.
    pub fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = match self.last {
            Some(last) => now.saturating_duration_since(last).min(self.max_dt),
            None => Duration::ZERO,
        };

        self.last = Some(match self.last {
            Some(last) if last > now => last,
            _ => now,
        });

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            now,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
    }
}

impl Default for AnimationClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    // ── first tick ────────────────────────────────────────────────────────

    #[test]
    fn first_tick_reports_zero() {
        let mut clock = AnimationClock::new();
        let t0 = Instant::now();
        assert_eq!(clock.tick_at(t0).dt, 0.0);
    }

    #[test]
    fn reset_makes_next_tick_zero() {
        let mut clock = AnimationClock::new();
        let t0 = Instant::now();
        clock.tick_at(t0);
        clock.tick_at(t0 + ms(16));
        clock.reset();
        assert_eq!(clock.tick_at(t0 + ms(200)).dt, 0.0);
    }

    // ── delta time ────────────────────────────────────────────────────────

    #[test]
    fn delta_is_time_since_previous_tick() {
        let mut clock = AnimationClock::new();
        let t0 = Instant::now();
        clock.tick_at(t0);
        let ft = clock.tick_at(t0 + ms(16));
        assert!((ft.dt - 0.016).abs() < 1e-6);
        let ft = clock.tick_at(t0 + ms(48));
        assert!((ft.dt - 0.032).abs() < 1e-6);
    }

    #[test]
    fn delta_is_clamped_to_max() {
        let mut clock = AnimationClock::with_max_dt(ms(100));
        let t0 = Instant::now();
        clock.tick_at(t0);
        let ft = clock.tick_at(t0 + Duration::from_secs(5));
        assert!((ft.dt - 0.1).abs() < 1e-6);
    }

    #[test]
    fn earlier_instant_yields_zero_and_keeps_baseline() {
        let mut clock = AnimationClock::new();
        let t0 = Instant::now() + ms(100);
        clock.tick_at(t0);
        assert_eq!(clock.tick_at(t0 - ms(50)).dt, 0.0);
        // Baseline stayed at t0.
        let ft = clock.tick_at(t0 + ms(10));
        assert!((ft.dt - 0.010).abs() < 1e-6);
    }

    // ── frame index ───────────────────────────────────────────────────────

    #[test]
    fn frame_index_counts_ticks() {
        let mut clock = AnimationClock::new();
        let t0 = Instant::now();
        assert_eq!(clock.tick_at(t0).frame_index, 0);
        assert_eq!(clock.tick_at(t0).frame_index, 1);
        assert_eq!(clock.frame_index(), 2);
    }
}
