//! Simulation-time clock.
//!
//! The scene advances on whatever `dt` the host loop passes in, so time here
//! is simulation time, not wall-clock time. The clock owns the tick counter
//! used to age bodies and the elapsed time that drives spawning.
//!
//! # Example
//!
//! ```
//! use tumble::time::SimClock;
//!
//! let mut clock = SimClock::new();
//! clock.advance(0.25);
//! let step = clock.advance(0.25);
//! assert_eq!(step.now, 0.5);
//! assert_eq!(step.index, 2);
//! ```

/// The result of one [`SimClock::advance`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Step {
    /// Simulation time after the step.
    pub now: f64,
    /// Scaled seconds covered by the step. Zero while paused.
    pub dt: f32,
    /// Tick counter after the step.
    pub index: u64,
}

/// Tick-driven clock with pause and time scaling.
#[derive(Debug, Clone, PartialEq)]
pub struct SimClock {
    /// Seconds since start or reset. f64: a 1/60 s step must still register
    /// after weeks of runtime.
    now: f64,
    /// Scaled delta of the most recent advance.
    last_dt: f32,
    /// Unpaused advances since start or reset.
    ticks: u64,
    paused: bool,
    /// Multiplier applied to every `dt`.
    scale: f32,
}

impl SimClock {
    /// Clock at time zero, running at normal speed.
    pub fn new() -> Self {
        Self {
            now: 0.0,
            last_dt: 0.0,
            ticks: 0,
            paused: false,
            scale: 1.0,
        }
    }

    /// Advance by one tick of `dt` seconds.
    ///
    /// Negative and non-finite deltas count as zero but still tick. While
    /// paused neither time nor the tick counter moves.
    pub fn advance(&mut self, dt: f32) -> Step {
        if self.paused {
            self.last_dt = 0.0;
        } else {
            let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };
            self.last_dt = dt * self.scale;
            self.now += f64::from(self.last_dt);
            self.ticks += 1;
        }

        Step {
            now: self.now,
            dt: self.last_dt,
            index: self.ticks,
        }
    }

    /// Simulated seconds since start or reset.
    #[inline]
    pub fn elapsed(&self) -> f64 {
        self.now
    }

    /// Scaled delta of the most recent tick.
    #[inline]
    pub fn last_dt(&self) -> f32 {
        self.last_dt
    }

    /// Ticks since start or reset.
    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Whether time is paused.
    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Pause or resume time.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Current time scale multiplier.
    #[inline]
    pub fn time_scale(&self) -> f32 {
        self.scale
    }

    /// Multiplier on every `dt`. Negative values clamp to zero; NaN and
    /// infinities restore normal speed.
    pub fn set_time_scale(&mut self, scale: f32) {
        self.scale = if scale.is_finite() { scale.max(0.0) } else { 1.0 };
    }

    /// Back to time zero. Pause state and time scale are kept.
    pub fn reset(&mut self) {
        self.now = 0.0;
        self.last_dt = 0.0;
        self.ticks = 0;
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paused_clock_holds_still() {
        let mut clock = SimClock::new();
        clock.advance(0.5);
        clock.set_paused(true);

        let step = clock.advance(0.5);
        assert_eq!(step.now, 0.5);
        assert_eq!(step.dt, 0.0);
        assert_eq!(step.index, 1);

        clock.set_paused(false);
        clock.advance(0.5);
        assert_eq!(clock.elapsed(), 1.0);
    }

    #[test]
    fn test_time_scale() {
        let mut clock = SimClock::new();
        clock.set_time_scale(2.0);
        assert_eq!(clock.advance(0.25).dt, 0.5);

        clock.set_time_scale(-1.0);
        assert_eq!(clock.time_scale(), 0.0);
        clock.set_time_scale(f32::NAN);
        assert_eq!(clock.time_scale(), 1.0);
    }

    #[test]
    fn test_bad_delta_is_zero() {
        let mut clock = SimClock::new();
        assert_eq!(clock.advance(-1.0).dt, 0.0);
        assert_eq!(clock.advance(f32::NAN).dt, 0.0);
        assert_eq!(clock.advance(f32::INFINITY).dt, 0.0);
        assert_eq!(clock.elapsed(), 0.0);
        assert_eq!(clock.ticks(), 3);
    }

    #[test]
    fn test_small_steps_register_after_long_runtime() {
        let mut clock = SimClock::new();
        clock.advance(530_000.0);
        let start = clock.elapsed();

        for _ in 0..60 {
            clock.advance(1.0 / 60.0);
        }
        assert!((clock.elapsed() - start - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_reset_keeps_pause() {
        let mut clock = SimClock::new();
        clock.advance(1.0);
        clock.set_paused(true);
        clock.reset();
        assert_eq!(clock.elapsed(), 0.0);
        assert_eq!(clock.ticks(), 0);
        assert!(clock.is_paused());
    }
}
