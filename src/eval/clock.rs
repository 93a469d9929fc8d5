use crate::foundation::core::FrameRate;

/// Rate limiter turning real elapsed time into whole animation ticks.
#[derive(Clone, Copy, Debug)]
pub struct FrameClock {
    rate: FrameRate,
    accumulated: f64,
    animation_time: f64,
    ticks: u64,
}

impl FrameClock {
    /// Create a clock at `rate`, starting at time zero.
    pub fn new(rate: FrameRate) -> Self {
        Self {
            rate,
            accumulated: 0.0,
            animation_time: 0.0,
            ticks: 0,
        }
    }

    /// Accumulate `dt` seconds and return how many whole ticks became due.
    ///
    /// Non-finite or non-positive deltas are ignored.
    pub fn advance(&mut self, dt: f64) -> u64 {
        if !dt.is_finite() || dt <= 0.0 {
            return 0;
        }
        self.accumulated += dt;
        let interval = self.rate.interval_secs();
        if self.accumulated < interval {
            return 0;
        }
        let due = (self.accumulated / interval).floor();
        self.accumulated = (self.accumulated - due * interval).max(0.0);
        self.animation_time += due * interval;
        let due = due as u64;
        self.ticks += due;
        due
    }

    /// Change the tick rate, keeping accumulated time.
    pub fn set_rate(&mut self, rate: FrameRate) {
        self.rate = rate;
    }

    /// Current tick rate.
    pub fn rate(&self) -> FrameRate {
        self.rate
    }

    /// Animation time in seconds (whole ticks only).
    pub fn animation_time(&self) -> f64 {
        self.animation_time
    }

    /// Total ticks consumed.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Real time waiting for the next tick.
    pub fn pending(&self) -> f64 {
        self.accumulated
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(FrameRate::default())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/clock.rs"]
mod tests;
