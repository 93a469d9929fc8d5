use crate::foundation::error::{MotionError, MotionResult};

pub use kurbo::{Point, Vec2};

/// Straight (non-premultiplied) RGBA8 vertex color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Build a color from its four channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Return a copy with alpha multiplied by `factor` (clamped to `[0, 1]`).
    pub fn with_alpha_scaled(self, factor: f64) -> Self {
        let f = if factor.is_finite() {
            factor.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            a: (f64::from(self.a) * f).round() as u8,
            ..self
        }
    }

    /// Build a color from HSV components in `[0, 1]` with the given alpha.
    pub fn from_hsv(h: f64, s: f64, v: f64, a: u8) -> Self {
        let h = h.rem_euclid(1.0) * 6.0;
        let s = s.clamp(0.0, 1.0);
        let v = v.clamp(0.0, 1.0);
        let c = v * s;
        let x = c * (1.0 - ((h % 2.0) - 1.0).abs());
        let m = v - c;
        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let to_u8 = |f: f64| ((f + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Self::new(to_u8(r), to_u8(g), to_u8(b), a)
    }
}

impl Default for Rgba8 {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Inclusive window `[lo, hi]` of logical character indices considered revealed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct VisibleWindow {
    /// First revealed index.
    pub lo: usize,
    /// Last revealed index (inclusive).
    pub hi: usize,
}

impl VisibleWindow {
    /// Window covering every index.
    pub const ALL: Self = Self {
        lo: 0,
        hi: usize::MAX,
    };

    /// Window revealing no index a layout can produce.
    pub const NONE: Self = Self {
        lo: usize::MAX,
        hi: usize::MAX,
    };

    /// Create a validated window with `lo <= hi`.
    pub fn new(lo: usize, hi: usize) -> MotionResult<Self> {
        if lo > hi {
            return Err(MotionError::validation("VisibleWindow lo must be <= hi"));
        }
        Ok(Self { lo, hi })
    }

    /// Window revealing the first `count` characters; `count == 0` reveals nothing.
    pub fn first(count: usize) -> Option<Self> {
        count.checked_sub(1).map(|hi| Self { lo: 0, hi })
    }

    /// Return `true` when `index` lies inside the window.
    pub fn contains(self, index: usize) -> bool {
        self.lo <= index && index <= self.hi
    }
}

impl Default for VisibleWindow {
    fn default() -> Self {
        Self::ALL
    }
}

/// Target composition rate in passes per second.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct FrameRate(f64);

impl FrameRate {
    /// Lowest accepted rate.
    pub const MIN: f64 = 4.0;
    /// Highest accepted rate.
    pub const MAX: f64 = 120.0;
    /// Default rate.
    pub const DEFAULT: Self = Self(24.0);

    /// Create a validated rate in `[MIN, MAX]`.
    pub fn new(per_sec: f64) -> MotionResult<Self> {
        if !per_sec.is_finite() || !(Self::MIN..=Self::MAX).contains(&per_sec) {
            return Err(MotionError::validation(format!(
                "frame_rate must be finite and within [{}, {}]",
                Self::MIN,
                Self::MAX
            )));
        }
        Ok(Self(per_sec))
    }

    /// Rate in passes per second.
    pub fn per_sec(self) -> f64 {
        self.0
    }

    /// Seconds per tick.
    pub fn interval_secs(self) -> f64 {
        1.0 / self.0
    }
}

impl TryFrom<f64> for FrameRate {
    type Error = MotionError;

    fn try_from(per_sec: f64) -> MotionResult<Self> {
        Self::new(per_sec)
    }
}

impl From<FrameRate> for f64 {
    fn from(rate: FrameRate) -> Self {
        rate.0
    }
}

impl Default for FrameRate {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
