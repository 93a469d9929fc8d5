/// Easing curve used by timed transitions.
///
/// `In*` curves accelerate from 0, `Out*` curves are their mirror image and decelerate into 1,
/// `InOut*` curves join both halves at `t = 0.5`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    /// Identity.
    #[default]
    Linear,
    /// Quadratic, accelerating.
    InQuad,
    /// Quadratic, decelerating.
    OutQuad,
    /// Quadratic, both ends.
    InOutQuad,
    /// Cubic, accelerating.
    InCubic,
    /// Cubic, decelerating.
    OutCubic,
    /// Cubic, both ends.
    InOutCubic,
    /// Decelerating with an overshoot peaking at about 1.1.
    OutBack,
}

impl Ease {
    const BACK_C1: f64 = 1.70158;

    /// Map `t` (clamped to `[0, 1]`) through the curve.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t.powi(2),
            Self::OutQuad => mirrored(t, 2),
            Self::InOutQuad => joined(t, 2),
            Self::InCubic => t.powi(3),
            Self::OutCubic => mirrored(t, 3),
            Self::InOutCubic => joined(t, 3),
            Self::OutBack => {
                let u = t - 1.0;
                1.0 + (Self::BACK_C1 + 1.0) * u.powi(3) + Self::BACK_C1 * u.powi(2)
            }
        }
    }

    /// `1 - apply(t)`: runs the curve from 1 down to 0, for outgoing transitions.
    pub fn reversed(self, t: f64) -> f64 {
        1.0 - self.apply(t)
    }
}

fn mirrored(t: f64, pow: i32) -> f64 {
    1.0 - (1.0 - t).powi(pow)
}

fn joined(t: f64, pow: i32) -> f64 {
    if t < 0.5 {
        2f64.powi(pow - 1) * t.powi(pow)
    } else {
        1.0 - (2.0 - 2.0 * t).powi(pow) / 2.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
