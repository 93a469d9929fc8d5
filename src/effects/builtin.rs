//! Built-in tag effects and transitions, and the static table that names them.

use serde::de::DeserializeOwned;

use crate::animation::ease::Ease;
use crate::effects::component::{
    EffectContext, MotionComponent, TagEffect, TransitionContext, TransitionEffect,
    TransitionPhase,
};
use crate::foundation::core::{Rgba8, Vec2};
use crate::foundation::error::{MotionError, MotionResult};
use crate::render::channels::ChannelSet;
use crate::render::mesh::QuadMut;

/// Builds a tag effect from a registry key and JSON params.
pub type TagEffectFactory = fn(&str, &serde_json::Value) -> MotionResult<Box<dyn TagEffect>>;
/// Builds a transition from a registry key and JSON params.
pub type TransitionFactory = fn(&str, &serde_json::Value) -> MotionResult<Box<dyn TransitionEffect>>;

/// Tag effect kinds available to profile definitions.
pub static TAG_EFFECTS: &[(&str, TagEffectFactory)] = &[
    ("wave", make_wave),
    ("shake", make_shake),
    ("rainbow", make_rainbow),
];

/// Transition kinds available to profile definitions.
pub static TRANSITIONS: &[(&str, TransitionFactory)] = &[
    ("cut", make_cut),
    ("fade", make_fade),
    ("pop", make_pop),
];

/// Build the tag effect `kind`, registered under `key` (defaults to `kind`).
pub fn create_tag_effect(
    kind: &str,
    key: Option<&str>,
    params: &serde_json::Value,
) -> MotionResult<Box<dyn TagEffect>> {
    let kind = kind.trim().to_ascii_lowercase();
    let factory = TAG_EFFECTS
        .iter()
        .find(|(k, _)| *k == kind)
        .map(|(_, f)| *f)
        .ok_or_else(|| MotionError::config(format!("unknown tag effect kind '{kind}'")))?;
    factory(key.unwrap_or(&kind), params)
}

/// Build the transition `kind`, registered under `key` (defaults to `kind`).
pub fn create_transition(
    kind: &str,
    key: Option<&str>,
    params: &serde_json::Value,
) -> MotionResult<Box<dyn TransitionEffect>> {
    let kind = kind.trim().to_ascii_lowercase();
    let factory = TRANSITIONS
        .iter()
        .find(|(k, _)| *k == kind)
        .map(|(_, f)| *f)
        .ok_or_else(|| MotionError::config(format!("unknown transition kind '{kind}'")))?;
    factory(key.unwrap_or(&kind), params)
}

fn parse_params<P: DeserializeOwned + Default>(
    kind: &str,
    params: &serde_json::Value,
) -> MotionResult<P> {
    if params.is_null() {
        return Ok(P::default());
    }
    serde_json::from_value(params.clone())
        .map_err(|e| MotionError::validation(format!("{kind} params: {e}")))
}

fn require_finite(kind: &str, field: &str, v: f64) -> MotionResult<()> {
    if !v.is_finite() {
        return Err(MotionError::validation(format!(
            "{kind}.{field} must be finite"
        )));
    }
    Ok(())
}

fn require_positive(kind: &str, field: &str, v: f64) -> MotionResult<()> {
    if !v.is_finite() || v <= 0.0 {
        return Err(MotionError::validation(format!(
            "{kind}.{field} must be finite and > 0"
        )));
    }
    Ok(())
}

fn mix64(mut z: u64) -> u64 {
    // SplitMix64 mixing function.
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

fn unit_f64(h: u64) -> f64 {
    (h >> 11) as f64 / (1u64 << 53) as f64
}

// Linear progress through a timed transition, saturating at 1.
fn progress(elapsed: f64, duration: f64) -> f64 {
    (elapsed / duration).clamp(0.0, 1.0)
}

/// Params of the `wave` effect.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WaveParams {
    /// Angular speed in radians per second.
    pub frequency: f64,
    /// Vertical offset in layout units.
    pub amplitude: f64,
    /// Phase difference between neighbouring characters, in degrees.
    pub phase_step_deg: f64,
}

impl Default for WaveParams {
    fn default() -> Self {
        Self {
            frequency: 6.0,
            amplitude: 3.0,
            phase_step_deg: 20.0,
        }
    }
}

/// Vertical sine offset; an integer tag attribute adds to the amplitude.
#[derive(Debug)]
pub struct Wave {
    key: String,
    params: WaveParams,
}

impl Wave {
    /// Validate `params` and build the effect.
    pub fn new(key: impl Into<String>, params: WaveParams) -> MotionResult<Self> {
        require_finite("wave", "frequency", params.frequency)?;
        require_finite("wave", "amplitude", params.amplitude)?;
        require_finite("wave", "phase_step_deg", params.phase_step_deg)?;
        Ok(Self {
            key: key.into(),
            params,
        })
    }
}

impl MotionComponent for Wave {
    fn key(&self) -> &str {
        &self.key
    }
}

impl TagEffect for Wave {
    fn validate_tag(&self, name: &str, attributes: Option<&str>) -> bool {
        name == self.key && attributes.is_none_or(|a| a.trim().parse::<i64>().is_ok())
    }

    fn apply(&self, ctx: &EffectContext<'_>, quad: &mut QuadMut<'_>) -> ChannelSet {
        let amplitude = self.params.amplitude + ctx.int_attribute().unwrap_or(0) as f64;
        let phase = ctx.animation_time * self.params.frequency
            + ctx.index as f64 * self.params.phase_step_deg.to_radians();
        quad.translate(Vec2::new(0.0, phase.sin() * amplitude));
        ChannelSet::POSITION
    }
}

fn make_wave(key: &str, params: &serde_json::Value) -> MotionResult<Box<dyn TagEffect>> {
    Ok(Box::new(Wave::new(key, parse_params("wave", params)?)?))
}

/// Params of the `shake` effect.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShakeParams {
    /// Maximum offset per axis.
    pub amount: f64,
    /// Seconds per jitter cycle.
    pub interval: f64,
    /// Hash seed.
    pub seed: u64,
}

impl Default for ShakeParams {
    fn default() -> Self {
        Self {
            amount: 2.0,
            interval: 0.1,
            seed: 0,
        }
    }
}

/// Deterministic per-character jitter during the first half of every interval.
#[derive(Debug)]
pub struct Shake {
    key: String,
    params: ShakeParams,
}

impl Shake {
    /// Validate `params` and build the effect.
    pub fn new(key: impl Into<String>, params: ShakeParams) -> MotionResult<Self> {
        require_finite("shake", "amount", params.amount)?;
        require_positive("shake", "interval", params.interval)?;
        Ok(Self {
            key: key.into(),
            params,
        })
    }
}

impl MotionComponent for Shake {
    fn key(&self) -> &str {
        &self.key
    }
}

impl TagEffect for Shake {
    fn apply(&self, ctx: &EffectContext<'_>, quad: &mut QuadMut<'_>) -> ChannelSet {
        let interval = self.params.interval;
        let cycle = (ctx.elapsed_visible / interval).floor();
        if ctx.elapsed_visible - cycle * interval >= interval * 0.5 {
            return ChannelSet::empty();
        }
        let h = mix64(self.params.seed ^ mix64(ctx.index as u64) ^ mix64(cycle as u64));
        let dx = (unit_f64(h) * 2.0 - 1.0) * self.params.amount;
        let dy = (unit_f64(mix64(h)) * 2.0 - 1.0) * self.params.amount;
        quad.translate(Vec2::new(dx, dy));
        ChannelSet::POSITION
    }
}

fn make_shake(key: &str, params: &serde_json::Value) -> MotionResult<Box<dyn TagEffect>> {
    Ok(Box::new(Shake::new(key, parse_params("shake", params)?)?))
}

/// Params of the `rainbow` effect.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RainbowParams {
    /// Hue cycles per second.
    pub speed: f64,
    /// Hue offset between neighbouring characters.
    pub spread: f64,
}

impl Default for RainbowParams {
    fn default() -> Self {
        Self {
            speed: 0.5,
            spread: 0.1,
        }
    }
}

/// Hue sweep that ping-pongs across the spectrum, keeping each vertex's alpha.
#[derive(Debug)]
pub struct Rainbow {
    key: String,
    params: RainbowParams,
}

impl Rainbow {
    /// Validate `params` and build the effect.
    pub fn new(key: impl Into<String>, params: RainbowParams) -> MotionResult<Self> {
        require_finite("rainbow", "speed", params.speed)?;
        require_finite("rainbow", "spread", params.spread)?;
        Ok(Self {
            key: key.into(),
            params,
        })
    }

    fn hue_at(&self, time: f64, index: usize) -> f64 {
        let t = (time * self.params.speed + index as f64 * self.params.spread).rem_euclid(2.0);
        if t > 1.0 { 2.0 - t } else { t }
    }
}

impl MotionComponent for Rainbow {
    fn key(&self) -> &str {
        &self.key
    }
}

impl TagEffect for Rainbow {
    fn apply(&self, ctx: &EffectContext<'_>, quad: &mut QuadMut<'_>) -> ChannelSet {
        let hue = self.hue_at(ctx.animation_time, ctx.index);
        for c in quad.colors.iter_mut() {
            *c = Rgba8::from_hsv(hue, 1.0, 1.0, c.a);
        }
        ChannelSet::COLOR
    }
}

fn make_rainbow(key: &str, params: &serde_json::Value) -> MotionResult<Box<dyn TagEffect>> {
    Ok(Box::new(Rainbow::new(key, parse_params("rainbow", params)?)?))
}

/// Instant transition: hidden characters collapse to a point.
#[derive(Debug)]
pub struct Cut {
    key: String,
}

impl Cut {
    /// Build the transition.
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl MotionComponent for Cut {
    fn key(&self) -> &str {
        &self.key
    }
}

impl TransitionEffect for Cut {
    fn apply(&self, ctx: &TransitionContext<'_>, quad: &mut QuadMut<'_>) -> ChannelSet {
        match ctx.phase {
            TransitionPhase::In => ChannelSet::empty(),
            TransitionPhase::Out => {
                quad.collapse();
                ChannelSet::POSITION
            }
        }
    }
}

#[derive(Default, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct NoParams {}

fn make_cut(key: &str, params: &serde_json::Value) -> MotionResult<Box<dyn TransitionEffect>> {
    let NoParams {} = parse_params("cut", params)?;
    Ok(Box::new(Cut::new(key)))
}

/// Params of the `fade` transition.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FadeParams {
    /// Seconds to fully fade.
    pub duration: f64,
    /// Progress curve.
    pub ease: Ease,
}

impl Default for FadeParams {
    fn default() -> Self {
        Self {
            duration: 0.3,
            ease: Ease::Linear,
        }
    }
}

/// Alpha fade in on reveal and out on hide.
#[derive(Debug)]
pub struct Fade {
    key: String,
    params: FadeParams,
}

impl Fade {
    /// Validate `params` and build the transition.
    pub fn new(key: impl Into<String>, params: FadeParams) -> MotionResult<Self> {
        require_positive("fade", "duration", params.duration)?;
        Ok(Self {
            key: key.into(),
            params,
        })
    }
}

impl MotionComponent for Fade {
    fn key(&self) -> &str {
        &self.key
    }
}

impl TransitionEffect for Fade {
    fn apply(&self, ctx: &TransitionContext<'_>, quad: &mut QuadMut<'_>) -> ChannelSet {
        let p = progress(ctx.elapsed, self.params.duration);
        let factor = match ctx.phase {
            TransitionPhase::In if p >= 1.0 => return ChannelSet::empty(),
            TransitionPhase::In => self.params.ease.apply(p),
            TransitionPhase::Out => self.params.ease.reversed(p),
        };
        quad.multiply_alpha(factor);
        ChannelSet::COLOR
    }
}

fn make_fade(key: &str, params: &serde_json::Value) -> MotionResult<Box<dyn TransitionEffect>> {
    Ok(Box::new(Fade::new(key, parse_params("fade", params)?)?))
}

/// Params of the `pop` transition.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PopParams {
    /// Seconds to reach full size.
    pub duration: f64,
    /// Scale curve.
    pub ease: Ease,
}

impl Default for PopParams {
    fn default() -> Self {
        Self {
            duration: 0.25,
            ease: Ease::OutBack,
        }
    }
}

/// Scale up from the quad center on reveal, down on hide.
#[derive(Debug)]
pub struct Pop {
    key: String,
    params: PopParams,
}

impl Pop {
    /// Validate `params` and build the transition.
    pub fn new(key: impl Into<String>, params: PopParams) -> MotionResult<Self> {
        require_positive("pop", "duration", params.duration)?;
        Ok(Self {
            key: key.into(),
            params,
        })
    }
}

impl MotionComponent for Pop {
    fn key(&self) -> &str {
        &self.key
    }
}

impl TransitionEffect for Pop {
    fn apply(&self, ctx: &TransitionContext<'_>, quad: &mut QuadMut<'_>) -> ChannelSet {
        let p = progress(ctx.elapsed, self.params.duration);
        let scale = match ctx.phase {
            TransitionPhase::In if p >= 1.0 => return ChannelSet::empty(),
            TransitionPhase::In => self.params.ease.apply(p),
            TransitionPhase::Out => self.params.ease.reversed(p).max(0.0),
        };
        quad.scale_about_center(scale);
        ChannelSet::POSITION
    }
}

fn make_pop(key: &str, params: &serde_json::Value) -> MotionResult<Box<dyn TransitionEffect>> {
    Ok(Box::new(Pop::new(key, parse_params("pop", params)?)?))
}

#[cfg(test)]
#[path = "../../tests/unit/effects/builtin.rs"]
mod tests;
