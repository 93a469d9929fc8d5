use crate::config::model::ProfileDef;
use crate::effects::builtin::{create_tag_effect, create_transition};
use crate::effects::component::{TagEffect, TransitionEffect, TransitionPhase};
use crate::effects::registry::MotionCollection;
use crate::foundation::error::{MotionError, MotionResult};

/// The effects, transitions and actions a renderer may use.
#[derive(Debug, Default)]
pub struct MotionProfile {
    tag_effects: MotionCollection<dyn TagEffect>,
    transitions: MotionCollection<dyn TransitionEffect>,
    actions: Vec<String>,
    fallback_in: Option<String>,
    fallback_out: Option<String>,
}

impl MotionProfile {
    /// Empty profile.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a profile from its serde definition using the built-in effect table.
    pub fn from_def(def: &ProfileDef) -> MotionResult<Self> {
        let mut profile = Self::new();
        for c in &def.tag_effects {
            profile.add_tag_effect(create_tag_effect(&c.kind, c.key.as_deref(), &c.params)?)?;
        }
        for c in &def.transitions {
            profile.add_transition(create_transition(&c.kind, c.key.as_deref(), &c.params)?)?;
        }
        for a in &def.actions {
            profile.add_action(a)?;
        }
        profile.set_fallback(TransitionPhase::In, def.fallback_in.as_deref())?;
        profile.set_fallback(TransitionPhase::Out, def.fallback_out.as_deref())?;
        Ok(profile)
    }

    /// Register a tag effect.
    pub fn add_tag_effect(&mut self, effect: Box<dyn TagEffect>) -> MotionResult<()> {
        self.tag_effects.add(effect)
    }

    /// Register a transition.
    pub fn add_transition(&mut self, transition: Box<dyn TransitionEffect>) -> MotionResult<()> {
        self.transitions.add(transition)
    }

    /// Accept `{name}` as an action marker.
    pub fn add_action(&mut self, name: &str) -> MotionResult<()> {
        if name.trim().is_empty() {
            return Err(MotionError::registry("action name must be non-empty"));
        }
        if self.actions.iter().any(|a| a == name) {
            return Err(MotionError::registry(format!(
                "duplicate action name '{name}'"
            )));
        }
        self.actions.push(name.to_owned());
        Ok(())
    }

    /// Set or clear the transition used for `phase` when no tag selects one.
    pub fn set_fallback(&mut self, phase: TransitionPhase, key: Option<&str>) -> MotionResult<()> {
        if let Some(k) = key
            && !self.transitions.contains(k)
        {
            return Err(MotionError::registry(format!(
                "fallback transition '{k}' is not registered"
            )));
        }
        let slot = match phase {
            TransitionPhase::In => &mut self.fallback_in,
            TransitionPhase::Out => &mut self.fallback_out,
        };
        *slot = key.map(str::to_owned);
        Ok(())
    }

    /// Registered tag effects.
    pub fn tag_effects(&self) -> &MotionCollection<dyn TagEffect> {
        &self.tag_effects
    }

    /// Registered transitions.
    pub fn transitions(&self) -> &MotionCollection<dyn TransitionEffect> {
        &self.transitions
    }

    /// Accepted action names.
    pub fn actions(&self) -> &[String] {
        &self.actions
    }

    /// Tag effect for tag `name`.
    pub fn try_get_effect(&self, name: &str) -> Option<&dyn TagEffect> {
        let found = self.tag_effects.get(name);
        if found.is_none() {
            tracing::trace!(tag = name, "no tag effect registered");
        }
        found
    }

    /// Fallback transition for `phase`.
    pub fn try_get_transition(&self, phase: TransitionPhase) -> Option<&dyn TransitionEffect> {
        let key = match phase {
            TransitionPhase::In => self.fallback_in.as_deref(),
            TransitionPhase::Out => self.fallback_out.as_deref(),
        }?;
        self.transitions.get(key)
    }

    /// Transition for an explicit `requested` key, falling back to the phase default.
    pub fn resolve_transition(
        &self,
        requested: Option<&str>,
        phase: TransitionPhase,
    ) -> Option<&dyn TransitionEffect> {
        if let Some(key) = requested {
            if let Some(t) = self.transitions.get(key) {
                return Some(t);
            }
            tracing::trace!(key, "requested transition not registered");
        }
        self.try_get_transition(phase)
    }

    /// Whether `name` is motion markup under this profile.
    pub fn is_accepted(&self, name: &str, attributes: Option<&str>) -> bool {
        self.tag_effects
            .get(name)
            .is_some_and(|e| e.validate_tag(name, attributes))
            || self.actions.iter().any(|a| a == name)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/profile.rs"]
mod tests;
