use std::io::Read;

use crate::effects::profile::MotionProfile;
use crate::foundation::core::{FrameRate, VisibleWindow};
use crate::foundation::error::{MotionError, MotionResult};
use crate::render::engine::RendererOpts;

/// One registered component: a built-in `kind` with optional key and params.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComponentDef {
    /// Built-in kind name (`wave`, `fade`, ...).
    pub kind: String,
    /// Registry key; defaults to `kind`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Kind-specific params object.
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub params: serde_json::Value,
}

impl ComponentDef {
    /// Validate definition shape; params are checked when the component is built.
    pub fn validate(&self) -> MotionResult<()> {
        if self.kind.trim().is_empty() {
            return Err(MotionError::validation("component kind must be non-empty"));
        }
        if let Some(k) = &self.key
            && k.trim().is_empty()
        {
            return Err(MotionError::validation(
                "component key must be non-empty when set",
            ));
        }
        if !(self.params.is_null() || self.params.is_object()) {
            return Err(MotionError::validation(
                "component params must be an object when set",
            ));
        }
        Ok(())
    }

    /// Effective registry key.
    pub fn effective_key(&self) -> &str {
        self.key.as_deref().unwrap_or(&self.kind)
    }
}

/// Serializable description of a [`MotionProfile`].
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileDef {
    /// Tag effects, in registration order.
    #[serde(default)]
    pub tag_effects: Vec<ComponentDef>,
    /// Transitions, in registration order.
    #[serde(default)]
    pub transitions: Vec<ComponentDef>,
    /// Accepted action names.
    #[serde(default)]
    pub actions: Vec<String>,
    /// Transition key used for revealed characters without an explicit transition tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_in: Option<String>,
    /// Transition key used for hidden characters without an explicit transition tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_out: Option<String>,
}

impl ProfileDef {
    /// Validate definitions and cross-references.
    pub fn validate(&self) -> MotionResult<()> {
        for c in self.tag_effects.iter().chain(&self.transitions) {
            c.validate()?;
        }
        for (field, key) in [
            ("fallback_in", &self.fallback_in),
            ("fallback_out", &self.fallback_out),
        ] {
            if let Some(k) = key
                && !self.transitions.iter().any(|t| t.effective_key() == k)
            {
                return Err(MotionError::config(format!(
                    "{field} references unknown transition '{k}'"
                )));
            }
        }
        for a in &self.actions {
            if a.trim().is_empty() {
                return Err(MotionError::validation("action name must be non-empty"));
            }
        }
        Ok(())
    }
}

fn default_frame_rate() -> f64 {
    FrameRate::DEFAULT.per_sec()
}

/// Top-level renderer configuration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MotionConfig {
    /// Passes per second.
    #[serde(default = "default_frame_rate")]
    pub frame_rate: f64,
    /// Initial visible window; all characters when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible_window: Option<VisibleWindow>,
    /// Effect profile.
    #[serde(default)]
    pub profile: ProfileDef,
    /// Push channels left stale by the previous pass once more.
    #[serde(default)]
    pub revert_stale: bool,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            frame_rate: default_frame_rate(),
            visible_window: None,
            profile: ProfileDef::default(),
            revert_stale: false,
        }
    }
}

impl MotionConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(s: &str) -> MotionResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON config.
    pub fn from_reader<R: Read>(mut reader: R) -> MotionResult<Self> {
        let mut s = String::new();
        reader
            .read_to_string(&mut s)
            .map_err(|e| MotionError::config(format!("read config: {e}")))?;
        Self::from_json_str(&s)
    }

    /// Validate every field.
    pub fn validate(&self) -> MotionResult<()> {
        FrameRate::new(self.frame_rate)?;
        if let Some(w) = self.visible_window {
            VisibleWindow::new(w.lo, w.hi)?;
        }
        self.profile.validate()
    }

    /// Renderer options described by this config.
    pub fn renderer_opts(&self) -> MotionResult<RendererOpts> {
        Ok(RendererOpts {
            frame_rate: FrameRate::new(self.frame_rate)?,
            window: self.visible_window.unwrap_or_default(),
            revert_stale: self.revert_stale,
        })
    }

    /// Build the described profile.
    pub fn build_profile(&self) -> MotionResult<MotionProfile> {
        MotionProfile::from_def(&self.profile)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/model.rs"]
mod tests;
