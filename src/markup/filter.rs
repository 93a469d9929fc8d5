use crate::effects::profile::MotionProfile;
use crate::markup::tokenizer::TagValidator;

/// Tag names owned by the host's own rich-text markup.
pub const RESERVED_TAGS: &[&str] = &[
    "b",
    "i",
    "u",
    "s",
    "sub",
    "sup",
    "color",
    "size",
    "font",
    "align",
    "line-height",
    "voffset",
    "margin",
    "indent",
    "sprite",
    "space",
    "style",
    "rotate",
    "cspace",
    "mspace",
    "nobr",
    "link",
    "noparse",
];

/// Built-in tag selecting a transition by key: `<transition=key>`.
pub const TRANSITION_TAG: &str = "transition";

/// Whether `name` belongs to the host's markup.
pub fn is_reserved(name: &str) -> bool {
    RESERVED_TAGS.contains(&name)
}

/// Whether `name` is a tag the renderer handles itself.
pub fn is_builtin(name: &str) -> bool {
    name == TRANSITION_TAG
}

/// Validator accepting the markup a profile knows about.
#[derive(Clone, Copy, Debug, Default)]
pub struct MotionValidator<'a> {
    profile: Option<&'a MotionProfile>,
}

impl<'a> MotionValidator<'a> {
    /// Validator backed by `profile`; with `None` only built-in tags are accepted.
    pub fn new(profile: Option<&'a MotionProfile>) -> Self {
        Self { profile }
    }
}

impl TagValidator for MotionValidator<'_> {
    fn validate(&self, name: &str, attributes: Option<&str>) -> bool {
        if name.is_empty() {
            return false;
        }
        if is_builtin(name) {
            return true;
        }
        if is_reserved(name) {
            return false;
        }
        self.profile
            .is_some_and(|p| p.is_accepted(name, attributes))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/markup/filter.rs"]
mod tests;
