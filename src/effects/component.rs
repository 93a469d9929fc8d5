use crate::eval::visibility::CharacterState;
use crate::foundation::core::VisibleWindow;
use crate::markup::token::Token;
use crate::render::channels::ChannelSet;
use crate::render::host::GlyphInfo;
use crate::render::mesh::QuadMut;

/// Anything registered in a profile under a unique key.
pub trait MotionComponent {
    /// Registry key; for tag effects this is also the tag name.
    fn key(&self) -> &str;
}

/// Continuous effect driven by a markup tag.
pub trait TagEffect: MotionComponent {
    /// Whether `<name=attributes>` is valid markup for this effect.
    fn validate_tag(&self, name: &str, attributes: Option<&str>) -> bool {
        let _ = attributes;
        name == self.key()
    }

    /// Inactive effects are skipped during a pass.
    fn is_active(&self) -> bool {
        true
    }

    /// Overwrite the glyph quad and return the channels written.
    fn apply(&self, ctx: &EffectContext<'_>, quad: &mut QuadMut<'_>) -> ChannelSet;
}

/// Effect applied when a character enters or leaves the visible window.
pub trait TransitionEffect: MotionComponent {
    /// Overwrite the glyph quad and return the channels written.
    fn apply(&self, ctx: &TransitionContext<'_>, quad: &mut QuadMut<'_>) -> ChannelSet;
}

/// Direction of a visibility transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionPhase {
    /// The character is inside the visible window.
    In,
    /// The character is outside the visible window.
    Out,
}

/// Read-only facts about the renderer, shared by every effect call of a pass.
#[derive(Clone, Copy, Debug)]
pub struct RendererView<'a> {
    /// Clean text currently laid out.
    pub clean_text: &'a str,
    /// Number of host glyphs.
    pub glyph_count: usize,
    /// Current visible window.
    pub window: VisibleWindow,
    /// Tick rate in passes per second.
    pub frame_rate: f64,
}

/// Inputs to one [`TagEffect::apply`] call.
#[derive(Clone, Copy, Debug)]
pub struct EffectContext<'a> {
    /// Animation clock in seconds.
    pub animation_time: f64,
    /// Seconds since the character last became visible.
    pub elapsed_visible: f64,
    /// Logical character index.
    pub index: usize,
    /// Position of the glyph in the host glyph list.
    pub ordinal: usize,
    /// The tag that selected this effect.
    pub tag: &'a Token,
    /// Host glyph facts.
    pub glyph: GlyphInfo,
    /// Character visibility state.
    pub state: CharacterState,
    /// Renderer facts.
    pub view: RendererView<'a>,
}

impl EffectContext<'_> {
    /// Tag attribute parsed as an integer.
    pub fn int_attribute(&self) -> Option<i64> {
        self.tag.int_attribute()
    }
}

/// Inputs to one [`TransitionEffect::apply`] call.
#[derive(Clone, Copy, Debug)]
pub struct TransitionContext<'a> {
    /// `In` inside the window, `Out` outside.
    pub phase: TransitionPhase,
    /// Seconds since the last crossing in this direction.
    pub elapsed: f64,
    /// Whether the character crossed the window edge during this pass.
    pub crossed: bool,
    /// Animation clock in seconds.
    pub animation_time: f64,
    /// Logical character index.
    pub index: usize,
    /// Position of the glyph in the host glyph list.
    pub ordinal: usize,
    /// Explicit `<transition=...>` tag, when one selected this transition.
    pub tag: Option<&'a Token>,
    /// Host glyph facts.
    pub glyph: GlyphInfo,
    /// Character visibility state.
    pub state: CharacterState,
    /// Renderer facts.
    pub view: RendererView<'a>,
}
