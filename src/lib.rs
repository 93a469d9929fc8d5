//! textmotion animates rich text one glyph quad at a time.
//!
//! A source string carries inline motion markup (`<wave>`, `<transition=fade>`) and point
//! actions (`{pause=0.5}`). The crate resolves that markup into clean text plus disjoint tag
//! ranges, then drives a per-frame pass that lets registered effects overwrite a host's glyph
//! mesh and pushes back only the channels that changed.
//!
//! # Pipeline overview
//!
//! 1. **Parse**: `raw text -> ParseResult` (clean text, [`TagRange`]s, [`ActionMarker`]s),
//!    memoized by [`Preprocessor`]
//! 2. **Layout**: the [`TextLayoutHost`] lays out the clean text; the renderer snapshots the mesh
//! 3. **Pass**: [`MotionRenderer::render_pass`] restores the snapshot, applies [`TagEffect`]s and
//!    [`TransitionEffect`]s per glyph, and commits the dirty [`ChannelSet`]
//!
//! Passes are rate-limited by [`FrameClock`] and are idempotent for a fixed layout and time.
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **No shaping**: layout belongs to the host; [`GridLayout`] is a fixed-advance reference host.
//! - **Errors at construction only**: malformed markup and registry misses degrade silently.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod config;
mod effects;
mod eval;
mod foundation;
mod layout;
mod markup;
mod render;

pub use animation::ease::Ease;
pub use config::model::{ComponentDef, MotionConfig, ProfileDef};
pub use effects::builtin::{
    Cut, Fade, FadeParams, Pop, PopParams, Rainbow, RainbowParams, Shake, ShakeParams,
    TAG_EFFECTS, TRANSITIONS, TagEffectFactory, TransitionFactory, Wave, WaveParams,
    create_tag_effect, create_transition,
};
pub use effects::component::{
    EffectContext, MotionComponent, RendererView, TagEffect, TransitionContext, TransitionEffect,
    TransitionPhase,
};
pub use effects::profile::MotionProfile;
pub use effects::registry::MotionCollection;
pub use eval::clock::FrameClock;
pub use eval::visibility::{CharacterState, Crossing, VisibilityTracker};
pub use foundation::core::{FrameRate, Point, Rgba8, Vec2, VisibleWindow};
pub use foundation::error::{MotionError, MotionResult};
pub use layout::grid::GridLayout;
pub use markup::filter::{
    MotionValidator, RESERVED_TAGS, TRANSITION_TAG, is_builtin, is_reserved,
};
pub use markup::preprocess::Preprocessor;
pub use markup::resolver::{ActionMarker, ParseResult, TagRange, parse_markup};
pub use markup::token::{Token, TokenKind};
pub use markup::tokenizer::{TagValidator, strip_markup, strip_tokens, tokenize};
pub use render::channels::ChannelSet;
pub use render::engine::{MotionRenderer, PassReport, RendererOpts, TriggeredAction};
pub use render::host::{GlyphInfo, TextLayoutHost};
pub use render::mesh::{GlyphMesh, QUAD_VERTS, QuadMut};
