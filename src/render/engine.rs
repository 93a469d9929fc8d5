use crate::effects::component::{
    EffectContext, RendererView, TransitionContext, TransitionPhase,
};
use crate::effects::profile::MotionProfile;
use crate::eval::clock::FrameClock;
use crate::eval::visibility::{Crossing, VisibilityTracker};
use crate::foundation::core::{FrameRate, VisibleWindow};
use crate::markup::filter::{MotionValidator, TRANSITION_TAG, is_builtin};
use crate::markup::preprocess::Preprocessor;
use crate::markup::resolver::ParseResult;
use crate::render::channels::ChannelSet;
use crate::render::host::TextLayoutHost;
use crate::render::mesh::GlyphMesh;

/// Construction options of a [`MotionRenderer`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RendererOpts {
    /// Pass rate.
    pub frame_rate: FrameRate,
    /// Initial visible window.
    pub window: VisibleWindow,
    /// Also push channels dirtied by the previous pass but not this one, so the host drops
    /// stale effect output. Off by default: only this pass's dirty channels are committed.
    pub revert_stale: bool,
}

/// Outcome of one composition pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct PassReport {
    /// Animation clock the pass ran at.
    pub animation_time: f64,
    /// Channels written by effects during this pass.
    pub dirty: ChannelSet,
    /// Channels pushed to the host.
    pub committed: ChannelSet,
    /// Glyphs processed.
    pub glyphs: usize,
    /// Tag effect invocations.
    pub tag_effects: usize,
    /// Transition invocations.
    pub transitions: usize,
    /// Actions triggered.
    pub triggered: usize,
}

/// An action marker whose character entered the visible window.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TriggeredAction {
    /// Action name.
    pub name: String,
    /// Action value, if any.
    pub attributes: Option<String>,
    /// Clean char index of the action.
    pub position: usize,
    /// Animation time of the pass that triggered it.
    pub animation_time: f64,
}

/// Drives tag effects and transitions over a host's glyph mesh.
///
/// Every pass restores the mesh from the pristine snapshot taken after layout, lets effects
/// overwrite it, and pushes only the channels effects wrote during the pass.
#[derive(Debug)]
pub struct MotionRenderer<H: TextLayoutHost> {
    host: H,
    profile: Option<MotionProfile>,
    preprocessor: Preprocessor,
    tracker: VisibilityTracker,
    clock: FrameClock,
    window: VisibleWindow,
    snapshot: GlyphMesh,
    raw_text: String,
    last_dirty: ChannelSet,
    revert_stale: bool,
    triggered: Vec<TriggeredAction>,
}

impl<H: TextLayoutHost> MotionRenderer<H> {
    /// Wrap `host` with no profile and no text.
    pub fn new(host: H, opts: RendererOpts) -> Self {
        Self {
            host,
            profile: None,
            preprocessor: Preprocessor::new(),
            tracker: VisibilityTracker::new(),
            clock: FrameClock::new(opts.frame_rate),
            window: opts.window,
            snapshot: GlyphMesh::new(),
            raw_text: String::new(),
            last_dirty: ChannelSet::empty(),
            revert_stale: opts.revert_stale,
            triggered: Vec::new(),
        }
    }

    /// Swap the profile, reparse the current text and relayout.
    pub fn set_profile(&mut self, profile: Option<MotionProfile>) -> PassReport {
        self.profile = profile;
        self.preprocessor.clear_cache();
        tracing::debug!(has_profile = self.profile.is_some(), "profile changed");
        self.relayout()
    }

    /// Set the raw marked-up text, relayout and run a pass.
    pub fn set_text(&mut self, raw: &str) -> PassReport {
        if raw != self.raw_text {
            raw.clone_into(&mut self.raw_text);
        }
        self.relayout()
    }

    /// Re-snapshot after the host changed its layout on its own, then run a pass.
    pub fn notify_layout_changed(&mut self) -> PassReport {
        self.snapshot.clone_from(self.host.mesh());
        tracing::debug!(glyphs = self.host.glyphs().len(), "layout changed");
        self.render_pass()
    }

    /// Change the window of revealed characters; takes effect at the next pass.
    pub fn set_visible_window(&mut self, window: VisibleWindow) {
        self.window = window;
    }

    /// Change the pass rate.
    pub fn set_frame_rate(&mut self, rate: FrameRate) {
        self.clock.set_rate(rate);
    }

    /// Feed real elapsed time; runs a pass when at least one tick is due.
    pub fn tick(&mut self, dt: f64) -> Option<PassReport> {
        if self.clock.advance(dt) == 0 {
            return None;
        }
        Some(self.render_pass())
    }

    /// Take the actions triggered since the last call.
    pub fn drain_triggered_actions(&mut self) -> Vec<TriggeredAction> {
        std::mem::take(&mut self.triggered)
    }

    /// Layout host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Layout host, mutably; call [`Self::notify_layout_changed`] after relayouts.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Active profile.
    pub fn profile(&self) -> Option<&MotionProfile> {
        self.profile.as_ref()
    }

    /// Cached parse of the current text.
    pub fn parse_result(&self) -> Option<&ParseResult> {
        self.preprocessor.result()
    }

    /// Parse cache.
    pub fn preprocessor(&self) -> &Preprocessor {
        &self.preprocessor
    }

    /// Per-character visibility states.
    pub fn tracker(&self) -> &VisibilityTracker {
        &self.tracker
    }

    /// Raw text as last set.
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    /// Clean text currently laid out.
    pub fn clean_text(&self) -> &str {
        self.preprocessor.clean_text()
    }

    /// Current visible window.
    pub fn visible_window(&self) -> VisibleWindow {
        self.window
    }

    /// Animation clock in seconds.
    pub fn animation_time(&self) -> f64 {
        self.clock.animation_time()
    }

    /// Channels written during the last pass.
    pub fn last_dirty(&self) -> ChannelSet {
        self.last_dirty
    }

    /// Pristine mesh captured after the last layout.
    pub fn snapshot(&self) -> &GlyphMesh {
        &self.snapshot
    }

    fn relayout(&mut self) -> PassReport {
        let validator = MotionValidator::new(self.profile.as_ref());
        let clean = self.preprocessor.preprocess(&self.raw_text, &validator);
        self.host.layout(clean);
        if self.host.glyphs().is_empty() {
            self.tracker.clear();
        }
        self.snapshot.clone_from(self.host.mesh());
        self.last_dirty = ChannelSet::empty();
        tracing::debug!(
            glyphs = self.host.glyphs().len(),
            vertices = self.snapshot.vertex_count(),
            "text laid out"
        );
        self.render_pass()
    }

    /// Run one composition pass at the current animation time.
    #[tracing::instrument(skip_all, fields(time = self.clock.animation_time()))]
    pub fn render_pass(&mut self) -> PassReport {
        let now = self.clock.animation_time();
        let mut report = PassReport {
            animation_time: now,
            ..PassReport::default()
        };

        let Self {
            host,
            profile,
            preprocessor,
            tracker,
            clock,
            window,
            snapshot,
            last_dirty,
            revert_stale,
            triggered,
            ..
        } = self;

        let Some(profile) = profile.as_ref() else {
            return report;
        };
        let glyph_count = host.glyphs().len();
        if glyph_count == 0 || preprocessor.result().is_none() {
            tracker.clear();
            return report;
        }

        host.mesh_mut().restore_from(snapshot);
        let window = *window;
        let view = RendererView {
            clean_text: preprocessor.clean_text(),
            glyph_count,
            window,
            frame_rate: clock.rate().per_sec(),
        };

        let mut dirty = ChannelSet::empty();
        for ordinal in 0..glyph_count {
            let Some(glyph) = host.glyphs().get(ordinal).copied() else {
                break;
            };
            if !glyph.visible || glyph.scale == 0.0 {
                continue;
            }
            report.glyphs += 1;

            let crossing = tracker.observe(glyph.index, window, now);
            if crossing == Some(Crossing::Entered) {
                for a in preprocessor.actions_at(glyph.index) {
                    triggered.push(TriggeredAction {
                        name: a.token.name.clone(),
                        attributes: a.token.attributes.clone(),
                        position: a.position,
                        animation_time: now,
                    });
                    report.triggered += 1;
                }
            }
            let Some(state) = tracker.get(glyph.index).copied() else {
                continue;
            };
            let range = preprocessor.range_at(glyph.index);

            let Some(mut quad) = host.mesh_mut().quad_mut(glyph.vertex_index) else {
                tracing::warn!(
                    index = glyph.index,
                    vertex = glyph.vertex_index,
                    "glyph quad outside mesh"
                );
                continue;
            };

            if state.visible
                && let Some(range) = range
            {
                for tag in &range.tags {
                    if is_builtin(&tag.name) {
                        continue;
                    }
                    let Some(effect) = profile.try_get_effect(&tag.name) else {
                        continue;
                    };
                    if !effect.is_active() {
                        continue;
                    }
                    let ctx = EffectContext {
                        animation_time: now,
                        elapsed_visible: state.elapsed_visible(now),
                        index: glyph.index,
                        ordinal,
                        tag,
                        glyph,
                        state,
                        view,
                    };
                    dirty |= effect.apply(&ctx, &mut quad);
                    report.tag_effects += 1;
                }
            }

            let phase = if state.visible {
                TransitionPhase::In
            } else {
                TransitionPhase::Out
            };
            let explicit = range.and_then(|r| r.tag(TRANSITION_TAG)).filter(|t| {
                t.attributes
                    .as_deref()
                    .is_some_and(|k| profile.transitions().contains(k))
            });
            let requested = explicit.and_then(|t| t.attributes.as_deref());
            if let Some(transition) = profile.resolve_transition(requested, phase) {
                let ctx = TransitionContext {
                    phase,
                    elapsed: state.elapsed_since_crossing(now),
                    crossed: crossing.is_some(),
                    animation_time: now,
                    index: glyph.index,
                    ordinal,
                    tag: explicit,
                    glyph,
                    state,
                    view,
                };
                dirty |= transition.apply(&ctx, &mut quad);
                report.transitions += 1;
            }
        }

        let commit = if *revert_stale {
            dirty | (*last_dirty - dirty)
        } else {
            dirty
        };
        if !commit.is_empty() {
            host.push_channels(commit);
            tracing::trace!(channels = ?commit.names(), "channels committed");
        }
        *last_dirty = dirty;

        report.dirty = dirty;
        report.committed = commit;
        report
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/engine.rs"]
mod tests;
