use super::*;
use crate::effects::builtin::{create_tag_effect, create_transition};
use crate::foundation::core::{Point, Rgba8};
use crate::layout::grid::GridLayout;
use serde_json::{Value, json};

fn profile(tags: &[&str], transitions: &[&str]) -> MotionProfile {
    let mut p = MotionProfile::new();
    for k in tags {
        p.add_tag_effect(create_tag_effect(k, None, &Value::Null).unwrap())
            .unwrap();
    }
    for k in transitions {
        p.add_transition(create_transition(k, None, &Value::Null).unwrap())
            .unwrap();
    }
    p
}

fn renderer(p: Option<MotionProfile>) -> MotionRenderer<GridLayout> {
    let mut r = MotionRenderer::new(
        GridLayout::new(),
        RendererOpts {
            frame_rate: FrameRate::new(4.0).unwrap(),
            window: VisibleWindow::ALL,
            revert_stale: false,
        },
    );
    r.set_profile(p);
    r
}

fn hidden() -> VisibleWindow {
    VisibleWindow::new(100, 100).unwrap()
}

#[test]
fn no_profile_is_a_no_op() {
    let mut r = renderer(None);
    let report = r.set_text("<wave>ab</wave>");
    assert_eq!(report, PassReport::default());
    assert_eq!(r.clean_text(), "<wave>ab</wave>");
    assert!(r.host().commits().is_empty());
}

#[test]
fn effects_change_only_tagged_glyphs() {
    let mut r = renderer(Some(profile(&["rainbow"], &[])));
    let report = r.set_text("<rainbow>ab</rainbow>c");
    assert_eq!(r.clean_text(), "abc");
    assert_eq!(report.glyphs, 3);
    assert_eq!(report.tag_effects, 2);
    assert_eq!(report.committed, ChannelSet::COLOR);

    let presented = r.host().presented();
    assert_eq!(presented.colors[0], Rgba8::new(255, 0, 0, 255));
    assert_ne!(presented.colors[4], Rgba8::WHITE);
    assert_eq!(presented.colors[8], Rgba8::WHITE);
    assert_eq!(presented.positions, r.snapshot().positions);
}

#[test]
fn untouched_channels_are_never_pushed() {
    let mut r = renderer(Some(profile(&["wave"], &[])));
    r.set_text("<wave>abc</wave>");
    r.render_pass();
    r.render_pass();
    let commits = r.host().commits();
    assert_eq!(commits.len(), 3);
    assert!(commits.iter().all(|c| *c == ChannelSet::POSITION));
}

#[test]
fn only_dirty_channels_are_committed() {
    let mut r = renderer(Some(profile(&["rainbow"], &[])));
    r.set_text("<rainbow>ab</rainbow>");
    assert_eq!(r.host().commits(), [ChannelSet::COLOR]);

    r.set_visible_window(hidden());
    let report = r.render_pass();
    assert!(report.dirty.is_empty());
    assert!(report.committed.is_empty());
    assert_eq!(r.host().commits(), [ChannelSet::COLOR]);
}

#[test]
fn stale_channels_are_reverted_once_when_enabled() {
    let mut r = MotionRenderer::new(
        GridLayout::new(),
        RendererOpts {
            frame_rate: FrameRate::new(4.0).unwrap(),
            window: VisibleWindow::ALL,
            revert_stale: true,
        },
    );
    r.set_profile(Some(profile(&["rainbow"], &[])));
    r.set_text("<rainbow>ab</rainbow>");
    assert_ne!(r.host().presented().colors, r.snapshot().colors);

    r.set_visible_window(hidden());
    let report = r.render_pass();
    assert!(report.dirty.is_empty());
    assert_eq!(report.committed, ChannelSet::COLOR);
    assert_eq!(r.host().presented().colors, r.snapshot().colors);

    let report = r.render_pass();
    assert!(report.committed.is_empty());
    assert_eq!(r.host().commits().len(), 2);
}

#[test]
fn passes_are_idempotent_without_layout_changes() {
    let mut r = renderer(Some(profile(&["wave", "rainbow"], &[])));
    r.set_text("<wave><rainbow>hello</rainbow></wave>");
    let first = r.host().mesh().clone();
    r.render_pass();
    assert_eq!(r.host().mesh(), &first);
}

#[test]
fn fallback_applies_to_plain_characters() {
    let mut p = profile(&[], &["cut"]);
    p.set_fallback(TransitionPhase::Out, Some("cut")).unwrap();
    let mut r = renderer(Some(p));
    r.set_visible_window(VisibleWindow::new(0, 0).unwrap());
    let report = r.set_text("abc");
    assert_eq!(report.transitions, 2);
    let presented = r.host().presented();
    assert_eq!(presented.positions[0], Point::new(0.0, 0.0));
    assert!(presented.positions[4..8].iter().all(|q| *q == Point::new(15.0, 10.0)));
}

#[test]
fn explicit_transition_tag_wins_over_fallback() {
    let mut p = profile(&[], &["cut", "fade"]);
    p.set_fallback(TransitionPhase::Out, Some("cut")).unwrap();
    let mut r = renderer(Some(p));
    r.set_visible_window(hidden());
    r.set_text("<transition=fade>a</transition>b");
    let presented = r.host().presented();
    assert_eq!(presented.colors[0].a, 0);
    assert_eq!(presented.positions[0], Point::new(0.0, 0.0));
    assert_eq!(presented.colors[4].a, 255);
    assert!(presented.positions[4..8].iter().all(|q| *q == Point::new(15.0, 10.0)));
}

#[test]
fn unknown_transition_key_falls_back() {
    let mut p = profile(&[], &["cut"]);
    p.set_fallback(TransitionPhase::Out, Some("cut")).unwrap();
    let mut r = renderer(Some(p));
    r.set_visible_window(hidden());
    let report = r.set_text("<transition=warp>a</transition>");
    assert_eq!(r.clean_text(), "a");
    assert_eq!(report.transitions, 1);
    assert_eq!(report.committed, ChannelSet::POSITION);
}

#[test]
fn actions_trigger_when_their_character_enters() {
    let mut p = profile(&[], &[]);
    p.add_action("pause").unwrap();
    let mut r = renderer(Some(p));
    r.set_visible_window(VisibleWindow::new(0, 0).unwrap());
    r.set_text("a{pause=1}b");
    assert!(r.drain_triggered_actions().is_empty());

    r.set_visible_window(VisibleWindow::ALL);
    let report = r.render_pass();
    assert_eq!(report.triggered, 1);
    let fired = r.drain_triggered_actions();
    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].name, "pause");
    assert_eq!(fired[0].attributes.as_deref(), Some("1"));
    assert_eq!(fired[0].position, 1);

    r.render_pass();
    assert!(r.drain_triggered_actions().is_empty());
}

#[test]
fn tick_is_rate_limited() {
    let mut r = renderer(Some(profile(&["wave"], &[])));
    r.set_text("<wave>a</wave>");
    assert!(r.tick(0.1).is_none());
    let report = r.tick(0.2).unwrap();
    assert_eq!(report.animation_time, 0.25);
    assert_eq!(r.animation_time(), 0.25);
}

#[test]
fn host_quirks_are_skipped() {
    let mut r = renderer(Some(profile(&["wave"], &[])));
    r.set_text("<wave>abc</wave>");
    r.host_mut().glyphs_mut()[0].vertex_index = 999;
    r.host_mut().glyphs_mut()[1].scale = 0.0;
    let report = r.render_pass();
    assert_eq!(report.glyphs, 2);
    assert_eq!(report.tag_effects, 1);
}

#[test]
fn relayout_resnapshots() {
    let mut r = renderer(Some(profile(&["wave"], &[])));
    r.set_text("<wave>ab</wave>");
    r.host_mut().layout("xyz");
    let report = r.notify_layout_changed();
    assert_eq!(report.glyphs, 3);
    assert_eq!(r.snapshot().quad_count(), 3);
}

#[test]
fn empty_text_clears_tracking() {
    let mut r = renderer(Some(profile(&["wave"], &[])));
    r.set_text("<wave>ab</wave>");
    assert_eq!(r.tracker().len(), 2);
    let report = r.set_text("");
    assert_eq!(report.glyphs, 0);
    assert!(r.tracker().is_empty());
    assert!(r.parse_result().is_none());
}

#[test]
fn profile_swap_reparses() {
    let mut r = renderer(None);
    r.set_text("<wave>a</wave>");
    assert_eq!(r.clean_text(), "<wave>a</wave>");
    let before = r.preprocessor().parse_count();
    r.set_profile(Some(profile(&["wave"], &[])));
    assert_eq!(r.clean_text(), "a");
    assert_eq!(r.preprocessor().parse_count(), before + 1);
    assert!(r.profile().is_some());
}

#[test]
fn configured_params_reach_effects() {
    let mut p = MotionProfile::new();
    p.add_tag_effect(
        create_tag_effect(
            "wave",
            Some("bob"),
            &json!({"frequency": 0.0, "amplitude": 5.0, "phase_step_deg": 90.0}),
        )
        .unwrap(),
    )
    .unwrap();
    let mut r = renderer(Some(p));
    r.set_text("x<bob>a</bob>");
    let presented = r.host().presented();
    assert_eq!(presented.positions[0], Point::new(0.0, 0.0));
    assert!((presented.positions[4].y - 5.0).abs() < 1e-9);
}
