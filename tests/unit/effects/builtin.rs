use super::*;
use crate::eval::visibility::CharacterState;
use crate::foundation::core::{Point, VisibleWindow};
use crate::markup::token::{Token, TokenKind};
use crate::render::host::GlyphInfo;
use crate::render::mesh::GlyphMesh;
use crate::effects::component::RendererView;

fn mesh() -> GlyphMesh {
    let mut m = GlyphMesh::new();
    m.push_quad(
        [
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 4.0),
            Point::new(0.0, 4.0),
        ],
        Rgba8::new(255, 255, 255, 200),
    );
    m
}

fn tag(name: &str, attributes: Option<&str>) -> Token {
    Token {
        kind: TokenKind::Open,
        name: name.to_owned(),
        attributes: attributes.map(str::to_owned),
        raw: String::new(),
        start: 0,
        end: 0,
    }
}

fn glyph() -> GlyphInfo {
    GlyphInfo {
        index: 0,
        vertex_index: 0,
        visible: true,
        scale: 1.0,
        ch: 'a',
    }
}

fn state(visible: bool) -> CharacterState {
    CharacterState {
        index: 0,
        visible,
        visible_since: 0.0,
        hidden_since: None,
    }
}

fn view() -> RendererView<'static> {
    RendererView {
        clean_text: "a",
        glyph_count: 1,
        window: VisibleWindow::ALL,
        frame_rate: 24.0,
    }
}

fn effect_ctx(token: &Token, time: f64) -> EffectContext<'_> {
    EffectContext {
        animation_time: time,
        elapsed_visible: time,
        index: 0,
        ordinal: 0,
        tag: token,
        glyph: glyph(),
        state: state(true),
        view: view(),
    }
}

fn transition_ctx(phase: TransitionPhase, elapsed: f64) -> TransitionContext<'static> {
    TransitionContext {
        phase,
        elapsed,
        crossed: false,
        animation_time: elapsed,
        index: 0,
        ordinal: 0,
        tag: None,
        glyph: glyph(),
        state: state(phase == TransitionPhase::In),
        view: view(),
    }
}

#[test]
fn table_builds_every_kind_with_defaults() {
    for (kind, _) in TAG_EFFECTS {
        let e = create_tag_effect(kind, None, &serde_json::Value::Null).unwrap();
        assert_eq!(e.key(), *kind);
    }
    for (kind, _) in TRANSITIONS {
        let t = create_transition(kind, Some("custom"), &serde_json::json!({})).unwrap();
        assert_eq!(t.key(), "custom");
    }
}

#[test]
fn unknown_kind_and_bad_params_are_rejected() {
    let err = create_tag_effect("sparkle", None, &serde_json::Value::Null).err().unwrap();
    assert!(matches!(err, MotionError::Config(_)));

    let err = create_tag_effect("wave", None, &serde_json::json!({"amplitud": 1.0})).err().unwrap();
    assert!(matches!(err, MotionError::Validation(_)));

    let err = create_transition("fade", None, &serde_json::json!({"duration": 0.0})).err().unwrap();
    assert!(matches!(err, MotionError::Validation(_)));

    let err = create_transition("cut", None, &serde_json::json!({"x": 1})).err().unwrap();
    assert!(matches!(err, MotionError::Validation(_)));
}

#[test]
fn wave_accepts_integer_attributes_only() {
    let w = Wave::new("wave", WaveParams::default()).unwrap();
    assert!(w.validate_tag("wave", None));
    assert!(w.validate_tag("wave", Some("4")));
    assert!(!w.validate_tag("wave", Some("big")));
    assert!(!w.validate_tag("shake", None));
}

#[test]
fn wave_offsets_vertically() {
    let w = Wave::new(
        "wave",
        WaveParams {
            frequency: std::f64::consts::FRAC_PI_2,
            amplitude: 1.0,
            phase_step_deg: 0.0,
        },
    )
    .unwrap();
    let tok = tag("wave", Some("2"));
    let mut m = mesh();
    let dirty = w.apply(&effect_ctx(&tok, 1.0), &mut m.quad_mut(0).unwrap());
    assert_eq!(dirty, ChannelSet::POSITION);
    assert_eq!(m.positions[0].x, 0.0);
    assert!((m.positions[0].y - 3.0).abs() < 1e-9);
}

#[test]
fn shake_rests_in_second_half_and_is_deterministic() {
    let s = Shake::new("shake", ShakeParams::default()).unwrap();
    let tok = tag("shake", None);

    let mut a = mesh();
    let mut b = mesh();
    let da = s.apply(&effect_ctx(&tok, 0.02), &mut a.quad_mut(0).unwrap());
    let db = s.apply(&effect_ctx(&tok, 0.02), &mut b.quad_mut(0).unwrap());
    assert_eq!(da, ChannelSet::POSITION);
    assert_eq!(da, db);
    assert_eq!(a, b);

    let mut rest = mesh();
    let d = s.apply(&effect_ctx(&tok, 0.075), &mut rest.quad_mut(0).unwrap());
    assert!(d.is_empty());
    assert_eq!(rest, mesh());
}

#[test]
fn rainbow_keeps_alpha() {
    let r = Rainbow::new("rainbow", RainbowParams::default()).unwrap();
    let tok = tag("rainbow", None);
    let mut m = mesh();
    let dirty = r.apply(&effect_ctx(&tok, 0.0), &mut m.quad_mut(0).unwrap());
    assert_eq!(dirty, ChannelSet::COLOR);
    assert_eq!(m.colors[0], Rgba8::new(255, 0, 0, 200));
}

#[test]
fn rainbow_hue_ping_pongs() {
    let r = Rainbow::new("rainbow", RainbowParams { speed: 1.0, spread: 0.0 }).unwrap();
    assert!((r.hue_at(0.25, 0) - 0.25).abs() < 1e-9);
    assert!((r.hue_at(1.75, 0) - 0.25).abs() < 1e-9);
}

#[test]
fn cut_collapses_only_when_hidden() {
    let c = Cut::new("cut");
    let mut m = mesh();
    assert!(c.apply(&transition_ctx(TransitionPhase::In, 0.0), &mut m.quad_mut(0).unwrap()).is_empty());
    assert_eq!(m, mesh());
    let d = c.apply(&transition_ctx(TransitionPhase::Out, 0.0), &mut m.quad_mut(0).unwrap());
    assert_eq!(d, ChannelSet::POSITION);
    assert!(m.positions.iter().all(|p| *p == Point::new(2.0, 2.0)));
}

#[test]
fn fade_scales_alpha_by_progress() {
    let f = Fade::new(
        "fade",
        FadeParams {
            duration: 1.0,
            ease: Ease::Linear,
        },
    )
    .unwrap();

    let mut m = mesh();
    let d = f.apply(&transition_ctx(TransitionPhase::In, 0.5), &mut m.quad_mut(0).unwrap());
    assert_eq!(d, ChannelSet::COLOR);
    assert_eq!(m.colors[0].a, 100);

    let mut done = mesh();
    let d = f.apply(&transition_ctx(TransitionPhase::In, 2.0), &mut done.quad_mut(0).unwrap());
    assert!(d.is_empty());

    let mut gone = mesh();
    f.apply(
        &transition_ctx(TransitionPhase::Out, f64::INFINITY),
        &mut gone.quad_mut(0).unwrap(),
    );
    assert_eq!(gone.colors[0].a, 0);
}

#[test]
fn pop_scales_about_center() {
    let p = Pop::new(
        "pop",
        PopParams {
            duration: 1.0,
            ease: Ease::Linear,
        },
    )
    .unwrap();
    let mut m = mesh();
    let d = p.apply(&transition_ctx(TransitionPhase::In, 0.5), &mut m.quad_mut(0).unwrap());
    assert_eq!(d, ChannelSet::POSITION);
    assert_eq!(m.positions[0], Point::new(1.0, 1.0));
    assert_eq!(m.positions[2], Point::new(3.0, 3.0));
}
