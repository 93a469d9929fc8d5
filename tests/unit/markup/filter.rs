use super::*;
use crate::effects::builtin::{Wave, WaveParams};
use crate::markup::tokenizer::strip_markup;

fn profile() -> MotionProfile {
    let mut p = MotionProfile::new();
    p.add_tag_effect(Box::new(Wave::new("wave", WaveParams::default()).unwrap()))
        .unwrap();
    p.add_action("pause").unwrap();
    p
}

#[test]
fn builtin_transition_is_always_accepted() {
    let v = MotionValidator::new(None);
    assert!(v.validate("transition", Some("fade")));
    assert!(!v.validate("wave", None));
    assert!(!v.validate("", None));
}

#[test]
fn reserved_names_are_left_to_the_host() {
    let p = profile();
    let v = MotionValidator::new(Some(&p));
    for name in ["b", "color", "line-height", "noparse"] {
        assert!(is_reserved(name));
        assert!(!v.validate(name, None), "{name}");
    }
}

#[test]
fn profile_decides_the_rest() {
    let p = profile();
    let v = MotionValidator::new(Some(&p));
    assert!(v.validate("wave", None));
    assert!(v.validate("wave", Some("3")));
    assert!(!v.validate("wave", Some("x")));
    assert!(v.validate("pause", Some("0.5")));
    assert!(!v.validate("sparkle", None));
}

#[test]
fn stripping_keeps_host_markup() {
    let p = profile();
    let v = MotionValidator::new(Some(&p));
    assert_eq!(
        strip_markup("<b><wave>hi</wave></b>{pause}<transition=fade>!", &v),
        "<b>hi</b>!"
    );
}
