use super::*;

#[test]
fn union_and_difference() {
    let dirty = ChannelSet::POSITION;
    let last = ChannelSet::POSITION | ChannelSet::COLOR;
    let commit = dirty | (last - dirty);
    assert_eq!(commit, last);
    assert!((ChannelSet::COLOR - ChannelSet::COLOR).is_empty());
}

#[test]
fn names_follow_bit_order() {
    assert_eq!(ChannelSet::all().names(), vec!["position", "color", "uv0", "uv2"]);
    assert!(ChannelSet::empty().names().is_empty());
}
