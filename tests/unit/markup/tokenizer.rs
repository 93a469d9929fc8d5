use super::*;

fn accept_all(_: &str, _: Option<&str>) -> bool {
    true
}

fn only_b_and_i(name: &str, _: Option<&str>) -> bool {
    matches!(name, "b" | "i")
}

#[test]
fn scans_tags_and_actions_with_char_indices() {
    let toks = tokenize("é<b=x>y</b>{p=1}", &accept_all);
    assert_eq!(toks.len(), 3);

    assert_eq!(toks[0].kind, TokenKind::Open);
    assert_eq!(toks[0].name, "b");
    assert_eq!(toks[0].attributes.as_deref(), Some("x"));
    assert_eq!((toks[0].start, toks[0].end), (1, 5));
    assert_eq!(toks[0].raw, "<b=x>");
    assert_eq!(toks[0].char_len(), 5);

    assert_eq!(toks[1].kind, TokenKind::Close);
    assert_eq!((toks[1].start, toks[1].end), (7, 10));

    assert_eq!(toks[2].kind, TokenKind::Action);
    assert_eq!(toks[2].name, "p");
    assert_eq!(toks[2].int_attribute(), Some(1));
}

#[test]
fn empty_value_is_present_but_empty() {
    let toks = tokenize("<b=>", &accept_all);
    assert_eq!(toks[0].attributes.as_deref(), Some(""));
    let toks = tokenize("<b>", &accept_all);
    assert_eq!(toks[0].attributes, None);
}

#[test]
fn partial_markup_is_plain_text() {
    for s in ["<", "<b", "< b>", "<>", "{}", "{a", "<b c>", "a > b", "</>"] {
        assert!(tokenize(s, &accept_all).is_empty(), "{s}");
    }
}

#[test]
fn nested_open_bracket_restarts_scan() {
    let toks = tokenize("<b=<i>", &accept_all);
    assert_eq!(toks.len(), 1);
    assert_eq!(toks[0].name, "i");
    assert_eq!(toks[0].start, 3);
}

#[test]
fn rejected_match_is_skipped_whole() {
    let toks = tokenize("{x=<b>}<i>", &only_b_and_i);
    assert_eq!(toks.len(), 1);
    assert_eq!(toks[0].name, "i");

    let toks = tokenize("<q=a{b}>", &only_b_and_i);
    assert!(toks.is_empty());
}

#[test]
fn strip_keeps_rejected_markup_verbatim() {
    assert_eq!(strip_markup("<b>Hi</b> <u>x</u>", &only_b_and_i), "Hi <u>x</u>");
    assert_eq!(strip_markup("plain", &only_b_and_i), "plain");
    assert_eq!(strip_markup("", &only_b_and_i), "");
}

#[test]
fn validator_sees_attributes() {
    let v = |name: &str, attr: Option<&str>| name == "w" && attr == Some("2");
    assert_eq!(strip_markup("<w=2>a</w=2><w=3>b", &v), "a<w=3>b");
}
