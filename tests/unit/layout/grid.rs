use super::*;
use crate::foundation::core::Vec2;

#[test]
fn lays_out_cells_row_by_row() {
    let mut g = GridLayout::with_metrics(2.0, 3.0).unwrap();
    g.layout("ab\nc");
    let glyphs = g.glyphs();
    assert_eq!(glyphs.len(), 4);
    assert_eq!(g.mesh().quad_count(), 3);
    assert!(!glyphs[2].visible);
    assert_eq!(glyphs[3].vertex_index, 8);
    assert_eq!(g.mesh().positions[4], Point::new(2.0, 0.0));
    assert_eq!(g.mesh().positions[8], Point::new(0.0, 3.0));
}

#[test]
fn whitespace_takes_a_cell_but_no_quad() {
    let mut g = GridLayout::new();
    g.layout("a b");
    assert_eq!(g.mesh().quad_count(), 2);
    assert!(!g.glyphs()[1].visible);
    assert_eq!(g.glyphs()[2].vertex_index, 4);
    assert_eq!(g.mesh().positions[4], Point::new(20.0, 0.0));
}

#[test]
fn push_copies_only_listed_channels() {
    let mut g = GridLayout::new();
    g.layout("a");
    {
        let mut q = g.mesh_mut().quad_mut(0).unwrap();
        q.translate(Vec2::new(1.0, 0.0));
        q.set_color(Rgba8::TRANSPARENT);
    }
    g.push_channels(ChannelSet::COLOR);
    assert_eq!(g.presented().colors, g.mesh().colors);
    assert_ne!(g.presented().positions, g.mesh().positions);
    assert_eq!(g.commits(), [ChannelSet::COLOR]);

    g.layout("a");
    assert!(g.commits().is_empty());
    assert_eq!(g.presented(), g.mesh());
    assert_eq!(g.layout_count(), 2);
}

#[test]
fn metrics_are_validated() {
    assert!(GridLayout::with_metrics(0.0, 1.0).is_err());
    assert!(GridLayout::with_metrics(1.0, f64::NAN).is_err());
}
