use crate::foundation::core::{Point, Rgba8, Vec2};
use crate::render::channels::ChannelSet;

/// Vertices per glyph quad.
pub const QUAD_VERTS: usize = 4;

/// Per-channel vertex buffers for every glyph quad of a laid-out text.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GlyphMesh {
    /// Vertex positions.
    pub positions: Vec<Point>,
    /// Vertex colors.
    pub colors: Vec<Rgba8>,
    /// Primary texture coordinates.
    pub uv0: Vec<Vec2>,
    /// Secondary texture coordinates.
    pub uv2: Vec<Vec2>,
}

fn copy_channel<T: Clone>(dst: &mut Vec<T>, src: &[T]) {
    if dst.len() == src.len() {
        dst.clone_from_slice(src);
    } else {
        dst.clear();
        dst.extend_from_slice(src);
    }
}

impl GlyphMesh {
    /// Empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of vertices in the position channel.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of whole quads.
    pub fn quad_count(&self) -> usize {
        self.positions.len() / QUAD_VERTS
    }

    /// Append one quad with uniform color and zeroed texture coordinates.
    ///
    /// Returns the vertex index of its first vertex.
    pub fn push_quad(&mut self, corners: [Point; QUAD_VERTS], color: Rgba8) -> usize {
        let at = self.positions.len();
        self.positions.extend_from_slice(&corners);
        self.colors.extend_from_slice(&[color; QUAD_VERTS]);
        self.uv0.extend_from_slice(&[Vec2::ZERO; QUAD_VERTS]);
        self.uv2.extend_from_slice(&[Vec2::ZERO; QUAD_VERTS]);
        at
    }

    /// Drop every vertex.
    pub fn clear(&mut self) {
        self.positions.clear();
        self.colors.clear();
        self.uv0.clear();
        self.uv2.clear();
    }

    /// Overwrite `channels` with the contents of `src`.
    pub fn copy_channels_from(&mut self, src: &GlyphMesh, channels: ChannelSet) {
        if channels.contains(ChannelSet::POSITION) {
            copy_channel(&mut self.positions, &src.positions);
        }
        if channels.contains(ChannelSet::COLOR) {
            copy_channel(&mut self.colors, &src.colors);
        }
        if channels.contains(ChannelSet::UV0) {
            copy_channel(&mut self.uv0, &src.uv0);
        }
        if channels.contains(ChannelSet::UV2) {
            copy_channel(&mut self.uv2, &src.uv2);
        }
    }

    /// Overwrite every channel with `snapshot`.
    pub fn restore_from(&mut self, snapshot: &GlyphMesh) {
        self.copy_channels_from(snapshot, ChannelSet::all());
    }

    /// Mutable view of the quad starting at `vertex_index`.
    ///
    /// `None` when any channel is too short to hold the four vertices.
    pub fn quad_mut(&mut self, vertex_index: usize) -> Option<QuadMut<'_>> {
        let range = vertex_index..vertex_index.checked_add(QUAD_VERTS)?;
        Some(QuadMut {
            positions: self.positions.get_mut(range.clone())?.try_into().ok()?,
            colors: self.colors.get_mut(range.clone())?.try_into().ok()?,
            uv0: self.uv0.get_mut(range.clone())?.try_into().ok()?,
            uv2: self.uv2.get_mut(range)?.try_into().ok()?,
        })
    }
}

/// Mutable view over the four vertices of one glyph quad.
#[derive(Debug)]
pub struct QuadMut<'a> {
    /// Corner positions.
    pub positions: &'a mut [Point; QUAD_VERTS],
    /// Corner colors.
    pub colors: &'a mut [Rgba8; QUAD_VERTS],
    /// Primary texture coordinates.
    pub uv0: &'a mut [Vec2; QUAD_VERTS],
    /// Secondary texture coordinates.
    pub uv2: &'a mut [Vec2; QUAD_VERTS],
}

impl QuadMut<'_> {
    /// Average of the four corners.
    pub fn center(&self) -> Point {
        let sum = self
            .positions
            .iter()
            .fold(Vec2::ZERO, |acc, p| acc + p.to_vec2());
        (sum / QUAD_VERTS as f64).to_point()
    }

    /// Move every corner by `offset`.
    pub fn translate(&mut self, offset: Vec2) {
        for p in self.positions.iter_mut() {
            *p += offset;
        }
    }

    /// Scale the corners about the quad center.
    pub fn scale_about_center(&mut self, factor: f64) {
        let c = self.center();
        for p in self.positions.iter_mut() {
            *p = c + (*p - c) * factor;
        }
    }

    /// Collapse every corner onto the quad center.
    pub fn collapse(&mut self) {
        let c = self.center();
        self.positions.fill(c);
    }

    /// Set all four corner colors.
    pub fn set_color(&mut self, color: Rgba8) {
        self.colors.fill(color);
    }

    /// Multiply every corner's alpha by `factor`.
    pub fn multiply_alpha(&mut self, factor: f64) {
        for c in self.colors.iter_mut() {
            *c = c.with_alpha_scaled(factor);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/mesh.rs"]
mod tests;
