use crate::foundation::core::{Point, Rgba8};
use crate::foundation::error::{MotionError, MotionResult};
use crate::render::channels::ChannelSet;
use crate::render::host::{GlyphInfo, TextLayoutHost};
use crate::render::mesh::GlyphMesh;

/// Deterministic fixed-advance layout host.
///
/// Every char occupies one grid cell; whitespace and newlines get a glyph entry but no quad.
/// Pushed channels are copied into a separate presented mesh and logged.
#[derive(Clone, Debug)]
pub struct GridLayout {
    advance: f64,
    line_height: f64,
    color: Rgba8,
    glyphs: Vec<GlyphInfo>,
    mesh: GlyphMesh,
    presented: GlyphMesh,
    commits: Vec<ChannelSet>,
    layouts: u64,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            advance: 10.0,
            line_height: 20.0,
            color: Rgba8::WHITE,
            glyphs: Vec::new(),
            mesh: GlyphMesh::new(),
            presented: GlyphMesh::new(),
            commits: Vec::new(),
            layouts: 0,
        }
    }
}

impl GridLayout {
    /// Grid with a 10 unit advance and 20 unit lines.
    pub fn new() -> Self {
        Self::default()
    }

    /// Grid with custom cell metrics.
    pub fn with_metrics(advance: f64, line_height: f64) -> MotionResult<Self> {
        if !advance.is_finite() || advance <= 0.0 {
            return Err(MotionError::validation("grid advance must be finite and > 0"));
        }
        if !line_height.is_finite() || line_height <= 0.0 {
            return Err(MotionError::validation(
                "grid line_height must be finite and > 0",
            ));
        }
        Ok(Self {
            advance,
            line_height,
            ..Self::default()
        })
    }

    /// Base vertex color of laid-out quads.
    pub fn with_color(mut self, color: Rgba8) -> Self {
        self.color = color;
        self
    }

    /// Mesh as last presented through `push_channels`.
    pub fn presented(&self) -> &GlyphMesh {
        &self.presented
    }

    /// Channel sets pushed since the last layout.
    pub fn commits(&self) -> &[ChannelSet] {
        &self.commits
    }

    /// Number of `layout` calls.
    pub fn layout_count(&self) -> u64 {
        self.layouts
    }

    /// Glyph entries, mutably, to simulate host-side changes.
    pub fn glyphs_mut(&mut self) -> &mut [GlyphInfo] {
        &mut self.glyphs
    }
}

impl TextLayoutHost for GridLayout {
    fn layout(&mut self, clean_text: &str) {
        self.glyphs.clear();
        self.mesh.clear();
        self.commits.clear();
        self.layouts += 1;

        let (mut col, mut row) = (0usize, 0usize);
        for (index, ch) in clean_text.chars().enumerate() {
            let vertex_index = self.mesh.vertex_count();
            if ch == '\n' {
                self.glyphs.push(GlyphInfo {
                    index,
                    vertex_index,
                    visible: false,
                    scale: 1.0,
                    ch,
                });
                col = 0;
                row += 1;
                continue;
            }

            let visible = !ch.is_whitespace();
            if visible {
                let x = col as f64 * self.advance;
                let y = row as f64 * self.line_height;
                self.mesh.push_quad(
                    [
                        Point::new(x, y),
                        Point::new(x + self.advance, y),
                        Point::new(x + self.advance, y + self.line_height),
                        Point::new(x, y + self.line_height),
                    ],
                    self.color,
                );
            }
            self.glyphs.push(GlyphInfo {
                index,
                vertex_index,
                visible,
                scale: 1.0,
                ch,
            });
            col += 1;
        }

        self.presented.clone_from(&self.mesh);
        tracing::debug!(
            glyphs = self.glyphs.len(),
            quads = self.mesh.quad_count(),
            "grid layout"
        );
    }

    fn glyphs(&self) -> &[GlyphInfo] {
        &self.glyphs
    }

    fn mesh(&self) -> &GlyphMesh {
        &self.mesh
    }

    fn mesh_mut(&mut self) -> &mut GlyphMesh {
        &mut self.mesh
    }

    fn push_channels(&mut self, channels: ChannelSet) {
        self.presented.copy_channels_from(&self.mesh, channels);
        self.commits.push(channels);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/grid.rs"]
mod tests;
