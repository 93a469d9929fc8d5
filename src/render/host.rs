use crate::render::channels::ChannelSet;
use crate::render::mesh::GlyphMesh;

/// Per-glyph layout facts reported by the host.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GlyphInfo {
    /// Logical index into the clean text.
    pub index: usize,
    /// First vertex of the glyph's quad in the mesh.
    pub vertex_index: usize,
    /// Whether the host draws this glyph at all.
    pub visible: bool,
    /// Host-side glyph scale; zero-scale glyphs are skipped.
    pub scale: f64,
    /// The character laid out.
    pub ch: char,
}

/// The text layout engine a renderer drives.
///
/// The host owns the live mesh; the renderer mutates it in place and asks the host to push the
/// changed channels.
pub trait TextLayoutHost {
    /// Lay out `clean_text`, replacing the glyphs and the live mesh.
    fn layout(&mut self, clean_text: &str);

    /// Glyphs of the current layout, in logical order.
    fn glyphs(&self) -> &[GlyphInfo];

    /// Live mesh.
    fn mesh(&self) -> &GlyphMesh;

    /// Live mesh, mutably.
    fn mesh_mut(&mut self) -> &mut GlyphMesh;

    /// Present the listed channels of the live mesh.
    fn push_channels(&mut self, channels: ChannelSet);
}
