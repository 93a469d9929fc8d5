bitflags::bitflags! {
    /// Mesh channels touched by an effect or pushed to the host.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, serde::Serialize, serde::Deserialize)]
    pub struct ChannelSet: u8 {
        /// Vertex positions.
        const POSITION = 0b0001;
        /// Vertex colors.
        const COLOR    = 0b0010;
        /// Primary texture coordinates.
        const UV0      = 0b0100;
        /// Secondary texture coordinates.
        const UV2      = 0b1000;
    }
}

impl ChannelSet {
    /// Lowercase names of the set channels, in bit order.
    pub fn names(self) -> Vec<&'static str> {
        self.iter_names()
            .map(|(name, _)| match name {
                "POSITION" => "position",
                "COLOR" => "color",
                "UV0" => "uv0",
                _ => "uv2",
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/channels.rs"]
mod tests;
