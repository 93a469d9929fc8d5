/// What a markup token does to the open-tag state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// `<name>` or `<name=value>`.
    Open,
    /// `</name>`.
    Close,
    /// `{name}` or `{name=value}`, a zero-width point marker.
    Action,
}

/// A validated markup token.
///
/// `start` and `end` are inclusive char indices into the raw text the token was scanned from.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Token {
    /// Token kind.
    pub kind: TokenKind,
    /// Tag or action name.
    pub name: String,
    /// Value after `=`, if present (may be empty).
    pub attributes: Option<String>,
    /// Exact raw span text, delimiters included.
    pub raw: String,
    /// First char index of the span.
    pub start: usize,
    /// Last char index of the span (inclusive).
    pub end: usize,
}

impl Token {
    /// Span length in chars, delimiters included.
    pub fn char_len(&self) -> usize {
        self.end + 1 - self.start
    }

    /// `true` for open and close tags, `false` for actions.
    pub fn is_tag(&self) -> bool {
        matches!(self.kind, TokenKind::Open | TokenKind::Close)
    }

    /// Attribute parsed as an integer, when it is one.
    pub fn int_attribute(&self) -> Option<i64> {
        self.attributes.as_deref()?.trim().parse().ok()
    }
}
