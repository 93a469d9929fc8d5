use std::collections::HashMap;

use crate::markup::token::{Token, TokenKind};
use crate::markup::tokenizer::{TagValidator, strip_tokens, tokenize};

/// A span of clean text with the motion tags active over it.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TagRange {
    /// First clean char index.
    pub start: usize,
    /// Last clean char index (inclusive).
    pub end: usize,
    /// Active open tokens, most recently opened first, one per tag name.
    pub tags: Vec<Token>,
}

impl TagRange {
    /// Return `true` when `index` lies inside the range.
    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index <= self.end
    }

    /// Active tag names in stack order.
    pub fn tag_names(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(|t| t.name.as_str())
    }

    /// Active token for `name`, if any.
    pub fn tag(&self, name: &str) -> Option<&Token> {
        self.tags.iter().find(|t| t.name == name)
    }
}

/// A point action mapped to clean text.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ActionMarker {
    /// The action token as scanned.
    pub token: Token,
    /// Clean char index of the character the action precedes.
    pub position: usize,
}

/// Clean text plus the resolved ranges and actions for one raw input.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ParseResult {
    /// Input with every accepted marker removed.
    pub clean_text: String,
    /// Disjoint, increasing tag ranges.
    pub ranges: Vec<TagRange>,
    /// Point actions ordered by position.
    pub actions: Vec<ActionMarker>,
}

impl ParseResult {
    /// Clean text length in chars.
    pub fn clean_len(&self) -> usize {
        self.clean_text.chars().count()
    }
}

struct OpenRange {
    start: isize,
    tags: Vec<Token>,
}

struct RangeResolver {
    clean_len: isize,
    open: Vec<Token>,
    change: isize,
    current: Option<OpenRange>,
    ranges: Vec<TagRange>,
}

impl RangeResolver {
    fn new(clean_len: usize) -> Self {
        Self {
            clean_len: clean_len as isize,
            open: Vec::new(),
            change: -1,
            current: None,
            ranges: Vec::new(),
        }
    }

    fn snapshot(&self) -> Vec<Token> {
        let mut out: Vec<Token> = Vec::with_capacity(self.open.len());
        for tok in self.open.iter().rev() {
            if !out.iter().any(|t| t.name == tok.name) {
                out.push(tok.clone());
            }
        }
        out
    }

    fn close_current(&mut self, end: isize) {
        let Some(cur) = self.current.take() else {
            return;
        };
        if end >= cur.start {
            self.ranges.push(TagRange {
                start: cur.start as usize,
                end: end as usize,
                tags: cur.tags,
            });
        }
    }

    fn open_range(&mut self, pos: isize) {
        self.current = Some(OpenRange {
            start: pos,
            tags: self.snapshot(),
        });
    }

    fn on_open(&mut self, tok: Token, pos: isize, left_adj: bool, right_adj: bool) {
        self.open.push(tok);
        if !left_adj {
            self.change = pos - 1;
        }
        if !right_adj {
            self.close_current(self.change);
            self.open_range(pos);
        }
    }

    fn on_close(&mut self, tok: &Token, pos: isize, left_adj: bool, right_adj: bool) {
        let Some(slot) = self.open.iter().rposition(|t| t.name == tok.name) else {
            return;
        };
        self.open.remove(slot);
        if !left_adj {
            self.change = pos - 1;
        }
        if self.current.is_none() {
            return;
        }
        if !right_adj {
            self.close_current(self.change);
            if !self.open.is_empty() && pos < self.clean_len {
                self.open_range(pos);
            }
        }
    }

    fn finish(mut self) -> Vec<TagRange> {
        self.close_current(self.clean_len - 1);
        self.ranges
    }
}

/// Remove close tags with no open tag of the same name before them.
///
/// Orphans take no part in adjacency.
fn drop_orphan_closes(tags: &mut Vec<(Token, isize)>) {
    let mut open: HashMap<String, usize> = HashMap::new();
    tags.retain(|(tok, _)| match tok.kind {
        TokenKind::Open => {
            *open.entry(tok.name.clone()).or_default() += 1;
            true
        }
        TokenKind::Close => match open.get_mut(&tok.name) {
            Some(n) if *n > 0 => {
                *n -= 1;
                true
            }
            _ => {
                tracing::trace!(tag = %tok.name, "orphan close tag ignored");
                false
            }
        },
        TokenKind::Action => true,
    });
}

/// Tokenize `text`, strip accepted markers and resolve the active tag ranges.
///
/// Closing tags match the most recent open tag of the same name, so closes need not be LIFO.
/// Tags with no clean character between them are adjacent and share a range boundary.
#[tracing::instrument(skip_all, fields(len = text.len()))]
pub fn parse_markup<V: TagValidator + ?Sized>(text: &str, validator: &V) -> ParseResult {
    let tokens = tokenize(text, validator);
    let clean_text = strip_tokens(text, &tokens);
    let clean_len = clean_text.chars().count();

    let mut stripped = 0usize;
    let mut positioned = Vec::with_capacity(tokens.len());
    for tok in tokens {
        let pos = tok.start - stripped;
        stripped += tok.char_len();
        positioned.push((tok, pos));
    }

    let mut actions = Vec::new();
    let mut tags = Vec::new();
    for (tok, pos) in positioned {
        if tok.is_tag() {
            tags.push((tok, pos as isize));
        } else {
            actions.push(ActionMarker {
                token: tok,
                position: pos,
            });
        }
    }

    drop_orphan_closes(&mut tags);
    let positions: Vec<isize> = tags.iter().map(|(_, p)| *p).collect();
    let mut resolver = RangeResolver::new(clean_len);
    for (i, (tok, pos)) in tags.into_iter().enumerate() {
        let left_adj = i > 0 && positions[i - 1] == pos;
        let right_adj = positions.get(i + 1) == Some(&pos);
        match tok.kind {
            TokenKind::Open => resolver.on_open(tok, pos, left_adj, right_adj),
            TokenKind::Close => resolver.on_close(&tok, pos, left_adj, right_adj),
            TokenKind::Action => {}
        }
    }
    let ranges = resolver.finish();

    tracing::debug!(
        ranges = ranges.len(),
        actions = actions.len(),
        clean_len,
        "markup resolved"
    );
    ParseResult {
        clean_text,
        ranges,
        actions,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/markup/resolver.rs"]
mod tests;
