use crate::markup::token::{Token, TokenKind};

/// Decides whether a scanned tag or action is motion markup.
///
/// Rejected markup is left in the text untouched.
pub trait TagValidator {
    /// Return `true` to accept `name` with optional `attributes`.
    fn validate(&self, name: &str, attributes: Option<&str>) -> bool;
}

impl<F> TagValidator for F
where
    F: Fn(&str, Option<&str>) -> bool,
{
    fn validate(&self, name: &str, attributes: Option<&str>) -> bool {
        self(name, attributes)
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

struct Scan {
    kind: TokenKind,
    name_start: usize,
    name_end: usize,
    value: Option<(usize, usize)>,
    end: usize,
}

// Try to match `<[/]name[=value]>` or `{name[=value]}` starting at `i`.
fn scan_at(chars: &[char], i: usize) -> Option<Scan> {
    let (close_delim, forbidden_open, mut kind) = match chars[i] {
        '<' => ('>', '<', TokenKind::Open),
        '{' => ('}', '{', TokenKind::Action),
        _ => return None,
    };

    let mut j = i + 1;
    if kind == TokenKind::Open && chars.get(j) == Some(&'/') {
        kind = TokenKind::Close;
        j += 1;
    }

    let name_start = j;
    while j < chars.len() && is_name_char(chars[j]) {
        j += 1;
    }
    if j == name_start {
        return None;
    }
    let name_end = j;

    let mut value = None;
    if chars.get(j) == Some(&'=') {
        j += 1;
        let value_start = j;
        while j < chars.len() && chars[j] != close_delim && chars[j] != forbidden_open {
            j += 1;
        }
        value = Some((value_start, j));
    }

    if chars.get(j) != Some(&close_delim) {
        return None;
    }
    Some(Scan {
        kind,
        name_start,
        name_end,
        value,
        end: j,
    })
}

/// Scan `text` for tag and action markers, keeping the ones `validator` accepts.
///
/// Never fails: anything that does not form a complete marker is plain text.
pub fn tokenize<V: TagValidator + ?Sized>(text: &str, validator: &V) -> Vec<Token> {
    let chars: Vec<char> = text.chars().collect();
    let mut out = Vec::new();
    let mut i = 0usize;

    while i < chars.len() {
        let Some(scan) = scan_at(&chars, i) else {
            i += 1;
            continue;
        };

        let name: String = chars[scan.name_start..scan.name_end].iter().collect();
        let attributes: Option<String> = scan.value.map(|(a, b)| chars[a..b].iter().collect());

        if validator.validate(&name, attributes.as_deref()) {
            out.push(Token {
                kind: scan.kind,
                name,
                attributes,
                raw: chars[i..=scan.end].iter().collect(),
                start: i,
                end: scan.end,
            });
        } else {
            tracing::trace!(tag = %name, at = i, "markup rejected by validator");
        }
        i = scan.end + 1;
    }

    out
}

/// Remove the spans of `tokens` (sorted, non-overlapping) from `text`.
pub fn strip_tokens(text: &str, tokens: &[Token]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut next = tokens.iter().peekable();
    for (idx, c) in text.chars().enumerate() {
        while next.peek().is_some_and(|t| t.end < idx) {
            next.next();
        }
        if next.peek().is_some_and(|t| t.start <= idx) {
            continue;
        }
        out.push(c);
    }
    out
}

/// Strip every accepted tag and action from `text`.
pub fn strip_markup<V: TagValidator + ?Sized>(text: &str, validator: &V) -> String {
    strip_tokens(text, &tokenize(text, validator))
}

#[cfg(test)]
#[path = "../../tests/unit/markup/tokenizer.rs"]
mod tests;
