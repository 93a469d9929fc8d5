use std::cell::Cell;

use crate::markup::resolver::{ActionMarker, ParseResult, TagRange, parse_markup};
use crate::markup::token::Token;
use crate::markup::tokenizer::TagValidator;

/// Memoized parse of the last raw input.
///
/// Lookups take `&self`; the last matched range and action are remembered in one-slot caches
/// so monotonic per-frame queries stay O(1).
#[derive(Debug, Default)]
pub struct Preprocessor {
    raw: Option<String>,
    result: Option<ParseResult>,
    range_slot: Cell<Option<usize>>,
    action_slot: Cell<Option<usize>>,
    parse_count: u64,
}

impl Preprocessor {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `raw` unless it matches the cached input, returning the clean text.
    ///
    /// Empty input clears the cache.
    pub fn preprocess<V: TagValidator + ?Sized>(&mut self, raw: &str, validator: &V) -> &str {
        if raw.is_empty() {
            self.clear_cache();
            return "";
        }
        let stale = self.result.is_none() || self.raw.as_deref() != Some(raw);
        if stale {
            let parsed = parse_markup(raw, validator);
            self.parse_count += 1;
            tracing::debug!(parses = self.parse_count, "markup reparsed");
            self.raw = Some(raw.to_owned());
            self.result = Some(parsed);
            self.range_slot.set(None);
            self.action_slot.set(None);
        }
        self.clean_text()
    }

    /// Drop the cached parse so the next `preprocess` call reparses.
    pub fn clear_cache(&mut self) {
        self.raw = None;
        self.result = None;
        self.range_slot.set(None);
        self.action_slot.set(None);
    }

    /// Cached parse, if any.
    pub fn result(&self) -> Option<&ParseResult> {
        self.result.as_ref()
    }

    /// Cached clean text, or `""`.
    pub fn clean_text(&self) -> &str {
        self.result.as_ref().map_or("", |r| r.clean_text.as_str())
    }

    /// Number of full parses performed so far.
    pub fn parse_count(&self) -> u64 {
        self.parse_count
    }

    /// Range containing clean index `index`.
    pub fn range_at(&self, index: usize) -> Option<&TagRange> {
        let ranges = &self.result.as_ref()?.ranges;
        if let Some(slot) = self.range_slot.get() {
            if ranges.get(slot).is_some_and(|r| r.contains(index)) {
                return ranges.get(slot);
            }
            if ranges.get(slot + 1).is_some_and(|r| r.contains(index)) {
                self.range_slot.set(Some(slot + 1));
                return ranges.get(slot + 1);
            }
        }
        let found = ranges.iter().position(|r| r.contains(index))?;
        self.range_slot.set(Some(found));
        ranges.get(found)
    }

    /// Active tags at `index`, most recent first.
    pub fn tags_at(&self, index: usize) -> &[Token] {
        self.range_at(index).map_or(&[], |r| r.tags.as_slice())
    }

    /// First action positioned at `index`.
    pub fn action_at(&self, index: usize) -> Option<&ActionMarker> {
        let actions = &self.result.as_ref()?.actions;
        if let Some(slot) = self.action_slot.get()
            && actions.get(slot).is_some_and(|a| a.position == index)
        {
            return actions.get(slot);
        }
        let found = actions.iter().position(|a| a.position == index)?;
        self.action_slot.set(Some(found));
        actions.get(found)
    }

    /// Every action positioned at `index`, in source order.
    pub fn actions_at(&self, index: usize) -> &[ActionMarker] {
        let Some(result) = self.result.as_ref() else {
            return &[];
        };
        let actions = result.actions.as_slice();
        let lo = actions.partition_point(|a| a.position < index);
        let hi = actions.partition_point(|a| a.position <= index);
        &actions[lo..hi]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/markup/preprocess.rs"]
mod tests;
