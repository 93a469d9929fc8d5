use std::collections::HashMap;

use crate::effects::component::MotionComponent;
use crate::foundation::error::{MotionError, MotionResult};

/// Ordered, keyed collection of boxed components.
///
/// Insertion order is preserved; keys are unique and non-empty.
pub struct MotionCollection<T: ?Sized> {
    items: Vec<Box<T>>,
    slots: HashMap<String, usize>,
}

impl<T: ?Sized> Default for MotionCollection<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            slots: HashMap::new(),
        }
    }
}

impl<T: ?Sized> std::fmt::Debug for MotionCollection<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MotionCollection")
            .field("len", &self.items.len())
            .finish()
    }
}

impl<T: MotionComponent + ?Sized> MotionCollection<T> {
    /// Empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `item` under its key.
    pub fn add(&mut self, item: Box<T>) -> MotionResult<()> {
        let key = item.key().to_owned();
        if key.trim().is_empty() {
            return Err(MotionError::registry("component key must be non-empty"));
        }
        if self.slots.contains_key(&key) {
            return Err(MotionError::registry(format!(
                "duplicate component key '{key}'"
            )));
        }
        self.slots.insert(key, self.items.len());
        self.items.push(item);
        Ok(())
    }

    /// Unregister and return the component under `key`.
    pub fn remove(&mut self, key: &str) -> Option<Box<T>> {
        let slot = self.slots.remove(key)?;
        let item = self.items.remove(slot);
        for s in self.slots.values_mut() {
            if *s > slot {
                *s -= 1;
            }
        }
        Some(item)
    }

    /// Component registered under `key`.
    pub fn get(&self, key: &str) -> Option<&T> {
        let slot = *self.slots.get(key)?;
        self.items.get(slot).map(|b| &**b)
    }

    /// Whether `key` is registered.
    pub fn contains(&self, key: &str) -> bool {
        self.slots.contains_key(key)
    }

    /// Components in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter().map(|b| &**b)
    }

    /// Keys in registration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|b| b.key())
    }

    /// Number of components.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// `true` when empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/registry.rs"]
mod tests;
