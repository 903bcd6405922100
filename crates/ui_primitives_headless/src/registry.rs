//! Ordered role registries keyed by a caller-chosen value.

use crate::error::PrimitiveError;

/// Ordered `(key, entry)` collection that role elements join on mount and leave on unmount.
///
/// Order is registration order. Each entry has a single writer: the role that registered it.
#[derive(Debug, Clone)]
pub struct Registry<E> {
    entries: Vec<(String, E)>,
}

impl<E> Default for Registry<E> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<E> Registry<E> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `entry` under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`PrimitiveError::DuplicateValue`] when `key` is already registered.
    pub fn register(&mut self, key: impl Into<String>, entry: E) -> Result<(), PrimitiveError> {
        let key = key.into();
        if self.contains(&key) {
            return Err(PrimitiveError::DuplicateValue { value: key });
        }
        self.entries.push((key, entry));
        Ok(())
    }

    /// Removes and returns the entry under `key`.
    pub fn deregister(&mut self, key: &str) -> Option<E> {
        let index = self.position(key)?;
        Some(self.entries.remove(index).1)
    }

    /// Returns the entry under `key`.
    pub fn get(&self, key: &str) -> Option<&E> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, entry)| entry)
    }

    /// Mutable access for the role that owns the entry under `key`.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut E> {
        self.entries
            .iter_mut()
            .find(|(existing, _)| existing == key)
            .map(|(_, entry)| entry)
    }

    /// Returns `true` when `key` is registered.
    pub fn contains(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Registration index of `key`.
    pub fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(existing, _)| existing == key)
    }

    /// Iterates entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &E)> {
        self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    /// First registered entry matching `accept`.
    pub fn first_where(&self, accept: impl Fn(&E) -> bool) -> Option<(&str, &E)> {
        self.iter().find(|(_, entry)| accept(*entry))
    }

    /// Walks from `from` by `delta` steps (wrapping), skipping entries rejected by `accept`.
    ///
    /// Returns `None` when `from` is unknown or no other entry is accepted.
    pub fn step_from(
        &self,
        from: &str,
        delta: isize,
        accept: impl Fn(&E) -> bool,
    ) -> Option<(&str, &E)> {
        let start = self.position(from)?;
        let len = self.entries.len() as isize;
        (1..len)
            .map(|offset| (start as isize + delta * offset).rem_euclid(len) as usize)
            .map(|index| &self.entries[index])
            .find(|(_, entry)| accept(entry))
            .map(|(key, entry)| (key.as_str(), entry))
    }

    /// Number of registered entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn registry(keys: &[&str]) -> Registry<bool> {
        let mut registry = Registry::new();
        for key in keys {
            registry.register(*key, true).expect("register");
        }
        registry
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let mut registry = registry(&["a"]);
        assert_eq!(
            registry.register("a", false),
            Err(PrimitiveError::DuplicateValue { value: "a".into() })
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn step_wraps_in_both_directions() {
        let registry = registry(&["a", "b", "c"]);

        assert_eq!(registry.step_from("c", 1, |_| true).map(|(k, _)| k), Some("a"));
        assert_eq!(registry.step_from("a", -1, |_| true).map(|(k, _)| k), Some("c"));
    }

    #[test]
    fn step_skips_rejected_entries() {
        let mut registry = registry(&["a"]);
        registry.register("b", false).expect("register");
        registry.register("c", true).expect("register");

        assert_eq!(
            registry.step_from("a", 1, |enabled| *enabled).map(|(k, _)| k),
            Some("c")
        );
    }

    #[test]
    fn deregister_keeps_remaining_order() {
        let mut registry = registry(&["a", "b", "c"]);
        assert_eq!(registry.deregister("b"), Some(true));
        assert_eq!(registry.iter().map(|(k, _)| k).collect::<Vec<_>>(), vec!["a", "c"]);
        assert_eq!(registry.deregister("missing"), None);
    }
}
