use indexmap::map::Entry;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use graft_core::{CanonicalName, GraftResult};

/// Insertion-ordered interning table from canonical name to resolved node.
///
/// Each name resolves at most once: the first resolution wins and later
/// references are no-ops returning the existing node. Iteration order is
/// discovery order, which the serializer mirrors for reproducible output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registry<T> {
    entries: IndexMap<CanonicalName, T>,
}

impl<T> Registry<T> {
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    pub fn contains(&self, name: &CanonicalName) -> bool {
        self.entries.contains_key(name)
    }

    pub fn get(&self, name: &CanonicalName) -> Option<&T> {
        self.entries.get(name)
    }

    pub fn get_mut(&mut self, name: &CanonicalName) -> Option<&mut T> {
        self.entries.get_mut(name)
    }

    /// Register a node under its canonical name. First resolution wins; an
    /// already-registered name keeps its existing node.
    pub fn insert(&mut self, name: CanonicalName, node: T) -> &T {
        self.entries.entry(name).or_insert(node)
    }

    /// Fetch the node for `name`, running `resolve` only if the name has
    /// never been registered. This is the at-most-once guarantee every
    /// dependency walk relies on.
    pub fn get_or_insert_with<F>(&mut self, name: &CanonicalName, resolve: F) -> GraftResult<&T>
    where
        F: FnOnce() -> GraftResult<T>,
    {
        match self.entries.entry(name.clone()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => Ok(entry.insert(resolve()?)),
        }
    }

    /// Iterate entries in insertion (= discovery) order.
    pub fn iter(&self) -> impl Iterator<Item = (&CanonicalName, &T)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Registry::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graft_core::GraftError;

    #[test]
    fn test_get_or_insert_with_resolves_once() {
        let mut registry: Registry<u32> = Registry::new();
        let name = CanonicalName::new("shop__red");
        let mut calls = 0;

        for _ in 0..3 {
            let value = registry
                .get_or_insert_with(&name, || {
                    calls += 1;
                    Ok(7)
                })
                .unwrap();
            assert_eq!(*value, 7);
        }
        assert_eq!(calls, 1);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_get_or_insert_with_propagates_resolution_failure() {
        let mut registry: Registry<u32> = Registry::new();
        let name = CanonicalName::new("shop__broken");
        let result = registry.get_or_insert_with(&name, || {
            Err(GraftError::UnresolvableScene("boom".into()))
        });
        assert!(result.is_err());
        // A failed resolution registers nothing.
        assert!(!registry.contains(&name));
    }

    #[test]
    fn test_insert_first_wins() {
        let mut registry: Registry<u32> = Registry::new();
        let name = CanonicalName::new("shop__red");
        registry.insert(name.clone(), 1);
        registry.insert(name.clone(), 2);
        assert_eq!(registry.get(&name), Some(&1));
    }

    #[test]
    fn test_iteration_preserves_insertion_order() {
        let mut registry: Registry<u32> = Registry::new();
        registry.insert(CanonicalName::new("c"), 3);
        registry.insert(CanonicalName::new("a"), 1);
        registry.insert(CanonicalName::new("b"), 2);
        let names: Vec<&str> = registry.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }
}
