// 🗂️ Registry - Keyed storage for one entity kind
//
// Ids are compared case-insensitively: "m1" and "M1" are the same key.
// Entities keep their insertion order; removal compacts without reordering.

use crate::error::{CatalogError, CatalogResult};
use tracing::debug;

// ============================================================================
// IDENTITY
// ============================================================================

/// Anything stored in a [`Registry`] exposes a string id.
pub trait Identified {
    fn id(&self) -> &str;
}

/// Case-insensitive id comparison used by every registry and link list.
pub fn ids_match(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

/// Ordered, deduplicated list of entity ids (cast, filmography...)
pub(crate) fn push_unique_id(ids: &mut Vec<String>, id: &str) -> bool {
    if ids.iter().any(|existing| ids_match(existing, id)) {
        return false;
    }
    ids.push(id.to_string());
    true
}

// ============================================================================
// REGISTRY
// ============================================================================

/// Registry of entities of a single kind
///
/// At most one entity per case-insensitive id. `kind` only feeds error
/// messages and logs.
#[derive(Debug, Clone)]
pub struct Registry<E> {
    kind: &'static str,
    entries: Vec<E>,
    capacity: Option<usize>,
}

impl<E: Identified> Registry<E> {
    /// Create new empty, unbounded registry
    pub fn new(kind: &'static str) -> Self {
        Registry {
            kind,
            entries: Vec::new(),
            capacity: None,
        }
    }

    /// Create a registry that refuses registrations past `capacity` entries
    pub fn with_capacity_limit(kind: &'static str, capacity: usize) -> Self {
        Registry {
            kind,
            entries: Vec::with_capacity(capacity),
            capacity: Some(capacity),
        }
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Register an entity, reporting why it was rejected
    ///
    /// Nothing is inserted unless every check passes. Stored ids are
    /// always trimmed: an id with surrounding whitespace is invalid.
    pub fn try_register(&mut self, entity: E) -> CatalogResult<()> {
        let id = entity.id().trim();
        if id.is_empty() || id.len() != entity.id().len() {
            return Err(CatalogError::InvalidId { kind: self.kind });
        }
        if self.position(id).is_some() {
            return Err(CatalogError::DuplicateId {
                kind: self.kind,
                id: id.to_string(),
            });
        }
        if let Some(capacity) = self.capacity {
            if self.entries.len() >= capacity {
                return Err(CatalogError::CapacityExceeded {
                    kind: self.kind,
                    capacity,
                });
            }
        }

        debug!(kind = self.kind, id = %entity.id(), "registered");
        self.entries.push(entity);
        Ok(())
    }

    /// Register an entity; `false` on empty id, duplicate id, or full registry
    pub fn register(&mut self, entity: E) -> bool {
        match self.try_register(entity) {
            Ok(()) => true,
            Err(err) => {
                debug!(kind = self.kind, reason = %err, "registration rejected");
                false
            }
        }
    }

    /// Find entity by id (case-insensitive); empty id is simply not found
    pub fn find_by_id(&self, id: &str) -> Option<&E> {
        self.position(id).map(|index| &self.entries[index])
    }

    /// Mutable lookup. Relationship fields stay private on the entities, so
    /// this cannot break association invariants.
    pub fn find_by_id_mut(&mut self, id: &str) -> Option<&mut E> {
        let index = self.position(id)?;
        self.entries.get_mut(index)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    /// Entities in insertion order
    pub fn list(&self) -> std::slice::Iter<'_, E> {
        self.entries.iter()
    }

    /// Entity at a registration slot. Slots only shift when `remove` runs.
    pub fn get(&self, index: usize) -> Option<&E> {
        self.entries.get(index)
    }

    /// Remove and return the entity with this id; others keep their order
    pub fn take(&mut self, id: &str) -> Option<E> {
        let index = self.position(id)?;
        let removed = self.entries.remove(index);
        debug!(kind = self.kind, id = %removed.id(), "removed");
        Some(removed)
    }

    /// Remove the entity with this id; `false` if it was not registered
    pub fn remove(&mut self, id: &str) -> bool {
        self.take(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, id: &str) -> Option<usize> {
        let id = id.trim();
        if id.is_empty() {
            return None;
        }
        self.entries.iter().position(|e| ids_match(e.id(), id))
    }
}

impl<'a, E: Identified> IntoIterator for &'a Registry<E> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.list()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: String,
        label: &'static str,
    }

    impl Identified for Item {
        fn id(&self) -> &str {
            &self.id
        }
    }

    fn item(id: &str, label: &'static str) -> Item {
        Item {
            id: id.to_string(),
            label,
        }
    }

    #[test]
    fn test_register_and_find() {
        let mut registry = Registry::new("item");
        assert!(registry.register(item("a1", "first")));
        assert_eq!(registry.len(), 1);

        let found = registry.find_by_id("a1");
        assert_eq!(found.map(|i| i.label), Some("first"));
    }

    #[test]
    fn test_duplicate_id_rejected_case_insensitive() {
        let mut registry = Registry::new("item");
        assert!(registry.register(item("m1", "original")));
        assert!(!registry.register(item("M1", "impostor")));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.find_by_id("M1").unwrap().label, "original");

        let err = registry.try_register(item("m1", "again")).unwrap_err();
        assert_eq!(
            err,
            CatalogError::DuplicateId {
                kind: "item",
                id: "m1".to_string()
            }
        );
    }

    #[test]
    fn test_empty_id_rejected() {
        let mut registry = Registry::new("item");
        assert!(!registry.register(item("", "nameless")));
        assert!(!registry.register(item("   ", "blank")));
        assert!(registry.is_empty());
        assert_eq!(
            registry.try_register(item("", "x")).unwrap_err(),
            CatalogError::InvalidId { kind: "item" }
        );
    }

    #[test]
    fn test_padded_id_rejected() {
        let mut registry = Registry::new("movie");
        assert!(!registry.register(item(" M1 ", "Dune")));
        assert_eq!(
            registry.try_register(item("M1\t", "Dune")).unwrap_err(),
            CatalogError::InvalidId { kind: "movie" }
        );
        assert!(registry.is_empty());

        assert!(registry.register(item("M1", "Dune")));
        assert!(!registry.register(item(" M1 ", "Other")));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.find_by_id(" m1 ").unwrap().label, "Dune");
    }

    #[test]
    fn test_find_empty_or_unknown_id() {
        let mut registry = Registry::new("item");
        registry.register(item("a1", "first"));
        assert!(registry.find_by_id("").is_none());
        assert!(registry.find_by_id("zz").is_none());
        assert!(!registry.contains(""));
    }

    #[test]
    fn test_list_insertion_order_is_restartable() {
        let mut registry = Registry::new("item");
        registry.register(item("c", "3"));
        registry.register(item("a", "1"));
        registry.register(item("b", "2"));

        let first: Vec<&str> = registry.list().map(|i| i.id.as_str()).collect();
        let second: Vec<&str> = registry.list().map(|i| i.id.as_str()).collect();
        assert_eq!(first, vec!["c", "a", "b"]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_remove_keeps_relative_order() {
        let mut registry = Registry::new("item");
        for id in ["a", "b", "c", "d"] {
            registry.register(item(id, "x"));
        }

        assert!(registry.remove("B"));
        assert!(!registry.remove("b"));

        let ids: Vec<&str> = (&registry).into_iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c", "d"]);
    }

    #[test]
    fn test_capacity_limit() {
        let mut registry = Registry::with_capacity_limit("item", 2);
        assert!(registry.register(item("a", "x")));
        assert!(registry.register(item("b", "x")));
        assert_eq!(
            registry.try_register(item("c", "x")).unwrap_err(),
            CatalogError::CapacityExceeded {
                kind: "item",
                capacity: 2
            }
        );

        registry.remove("a");
        assert!(registry.register(item("c", "x")));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_id_list_helpers() {
        let mut ids = Vec::new();
        assert!(push_unique_id(&mut ids, "M1"));
        assert!(!push_unique_id(&mut ids, "m1"));
        assert!(push_unique_id(&mut ids, "M2"));
        assert_eq!(ids, vec!["M1", "M2"]);
    }
}
