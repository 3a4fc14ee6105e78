//! Store of per-type discovery results.

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use parking_lot::RwLock;

use crate::reflect::{Attribute, AttributeClass, PropertyDescriptor};

static GLOBAL: Lazy<Arc<TypeMetadataCache>> = Lazy::new(|| Arc::new(TypeMetadataCache::new()));

/// Discovery result for one property.
#[derive(Debug)]
pub struct CachedProperty {
    attributes: Vec<Arc<dyn Attribute>>,
    descriptor: PropertyDescriptor,
}

impl CachedProperty {
    pub(crate) fn new(attributes: Vec<Arc<dyn Attribute>>, descriptor: PropertyDescriptor) -> Self {
        Self {
            attributes,
            descriptor,
        }
    }

    pub fn attributes(&self) -> &[Arc<dyn Attribute>] {
        &self.attributes
    }

    pub fn descriptor(&self) -> &PropertyDescriptor {
        &self.descriptor
    }
}

/// Discovery result for one type: property name to its matching attributes.
pub type CachedType = IndexMap<String, CachedProperty>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CacheKey {
    type_id: TypeId,
    attribute_class: usize,
}

/// Maps a runtime type and a selected attribute class to discovery results.
///
/// Entries are populated on first encounter and never expire; only
/// [`clear`](Self::clear) removes them. The selected class is part of the key,
/// so analyzers sharing a store keep separate results.
#[derive(Debug, Default)]
pub struct TypeMetadataCache {
    entries: RwLock<HashMap<CacheKey, Arc<CachedType>>>,
}

impl TypeMetadataCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide store.
    pub fn global() -> Arc<TypeMetadataCache> {
        Arc::clone(&GLOBAL)
    }

    pub fn get(&self, type_id: TypeId, class: &AttributeClass) -> Option<Arc<CachedType>> {
        self.entries.read().get(&key(type_id, class)).cloned()
    }

    /// Store a discovery result unless another caller stored one first.
    /// Returns the entry that ends up in the store.
    pub fn insert(&self, type_id: TypeId, class: &'static AttributeClass, cached: CachedType) -> Arc<CachedType> {
        let mut entries = self.entries.write();
        Arc::clone(
            entries
                .entry(key(type_id, class))
                .or_insert_with(|| Arc::new(cached)),
        )
    }

    pub fn contains(&self, type_id: TypeId, class: &AttributeClass) -> bool {
        self.entries.read().contains_key(&key(type_id, class))
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

fn key(type_id: TypeId, class: &AttributeClass) -> CacheKey {
    CacheKey {
        type_id,
        attribute_class: class as *const AttributeClass as usize,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflect::PROCESSABLE;

    static OTHER: AttributeClass = AttributeClass::new("Other");
    static LOOKALIKE: AttributeClass = AttributeClass::new("Processable");

    #[test]
    fn test_insert_get_clear() {
        let cache = TypeMetadataCache::new();
        let id = TypeId::of::<String>();

        assert!(cache.get(id, &PROCESSABLE).is_none());
        cache.insert(id, &PROCESSABLE, CachedType::new());

        assert!(cache.contains(id, &PROCESSABLE));
        assert!(!cache.contains(id, &OTHER));
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_first_insert_wins() {
        let cache = TypeMetadataCache::new();
        let id = TypeId::of::<u8>();

        let mut first = CachedType::new();
        first.insert(
            "a".to_string(),
            CachedProperty::new(Vec::new(), PropertyDescriptor::public("a")),
        );
        let stored = cache.insert(id, &PROCESSABLE, first);
        let again = cache.insert(id, &PROCESSABLE, CachedType::new());

        assert!(Arc::ptr_eq(&stored, &again));
        assert_eq!(again.len(), 1);
    }

    #[test]
    fn test_classes_sharing_a_name_get_separate_entries() {
        let cache = TypeMetadataCache::new();
        let id = TypeId::of::<i64>();

        cache.insert(id, &PROCESSABLE, CachedType::new());

        assert!(!cache.contains(id, &LOOKALIKE));
        cache.insert(id, &LOOKALIKE, CachedType::new());
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_global_is_shared() {
        assert!(Arc::ptr_eq(&TypeMetadataCache::global(), &TypeMetadataCache::global()));
    }
}
