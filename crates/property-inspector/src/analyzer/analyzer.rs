//! Discovery of attribute-carrying properties.

use std::any::TypeId;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;
use tracing::debug;

use crate::error::AnalysisError;
use crate::reflect::{Attribute, AttributeClass, Inspectable, short_type_name};

use super::cache::{CachedProperty, CachedType, TypeMetadataCache};

/// Current value and matching attributes of one property.
#[derive(Debug, Clone)]
pub struct AnalysisEntry {
    pub value: Value,
    pub attributes: Vec<Arc<dyn Attribute>>,
}

/// Property name to analysis entry, in discovery order.
pub type Analysis = IndexMap<String, AnalysisEntry>;

/// Something that can analyze objects for attributes.
pub trait ObjectAnalyzer {
    fn analyze_object<T: Inspectable>(&self, object: &T) -> Result<Analysis, AnalysisError>;
}

/// Finds the properties carrying attributes of one selected class.
///
/// Discovery runs once per type; later calls only re-read values. Matching uses
/// instance-of semantics, so selecting [`PROCESSABLE`](crate::PROCESSABLE) finds
/// every attribute class that lists it as a parent.
#[derive(Debug, Clone)]
pub struct AttributeAnalyzer {
    attribute_class: &'static AttributeClass,
    cache: Arc<TypeMetadataCache>,
}

impl AttributeAnalyzer {
    /// Create an analyzer with its own cache.
    pub fn new(attribute_class: &'static AttributeClass) -> Self {
        Self::with_cache(attribute_class, Arc::new(TypeMetadataCache::new()))
    }

    /// Create an analyzer using a shared cache.
    pub fn with_cache(attribute_class: &'static AttributeClass, cache: Arc<TypeMetadataCache>) -> Self {
        Self {
            attribute_class,
            cache,
        }
    }

    pub fn attribute_class(&self) -> &'static AttributeClass {
        self.attribute_class
    }

    pub fn cache(&self) -> &Arc<TypeMetadataCache> {
        &self.cache
    }

    /// Whether `T` has been discovered for this analyzer's class.
    pub fn is_cached<T: Inspectable>(&self) -> bool {
        self.cache.contains(TypeId::of::<T>(), self.attribute_class)
    }

    /// Drop every cached discovery result.
    pub fn clear_cache(&self) {
        debug!(entries = self.cache.len(), "Clearing type metadata cache");
        self.cache.clear();
    }

    fn cached_metadata<T: Inspectable>(&self) -> Result<Arc<CachedType>, AnalysisError> {
        let type_id = TypeId::of::<T>();
        if let Some(cached) = self.cache.get(type_id, self.attribute_class) {
            return Ok(cached);
        }

        let discovered = self.discover::<T>()?;
        debug!(
            type_name = short_type_name::<T>(),
            attribute = self.attribute_class.name,
            properties = discovered.len(),
            "Cached attribute metadata"
        );
        Ok(self.cache.insert(type_id, self.attribute_class, discovered))
    }

    fn discover<T: Inspectable>(&self) -> Result<CachedType, AnalysisError> {
        let descriptor = T::describe()?;
        let mut cached = CachedType::new();

        for property in descriptor.into_properties() {
            let attributes = property
                .attributes()
                .iter()
                .filter(|decl| decl.matches(self.attribute_class))
                .map(|decl| decl.instantiate(property.name()))
                .collect::<Result<Vec<_>, _>>()?;

            if !attributes.is_empty() {
                cached.insert(property.name().to_string(), CachedProperty::new(attributes, property));
            }
        }

        Ok(cached)
    }
}

impl ObjectAnalyzer for AttributeAnalyzer {
    fn analyze_object<T: Inspectable>(&self, object: &T) -> Result<Analysis, AnalysisError> {
        let cached = self.cached_metadata::<T>()?;

        cached
            .iter()
            .map(|(name, property)| -> Result<(String, AnalysisEntry), AnalysisError> {
                let value = property.descriptor().read_scoped(object)?;
                Ok((
                    name.clone(),
                    AnalysisEntry {
                        value,
                        attributes: property.attributes().to_vec(),
                    },
                ))
            })
            .collect()
    }
}
