//! The inspection driver: analysis followed by attribute handling.

use tracing::debug;

use crate::analyzer::{AttributeAnalyzer, ObjectAnalyzer};
use crate::error::InspectionError;
use crate::handler::PropertyAttributeHandler;
use crate::reflect::{Inspectable, short_type_name};

/// Feeds every discovered (property, attribute) pair of an object to a handler.
///
/// Properties are visited in declaration order and each property's attributes
/// in the order they were declared. Handlers keep their own results; `inspect`
/// hands the handler back so they can be queried.
#[derive(Debug, Clone)]
pub struct PropertyInspector<A = AttributeAnalyzer> {
    analyzer: A,
}

impl<A: ObjectAnalyzer> PropertyInspector<A> {
    pub fn new(analyzer: A) -> Self {
        Self { analyzer }
    }

    pub fn analyzer(&self) -> &A {
        &self.analyzer
    }

    /// Inspect `object`, passing every attribute to `handler`.
    pub fn inspect<'h, T, H>(&self, object: &T, handler: &'h mut H) -> Result<&'h mut H, InspectionError>
    where
        T: Inspectable,
        H: PropertyAttributeHandler,
    {
        let analysis = self.analyzer.analyze_object(object)?;
        debug!(
            type_name = short_type_name::<T>(),
            properties = analysis.len(),
            "Inspecting object"
        );

        for (property, entry) in &analysis {
            for attribute in &entry.attributes {
                handler.handle_attribute(property, attribute.as_ref(), &entry.value)?;
            }
        }

        Ok(handler)
    }
}
