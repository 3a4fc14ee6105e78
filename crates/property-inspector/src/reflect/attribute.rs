//! Attribute classes, live attribute instances and their capabilities.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::ReflectionError;
use crate::processor::ProcessorSpec;

/// A named attribute class with optional parent classes.
///
/// Matching is "instance-of": an attribute declared with class `C` matches a
/// selection of `P` when `C` is `P` or has `P` somewhere in its parent chain.
/// Classes are identified by address, so declare each one as a `static`; two
/// statics sharing a name are still distinct classes.
///
/// ```
/// use property_inspector::{AttributeClass, PROCESSABLE};
///
/// static SANITIZE: AttributeClass = AttributeClass {
///     name: "Sanitize",
///     parents: &[&PROCESSABLE],
/// };
///
/// assert!(SANITIZE.is_instance_of(&PROCESSABLE));
/// ```
#[derive(Debug)]
pub struct AttributeClass {
    pub name: &'static str,
    pub parents: &'static [&'static AttributeClass],
}

impl AttributeClass {
    /// Create a root class.
    pub const fn new(name: &'static str) -> Self {
        Self { name, parents: &[] }
    }

    /// Whether this class is `other` or descends from it.
    pub fn is_instance_of(&self, other: &AttributeClass) -> bool {
        std::ptr::eq(self, other) || self.parents.iter().any(|p| p.is_instance_of(other))
    }
}

impl PartialEq for AttributeClass {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }
}

impl Eq for AttributeClass {}

impl fmt::Display for AttributeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Root class of every attribute that yields a processor specification.
pub static PROCESSABLE: AttributeClass = AttributeClass::new("Processable");

/// Root class of every attribute that supplies per-processor messages.
pub static CUSTOMIZABLE_MESSAGE: AttributeClass = AttributeClass::new("CustomizableMessage");

/// A live metadata instance attached to a property.
///
/// Capabilities are exposed as views; the handler asks for each view once per
/// attribute instead of probing for methods.
pub trait Attribute: fmt::Debug + Send + Sync + 'static {
    /// The class this attribute was declared as.
    fn class(&self) -> &'static AttributeClass;

    /// Processor specification view, if this attribute is processable.
    fn as_processable(&self) -> Option<&dyn ProcessableAttribute> {
        None
    }

    /// Custom message view, if this attribute supplies messages.
    fn as_customizable_message(&self) -> Option<&dyn CustomizableMessageAttribute> {
        None
    }

    /// Value to use instead of the original when processing fails.
    fn fallback_value(&self) -> Option<Value> {
        None
    }

    /// Downcasting support for handlers that match on concrete attributes.
    fn as_any(&self) -> &dyn Any;
}

/// An attribute that yields a processor specification.
pub trait ProcessableAttribute {
    fn processors(&self) -> ProcessorSpec;
}

/// An attribute that can override the message reported for a processor.
pub trait CustomizableMessageAttribute {
    /// Message for `processor`, or `None` to keep the default.
    fn message(&self, processor: &str) -> Option<String>;
}

type AttributeFactory = dyn Fn() -> Result<Arc<dyn Attribute>, String> + Send + Sync;

/// An attribute as declared on a property, before instantiation.
#[derive(Clone)]
pub struct AttributeDeclaration {
    class: &'static AttributeClass,
    factory: Arc<AttributeFactory>,
}

impl AttributeDeclaration {
    /// Declare an attribute produced by `factory`. A factory error is reported as
    /// an instantiation failure during discovery.
    pub fn new<F>(class: &'static AttributeClass, factory: F) -> Self
    where
        F: Fn() -> Result<Arc<dyn Attribute>, String> + Send + Sync + 'static,
    {
        Self {
            class,
            factory: Arc::new(factory),
        }
    }

    /// Declare an attribute from a prototype value, cloned on every instantiation.
    pub fn of<A>(attribute: A) -> Self
    where
        A: Attribute + Clone,
    {
        let class = attribute.class();
        Self::new(class, move || Ok(Arc::new(attribute.clone()) as Arc<dyn Attribute>))
    }

    /// The declared class.
    pub fn class(&self) -> &'static AttributeClass {
        self.class
    }

    /// Whether this declaration matches `selected` with instance-of semantics.
    pub fn matches(&self, selected: &AttributeClass) -> bool {
        self.class.is_instance_of(selected)
    }

    /// Produce a live attribute.
    pub fn instantiate(&self, property: &str) -> Result<Arc<dyn Attribute>, ReflectionError> {
        (self.factory)().map_err(|reason| ReflectionError::Instantiation {
            class: self.class.name.to_string(),
            property: property.to_string(),
            reason,
        })
    }
}

impl fmt::Debug for AttributeDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttributeDeclaration")
            .field("class", &self.class.name)
            .finish_non_exhaustive()
    }
}
