//! Structural description of inspectable types.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{FieldError, ReflectionError};

use super::attribute::AttributeDeclaration;

/// A type whose properties can be discovered and accessed by name.
///
/// `describe` is static per type: its result is cached by the analyzer and reused
/// for every instance. `read_field` and `write_field` bypass visibility; the
/// descriptors decide whether an access is allowed.
pub trait Inspectable: 'static {
    /// Describe the declared properties in declaration order.
    fn describe() -> Result<TypeDescriptor, ReflectionError>;

    /// Read the current value of a field.
    fn read_field(&self, name: &str) -> Result<Value, FieldError>;

    /// Replace the value of a field.
    fn write_field(&mut self, name: &str, value: Value) -> Result<(), FieldError>;
}

/// Serialize a field value for [`Inspectable::read_field`].
pub fn field_value<V: Serialize>(property: &str, value: &V) -> Result<Value, FieldError> {
    serde_json::to_value(value).map_err(|e| FieldError::conversion(property, e))
}

/// Deserialize a value for [`Inspectable::write_field`].
pub fn field_from_value<V: DeserializeOwned>(property: &str, value: Value) -> Result<V, FieldError> {
    serde_json::from_value(value).map_err(|e| FieldError::conversion(property, e))
}

/// Error for a field name the type does not declare.
pub fn unknown_field<T: ?Sized>(property: &str) -> FieldError {
    FieldError::Reflection(ReflectionError::UnknownProperty {
        type_name: short_type_name::<T>().to_string(),
        property: property.to_string(),
    })
}

/// Last path segment of a type name, e.g. `User` for `app::model::User`.
pub fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

/// Declared visibility of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    Public,
    Protected,
    Private,
}

/// The declared properties of one type.
#[derive(Debug)]
pub struct TypeDescriptor {
    type_name: String,
    properties: Vec<PropertyDescriptor>,
}

impl TypeDescriptor {
    /// Create an empty descriptor.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            properties: Vec::new(),
        }
    }

    /// Create an empty descriptor named after `T`.
    pub fn of<T: ?Sized>() -> Self {
        Self::new(short_type_name::<T>())
    }

    /// Add a property.
    pub fn property(mut self, mut property: PropertyDescriptor) -> Self {
        property.type_name = self.type_name.clone();
        self.properties.push(property);
        self
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn properties(&self) -> &[PropertyDescriptor] {
        &self.properties
    }

    /// Find a property by name.
    pub fn find(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Take the property with the given name out of the descriptor.
    pub fn take(mut self, name: &str) -> Result<PropertyDescriptor, ReflectionError> {
        match self.properties.iter().position(|p| p.name == name) {
            Some(idx) => Ok(self.properties.swap_remove(idx)),
            None => Err(ReflectionError::UnknownProperty {
                type_name: self.type_name,
                property: name.to_string(),
            }),
        }
    }

    pub fn into_properties(self) -> Vec<PropertyDescriptor> {
        self.properties
    }
}

/// A single declared property.
///
/// Non-public properties reject plain access until made accessible. The flag
/// belongs to this descriptor instance, not to the type. Scoped access is
/// counted separately, so overlapping scopes on a shared descriptor never
/// revoke each other's access.
#[derive(Debug)]
pub struct PropertyDescriptor {
    type_name: String,
    name: String,
    visibility: Visibility,
    accessible: AtomicBool,
    scopes: AtomicUsize,
    attributes: Vec<AttributeDeclaration>,
}

impl PropertyDescriptor {
    /// Declare a property with the given visibility.
    pub fn new(name: impl Into<String>, visibility: Visibility) -> Self {
        Self {
            type_name: String::new(),
            name: name.into(),
            visibility,
            accessible: AtomicBool::new(visibility == Visibility::Public),
            scopes: AtomicUsize::new(0),
            attributes: Vec::new(),
        }
    }

    pub fn public(name: impl Into<String>) -> Self {
        Self::new(name, Visibility::Public)
    }

    pub fn protected(name: impl Into<String>) -> Self {
        Self::new(name, Visibility::Protected)
    }

    pub fn private(name: impl Into<String>) -> Self {
        Self::new(name, Visibility::Private)
    }

    /// Attach an attribute declaration.
    pub fn with_attribute(mut self, attribute: AttributeDeclaration) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn attributes(&self) -> &[AttributeDeclaration] {
        &self.attributes
    }

    /// Whether plain access is currently allowed.
    pub fn is_accessible(&self) -> bool {
        self.visibility == Visibility::Public
            || self.accessible.load(Ordering::Acquire)
            || self.scopes.load(Ordering::Acquire) > 0
    }

    /// Allow or forbid plain access to a non-public property. Open access scopes
    /// keep the property accessible until they end.
    pub fn set_accessible(&self, accessible: bool) {
        if self.visibility != Visibility::Public {
            self.accessible.store(accessible, Ordering::Release);
        }
    }

    /// Read the property, respecting accessibility.
    pub fn get_value<T: Inspectable>(&self, object: &T) -> Result<Value, FieldError> {
        self.ensure_accessible()?;
        object.read_field(&self.name)
    }

    /// Write the property, respecting accessibility.
    pub fn set_value<T: Inspectable>(&self, object: &mut T, value: Value) -> Result<(), FieldError> {
        self.ensure_accessible()?;
        object.write_field(&self.name, value)
    }

    /// Read the property with accessibility forced for the duration of the call.
    pub(crate) fn read_scoped<T: Inspectable>(&self, object: &T) -> Result<Value, FieldError> {
        let _scope = AccessScope::enter(self);
        self.get_value(object)
    }

    /// Write the property with accessibility forced for the duration of the call.
    pub(crate) fn write_scoped<T: Inspectable>(&self, object: &mut T, value: Value) -> Result<(), FieldError> {
        let _scope = AccessScope::enter(self);
        self.set_value(object, value)
    }

    fn ensure_accessible(&self) -> Result<(), ReflectionError> {
        if self.is_accessible() {
            Ok(())
        } else {
            Err(ReflectionError::Inaccessible {
                type_name: self.type_name.clone(),
                property: self.name.clone(),
            })
        }
    }
}

/// Keeps a property accessible while alive.
struct AccessScope<'a> {
    property: &'a PropertyDescriptor,
}

impl<'a> AccessScope<'a> {
    fn enter(property: &'a PropertyDescriptor) -> Self {
        property.scopes.fetch_add(1, Ordering::AcqRel);
        Self { property }
    }
}

impl Drop for AccessScope<'_> {
    fn drop(&mut self) {
        self.property.scopes.fetch_sub(1, Ordering::AcqRel);
    }
}
