//! Scoped access to a single named field.

use serde_json::Value;

use crate::error::FieldError;

use super::descriptor::{Inspectable, PropertyDescriptor};

/// Reads and writes one property of one object regardless of its visibility.
///
/// Each call makes the property accessible only for its own duration; the
/// previous accessibility is restored on every exit path, including failures.
pub struct PropertyAccessor<'a, T: Inspectable> {
    object: &'a mut T,
    property: PropertyDescriptor,
}

impl<'a, T: Inspectable> PropertyAccessor<'a, T> {
    /// Bind to `property` on `object`.
    pub fn new(object: &'a mut T, property: &str) -> Result<Self, FieldError> {
        let property = T::describe()?.take(property)?;
        Ok(Self { object, property })
    }

    pub fn get_value(&self) -> Result<Value, FieldError> {
        self.property.read_scoped(&*self.object)
    }

    pub fn set_value(&mut self, value: Value) -> Result<(), FieldError> {
        self.property.write_scoped(&mut *self.object, value)
    }

    /// The resolved property.
    pub fn descriptor(&self) -> &PropertyDescriptor {
        &self.property
    }
}
