//! Reflection surface: attribute metadata, type descriptors and field access.

mod accessor;
mod attribute;
mod descriptor;

pub use accessor::PropertyAccessor;
pub use attribute::{
    Attribute, AttributeClass, AttributeDeclaration, CustomizableMessageAttribute,
    ProcessableAttribute, CUSTOMIZABLE_MESSAGE, PROCESSABLE,
};
pub use descriptor::{
    field_from_value, field_value, short_type_name, unknown_field, Inspectable, PropertyDescriptor,
    TypeDescriptor, Visibility,
};
