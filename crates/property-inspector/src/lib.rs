//! Property Inspector: attribute-driven processing of object properties.
//!
//! Types describe their properties and the attributes declared on them through
//! [`Inspectable`]. An [`AttributeAnalyzer`] discovers the properties carrying a
//! selected attribute class and caches that shape per type. A
//! [`PropertyInspector`] then feeds every (property, attribute) pair to a
//! [`PropertyAttributeHandler`], typically an [`AttributeHandler`] that runs the
//! value through an external processing pipeline, collects validation errors,
//! and can write the processed values back onto the object.
//!
//! # Core Principles
//!
//! - **Declarative**: processing rules live on the properties they apply to
//! - **Discover once**: the attribute shape of a type is cached, values are re-read
//! - **Local recovery**: a failing processor never aborts inspection of other properties
//!
//! # Example
//!
//! ```no_run
//! use property_inspector::{
//!     AttributeAnalyzer, AttributeHandler, PropertyChangeApplier, PropertyInspector, PROCESSABLE,
//! };
//! # use property_inspector::{Inspectable, ProcessorBuilder};
//! # fn run<T: Inspectable>(mut user: T, builder: impl ProcessorBuilder + 'static) {
//!
//! let inspector = PropertyInspector::new(AttributeAnalyzer::new(&PROCESSABLE));
//! let mut handler = AttributeHandler::new("sanitizer", builder);
//!
//! inspector.inspect(&user, &mut handler).unwrap();
//! if !handler.has_errors() {
//!     handler.apply_changes(&mut user).unwrap();
//! }
//! # }
//! ```

pub mod analyzer;
pub mod error;
pub mod handler;
pub mod processor;
pub mod reflect;

mod inspector;

pub use crate::inspector::PropertyInspector;
pub use analyzer::{Analysis, AnalysisEntry, AttributeAnalyzer, ObjectAnalyzer, TypeMetadataCache};
pub use error::{AnalysisError, FieldError, HandlerError, InspectionError, ProcessingError, ReflectionError};
pub use handler::{
    AttributeHandler, AttributeHandlerConfig, ProcessedValue, PropertyAttributeHandler,
    PropertyChangeApplier, PropertyErrors,
};
pub use processor::{
    Pipeline, Processor, ProcessorBuilder, ProcessorConfig, ProcessorConfigMap, ProcessorSpec,
    ProcessorValidator, ValidatableProcessor, ValidationFailure,
};
pub use reflect::{
    Attribute, AttributeClass, AttributeDeclaration, CustomizableMessageAttribute, Inspectable,
    ProcessableAttribute, PropertyAccessor, PropertyDescriptor, TypeDescriptor, Visibility,
    CUSTOMIZABLE_MESSAGE, PROCESSABLE,
};
