//! Attribute handling: processing, validation and applying results.

mod config;
mod handler;
mod outcome;

pub use config::AttributeHandlerConfig;
pub use handler::{
    AttributeHandler, PropertyAttributeHandler, PropertyChangeApplier, CUSTOM_MESSAGE_OPTION,
};
pub use outcome::{ProcessedValue, PropertyErrors};
