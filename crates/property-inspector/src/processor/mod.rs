//! Processor declarations, their normalization and the external engine contracts.

mod config;
mod contract;
mod spec;
mod validator;

pub use config::{
    normalize, normalize_name, DefaultProcessorConfigBuilder, ProcessorConfigBuilder,
    ProcessorConfigMap,
};
pub use contract::{Pipeline, Processor, ProcessorBuilder, ValidatableProcessor};
pub use spec::{ProcessorConfig, ProcessorEntry, ProcessorSpec};
pub use validator::{default_message, DefaultProcessorValidator, ProcessorValidator, ValidationFailure};
