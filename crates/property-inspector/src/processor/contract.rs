//! Interfaces of the external processing engine.
//!
//! Concrete processors and pipelines live outside this crate; the handler only
//! needs to build them, run values through them and ask them whether they
//! consider the last value valid.

use std::fmt;

use serde_json::Value;

use crate::error::ProcessingError;

use super::config::ProcessorConfigMap;
use super::spec::ProcessorConfig;

/// A single configured processor.
pub trait Processor: fmt::Debug + Send + Sync {
    /// Transform a value.
    fn process(&self, value: Value) -> Result<Value, ProcessingError>;

    /// Validation view, if this processor reports validity.
    fn as_validatable(&self) -> Option<&dyn ValidatableProcessor> {
        None
    }
}

/// A processor that reports whether the last processed value was valid.
pub trait ValidatableProcessor {
    fn is_valid(&self) -> bool;

    /// Key identifying the failed rule, e.g. `invalidEmail`.
    fn error_key(&self) -> String;
}

/// An ordered composition of processors applied to one value.
pub trait Pipeline {
    fn process(&self, value: Value) -> Result<Value, ProcessingError>;
}

/// Builds processors and pipelines from normalized configuration.
pub trait ProcessorBuilder {
    /// Build one processor of `processor_type` named `name`.
    fn build(
        &self,
        processor_type: &str,
        name: &str,
        config: &ProcessorConfig,
    ) -> Result<Box<dyn Processor>, ProcessingError>;

    /// Build the pipeline for a whole configuration map.
    fn build_pipeline(
        &self,
        processor_type: &str,
        config: &ProcessorConfigMap,
    ) -> Result<Box<dyn Pipeline>, ProcessingError>;
}
