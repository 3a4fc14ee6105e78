//! Validation of built processors.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::contract::Processor;

/// A failed validation, reported as data rather than as an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationFailure {
    pub error_key: String,
    pub message: String,
}

/// Checks a processor after its pipeline has run.
pub trait ProcessorValidator {
    /// Validate `processor`, using `messages` to override the default message.
    fn validate(
        &self,
        processor: &dyn Processor,
        processor_name: &str,
        messages: &IndexMap<String, String>,
    ) -> Option<ValidationFailure>;
}

/// Reports a failure for every validatable processor that is not valid.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultProcessorValidator;

impl ProcessorValidator for DefaultProcessorValidator {
    fn validate(
        &self,
        processor: &dyn Processor,
        processor_name: &str,
        messages: &IndexMap<String, String>,
    ) -> Option<ValidationFailure> {
        let validatable = processor.as_validatable()?;
        if validatable.is_valid() {
            return None;
        }

        Some(ValidationFailure {
            error_key: validatable.error_key(),
            message: messages
                .get(processor_name)
                .cloned()
                .unwrap_or_else(|| default_message(processor_name)),
        })
    }
}

/// Message used when no custom message was supplied.
pub fn default_message(processor_name: &str) -> String {
    format!("Validation failed for {}", processor_name)
}
