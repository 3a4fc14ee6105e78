//! Orchestration of attribute processing for single properties.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::error::{FieldError, HandlerError, ProcessingError};
use crate::processor::{
    DefaultProcessorConfigBuilder, DefaultProcessorValidator, Processor, ProcessorBuilder,
    ProcessorConfig, ProcessorConfigBuilder, ProcessorConfigMap, ProcessorValidator,
    ValidationFailure,
};
use crate::reflect::{Attribute, CustomizableMessageAttribute, Inspectable, PropertyAccessor};

use super::config::AttributeHandlerConfig;
use super::outcome::{ProcessedValue, PropertyErrors};

/// Option under which a custom message is passed to its processor.
pub const CUSTOM_MESSAGE_OPTION: &str = "customMessage";

/// Handles one attribute found on one property.
pub trait PropertyAttributeHandler {
    /// Handle `attribute` for `property` holding `value`.
    ///
    /// `Ok(None)` means the attribute is not meant for this handler.
    fn handle_attribute(
        &mut self,
        property: &str,
        attribute: &dyn Attribute,
        value: &Value,
    ) -> Result<Option<Value>, HandlerError>;
}

/// Writes accumulated results back onto an object.
pub trait PropertyChangeApplier {
    fn apply_changes<T: Inspectable>(&mut self, target: &mut T) -> Result<(), FieldError>;
}

/// Runs processable attributes through an external pipeline and records the
/// outcome per property.
///
/// Processing failures never escape: the property keeps its original value (or
/// the attribute's fallback) and the failure message is recorded. Validation
/// failures are collected per processor. A later call for the same property
/// replaces the earlier outcome.
pub struct AttributeHandler {
    config: AttributeHandlerConfig,
    builder: Box<dyn ProcessorBuilder>,
    validator: Box<dyn ProcessorValidator>,
    config_builder: Box<dyn ProcessorConfigBuilder>,
    processed_values: IndexMap<String, ProcessedValue>,
    errors: IndexMap<String, PropertyErrors>,
    messages: IndexMap<String, IndexMap<String, String>>,
    processor_cache: HashMap<String, Box<dyn Processor>>,
}

impl AttributeHandler {
    /// Create a handler for `processor_type` with default settings.
    pub fn new(processor_type: impl Into<String>, builder: impl ProcessorBuilder + 'static) -> Self {
        Self::with_config(AttributeHandlerConfig::new(processor_type), builder)
    }

    /// Create a handler with explicit configuration.
    pub fn with_config(config: AttributeHandlerConfig, builder: impl ProcessorBuilder + 'static) -> Self {
        Self {
            config,
            builder: Box::new(builder),
            validator: Box::new(DefaultProcessorValidator),
            config_builder: Box::new(DefaultProcessorConfigBuilder),
            processed_values: IndexMap::new(),
            errors: IndexMap::new(),
            messages: IndexMap::new(),
            processor_cache: HashMap::new(),
        }
    }

    /// Replace the processor validator.
    pub fn with_validator(mut self, validator: impl ProcessorValidator + 'static) -> Self {
        self.validator = Box::new(validator);
        self
    }

    /// Replace the configuration builder.
    pub fn with_config_builder(mut self, config_builder: impl ProcessorConfigBuilder + 'static) -> Self {
        self.config_builder = Box::new(config_builder);
        self
    }

    pub fn config(&self) -> &AttributeHandlerConfig {
        &self.config
    }

    pub fn processed_property_values(&self) -> &IndexMap<String, ProcessedValue> {
        &self.processed_values
    }

    pub fn processing_result_errors(&self) -> &IndexMap<String, PropertyErrors> {
        &self.errors
    }

    pub fn processing_result_messages(&self) -> &IndexMap<String, IndexMap<String, String>> {
        &self.messages
    }

    /// Whether any property recorded an error.
    pub fn has_errors(&self) -> bool {
        self.errors.values().any(|e| !e.is_empty())
    }

    /// Number of cached processor instances.
    pub fn cached_processor_count(&self) -> usize {
        self.processor_cache.len()
    }

    /// Forget all accumulated results and cached processors.
    pub fn reset(&mut self) {
        self.processed_values.clear();
        self.errors.clear();
        self.messages.clear();
        self.processor_cache.clear();
    }

    fn process(
        &mut self,
        value: &Value,
        config: &ProcessorConfigMap,
        messages: &IndexMap<String, String>,
    ) -> Result<(Value, IndexMap<String, ValidationFailure>), ProcessingError> {
        let processed = self
            .builder
            .build_pipeline(&self.config.processor_type, config)?
            .process(value.clone())?;
        let failures = self.validate_processors(config, messages)?;
        Ok((processed, failures))
    }

    fn validate_processors(
        &mut self,
        config: &ProcessorConfigMap,
        messages: &IndexMap<String, String>,
    ) -> Result<IndexMap<String, ValidationFailure>, ProcessingError> {
        let mut failures = IndexMap::new();

        for (name, options) in config {
            let failure = if self.config.cache_processors {
                let key = processor_cache_key(name, options);
                if !self.processor_cache.contains_key(&key) {
                    let processor = self.builder.build(&self.config.processor_type, name, options)?;
                    self.processor_cache.insert(key.clone(), processor);
                }
                self.processor_cache
                    .get(&key)
                    .and_then(|processor| self.validator.validate(processor.as_ref(), name, messages))
            } else {
                let processor = self.builder.build(&self.config.processor_type, name, options)?;
                self.validator.validate(processor.as_ref(), name, messages)
            };

            if let Some(failure) = failure {
                failures.insert(name.clone(), failure);
            }
        }

        Ok(failures)
    }

    fn record(&mut self, property: &str, value: Value, messages: IndexMap<String, String>) {
        self.messages.insert(property.to_string(), messages.clone());
        self.processed_values
            .insert(property.to_string(), ProcessedValue { value, messages });
    }
}

impl PropertyAttributeHandler for AttributeHandler {
    fn handle_attribute(
        &mut self,
        property: &str,
        attribute: &dyn Attribute,
        value: &Value,
    ) -> Result<Option<Value>, HandlerError> {
        let Some(processable) = attribute.as_processable() else {
            trace!(property, attribute = attribute.class().name, "Skipping non-processable attribute");
            return Ok(None);
        };

        let mut config = self.config_builder.build(processable);
        let messages = attribute
            .as_customizable_message()
            .map(|source| inject_messages(&mut config, source))
            .unwrap_or_default();

        trace!(property, processors = config.len(), "Processing attribute");

        match self.process(value, &config, &messages) {
            Ok((processed, failures)) => {
                if !failures.is_empty() {
                    self.errors.entry(property.to_string()).or_default().validation = failures;
                }
                self.record(property, processed.clone(), messages);
                Ok(Some(processed))
            }
            Err(err) => {
                warn!(property, error = %err, "Processing failed, keeping fallback value");
                self.errors
                    .entry(property.to_string())
                    .or_default()
                    .processing
                    .push(err.message().to_string());
                let restored = attribute.fallback_value().unwrap_or_else(|| value.clone());
                self.record(property, restored.clone(), messages);
                Ok(Some(restored))
            }
        }
    }
}

impl PropertyChangeApplier for AttributeHandler {
    fn apply_changes<T: Inspectable>(&mut self, target: &mut T) -> Result<(), FieldError> {
        for (property, processed) in &self.processed_values {
            PropertyAccessor::new(&mut *target, property)?.set_value(processed.value.clone())?;
        }
        debug!(properties = self.processed_values.len(), "Applied processed values");

        if self.config.clear_after_apply {
            self.reset();
        }
        Ok(())
    }
}

/// Inject non-empty custom messages into their processor's options.
fn inject_messages(
    config: &mut ProcessorConfigMap,
    source: &dyn CustomizableMessageAttribute,
) -> IndexMap<String, String> {
    let mut messages = IndexMap::new();

    for (name, options) in config.iter_mut() {
        if let Some(message) = source.message(name).filter(|m| !m.is_empty()) {
            options.insert(CUSTOM_MESSAGE_OPTION.to_string(), Value::String(message.clone()));
            messages.insert(name.clone(), message);
        }
    }

    messages
}

/// Cache key of a processor: its name plus its serialized options.
fn processor_cache_key(name: &str, options: &ProcessorConfig) -> String {
    format!("{}\u{0}{}", name, Value::Object(options.clone()))
}
