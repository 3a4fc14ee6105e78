//! Example: Sanitize a signup form through its declared attributes.
//!
//! Usage:
//!   RUST_LOG=property_inspector=trace cargo run --example sanitize

use std::any::Any;

use serde_json::{Value, json};

use property_inspector::reflect::{field_from_value, field_value, unknown_field};
use property_inspector::{
    Attribute, AttributeAnalyzer, AttributeClass, AttributeDeclaration, AttributeHandler,
    FieldError, Inspectable, Pipeline, ProcessableAttribute, ProcessingError, Processor,
    ProcessorBuilder, ProcessorConfig, ProcessorConfigMap, ProcessorSpec, PropertyChangeApplier,
    PropertyDescriptor, PropertyInspector, ReflectionError, TypeDescriptor, PROCESSABLE,
};

static SANITIZE: AttributeClass = AttributeClass {
    name: "Sanitize",
    parents: &[&PROCESSABLE],
};

#[derive(Debug, Clone)]
struct Sanitize(Value);

impl Attribute for Sanitize {
    fn class(&self) -> &'static AttributeClass {
        &SANITIZE
    }

    fn as_processable(&self) -> Option<&dyn ProcessableAttribute> {
        Some(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl ProcessableAttribute for Sanitize {
    fn processors(&self) -> ProcessorSpec {
        ProcessorSpec::from_value(&self.0)
    }
}

#[derive(Debug)]
struct Signup {
    username: String,
    email: String,
}

impl Inspectable for Signup {
    fn describe() -> Result<TypeDescriptor, ReflectionError> {
        Ok(TypeDescriptor::of::<Signup>()
            .property(PropertyDescriptor::public("username").with_attribute(AttributeDeclaration::of(Sanitize(json!(["trim"])))))
            .property(
                PropertyDescriptor::public("email")
                    .with_attribute(AttributeDeclaration::of(Sanitize(json!(["trim", "lowercase"])))),
            ))
    }

    fn read_field(&self, name: &str) -> Result<Value, FieldError> {
        match name {
            "username" => field_value(name, &self.username),
            "email" => field_value(name, &self.email),
            _ => Err(unknown_field::<Self>(name)),
        }
    }

    fn write_field(&mut self, name: &str, value: Value) -> Result<(), FieldError> {
        match name {
            "username" => self.username = field_from_value(name, value)?,
            "email" => self.email = field_from_value(name, value)?,
            _ => return Err(unknown_field::<Self>(name)),
        }
        Ok(())
    }
}

/// Applies `trim` and `lowercase` to strings, in declaration order.
#[derive(Debug)]
struct TextPipeline(Vec<String>);

impl TextPipeline {
    fn run(&self, value: Value) -> Result<Value, ProcessingError> {
        let Value::String(mut text) = value else {
            return Ok(value);
        };
        for name in &self.0 {
            text = match name.as_str() {
                "trim" => text.trim().to_string(),
                "lowercase" => text.to_lowercase(),
                other => return Err(ProcessingError::new(format!("Unknown processor '{}'", other))),
            };
        }
        Ok(Value::String(text))
    }
}

impl Processor for TextPipeline {
    fn process(&self, value: Value) -> Result<Value, ProcessingError> {
        self.run(value)
    }
}

impl Pipeline for TextPipeline {
    fn process(&self, value: Value) -> Result<Value, ProcessingError> {
        self.run(value)
    }
}

struct TextEngine;

impl ProcessorBuilder for TextEngine {
    fn build(
        &self,
        _processor_type: &str,
        name: &str,
        _config: &ProcessorConfig,
    ) -> Result<Box<dyn Processor>, ProcessingError> {
        Ok(Box::new(TextPipeline(vec![name.to_string()])))
    }

    fn build_pipeline(
        &self,
        _processor_type: &str,
        config: &ProcessorConfigMap,
    ) -> Result<Box<dyn Pipeline>, ProcessingError> {
        Ok(Box::new(TextPipeline(config.keys().cloned().collect())))
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut signup = Signup {
        username: "  ada  ".to_string(),
        email: " Ada@Example.COM ".to_string(),
    };
    println!("Before: {:?}", signup);

    let inspector = PropertyInspector::new(AttributeAnalyzer::new(&PROCESSABLE));
    let mut handler = AttributeHandler::new("sanitizer", TextEngine);

    inspector.inspect(&signup, &mut handler)?;
    if handler.has_errors() {
        for (property, errors) in handler.processing_result_errors() {
            println!("  {}: {}", property, errors.messages().join("; "));
        }
        return Ok(());
    }

    handler.apply_changes(&mut signup)?;
    println!("After:  {:?}", signup);
    Ok(())
}
