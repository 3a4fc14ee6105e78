//! Shared fixtures for the integration tests.
//!
//! `User` declares its properties through [`Inspectable`] and carries `Sanitize`
//! and `Label` attributes. `TestEngine` is a small processing engine with
//! `trim`, `lowercase`, `truncate`, `email` and `fail` processors.

#![allow(dead_code)]

use std::any::Any;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use serde_json::{Value, json};

use property_inspector::reflect::{field_from_value, field_value, unknown_field};
use property_inspector::{
    Attribute, AttributeClass, AttributeDeclaration, CustomizableMessageAttribute, FieldError,
    Inspectable, Pipeline, ProcessableAttribute, ProcessingError, Processor, ProcessorBuilder,
    ProcessorConfig, ProcessorConfigMap, ProcessorSpec, PropertyDescriptor, ReflectionError,
    TypeDescriptor, ValidatableProcessor, CUSTOMIZABLE_MESSAGE, PROCESSABLE,
};

/// Route library logs to the test output. Filter with `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// =============================================================================
// Attributes
// =============================================================================

pub static SANITIZE: AttributeClass = AttributeClass {
    name: "Sanitize",
    parents: &[&PROCESSABLE, &CUSTOMIZABLE_MESSAGE],
};

pub static LABEL: AttributeClass = AttributeClass::new("Label");

/// Processable attribute declared with a JSON processor list.
#[derive(Debug, Clone)]
pub struct Sanitize {
    pub processors: Value,
    pub messages: Vec<(String, String)>,
    pub fallback: Option<Value>,
}

impl Sanitize {
    pub fn new(processors: Value) -> Self {
        Self {
            processors,
            messages: Vec::new(),
            fallback: None,
        }
    }

    pub fn with_message(mut self, processor: &str, message: &str) -> Self {
        self.messages.push((processor.to_string(), message.to_string()));
        self
    }

    pub fn with_fallback(mut self, fallback: Value) -> Self {
        self.fallback = Some(fallback);
        self
    }
}

impl Attribute for Sanitize {
    fn class(&self) -> &'static AttributeClass {
        &SANITIZE
    }

    fn as_processable(&self) -> Option<&dyn ProcessableAttribute> {
        Some(self)
    }

    fn as_customizable_message(&self) -> Option<&dyn CustomizableMessageAttribute> {
        Some(self)
    }

    fn fallback_value(&self) -> Option<Value> {
        self.fallback.clone()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl ProcessableAttribute for Sanitize {
    fn processors(&self) -> ProcessorSpec {
        ProcessorSpec::from_value(&self.processors)
    }
}

impl CustomizableMessageAttribute for Sanitize {
    fn message(&self, processor: &str) -> Option<String> {
        self.messages
            .iter()
            .find(|(name, _)| name == processor)
            .map(|(_, message)| message.clone())
    }
}

/// Plain metadata with no capabilities.
#[derive(Debug, Clone)]
pub struct Label(pub &'static str);

impl Attribute for Label {
    fn class(&self) -> &'static AttributeClass {
        &LABEL
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// =============================================================================
// User fixture
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub name: String,
    pub email: String,
    pub age: u32,
    pub bio: String,
    nickname: Option<String>,
}

impl User {
    pub fn new(name: &str, email: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            age: 36,
            bio: "  untouched  ".to_string(),
            nickname: None,
        }
    }

    pub fn with_nickname(mut self, nickname: &str) -> Self {
        self.nickname = Some(nickname.to_string());
        self
    }

    pub fn nickname(&self) -> Option<&str> {
        self.nickname.as_deref()
    }
}

impl Inspectable for User {
    fn describe() -> Result<TypeDescriptor, ReflectionError> {
        Ok(TypeDescriptor::of::<User>()
            .property(
                PropertyDescriptor::public("name")
                    .with_attribute(AttributeDeclaration::of(Sanitize::new(json!(["trim"])))),
            )
            .property(
                PropertyDescriptor::public("email")
                    .with_attribute(AttributeDeclaration::of(
                        Sanitize::new(json!(["trim", "lowercase", "email"]))
                            .with_message("email", "Please enter a valid email"),
                    ))
                    .with_attribute(AttributeDeclaration::of(Label("Email address"))),
            )
            .property(
                PropertyDescriptor::public("age").with_attribute(AttributeDeclaration::of(Label("Age"))),
            )
            .property(PropertyDescriptor::public("bio"))
            .property(
                PropertyDescriptor::private("nickname").with_attribute(AttributeDeclaration::of(
                    Sanitize::new(json!({ "truncate": { "max": 4 } })),
                )),
            ))
    }

    fn read_field(&self, name: &str) -> Result<Value, FieldError> {
        match name {
            "name" => field_value(name, &self.name),
            "email" => field_value(name, &self.email),
            "age" => field_value(name, &self.age),
            "bio" => field_value(name, &self.bio),
            "nickname" => field_value(name, &self.nickname),
            _ => Err(unknown_field::<Self>(name)),
        }
    }

    fn write_field(&mut self, name: &str, value: Value) -> Result<(), FieldError> {
        match name {
            "name" => self.name = field_from_value(name, value)?,
            "email" => self.email = field_from_value(name, value)?,
            "age" => self.age = field_from_value(name, value)?,
            "bio" => self.bio = field_from_value(name, value)?,
            "nickname" => self.nickname = field_from_value(name, value)?,
            _ => return Err(unknown_field::<Self>(name)),
        }
        Ok(())
    }
}

// =============================================================================
// Processing engine
// =============================================================================

/// Builder for the test processors.
///
/// Pipelines publish their last output so the `email` processor can report on
/// the value it would have seen.
#[derive(Debug, Clone, Default)]
pub struct TestEngine {
    last_output: Arc<Mutex<Value>>,
    builds: Arc<AtomicUsize>,
    pipelines: Arc<Mutex<Vec<ProcessorConfigMap>>>,
}

impl TestEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of single processors built so far.
    pub fn builds(&self) -> usize {
        self.builds.load(Ordering::SeqCst)
    }

    /// Configurations of every pipeline built so far.
    pub fn pipelines(&self) -> Vec<ProcessorConfigMap> {
        self.pipelines.lock().unwrap().clone()
    }
}

impl ProcessorBuilder for TestEngine {
    fn build(
        &self,
        _processor_type: &str,
        name: &str,
        config: &ProcessorConfig,
    ) -> Result<Box<dyn Processor>, ProcessingError> {
        self.builds.fetch_add(1, Ordering::SeqCst);
        match name {
            "email" => Ok(Box::new(EmailCheck {
                last_output: Arc::clone(&self.last_output),
            })),
            "trim" | "lowercase" | "truncate" | "fail" => Ok(Box::new(Step::parse(name, config)?)),
            other => Err(ProcessingError::new(format!("Unknown processor '{}'", other))),
        }
    }

    fn build_pipeline(
        &self,
        _processor_type: &str,
        config: &ProcessorConfigMap,
    ) -> Result<Box<dyn Pipeline>, ProcessingError> {
        self.pipelines.lock().unwrap().push(config.clone());
        let steps = config
            .iter()
            .filter(|(name, _)| name.as_str() != "email")
            .map(|(name, options)| Step::parse(name, options))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Box::new(Chain {
            steps,
            last_output: Arc::clone(&self.last_output),
        }))
    }
}

#[derive(Debug)]
enum Step {
    Trim,
    Lowercase,
    Truncate(usize),
    Fail,
}

impl Step {
    fn parse(name: &str, options: &ProcessorConfig) -> Result<Self, ProcessingError> {
        match name {
            "trim" => Ok(Step::Trim),
            "lowercase" => Ok(Step::Lowercase),
            "truncate" => {
                let max = options
                    .get("max")
                    .and_then(Value::as_u64)
                    .ok_or_else(|| ProcessingError::new("truncate requires 'max'"))?;
                Ok(Step::Truncate(max as usize))
            }
            "fail" => Ok(Step::Fail),
            other => Err(ProcessingError::new(format!("Unknown processor '{}'", other))),
        }
    }

    fn apply(&self, value: Value) -> Result<Value, ProcessingError> {
        let Value::String(text) = value else {
            return Ok(value);
        };
        match self {
            Step::Trim => Ok(Value::String(text.trim().to_string())),
            Step::Lowercase => Ok(Value::String(text.to_lowercase())),
            Step::Truncate(max) => Ok(Value::String(text.chars().take(*max).collect())),
            Step::Fail => Err(ProcessingError::new("Processor 'fail' rejected the value")),
        }
    }
}

impl Processor for Step {
    fn process(&self, value: Value) -> Result<Value, ProcessingError> {
        self.apply(value)
    }
}

struct Chain {
    steps: Vec<Step>,
    last_output: Arc<Mutex<Value>>,
}

impl Pipeline for Chain {
    fn process(&self, value: Value) -> Result<Value, ProcessingError> {
        let output = self.steps.iter().try_fold(value, |value, step| step.apply(value))?;
        *self.last_output.lock().unwrap() = output.clone();
        Ok(output)
    }
}

#[derive(Debug)]
struct EmailCheck {
    last_output: Arc<Mutex<Value>>,
}

impl Processor for EmailCheck {
    fn process(&self, value: Value) -> Result<Value, ProcessingError> {
        Ok(value)
    }

    fn as_validatable(&self) -> Option<&dyn ValidatableProcessor> {
        Some(self)
    }
}

impl ValidatableProcessor for EmailCheck {
    fn is_valid(&self) -> bool {
        self.last_output
            .lock()
            .unwrap()
            .as_str()
            .is_some_and(|s| s.contains('@') && !s.starts_with('@') && !s.ends_with('@'))
    }

    fn error_key(&self) -> String {
        "invalidEmail".to_string()
    }
}
