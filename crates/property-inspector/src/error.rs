//! Error types for the property inspector.
//!
//! Errors are layered: field access and type description fail with
//! [`ReflectionError`] or [`FieldError`], the analyzer wraps those into
//! [`AnalysisError`], and the inspector re-classifies everything it sees into
//! [`InspectionError`]. Processing failures never escape the handler; see
//! [`ProcessingError`].

use thiserror::Error;

/// Boxed error used to carry an arbitrary cause.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failure to introspect a type or one of its properties.
#[derive(Debug, Error)]
pub enum ReflectionError {
    /// The type cannot describe its properties.
    #[error("type '{type_name}' cannot be introspected: {reason}")]
    NotIntrospectable { type_name: String, reason: String },

    /// No property with the given name is declared on the type.
    #[error("property '{property}' does not exist on '{type_name}'")]
    UnknownProperty { type_name: String, property: String },

    /// The property is not public and was not made accessible.
    #[error("cannot access non-public property '{type_name}::{property}'")]
    Inaccessible { type_name: String, property: String },

    /// An attribute declaration could not produce a live instance.
    #[error("failed to instantiate attribute '{class}' on property '{property}': {reason}")]
    Instantiation {
        class: String,
        property: String,
        reason: String,
    },
}

/// Error reading or writing a single field.
#[derive(Debug, Error)]
pub enum FieldError {
    /// The field could not be resolved or accessed.
    #[error(transparent)]
    Reflection(#[from] ReflectionError),

    /// The value could not be converted to or from the field's type.
    #[error("value conversion failed for '{property}': {source}")]
    Conversion {
        property: String,
        #[source]
        source: serde_json::Error,
    },
}

impl FieldError {
    /// Create a conversion error for a property.
    pub fn conversion(property: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Conversion {
            property: property.into(),
            source,
        }
    }
}

/// Error raised by [`AttributeAnalyzer::analyze_object`](crate::AttributeAnalyzer::analyze_object).
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Type or metadata introspection failed.
    #[error("Failed to analyze object using reflection: {0}")]
    Reflection(#[source] ReflectionError),

    /// Any other fault during discovery or value extraction.
    #[error("An error occurred during object analysis: {0}")]
    General(#[source] BoxError),
}

impl AnalysisError {
    /// Numeric error code.
    pub fn code(&self) -> u16 {
        match self {
            AnalysisError::Reflection(_) => 2501,
            AnalysisError::General(_) => 2503,
        }
    }

    /// Symbolic error code.
    pub fn error_code(&self) -> &'static str {
        match self {
            AnalysisError::Reflection(_) => "REFLECTION_ANALYSIS_ERROR",
            AnalysisError::General(_) => "GENERAL_ANALYSIS_ERROR",
        }
    }
}

impl From<ReflectionError> for AnalysisError {
    fn from(err: ReflectionError) -> Self {
        AnalysisError::Reflection(err)
    }
}

impl From<FieldError> for AnalysisError {
    fn from(err: FieldError) -> Self {
        match err {
            FieldError::Reflection(e) => AnalysisError::Reflection(e),
            other => AnalysisError::General(Box::new(other)),
        }
    }
}

/// Error returned by a [`PropertyAttributeHandler`](crate::PropertyAttributeHandler).
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The handler could not resolve something it needed from the object.
    #[error(transparent)]
    Reflection(#[from] ReflectionError),

    /// A recoverable failure while handling one attribute.
    #[error("failed to handle attribute on '{property}': {message}")]
    Failed { property: String, message: String },

    /// An unrecoverable fault; inspection must stop.
    #[error("fatal fault while handling attribute on '{property}': {message}")]
    Fatal { property: String, message: String },
}

/// Error raised by [`PropertyInspector::inspect`](crate::PropertyInspector::inspect).
#[derive(Debug, Error)]
pub enum InspectionError {
    /// Type or metadata resolution failed.
    #[error("Failed to inspect object using reflection: {0}")]
    Reflection(#[source] ReflectionError),

    /// A recognized but unexpected runtime failure.
    #[error("An exception occurred during object inspection: {0}")]
    General(#[source] BoxError),

    /// A fatal fault.
    #[error("A critical error occurred during object inspection: {0}")]
    Critical(#[source] BoxError),
}

impl InspectionError {
    /// Numeric error code.
    pub fn code(&self) -> u16 {
        match self {
            InspectionError::Reflection(_) => 2502,
            InspectionError::General(_) => 2504,
            InspectionError::Critical(_) => 2505,
        }
    }

    /// Symbolic error code.
    pub fn error_code(&self) -> &'static str {
        match self {
            InspectionError::Reflection(_) => "REFLECTION_INSPECTION_ERROR",
            InspectionError::General(_) => "GENERAL_INSPECTION_ERROR",
            InspectionError::Critical(_) => "CRITICAL_INSPECTION_ERROR",
        }
    }
}

impl From<AnalysisError> for InspectionError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::Reflection(e) => InspectionError::Reflection(e),
            AnalysisError::General(e) => InspectionError::General(e),
        }
    }
}

impl From<HandlerError> for InspectionError {
    fn from(err: HandlerError) -> Self {
        match err {
            HandlerError::Reflection(e) => InspectionError::Reflection(e),
            failed @ HandlerError::Failed { .. } => InspectionError::General(Box::new(failed)),
            fatal @ HandlerError::Fatal { .. } => InspectionError::Critical(Box::new(fatal)),
        }
    }
}

/// Failure reported by an external processor or pipeline.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ProcessingError {
    message: String,
    #[source]
    source: Option<BoxError>,
}

impl ProcessingError {
    /// Create a processing error with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Create a processing error caused by another error.
    pub fn with_source(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// The failure message.
    pub fn message(&self) -> &str {
        &self.message
    }
}
