//! Attribute handler configuration.

use serde::{Deserialize, Serialize};

/// Configuration for an [`AttributeHandler`](super::AttributeHandler).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributeHandlerConfig {
    /// Processor type passed to the builder, e.g. `sanitizer` or `validator`.
    pub processor_type: String,

    /// Clear accumulated results after a successful `apply_changes`.
    pub clear_after_apply: bool,

    /// Reuse built processor instances across calls with identical configuration.
    pub cache_processors: bool,
}

impl Default for AttributeHandlerConfig {
    fn default() -> Self {
        Self {
            processor_type: "default".to_string(),
            clear_after_apply: false,
            cache_processors: true,
        }
    }
}

impl AttributeHandlerConfig {
    /// Configuration for a processor type with default settings.
    pub fn new(processor_type: impl Into<String>) -> Self {
        Self {
            processor_type: processor_type.into(),
            ..Self::default()
        }
    }

    pub fn with_clear_after_apply(mut self, clear: bool) -> Self {
        self.clear_after_apply = clear;
        self
    }

    pub fn with_processor_cache(mut self, enabled: bool) -> Self {
        self.cache_processors = enabled;
        self
    }

    /// Parse a configuration from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AttributeHandlerConfig::new("sanitizer");

        assert_eq!(config.processor_type, "sanitizer");
        assert!(!config.clear_after_apply);
        assert!(config.cache_processors);
    }

    #[test]
    fn test_from_json_fills_missing_fields() {
        let config = AttributeHandlerConfig::from_json(r#"{"processor_type": "validator", "clear_after_apply": true}"#)
            .unwrap();

        assert_eq!(config.processor_type, "validator");
        assert!(config.clear_after_apply);
        assert!(config.cache_processors);
    }
}
