//! Per-property results accumulated by the attribute handler.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::processor::ValidationFailure;

/// Final value of a property and the custom messages used to produce it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedValue {
    pub value: Value,
    pub messages: IndexMap<String, String>,
}

/// Everything that went wrong for one property.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyErrors {
    /// Messages of processing failures, in the order they happened.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub processing: Vec<String>,

    /// Validation failures keyed by processor name.
    #[serde(skip_serializing_if = "IndexMap::is_empty", default)]
    pub validation: IndexMap<String, ValidationFailure>,
}

impl PropertyErrors {
    pub fn is_empty(&self) -> bool {
        self.processing.is_empty() && self.validation.is_empty()
    }

    /// All messages, processing failures first.
    pub fn messages(&self) -> Vec<&str> {
        self.processing
            .iter()
            .map(String::as_str)
            .chain(self.validation.values().map(|f| f.message.as_str()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_lists_processing_first() {
        let mut errors = PropertyErrors::default();
        assert!(errors.is_empty());

        errors.validation.insert(
            "email".to_string(),
            ValidationFailure {
                error_key: "invalidFormat".to_string(),
                message: "Bad email".to_string(),
            },
        );
        errors.processing.push("pipeline exploded".to_string());

        assert!(!errors.is_empty());
        assert_eq!(errors.messages(), vec!["pipeline exploded", "Bad email"]);
    }

    #[test]
    fn test_serializes_without_empty_sections() {
        let errors = PropertyErrors {
            processing: vec!["boom".to_string()],
            validation: IndexMap::new(),
        };

        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json, serde_json::json!({ "processing": ["boom"] }));
    }
}
