//! Raw processor declarations as attributes write them.

use serde_json::{Map, Value};

/// Options object of a single processor.
pub type ProcessorConfig = Map<String, Value>;

/// One entry of a raw processor declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessorEntry {
    /// A bare processor name without options.
    Simple(String),
    /// A processor name mapped to its options.
    Named { name: String, options: ProcessorConfig },
    /// An unkeyed object whose single key is the processor name.
    Positional(ProcessorConfig),
}

/// An ordered raw processor declaration.
///
/// ```
/// use property_inspector::ProcessorSpec;
/// use serde_json::json;
///
/// let spec = ProcessorSpec::new()
///     .simple("required")
///     .named("email", json!({ "pattern": "x" }))
///     .positional(json!({ "named": { "opt": 1 } }));
///
/// assert_eq!(spec.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessorSpec {
    entries: Vec<ProcessorEntry>,
}

impl ProcessorSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a bare processor name.
    pub fn simple(mut self, name: impl Into<String>) -> Self {
        self.entries.push(ProcessorEntry::Simple(name.into()));
        self
    }

    /// Add a named processor. Non-object options are treated as empty.
    pub fn named(mut self, name: impl Into<String>, options: Value) -> Self {
        self.entries.push(ProcessorEntry::Named {
            name: name.into(),
            options: into_object(options),
        });
        self
    }

    /// Add a positional processor. Non-object values are treated as empty.
    pub fn positional(mut self, processor: Value) -> Self {
        self.entries.push(ProcessorEntry::Positional(into_object(processor)));
        self
    }

    /// Add an already-built entry.
    pub fn entry(mut self, entry: ProcessorEntry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Parse a declaration written as JSON.
    ///
    /// Arrays hold simple (string) and positional (object) entries. Objects map
    /// names to options; a string value there names a simple processor by the
    /// value, not the key. Any other value is skipped.
    pub fn from_value(value: &Value) -> Self {
        let mut spec = Self::new();
        match value {
            Value::Array(items) => {
                for item in items {
                    match item {
                        Value::String(name) => spec = spec.simple(name.clone()),
                        Value::Object(obj) => spec = spec.entry(ProcessorEntry::Positional(obj.clone())),
                        _ => {}
                    }
                }
            }
            Value::Object(obj) => {
                for (key, item) in obj {
                    match item {
                        Value::String(name) => spec = spec.simple(name.clone()),
                        Value::Object(options) => {
                            spec = spec.entry(ProcessorEntry::Named {
                                name: key.clone(),
                                options: options.clone(),
                            })
                        }
                        _ => {}
                    }
                }
            }
            Value::String(name) => spec = spec.simple(name.clone()),
            _ => {}
        }
        spec
    }

    pub fn entries(&self) -> &[ProcessorEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<ProcessorEntry> for ProcessorSpec {
    fn from_iter<I: IntoIterator<Item = ProcessorEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

fn into_object(value: Value) -> ProcessorConfig {
    match value {
        Value::Object(obj) => obj,
        _ => ProcessorConfig::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_array() {
        let spec = ProcessorSpec::from_value(&json!(["trim", { "length": { "max": 5 } }, 3, null]));

        assert_eq!(spec.len(), 2);
        assert_eq!(spec.entries()[0], ProcessorEntry::Simple("trim".to_string()));
        assert!(matches!(&spec.entries()[1], ProcessorEntry::Positional(obj) if obj.contains_key("length")));
    }

    #[test]
    fn test_from_object() {
        let spec = ProcessorSpec::from_value(&json!({
            "email": { "pattern": "x" },
            "ignored": "trim",
            "skipped": 5
        }));

        assert_eq!(spec.len(), 2);
        assert!(spec.entries().contains(&ProcessorEntry::Simple("trim".to_string())));
        assert!(spec.entries().iter().any(|e| matches!(
            e,
            ProcessorEntry::Named { name, .. } if name == "email"
        )));
    }

    #[test]
    fn test_non_object_options_become_empty() {
        let spec = ProcessorSpec::new().named("length", json!(5));

        assert_eq!(
            spec.entries()[0],
            ProcessorEntry::Named {
                name: "length".to_string(),
                options: ProcessorConfig::new(),
            }
        );
    }
}
