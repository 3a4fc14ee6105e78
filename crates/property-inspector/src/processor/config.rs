//! Normalization of processor declarations into a uniform configuration map.

use indexmap::IndexMap;
use serde_json::Value;

use crate::reflect::ProcessableAttribute;

use super::spec::{ProcessorConfig, ProcessorEntry, ProcessorSpec};

/// Processor name to options, in declaration order.
pub type ProcessorConfigMap = IndexMap<String, ProcessorConfig>;

/// Builds the configuration map for a processable attribute.
pub trait ProcessorConfigBuilder {
    fn build(&self, attribute: &dyn ProcessableAttribute) -> ProcessorConfigMap;
}

/// The standard builder: normalizes the attribute's [`ProcessorSpec`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultProcessorConfigBuilder;

impl ProcessorConfigBuilder for DefaultProcessorConfigBuilder {
    fn build(&self, attribute: &dyn ProcessableAttribute) -> ProcessorConfigMap {
        normalize(&attribute.processors())
    }
}

/// Normalize a declaration.
///
/// Simple entries get empty options. Keyed entries use their key when it is
/// non-empty; otherwise the name is the first key of the object and the options
/// are the object stored under it. An empty object yields the name `""`, which
/// is kept for downstream validation to reject. A repeated name overwrites the
/// earlier options in place.
pub fn normalize(spec: &ProcessorSpec) -> ProcessorConfigMap {
    let mut config = ProcessorConfigMap::with_capacity(spec.len());

    for entry in spec.entries() {
        let (name, options) = match entry {
            ProcessorEntry::Simple(name) => (name.clone(), ProcessorConfig::new()),
            ProcessorEntry::Named { name, options } if !name.is_empty() => {
                (name.clone(), options.clone())
            }
            ProcessorEntry::Named { options, .. } | ProcessorEntry::Positional(options) => {
                unwrap_positional(options)
            }
        };
        config.insert(name, options);
    }

    config
}

/// Resolve the processor name of an unkeyed entry.
pub fn normalize_name(key: Option<&str>, processor: &ProcessorConfig) -> String {
    match key {
        Some(key) if !key.is_empty() => key.to_string(),
        _ => processor.keys().next().cloned().unwrap_or_default(),
    }
}

fn unwrap_positional(processor: &ProcessorConfig) -> (String, ProcessorConfig) {
    let name = normalize_name(None, processor);
    let options = match processor.get(&name) {
        Some(Value::Object(options)) => options.clone(),
        _ => ProcessorConfig::new(),
    };
    (name, options)
}
