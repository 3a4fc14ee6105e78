//! Metadata analysis with per-type caching.

mod analyzer;
mod cache;

pub use analyzer::{Analysis, AnalysisEntry, AttributeAnalyzer, ObjectAnalyzer};
pub use cache::{CachedProperty, CachedType, TypeMetadataCache};
