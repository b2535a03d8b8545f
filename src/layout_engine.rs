pub mod cascade;
pub mod classifier;
pub mod coverage;
mod engine;
mod error;
pub mod focus;
pub mod overrides;
pub mod relevance;

pub use cascade::{CascadeGenerator, GeneratedLayout, Quadrant};
pub use classifier::{Classifier, classify, normalize_name};
pub use coverage::{CoverageNormalizer, normalize};
pub use engine::{LayoutEngine, LayoutRequest};
pub use error::LayoutError;
pub use focus::{focus_score, priority_order, resolve_primary};
pub use overrides::{OverrideError, apply_overrides, validate_override};
pub use relevance::{filter, filter_for_context, relevance_score, relevance_threshold};
