// Flattening core
pub mod emission;
pub mod filters;
pub mod flattener;
pub mod metric_path;
pub mod value_kind;

// Port interfaces
pub mod ports;

// Domain-specific error types
pub mod errors;

pub use emission::{Emission, FlattenIssue, FlattenReport};
pub use filters::FilterSets;
pub use flattener::Flattener;
pub use metric_path::MetricPath;
pub use value_kind::ValueKind;
