use serde::Serialize;
use thiserror::Error;

/// One gauge sample produced by the flattener.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Emission {
    pub name: String,
    pub value: i64,
}

impl Emission {
    pub fn new(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Non-fatal anomaly found while walking a document.
///
/// None of these stop the walk: the offending node is skipped (or, for
/// `NumericConversion`, emitted as zero) and traversal moves on to its siblings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlattenIssue {
    #[error("Number at {path} is not a 64-bit integer ({raw}); emitted as 0")]
    NumericConversion { path: String, raw: String },

    #[error("Unexpected {kind} value at {path} (key {key})")]
    UnexpectedKind {
        path: String,
        key: String,
        kind: String,
    },

    #[error("Scalar {kind} element at {path} is not emitted")]
    ScalarArrayElement { path: String, kind: String },

    #[error("Empty key under {path}; subtree skipped")]
    EmptyKey { path: String },

    #[error("Document root is a {kind}, nothing to flatten")]
    ScalarRoot { kind: String },
}

impl FlattenIssue {
    pub const KINDS: [&'static str; 5] = [
        "numeric_conversion",
        "unexpected_kind",
        "scalar_array_element",
        "empty_key",
        "scalar_root",
    ];

    /// Short label used for metrics and log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            FlattenIssue::NumericConversion { .. } => "numeric_conversion",
            FlattenIssue::UnexpectedKind { .. } => "unexpected_kind",
            FlattenIssue::ScalarArrayElement { .. } => "scalar_array_element",
            FlattenIssue::EmptyKey { .. } => "empty_key",
            FlattenIssue::ScalarRoot { .. } => "scalar_root",
        }
    }
}

/// Everything one walk produced, in traversal order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlattenReport {
    pub emissions: Vec<Emission>,
    pub issues: Vec<FlattenIssue>,
}

impl FlattenReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn emission(&self, name: &str) -> Option<i64> {
        self.emissions
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.value)
    }
}
