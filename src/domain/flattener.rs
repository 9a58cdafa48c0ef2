//! Flattening of a nested status document into gauge emissions.
//!
//! The walk is depth-first and in document order. Containers are recursed
//! into, numbers and booleans reached through an object key become gauges,
//! and everything else is skipped. Anomalies never abort the walk; they are
//! returned as [`FlattenIssue`]s next to the emissions.

use crate::domain::emission::{Emission, FlattenIssue, FlattenReport};
use crate::domain::filters::FilterSets;
use crate::domain::metric_path::MetricPath;
use crate::domain::ports::EmissionSink;
use crate::domain::value_kind::ValueKind;
use serde_json::{Number, Value};
use tracing::{debug, info, warn};

/// How a node was reached from its parent.
#[derive(Debug, Clone, Copy)]
enum Slot<'a> {
    Root,
    Key(&'a str),
    Index(usize),
}

impl Slot<'_> {
    fn path_under(self, parent: &MetricPath) -> MetricPath {
        match self {
            Slot::Root => parent.clone(),
            Slot::Key(key) => parent.child(key),
            Slot::Index(index) => parent.child(&index.to_string()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Flattener {
    filters: FilterSets,
}

impl Flattener {
    pub fn new(filters: FilterSets) -> Self {
        Self { filters }
    }

    pub fn filters(&self) -> &FilterSets {
        &self.filters
    }

    /// Walks `document` and collects everything it produces.
    pub fn flatten(&self, document: &Value) -> FlattenReport {
        let mut emissions = Vec::new();
        let issues = self.flatten_into(document, &mut emissions);
        FlattenReport { emissions, issues }
    }

    /// Walks `document`, handing each emission to `sink` as soon as it is found.
    pub fn flatten_into<S>(&self, document: &Value, sink: &mut S) -> Vec<FlattenIssue>
    where
        S: EmissionSink + ?Sized,
    {
        let mut issues = Vec::new();
        self.visit(document, &MetricPath::root(), Slot::Root, sink, &mut issues);
        issues
    }

    fn visit<S>(
        &self,
        node: &Value,
        parent: &MetricPath,
        slot: Slot<'_>,
        sink: &mut S,
        issues: &mut Vec<FlattenIssue>,
    ) where
        S: EmissionSink + ?Sized,
    {
        let path = slot.path_under(parent);

        match (slot, node) {
            (_, Value::Object(fields)) => {
                for (key, child) in fields {
                    // Pruned wherever the key shows up, not only at the root.
                    if self.filters.prunes_subtree(key) {
                        debug!("Flattener: pruned subtree {}.{}", path, key);
                        continue;
                    }
                    if key.is_empty() {
                        warn!("Flattener: empty key under {}, skipping", path);
                        issues.push(FlattenIssue::EmptyKey {
                            path: path.metric_name(),
                        });
                        continue;
                    }
                    self.visit(child, &path, Slot::Key(key), sink, issues);
                }
            }
            (_, Value::Array(items)) => {
                for (index, item) in items.iter().enumerate() {
                    self.visit(item, &path, Slot::Index(index), sink, issues);
                }
            }
            (Slot::Key(key), Value::Number(number)) => {
                if self.filters.ignores_leaf(key) {
                    debug!("Flattener: ignored leaf {}", path);
                    return;
                }
                let value = gauge_value(number, &path, issues);
                sink.emit(Emission::new(path.metric_name(), value));
            }
            (Slot::Key(_), Value::Bool(flag)) => {
                // Booleans are reported under the parent's name.
                sink.emit(Emission::new(parent.metric_name(), i64::from(*flag)));
            }
            // Statsd gauges are numeric only.
            (Slot::Key(_), Value::String(_)) => {}
            (Slot::Key(key), Value::Null) => {
                let kind = ValueKind::of(node);
                warn!("Flattener: unexpected {} value at {} (key {})", kind, path, key);
                issues.push(FlattenIssue::UnexpectedKind {
                    path: path.metric_name(),
                    key: key.to_string(),
                    kind: kind.to_string(),
                });
            }
            (Slot::Index(_), scalar) => {
                let kind = ValueKind::of(scalar);
                info!("Flattener: {} element at {} is not emitted", kind, path);
                issues.push(FlattenIssue::ScalarArrayElement {
                    path: path.metric_name(),
                    kind: kind.to_string(),
                });
            }
            (Slot::Root, scalar) => {
                let kind = ValueKind::of(scalar);
                warn!("Flattener: document root is a {}, nothing to flatten", kind);
                issues.push(FlattenIssue::ScalarRoot {
                    kind: kind.to_string(),
                });
            }
        }
    }
}

/// Integer value of a numeric leaf, or 0 when it does not fit in an `i64`.
fn gauge_value(number: &Number, path: &MetricPath, issues: &mut Vec<FlattenIssue>) -> i64 {
    match number.as_i64() {
        Some(value) => value,
        None => {
            warn!(
                "Flattener: cannot convert {} at {} to an integer, sending 0",
                number, path
            );
            issues.push(FlattenIssue::NumericConversion {
                path: path.metric_name(),
                raw: number.to_string(),
            });
            0
        }
    }
}
