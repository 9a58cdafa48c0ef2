use std::fmt;

/// Dot-delimited metric name under construction.
///
/// Segments never contain `.`: a key such as `10.0.0.1:80` becomes the single
/// segment `10-0-0-1:80`, so the depth of a name always matches the depth of the
/// document node it came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricPath {
    segments: Vec<String>,
}

impl MetricPath {
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns a new path with `segment` appended after sanitizing it.
    pub fn child(&self, segment: &str) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend(self.segments.iter().cloned());
        segments.push(segment.replace('.', "-"));
        Self { segments }
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Metric name as handed to the sink, without a trailing separator.
    pub fn metric_name(&self) -> String {
        self.segments.join(".")
    }
}

impl fmt::Display for MetricPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            write!(f, "<root>")
        } else {
            write!(f, "{}", self.metric_name())
        }
    }
}
