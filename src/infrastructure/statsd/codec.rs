//! Statsd line protocol for gauges.

/// Joins the configured prefix and a metric name.
///
/// Returns `None` when both are empty: statsd has no way to address such a gauge.
pub fn full_name(prefix: &str, name: &str) -> Option<String> {
    let prefix = prefix.trim_end_matches('.');
    match (prefix.is_empty(), name.is_empty()) {
        (true, true) => None,
        (true, false) => Some(name.to_string()),
        (false, true) => Some(prefix.to_string()),
        (false, false) => Some(format!("{}.{}", prefix, name)),
    }
}

/// Encodes one gauge sample as a statsd datagram payload.
///
/// A signed gauge value is a delta in statsd, so a negative reading is sent as
/// a reset to zero followed by the (relative) negative value.
pub fn encode_gauge(name: &str, value: i64) -> String {
    if value < 0 {
        format!("{name}:0|g\n{name}:{value}|g")
    } else {
        format!("{name}:{value}|g")
    }
}
