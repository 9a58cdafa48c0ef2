use serde_json::Value;
use std::fmt;

/// Structural kind of a node in the status document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Object,
    Array,
    Number,
    Boolean,
    String,
    /// Anything a gauge can never be built from (JSON `null`).
    Other,
}

impl ValueKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Object(_) => ValueKind::Object,
            Value::Array(_) => ValueKind::Array,
            Value::Number(_) => ValueKind::Number,
            Value::Bool(_) => ValueKind::Boolean,
            Value::String(_) => ValueKind::String,
            Value::Null => ValueKind::Other,
        }
    }

    pub fn is_container(self) -> bool {
        matches!(self, ValueKind::Object | ValueKind::Array)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ValueKind::Object => "object",
            ValueKind::Array => "array",
            ValueKind::Number => "number",
            ValueKind::Boolean => "boolean",
            ValueKind::String => "string",
            ValueKind::Other => "other",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classifies_every_json_kind() {
        assert_eq!(ValueKind::of(&json!({"a": 1})), ValueKind::Object);
        assert_eq!(ValueKind::of(&json!([1, 2])), ValueKind::Array);
        assert_eq!(ValueKind::of(&json!(42)), ValueKind::Number);
        assert_eq!(ValueKind::of(&json!(1.5)), ValueKind::Number);
        assert_eq!(ValueKind::of(&json!(true)), ValueKind::Boolean);
        assert_eq!(ValueKind::of(&json!("up")), ValueKind::String);
        assert_eq!(ValueKind::of(&Value::Null), ValueKind::Other);
    }

    #[test]
    fn test_containers() {
        assert!(ValueKind::Object.is_container());
        assert!(ValueKind::Array.is_container());
        assert!(!ValueKind::Number.is_container());
        assert!(!ValueKind::Other.is_container());
    }

    #[test]
    fn test_big_counter_is_still_a_number() {
        let value: Value = serde_json::from_str("18446744073709551616").expect("valid json");
        assert_eq!(ValueKind::of(&value), ValueKind::Number);
    }
}
