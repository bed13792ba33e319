//! Error conditions raised while rendering.
//!
//! Rendering itself never fails: a value that cannot be rendered produces
//! no node. [`UnrenderableValue`] describes that condition so it can be
//! logged, or surfaced by callers that want to treat it as an error.

use std::fmt;

use crate::value::ViewValue;

/// A value whose shape has no rendering rule (null, boolean).
#[derive(Debug, Clone, PartialEq)]
pub struct UnrenderableValue {
    key: String,
    kind: &'static str,
    value: String,
}

impl UnrenderableValue {
    pub fn new(key: &str, value: &ViewValue) -> Self {
        let shown = match value {
            ViewValue::Unrenderable(raw) => raw.to_string(),
            ViewValue::Null => "null".to_string(),
            other => format!("{:?}", other),
        };
        Self {
            key: key.to_string(),
            kind: value.kind(),
            value: shown,
        }
    }

    /// Schema key the value was rendered under.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }
}

impl fmt::Display for UnrenderableValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cannot render {} value {} for key \"{}\"",
            self.kind, self.value, self.key
        )
    }
}

impl std::error::Error for UnrenderableValue {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display_names_key_and_value() {
        let err = UnrenderableValue::new("active", &ViewValue::from_json(&json!(true)));
        assert_eq!(err.key(), "active");
        assert_eq!(err.kind(), "unrenderable");
        assert_eq!(
            err.to_string(),
            "cannot render unrenderable value true for key \"active\""
        );
    }

    #[test]
    fn test_null_display() {
        let err = UnrenderableValue::new("x", &ViewValue::Null);
        assert_eq!(err.to_string(), "cannot render null value null for key \"x\"");
    }
}
