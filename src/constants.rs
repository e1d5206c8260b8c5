//! Message type constants supplied by the foreign app.
//!
//! The table is owned by the foreign app's DI container (`confFactory`);
//! we only read the three codes we switch on.
//!
//! CHANGELOG:
//! - 10/17/2026 - Initial implementation

use crate::error::{InjectError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Read-only lookup from semantic message kinds to the foreign app's codes.
///
/// Codes are kept as raw JSON values and compared strictly, so `47` and
/// `"47"` are different codes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeConstants {
    #[serde(rename = "MSGTYPE_EMOTICON")]
    pub emoticon: Value,
    #[serde(rename = "MSGTYPE_RECALLED")]
    pub recalled: Value,
    #[serde(rename = "MSGTYPE_SYS")]
    pub sys: Value,
}

impl Default for TypeConstants {
    /// Codes used by the stock web client.
    fn default() -> Self {
        Self {
            emoticon: Value::from(47),
            recalled: Value::from(10002),
            sys: Value::from(10000),
        }
    }
}

/// Kind of a message record as far as the rewriter cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Emoticon,
    Recalled,
    Other,
}

impl TypeConstants {
    /// Parse from a JSON dump of the constants table. Extra keys are ignored.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(InjectError::InvalidConstants)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(InjectError::InvalidConstants)
    }

    /// Classify a record's type code.
    pub fn kind_of(&self, code: Option<&Value>) -> MessageKind {
        match code {
            Some(code) if *code == self.emoticon => MessageKind::Emoticon,
            Some(code) if *code == self.recalled => MessageKind::Recalled,
            _ => MessageKind::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_ignores_extra_keys() {
        let constants = TypeConstants::from_json(
            r#"{"MSGTYPE_EMOTICON": 47, "MSGTYPE_RECALLED": 10002, "MSGTYPE_SYS": 10000, "MSGTYPE_TEXT": 1}"#,
        )
        .unwrap();
        assert_eq!(constants, TypeConstants::default());
    }

    #[test]
    fn test_missing_key_is_error() {
        let err = TypeConstants::from_value(json!({"MSGTYPE_EMOTICON": 47})).unwrap_err();
        assert!(matches!(err, InjectError::InvalidConstants(_)));
    }

    #[test]
    fn test_kind_of_is_strict() {
        let constants = TypeConstants::default();
        assert_eq!(constants.kind_of(Some(&json!(47))), MessageKind::Emoticon);
        assert_eq!(constants.kind_of(Some(&json!(10002))), MessageKind::Recalled);
        assert_eq!(constants.kind_of(Some(&json!("47"))), MessageKind::Other);
        assert_eq!(constants.kind_of(Some(&json!(1))), MessageKind::Other);
        assert_eq!(constants.kind_of(None), MessageKind::Other);
    }

    #[test]
    fn test_symbolic_codes() {
        let constants = TypeConstants::from_value(json!({
            "MSGTYPE_EMOTICON": "emoticon",
            "MSGTYPE_RECALLED": "recalled",
            "MSGTYPE_SYS": "sys",
        }))
        .unwrap();
        assert_eq!(constants.kind_of(Some(&json!("recalled"))), MessageKind::Recalled);
    }
}
