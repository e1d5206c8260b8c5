//! Content classifier: decide a response's shape once and route it.
//!
//! CHANGELOG:
//! - 10/17/2026 - Stages pass the classified payload so locks survive downstream
//! - 10/17/2026 - Added ResponseTransformer stage
//! - 10/17/2026 - Initial implementation

use serde_json::Value;
use std::sync::Arc;

use crate::config::InjectConfig;
use crate::constants::TypeConstants;
use crate::rewriter::{self, MessageBatch};
use crate::template;

/// A response payload, classified by runtime shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Falsy value (`null`, `false`, `0`, `""`).
    Empty(Value),
    /// JSON object, possibly carrying a message list.
    Structured(MessageBatch),
    /// Template markup.
    Template(String),
    /// Anything else (arrays, `true`, non-zero numbers).
    Unknown(Value),
}

impl Payload {
    pub fn classify(value: Value) -> Self {
        if is_falsy(&value) {
            return Self::Empty(value);
        }
        match value {
            Value::Object(map) => Self::Structured(MessageBatch::from_map(map)),
            Value::String(text) => Self::Template(text),
            other => Self::Unknown(other),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Empty(_) => "empty",
            Self::Structured(_) => "structured",
            Self::Template(_) => "template",
            Self::Unknown(_) => "unknown",
        }
    }

    /// The message batch, for downstream writers. Locked keys stay locked.
    pub fn as_batch_mut(&mut self) -> Option<&mut MessageBatch> {
        match self {
            Self::Structured(batch) => Some(batch),
            _ => None,
        }
    }

    /// Flatten for the final render. Locks are no longer enforced after this.
    pub fn into_value(self) -> Value {
        match self {
            Self::Empty(value) | Self::Unknown(value) => value,
            Self::Structured(batch) => batch.into_value(),
            Self::Template(text) => Value::String(text),
        }
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Transform a classified payload. Never fails; unknown shapes pass through.
pub fn transform_payload(
    payload: Payload,
    constants: &TypeConstants,
    config: &InjectConfig,
) -> Payload {
    tracing::trace!(kind = payload.kind(), "transform response");
    match payload {
        Payload::Structured(mut batch) => {
            rewriter::check_emoji_content(&mut batch, constants, config);
            Payload::Structured(batch)
        }
        Payload::Template(text) => Payload::Template(template::check_template_content(text)),
        other => other,
    }
}

/// Classify a raw response at the boundary and transform it.
pub fn transform_response(
    value: Value,
    constants: &TypeConstants,
    config: &InjectConfig,
) -> Payload {
    transform_payload(Payload::classify(value), constants, config)
}

/// A post-processing step in the foreign app's response pipeline.
///
/// Stages hand the classified payload along, so fields locked by one stage
/// stay locked for every stage and consumer after it.
pub trait ResponseStage {
    fn process(&self, payload: Payload) -> Payload;
}

/// The response stage installed by the bootstrap hook.
#[derive(Debug, Clone)]
pub struct ResponseTransformer {
    constants: TypeConstants,
    config: Arc<InjectConfig>,
}

impl ResponseTransformer {
    pub fn new(constants: TypeConstants, config: Arc<InjectConfig>) -> Self {
        Self { constants, config }
    }
}

impl ResponseStage for ResponseTransformer {
    fn process(&self, payload: Payload) -> Payload {
        transform_payload(payload, &self.constants, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lock::WriteOutcome;
    use serde_json::json;

    fn run(value: Value) -> Value {
        transform_response(value, &TypeConstants::default(), &InjectConfig::default()).into_value()
    }

    #[test]
    fn test_classify_shapes() {
        assert_eq!(Payload::classify(json!(null)).kind(), "empty");
        assert_eq!(Payload::classify(json!("")).kind(), "empty");
        assert_eq!(Payload::classify(json!(0)).kind(), "empty");
        assert_eq!(Payload::classify(json!(false)).kind(), "empty");
        assert_eq!(Payload::classify(json!({})).kind(), "structured");
        assert_eq!(Payload::classify(json!("<div></div>")).kind(), "template");
        assert_eq!(Payload::classify(json!([1, 2])).kind(), "unknown");
        assert_eq!(Payload::classify(json!(7)).kind(), "unknown");
        assert_eq!(Payload::classify(json!(true)).kind(), "unknown");
    }

    #[test]
    fn test_falsy_and_unknown_pass_through() {
        for value in [json!(null), json!(""), json!(0), json!(false), json!([{"MsgType": 10002}]), json!(3.5)] {
            assert_eq!(run(value.clone()), value);
        }
    }

    #[test]
    fn test_structured_routes_to_rewriter() {
        let out = run(json!({"AddMsgList": [{"MsgType": 10002, "MMDigest": "x"}]}));
        assert_eq!(out["AddMsgList"][0]["MsgType"], json!(10000));
        assert_eq!(out["AddMsgList"][0]["MMDigest"], json!("Message recall prevented"));
    }

    #[test]
    fn test_object_without_messages_unchanged() {
        let value = json!({"BaseResponse": {"Ret": 0}, "SyncKey": {"Count": 0}});
        assert_eq!(run(value.clone()), value);
    }

    #[test]
    fn test_template_routes_to_patcher() {
        let out = run(json!("<pre ng-keydown=\"editAreaKeydown($event)\"></pre>"));
        assert_eq!(out, json!("<pre ng-keydown=\"editAreaKeydown()\"></pre>"));
    }

    #[test]
    fn test_transformer_stage() {
        let stage = ResponseTransformer::new(
            TypeConstants::default(),
            Arc::new(InjectConfig {
                emoji_max_size: 100,
                ..InjectConfig::default()
            }),
        );
        let out = stage.process(Payload::classify(json!({"AddMsgList": [{"MsgType": 47, "ImgHeight": 500}]})));
        assert_eq!(
            out.into_value()["AddMsgList"][0]["MMImgStyle"],
            json!({"height": "100px", "width": "initial"})
        );
    }

    #[test]
    fn test_stage_output_keeps_locks() {
        let stage = ResponseTransformer::new(TypeConstants::default(), Arc::new(InjectConfig::default()));
        let mut out = stage.process(Payload::classify(
            json!({"AddMsgList": [{"MsgType": 10002, "MMDigest": "x"}]}),
        ));

        let record = out.as_batch_mut().and_then(|b| b.record_mut(0)).unwrap();
        assert_eq!(record.set("MsgType", 10002), WriteOutcome::Discarded);
        assert_eq!(record.set("MMDigest", "revoked"), WriteOutcome::Discarded);

        let value = out.into_value();
        assert_eq!(value["AddMsgList"][0]["MsgType"], 10000);
        assert_eq!(value["AddMsgList"][0]["MMDigest"], "Message recall prevented");
    }

    #[test]
    fn test_stage_reapplied_is_stable() {
        let stage = ResponseTransformer::new(TypeConstants::default(), Arc::new(InjectConfig::default()));
        let once = stage.process(Payload::classify(json!({"AddMsgList": [{"MsgType": 10002}]})));
        let twice = stage.process(once.clone());
        assert_eq!(once, twice);
    }
}
