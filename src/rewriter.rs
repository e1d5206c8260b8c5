//! Message rewriter: anti-recall and emoticon sizing for sync batches.
//!
//! Walks `AddMsgList` in order and locks display fields on the records we
//! care about. Records are never added, removed or reordered.
//!
//! CHANGELOG:
//! - 10/17/2026 - Mutable record access for downstream writers; JS-style size parsing
//! - 10/17/2026 - Added RewriteSummary for logging
//! - 10/17/2026 - Initial implementation

use serde_json::{json, Map, Value};

use crate::config::InjectConfig;
use crate::constants::{MessageKind, TypeConstants};
use crate::lock::LockedRecord;

/// Key of the message list inside a sync response.
pub const MESSAGE_LIST_KEY: &str = "AddMsgList";

pub const FIELD_MSG_TYPE: &str = "MsgType";
pub const FIELD_DIGEST: &str = "MMDigest";
pub const FIELD_ACTUAL_CONTENT: &str = "MMActualContent";
pub const FIELD_IMG_HEIGHT: &str = "ImgHeight";
pub const FIELD_IMG_WIDTH: &str = "ImgWidth";
pub const FIELD_IMG_STYLE: &str = "MMImgStyle";

/// One slot of the message list.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageEntry {
    Record(LockedRecord),
    /// Non-object entry; carried through as-is.
    Opaque(Value),
}

impl MessageEntry {
    fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self::Record(LockedRecord::new(map)),
            other => Self::Opaque(other),
        }
    }

    pub fn as_record(&self) -> Option<&LockedRecord> {
        match self {
            Self::Record(record) => Some(record),
            Self::Opaque(_) => None,
        }
    }

    pub fn as_record_mut(&mut self) -> Option<&mut LockedRecord> {
        match self {
            Self::Record(record) => Some(record),
            Self::Opaque(_) => None,
        }
    }

    fn into_value(self) -> Value {
        match self {
            Self::Record(record) => record.into_value(),
            Self::Opaque(value) => value,
        }
    }
}

/// A structured response object.
///
/// `messages` is `Some` only when `AddMsgList` is an array; otherwise the
/// field (if any) stays in `body` untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageBatch {
    body: Map<String, Value>,
    messages: Option<Vec<MessageEntry>>,
}

impl MessageBatch {
    pub fn from_map(mut body: Map<String, Value>) -> Self {
        let messages = match body.remove(MESSAGE_LIST_KEY) {
            Some(Value::Array(items)) => {
                Some(items.into_iter().map(MessageEntry::from_value).collect())
            }
            Some(other) => {
                body.insert(MESSAGE_LIST_KEY.to_string(), other);
                None
            }
            None => None,
        };
        Self { body, messages }
    }

    pub fn messages(&self) -> Option<&[MessageEntry]> {
        self.messages.as_deref()
    }

    /// Entries for downstream writers. Writes to locked keys go through
    /// [`LockedRecord::set`] and are discarded.
    pub fn messages_mut(&mut self) -> Option<&mut [MessageEntry]> {
        self.messages.as_deref_mut()
    }

    /// Record at `index`, if the list exists and that slot is an object.
    pub fn record_mut(&mut self, index: usize) -> Option<&mut LockedRecord> {
        self.messages
            .as_mut()?
            .get_mut(index)
            .and_then(MessageEntry::as_record_mut)
    }

    /// Flatten to a plain value. Locks are baked in but no longer enforced,
    /// so only call this for the final render.
    pub fn into_value(self) -> Value {
        let mut body = self.body;
        if let Some(messages) = self.messages {
            body.insert(
                MESSAGE_LIST_KEY.to_string(),
                Value::Array(messages.into_iter().map(MessageEntry::into_value).collect()),
            );
        }
        Value::Object(body)
    }
}

/// What a rewrite pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteSummary {
    pub emoticons: usize,
    pub recalls_prevented: usize,
    pub style_hints: usize,
}

impl RewriteSummary {
    pub fn is_empty(&self) -> bool {
        self.emoticons == 0 && self.recalls_prevented == 0
    }
}

/// Rewrite emoticon and recalled records of a batch in place.
///
/// Batches without a message array are left alone.
pub fn check_emoji_content(
    batch: &mut MessageBatch,
    constants: &TypeConstants,
    config: &InjectConfig,
) -> RewriteSummary {
    let mut summary = RewriteSummary::default();
    let Some(messages) = batch.messages.as_mut() else {
        return summary;
    };

    for entry in messages.iter_mut() {
        let MessageEntry::Record(record) = entry else {
            continue;
        };

        match constants.kind_of(record.get(FIELD_MSG_TYPE)) {
            MessageKind::Emoticon => {
                summary.emoticons += 1;
                if lock_emoticon(record, constants, config) {
                    summary.style_hints += 1;
                }
            }
            MessageKind::Recalled => {
                summary.recalls_prevented += 1;
                lock_recalled(record, constants, config);
            }
            MessageKind::Other => {}
        }
    }

    if !summary.is_empty() {
        tracing::debug!(
            emoticons = summary.emoticons,
            recalls_prevented = summary.recalls_prevented,
            style_hints = summary.style_hints,
            "rewrote message batch"
        );
    }
    summary
}

/// Returns true when a size hint was locked.
fn lock_emoticon(
    record: &mut LockedRecord,
    constants: &TypeConstants,
    config: &InjectConfig,
) -> bool {
    record
        .lock(FIELD_DIGEST, config.emoticon_digest.as_str())
        .lock(FIELD_MSG_TYPE, constants.emoticon.clone());

    let max = f64::from(config.emoji_max_size);
    let px = config.max_size_px();

    // Height wins when both exceed the cap.
    if exceeds(record.get(FIELD_IMG_HEIGHT), max) {
        record.lock(FIELD_IMG_STYLE, json!({"height": px, "width": "initial"}));
        true
    } else if exceeds(record.get(FIELD_IMG_WIDTH), max) {
        record.lock(FIELD_IMG_STYLE, json!({"width": px, "height": "initial"}));
        true
    } else {
        false
    }
}

fn lock_recalled(record: &mut LockedRecord, constants: &TypeConstants, config: &InjectConfig) {
    let text = config.prevent_recall_message.as_str();
    record.lock(FIELD_MSG_TYPE, constants.sys.clone()).lock_all([
        (FIELD_ACTUAL_CONTENT, text),
        (FIELD_DIGEST, text),
    ]);
}

fn exceeds(dimension: Option<&Value>, max: f64) -> bool {
    dimension.and_then(numeric).is_some_and(|n| n >= max)
}

/// Numbers as-is; strings follow JS `Number()`. Blank strings, `null` and
/// booleans are not sizes.
fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_js_number(s.trim()),
        _ => None,
    }
}

fn parse_js_number(s: &str) -> Option<f64> {
    if s.is_empty() {
        return None;
    }

    let radix = match s.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        // No sign, no fraction after a radix prefix.
        let digits = &s[2..];
        if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
            return None;
        }
        return Some(digits.chars().filter_map(|c| c.to_digit(radix)).fold(0.0, |acc, d| {
            acc * f64::from(radix) + f64::from(d)
        }));
    }

    match s {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }
    // Rust also accepts "inf", "infinity" and "nan" in any case; JS does not.
    if s.bytes().any(|b| b.is_ascii_alphabetic() && !matches!(b, b'e' | b'E')) {
        return None;
    }
    s.parse::<f64>().ok()
}
