//! Outbound host events and the channels that carry them.
//!
//! Each event is one NDJSON line: `{"channel": "...", "args": [...]}`.
//!
//! CHANGELOG:
//! - 10/17/2026 - RefCell-backed channels (single-threaded host)
//! - 10/17/2026 - Initial implementation

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cell::RefCell;
use std::io::Write;

use crate::error::{InjectError, Result};

/// Wire channel for the startup notification.
pub const CHANNEL_STARTUP_OBSERVED: &str = "wx-rendered";
/// Wire channel for the login notification.
pub const CHANNEL_USER_LOGGED: &str = "user-logged";

/// Notifications sent to the host process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// Target module started; carries the foreign app's login flag.
    StartupObserved { logged_in: bool },
    /// Foreign app showed a new login page.
    UserLogged,
}

/// Wire form of a [`HostEvent`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostMessage {
    pub channel: String,
    pub args: Vec<Value>,
}

impl HostEvent {
    pub fn channel(&self) -> &'static str {
        match self {
            Self::StartupObserved { .. } => CHANNEL_STARTUP_OBSERVED,
            Self::UserLogged => CHANNEL_USER_LOGGED,
        }
    }

    pub fn to_message(&self) -> HostMessage {
        let args = match self {
            Self::StartupObserved { logged_in } => vec![Value::Bool(*logged_in)],
            Self::UserLogged => vec![Value::String(String::new())],
        };
        HostMessage {
            channel: self.channel().to_string(),
            args,
        }
    }

    /// Serialize to an NDJSON line (with trailing newline).
    pub fn to_ndjson_line(&self) -> Result<String> {
        let json = serde_json::to_string(&self.to_message()).map_err(InjectError::Encode)?;
        Ok(format!("{}\n", json))
    }
}

/// Fire-and-forget sink for host events.
pub trait HostChannel {
    fn send(&self, event: &HostEvent) -> Result<()>;
}

/// Writes each event as an NDJSON line.
pub struct NdjsonChannel<W: Write> {
    writer: RefCell<W>,
}

impl<W: Write> NdjsonChannel<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: RefCell::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl<W: Write> HostChannel for NdjsonChannel<W> {
    fn send(&self, event: &HostEvent) -> Result<()> {
        let line = event.to_ndjson_line()?;
        let mut writer = self.writer.borrow_mut();
        writer.write_all(line.as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}

/// Keeps events in memory.
#[derive(Debug, Default)]
pub struct RecordingChannel {
    events: RefCell<Vec<HostEvent>>,
}

impl RecordingChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<HostEvent> {
        self.events.borrow().clone()
    }
}

impl HostChannel for RecordingChannel {
    fn send(&self, event: &HostEvent) -> Result<()> {
        self.events.borrow_mut().push(event.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_format() {
        let line = HostEvent::StartupObserved { logged_in: true }
            .to_ndjson_line()
            .unwrap();
        assert!(line.ends_with('\n'));
        let value: Value = serde_json::from_str(line.trim()).unwrap();
        assert_eq!(value, json!({"channel": "wx-rendered", "args": [true]}));

        let message = HostEvent::UserLogged.to_message();
        assert_eq!(message.channel, "user-logged");
        assert_eq!(message.args, vec![json!("")]);
    }

    #[test]
    fn test_ndjson_channel_writes_lines() {
        let channel = NdjsonChannel::new(Vec::new());
        channel.send(&HostEvent::StartupObserved { logged_in: false }).unwrap();
        channel.send(&HostEvent::UserLogged).unwrap();

        let out = String::from_utf8(channel.into_inner()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        let second: HostMessage = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second.channel, CHANNEL_USER_LOGGED);
    }

    #[test]
    fn test_recording_channel() {
        let channel = RecordingChannel::new();
        channel.send(&HostEvent::UserLogged).unwrap();
        assert_eq!(channel.events(), vec![HostEvent::UserLogged]);
    }
}
