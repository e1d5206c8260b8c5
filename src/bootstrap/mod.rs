//! Bootstrap hook: install the response stage when the target module starts.
//!
//! CHANGELOG:
//! - 10/17/2026 - Initial module structure

pub mod hook;
pub mod host;
pub mod protocol;

pub use hook::{BootstrapHook, BootstrapRequest, EntryPoint, ForeignApp};
pub use host::{HostNotifier, LifecycleObserver};
pub use protocol::{HostChannel, HostEvent, NdjsonChannel, RecordingChannel};
