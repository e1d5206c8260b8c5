//! webwx-inject library
//!
//! Response interception for the hosted web chat client: locks display
//! fields on sync batches (anti-recall, emoticon sizing) and patches view
//! templates, installed through a deferred bootstrap hook.
//!
//! CHANGELOG:
//! - 10/17/2026 - Initial library structure

pub mod bootstrap;
pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod lock;
pub mod output;
pub mod payload;
pub mod rewriter;
pub mod template;

pub use config::InjectConfig;
pub use constants::TypeConstants;
pub use error::{InjectError, Result};
pub use lock::{LockedRecord, Sealed, WriteOutcome};
pub use payload::{transform_response, Payload, ResponseStage, ResponseTransformer};
