//! Deferred-binding hook around the foreign app's startup entry point.
//!
//! Two phases:
//! 1. `bind` - the foreign app hands over its real entry point (once).
//! 2. `invoke` - every startup call goes through the hook. For the target
//!    module the first call installs the response stage and lifecycle
//!    observer before delegating; every other call is a plain pass-through.
//!
//! CHANGELOG:
//! - 10/17/2026 - Added missing-constants policy
//! - 10/17/2026 - Initial implementation

use serde_json::Value;
use std::cell::{Cell, OnceCell};
use std::sync::Arc;

use super::host::{HostNotifier, LifecycleObserver};
use super::protocol::HostChannel;
use crate::config::{InjectConfig, MissingConstantsPolicy};
use crate::constants::TypeConstants;
use crate::error::{InjectError, Result};
use crate::payload::{ResponseStage, ResponseTransformer};

/// Arguments of a startup call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapRequest {
    /// Root element selector the app mounts on.
    pub element: String,
    pub modules: Vec<String>,
}

impl BootstrapRequest {
    pub fn new<I, S>(element: impl Into<String>, modules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            element: element.into(),
            modules: modules.into_iter().map(Into::into).collect(),
        }
    }

    pub fn includes(&self, module: &str) -> bool {
        self.modules.iter().any(|m| m == module)
    }
}

/// The foreign app's real startup routine.
pub trait EntryPoint {
    fn bootstrap(&self, request: &BootstrapRequest) -> Value;
}

impl<F> EntryPoint for F
where
    F: Fn(&BootstrapRequest) -> Value,
{
    fn bootstrap(&self, request: &BootstrapRequest) -> Value {
        self(request)
    }
}

/// Extension points the foreign app exposes to us.
pub trait ForeignApp {
    /// Look up the message type table from the app's DI container.
    fn resolve_constants(&self) -> Option<TypeConstants>;

    /// Append a post-processing step to a module's response pipeline.
    fn push_response_stage(&mut self, module: &str, stage: Arc<dyn ResponseStage>);

    /// Register an observer for a module's run-time lifecycle.
    fn observe_lifecycle(&mut self, module: &str, observer: Arc<dyn LifecycleObserver>);
}

/// Wraps the startup entry point. Not thread-shared.
pub struct BootstrapHook {
    config: Arc<InjectConfig>,
    channel: Arc<dyn HostChannel>,
    real: OnceCell<Box<dyn EntryPoint>>,
    installed: Cell<bool>,
}

impl BootstrapHook {
    pub fn new(config: Arc<InjectConfig>, channel: Arc<dyn HostChannel>) -> Self {
        Self {
            config,
            channel,
            real: OnceCell::new(),
            installed: Cell::new(false),
        }
    }

    /// Accept the real entry point. Only the first bind is taken.
    pub fn bind(&self, entry: impl EntryPoint + 'static) -> Result<()> {
        self.real
            .set(Box::new(entry))
            .map_err(|_| InjectError::AlreadyBound)?;
        tracing::info!("startup entry point bound");
        Ok(())
    }

    pub fn is_bound(&self) -> bool {
        self.real.get().is_some()
    }

    pub fn is_installed(&self) -> bool {
        self.installed.get()
    }

    /// Run a startup call through the hook.
    ///
    /// Returns `Ok(None)` while no entry point is bound.
    pub fn invoke(
        &self,
        app: &mut dyn ForeignApp,
        request: &BootstrapRequest,
    ) -> Result<Option<Value>> {
        let Some(real) = self.real.get() else {
            tracing::trace!(element = %request.element, "startup before bind ignored");
            return Ok(None);
        };

        let target = self.config.target_module.as_str();
        if request.includes(target) && !self.installed.get() {
            self.install(app, target)?;
        }

        Ok(Some(real.bootstrap(request)))
    }

    fn install(&self, app: &mut dyn ForeignApp, module: &str) -> Result<()> {
        match app.resolve_constants() {
            Some(constants) => {
                let stage = ResponseTransformer::new(constants, Arc::clone(&self.config));
                app.push_response_stage(module, Arc::new(stage));
                tracing::info!(module, "response stage installed");
            }
            None => match self.config.missing_constants {
                MissingConstantsPolicy::Fail => {
                    tracing::error!(module, "type constants unavailable, refusing to start");
                    return Err(InjectError::MissingConstants {
                        module: module.to_string(),
                    });
                }
                MissingConstantsPolicy::PassThrough => {
                    tracing::warn!(module, "type constants unavailable, responses pass through");
                }
            },
        }

        let notifier = HostNotifier::new(Arc::clone(&self.channel));
        app.observe_lifecycle(module, Arc::new(notifier));
        self.installed.set(true);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::protocol::RecordingChannel;
    use serde_json::json;

    #[derive(Default)]
    struct StubApp {
        constants: Option<TypeConstants>,
        stages: Vec<String>,
        observers: Vec<String>,
    }

    impl ForeignApp for StubApp {
        fn resolve_constants(&self) -> Option<TypeConstants> {
            self.constants.clone()
        }

        fn push_response_stage(&mut self, module: &str, _stage: Arc<dyn ResponseStage>) {
            self.stages.push(module.to_string());
        }

        fn observe_lifecycle(&mut self, module: &str, _observer: Arc<dyn LifecycleObserver>) {
            self.observers.push(module.to_string());
        }
    }

    fn hook() -> BootstrapHook {
        BootstrapHook::new(
            Arc::new(InjectConfig::default()),
            Arc::new(RecordingChannel::new()),
        )
    }

    #[test]
    fn test_invoke_before_bind_is_noop() {
        let hook = hook();
        let mut app = StubApp::default();
        let out = hook
            .invoke(&mut app, &BootstrapRequest::new("body", ["webwxApp"]))
            .unwrap();
        assert_eq!(out, None);
        assert!(app.stages.is_empty());
    }

    #[test]
    fn test_bind_only_once() {
        let hook = hook();
        assert!(!hook.is_bound());
        hook.bind(|_: &BootstrapRequest| json!(1)).unwrap();
        assert!(hook.is_bound());
        let err = hook.bind(|_: &BootstrapRequest| json!(2)).unwrap_err();
        assert!(matches!(err, InjectError::AlreadyBound));

        let mut app = StubApp::default();
        let out = hook
            .invoke(&mut app, &BootstrapRequest::new("body", ["other"]))
            .unwrap();
        assert_eq!(out, Some(json!(1)));
    }

    #[test]
    fn test_target_module_installs_once() {
        let hook = hook();
        hook.bind(|req: &BootstrapRequest| json!(req.modules)).unwrap();
        let mut app = StubApp {
            constants: Some(TypeConstants::default()),
            ..StubApp::default()
        };

        let request = BootstrapRequest::new("body", ["ng", "webwxApp"]);
        assert_eq!(hook.invoke(&mut app, &request).unwrap(), Some(json!(["ng", "webwxApp"])));
        hook.invoke(&mut app, &request).unwrap();

        assert!(hook.is_installed());
        assert_eq!(app.stages, vec!["webwxApp"]);
        assert_eq!(app.observers, vec!["webwxApp"]);
    }

    #[test]
    fn test_other_module_passes_through() {
        let hook = hook();
        hook.bind(|_: &BootstrapRequest| json!("started")).unwrap();
        let mut app = StubApp {
            constants: Some(TypeConstants::default()),
            ..StubApp::default()
        };

        let out = hook
            .invoke(&mut app, &BootstrapRequest::new("body", ["settingsApp"]))
            .unwrap();
        assert_eq!(out, Some(json!("started")));
        assert!(!hook.is_installed());
        assert!(app.stages.is_empty() && app.observers.is_empty());
    }
}
