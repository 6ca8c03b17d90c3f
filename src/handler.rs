use crate::{
    config::Config,
    dispatch::{Delivery, Dispatcher},
    models::{ErrorEvent, RaisedError},
    report::{Composer, Report},
    response::Response,
    trace::TraceRenderer,
    transport::{SystemTransport, Transport},
    Error,
};
use log::debug;
use std::{fmt::Debug, path::PathBuf};

type SuppressionCheck = Box<dyn Fn(&RaisedError) -> bool + Send + Sync>;

/// What happened to an intercepted condition.
#[derive(Debug)]
pub enum Outcome {
    /// The condition was filtered out. Nothing was delivered.
    Dropped,
    /// A report was delivered.
    Delivered(Delivery),
}

impl Outcome {
    /// Whether a report was delivered.
    pub fn is_delivered(&self) -> bool {
        matches!(self, Outcome::Delivered(_))
    }
}

/// Intercepts errors and exceptions and delivers reports about them.
///
/// Construct one at process start and [register](Handler::register) it with the host.
pub struct Handler<T = SystemTransport> {
    config: Config,
    transport: T,
    composer: Composer,
    suppressed: Option<SuppressionCheck>,
}

impl<T: Debug> Debug for Handler<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Handler")
            .field("config", &self.config)
            .field("transport", &self.transport)
            .field("composer", &self.composer)
            .field("suppressed", &self.suppressed.is_some())
            .finish()
    }
}

impl Handler<SystemTransport> {
    /// Create a handler delivering through the local system.
    pub fn new(config: Config) -> Self {
        Self::with_transport(config, SystemTransport::new())
    }

    /// Create a handler delivering through the local system.
    ///
    /// Reads the configuration from the `ERROR_INTERCEPTOR_CONFIG` environment variable.
    pub fn from_env() -> Result<Self, Error> {
        Ok(Self::new(Config::from_env()?))
    }
}

impl<T: Transport> Handler<T> {
    /// Create a handler delivering through `transport`.
    ///
    /// Call sites in back-traces are shown relative to the current working directory.
    pub fn with_transport(config: Config, transport: T) -> Self {
        Self {
            config,
            transport,
            composer: Composer::new(TraceRenderer::from_current_dir()),
            suppressed: None,
        }
    }

    /// Show call sites in back-traces relative to `base_dir`.
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.composer = Composer::new(TraceRenderer::new().with_base_dir(base_dir));
        self
    }

    /// Drop runtime errors for which `check` returns `true`.
    ///
    /// This is the place to honor a "silence errors here" convention of the host. The check runs
    /// once per reported error and sees its severity and call site.
    pub fn with_suppression<F>(mut self, check: F) -> Self
    where
        F: Fn(&RaisedError) -> bool + Send + Sync + 'static,
    {
        self.suppressed = Some(Box::new(check));
        self
    }

    /// The configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The transport reports are delivered through.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Handle a runtime error reported by the host.
    ///
    /// The error is dropped if it is suppressed, if its severity is not reported or if its source
    /// file is filtered out.
    pub fn handle_runtime_error(&self, error: RaisedError, response: &mut dyn Response) -> Outcome {
        let severity = error.severity();
        if self.suppressed.as_ref().is_some_and(|check| check(&error)) {
            debug!(
                "Dropping suppressed error {:?} raised at {}:{}",
                severity,
                error.file(),
                error.line()
            );
            return Outcome::Dropped;
        }
        if !self.config.error_reporting().contains(severity) {
            debug!("Dropping error {:?} excluded from reporting", severity);
            return Outcome::Dropped;
        }
        self.handle(&error.into(), response)
    }

    /// Handle an uncaught exception or an already built runtime error event.
    pub fn handle(&self, event: &ErrorEvent, response: &mut dyn Response) -> Outcome {
        let dispatcher = Dispatcher::new(&self.config, &self.transport);
        if !dispatcher.accepts(event) {
            return Outcome::Dropped;
        }

        let report = self.compose(event);
        let delivery = dispatcher.dispatch(&report, response);
        if delivery.terminate {
            self.transport.terminate();
        }
        Outcome::Delivered(delivery)
    }

    /// Compose the report for `event` as configured.
    pub fn compose(&self, event: &ErrorEvent) -> Report {
        self.composer.compose(event, self.config.verbose())
    }
}
