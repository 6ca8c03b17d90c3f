use crate::{
    handler::Handler,
    models::{ErrorEvent, Frame, RaisedError, Severity},
    response::{Response, StreamResponse},
    transport::Transport,
};
use backtrace::Backtrace;
use std::{any::Any, fmt, panic::Location, sync::Arc};

/// Frames of the capturing machinery, skipped at the top of a captured trace.
const INTERNAL_FRAME_PREFIXES: &[&str] = &[
    "backtrace::",
    "<backtrace::",
    "error_interceptor::host::capture_trace",
    "error_interceptor::host::ProcessHost",
    "<error_interceptor::host::ProcessHost",
    "std::",
    "<std::",
    "core::",
    "<core::",
    "alloc::",
    "<alloc::",
    "rust_begin_unwind",
    "__rust",
];

/// Marks the entry of `main`, a spawned thread or a test. Frames from here on are runtime setup.
const ENTRY_MARKER: &str = "__rust_begin_short_backtrace";

/// Callback the host invokes for runtime errors.
pub type ErrorCallback = Box<dyn Fn(RaisedError, &mut dyn Response) + Send + Sync>;

/// Callback the host invokes for uncaught exceptions.
pub type ExceptionCallback = Box<dyn Fn(ErrorEvent, &mut dyn Response) + Send + Sync>;

/// The runtime hosting the application, which reports errors and exceptions to callbacks.
pub trait Host {
    /// Install the callback for runtime errors.
    fn install_error_callback(&mut self, callback: ErrorCallback);

    /// Install the callback for uncaught exceptions.
    fn install_exception_callback(&mut self, callback: ExceptionCallback);
}

impl<T: Transport + 'static> Handler<T> {
    /// Install this handler for both runtime errors and uncaught exceptions of `host`.
    ///
    /// ```no_run
    /// use error_interceptor::{Config, Handler, ProcessHost};
    /// use std::sync::Arc;
    ///
    /// let config = Config::new().with_write_to_file("/var/log/app/last-error.html");
    /// let mut host = ProcessHost::new();
    /// Arc::new(Handler::new(config)).register(&mut host);
    /// ```
    pub fn register<H: Host + ?Sized>(self: Arc<Self>, host: &mut H) {
        let handler = Arc::clone(&self);
        host.install_error_callback(Box::new(move |error, response| {
            handler.handle_runtime_error(error, response);
        }));
        host.install_exception_callback(Box::new(move |event, response| {
            self.handle(&event, response);
        }));
    }
}

/// Host for plain Rust programs.
///
/// Uncaught exceptions are panics: installing the exception callback replaces the process wide
/// panic hook. Runtime errors are raised explicitly with [`ProcessHost::trigger`]. Inline reports
/// go to stderr.
#[derive(Default)]
pub struct ProcessHost {
    error_callback: Option<ErrorCallback>,
}

impl ProcessHost {
    /// Type name of events created for panics.
    pub const PANIC_TYPE: &'static str = "panic";

    /// Create a host without callbacks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Report a runtime error raised at the caller's location.
    #[track_caller]
    pub fn trigger(&self, severity: Severity, message: impl Into<String>) {
        let location = Location::caller();
        if let Some(callback) = &self.error_callback {
            callback(
                RaisedError::new(severity, message)
                    .with_location(location.file(), location.line())
                    .with_trace(capture_trace()),
                &mut StreamResponse::stderr(),
            );
        }
    }
}

impl fmt::Debug for ProcessHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessHost")
            .field("error_callback", &self.error_callback.is_some())
            .finish()
    }
}

impl Host for ProcessHost {
    fn install_error_callback(&mut self, callback: ErrorCallback) {
        self.error_callback = Some(callback);
    }

    fn install_exception_callback(&mut self, callback: ExceptionCallback) {
        std::panic::set_hook(Box::new(move |info| {
            let mut event = ErrorEvent::exception(Self::PANIC_TYPE, panic_message(info.payload()))
                .with_trace(capture_trace());
            if let Some(location) = info.location() {
                event = event.with_location(location.file(), location.line());
            }
            callback(event, &mut StreamResponse::stderr());
        }));
    }
}

/// Capture the current call stack, innermost frame first, starting at the code that raised the
/// error or panicked.
fn capture_trace() -> Vec<Frame> {
    let backtrace = Backtrace::new();
    let frames = backtrace
        .frames()
        .iter()
        .flat_map(|frame| frame.symbols())
        .filter_map(|symbol| {
            let name = format!("{:#}", symbol.name()?);
            let frame = Frame::new(name);
            Some(match (symbol.filename(), symbol.lineno()) {
                (Some(file), Some(line)) => frame.with_location(file.display().to_string(), line),
                (Some(file), None) => frame.with_file(file.display().to_string()),
                (None, _) => frame,
            })
        });
    trim_trace(frames)
}

fn trim_trace(frames: impl IntoIterator<Item = Frame>) -> Vec<Frame> {
    frames
        .into_iter()
        .skip_while(|frame| {
            INTERNAL_FRAME_PREFIXES
                .iter()
                .any(|prefix| frame.function().starts_with(prefix))
        })
        .take_while(|frame| !frame.function().contains(ENTRY_MARKER))
        .collect()
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "Box<dyn Any>".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panic_payloads() {
        assert_eq!("static", panic_message(&"static"));
        assert_eq!("owned", panic_message(&String::from("owned")));
        assert_eq!("Box<dyn Any>", panic_message(&42u8));
    }

    #[test]
    fn trim_skips_capture_frames_and_runtime_setup() {
        let frames = [
            "backtrace::backtrace::trace",
            "error_interceptor::host::capture_trace",
            "<error_interceptor::host::ProcessHost as error_interceptor::host::Host>::install_exception_callback::{{closure}}",
            "std::panicking::rust_panic_with_hook",
            "rust_begin_unwind",
            "core::panicking::panic_fmt",
            "app::cache::load",
            "core::iter::traits::iterator::Iterator::for_each",
            "app::main",
            "std::sys::backtrace::__rust_begin_short_backtrace",
            "std::rt::lang_start_internal",
        ]
        .map(Frame::new);
        let names: Vec<_> = trim_trace(frames)
            .iter()
            .map(|frame| frame.function().to_string())
            .collect();
        assert_eq!(
            vec![
                "app::cache::load",
                "core::iter::traits::iterator::Iterator::for_each",
                "app::main",
            ],
            names
        );
    }

    #[inline(never)]
    fn capture_from_here() -> Vec<Frame> {
        capture_trace()
    }

    #[test]
    fn captured_trace_starts_at_caller() {
        let trace = capture_from_here();
        assert!(trace[0].function().ends_with("capture_from_here"), "{:?}", trace[0]);
        assert!(!trace
            .iter()
            .any(|frame| frame.function().contains("capture_trace")));
    }

    #[test]
    fn trigger_without_callback_is_a_no_op() {
        ProcessHost::new().trigger(Severity::USER_NOTICE, "nobody listens");
    }
}
