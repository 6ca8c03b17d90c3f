//! A process-wide error and panic interceptor for server applications.
//!
//! The [`Handler`] turns runtime errors and uncaught exceptions into a diagnostic report and
//! delivers the report to the sinks enabled in its [`Config`]: the response of the failing
//! request, a file, a shell command or an email address.
//!
//! # Usage
//!
//! Configure and register the handler once at process start:
//!
//! ```rust,no_run
//! use error_interceptor::{Config, Handler, ProcessHost, Severity};
//! use std::sync::Arc;
//!
//! fn init_error_handler() -> ProcessHost {
//!     let config = Config::new()
//!         .with_send_error_header(true)
//!         .with_write_to_response(true)
//!         .with_write_to_file("/var/log/app/last-error.html")
//!         .with_send_to_email("ops@example.com");
//!     let mut host = ProcessHost::new();
//!     Arc::new(Handler::new(config)).register(&mut host);
//!     host
//! }
//!
//! let host = init_error_handler();
//! host.trigger(Severity::USER_WARNING, "cache directory is not writable");
//! ```
//!
//! Servers embedding another runtime implement [`Host`] to forward that runtime's error and
//! exception callbacks. Side effects go through a [`Transport`], the response through
//! [`Response`].
//!
//! # Delivery
//!
//! Reports are delivered in a fixed order. Every step is skipped when its option is not set:
//!
//! | Option              | Effect                                                        |
//! | ------------------- | ------------------------------------------------------------- |
//! | `send_error_header` | Response status 500, unless the response has already started |
//! | `write_to_response` | Report appended to the response body                          |
//! | `write_to_file`     | File overwritten with the report                              |
//! | `shell_command`     | Command run through `sh -c`, result ignored                   |
//! | `send_to_email`     | Report sent as HTML mail                                      |
//! | `exit_after_error`  | Process terminated                                            |
//!
//! Runtime errors are dropped before delivery when their [`Severity`] is not part of
//! `error_reporting`, when the suppression check given to [`Handler::with_suppression`] says
//! so, or when their source file does not match `source_allow` or matches `source_deny`.
//! Uncaught exceptions are never filtered.
//!
//! # Verbose reports
//!
//! By default a report only contains a generic apology. With `verbose` it also contains the
//! message, the source location and the back-trace including argument values. These disclose
//! internals of the application, so only enable `verbose` where reports are seen by operators.
#![doc(html_root_url = "https://docs.rs/error-interceptor/0.1.0")]
#![deny(missing_docs, unreachable_pub, missing_debug_implementations)]

mod config;
mod dispatch;
mod error;
mod format;
mod handler;
mod host;
mod models;
mod report;
mod response;
mod trace;
mod transport;

pub use config::{Config, Pattern, CONFIG_ENV_VAR};
pub use dispatch::{Delivery, Dispatcher, MAIL_CONTENT_TYPE, MAIL_SUBJECT};
pub use error::Error;
pub use format::{
    format_argument, format_value, ABBREVIATED_LENGTH, ABBREVIATION_THRESHOLD,
    MAX_ARGUMENT_LENGTH, MAX_ARRAY_DEPTH,
};
pub use handler::{Handler, Outcome};
pub use host::{ErrorCallback, ExceptionCallback, Host, ProcessHost};
pub use models::{Argument, ArrayKey, Category, ErrorEvent, Frame, Number, RaisedError, Severity};
pub use report::{Composer, Report};
pub use response::{BufferedResponse, Response, StreamResponse};
pub use trace::TraceRenderer;
pub use transport::{MailError, MailMessage, SystemTransport, Transport};
