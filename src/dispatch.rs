use crate::{
    config::Config,
    models::{Category, ErrorEvent},
    report::Report,
    response::Response,
    transport::{MailMessage, Transport},
    Error,
};
use http::StatusCode;
use log::{debug, warn};

/// Subject of report mails.
pub const MAIL_SUBJECT: &str = "An error occurred on the website";

/// Content type of report mails.
pub const MAIL_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// Result of delivering one report.
#[derive(Debug, Default)]
#[non_exhaustive]
pub struct Delivery {
    /// Sinks that failed, in delivery order. A failed sink does not stop the sinks after it.
    pub failures: Vec<Error>,
    /// Whether the process has to terminate now.
    pub terminate: bool,
}

/// Delivers reports to the sinks enabled in a [`Config`].
#[derive(Debug)]
pub struct Dispatcher<'a, T: ?Sized> {
    config: &'a Config,
    transport: &'a T,
}

impl<'a, T: Transport + ?Sized> Dispatcher<'a, T> {
    /// Create a dispatcher for `config`, performing side effects through `transport`.
    pub fn new(config: &'a Config, transport: &'a T) -> Self {
        Self { config, transport }
    }

    /// Whether `event` passes the source file filters.
    ///
    /// The filters only apply to runtime errors. Uncaught exceptions are always accepted.
    pub fn accepts(&self, event: &ErrorEvent) -> bool {
        match event.category() {
            Category::UncaughtException => true,
            Category::RuntimeError => {
                let accepted = self.config.accepts_source(event.file());
                if !accepted {
                    debug!("Dropping error raised in filtered source file {}", event.file());
                }
                accepted
            }
        }
    }

    /// Deliver `report` to every enabled sink.
    ///
    /// Sinks run in a fixed order: response status, response body, file, shell command, mail.
    /// Terminating the process is left to the caller, see [`Delivery::terminate`].
    pub fn dispatch(&self, report: &Report, response: &mut dyn Response) -> Delivery {
        let mut delivery = Delivery {
            failures: Vec::new(),
            terminate: self.config.exit_after_error(),
        };

        if self.config.send_error_header() && !response.has_started() {
            response.set_status(StatusCode::INTERNAL_SERVER_ERROR);
        }

        let body = report.to_bytes();
        if self.config.write_to_response() {
            if let Err(err) = response.write_body(&body) {
                delivery.failures.push(Error::WriteResponse(err));
            }
        }

        if let Some(path) = self.config.write_to_file() {
            if let Err(source) = self.transport.write_file(path, &body) {
                delivery.failures.push(Error::WriteFile {
                    path: path.to_path_buf(),
                    source,
                });
            }
        }

        if let Some(command) = self.config.shell_command() {
            if let Err(err) = self.transport.run_command(command) {
                delivery.failures.push(Error::RunCommand(err));
            }
        }

        if let Some(address) = self.config.send_to_email() {
            let message = MailMessage {
                to: address.into(),
                subject: MAIL_SUBJECT.into(),
                content_type: MAIL_CONTENT_TYPE.into(),
                body: report.to_string(),
            };
            if let Err(err) = self.transport.send_mail(&message) {
                delivery.failures.push(Error::SendMail(err));
            }
        }

        for failure in &delivery.failures {
            warn!("Delivering error report failed: {}", failure);
        }

        delivery
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::{RaisedError, Severity},
        report::Composer,
        response::BufferedResponse,
        transport::SystemTransport,
    };
    use test_case::test_case;

    fn report() -> Report {
        Composer::default().compose(&ErrorEvent::exception("E", "m"), false)
    }

    #[test_case("/app/src/lib.rs", true ; "allowed source")]
    #[test_case("/app/vendor/lib.rs", false ; "denied source")]
    #[test_case("/usr/lib/x.rs", false ; "outside allowed sources")]
    fn runtime_errors_are_filtered(file: &str, expected: bool) {
        let config = Config::new()
            .with_source_allow("^/app/")
            .unwrap()
            .with_source_deny("/vendor/")
            .unwrap();
        let transport = SystemTransport::new();
        let event: ErrorEvent = RaisedError::new(Severity::WARNING, "w").with_location(file, 1).into();
        assert_eq!(expected, Dispatcher::new(&config, &transport).accepts(&event));
    }

    #[test]
    fn exceptions_are_never_filtered() {
        let config = Config::new().with_source_allow("^/app/").unwrap();
        let transport = SystemTransport::new();
        let event = ErrorEvent::exception("E", "m").with_location("/usr/lib/x.rs", 1);
        assert!(Dispatcher::new(&config, &transport).accepts(&event));
    }

    #[test]
    fn response_gets_status_and_body() {
        let config = Config::new()
            .with_send_error_header(true)
            .with_write_to_response(true);
        let transport = SystemTransport::new();
        let mut response = BufferedResponse::new();

        let delivery = Dispatcher::new(&config, &transport).dispatch(&report(), &mut response);

        assert!(delivery.failures.is_empty());
        assert!(!delivery.terminate);
        assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, response.status());
        assert_eq!(report().as_str().as_bytes(), response.body());
    }

    #[test]
    fn committed_response_keeps_status() {
        let config = Config::new()
            .with_send_error_header(true)
            .with_exit_after_error(true);
        let transport = SystemTransport::new();
        let mut response = BufferedResponse::new();
        response.commit();

        let delivery = Dispatcher::new(&config, &transport).dispatch(&report(), &mut response);

        assert_eq!(StatusCode::OK, response.status());
        assert!(response.body().is_empty());
        assert!(delivery.terminate);
    }
}
