use std::{
    error::Error as StdError,
    fmt::Debug,
    io::{self, Write},
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

/// Boxed error returned by mail transports.
pub type MailError = Box<dyn StdError + Send + Sync + 'static>;

/// An HTML mail carrying a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// Value of the `Content-Type` header.
    pub content_type: String,
    /// Message body.
    pub body: String,
}

impl MailMessage {
    /// Render the message in RFC 5322 format, as accepted by `sendmail -t`.
    pub fn to_rfc5322(&self) -> String {
        format!(
            "To: {}\r\nSubject: {}\r\nMIME-Version: 1.0\r\nContent-Type: {}\r\n\r\n{}",
            header_value(&self.to),
            header_value(&self.subject),
            header_value(&self.content_type),
            self.body
        )
    }
}

/// Removes line breaks, which would allow injecting headers.
fn header_value(value: &str) -> String {
    value.replace(&['\r', '\n'][..], " ")
}

/// Side effects the handler delivers reports through.
///
/// Every operation blocks. None of them has a timeout.
pub trait Transport: Debug + Send + Sync {
    /// Replace the contents of the file at `path` with `contents`.
    fn write_file(&self, path: &Path, contents: &[u8]) -> io::Result<()>;

    /// Run `command` through the shell. Output and exit status are ignored.
    fn run_command(&self, command: &str) -> io::Result<()>;

    /// Send `message`.
    fn send_mail(&self, message: &MailMessage) -> Result<(), MailError>;

    /// Stop the process.
    fn terminate(&self);
}

/// Transport using the local filesystem, `sh` and `sendmail`.
#[derive(Debug, Clone)]
pub struct SystemTransport {
    sendmail: PathBuf,
}

impl Default for SystemTransport {
    fn default() -> Self {
        Self {
            sendmail: PathBuf::from(Self::SENDMAIL),
        }
    }
}

impl SystemTransport {
    /// Exit status used by [`Transport::terminate`].
    pub const EXIT_CODE: i32 = 1;

    /// Mail program used unless configured otherwise, looked up in `PATH`.
    pub const SENDMAIL: &'static str = "sendmail";

    /// Create the transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Send mails through `program` instead of `sendmail`.
    ///
    /// The program is called with `-t -i` and reads the message from stdin.
    pub fn with_sendmail(mut self, program: impl Into<PathBuf>) -> Self {
        self.sendmail = program.into();
        self
    }
}

impl Transport for SystemTransport {
    fn write_file(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        std::fs::write(path, contents)
    }

    fn run_command(&self, command: &str) -> io::Result<()> {
        Command::new("sh")
            .arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|_| ())
    }

    fn send_mail(&self, message: &MailMessage) -> Result<(), MailError> {
        let mut child = Command::new(&self.sendmail)
            .args(["-t", "-i"])
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .spawn()?;
        // stdin is dropped before waiting, so sendmail sees the end of the message
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(message.to_rfc5322().as_bytes()),
            None => Ok(()),
        };
        let status = child.wait()?;
        written?;
        if status.success() {
            Ok(())
        } else {
            Err(format!("sendmail exited with {}", status).into())
        }
    }

    fn terminate(&self) {
        std::process::exit(Self::EXIT_CODE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rfc5322_message() {
        let message = MailMessage {
            to: "ops@example.com".into(),
            subject: "Hello\r\nBcc: evil@example.com".into(),
            content_type: "text/html; charset=utf-8".into(),
            body: "<p>body</p>".into(),
        };
        assert_eq!(
            "To: ops@example.com\r\nSubject: Hello  Bcc: evil@example.com\r\nMIME-Version: 1.0\r\nContent-Type: text/html; charset=utf-8\r\n\r\n<p>body</p>",
            message.to_rfc5322()
        );
    }

    #[test]
    fn write_file_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.html");
        let transport = SystemTransport::new();
        transport.write_file(&path, b"first, longer report").unwrap();
        transport.write_file(&path, b"second").unwrap();
        assert_eq!("second", std::fs::read_to_string(&path).unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn mail_program_exiting_early_is_reported() {
        let message = MailMessage {
            to: "ops@example.com".into(),
            subject: "report".into(),
            content_type: "text/html; charset=utf-8".into(),
            body: "x".repeat(1 << 20),
        };
        let err = SystemTransport::new()
            .with_sendmail("true")
            .send_mail(&message)
            .unwrap_err();
        assert_eq!(
            Some(io::ErrorKind::BrokenPipe),
            err.downcast_ref::<io::Error>().map(io::Error::kind)
        );
    }

    #[cfg(unix)]
    #[test]
    fn mail_program_failure_is_reported() {
        let message = MailMessage {
            to: "ops@example.com".into(),
            subject: "report".into(),
            content_type: "text/html; charset=utf-8".into(),
            body: "<p>body</p>".into(),
        };
        SystemTransport::new()
            .with_sendmail("false")
            .send_mail(&message)
            .unwrap_err();
    }

    #[cfg(unix)]
    #[test]
    fn command_status_is_ignored() {
        SystemTransport::new().run_command("exit 3").unwrap();
    }
}
