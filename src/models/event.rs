use crate::models::{Frame, Severity};

/// Kind of an intercepted condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// An exception (panic) that propagated out of application code unhandled.
    UncaughtException,
    /// A fault reported through the runtime error channel.
    RuntimeError,
}

impl Category {
    /// Heading used in verbose reports.
    pub fn label(self) -> &'static str {
        match self {
            Category::RuntimeError => "Script Error",
            Category::UncaughtException => "Uncaught Exception",
        }
    }
}

/// Context of one intercepted error or exception.
///
/// Built once per condition and read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorEvent {
    category: Category,
    type_name: String,
    message: String,
    code: i64,
    file: String,
    line: u32,
    trace: Vec<Frame>,
}

impl ErrorEvent {
    /// Create an event without code, location and trace.
    pub fn new(
        category: Category,
        type_name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            type_name: type_name.into(),
            message: message.into(),
            code: 0,
            file: String::new(),
            line: 0,
            trace: Vec::new(),
        }
    }

    /// Create an event for an uncaught exception.
    pub fn exception(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Category::UncaughtException, type_name, message)
    }

    /// Create an event for a runtime error of the given severity. The type name is the severity's
    /// label and the code its bits.
    pub fn runtime_error(severity: Severity, message: impl Into<String>) -> Self {
        Self::new(Category::RuntimeError, severity.label(), message).with_code(severity.bits().into())
    }

    /// Set the error code.
    pub fn with_code(mut self, code: i64) -> Self {
        self.code = code;
        self
    }

    /// Set the source location the condition was raised at.
    pub fn with_location(mut self, file: impl Into<String>, line: u32) -> Self {
        self.file = file.into();
        self.line = line;
        self
    }

    /// Set the stack trace, innermost frame first.
    pub fn with_trace(mut self, trace: Vec<Frame>) -> Self {
        self.trace = trace;
        self
    }

    /// Category of the condition.
    pub fn category(&self) -> Category {
        self.category
    }

    /// Type label, e.g. a severity label or an exception type.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Message of the condition.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Error code.
    pub fn code(&self) -> i64 {
        self.code
    }

    /// Source file the condition was raised in.
    pub fn file(&self) -> &str {
        &self.file
    }

    /// Source line the condition was raised at.
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Stack trace, innermost frame first.
    pub fn trace(&self) -> &[Frame] {
        &self.trace
    }
}

/// A runtime error as reported by the host, before filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct RaisedError {
    pub(crate) severity: Severity,
    pub(crate) message: String,
    pub(crate) file: String,
    pub(crate) line: u32,
    pub(crate) trace: Vec<Frame>,
}

impl RaisedError {
    /// Create a runtime error without location and trace.
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            file: String::new(),
            line: 0,
            trace: Vec::new(),
        }
    }

    /// Set the source location the error was raised at.
    pub fn with_location(mut self, file: impl Into<String>, line: u32) -> Self {
        self.file = file.into();
        self.line = line;
        self
    }

    /// Set the stack trace, innermost frame first.
    pub fn with_trace(mut self, trace: Vec<Frame>) -> Self {
        self.trace = trace;
        self
    }

    /// Severity of the error.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Message of the error.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Source file the error was raised in.
    pub fn file(&self) -> &str {
        &self.file
    }

    /// Line the error was raised at.
    pub fn line(&self) -> u32 {
        self.line
    }
}

impl From<RaisedError> for ErrorEvent {
    fn from(error: RaisedError) -> Self {
        ErrorEvent::runtime_error(error.severity, error.message)
            .with_location(error.file, error.line)
            .with_trace(error.trace)
    }
}
