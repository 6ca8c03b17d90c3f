use crate::models::Argument;

/// One level of a captured call stack.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub(crate) function: String,
    pub(crate) file: Option<String>,
    pub(crate) line: Option<u32>,
    pub(crate) args: Vec<Argument>,
}

impl Frame {
    /// Create a frame for a call to `function` without call site and arguments.
    pub fn new(function: impl Into<String>) -> Self {
        Self {
            function: function.into(),
            file: None,
            line: None,
            args: Vec::new(),
        }
    }

    /// Set the call site.
    pub fn with_location(self, file: impl Into<String>, line: u32) -> Self {
        self.with_file(file).with_line(line)
    }

    /// Set the file of the call site.
    ///
    /// Without a line, traces show the file only.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Set the line of the call site. Ignored in traces unless the file is known.
    pub fn with_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    /// Set the arguments the function was called with.
    pub fn with_args<I>(mut self, args: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Argument>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Name of the called function.
    pub fn function(&self) -> &str {
        &self.function
    }

    /// File of the call site, if known.
    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }

    /// Line of the call site, if known.
    pub fn line(&self) -> Option<u32> {
        self.line
    }

    /// Arguments of the call.
    pub fn args(&self) -> &[Argument] {
        &self.args
    }
}
