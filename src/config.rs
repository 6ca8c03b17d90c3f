use crate::{models::Severity, Error};
use regex::Regex;
use serde::{Deserialize, Deserializer};
use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

/// Environment variable read by [`Config::from_env`].
pub const CONFIG_ENV_VAR: &str = "ERROR_INTERCEPTOR_CONFIG";

/// Which errors are reported, and where reports are delivered to.
///
/// Every sink is off by default. Set the configuration up once at process start, before
/// registering the handler; it is read-only afterwards.
///
/// A configuration can also be read from JSON. Keys are the camel case field names:
///
/// ```
/// use error_interceptor::Config;
///
/// let config: Config = r#"{
///     "writeToFile": "/var/log/app/last-error.html",
///     "sourceDeny": "^/app/vendor/",
///     "errorReporting": 32759
/// }"#
/// .parse()
/// .unwrap();
/// assert!(!config.write_to_response());
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct Config {
    error_reporting: Severity,
    exit_after_error: bool,
    send_error_header: bool,
    write_to_response: bool,
    verbose: bool,
    write_to_file: Option<PathBuf>,
    shell_command: Option<String>,
    send_to_email: Option<String>,
    source_allow: Option<Pattern>,
    source_deny: Option<Pattern>,
}

impl Config {
    /// Create a configuration with every sink disabled and all severities reported.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read the JSON configuration document from the `ERROR_INTERCEPTOR_CONFIG` environment
    /// variable.
    pub fn from_env() -> Result<Self, Error> {
        let json = std::env::var(CONFIG_ENV_VAR)?;
        Self::from_json(&json)
    }

    /// Report only runtime errors whose severity is contained in `level`.
    ///
    /// Default: [`Severity::ALL`]
    pub fn with_error_reporting(mut self, level: Severity) -> Self {
        self.error_reporting = level;
        self
    }

    /// Terminate the process after a report was delivered.
    pub fn with_exit_after_error(mut self, exit_after_error: bool) -> Self {
        self.exit_after_error = exit_after_error;
        self
    }

    /// Set the response status to 500 unless the response has already started.
    pub fn with_send_error_header(mut self, send_error_header: bool) -> Self {
        self.send_error_header = send_error_header;
        self
    }

    /// Write the report into the response body.
    pub fn with_write_to_response(mut self, write_to_response: bool) -> Self {
        self.write_to_response = write_to_response;
        self
    }

    /// Include message, location and back-trace in reports.
    ///
    /// This discloses file paths, argument values and internal type names. Only enable it where
    /// reports are seen by operators.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Overwrite this file with every report.
    pub fn with_write_to_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.write_to_file = Some(path.into());
        self
    }

    /// Run this shell command after every report. Its output is ignored.
    pub fn with_shell_command(mut self, command: impl Into<String>) -> Self {
        self.shell_command = Some(command.into());
        self
    }

    /// Mail every report to this address.
    pub fn with_send_to_email(mut self, address: impl Into<String>) -> Self {
        self.send_to_email = Some(address.into());
        self
    }

    /// Report runtime errors only if their source file matches `pattern`.
    pub fn with_source_allow(mut self, pattern: &str) -> Result<Self, Error> {
        self.source_allow = Some(Pattern::new(pattern)?);
        Ok(self)
    }

    /// Drop runtime errors whose source file matches `pattern`.
    pub fn with_source_deny(mut self, pattern: &str) -> Result<Self, Error> {
        self.source_deny = Some(Pattern::new(pattern)?);
        Ok(self)
    }

    /// Severities of runtime errors that are reported.
    pub fn error_reporting(&self) -> Severity {
        self.error_reporting
    }

    /// Whether the process terminates after a report.
    pub fn exit_after_error(&self) -> bool {
        self.exit_after_error
    }

    /// Whether the response status is set to 500.
    pub fn send_error_header(&self) -> bool {
        self.send_error_header
    }

    /// Whether the report is written into the response body.
    pub fn write_to_response(&self) -> bool {
        self.write_to_response
    }

    /// Whether reports include details.
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// File overwritten with every report.
    pub fn write_to_file(&self) -> Option<&Path> {
        self.write_to_file.as_deref()
    }

    /// Shell command run after every report.
    pub fn shell_command(&self) -> Option<&str> {
        self.shell_command.as_deref()
    }

    /// Address every report is mailed to.
    pub fn send_to_email(&self) -> Option<&str> {
        self.send_to_email.as_deref()
    }

    /// Pattern a runtime error's source file has to match.
    pub fn source_allow(&self) -> Option<&Pattern> {
        self.source_allow.as_ref()
    }

    /// Pattern a runtime error's source file must not match.
    pub fn source_deny(&self) -> Option<&Pattern> {
        self.source_deny.as_ref()
    }

    /// Whether runtime errors raised in `file` pass the allow and deny patterns.
    pub fn accepts_source(&self, file: &str) -> bool {
        if let Some(allow) = &self.source_allow {
            if !allow.is_match(file) {
                return false;
            }
        }
        if let Some(deny) = &self.source_deny {
            if deny.is_match(file) {
                return false;
            }
        }
        true
    }
}

impl FromStr for Config {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_json(s)
    }
}

/// A compiled source file filter.
#[derive(Clone)]
pub struct Pattern(Regex);

impl Pattern {
    /// Compile `pattern`.
    pub fn new(pattern: &str) -> Result<Self, Error> {
        Regex::new(pattern)
            .map(Pattern)
            .map_err(|source| Error::InvalidPattern {
                pattern: pattern.into(),
                source,
            })
    }

    /// Whether `haystack` contains a match.
    pub fn is_match(&self, haystack: &str) -> bool {
        self.0.is_match(haystack)
    }

    /// The source pattern.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pattern").field(&self.as_str()).finish()
    }
}

impl<'de> Deserialize<'de> for Pattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let pattern = String::deserialize(deserializer)?;
        Pattern::new(&pattern).map_err(serde::de::Error::custom)
    }
}
