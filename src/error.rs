use std::{error::Error as StdError, fmt::Debug, path::PathBuf};

/// Errors that occurred while configuring the handler or delivering a report.
///
/// Delivery errors never escape the error handler. They are logged and collected in
/// [`Delivery::failures`](crate::Delivery::failures).
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A source file filter is not a valid regular expression.
    #[error("invalid source file pattern {pattern:?}: {source}")]
    InvalidPattern {
        /// The rejected pattern.
        pattern: String,
        /// Why it was rejected.
        #[source]
        source: regex::Error,
    },

    /// The configuration document is not valid.
    #[error("parsing configuration failed with {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// The configuration environment variable is missing or not unicode.
    #[error("reading configuration from environment failed with {0}")]
    ConfigEnv(#[from] std::env::VarError),

    /// Writing the report into the response body failed.
    #[error("writing report to response failed with {0}")]
    WriteResponse(std::io::Error),

    /// Writing the report file failed.
    #[error("writing report to {path:?} failed with {source}")]
    WriteFile {
        /// The configured report file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configured shell command could not be started.
    #[error("running shell command failed with {0}")]
    RunCommand(std::io::Error),

    /// The mail transport could not send the report.
    #[error("sending report mail failed with {0}")]
    SendMail(Box<dyn StdError + Send + Sync + 'static>),
}
