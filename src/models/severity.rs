use serde::Deserialize;
use std::{fmt, ops::BitOr};

/// Severity bits of a runtime error.
///
/// A single level identifies the kind of a reported error. Combinations are used as a filter,
/// see [`Severity::contains`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct Severity(u32);

impl Severity {
    /// Fatal run-time error.
    pub const ERROR: Severity = Severity(1);
    /// Non-fatal run-time warning.
    pub const WARNING: Severity = Severity(2);
    /// Compile-time parse error.
    pub const PARSE: Severity = Severity(4);
    /// Run-time notice.
    pub const NOTICE: Severity = Severity(8);
    /// Fatal error during startup.
    pub const CORE_ERROR: Severity = Severity(16);
    /// Warning during startup.
    pub const CORE_WARNING: Severity = Severity(32);
    /// Fatal compile-time error.
    pub const COMPILE_ERROR: Severity = Severity(64);
    /// Compile-time warning.
    pub const COMPILE_WARNING: Severity = Severity(128);
    /// Error raised by application code.
    pub const USER_ERROR: Severity = Severity(256);
    /// Warning raised by application code.
    pub const USER_WARNING: Severity = Severity(512);
    /// Notice raised by application code.
    pub const USER_NOTICE: Severity = Severity(1024);
    /// Suggestion about forward compatibility.
    pub const STRICT: Severity = Severity(2048);
    /// Fatal error that may be caught.
    pub const RECOVERABLE_ERROR: Severity = Severity(4096);
    /// Use of deprecated functionality.
    pub const DEPRECATED: Severity = Severity(8192);
    /// Deprecation raised by application code.
    pub const USER_DEPRECATED: Severity = Severity(16384);
    /// Every level.
    pub const ALL: Severity = Severity(32767);

    const LABELS: [(Severity, &'static str); 15] = [
        (Severity::ERROR, "Error"),
        (Severity::WARNING, "Warning"),
        (Severity::PARSE, "Parsing Error"),
        (Severity::NOTICE, "Notice"),
        (Severity::CORE_ERROR, "Core Error"),
        (Severity::CORE_WARNING, "Core Warning"),
        (Severity::COMPILE_ERROR, "Compile Error"),
        (Severity::COMPILE_WARNING, "Compile Warning"),
        (Severity::USER_ERROR, "User Error"),
        (Severity::USER_WARNING, "User Warning"),
        (Severity::USER_NOTICE, "User Notice"),
        (Severity::STRICT, "Runtime Notice"),
        (Severity::RECOVERABLE_ERROR, "Catchable Fatal Error"),
        (Severity::DEPRECATED, "Deprecated"),
        (Severity::USER_DEPRECATED, "User Deprecated"),
    ];

    /// Create a severity from raw bits.
    pub const fn from_bits(bits: u32) -> Self {
        Severity(bits)
    }

    /// Raw bits.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Whether every bit of `other` is set in `self`.
    ///
    /// ```
    /// use error_interceptor::Severity;
    ///
    /// assert!(Severity::ALL.contains(Severity::NOTICE));
    /// assert!(!Severity::ERROR.contains(Severity::NOTICE));
    /// ```
    pub const fn contains(self, other: Severity) -> bool {
        self.0 & other.0 == other.0
    }

    /// Display label of a single level. Anything else is `"Unknown"`.
    pub fn label(self) -> &'static str {
        Self::LABELS
            .iter()
            .find(|(severity, _)| *severity == self)
            .map(|(_, label)| *label)
            .unwrap_or("Unknown")
    }
}

impl Default for Severity {
    fn default() -> Self {
        Severity::ALL
    }
}

impl BitOr for Severity {
    type Output = Severity;

    fn bitor(self, rhs: Severity) -> Severity {
        Severity(self.0 | rhs.0)
    }
}

impl fmt::Debug for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Severity({}: {})", self.0, self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(Severity::ERROR, "Error" ; "error")]
    #[test_case(Severity::NOTICE, "Notice" ; "notice")]
    #[test_case(Severity::STRICT, "Runtime Notice" ; "strict")]
    #[test_case(Severity::USER_DEPRECATED, "User Deprecated" ; "user deprecated")]
    #[test_case(Severity::from_bits(3), "Unknown" ; "combination")]
    #[test_case(Severity::from_bits(65536), "Unknown" ; "unknown bit")]
    fn label(severity: Severity, expected: &'static str) {
        assert_eq!(expected, severity.label());
    }

    #[test]
    fn level_filter() {
        let level = Severity::ERROR | Severity::WARNING;
        assert!(level.contains(Severity::WARNING));
        assert!(!level.contains(Severity::NOTICE));
        assert!(!level.contains(Severity::from_bits(3 | 8)));
        assert!(Severity::ALL.contains(Severity::USER_DEPRECATED));
    }
}
