//! Error types for the configuration models.
//!
//! All errors implement `std::error::Error` via `thiserror`. Every variant
//! is recoverable: the remote object layer translates an `Err` into a
//! protocol-level reply, so the model itself never formats user-facing
//! text. The `Display` strings here are diagnostic/log output only.

use thiserror::Error;

/// Result type alias for configuration model operations.
pub type CfgResult<T> = Result<T, CfgError>;

/// Errors surfaced by the configuration models.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CfgError {
    /// Non-empty input that does not parse as the expected value.
    ///
    /// Distinct from "absent": an empty string always means unset and is
    /// never an error.
    #[error("invalid {what} value '{value}'")]
    ParseError {
        /// What was being parsed (e.g. "count", "duration", "stp").
        what: &'static str,
        /// The offending input.
        value: String,
    },

    /// A name or kernel interface index with no matching entry.
    #[error("{what} '{key}' not found")]
    NotFound {
        /// The kind of entry looked up (e.g. "port", "device").
        what: &'static str,
        /// The lookup key.
        key: String,
    },

    /// A name or device identity that is already a member.
    #[error("{what} '{key}' already present")]
    DuplicateEntry {
        /// The kind of entry (e.g. "port", "device").
        what: &'static str,
        /// The conflicting key.
        key: String,
    },

    /// Unknown symbolic option id in a generic get/set call.
    #[error("unsupported option '{option}'")]
    UnsupportedOption {
        /// The unrecognized option id.
        option: String,
    },
}

impl CfgError {
    /// Creates a parse error.
    pub fn parse_error(what: &'static str, value: impl Into<String>) -> Self {
        Self::ParseError {
            what,
            value: value.into(),
        }
    }

    /// Creates a not-found error.
    pub fn not_found(what: &'static str, key: impl Into<String>) -> Self {
        Self::NotFound {
            what,
            key: key.into(),
        }
    }

    /// Creates a duplicate-entry error.
    pub fn duplicate_entry(what: &'static str, key: impl Into<String>) -> Self {
        Self::DuplicateEntry {
            what,
            key: key.into(),
        }
    }

    /// Creates an unsupported-option error.
    pub fn unsupported_option(option: impl Into<String>) -> Self {
        Self::UnsupportedOption {
            option: option.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CfgError::parse_error("count", "abc");
        assert_eq!(err.to_string(), "invalid count value 'abc'");

        let err = CfgError::not_found("port", "eth0");
        assert_eq!(err.to_string(), "port 'eth0' not found");
    }

    #[test]
    fn test_duplicate_entry() {
        let err = CfgError::duplicate_entry("port", "eth0");
        assert_eq!(err.to_string(), "port 'eth0' already present");
    }

    #[test]
    fn test_unsupported_option() {
        let err = CfgError::unsupported_option("mcast-snooping");
        assert_eq!(err.to_string(), "unsupported option 'mcast-snooping'");
    }
}
