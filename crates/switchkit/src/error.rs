//! Error types for backend operations.
//!
//! Errors are categorized so callers can tell run-fatal transport failures
//! apart from per-object conditions that should be reported and skipped.

use std::fmt;

/// Result type alias for backend operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Categories of backend errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Transport-level failure reaching the backend.
    Network,
    /// Requested object, adapter, or resource does not exist.
    NotFound,
    /// A supplied value is outside the backend's allowed set.
    UnsupportedValue,
    /// The backend accepted the request but rejected the operation.
    Backend,
    /// The backend response could not be understood.
    Format,
}

impl ErrorCategory {
    /// Whether an error of this category should abort the whole run.
    ///
    /// Per-object conditions (`NotFound`, `Backend`, `UnsupportedValue`) are
    /// reported and the run continues; transport failures are fatal.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Network)
    }

    /// User-facing description of this category.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Network => "Backend unreachable",
            Self::NotFound => "Object not found",
            Self::UnsupportedValue => "Value not in the allowed set",
            Self::Backend => "Backend rejected the operation",
            Self::Format => "Unexpected backend response",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Errors returned by backend operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP request failed before a usable response arrived.
    #[error("HTTP request failed: {message}")]
    Http {
        /// Error message.
        message: String,
        /// HTTP status code if available.
        status: Option<u16>,
    },

    /// The requested resource does not exist on the backend.
    #[error("{what} not found")]
    NotFound {
        /// Description of what was requested.
        what: String,
    },

    /// The backend rejected the operation.
    ///
    /// `detail` carries the backend's own machine-readable message verbatim.
    #[error("backend rejected the request: {detail}")]
    Api {
        /// Backend-reported detail string.
        detail: String,
    },

    /// The backend response could not be parsed.
    #[error("invalid backend response: {0}")]
    InvalidResponse(String),

    /// A teaming policy name outside the backend's fixed set.
    #[error("unsupported teaming policy '{value}', valid policies are: {allowed}")]
    UnsupportedTeamingPolicy {
        /// The rejected value.
        value: String,
        /// Comma-separated list of every valid policy.
        allowed: String,
    },
}

impl Error {
    /// Create a not-found error for the given resource description.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Get the error category.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Http { .. } => ErrorCategory::Network,
            Error::NotFound { .. } => ErrorCategory::NotFound,
            Error::Api { .. } => ErrorCategory::Backend,
            Error::InvalidResponse(_) => ErrorCategory::Format,
            Error::UnsupportedTeamingPolicy { .. } => ErrorCategory::UnsupportedValue,
        }
    }

    /// Whether this error should abort the whole run.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        self.category().is_fatal()
    }
}

impl From<ureq::Error> for Error {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::StatusCode(code) => Self::Http {
                message: format!("HTTP {}", code),
                status: Some(code),
            },
            other => Self::Http {
                message: other.to_string(),
                status: None,
            },
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidResponse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_fatal() {
        assert!(ErrorCategory::Network.is_fatal());
        assert!(!ErrorCategory::NotFound.is_fatal());
        assert!(!ErrorCategory::UnsupportedValue.is_fatal());
        assert!(!ErrorCategory::Backend.is_fatal());
        assert!(!ErrorCategory::Format.is_fatal());
    }

    #[test]
    fn test_http_error_category() {
        let err = Error::Http {
            message: "connection refused".to_string(),
            status: None,
        };
        assert_eq!(err.category(), ErrorCategory::Network);
        assert!(err.is_fatal());
    }

    #[test]
    fn test_not_found_category() {
        let err = Error::not_found("backend network vw-17");
        assert_eq!(err.category(), ErrorCategory::NotFound);
        assert!(!err.is_fatal());
        assert_eq!(err.to_string(), "backend network vw-17 not found");
    }

    #[test]
    fn test_api_error_preserves_detail() {
        let err = Error::Api {
            detail: "The object is in use by vm-3".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Backend);
        assert!(err.to_string().contains("The object is in use by vm-3"));
    }

    #[test]
    fn test_unsupported_policy_lists_allowed() {
        let err = Error::UnsupportedTeamingPolicy {
            value: "ROUND_ROBIN".to_string(),
            allowed: "ETHER_CHANNEL, FAILOVER_ORDER".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::UnsupportedValue);
        let display = err.to_string();
        assert!(display.contains("ROUND_ROBIN"));
        assert!(display.contains("ETHER_CHANNEL, FAILOVER_ORDER"));
    }

    #[test]
    fn test_invalid_response_from_serde() {
        let parse_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: Error = parse_err.into();
        assert_eq!(err.category(), ErrorCategory::Format);
    }
}
